use route_telemetry_rs::{
    ClassificationMap, DataClassification, ExtractedParameter, REDACTED_PLACEHOLDER,
    RedactionMode, RedactionModeError, RedactionPolicy, compile_template, extract_parameters,
};

fn redact(value: &str, _: &DataClassification) -> String {
    format!("Redacted:{value}")
}

fn chat_classes() -> ClassificationMap {
    ClassificationMap::new().with("chatId", DataClassification::sensitive("Sensitive"))
}

fn run(mode: RedactionMode) -> Vec<(String, String, bool)> {
    let route =
        compile_template("/api/routes/{routeId}/chats/{chatId}").expect("template should compile");
    let policy = RedactionPolicy::new(mode, chat_classes(), redact);
    let mut out = vec![ExtractedParameter::default(); route.parameter_count()];
    assert!(extract_parameters(
        "api/routes/routeId123/chats/chatId123",
        &route,
        &policy,
        &mut out
    ));
    out.iter()
        .map(|p| (p.name.to_string(), p.final_value.to_string(), p.is_redacted))
        .collect()
}

fn triple(name: &str, value: &str, redacted: bool) -> (String, String, bool) {
    (name.to_string(), value.to_string(), redacted)
}

#[test]
fn policy_when_strict_then_unclassified_becomes_placeholder() {
    assert_eq!(
        run(RedactionMode::Strict),
        vec![
            triple("routeId", REDACTED_PLACEHOLDER, true),
            triple("chatId", "Redacted:chatId123", true),
        ]
    );
}

#[test]
fn policy_when_loose_then_only_classified_is_redacted() {
    assert_eq!(
        run(RedactionMode::Loose),
        vec![
            triple("routeId", "routeId123", false),
            triple("chatId", "Redacted:chatId123", true),
        ]
    );
}

#[test]
fn policy_when_none_then_nothing_is_redacted() {
    assert_eq!(
        run(RedactionMode::None),
        vec![
            triple("routeId", "routeId123", false),
            triple("chatId", "chatId123", false),
        ]
    );
}

#[test]
fn policy_when_classified_then_loose_and_strict_agree() {
    let loose = run(RedactionMode::Loose);
    let strict = run(RedactionMode::Strict);
    assert_eq!(loose[1], strict[1]);
    assert_ne!(loose[0], strict[0]);
}

#[test]
fn policy_when_mode_value_out_of_range_then_fails_fast() {
    for value in [-1i64, 3, 255] {
        match RedactionPolicy::from_raw_mode(value, chat_classes(), redact) {
            Err(err) => {
                assert_eq!(err, RedactionModeError::Unsupported { value });
                assert_eq!(err.to_string(), "unsupported redaction mode value");
            }
            Ok(_) => panic!("mode value {value} should be rejected"),
        }
    }
}
