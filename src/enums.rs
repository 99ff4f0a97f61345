use crate::redaction::RedactionModeError;

/// How aggressively explicit route parameter values are redacted before they reach telemetry.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum RedactionMode {
    /// Values are emitted as they appear in the path.
    None = 0,
    /// Redact only parameters explicitly classified as sensitive.
    Loose = 1,
    /// Redact everything not explicitly classified as non-sensitive.
    #[default]
    Strict = 2,
}

impl TryFrom<u8> for RedactionMode {
    type Error = RedactionModeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<i64> for RedactionMode {
    type Error = RedactionModeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Loose),
            2 => Ok(Self::Strict),
            _ => Err(RedactionModeError::Unsupported { value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_known_discriminants() {
        assert_eq!(RedactionMode::try_from(0u8), Ok(RedactionMode::None));
        assert_eq!(RedactionMode::try_from(1i64), Ok(RedactionMode::Loose));
        assert_eq!(RedactionMode::try_from(2i64), Ok(RedactionMode::Strict));
        assert_eq!(RedactionMode::Strict as u8, 2);
    }

    #[test]
    fn rejects_out_of_range_values_with_fixed_message() {
        for value in [3i64, -1, i64::MAX] {
            let err = RedactionMode::try_from(value).unwrap_err();
            assert_eq!(err, RedactionModeError::Unsupported { value });
            assert_eq!(err.to_string(), "unsupported redaction mode value");
        }
    }
}
