use hashbrown::HashMap as FastHashMap;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Compliance tag attached to a route parameter name.
///
/// `None` means the parameter was reviewed and carries nothing sensitive; any other value names
/// the sensitive category. An unclassified parameter is represented by the absence of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataClassification {
    None,
    Sensitive(Box<str>),
}

impl DataClassification {
    pub fn sensitive(category: impl Into<Box<str>>) -> Self {
        Self::Sensitive(category.into())
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Sensitive(category) => Some(category),
        }
    }
}

impl fmt::Display for DataClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Sensitive(category) => f.write_str(category),
        }
    }
}

/// Looks up the classification of a route parameter by name.
pub trait Classifier {
    fn classify(&self, parameter_name: &str) -> Option<&DataClassification>;
}

impl<T: Classifier + ?Sized> Classifier for &T {
    fn classify(&self, parameter_name: &str) -> Option<&DataClassification> {
        (**self).classify(parameter_name)
    }
}

impl<T: Classifier + ?Sized> Classifier for Arc<T> {
    fn classify(&self, parameter_name: &str) -> Option<&DataClassification> {
        (**self).classify(parameter_name)
    }
}

impl<S: BuildHasher> Classifier for HashMap<String, DataClassification, S> {
    fn classify(&self, parameter_name: &str) -> Option<&DataClassification> {
        self.get(parameter_name)
    }
}

impl<S: BuildHasher> Classifier for FastHashMap<Box<str>, DataClassification, S> {
    fn classify(&self, parameter_name: &str) -> Option<&DataClassification> {
        self.get(parameter_name)
    }
}

/// Name to classification table with ASCII case-insensitive lookups, matching how route
/// parameter names are compared by the router.
#[derive(Debug, Clone, Default)]
pub struct ClassificationMap {
    map: FastHashMap<Box<str>, DataClassification>,
}

impl ClassificationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parameter_name: &str, classification: DataClassification) {
        self.map
            .insert(parameter_name.to_ascii_lowercase().into_boxed_str(), classification);
    }

    pub fn with(mut self, parameter_name: &str, classification: DataClassification) -> Self {
        self.insert(parameter_name, classification);
        self
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Classifier for ClassificationMap {
    fn classify(&self, parameter_name: &str) -> Option<&DataClassification> {
        if parameter_name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.map.get(parameter_name.to_ascii_lowercase().as_str())
        } else {
            self.map.get(parameter_name)
        }
    }
}

impl<'a> FromIterator<(&'a str, DataClassification)> for ClassificationMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, DataClassification)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, classification) in iter {
            map.insert(name, classification);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_map_ignores_ascii_case() {
        let map: ClassificationMap = [
            ("chatId", DataClassification::sensitive("PrivateData")),
            ("routeId", DataClassification::None),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            map.classify("CHATID").and_then(DataClassification::category),
            Some("PrivateData")
        );
        assert_eq!(map.classify("routeid"), Some(&DataClassification::None));
        assert_eq!(map.classify("other"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn std_map_lookups_are_exact() {
        let mut map = HashMap::new();
        map.insert("chatId".to_string(), DataClassification::sensitive("EUII"));
        assert!(map.classify("chatId").is_some());
        assert!(map.classify("chatid").is_none());
    }
}
