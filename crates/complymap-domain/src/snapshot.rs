use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Immutable point-in-time view of the target environment.
///
/// Keys are flat dotted names (`iam.mfa_enabled`, `storage.encryption`);
/// values are arbitrary JSON. The snapshot is fetched up front by the
/// caller, so rule evaluation never blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvSnapshot {
    values: BTreeMap<String, JsonValue>,
}

impl EnvSnapshot {
    pub fn new(values: BTreeMap<String, JsonValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, JsonValue)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
