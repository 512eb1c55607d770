//! Environment variables exposed through `/config.json`.

use std::collections::BTreeMap;

use serde::Serialize;

/// Snapshot of selected environment variables, taken once at startup.
///
/// Unset variables map to the empty string. Keys serialize in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigVariables(BTreeMap<String, String>);

impl ConfigVariables {
    /// Resolve a comma separated list of names against the process environment.
    pub fn from_env(names: &str) -> Self {
        Self::from_names(names, |key| std::env::var(key).ok())
    }

    /// Resolve a comma separated list of names with the given lookup.
    ///
    /// Names are trimmed and empty entries are skipped.
    pub fn from_names<F>(names: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let variables = names
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| (key.to_string(), lookup(key).unwrap_or_default()))
            .collect();
        Self(variables)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize as a flat JSON object.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
