//! Handshake variables
//!
//! At the start of every session the peer sends a block of `name: value` lines
//! describing the call. The block is parsed once into [`Variables`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name/value mapping received in the handshake block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(HashMap<String, String>);

impl Variables {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any earlier value with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a variable by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of variables
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the handshake carried no variables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The script requested by the dialplan (`agi_request`)
    #[must_use]
    pub fn request(&self) -> Option<&str> {
        self.get("agi_request")
    }

    /// The channel the call is on (`agi_channel`)
    #[must_use]
    pub fn channel(&self) -> Option<&str> {
        self.get("agi_channel")
    }

    /// Unique id of the call (`agi_uniqueid`)
    #[must_use]
    pub fn unique_id(&self) -> Option<&str> {
        self.get("agi_uniqueid")
    }

    /// Consume the wrapper and return the underlying map
    #[must_use]
    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl FromIterator<(String, String)> for Variables {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<HashMap<String, String>> for Variables {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}
