//! System contract registry installed at the Randao fork

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::address::Address;

/// Name to address records written into state when the registry is installed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    #[serde(default)]
    pub records: BTreeMap<String, Address>,
    #[serde(default)]
    pub owner: Address,
}

impl RegistryConfig {
    pub fn new(owner: Address) -> Self {
        Self {
            records: BTreeMap::new(),
            owner,
        }
    }

    pub fn with_record(mut self, name: impl Into<String>, address: Address) -> Self {
        self.records.insert(name.into(), address);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Address> {
        self.records.get(name)
    }
}
