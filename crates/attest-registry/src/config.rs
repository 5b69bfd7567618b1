//! Registry configuration.

use serde::{Deserialize, Serialize};

use attest_registry_core::{Principal, RecordId};

/// Deployment-time settings for a registry instance.
///
/// ```rust
/// use attest_registry::RegistryConfig;
///
/// let config = RegistryConfig::from_json(&format!(
///     r#"{{ "admin": "{}", "initial_record_id": 100 }}"#,
///     "ab".repeat(32)
/// ))
/// .unwrap();
/// assert_eq!(config.initial_record_id, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// The administrator identity, fixed for the registry's lifetime.
    pub admin: Principal,

    /// Counter value before the first registration; the first record gets
    /// `initial_record_id + 1`.
    #[serde(default)]
    pub initial_record_id: u64,
}

impl RegistryConfig {
    /// Configuration with the given administrator and a counter at zero.
    pub fn new(admin: Principal) -> Self {
        Self {
            admin,
            initial_record_id: 0,
        }
    }

    /// Start the id counter somewhere other than zero.
    pub fn with_initial_record_id(mut self, initial_record_id: u64) -> Self {
        self.initial_record_id = initial_record_id;
        self
    }

    /// The counter value as a record id.
    pub fn initial_counter(&self) -> RecordId {
        RecordId::new(self.initial_record_id)
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_record_id_defaults_to_zero() {
        let admin = Principal::derive("admin");
        let json = format!(r#"{{ "admin": "{}" }}"#, admin.to_hex());
        let config = RegistryConfig::from_json(&json).unwrap();
        assert_eq!(config, RegistryConfig::new(admin));
    }

    #[test]
    fn test_rejects_bad_admin() {
        assert!(RegistryConfig::from_json(r#"{ "admin": "not-hex" }"#).is_err());
    }
}
