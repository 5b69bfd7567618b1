//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use attest_registry::{Registry, RegistryConfig};
use attest_registry_core::{Principal, RecordFields, RecordId, TxContext};
use tracing_subscriber::filter::LevelFilter;

/// A registry with a fixed administrator and three ordinary principals.
pub struct TestFixture {
    pub admin: Principal,
    pub alice: Principal,
    pub bob: Principal,
    pub carol: Principal,
    pub registry: Registry,
}

impl TestFixture {
    /// Create a fixture with an empty registry.
    pub fn new() -> Self {
        Self::with_config(|config| config)
    }

    /// Create a fixture, adjusting the configuration first.
    pub fn with_config(adjust: impl FnOnce(RegistryConfig) -> RegistryConfig) -> Self {
        let admin = Principal::derive("admin");
        Self {
            admin,
            alice: Principal::derive("alice"),
            bob: Principal::derive("bob"),
            carol: Principal::derive("carol"),
            registry: Registry::new(adjust(RegistryConfig::new(admin))),
        }
    }

    /// A transaction context for `sender` at `height`.
    pub fn ctx(&self, sender: Principal, height: u64) -> TxContext {
        TxContext::new(sender, height)
    }

    /// Register [`sample_fields`] as `controller` at `height`.
    ///
    /// Panics if registration fails; fixtures are for tests only.
    pub fn register_sample(&mut self, controller: Principal, height: u64) -> RecordId {
        let ctx = self.ctx(controller, height);
        self.registry
            .register(&ctx, sample_fields())
            .expect("sample registration failed")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The sensor record used throughout the tests.
pub fn sample_fields() -> RecordFields {
    RecordFields::new("sensor-1", 42, "temp probe", ["iot", "lab"])
}

/// Fields with `count` distinct short tags.
pub fn fields_with_tags(count: usize) -> RecordFields {
    RecordFields::new(
        "tagged",
        1,
        "tag capacity probe",
        (0..count).map(|i| format!("t{i}")),
    )
}

/// Route `tracing` output through the test harness. Safe to call from
/// every test.
pub fn init_tracing() {
    // Only the first call installs a subscriber; later calls fail and are ignored.
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_principals_distinct() {
        let fixture = TestFixture::new();
        assert_ne!(fixture.admin, fixture.alice);
        assert_ne!(fixture.alice, fixture.bob);
        assert_ne!(fixture.bob, fixture.carol);
        assert_eq!(fixture.registry.admin(), &fixture.admin);
    }

    #[test]
    fn test_register_sample() {
        let mut fixture = TestFixture::new();
        let alice = fixture.alice;
        let id = fixture.register_sample(alice, 5);

        let record = fixture.registry.record(&fixture.ctx(alice, 5), id).unwrap();
        assert_eq!(record.fields, sample_fields());
    }

    #[test]
    fn test_fields_with_tags() {
        assert_eq!(fields_with_tags(10).tags.len(), 10);
        assert!(fields_with_tags(10).validate().is_ok());
        assert!(fields_with_tags(11).validate().is_err());
    }
}
