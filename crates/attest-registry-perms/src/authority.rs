//! Authority evaluation.
//!
//! Three principals may read a record: its controller, a viewer holding a
//! grant, and the administrator. Writes are reserved for the controller,
//! and `secure` for the controller or the administrator.

use attest_registry_core::{Principal, Record, RegistryError, Result};

use crate::state::PermissionTable;

/// Which branch of the authority check admitted a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Authority {
    /// The caller controls the record.
    Controller,
    /// The caller holds a grant on the record.
    Viewer,
    /// The caller is the administrator.
    Administrator,
}

/// Evaluates caller authority against one permission table and one
/// administrator identity.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    table: &'a PermissionTable,
    admin: &'a Principal,
}

impl<'a> Evaluator<'a> {
    pub fn new(table: &'a PermissionTable, admin: &'a Principal) -> Self {
        Self { table, admin }
    }

    pub fn is_admin(&self, caller: &Principal) -> bool {
        caller == self.admin
    }

    /// The authority under which `caller` may read `record`, if any.
    ///
    /// Controller wins over administrator, administrator over viewer.
    pub fn read_authority(&self, record: &Record, caller: &Principal) -> Option<Authority> {
        if record.is_controlled_by(caller) {
            Some(Authority::Controller)
        } else if self.is_admin(caller) {
            Some(Authority::Administrator)
        } else if self.table.is_granted(record.record_id(), caller) {
            Some(Authority::Viewer)
        } else {
            None
        }
    }

    /// Whether `caller` may read `record`.
    pub fn can_read(&self, record: &Record, caller: &Principal) -> bool {
        self.read_authority(record, caller).is_some()
    }

    /// Require read access, failing with `UnauthorizedAction`.
    pub fn require_read(&self, record: &Record, caller: &Principal) -> Result<Authority> {
        self.read_authority(record, caller).ok_or_else(|| {
            tracing::warn!(record_id = %record.record_id(), %caller, "read denied");
            RegistryError::UnauthorizedAction {
                record_id: record.record_id(),
                caller: *caller,
            }
        })
    }

    /// Require controller or administrator, failing with `AdminAccessDenied`.
    pub fn require_secure(&self, record: &Record, caller: &Principal) -> Result<Authority> {
        if record.is_controlled_by(caller) {
            Ok(Authority::Controller)
        } else if self.is_admin(caller) {
            Ok(Authority::Administrator)
        } else {
            tracing::warn!(record_id = %record.record_id(), %caller, "secure denied");
            Err(RegistryError::AdminAccessDenied(*caller))
        }
    }

    /// Require the administrator, failing with `AdminAccessDenied`.
    pub fn require_admin(&self, caller: &Principal) -> Result<()> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            tracing::warn!(%caller, "administrator check failed");
            Err(RegistryError::AdminAccessDenied(*caller))
        }
    }
}

/// Require that `caller` controls `record`, failing with `OwnershipConflict`.
///
/// The administrator gets no exemption here.
pub fn require_controller(record: &Record, caller: &Principal) -> Result<()> {
    if record.is_controlled_by(caller) {
        Ok(())
    } else {
        tracing::warn!(record_id = %record.record_id(), %caller, "ownership check failed");
        Err(RegistryError::OwnershipConflict {
            record_id: record.record_id(),
            caller: *caller,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_registry_core::{BlockHeight, ErrorCode, RecordFields, RecordId};

    fn record() -> Record {
        Record::new(
            RecordId::new(1),
            Principal::derive("alice"),
            BlockHeight(0),
            RecordFields::new("label", 1, "summary", ["tag"]),
        )
    }

    fn admin() -> Principal {
        Principal::derive("admin")
    }

    #[test]
    fn test_read_authority_branches() {
        let mut table = PermissionTable::new();
        let admin = admin();
        let bob = Principal::derive("bob");
        let carol = Principal::derive("carol");
        let record = record();

        table.grant(record.record_id(), bob, BlockHeight(0));
        let eval = table.evaluator(&admin);

        assert_eq!(
            eval.read_authority(&record, &Principal::derive("alice")),
            Some(Authority::Controller)
        );
        assert_eq!(eval.read_authority(&record, &admin), Some(Authority::Administrator));
        assert_eq!(eval.read_authority(&record, &bob), Some(Authority::Viewer));
        assert_eq!(eval.read_authority(&record, &carol), None);
        assert!(!eval.can_read(&record, &carol));
    }

    #[test]
    fn test_controller_preferred_over_grant() {
        let mut table = PermissionTable::new();
        let alice = Principal::derive("alice");
        let record = record();
        table.grant(record.record_id(), alice, BlockHeight(0));

        let admin = admin();
        let eval = table.evaluator(&admin);
        assert_eq!(eval.read_authority(&record, &alice), Some(Authority::Controller));
    }

    #[test]
    fn test_require_read_error() {
        let table = PermissionTable::new();
        let admin = admin();
        let err = table
            .evaluator(&admin)
            .require_read(&record(), &Principal::derive("mallory"))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnauthorizedAction);
    }

    #[test]
    fn test_require_secure() {
        let mut table = PermissionTable::new();
        let bob = Principal::derive("bob");
        let record = record();
        table.grant(record.record_id(), bob, BlockHeight(0));

        let admin = admin();
        let eval = table.evaluator(&admin);
        assert_eq!(
            eval.require_secure(&record, &Principal::derive("alice")).unwrap(),
            Authority::Controller
        );
        assert_eq!(eval.require_secure(&record, &admin).unwrap(), Authority::Administrator);

        // A read grant is not enough to secure.
        let err = eval.require_secure(&record, &bob).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AdminAccessDenied);
    }

    #[test]
    fn test_require_controller_has_no_admin_exemption() {
        let err = require_controller(&record(), &admin()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OwnershipConflict);
        assert!(require_controller(&record(), &Principal::derive("alice")).is_ok());
    }

    #[test]
    fn test_require_admin() {
        let table = PermissionTable::new();
        let admin = admin();
        let eval = table.evaluator(&admin);
        assert!(eval.require_admin(&admin).is_ok());
        assert_eq!(
            eval.require_admin(&Principal::derive("alice")).unwrap_err().code(),
            ErrorCode::AdminAccessDenied
        );
    }
}
