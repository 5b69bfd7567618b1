//! Error types for the Attest Registry.
//!
//! Every operation failure is one of a fixed set of kinds, each with a
//! stable numeric code. Field-level detail lives in [`ValidationError`] and
//! collapses into the matching kind on conversion.

use thiserror::Error;

use crate::types::{Principal, RecordId};

/// Numeric error codes, one per failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    AdminAccessDenied = 300,
    RecordNotFound = 301,
    DuplicateEntry = 302,
    InvalidIdentifier = 303,
    InvalidDataFormat = 304,
    UnauthorizedAction = 305,
    OwnershipConflict = 306,
    RestrictedOperation = 307,
    TagValidationFailed = 308,
}

impl ErrorCode {
    /// All codes, in numeric order.
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::AdminAccessDenied,
        ErrorCode::RecordNotFound,
        ErrorCode::DuplicateEntry,
        ErrorCode::InvalidIdentifier,
        ErrorCode::InvalidDataFormat,
        ErrorCode::UnauthorizedAction,
        ErrorCode::OwnershipConflict,
        ErrorCode::RestrictedOperation,
        ErrorCode::TagValidationFailed,
    ];

    /// The wire value of this code.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Look up a code by its wire value.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_u32() == code)
    }
}

/// Errors returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller is not the administrator, or tried to revoke their own access.
    #[error("admin access denied for {0}")]
    AdminAccessDenied(Principal),

    /// No record with this id.
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    /// A record with this id already exists.
    #[error("duplicate entry: {0}")]
    DuplicateEntry(RecordId),

    /// Label or summary out of bounds.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(ValidationError),

    /// Weight out of bounds.
    #[error("invalid data format: {0}")]
    InvalidDataFormat(ValidationError),

    /// Caller fails the read-permission check.
    #[error("unauthorized: {caller} may not read record {record_id}")]
    UnauthorizedAction {
        record_id: RecordId,
        caller: Principal,
    },

    /// Caller is not the record's controller.
    #[error("ownership conflict: {caller} does not control record {record_id}")]
    OwnershipConflict {
        record_id: RecordId,
        caller: Principal,
    },

    /// Operation refused by the registry itself.
    #[error("restricted operation: {0}")]
    RestrictedOperation(String),

    /// Tag sequence malformed or would exceed its capacity.
    #[error("tag validation failed: {0}")]
    TagValidationFailed(ValidationError),
}

impl RegistryError {
    /// The numeric code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::AdminAccessDenied(_) => ErrorCode::AdminAccessDenied,
            RegistryError::RecordNotFound(_) => ErrorCode::RecordNotFound,
            RegistryError::DuplicateEntry(_) => ErrorCode::DuplicateEntry,
            RegistryError::InvalidIdentifier(_) => ErrorCode::InvalidIdentifier,
            RegistryError::InvalidDataFormat(_) => ErrorCode::InvalidDataFormat,
            RegistryError::UnauthorizedAction { .. } => ErrorCode::UnauthorizedAction,
            RegistryError::OwnershipConflict { .. } => ErrorCode::OwnershipConflict,
            RegistryError::RestrictedOperation(_) => ErrorCode::RestrictedOperation,
            RegistryError::TagValidationFailed(_) => ErrorCode::TagValidationFailed,
        }
    }
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("label must be 1-64 characters, got {0}")]
    LabelLength(usize),

    #[error("weight must be in 1..1000000000, got {0}")]
    WeightOutOfRange(u64),

    #[error("summary must be 1-128 characters, got {0}")]
    SummaryLength(usize),

    #[error("tag count must be 1-10, got {0}")]
    TagCount(usize),

    #[error("tag {index} must be 1-32 characters, got {len}")]
    TagLength { index: usize, len: usize },

    #[error("appending {added} tags to {existing} would exceed 10")]
    TagCapacity { existing: usize, added: usize },
}

impl From<ValidationError> for RegistryError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::LabelLength(_) | ValidationError::SummaryLength(_) => {
                RegistryError::InvalidIdentifier(e)
            }
            ValidationError::WeightOutOfRange(_) => RegistryError::InvalidDataFormat(e),
            ValidationError::TagCount(_)
            | ValidationError::TagLength { .. }
            | ValidationError::TagCapacity { .. } => RegistryError::TagValidationFailed(e),
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_code(code.as_u32()), Some(code));
        }
        assert_eq!(ErrorCode::from_code(299), None);
        assert_eq!(ErrorCode::from_code(309), None);
    }

    #[test]
    fn test_validation_maps_to_kind() {
        let e: RegistryError = ValidationError::LabelLength(0).into();
        assert_eq!(e.code(), ErrorCode::InvalidIdentifier);

        let e: RegistryError = ValidationError::SummaryLength(129).into();
        assert_eq!(e.code(), ErrorCode::InvalidIdentifier);

        let e: RegistryError = ValidationError::WeightOutOfRange(0).into();
        assert_eq!(e.code(), ErrorCode::InvalidDataFormat);

        let e: RegistryError = ValidationError::TagLength { index: 2, len: 33 }.into();
        assert_eq!(e.code(), ErrorCode::TagValidationFailed);

        let e: RegistryError = ValidationError::TagCapacity { existing: 10, added: 1 }.into();
        assert_eq!(e.code(), ErrorCode::TagValidationFailed);
    }

    #[test]
    fn test_display_carries_context() {
        let e = RegistryError::RecordNotFound(RecordId::new(7));
        assert_eq!(e.to_string(), "record not found: 7");
    }
}
