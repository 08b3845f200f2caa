use thiserror::Error;

/// Client-side validation failures.
///
/// These are raised before any request reaches the connector, so a failed validation
/// never leaves an entity half-updated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field is read-only for this entity and cannot be edited.
    #[error("Field {field:?} is read-only on {entity}")]
    ReadOnlyField {
        /// Entity the translator belongs to
        entity: &'static str,
        /// Canonical field name
        field: String,
    },
    /// A trainer code did not contain exactly twelve digits once whitespace was removed.
    #[error("Malformed trainer code: {0:?}")]
    MalformedTrainerCode(String),
    /// Level tiers were not strictly ordered or a non-final tier had no next requirement.
    #[error("Invalid level table: {0}")]
    InvalidLevelTable(String),
    /// A social connection was resolved against a lookup for a different provider.
    #[error("Social connection provider mismatch: expected {expected:?}, got {actual:?}")]
    ProviderMismatch {
        /// Provider handled by the lookup
        expected: String,
        /// Provider of the social connection
        actual: String,
    },
}
