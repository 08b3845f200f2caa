use thiserror::Error;

/// Failures translating canonical fields to the wire format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// An outgoing field has no wire name. Unknown incoming wire fields are dropped instead.
    #[error("Field {field:?} has no wire mapping on {entity}")]
    UnmappableField {
        /// Entity the translator belongs to
        entity: &'static str,
        /// Canonical field name
        field: String,
    },
}
