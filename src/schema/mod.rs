//! Field-name translation between the service's wire records and canonical records.
//!
//! Each entity has one [`SchemaTranslator`]. Its bidirectional field table maps
//! canonical names to wire names. Wire aliases are accepted on decode only. The
//! read-only set guards edits and the server-assigned set guards creates. Entities are
//! written against canonical names only; the connector sees wire names only.

mod social_connection;
mod trainer;
mod update;
mod user;


use serde_json::Value;

use crate::{
    error::{Error, SchemaError, ValidationError},
    model::Record,
};

pub use self::{
    social_connection::SOCIAL_CONNECTION, trainer::TRAINER, update::UPDATE, user::USER,
};

/// Bidirectional field mapping for one entity.
#[derive(Debug)]
pub struct SchemaTranslator {
    entity: &'static str,
    /// `(canonical, wire)` pairs valid in both directions
    fields: &'static [(&'static str, &'static str)],
    /// `(wire, canonical)` pairs only accepted when decoding
    wire_aliases: &'static [(&'static str, &'static str)],
    read_only: &'static [&'static str],
    server_assigned: &'static [&'static str],
}

impl SchemaTranslator {
    /// Creates a translator.
    ///
    /// # Arguments
    /// - `entity` - Entity name used in error messages
    /// - `fields` - `(canonical, wire)` pairs valid in both directions
    /// - `wire_aliases` - `(wire, canonical)` pairs only accepted when decoding
    /// - `read_only` - Canonical fields that may never be edited
    /// - `server_assigned` - Canonical fields the service assigns on create
    pub const fn new(
        entity: &'static str,
        fields: &'static [(&'static str, &'static str)],
        wire_aliases: &'static [(&'static str, &'static str)],
        read_only: &'static [&'static str],
        server_assigned: &'static [&'static str],
    ) -> Self {
        Self {
            entity,
            fields,
            wire_aliases,
            read_only,
            server_assigned,
        }
    }

    /// Name of the entity this translator belongs to.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Canonical name for a wire field, if the field is known.
    pub fn canonical_field(&self, wire: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(_, w)| *w == wire)
            .map(|(canonical, _)| *canonical)
            .or_else(|| {
                self.wire_aliases
                    .iter()
                    .find(|(w, _)| *w == wire)
                    .map(|(_, canonical)| *canonical)
            })
    }

    /// Wire name for a canonical field.
    ///
    /// # Returns
    /// - `Ok(&str)` - The wire name
    /// - `Err(SchemaError::UnmappableField)` - The field has no wire counterpart
    pub fn to_wire_field(&self, canonical: &str) -> Result<&'static str, SchemaError> {
        self.fields
            .iter()
            .find(|(c, _)| *c == canonical)
            .map(|(_, wire)| *wire)
            .ok_or_else(|| SchemaError::UnmappableField {
                entity: self.entity,
                field: canonical.to_string(),
            })
    }

    /// Encodes a single canonical field and its value for the wire.
    pub fn to_wire(
        &self,
        canonical: &str,
        value: Value,
    ) -> Result<(&'static str, Value), SchemaError> {
        Ok((self.to_wire_field(canonical)?, value))
    }

    /// Translates a wire record into canonical names.
    ///
    /// Unknown wire fields are dropped so that fields added by newer service versions
    /// never break decoding.
    pub fn to_canonical(&self, wire: &Record) -> Record {
        let mut canonical = Record::new();
        for (field, value) in wire {
            match self.canonical_field(field) {
                Some(name) => {
                    canonical.insert(name.to_string(), value.clone());
                }
                None => tracing::trace!(
                    entity = self.entity,
                    field = %field,
                    "dropping unknown wire field"
                ),
            }
        }
        canonical
    }

    /// Encodes a whole canonical record, failing on the first unmappable field.
    pub fn to_wire_record(&self, canonical: &Record) -> Result<Record, SchemaError> {
        canonical
            .iter()
            .map(|(field, value)| self.to_wire(field, value.clone()))
            .map(|pair| pair.map(|(wire, value)| (wire.to_string(), value)))
            .collect()
    }

    /// Returns true if the canonical field can never be edited.
    pub fn is_read_only(&self, canonical: &str) -> bool {
        self.read_only.contains(&canonical)
    }

    /// Fails with [`ValidationError::ReadOnlyField`] if the canonical field is read-only.
    pub fn assert_writable(&self, canonical: &str) -> Result<(), ValidationError> {
        if self.is_read_only(canonical) {
            return Err(ValidationError::ReadOnlyField {
                entity: self.entity,
                field: canonical.to_string(),
            });
        }
        Ok(())
    }

    /// Validates and encodes a canonical edit patch.
    ///
    /// Every field is checked for writability before any is mapped, so a rejected patch
    /// never produces a partial payload.
    pub fn encode_edit(&self, patch: &Record) -> Result<Record, Error> {
        for field in patch.keys() {
            self.assert_writable(field)?;
        }
        Ok(self.to_wire_record(patch)?)
    }

    /// Validates and encodes a canonical create payload.
    ///
    /// Fields the service assigns itself (ids, UUIDs) are rejected; other read-only
    /// fields such as an owner id are allowed since they can only be set on create.
    pub fn encode_create(&self, payload: &Record) -> Result<Record, Error> {
        for field in payload.keys() {
            if self.server_assigned.contains(&field.as_str()) {
                return Err(ValidationError::ReadOnlyField {
                    entity: self.entity,
                    field: field.clone(),
                }
                .into());
            }
        }
        Ok(self.to_wire_record(payload)?)
    }

    /// Canonical fields mapped in both directions.
    pub fn safe_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(canonical, _)| *canonical)
    }

    /// Canonical fields rejected by [`assert_writable`](Self::assert_writable).
    pub fn read_only_fields(&self) -> &'static [&'static str] {
        self.read_only
    }
}
