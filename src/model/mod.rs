//! Plain data types shared by the translator, connector and entities.

pub mod faction;
pub mod id;
pub mod stats;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// A string-keyed record as exchanged with the service, before or after translation.
pub type Record = serde_json::Map<String, Value>;

/// Decodes a canonical record into its typed shape.
///
/// Absent fields become `None` on the typed record; a present field of the wrong type
/// is an [`Error::Decode`].
pub(crate) fn decode<T: DeserializeOwned>(record: Record) -> Result<T, Error> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

/// Converts any JSON value into a record, treating non-objects as malformed.
pub(crate) fn expect_record(value: Value) -> Result<Record, Error> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(Error::Decode(serde::de::Error::custom(format!(
            "expected a JSON object, got {other}"
        )))),
    }
}

/// Converts a JSON array of objects into records.
pub(crate) fn expect_records(value: Value) -> Result<Vec<Record>, Error> {
    match value {
        Value::Array(values) => values.into_iter().map(expect_record).collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::Decode(serde::de::Error::custom(format!(
            "expected a JSON array, got {other}"
        )))),
    }
}
