//! Flat record files.
//!
//! A record file is TOML with one `[[record]]` table per record:
//!
//! ```toml
//! [[record]]
//! id = 1
//! name = "root"
//!
//! [[record]]
//! id = 2
//! parent = 1
//! name = "child"
//! ```
//!
//! Which fields hold the key, the parent key and the label is configurable
//! through [`RecordSchema`]. A missing parent field, or an empty string,
//! means "no parent".

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use toml::{Table, Value};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;

/// Key or parent key of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    Int(i64),
    Str(String),
}

impl RecordKey {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(Self::Int(*i)),
            Value::String(s) => Some(Self::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// One loaded record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: RecordKey,
    pub parent: Option<RecordKey>,
    /// Display label (label field, falling back to the key)
    pub label: String,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Field names used to read records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub key_field: String,
    pub parent_field: String,
    pub label_field: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for RecordSchema {
    fn from(settings: &Settings) -> Self {
        Self {
            key_field: settings.key_field.clone(),
            parent_field: settings.parent_field.clone(),
            label_field: settings.label_field.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecordFile {
    #[serde(default)]
    record: Vec<Table>,
}

/// Read and parse a record file.
#[instrument(level = "debug", skip(schema))]
pub fn load_records(path: &Path, schema: &RecordSchema) -> ApplicationResult<Vec<Record>> {
    let content = std::fs::read_to_string(path).with_path_context("read records", path)?;
    parse_records(&content, path, schema)
}

/// Parse record file content; `path` is only used in error messages.
pub fn parse_records(
    content: &str,
    path: &Path,
    schema: &RecordSchema,
) -> ApplicationResult<Vec<Record>> {
    let file: RecordFile = toml::from_str(content).map_err(|e| ApplicationError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let records = file
        .record
        .into_iter()
        .enumerate()
        .map(|(pos, fields)| {
            to_record(&fields, schema).map_err(|message| ApplicationError::InvalidRecord {
                path: path.to_path_buf(),
                index: pos + 1,
                message,
            })
        })
        .collect::<ApplicationResult<Vec<_>>>()?;

    debug!(count = records.len(), "parsed records");
    Ok(records)
}

fn to_record(fields: &Table, schema: &RecordSchema) -> Result<Record, String> {
    let key = match fields.get(&schema.key_field) {
        None => return Err(format!("missing key field `{}`", schema.key_field)),
        Some(value) => RecordKey::from_value(value).ok_or_else(|| {
            format!(
                "key field `{}` must be an integer or a string",
                schema.key_field
            )
        })?,
    };

    let parent = match fields.get(&schema.parent_field) {
        None => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(RecordKey::from_value(value).ok_or_else(|| {
            format!(
                "parent field `{}` must be an integer or a string",
                schema.parent_field
            )
        })?),
    };

    let label = match fields.get(&schema.label_field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Integer(i)) => i.to_string(),
        _ => key.to_string(),
    };

    Ok(Record { key, parent, label })
}
