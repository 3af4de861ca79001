//! Domain types for the guild dashboard.
//!
//! Only the fields the synchronizer inspects are modelled explicitly; every
//! other field the backend sends is kept in `extra` so a decoded payload
//! serializes back to what the server produced.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A Discord guild snowflake, kept as a string the way the API sends it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(pub String);

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for GuildId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GuildId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Field-level merge
// ---------------------------------------------------------------------------

/// Replace a single named field of a value, leaving the rest untouched.
pub trait FieldMerge {
    /// The set of fields that can be edited in place.
    type Field: Copy + fmt::Debug;

    fn merge_field(&mut self, field: Self::Field, value: String);
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Settings of the guild currently being edited (`/api/guild-data`).
///
/// Only `id` and `name` are typed; they are exactly what the success check
/// inspects, so every accepted body decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildProfile {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GuildProfile {
    /// `description` when the server sent it as a string.
    pub fn description(&self) -> Option<&str> {
        self.extra.get("description").and_then(Value::as_str)
    }
}

/// Editable fields of [`GuildProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildProfileField {
    Name,
    Description,
}

impl fmt::Display for GuildProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuildProfileField::Name => write!(f, "name"),
            GuildProfileField::Description => write!(f, "description"),
        }
    }
}

impl FieldMerge for GuildProfile {
    type Field = GuildProfileField;

    fn merge_field(&mut self, field: GuildProfileField, value: String) {
        match field {
            GuildProfileField::Name => self.name = value,
            GuildProfileField::Description => {
                self.extra.insert(field.to_string(), Value::String(value));
            }
        }
    }
}

/// One entry of the user's guild collection (`/api/guilds`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildSummary {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GuildSummary {
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }
}

/// One option category of a guild (`/api/options/guild/:id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionCategory {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OptionCategory {
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
