//! Data model for the Schema Registry API
//!
//! Subject names and schema payloads are opaque strings: the client never
//! parses or escapes them, it only carries them on the wire.

use serde::{Deserialize, Serialize};

/// Version sentinel meaning "the latest version".
///
/// Real versions start at 1; `0` is reserved and maps to the literal
/// `latest` path segment in [`subject_version`] and [`test_compatibility`].
/// Kept as a numeric sentinel (rather than an `Option`) for wire
/// compatibility with existing callers.
///
/// [`subject_version`]: crate::SchemaRegistryClient::subject_version
/// [`test_compatibility`]: crate::SchemaRegistryClient::test_compatibility
pub const LATEST: i32 = 0;

/// A schema string along with its globally unique identifier and its
/// version under a specific subject.
///
/// The subject is the name the schema is registered under. When the
/// registry fronts Kafka topics, that is typically `<topic>-key` or
/// `<topic>-value`. Records are immutable once issued by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSchema {
    /// Subject the schema is registered under.
    pub subject: String,
    /// Unique id of the schema in the registry. The same schema registered
    /// under different subjects keeps the same id.
    pub id: i32,
    /// Version of the schema within the subject.
    pub version: i32,
    /// The schema string, passed through verbatim.
    pub schema: String,
}

/// Compatibility level enforced by the registry when new schema versions
/// are registered under a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Compatibility {
    /// No compatibility checking: any valid schema is accepted.
    None = 0,
    /// Both backward and forward compatible with the latest registered
    /// schema.
    Full = 1,
    /// The latest registered schema can read data written in the new
    /// schema.
    Forward = 2,
    /// The new schema can read data written in the latest registered
    /// schema. This is the registry default.
    #[default]
    Backward = 3,
}

impl std::fmt::Display for Compatibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compatibility::None => write!(f, "NONE"),
            Compatibility::Full => write!(f, "FULL"),
            Compatibility::Forward => write!(f, "FORWARD"),
            Compatibility::Backward => write!(f, "BACKWARD"),
        }
    }
}

impl std::str::FromStr for Compatibility {
    type Err = crate::error::RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(Compatibility::None),
            "FULL" => Ok(Compatibility::Full),
            "FORWARD" => Ok(Compatibility::Forward),
            "BACKWARD" => Ok(Compatibility::Backward),
            _ => Err(crate::error::RegistryError::InvalidCompatibility(
                s.to_string(),
            )),
        }
    }
}

/// Compatibility configuration, either global or scoped to one subject.
///
/// A subject-scoped config overrides the global one for that subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// The compatibility level in use.
    pub compatibility: Compatibility,
}

impl Config {
    pub fn new(compatibility: Compatibility) -> Self {
        Self { compatibility }
    }
}
