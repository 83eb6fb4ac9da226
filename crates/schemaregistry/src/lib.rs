//! schemaregistry - client for Confluent-compatible Schema Registry services
//!
//! Exposes one operation per registry capability: register schemas under a
//! subject, retrieve schemas by id or version, list subjects and versions,
//! test compatibility, and read or update compatibility configuration.
//! Each operation is a single HTTP round trip against the registry's
//! versioned JSON API (`application/vnd.schemaregistry.v1+json`).
//!
//! Schema payloads and subject names are opaque to the client; whether a
//! schema is valid is decided entirely by the remote service. There is no
//! caching and no retry policy; deadlines and connection behavior belong
//! to the [`reqwest::Client`] the caller supplies.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemaregistry::{Compatibility, Config, SchemaRegistryClient, LATEST};
//!
//! let registry = SchemaRegistryClient::new("http://localhost:8081")?;
//!
//! // Register a schema and read it back by id
//! let id = registry.register("frames-value", schema).await?;
//! let schema = registry.schema(id).await?;
//!
//! // Latest version of a subject
//! let latest = registry.subject_version("frames-value", LATEST).await?;
//!
//! // Tighten the subject's compatibility policy
//! let config = Config::new(Compatibility::Full);
//! registry.set_subject_config("frames-value", &config).await?;
//! ```
//!
//! Errors split into three disjoint kinds: construction
//! ([`RegistryError::InvalidEndpoint`]), transport
//! ([`RegistryError::Transport`]), and API
//! ([`RegistryError::Api`]), so callers can branch on semantic
//! conditions like [`error_codes::SUBJECT_NOT_FOUND`] instead of HTTP
//! statuses.

pub mod client;
pub mod error;
pub mod types;

pub use client::{Registry, SchemaRegistryClient};
pub use error::{error_codes, ApiError, RegistryError, RegistryResult};
pub use types::{Compatibility, Config, SubjectSchema, LATEST};
