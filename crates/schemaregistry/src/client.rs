//! HTTP client for Confluent-compatible Schema Registry services
//!
//! Every operation is a single request/response round trip: inputs are
//! encoded into a resource path and JSON body, the response is decoded
//! into either the operation's typed result or a structured [`ApiError`].
//! The client holds no caches and performs no retries.

use async_trait::async_trait;
use reqwest::{header, Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, RegistryError, RegistryResult};
use crate::types::{Compatibility, Config, SubjectSchema, LATEST};

/// Versioned media type spoken by the registry API. Sent as `Content-Type`
/// on requests carrying a body and as `Accept` on reads.
const MEDIA_TYPE: &str = "application/vnd.schemaregistry.v1+json";

/// Operations exposed by a Schema Registry.
///
/// Implemented by [`SchemaRegistryClient`]; the trait seam lets consumers
/// substitute a test double.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Registry: Send + Sync {
    /// Gets the schema string registered under the given id.
    async fn schema(&self, id: i32) -> RegistryResult<String>;

    /// Gets the list of registered subjects.
    async fn subjects(&self) -> RegistryResult<Vec<String>>;

    /// Gets the list of versions registered under the specified subject.
    async fn subject_versions(&self, subject: &str) -> RegistryResult<Vec<i32>>;

    /// Gets a specific version of the schema registered under this
    /// subject. [`LATEST`] selects the latest version.
    async fn subject_version(&self, subject: &str, version: i32) -> RegistryResult<String>;

    /// Registers a new schema under the specified subject and returns the
    /// unique identifier of the schema in the registry.
    ///
    /// The identifier retrieves the schema from the schemas resource and
    /// is different from the schema's version under the subject. The same
    /// schema registered under another subject yields the same identifier,
    /// though its version may differ.
    ///
    /// The schema must be compatible with previously registered versions
    /// as per the subject's configured compatibility level (falling back
    /// to the global level). When the cluster instance handling the call
    /// is not the master, the request is forwarded to it; if the master is
    /// unavailable the registry answers with a forwarding error code.
    async fn register(&self, subject: &str, schema: &str) -> RegistryResult<i32>;

    /// Checks if a schema has already been registered under the specified
    /// subject. If so, returns the schema string along with its id, its
    /// version under this subject, and the subject name.
    async fn check(&self, subject: &str, schema: &str) -> RegistryResult<SubjectSchema>;

    /// Tests an input schema against a particular version of a subject's
    /// schema for compatibility. The level applied is the subject's
    /// configured compatibility level, or the global one if the subject's
    /// was never set. [`LATEST`] selects the latest version.
    async fn test_compatibility(
        &self,
        subject: &str,
        version: i32,
        schema: &str,
    ) -> RegistryResult<bool>;

    /// Updates the global compatibility level.
    async fn set_config(&self, config: &Config) -> RegistryResult<Config>;

    /// Gets the global compatibility level.
    async fn config(&self) -> RegistryResult<Config>;

    /// Updates the compatibility level for the specified subject.
    async fn set_subject_config(&self, subject: &str, config: &Config) -> RegistryResult<Config>;

    /// Gets the compatibility level for a subject.
    async fn subject_config(&self, subject: &str) -> RegistryResult<Config>;
}

/// Request body carrying an opaque schema string.
#[derive(Debug, Serialize)]
struct SchemaBody<'a> {
    schema: &'a str,
}

/// Response from schema registration.
#[derive(Debug, Deserialize)]
struct SchemaIdResponse {
    id: i32,
}

/// Response from getting a schema by id.
#[derive(Debug, Deserialize)]
struct SchemaResponse {
    schema: String,
}

/// Response from a compatibility test.
#[derive(Debug, Deserialize)]
struct CompatibilityResponse {
    is_compatible: bool,
}

/// Config shape returned by GET `/config`; PUT uses the `compatibility`
/// key, which is the serde form of [`Config`] itself.
#[derive(Debug, Deserialize)]
struct ConfigLevelResponse {
    #[serde(rename = "compatibilityLevel")]
    compatibility_level: Compatibility,
}

/// Client for a remote Schema Registry endpoint.
///
/// Immutable after construction: the handle owns the endpoint URL and an
/// HTTP client, and every operation is a pure function of the handle and
/// its arguments, so one handle is safe to share across tasks.
#[derive(Debug)]
pub struct SchemaRegistryClient {
    endpoint: Url,
    http: Client,
}

impl SchemaRegistryClient {
    /// Creates a client for the given endpoint with a default HTTP
    /// transport.
    ///
    /// The endpoint must be a well-formed absolute URL; no network access
    /// occurs until an operation is invoked.
    pub fn new(endpoint: &str) -> RegistryResult<Self> {
        Self::with_http_client(endpoint, Client::new())
    }

    /// Creates a client using a caller-configured [`reqwest::Client`].
    ///
    /// Timeouts, TLS, proxies, and connection pooling are the transport's
    /// concern; the registry client imposes none of its own.
    pub fn with_http_client(endpoint: &str, http: Client) -> RegistryResult<Self> {
        let parsed = Url::parse(endpoint).map_err(|source| RegistryError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        Ok(Self {
            endpoint: parsed,
            http,
        })
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Gets the schema string registered under the given id.
    pub async fn schema(&self, id: i32) -> RegistryResult<String> {
        let resp: SchemaResponse = self.get_json(&format!("/schemas/ids/{id}")).await?;
        Ok(resp.schema)
    }

    /// Gets the list of registered subjects.
    pub async fn subjects(&self) -> RegistryResult<Vec<String>> {
        self.get_json("/subjects").await
    }

    /// Gets the list of versions registered under the specified subject.
    pub async fn subject_versions(&self, subject: &str) -> RegistryResult<Vec<i32>> {
        self.get_json(&format!("/subjects/{subject}/versions")).await
    }

    /// Gets a specific version of the schema registered under this
    /// subject; [`LATEST`] selects the latest version.
    pub async fn subject_version(&self, subject: &str, version: i32) -> RegistryResult<String> {
        let path = format!(
            "/subjects/{subject}/versions/{}",
            version_segment(version)
        );
        let record: SubjectSchema = self.get_json(&path).await?;
        Ok(record.schema)
    }

    /// Registers a new schema under the specified subject; see
    /// [`Registry::register`].
    pub async fn register(&self, subject: &str, schema: &str) -> RegistryResult<i32> {
        let path = format!("/subjects/{subject}/versions");
        let resp: SchemaIdResponse = self
            .send_json(Method::POST, &path, &SchemaBody { schema })
            .await?;
        tracing::debug!(subject, id = resp.id, "registered schema");
        Ok(resp.id)
    }

    /// Checks if a schema has already been registered under the specified
    /// subject; see [`Registry::check`].
    pub async fn check(&self, subject: &str, schema: &str) -> RegistryResult<SubjectSchema> {
        self.send_json(Method::POST, &format!("/subjects/{subject}"), &SchemaBody { schema })
            .await
    }

    /// Tests an input schema against a version of a subject's schema for
    /// compatibility; [`LATEST`] selects the latest version.
    pub async fn test_compatibility(
        &self,
        subject: &str,
        version: i32,
        schema: &str,
    ) -> RegistryResult<bool> {
        let path = format!(
            "/subjects/{subject}/versions/{}",
            version_segment(version)
        );
        let resp: CompatibilityResponse = self
            .send_json(Method::POST, &path, &SchemaBody { schema })
            .await?;
        Ok(resp.is_compatible)
    }

    /// Updates the global compatibility level.
    pub async fn set_config(&self, config: &Config) -> RegistryResult<Config> {
        self.send_json(Method::PUT, "/config", config).await
    }

    /// Gets the global compatibility level.
    pub async fn config(&self) -> RegistryResult<Config> {
        let resp: ConfigLevelResponse = self.get_json("/config").await?;
        Ok(Config::new(resp.compatibility_level))
    }

    /// Updates the compatibility level for the specified subject.
    pub async fn set_subject_config(
        &self,
        subject: &str,
        config: &Config,
    ) -> RegistryResult<Config> {
        self.send_json(Method::PUT, &format!("/config/{subject}"), config)
            .await
    }

    /// Gets the compatibility level for a subject.
    pub async fn subject_config(&self, subject: &str) -> RegistryResult<Config> {
        let resp: ConfigLevelResponse = self.get_json(&format!("/config/{subject}")).await?;
        Ok(Config::new(resp.compatibility_level))
    }

    // Private helpers

    /// Builds an operation URL by concatenating the endpoint with a
    /// resource path. Subject names are caller-supplied and embedded
    /// verbatim.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.as_str().trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RegistryResult<T> {
        let url = self.url(path);
        tracing::trace!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, MEDIA_TYPE)
            .send()
            .await?;
        self.decode(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> RegistryResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::trace!(%url, method = %method, "request");
        let response = self
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, MEDIA_TYPE)
            .json(body)
            .send()
            .await?;
        self.decode(response).await
    }

    /// Uniform response contract: 200 decodes as the success shape, any
    /// other status decodes as the `{error_code, message}` error shape.
    async fn decode<T: DeserializeOwned>(&self, response: Response) -> RegistryResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            return serde_json::from_str(&body).map_err(|source| RegistryError::Decode {
                status: status.as_u16(),
                source,
            });
        }

        let api: ApiError =
            serde_json::from_str(&body).map_err(|source| RegistryError::Decode {
                status: status.as_u16(),
                source,
            })?;
        tracing::debug!(status = status.as_u16(), code = api.code, "registry error");
        Err(RegistryError::Api(api))
    }
}

#[async_trait]
impl Registry for SchemaRegistryClient {
    async fn schema(&self, id: i32) -> RegistryResult<String> {
        SchemaRegistryClient::schema(self, id).await
    }

    async fn subjects(&self) -> RegistryResult<Vec<String>> {
        SchemaRegistryClient::subjects(self).await
    }

    async fn subject_versions(&self, subject: &str) -> RegistryResult<Vec<i32>> {
        SchemaRegistryClient::subject_versions(self, subject).await
    }

    async fn subject_version(&self, subject: &str, version: i32) -> RegistryResult<String> {
        SchemaRegistryClient::subject_version(self, subject, version).await
    }

    async fn register(&self, subject: &str, schema: &str) -> RegistryResult<i32> {
        SchemaRegistryClient::register(self, subject, schema).await
    }

    async fn check(&self, subject: &str, schema: &str) -> RegistryResult<SubjectSchema> {
        SchemaRegistryClient::check(self, subject, schema).await
    }

    async fn test_compatibility(
        &self,
        subject: &str,
        version: i32,
        schema: &str,
    ) -> RegistryResult<bool> {
        SchemaRegistryClient::test_compatibility(self, subject, version, schema).await
    }

    async fn set_config(&self, config: &Config) -> RegistryResult<Config> {
        SchemaRegistryClient::set_config(self, config).await
    }

    async fn config(&self) -> RegistryResult<Config> {
        SchemaRegistryClient::config(self).await
    }

    async fn set_subject_config(&self, subject: &str, config: &Config) -> RegistryResult<Config> {
        SchemaRegistryClient::set_subject_config(self, subject, config).await
    }

    async fn subject_config(&self, subject: &str) -> RegistryResult<Config> {
        SchemaRegistryClient::subject_config(self, subject).await
    }
}

/// Maps the [`LATEST`] sentinel to the `latest` path segment.
fn version_segment(version: i32) -> String {
    if version == LATEST {
        "latest".to_string()
    } else {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_malformed_endpoint() {
        let err = SchemaRegistryClient::new("asdf").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidEndpoint { .. }));
        assert!(err.to_string().contains("asdf"));
    }

    #[test]
    fn new_accepts_absolute_url_without_io() {
        // Nothing listens on this endpoint; construction must not care.
        let client = SchemaRegistryClient::new("http://localhost:1").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:1/");
    }

    #[test]
    fn url_concatenation_tolerates_trailing_slash() {
        let client = SchemaRegistryClient::new("http://localhost:8081/").unwrap();
        assert_eq!(
            client.url("/subjects/frames-value/versions"),
            "http://localhost:8081/subjects/frames-value/versions"
        );
    }

    #[test]
    fn version_zero_is_latest() {
        assert_eq!(version_segment(LATEST), "latest");
        assert_eq!(version_segment(3), "3");
    }

    #[tokio::test]
    async fn mock_registry_stands_in_for_the_client() {
        let mut registry = MockRegistry::new();
        registry
            .expect_register()
            .withf(|subject, _| subject == "frames-value")
            .returning(|_, _| Ok(1));
        registry
            .expect_check()
            .returning(|subject, schema| {
                Ok(SubjectSchema {
                    subject: subject.to_string(),
                    id: 1,
                    version: 2,
                    schema: schema.to_string(),
                })
            });

        let id = registry.register("frames-value", "{}").await.unwrap();
        assert_eq!(id, 1);

        let record = registry.check("frames-value", "{}").await.unwrap();
        assert_eq!(record.version, 2);
    }
}
