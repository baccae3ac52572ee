//! Pinecone control-plane client.

use pinecfn_secrets::ApiKey;
use pinecone_sdk::models::{
    Cloud as SdkCloud, DeletionProtection, Metric as SdkMetric, WaitPolicy,
};
use pinecone_sdk::pinecone::{PineconeClient, PineconeClientConfig};

use super::error::{CREATE_INDEX, DELETE_INDEX, map_create_error, map_sdk_error};
use super::{PineconeConfig, TRACING_TARGET};
use crate::{
    Cloud, ControlPlane, ControlPlaneConnector, ControlPlaneError, ControlPlaneProvider,
    ControlPlaneResult, IndexDescription, Metric, ServerlessIndexSpec,
};

/// Control-plane backend using the Pinecone SDK.
pub struct PineconeControlPlane {
    client: PineconeClient,
    config: PineconeConfig,
}

impl PineconeControlPlane {
    /// Creates a client authenticated with `api_key`.
    pub fn new(config: &PineconeConfig, api_key: &ApiKey) -> ControlPlaneResult<Self> {
        let client_config = PineconeClientConfig {
            api_key: Some(api_key.expose().to_owned()),
            control_plane_host: config.control_plane_host.clone(),
            source_tag: config.source_tag.clone(),
            ..Default::default()
        };

        let client = client_config
            .client()
            .map_err(|e| ControlPlaneError::client(e.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET,
            control_plane_host = ?config.control_plane_host,
            wait_secs = config.wait_secs,
            "Pinecone control-plane client initialized"
        );

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Converts this client into a [`ControlPlane`].
    pub fn into_service(self) -> ControlPlane {
        ControlPlane::new(self)
    }

    fn wait_policy(&self) -> WaitPolicy {
        match self.config.wait_for_ready() {
            Some(timeout) => WaitPolicy::WaitFor(timeout),
            None => WaitPolicy::NoWait,
        }
    }
}

#[async_trait::async_trait]
impl ControlPlaneProvider for PineconeControlPlane {
    async fn create_serverless_index(
        &self,
        spec: &ServerlessIndexSpec,
    ) -> ControlPlaneResult<IndexDescription> {
        let model = self
            .client
            .create_serverless_index(
                &spec.name,
                spec.dimension,
                sdk_metric(spec.metric()),
                sdk_cloud(spec.cloud()),
                &spec.region,
                DeletionProtection::Disabled,
                self.wait_policy(),
            )
            .await
            .map_err(|e| map_create_error(e, spec))?;

        if model.host.is_empty() {
            return Err(ControlPlaneError::api(
                CREATE_INDEX,
                format!("index '{}' was created without a host", spec.name),
            ));
        }

        Ok(IndexDescription {
            name: model.name,
            host: model.host,
        })
    }

    async fn delete_index(&self, name: &str) -> ControlPlaneResult<()> {
        self.client
            .delete_index(name)
            .await
            .map_err(|e| map_sdk_error(e, DELETE_INDEX, name))
    }
}

impl std::fmt::Debug for PineconeControlPlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PineconeControlPlane")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Connector that builds a fresh [`PineconeControlPlane`] per API key.
#[derive(Debug, Clone, Default)]
pub struct PineconeConnector {
    config: PineconeConfig,
}

impl PineconeConnector {
    /// Creates a new connector with the given configuration.
    pub fn new(config: PineconeConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl ControlPlaneConnector for PineconeConnector {
    async fn connect(&self, api_key: &ApiKey) -> ControlPlaneResult<ControlPlane> {
        PineconeControlPlane::new(&self.config, api_key).map(PineconeControlPlane::into_service)
    }
}

fn sdk_metric(metric: Metric) -> SdkMetric {
    match metric {
        Metric::Cosine => SdkMetric::Cosine,
    }
}

fn sdk_cloud(cloud: Cloud) -> SdkCloud {
    match cloud {
        Cloud::Aws => SdkCloud::Aws,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn control_plane(server: &MockServer) -> ControlPlane {
        let config = PineconeConfig::default()
            .with_control_plane_host(server.uri())
            .with_source_tag("pinecfn");
        let api_key = ApiKey::new("pinecone/api-key", "pk-test").unwrap();
        PineconeControlPlane::new(&config, &api_key)
            .unwrap()
            .into_service()
    }

    fn spec() -> ServerlessIndexSpec {
        ServerlessIndexSpec::new("test-index", 10, "us-west-2")
    }

    fn index_model(host: &str) -> serde_json::Value {
        json!({
            "name": "test-index",
            "dimension": 10,
            "metric": "cosine",
            "host": host,
            "spec": { "serverless": { "cloud": "aws", "region": "us-west-2" } },
            "status": { "ready": true, "state": "Ready" }
        })
    }

    fn error_body(code: &str, message: &str, status: u16) -> serde_json::Value {
        json!({ "error": { "code": code, "message": message }, "status": status })
    }

    #[test]
    fn test_sdk_enum_mapping() {
        assert!(matches!(sdk_metric(Metric::Cosine), SdkMetric::Cosine));
        assert!(matches!(sdk_cloud(Cloud::Aws), SdkCloud::Aws));
    }

    #[test]
    fn test_client_builds_offline() {
        let api_key = ApiKey::new("pinecone", "pk-test").unwrap();
        let client = PineconeControlPlane::new(&PineconeConfig::default(), &api_key).unwrap();
        assert!(matches!(client.wait_policy(), WaitPolicy::NoWait));
    }

    #[tokio::test]
    async fn test_create_sends_cosine_aws_serverless_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes"))
            .and(header("Api-Key", "pk-test"))
            .and(body_partial_json(json!({
                "name": "test-index",
                "dimension": 10,
                "metric": "cosine",
                "deletion_protection": "disabled",
                "spec": { "serverless": { "cloud": "aws", "region": "us-west-2" } }
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(index_model("test-index-abc1234.svc.pinecone.io")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let index = control_plane(&server)
            .create_serverless_index(&spec())
            .await
            .unwrap();

        assert_eq!(index.name, "test-index");
        assert_eq!(index.host, "test-index-abc1234.svc.pinecone.io");
    }

    #[tokio::test]
    async fn test_create_without_host_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes"))
            .respond_with(ResponseTemplate::new(201).set_body_json(index_model("")))
            .mount(&server)
            .await;

        let err = control_plane(&server)
            .create_serverless_index(&spec())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ControlPlaneError::Api {
                operation: CREATE_INDEX,
                ..
            }
        ));
        assert!(err.to_string().contains("without a host"));
    }

    #[tokio::test]
    async fn test_create_conflict_is_already_exists() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes"))
            .respond_with(ResponseTemplate::new(409).set_body_json(error_body(
                "ALREADY_EXISTS",
                "Resource already exists",
                409,
            )))
            .mount(&server)
            .await;

        let err = control_plane(&server)
            .create_serverless_index(&spec())
            .await
            .unwrap_err();

        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn test_create_rejected_dimension_is_invalid_dimension() {
        for status in [400, 422] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/indexes"))
                .respond_with(ResponseTemplate::new(status).set_body_json(error_body(
                    "INVALID_ARGUMENT",
                    "Dimension must be between 1 and 20000",
                    status,
                )))
                .mount(&server)
                .await;

            let err = control_plane(&server)
                .create_serverless_index(&spec())
                .await
                .unwrap_err();

            assert!(
                matches!(err, ControlPlaneError::InvalidDimension { dimension: 10, .. }),
                "status {status}: {err}"
            );
        }
    }

    #[tokio::test]
    async fn test_create_other_bad_request_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
                "INVALID_ARGUMENT",
                "Name must consist of lower case alphanumeric characters",
                400,
            )))
            .mount(&server)
            .await;

        let err = control_plane(&server)
            .create_serverless_index(&spec())
            .await
            .unwrap_err();

        assert!(matches!(err, ControlPlaneError::Api { .. }));
    }

    #[tokio::test]
    async fn test_delete_index() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/indexes/test-index"))
            .and(header("Api-Key", "pk-test"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        control_plane(&server).delete_index("test-index").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_index_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/indexes/test-index"))
            .respond_with(ResponseTemplate::new(404).set_body_json(error_body(
                "NOT_FOUND",
                "Index test-index not found",
                404,
            )))
            .mount(&server)
            .await;

        let err = control_plane(&server)
            .delete_index("test-index")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(matches!(
            err,
            ControlPlaneError::IndexNotFound { ref name } if name == "test-index"
        ));
    }
}
