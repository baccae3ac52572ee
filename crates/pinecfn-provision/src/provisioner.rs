//! Create and Delete workflows.

use std::fmt;
use std::sync::Arc;

use pinecfn_pinecone::{ControlPlane, ControlPlaneConnector, ServerlessIndexSpec};
use pinecfn_secrets::{ApiKey, SecretStore, SecretStoreConnector};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

use crate::error::{Error, Result};
use crate::request::ProvisioningRequest;
use crate::TRACING_TARGET;

/// Physical resource id reported for every provisioned index.
pub const RESOURCE_KIND: &str = "PineconeIndex";

/// Workflow stage, used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    ValidatingParams,
    FetchingCredential,
    CreatingIndex,
    SavingEndpointSecret,
    DeletingIndex,
    DeletingEndpointSecret,
    Done,
}

/// Result of a successful workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionOutcome {
    /// Identifier returned to the stack engine.
    pub physical_resource_id: String,
    /// Name of the index that was created or deleted.
    pub index_name: String,
}

impl ProvisionOutcome {
    fn new(index_name: &str) -> Self {
        Self {
            physical_resource_id: RESOURCE_KIND.to_owned(),
            index_name: index_name.to_owned(),
        }
    }
}

/// Orchestrates the Create and Delete workflows.
///
/// Each workflow connects its own clients through the connectors, so no
/// client or credential outlives an invocation. Steps run strictly in
/// order and the first failure aborts the workflow without rolling back
/// completed steps.
#[derive(Clone)]
pub struct Provisioner {
    secrets: Arc<dyn SecretStoreConnector>,
    control_plane: Arc<dyn ControlPlaneConnector>,
}

impl fmt::Debug for Provisioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provisioner").finish_non_exhaustive()
    }
}

impl Provisioner {
    /// Creates a provisioner from a secret store and a control-plane connector.
    pub fn new<S, C>(secrets: S, control_plane: C) -> Self
    where
        S: SecretStoreConnector + 'static,
        C: ControlPlaneConnector + 'static,
    {
        Self {
            secrets: Arc::new(secrets),
            control_plane: Arc::new(control_plane),
        }
    }

    /// Creates the index and stores its host in the endpoint secret.
    #[tracing::instrument(
        skip_all,
        fields(index = %request.index_name, region = %request.region),
        target = TRACING_TARGET,
        name = "create_index"
    )]
    pub async fn create(&self, request: &ProvisioningRequest) -> Result<ProvisionOutcome> {
        let (secrets, control_plane) = self.connect(request, Stage::CreatingIndex).await?;

        enter(Stage::CreatingIndex);
        let spec = ServerlessIndexSpec::new(
            request.index_name.as_str(),
            request.dimension,
            request.region.as_str(),
        );
        let index = control_plane
            .create_serverless_index(&spec)
            .await
            .map_err(|source| Error::ControlPlane {
                stage: Stage::CreatingIndex,
                index: request.index_name.clone(),
                source,
            })?;

        enter(Stage::SavingEndpointSecret);
        secrets
            .create_secret(&request.index_endpoint_secret_name, &index.host)
            .await
            .map_err(|source| Error::SecretStore {
                stage: Stage::SavingEndpointSecret,
                secret: request.index_endpoint_secret_name.clone(),
                source,
            })?;

        enter(Stage::Done);
        tracing::info!(
            target: TRACING_TARGET,
            index = %request.index_name,
            host = %index.host,
            endpoint_secret = %request.index_endpoint_secret_name,
            "Index provisioned"
        );

        Ok(ProvisionOutcome::new(&request.index_name))
    }

    /// Deletes the index and force-deletes the endpoint secret.
    #[tracing::instrument(
        skip_all,
        fields(index = %request.index_name, region = %request.region),
        target = TRACING_TARGET,
        name = "delete_index"
    )]
    pub async fn delete(&self, request: &ProvisioningRequest) -> Result<ProvisionOutcome> {
        let (secrets, control_plane) = self.connect(request, Stage::DeletingIndex).await?;

        enter(Stage::DeletingIndex);
        control_plane
            .delete_index(&request.index_name)
            .await
            .map_err(|source| Error::ControlPlane {
                stage: Stage::DeletingIndex,
                index: request.index_name.clone(),
                source,
            })?;

        enter(Stage::DeletingEndpointSecret);
        secrets
            .delete_secret(&request.index_endpoint_secret_name)
            .await
            .map_err(|source| Error::SecretStore {
                stage: Stage::DeletingEndpointSecret,
                secret: request.index_endpoint_secret_name.clone(),
                source,
            })?;

        enter(Stage::Done);
        tracing::info!(
            target: TRACING_TARGET,
            index = %request.index_name,
            endpoint_secret = %request.index_endpoint_secret_name,
            "Index deprovisioned"
        );

        Ok(ProvisionOutcome::new(&request.index_name))
    }

    /// Connects the secret store, resolves the API key and connects the
    /// control plane with it.
    ///
    /// `next` is the stage reported if the control-plane client cannot be built.
    async fn connect(
        &self,
        request: &ProvisioningRequest,
        next: Stage,
    ) -> Result<(SecretStore, ControlPlane)> {
        enter(Stage::FetchingCredential);
        let secrets = self
            .secrets
            .connect(&request.region)
            .await
            .map_err(|source| Error::Credential {
                secret: request.api_key_secret_name.clone(),
                source,
            })?;

        let api_key = resolve_api_key(&secrets, request).await?;

        let control_plane =
            self.control_plane
                .connect(&api_key)
                .await
                .map_err(|source| Error::ControlPlane {
                    stage: next,
                    index: request.index_name.clone(),
                    source,
                })?;

        Ok((secrets, control_plane))
    }
}

/// Fetches the API key named by the request from `secrets`.
pub async fn resolve_api_key(
    secrets: &SecretStore,
    request: &ProvisioningRequest,
) -> Result<ApiKey> {
    secrets
        .fetch_api_key(&request.api_key_secret_name)
        .await
        .map_err(|source| Error::Credential {
            secret: request.api_key_secret_name.clone(),
            source,
        })
}

pub(crate) fn enter(stage: Stage) {
    tracing::debug!(target: TRACING_TARGET, stage = %stage, "Entering stage");
}

#[cfg(test)]
mod tests {
    use pinecfn_pinecone::ControlPlaneError;
    use pinecfn_secrets::SecretError;
    use pinecfn_test::{Call, CallLog, InMemoryControlPlane, InMemorySecretStore, MockOperation};

    use super::*;
    use crate::ErrorKind;

    const API_KEY_SECRET: &str = "pinecone/api-key";
    const ENDPOINT_SECRET: &str = "pinecone/test-index/endpoint";

    struct Fixture {
        log: CallLog,
        secrets: InMemorySecretStore,
        control_plane: InMemoryControlPlane,
        provisioner: Provisioner,
    }

    fn fixture() -> Fixture {
        let log = CallLog::default();
        let secrets = InMemorySecretStore::new(log.clone())
            .with_secret(API_KEY_SECRET, r#"{"apiKey":"pk-test"}"#);
        let control_plane = InMemoryControlPlane::new(log.clone()).with_api_key("pk-test");
        let provisioner = Provisioner::new(secrets.clone(), control_plane.clone());
        Fixture {
            log,
            secrets,
            control_plane,
            provisioner,
        }
    }

    fn request() -> ProvisioningRequest {
        ProvisioningRequest {
            region: "us-west-2".into(),
            index_name: "test-index".into(),
            dimension: 10,
            api_key_secret_name: API_KEY_SECRET.into(),
            index_endpoint_secret_name: ENDPOINT_SECRET.into(),
        }
    }

    #[tokio::test]
    async fn test_create_stores_endpoint() {
        let fx = fixture();

        let outcome = fx.provisioner.create(&request()).await.unwrap();
        assert_eq!(outcome.index_name, "test-index");
        assert_eq!(outcome.physical_resource_id, RESOURCE_KIND);

        let host = fx.control_plane.host_of("test-index").unwrap();
        assert_eq!(fx.secrets.get(ENDPOINT_SECRET).as_deref(), Some(host.as_str()));
        assert_eq!(
            fx.log.count(|call| matches!(call, Call::CreateSecret { .. })),
            1
        );
        assert_eq!(fx.control_plane.index_names(), vec!["test-index".to_string()]);
    }

    #[tokio::test]
    async fn test_create_runs_steps_in_order() {
        let fx = fixture();
        fx.provisioner.create(&request()).await.unwrap();

        assert_eq!(
            fx.log.calls(),
            vec![
                Call::ConnectSecrets {
                    region: "us-west-2".into()
                },
                Call::FetchSecret {
                    name: API_KEY_SECRET.into()
                },
                Call::ConnectControlPlane,
                Call::CreateIndex {
                    name: "test-index".into(),
                    dimension: 10,
                    region: "us-west-2".into(),
                },
                Call::CreateSecret {
                    name: ENDPOINT_SECRET.into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_after_create_removes_secret() {
        let fx = fixture();
        fx.provisioner.create(&request()).await.unwrap();

        let outcome = fx.provisioner.delete(&request()).await.unwrap();
        assert_eq!(outcome.index_name, "test-index");
        assert!(fx.secrets.get(ENDPOINT_SECRET).is_none());
        assert!(fx.control_plane.index_names().is_empty());
        assert!(fx.secrets.get(API_KEY_SECRET).is_some());
    }

    #[tokio::test]
    async fn test_second_create_fails_without_touching_secret() {
        let fx = fixture();
        fx.provisioner.create(&request()).await.unwrap();
        let original = fx.secrets.get(ENDPOINT_SECRET);

        let err = fx.provisioner.create(&request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ControlPlane);
        assert!(matches!(
            err.control_plane_error(),
            Some(ControlPlaneError::IndexAlreadyExists { .. })
        ));
        assert_eq!(fx.secrets.get(ENDPOINT_SECRET), original);
        assert_eq!(
            fx.log.count(|call| matches!(call, Call::CreateSecret { .. })),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_of_absent_index_fails() {
        let fx = fixture();

        let err = fx.provisioner.delete(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ControlPlane {
                stage: Stage::DeletingIndex,
                source: ControlPlaneError::IndexNotFound { .. },
                ..
            }
        ));
        assert_eq!(
            fx.log.count(|call| matches!(call, Call::DeleteSecret { .. })),
            0
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_secret_aborts_before_control_plane() {
        let log = CallLog::default();
        let secrets = InMemorySecretStore::new(log.clone());
        let control_plane = InMemoryControlPlane::new(log.clone());
        let provisioner = Provisioner::new(secrets, control_plane.clone());

        let err = provisioner.create(&request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Credential);
        assert!(err.secret_error().is_some_and(SecretError::is_not_found));
        assert_eq!(log.count(|call| matches!(call, Call::ConnectControlPlane)), 0);
        assert!(control_plane.index_names().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_api_key_secret() {
        let log = CallLog::default();
        let secrets = InMemorySecretStore::new(log.clone()).with_secret(API_KEY_SECRET, "pk-test");
        let provisioner = Provisioner::new(secrets, InMemoryControlPlane::new(log.clone()));

        let err = provisioner.create(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Credential {
                source: SecretError::Malformed { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_rejected_api_key() {
        let log = CallLog::default();
        let secrets = InMemorySecretStore::new(log.clone())
            .with_secret(API_KEY_SECRET, r#"{"apiKey":"pk-wrong"}"#);
        let control_plane = InMemoryControlPlane::new(log.clone()).with_api_key("pk-test");
        let provisioner = Provisioner::new(secrets, control_plane);

        let err = provisioner.create(&request()).await.unwrap_err();
        assert!(matches!(
            err.control_plane_error(),
            Some(ControlPlaneError::Unauthorized(_))
        ));
        assert_eq!(log.count(|call| matches!(call, Call::CreateIndex { .. })), 0);
    }

    #[tokio::test]
    async fn test_secret_write_failure_leaves_index() {
        let fx = fixture();
        fx.secrets.fail_on(MockOperation::CreateSecret);

        let err = fx.provisioner.create(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::SecretStore {
                stage: Stage::SavingEndpointSecret,
                ..
            }
        ));
        assert_eq!(fx.control_plane.index_names(), vec!["test-index".to_string()]);
        assert!(fx.secrets.get(ENDPOINT_SECRET).is_none());
    }

    #[tokio::test]
    async fn test_secret_delete_failure_leaves_secret() {
        let fx = fixture();
        fx.provisioner.create(&request()).await.unwrap();
        fx.secrets.fail_on(MockOperation::DeleteSecret);

        let err = fx.provisioner.delete(&request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SecretStore);
        assert!(fx.control_plane.index_names().is_empty());
        assert!(fx.secrets.get(ENDPOINT_SECRET).is_some());
    }

    #[tokio::test]
    async fn test_invalid_dimension_is_a_control_plane_error() {
        let fx = fixture();
        let request = ProvisioningRequest {
            dimension: 0,
            ..request()
        };

        let err = fx.provisioner.create(&request).await.unwrap_err();
        assert!(matches!(
            err.control_plane_error(),
            Some(ControlPlaneError::InvalidDimension { dimension: 0, .. })
        ));
        assert!(fx.secrets.get(ENDPOINT_SECRET).is_none());
    }
}
