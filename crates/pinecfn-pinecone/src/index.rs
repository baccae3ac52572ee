//! Serverless index types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{ControlPlaneError, ControlPlaneResult};

/// Largest dimension accepted for a serverless index.
pub const MAX_DIMENSION: i32 = 20_000;

/// Similarity metric of an index. Only cosine similarity is provisioned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Cosine similarity.
    #[default]
    Cosine,
}

/// Cloud provider hosting a serverless index. Only AWS is provisioned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    /// Amazon Web Services.
    #[default]
    Aws,
}

/// Parameters for creating a serverless index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerlessIndexSpec {
    /// Index name.
    pub name: String,
    /// Vector dimensionality.
    pub dimension: i32,
    metric: Metric,
    cloud: Cloud,
    /// Cloud region.
    pub region: String,
}

impl ServerlessIndexSpec {
    /// Creates a cosine-similarity index spec on AWS.
    pub fn new(name: impl Into<String>, dimension: i32, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension,
            metric: Metric::Cosine,
            cloud: Cloud::Aws,
            region: region.into(),
        }
    }

    /// Returns the similarity metric.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Returns the cloud provider.
    pub fn cloud(&self) -> Cloud {
        self.cloud
    }

    /// Checks the dimension bounds.
    pub fn validate(&self) -> ControlPlaneResult<()> {
        if self.dimension < 1 || self.dimension > MAX_DIMENSION {
            return Err(ControlPlaneError::invalid_dimension(
                self.dimension,
                format!("must be between 1 and {MAX_DIMENSION}"),
            ));
        }
        Ok(())
    }
}

/// Description of a created index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescription {
    /// Index name.
    pub name: String,
    /// Network-reachable host of the index.
    pub host: String,
}
