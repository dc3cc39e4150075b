//! Upstream seam: the gateway only sees these traits, the ClasseViva client
//! implements them in `classeviva.rs`.

pub mod classeviva;

use async_trait::async_trait;
use classeviva_client::{ClientError, RequestParams, ResourceCategory};
use serde_json::Value;
use std::sync::Arc;

pub use classeviva::ClasseVivaConnector;

/// Authenticated upstream identity owned by one session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    fn username(&self) -> &str;

    async fn fetch(
        &self,
        category: ResourceCategory,
        params: &RequestParams,
    ) -> Result<Value, ClientError>;
}

pub type ClientHandle = Arc<dyn UpstreamClient>;

/// Turns credentials into an authenticated [`ClientHandle`].
#[async_trait]
pub trait UpstreamConnector: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<ClientHandle, ClientError>;
}
