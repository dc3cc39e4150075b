//! Generic resource fetch shared by every category route.

pub mod envelope;
pub mod params;

use classeviva_client::{RequestParams, ResourceCategory};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::upstream::UpstreamClient;
use crate::utils::error::ApiError;

pub use envelope::ResourceEnvelope;
pub use params::resolve_params;

#[derive(Debug, Clone)]
pub struct ResourceProxy {
    timeout: Duration,
}

impl ResourceProxy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `category` through an authenticated client, bounded by the
    /// upstream timeout.
    pub async fn fetch(
        &self,
        client: &dyn UpstreamClient,
        category: ResourceCategory,
        params: &RequestParams,
    ) -> Result<ResourceEnvelope, ApiError> {
        let start = Instant::now();

        let outcome = tokio::time::timeout(self.timeout, client.fetch(category, params))
            .await
            .map_err(|_| {
                ApiError::UpstreamFailure(format!(
                    "{} timed out after {}s",
                    category,
                    self.timeout.as_secs()
                ))
            })?;

        match outcome {
            Ok(payload) => {
                info!(
                    "Fetched {} for {} in {}ms",
                    category,
                    client.username(),
                    start.elapsed().as_millis()
                );
                Ok(ResourceEnvelope::new(category, payload))
            }
            Err(e) => {
                warn!("Fetching {} for {} failed: {}", category, client.username(), e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::MockUpstreamClient;
    use async_trait::async_trait;
    use classeviva_client::{AgendaRange, ClientError};
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn mock_client() -> MockUpstreamClient {
        let mut client = MockUpstreamClient::new();
        client.expect_username().return_const("S1234567X".to_string());
        client
    }

    #[tokio::test]
    async fn test_success_is_wrapped() {
        let mut client = mock_client();
        client
            .expect_fetch()
            .withf(|category, params| {
                matches!(category, ResourceCategory::Grades) && matches!(params, RequestParams::None)
            })
            .times(1)
            .returning(|_, _| Ok(json!({"grades": [1, 2]})));

        let envelope = ResourceProxy::new(Duration::from_secs(5))
            .fetch(&client, ResourceCategory::Grades, &RequestParams::None)
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"ok": true, "voti": {"grades": [1, 2]}})
        );
    }

    #[tokio::test]
    async fn test_agenda_params_reach_upstream() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let expected = RequestParams::Agenda(AgendaRange::resolve(Some(day), None, day));

        let mut client = mock_client();
        client
            .expect_fetch()
            .withf(move |category, params| {
                matches!(category, ResourceCategory::Agenda)
                    && matches!(params, RequestParams::Agenda(range) if range.start == day && range.end == day)
            })
            .times(1)
            .returning(|_, _| Ok(json!({"agenda": []})));

        let result = ResourceProxy::new(Duration::from_secs(5))
            .fetch(&client, ResourceCategory::Agenda, &expected)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_upstream_5xx_is_bad_gateway() {
        let mut client = mock_client();
        client.expect_fetch().returning(|_, _| {
            Err(ClientError::Status {
                status: 503,
                body: "down".to_string(),
            })
        });

        let err = ResourceProxy::new(Duration::from_secs(5))
            .fetch(&client, ResourceCategory::Card, &RequestParams::None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UpstreamFailure(_)));
    }

    #[tokio::test]
    async fn test_local_failure_is_internal() {
        let mut client = mock_client();
        client
            .expect_fetch()
            .returning(|_, _| Err(ClientError::InvalidIdentity("SX".to_string())));

        let err = ResourceProxy::new(Duration::from_secs(5))
            .fetch(&client, ResourceCategory::Card, &RequestParams::None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InternalFailure(_)));
    }

    struct SlowClient;

    #[async_trait]
    impl UpstreamClient for SlowClient {
        fn username(&self) -> &str {
            "slow"
        }

        async fn fetch(
            &self,
            _category: ResourceCategory,
            _params: &RequestParams,
        ) -> Result<Value, ClientError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Value::Null)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_upstream_failure() {
        let err = ResourceProxy::new(Duration::from_secs(20))
            .fetch(&SlowClient, ResourceCategory::Notes, &RequestParams::None)
            .await
            .unwrap_err();
        match err {
            ApiError::UpstreamFailure(msg) => assert!(msg.contains("timed out")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
