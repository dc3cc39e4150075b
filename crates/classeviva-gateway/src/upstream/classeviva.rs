use async_trait::async_trait;
use classeviva_client::{
    ClasseVivaClient, ClientConfig, ClientError, RequestParams, ResourceCategory, StudentSession,
};
use serde_json::Value;
use std::sync::Arc;

use super::{ClientHandle, UpstreamClient, UpstreamConnector};

pub struct ClasseVivaConnector {
    client: ClasseVivaClient,
}

impl ClasseVivaConnector {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: ClasseVivaClient::new(config)?,
        })
    }
}

#[async_trait]
impl UpstreamConnector for ClasseVivaConnector {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ClientHandle, ClientError> {
        let session = self.client.login(username, password).await?;
        Ok(Arc::new(session))
    }
}

#[async_trait]
impl UpstreamClient for StudentSession {
    fn username(&self) -> &str {
        StudentSession::username(self)
    }

    async fn fetch(
        &self,
        category: ResourceCategory,
        params: &RequestParams,
    ) -> Result<Value, ClientError> {
        StudentSession::fetch(self, category, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::routes::build_router;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{header as has_header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_upstream() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ident": "S7654321Y",
                "firstName": "Giulia",
                "lastName": "Bianchi",
                "token": "tok-gw",
                "expire": "2026-10-14T12:00:00+02:00"
            })))
            .mount(&server)
            .await;
        server
    }

    fn settings_for(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.upstream.base_url = server.uri();
        settings.upstream.timeout_seconds = 5;
        settings
    }

    #[tokio::test]
    async fn test_connector_yields_session_client() {
        let server = mock_upstream().await;
        Mock::given(method("GET"))
            .and(path("/students/7654321/subjects"))
            .and(has_header("z-auth-token", "tok-gw"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"subjects": []})))
            .mount(&server)
            .await;

        let connector = ClasseVivaConnector::new(settings_for(&server).client_config()).unwrap();
        let handle = connector.authenticate("S7654321Y", "secret").await.unwrap();
        assert_eq!(handle.username(), "S7654321Y");

        let payload = handle
            .fetch(ResourceCategory::Subjects, &RequestParams::None)
            .await
            .unwrap();
        assert_eq!(payload, json!({"subjects": []}));
    }

    #[tokio::test]
    async fn test_gateway_round_trip_against_upstream() {
        let server = mock_upstream().await;
        Mock::given(method("POST"))
            .and(path("/students/7654321/documents"))
            .and(has_header("z-auth-token", "tok-gw"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documents": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/students/7654321/absences/details"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let state = AppState::from_settings(settings_for(&server)).unwrap();
        let app = build_router(state);

        let login = Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"username": "S7654321Y", "password": "secret"}).to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(login).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let documents = Request::builder()
            .method(Method::POST)
            .uri("/documenti")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(documents).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"ok": true, "documenti": {"documents": []}}));

        let absences = Request::builder()
            .method(Method::POST)
            .uri("/assenze")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(absences).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
