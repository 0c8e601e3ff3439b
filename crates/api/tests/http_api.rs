//! End-to-end tests over the router with the in-memory backend.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;

use campana_ai::{AiConfig, AiGateway};
use campana_api::app::services::{AppServices, ServiceBackend};
use campana_api::app::build_app;
use campana_backend::MemoryBackend;
use campana_core::ProfileId;

struct Harness {
    app: Router,
}

impl Harness {
    /// An app over a memory backend seeded with one user per interesting
    /// role. The AI gateway is left unconfigured so assistant calls exercise
    /// the fallback path.
    fn new() -> Self {
        let backend = Arc::new(MemoryBackend::new());
        for (email, name, role) in [
            ("master@campana.co", "Marta Ospina", "master"),
            ("candidata@campana.co", "Ana Rivera", "candidato"),
            ("votante@campana.co", "Carlos Pineda", "votante"),
        ] {
            let id = ProfileId::new();
            backend.register_user(email, "secret", id);
            backend.seed_row(
                "profiles",
                json!({
                    "id": id.to_string(),
                    "display_name": name,
                    "role": role,
                    "created_by": null,
                    "created_at": "2025-03-01T12:00:00Z",
                }),
            );
        }

        let backend: Arc<dyn ServiceBackend> = backend;
        let ai = AiGateway::new(AiConfig::new("", ""));
        let services = Arc::new(AppServices::new(backend, ai, "MI CAMPAÑA 2025"));
        Self {
            app: build_app(services),
        }
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, payload)
    }

    async fn login(&self, email: &str) -> String {
        let (status, payload) = self
            .request(
                "POST",
                "/auth/login",
                None,
                Some(json!({ "email": email, "password": "secret" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        payload["access_token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn health_is_public() {
    let harness = Harness::new();
    let (status, payload) = harness.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "ok");
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let harness = Harness::new();
    let (status, _) = harness.request("GET", "/territories", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = harness
        .request("GET", "/territories", Some("not-a-real-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn failed_login_answers_with_the_spanish_template() {
    let harness = Harness::new();
    let (status, payload) = harness
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "master@campana.co", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        payload["message"],
        "Credenciales incorrectas. Verifica tu correo y contraseña."
    );
}

#[tokio::test]
async fn candidato_creates_and_lists_territories() {
    let harness = Harness::new();
    let token = harness.login("candidata@campana.co").await;

    let (status, created) = harness
        .request(
            "POST",
            "/territories",
            Some(&token),
            Some(json!({
                "name": "Comuna 13",
                "type": "neighborhood",
                "responsible_user_id": ProfileId::new().to_string(),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Comuna 13");

    let (status, listed) = harness
        .request("GET", "/territories", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn votante_is_forbidden_from_creating_territories() {
    let harness = Harness::new();
    let token = harness.login("votante@campana.co").await;

    let (status, payload) = harness
        .request(
            "POST",
            "/territories",
            Some(&token),
            Some(json!({
                "name": "Comuna 13",
                "type": "neighborhood",
                "responsible_user_id": ProfileId::new().to_string(),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(payload["error"], "forbidden");
}

#[tokio::test]
async fn settled_alerts_reject_further_transitions_over_http() {
    let harness = Harness::new();
    let token = harness.login("candidata@campana.co").await;

    let (status, alert) = harness
        .request(
            "POST",
            "/alerts",
            Some(&token),
            Some(json!({
                "title": "Corte de energía",
                "description": "Sector sin luz",
                "type": "infraestructura",
                "priority": "high",
                "territory_id": uuid::Uuid::now_v7().to_string(),
                "affected_user_id": ProfileId::new().to_string(),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = alert["id"].as_str().unwrap().to_string();

    let (status, _) = harness
        .request("POST", &format!("/alerts/{id}/resolve"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, payload) = harness
        .request("POST", &format!("/alerts/{id}/dismiss"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(payload["error"], "invariant_violation");
}

#[tokio::test]
async fn navigation_is_shaped_by_the_role() {
    let harness = Harness::new();

    let master = harness.login("master@campana.co").await;
    let (status, payload) = harness
        .request("GET", "/navigation", Some(&master), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(payload["tabs"].as_array().unwrap().len() > 5);
    assert_eq!(payload["capabilities"]["can_view_all_data"], true);

    let votante = harness.login("votante@campana.co").await;
    let (_, payload) = harness
        .request("GET", "/navigation", Some(&votante), None)
        .await;
    assert_eq!(payload["capabilities"]["can_create_territory"], false);
    let routes: Vec<&str> = payload["tabs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["route"].as_str().unwrap())
        .collect();
    assert!(!routes.contains(&"/territories"));
}

#[tokio::test]
async fn assistant_degrades_to_fallback_copy() {
    let harness = Harness::new();
    let token = harness.login("candidata@campana.co").await;

    let (status, payload) = harness
        .request(
            "POST",
            "/assistant/message",
            Some(&token),
            Some(json!({ "topic": "seguridad barrial" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payload["text"],
        "El asistente no está disponible en este momento. Intenta de nuevo más tarde."
    );

    let (status, payload) = harness
        .request(
            "POST",
            "/assistant/sentiment",
            Some(&token),
            Some(json!({ "feedback": "no nos han cumplido" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["sentimiento"], "neutral");
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let harness = Harness::new();
    let token = harness.login("master@campana.co").await;

    let (status, _) = harness
        .request("POST", "/auth/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness
        .request("GET", "/auth/session", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
