//! Axum-based API gateway for the guide assistant. Config-driven via CoreConfig.

mod handlers;

use axum::{
    extract::{Json, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use dashmap::DashMap;
use guidebot_core::{CoreConfig, Domain, KnowledgeStore};
use guidebot_skills::build_classifier;
use handlers::sessions::{
    create_session, delete_session, get_session, submit_message, sweep_idle_sessions, SessionHandle,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[guidebot-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match CoreConfig::load() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("[guidebot-gateway] config load failed: {}", e);
            std::process::exit(1);
        }
    };
    let knowledge = Arc::new(KnowledgeStore::bootstrap());
    for corpus in knowledge.status() {
        tracing::info!("Knowledge: {} ({} entries)", corpus.label, corpus.entry_count);
    }

    let sessions = Arc::new(DashMap::new());
    if let Some(ttl) = config.session_idle_ttl() {
        tokio::spawn(session_sweep_loop(Arc::clone(&sessions), ttl));
    }

    let app = build_app(AppState {
        config: Arc::clone(&config),
        knowledge,
        sessions,
    });

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Port {} unavailable: {}", config.port, e);
            std::process::exit(1);
        }
    };
    tracing::info!("{} listening on {}", config.app_name, addr);
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Gateway stopped: {}", e);
    }
}

async fn session_sweep_loop(sessions: Arc<DashMap<Uuid, SessionHandle>>, ttl: std::time::Duration) {
    // Sweep twice per lifetime, between once a second and once a minute.
    let tick = (ttl / 2).clamp(
        std::time::Duration::from_secs(1),
        std::time::Duration::from_secs(60),
    );
    tracing::info!(
        target: "guidebot::session",
        idle_ttl_secs = ttl.as_secs(),
        "Session sweep started"
    );
    let mut interval = tokio::time::interval(tick);
    loop {
        interval.tick().await;
        let expired = sweep_idle_sessions(&sessions, ttl);
        if expired > 0 {
            tracing::debug!(target: "guidebot::session", expired, open = sessions.len(), "Swept idle sessions");
        }
    }
}

fn build_app(state: AppState) -> Router {
    // CORS: allow Backend/API (8001-8099) and Frontend/UI (3001-3099) port ranges.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &axum::http::HeaderValue, _| {
            let s = origin.to_str().unwrap_or("");
            let port = s
                .split(':')
                .last()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(0);
            (3001..=3099).contains(&port) || (8001..=8099).contains(&port)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS, Method::DELETE])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/v1/status", get(status))
        .route("/v1/classify", post(classify))
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/:id", get(get_session).delete(delete_session))
        .route("/v1/sessions/:id/messages", post(submit_message))
        .with_state(state)
        .layer(cors)
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) knowledge: Arc<KnowledgeStore>,
    pub(crate) sessions: Arc<DashMap<Uuid, SessionHandle>>,
}

/// JSON `{ "error": message }` with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// GET /v1/status – app identity, corpora and open session count.
async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "default_domain": state.config.default_domain,
        "remote_lookup": state.config.remote_lookup,
        "corpora": state.knowledge.status(),
        "open_sessions": state.sessions.len(),
    }))
}

#[derive(serde::Deserialize)]
struct ClassifyRequest {
    query: String,
    #[serde(default)]
    domain: Option<String>,
    /// Defaults to `remote_lookup` from config.
    #[serde(default)]
    allow_remote: Option<bool>,
}

/// POST /v1/classify – one-shot classification with the tier and rule that answered.
async fn classify(State(state): State<AppState>, Json(req): Json<ClassifyRequest>) -> Response {
    let domain = match req.domain.as_deref() {
        Some(name) => match name.parse::<Domain>() {
            Ok(domain) => domain,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        None => state.config.default_domain,
    };
    let allow_remote = req.allow_remote.unwrap_or(state.config.remote_lookup);
    let classifier = build_classifier(domain, Arc::clone(&state.knowledge), &state.config);
    let result = classifier.classify_detailed(&req.query, allow_remote).await;
    Json(result).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state(config: CoreConfig) -> AppState {
        AppState {
            config: Arc::new(config),
            knowledge: Arc::new(KnowledgeStore::bootstrap()),
            sessions: Arc::new(DashMap::new()),
        }
    }

    fn offline_config() -> CoreConfig {
        CoreConfig {
            app_name: "Test Guidebot".to_string(),
            port: 4000,
            remote_lookup: false,
            ..CoreConfig::default()
        }
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_status_returns_identity_and_corpora() {
        let app = build_app(test_state(offline_config()));
        let res = app.oneshot(empty_request("GET", "/v1/status")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["app_name"], "Test Guidebot");
        assert_eq!(json["port"], 4000);
        assert_eq!(json["default_domain"], "design_system");
        assert_eq!(json["corpora"][0]["entry_count"], 7);
        assert_eq!(json["corpora"][1]["domain"], "publishing");
        assert_eq!(json["open_sessions"], 0);
    }

    #[tokio::test]
    async fn test_classify_button_code() {
        let app = build_app(test_state(offline_config()));
        let req = json_request(
            "POST",
            "/v1/classify",
            serde_json::json!({ "query": "Show me button code" }),
        );
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["domain"], "design_system");
        assert_eq!(json["tier"], "code_intent");
        assert_eq!(json["rule"], "button_snippet");
        assert!(json["text"].as_str().unwrap().contains("govuk-button"));
    }

    #[tokio::test]
    async fn test_classify_remote_fallback_per_request() {
        let app = build_app(test_state(offline_config()));
        let req = json_request(
            "POST",
            "/v1/classify",
            serde_json::json!({ "query": "gibberish unrelated text", "domain": "gds", "allow_remote": true }),
        );
        let json = body_json(app.oneshot(req).await.unwrap()).await;
        assert_eq!(json["tier"], "remote");
        assert!(json["text"]
            .as_str()
            .unwrap()
            .ends_with("search/?q=gibberish%20unrelated%20text"));
    }

    #[tokio::test]
    async fn test_classify_unknown_domain_is_bad_request() {
        let app = build_app(test_state(offline_config()));
        let req = json_request(
            "POST",
            "/v1/classify",
            serde_json::json!({ "query": "hello", "domain": "weather" }),
        );
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json["error"], "unknown domain: weather");
    }

    #[tokio::test]
    async fn test_session_with_initial_message_answers_once() {
        let state = test_state(offline_config());
        let app = build_app(state.clone());

        let req = json_request(
            "POST",
            "/v1/sessions",
            serde_json::json!({ "domain": "posit", "initial_message": "How do I deploy?" }),
        );
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let json = body_json(res).await;
        let id = Uuid::parse_str(json["id"].as_str().unwrap()).unwrap();
        assert_eq!(json["domain"], "publishing");

        let controller = state.sessions.get(&id).unwrap().controller.clone();
        controller.wait_idle().await;

        for _ in 0..2 {
            let res = app
                .clone()
                .oneshot(empty_request("GET", &format!("/v1/sessions/{}", id)))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }
        controller.wait_idle().await;

        let res = app
            .oneshot(empty_request("GET", &format!("/v1/sessions/{}", id)))
            .await
            .unwrap();
        let json = body_json(res).await;
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["id"], "welcome");
        assert_eq!(messages[1]["sender"], "user");
        assert_eq!(messages[1]["content"], "How do I deploy?");
        assert!(messages[2]["content"]
            .as_str()
            .unwrap()
            .starts_with("To build and deploy data applications on Posit Connect:"));
        assert_eq!(json["turn_state"], "idle");
    }

    #[tokio::test]
    async fn test_submit_message_and_reject_blank() {
        let state = test_state(CoreConfig {
            greeting_enabled: false,
            ..offline_config()
        });
        let app = build_app(state.clone());

        let res = app
            .clone()
            .oneshot(json_request("POST", "/v1/sessions", serde_json::json!({})))
            .await
            .unwrap();
        let json = body_json(res).await;
        let id = json["id"].as_str().unwrap().to_string();
        assert_eq!(json["domain"], "design_system");
        assert_eq!(json["messages"].as_array().unwrap().len(), 0);

        let uri = format!("/v1/sessions/{}/messages", id);
        let res = app
            .clone()
            .oneshot(json_request("POST", &uri, serde_json::json!({ "text": "   " })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                serde_json::json!({ "text": "what are the gds colors" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::ACCEPTED);

        let uuid = Uuid::parse_str(&id).unwrap();
        let controller = state.sessions.get(&uuid).unwrap().controller.clone();
        controller.wait_idle().await;
        let messages = controller.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains("#1d70b8"));
    }

    #[tokio::test]
    async fn test_delete_session_then_not_found() {
        let state = test_state(offline_config());
        let app = build_app(state.clone());

        let res = app
            .clone()
            .oneshot(json_request("POST", "/v1/sessions", serde_json::json!({})))
            .await
            .unwrap();
        let id = body_json(res).await["id"].as_str().unwrap().to_string();
        let uri = format!("/v1/sessions/{}", id);

        let res = app.clone().oneshot(empty_request("DELETE", &uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(state.sessions.is_empty());

        let res = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_swept() {
        let state = test_state(offline_config());
        let app = build_app(state.clone());

        let res = app
            .clone()
            .oneshot(json_request("POST", "/v1/sessions", serde_json::json!({})))
            .await
            .unwrap();
        let id = Uuid::parse_str(body_json(res).await["id"].as_str().unwrap()).unwrap();
        let controller = state.sessions.get(&id).unwrap().controller.clone();

        assert_eq!(sweep_idle_sessions(&state.sessions, std::time::Duration::from_secs(3600)), 0);
        assert_eq!(state.sessions.len(), 1);

        assert_eq!(sweep_idle_sessions(&state.sessions, std::time::Duration::ZERO), 1);
        assert!(state.sessions.is_empty());
        assert!(controller.is_closed());

        let res = app
            .oneshot(empty_request("GET", &format!("/v1/sessions/{}", id)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_session_unknown_domain() {
        let app = build_app(test_state(offline_config()));
        let res = app
            .oneshot(json_request(
                "POST",
                "/v1/sessions",
                serde_json::json!({ "domain": "weather" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
