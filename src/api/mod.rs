//! HTTP surface for BrowseMate.
//!
//! The router exposes the catalog resources under the configured API prefix (default `/api/v1`):
//!
//! - `GET /health`, `GET /health/ready` – liveness and readiness probes.
//! - `POST|GET /users`, `GET|PATCH|DELETE /users/{id}` – user accounts.
//! - `POST|GET /items`, `GET|PATCH|DELETE /items/{id}`, `POST /items/{id}/archive` – catalog items.
//!
//! Outside the prefix it serves `GET /` (navigation links), `GET /openapi.json`, and Swagger UI
//! at `/docs`. Input is decoded, trimmed, and validated by the extractors in [`extract`] before a
//! handler touches a store; failures map to `404`, `400`, or `422` through [`AppError`].

mod docs;
mod error;
mod extract;
mod health;
mod items;
mod schemas;
mod users;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{Config, CorsOrigins};
use crate::items::ItemStore;
use crate::users::UserStore;

pub use docs::{ApiDoc, openapi_document};
pub use error::AppError;

const DOCS_PATH: &str = "/docs";
const OPENAPI_PATH: &str = "/openapi.json";

/// Shared handler state: configuration plus one store per resource.
///
/// Build it once at startup and hand it to [`create_router`]; clones share the same stores.
#[derive(Clone)]
pub struct AppState {
    /// Effective configuration.
    pub config: Arc<Config>,
    /// User accounts.
    pub users: Arc<UserStore>,
    /// Catalog items.
    pub items: Arc<ItemStore>,
}

impl AppState {
    /// Create state with empty stores.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            users: Arc::new(UserStore::new()),
            items: Arc::new(ItemStore::new()),
        }
    }
}

/// Build the HTTP router for the catalog API.
pub fn create_router(state: AppState) -> Router {
    let prefix = state.config.api_prefix.clone();
    let resources = Router::new()
        .merge(health::routes())
        .merge(users::routes())
        .merge(items::routes());
    let api = if prefix.is_empty() {
        resources
    } else {
        Router::new().nest(&prefix, resources)
    };

    let swagger = SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, openapi_document(&state.config));
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(root))
        .merge(api)
        .merge(swagger)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        tracing::warn!(origin = %origin, error = %err, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(values))
        }
    }
}

/// Navigation links for humans poking at the server root.
async fn root(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "message": format!("Welcome to {}", config.app_name),
        "documentation": {
            "swagger_ui": DOCS_PATH,
            "openapi_json": OPENAPI_PATH,
        },
        "health_check": format!("{}/health", config.api_prefix),
        "version": config.app_version,
    }))
}

#[cfg(test)]
mod tests {
    use super::{AppState, create_router};
    use crate::config::Config;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(Config::default()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(payload) => {
                builder = builder.header("content-type", "application/json");
                Body::from(payload.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    fn user_payload(email: &str, username: &str) -> Value {
        json!({
            "email": email,
            "username": username,
            "full_name": "John Doe",
            "password": "securepassword123"
        })
    }

    #[tokio::test]
    async fn root_links_to_docs_and_health() {
        let (status, body) = send(&app(), Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to BrowseMate API");
        assert_eq!(body["documentation"]["swagger_ui"], "/docs");
        assert_eq!(body["health_check"], "/api/v1/health");
        assert_eq!(body["version"], "1.0.0");
    }

    #[tokio::test]
    async fn health_probes_report_version() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], "1.0.0");
        assert!(body["timestamp"].is_string());

        let (status, body) = send(&app, Method::GET, "/api/v1/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn create_user_returns_201_without_password() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/users",
            Some(user_payload("  john.doe@example.com ", "john_doe")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["email"], "john.doe@example.com");
        assert_eq!(body["is_active"], true);
        assert!(body["updated_at"].is_null());
        assert!(body["created_at"].is_string());
        assert!(body.get("password").is_none());

        let (status, fetched) = send(&app, Method::GET, "/api/v1/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_bad_request() {
        let app = app();
        send(&app, Method::POST, "/api/v1/users", Some(user_payload("a@x.com", "alpha"))).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/users",
            Some(user_payload("a@x.com", "bravo")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Email already registered");

        let (status, _) = send(&app, Method::GET, "/api/v1/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_user_fields_are_unprocessable() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/v1/users",
            Some(json!({
                "email": "not-an-email",
                "username": "ab",
                "password": "short"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<&str> = body["detail"]
            .as_array()
            .expect("detail list")
            .iter()
            .filter_map(|issue| issue["field"].as_str())
            .collect();
        assert_eq!(fields, vec!["email", "password", "username"]);
    }

    #[tokio::test]
    async fn malformed_json_is_unprocessable() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/v1/users",
            Some(json!({ "email": "a@x.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["location"], "body");
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let (status, body) = send(&app(), Method::GET, "/api/v1/users/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User with ID 42 not found");
    }

    #[tokio::test]
    async fn non_positive_or_malformed_ids_are_unprocessable() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/v1/users/0", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "id");

        let (status, _) = send(&app, Method::GET, "/api/v1/items/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn patch_distinguishes_null_from_absent() {
        let app = app();
        send(&app, Method::POST, "/api/v1/users", Some(user_payload("a@x.com", "alpha"))).await;

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/v1/users/1",
            Some(json!({ "full_name": null, "password": "anotherpassword" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["full_name"].is_null());
        assert_eq!(body["username"], "alpha");
        assert!(body["updated_at"].is_string());
        assert!(body.get("password").is_none());

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/api/v1/users/1",
            Some(json!({ "email": null })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn patch_username_conflict_is_a_bad_request() {
        let app = app();
        send(&app, Method::POST, "/api/v1/users", Some(user_payload("a@x.com", "alpha"))).await;
        send(&app, Method::POST, "/api/v1/users", Some(user_payload("b@x.com", "bravo"))).await;
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/v1/users/2",
            Some(json!({ "username": "alpha" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Username already taken");
    }

    #[tokio::test]
    async fn list_users_pages_and_filters() {
        let app = app();
        for index in 0..25 {
            send(
                &app,
                Method::POST,
                "/api/v1/users",
                Some(user_payload(&format!("user{index}@company.com"), &format!("user_{index}"))),
            )
            .await;
        }
        let (status, body) = send(&app, Method::GET, "/api/v1/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 25);
        assert_eq!(body["skip"], 0);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["users"].as_array().map(Vec::len), Some(10));
        assert_eq!(body["users"][0]["id"], 1);

        let (_, body) = send(
            &app,
            Method::GET,
            "/api/v1/users?skip=20&limit=10&email_contains=COMPANY",
            None,
        )
        .await;
        assert_eq!(body["total"], 25);
        assert_eq!(body["users"].as_array().map(Vec::len), Some(5));

        let (status, _) = send(&app, Method::GET, "/api/v1/users?limit=101", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let (status, _) = send(&app, Method::GET, "/api/v1/users?skip=-1", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_user_then_lookup_fails() {
        let app = app();
        send(&app, Method::POST, "/api/v1/users", Some(user_payload("a@x.com", "alpha"))).await;
        let (status, body) = send(&app, Method::DELETE, "/api/v1/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User 1 successfully deleted");
        assert_eq!(body["success"], true);

        let (status, _) = send(&app, Method::DELETE, "/api/v1/users/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn item_lifecycle_through_archive() {
        let app = app();
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({ "name": "Widget", "price": 9.99, "owner_id": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["status"], "draft");
        assert_eq!(created["price"], 9.99);
        assert_eq!(created["tags"], json!([]));
        assert!(created["updated_at"].is_null());

        let (status, archived) = send(&app, Method::POST, "/api/v1/items/1/archive", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(archived["status"], "archived");
        assert!(archived["updated_at"].is_string());

        let (status, fetched) = send(&app, Method::GET, "/api/v1/items/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["status"], "archived");

        let (status, body) = send(&app, Method::POST, "/api/v1/items/9/archive", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Item with ID 9 not found");
    }

    #[tokio::test]
    async fn item_validation_rejects_bad_prices_and_status() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({ "name": "Widget", "price": -1, "owner_id": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({ "name": "Widget", "price": 1.5, "owner_id": 1, "status": "retired" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({ "name": "   ", "price": 1, "owner_id": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn list_items_filters_by_query() {
        let app = app();
        for (name, price, status, tags) in [
            ("Cheap", 5.0, "active", json!(["sale"])),
            ("Mid", 25.0, "active", json!(["sale", "electronics"])),
            ("Pricey", 250.0, "draft", json!(["electronics"])),
        ] {
            send(
                &app,
                Method::POST,
                "/api/v1/items",
                Some(json!({
                    "name": name,
                    "price": price,
                    "status": status,
                    "tags": tags,
                    "owner_id": 1
                })),
            )
            .await;
        }

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/items?status=active&min_price=10&max_price=100",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["name"], "Mid");

        let (_, body) = send(&app, Method::GET, "/api/v1/items?tag=electronics", None).await;
        assert_eq!(body["total"], 2);

        let (status, _) = send(&app, Method::GET, "/api/v1/items?status=bogus", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn patch_item_updates_supplied_fields() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "name": "Widget",
                "description": "Small",
                "price": 9.99,
                "owner_id": 1
            })),
        )
        .await;
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/v1/items/1",
            Some(json!({ "price": 24.99, "status": "active" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 24.99);
        assert_eq!(body["status"], "active");
        assert_eq!(body["description"], "Small");

        let (status, body) = send(&app, Method::DELETE, "/api/v1/items/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Item 1 successfully deleted");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = send(&app(), Method::GET, "/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "BrowseMate API");
        assert!(body["paths"]["/api/v1/users/{id}"].is_object());
        assert!(body["paths"]["/api/v1/items/{id}/archive"]["post"].is_object());
    }

    #[tokio::test]
    async fn custom_prefix_moves_resource_routes() {
        let config = Config {
            api_prefix: "/v2".into(),
            ..Config::default()
        };
        let app = create_router(AppState::new(config));
        let (status, _) = send(&app, Method::GET, "/v2/health", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
