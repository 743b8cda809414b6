use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::middleware::logging_middleware;
use super::org;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints
        .nest("/auth", auth::create_auth_router())
        // Organization endpoints
        .nest("/org", org::create_org_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::auth::JwtConfig;

    fn app() -> Router {
        create_router(AppState::in_memory(JwtConfig::new("router-test-secret", 30)))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, headers, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={}&password={}", username, password)))
            .unwrap()
    }

    async fn register(app: &Router, username: &str, password: &str) -> StatusCode {
        let (status, _, _) = send(
            app,
            json_request(
                "/auth/register",
                json!({ "username": username, "password": password }),
            ),
        )
        .await;
        status
    }

    async fn create_team(app: &Router, name: &str, parent_id: Option<i64>) -> i64 {
        let (status, _, body) = send(
            app,
            json_request("/org/teams/", json!({ "name": name, "parent_id": parent_id })),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{}", body);
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_root_status() {
        let (status, headers, body) = send(&app(), get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "System Operational" }));
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let (status, headers, _) = send(&app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get("x-request-id").unwrap(), "abc-123");
    }

    #[tokio::test]
    async fn test_ready_with_memory_store() {
        let (status, _, body) = send(&app(), get_request("/ready")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_register_and_duplicate() {
        let app = app();

        assert_eq!(register(&app, "alice", "wonderland").await, StatusCode::CREATED);

        let (status, _, body) = send(
            &app,
            json_request(
                "/auth/register",
                json!({ "username": "alice", "password": "other" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Username taken");
    }

    #[tokio::test]
    async fn test_register_malformed_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"username\":"))
            .unwrap();

        let (status, _, body) = send(&app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_login_and_me() {
        let app = app();
        register(&app, "alice", "wonderland").await;

        let (status, _, body) = send(&app, login_request("alice", "wonderland")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");

        let token = body["access_token"].as_str().unwrap().to_string();
        let request = Request::builder()
            .uri("/auth/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let (status, _, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = app();
        register(&app, "alice", "wonderland").await;

        let (status, headers, body) = send(&app, login_request("alice", "nope")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
        assert_eq!(body["detail"], "Incorrect credentials");
    }

    #[tokio::test]
    async fn test_me_with_bad_token() {
        let request = Request::builder()
            .uri("/auth/me")
            .header(header::AUTHORIZATION, "Bearer not.a.token")
            .body(Body::empty())
            .unwrap();

        let (status, _, body) = send(&app(), request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid token");
    }

    #[tokio::test]
    async fn test_create_team_errors() {
        let app = app();

        let (status, _, body) = send(
            &app,
            json_request("/org/teams/", json!({ "name": "X", "parent_id": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Invalid Parent ID");

        let (status, _, body) = send(
            &app,
            json_request("/org/teams/", json!({ "name": "X", "parent_id": 999999 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Parent team 999999 not found");

        let (_, _, body) = send(&app, get_request("/org/hierarchy/")).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_team_response() {
        let (status, _, body) = send(
            &app(),
            json_request("/org/teams/", json!({ "name": "Engineering" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "name": "Engineering", "status": "Created" }));
    }

    #[tokio::test]
    async fn test_hierarchy_with_members() {
        let app = app();
        register(&app, "alice", "wonderland").await;

        let a = create_team(&app, "A", None).await;
        let b = create_team(&app, "B", Some(a)).await;
        let c = create_team(&app, "C", Some(b)).await;

        let (status, _, _) = send(
            &app,
            json_request("/org/members/add", json!({ "username": "alice", "team_id": b })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, headers, body) = send(&app, get_request("/org/hierarchy/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(
            body,
            json!([{
                "id": a,
                "name": "A",
                "parent_id": null,
                "members": [],
                "children": [{
                    "id": b,
                    "name": "B",
                    "parent_id": a,
                    "members": ["alice"],
                    "children": [{
                        "id": c,
                        "name": "C",
                        "parent_id": b,
                        "members": [],
                        "children": []
                    }]
                }]
            }])
        );

        let (status, _, body) = send(&app, get_request(&format!("/org/teams/{}", b))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["members"], json!(["alice"]));
        assert_eq!(body["children"][0]["id"], c);
    }

    #[tokio::test]
    async fn test_subtree_not_found() {
        let (status, _, body) = send(&app(), get_request("/org/teams/42")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Team 42 not found");
    }

    #[tokio::test]
    async fn test_membership_flow() {
        let app = app();
        register(&app, "alice", "wonderland").await;
        let team = create_team(&app, "Platform", None).await;
        let pair = json!({ "username": "alice", "team_id": team });

        let (_, _, body) = send(&app, json_request("/org/members/add", pair.clone())).await;
        assert_eq!(body["message"], format!("User alice added to team {}", team));

        let (status, _, body) = send(&app, json_request("/org/members/add", pair.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("User alice is already a member of team {}", team)
        );

        let (status, _, _) = send(&app, json_request("/org/members/remove", pair.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, body) = send(&app, json_request("/org/members/remove", pair)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_membership_unknown_user_or_team() {
        let app = app();
        register(&app, "alice", "wonderland").await;
        let team = create_team(&app, "Platform", None).await;

        let (status, _, body) = send(
            &app,
            json_request("/org/members/add", json!({ "username": "bob", "team_id": team })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User 'bob' not found");

        let (status, _, body) = send(
            &app,
            json_request("/org/members/add", json!({ "username": "alice", "team_id": 77 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Team 77 not found");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_deep_hierarchy_is_served() {
        let depth: usize = 4_000;
        let state = AppState::in_memory(JwtConfig::new("router-test-secret", 30));

        let mut parent_id = None;
        for i in 0..depth {
            let team = state
                .team_service
                .create_team(crate::infrastructure::team::CreateTeamRequest {
                    name: format!("t{}", i),
                    parent_id,
                })
                .await
                .unwrap();
            parent_id = Some(team.id().value());
        }

        let app = create_router(state);
        for (uri, tail) in [("/org/hierarchy/", "]"), ("/org/teams/1", "")] {
            let request = get_request(uri);
            let router = app.clone();
            let response = tokio::spawn(async move { router.oneshot(request).await })
                .await
                .unwrap()
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            // Nested too deep for serde_json's parser, so inspect the raw bytes
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let opened = bytes.windows(12).filter(|w| *w == b"\"children\":[").count();
            assert_eq!(opened, depth);
            let closing = format!("{}{}", "]}".repeat(depth), tail);
            assert!(bytes.ends_with(closing.as_bytes()));
        }
    }
}
