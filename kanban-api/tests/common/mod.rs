#![allow(dead_code)]

/// Common test utilities for integration tests
///
/// Each test builds the full router over the in-memory store and session
/// backends, so no database or Redis is needed. Requests go through
/// `tower::ServiceExt::oneshot` and the session cookie is carried by hand,
/// the way a browser would.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use kanban_api::app::{build_router, AppState};
use kanban_api::config::Config;
use kanban_shared::auth::session::MemorySessionStore;
use kanban_shared::store::MemoryKanbanStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Test context holding the router under test
pub struct TestContext {
    pub app: axum::Router,
    pub config: Config,
}

/// Response with its body decoded as JSON (`Null` when not JSON)
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestContext {
    /// Router with default configuration and memory backends
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Router with custom configuration and memory backends
    pub fn with_config(config: Config) -> Self {
        let sessions = MemorySessionStore::new(config.session.ttl());
        let state = AppState::new(
            Arc::new(MemoryKanbanStore::new()),
            Arc::new(sessions),
            config.clone(),
        );

        Self {
            app: build_router(state),
            config,
        }
    }

    /// Sends a request, attaching `cookie` as the session cookie
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let set_cookie = headers
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            set_cookie,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, None, cookie).await
    }

    pub async fn post(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.send(Method::POST, uri, Some(body), cookie).await
    }

    pub async fn put(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.send(Method::PUT, uri, Some(body), cookie).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, None, cookie).await
    }

    /// Registers `username` and returns the `name=value` session cookie
    pub async fn register(&self, username: &str, password: &str) -> String {
        let res = self
            .post(
                "/api/auth/register",
                json!({ "username": username, "password": password }),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "register failed: {:?}", res.body);
        self.session_cookie(&res).expect("register should set a session cookie")
    }

    /// Logs in and returns the session cookie
    pub async fn login(&self, username: &str, password: &str) -> String {
        let res = self
            .post(
                "/api/auth/login",
                json!({ "username": username, "password": password }),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "login failed: {:?}", res.body);
        self.session_cookie(&res).expect("login should set a session cookie")
    }

    /// Whether the session behind `cookie` is valid
    pub async fn logged_in(&self, cookie: Option<&str>) -> bool {
        let res = self.get("/api/auth/check", cookie).await;
        assert_eq!(res.status, StatusCode::OK);
        res.body["loggedIn"].as_bool().unwrap()
    }

    /// Creates a board and returns its id
    pub async fn create_board(&self, cookie: &str, title: &str) -> String {
        let res = self
            .post("/api/boards", json!({ "title": title }), Some(cookie))
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "create board failed: {:?}", res.body);
        res.body["_id"].as_str().unwrap().to_string()
    }

    /// Creates a task and returns its id
    pub async fn create_task(&self, cookie: &str, board_id: &str, title: &str) -> String {
        let res = self
            .post(
                "/api/tasks",
                json!({ "boardId": board_id, "title": title }),
                Some(cookie),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "create task failed: {:?}", res.body);
        res.body["_id"].as_str().unwrap().to_string()
    }

    /// Extracts `name=value` of the session cookie from a response
    pub fn session_cookie(&self, res: &TestResponse) -> Option<String> {
        let header = res.set_cookie.as_deref()?;
        let pair = header.split(';').next()?.trim();
        let prefix = format!("{}=", self.config.session.cookie_name);

        match pair.strip_prefix(&prefix) {
            Some(value) if !value.is_empty() => Some(pair.to_string()),
            _ => None,
        }
    }
}
