//! In-process mock of the Archivo+ API.
//!
//! Tests register canned responses per (method, path) and inspect every
//! request the client made afterwards. The latest matching stub wins, so a
//! test can change an endpoint's answer between steps.

#![allow(dead_code)]

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{RwLock, oneshot};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Value,
    pub cookie: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
struct Stub {
    method: Method,
    path: String,
    /// Only match this exact query string
    query: Option<String>,
    /// Only match when the request's Cookie header contains this pair
    requires_cookie: Option<String>,
    status: u16,
    body: Option<Value>,
    set_cookie: Option<String>,
}

#[derive(Debug, Default)]
struct MockState {
    stubs: Vec<Stub>,
    requests: Vec<Recorded>,
}

pub struct MockApi {
    state: Arc<RwLock<MockState>>,
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockApi {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock api");
        let addr = listener.local_addr().expect("mock api address");
        let state = Arc::new(RwLock::new(MockState::default()));

        let app = Router::new().fallback(handle).with_state(state.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                eprintln!("Mock API error: {}", e);
            }
        });

        Self {
            state,
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Base URL to hand to `ApiClient::new`.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub async fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(Stub {
            method,
            path: path.to_string(),
            query: None,
            requires_cookie: None,
            status,
            body: Some(body),
            set_cookie: None,
        })
        .await;
    }

    /// Answer only requests whose query string is exactly `query`.
    pub async fn on_query(&self, method: Method, path: &str, query: &str, status: u16, body: Value) {
        self.push(Stub {
            method,
            path: path.to_string(),
            query: Some(query.to_string()),
            requires_cookie: None,
            status,
            body: Some(body),
            set_cookie: None,
        })
        .await;
    }

    /// Answer with an empty body (e.g. `204` for DELETE).
    pub async fn on_empty(&self, method: Method, path: &str, status: u16) {
        self.push(Stub {
            method,
            path: path.to_string(),
            query: None,
            requires_cookie: None,
            status,
            body: None,
            set_cookie: None,
        })
        .await;
    }

    /// Answer and set a session cookie, like the login endpoint does.
    pub async fn on_setting_cookie(&self, method: Method, path: &str, body: Value, cookie: &str) {
        self.push(Stub {
            method,
            path: path.to_string(),
            query: None,
            requires_cookie: None,
            status: 200,
            body: Some(body),
            set_cookie: Some(cookie.to_string()),
        })
        .await;
    }

    /// Answer only requests that carry `cookie` (`name=value`).
    pub async fn on_with_cookie(&self, method: Method, path: &str, cookie: &str, body: Value) {
        self.push(Stub {
            method,
            path: path.to_string(),
            query: None,
            requires_cookie: Some(cookie.to_string()),
            status: 200,
            body: Some(body),
            set_cookie: None,
        })
        .await;
    }

    async fn push(&self, stub: Stub) {
        self.state.write().await.stubs.push(stub);
    }

    pub async fn requests(&self) -> Vec<Recorded> {
        self.state.read().await.requests.clone()
    }

    /// Requests other than GET.
    pub async fn mutations(&self) -> Vec<Recorded> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    State(state): State<Arc<RwLock<MockState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        cookie: header_str(header::COOKIE),
        authorization: header_str(header::AUTHORIZATION),
    };

    let mut state = state.write().await;
    let stub = state
        .stubs
        .iter()
        .rev()
        .find(|s| {
            s.method == method
                && s.path == recorded.path
                && s.query.as_ref().is_none_or(|q| recorded.query.as_deref() == Some(q.as_str()))
                && s.requires_cookie.as_ref().is_none_or(|c| {
                    recorded.cookie.as_deref().is_some_and(|have| have.contains(c.as_str()))
                })
        })
        .cloned();
    state.requests.push(recorded);
    drop(state);

    let Some(stub) = stub else {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({"detail": "Not found."})),
        )
            .into_response();
    };

    let status = StatusCode::from_u16(stub.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = match stub.body {
        Some(body) => (status, axum::Json(body)).into_response(),
        None => status.into_response(),
    };
    if let Some(cookie) = stub.set_cookie {
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_str(&format!("{}; Path=/; HttpOnly", cookie)).expect("cookie header"),
        );
    }
    response
}

pub fn user_json(id: i64, email: &str, admin: bool) -> Value {
    serde_json::json!({
        "id": id,
        "email": email,
        "perfil": 1,
        "perfil_info": {
            "id": 1,
            "clave": if admin { "administrador" } else { "operador" },
            "nombre": if admin { "Administrador" } else { "Operador" },
            "color": "#ef4444",
            "permisos": {"puede_acceder_administracion": admin}
        },
        "nombre_completo": "Ana Ruiz",
        "is_active": true,
        "tipo": if admin { "administrador" } else { "operador" },
        "permisos_repositorios": [
            {"id": 1, "repositorio_id": 3, "repositorio_nombre": "Canal 5", "repositorio_folio": "REP-0003", "puede_ver": true}
        ]
    })
}
