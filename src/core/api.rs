//! HTTP + WebSocket API for PostureGuard
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get window status
//! - POST /session/{id}/tick - Feed one tick of labels
//! - GET /session/{id}/summary - Get alert totals
//! - DELETE /session/{id} - End session, returns final totals
//! - WS /ws/{id} - Live tick updates
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::core::{tick::parse_optional, EvaluationPolicy, MonitorConfig, PostureMonitor, StabilityWindow};
use crate::error::PostureError;
use crate::types::{PostureLabel, SessionReport, TickOutput};
use crate::UPDATE_CHANNEL_CAPACITY;

/// Session state
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub config: MonitorConfig,
    pub monitor: PostureMonitor,
    pub update_tx: broadcast::Sender<TickOutput>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    /// Applied to fields a new-session request leaves out
    pub defaults: MonitorConfig,
}

impl AppState {
    pub fn new(defaults: MonitorConfig) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            defaults,
        })
    }

    /// Live tick stream of a session, `None` if the id is unknown
    pub async fn subscribe(&self, id: &str) -> Option<broadcast::Receiver<TickOutput>> {
        let sessions = self.sessions.read().await;
        sessions.get(id).map(|session| session.update_tx.subscribe())
    }
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    pub fps: Option<u32>,
    pub duration_secs: Option<u32>,
    pub back_capacity: Option<usize>,
    pub neck_capacity: Option<usize>,
    pub policy: Option<EvaluationPolicy>,
}

impl NewSessionRequest {
    fn merge(self, defaults: &MonitorConfig) -> MonitorConfig {
        MonitorConfig {
            fps: self.fps.unwrap_or(defaults.fps),
            duration_secs: self.duration_secs.unwrap_or(defaults.duration_secs),
            back_capacity: self.back_capacity.or(defaults.back_capacity),
            neck_capacity: self.neck_capacity.or(defaults.neck_capacity),
            policy: self.policy.unwrap_or(defaults.policy),
        }
    }
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub back_capacity: usize,
    pub neck_capacity: usize,
}

/// One region's window as seen from outside
#[derive(Debug, Serialize)]
pub struct WindowStatus {
    pub len: usize,
    pub capacity: usize,
    pub is_full: bool,
    pub last_flagged_label: Option<PostureLabel>,
}

impl From<&StabilityWindow> for WindowStatus {
    fn from(window: &StabilityWindow) -> Self {
        Self {
            len: window.len(),
            capacity: window.capacity(),
            is_full: window.is_full(),
            last_flagged_label: window.last_flagged_label(),
        }
    }
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub policy: EvaluationPolicy,
    pub ticks: u64,
    pub total_alerts: u64,
    pub back: WindowStatus,
    pub neck: WindowStatus,
}

/// Tick request, label codes `u` / `r` / `f`
#[derive(Debug, Deserialize)]
pub struct TickRequest {
    pub back: Option<String>,
    pub neck: Option<String>,
}

/// Summary response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub report: SessionReport,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error: status code plus JSON body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("session '{}' not found", id),
        }
    }
}

impl From<PostureError> for ApiError {
    fn from(e: PostureError) -> Self {
        let status = match e {
            PostureError::InvalidCapacity(_)
            | PostureError::ContractViolation { .. }
            | PostureError::InvalidTick(_)
            | PostureError::Config(_) => StatusCode::BAD_REQUEST,
            PostureError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: e.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Create the API router with fresh state
pub fn create_router(defaults: MonitorConfig) -> Router {
    router(AppState::new(defaults))
}

/// Create the API router over existing state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(end_session))
        .route("/session/:id/tick", post(add_tick))
        .route("/session/:id/summary", get(get_summary))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, ApiError> {
    let config = req.merge(&state.defaults);
    let monitor = PostureMonitor::new(&config)?;
    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

    let response = NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
        back_capacity: monitor.back().capacity(),
        neck_capacity: monitor.neck().capacity(),
    };

    let session = Session {
        id: session_id.clone(),
        config,
        monitor,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session = %session_id, "session created");

    Ok(Json(response))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| ApiError::not_found(&id))?;
    let summary = session.monitor.summary();

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        policy: session.config.policy,
        ticks: summary.ticks,
        total_alerts: summary.total_alerts,
        back: session.monitor.back().into(),
        neck: session.monitor.neck().into(),
    }))
}

/// Feed one tick to a session
async fn add_tick(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<TickRequest>,
) -> Result<Json<TickOutput>, ApiError> {
    // Reject bad codes before touching the session
    let back = parse_optional(req.back.as_deref())?;
    let neck = parse_optional(req.neck.as_deref())?;

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| ApiError::not_found(&id))?;

    let output = session.monitor.tick(back, neck);

    // No subscribers is fine
    let _ = session.update_tx.send(output.clone());

    Ok(Json(output))
}

/// Get alert summary for session
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| ApiError::not_found(&id))?;

    Ok(Json(SummaryResponse {
        report: session.monitor.summary().report(),
        session_id: id,
    }))
}

/// Drop a session; open live streams see the channel close
async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.remove(&id).ok_or_else(|| ApiError::not_found(&id))?;
    info!(session = %id, ticks = session.monitor.summary().ticks, "session ended");

    Ok(Json(SummaryResponse {
        report: session.monitor.summary().report(),
        session_id: id,
    }))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let rx = state.subscribe(&id).await.ok_or_else(|| ApiError::not_found(&id))?;

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward tick updates until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<TickOutput>) {
    let (mut sender, mut receiver) = socket.split();

    let mut forward = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(update) => {
                    let json = serde_json::to_string(&update).unwrap_or_default();
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket client lagging, updates dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut listen = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut forward => listen.abort(),
        _ = &mut listen => forward.abort(),
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let millis = Utc::now().timestamp_millis();
    format!("session_{:x}_{}", millis, seq)
}

/// Run the API server
pub async fn run_server(addr: &str, defaults: MonitorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(defaults);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API listening");
    println!("PostureGuard API running on {}", addr);
    println!("  POST /session/new          - Create session");
    println!("  GET  /session/:id          - Get window status");
    println!("  POST /session/:id/tick     - Feed one tick");
    println!("  GET  /session/:id/summary  - Get alert totals");
    println!("  DELETE /session/:id        - End session");
    println!("  WS   /ws/:id               - Live updates");
    println!("  GET  /health               - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
