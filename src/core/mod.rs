//! Core modules for PostureGuard

pub mod window;
pub mod geometry;
pub mod config;
pub mod monitor;
pub mod tick;
pub mod api;

pub use window::{StabilityWindow, EvaluationPolicy};
pub use geometry::{Keypoint, angle_between, euclidean_distance};
pub use config::MonitorConfig;
pub use monitor::PostureMonitor;
pub use tick::{parse_tick, parse_ticks, TickSample};
pub use api::{create_router, router, run_server, AppState};
