//! Core types for PostureGuard

mod label;
mod verdict;
mod reason;
mod output;
mod summary;

pub use label::{PostureLabel, Region};
pub use verdict::Verdict;
pub use reason::ReasonCode;
pub use output::{RegionOutput, TickOutput, PostureAlert};
pub use summary::{SessionReport, SessionSummary};
