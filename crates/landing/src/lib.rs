//! Landing - date-partitioned routing of dropped files
//!
//! Each upload pairs a source directory with a file name pattern compiled
//! by [`landing_pattern`]. Files whose names match are routed to
//! `destination/<year>/<month>/.../<captures>/<file name>`.

pub mod config;
pub mod control;
pub mod error;
pub mod logging;
pub mod router;
pub mod scan;

pub use config::{LandingConfig, UploadConfig};
pub use control::{ControlFileFilter, DEFAULT_CONTROL_PATTERN};
pub use error::{LandingError, Result};
pub use router::{BatchSummary, CompiledUpload, Plan, Route, RouteDecision, Router, UploadPlan};
pub use scan::{scan_source, Candidate};
