//! Batch routing of dropped files
//!
//! Every enabled upload is compiled once. Candidate names are then routed
//! in parallel against the shared, immutable matcher. Nothing is copied:
//! a [`Plan`] only says where each file belongs.

use crate::config::{LandingConfig, UploadConfig};
use crate::control::ControlFileFilter;
use crate::error::{LandingError, Result};
use crate::scan::scan_source;
use landing_pattern::{CompiledMatcher, MatchOutcome};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A file with a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub upload: String,
    pub file_name: String,
    pub dirs: Vec<String>,
    pub destination: PathBuf,
}

/// What happens to one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    Routed(Route),
    /// Batch marker, never routed
    Control { file_name: String },
    /// Does not belong to this upload
    Unmatched { file_name: String },
    /// Fits the pattern but its fields are inconsistent
    Rejected { file_name: String, reason: String },
}

impl RouteDecision {
    pub fn file_name(&self) -> &str {
        match self {
            RouteDecision::Routed(route) => &route.file_name,
            RouteDecision::Control { file_name }
            | RouteDecision::Unmatched { file_name }
            | RouteDecision::Rejected { file_name, .. } => file_name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RouteDecision::Routed(_) => "routed",
            RouteDecision::Control { .. } => "control",
            RouteDecision::Unmatched { .. } => "unmatched",
            RouteDecision::Rejected { .. } => "rejected",
        }
    }
}

/// Decision counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub routed: usize,
    pub control: usize,
    pub unmatched: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn from_decisions(decisions: &[RouteDecision]) -> Self {
        let mut summary = Self::default();
        for decision in decisions {
            match decision {
                RouteDecision::Routed(_) => summary.routed += 1,
                RouteDecision::Control { .. } => summary.control += 1,
                RouteDecision::Unmatched { .. } => summary.unmatched += 1,
                RouteDecision::Rejected { .. } => summary.rejected += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.routed + self.control + self.unmatched + self.rejected
    }

    fn add(&mut self, other: &BatchSummary) {
        self.routed += other.routed;
        self.control += other.control;
        self.unmatched += other.unmatched;
        self.rejected += other.rejected;
    }
}

/// Routing result for one upload's source directory
#[derive(Debug, Clone, Serialize)]
pub struct UploadPlan {
    pub upload: String,
    pub decisions: Vec<RouteDecision>,
    pub summary: BatchSummary,
}

/// Routing result for every enabled upload
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub uploads: Vec<UploadPlan>,
}

impl Plan {
    pub fn totals(&self) -> BatchSummary {
        let mut totals = BatchSummary::default();
        for upload in &self.uploads {
            totals.add(&upload.summary);
        }
        totals
    }

    pub fn has_rejections(&self) -> bool {
        self.uploads.iter().any(|u| u.summary.rejected > 0)
    }
}

/// An upload with its compiled pattern
#[derive(Debug, Clone)]
pub struct CompiledUpload {
    config: UploadConfig,
    matcher: CompiledMatcher,
}

impl CompiledUpload {
    pub fn compile(config: UploadConfig) -> Result<Self> {
        let matcher = config.compile()?;
        Ok(Self { config, matcher })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }

    /// Decide where `file_name` goes.
    pub fn route(&self, control: &ControlFileFilter, file_name: &str) -> RouteDecision {
        if control.is_control(file_name) {
            debug!(upload = %self.config.name, file = file_name, "Skipping control file");
            return RouteDecision::Control {
                file_name: file_name.to_string(),
            };
        }

        match self.matcher.match_name(file_name) {
            MatchOutcome::Match(dirs) => {
                let mut destination = self.config.destination.clone();
                destination.extend(&dirs);
                destination.push(file_name);
                debug!(
                    upload = %self.config.name,
                    file = file_name,
                    destination = %destination.display(),
                    "Routed file"
                );
                RouteDecision::Routed(Route {
                    upload: self.config.name.clone(),
                    file_name: file_name.to_string(),
                    dirs,
                    destination,
                })
            }
            MatchOutcome::NoMatch => {
                debug!(upload = %self.config.name, file = file_name, "File does not match pattern");
                RouteDecision::Unmatched {
                    file_name: file_name.to_string(),
                }
            }
            MatchOutcome::PatternError(err) => {
                warn!(
                    upload = %self.config.name,
                    file = file_name,
                    pattern = %self.config.pattern,
                    error = %err,
                    "Rejected file"
                );
                RouteDecision::Rejected {
                    file_name: file_name.to_string(),
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Routes files for every enabled upload
#[derive(Debug, Clone)]
pub struct Router {
    control: ControlFileFilter,
    uploads: Vec<CompiledUpload>,
}

impl Router {
    pub fn new(control: ControlFileFilter, uploads: Vec<CompiledUpload>) -> Self {
        Self { control, uploads }
    }

    /// Compile the control regex and every enabled upload.
    pub fn from_config(config: &LandingConfig) -> Result<Self> {
        let control = ControlFileFilter::new(&config.control_pattern)?;
        let uploads = config
            .enabled_uploads()
            .cloned()
            .map(CompiledUpload::compile)
            .collect::<Result<Vec<_>>>()?;
        info!(uploads = uploads.len(), "Router ready");
        Ok(Self::new(control, uploads))
    }

    pub fn uploads(&self) -> &[CompiledUpload] {
        &self.uploads
    }

    pub fn upload(&self, name: &str) -> Result<&CompiledUpload> {
        self.uploads
            .iter()
            .find(|u| u.name() == name)
            .ok_or_else(|| LandingError::UploadNotFound(name.to_string()))
    }

    /// Route `names` for `upload`. Output order follows input order.
    pub fn route_batch<S>(&self, upload: &CompiledUpload, names: &[S]) -> Vec<RouteDecision>
    where
        S: AsRef<str> + Sync,
    {
        names
            .par_iter()
            .map(|name| upload.route(&self.control, name.as_ref()))
            .collect()
    }

    /// Scan every enabled upload's source directory and route what is there.
    pub fn plan(&self) -> Result<Plan> {
        let mut plan = Plan::default();
        for upload in &self.uploads {
            let config = upload.config();
            let candidates = scan_source(&config.source_dir, config.recursive)?;
            let names: Vec<&str> = candidates.iter().map(|c| c.file_name.as_str()).collect();

            let decisions = self.route_batch(upload, &names);
            let summary = BatchSummary::from_decisions(&decisions);
            info!(
                upload = %config.name,
                source = %config.source_dir.display(),
                routed = summary.routed,
                control = summary.control,
                unmatched = summary.unmatched,
                rejected = summary.rejected,
                "Planned batch"
            );

            plan.uploads.push(UploadPlan {
                upload: config.name.clone(),
                decisions,
                summary,
            });
        }
        Ok(plan)
    }
}
