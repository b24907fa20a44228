//! Job definitions: one module per artifact kind.
//!
//! A job is a `build_prompt → send_request → post-process → persist` unit.
//! Jobs never construct their own agents; the orchestrator passes a fresh
//! one per invocation so concurrent jobs cannot share history.

pub mod api_document;
pub mod component;
pub mod feature_spec;
pub mod handler;
pub mod sprint_plan;
pub mod test_spec;

use std::path::Path;

use crate::artifact::PathRegistry;
use crate::provider::CompletionProvider;

/// Shared context handed to every job invocation.
pub struct JobContext<'a> {
    /// Project working directory artifacts are rooted at.
    pub cwd: &'a Path,
    /// Completion provider for outbound requests.
    pub provider: &'a dyn CompletionProvider,
    /// Per-run filename collision guard.
    pub paths: &'a PathRegistry,
}
