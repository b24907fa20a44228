//! Sprint Pilot - LLM-driven sprint automation
//!
//! This library turns a free-text sprint goal into a tree of project
//! artifacts: a sprint plan, OpenAPI documents, backend handlers, UI
//! components and test specs, generated by role-scoped agents with
//! rate-limit-aware concurrent fan-out and tolerant structured-output
//! parsing.

pub mod agent;
pub mod artifact;
pub mod config;
pub mod error;
pub mod github;
pub mod jobs;
pub mod openapi;
pub mod parsers;
pub mod project;
pub mod provider;
pub mod repo;
pub mod schedule;
pub mod sprint;

pub use agent::{send_request, Agent, Answer, ModelTier, Persona, Role};
pub use artifact::{
    artifact_path, ensure_trailing_newline, slug, write_artifact, FileArtifact, PathRegistry,
};
pub use config::{Config, ScheduleConfig};
pub use error::Error;
pub use github::GitHubClient;
pub use openapi::{extract_endpoints, ApiEndpoint, OpenApiDocument, RequestBody, ResponseSchema};
pub use parsers::{extract_code_block, is_syntax_error, parse_json, ExtractedCodeBlock};
pub use project::{initialize_project, ProjectData};
pub use provider::{ChatMessage, CompletionProvider, CompletionRequest, OpenAiClient};
pub use repo::RepoManager;
pub use schedule::{stagger, wait_until, COMPONENT_STAGGER, DEFAULT_STAGGER};
pub use sprint::{Sprint, SprintData, SprintOptions, SprintSource, UserStory};
