//! Sprint orchestration: plan, then three scheduled fan-out stages.
//!
//! Stage order is strict: API documents, then backend handlers, then UI
//! components. Each stage pre-computes a stagger schedule, runs its jobs
//! concurrently against those deadlines and settles completely before the
//! next stage starts. Any failing job fails its whole stage and the run.

use std::path::PathBuf;
use std::time::Duration;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::agent::{Agent, Role};
use crate::artifact::{slug, FileArtifact, PathRegistry};
use crate::error::{Error, Result};
use crate::jobs::{api_document, component, handler, sprint_plan, JobContext};
use crate::openapi::{extract_endpoints, ApiEndpoint, OpenApiDocument};
use crate::parsers;
use crate::provider::CompletionProvider;
use crate::schedule::{stagger, wait_until, COMPONENT_STAGGER, DEFAULT_STAGGER};

/// One user story of a sprint plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    /// Narrative in "As a User, I want …, so that …" form.
    pub story: String,
    /// Complexity rating, 1 to 5.
    pub complexity: u8,
    /// Name of the feature the story belongs to.
    pub feature: String,
    /// Ordered acceptance criteria.
    pub acceptance_criteria: Vec<String>,
}

/// A sprint plan as produced by the project-manager role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// Free-text sprint scope.
    pub scope: String,
    /// Overall complexity rating, 1 to 5.
    pub complexity: u8,
    /// Ordered user stories.
    pub user_stories: Vec<UserStory>,
}

/// Result of a completed sprint run.
#[derive(Debug, Clone)]
pub struct SprintData {
    /// The plan the run executed.
    pub sprint: Sprint,
    /// Completed feature artifacts. Reserved, currently always empty.
    pub features: Vec<FileArtifact>,
    /// Slugified sprint scope.
    pub sprint_name: String,
    /// Git branch derived from the sprint name.
    pub branch_name: String,
}

/// Where the sprint plan comes from.
#[derive(Debug, Clone)]
pub enum SprintSource {
    /// Generate a new plan for this goal.
    Scope(String),
    /// Resume from an existing plan file under `sprints/`.
    Existing(String),
}

/// Per-run options.
#[derive(Debug, Clone)]
pub struct SprintOptions {
    /// Project working directory artifacts are rooted at.
    pub cwd: PathBuf,
    /// Repository name, carried for issue and pull-request glue.
    pub repo: String,
    /// Stagger spacing for the API document stage.
    pub api_document_delay: Duration,
    /// Stagger spacing for the handler stage.
    pub handler_delay: Duration,
    /// Stagger spacing for the component stage.
    pub component_delay: Duration,
}

impl SprintOptions {
    /// Creates options with the default stage delays.
    pub fn new(cwd: impl Into<PathBuf>, repo: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            repo: repo.into(),
            api_document_delay: DEFAULT_STAGGER,
            handler_delay: DEFAULT_STAGGER,
            component_delay: COMPONENT_STAGGER,
        }
    }
}

/// Runs a full sprint: plan, API documents, handlers, components.
///
/// Requests within a stage are staggered to stay under the provider's rate
/// limit. Errors from any stage abort the run after being logged at the
/// boundary; provider rejections are logged with their status and message.
pub async fn run(
    source: SprintSource,
    provider: &dyn CompletionProvider,
    options: &SprintOptions,
) -> Result<SprintData> {
    match run_stages(source, provider, options).await {
        Ok(data) => Ok(data),
        Err(Error::Provider {
            status,
            status_text,
            message,
        }) => {
            error!(
                status,
                status_text = %status_text,
                message = message.as_deref().unwrap_or(""),
                "provider rejected a sprint request"
            );
            Err(Error::Provider {
                status,
                status_text,
                message,
            })
        }
        Err(error) => {
            error!(%error, "sprint run failed");
            Err(error)
        }
    }
}

async fn run_stages(
    source: SprintSource,
    provider: &dyn CompletionProvider,
    options: &SprintOptions,
) -> Result<SprintData> {
    let paths = PathRegistry::new();
    let ctx = JobContext {
        cwd: &options.cwd,
        provider,
        paths: &paths,
    };

    // PLAN: generate a new plan or resume from a prior one.
    let sprint = match &source {
        SprintSource::Scope(goal) => {
            let mut agent = Agent::new(Role::ProjectManager);
            let (sprint, _) = sprint_plan::create(goal, &mut agent, &ctx).await?;
            info!(scope = %sprint.scope, "created sprint plan");
            sprint
        }
        SprintSource::Existing(name) => {
            let path = options.cwd.join("sprints").join(name);
            let content = tokio::fs::read_to_string(&path).await?;
            let sprint: Sprint = parsers::parse_json(&content)?;
            info!(scope = %sprint.scope, "resumed sprint plan");
            sprint
        }
    };

    let sprint_name = slug(&sprint.scope);
    let branch_name = format!("test/{sprint_name}");
    let stories = &sprint.user_stories;

    // API_DOCS: one document per story, staggered, fresh architect each.
    let deadlines = stagger(stories.len(), options.api_document_delay);
    let documents = try_join_all(stories.iter().zip(&deadlines).map(|(story, deadline)| {
        let ctx = &ctx;
        async move {
            wait_until(*deadline).await;
            let mut agent = Agent::new(Role::SoftwareArchitect);
            api_document::create(story, &mut agent, ctx).await
        }
    }))
    .await?;

    let produced = documents.iter().filter(|d| !d.is_empty()).count();
    info!(count = produced, "created API documents");

    // HANDLERS: flatten every endpoint of every non-empty document, then
    // schedule over the flattened count so the stagger holds per request.
    let mut endpoints = Vec::new();
    for document in documents.iter().filter(|d| !d.is_empty()) {
        let parsed: OpenApiDocument = parsers::parse_json(&document.content)?;
        endpoints.extend(extract_endpoints(&parsed));
    }

    let deadlines = stagger(endpoints.len(), options.handler_delay);
    let handlers = try_join_all(endpoints.iter().zip(&deadlines).map(|(endpoint, deadline)| {
        let ctx = &ctx;
        async move {
            wait_until(*deadline).await;
            let mut agent = Agent::new(Role::BackendDeveloper);
            handler::create(endpoint, &mut agent, ctx).await
        }
    }))
    .await?;
    info!(count = handlers.len(), "created backend handlers");

    // COMPONENTS: each story pairs with the same-index document; the empty
    // sentinel means one component with no data model.
    let deadlines = stagger(stories.len(), options.component_delay);
    let components = try_join_all(
        stories
            .iter()
            .zip(&documents)
            .zip(&deadlines)
            .map(|((story, document), deadline)| {
                let ctx = &ctx;
                async move {
                    wait_until(*deadline).await;

                    let endpoints: Vec<Option<ApiEndpoint>> = if document.is_empty() {
                        vec![None]
                    } else {
                        let parsed: OpenApiDocument = parsers::parse_json(&document.content)?;
                        extract_endpoints(&parsed).into_iter().map(Some).collect()
                    };

                    try_join_all(endpoints.iter().map(|endpoint| async move {
                        let mut agent = Agent::new(Role::FrontendDeveloper);
                        component::create(story, endpoint.as_ref(), &mut agent, ctx).await
                    }))
                    .await
                }
            }),
    )
    .await?;
    let component_count: usize = components.iter().map(Vec::len).sum();
    info!(count = component_count, "created components");

    Ok(SprintData {
        sprint,
        features: Vec::new(),
        sprint_name,
        branch_name,
    })
}
