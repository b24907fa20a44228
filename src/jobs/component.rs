//! UI component job: a user story plus an optional endpoint in, a page
//! component out.

use super::JobContext;
use crate::agent::{send_request, Agent};
use crate::artifact::{artifact_path, ensure_trailing_newline, slug, write_artifact, FileArtifact};
use crate::error::Result;
use crate::openapi::ApiEndpoint;
use crate::parsers;
use crate::sprint::UserStory;

/// Builds the frontend-developer prompt for one (story, data model) pair.
///
/// When the story has no backing endpoint the data model section reads
/// "no data required" so the model does not invent one.
pub fn build_prompt(story: &UserStory, data_model: &str) -> Result<String> {
    let data_model = if data_model.is_empty() {
        "no data required"
    } else {
        data_model
    };
    Ok(format!(
        "# Component

## YOUR TASK

create a component for this user story:

{story}

## DATA MODEL

{data_model}

## CODE GUIDE

Use Nextjs
Use typescript
Use import-alias @/*
Use useSWR (GET)
Use @mui/material
Use axios (POST,PUT,DELETE)

## OUTPUT FORMAT

valid pure TypeScript and NOTHING ELSE
",
        story = serde_json::to_string(story)?
    ))
}

/// Creates the component for a story and writes it under `components/`.
///
/// The file is named after the endpoint path when one exists, after the
/// feature otherwise.
pub async fn create(
    story: &UserStory,
    endpoint: Option<&ApiEndpoint>,
    agent: &mut Agent,
    ctx: &JobContext<'_>,
) -> Result<FileArtifact> {
    let data_model = match endpoint {
        Some(endpoint) => serde_json::to_string(endpoint)?,
        None => String::new(),
    };
    let answer = send_request(build_prompt(story, &data_model)?, agent, ctx.provider).await?;

    let name = match endpoint {
        Some(endpoint) => endpoint.path.trim_start_matches('/').to_string(),
        None => slug(&story.feature),
    };
    let path = ctx
        .paths
        .reserve(artifact_path(ctx.cwd, "components", &name, "tsx"));

    let extracted = parsers::extract_code_block(&answer.text);
    let content = ensure_trailing_newline(&extracted.content);
    write_artifact(&path, &content).await?;

    Ok(FileArtifact::new(path, content))
}
