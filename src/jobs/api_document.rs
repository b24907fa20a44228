//! API document job: one user story in, an OpenAPI document out (or the
//! empty sentinel when the story needs no backend data).

use super::JobContext;
use crate::agent::{send_request, Agent};
use crate::artifact::{artifact_path, ensure_trailing_newline, write_artifact, FileArtifact};
use crate::error::Result;
use crate::sprint::UserStory;

/// Builds the software-architect prompt for one user story.
///
/// The model is told to answer with the literal token `null` when the story
/// requires no backend data at all.
pub fn build_prompt(story: &UserStory) -> Result<String> {
    Ok(format!(
        "# OpenAPI Document File

## YOUR TASK

Create an OpenAPI document for this user story if required (if no data is required return null):

{story}

## TEMPLATE

openapi: 3.1.0
info:
  title: A minimal OpenAPI document
  version: 0.0.1
paths: {{}}

## OUTPUT FORMAT

valid pure yaml
",
        story = serde_json::to_string(story)?
    ))
}

/// Creates the API document for a story.
///
/// A `null` answer yields the empty sentinel and writes nothing. Otherwise
/// the raw YAML and a pretty JSON conversion are both persisted under
/// `openapi/`; the returned artifact carries the JSON path and the compact
/// JSON form that downstream jobs thread into their prompts.
pub async fn create(
    story: &UserStory,
    agent: &mut Agent,
    ctx: &JobContext<'_>,
) -> Result<FileArtifact> {
    let answer = send_request(build_prompt(story)?, agent, ctx.provider).await?;

    if answer.text.trim() == "null" {
        return Ok(FileArtifact::empty());
    }

    let yaml_path = ctx
        .paths
        .reserve(artifact_path(ctx.cwd, "openapi", &story.feature, "yaml"));
    write_artifact(&yaml_path, &ensure_trailing_newline(&answer.text)).await?;

    let value: serde_json::Value = serde_yaml::from_str(&answer.text)?;
    let json_path = ctx
        .paths
        .reserve(artifact_path(ctx.cwd, "openapi", &story.feature, "json"));
    let pretty = ensure_trailing_newline(&serde_json::to_string_pretty(&value)?);
    write_artifact(&json_path, &pretty).await?;

    let compact = ensure_trailing_newline(&serde_json::to_string(&value)?);
    Ok(FileArtifact::new(json_path, compact))
}
