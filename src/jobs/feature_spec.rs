//! Feature spec job: a user story in, a Cucumber feature file out.

use super::JobContext;
use crate::agent::{send_request, Agent};
use crate::artifact::{artifact_path, ensure_trailing_newline, write_artifact, FileArtifact};
use crate::error::Result;
use crate::sprint::UserStory;

/// Builds the QA-engineer prompt for one user story.
pub fn build_prompt(story: &UserStory) -> Result<String> {
    Ok(format!(
        "# Feature: {feature}

## YOUR TASK

Create a Cucumber Feature for this user story:

{story}

## CODE GUIDE

Use Cucumber
Split \"User Story\" on \",\" into new lines (keep \",\")
Add Background
Add Scenarios

## OUTPUT FORMAT

valid Cucumber Feature file and NOTHING ELSE
",
        feature = story.feature,
        story = serde_json::to_string(story)?
    ))
}

/// Creates the feature file for a story under `cypress/e2e/`.
///
/// The raw answer is kept as-is apart from newline termination; Gherkin is
/// not fenced by the models this targets.
pub async fn create(
    story: &UserStory,
    agent: &mut Agent,
    ctx: &JobContext<'_>,
) -> Result<FileArtifact> {
    let answer = send_request(build_prompt(story)?, agent, ctx.provider).await?;

    let path = ctx
        .paths
        .reserve(artifact_path(ctx.cwd, "cypress/e2e", &story.feature, "feature"));
    let content = ensure_trailing_newline(&answer.text);
    write_artifact(&path, &content).await?;

    Ok(FileArtifact::new(path, content))
}
