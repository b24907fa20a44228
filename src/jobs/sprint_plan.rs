//! Sprint plan job: goal text in, parsed sprint plus persisted JSON out.

use tracing::info;

use super::JobContext;
use crate::agent::{send_request, Agent};
use crate::artifact::{artifact_path, ensure_trailing_newline, write_artifact, FileArtifact};
use crate::error::Result;
use crate::parsers;
use crate::sprint::Sprint;

/// Builds the project-manager prompt for defining a sprint.
pub fn build_prompt(goal: &str) -> String {
    format!(
        "# Sprint: {goal}

## YOUR TASK

Define the scope and complexity (1-5) of the \"Sprint\".
Create a \"User Story\" for each \"Feature\" in this \"Sprint\"
All \"Acceptance Criteria\" are very clear and defined exactly

## DATA TYPES

interface UserStory {{
  /* User Story Format: \"As a User, I want …, so that …\" */
  story: string;
  complexity: number; // (1-5)
  /* Name of the \"Feature\" */
  feature: string;
  /* Acceptance criteria for the \"Feature\" */
  acceptanceCriteria: string[];
}}

interface Sprint {{
  scope: string;
  complexity: number;
  userStories: UserStory[];
}}

## OUTPUT FORMAT

valid JSON of \"interface Sprint\".
"
    )
}

/// Creates a sprint plan for the goal and persists it under `sprints/`.
///
/// The model answer must parse as a [`Sprint`], directly or from a fenced
/// code block; a malformed answer aborts the job with the original parse
/// error.
pub async fn create(
    goal: &str,
    agent: &mut Agent,
    ctx: &JobContext<'_>,
) -> Result<(Sprint, FileArtifact)> {
    info!(goal, "preparing sprint plan");
    let answer = send_request(build_prompt(goal), agent, ctx.provider).await?;
    let sprint: Sprint = parsers::parse_json(&answer.text)?;

    let path = ctx
        .paths
        .reserve(artifact_path(ctx.cwd, "sprints", &sprint.scope, "json"));
    let content = ensure_trailing_newline(&serde_json::to_string_pretty(&sprint)?);
    write_artifact(&path, &content).await?;

    Ok((sprint, FileArtifact::new(path, content)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_goal_and_contract() {
        let prompt = build_prompt("Add login");
        assert!(prompt.starts_with("# Sprint: Add login"));
        assert!(prompt.contains("interface Sprint"));
        assert!(prompt.contains("acceptanceCriteria"));
        assert!(prompt.contains("valid JSON"));
    }
}
