//! Test spec job: a feature file in, a Cypress step-definition file out.

use super::JobContext;
use crate::agent::{send_request, Agent};
use crate::artifact::{artifact_path, ensure_trailing_newline, write_artifact, FileArtifact};
use crate::error::Result;
use crate::parsers;

/// Builds the QA-engineer prompt for one feature file's content.
pub fn build_prompt(feature: &str) -> String {
    format!(
        "# E2E Tests

## YOUR TASK

create a cypress test for the feature file using \"@badeball/cypress-cucumber-preprocessor\":

{feature}

## TEMPLATE

import {{ When }} from \"@badeball/cypress-cucumber-preprocessor\";

When(\"I click submit\", () => {{
  cy.get('[data-cy=\"submit\"]').click();
}});

## CODE GUIDE

Use typescript
Exclusive use Given, When, Then (no aliases, like And, But)

## OUTPUT FORMAT

valid pure TypeScript and NOTHING ELSE
"
    )
}

/// Creates the step definitions for a previously written feature file,
/// next to it under `cypress/e2e/` with a `.ts` extension.
pub async fn create(
    feature: &FileArtifact,
    agent: &mut Agent,
    ctx: &JobContext<'_>,
) -> Result<FileArtifact> {
    let answer = send_request(build_prompt(&feature.content), agent, ctx.provider).await?;

    let stem = feature
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = ctx
        .paths
        .reserve(artifact_path(ctx.cwd, "cypress/e2e", &stem, "ts"));

    let extracted = parsers::extract_code_block(&answer.text);
    let content = ensure_trailing_newline(&extracted.content);
    write_artifact(&path, &content).await?;

    Ok(FileArtifact::new(path, content))
}
