//! Backend handler job: one API endpoint in, a serverless function out.

use super::JobContext;
use crate::agent::{send_request, Agent};
use crate::artifact::{artifact_path, ensure_trailing_newline, write_artifact, FileArtifact};
use crate::error::Result;
use crate::openapi::ApiEndpoint;
use crate::parsers;

/// Builds the backend-developer prompt for one endpoint data model.
pub fn build_prompt(data_model: &str) -> String {
    format!(
        "# Serverless Function

## YOUR TASK

create a serverless function for the \"DATA MODEL\":

## DATA MODEL

{data_model}

## CODE GUIDE

Use Nextjs API routes
Use typescript
Use switch-case for request.method
Use prisma as database ORM

## OUTPUT FORMAT

valid pure TypeScript and NOTHING ELSE
"
    )
}

/// Creates the handler for an endpoint and writes it under `pages/api/`.
///
/// The answer usually arrives wrapped in a markdown fence; only the fenced
/// source text is persisted.
pub async fn create(
    endpoint: &ApiEndpoint,
    agent: &mut Agent,
    ctx: &JobContext<'_>,
) -> Result<FileArtifact> {
    let data_model = serde_json::to_string(endpoint)?;
    let answer = send_request(build_prompt(&data_model), agent, ctx.provider).await?;

    let name = endpoint.path.trim_start_matches('/');
    let path = ctx
        .paths
        .reserve(artifact_path(ctx.cwd, "pages/api", name, "ts"));

    let extracted = parsers::extract_code_block(&answer.text);
    let content = ensure_trailing_newline(&extracted.content);
    write_artifact(&path, &content).await?;

    Ok(FileArtifact::new(path, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_data_model_and_code_guide() {
        let prompt = build_prompt("{\"path\":\"/todos\",\"method\":\"get\"}");
        assert!(prompt.starts_with("# Serverless Function"));
        assert!(prompt.contains("{\"path\":\"/todos\",\"method\":\"get\"}"));
        assert!(prompt.contains("switch-case for request.method"));
        assert!(prompt.contains("prisma"));
    }
}
