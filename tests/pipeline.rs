//! End-to-end pipeline tests against a scripted completion provider.
//!
//! The provider answers by prompt kind, so a whole sprint runs without the
//! network; paused clocks keep the stagger delays instant.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use sprint_pilot::error::Result;
use sprint_pilot::provider::{CompletionProvider, CompletionRequest};
use sprint_pilot::sprint::{self, Sprint, SprintOptions, SprintSource};
use sprint_pilot::Error;
use tempfile::TempDir;
use tokio::time::Instant;

const PLAN_ANSWER: &str = r#"```json
{"scope":"Add login","complexity":2,"userStories":[{"story":"As a User, I want to see my todos, so that I stay organized","complexity":2,"feature":"Todos","acceptanceCriteria":["lists todos"]},{"story":"As a User, I want to read about the shop, so that I trust it","complexity":1,"feature":"About","acceptanceCriteria":["shows about page"]}]}
```"#;

const TODOS_DOCUMENT: &str = r#"openapi: 3.1.0
info:
  title: Todos API
  version: 0.0.1
paths:
  /todos:
    get:
      responses:
        "200":
          description: All todos
          content:
            application/json:
              schema:
                type: object
                properties:
                  items:
                    type: array
"#;

const CODE_ANSWER: &str = "```ts\nexport default function handler() {}\n```";

/// Answers by prompt kind and records when each request arrived.
struct ScriptedProvider {
    plan_answer: String,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self {
            plan_answer: PLAN_ANSWER.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_plan_answer(answer: &str) -> Self {
        Self {
            plan_answer: answer.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls_of(&self, kind: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == kind)
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let (kind, answer) = if prompt.starts_with("# Sprint:") {
            ("plan", self.plan_answer.clone())
        } else if prompt.starts_with("# OpenAPI Document File") {
            let answer = if prompt.contains("\"feature\":\"Todos\"") {
                TODOS_DOCUMENT.to_string()
            } else {
                "null".to_string()
            };
            ("api_document", answer)
        } else if prompt.starts_with("# Serverless Function") {
            ("handler", CODE_ANSWER.to_string())
        } else if prompt.starts_with("# Component") {
            ("component", CODE_ANSWER.to_string())
        } else {
            panic!("unexpected prompt: {prompt}");
        };

        self.calls.lock().unwrap().push((kind.to_string(), Instant::now()));
        Ok(answer)
    }
}

fn options(dir: &TempDir) -> SprintOptions {
    SprintOptions::new(dir.path(), "demo")
}

#[tokio::test(start_paused = true)]
async fn full_run_writes_every_artifact() {
    let dir = TempDir::new().unwrap();
    let provider = ScriptedProvider::new();

    let data = sprint::run(
        SprintSource::Scope("Add login".to_string()),
        &provider,
        &options(&dir),
    )
    .await
    .unwrap();

    assert_eq!(data.sprint_name, "add_login");
    assert_eq!(data.branch_name, "test/add_login");
    assert_eq!(data.sprint.user_stories.len(), 2);
    assert!(data.features.is_empty());

    // Plan persisted, newline-terminated, parseable back into a Sprint.
    let plan = std::fs::read_to_string(dir.path().join("sprints/add_login.json")).unwrap();
    assert!(plan.ends_with('\n'));
    let parsed: Sprint = serde_json::from_str(&plan).unwrap();
    assert_eq!(parsed.scope, "Add login");

    // Only the Todos story produced an API document, in both formats.
    assert!(dir.path().join("openapi/todos.yaml").is_file());
    assert!(dir.path().join("openapi/todos.json").is_file());
    assert!(!dir.path().join("openapi/about.yaml").exists());
    assert!(!dir.path().join("openapi/about.json").exists());

    // One handler per extracted endpoint, fenced source only.
    let handler = std::fs::read_to_string(dir.path().join("pages/api/todos.ts")).unwrap();
    assert_eq!(handler, "export default function handler() {}\n");

    // One component per (story, endpoint); the null document falls back to
    // the feature slug.
    assert!(dir.path().join("components/todos.tsx").is_file());
    assert!(dir.path().join("components/about.tsx").is_file());
}

#[tokio::test(start_paused = true)]
async fn stage_requests_are_staggered() {
    let dir = TempDir::new().unwrap();
    let provider = ScriptedProvider::new();
    let start = Instant::now();

    sprint::run(
        SprintSource::Scope("Add login".to_string()),
        &provider,
        &options(&dir),
    )
    .await
    .unwrap();

    // Two stories: architect requests leave at 10s and 20s after the stage
    // schedule is computed, never together.
    let documents = provider.calls_of("api_document");
    assert_eq!(documents.len(), 2);
    assert!(documents[0] - start >= Duration::from_secs(10));
    assert!(documents[1] - documents[0] >= Duration::from_secs(10));

    // Handlers start only after every document settled.
    let handlers = provider.calls_of("handler");
    assert_eq!(handlers.len(), 1);
    assert!(handlers[0] >= documents[1] + Duration::from_secs(10));

    // Components use the tighter default spacing.
    let components = provider.calls_of("component");
    assert_eq!(components.len(), 2);
    assert!(components[0] >= handlers[0] + Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn resumes_from_an_existing_plan_file() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("sprints")).unwrap();
    std::fs::write(
        dir.path().join("sprints/add_login.json"),
        r#"{"scope":"Add login","complexity":2,"userStories":[{"story":"As a User, I want to read about the shop, so that I trust it","complexity":1,"feature":"About","acceptanceCriteria":[]}]}"#,
    )
    .unwrap();

    let provider = ScriptedProvider::new();
    let data = sprint::run(
        SprintSource::Existing("add_login.json".to_string()),
        &provider,
        &options(&dir),
    )
    .await
    .unwrap();

    assert_eq!(data.sprint.scope, "Add login");
    // No plan request went out; the document stage still ran.
    assert!(provider.calls_of("plan").is_empty());
    assert_eq!(provider.calls_of("api_document").len(), 1);
    assert!(dir.path().join("components/about.tsx").is_file());
}

#[tokio::test(start_paused = true)]
async fn malformed_plan_aborts_with_the_parse_error() {
    let dir = TempDir::new().unwrap();
    let provider = ScriptedProvider::with_plan_answer("sorry, I cannot produce JSON today");

    let result = sprint::run(
        SprintSource::Scope("Add login".to_string()),
        &provider,
        &options(&dir),
    )
    .await;

    assert!(matches!(result, Err(Error::Json(_))));
    // The run stopped before any fan-out stage.
    assert!(provider.calls_of("api_document").is_empty());
    assert!(!dir.path().join("sprints").exists());
}

#[tokio::test(start_paused = true)]
async fn plan_without_fence_parses_directly() {
    let dir = TempDir::new().unwrap();
    let provider = ScriptedProvider::with_plan_answer(
        r#"{"scope":"Tiny","complexity":1,"userStories":[]}"#,
    );

    let data = sprint::run(
        SprintSource::Scope("Tiny".to_string()),
        &provider,
        &options(&dir),
    )
    .await
    .unwrap();

    assert_eq!(data.sprint_name, "tiny");
    assert!(data.sprint.user_stories.is_empty());
    assert!(dir.path().join("sprints/tiny.json").is_file());
}
