//! Sprint Pilot CLI
//!
//! Runs an LLM-driven sprint against a project directory.

use std::path::PathBuf;
use std::process::ExitCode;

use sprint_pilot::sprint::{self, SprintOptions, SprintSource};
use sprint_pilot::{initialize_project, Config, OpenAiClient};

struct Args {
    project: String,
    init: bool,
    sprint_scope: Option<String>,
    sprint_file: Option<String>,
    config_file: Option<PathBuf>,
}

fn usage(program: &str) {
    eprintln!("Usage: {program} <project-name> [options]");
    eprintln!();
    eprintln!("Runs an LLM-driven sprint for the given project.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --init                  Scaffold the project directory first");
    eprintln!("  --sprint-scope <text>   Plan and run a new sprint for this goal");
    eprintln!("  --sprint <file>         Resume an existing plan from sprints/<file>");
    eprintln!("  --config <file>         Load configuration from a TOML file");
    eprintln!();
    eprintln!("Environment variables:");
    eprintln!("  OPENAI_API_KEY  Completion provider credentials (required)");
    eprintln!("  GITHUB_TOKEN    GitHub token for issues and pull requests");
    eprintln!("  GITHUB_OWNER    GitHub repository owner");
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut parsed = Args {
        project: String::new(),
        init: false,
        sprint_scope: None,
        sprint_file: None,
        config_file: None,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--init" => parsed.init = true,
            "--sprint-scope" => parsed.sprint_scope = Some(iter.next()?.clone()),
            "--sprint" => parsed.sprint_file = Some(iter.next()?.clone()),
            "--config" => parsed.config_file = Some(PathBuf::from(iter.next()?)),
            _ if parsed.project.is_empty() && !arg.starts_with('-') => {
                parsed.project = arg.clone();
            }
            _ => return None,
        }
    }

    if parsed.project.is_empty() {
        return None;
    }
    // Exactly one plan source.
    if parsed.sprint_scope.is_some() == parsed.sprint_file.is_some() {
        return None;
    }
    Some(parsed)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let raw: Vec<String> = std::env::args().collect();
    let Some(args) = parse_args(&raw) else {
        usage(&raw[0]);
        return ExitCode::FAILURE;
    };

    let config = match &args.config_file {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("{error}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::from_env(),
    };
    if let Err(error) = config.validate() {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    let owner = config.github_owner.clone().unwrap_or_default();
    let cwd = if args.init {
        match initialize_project(&config.projects_dir, &args.project, &owner).await {
            Ok(data) => data.project_directory,
            Err(error) => {
                eprintln!("failed to initialize project: {error}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        config.projects_dir.join(sprint_pilot::slug(&args.project))
    };

    let source = match (&args.sprint_scope, &args.sprint_file) {
        (Some(scope), None) => SprintSource::Scope(scope.clone()),
        (None, Some(file)) => SprintSource::Existing(file.clone()),
        _ => unreachable!("parse_args enforces exactly one plan source"),
    };

    let provider = OpenAiClient::new(config.openai_api_key.clone());
    let mut options = SprintOptions::new(cwd, args.project.clone());
    options.api_document_delay = config.schedule.api_document_delay();
    options.handler_delay = config.schedule.handler_delay();
    options.component_delay = config.schedule.component_delay();

    match sprint::run(source, &provider, &options).await {
        Ok(data) => {
            tracing::info!(
                sprint = %data.sprint_name,
                branch = %data.branch_name,
                stories = data.sprint.user_stories.len(),
                "sprint complete"
            );
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
