//! Role-scoped conversational agents.
//!
//! A [`Persona`] is the immutable configuration for a role: model tier,
//! temperature, token budget, history bound and system instructions. An
//! [`Agent`] binds one persona to a bounded conversation history and turns
//! an assigned task into a completion request.
//!
//! Agents are cheap and short-lived: the orchestrator mints a fresh one per
//! fan-out item, so no two concurrent jobs ever share history.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::error::Result;
use crate::provider::{ChatMessage, CompletionProvider, CompletionRequest};

/// Model tier: capability vs. throughput trade-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Highest-quality model, used for planning and schema work.
    Smart,
    /// Faster, cheaper model for code generation volume.
    Fast,
}

impl ModelTier {
    /// Returns the provider model identifier.
    pub fn id(&self) -> &'static str {
        match self {
            ModelTier::Smart => "gpt-4",
            ModelTier::Fast => "gpt-3.5-turbo",
        }
    }
}

/// Team roles that drive completion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    ProjectManager,
    SoftwareArchitect,
    BackendDeveloper,
    FrontendDeveloper,
    QaEngineer,
}

/// Immutable per-role configuration, defined once and never mutated.
#[derive(Debug, Clone, Copy)]
pub struct Persona {
    /// Display name.
    pub name: &'static str,
    /// Model tier for this role.
    pub model: ModelTier,
    /// Sampling temperature (0.0-1.0).
    pub temperature: f32,
    /// Maximum number of history entries kept per agent.
    pub history_limit: usize,
    /// Output token budget per request.
    pub max_tokens: u32,
    /// System instructions sent as the first message of every request.
    pub system: &'static str,
}

impl Role {
    /// Returns the static persona for this role.
    pub fn persona(&self) -> &'static Persona {
        match self {
            Role::ProjectManager => &Persona {
                name: "Project Manager",
                model: ModelTier::Smart,
                temperature: 0.5,
                history_limit: 9,
                max_tokens: 6000,
                system: "You are a \"Project Manager\".\n\
                    You ensure that the \"Project\" is delivered in the best quality.\n\
                    You make all decisions in the \"Project\".\n\
                    You always do \"YOUR TASK\".\n\
                    You always strictly follow \"DATA TYPES\".\n\
                    You exclusively answer with the desired \"OUTPUT FORMAT\".\n",
            },
            Role::SoftwareArchitect => &Persona {
                name: "Software Architect",
                model: ModelTier::Smart,
                temperature: 0.2,
                history_limit: 3,
                max_tokens: 6000,
                system: "You are a \"Software Architect\".\n\
                    You create \"DATA MODEL\" for REST API.\n\
                    You always do \"YOUR TASK\".\n\
                    You exclusively answer with the desired \"OUTPUT FORMAT\".\n",
            },
            Role::BackendDeveloper => &Persona {
                name: "Backend Developer",
                model: ModelTier::Fast,
                temperature: 0.2,
                history_limit: 3,
                max_tokens: 3000,
                system: "You are a Backend Developer.\n\
                    You implement \"DATA MODEL\".\n\
                    You always do \"YOUR TASK\".\n\
                    You always strictly follow the \"CODE GUIDE\".\n\
                    You always strictly follow the \"TEMPLATE\".\n\
                    You exclusively answer with the desired \"OUTPUT FORMAT\".\n",
            },
            Role::FrontendDeveloper => &Persona {
                name: "Frontend Developer",
                model: ModelTier::Fast,
                temperature: 0.2,
                history_limit: 3,
                max_tokens: 3000,
                system: "You are a Frontend Developer.\n\
                    You fetch \"DATA MODEL\".\n\
                    You always do \"YOUR TASK\".\n\
                    You always strictly follow the \"CODE GUIDE\".\n\
                    You always strictly follow the \"TEMPLATE\".\n\
                    You exclusively answer with the desired \"OUTPUT FORMAT\".\n",
            },
            Role::QaEngineer => &Persona {
                name: "QA Engineer",
                model: ModelTier::Smart,
                temperature: 0.2,
                history_limit: 3,
                max_tokens: 6000,
                system: "You are a \"QA Engineer\".\n\
                    You ensure that the \"Project\" is fully tested.\n\
                    You always do \"YOUR TASK\".\n\
                    You always strictly follow the \"CODE GUIDE\".\n\
                    You always strictly follow the \"TEMPLATE\".\n\
                    You exclusively answer with the desired \"OUTPUT FORMAT\".\n",
            },
        }
    }
}

/// Normalized completion result.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Identifier of the agent that produced the answer.
    pub agent_id: Uuid,
    /// Model identifier used for the request.
    pub model: &'static str,
    /// Role of the answering agent.
    pub role: Role,
    /// The provider's top-choice completion text.
    pub text: String,
}

/// A stateful agent bound to exactly one role persona.
///
/// History is bounded FIFO: assigning a task appends a user turn and evicts
/// the oldest entries past the persona's limit. Reading an answer never
/// mutates history; callers serialize assign/answer cycles per agent.
#[derive(Debug, Clone)]
pub struct Agent {
    id: Uuid,
    role: Role,
    history: VecDeque<ChatMessage>,
    task: Option<String>,
}

impl Agent {
    /// Creates a fresh agent for the given role with empty history.
    pub fn new(role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            history: VecDeque::new(),
            task: None,
        }
    }

    /// Returns the agent's unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the agent's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the bound persona.
    pub fn persona(&self) -> &'static Persona {
        self.role.persona()
    }

    /// Returns the current task, if one has been assigned.
    pub fn task(&self) -> Option<&str> {
        self.task.as_deref()
    }

    /// Returns the bounded conversation history, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ChatMessage> {
        self.history.iter()
    }

    /// Assigns a task: appends a user turn and evicts the oldest entries
    /// while the history exceeds the persona's limit.
    pub fn assign(&mut self, task: impl Into<String>) {
        let task = task.into();
        self.history.push_back(ChatMessage::user(task.clone()));
        let limit = self.persona().history_limit;
        while self.history.len() > limit {
            self.history.pop_front();
        }
        self.task = Some(task);
    }

    /// Issues one completion request: system instructions first, then the
    /// bounded history in order, with the persona's generation parameters.
    pub async fn answer(&self, provider: &dyn CompletionProvider) -> Result<Answer> {
        let persona = self.persona();
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(ChatMessage::system(persona.system));
        messages.extend(self.history.iter().cloned());

        let text = provider
            .complete(CompletionRequest {
                model: persona.model.id().to_string(),
                messages,
                max_tokens: persona.max_tokens,
                temperature: persona.temperature,
            })
            .await?;

        Ok(Answer {
            agent_id: self.id,
            model: persona.model.id(),
            role: self.role,
            text,
        })
    }
}

/// Assigns a task to the agent and returns its answer.
pub async fn send_request(
    task: impl Into<String>,
    agent: &mut Agent,
    provider: &dyn CompletionProvider,
) -> Result<Answer> {
    agent.assign(task);
    agent.answer(provider).await
}
