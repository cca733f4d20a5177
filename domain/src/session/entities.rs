//! Session domain entities

use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A turn in a conversation (Entity)
///
/// Serializes as `{"role": "...", "content": "..."}`, the shape chat-completion
/// providers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Opaque session identifier (Value Object)
///
/// Either supplied by a client that saw it in a `{sessionId}` frame, or
/// minted by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A conversation session (Entity)
///
/// Invariant: the first turn is exactly one system turn. Later turns are only
/// appended; the session does not enforce user/assistant alternation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    turns: Vec<Turn>,
}

impl Session {
    pub fn with_system_prompt(id: SessionId, system_prompt: impl Into<String>) -> Self {
        Self {
            id,
            turns: vec![Turn::system(system_prompt)],
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append a turn. System turns after the first are ignored to keep the
    /// single-system-turn invariant.
    pub fn push(&mut self, turn: Turn) -> bool {
        if turn.role == Role::System {
            return false;
        }
        self.turns.push(turn);
        true
    }

    pub fn add_user_turn(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub fn add_assistant_turn(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// Role sequence, handy for assertions and logs.
    pub fn roles(&self) -> Vec<Role> {
        self.turns.iter().map(|t| t.role).collect()
    }
}
