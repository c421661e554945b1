//! Unified codec error type used across all phases.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Wire,
    Decode,
    Encode,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Wire => write!(f, "Wire"),
            Phase::Decode => write!(f, "Decode"),
            Phase::Encode => write!(f, "Encode"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CodecError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub node_id: Option<String>,
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(
                f,
                "[{}:{}] {} (node '{}')",
                self.phase, self.code, self.message, id
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl std::error::Error for CodecError {}

impl CodecError {
    pub fn wire(code: &str, message: impl Into<String>) -> Self {
        CodecError {
            code: code.into(),
            phase: Phase::Wire,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn decode(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CodecError {
            code: code.into(),
            phase: Phase::Decode,
            message: message.into(),
            node_id,
        }
    }

    pub fn encode(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CodecError {
            code: code.into(),
            phase: Phase::Encode,
            message: message.into(),
            node_id,
        }
    }
}
