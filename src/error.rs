use thiserror::Error;

use crate::session::Phase;

// Failures of the external text generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError), // Errors from the OpenAI API.

    #[error("Empty response")]
    EmptyResponse,

    #[error("No AI client configured")]
    NotConfigured,
}

// Failures turning model text into a month packet.
#[derive(Debug, Error)]
pub enum PacketError {
    #[error("No JSON object found in response")]
    NoJsonObject,

    #[error("Invalid packet: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Why a single generation attempt did not produce a packet.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Packet(#[from] PacketError),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("No current game")]
    NoCurrentGame,

    #[error("The startup idea cannot be empty")]
    EmptyIdea,

    #[error("Cannot {action} while {phase:?}")]
    InvalidTransition { action: &'static str, phase: Phase },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not create the log directory: {0}")]
    IO(#[from] std::io::Error),

    #[error("Logger already set")]
    AlreadySet,

    #[error("Failed to set logger: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}
