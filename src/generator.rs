use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    ai::TextGenerator,
    error::{AttemptError, GenerationError},
    packet::{MonthPacket, fallback_packet},
    prompt::PacketRequest,
};

pub const DEFAULT_TEMPERATURE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    /// Wait after an unparsable response before the next attempt.
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

/// Why the static packet was used instead of generated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackReason {
    pub attempts: u32,
    pub last_error: String,
}

/// Result of generating a month: real content, or degraded static content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketOutcome {
    Success { packet: MonthPacket, attempts: u32 },
    Fallback { packet: MonthPacket, reason: FallbackReason },
}

impl PacketOutcome {
    pub fn packet(&self) -> &MonthPacket {
        match self {
            PacketOutcome::Success { packet, .. } | PacketOutcome::Fallback { packet, .. } => packet,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PacketOutcome::Fallback { .. })
    }
}

#[derive(Clone)]
pub struct PacketGenerator {
    backend: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
    temperature: f32,
}

impl PacketGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self {
            backend,
            policy: RetryPolicy::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Generates the packet for `request`. Never fails: once every attempt is
    /// spent the fallback packet for the request's mode, seed and language is
    /// returned.
    pub async fn generate(&self, request: &PacketRequest) -> PacketOutcome {
        let prompt = request.prompt();
        let max_attempts = self.policy.max_attempts();
        let mut last_error = AttemptError::Generation(GenerationError::EmptyResponse);

        for attempt in 1..=max_attempts {
            let text = match self.backend.generate(&prompt, self.temperature).await {
                Ok(text) if text.trim().is_empty() => {
                    log::warn!("Attempt {attempt}/{max_attempts}: empty response");
                    last_error = GenerationError::EmptyResponse.into();
                    continue;
                }
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Attempt {attempt}/{max_attempts}: generation failed: {e}");
                    last_error = e.into();
                    continue;
                }
            };

            match MonthPacket::from_response(&text) {
                Ok(packet) => {
                    log::info!(
                        "Month {} packet generated in {attempt} attempt(s)",
                        request.month
                    );
                    return PacketOutcome::Success {
                        packet,
                        attempts: attempt,
                    };
                }
                Err(e) => {
                    log::warn!("Attempt {attempt}/{max_attempts}: unusable response: {e}");
                    log::debug!("Unusable response text: {text}");
                    last_error = e.into();
                    if attempt < max_attempts {
                        tokio::time::sleep(self.policy.backoff()).await;
                    }
                }
            }
        }

        log::warn!(
            "Month {} falls back to static content after {max_attempts} attempts: {last_error}",
            request.month
        );
        PacketOutcome::Fallback {
            packet: fallback_packet(request.mode, &request.seed, request.language),
            reason: FallbackReason {
                attempts: max_attempts,
                last_error: last_error.to_string(),
            },
        }
    }
}
