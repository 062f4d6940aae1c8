use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use runway_ratatui::{
    error::GenerationError, game_state::GameState, prompt::PacketRequest, *,
};

const VALID: &str = r#"{"analysis":"a","crisis":"b","options":{"A":{"title":"t1","description":"d1"},"B":{"title":"t2","description":"d2"}}}"#;
const MISSING_CRISIS: &str = r#"{"analysis":"a","options":{"A":{"title":"t1","description":"d1"},"B":{"title":"t2","description":"d2"}}}"#;

/// Replays canned responses and counts calls; repeats the last one when the script runs out.
struct ScriptedAI {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    repeat: fn() -> Result<String, GenerationError>,
    calls: AtomicUsize,
}

impl ScriptedAI {
    fn new(
        script: Vec<Result<String, GenerationError>>,
        repeat: fn() -> Result<String, GenerationError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            repeat,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedAI {
    async fn generate(&self, prompt: &str, _temperature: f32) -> Result<String, GenerationError> {
        assert!(prompt.contains("Drone delivery"));
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().expect("Script lock poisoned").pop_front();
        next.unwrap_or_else(self.repeat)
    }
}

fn request() -> PacketRequest {
    let state = GameState::new("Drone delivery", Mode::Realistic);
    PacketRequest::new(&state, "Negative press article", Language::English)
}

fn no_backoff() -> RetryPolicy {
    RetryPolicy::new(3, Duration::ZERO)
}

#[tokio::test]
async fn test_missing_field_falls_back_after_three_attempts() {
    let ai = ScriptedAI::new(Vec::new(), || Ok(format!("Here you go: {MISSING_CRISIS}")));
    let generator = PacketGenerator::new(ai.clone()).with_policy(no_backoff());

    let outcome = generator.generate(&request()).await;

    assert_eq!(ai.calls(), 3);
    assert!(outcome.is_fallback());
    assert_eq!(
        outcome.packet(),
        &fallback_packet(Mode::Realistic, "Negative press article", Language::English)
    );
    match outcome {
        PacketOutcome::Fallback { reason, .. } => {
            assert_eq!(reason.attempts, 3);
            assert!(reason.last_error.contains("crisis"));
        }
        PacketOutcome::Success { .. } => panic!("Expected a fallback"),
    }
}

#[tokio::test]
async fn test_noisy_payload_is_extracted() {
    let ai = ScriptedAI::new(vec![Ok(format!("noise {VALID} trailing"))], || {
        Err(GenerationError::EmptyResponse)
    });
    let generator = PacketGenerator::new(ai.clone()).with_policy(no_backoff());

    let outcome = generator.generate(&request()).await;

    assert_eq!(ai.calls(), 1);
    assert_eq!(
        outcome,
        PacketOutcome::Success {
            packet: MonthPacket::from_json(VALID).expect("Expected a valid payload"),
            attempts: 1,
        }
    );
}

#[tokio::test]
async fn test_recovers_after_failed_attempts() {
    let ai = ScriptedAI::new(
        vec![
            Err(GenerationError::EmptyResponse),
            Ok("   ".to_string()),
            Ok(VALID.to_string()),
        ],
        || Err(GenerationError::EmptyResponse),
    );
    let generator = PacketGenerator::new(ai.clone()).with_policy(no_backoff());

    let outcome = generator.generate(&request()).await;

    assert_eq!(ai.calls(), 3);
    assert!(matches!(outcome, PacketOutcome::Success { attempts: 3, .. }));
    assert_eq!(outcome.packet().crisis, "b");
}

#[tokio::test]
async fn test_offline_backend_uses_fallback() {
    let generator = PacketGenerator::new(Arc::new(OfflineAI)).with_policy(no_backoff());

    let outcome = generator.generate(&request()).await;

    assert!(outcome.is_fallback());
    let packet = outcome.packet();
    assert!(!packet.options.get(OptionLabel::A).title.is_empty());
    assert!(!packet.options.get(OptionLabel::B).title.is_empty());
    if let PacketOutcome::Fallback { reason, .. } = outcome {
        assert_eq!(reason.last_error, "No AI client configured");
    }
}

#[tokio::test]
async fn test_single_attempt_policy() {
    let ai = ScriptedAI::new(Vec::new(), || Ok("not json at all".to_string()));
    let generator =
        PacketGenerator::new(ai.clone()).with_policy(RetryPolicy::new(0, Duration::from_secs(60)));

    // With one attempt there is no backoff to wait for.
    let outcome = generator.generate(&request()).await;

    assert_eq!(ai.calls(), 1);
    assert!(outcome.is_fallback());
}

#[tokio::test(start_paused = true)]
async fn test_backoff_only_between_unparsable_responses() {
    let ai = ScriptedAI::new(Vec::new(), || Ok("still thinking, no JSON yet".to_string()));
    let generator = PacketGenerator::new(ai.clone())
        .with_policy(RetryPolicy::new(3, Duration::from_secs(1)));

    let start = tokio::time::Instant::now();
    let outcome = generator.generate(&request()).await;

    // Waits after the first and second attempts, not after the last one.
    assert_eq!(start.elapsed(), Duration::from_secs(2));
    assert_eq!(ai.calls(), 3);
    assert!(outcome.is_fallback());
}

#[tokio::test(start_paused = true)]
async fn test_empty_and_failed_responses_retry_immediately() {
    let ai = ScriptedAI::new(
        vec![
            Err(GenerationError::EmptyResponse),
            Ok("  ".to_string()),
            Err(GenerationError::NotConfigured),
        ],
        || Err(GenerationError::EmptyResponse),
    );
    let generator = PacketGenerator::new(ai.clone())
        .with_policy(RetryPolicy::new(3, Duration::from_secs(1)));

    let start = tokio::time::Instant::now();
    let outcome = generator.generate(&request()).await;

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(ai.calls(), 3);
    assert!(outcome.is_fallback());
}

#[test]
fn test_default_retry_policy() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts(), 3);
    assert_eq!(policy.backoff(), Duration::from_secs(1));
}
