use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::GameError,
    game_state::{GameState, MonthReport},
    generator::PacketOutcome,
    mode::{Language, Mode},
    packet::OptionLabel,
    prompt::PacketRequest,
    seed::pick_seed,
};

/// Where a session stands in the monthly loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Intro,
    Generating,
    AwaitingChoice,
    Resolved,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Survived,
    Bankrupt,
}

/// One player's run: the game state plus the loop state machine around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    id: Uuid,
    state: GameState,
    phase: Phase,
    current: Option<PacketOutcome>,
    reports: Vec<MonthReport>,
}

impl GameSession {
    pub fn new(idea: &str, mode: Mode) -> Result<Self, GameError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(GameError::EmptyIdea);
        }
        Ok(Self::from_state(GameState::new(idea, mode)))
    }

    fn from_state(state: GameState) -> Self {
        Self {
            id: Uuid::new_v4(),
            state,
            phase: Phase::Intro,
            current: None,
            reports: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&PacketOutcome> {
        self.current.as_ref()
    }

    pub fn reports(&self) -> &[MonthReport] {
        &self.reports
    }

    pub fn last_report(&self) -> Option<&MonthReport> {
        self.reports.last()
    }

    /// Picks this month's seed and captures the request to generate from.
    pub fn begin_month<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        language: Language,
    ) -> Result<PacketRequest, GameError> {
        self.expect_phase("begin a month", &[Phase::Intro, Phase::Resolved])?;

        let seed = pick_seed(self.state.mode, &mut self.state.used_seeds, rng);
        log::info!("Month {} begins with seed '{seed}'", self.state.month);
        self.phase = Phase::Generating;
        Ok(PacketRequest::new(&self.state, seed, language))
    }

    pub fn receive_packet(&mut self, outcome: PacketOutcome) -> Result<(), GameError> {
        self.expect_phase("receive a packet", &[Phase::Generating])?;
        self.current = Some(outcome);
        self.phase = Phase::AwaitingChoice;
        Ok(())
    }

    /// Resolves the player's choice and discards the month's packet.
    pub fn choose(&mut self, label: OptionLabel) -> Result<&MonthReport, GameError> {
        self.expect_phase("choose an option", &[Phase::AwaitingChoice])?;
        let outcome = self.current.take().ok_or(GameError::NoCurrentGame)?;

        let was_last_month = self.state.is_last_month();
        let option = outcome.packet().options.get(label);
        let report = self.state.close_month(label, option);
        log::info!(
            "Month {} closed with option {label}, cash now {}",
            report.month,
            report.cash_after
        );

        self.phase = if was_last_month {
            Phase::Complete
        } else {
            Phase::Resolved
        };
        self.reports.push(report);
        self.reports.last().ok_or(GameError::NoCurrentGame)
    }

    /// Outcome of the run, once the last month is resolved.
    pub fn verdict(&self) -> Option<Verdict> {
        if self.phase != Phase::Complete {
            return None;
        }
        Some(if self.state.is_bankrupt() {
            Verdict::Bankrupt
        } else {
            Verdict::Survived
        })
    }

    /// Starts the run over with the same idea and mode.
    pub fn reset(&mut self) {
        log::info!("Session {} reset", self.id);
        *self = Self::from_state(GameState::new(self.state.idea.clone(), self.state.mode));
    }

    fn expect_phase(&self, action: &'static str, allowed: &[Phase]) -> Result<(), GameError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }
}
