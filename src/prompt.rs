use serde::{Deserialize, Serialize};

use crate::{
    game_state::{GameState, Metrics, TOTAL_MONTHS},
    mode::{Language, Mode},
};

const PACKET_FORMAT: &str = r#"Answer with exactly one JSON object and nothing else, using this schema:
{
  "analysis": "<two or three sentences on where the company stands>",
  "crisis": "<the event hitting the company this month>",
  "options": {
    "A": { "title": "<short title>", "description": "<one or two sentences>" },
    "B": { "title": "<short title>", "description": "<one or two sentences>" }
  }
}"#;

/// Everything needed to generate one month, captured when the month begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketRequest {
    pub idea: String,
    pub mode: Mode,
    pub month: u32,
    pub metrics: Metrics,
    pub last_choice_summary: String,
    pub seed: String,
    pub language: Language,
}

impl PacketRequest {
    pub fn new(state: &GameState, seed: &str, language: Language) -> Self {
        Self {
            idea: state.idea.clone(),
            mode: state.mode,
            month: state.month,
            metrics: state.metrics.clone(),
            last_choice_summary: state.last_choice_summary.clone(),
            seed: seed.to_string(),
            language,
        }
    }

    /// Full prompt sent to the model for this month.
    pub fn prompt(&self) -> String {
        format!("{}\n\n{}", self.instructions(), self.game_brief())
    }

    fn instructions(&self) -> String {
        format!(
            "You are the narrator of a startup survival game played over {TOTAL_MONTHS} months. {}\n\n{PACKET_FORMAT}",
            self.mode.style_instructions()
        )
    }

    fn game_brief(&self) -> String {
        let previous = if self.last_choice_summary.is_empty() {
            "This is the first month, nothing has been decided yet."
        } else {
            self.last_choice_summary.as_str()
        };
        let language = match self.language {
            Language::English => "English",
            Language::Turkish => "Turkish",
        };

        format!(
            "Startup idea: {idea}\n\
             Month: {month} of {TOTAL_MONTHS}\n\
             Cash: {cash}\n\
             Team size: {team}\n\
             Reputation: {reputation}/100\n\
             Previous decision: {previous}\n\
             Crisis category for this month: {seed}\n\n\
             Write every text field in {language}.",
            idea = self.idea,
            month = self.month,
            cash = self.metrics.cash,
            team = self.metrics.team,
            reputation = self.metrics.reputation(),
            seed = self.seed,
        )
    }
}
