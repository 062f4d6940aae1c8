use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    expenses::{Expenses, calculate_expenses},
    mode::Mode,
    packet::{OptionLabel, PacketOption},
};

pub const TOTAL_MONTHS: u32 = 12;
pub const STARTING_TEAM: u32 = 50;
pub const STARTING_REPUTATION: u8 = 50;
pub const MAX_REPUTATION: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub cash: i64,
    pub team: u32,
    #[serde(deserialize_with = "clamp_reputation")]
    reputation: u8,
}

fn clamp_reputation<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    Ok(u8::deserialize(deserializer)?.min(MAX_REPUTATION))
}

impl Metrics {
    pub fn new(cash: i64, team: u32, reputation: u8) -> Self {
        Self {
            cash,
            team,
            reputation: reputation.min(MAX_REPUTATION),
        }
    }

    pub fn reputation(&self) -> u8 {
        self.reputation
    }
}

/// What happened when a month was closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthReport {
    pub month: u32,
    pub label: OptionLabel,
    pub title: String,
    pub expenses: Expenses,
    pub cash_after: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub idea: String,
    pub mode: Mode,
    pub month: u32,
    pub metrics: Metrics,
    pub last_choice_summary: String,
    #[serde(default)]
    pub used_seeds: BTreeSet<String>,
}

impl GameState {
    pub fn new(idea: impl Into<String>, mode: Mode) -> Self {
        Self {
            idea: idea.into(),
            mode,
            month: 1,
            metrics: Metrics::new(mode.starting_cash(), STARTING_TEAM, STARTING_REPUTATION),
            last_choice_summary: String::new(),
            used_seeds: BTreeSet::new(),
        }
    }

    /// Expenses that closing the current month will charge.
    pub fn upcoming_expenses(&self) -> Expenses {
        calculate_expenses(self.metrics.team, self.month)
    }

    /// Whole months the cash covers at the current burn.
    pub fn runway_months(&self) -> i64 {
        let burn = self.upcoming_expenses().total;
        if burn <= 0 || self.metrics.cash <= 0 {
            return 0;
        }
        self.metrics.cash / burn
    }

    pub fn is_last_month(&self) -> bool {
        self.month >= TOTAL_MONTHS
    }

    pub fn is_bankrupt(&self) -> bool {
        self.metrics.cash < 0
    }

    /// Charges this month's expenses, records the choice and moves to the next month.
    ///
    /// The month counter stays at the last month once it is reached.
    pub fn close_month(&mut self, label: OptionLabel, option: &PacketOption) -> MonthReport {
        let month = self.month;
        let expenses = self.upcoming_expenses();
        self.metrics.cash -= expenses.total;
        self.last_choice_summary = format!(
            "Month {month}: chose option {label} \"{}\" ({})",
            option.title, option.description
        );
        if !self.is_last_month() {
            self.month += 1;
        }

        MonthReport {
            month,
            label,
            title: option.title.clone(),
            expenses,
            cash_after: self.metrics.cash,
        }
    }
}
