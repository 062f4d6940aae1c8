// mode.rs

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Difficulty and tone preset of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum Mode {
    #[default]
    Realistic,
    Hardcore,
    Chaos,
}

const REALISTIC_SEEDS: &[&str] = &[
    "Key engineer resigns",
    "Competitor launches a similar product",
    "Payment provider freezes the account",
    "Major client delays payment",
    "Server outage during peak traffic",
    "Investor asks for a down round",
    "New data protection regulation",
    "Negative press article",
];

const HARDCORE_SEEDS: &[&str] = &[
    "Co-founder walks away with equity",
    "Lead investor backs out of the round",
    "Security breach leaks customer data",
    "Tax audit uncovers unpaid liabilities",
    "Largest customer churns",
    "Big tech clones the product for free",
    "Lawsuit over a patent infringement",
    "Bank holding the runway collapses",
];

const CHAOS_SEEDS: &[&str] = &[
    "Product goes viral for the wrong reason",
    "Office flooded overnight",
    "Celebrity endorses the product unprompted",
    "AI model starts insulting users",
    "Intern pushes to production on Friday",
    "Mascot costume scandal",
    "Crypto bros offer to buy the company",
    "Team demands a four-day week",
];

impl Mode {
    /// Fixed pool of crisis event labels drawn from each month.
    pub fn seed_pool(&self) -> &'static [&'static str] {
        match self {
            Mode::Realistic => REALISTIC_SEEDS,
            Mode::Hardcore => HARDCORE_SEEDS,
            Mode::Chaos => CHAOS_SEEDS,
        }
    }

    pub fn starting_cash(&self) -> i64 {
        match self {
            Mode::Realistic => 1_500_000,
            Mode::Hardcore => 1_000_000,
            Mode::Chaos => 1_200_000,
        }
    }

    pub fn style_instructions(&self) -> &'static str {
        match self {
            Mode::Realistic => {
                "Write like a seasoned startup mentor. Crises are grounded in how real companies fail. Both options carry believable trade-offs."
            }
            Mode::Hardcore => {
                "Write like a ruthless board member. Crises are severe and compounding. Neither option is safe; every choice costs something."
            }
            Mode::Chaos => {
                "Write like a satirical tech journalist. Crises are absurd but internally consistent. Options are bold and surprising."
            }
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Mode::Realistic, Language::English) => "Realistic",
            (Mode::Hardcore, Language::English) => "Hardcore",
            (Mode::Chaos, Language::English) => "Chaos",
            (Mode::Realistic, Language::Turkish) => "Gerçekçi",
            (Mode::Hardcore, Language::Turkish) => "Zor",
            (Mode::Chaos, Language::Turkish) => "Kaos",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum Language {
    #[default]
    English,
    #[strum(to_string = "Türkçe")]
    Turkish,
}
