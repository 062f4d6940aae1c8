// src/packet.rs
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{
    error::PacketError,
    mode::{Language, Mode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum OptionLabel {
    A,
    B,
}

impl OptionLabel {
    pub fn other(&self) -> Self {
        match self {
            OptionLabel::A => OptionLabel::B,
            OptionLabel::B => OptionLabel::A,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketOption {
    pub title: String,
    pub description: String,
}

/// The two choices of a month. Always exactly "A" and "B".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketOptions {
    #[serde(rename = "A")]
    pub a: PacketOption,
    #[serde(rename = "B")]
    pub b: PacketOption,
}

impl PacketOptions {
    pub fn get(&self, label: OptionLabel) -> &PacketOption {
        match label {
            OptionLabel::A => &self.a,
            OptionLabel::B => &self.b,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionLabel, &PacketOption)> {
        [(OptionLabel::A, &self.a), (OptionLabel::B, &self.b)].into_iter()
    }
}

/// Monthly content shown to the player: analysis, crisis and two options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPacket {
    pub analysis: String,
    pub crisis: String,
    pub options: PacketOptions,
}

impl MonthPacket {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a packet out of free-form model output.
    ///
    /// Only the first balanced `{...}` span is considered; any prose around it
    /// is ignored. Unknown fields are ignored, missing ones are an error.
    pub fn from_response(text: &str) -> Result<Self, PacketError> {
        let json = extract_json_object(text).ok_or(PacketError::NoJsonObject)?;
        Ok(Self::from_json(json)?)
    }
}

/// Returns the first balanced `{...}` span of `text`.
///
/// Nesting depth is tracked and braces inside JSON strings (including
/// escaped quotes) are not counted. Returns `None` when there is no opening
/// brace or the first object never closes.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Static packet used when the model could not produce a usable one.
pub fn fallback_packet(mode: Mode, seed: &str, language: Language) -> MonthPacket {
    let mode_label = mode.label(language);
    match language {
        Language::English => MonthPacket {
            analysis: format!(
                "Your advisor is unreachable this month. The numbers speak for themselves: the {mode_label} market keeps moving and the team looks to you."
            ),
            crisis: format!("{seed}. There is no time to wait for outside help."),
            options: PacketOptions {
                a: PacketOption {
                    title: "Play it safe".to_string(),
                    description: "Cut non-essential costs and ride out the problem with the team you have."
                        .to_string(),
                },
                b: PacketOption {
                    title: "Go all in".to_string(),
                    description: "Invest aggressively and try to turn the crisis into an opportunity."
                        .to_string(),
                },
            },
        },
        Language::Turkish => MonthPacket {
            analysis: format!(
                "Danışmanına bu ay ulaşılamıyor. Rakamlar ortada: {mode_label} piyasa hareket etmeye devam ediyor ve ekip sana bakıyor."
            ),
            crisis: format!("{seed}. Dışarıdan yardım beklemeye vakit yok."),
            options: PacketOptions {
                a: PacketOption {
                    title: "Temkinli oyna".to_string(),
                    description: "Gereksiz harcamaları kıs ve sorunu mevcut ekiple atlat."
                        .to_string(),
                },
                b: PacketOption {
                    title: "Risk al".to_string(),
                    description: "Agresif yatırım yap ve krizi bir fırsata çevirmeye çalış."
                        .to_string(),
                },
            },
        },
    }
}
