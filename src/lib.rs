pub mod ai;
pub mod app;
pub mod context;
pub mod error;
pub mod expenses;
pub mod game_state;
pub mod generator;
pub mod logging;
pub mod message;
pub mod mode;
pub mod packet;
pub mod prompt;
pub mod seed;
pub mod session;
pub mod settings;
pub mod tui;
pub mod ui;

// Re-export commonly used items for easier access
pub use ai::{GameAI, OfflineAI, TextGenerator};
pub use expenses::{Expenses, calculate_expenses};
pub use game_state::GameState;
pub use generator::{PacketGenerator, PacketOutcome, RetryPolicy};
pub use message::{Message, MessageType};
pub use mode::{Language, Mode};
pub use packet::{MonthPacket, OptionLabel, fallback_packet};
pub use seed::pick_seed;
pub use session::{GameSession, Phase, Verdict};
