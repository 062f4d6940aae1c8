// ui/mod.rs

mod api_key_input;
mod constants;
mod draw;
pub mod game;
mod main_menu;
mod new_game;
mod settings_menu;
pub mod spinner;

use crossterm::event::KeyEvent;
use enum_dispatch::enum_dispatch;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::{app::Action, context::Context};

pub use api_key_input::ApiKeyInput;
pub use draw::{MIN_HEIGHT, MIN_WIDTH, center_rect};
pub use game::GameView;
pub use main_menu::MainMenu;
pub use new_game::NewGameMenu;
pub use settings_menu::SettingsMenu;

#[enum_dispatch]
pub trait Component {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action>;
    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context);
}

#[enum_dispatch(Component)]
#[derive(Debug)]
pub enum ComponentEnum {
    MainMenu,
    NewGameMenu,
    GameView,
    SettingsMenu,
    ApiKeyInput,
}
