use crate::{message::Message, session::GameSession, settings::Settings, ui::spinner::Spinner};

/// What components may read, and the settings they may change.
#[derive(Debug)]
pub struct Context<'a> {
    pub settings: &'a mut Settings,
    pub ai_ready: bool,
    pub session: Option<&'a GameSession>,
    pub messages: &'a [Message],
    pub spinner: &'a Spinner,
}
