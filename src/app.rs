// /app.rs
use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    ai::{GameAI, OfflineAI, TextGenerator},
    context::Context,
    game_state::TOTAL_MONTHS,
    generator::{PacketGenerator, PacketOutcome},
    logging,
    message::Message,
    mode::Mode,
    packet::OptionLabel,
    session::{GameSession, Phase, Verdict},
    settings::Settings,
    tui::{Tui, TuiEvent},
    ui::{
        Component, ComponentEnum, GameView, MainMenu, SettingsMenu, game::format_money,
        spinner::Spinner,
    },
};

pub enum Action {
    Quit,
    StartNewGame {
        idea: String,
        mode: Mode,
    },
    Choose(OptionLabel),
    NextMonth,
    RestartGame,
    Reset,
    PacketReady {
        session_id: Uuid,
        outcome: Box<PacketOutcome>,
    },
    ValidateApiKey(String),
    ResetApiKey,
    ApiKeyValidationResult {
        api_key: String,
        valid: bool,
        // Entered by the player rather than loaded at startup.
        entered: bool,
    },
    SwitchComponent(ComponentEnum),
}

pub struct App {
    running: bool,
    component: ComponentEnum,

    settings: Settings,
    ai_ready: bool,

    session: Option<GameSession>,
    messages: Vec<Message>,
    spinner: Spinner,

    action_sender: mpsc::UnboundedSender<Action>,
    action_receiver: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let (action_sender, action_receiver) = mpsc::unbounded_channel();
        Self {
            running: true,
            component: ComponentEnum::from(MainMenu::default()),
            settings,
            ai_ready: false,
            session: None,
            messages: Vec::new(),
            spinner: Spinner::default(),
            action_sender,
            action_receiver,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?.tick_rate(10.0).frame_rate(30.0);
        tui.enter()?;
        log::info!("Runway started");

        if let Some(api_key) = self.settings.api_key() {
            self.spawn_key_validation(api_key, false);
        }

        while self.running {
            tokio::select! {
                Some(event) = tui.next() => self.handle_tui_event(&mut tui, event)?,
                Some(action) = self.action_receiver.recv() => self.handle_action(action),
                else => break,
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => self.on_key(key_event),
            TuiEvent::Tick => {
                if self.spinner.is_spinning() {
                    self.spinner.tick();
                }
            }
            TuiEvent::Init | TuiEvent::Render | TuiEvent::Resize(_, _) => self.draw(tui)?,
            TuiEvent::Error => log::warn!("Terminal event stream reported an error"),
            TuiEvent::Paste(_) | TuiEvent::FocusGained | TuiEvent::FocusLost => {}
        }
        Ok(())
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| {
            let context = Context {
                settings: &mut self.settings,
                ai_ready: self.ai_ready,
                session: self.session.as_ref(),
                messages: &self.messages,
                spinner: &self.spinner,
            };
            self.component
                .render(frame.area(), frame.buffer_mut(), &context);
        })?;
        Ok(())
    }

    fn on_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.handle_action(Action::Quit);
            return;
        }

        let debug_mode = self.settings.debug_mode;
        let action = self.component.on_key(
            key_event,
            &mut Context {
                settings: &mut self.settings,
                ai_ready: self.ai_ready,
                session: self.session.as_ref(),
                messages: &self.messages,
                spinner: &self.spinner,
            },
        );
        if self.settings.debug_mode != debug_mode {
            logging::set_debug(self.settings.debug_mode);
        }

        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchComponent(component) => self.component = component,
            Action::StartNewGame { idea, mode } => self.start_new_game(&idea, mode),
            Action::Choose(label) => self.choose(label),
            Action::NextMonth => self.start_month(),
            Action::RestartGame => self.restart_game(),
            Action::Reset => self.reset(),
            Action::PacketReady {
                session_id,
                outcome,
            } => self.receive_packet(session_id, *outcome),
            Action::ValidateApiKey(api_key) => {
                self.messages
                    .push(Message::system("Validating your API key..."));
                self.spawn_key_validation(api_key, true);
            }
            Action::ResetApiKey => {
                self.settings.openai_api_key = None;
                self.ai_ready = false;
                self.save_settings();
                self.messages
                    .push(Message::system("Your API key has been removed."));
                if let Some(api_key) = self.settings.api_key() {
                    self.spawn_key_validation(api_key, false);
                }
            }
            Action::ApiKeyValidationResult {
                api_key,
                valid,
                entered,
            } => self.handle_api_key_validation_result(api_key, valid, entered),
        }
    }

    fn start_new_game(&mut self, idea: &str, mode: Mode) {
        match GameSession::new(idea, mode) {
            Ok(session) => {
                log::info!("New game {} ({mode}): {}", session.id(), session.state().idea);
                self.messages.clear();
                self.messages.push(Message::system(format!(
                    "{} starts with {} in the bank. Survive {TOTAL_MONTHS} months.",
                    session.state().idea,
                    format_money(session.state().metrics.cash)
                )));
                self.session = Some(session);
                self.component = ComponentEnum::from(GameView::default());
                self.start_month();
            }
            Err(e) => self.messages.push(Message::system(e.to_string())),
        }
    }

    fn start_month(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let request = match session.begin_month(&mut rand::rng(), self.settings.language) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Cannot start the month: {e}");
                return;
            }
        };
        let session_id = session.id();

        self.messages.push(Message::system(format!(
            "Month {} of {TOTAL_MONTHS}",
            request.month
        )));
        self.spinner.start();

        let generator = self.packet_generator();
        let sender = self.action_sender.clone();
        tokio::spawn(async move {
            let outcome = generator.generate(&request).await;
            let _ = sender.send(Action::PacketReady {
                session_id,
                outcome: Box::new(outcome),
            });
        });
    }

    fn packet_generator(&self) -> PacketGenerator {
        let backend: Arc<dyn TextGenerator> = match self.settings.api_key() {
            Some(api_key) => Arc::new(GameAI::new(&api_key, self.settings.model.clone())),
            None => Arc::new(OfflineAI),
        };
        PacketGenerator::new(backend).with_temperature(self.settings.temperature)
    }

    fn receive_packet(&mut self, session_id: Uuid, outcome: PacketOutcome) {
        let Some(session) = self.session.as_mut().filter(|s| s.id() == session_id) else {
            log::debug!("Dropping packet for stale session {session_id}");
            return;
        };

        let packet = outcome.packet().clone();
        let is_fallback = outcome.is_fallback();
        if let Err(e) = session.receive_packet(outcome) {
            log::warn!("Dropping packet: {e}");
            return;
        }

        self.spinner.stop();
        if is_fallback {
            self.messages.push(Message::system(
                "Your advisor could not be reached. Here is a standard scenario.",
            ));
        }
        self.messages.push(Message::game(packet.analysis));
        self.messages
            .push(Message::game(format!("Crisis: {}", packet.crisis)));
    }

    fn choose(&mut self, label: OptionLabel) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let report = match session.choose(label) {
            Ok(report) => report.clone(),
            Err(e) => {
                log::warn!("Choice rejected: {e}");
                return;
            }
        };

        self.messages
            .push(Message::user(format!("{}: {}", report.label, report.title)));
        self.messages.push(Message::system(format!(
            "Month {} closed. Spent {}, cash is now {}.",
            report.month,
            format_money(report.expenses.total),
            format_money(report.cash_after)
        )));

        if session.phase() == Phase::Complete {
            let verdict = match session.verdict() {
                Some(Verdict::Bankrupt) => "The money ran out. The company is bankrupt.",
                _ => "You made it through the year. The company survived!",
            };
            log::info!("Session {} complete: {verdict}", session.id());
            self.messages.push(Message::system(verdict));
        }
    }

    fn restart_game(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.reset();
        self.spinner.stop();
        self.messages.clear();
        self.messages.push(Message::system(format!(
            "Starting over: {} with {} in the bank.",
            session.state().idea,
            format_money(session.state().metrics.cash)
        )));
        self.component = ComponentEnum::from(GameView::default());
        self.start_month();
    }

    fn reset(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Session {} abandoned", session.id());
        }
        self.spinner.stop();
        self.messages.clear();
        self.messages
            .push(Message::system("Game closed. Returned to the main menu."));
        self.component = ComponentEnum::from(MainMenu::default());
    }

    fn spawn_key_validation(&self, api_key: String, entered: bool) {
        let sender = self.action_sender.clone();
        tokio::spawn(async move {
            let valid = Settings::validate_api_key(&api_key).await;
            let _ = sender.send(Action::ApiKeyValidationResult {
                api_key,
                valid,
                entered,
            });
        });
    }

    fn handle_api_key_validation_result(&mut self, api_key: String, valid: bool, entered: bool) {
        self.ai_ready = valid;
        if !valid {
            log::warn!("API key validation failed");
            self.messages.push(Message::system(
                "We could not validate your API key. Please verify your key and internet connection and try again.",
            ));
            return;
        }

        log::info!("API key validated");
        if entered {
            self.settings.openai_api_key = Some(api_key);
            self.save_settings();
            self.messages
                .push(Message::system("API key validated, thank you."));
            if matches!(self.component, ComponentEnum::ApiKeyInput(_)) {
                self.component = ComponentEnum::from(SettingsMenu::new(&self.settings));
            }
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save() {
            log::error!("Failed to save settings: {e:#?}");
        }
    }
}
