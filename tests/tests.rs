// ../tests/tests.rs
use crossterm::event::{KeyCode, KeyEvent};
use rand::{SeedableRng, rngs::StdRng};
use runway_ratatui::{
    context::Context,
    error::GameError,
    game_state::{MAX_REPUTATION, Metrics, STARTING_REPUTATION, STARTING_TEAM, TOTAL_MONTHS},
    packet::extract_json_object,
    prompt::PacketRequest,
    settings::Settings,
    ui::{
        Component, SettingsMenu,
        game::{format_money, parse_game_content},
        spinner::Spinner,
    },
    *,
};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

const PAYLOAD: &str = r#"{"analysis":"a","crisis":"b","options":{"A":{"title":"t1","description":"d1"},"B":{"title":"t2","description":"d2"}}}"#;

fn fallback_outcome(session: &GameSession) -> PacketOutcome {
    PacketOutcome::Fallback {
        packet: fallback_packet(session.state().mode, "Office flooded overnight", Language::English),
        reason: generator::FallbackReason {
            attempts: 3,
            last_error: "No AI client configured".to_string(),
        },
    }
}

fn play_month(session: &mut GameSession, rng: &mut StdRng, label: OptionLabel) {
    session
        .begin_month(rng, Language::English)
        .expect("Expected the month to begin");
    let outcome = fallback_outcome(session);
    session
        .receive_packet(outcome)
        .expect("Expected the packet to be accepted");
    session.choose(label).expect("Expected the choice to resolve");
}

#[test]
fn test_seed_never_leaves_the_mode_pool() {
    let mut rng = StdRng::seed_from_u64(7);
    for mode in Mode::iter() {
        let mut used = BTreeSet::new();
        for _ in 0..50 {
            let seed = pick_seed(mode, &mut used, &mut rng);
            assert!(mode.seed_pool().contains(&seed), "{seed} is not a {mode} seed");
        }
    }
}

#[test]
fn test_seed_pool_is_exhausted_before_repeating() {
    let mut rng = StdRng::seed_from_u64(42);
    for mode in Mode::iter() {
        let pool_size = mode.seed_pool().len();
        let mut used = BTreeSet::new();
        let mut drawn = BTreeSet::new();

        for _ in 0..pool_size {
            drawn.insert(pick_seed(mode, &mut used, &mut rng));
        }
        assert_eq!(drawn.len(), pool_size);
        assert_eq!(used.len(), pool_size);

        // The next draw clears the used set before picking.
        pick_seed(mode, &mut used, &mut rng);
        assert_eq!(used.len(), 1);
    }
}

#[test]
fn test_seed_ignores_labels_from_other_pools() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut used: BTreeSet<String> = ["not a seed".to_string()].into_iter().collect();
    let seed = pick_seed(Mode::Chaos, &mut used, &mut rng);

    assert!(!used.contains("not a seed"));
    assert!(used.contains(seed));
}

#[test]
fn test_extract_json_object_skips_surrounding_prose() {
    let text = format!("Sure! Here it is: {PAYLOAD} Hope this helps {{ not json");
    assert_eq!(extract_json_object(&text), Some(PAYLOAD));
}

#[test]
fn test_extract_json_object_ignores_braces_in_strings() {
    let text = r#"prefix {"analysis":"a } tricky { one","crisis":"say \"}\"","n":{"x":1}} suffix"#;
    assert_eq!(
        extract_json_object(text),
        Some(r#"{"analysis":"a } tricky { one","crisis":"say \"}\"","n":{"x":1}}"#)
    );
}

#[test]
fn test_extract_json_object_without_object() {
    assert_eq!(extract_json_object("no braces here"), None);
    assert_eq!(extract_json_object("{\"open\": true"), None);
}

#[test]
fn test_packet_from_noisy_response() {
    let text = format!("noise {PAYLOAD} trailing");
    let packet = MonthPacket::from_response(&text).expect("Expected a valid packet");

    assert_eq!(packet.analysis, "a");
    assert_eq!(packet.crisis, "b");
    assert_eq!(packet.options.get(OptionLabel::A).title, "t1");
    assert_eq!(packet.options.get(OptionLabel::A).description, "d1");
    assert_eq!(packet.options.get(OptionLabel::B).title, "t2");
    assert_eq!(packet.options.get(OptionLabel::B).description, "d2");
    assert_eq!(
        packet,
        MonthPacket::from_json(PAYLOAD).expect("Expected the payload to parse")
    );
}

#[test]
fn test_packet_missing_field_is_rejected() {
    let text = r#"{"analysis":"a","options":{"A":{"title":"t","description":"d"},"B":{"title":"t","description":"d"}}}"#;
    assert!(MonthPacket::from_response(text).is_err());
    assert!(MonthPacket::from_response("I cannot help with that.").is_err());
}

#[test]
fn test_fallback_packet_always_has_two_complete_options() {
    for mode in Mode::iter() {
        for language in Language::iter() {
            for seed in mode.seed_pool() {
                let packet = fallback_packet(mode, seed, language);
                assert!(!packet.analysis.is_empty());
                assert!(packet.crisis.contains(seed));

                let labels: Vec<OptionLabel> =
                    packet.options.iter().map(|(label, _)| label).collect();
                assert_eq!(labels, vec![OptionLabel::A, OptionLabel::B]);
                for (_, option) in packet.options.iter() {
                    assert!(!option.title.is_empty());
                    assert!(!option.description.is_empty());
                }
            }
        }
    }
}

#[test]
fn test_fallback_packet_is_deterministic() {
    let first = fallback_packet(Mode::Hardcore, "Largest customer churns", Language::Turkish);
    let second = fallback_packet(Mode::Hardcore, "Largest customer churns", Language::Turkish);
    assert_eq!(first, second);
}

#[test]
fn test_expenses_formula() {
    let month_one = calculate_expenses(50, 1);
    assert_eq!(month_one.salary, 60_000);
    assert_eq!(month_one.server, 500);
    assert_eq!(month_one.marketing, 5_000);
    assert_eq!(month_one.total, 65_500);

    let month_three = calculate_expenses(50, 3);
    assert_eq!(month_three.server, 4_500);
    assert_eq!(month_three.total, 69_500);

    assert_eq!(calculate_expenses(0, 12).total, 72_000 + 5_000);
}

#[test]
fn test_new_game_state_defaults() {
    for mode in Mode::iter() {
        let state = GameState::new("Drone delivery for pharmacies", mode);
        assert_eq!(state.month, 1);
        assert_eq!(state.metrics.cash, mode.starting_cash());
        assert_eq!(state.metrics.team, STARTING_TEAM);
        assert_eq!(state.metrics.reputation(), STARTING_REPUTATION);
        assert!(state.last_choice_summary.is_empty());
        assert!(state.used_seeds.is_empty());
    }
}

#[test]
fn test_close_month_charges_expenses_and_records_choice() {
    let mut state = GameState::new("Drone delivery", Mode::Realistic);
    let packet = fallback_packet(Mode::Realistic, "Negative press article", Language::English);

    let report = state.close_month(OptionLabel::B, packet.options.get(OptionLabel::B));

    assert_eq!(report.month, 1);
    assert_eq!(report.expenses.total, 65_500);
    assert_eq!(report.cash_after, 1_500_000 - 65_500);
    assert_eq!(state.metrics.cash, 1_434_500);
    assert_eq!(state.month, 2);
    assert!(state.last_choice_summary.starts_with("Month 1: chose option B"));
    assert!(state.last_choice_summary.contains("Go all in"));
}

#[test]
fn test_session_rejects_empty_idea() {
    assert!(matches!(
        GameSession::new("   ", Mode::Realistic),
        Err(GameError::EmptyIdea)
    ));
}

#[test]
fn test_session_month_cycle() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut session =
        GameSession::new("Drone delivery", Mode::Realistic).expect("Expected a session");
    assert_eq!(session.phase(), Phase::Intro);

    let request = session
        .begin_month(&mut rng, Language::English)
        .expect("Expected the month to begin");
    assert_eq!(session.phase(), Phase::Generating);
    assert_eq!(request.month, 1);
    assert!(Mode::Realistic.seed_pool().contains(&request.seed.as_str()));
    assert!(session.state().used_seeds.contains(&request.seed));

    let outcome = fallback_outcome(&session);
    session
        .receive_packet(outcome)
        .expect("Expected the packet to be accepted");
    assert_eq!(session.phase(), Phase::AwaitingChoice);
    assert!(session.current().is_some());

    let report = session
        .choose(OptionLabel::A)
        .expect("Expected the choice to resolve")
        .clone();
    assert_eq!(report.label, OptionLabel::A);
    assert_eq!(session.phase(), Phase::Resolved);
    assert!(session.current().is_none());
    assert_eq!(session.state().month, 2);
    assert_eq!(session.last_report(), Some(&report));
}

#[test]
fn test_session_invalid_transitions() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut session =
        GameSession::new("Drone delivery", Mode::Chaos).expect("Expected a session");

    assert!(matches!(
        session.choose(OptionLabel::A),
        Err(GameError::InvalidTransition {
            phase: Phase::Intro,
            ..
        })
    ));
    let outcome = fallback_outcome(&session);
    assert!(session.receive_packet(outcome).is_err());

    session
        .begin_month(&mut rng, Language::English)
        .expect("Expected the month to begin");
    assert!(session.begin_month(&mut rng, Language::English).is_err());
    assert!(session.choose(OptionLabel::B).is_err());
    assert_eq!(session.phase(), Phase::Generating);
}

#[test]
fn test_session_survives_a_full_year() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut session =
        GameSession::new("Drone delivery", Mode::Realistic).expect("Expected a session");

    for month in 1..=TOTAL_MONTHS {
        assert_eq!(session.state().month, month);
        assert_eq!(session.verdict(), None);
        play_month(&mut session, &mut rng, OptionLabel::A);
    }

    assert_eq!(session.phase(), Phase::Complete);
    assert_eq!(session.state().month, TOTAL_MONTHS);
    assert_eq!(session.reports().len(), TOTAL_MONTHS as usize);
    // 12 × 60,000 salaries, 500 × (1² + … + 12²) servers, 12 × 5,000 marketing.
    assert_eq!(session.state().metrics.cash, 1_500_000 - 1_105_000);
    assert_eq!(session.verdict(), Some(Verdict::Survived));
    assert!(session.begin_month(&mut rng, Language::English).is_err());
}

#[test]
fn test_session_goes_bankrupt_in_hardcore() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut session =
        GameSession::new("Drone delivery", Mode::Hardcore).expect("Expected a session");

    for _ in 0..TOTAL_MONTHS {
        play_month(&mut session, &mut rng, OptionLabel::B);
    }

    assert_eq!(session.state().metrics.cash, -105_000);
    assert_eq!(session.verdict(), Some(Verdict::Bankrupt));
}

#[test]
fn test_session_reset_starts_over() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut session =
        GameSession::new("Drone delivery", Mode::Chaos).expect("Expected a session");
    play_month(&mut session, &mut rng, OptionLabel::A);
    session
        .begin_month(&mut rng, Language::English)
        .expect("Expected the month to begin");
    let old_id = session.id();

    session.reset();

    assert_ne!(session.id(), old_id);
    assert_eq!(session.phase(), Phase::Intro);
    assert_eq!(session.state().idea, "Drone delivery");
    assert_eq!(session.state().mode, Mode::Chaos);
    assert_eq!(session.state().month, 1);
    assert_eq!(session.state().metrics.cash, Mode::Chaos.starting_cash());
    assert!(session.state().used_seeds.is_empty());
    assert!(session.reports().is_empty());
    assert!(session.current().is_none());
}

#[test]
fn test_prompt_carries_game_state() {
    let mut state = GameState::new("Drone delivery", Mode::Hardcore);
    state.last_choice_summary = "Month 1: chose option A \"Hire\" (More people)".to_string();
    state.month = 2;

    let prompt = PacketRequest::new(&state, "Largest customer churns", Language::Turkish).prompt();

    assert!(prompt.contains("Drone delivery"));
    assert!(prompt.contains("Month: 2 of 12"));
    assert!(prompt.contains("Largest customer churns"));
    assert!(prompt.contains("Month 1: chose option A"));
    assert!(prompt.contains(Mode::Hardcore.style_instructions()));
    assert!(prompt.contains("Turkish"));
    assert!(prompt.contains("\"options\""));
}

#[test]
fn test_settings_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create a temp dir");
    let path = dir.path().join("nested").join("settings.json");

    let settings = Settings {
        language: Language::Turkish,
        openai_api_key: Some("sk-test".to_string()),
        model: "gpt-4o".to_string(),
        temperature: 0.5,
        debug_mode: true,
    };
    settings
        .save_to_file(&path)
        .expect("Failed to save settings");

    let loaded = Settings::load_settings_from_file(&path).expect("Failed to load settings");
    assert_eq!(loaded, settings);
}

#[test]
fn test_settings_fill_missing_fields_with_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create a temp dir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"model":"gpt-4o"}"#).expect("Failed to write settings");

    let loaded = Settings::load_settings_from_file(&path).expect("Failed to load settings");
    assert_eq!(loaded.model, "gpt-4o");
    assert_eq!(loaded.language, Language::English);
    assert_eq!(loaded.openai_api_key, None);
    assert!((loaded.temperature - generator::DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    assert!(!loaded.debug_mode);

    assert!(Settings::load_settings_from_file(dir.path().join("missing.json")).is_err());
}

#[test]
fn test_format_money() {
    assert_eq!(format_money(0), "0");
    assert_eq!(format_money(999), "999");
    assert_eq!(format_money(65_500), "65,500");
    assert_eq!(format_money(1_500_000), "1,500,000");
    assert_eq!(format_money(-105_000), "-105,000");
}

#[test]
fn test_transcript_wraps_and_separates_messages() {
    let messages = vec![
        Message::system("Month 1 of 12"),
        Message::game("one two three four five six"),
        Message::user("A: Play it safe"),
    ];

    let lines = parse_game_content(&messages, 10);

    // Each message ends with a blank separator line.
    assert_eq!(lines.len(), 2 + 1 + 3 + 1 + 2 + 1);
    assert!(lines.iter().all(|line| line.width() <= 10));
}

#[test]
fn test_reputation_is_clamped() {
    assert_eq!(Metrics::new(1_000, 10, 150).reputation(), MAX_REPUTATION);
    assert_eq!(Metrics::new(1_000, 10, 42).reputation(), 42);

    let metrics: Metrics = serde_json::from_str(r#"{"cash":1000,"team":10,"reputation":250}"#)
        .expect("Failed to parse metrics");
    assert_eq!(metrics.reputation(), MAX_REPUTATION);
}

#[test]
fn test_settings_menu_navigation_keeps_unlisted_model() {
    let mut settings = Settings {
        model: "gpt-4.1".to_string(),
        ..Settings::default()
    };
    let original = settings.clone();
    let spinner = Spinner::default();
    let mut context = Context {
        settings: &mut settings,
        ai_ready: false,
        session: None,
        messages: &[],
        spinner: &spinner,
    };

    let mut menu = SettingsMenu::new(context.settings);
    for code in [KeyCode::Down, KeyCode::Down, KeyCode::Up, KeyCode::Char('j')] {
        assert!(menu.on_key(KeyEvent::from(code), &mut context).is_none());
    }

    assert_eq!(context.settings.model, "gpt-4.1");
    assert_eq!(*context.settings, original);
}
