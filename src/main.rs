//! Process entry point: startup sequence, CLI dispatch and the GUI host.
//!
//! Startup order: enumerate cards, load the preference file, apply CLI
//! overrides, resolve the selection with fallback, then run the one-shot
//! CLI action and/or the tray session.

use alsa_tray::cli::{self, exit_code, CardArg, Options};
use alsa_tray::controller::VolumeController;
use alsa_tray::display;
use alsa_tray::mixer::{self, AlsaMixer, Card, MixerError, Selection};
use alsa_tray::notify::Notifier;
use alsa_tray::prefs::PrefStore;
use alsa_tray::selection::{self, SelectionError};
use alsa_tray::ui::{FlyoutWindow, TrayManager};
use alsa_tray::{mmkeys, AppState};
use eframe::egui;
use std::process;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    process::exit(run());
}

fn run() -> i32 {
    let opts = match cli::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("E: {}", e);
            eprintln!("Run 'alsa-tray --help' for help about CLI options.");
            return exit_code::USAGE;
        }
    };

    if opts.help {
        println!("alsa-tray {}", env!("CARGO_PKG_VERSION"));
        println!("{}", cli::USAGE);
        return exit_code::OK;
    }

    let cards = match mixer::enumerate_cards() {
        Ok(cards) => cards,
        Err(e) => {
            eprintln!("E: {}", e);
            return exit_code::NO_ALSA;
        }
    };
    if cards.is_empty() {
        eprintln!("E: No sound card found.");
        return exit_code::NO_CARD;
    }

    if opts.list_cards {
        println!("Available cards:");
        for card in &cards {
            println!("    * {}", card.pretty_name());
        }
        return exit_code::OK;
    }

    let prefs = PrefStore::new();
    let stored = prefs.load().unwrap_or_default();

    // CLI flags override the preference file
    let requested_card = match &opts.card {
        Some(CardArg::Index(index)) => Some(*index),
        Some(CardArg::Name(name)) => match selection::card_index_by_name(&cards, name) {
            Some(index) => Some(index),
            None => {
                eprintln!("E: Unknown card '{}'.", name);
                eprintln!("Run 'alsa-tray --card-list' for seeing the available cards.");
                return exit_code::UNKNOWN_CARD;
            }
        },
        None => stored.card,
    };
    let requested_mixer = opts.mixer.clone().or(stored.mixer);

    let (selection, warnings) =
        match selection::resolve(&cards, requested_card, requested_mixer.as_deref()) {
            Ok(resolved) => resolved,
            Err(e) => {
                eprintln!("E: {}", e);
                return match e {
                    SelectionError::NoCard => exit_code::NO_CARD,
                    SelectionError::NoUsableMixer { .. } => exit_code::UNUSABLE_MIXER,
                };
            }
        };
    for w in &warnings {
        eprintln!("W: {}", w);
    }

    if opts.list_mixers {
        println!("Available mixers:");
        if let Some(card) = cards.iter().find(|c| c.index == selection.card) {
            for control in &card.controls {
                println!("  * {}", control.name);
            }
        }
        return exit_code::OK;
    }

    if opts.debug {
        print_debug_info(&cards, &selection, &prefs);
    }

    if opts.has_cli_action() {
        let controller = VolumeController::new(AlsaMixer::new(&selection));
        let state = match controller.apply(opts.volume, opts.mute) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("E: {}", e);
                return mixer_exit_code(&e);
            }
        };
        println!("{}", display::status_line(&state));

        // CLI invocations notify only on explicit request
        if opts.notify == Some(true) {
            Notifier::new().show(&state);
        }
    }

    if opts.wants_gui() {
        return run_gui(cards, selection, prefs, &opts);
    }

    exit_code::OK
}

fn mixer_exit_code(e: &MixerError) -> i32 {
    match e {
        MixerError::ControlNotFound { .. } => exit_code::UNKNOWN_MIXER,
        _ => exit_code::NO_ALSA,
    }
}

/// `+debug` dump: environment, cards and mixers, selection, config file.
fn print_debug_info(cards: &[Card], selection: &Selection, prefs: &PrefStore) {
    println!("alsa-tray {}\n", env!("CARGO_PKG_VERSION"));

    println!("==== Cards and mixers ====");
    for card in cards {
        let names: Vec<&str> = card.controls.iter().map(|c| c.name.as_str()).collect();
        println!("{}: {}", card.pretty_name(), names.join(", "));
    }
    println!("Selected card: hw:{}", selection.card);
    println!("Selected mixer: {}", selection.mixer);
    println!();

    println!("==== Config file ====");
    println!("Path: {}", prefs.path().display());
    match std::fs::read_to_string(prefs.path()) {
        Ok(content) => {
            println!("Exists: True");
            println!("Content:");
            for line in content.lines() {
                println!("    {}", line);
            }
        }
        Err(_) => println!("Exists: False"),
    }
    println!();

    println!("==== CLI args ====");
    let args: Vec<String> = std::env::args().collect();
    println!("{}", args.join(" "));
    println!();
}

/// Host the tray session inside an eframe event loop.
fn run_gui(cards: Vec<Card>, selection: Selection, prefs: PrefStore, opts: &Options) -> i32 {
    let notifier = if opts.notify == Some(false) {
        Notifier::disabled()
    } else {
        Notifier::new()
    };

    let app = match AppState::new(cards, selection, prefs, notifier) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("E: {}", e);
            return mixer_exit_code(&e);
        }
    };

    let mut tray = TrayManager::new();
    if let Err(e) = tray.create(&app.state) {
        eprintln!("E: Can't run in systray: {}", e);
        return exit_code::NO_GUI;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([96.0, 240.0])
            .with_decorations(false)
            .with_always_on_top()
            .with_visible(false),
        ..Default::default()
    };

    let host = TrayHost {
        app,
        tray,
        flyout: FlyoutWindow::new(),
        keys: mmkeys::spawn_listener(),
        window_visible: false,
        last_pushed: None,
    };

    match eframe::run_native("alsa-tray", options, Box::new(move |_cc| Ok(Box::new(host)))) {
        Ok(()) => exit_code::OK,
        Err(e) => {
            eprintln!("E: Can't run in systray: {}", e);
            exit_code::NO_GUI
        }
    }
}

/// The eframe application: pumps tray/menu/key events, drives the poll
/// ticker and renders the flyout while it is visible.
struct TrayHost {
    app: AppState,
    tray: TrayManager,
    flyout: FlyoutWindow,
    keys: Option<Receiver<mmkeys::KeyEvent>>,
    window_visible: bool,
    last_pushed: Option<mixer::VolumeState>,
}

impl eframe::App for TrayHost {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tray.process_events();
        while let Ok(event) = self.tray.events().try_recv() {
            self.app.handle_tray_event(event);
        }
        if let Some(keys) = &self.keys {
            while let Ok(event) = keys.try_recv() {
                self.app.handle_key_event(event);
            }
        }

        self.app.poll_tick();

        if self.app.flyout_visible {
            self.flyout.show_preferences = self.app.preferences_visible;
            self.flyout
                .show(ctx, &self.app.cards, &self.app.selection, &self.app.state);
            for action in self.flyout.take_actions() {
                self.app.handle_flyout_action(action);
            }
        } else {
            self.app.preferences_visible = false;
        }

        // Push state to the tray only when it changed
        if self.last_pushed != Some(self.app.state) {
            if self.tray.update(&self.app.state).is_ok() {
                self.last_pushed = Some(self.app.state);
            }
        }

        if self.app.flyout_visible != self.window_visible {
            self.window_visible = self.app.flyout_visible;
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(self.window_visible));
        }

        if self.app.should_exit {
            self.app.stop_polling();
            self.tray.destroy();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // Keep pumping tray events while the window is hidden
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
