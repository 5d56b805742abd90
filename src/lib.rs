//! ALSA Tray - Library
//!
//! A system tray utility and command line interface for setting the volume
//! and mute state of ALSA mixers.
//!
//! ## Features
//!
//! - Tray icon with four volume tiers, tooltip and mute menu
//! - Vertical slider flyout with card/mixer preferences
//! - One-shot CLI volume/mute changes with optional desktop notification
//! - Multimedia key support via the session bus
//! - Persisted card/mixer selection

pub mod app;
pub mod cli;
pub mod controller;
pub mod display;
pub mod mixer;
pub mod mmkeys;
pub mod notify;
pub mod prefs;
pub mod selection;
pub mod ticker;
pub mod ui;

pub use app::AppState;
pub use cli::{CardArg, Options};
pub use controller::{Unmute, VolumeController};
pub use mixer::{AlsaMixer, Card, MixerError, MixerPort, Selection, VolumeState};
pub use prefs::PrefStore;
pub use ui::{FlyoutWindow, TrayEvent, TrayManager};
