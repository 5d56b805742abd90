//! GUI session state and event application.
//!
//! `AppState` owns the enumerated cards, the active selection and the last
//! state read from the device, and applies tray, flyout and hotkey events to
//! the volume controller. The poll body is a plain method so the timer
//! mechanism stays outside.

use crate::controller::{Unmute, VolumeController};
use crate::mixer::{AlsaMixer, Card, MixerError, Selection, VolumeState};
use crate::mmkeys::KeyEvent;
use crate::notify::Notifier;
use crate::prefs::PrefStore;
use crate::selection;
use crate::ticker::Ticker;
use crate::ui::{FlyoutAction, TrayEvent};
use std::time::Duration;
use tracing::{debug, warn};

/// Poll interval for re-reading device state while the GUI is up.
pub const POLL_INTERVAL: Duration = Duration::from_millis(800);

/// Hotkey volume step, matching the traditional scroll step.
const KEY_STEP: i32 = 5;

pub struct AppState {
    /// All cards, discovered once at startup
    pub cards: Vec<Card>,

    /// The active (card, mixer) pair
    pub selection: Selection,

    /// Last state read from the device, for rendering
    pub state: VolumeState,

    /// Whether the slider flyout is visible
    pub flyout_visible: bool,

    /// Whether the preference combos are shown inside the flyout
    pub preferences_visible: bool,

    /// Whether the application should exit
    pub should_exit: bool,

    controller: VolumeController<AlsaMixer>,
    ticker: Ticker,
    prefs: PrefStore,
    notifier: Notifier,
}

impl AppState {
    /// Build the session and read the initial device state. A failing first
    /// read is fatal; later failures only skip a refresh.
    pub fn new(
        cards: Vec<Card>,
        selection: Selection,
        prefs: PrefStore,
        notifier: Notifier,
    ) -> Result<Self, MixerError> {
        let controller = VolumeController::new(AlsaMixer::new(&selection));
        let state = controller.state()?;
        let mut ticker = Ticker::new(POLL_INTERVAL);
        ticker.start();

        Ok(Self {
            cards,
            selection,
            state,
            flyout_visible: false,
            preferences_visible: false,
            should_exit: false,
            controller,
            ticker,
            prefs,
            notifier,
        })
    }

    /// Run the poll body if the interval has elapsed. Returns true when the
    /// display state was refreshed.
    pub fn poll_tick(&mut self) -> bool {
        if !self.ticker.due() {
            return false;
        }
        self.refresh()
    }

    /// Re-read the device. A failed read skips this refresh with no UI
    /// change; the device remains the source of truth for the next tick.
    pub fn refresh(&mut self) -> bool {
        match self.controller.state() {
            Ok(state) => {
                self.state = state;
                true
            }
            Err(e) => {
                debug!(error = %e, "poll read failed, skipping refresh");
                false
            }
        }
    }

    pub fn stop_polling(&mut self) {
        self.ticker.stop();
    }

    pub fn handle_tray_event(&mut self, event: TrayEvent) {
        match event {
            TrayEvent::ToggleFlyout => {
                self.flyout_visible = !self.flyout_visible;
            }
            TrayEvent::ToggleMute => {
                self.apply(|c| c.toggle_mute());
            }
            TrayEvent::ShowPreferences => {
                self.preferences_visible = true;
                self.flyout_visible = true;
            }
            TrayEvent::Quit => {
                self.should_exit = true;
            }
        }
    }

    pub fn handle_flyout_action(&mut self, action: FlyoutAction) {
        match action {
            FlyoutAction::SetVolume(level) => {
                // Direct user gesture: unmutes
                self.apply(|c| c.set_absolute(level, Unmute::OnChange));
            }
            FlyoutAction::SetMute(muted) => {
                self.apply(|c| c.set_mute(muted));
            }
            FlyoutAction::SelectCard(index) => self.select_card(index),
            FlyoutAction::SelectMixer(name) => self.select_mixer(name),
        }
    }

    /// Multimedia keys adjust with a notification, like the original desktop
    /// hotkeys.
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::VolumeUp => {
                self.apply(|c| c.adjust_relative(KEY_STEP, Unmute::OnChange));
            }
            KeyEvent::VolumeDown => {
                self.apply(|c| c.adjust_relative(-KEY_STEP, Unmute::OnChange));
            }
            KeyEvent::MuteToggle => {
                self.apply(|c| c.toggle_mute());
            }
        }
        self.notifier.show(&self.state);
    }

    /// Switch to another card; the mixer falls back to that card's default.
    fn select_card(&mut self, index: u32) {
        match selection::resolve(&self.cards, Some(index), None) {
            Ok((selection, warnings)) => {
                for w in warnings {
                    warn!("{}", w);
                }
                self.activate(selection);
            }
            Err(e) => warn!(error = %e, "card selection rejected"),
        }
    }

    /// Switch to another mixer on the current card.
    fn select_mixer(&mut self, name: String) {
        match selection::resolve(&self.cards, Some(self.selection.card), Some(&name)) {
            Ok((selection, warnings)) => {
                for w in warnings {
                    warn!("{}", w);
                }
                self.activate(selection);
            }
            Err(e) => warn!(error = %e, "mixer selection rejected"),
        }
    }

    /// Point the controller at a new selection and persist it.
    fn activate(&mut self, selection: Selection) {
        if selection == self.selection {
            return;
        }
        self.controller = VolumeController::new(AlsaMixer::new(&selection));
        self.selection = selection;
        self.prefs.save(&self.selection);
        self.refresh();
    }

    /// Apply a mutating controller operation and take its resulting state.
    fn apply(
        &mut self,
        op: impl FnOnce(&VolumeController<AlsaMixer>) -> Result<VolumeState, MixerError>,
    ) {
        match op(&self.controller) {
            Ok(state) => self.state = state,
            Err(e) => debug!(error = %e, "mixer operation failed"),
        }
    }
}
