//! Slider and preferences flyout using eframe/egui.
//!
//! The flyout renders the vertical volume slider and, on demand, the
//! card/mixer preference combos. Widget interactions are queued as plain
//! `FlyoutAction` values for the session core to apply.

use crate::mixer::{Card, Selection, VolumeState};
use eframe::egui::{self, SliderClamping};

/// Actions that can be triggered from the flyout UI.
#[derive(Debug, Clone, PartialEq)]
pub enum FlyoutAction {
    /// Slider drag: set the volume (user gesture, unmutes)
    SetVolume(i32),

    /// Mute checkbox
    SetMute(bool),

    /// Preference combo: select a card by index
    SelectCard(u32),

    /// Preference combo: select a mixer on the current card
    SelectMixer(String),
}

/// Flyout window state.
pub struct FlyoutWindow {
    /// Pending actions from the UI
    actions: Vec<FlyoutAction>,

    /// Whether the preferences section is expanded
    pub show_preferences: bool,
}

impl FlyoutWindow {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            show_preferences: false,
        }
    }

    /// Render the flyout content.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        cards: &[Card],
        selection: &Selection,
        state: &VolumeState,
    ) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let mut level = state.level;
                let slider = egui::Slider::new(&mut level, 0..=100)
                    .vertical()
                    .show_value(false)
                    .clamping(SliderClamping::Always);
                if ui.add(slider).changed() {
                    self.actions.push(FlyoutAction::SetVolume(level));
                }

                ui.label(format!("{}%", state.level));

                let mut muted = state.muted;
                if ui.checkbox(&mut muted, "Mute").changed() {
                    self.actions.push(FlyoutAction::SetMute(muted));
                }
            });

            if self.show_preferences {
                ui.separator();
                self.render_preferences(ui, cards, selection);
            }
        });
    }

    /// Card and mixer selection combos. Every change is applied and
    /// persisted immediately by the session core.
    fn render_preferences(&mut self, ui: &mut egui::Ui, cards: &[Card], selection: &Selection) {
        let current_card = cards.iter().find(|c| c.index == selection.card);
        let card_label = current_card
            .map(|c| c.pretty_name())
            .unwrap_or_else(|| format!("hw:{}", selection.card));

        egui::ComboBox::from_label("Card")
            .selected_text(card_label)
            .show_ui(ui, |ui| {
                for card in cards.iter().filter(|c| c.has_usable_control()) {
                    if ui
                        .selectable_label(card.index == selection.card, card.pretty_name())
                        .clicked()
                        && card.index != selection.card
                    {
                        self.actions.push(FlyoutAction::SelectCard(card.index));
                    }
                }
            });

        egui::ComboBox::from_label("Mixer")
            .selected_text(selection.mixer.clone())
            .show_ui(ui, |ui| {
                if let Some(card) = current_card {
                    for control in &card.controls {
                        if ui
                            .selectable_label(control.name == selection.mixer, &control.name)
                            .clicked()
                            && control.name != selection.mixer
                        {
                            self.actions
                                .push(FlyoutAction::SelectMixer(control.name.clone()));
                        }
                    }
                }
            });
    }

    /// Take all pending actions.
    pub fn take_actions(&mut self) -> Vec<FlyoutAction> {
        std::mem::take(&mut self.actions)
    }
}

impl Default for FlyoutWindow {
    fn default() -> Self {
        Self::new()
    }
}
