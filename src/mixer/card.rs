//! Mixer data models.
//!
//! Defines the core data structures for representing sound cards, their
//! usable mixer controls, the active selection and the live volume state.

use thiserror::Error;

/// A sound card with the mixer controls that survived the usability check.
#[derive(Debug, Clone)]
pub struct Card {
    /// ALSA card index (the `N` in `hw:N`)
    pub index: u32,

    /// Human-readable card name
    pub name: String,

    /// Usable mixer controls, in enumeration order
    pub controls: Vec<MixerControl>,
}

impl Card {
    /// Display form used by `--card-list`: `Name (hw:N)`.
    pub fn pretty_name(&self) -> String {
        format!("{} (hw:{})", self.name, self.index)
    }

    /// True if the card has at least one usable mixer control.
    pub fn has_usable_control(&self) -> bool {
        !self.controls.is_empty()
    }

    /// Look up a usable control by name.
    pub fn control(&self, name: &str) -> Option<&MixerControl> {
        self.controls.iter().find(|c| c.name == name)
    }
}

/// A mixer control that exposes playback volume and a playback mute switch.
///
/// Controls that lack either capability, or whose volume/mute could not be
/// queried during enumeration, are filtered out before this type is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixerControl {
    /// Simple element name, e.g. "Master" or "PCM"
    pub name: String,
}

/// The active (card, mixer) pair every operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// ALSA card index
    pub card: u32,

    /// Mixer control name on that card
    pub mixer: String,
}

impl Selection {
    pub fn new(card: u32, mixer: impl Into<String>) -> Self {
        Self {
            card,
            mixer: mixer.into(),
        }
    }

    /// ALSA device string for this selection's card.
    pub fn device(&self) -> String {
        format!("hw:{}", self.card)
    }
}

/// Live projection of a control's state. Never cached beyond one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeState {
    /// Volume as a percentage, 0-100
    pub level: i32,

    /// Playback mute switch state
    pub muted: bool,
}

impl VolumeState {
    /// The level a notification or OSD should display: 0 while muted.
    pub fn display_level(&self) -> i32 {
        if self.muted {
            0
        } else {
            self.level
        }
    }
}

/// A volume operand from the CLI or a GUI gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeOp {
    /// Set the level to an exact value (clamped to 0-100)
    Absolute(i32),

    /// Add a signed delta to the current level (result clamped to 0-100)
    Relative(i32),
}

/// A mute operand from the CLI or a GUI gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteOp {
    /// `mute`: invert the current state
    Toggle,

    /// `+mute`: force muted
    Mute,

    /// `-mute`: force unmuted
    Unmute,
}

/// Mixer layer error types.
#[derive(Debug, Error)]
pub enum MixerError {
    #[error("ALSA is not available: {0}")]
    Unavailable(#[source] alsa::Error),

    #[error("Mixer '{name}' not found on card hw:{card}")]
    ControlNotFound { card: u32, name: String },

    #[error("Mixer '{name}' has no playback volume")]
    NoVolume { name: String },

    #[error("Mixer '{name}' has no playback mute switch")]
    NoSwitch { name: String },

    #[error("ALSA error: {0}")]
    Alsa(#[from] alsa::Error),
}
