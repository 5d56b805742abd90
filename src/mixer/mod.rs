//! ALSA mixer layer.
//!
//! Card/control discovery and volume/mute access for a single selected
//! control.

pub mod card;
pub mod control;
pub mod enumerate;

pub use card::{Card, MixerControl, MixerError, MuteOp, Selection, VolumeOp, VolumeState};
pub use control::{AlsaMixer, MixerPort};
pub use enumerate::enumerate_cards;
