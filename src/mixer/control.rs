//! Volume and mute access to a single mixer control.
//!
//! `MixerPort` is the seam the controller operates through; `AlsaMixer` is
//! the hardware implementation. Handles are opened per operation, so the
//! state read is always the device's current truth.

use super::card::{MixerError, Selection, VolumeState};
use alsa::mixer::{Mixer, Selem, SelemChannelId, SelemId};

/// Read/write access to one mixer control's volume and mute switch.
///
/// Volume is expressed as a 0-100 percentage on both sides; implementations
/// own the mapping to whatever raw range the device uses.
pub trait MixerPort {
    fn get_volume(&self) -> Result<i32, MixerError>;
    fn set_volume(&self, level: i32) -> Result<(), MixerError>;
    fn get_mute(&self) -> Result<bool, MixerError>;
    fn set_mute(&self, muted: bool) -> Result<(), MixerError>;

    /// Read both axes in one go.
    fn state(&self) -> Result<VolumeState, MixerError> {
        Ok(VolumeState {
            level: self.get_volume()?,
            muted: self.get_mute()?,
        })
    }
}

/// ALSA-backed mixer port for the selected card/control pair.
pub struct AlsaMixer {
    device: String,
    card: u32,
    control: String,
}

impl AlsaMixer {
    pub fn new(selection: &Selection) -> Self {
        Self {
            device: selection.device(),
            card: selection.card,
            control: selection.mixer.clone(),
        }
    }

    /// Open the mixer and run `f` against the simple element.
    ///
    /// The `Selem` borrows the `Mixer`, so the handle cannot outlive this
    /// call; every operation re-opens, which also keeps a long-running tray
    /// session honest about external changes.
    fn with_selem<T>(&self, f: impl FnOnce(&Selem) -> Result<T, MixerError>) -> Result<T, MixerError> {
        let mixer = Mixer::new(&self.device, false)?;
        let id = SelemId::new(&self.control, 0);
        let selem = mixer.find_selem(&id).ok_or_else(|| MixerError::ControlNotFound {
            card: self.card,
            name: self.control.clone(),
        })?;
        f(&selem)
    }
}

impl MixerPort for AlsaMixer {
    fn get_volume(&self) -> Result<i32, MixerError> {
        self.with_selem(|selem| {
            if !selem.has_playback_volume() {
                return Err(MixerError::NoVolume {
                    name: self.control.clone(),
                });
            }
            let (min, max) = selem.get_playback_volume_range();
            let raw = selem.get_playback_volume(SelemChannelId::FrontLeft)?;
            Ok(raw_to_percent(raw, min, max))
        })
    }

    fn set_volume(&self, level: i32) -> Result<(), MixerError> {
        self.with_selem(|selem| {
            if !selem.has_playback_volume() {
                return Err(MixerError::NoVolume {
                    name: self.control.clone(),
                });
            }
            let (min, max) = selem.get_playback_volume_range();
            let raw = percent_to_raw(level.clamp(0, 100), min, max);
            selem.set_playback_volume_all(raw)?;
            Ok(())
        })
    }

    fn get_mute(&self) -> Result<bool, MixerError> {
        self.with_selem(|selem| {
            if !selem.has_playback_switch() {
                return Err(MixerError::NoSwitch {
                    name: self.control.clone(),
                });
            }
            // Switch on (1) means audible, off (0) means muted
            let on = selem.get_playback_switch(SelemChannelId::FrontLeft)?;
            Ok(on == 0)
        })
    }

    fn set_mute(&self, muted: bool) -> Result<(), MixerError> {
        self.with_selem(|selem| {
            if !selem.has_playback_switch() {
                return Err(MixerError::NoSwitch {
                    name: self.control.clone(),
                });
            }
            selem.set_playback_switch_all(if muted { 0 } else { 1 })?;
            Ok(())
        })
    }
}

/// Map a raw device value into 0-100.
pub fn raw_to_percent(raw: i64, min: i64, max: i64) -> i32 {
    if max <= min {
        return 0;
    }
    let span = (max - min) as f64;
    (((raw - min) as f64 * 100.0 / span).round() as i32).clamp(0, 100)
}

/// Map a 0-100 percentage onto the raw device range.
pub fn percent_to_raw(percent: i32, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    let span = (max - min) as f64;
    min + (percent.clamp(0, 100) as f64 * span / 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_mapping_round_trips_at_bounds() {
        assert_eq!(percent_to_raw(0, 0, 255), 0);
        assert_eq!(percent_to_raw(100, 0, 255), 255);
        assert_eq!(raw_to_percent(0, 0, 255), 0);
        assert_eq!(raw_to_percent(255, 0, 255), 100);
    }

    #[test]
    fn percent_mapping_handles_offset_ranges() {
        // Typical hardware range that does not start at zero
        assert_eq!(raw_to_percent(-10200, -10200, 400), 0);
        assert_eq!(raw_to_percent(400, -10200, 400), 100);
        let half = percent_to_raw(50, -10200, 400);
        assert_eq!(raw_to_percent(half, -10200, 400), 50);
    }

    #[test]
    fn percent_mapping_survives_degenerate_range() {
        assert_eq!(raw_to_percent(5, 5, 5), 0);
        assert_eq!(percent_to_raw(50, 5, 5), 5);
    }

    #[test]
    fn out_of_range_percent_clamps() {
        assert_eq!(percent_to_raw(150, 0, 100), 100);
        assert_eq!(percent_to_raw(-20, 0, 100), 0);
    }
}
