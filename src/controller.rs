//! Volume/mute state transitions over a mixer port.
//!
//! Every operation is a read-modify-write against the device and returns the
//! resulting state so callers can refresh their display surfaces. The unmute
//! policy is explicit: direct user gestures (slider, multimedia keys) unmute
//! when they change the level, CLI volume operands do not.

use crate::mixer::{MixerError, MixerPort, MuteOp, VolumeOp, VolumeState};

/// Whether a level change should also clear the mute switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmute {
    /// GUI slider / hotkey gesture: the user asked to hear something
    OnChange,

    /// CLI operand: leave the mute switch alone
    Keep,
}

/// Applies volume and mute commands to the selected mixer control.
pub struct VolumeController<P> {
    port: P,
}

impl<P: MixerPort> VolumeController<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Read the current state from the device.
    pub fn state(&self) -> Result<VolumeState, MixerError> {
        self.port.state()
    }

    /// Set the level to `value`, clamped to 0-100.
    pub fn set_absolute(&self, value: i32, unmute: Unmute) -> Result<VolumeState, MixerError> {
        let level = value.clamp(0, 100);
        self.port.set_volume(level)?;
        if unmute == Unmute::OnChange {
            self.port.set_mute(false)?;
        }
        self.port.state()
    }

    /// Add `delta` to the current level; the result is clamped to 0-100.
    ///
    /// The delta applies to the current level regardless of mute state.
    pub fn adjust_relative(&self, delta: i32, unmute: Unmute) -> Result<VolumeState, MixerError> {
        let current = self.port.get_volume()?;
        let level = (current + delta).clamp(0, 100);
        self.port.set_volume(level)?;
        if unmute == Unmute::OnChange {
            self.port.set_mute(false)?;
        }
        self.port.state()
    }

    /// Invert the mute switch; the level is untouched.
    pub fn toggle_mute(&self) -> Result<VolumeState, MixerError> {
        let muted = self.port.get_mute()?;
        self.port.set_mute(!muted)?;
        self.port.state()
    }

    /// Force the mute switch to `muted`; the level is untouched.
    pub fn set_mute(&self, muted: bool) -> Result<VolumeState, MixerError> {
        self.port.set_mute(muted)?;
        self.port.state()
    }

    /// One-shot CLI cycle: apply the volume operand (if any), then the mute
    /// operand (if any), and report the final state.
    pub fn apply(
        &self,
        volume: Option<VolumeOp>,
        mute: Option<MuteOp>,
    ) -> Result<VolumeState, MixerError> {
        match volume {
            Some(VolumeOp::Absolute(v)) => {
                self.set_absolute(v, Unmute::Keep)?;
            }
            Some(VolumeOp::Relative(d)) => {
                self.adjust_relative(d, Unmute::Keep)?;
            }
            None => {}
        }
        match mute {
            Some(MuteOp::Toggle) => {
                self.toggle_mute()?;
            }
            Some(MuteOp::Mute) => {
                self.set_mute(true)?;
            }
            Some(MuteOp::Unmute) => {
                self.set_mute(false)?;
            }
            None => {}
        }
        self.port.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::{MuteOp, VolumeOp};
    use std::cell::Cell;

    /// In-memory mixer port, no hardware needed.
    struct FakePort {
        level: Cell<i32>,
        muted: Cell<bool>,
    }

    impl FakePort {
        fn new(level: i32, muted: bool) -> Self {
            Self {
                level: Cell::new(level),
                muted: Cell::new(muted),
            }
        }
    }

    impl MixerPort for FakePort {
        fn get_volume(&self) -> Result<i32, MixerError> {
            Ok(self.level.get())
        }

        fn set_volume(&self, level: i32) -> Result<(), MixerError> {
            self.level.set(level);
            Ok(())
        }

        fn get_mute(&self) -> Result<bool, MixerError> {
            Ok(self.muted.get())
        }

        fn set_mute(&self, muted: bool) -> Result<(), MixerError> {
            self.muted.set(muted);
            Ok(())
        }
    }

    fn controller(level: i32, muted: bool) -> VolumeController<FakePort> {
        VolumeController::new(FakePort::new(level, muted))
    }

    #[test]
    fn absolute_set_reads_back_exactly() {
        let c = controller(40, false);
        for v in [0, 1, 33, 50, 99, 100] {
            let state = c.set_absolute(v, Unmute::Keep).unwrap();
            assert_eq!(state.level, v);
        }
    }

    #[test]
    fn absolute_set_clamps_out_of_range() {
        let c = controller(40, false);
        assert_eq!(c.set_absolute(150, Unmute::Keep).unwrap().level, 100);
        assert_eq!(c.set_absolute(-5, Unmute::Keep).unwrap().level, 0);
    }

    #[test]
    fn relative_adjust_clamps_at_both_ends() {
        let c = controller(40, false);
        assert_eq!(c.adjust_relative(5, Unmute::Keep).unwrap().level, 45);
        assert_eq!(c.adjust_relative(100, Unmute::Keep).unwrap().level, 100);
        assert_eq!(c.adjust_relative(-300, Unmute::Keep).unwrap().level, 0);
    }

    #[test]
    fn relative_adjust_applies_to_current_level_while_muted() {
        let c = controller(40, true);
        let state = c.adjust_relative(5, Unmute::Keep).unwrap();
        assert_eq!(state.level, 45);
        assert!(state.muted);
    }

    #[test]
    fn gesture_level_changes_unmute() {
        let c = controller(40, true);
        let state = c.adjust_relative(5, Unmute::OnChange).unwrap();
        assert_eq!(state.level, 45);
        assert!(!state.muted);

        let c = controller(40, true);
        let state = c.set_absolute(70, Unmute::OnChange).unwrap();
        assert!(!state.muted);
    }

    #[test]
    fn toggle_mute_is_an_involution_and_keeps_level() {
        let c = controller(63, false);
        let once = c.toggle_mute().unwrap();
        assert!(once.muted);
        assert_eq!(once.level, 63);
        let twice = c.toggle_mute().unwrap();
        assert!(!twice.muted);
        assert_eq!(twice.level, 63);
    }

    #[test]
    fn cli_apply_relative_then_report() {
        let c = controller(40, false);
        let state = c.apply(Some(VolumeOp::Relative(5)), None).unwrap();
        assert_eq!(state.level, 45);
        assert!(!state.muted);
    }

    #[test]
    fn cli_force_mute_keeps_level() {
        let c = controller(40, false);
        let state = c.apply(None, Some(MuteOp::Mute)).unwrap();
        assert!(state.muted);
        assert_eq!(state.level, 40);
    }

    #[test]
    fn cli_volume_operand_does_not_unmute() {
        let c = controller(40, true);
        let state = c.apply(Some(VolumeOp::Absolute(80)), None).unwrap();
        assert_eq!(state.level, 80);
        assert!(state.muted);
    }

    #[test]
    fn cli_combined_volume_and_unmute() {
        let c = controller(40, true);
        let state = c
            .apply(Some(VolumeOp::Absolute(80)), Some(MuteOp::Unmute))
            .unwrap();
        assert_eq!(state.level, 80);
        assert!(!state.muted);
    }

    #[test]
    fn display_level_is_zero_while_muted() {
        let c = controller(70, false);
        let state = c.set_mute(true).unwrap();
        assert_eq!(state.display_level(), 0);
        let state = c.set_mute(false).unwrap();
        assert_eq!(state.display_level(), 70);
    }
}
