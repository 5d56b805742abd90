//! Display projection shared by the tray icon and desktop notifications.

use crate::mixer::VolumeState;

/// Notification (OSD) icon names by tier, loud to muted.
pub const OSD_ICONS: [&str; 4] = [
    "notification-audio-volume-high",
    "notification-audio-volume-medium",
    "notification-audio-volume-low",
    "notification-audio-volume-muted",
];

/// Map a volume level and mute flag to one of four icon tiers.
///
/// Muted is its own tier (3) regardless of level; otherwise three linear
/// tiers from loud (0) to silent (2) using integer floor division, so the
/// boundaries fall at 67/34 rather than 66/33.
pub fn icon_tier(level: i32, muted: bool) -> usize {
    if muted {
        3
    } else {
        (((100 - level.clamp(0, 100)) * 3) / 100).clamp(0, 2) as usize
    }
}

/// Tooltip text for the tray icon.
pub fn tooltip(state: &VolumeState) -> String {
    if state.muted {
        "Volume: mute".to_string()
    } else {
        format!("Volume: {}%", state.level)
    }
}

/// CLI result line printed after a one-shot action.
pub fn status_line(state: &VolumeState) -> String {
    if state.muted {
        format!("Volume: {}%, mute", state.level)
    } else {
        format!("Volume: {}%", state.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_match_floor_semantics() {
        assert_eq!(icon_tier(100, false), 0);
        assert_eq!(icon_tier(67, false), 0);
        assert_eq!(icon_tier(66, false), 1);
        assert_eq!(icon_tier(34, false), 1);
        assert_eq!(icon_tier(33, false), 2);
        assert_eq!(icon_tier(1, false), 2);
        assert_eq!(icon_tier(0, false), 2);
    }

    #[test]
    fn muted_is_a_distinct_tier_at_any_level() {
        for level in [0, 33, 50, 100] {
            assert_eq!(icon_tier(level, true), 3);
        }
    }

    #[test]
    fn tier_clamps_wild_levels() {
        assert_eq!(icon_tier(250, false), 0);
        assert_eq!(icon_tier(-10, false), 2);
    }

    #[test]
    fn tooltip_reports_mute_or_percent() {
        let muted = VolumeState {
            level: 40,
            muted: true,
        };
        let loud = VolumeState {
            level: 85,
            muted: false,
        };
        assert_eq!(tooltip(&muted), "Volume: mute");
        assert_eq!(tooltip(&loud), "Volume: 85%");
    }

    #[test]
    fn status_line_appends_mute_suffix() {
        let state = VolumeState {
            level: 45,
            muted: false,
        };
        assert_eq!(status_line(&state), "Volume: 45%");
        let state = VolumeState {
            level: 45,
            muted: true,
        };
        assert_eq!(status_line(&state), "Volume: 45%, mute");
    }
}
