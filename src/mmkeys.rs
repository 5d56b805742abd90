//! Multimedia key events from the session bus.
//!
//! Subscribes to the desktop media-key daemon and forwards abstract key
//! events over a channel, so the core never sees the bus. A missing daemon
//! simply means no hotkeys for this session.

use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::debug;
use zbus::blocking::Connection;
use zbus::proxy;

/// Abstract key events the GUI session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    VolumeUp,
    VolumeDown,
    MuteToggle,
}

#[proxy(
    interface = "org.gnome.SettingsDaemon.MediaKeys",
    default_service = "org.gnome.SettingsDaemon.MediaKeys",
    default_path = "/org/gnome/SettingsDaemon/MediaKeys"
)]
trait MediaKeys {
    fn grab_media_player_keys(&self, application: &str, time: u32) -> zbus::Result<()>;

    #[zbus(signal)]
    fn media_player_key_pressed(&self, application: String, key: String) -> zbus::Result<()>;
}

fn map_key(key: &str) -> Option<KeyEvent> {
    match key {
        "AudioRaiseVolume" | "volume-up" => Some(KeyEvent::VolumeUp),
        "AudioLowerVolume" | "volume-down" => Some(KeyEvent::VolumeDown),
        "AudioMute" | "mute" => Some(KeyEvent::MuteToggle),
        _ => None,
    }
}

/// Start the listener thread. `None` when the media-key service cannot be
/// reached; the caller then runs without hotkey support.
pub fn spawn_listener() -> Option<Receiver<KeyEvent>> {
    let connection = match Connection::session() {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "session bus unavailable, multimedia keys disabled");
            return None;
        }
    };

    let proxy = match MediaKeysProxyBlocking::new(&connection) {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "media-key proxy unavailable");
            return None;
        }
    };

    if let Err(e) = proxy.grab_media_player_keys("alsa-tray", 0) {
        debug!(error = %e, "media-key daemon not present");
        return None;
    }

    let signals = match proxy.receive_media_player_key_pressed() {
        Ok(s) => s,
        Err(e) => {
            debug!(error = %e, "media-key signal subscription failed");
            return None;
        }
    };

    let (sender, receiver) = channel();
    thread::spawn(move || {
        for signal in signals {
            let Ok(args) = signal.args() else {
                continue;
            };
            if let Some(event) = map_key(args.key()) {
                if sender.send(event).is_err() {
                    // GUI session ended
                    break;
                }
            }
        }
    });

    Some(receiver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_key_names() {
        assert_eq!(map_key("AudioRaiseVolume"), Some(KeyEvent::VolumeUp));
        assert_eq!(map_key("AudioLowerVolume"), Some(KeyEvent::VolumeDown));
        assert_eq!(map_key("AudioMute"), Some(KeyEvent::MuteToggle));
        assert_eq!(map_key("volume-up"), Some(KeyEvent::VolumeUp));
    }

    #[test]
    fn ignores_unrelated_keys() {
        assert_eq!(map_key("Play"), None);
        assert_eq!(map_key(""), None);
    }
}
