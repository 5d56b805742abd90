//! Desktop notification OSD.
//!
//! Talks to `org.freedesktop.Notifications` over the session bus. The whole
//! surface is best-effort: a missing bus or daemon turns every call into a
//! no-op, with the reason visible in debug logging only.

use crate::display::{icon_tier, OSD_ICONS};
use crate::mixer::VolumeState;
use std::cell::Cell;
use std::collections::HashMap;
use tracing::debug;
use zbus::blocking::Connection;
use zbus::proxy;
use zbus::zvariant::Value;

#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Volume OSD sender. `None` inside when the notification service could not
/// be reached at startup.
pub struct Notifier {
    proxy: Option<NotificationsProxyBlocking<'static>>,
    last_id: Cell<u32>,
}

impl Notifier {
    pub fn new() -> Self {
        let proxy = match Connection::session() {
            Ok(connection) => match NotificationsProxyBlocking::new(&connection) {
                Ok(proxy) => Some(proxy),
                Err(e) => {
                    debug!(error = %e, "notification proxy unavailable");
                    None
                }
            },
            Err(e) => {
                debug!(error = %e, "session bus unavailable, notifications disabled");
                None
            }
        };
        Self {
            proxy,
            last_id: Cell::new(0),
        }
    }

    /// A notifier that never shows anything (`-notify`).
    pub fn disabled() -> Self {
        Self {
            proxy: None,
            last_id: Cell::new(0),
        }
    }

    pub fn is_available(&self) -> bool {
        self.proxy.is_some()
    }

    /// Show (or update in place) the volume OSD for the given state.
    ///
    /// The displayed value is 0 while muted and the icon comes from the same
    /// tier function as the tray icon.
    pub fn show(&self, state: &VolumeState) {
        let Some(proxy) = &self.proxy else {
            return;
        };

        let value = state.display_level();
        let icon = OSD_ICONS[icon_tier(state.level, state.muted)];

        let mut hints: HashMap<&str, Value<'_>> = HashMap::new();
        hints.insert("value", Value::I32(value));
        // Collapses successive volume popups into one on supporting daemons
        hints.insert("x-canonical-private-synchronous", Value::from("volume"));

        match proxy.notify(
            "alsa-tray",
            self.last_id.get(),
            icon,
            "Volume",
            "",
            Vec::new(),
            hints,
            2000,
        ) {
            Ok(id) => self.last_id.set(id),
            Err(e) => debug!(error = %e, "notification send failed"),
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
