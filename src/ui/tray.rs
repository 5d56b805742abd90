//! System tray icon management.
//!
//! Manages the tray icon, tooltip and context menu, and translates toolkit
//! events into plain `TrayEvent` values on a channel so the session core
//! never touches the widget library.

use crate::display::icon_tier;
use crate::mixer::VolumeState;
use std::sync::mpsc::{channel, Receiver, Sender};
use thiserror::Error;
use tray_icon::{
    menu::{CheckMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem},
    Icon, TrayIcon, TrayIconBuilder, TrayIconEvent,
};

/// Events from the system tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    /// Left click: show or hide the slider flyout
    ToggleFlyout,

    /// Middle click or the Mute menu item
    ToggleMute,

    /// The Preferences menu item
    ShowPreferences,

    /// The Quit menu item
    Quit,
}

/// Tray service error types.
#[derive(Debug, Error)]
pub enum TrayError {
    #[error("Failed to create tray icon: {0}")]
    CreateFailed(String),

    #[error("Failed to load icon resource")]
    IconLoadFailed,

    #[error("Tray icon not initialized")]
    NotInitialized,

    #[error("Failed to create menu: {0}")]
    MenuFailed(String),
}

/// System tray manager.
pub struct TrayManager {
    tray_icon: Option<TrayIcon>,
    event_sender: Sender<TrayEvent>,
    event_receiver: Receiver<TrayEvent>,
    mute_item: Option<CheckMenuItem>,
    mute_menu_id: Option<tray_icon::menu::MenuId>,
    prefs_menu_id: Option<tray_icon::menu::MenuId>,
    quit_menu_id: Option<tray_icon::menu::MenuId>,
}

impl TrayManager {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            tray_icon: None,
            event_sender: sender,
            event_receiver: receiver,
            mute_item: None,
            mute_menu_id: None,
            prefs_menu_id: None,
            quit_menu_id: None,
        }
    }

    /// Create and show the tray icon.
    pub fn create(&mut self, state: &VolumeState) -> Result<(), TrayError> {
        let icon = create_icon(icon_tier(state.level, state.muted))?;

        let menu = Menu::new();

        let mute_item = CheckMenuItem::new("Mute", true, state.muted, None);
        self.mute_menu_id = Some(mute_item.id().clone());
        self.mute_item = Some(mute_item.clone());
        menu.append(&mute_item)
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        let prefs_item = MenuItem::new("Preferences", true, None);
        self.prefs_menu_id = Some(prefs_item.id().clone());
        menu.append(&prefs_item)
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        let quit_item = MenuItem::new("Quit", true, None);
        self.quit_menu_id = Some(quit_item.id().clone());
        menu.append(&quit_item)
            .map_err(|e| TrayError::MenuFailed(e.to_string()))?;

        let tray_icon = TrayIconBuilder::new()
            .with_icon(icon)
            .with_tooltip(crate::display::tooltip(state))
            .with_menu(Box::new(menu))
            .build()
            .map_err(|e| TrayError::CreateFailed(e.to_string()))?;

        self.tray_icon = Some(tray_icon);

        Ok(())
    }

    /// Process toolkit events. Call this from the event loop.
    pub fn process_events(&mut self) {
        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            match event {
                TrayIconEvent::Click {
                    button: tray_icon::MouseButton::Left,
                    button_state: tray_icon::MouseButtonState::Up,
                    ..
                } => {
                    let _ = self.event_sender.send(TrayEvent::ToggleFlyout);
                }
                TrayIconEvent::Click {
                    button: tray_icon::MouseButton::Middle,
                    button_state: tray_icon::MouseButtonState::Up,
                    ..
                } => {
                    let _ = self.event_sender.send(TrayEvent::ToggleMute);
                }
                _ => {}
            }
        }

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if Some(&event.id) == self.mute_menu_id.as_ref() {
                let _ = self.event_sender.send(TrayEvent::ToggleMute);
            } else if Some(&event.id) == self.prefs_menu_id.as_ref() {
                let _ = self.event_sender.send(TrayEvent::ShowPreferences);
            } else if Some(&event.id) == self.quit_menu_id.as_ref() {
                let _ = self.event_sender.send(TrayEvent::Quit);
            }
        }
    }

    /// Get the event receiver for tray events.
    pub fn events(&self) -> &Receiver<TrayEvent> {
        &self.event_receiver
    }

    /// Push the given state onto the icon, tooltip and mute check item.
    pub fn update(&mut self, state: &VolumeState) -> Result<(), TrayError> {
        let icon = create_icon(icon_tier(state.level, state.muted))?;
        let tray = self.tray_icon.as_mut().ok_or(TrayError::NotInitialized)?;
        tray.set_icon(Some(icon))
            .map_err(|e| TrayError::CreateFailed(e.to_string()))?;
        tray.set_tooltip(Some(crate::display::tooltip(state)))
            .map_err(|e| TrayError::CreateFailed(e.to_string()))?;

        if let Some(ref item) = self.mute_item {
            if item.is_checked() != state.muted {
                item.set_checked(state.muted);
            }
        }
        Ok(())
    }

    /// Destroy the tray icon.
    pub fn destroy(&mut self) {
        self.tray_icon = None;
    }
}

impl Default for TrayManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a 32x32 RGBA icon for the given tier.
///
/// A speaker body with zero to three sound arcs; the muted tier is drawn in
/// red with a strike-through line.
fn create_icon(tier: usize) -> Result<Icon, TrayError> {
    const SIZE: usize = 32;
    let mut rgba = vec![0u8; SIZE * SIZE * 4];

    let muted = tier == 3;
    let color: (u8, u8, u8) = if muted {
        (220, 60, 60)
    } else {
        (230, 230, 230)
    };

    let mut put = |x: isize, y: isize, c: (u8, u8, u8)| {
        if (0..SIZE as isize).contains(&x) && (0..SIZE as isize).contains(&y) {
            let idx = (y as usize * SIZE + x as usize) * 4;
            rgba[idx] = c.0;
            rgba[idx + 1] = c.1;
            rgba[idx + 2] = c.2;
            rgba[idx + 3] = 255;
        }
    };

    // Speaker body: a small box with a triangular cone
    for y in 12..20isize {
        for x in 4..9isize {
            put(x, y, color);
        }
    }
    for x in 9..15isize {
        let spread = x - 8;
        for y in (16 - 2 * spread)..(16 + 2 * spread) {
            put(x, y, color);
        }
    }

    // Sound arcs: three when loud, none when silent
    let arcs = match tier {
        0 => 3,
        1 => 2,
        2 => 1,
        _ => 0,
    };
    for arc in 0..arcs {
        let radius = 5.0 + 4.0 * arc as f32;
        for step in 0..64 {
            // Quarter arc facing right
            let angle = -0.7 + 1.4 * (step as f32 / 63.0);
            let x = (15.0 + radius * angle.cos()).round() as isize;
            let y = (16.0 + radius * angle.sin()).round() as isize;
            put(x, y, color);
            put(x + 1, y, color);
        }
    }

    if muted {
        for i in 6..26isize {
            put(i, i, (255, 255, 255));
            put(i + 1, i, (255, 255, 255));
        }
    }

    Icon::from_rgba(rgba, SIZE as u32, SIZE as u32).map_err(|_| TrayError::IconLoadFailed)
}
