//! Tray and flyout surfaces.

pub mod flyout;
pub mod tray;

pub use flyout::{FlyoutAction, FlyoutWindow};
pub use tray::{TrayError, TrayEvent, TrayManager};
