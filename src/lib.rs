//! Notification-area (system tray) icon with a right-click context menu for
//! Win32 applications.
//!
//! [`Tray::new`] creates a hidden message window, loads the icon and registers
//! it in the notification area. Right-clicking the icon pops up the context
//! menu at the cursor; selecting an entry invokes the callback passed to
//! [`Tray::new`] with the entry's id. The embedding application pumps messages
//! itself or calls [`run_message_loop`].
//!
//! On non-Windows targets this crate compiles to an empty unit.

#![cfg(windows)]

mod event;
mod icon;
mod menu;
mod message_window;
mod notify_icon;
mod tray;
mod utils;

pub use event::{TrayEvent, WM_TRAYICON};
pub use menu::{MenuEntry, PopupMenu};
pub use tray::{run_message_loop, Tray};
