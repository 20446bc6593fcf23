use std::path::Path;

use anyhow::Context;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::menu::{MenuEntry, PopupMenu};
use crate::message_window::TrayState;
use crate::notify_icon::NotifyIcon;
use crate::{icon, message_window};

/// A notification-area icon with a right-click context menu.
///
/// Owns the hidden message window, the popup menu and the icon registration
/// for its whole lifetime; everything is torn down on drop. All methods must
/// be called on the thread that created the tray, which is also the thread
/// that has to pump messages.
pub struct Tray {
    hwnd: HWND,
    icon: Option<NotifyIcon>,
}

impl Tray {
    /// Creates the tray: popup menu, icon, hidden window, then the
    /// notification-area registration, in that order, so the registration is
    /// bound to the real window handle from the start.
    ///
    /// A missing or unreadable icon file is not fatal; neither is a rejected
    /// icon registration (the process then runs without a visible tray icon,
    /// and the failure is logged). Failing to create the menu or the window
    /// is an error.
    ///
    /// `on_click` receives the id of the selected menu entry, once per
    /// selection, on the message-loop thread.
    pub fn new<F>(icon_path: impl AsRef<Path>, tooltip: &str, on_click: F) -> anyhow::Result<Self>
    where
        F: FnMut(u32) + 'static,
    {
        let menu = PopupMenu::new().context("Failed to create popup menu")?;
        let hicon = icon::load_from_file(icon_path.as_ref());

        let state = TrayState {
            menu,
            on_click: Box::new(on_click),
        };
        let hwnd =
            unsafe { message_window::create(state) }.context("Failed to create tray window")?;

        let icon = match NotifyIcon::add(hwnd, tooltip, hicon) {
            Ok(icon) => Some(icon),
            Err(e) => {
                tracing::warn!("Failed to register notification icon: {e}");
                None
            }
        };

        Ok(Self { hwnd, icon })
    }

    /// Appends an entry at the bottom of the context menu.
    pub fn add_menu_item(&mut self, id: u32, label: &str) -> anyhow::Result<()> {
        let state = unsafe { TrayState::from_hwnd(self.hwnd) }
            .context("Tray window has no state attached")?;

        state
            .menu
            .append(id, label)
            .with_context(|| format!("Failed to append menu item {id} ({label:?})"))
    }

    /// Snapshot of the menu entries in append order.
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        unsafe { TrayState::from_hwnd(self.hwnd) }
            .map(|state| state.menu.entries().to_vec())
            .unwrap_or_default()
    }

    /// The hidden window owning the tray's message queue. Embedders that pump
    /// their own loop dispatch to it like to any other window.
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

impl Drop for Tray {
    fn drop(&mut self) {
        // Deregister the icon before its window goes away.
        self.icon.take();

        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

/// Pumps the calling thread's message queue until `WM_QUIT`, which the tray
/// posts when its window is destroyed. The embedding application may run its
/// own equivalent loop instead.
pub fn run_message_loop() {
    let mut msg = MSG::default();
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).into() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
