use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{WM_APP, WM_COMMAND, WM_RBUTTONUP};

/// Callback message the shell sends to the owning window when the user
/// interacts with the notification icon. The mouse message that triggered it
/// is carried in `lparam`.
pub const WM_TRAYICON: u32 = WM_APP + 1;

/// An actionable event decoded from the tray window's message stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    /// The user released the right mouse button on the notification icon.
    ShowMenu,
    /// The user selected the menu entry with this id.
    MenuCommand(u32),
}

impl TrayEvent {
    /// Decodes raw window-procedure inputs. Returns `None` for messages that
    /// carry nothing to act on, such as left clicks on the icon or
    /// `WM_COMMAND` notifications originating from controls or accelerators
    /// (those have a non-zero `lparam`).
    pub fn from_message(msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<Self> {
        match msg {
            WM_TRAYICON if lparam.0 as u32 == WM_RBUTTONUP => Some(Self::ShowMenu),
            // Menu selections report the item id in the low word of wparam.
            WM_COMMAND if lparam.0 == 0 => Some(Self::MenuCommand((wparam.0 & 0xffff) as u32)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use windows::Win32::UI::WindowsAndMessaging::{WM_DESTROY, WM_LBUTTONUP, WM_MOUSEMOVE};

    use super::*;

    #[test]
    fn right_button_up_shows_menu() {
        let event = TrayEvent::from_message(WM_TRAYICON, WPARAM(1), LPARAM(WM_RBUTTONUP as _));
        assert_eq!(event, Some(TrayEvent::ShowMenu));
    }

    #[test]
    fn other_tray_interactions_are_ignored() {
        for sub in [WM_LBUTTONUP, WM_MOUSEMOVE, 0] {
            let event = TrayEvent::from_message(WM_TRAYICON, WPARAM(1), LPARAM(sub as _));
            assert_eq!(event, None);
        }
    }

    #[test]
    fn menu_selection_reports_item_id() {
        let event = TrayEvent::from_message(WM_COMMAND, WPARAM(2), LPARAM(0));
        assert_eq!(event, Some(TrayEvent::MenuCommand(2)));
    }

    #[test]
    fn menu_selection_id_is_low_word_only() {
        let event = TrayEvent::from_message(WM_COMMAND, WPARAM(0x0001_0002), LPARAM(0));
        assert_eq!(event, Some(TrayEvent::MenuCommand(2)));
    }

    #[test]
    fn control_notifications_are_ignored() {
        let event = TrayEvent::from_message(WM_COMMAND, WPARAM(2), LPARAM(0x1234));
        assert_eq!(event, None);
    }

    #[test]
    fn unrelated_messages_are_ignored() {
        for msg in [WM_DESTROY, WM_MOUSEMOVE, WM_APP] {
            let event = TrayEvent::from_message(msg, WPARAM(0), LPARAM(0));
            assert_eq!(event, None);
        }
    }
}
