use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::UI::Shell::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::event::WM_TRAYICON;

/// Slot id of our single notification icon.
const TRAY_ICON_UID: u32 = 1;

/// Fixed size of `NOTIFYICONDATAW::szTip`, including the terminating null.
const TOOLTIP_LEN: usize = 128;

/// A registered notification-area icon. Deregistered on drop.
pub struct NotifyIcon {
    nid: NOTIFYICONDATAW,
    removed: bool,
}

impl NotifyIcon {
    /// Registers an icon for `hwnd`, wiring shell callbacks to [`WM_TRAYICON`].
    ///
    /// `icon` may be `None`, in which case the shell shows a blank slot. The
    /// tooltip is silently truncated to what fits the fixed-size buffer.
    pub fn add(hwnd: HWND, tooltip: &str, icon: Option<HICON>) -> Result<Self> {
        let nid = NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd,
            uID: TRAY_ICON_UID,
            uFlags: NIF_MESSAGE | NIF_ICON | NIF_TIP,
            uCallbackMessage: WM_TRAYICON,
            hIcon: icon.unwrap_or_default(),
            szTip: encode_tooltip(tooltip),
            ..Default::default()
        };

        unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.ok()?;

        Ok(Self {
            nid,
            removed: false,
        })
    }

    /// Removes the icon from the notification area. Removing an icon the
    /// shell no longer knows about is left to the platform and does not
    /// crash; the failure is only logged.
    pub fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;

        if let Err(e) = unsafe { Shell_NotifyIconW(NIM_DELETE, &self.nid) }.ok() {
            tracing::warn!("Failed to remove notification icon: {e}");
        }
    }
}

impl Drop for NotifyIcon {
    fn drop(&mut self) {
        self.remove();
    }
}

/// UTF-16 encodes a tooltip into the fixed `szTip` buffer, truncating to 127
/// units so the terminating null is always present.
fn encode_tooltip(tooltip: &str) -> [u16; TOOLTIP_LEN] {
    let mut tip = [0u16; TOOLTIP_LEN];
    for (dst, src) in tip.iter_mut().zip(tooltip.encode_utf16().take(TOOLTIP_LEN - 1)) {
        *dst = src;
    }
    tip
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(tip: &[u16]) -> String {
        let len = tip.iter().position(|&u| u == 0).unwrap();
        String::from_utf16(&tip[..len]).unwrap()
    }

    #[test]
    fn short_tooltip_is_copied_verbatim() {
        let tip = encode_tooltip("My App");
        assert_eq!(decode(&tip), "My App");
    }

    #[test]
    fn empty_tooltip_is_all_zeros() {
        assert_eq!(encode_tooltip(""), [0u16; TOOLTIP_LEN]);
    }

    #[test]
    fn long_tooltip_is_truncated_and_terminated() {
        let long = "x".repeat(500);
        let tip = encode_tooltip(&long);
        assert_eq!(tip[TOOLTIP_LEN - 1], 0);
        assert_eq!(decode(&tip), "x".repeat(TOOLTIP_LEN - 1));
    }

    #[test]
    fn tooltip_at_buffer_boundary_keeps_terminator() {
        let exact = "y".repeat(TOOLTIP_LEN);
        let tip = encode_tooltip(&exact);
        assert_eq!(decode(&tip).len(), TOOLTIP_LEN - 1);
    }

    #[test]
    fn non_ascii_tooltip_survives_encoding() {
        let tip = encode_tooltip("Wöx Läuncher");
        assert_eq!(decode(&tip), "Wöx Läuncher");
    }
}
