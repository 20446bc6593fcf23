use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::utils::to_wide;

/// One context-menu entry, in the order it was appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Caller-assigned id reported back through the click callback. The menu
    /// does not enforce uniqueness; assigning distinct ids is the caller's
    /// business.
    pub id: u32,
    pub label: String,
}

/// The context menu shown when the user right-clicks the notification icon.
///
/// Owns the underlying `HMENU` and keeps a shadow list of entries so the menu
/// contents can be inspected without asking the OS.
pub struct PopupMenu {
    hmenu: HMENU,
    entries: Vec<MenuEntry>,
}

impl PopupMenu {
    pub fn new() -> Result<Self> {
        let hmenu = unsafe { CreatePopupMenu() }?;
        Ok(Self {
            hmenu,
            entries: Vec::new(),
        })
    }

    /// Appends an entry at the bottom of the menu.
    pub fn append(&mut self, id: u32, label: &str) -> Result<()> {
        let wide = to_wide(label);
        unsafe { AppendMenuW(self.hmenu, MF_STRING, id as usize, PCWSTR(wide.as_ptr())) }?;

        self.entries.push(MenuEntry {
            id,
            label: label.to_string(),
        });

        Ok(())
    }

    /// Entries in append order; the last entry is the bottom-most.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Displays the menu at the current cursor position and blocks until the
    /// user selects an entry or dismisses it. A selection arrives afterwards
    /// as `WM_COMMAND` on `hwnd`'s queue.
    pub fn show(&self, hwnd: HWND) -> Result<()> {
        let mut pt = POINT::default();

        unsafe {
            GetCursorPos(&mut pt)?;

            // The menu only dismisses on an outside click while the owning
            // window is in the foreground.
            let _ = SetForegroundWindow(hwnd);

            TrackPopupMenu(
                self.hmenu,
                TPM_BOTTOMALIGN | TPM_LEFTALIGN,
                pt.x,
                pt.y,
                None,
                hwnd,
                None,
            )
            .ok()?;

            // Without this the menu can linger after losing focus.
            PostMessageW(Some(hwnd), WM_NULL, WPARAM(0), LPARAM(0))?;
        }

        Ok(())
    }
}

impl Drop for PopupMenu {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyMenu(self.hmenu);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_append_order() {
        let mut menu = PopupMenu::new().unwrap();
        menu.append(1, "Open").unwrap();
        menu.append(2, "Exit").unwrap();

        let ids: Vec<u32> = menu.entries().iter().map(|e| e.id).collect();
        let labels: Vec<&str> = menu.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(labels, ["Open", "Exit"]);
    }

    #[test]
    fn duplicate_ids_are_not_rejected() {
        let mut menu = PopupMenu::new().unwrap();
        menu.append(7, "First").unwrap();
        menu.append(7, "Second").unwrap();
        assert_eq!(menu.entries().len(), 2);
    }
}
