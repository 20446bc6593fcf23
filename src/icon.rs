use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use windows::core::*;
use windows::Win32::UI::WindowsAndMessaging::*;

/// Notification-area icons are rendered at 32x32.
const ICON_SIZE: i32 = 32;

/// Loads a `.ico` file from disk. A missing or malformed file is not an
/// error: the tray icon is then registered without an image and the shell
/// renders a blank slot instead.
pub fn load_from_file(path: &Path) -> Option<HICON> {
    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();

    let handle = unsafe {
        LoadImageW(
            None,
            PCWSTR(wide.as_ptr()),
            IMAGE_ICON,
            ICON_SIZE,
            ICON_SIZE,
            LR_LOADFROMFILE,
        )
    };

    match handle {
        Ok(handle) => Some(HICON(handle.0)),
        Err(e) => {
            tracing::warn!("Failed to load tray icon from {}: {e}", path.display());
            None
        }
    }
}
