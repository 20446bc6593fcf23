use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::event::TrayEvent;
use crate::menu::PopupMenu;

#[cfg(debug_assertions)]
const TRAY_WINDOW_CLASSNAME: PCWSTR = w!("wintray-debug::window");
#[cfg(not(debug_assertions))]
const TRAY_WINDOW_CLASSNAME: PCWSTR = w!("wintray::window");

/// Per-window state, owned by the window itself via `GWLP_USERDATA` and freed
/// on `WM_DESTROY`.
pub(crate) struct TrayState {
    pub menu: PopupMenu,
    pub on_click: Box<dyn FnMut(u32)>,
}

impl TrayState {
    /// # Safety
    ///
    /// `hwnd` must be a live window of this class, on the thread that created
    /// it, and the returned reference must not outlive the window.
    pub(crate) unsafe fn from_hwnd<'a>(hwnd: HWND) -> Option<&'a mut Self> {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut Self;
        (!ptr.is_null()).then(|| &mut *ptr)
    }

    fn dispatch(&mut self, hwnd: HWND, event: TrayEvent) {
        match event {
            TrayEvent::ShowMenu => {
                if let Err(e) = self.menu.show(hwnd) {
                    tracing::warn!("Failed to show tray menu: {e}");
                }
            }
            TrayEvent::MenuCommand(id) => (self.on_click)(id),
        }
    }
}

/// Creates the hidden window that owns the tray's message queue. The window
/// is never shown; its only job is receiving shell callbacks and menu
/// commands.
pub(crate) unsafe fn create(state: TrayState) -> Result<HWND> {
    let hinstance = GetModuleHandleW(None)?;

    let wc = WNDCLASSW {
        hInstance: hinstance.into(),
        lpszClassName: TRAY_WINDOW_CLASSNAME,
        lpfnWndProc: Some(wndproc),
        ..Default::default()
    };

    // Returns 0 once the class exists; CreateWindowExW below finds it either
    // way, so a second tray in the same process keeps working.
    RegisterClassW(&wc);

    let hwnd = CreateWindowExW(
        WS_EX_TOOLWINDOW,
        TRAY_WINDOW_CLASSNAME,
        None,
        WS_OVERLAPPED,
        CW_USEDEFAULT,
        0,
        CW_USEDEFAULT,
        0,
        None,
        None,
        Some(hinstance.into()),
        Some(Box::into_raw(Box::new(state)) as _),
    )?;

    Ok(hwnd)
}

unsafe extern "system" fn wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // Initialize GWLP_USERDATA from the create params
        WM_CREATE => {
            let create_struct = &*(lparam.0 as *const CREATESTRUCTW);
            let state = create_struct.lpCreateParams as *const TrayState;
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, state as _);
            LRESULT(0)
        }

        crate::event::WM_TRAYICON | WM_COMMAND => {
            if let Some(state) = TrayState::from_hwnd(hwnd) {
                if let Some(event) = TrayEvent::from_message(msg, wparam, lparam) {
                    state.dispatch(hwnd, event);
                }
            }
            LRESULT(0)
        }

        WM_DESTROY => {
            // Ends the owning message loop; the click callback is never
            // invoked on the way out.
            PostQuitMessage(0);

            let state = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut TrayState;
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            if !state.is_null() {
                drop(Box::from_raw(state));
            }
            LRESULT(0)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
