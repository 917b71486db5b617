// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the window class (once per process) and load Msftedit.dll.
//   • Create the top-level window and hand it to a `Controller`.
//   • Keep the per-thread registry from HWND to controller.
//   • Decode WM_CREATE, WM_SIZE, WM_COMMAND, WM_DESTROY into controller events.
//   • Run the Win32 message loop.
//   • Expose a safe error-dialog helper and the fatal-exit path for main().

#![allow(unsafe_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
    sync::OnceLock,
};

use tracing::{debug, error, info};
use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{UpdateWindow, COLOR_WINDOW, HBRUSH},
        UI::WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DispatchMessageW, GetClientRect, GetMessageW,
            LoadCursorW, MessageBoxW, PostQuitMessage, RegisterClassExW, SetWindowPos, ShowWindow,
            TranslateMessage, CS_DROPSHADOW, CS_HREDRAW, CS_SAVEBITS, CS_VREDRAW, CW_USEDEFAULT,
            HMENU, IDC_ARROW, MB_ICONERROR, MB_OK, MSG, SHOW_WINDOW_CMD, SWP_NOZORDER,
            WINDOW_EX_STYLE, WNDCLASSEXW, WS_OVERLAPPEDWINDOW,
        },
    },
};

use super::{controls, dpi};
use crate::{
    app::{Controller, Disposition, Event, Phase},
    config::InspectorConfig,
    editor::richedit::{self, RichEditView},
    error::{InspectorError, Result},
    platform::{Pane, Surface},
    ui::{
        command::CommandId,
        layout::{Rect, Size},
    },
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the main window class.
const CLASS_NAME: PCWSTR = w!("RTFINSP_APP_CLASS");

/// Atom returned by the one successful `RegisterClassExW`.
static CLASS_ATOM: OnceLock<u16> = OnceLock::new();

/// The controller type behind every inspector window.
pub(crate) type Inspector = Controller<Win32Surface>;

// ── Window registry ───────────────────────────────────────────────────────────
//
// Maps each live top-level window to its controller so the static WndProc can
// find it.  `PENDING` carries the controller across `CreateWindowExW` until
// WM_CREATE files it under the new HWND.  Both are touched only on the UI
// thread.

thread_local! {
    static WINDOWS: RefCell<HashMap<isize, Rc<RefCell<Inspector>>>> = RefCell::new(HashMap::new());
    static PENDING: RefCell<Option<Rc<RefCell<Inspector>>>> = const { RefCell::new(None) };
}

fn registry_key(hwnd: HWND) -> isize {
    hwnd.0 as isize
}

fn lookup(hwnd: HWND) -> Option<Rc<RefCell<Inspector>>> {
    WINDOWS.with(|w| w.borrow().get(&registry_key(hwnd)).cloned())
}

// ── Win32Surface ──────────────────────────────────────────────────────────────

/// The built-in children, present once construction has created them.
struct Children {
    status: HWND,
    rich: RichEditView,
    plain: HWND,
}

/// `Surface` backed by a real top-level window.
pub(crate) struct Win32Surface {
    hinstance: HINSTANCE,
    hwnd: HWND,
    children: Option<Children>,
}

impl Win32Surface {
    fn new(hinstance: HINSTANCE) -> Self {
        Self {
            hinstance,
            hwnd: HWND::default(),
            children: None,
        }
    }

    /// The top-level window handle (null until WM_CREATE).
    pub(crate) fn hwnd(&self) -> HWND {
        self.hwnd
    }

    fn children(&self) -> Result<&Children> {
        self.children
            .as_ref()
            .ok_or(InspectorError::NotLive(Phase::Constructing))
    }

    fn pane_hwnd(&self, pane: Pane) -> Result<HWND> {
        let c = self.children()?;
        Ok(match pane {
            Pane::Status => c.status,
            Pane::RichText => c.rich.hwnd(),
            Pane::PlainText => c.plain,
        })
    }
}

impl Surface for Win32Surface {
    fn create_builtin_controls(&mut self, status: Rect, initial_status: &str) -> Result<()> {
        let status = controls::create_static(self.hwnd, self.hinstance, initial_status, status)?;
        let rich = RichEditView::create(self.hwnd, self.hinstance)?;
        let plain = controls::create_plain_edit(self.hwnd, self.hinstance)?;
        self.children = Some(Children {
            status,
            rich,
            plain,
        });
        Ok(())
    }

    fn client_size(&self) -> Result<Size> {
        let mut rc = RECT::default();
        // SAFETY: hwnd is the live top-level window; rc is a valid out-pointer.
        unsafe { GetClientRect(self.hwnd, &mut rc) }
            .map_err(|e| InspectorError::win32("GetClientRect", e))?;
        Ok(Size::new(rc.right - rc.left, rc.bottom - rc.top))
    }

    fn place(&mut self, pane: Pane, rect: Rect) -> Result<()> {
        let hwnd = self.pane_hwnd(pane)?;
        // SAFETY: hwnd is one of our live children; SWP_NOZORDER leaves the
        // insert-after handle unused.
        unsafe {
            SetWindowPos(
                hwnd,
                HWND::default(),
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER,
            )
        }
        .map_err(|e| InspectorError::win32("SetWindowPos", e))
    }

    fn create_button(&mut self, id: CommandId, label: &str, rect: Rect) -> Result<()> {
        controls::create_button(self.hwnd, self.hinstance, id, label, rect)?;
        Ok(())
    }

    fn set_text(&mut self, pane: Pane, text: &str) -> Result<()> {
        controls::set_window_text(self.pane_hwnd(pane)?, text)
    }

    fn text(&self, pane: Pane) -> Result<String> {
        Ok(controls::window_text(self.pane_hwnd(pane)?))
    }

    fn rich_text_rtf(&self) -> Result<String> {
        self.children()?.rich.rtf()
    }

    fn set_rich_text_rtf(&mut self, rtf: &str) -> Result<()> {
        self.children()?.rich.set_rtf(rtf)
    }

    fn request_quit(&mut self) {
        // SAFETY: PostQuitMessage with exit code 0 is always safe to call
        // from WM_DESTROY. It posts WM_QUIT to the thread's message queue.
        unsafe { PostQuitMessage(0) };
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// The application's top-level window.
pub(crate) struct InspectorWindow {
    controller: Rc<RefCell<Inspector>>,
}

impl InspectorWindow {
    /// Register the class, create the window and its children, lay them out
    /// and show the window with `show`.
    pub(crate) fn create(hinstance: HINSTANCE, show: SHOW_WINDOW_CMD, config: &InspectorConfig) -> Result<Self> {
        register_class(hinstance)?;

        let controller = Rc::new(RefCell::new(Controller::new(
            Win32Surface::new(hinstance),
            config.layout.clone(),
        )));
        PENDING.with(|p| *p.borrow_mut() = Some(Rc::clone(&controller)));

        let title = controls::to_wide(&config.title);
        let width = dpi::scale(config.layout.window_width);
        let height = dpi::scale(config.layout.window_height);

        // SAFETY: CLASS_NAME was registered above; hinstance is the exe's
        // module; title outlives the call.  HWND::default() (null parent)
        // creates a top-level window.  WM_CREATE runs inside this call and
        // takes the controller out of PENDING.
        let created = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                CLASS_NAME,
                PCWSTR(title.as_ptr()),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                width,
                height,
                HWND::default(),
                HMENU::default(),
                hinstance,
                None,
            )
        };
        // Clear the slot whether or not WM_CREATE consumed it.
        PENDING.with(|p| p.borrow_mut().take());
        let hwnd = created.map_err(|e| InspectorError::win32("CreateWindowExW", e))?;

        controller.borrow_mut().finish_construction()?;
        info!(width, height, "inspector window created");

        // SAFETY: hwnd was just returned by CreateWindowExW and is valid.
        // UpdateWindow returns a success BOOL and ShowWindow the previous
        // visibility state; both are intentionally ignored here.
        unsafe {
            let _ = UpdateWindow(hwnd);
            let _ = ShowWindow(hwnd, show);
        }

        Ok(Self { controller })
    }

    /// Drive the message loop until WM_QUIT.
    pub(crate) fn run(&self) -> Result<()> {
        message_loop()
    }

    /// Run `f` against the controller, e.g. to register commands.
    pub(crate) fn with_controller<R>(&self, f: impl FnOnce(&mut Inspector) -> R) -> R {
        f(&mut self.controller.borrow_mut())
    }

    /// The top-level window handle.
    pub(crate) fn handle(&self) -> HWND {
        self.controller.borrow().surface().hwnd()
    }
}

/// Show a modal error dialog with the given message.
///
/// Safe to call from any context; performs the UTF-16 conversion internally.
pub(crate) fn show_error_dialog(message: &str) {
    let msg_wide = controls::to_wide(message);

    // SAFETY: msg_wide is a valid null-terminated UTF-16 string that remains
    // allocated for the duration of the MessageBoxW call.
    // HWND::default() (null) means the dialog has no owner window.
    // Return value (button pressed) is intentionally unused for an error dialog.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(msg_wide.as_ptr()),
            w!("RTF Inspector - Fatal Error"),
            MB_OK | MB_ICONERROR,
        );
    }
}

/// Report `e` and terminate the process.
///
/// Setup failures leave no usable window, so there is nothing to recover to.
pub(crate) fn fatal(e: &InspectorError) -> ! {
    error!(error = %e, "fatal error");
    show_error_dialog(&e.to_string());
    std::process::exit(1)
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    if CLASS_ATOM.get().is_some() {
        return Ok(());
    }

    // The rich-text pane's class must exist before any window is created.
    richedit::load_library()?;

    // SAFETY: LoadCursorW with IDC_ARROW always succeeds; the arrow cursor is
    // a built-in resource guaranteed to exist on all Windows versions.
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }
        .map_err(|e| InspectorError::win32("LoadCursorW", e))?;

    let wndclass = WNDCLASSEXW {
        // WNDCLASSEXW is ~80 bytes; the cast to u32 is always lossless.
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_SAVEBITS | CS_DROPSHADOW | CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        hInstance: hinstance,
        hCursor: cursor,
        // System colour brushes are passed as (index + 1).
        hbrBackground: HBRUSH((COLOR_WINDOW.0 as usize + 1) as *mut std::ffi::c_void),
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };

    // SAFETY: wndclass is fully initialised with valid handles;
    // CLASS_NAME is a valid null-terminated UTF-16 string literal.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        return Err(last_error("RegisterClassExW"));
    }

    let _ = CLASS_ATOM.set(atom);
    debug!(atom, "window class registered");
    Ok(())
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop() -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; HWND::default() retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };

        match ret.0 {
            // GetMessageW returns -1 on error.
            -1 => return Err(last_error("GetMessageW")),
            // Returns 0 when WM_QUIT is retrieved; exit the loop cleanly.
            0 => break,
            // Any other value: a normal message to dispatch.
            _ => unsafe {
                // SAFETY: msg was populated by a successful GetMessageW call.
                // TranslateMessage return value (whether it generated WM_CHAR)
                // and DispatchMessageW's LRESULT are intentionally unused.
                let _ = TranslateMessage(&msg);
                let _ = DispatchMessageW(&msg);
            },
        }
    }

    Ok(())
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler
// except in the registry, which WM_DESTROY clears.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let event = Event::decode(msg, wparam.0);

    let controller = match event {
        Event::Created => on_create(hwnd),
        Event::Destroyed => return on_destroy(hwnd),
        _ => lookup(hwnd),
    };

    // No controller yet (messages before WM_CREATE), or its owner is busy
    // further up the stack (a message sent from inside a command callback).
    let disposition = match controller.as_ref().map(|c| c.try_borrow_mut()) {
        Some(Ok(mut inspector)) => match inspector.handle_event(event) {
            Ok(d) => d,
            Err(e) => fatal(&e),
        },
        Some(Err(_)) => {
            debug!(msg, ?event, "controller busy; default processing");
            Disposition::Default
        }
        None => Disposition::Default,
    };

    match disposition {
        Disposition::Handled => LRESULT(0),
        // SAFETY: hwnd and message parameters are valid, provided by Windows.
        Disposition::Default => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// File the pending controller under `hwnd`.
fn on_create(hwnd: HWND) -> Option<Rc<RefCell<Inspector>>> {
    let controller = PENDING.with(|p| p.borrow_mut().take())?;
    controller.borrow_mut().surface_mut().hwnd = hwnd;
    WINDOWS.with(|w| w.borrow_mut().insert(registry_key(hwnd), Rc::clone(&controller)));
    Some(controller)
}

/// Drop `hwnd` from the registry and ask the loop to stop.
fn on_destroy(hwnd: HWND) -> LRESULT {
    let controller = WINDOWS.with(|w| w.borrow_mut().remove(&registry_key(hwnd)));
    let handled = match controller.as_ref().map(|c| c.try_borrow_mut()) {
        Some(Ok(mut inspector)) => inspector.handle_event(Event::Destroyed),
        _ => Ok(Disposition::Default),
    };
    if !matches!(handled, Ok(Disposition::Handled)) {
        // The controller is unavailable; post the quit signal ourselves so
        // the loop still terminates.
        // SAFETY: same as Win32Surface::request_quit.
        unsafe { PostQuitMessage(0) };
    }
    debug!("window destroyed");
    LRESULT(0)
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in an
/// `InspectorError`.
///
/// Call immediately after a Win32 function that signals failure: `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> InspectorError {
    InspectorError::win32(function, windows::core::Error::from_win32())
}
