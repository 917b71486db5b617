// ── Standard child controls ───────────────────────────────────────────────────
//
// Creation and text access for the STATIC, EDIT and BUTTON children.  The
// windows crate types their style bits inconsistently, so the few we need are
// declared here as `WINDOW_STYLE` values.

#![allow(unsafe_code)]

use std::ffi::c_void;

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{HINSTANCE, HWND, LPARAM, WPARAM},
        UI::WindowsAndMessaging::{
            CreateWindowExW, GetWindowTextLengthW, GetWindowTextW, SendMessageW, SetWindowTextW,
            HMENU, WINDOW_EX_STYLE, WINDOW_STYLE, WS_BORDER, WS_CHILD, WS_TABSTOP, WS_VISIBLE,
            WS_VSCROLL,
        },
    },
};

use crate::{
    error::{InspectorError, Result},
    ui::{command::CommandId, layout::Rect},
};

pub(crate) const SS_LEFT: WINDOW_STYLE = WINDOW_STYLE(0x0000);
pub(crate) const ES_LEFT: WINDOW_STYLE = WINDOW_STYLE(0x0000);
pub(crate) const ES_MULTILINE: WINDOW_STYLE = WINDOW_STYLE(0x0004);
pub(crate) const ES_AUTOVSCROLL: WINDOW_STYLE = WINDOW_STYLE(0x0040);
pub(crate) const BS_DEFPUSHBUTTON: WINDOW_STYLE = WINDOW_STYLE(0x0001);

/// `EM_SETLIMITTEXT`; WPARAM=0 selects the maximum.
const EM_SETLIMITTEXT: u32 = 0x00C5;

/// Encode `s` as a null-terminated UTF-16 string.
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Create one child window of `class` inside `parent`.
///
/// `id` becomes the control id reported in WM_COMMAND; `what` names the
/// control in the error if creation fails.
#[allow(clippy::too_many_arguments)]
pub(crate) fn create_child(
    class: &str,
    text: &str,
    style: WINDOW_STYLE,
    rect: Rect,
    parent: HWND,
    id: u16,
    hinstance: HINSTANCE,
    what: &'static str,
) -> Result<HWND> {
    let class_wide = to_wide(class);
    let text_wide = to_wide(text);
    // For a child window the HMENU slot carries the control id.
    let menu = HMENU(usize::from(id) as *mut c_void);

    // SAFETY: class_wide and text_wide are null-terminated UTF-16 strings
    // that outlive the call; parent and hinstance are valid handles owned by
    // the calling window.
    unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            PCWSTR(class_wide.as_ptr()),
            PCWSTR(text_wide.as_ptr()),
            style,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            parent,
            menu,
            hinstance,
            None,
        )
    }
    .map_err(|e| InspectorError::win32(what, e))
}

pub(crate) fn create_static(parent: HWND, hinstance: HINSTANCE, text: &str, rect: Rect) -> Result<HWND> {
    create_child(
        "STATIC",
        text,
        WS_VISIBLE | WS_CHILD | SS_LEFT,
        rect,
        parent,
        0,
        hinstance,
        "CreateWindowExW (status label)",
    )
}

/// Multi-line plain EDIT with the text limit lifted.
pub(crate) fn create_plain_edit(parent: HWND, hinstance: HINSTANCE) -> Result<HWND> {
    let hwnd = create_child(
        "EDIT",
        "",
        WS_CHILD | WS_VISIBLE | WS_VSCROLL | WS_BORDER | ES_LEFT | ES_MULTILINE | ES_AUTOVSCROLL,
        Rect::default(),
        parent,
        0,
        hinstance,
        "CreateWindowExW (plain edit)",
    )?;
    // SAFETY: hwnd is the EDIT control just created; EM_SETLIMITTEXT only
    // changes its internal limit.
    unsafe {
        let _ = SendMessageW(hwnd, EM_SETLIMITTEXT, WPARAM(0), LPARAM(0));
    }
    Ok(hwnd)
}

pub(crate) fn create_button(
    parent: HWND,
    hinstance: HINSTANCE,
    id: CommandId,
    label: &str,
    rect: Rect,
) -> Result<HWND> {
    create_child(
        "BUTTON",
        label,
        WS_TABSTOP | WS_VISIBLE | WS_CHILD | BS_DEFPUSHBUTTON,
        rect,
        parent,
        id.0,
        hinstance,
        "CreateWindowExW (command button)",
    )
}

/// Replace the text of any window.
pub(crate) fn set_window_text(hwnd: HWND, text: &str) -> Result<()> {
    let wide = to_wide(text);
    // SAFETY: hwnd is a live child window; wide is null-terminated and
    // outlives the call.
    unsafe { SetWindowTextW(hwnd, PCWSTR(wide.as_ptr())) }
        .map_err(|e| InspectorError::win32("SetWindowTextW", e))
}

/// Read the full text of any window.
pub(crate) fn window_text(hwnd: HWND) -> String {
    // SAFETY: hwnd is a live child window; GetWindowTextLengthW only reads.
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    let Ok(len) = usize::try_from(len) else {
        return String::new();
    };
    if len == 0 {
        return String::new();
    }
    let mut buf = vec![0u16; len + 1];
    // SAFETY: buf has room for len characters plus the terminator;
    // GetWindowTextW never writes past the slice length it is given.
    let copied = unsafe { GetWindowTextW(hwnd, &mut buf) };
    let copied = usize::try_from(copied).unwrap_or(0).min(len);
    String::from_utf16_lossy(&buf[..copied])
}
