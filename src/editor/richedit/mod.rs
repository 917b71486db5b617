// ── Rich-edit child-window hosting ────────────────────────────────────────────
//
// This is one of exactly two modules where `unsafe` is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment.
//
// ── DLL ownership model ───────────────────────────────────────────────────────
//
// `load_library()` performs the single `LoadLibraryW` call for
// `Msftedit.dll`.  It runs once, together with window-class registration, and
// the module is never freed: the `RICHEDIT50W` class must outlive every
// window that might use it, which is the whole process.

#![allow(unsafe_code)]

pub mod messages;

use messages::{
    CP_UTF8, EM_EXLIMITTEXT, EM_SETTEXTEX, EM_STREAMOUT, MAX_TEXT_LIMIT, MSFTEDIT_CLASS,
    MSFTEDIT_DLL, SF_RTF, ST_DEFAULT,
};

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{HINSTANCE, HWND, LPARAM, WPARAM},
        System::LibraryLoader::LoadLibraryW,
        UI::WindowsAndMessaging::{
            SendMessageW, WS_BORDER, WS_CHILD, WS_TABSTOP, WS_VISIBLE, WS_VSCROLL,
        },
    },
};

use crate::{
    error::{InspectorError, Result},
    platform::win32::controls::{self, to_wide, ES_MULTILINE},
    ui::layout::Rect,
};

// ── FFI structs (Richedit.h) ──────────────────────────────────────────────────

type EditStreamCallback =
    unsafe extern "system" fn(cookie: usize, buf: *mut u8, cb: i32, pcb: *mut i32) -> u32;

/// `EDITSTREAM`.  Richedit.h packs its structs to 4 bytes.
#[repr(C, packed(4))]
struct EditStream {
    cookie: usize,
    error: u32,
    callback: Option<EditStreamCallback>,
}

/// `SETTEXTEX`.
#[repr(C)]
struct SetTextEx {
    flags: u32,
    codepage: u32,
}

// ── Library ───────────────────────────────────────────────────────────────────

/// Load `Msftedit.dll`, registering the `RICHEDIT50W` window class.
///
/// The module handle is intentionally not kept: the library stays mapped for
/// the rest of the process.
pub(crate) fn load_library() -> Result<()> {
    let name = to_wide(MSFTEDIT_DLL);
    // SAFETY: name is a valid null-terminated UTF-16 string.
    // LoadLibraryW searches the system directory for this known DLL.
    unsafe { LoadLibraryW(PCWSTR(name.as_ptr())) }
        .map_err(|e| InspectorError::win32("LoadLibraryW (Msftedit.dll)", e))?;
    Ok(())
}

// ── RichEditView ──────────────────────────────────────────────────────────────

/// The hosted rich-text pane.
///
/// The child `HWND` is destroyed automatically by Windows when the parent is
/// destroyed; no explicit cleanup is needed.
pub(crate) struct RichEditView {
    hwnd: HWND,
}

impl RichEditView {
    /// Create a visible, scrollable rich-edit child inside `hwnd_parent`.
    ///
    /// `load_library()` must have succeeded first.  Created with zero size;
    /// the first layout pass positions it.
    pub(crate) fn create(hwnd_parent: HWND, hinstance: HINSTANCE) -> Result<Self> {
        let hwnd = controls::create_child(
            MSFTEDIT_CLASS,
            "",
            ES_MULTILINE | WS_VISIBLE | WS_CHILD | WS_BORDER | WS_TABSTOP | WS_VSCROLL,
            Rect::default(),
            hwnd_parent,
            0,
            hinstance,
            "CreateWindowExW (rich edit)",
        )?;

        // SAFETY: hwnd is a valid rich-edit window.  EM_EXLIMITTEXT only
        // changes the control's internal limit.
        unsafe {
            let _ = SendMessageW(hwnd, EM_EXLIMITTEXT, WPARAM(0), LPARAM(MAX_TEXT_LIMIT));
        }

        Ok(Self { hwnd })
    }

    /// The rich-edit child window handle.  Valid until the parent is destroyed.
    pub(crate) fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Replace the content with `rtf`, which the control parses as markup.
    pub(crate) fn set_rtf(&self, rtf: &str) -> Result<()> {
        let mut buf: Vec<u8> = Vec::with_capacity(rtf.len() + 1);
        buf.extend_from_slice(rtf.as_bytes());
        buf.push(0);
        let params = SetTextEx {
            flags: ST_DEFAULT,
            codepage: CP_UTF8,
        };
        // SAFETY: hwnd valid; params and buf are live for the duration of the
        // synchronous SendMessageW.  buf is null-terminated UTF-8, matching
        // the declared code page.
        let ok = unsafe {
            SendMessageW(
                self.hwnd,
                EM_SETTEXTEX,
                WPARAM(&params as *const SetTextEx as usize),
                LPARAM(buf.as_ptr() as isize),
            )
        };
        if ok.0 == 0 {
            return Err(InspectorError::Win32 {
                function: "EM_SETTEXTEX",
                code: 0,
            });
        }
        Ok(())
    }

    /// Serialize the whole document as RTF.
    pub(crate) fn rtf(&self) -> Result<String> {
        let mut out: Vec<u8> = Vec::new();
        let mut stream = EditStream {
            cookie: &mut out as *mut Vec<u8> as usize,
            error: 0,
            callback: Some(collect_chunk),
        };
        // SAFETY: hwnd valid; stream and out outlive the synchronous
        // SendMessageW, during which the control calls collect_chunk with
        // our cookie on this thread.
        unsafe {
            let _ = SendMessageW(
                self.hwnd,
                EM_STREAMOUT,
                WPARAM(SF_RTF),
                LPARAM(&mut stream as *mut EditStream as isize),
            );
        }
        let error = stream.error;
        if error != 0 {
            return Err(InspectorError::Win32 {
                function: "EM_STREAMOUT",
                code: error,
            });
        }
        // RTF is 7-bit; anything else came from a non-conforming writer.
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// `EDITSTREAMCALLBACK` for `EM_STREAMOUT`: append `cb` bytes to the
/// `Vec<u8>` named by `cookie`.
unsafe extern "system" fn collect_chunk(cookie: usize, buf: *mut u8, cb: i32, pcb: *mut i32) -> u32 {
    let len = usize::try_from(cb).unwrap_or(0);
    // SAFETY: cookie is the `*mut Vec<u8>` set by `RichEditView::rtf`, which
    // is still on the stack; buf points at `cb` readable bytes owned by the
    // control for the duration of this call; pcb is a valid out-pointer.
    unsafe {
        let out = &mut *(cookie as *mut Vec<u8>);
        if len > 0 {
            out.extend_from_slice(std::slice::from_raw_parts(buf, len));
        }
        *pcb = cb;
    }
    0
}
