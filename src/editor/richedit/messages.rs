// ── Rich-edit message constants ───────────────────────────────────────────────
//
// Source of truth: Richedit.h / WinUser.h.
// Only the subset the inspector sends is listed here.
// All EM_* values are sent via SendMessageW(hwnd_rich, EM_*, wparam, lparam).

const WM_USER: u32 = 0x0400;

/// Window class registered by `Msftedit.dll` (`MSFTEDIT_CLASS`).
pub(crate) const MSFTEDIT_CLASS: &str = "RICHEDIT50W";
/// Module that registers `MSFTEDIT_CLASS` when loaded.
pub(crate) const MSFTEDIT_DLL: &str = "Msftedit.dll";

// ── Text limit ────────────────────────────────────────────────────────────────

/// Raise the text limit.  WPARAM=0; LPARAM=new limit in characters.
pub(super) const EM_EXLIMITTEXT: u32 = WM_USER + 53;
/// Largest limit accepted by `EM_EXLIMITTEXT`.
pub(super) const MAX_TEXT_LIMIT: isize = 0x7FFF_FFFE;

// ── Streaming ─────────────────────────────────────────────────────────────────

/// Stream content out through an `EDITSTREAM` callback.
/// WPARAM=format flags; LPARAM=`*mut EDITSTREAM`.
pub(super) const EM_STREAMOUT: u32 = WM_USER + 74;
/// Stream format: RTF markup.
pub(super) const SF_RTF: usize = 0x0002;

// ── Set text ──────────────────────────────────────────────────────────────────

/// Replace content, parsing RTF when the string starts with `{\rtf`.
/// WPARAM=`*const SETTEXTEX`; LPARAM=null-terminated string in `codepage`.
pub(super) const EM_SETTEXTEX: u32 = WM_USER + 97;
/// `SETTEXTEX::flags`: replace everything, reset undo.
pub(super) const ST_DEFAULT: u32 = 0;
/// `SETTEXTEX::codepage` for UTF-8 input.
pub(super) const CP_UTF8: u32 = 65001;
