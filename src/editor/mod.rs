// ── Rich-edit component abstraction ───────────────────────────────────────────
//
// Exposes a safe Rust API over the host's rich-edit control.  Callers go
// through `platform::Surface`; they never touch the control's HWND directly.
// RTF parsing and rendering are entirely the control's job.

#[cfg(windows)]
pub mod richedit;

/// Every RTF document opens with this control word.
pub(crate) const RTF_SIGNATURE: &str = r"{\rtf";

/// `true` when `text` starts, after leading whitespace, with `{\rtf`.
pub(crate) fn looks_like_rtf(text: &str) -> bool {
    text.trim_start().starts_with(RTF_SIGNATURE)
}
