// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface the controller uses to talk to the OS.
// No `unsafe` lives here; all Win32 FFI is confined to the `win32`
// sub-module (and `editor::richedit`) and never leaks outward.

#[cfg(windows)]
pub mod win32;

use crate::{
    error::Result,
    ui::{
        command::CommandId,
        layout::{Rect, Size},
    },
};

/// The three built-in child controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pane {
    Status,
    RichText,
    PlainText,
}

/// Everything the controller needs from a host window.
///
/// Implemented by `win32::window::Win32Surface` for the real window and by a
/// recording fake in the controller tests.
pub(crate) trait Surface {
    /// Create the status label (showing `initial_status`), the rich-text pane
    /// and the plain-text pane.  Called exactly once, while constructing.
    fn create_builtin_controls(&mut self, status: Rect, initial_status: &str) -> Result<()>;

    /// Current client-area size of the top-level window.
    fn client_size(&self) -> Result<Size>;

    /// Move and resize one of the built-in panes.
    fn place(&mut self, pane: Pane, rect: Rect) -> Result<()>;

    /// Create a push button with control id `id`.
    fn create_button(&mut self, id: CommandId, label: &str, rect: Rect) -> Result<()>;

    /// Replace the text shown by `pane`.
    fn set_text(&mut self, pane: Pane, text: &str) -> Result<()>;

    /// Read the text currently shown by `pane`.
    fn text(&self, pane: Pane) -> Result<String>;

    /// Serialize the rich-text pane's content as RTF.
    fn rich_text_rtf(&self) -> Result<String>;

    /// Replace the rich-text pane's content with parsed `rtf` markup.
    fn set_rich_text_rtf(&mut self, rtf: &str) -> Result<()>;

    /// Ask the event loop to terminate.
    fn request_quit(&mut self);
}
