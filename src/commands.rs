// ── Built-in inspector commands ───────────────────────────────────────────────
//
// The buttons every inspector window starts with.  Installed by `main` right
// after the window is live; ordering here is the on-screen stacking order.

use tracing::{info, warn};

use crate::{
    app::Controller,
    editor::looks_like_rtf,
    error::Result,
    platform::Surface,
    ui::command::CommandId,
};

/// Bump the counter shown in the status label.
pub(crate) const CMD_INCREMENT: CommandId = CommandId::user(1);
/// Load the plain-text pane's RTF markup into the rich-text pane.
pub(crate) const CMD_RENDER_RTF: CommandId = CommandId::user(2);
/// Copy the rich-text pane's RTF source into the plain-text pane.
pub(crate) const CMD_SHOW_SOURCE: CommandId = CommandId::user(3);

const NOT_RTF: &str = "Plain text pane does not contain RTF";

/// Register the built-in commands on a live controller.
pub(crate) fn install<S: Surface + 'static>(c: &mut Controller<S>) -> Result<()> {
    let mut count: i64 = 0;
    c.register_command(CMD_INCREMENT, "Increment", move |c| {
        count += 1;
        c.update_status(count);
    })?;

    c.register_command(CMD_RENDER_RTF, "Render RTF", render_rtf::<S>)?;
    c.register_command(CMD_SHOW_SOURCE, "Show RTF source", show_source::<S>)?;

    info!("built-in commands installed");
    Ok(())
}

fn render_rtf<S: Surface>(c: &mut Controller<S>) {
    let source = match c.plain_text() {
        Ok(s) => s,
        Err(e) => return report(c, "read plain text", &e),
    };
    if !looks_like_rtf(&source) {
        c.update_status(NOT_RTF);
        return;
    }
    match c.set_rich_text_rtf(&source) {
        Ok(()) => c.update_status(format!("Rendered {} bytes of RTF", source.len())),
        Err(e) => report(c, "render RTF", &e),
    }
}

fn show_source<S: Surface>(c: &mut Controller<S>) {
    let rtf = match c.rich_text_rtf() {
        Ok(s) => s,
        Err(e) => return report(c, "stream out RTF", &e),
    };
    match c.set_plain_text(&rtf) {
        Ok(()) => c.update_status(format!("Captured {} bytes of RTF", rtf.len())),
        Err(e) => report(c, "write plain text", &e),
    }
}

fn report<S: Surface>(c: &mut Controller<S>, action: &str, e: &crate::error::InspectorError) {
    warn!(error = %e, "failed to {action}");
    c.update_status(format!("Failed to {action}: {e}"));
}
