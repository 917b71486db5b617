// ── Platform-independent UI state ─────────────────────────────────────────────
//
// Pure Rust: geometry, the command table and status rendering.  No Win32
// calls here; everything that touches a window goes through
// `platform::Surface`.

pub(crate) mod command;
pub(crate) mod layout;
pub(crate) mod status;
