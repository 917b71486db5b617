// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32`  – Win32 / WinAPI FFI
//   • `editor::richedit` – rich-edit child-window hosting
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]
// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that log output is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// Only the tests drive the platform-independent core on other hosts.
#![cfg_attr(not(windows), allow(dead_code))]

mod app;
mod commands;
mod config;
mod editor;
mod error;
mod platform;
mod ui;

use tracing_subscriber::EnvFilter;

use crate::config::InspectorConfig;

/// Load the config and install the global subscriber.
///
/// The subscriber's filter comes from the config, so a config error can only
/// be logged once the defaults are in place.
fn init() -> InspectorConfig {
    let (config, problem) = match config::load() {
        Ok(c) => (c, None),
        Err(e) => (InspectorConfig::default(), Some(e)),
    };

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(e) = problem {
        tracing::warn!(error = %e, "ignoring {}", config::CONFIG_FILE_NAME);
    }
    config
}

#[cfg(windows)]
fn main() {
    use platform::win32::window;

    let config = init();
    if let Err(e) = run(&config) {
        // Startup failed before or during the message loop.
        window::fatal(&e);
    }
}

#[cfg(windows)]
fn run(config: &InspectorConfig) -> error::Result<()> {
    use platform::win32::{dpi, window::InspectorWindow};
    use windows::Win32::{
        Foundation::HINSTANCE, System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::SW_SHOWDEFAULT,
    };

    #[cfg(debug_assertions)]
    let t0 = std::time::Instant::now();

    dpi::init();

    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // always valid for the process lifetime.
    #[allow(unsafe_code)]
    let hmodule = unsafe { GetModuleHandleW(None) }
        .map_err(|e| error::InspectorError::win32("GetModuleHandleW", e))?;
    let hinstance = HINSTANCE(hmodule.0);

    let window = InspectorWindow::create(hinstance, SW_SHOWDEFAULT, config)?;
    window.with_controller(commands::install)?;

    #[cfg(debug_assertions)]
    tracing::debug!(
        elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0,
        hwnd = ?window.handle(),
        "window visible"
    );

    window.run()
}

#[cfg(not(windows))]
fn main() {
    let _config = init();
    tracing::error!("the RTF inspector needs a Windows host");
    std::process::exit(1);
}
