// ── Configuration ─────────────────────────────────────────────────────────────
//
// Reads the optional `inspector.json` that sits next to the executable.
// Read-only: nothing is ever written back.  No `unsafe`: pure safe Rust +
// serde_json.

use std::{fs, io, path::PathBuf};

use serde::Deserialize;

use crate::{error::Result, ui::layout::LayoutMetrics};

/// File name looked up in the executable's directory.
pub(crate) const CONFIG_FILE_NAME: &str = "inspector.json";

/// Root of the JSON config file.  Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct InspectorConfig {
    /// Title bar text.
    pub(crate) title: String,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"debug"`.
    pub(crate) log_filter: String,
    pub(crate) layout: LayoutMetrics,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            title: "RTF Inspector".to_owned(),
            log_filter: "info".to_owned(),
            layout: LayoutMetrics::default(),
        }
    }
}

/// `<exe dir>\inspector.json`, or `None` if the executable path is unknown.
pub(crate) fn config_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(CONFIG_FILE_NAME))
}

/// Load the config file.
///
/// A missing file (or unknown executable location) yields the defaults; a file
/// that exists but cannot be read or parsed is an error, which `main` logs
/// before falling back to the defaults.
pub(crate) fn load() -> Result<InspectorConfig> {
    let Some(path) = config_path() else {
        return Ok(InspectorConfig::default());
    };
    match fs::read(&path) {
        Ok(data) => parse(&data),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(InspectorConfig::default()),
        Err(e) => Err(e.into()),
    }
}

fn parse(data: &[u8]) -> Result<InspectorConfig> {
    Ok(serde_json::from_slice(data)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
