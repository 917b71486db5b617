// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations return `error::Result<T>`.  Setup-time failures are
// fatal: `main` reports them in a dialog and exits (see
// `platform::win32::window::fatal`).

use thiserror::Error;

/// Every error the inspector can produce.
#[derive(Debug, Error)]
pub enum InspectorError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// A standard I/O error (reading the config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `inspector.json` exists but does not parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Command id 0 belongs to the built-in child controls.
    #[error("command id 0 is reserved for built-in controls")]
    ReservedCommandId,

    /// The operation needs the child controls, which do not exist yet (or
    /// no longer exist).
    #[error("window is not live (phase: {0:?})")]
    NotLive(crate::app::Phase),
}

// Convert a windows-crate error (HRESULT) directly into an InspectorError so
// that `?` can be used on `windows::core::Result<T>` in the platform modules.
#[cfg(windows)]
impl From<windows::core::Error> for InspectorError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        // Win32 errors appear as 0x8007xxxx HRESULTs.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

#[cfg(windows)]
impl InspectorError {
    /// Attach the failing function's name to a windows-crate error.
    pub(crate) fn win32(function: &'static str, e: windows::core::Error) -> Self {
        Self::Win32 {
            function,
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InspectorError>;
