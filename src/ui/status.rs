// ── Status label content ──────────────────────────────────────────────────────

use std::fmt;

/// A value shown in the status label: a counter or arbitrary short text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StatusValue {
    Count(i64),
    Text(String),
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! count_from {
    ($($t:ty),*) => {
        $(impl From<$t> for StatusValue {
            fn from(n: $t) -> Self {
                Self::Count(i64::from(n))
            }
        })*
    };
}

count_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for StatusValue {
    fn from(n: usize) -> Self {
        // Saturate: a counter this large is not meaningful to display exactly.
        Self::Count(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for StatusValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for StatusValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
