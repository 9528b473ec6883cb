use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//
// ─── STYLE ─────────────────────────────────────────────────────────────────────
//

/// The four behavioral categories a respondent is classified into.
///
/// Declaration order is significant: ties between dominant styles and chart
/// slices are always listed in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Style {
    Driver,
    Analytical,
    Amiable,
    Expressive,
}

impl Style {
    /// Every style, in declaration order.
    pub const ALL: [Style; 4] = [
        Style::Driver,
        Style::Analytical,
        Style::Amiable,
        Style::Expressive,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Driver => "Driver",
            Style::Analytical => "Analytical",
            Style::Amiable => "Amiable",
            Style::Expressive => "Expressive",
        }
    }

    /// Position of this style within `Style::ALL`.
    #[must_use]
    pub(crate) fn position(self) -> usize {
        match self {
            Style::Driver => 0,
            Style::Analytical => 1,
            Style::Amiable => 2,
            Style::Expressive => 3,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a `Style` from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStyleError {
    raw: String,
}

impl fmt::Display for ParseStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown style: {}", self.raw)
    }
}

impl std::error::Error for ParseStyleError {}

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStyleError { raw: s.to_string() })
    }
}
