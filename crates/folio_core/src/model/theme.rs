//! Light/dark display preference.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Process-wide display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    /// Used whenever nothing valid is persisted.
    #[default]
    Dark,
}

/// Toggle icon shown for a theme. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    Sun,
    Moon,
}

impl Theme {
    /// Persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses the persisted string form. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn icon(self) -> ThemeIcon {
        match self {
            Self::Light => ThemeIcon::Sun,
            Self::Dark => ThemeIcon::Moon,
        }
    }

    /// Whether the styling root should carry the `dark` class.
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for theme names that are neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl Display for UnknownTheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown theme `{}`; expected light|dark", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(&value.to_ascii_lowercase()).ok_or_else(|| UnknownTheme(value.to_string()))
    }
}

impl ThemeIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
        }
    }
}
