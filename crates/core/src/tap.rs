// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Beer style tags attached to records

use serde::{Deserialize, Serialize};

/// Known tap styles. Anything else coerces to [`Tap::Craft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tap {
    Ipa,
    Apa,
    Stout,
    Porter,
    Lager,
    Pilsner,
    Amber,
    Sour,
    Craft,
}

impl Tap {
    /// Parse optional user input. Absent or unrecognized styles fall back to
    /// the default craft tag.
    pub fn from_input(input: Option<&str>) -> Self {
        input.and_then(Self::parse).unwrap_or(Tap::Craft)
    }

    /// Strict, case-insensitive parse of a style token.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "ipa" => Some(Tap::Ipa),
            "apa" => Some(Tap::Apa),
            "stout" => Some(Tap::Stout),
            "porter" => Some(Tap::Porter),
            "lager" => Some(Tap::Lager),
            "pilsner" => Some(Tap::Pilsner),
            "amber" => Some(Tap::Amber),
            "sour" => Some(Tap::Sour),
            "craft" => Some(Tap::Craft),
            _ => None,
        }
    }

    /// The token written between brackets in the serialized line.
    pub fn token(&self) -> &'static str {
        match self {
            Tap::Ipa => "ipa",
            Tap::Apa => "apa",
            Tap::Stout => "stout",
            Tap::Porter => "porter",
            Tap::Lager => "lager",
            Tap::Pilsner => "pilsner",
            Tap::Amber => "amber",
            Tap::Sour => "sour",
            Tap::Craft => "craft",
        }
    }

    /// All known styles, for CLI help and validation messages.
    pub fn all() -> &'static [Tap] {
        &[
            Tap::Ipa,
            Tap::Apa,
            Tap::Stout,
            Tap::Porter,
            Tap::Lager,
            Tap::Pilsner,
            Tap::Amber,
            Tap::Sour,
            Tap::Craft,
        ]
    }
}

impl std::fmt::Display for Tap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
#[path = "tap_tests.rs"]
mod tests;
