// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Bibliographic provider identifiers
//!
//! This module provides the fixed set of metadata providers the resolver knows
//! about, along with their canonical names and default priority.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Supported bibliographic metadata providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    /// Google Books volumes API
    Google,
    /// Open Library books API
    OpenLibrary,
    /// WorldCat xISBN web service
    WorldCat,
    /// ISBNdb commercial database (requires an API key)
    IsbnDb,
}

impl ProviderId {
    /// Returns the canonical lowercase name used to select this provider
    pub const fn name(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenLibrary => "openlibrary",
            Self::WorldCat => "worldcat",
            Self::IsbnDb => "isbndb",
        }
    }

    /// Returns every known provider in default priority order
    pub const fn all() -> &'static [Self] {
        &[Self::Google, Self::OpenLibrary, Self::WorldCat, Self::IsbnDb]
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl FromStr for ProviderId {
    type Err = ProviderIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|provider| provider.name() == s)
            .ok_or_else(|| ProviderIdParseError(s.to_string()))
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Self::from_str(&name).map_err(serde::de::Error::custom)
    }
}

/// Error type for provider name parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported provider: {0}. Supported providers are: google, openlibrary, worldcat, isbndb")]
pub struct ProviderIdParseError(pub String);
