// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Ordered provider lists
//!
//! A [`ProviderOrder`] is the sequence in which providers are consulted for a
//! single resolution. It is never empty and never contains duplicates.

use std::{fmt, slice};

use serde::{Deserialize, Serialize};

use crate::providers::ProviderId;

/// Errors raised while validating a caller-supplied provider list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The list names a provider outside the known set
    #[error(
        "unsupported provider '{name}'. Supported providers are: google, openlibrary, worldcat, isbndb"
    )]
    UnknownProvider {
        /// The rejected provider name
        name: String,
    },
}

/// Non-empty, duplicate-free sequence of providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ProviderId>", into = "Vec<ProviderId>")]
pub struct ProviderOrder(Vec<ProviderId>);

impl ProviderOrder {
    /// The built-in order: every known provider by default priority
    pub fn default_order() -> Self {
        Self(ProviderId::all().to_vec())
    }

    /// Build an order from typed identifiers, keeping the first occurrence of
    /// each provider
    ///
    /// Returns `None` when `providers` is empty.
    pub fn from_ids(providers: impl IntoIterator<Item = ProviderId>) -> Option<Self> {
        let mut order: Vec<ProviderId> = Vec::new();
        for provider in providers {
            if !order.contains(&provider) {
                order.push(provider);
            }
        }

        if order.is_empty() { None } else { Some(Self(order)) }
    }

    /// Validate a list of provider names
    ///
    /// Every entry must name a known provider. Duplicates collapse to their
    /// first occurrence.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(order))` for a non-empty valid list
    /// * `Ok(None)` for an empty list
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownProvider`] for the first unknown name
    pub fn parse<I, S>(names: I) -> Result<Option<Self>, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let providers = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                name.parse::<ProviderId>()
                    .map_err(|_| ValidationError::UnknownProvider {
                        name: name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_ids(providers))
    }

    /// Keep only the providers present in `available`, preserving order
    ///
    /// Returns `None` when nothing remains.
    pub fn restricted_to(&self, available: &[ProviderId]) -> Option<Self> {
        Self::from_ids(self.0.iter().copied().filter(|p| available.contains(p)))
    }

    /// The providers in priority order
    pub fn as_slice(&self) -> &[ProviderId] {
        &self.0
    }

    /// Iterate over the providers in priority order
    pub fn iter(&self) -> slice::Iter<'_, ProviderId> {
        self.0.iter()
    }

    /// Number of providers in the order
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the order is empty; never true for a constructed order
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ProviderOrder {
    fn default() -> Self {
        Self::default_order()
    }
}

impl<'a> IntoIterator for &'a ProviderOrder {
    type Item = &'a ProviderId;
    type IntoIter = slice::Iter<'a, ProviderId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<ProviderId>> for ProviderOrder {
    type Error = String;

    fn try_from(value: Vec<ProviderId>) -> Result<Self, Self::Error> {
        Self::from_ids(value).ok_or_else(|| "provider order cannot be empty".to_string())
    }
}

impl From<ProviderOrder> for Vec<ProviderId> {
    fn from(value: ProviderOrder) -> Self {
        value.0
    }
}

impl fmt::Display for ProviderOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, provider) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(provider.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_lists_every_provider() {
        let order = ProviderOrder::default();
        assert_eq!(order.as_slice(), ProviderId::all());
        assert_eq!(order.to_string(), "google -> openlibrary -> worldcat -> isbndb");
    }

    #[test]
    fn empty_list_is_none() {
        let order = ProviderOrder::parse(Vec::<String>::new()).unwrap();
        assert!(order.is_none());
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let order = ProviderOrder::parse(["worldcat", "google", "worldcat", "google"])
            .unwrap()
            .unwrap();
        assert_eq!(
            order.as_slice(),
            &[ProviderId::WorldCat, ProviderId::Google]
        );

        let order = ProviderOrder::parse(["google", "google"]).unwrap().unwrap();
        assert_eq!(order.as_slice(), &[ProviderId::Google]);
    }

    #[test]
    fn unknown_name_fails_validation() {
        let error = ProviderOrder::parse(["google", "bogus"]).unwrap_err();
        assert_eq!(
            error,
            ValidationError::UnknownProvider {
                name: "bogus".to_string()
            }
        );
    }

    #[test]
    fn typed_identifiers_are_accepted() {
        let order = ProviderOrder::parse([ProviderId::OpenLibrary, ProviderId::Google])
            .unwrap()
            .unwrap();
        assert_eq!(
            order.as_slice(),
            &[ProviderId::OpenLibrary, ProviderId::Google]
        );
    }

    #[test]
    fn restriction_preserves_order() {
        let order = ProviderOrder::default();
        let restricted = order
            .restricted_to(&[ProviderId::WorldCat, ProviderId::Google])
            .unwrap();
        assert_eq!(
            restricted.as_slice(),
            &[ProviderId::Google, ProviderId::WorldCat]
        );

        assert!(
            ProviderOrder::from_ids([ProviderId::IsbnDb])
                .unwrap()
                .restricted_to(&[ProviderId::Google])
                .is_none()
        );
    }

    #[test]
    fn serde_rejects_empty_order() {
        let order: ProviderOrder = serde_json::from_str(r#"["openlibrary","google"]"#).unwrap();
        assert_eq!(order.len(), 2);
        assert!(serde_json::from_str::<ProviderOrder>("[]").is_err());
    }
}
