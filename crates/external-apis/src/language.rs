// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! MARC language code lookup
//!
//! Open Library and WorldCat report languages as three-letter MARC codes. Only
//! English, Spanish and French are mapped; every other code is reported as
//! [`UNKNOWN_LANGUAGE`].

use api_client::UNKNOWN_LANGUAGE;

const OPEN_LIBRARY_LANGUAGE_PREFIX: &str = "/languages/";

/// Map a three-letter MARC language code to a two-letter code
pub fn from_marc_code(code: &str) -> &'static str {
    match code {
        "eng" => "en",
        "spa" => "es",
        "fre" => "fr",
        _ => UNKNOWN_LANGUAGE,
    }
}

/// Map an Open Library language key such as `/languages/eng`
pub fn from_open_library_key(key: &str) -> &'static str {
    key.strip_prefix(OPEN_LIBRARY_LANGUAGE_PREFIX)
        .map_or(UNKNOWN_LANGUAGE, from_marc_code)
}
