// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Byte-per-character text mapping for binary payloads
//!
//! Every byte `b` becomes the code point `U+00b`, so a byte stream survives a
//! trip through a JSON string without base64 expansion. Clients reverse the
//! mapping by taking each character's code point as a byte.

/// Map raw bytes to a string, one character per byte
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Reverse [`encode`]
///
/// Returns `None` if the string contains a character above `U+00FF`, which
/// cannot have come from a single byte.
pub fn decode(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(c).ok()).collect()
}
