// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation of local photo ids and public share codes.

use crate::traits::RandomSource;

/// Length of a public share code.
pub const SHARE_CODE_LEN: usize = 6;

const SHARE_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random suffix length of a local photo id.
const ID_SUFFIX_LEN: usize = 7;

/// Generates a share code of [`SHARE_CODE_LEN`] uppercase alphanumerics.
pub fn generate_share_code(rng: &dyn RandomSource) -> String {
    pick(rng, SHARE_CODE_ALPHABET, SHARE_CODE_LEN)
}

/// Generates a local photo id of the form `photo_{millis}_{base36}`.
pub fn generate_photo_id(rng: &dyn RandomSource, now_millis: i64) -> String {
    format!(
        "photo_{now_millis}_{}",
        pick(rng, BASE36_ALPHABET, ID_SUFFIX_LEN)
    )
}

/// True when `code` has the share-code shape `[A-Z0-9]{6}`.
pub fn is_valid_share_code(code: &str) -> bool {
    code.len() == SHARE_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn pick(rng: &dyn RandomSource, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.next_index(alphabet.len())] as char)
        .collect()
}
