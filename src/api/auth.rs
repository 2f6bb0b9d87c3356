//! Credentials check for the processing endpoint.

use crate::config::AuthConfig;

/// Returns true if `supplied` matches `<user>+<password>` exactly.
///
/// A missing value never matches.
pub fn credentials_match(auth: &AuthConfig, supplied: Option<&str>) -> bool {
    let Some(supplied) = supplied else {
        return false;
    };
    let expected = auth.expected_credentials();

    // Constant-time over the common length.
    expected.len() == supplied.len()
        && expected
            .bytes()
            .zip(supplied.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
