//! Resource identifier generation.

use rand::RngCore;
use rand::rngs::OsRng;

/// Number of random bytes behind each identifier.
const KEY_BYTES: usize = 8;

/// Generates a fresh 16-character hexadecimal identifier.
///
/// # Panics
///
/// Panics if the OS entropy source fails. A broken entropy source is an
/// environment defect, not a request-level error, so the in-flight operation
/// is aborted rather than handed a `Result` it might be tempted to retry.
pub fn make_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .unwrap_or_else(|err| panic!("entropy source failure: {err}"));
    hex::encode(bytes)
}
