//! Content hashes of binary payloads.

use alloy_primitives::hex;
use md5::{Digest, Md5};

/// Returns the lower-case hex MD5 digest of `data`.
///
/// Signed messages carry this digest in place of the payload itself.
pub fn content_md5(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}
