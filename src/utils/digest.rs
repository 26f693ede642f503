//! Request-signing digest used by the SendCloud SMS API.
//!
//! MD5 is kept only because the vendor verifies signatures with it. Do not use
//! it to authenticate anything new.

use md5::{Digest, Md5};

/// Lowercase hex MD5 of `input` (32 characters)
pub fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}
