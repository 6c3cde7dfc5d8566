//! Random codes handed out to users.
//!
//! Invitation codes are 10 random bytes encoded as unpadded base32, which
//! yields 16 characters from `A-Z2-7`. One-time passwords are drawn from
//! `0-9A-Z`.

use data_encoding::BASE32_NOPAD;
use rand::{Rng as _, RngCore};

/// Number of random bytes behind an invitation code.
pub const INVITATION_CODE_BYTES: usize = 10;

/// Length of an encoded invitation code.
pub const INVITATION_CODE_LEN: usize = 16;

/// Generate an invitation code.
pub fn generate_invitation_code() -> String {
    let mut bytes = [0u8; INVITATION_CODE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    BASE32_NOPAD.encode(&bytes)
}

/// Generate a one-time password of `len` characters.
pub fn generate_one_time_password(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..36u8);
            if idx < 10 {
                (b'0' + idx) as char
            } else {
                (b'A' + (idx - 10)) as char
            }
        })
        .collect()
}
