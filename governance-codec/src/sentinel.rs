//! Placeholder ("sentinel") public keys.
//!
//! A sentinel stands in for an account whose address is only known when the
//! payload is executed (payer, governance owner, CPI authority, ...). It is the
//! ASCII name written from byte 0 and zero-padded to 32 bytes, and is swapped
//! for the concrete key at decode time by exact byte match.

use solana_program::pubkey::Pubkey;

use crate::error::{CodecError, Result};

pub const MAX_SENTINEL_NAME_LEN: usize = 32;

/// Builds a sentinel key at compile time.
///
/// Names longer than 32 bytes fail const evaluation; use [`sentinel_address`]
/// for names that are not known statically.
pub const fn sentinel_pubkey(name: &[u8]) -> Pubkey {
    let mut output = [0u8; 32];

    let mut i = 0;
    while i < name.len() {
        output[i] = name[i];
        i += 1;
    }

    Pubkey::new_from_array(output)
}

pub fn sentinel_address(name: &str) -> Result<Pubkey> {
    if name.len() > MAX_SENTINEL_NAME_LEN {
        return Err(CodecError::NameTooLong { len: name.len() });
    }
    Ok(sentinel_pubkey(name.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_right_zero_padded() {
        let key = sentinel_address("payer").unwrap();
        let bytes = key.to_bytes();
        assert_eq!(&bytes[..5], b"payer");
        assert!(bytes[5..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_sentinel_name_of_32_bytes_is_accepted() {
        let name = "a".repeat(32);
        assert_eq!(sentinel_address(&name).unwrap().to_bytes(), [b'a'; 32]);
    }

    #[test]
    fn test_sentinel_name_too_long() {
        let name = "a".repeat(33);
        assert_eq!(
            sentinel_address(&name).unwrap_err(),
            CodecError::NameTooLong { len: 33 }
        );
    }
}
