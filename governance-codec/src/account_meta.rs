//! Fixed-width encoding of a single instruction account.
//!
//! | field       | size (bytes) |
//! |-------------+--------------|
//! | pubkey      |           32 |
//! | is_signer   |            1 |
//! | is_writable |            1 |
//!
//! Both governance protocols use this signer-then-writable order.

use solana_program::instruction::AccountMeta;
use solana_program::pubkey::Pubkey;

use crate::error::{CodecError, Result};
use crate::primitives::{checked_u16, write_u16, Reader};

/// Serialized AccountMeta length (32 + 1 + 1)
pub const SERIALIZED_ACCOUNT_LEN: usize = 34;

pub fn encode_account(account: &AccountMeta) -> [u8; SERIALIZED_ACCOUNT_LEN] {
    let mut out = [0u8; SERIALIZED_ACCOUNT_LEN];
    out[..32].copy_from_slice(account.pubkey.as_ref());
    out[32] = account.is_signer as u8;
    out[33] = account.is_writable as u8;
    out
}

/// Decodes the account stored in the first 34 bytes of `bytes`.
pub fn decode_account(bytes: &[u8]) -> Result<AccountMeta> {
    if bytes.len() < SERIALIZED_ACCOUNT_LEN {
        return Err(CodecError::MalformedInput {
            expected: SERIALIZED_ACCOUNT_LEN,
            got: bytes.len(),
        });
    }

    let mut pubkey = [0u8; 32];
    pubkey.copy_from_slice(&bytes[..32]);

    Ok(AccountMeta {
        pubkey: Pubkey::new_from_array(pubkey),
        is_signer: bytes[32] != 0,
        is_writable: bytes[33] != 0,
    })
}

/// Writes the u16 account count followed by every account entry.
pub(crate) fn write_accounts(out: &mut Vec<u8>, accounts: &[AccountMeta]) -> Result<()> {
    write_u16(out, checked_u16("account count", accounts.len())?);
    for account in accounts {
        out.extend_from_slice(&encode_account(account));
    }
    Ok(())
}

/// Reads the u16 account count and that many entries.
///
/// The whole account region is length-checked before any entry is decoded.
pub(crate) fn read_accounts(reader: &mut Reader<'_>) -> Result<Vec<AccountMeta>> {
    let count = reader.read_u16()? as usize;
    let region = reader.take(count * SERIALIZED_ACCOUNT_LEN)?;

    region
        .chunks_exact(SERIALIZED_ACCOUNT_LEN)
        .map(decode_account)
        .collect()
}
