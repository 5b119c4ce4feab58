//! Wormhole NTT manager `transfer_mint_authority`.
//!
//! The manager is an Anchor program: instruction data is the 8 byte method
//! discriminator followed by the borsh encoded arguments.

use solana_sdk::hash::hashv;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

pub const CONFIG_SEED: &[u8] = b"config";
pub const TOKEN_AUTHORITY_SEED: &[u8] = b"token_authority";

/// First 8 bytes of `sha256("global:<method>")`.
pub fn anchor_discriminator(method: &str) -> [u8; 8] {
    let hash = hashv(&[b"global:".as_slice(), method.as_bytes()]);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash.to_bytes()[..8]);
    discriminator
}

pub fn config_address(ntt_program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[CONFIG_SEED], ntt_program).0
}

/// PDA that holds the mint authority while the manager owns it.
pub fn token_authority_address(ntt_program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[TOKEN_AUTHORITY_SEED], ntt_program).0
}

/// `owner` is the NTT config owner; the manager names this account `payer`.
pub fn transfer_mint_authority_instruction(
    ntt_program: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    new_mint_authority: &Pubkey,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 32);
    data.extend_from_slice(&anchor_discriminator("transfer_mint_authority"));
    data.extend_from_slice(new_mint_authority.as_ref());

    Instruction {
        program_id: *ntt_program,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new_readonly(config_address(ntt_program), false),
            AccountMeta::new_readonly(token_authority_address(ntt_program), false),
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        data,
    }
}
