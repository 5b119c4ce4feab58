//! SPL Token authority instructions and mint state.

use anyhow::Context;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use spl_token::instruction::AuthorityType;
use spl_token::solana_program::program_option::COption;
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::Mint;

/// Which mint authority a `SetAuthority` call replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintAuthorityKind {
    Freeze,
    Mint,
}

impl MintAuthorityKind {
    fn authority_type(&self) -> AuthorityType {
        match self {
            MintAuthorityKind::Freeze => AuthorityType::FreezeAccount,
            MintAuthorityKind::Mint => AuthorityType::MintTokens,
        }
    }

    /// Reads this authority from an unpacked mint.
    pub fn current(&self, mint: &Mint) -> COption<Pubkey> {
        match self {
            MintAuthorityKind::Freeze => mint.freeze_authority,
            MintAuthorityKind::Mint => mint.mint_authority,
        }
    }
}

pub fn set_authority_instruction(
    kind: MintAuthorityKind,
    mint: &Pubkey,
    new_authority: &Pubkey,
    current_authority: &Pubkey,
) -> anyhow::Result<Instruction> {
    spl_token::instruction::set_authority(
        &spl_token::id(),
        mint,
        Some(new_authority),
        kind.authority_type(),
        current_authority,
        &[],
    )
    .context("Failed to build SPL Token SetAuthority instruction")
}

pub fn unpack_mint(data: &[u8]) -> anyhow::Result<Mint> {
    Mint::unpack(data).context("Account data is not an initialized SPL Token mint")
}
