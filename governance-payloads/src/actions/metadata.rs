//! Metaplex token metadata `Update` signed by the current update authority.
//!
//! The metadata crate may resolve to a different `Pubkey` type than the SDK,
//! so keys cross the boundary as raw bytes.

use anyhow::Context;
use mpl_token_metadata::accounts::Metadata;
use mpl_token_metadata::instructions::UpdateAsUpdateAuthorityV2Builder;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

pub fn metadata_program_id() -> Pubkey {
    Pubkey::new_from_array(mpl_token_metadata::ID.to_bytes())
}

/// Metadata PDA of `mint`: `["metadata", program, mint]`.
pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    let (address, _) = Metadata::find_pda(&mint.to_bytes().into());
    Pubkey::new_from_array(address.to_bytes())
}

/// Moves the update authority of `mint`'s metadata to `new_authority`.
///
/// Every other metadata field is left as is.
pub fn update_authority_instruction(
    mint: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
    new_authority: &Pubkey,
) -> Instruction {
    let instruction = UpdateAsUpdateAuthorityV2Builder::new()
        .authority(authority.to_bytes().into())
        .mint(mint.to_bytes().into())
        .metadata(metadata_address(mint).to_bytes().into())
        .payer(payer.to_bytes().into())
        .new_update_authority(new_authority.to_bytes().into())
        .instruction();

    Instruction {
        program_id: Pubkey::new_from_array(instruction.program_id.to_bytes()),
        accounts: instruction
            .accounts
            .iter()
            .map(|meta| AccountMeta {
                pubkey: Pubkey::new_from_array(meta.pubkey.to_bytes()),
                is_signer: meta.is_signer,
                is_writable: meta.is_writable,
            })
            .collect(),
        data: instruction.data,
    }
}

pub fn unpack_metadata(data: &[u8]) -> anyhow::Result<Metadata> {
    Metadata::from_bytes(data).context("Account data is not token metadata")
}

pub fn update_authority(metadata: &Metadata) -> Pubkey {
    Pubkey::new_from_array(metadata.update_authority.to_bytes())
}
