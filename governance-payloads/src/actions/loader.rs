//! BPF upgradeable loader instructions and account state.
//!
//! Instructions come from the SDK builders, so the ProgramData address is
//! always the PDA of the program under the loader. Account state is read with
//! bincode the same way the account decoder parses loader accounts.

use anyhow::Context;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

#[allow(deprecated)]
pub use solana_sdk::bpf_loader_upgradeable::{
    get_program_data_address, UpgradeableLoaderState, ID as LOADER_V3_PROGRAM_ID,
};
#[allow(deprecated)]
use solana_sdk::bpf_loader_upgradeable::{extend_program, upgrade};

pub fn upgrade_instruction(
    program: &Pubkey,
    buffer: &Pubkey,
    spill: &Pubkey,
    authority: &Pubkey,
) -> Instruction {
    upgrade(program, buffer, authority, spill)
}

pub fn extend_program_instruction(
    program: &Pubkey,
    payer: &Pubkey,
    additional_bytes: u32,
) -> Instruction {
    extend_program(program, Some(payer), additional_bytes)
}

/// Checks a configured ProgramData address against the one derived from `program`.
pub fn resolve_program_data(
    field: &str,
    program: &Pubkey,
    configured: Option<Pubkey>,
) -> anyhow::Result<Pubkey> {
    let derived = get_program_data_address(program);
    match configured {
        Some(configured) if configured != derived => Err(anyhow::anyhow!(
            "Configuration error: {} is {}, but the ProgramData of {} is {}",
            field,
            configured,
            program,
            derived
        )),
        _ => Ok(derived),
    }
}

/// Decoded buffer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferAccount<'a> {
    pub authority: Option<Pubkey>,
    pub code: &'a [u8],
}

/// Decoded ProgramData account. `code` includes the trailing zero padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDataAccount<'a> {
    pub slot: u64,
    pub upgrade_authority: Option<Pubkey>,
    pub code: &'a [u8],
}

fn loader_state(data: &[u8]) -> anyhow::Result<UpgradeableLoaderState> {
    bincode::deserialize(data).context("Account data is not upgradeable loader state")
}

pub fn parse_buffer(data: &[u8]) -> anyhow::Result<BufferAccount<'_>> {
    match loader_state(data)? {
        UpgradeableLoaderState::Buffer { authority_address } => Ok(BufferAccount {
            authority: authority_address,
            code: data
                .get(UpgradeableLoaderState::size_of_buffer_metadata()..)
                .unwrap_or(&[]),
        }),
        other => Err(anyhow::anyhow!("Expected a loader buffer, found {:?}", other)),
    }
}

pub fn parse_program_data(data: &[u8]) -> anyhow::Result<ProgramDataAccount<'_>> {
    match loader_state(data)? {
        UpgradeableLoaderState::ProgramData {
            slot,
            upgrade_authority_address,
        } => Ok(ProgramDataAccount {
            slot,
            upgrade_authority: upgrade_authority_address,
            code: data
                .get(UpgradeableLoaderState::size_of_programdata_metadata()..)
                .unwrap_or(&[]),
        }),
        other => Err(anyhow::anyhow!("Expected loader ProgramData, found {:?}", other)),
    }
}
