//! Per-action checks on a simulated governance transaction.
//!
//! Each check reads the before/after snapshots of a [`SimulationReport`] and
//! fails with a description of the first unexpected state change.

use anyhow::Context;
use chain_clients_svm::AccountState;
use solana_sdk::pubkey::Pubkey;
use spl_token::solana_program::program_option::COption;
use tracing::info;

use crate::actions::loader::{parse_buffer, parse_program_data};
use crate::actions::metadata::{self, unpack_metadata, update_authority};
use crate::actions::ntt;
use crate::actions::token::{unpack_mint, MintAuthorityKind};
use crate::actions::{GovernanceAction, NttTransferMintAuthority, SetAuthority};
use crate::assertions::assert_no_account_changes;
use crate::simulation::{AccountChange, SimulationReport};

/// Runs the checks for `action`.
///
/// `payer` may only lose lamports. `authority` is the resolved governance
/// authority the instruction executed with.
pub fn validate_simulation(
    action: &GovernanceAction,
    report: &SimulationReport,
    payer: &Pubkey,
    authority: &Pubkey,
) -> anyhow::Result<()> {
    let payer_change = report.require(payer)?;
    assert_no_account_changes(payer_change.before.as_ref(), payer_change.after.as_ref(), true)
        .with_context(|| format!("Payer {} changed beyond lamports", payer))?;

    match action {
        GovernanceAction::ProgramUpgrade {
            program,
            program_data,
            buffer,
            spill,
            ..
        } => validate_program_upgrade(report, program, program_data, buffer, spill),
        GovernanceAction::ProgramExtend {
            program,
            program_data,
            additional_bytes,
        } => validate_program_extend(report, program, program_data, *additional_bytes),
        GovernanceAction::SetFreezeAuthority(set) => {
            validate_set_authority(report, MintAuthorityKind::Freeze, set, payer, authority)
        }
        GovernanceAction::SetMintAuthority(set) => {
            validate_set_authority(report, MintAuthorityKind::Mint, set, payer, authority)
        }
        GovernanceAction::NttTransferMintAuthority(transfer) => {
            validate_ntt_transfer_mint_authority(report, transfer, payer, authority)
        }
        GovernanceAction::UpdateMetadataAuthority(set) => {
            validate_update_metadata_authority(report, set, payer, authority)
        }
    }
}

fn before_after<'a>(
    change: &'a AccountChange,
    key: &Pubkey,
) -> anyhow::Result<(&'a AccountState, &'a AccountState)> {
    match (&change.before, &change.after) {
        (Some(before), Some(after)) => Ok((before, after)),
        (before, after) => Err(anyhow::anyhow!(
            "Account {} must exist before and after (before: {}, after: {})",
            key,
            before.is_some(),
            after.is_some()
        )),
    }
}

/// Fails if `key` was written to. Only lamports may move when `key` is the payer.
fn assert_untouched(
    report: &SimulationReport,
    key: &Pubkey,
    label: &str,
    payer: &Pubkey,
) -> anyhow::Result<()> {
    if let Some(change) = report.get(key) {
        assert_no_account_changes(change.before.as_ref(), change.after.as_ref(), key == payer)
            .with_context(|| format!("{} {} changed", label, key))?;
    }
    Ok(())
}

// ============================================================================
// BPF LOADER
// ============================================================================

fn validate_program_upgrade(
    report: &SimulationReport,
    program: &Pubkey,
    program_data: &Pubkey,
    buffer: &Pubkey,
    spill: &Pubkey,
) -> anyhow::Result<()> {
    let program_change = report.require(program)?;
    assert_no_account_changes(program_change.before.as_ref(), program_change.after.as_ref(), false)
        .with_context(|| format!("Program account {} changed", program))?;

    let (data_before, data_after) = before_after(report.require(program_data)?, program_data)?;
    if data_before.data == data_after.data {
        return Err(anyhow::anyhow!("ProgramData {} did not change", program_data));
    }
    let state_before = parse_program_data(&data_before.data)
        .with_context(|| format!("ProgramData {} before simulation", program_data))?;
    let state_after = parse_program_data(&data_after.data)
        .with_context(|| format!("ProgramData {} after simulation", program_data))?;
    if state_before.upgrade_authority != state_after.upgrade_authority {
        return Err(anyhow::anyhow!(
            "ProgramData {} upgrade authority changed from {:?} to {:?}",
            program_data,
            state_before.upgrade_authority,
            state_after.upgrade_authority
        ));
    }

    let buffer_change = report.require(buffer)?;
    let buffer_before = buffer_change
        .before
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Buffer {} does not exist", buffer))?;
    let new_code = parse_buffer(&buffer_before.data)
        .with_context(|| format!("Buffer {}", buffer))?
        .code;
    let deployed = state_after.code;

    if deployed.len() < new_code.len() || &deployed[..new_code.len()] != new_code {
        return Err(anyhow::anyhow!(
            "ProgramData code does not start with the {} byte buffer code",
            new_code.len()
        ));
    }
    if deployed[new_code.len()..].iter().any(|b| *b != 0) {
        return Err(anyhow::anyhow!("ProgramData trailing padding not zero"));
    }

    let buffer_lamports = buffer_change.after.as_ref().map_or(0, |a| a.lamports);
    if buffer_lamports != 0 {
        return Err(anyhow::anyhow!(
            "Buffer {} was not closed ({} lamports left)",
            buffer,
            buffer_lamports
        ));
    }

    let (spill_before, spill_after) = before_after(report.require(spill)?, spill)?;
    if spill_after.lamports <= spill_before.lamports {
        return Err(anyhow::anyhow!(
            "Spill account {} did not receive lamports from buffer",
            spill
        ));
    }

    info!("Program upgrade checks passed ({} byte code)", new_code.len());
    Ok(())
}

fn validate_program_extend(
    report: &SimulationReport,
    program: &Pubkey,
    program_data: &Pubkey,
    additional_bytes: u32,
) -> anyhow::Result<()> {
    let program_change = report.require(program)?;
    assert_no_account_changes(program_change.before.as_ref(), program_change.after.as_ref(), false)
        .with_context(|| format!("Program account {} changed", program))?;

    let (before, after) = before_after(report.require(program_data)?, program_data)?;
    let expected = before.data.len() + additional_bytes as usize;
    if after.data.len() != expected {
        return Err(anyhow::anyhow!(
            "ProgramData {} is {} bytes, expected {} ({} + {})",
            program_data,
            after.data.len(),
            expected,
            before.data.len(),
            additional_bytes
        ));
    }

    info!("Program extend checks passed (+{} bytes)", additional_bytes);
    Ok(())
}

// ============================================================================
// SPL TOKEN
// ============================================================================

fn validate_set_authority(
    report: &SimulationReport,
    kind: MintAuthorityKind,
    set: &SetAuthority,
    payer: &Pubkey,
    authority: &Pubkey,
) -> anyhow::Result<()> {
    // Neither the old nor the new authority account is written to
    for key in [authority, &set.new_authority] {
        assert_untouched(report, key, "Authority account", payer)?;
    }

    let (before, after) = before_after(report.require(&set.mint)?, &set.mint)?;
    let mint_before = unpack_mint(&before.data).context("Mint before simulation")?;
    let mint_after = unpack_mint(&after.data).context("Mint after simulation")?;

    if mint_after.decimals != mint_before.decimals
        || mint_after.supply != mint_before.supply
        || mint_after.is_initialized != mint_before.is_initialized
    {
        return Err(anyhow::anyhow!("Mint {} changed beyond its authority", set.mint));
    }

    let untouched = match kind {
        MintAuthorityKind::Freeze => MintAuthorityKind::Mint,
        MintAuthorityKind::Mint => MintAuthorityKind::Freeze,
    };
    if untouched.current(&mint_after) != untouched.current(&mint_before) {
        return Err(anyhow::anyhow!(
            "Mint {} changed its {:?} authority as well",
            set.mint,
            untouched
        ));
    }

    if kind.current(&mint_after) != COption::Some(set.new_authority) {
        return Err(anyhow::anyhow!(
            "Mint {} {:?} authority is {:?}, expected {}",
            set.mint,
            kind,
            kind.current(&mint_after),
            set.new_authority
        ));
    }

    info!("{:?} authority of {} set to {}", kind, set.mint, set.new_authority);
    Ok(())
}

// ============================================================================
// WORMHOLE NTT
// ============================================================================

fn validate_ntt_transfer_mint_authority(
    report: &SimulationReport,
    transfer: &NttTransferMintAuthority,
    payer: &Pubkey,
    owner: &Pubkey,
) -> anyhow::Result<()> {
    let config = ntt::config_address(&transfer.ntt_program);
    let token_authority = ntt::token_authority_address(&transfer.ntt_program);

    let config_change = report.require(&config)?;
    assert_no_account_changes(config_change.before.as_ref(), config_change.after.as_ref(), false)
        .with_context(|| format!("NTT config {} changed", config))?;
    assert_untouched(report, &token_authority, "NTT token authority", payer)?;
    assert_untouched(report, &transfer.new_mint_authority, "New mint authority", payer)?;
    // The config owner signs as the manager's `payer` and may pay fees
    if let Some(change) = report.get(owner) {
        assert_no_account_changes(change.before.as_ref(), change.after.as_ref(), true)
            .with_context(|| format!("NTT config owner {} changed beyond lamports", owner))?;
    }

    let (before, after) = before_after(report.require(&transfer.mint)?, &transfer.mint)?;
    let mint_before = unpack_mint(&before.data).context("Mint before simulation")?;
    let mint_after = unpack_mint(&after.data).context("Mint after simulation")?;

    if mint_after.decimals != mint_before.decimals
        || mint_after.supply != mint_before.supply
        || mint_after.is_initialized != mint_before.is_initialized
        || mint_after.freeze_authority != mint_before.freeze_authority
    {
        return Err(anyhow::anyhow!("Mint {} changed beyond its mint authority", transfer.mint));
    }

    if mint_after.mint_authority != COption::Some(transfer.new_mint_authority) {
        return Err(anyhow::anyhow!(
            "Mint {} mint authority is {:?}, expected {}",
            transfer.mint,
            mint_after.mint_authority,
            transfer.new_mint_authority
        ));
    }

    info!(
        "Mint authority of {} moved from NTT manager {} to {}",
        transfer.mint, transfer.ntt_program, transfer.new_mint_authority
    );
    Ok(())
}

// ============================================================================
// TOKEN METADATA
// ============================================================================

fn validate_update_metadata_authority(
    report: &SimulationReport,
    set: &SetAuthority,
    payer: &Pubkey,
    authority: &Pubkey,
) -> anyhow::Result<()> {
    let mint_change = report.require(&set.mint)?;
    assert_no_account_changes(mint_change.before.as_ref(), mint_change.after.as_ref(), false)
        .with_context(|| format!("Mint {} changed", set.mint))?;
    assert_untouched(report, authority, "Authority account", payer)?;
    assert_untouched(report, &set.new_authority, "New update authority", payer)?;

    let address = metadata::metadata_address(&set.mint);
    let (before, after) = before_after(report.require(&address)?, &address)?;
    let metadata_before = unpack_metadata(&before.data).context("Metadata before simulation")?;
    let metadata_after = unpack_metadata(&after.data).context("Metadata after simulation")?;

    if update_authority(&metadata_after) != set.new_authority {
        return Err(anyhow::anyhow!(
            "Metadata {} update authority is {}, expected {}",
            address,
            update_authority(&metadata_after),
            set.new_authority
        ));
    }

    let mut expected = metadata_before;
    expected.update_authority = metadata_after.update_authority;
    if expected != metadata_after {
        return Err(anyhow::anyhow!("Metadata {} changed beyond its update authority", address));
    }

    info!("Metadata update authority of {} set to {}", set.mint, set.new_authority);
    Ok(())
}
