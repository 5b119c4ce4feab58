//! LayerZero governance message codec.
//!
//! General purpose governance message to call arbitrary instructions on a
//! governed program. The full wire format is:
//!
//! | field           |                     size (bytes) | description                          |
//! |-----------------+----------------------------------+--------------------------------------|
//! | ACTION          |                                1 | Governance action (2 = Solana call)  |
//! | ORIGIN_CALLER   |                               32 | Origin caller address as bytes32     |
//! |-----------------+----------------------------------+--------------------------------------|
//! | accounts_length |                                2 | Number of accounts                   |
//! | accounts        | `accounts_length` * (32 + 1 + 1) | Accounts to be passed to the program |
//! | data            |                        remaining | Data to be passed to the program     |
//!
//! The targeted variant inserts a 32 byte TARGET program between the origin
//! caller and `accounts_length`. The raw variant is the body alone: the EVM
//! side prepends the header, so payload generation only needs the body and the
//! target program is supplied out-of-band at decode time.

use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;

use crate::account_meta::{read_accounts, write_accounts, SERIALIZED_ACCOUNT_LEN};
use crate::error::{CodecError, Result};
use crate::primitives::{write_pubkey, Reader};
use crate::sentinel::sentinel_pubkey;

/// Governance action identifying a Solana instruction call.
pub const LZ_SOLANA_CALL_ACTION: u8 = 2;
/// Origin caller address as bytes32
pub const ORIGIN_CALLER_LEN: usize = 32;
/// Target program address as bytes32
pub const TARGET_LEN: usize = 32;
/// ACTION + ORIGIN_CALLER
pub const LZ_MESSAGE_HEADER_LEN: usize = 1 + ORIGIN_CALLER_LEN;
/// ACTION + ORIGIN_CALLER + TARGET
pub const LZ_TARGETED_MESSAGE_HEADER_LEN: usize = LZ_MESSAGE_HEADER_LEN + TARGET_LEN;

/// LayerZero V2 executor program on Solana.
pub const EXECUTOR_ID: Pubkey = solana_program::pubkey!("6doghB248px58JSSwG4qejQ46kFMW4AMj7vzJnWZHNZn");
pub const EXECUTION_CONTEXT_SEED: &[u8] = b"ExecutionContext";
pub const EXECUTION_CONTEXT_VERSION_1: u8 = 1;

/// CPI_AUTHORITY placeholder key
pub const LZ_CPI_AUTHORITY_SENTINEL: Pubkey = sentinel_pubkey(b"cpi_authority");
/// PAYER placeholder key
pub const LZ_PAYER_SENTINEL: Pubkey = sentinel_pubkey(b"payer");
/// Execution CONTEXT placeholder key
pub const LZ_CONTEXT_SENTINEL: Pubkey = sentinel_pubkey(b"context");

/// A decoded targeted message, which carries its own target program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LzGovernanceMessage {
    pub origin_caller: [u8; 32],
    pub instruction: Instruction,
}

// ============================================================================
// BODY (RAW FORM)
// ============================================================================

/// Encodes ONLY the body: account count, accounts and trailing data.
pub fn encode_instruction(instruction: &Instruction) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(
        2 + SERIALIZED_ACCOUNT_LEN * instruction.accounts.len() + instruction.data.len(),
    );
    write_body(&mut out, instruction)?;
    Ok(out)
}

/// Decodes a raw body, attaching the externally supplied target program.
pub fn decode_instruction(target_program: Pubkey, body: &[u8]) -> Result<Instruction> {
    read_body(&mut Reader::new(body), target_program)
}

fn write_body(out: &mut Vec<u8>, instruction: &Instruction) -> Result<()> {
    write_accounts(out, &instruction.accounts)?;
    out.extend_from_slice(&instruction.data);
    Ok(())
}

fn read_body(reader: &mut Reader<'_>, program_id: Pubkey) -> Result<Instruction> {
    let accounts = read_accounts(reader)?;
    // Data has no length prefix: it is everything after the accounts.
    let data = reader.take_rest().to_vec();

    Ok(Instruction {
        program_id,
        accounts,
        data,
    })
}

// ============================================================================
// FULL MESSAGE (HEADER + BODY)
// ============================================================================

pub fn encode_message(origin_caller: &[u8], instruction: &Instruction) -> Result<Vec<u8>> {
    let origin_caller = checked_origin_caller(origin_caller)?;

    let mut out = Vec::with_capacity(LZ_MESSAGE_HEADER_LEN);
    out.push(LZ_SOLANA_CALL_ACTION);
    out.extend_from_slice(&origin_caller);
    write_body(&mut out, instruction)?;
    Ok(out)
}

pub fn decode_message(target_program: Pubkey, payload: &[u8]) -> Result<Instruction> {
    let mut reader = Reader::new(payload);
    read_header(&mut reader)?;
    read_body(&mut reader, target_program)
}

pub fn encode_targeted_message(
    origin_caller: &[u8],
    instruction: &Instruction,
) -> Result<Vec<u8>> {
    let origin_caller = checked_origin_caller(origin_caller)?;

    let mut out = Vec::with_capacity(LZ_TARGETED_MESSAGE_HEADER_LEN);
    out.push(LZ_SOLANA_CALL_ACTION);
    out.extend_from_slice(&origin_caller);
    write_pubkey(&mut out, &instruction.program_id);
    write_body(&mut out, instruction)?;
    Ok(out)
}

pub fn decode_targeted_message(payload: &[u8]) -> Result<LzGovernanceMessage> {
    let mut reader = Reader::new(payload);
    let origin_caller = read_header(&mut reader)?;
    let program_id = reader.read_pubkey()?;
    let instruction = read_body(&mut reader, program_id)?;

    Ok(LzGovernanceMessage {
        origin_caller,
        instruction,
    })
}

/// Decodes ONLY the origin caller from a full or targeted message.
pub fn decode_origin_caller(payload: &[u8]) -> Result<[u8; 32]> {
    read_header(&mut Reader::new(payload))
}

fn read_header(reader: &mut Reader<'_>) -> Result<[u8; 32]> {
    let action = reader.read_u8()?;
    if action != LZ_SOLANA_CALL_ACTION {
        return Err(CodecError::InvalidHeader {
            field: "action",
            expected: LZ_SOLANA_CALL_ACTION.to_string(),
            got: action.to_string(),
        });
    }
    reader.read_bytes32()
}

fn checked_origin_caller(origin_caller: &[u8]) -> Result<[u8; 32]> {
    <[u8; 32]>::try_from(origin_caller).map_err(|_| CodecError::InvalidLength {
        field: "origin caller",
        expected: ORIGIN_CALLER_LEN,
        got: origin_caller.len(),
    })
}

// ============================================================================
// SENTINEL RESOLUTION
// ============================================================================

/// Derives the executor's execution context account for `payer`.
///
/// PDA seeds: ["ExecutionContext", payer, [1]] under [`EXECUTOR_ID`]. No bump
/// is transmitted, so this must match the executor's own derivation.
pub fn derive_execution_context(payer: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            EXECUTION_CONTEXT_SEED,
            payer.as_ref(),
            &[EXECUTION_CONTEXT_VERSION_1],
        ],
        &EXECUTOR_ID,
    )
    .0
}

/// Replaces the CPI authority, payer and context placeholders.
pub fn resolve_sentinels(
    mut instruction: Instruction,
    cpi_authority: Pubkey,
    payer: Pubkey,
) -> Instruction {
    let execution_context = derive_execution_context(&payer);

    for account in instruction.accounts.iter_mut() {
        if account.pubkey == LZ_CPI_AUTHORITY_SENTINEL {
            account.pubkey = cpi_authority;
        } else if account.pubkey == LZ_PAYER_SENTINEL {
            account.pubkey = payer;
        } else if account.pubkey == LZ_CONTEXT_SENTINEL {
            account.pubkey = execution_context;
        }
    }

    instruction
}

/// Decodes a full message and resolves its placeholders.
pub fn decode_and_resolve(
    payload: &[u8],
    target_program: Pubkey,
    cpi_authority: Pubkey,
    payer: Pubkey,
) -> Result<Instruction> {
    let instruction = decode_message(target_program, payload)?;
    Ok(resolve_sentinels(instruction, cpi_authority, payer))
}

/// Decodes a raw body and resolves its placeholders.
pub fn decode_instruction_and_resolve(
    body: &[u8],
    target_program: Pubkey,
    cpi_authority: Pubkey,
    payer: Pubkey,
) -> Result<Instruction> {
    let instruction = decode_instruction(target_program, body)?;
    Ok(resolve_sentinels(instruction, cpi_authority, payer))
}
