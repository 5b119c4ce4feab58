//! Wormhole general purpose governance payload codec.
//!
//! Follows the Wormhole governance packet layout (module, action, chain) with a
//! Solana instruction body:
//!
//! | field           |                     size (bytes) | description                             |
//! |-----------------+----------------------------------+-----------------------------------------|
//! | MODULE          |                               32 | Governance module identifier            |
//! | ACTION          |                                1 | Governance action identifier            |
//! | CHAIN           |                                2 | Chain identifier                        |
//! | PROGRAM_ID      |                               32 | Governance Program ID                   |
//! |-----------------+----------------------------------+-----------------------------------------|
//! | program_id      |                               32 | Program ID of the program to be invoked |
//! | accounts_length |                                2 | Number of accounts                      |
//! | accounts        | `accounts_length` * (32 + 1 + 1) | Accounts to be passed to the program    |
//! | data_length     |                                2 | Length of the data                      |
//! | data            |                    `data_length` | Data to be passed to the program        |

use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;

use crate::account_meta::{read_accounts, write_accounts, SERIALIZED_ACCOUNT_LEN};
use crate::error::{CodecError, Result};
use crate::primitives::{checked_u16, write_pubkey, write_u16, Reader};
use crate::sentinel::sentinel_pubkey;

/// "GeneralPurposeGovernance", right-aligned in 32 bytes (left zero padding).
pub const GOVERNANCE_MODULE: [u8; 32] = module_bytes(b"GeneralPurposeGovernance");
/// Governance action identifying a Solana instruction call.
pub const WH_SOLANA_CALL_ACTION: u8 = 2;
/// Wormhole chain id of Solana.
pub const WH_SOLANA_CHAIN_ID: u16 = 1;

/// MODULE + ACTION + CHAIN + PROGRAM_ID
pub const WH_GOVERNANCE_HEADER_LEN: usize = 32 + 1 + 2 + 32;
/// Governance header plus the target program that opens the body.
pub const WH_PAYLOAD_HEADER_LEN: usize = WH_GOVERNANCE_HEADER_LEN + 32;

/// PAYER placeholder key
pub const WH_PAYER_SENTINEL: Pubkey = sentinel_pubkey(b"payer");
/// OWNER placeholder key
pub const WH_OWNER_SENTINEL: Pubkey = sentinel_pubkey(b"owner");

/// A decoded payload before placeholder substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhGovernanceMessage {
    pub governance_program_id: Pubkey,
    pub instruction: Instruction,
}

const fn module_bytes(name: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    let offset = 32 - name.len();

    let mut i = 0;
    while i < name.len() {
        output[offset + i] = name[i];
        i += 1;
    }

    output
}

pub fn encode_payload(
    governance_program_id: &Pubkey,
    instruction: &Instruction,
) -> Result<Vec<u8>> {
    let data_len = checked_u16("data length", instruction.data.len())?;

    let mut out = Vec::with_capacity(
        WH_PAYLOAD_HEADER_LEN
            + 2
            + SERIALIZED_ACCOUNT_LEN * instruction.accounts.len()
            + 2
            + instruction.data.len(),
    );
    out.extend_from_slice(&GOVERNANCE_MODULE);
    out.push(WH_SOLANA_CALL_ACTION);
    write_u16(&mut out, WH_SOLANA_CHAIN_ID);
    write_pubkey(&mut out, governance_program_id);

    write_pubkey(&mut out, &instruction.program_id);
    write_accounts(&mut out, &instruction.accounts)?;
    write_u16(&mut out, data_len);
    out.extend_from_slice(&instruction.data);

    Ok(out)
}

/// Decodes a payload without touching placeholder accounts.
///
/// Bytes after the declared data length are ignored.
pub fn decode_message(payload: &[u8]) -> Result<WhGovernanceMessage> {
    let mut reader = Reader::new(payload);

    let module = reader.read_bytes32()?;
    if module != GOVERNANCE_MODULE {
        return Err(CodecError::InvalidHeader {
            field: "module",
            expected: hex_string(&GOVERNANCE_MODULE),
            got: hex_string(&module),
        });
    }

    let action = reader.read_u8()?;
    if action != WH_SOLANA_CALL_ACTION {
        return Err(CodecError::InvalidHeader {
            field: "action",
            expected: WH_SOLANA_CALL_ACTION.to_string(),
            got: action.to_string(),
        });
    }

    let chain = reader.read_u16()?;
    if chain != WH_SOLANA_CHAIN_ID {
        return Err(CodecError::InvalidHeader {
            field: "chain",
            expected: WH_SOLANA_CHAIN_ID.to_string(),
            got: chain.to_string(),
        });
    }

    let governance_program_id = reader.read_pubkey()?;

    let program_id = reader.read_pubkey()?;
    let accounts = read_accounts(&mut reader)?;
    let data_len = reader.read_u16()? as usize;
    let data = reader.take(data_len)?.to_vec();

    Ok(WhGovernanceMessage {
        governance_program_id,
        instruction: Instruction {
            program_id,
            accounts,
            data,
        },
    })
}

/// Replaces the payer and owner placeholders.
pub fn resolve_sentinels(mut instruction: Instruction, payer: Pubkey, owner: Pubkey) -> Instruction {
    for account in instruction.accounts.iter_mut() {
        if account.pubkey == WH_PAYER_SENTINEL {
            account.pubkey = payer;
        } else if account.pubkey == WH_OWNER_SENTINEL {
            account.pubkey = owner;
        }
    }

    instruction
}

/// Decodes a payload into an executable instruction.
pub fn decode_payload(payload: &[u8], payer: Pubkey, owner: Pubkey) -> Result<Instruction> {
    let message = decode_message(payload)?;
    Ok(resolve_sentinels(message.instruction, payer, owner))
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
