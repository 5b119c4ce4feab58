//! Governance Actions
//!
//! Builds the instruction behind each supported governance action and converts
//! it to and from the payload of either governance protocol.
//!
//! Authorities and payers that the governance program provides at execution
//! time are written as the protocol's placeholder keys, so the same payload is
//! valid regardless of which relayer executes it.

pub mod loader;
pub mod metadata;
pub mod ntt;
pub mod token;

use anyhow::Context;
use governance_codec::{lz, wh};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

use crate::config::{parse_optional, parse_pubkey, Config};
use token::MintAuthorityKind;

// ============================================================================
// PROTOCOL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernanceProtocol {
    Wormhole,
    LayerZero,
}

impl GovernanceProtocol {
    /// Placeholder for the governance authority that signs the call.
    pub fn authority_sentinel(&self) -> Pubkey {
        match self {
            GovernanceProtocol::Wormhole => wh::WH_OWNER_SENTINEL,
            GovernanceProtocol::LayerZero => lz::LZ_CPI_AUTHORITY_SENTINEL,
        }
    }

    /// Placeholder for the transaction fee payer.
    pub fn payer_sentinel(&self) -> Pubkey {
        match self {
            GovernanceProtocol::Wormhole => wh::WH_PAYER_SENTINEL,
            GovernanceProtocol::LayerZero => lz::LZ_PAYER_SENTINEL,
        }
    }

    /// Concrete governance authority for this protocol from config.
    pub fn configured_authority(&self, config: &Config) -> anyhow::Result<Pubkey> {
        match self {
            GovernanceProtocol::Wormhole => {
                parse_pubkey("governance.wh_owner", &config.governance.wh_owner)
            }
            GovernanceProtocol::LayerZero => {
                parse_pubkey("governance.lz_cpi_authority", &config.governance.lz_cpi_authority)
            }
        }
    }
}

impl fmt::Display for GovernanceProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GovernanceProtocol::Wormhole => write!(f, "wormhole"),
            GovernanceProtocol::LayerZero => write!(f, "layerzero"),
        }
    }
}

impl FromStr for GovernanceProtocol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wormhole" | "wh" => Ok(GovernanceProtocol::Wormhole),
            "layerzero" | "lz" => Ok(GovernanceProtocol::LayerZero),
            other => Err(anyhow::anyhow!(
                "Unknown protocol '{}'. Expected 'wormhole' or 'layerzero'",
                other
            )),
        }
    }
}

// ============================================================================
// PAYLOAD CONVERSION
// ============================================================================

/// Encodes `instruction` for `protocol`.
///
/// Wormhole produces the full VAA payload. LayerZero produces the raw body;
/// the header is prepended by the sending side.
pub fn encode_for(
    protocol: GovernanceProtocol,
    config: &Config,
    instruction: &Instruction,
) -> anyhow::Result<Vec<u8>> {
    match protocol {
        GovernanceProtocol::Wormhole => {
            let governance_program = parse_pubkey(
                "governance.wh_governance_program_id",
                &config.governance.wh_governance_program_id,
            )?;
            Ok(wh::encode_payload(&governance_program, instruction)?)
        }
        GovernanceProtocol::LayerZero => Ok(lz::encode_instruction(instruction)?),
    }
}

/// Decodes a payload and resolves its placeholders with the configured keys.
pub fn decode_for(
    protocol: GovernanceProtocol,
    config: &Config,
    payload: &[u8],
    target_program: Pubkey,
) -> anyhow::Result<Instruction> {
    let authority = protocol.configured_authority(config)?;
    decode_with_authority(protocol, config, payload, target_program, authority)
}

/// Like [`decode_for`] with an explicit governance authority.
///
/// For Wormhole the target program is read from the payload and must equal
/// `target_program`.
pub fn decode_with_authority(
    protocol: GovernanceProtocol,
    config: &Config,
    payload: &[u8],
    target_program: Pubkey,
    authority: Pubkey,
) -> anyhow::Result<Instruction> {
    let payer = config.payer()?;

    match protocol {
        GovernanceProtocol::Wormhole => {
            let message = wh::decode_message(payload).context("Invalid Wormhole payload")?;
            let governance_program = parse_pubkey(
                "governance.wh_governance_program_id",
                &config.governance.wh_governance_program_id,
            )?;
            if message.governance_program_id != governance_program {
                return Err(anyhow::anyhow!(
                    "Payload targets governance program {}, expected {}",
                    message.governance_program_id,
                    governance_program
                ));
            }
            if message.instruction.program_id != target_program {
                return Err(anyhow::anyhow!(
                    "Payload invokes program {}, expected {}",
                    message.instruction.program_id,
                    target_program
                ));
            }
            Ok(wh::resolve_sentinels(message.instruction, payer, authority))
        }
        GovernanceProtocol::LayerZero => {
            lz::decode_instruction_and_resolve(payload, target_program, authority, payer)
                .context("Invalid LayerZero payload")
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    ProgramUpgrade,
    ProgramExtend,
    SetFreezeAuthority,
    SetMintAuthority,
    NttTransferMintAuthority,
    UpdateMetadataAuthority,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::ProgramUpgrade,
        ActionKind::ProgramExtend,
        ActionKind::SetFreezeAuthority,
        ActionKind::SetMintAuthority,
        ActionKind::NttTransferMintAuthority,
        ActionKind::UpdateMetadataAuthority,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::ProgramUpgrade => "program-upgrade",
            ActionKind::ProgramExtend => "program-extend",
            ActionKind::SetFreezeAuthority => "set-freeze-authority",
            ActionKind::SetMintAuthority => "set-mint-authority",
            ActionKind::NttTransferMintAuthority => "ntt-transfer-mint-authority",
            ActionKind::UpdateMetadataAuthority => "update-metadata-authority",
        }
    }
}

impl FromStr for ActionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ActionKind::ALL.iter().map(|k| k.name()).collect();
                anyhow::anyhow!("Unknown action '{}'. Expected one of: {}", s, names.join(", "))
            })
    }
}

/// A governance action with every address parsed from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernanceAction {
    ProgramUpgrade {
        program: Pubkey,
        program_data: Pubkey,
        buffer: Pubkey,
        spill: Pubkey,
        authority: Option<Pubkey>,
    },
    ProgramExtend {
        program: Pubkey,
        program_data: Pubkey,
        additional_bytes: u32,
    },
    SetFreezeAuthority(SetAuthority),
    SetMintAuthority(SetAuthority),
    NttTransferMintAuthority(NttTransferMintAuthority),
    /// Metaplex metadata update authority of `mint`
    UpdateMetadataAuthority(SetAuthority),
}

/// An authority of `mint` (or of its metadata) moving to `new_authority`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAuthority {
    pub mint: Pubkey,
    pub new_authority: Pubkey,
    pub authority: Option<Pubkey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NttTransferMintAuthority {
    pub ntt_program: Pubkey,
    pub mint: Pubkey,
    pub new_mint_authority: Pubkey,
    /// NTT config owner override
    pub authority: Option<Pubkey>,
}

fn missing_section(kind: ActionKind, section: &str, config: &Config) -> anyhow::Error {
    anyhow::anyhow!(
        "Action '{}' needs a [{}] section in the {} configuration",
        kind.name(),
        section,
        config.network
    )
}

impl GovernanceAction {
    pub fn from_config(kind: ActionKind, config: &Config) -> anyhow::Result<Self> {
        match kind {
            ActionKind::ProgramUpgrade => {
                let section = config
                    .program_upgrade
                    .as_ref()
                    .ok_or_else(|| missing_section(kind, "program_upgrade", config))?;
                let program = parse_pubkey("program_upgrade.program", &section.program)?;
                Ok(GovernanceAction::ProgramUpgrade {
                    program,
                    program_data: loader::resolve_program_data(
                        "program_upgrade.program_data",
                        &program,
                        parse_optional("program_upgrade.program_data", &section.program_data)?,
                    )?,
                    buffer: parse_pubkey("program_upgrade.buffer", &section.buffer)?,
                    spill: parse_pubkey("program_upgrade.spill", &section.spill)?,
                    authority: parse_optional("program_upgrade.authority", &section.authority)?,
                })
            }
            ActionKind::ProgramExtend => {
                let section = config
                    .program_extend
                    .as_ref()
                    .ok_or_else(|| missing_section(kind, "program_extend", config))?;
                let program = parse_pubkey("program_extend.program", &section.program)?;
                Ok(GovernanceAction::ProgramExtend {
                    program,
                    program_data: loader::resolve_program_data(
                        "program_extend.program_data",
                        &program,
                        parse_optional("program_extend.program_data", &section.program_data)?,
                    )?,
                    additional_bytes: section.additional_bytes,
                })
            }
            ActionKind::SetFreezeAuthority | ActionKind::SetMintAuthority => {
                let (name, section) = if kind == ActionKind::SetFreezeAuthority {
                    ("set_freeze_authority", &config.set_freeze_authority)
                } else {
                    ("set_mint_authority", &config.set_mint_authority)
                };
                let section = section
                    .as_ref()
                    .ok_or_else(|| missing_section(kind, name, config))?;
                let set_authority = SetAuthority {
                    mint: parse_pubkey(&format!("{}.mint", name), &section.mint)?,
                    new_authority: parse_pubkey(
                        &format!("{}.new_authority", name),
                        &section.new_authority,
                    )?,
                    authority: parse_optional(&format!("{}.authority", name), &section.authority)?,
                };
                Ok(if kind == ActionKind::SetFreezeAuthority {
                    GovernanceAction::SetFreezeAuthority(set_authority)
                } else {
                    GovernanceAction::SetMintAuthority(set_authority)
                })
            }
            ActionKind::NttTransferMintAuthority => {
                let name = "ntt_transfer_mint_authority";
                let section = config
                    .ntt_transfer_mint_authority
                    .as_ref()
                    .ok_or_else(|| missing_section(kind, name, config))?;
                Ok(GovernanceAction::NttTransferMintAuthority(NttTransferMintAuthority {
                    ntt_program: parse_pubkey(&format!("{}.ntt_program", name), &section.ntt_program)?,
                    mint: parse_pubkey(&format!("{}.mint", name), &section.mint)?,
                    new_mint_authority: parse_pubkey(
                        &format!("{}.new_mint_authority", name),
                        &section.new_mint_authority,
                    )?,
                    authority: parse_optional(&format!("{}.authority", name), &section.authority)?,
                }))
            }
            ActionKind::UpdateMetadataAuthority => {
                let name = "update_metadata_authority";
                let section = config
                    .update_metadata_authority
                    .as_ref()
                    .ok_or_else(|| missing_section(kind, name, config))?;
                Ok(GovernanceAction::UpdateMetadataAuthority(SetAuthority {
                    mint: parse_pubkey(&format!("{}.mint", name), &section.mint)?,
                    new_authority: parse_pubkey(
                        &format!("{}.new_authority", name),
                        &section.new_authority,
                    )?,
                    authority: parse_optional(&format!("{}.authority", name), &section.authority)?,
                }))
            }
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            GovernanceAction::ProgramUpgrade { .. } => ActionKind::ProgramUpgrade,
            GovernanceAction::ProgramExtend { .. } => ActionKind::ProgramExtend,
            GovernanceAction::SetFreezeAuthority(_) => ActionKind::SetFreezeAuthority,
            GovernanceAction::SetMintAuthority(_) => ActionKind::SetMintAuthority,
            GovernanceAction::NttTransferMintAuthority(_) => ActionKind::NttTransferMintAuthority,
            GovernanceAction::UpdateMetadataAuthority(_) => ActionKind::UpdateMetadataAuthority,
        }
    }

    /// Program the action's instruction invokes.
    pub fn target_program(&self) -> Pubkey {
        match self {
            GovernanceAction::ProgramUpgrade { .. } | GovernanceAction::ProgramExtend { .. } => {
                loader::LOADER_V3_PROGRAM_ID
            }
            GovernanceAction::SetFreezeAuthority(_) | GovernanceAction::SetMintAuthority(_) => {
                spl_token::id()
            }
            GovernanceAction::NttTransferMintAuthority(transfer) => transfer.ntt_program,
            GovernanceAction::UpdateMetadataAuthority(_) => metadata::metadata_program_id(),
        }
    }

    /// Authority configured for this action in place of the governance authority.
    pub fn authority_override(&self) -> Option<Pubkey> {
        match self {
            GovernanceAction::ProgramUpgrade { authority, .. } => *authority,
            GovernanceAction::ProgramExtend { .. } => None,
            GovernanceAction::SetFreezeAuthority(set)
            | GovernanceAction::SetMintAuthority(set)
            | GovernanceAction::UpdateMetadataAuthority(set) => set.authority,
            GovernanceAction::NttTransferMintAuthority(transfer) => transfer.authority,
        }
    }

    /// Authority the executed instruction signs with.
    pub fn resolved_authority(
        &self,
        protocol: GovernanceProtocol,
        config: &Config,
    ) -> anyhow::Result<Pubkey> {
        match self.authority_override() {
            Some(authority) => Ok(authority),
            None => protocol.configured_authority(config),
        }
    }

    /// Builds the instruction with placeholder authority and payer keys.
    pub fn build_instruction(&self, protocol: GovernanceProtocol) -> anyhow::Result<Instruction> {
        let authority = protocol.authority_sentinel();

        match self {
            GovernanceAction::ProgramUpgrade {
                program,
                buffer,
                spill,
                ..
            } => Ok(loader::upgrade_instruction(program, buffer, spill, &authority)),
            GovernanceAction::ProgramExtend {
                program,
                additional_bytes,
                ..
            } => Ok(loader::extend_program_instruction(
                program,
                &protocol.payer_sentinel(),
                *additional_bytes,
            )),
            GovernanceAction::SetFreezeAuthority(set) => token::set_authority_instruction(
                MintAuthorityKind::Freeze,
                &set.mint,
                &set.new_authority,
                &authority,
            ),
            GovernanceAction::SetMintAuthority(set) => token::set_authority_instruction(
                MintAuthorityKind::Mint,
                &set.mint,
                &set.new_authority,
                &authority,
            ),
            GovernanceAction::NttTransferMintAuthority(transfer) => {
                Ok(ntt::transfer_mint_authority_instruction(
                    &transfer.ntt_program,
                    &authority,
                    &transfer.mint,
                    &transfer.new_mint_authority,
                ))
            }
            GovernanceAction::UpdateMetadataAuthority(set) => {
                Ok(metadata::update_authority_instruction(
                    &set.mint,
                    &authority,
                    &protocol.payer_sentinel(),
                    &set.new_authority,
                ))
            }
        }
    }

    pub fn encode(&self, protocol: GovernanceProtocol, config: &Config) -> anyhow::Result<Vec<u8>> {
        let instruction = self.build_instruction(protocol)?;
        encode_for(protocol, config, &instruction)
    }

    /// Decodes a payload for this action into an executable instruction.
    pub fn decode(
        &self,
        protocol: GovernanceProtocol,
        config: &Config,
        payload: &[u8],
    ) -> anyhow::Result<Instruction> {
        let authority = self.resolved_authority(protocol, config)?;
        decode_with_authority(protocol, config, payload, self.target_program(), authority)
    }
}
