//! Configuration Management Module
//!
//! This module handles loading the per-network configuration used to build and
//! check governance payloads. It holds the RPC endpoint, the governance program
//! addresses of both protocols and the parameters of each governance action.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

/// Environment variable naming the config file (overrides the network default)
pub const CONFIG_PATH_ENV: &str = "GOVERNANCE_CONFIG_PATH";
/// Environment variable overriding the configured RPC endpoint
pub const RPC_URL_ENV: &str = "RPC_URL";

// ============================================================================
// NETWORK
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Devnet,
    Mainnet,
}

impl Network {
    /// Default config file for this network.
    pub fn default_config_path(&self) -> String {
        format!("config/governance_{}.toml", self)
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://api.devnet.solana.com",
            Network::Mainnet => "https://api.mainnet-beta.solana.com",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Devnet => write!(f, "devnet"),
            Network::Mainnet => write!(f, "mainnet"),
        }
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Network::Devnet),
            "mainnet" | "mainnet-beta" => Ok(Network::Mainnet),
            other => Err(anyhow::anyhow!(
                "Unknown network '{}'. Expected 'devnet' or 'mainnet'",
                other
            )),
        }
    }
}

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Main configuration structure.
///
/// Action sections are optional; an action can only be generated or
/// validated when its section is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Network this file describes
    pub network: Network,
    /// Solana JSON-RPC endpoint (overridden by `RPC_URL`)
    pub rpc_url: String,
    /// Governance program addresses of both protocols
    pub governance: GovernanceConfig,
    #[serde(default)]
    pub program_upgrade: Option<ProgramUpgradeConfig>,
    #[serde(default)]
    pub program_extend: Option<ProgramExtendConfig>,
    #[serde(default)]
    pub set_freeze_authority: Option<SetAuthorityConfig>,
    #[serde(default)]
    pub set_mint_authority: Option<SetAuthorityConfig>,
    #[serde(default)]
    pub ntt_transfer_mint_authority: Option<NttTransferMintAuthorityConfig>,
    #[serde(default)]
    pub update_metadata_authority: Option<UpdateMetadataAuthorityConfig>,
}

/// Addresses of the governance programs and the keys they execute with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Wormhole general purpose governance program
    pub wh_governance_program_id: String,
    /// Governance authority PDA substituted for the Wormhole OWNER placeholder
    pub wh_owner: String,
    /// CPI authority substituted for the LayerZero CPI_AUTHORITY placeholder
    pub lz_cpi_authority: String,
    /// Fee payer of the executing transaction
    pub payer: String,
}

/// BPF upgradeable loader `Upgrade` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramUpgradeConfig {
    pub program: String,
    /// Checked against the ProgramData PDA of `program` when set
    #[serde(default)]
    pub program_data: Option<String>,
    /// Buffer holding the new program code
    pub buffer: String,
    /// Receives the lamports of the closed buffer
    pub spill: String,
    /// Upgrade authority, when it is not the governance authority
    #[serde(default)]
    pub authority: Option<String>,
}

/// BPF upgradeable loader `ExtendProgram` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramExtendConfig {
    pub program: String,
    #[serde(default)]
    pub program_data: Option<String>,
    pub additional_bytes: u32,
}

/// SPL Token `SetAuthority` parameters (freeze or mint authority).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAuthorityConfig {
    pub mint: String,
    pub new_authority: String,
    /// Current authority, when it is not the governance authority
    #[serde(default)]
    pub authority: Option<String>,
}

/// Wormhole NTT manager `transfer_mint_authority` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NttTransferMintAuthorityConfig {
    /// NTT manager program holding the mint authority
    pub ntt_program: String,
    pub mint: String,
    pub new_mint_authority: String,
    /// NTT config owner, when it is not the governance authority
    #[serde(default)]
    pub authority: Option<String>,
}

/// Metaplex token metadata update authority transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMetadataAuthorityConfig {
    pub mint: String,
    pub new_authority: String,
    /// Current update authority, when it is not the governance authority
    #[serde(default)]
    pub authority: Option<String>,
}

/// Parses a base58 address from config, naming the field on failure.
pub fn parse_pubkey(field: &str, value: &str) -> anyhow::Result<Pubkey> {
    Pubkey::from_str(value).map_err(|e| {
        anyhow::anyhow!(
            "Configuration error: {} is not a valid base58 address ('{}'): {}",
            field,
            value,
            e
        )
    })
}

/// Parses an optional base58 address from config.
pub fn parse_optional(field: &str, value: &Option<String>) -> anyhow::Result<Option<Pubkey>> {
    value.as_deref().map(|v| parse_pubkey(field, v)).transpose()
}

// ============================================================================
// CONFIGURATION LOADING AND MANAGEMENT
// ============================================================================

impl Config {
    /// Validates that every configured address parses.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Configuration is valid
    /// - `Err(anyhow::Error)` - An address is malformed or a value is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        let governance = &self.governance;
        parse_pubkey("governance.wh_governance_program_id", &governance.wh_governance_program_id)?;
        parse_pubkey("governance.wh_owner", &governance.wh_owner)?;
        parse_pubkey("governance.lz_cpi_authority", &governance.lz_cpi_authority)?;
        parse_pubkey("governance.payer", &governance.payer)?;

        if let Some(ref upgrade) = self.program_upgrade {
            parse_pubkey("program_upgrade.program", &upgrade.program)?;
            parse_optional("program_upgrade.program_data", &upgrade.program_data)?;
            parse_pubkey("program_upgrade.buffer", &upgrade.buffer)?;
            parse_pubkey("program_upgrade.spill", &upgrade.spill)?;
            parse_optional("program_upgrade.authority", &upgrade.authority)?;
        }

        if let Some(ref extend) = self.program_extend {
            parse_pubkey("program_extend.program", &extend.program)?;
            parse_optional("program_extend.program_data", &extend.program_data)?;
            if extend.additional_bytes == 0 {
                return Err(anyhow::anyhow!(
                    "Configuration error: program_extend.additional_bytes must be greater than 0"
                ));
            }
        }

        for (name, section) in [
            ("set_freeze_authority", &self.set_freeze_authority),
            ("set_mint_authority", &self.set_mint_authority),
        ] {
            if let Some(section) = section {
                parse_pubkey(&format!("{}.mint", name), &section.mint)?;
                parse_pubkey(&format!("{}.new_authority", name), &section.new_authority)?;
                parse_optional(&format!("{}.authority", name), &section.authority)?;
            }
        }

        if let Some(ref ntt) = self.ntt_transfer_mint_authority {
            parse_pubkey("ntt_transfer_mint_authority.ntt_program", &ntt.ntt_program)?;
            parse_pubkey("ntt_transfer_mint_authority.mint", &ntt.mint)?;
            parse_pubkey(
                "ntt_transfer_mint_authority.new_mint_authority",
                &ntt.new_mint_authority,
            )?;
            parse_optional("ntt_transfer_mint_authority.authority", &ntt.authority)?;
        }

        if let Some(ref metadata) = self.update_metadata_authority {
            parse_pubkey("update_metadata_authority.mint", &metadata.mint)?;
            parse_pubkey("update_metadata_authority.new_authority", &metadata.new_authority)?;
            parse_optional("update_metadata_authority.authority", &metadata.authority)?;
        }

        Ok(())
    }

    /// Loads configuration for `network`.
    ///
    /// This function:
    /// 1. Uses `GOVERNANCE_CONFIG_PATH` if set, else `config/governance_<network>.toml`
    /// 2. Parses and validates the file via [`Config::load_from`]
    /// 3. Applies the `RPC_URL` override
    ///
    /// # Returns
    ///
    /// - `Ok(Config)` - Successfully loaded and validated configuration
    /// - `Err(anyhow::Error)` - File missing, unparsable, for another network, or invalid
    pub fn load(network: Network) -> anyhow::Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| network.default_config_path());

        let mut config = Self::load_from(&config_path, network)?;

        if let Ok(rpc_url) = std::env::var(RPC_URL_ENV) {
            tracing::info!("Using RPC endpoint from {}: {}", RPC_URL_ENV, rpc_url);
            config.rpc_url = rpc_url;
        }

        Ok(config)
    }

    /// Loads and validates the configuration file at `config_path`.
    ///
    /// The file's `network` must match `network`.
    pub fn load_from(config_path: &str, network: Network) -> anyhow::Result<Self> {
        if !std::path::Path::new(config_path).exists() {
            return Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/governance.template.toml {}\n\
                Then edit it with the addresses for {}.",
                config_path,
                network.default_config_path(),
                network
            ));
        }

        let content = std::fs::read_to_string(config_path).map_err(|e| {
            anyhow::anyhow!("Failed to read configuration file '{}': {}", config_path, e)
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse '{}': {}", config_path, e))?;

        if config.network != network {
            return Err(anyhow::anyhow!(
                "Configuration file '{}' is for {}, but {} was requested",
                config_path,
                config.network,
                network
            ));
        }

        config.validate()?;
        Ok(config)
    }

    /// Creates a devnet configuration with placeholder action values.
    ///
    /// This configuration is suitable for tests. Governance addresses are the
    /// deployed program ids; action sections point at dummy accounts.
    #[allow(dead_code)]
    pub fn default() -> Self {
        Self {
            network: Network::Devnet,
            rpc_url: Network::Devnet.default_rpc_url().to_string(),
            governance: GovernanceConfig {
                wh_governance_program_id: "SCCGgsntaUPmP6UjwUBNiQQ83ys5fnCHdFASHPV6Fm9".to_string(),
                wh_owner: "66xDajRZ7MTrgePf27NdugVwDBFhKCCY9EYZ7B9CdDWj".to_string(),
                lz_cpi_authority: "AYPtjx4Hc8us1ikULUedkmZ3wtiD6tmL7gK3qe4V3oHt".to_string(),
                payer: "PcJcgdWmFZznhhfN28i6T8GHcwA6jmFGuUeNNGvcSY2".to_string(),
            },
            program_upgrade: None,
            program_extend: None,
            set_freeze_authority: None,
            set_mint_authority: None,
            ntt_transfer_mint_authority: None,
            update_metadata_authority: None,
        }
    }

    pub fn payer(&self) -> anyhow::Result<Pubkey> {
        parse_pubkey("governance.payer", &self.governance.payer)
    }
}
