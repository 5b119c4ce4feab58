//! Shared test helpers for governance payload tests
//!
//! - **Constants**: Devnet addresses and recorded payloads
//! - **Configuration Builders**: Configs with every action section filled
//! - **Account Builders**: Account snapshots, mints, loader and metadata accounts

#![allow(dead_code)]

use chain_clients_svm::AccountState;
use governance_payloads::actions::loader::{get_program_data_address, UpgradeableLoaderState};
use governance_payloads::config::{
    Config, NttTransferMintAuthorityConfig, ProgramExtendConfig, ProgramUpgradeConfig,
    SetAuthorityConfig, UpdateMetadataAuthorityConfig,
};
use solana_sdk::pubkey::Pubkey;
use spl_token::solana_program::program_option::COption;
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::Mint;
use std::str::FromStr;

// ============================================================================
// CONSTANTS
// ============================================================================

// -------------------------------- DEVNET --------------------------------

pub const DEVNET_PROGRAM: &str = "BnxAbsogxcsFwUHHt787EQUP9DgD8jf1SA2BX4ERD8Rc";
pub const DEVNET_PROGRAM_DATA: &str = "EsBqEQkFSsiRifBgQmtoXJheDJfYEMhgHSETn2MKgGV4";
pub const DEVNET_DEPLOYER: &str = "3ZEoogXb7fmYQFwtmm9cNFdgNepxeWE1S7YutTFVYoxr";
pub const DEVNET_MINT: &str = "C71h4tuPk6f72bAM2D8L2nwH3XtJB6awsw7H6xmNDo3E";
pub const DEVNET_MINT_AUTHORITY: &str = "5h5TjxxZRoD2rtLkqCtt4uTmFVXjsdpEydqa2B5TZJVU";
pub const DEVNET_NEW_FREEZE_AUTHORITY: &str = "JDNDBYaXdNiD7peLgRP3TZKwkeCJ3QEFwYkHk6DWbb75";

/// Wormhole payload extending the devnet program by 1000 bytes, paid by the
/// devnet deployer.
pub const DEVNET_EXTEND_PAYLOAD: [u8; 247] = [
    0, 0, 0, 0, 0, 0, 0, 0, 71, 101, 110, 101, 114, 97, 108, 80, 117, 114, 112, 111,
    115, 101, 71, 111, 118, 101, 114, 110, 97, 110, 99, 101, 2, 0, 1, 6, 116, 45,
    124, 165, 35, 160, 58, 170, 254, 72, 171, 171, 2, 228, 126, 184, 174, 245, 52,
    21, 203, 96, 60, 71, 163, 204, 248, 100, 216, 109, 192, 2, 168, 246, 145, 78,
    136, 161, 176, 226, 16, 21, 62, 247, 99, 174, 43, 0, 194, 185, 61, 22, 193, 36,
    210, 192, 83, 122, 16, 4, 128, 0, 0, 0, 4, 206, 3, 55, 193, 93, 9, 154, 184,
    155, 29, 64, 47, 213, 135, 125, 244, 10, 9, 222, 212, 133, 109, 173, 189, 195,
    55, 213, 16, 220, 6, 97, 239, 0, 1, 160, 90, 97, 173, 10, 59, 151, 198, 83, 179,
    77, 253, 83, 250, 151, 199, 241, 246, 159, 243, 33, 27, 96, 188, 149, 134, 149,
    164, 87, 22, 171, 207, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 37, 249, 146, 67, 177, 163,
    234, 226, 85, 154, 57, 97, 164, 16, 202, 67, 147, 213, 244, 142, 190, 63, 92,
    141, 154, 197, 50, 67, 68, 24, 132, 119, 1, 1, 0, 8, 6, 0, 0, 0, 232, 3, 0, 0,
];

// -------------------------------- MAINNET -------------------------------

pub const MAINNET_NTT_PROGRAM: &str = "STTUVCMPuNbk21y1J6nqEGXSQ8HKvFmFBKnCvKHTrWn";
pub const MAINNET_USDS_MINT: &str = "USDSwr9ApdHk5bvJKMjzff41FfuX8bSxdKcR81vTwcA";
pub const MAINNET_WH_OWNER: &str = "66xDajRZ7MTrgePf27NdugVwDBFhKCCY9EYZ7B9CdDWj";
pub const MAINNET_NEW_MINT_AUTHORITY: &str = "N7qfnBZgt4GcCgpa8mUPGCZEG9sCESDizWDFamwvv8v";

/// Wormhole payload moving the USDS mint authority out of the NTT manager.
/// The config owner is written as a concrete key, not the owner placeholder.
pub const MAINNET_NTT_TRANSFER_MINT_AUTHORITY_PAYLOAD: [u8; 313] = [
    0, 0, 0, 0, 0, 0, 0, 0, 71, 101, 110, 101, 114, 97, 108, 80, 117, 114, 112, 111,
    115, 101, 71, 111, 118, 101, 114, 110, 97, 110, 99, 101, 2, 0, 1, 6, 116, 45,
    124, 165, 35, 160, 58, 170, 254, 72, 171, 171, 2, 228, 126, 184, 174, 245, 52,
    21, 203, 96, 60, 71, 163, 204, 248, 100, 216, 109, 192, 6, 133, 111, 67, 171,
    244, 170, 164, 162, 107, 50, 174, 142, 164, 203, 143, 173, 200, 224, 45, 38,
    119, 3, 251, 213, 249, 218, 216, 95, 109, 0, 179, 0, 5, 75, 208, 197, 204, 130,
    227, 14, 37, 5, 6, 179, 170, 80, 191, 38, 107, 219, 172, 12, 179, 231, 72, 100,
    133, 134, 70, 201, 146, 29, 32, 118, 60, 1, 0, 181, 63, 32, 15, 141, 179, 87,
    249, 225, 233, 130, 239, 14, 196, 179, 184, 121, 249, 246, 81, 109, 82, 71, 48,
    126, 186, 240, 13, 24, 123, 229, 26, 0, 0, 159, 146, 220, 179, 101, 223, 33,
    164, 164, 236, 35, 216, 255, 76, 192, 32, 205, 208, 152, 149, 248, 18, 156, 44,
    47, 180, 50, 137, 188, 83, 249, 95, 0, 0, 7, 7, 49, 45, 29, 65, 218, 113, 240,
    251, 40, 12, 22, 98, 205, 101, 235, 235, 46, 8, 89, 192, 203, 174, 63, 219, 220,
    178, 108, 134, 224, 175, 0, 1, 6, 221, 246, 225, 215, 101, 161, 147, 217, 203,
    225, 70, 206, 235, 121, 172, 28, 180, 133, 237, 95, 91, 55, 145, 58, 140, 245,
    133, 126, 255, 0, 169, 0, 0, 0, 40, 87, 237, 187, 84, 168, 175, 241, 75, 5, 104,
    238, 20, 144, 17, 150, 10, 99, 96, 143, 237, 71, 209, 247, 252, 198, 164, 27,
    204, 205, 98, 91, 56, 155, 22, 68, 199, 20, 64, 232, 167,
];

// ------------------------------- DUMMIES --------------------------------

pub const DUMMY_RPC_URL: &str = "http://127.0.0.1:8899";

pub fn dummy_pubkey(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

pub fn pubkey(value: &str) -> Pubkey {
    Pubkey::from_str(value).expect("valid base58 pubkey")
}

/// ProgramData PDA of the dummy program `dummy_pubkey(1)`.
pub fn dummy_program_data() -> Pubkey {
    get_program_data_address(&dummy_pubkey(1))
}

// ============================================================================
// CONFIGURATION BUILDERS
// ============================================================================

/// Default config with every action section pointing at dummy accounts.
pub fn build_test_config() -> Config {
    let mut config = Config::default();
    config.rpc_url = DUMMY_RPC_URL.to_string();
    config.program_upgrade = Some(ProgramUpgradeConfig {
        program: dummy_pubkey(1).to_string(),
        program_data: None,
        buffer: dummy_pubkey(3).to_string(),
        spill: dummy_pubkey(4).to_string(),
        authority: None,
    });
    config.program_extend = Some(ProgramExtendConfig {
        program: dummy_pubkey(1).to_string(),
        program_data: Some(dummy_program_data().to_string()),
        additional_bytes: 1_000,
    });
    config.set_freeze_authority = Some(SetAuthorityConfig {
        mint: dummy_pubkey(5).to_string(),
        new_authority: dummy_pubkey(6).to_string(),
        authority: None,
    });
    config.set_mint_authority = Some(SetAuthorityConfig {
        mint: dummy_pubkey(5).to_string(),
        new_authority: dummy_pubkey(7).to_string(),
        authority: Some(dummy_pubkey(8).to_string()),
    });
    config.ntt_transfer_mint_authority = Some(NttTransferMintAuthorityConfig {
        ntt_program: dummy_pubkey(10).to_string(),
        mint: dummy_pubkey(5).to_string(),
        new_mint_authority: dummy_pubkey(7).to_string(),
        authority: None,
    });
    config.update_metadata_authority = Some(UpdateMetadataAuthorityConfig {
        mint: dummy_pubkey(5).to_string(),
        new_authority: dummy_pubkey(6).to_string(),
        authority: None,
    });
    config
}

/// Config matching the mainnet NTT transfer mint authority payload.
pub fn build_mainnet_ntt_config() -> Config {
    let mut config = Config::default();
    config.network = governance_payloads::config::Network::Mainnet;
    config.governance.wh_owner = MAINNET_WH_OWNER.to_string();
    config.ntt_transfer_mint_authority = Some(NttTransferMintAuthorityConfig {
        ntt_program: MAINNET_NTT_PROGRAM.to_string(),
        mint: MAINNET_USDS_MINT.to_string(),
        new_mint_authority: MAINNET_NEW_MINT_AUTHORITY.to_string(),
        authority: None,
    });
    config
}

/// Config matching the devnet extend payload.
pub fn build_devnet_extend_config() -> Config {
    let mut config = Config::default();
    config.governance.payer = DEVNET_DEPLOYER.to_string();
    config.program_extend = Some(ProgramExtendConfig {
        program: DEVNET_PROGRAM.to_string(),
        program_data: Some(DEVNET_PROGRAM_DATA.to_string()),
        additional_bytes: 1_000,
    });
    config
}

// ============================================================================
// ACCOUNT BUILDERS
// ============================================================================

pub fn account(lamports: u64, owner: Pubkey, data: Vec<u8>) -> AccountState {
    AccountState {
        lamports,
        owner,
        data,
        executable: false,
        rent_epoch: u64::MAX,
    }
}

pub fn system_account(lamports: u64) -> AccountState {
    account(lamports, solana_sdk::system_program::id(), vec![])
}

pub fn mint_data(mint_authority: Option<Pubkey>, freeze_authority: Option<Pubkey>) -> Vec<u8> {
    let mint = Mint {
        mint_authority: mint_authority.map_or(COption::None, COption::Some),
        supply: 1_000_000,
        decimals: 6,
        is_initialized: true,
        freeze_authority: freeze_authority.map_or(COption::None, COption::Some),
    };
    let mut data = vec![0u8; Mint::LEN];
    Mint::pack(mint, &mut data).expect("pack mint");
    data
}

pub fn mint_account(mint_authority: Option<Pubkey>, freeze_authority: Option<Pubkey>) -> AccountState {
    account(
        1_461_600,
        spl_token::id(),
        mint_data(mint_authority, freeze_authority),
    )
}

pub fn buffer_data(authority: &Pubkey, code: &[u8]) -> Vec<u8> {
    let mut data = bincode::serialize(&UpgradeableLoaderState::Buffer {
        authority_address: Some(*authority),
    })
    .expect("serialize buffer state");
    data.extend_from_slice(code);
    data
}

/// ProgramData account with `code` padded to `code_len`.
pub fn program_data_data(slot: u64, authority: &Pubkey, code: &[u8], code_len: usize) -> Vec<u8> {
    let mut data = bincode::serialize(&UpgradeableLoaderState::ProgramData {
        slot,
        upgrade_authority_address: Some(*authority),
    })
    .expect("serialize program data state");
    data.extend_from_slice(code);
    data.resize(UpgradeableLoaderState::size_of_programdata_metadata() + code_len, 0);
    data
}

fn borsh_string(data: &mut Vec<u8>, value: &str) {
    data.extend_from_slice(&(value.len() as u32).to_le_bytes());
    data.extend_from_slice(value.as_bytes());
}

/// MetadataV1 account with no creators, collection or uses, zero padded.
pub fn metadata_data(update_authority: &Pubkey, mint: &Pubkey, name: &str) -> Vec<u8> {
    let mut data = vec![4];
    data.extend_from_slice(update_authority.as_ref());
    data.extend_from_slice(mint.as_ref());
    borsh_string(&mut data, name);
    borsh_string(&mut data, "USDS");
    borsh_string(&mut data, "https://sky.money/usds.json");
    data.extend_from_slice(&0u16.to_le_bytes());
    // creators, primary_sale_happened, is_mutable
    data.extend_from_slice(&[0, 0, 1]);
    // edition_nonce Some(255)
    data.extend_from_slice(&[1, 255]);
    // token_standard, collection, uses, collection_details, programmable_config
    data.extend_from_slice(&[0, 0, 0, 0, 0]);
    data.resize(679, 0);
    data
}

pub fn metadata_account(update_authority: &Pubkey, mint: &Pubkey) -> AccountState {
    account(
        5_616_720,
        governance_payloads::actions::metadata::metadata_program_id(),
        metadata_data(update_authority, mint, "USDS Stablecoin"),
    )
}
