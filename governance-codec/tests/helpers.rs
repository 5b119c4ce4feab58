//! Shared test helpers for codec tests
//!
//! - **Constants**: Dummy keys and a recorded devnet payload
//! - **Builders**: Sample instructions with a mix of flags and sentinels

#![allow(dead_code)]

use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const DUMMY_PROGRAM_ID: Pubkey = Pubkey::new_from_array([0x11; 32]);
pub const DUMMY_GOVERNANCE_PROGRAM_ID: Pubkey = Pubkey::new_from_array([0x22; 32]);
pub const DUMMY_PAYER: Pubkey = Pubkey::new_from_array([0x33; 32]);
pub const DUMMY_OWNER: Pubkey = Pubkey::new_from_array([0x44; 32]);
pub const DUMMY_CPI_AUTHORITY: Pubkey = Pubkey::new_from_array([0x55; 32]);
pub const DUMMY_ORIGIN_CALLER: [u8; 32] = [0x66; 32];

/// Wormhole payload setting the freeze authority of a devnet SPL mint.
///
/// governance program SCCGgsntaUPmP6UjwUBNiQQ83ys5fnCHdFASHPV6Fm9, target SPL
/// Token, accounts [mint (writable), current authority (signer)], data
/// SetAuthority(FreezeAccount, Some(JDNDBYaXdNiD7peLgRP3TZKwkeCJ3QEFwYkHk6DWbb75)).
pub const DEVNET_SET_FREEZE_AUTHORITY_PAYLOAD: [u8; 206] = [
    0, 0, 0, 0, 0, 0, 0, 0, 71, 101, 110, 101, 114, 97, 108, 80, 117, 114, 112,
    111, 115, 101, 71, 111, 118, 101, 114, 110, 97, 110, 99, 101, 2, 0, 1, 6, 116,
    45, 124, 165, 35, 160, 58, 170, 254, 72, 171, 171, 2, 228, 126, 184, 174, 245,
    52, 21, 203, 96, 60, 71, 163, 204, 248, 100, 216, 109, 192, 6, 221, 246, 225,
    215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133, 237,
    95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169, 0, 2, 164, 250, 210,
    120, 92, 92, 54, 29, 152, 56, 87, 230, 68, 80, 111, 192, 142, 156, 49, 67,
    248, 15, 253, 239, 227, 228, 149, 171, 104, 164, 160, 233, 0, 1, 69, 179, 6,
    49, 101, 155, 184, 159, 227, 246, 178, 126, 34, 103, 108, 82, 61, 233, 148,
    174, 95, 247, 171, 97, 57, 32, 251, 194, 69, 218, 94, 247, 1, 0, 0, 35, 6, 1,
    1, 255, 193, 161, 53, 8, 52, 143, 122, 143, 211, 169, 219, 249, 88, 172, 134,
    35, 28, 115, 30, 133, 210, 76, 252, 137, 107, 244, 56, 111, 146, 20, 136,
];

/// Wormhole payload moving the mainnet USDS mint authority out of the NTT
/// manager.
///
/// governance program SCCGgsntaUPmP6UjwUBNiQQ83ys5fnCHdFASHPV6Fm9, target NTT
/// manager STTUVCMPuNbk21y1J6nqEGXSQ8HKvFmFBKnCvKHTrWn, accounts [config owner
/// (signer), config, token authority, mint (writable), SPL Token], data
/// transfer_mint_authority(N7qfnBZgt4GcCgpa8mUPGCZEG9sCESDizWDFamwvv8v).
pub const NTT_TRANSFER_MINT_AUTHORITY_PAYLOAD: [u8; 313] = [
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

pub const DEVNET_GOVERNANCE_PROGRAM_HEX: &str =
    "06742d7ca523a03aaafe48abab02e47eb8aef53415cb603c47a3ccf864d86dc0";
pub const SPL_TOKEN_PROGRAM_HEX: &str =
    "06ddf6e1d765a193d9cbe146ceeb79ac1cb485ed5f5b37913a8cf5857eff00a9";
pub const DEVNET_MINT_HEX: &str =
    "a4fad2785c5c361d983857e644506fc08e9c3143f80ffdefe3e495ab68a4a0e9";
pub const DEVNET_CURRENT_AUTHORITY_HEX: &str =
    "45b30631659bb89fe3f6b27e22676c523de994ae5ff7ab613920fbc245da5ef7";
pub const DEVNET_SET_FREEZE_AUTHORITY_DATA_HEX: &str =
    "060101ffc1a13508348f7a8fd3a9dbf958ac86231c731e85d24cfc896bf4386f921488";

// ============================================================================
// BUILDERS
// ============================================================================

pub fn pubkey_from_hex(value: &str) -> Pubkey {
    let bytes: [u8; 32] = hex::decode(value)
        .expect("valid hex")
        .try_into()
        .expect("32 bytes");
    Pubkey::new_from_array(bytes)
}

/// Account with a distinct key per index so ordering bugs are visible.
pub fn indexed_account(index: u8, is_signer: bool, is_writable: bool) -> AccountMeta {
    let mut key = [0u8; 32];
    key[0] = index;
    key[31] = 0xA0 | index;
    AccountMeta {
        pubkey: Pubkey::new_from_array(key),
        is_signer,
        is_writable,
    }
}

/// Instruction with three accounts covering every flag combination but one.
pub fn sample_instruction() -> Instruction {
    Instruction {
        program_id: DUMMY_PROGRAM_ID,
        accounts: vec![
            indexed_account(1, true, true),
            indexed_account(2, false, true),
            indexed_account(3, true, false),
        ],
        data: vec![0xDE, 0xAD, 0xBE, 0xEF],
    }
}
