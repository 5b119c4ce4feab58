//! Governance Payloads Library
//!
//! Generates cross-chain governance payloads for Solana administrative actions
//! and checks them by simulating the decoded instruction against a live
//! cluster before they are proposed.
pub mod actions;
pub mod assertions;
pub mod config;
pub mod payload_file;
pub mod simulation;
pub mod validate;

// Re-export commonly used types
pub use actions::{decode_for, encode_for, ActionKind, GovernanceAction, GovernanceProtocol};
pub use assertions::{assert_no_account_changes, diff_account_data, DataChange, StateChangeError};
pub use config::{Config, Network};
pub use payload_file::{read_payload, write_payload, PayloadFileError, PayloadFormat};
pub use simulation::{simulate_instructions, AccountChange, SimulationError, SimulationReport};
pub use validate::validate_simulation;
