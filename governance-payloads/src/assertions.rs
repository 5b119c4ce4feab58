//! Account state assertions for simulated governance transactions.

use chain_clients_svm::AccountState;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Contiguous run of differing bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataChange {
    pub offset: usize,
    pub before: Vec<u8>,
    pub after: Vec<u8>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateChangeError {
    #[error("Account existence changed (before: {before}, after: {after})")]
    Existence { before: bool, after: bool },

    #[error("Data changed in {} region(s)", .changes.len())]
    Data { changes: Vec<DataChange> },

    #[error("Lamport value changed: {before} -> {after}")]
    Lamports { before: u64, after: u64 },

    #[error("Executable value changed: {before} -> {after}")]
    Executable { before: bool, after: bool },

    #[error("rentEpoch value changed: {before} -> {after}")]
    RentEpoch { before: u64, after: u64 },

    #[error("Owner value changed: {before} -> {after}")]
    Owner { before: Pubkey, after: Pubkey },
}

/// Fails if the account changed in any way.
///
/// A missing account on both sides counts as unchanged.
/// `allow_lamport_change` skips the lamport check, for the fee payer.
pub fn assert_no_account_changes(
    before: Option<&AccountState>,
    after: Option<&AccountState>,
    allow_lamport_change: bool,
) -> Result<(), StateChangeError> {
    let (before, after) = match (before, after) {
        (None, None) => return Ok(()),
        (Some(before), Some(after)) => (before, after),
        (before, after) => {
            return Err(StateChangeError::Existence {
                before: before.is_some(),
                after: after.is_some(),
            })
        }
    };

    if before.data != after.data {
        return Err(StateChangeError::Data {
            changes: diff_account_data(&before.data, &after.data),
        });
    }
    if !allow_lamport_change && before.lamports != after.lamports {
        return Err(StateChangeError::Lamports {
            before: before.lamports,
            after: after.lamports,
        });
    }
    if before.executable != after.executable {
        return Err(StateChangeError::Executable {
            before: before.executable,
            after: after.executable,
        });
    }
    if before.rent_epoch != after.rent_epoch {
        return Err(StateChangeError::RentEpoch {
            before: before.rent_epoch,
            after: after.rent_epoch,
        });
    }
    if before.owner != after.owner {
        return Err(StateChangeError::Owner {
            before: before.owner,
            after: after.owner,
        });
    }

    Ok(())
}

/// Groups differing bytes into contiguous runs.
///
/// Bytes are compared over the common length. If the lengths differ, the
/// tail of the longer side is reported as one more run at the common length.
pub fn diff_account_data(before: &[u8], after: &[u8]) -> Vec<DataChange> {
    let common = before.len().min(after.len());
    let mut changes: Vec<DataChange> = Vec::new();
    let mut open = false;

    for i in 0..common {
        if before[i] != after[i] {
            match changes.last_mut() {
                Some(change) if open => {
                    change.before.push(before[i]);
                    change.after.push(after[i]);
                }
                _ => changes.push(DataChange {
                    offset: i,
                    before: vec![before[i]],
                    after: vec![after[i]],
                }),
            }
            open = true;
        } else {
            open = false;
        }
    }

    if before.len() != after.len() {
        changes.push(DataChange {
            offset: common,
            before: before[common..].to_vec(),
            after: after[common..].to_vec(),
        });
    }

    changes
}
