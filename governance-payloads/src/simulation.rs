//! Transaction simulation with before/after account snapshots.

use chain_clients_svm::{AccountState, SvmClient};
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Simulation failed: {err}")]
    Failed { err: String, logs: Vec<String> },

    #[error(transparent)]
    Rpc(#[from] anyhow::Error),
}

/// State of one account around the simulated transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountChange {
    pub before: Option<AccountState>,
    pub after: Option<AccountState>,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Every account the transaction touches, payer first
    pub keys: Vec<Pubkey>,
    pub accounts: HashMap<Pubkey, AccountChange>,
    pub logs: Vec<String>,
}

impl SimulationReport {
    pub fn get(&self, key: &Pubkey) -> Option<&AccountChange> {
        self.accounts.get(key)
    }

    /// Like [`SimulationReport::get`] but fails when the account was not part
    /// of the transaction.
    pub fn require(&self, key: &Pubkey) -> anyhow::Result<&AccountChange> {
        self.get(key)
            .ok_or_else(|| anyhow::anyhow!("Account {} is not part of the simulated transaction", key))
    }
}

/// Payer followed by every instruction account, first occurrence wins.
pub fn unique_account_keys(payer: &Pubkey, instructions: &[Instruction]) -> Vec<Pubkey> {
    let mut keys = vec![*payer];
    for account in instructions.iter().flat_map(|ix| ix.accounts.iter()) {
        if !keys.contains(&account.pubkey) {
            keys.push(account.pubkey);
        }
    }
    keys
}

/// Simulates `instructions` as one unsigned transaction paid by `payer`.
///
/// Account state is fetched before simulating and returned alongside the
/// simulated post-state for every account the instructions reference.
pub async fn simulate_instructions(
    client: &SvmClient,
    payer: &Pubkey,
    instructions: &[Instruction],
) -> Result<SimulationReport, SimulationError> {
    let keys = unique_account_keys(payer, instructions);
    debug!("Simulating {} instruction(s) over {} accounts", instructions.len(), keys.len());

    let before = client.get_multiple_accounts(&keys).await?;

    let blockhash = client.get_latest_blockhash().await?;
    let message = Message::new_with_blockhash(instructions, Some(payer), &blockhash);
    let transaction = Transaction::new_unsigned(message);

    let outcome = client.simulate_transaction(&transaction, &keys).await?;
    if let Some(err) = outcome.err {
        error!("Simulation failed: {}", err);
        for line in &outcome.logs {
            error!("  {}", line);
        }
        return Err(SimulationError::Failed {
            err: err.to_string(),
            logs: outcome.logs,
        });
    }

    info!("Simulation succeeded ({} log lines)", outcome.logs.len());

    if before.len() != keys.len() || outcome.accounts.len() != keys.len() {
        return Err(SimulationError::Rpc(anyhow::anyhow!(
            "Expected {} account snapshots, got {} before and {} after",
            keys.len(),
            before.len(),
            outcome.accounts.len()
        )));
    }

    let accounts = keys
        .iter()
        .zip(before)
        .zip(outcome.accounts)
        .map(|((key, before), after)| (*key, AccountChange { before, after }))
        .collect();

    Ok(SimulationReport {
        keys,
        accounts,
        logs: outcome.logs,
    })
}
