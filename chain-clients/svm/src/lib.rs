//! Solana SVM RPC Client
//!
//! Minimal Solana JSON-RPC client for governance payload checks. It fetches
//! account snapshots and simulates unsigned transactions; it never signs or
//! sends anything.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// ACCOUNT STRUCTURES
// ============================================================================

/// Snapshot of an on-chain account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
    pub executable: bool,
    pub rent_epoch: u64,
}

/// Result of `simulateTransaction`.
///
/// `accounts` follows the order of the addresses passed in; `None` means the
/// account does not exist after the simulated transaction.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub err: Option<serde_json::Value>,
    pub logs: Vec<String>,
    pub accounts: Vec<Option<AccountState>>,
}

// ============================================================================
// JSON-RPC TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcContextValue<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcAccount {
    lamports: u64,
    owner: String,
    data: (String, String),
    executable: bool,
    #[serde(default)]
    rent_epoch: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcBlockhash {
    blockhash: String,
}

#[derive(Debug, Deserialize)]
struct RpcSimulateResult {
    err: Option<serde_json::Value>,
    logs: Option<Vec<String>>,
    accounts: Option<Vec<Option<RpcAccount>>>,
}

impl RpcAccount {
    fn into_state(self) -> Result<AccountState> {
        let owner = Pubkey::from_str(&self.owner)
            .context("Invalid owner pubkey in account response")?;
        let data = STANDARD
            .decode(&self.data.0)
            .context("Failed to decode base64 account data")?;

        Ok(AccountState {
            lamports: self.lamports,
            owner,
            data,
            executable: self.executable,
            rent_epoch: self.rent_epoch,
        })
    }
}

fn into_states(accounts: Vec<Option<RpcAccount>>) -> Result<Vec<Option<AccountState>>> {
    accounts
        .into_iter()
        .map(|account| account.map(RpcAccount::into_state).transpose())
        .collect()
}

// ============================================================================
// CLIENT
// ============================================================================

pub struct SvmClient {
    client: Client,
    rpc_url: String,
}

impl SvmClient {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .no_proxy()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            rpc_url: rpc_url.to_string(),
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Fetches several accounts in one call.
    ///
    /// The result has one entry per requested key, in request order, and
    /// `None` for accounts that do not exist.
    pub async fn get_multiple_accounts(
        &self,
        pubkeys: &[Pubkey],
    ) -> Result<Vec<Option<AccountState>>> {
        let addresses: Vec<String> = pubkeys.iter().map(|key| key.to_string()).collect();
        let params = serde_json::json!([
            addresses,
            { "encoding": "base64" }
        ]);

        let result: RpcContextValue<Vec<Option<RpcAccount>>> =
            self.call("getMultipleAccounts", params).await?;

        if result.value.len() != pubkeys.len() {
            return Err(anyhow::anyhow!(
                "getMultipleAccounts returned {} accounts for {} keys",
                result.value.len(),
                pubkeys.len()
            ));
        }

        into_states(result.value)
    }

    pub async fn get_latest_blockhash(&self) -> Result<Hash> {
        let params = serde_json::json!([{ "commitment": "confirmed" }]);

        let result: RpcContextValue<RpcBlockhash> =
            self.call("getLatestBlockhash", params).await?;

        Hash::from_str(&result.value.blockhash).context("Invalid blockhash in response")
    }

    /// Simulates `transaction` without signature verification and returns the
    /// post-simulation state of `accounts`.
    pub async fn simulate_transaction(
        &self,
        transaction: &Transaction,
        accounts: &[Pubkey],
    ) -> Result<SimulationOutcome> {
        let wire = bincode::serialize(transaction).context("Failed to serialize transaction")?;
        let addresses: Vec<String> = accounts.iter().map(|key| key.to_string()).collect();
        let params = serde_json::json!([
            STANDARD.encode(wire),
            {
                "encoding": "base64",
                "sigVerify": false,
                "replaceRecentBlockhash": false,
                "commitment": "confirmed",
                "accounts": {
                    "encoding": "base64",
                    "addresses": addresses
                }
            }
        ]);

        let result: RpcContextValue<RpcSimulateResult> =
            self.call("simulateTransaction", params).await?;
        let value = result.value;

        let states = match value.accounts {
            Some(states) => into_states(states)?,
            None => vec![None; accounts.len()],
        };
        if states.len() != accounts.len() {
            return Err(anyhow::anyhow!(
                "simulateTransaction returned {} accounts for {} addresses",
                states.len(),
                accounts.len()
            ));
        }

        Ok(SimulationOutcome {
            err: value.err,
            logs: value.logs.unwrap_or_default(),
            accounts: states,
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T> {
        tracing::debug!("SVM RPC call: {}", method);

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        };

        let response: JsonRpcResponse<T> = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to call {}", method))?
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", method))?;

        if let Some(error) = response.error {
            return Err(anyhow::anyhow!("SVM RPC error: {}", error.message));
        }

        response
            .result
            .ok_or_else(|| anyhow::anyhow!("SVM RPC returned no result for {}", method))
    }
}
