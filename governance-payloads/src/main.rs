//! Governance Payloads CLI
//!
//! Generates Wormhole or LayerZero governance payloads for Solana actions,
//! decodes them back into instructions, and simulates them against the
//! configured cluster to check the resulting state changes. Nothing is ever
//! signed or sent.

use anyhow::{Context, Result};
use chain_clients_svm::SvmClient;
use governance_payloads::actions::{ActionKind, GovernanceAction, GovernanceProtocol};
use governance_payloads::config::{Config, Network, CONFIG_PATH_ENV};
use governance_payloads::payload_file::{
    format_payload, read_payload, read_payload_as, write_payload, PayloadFormat,
};
use governance_payloads::simulation::{simulate_instructions, SimulationError, SimulationReport};
use governance_payloads::{diff_account_data, validate_simulation};
use solana_sdk::instruction::Instruction;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// CLI ENTRYPOINT
// ============================================================================

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout carries only payloads and reports
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    if let Err(error) = run().await {
        eprintln!("[governance-payloads] Error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let command = args[0].as_str();
    let action_name = args
        .get(1)
        .filter(|arg| !arg.starts_with("--"))
        .ok_or_else(|| anyhow::anyhow!("Missing <action> after '{}'", command))?;
    let kind: ActionKind = action_name.parse()?;
    let options = parse_options(&args[2..])?;

    let network: Network = options
        .get("network")
        .map(|value| value.parse())
        .transpose()?
        .unwrap_or(Network::Devnet);
    let protocol: GovernanceProtocol = options
        .get("protocol")
        .map(|value| value.parse())
        .transpose()?
        .unwrap_or(GovernanceProtocol::Wormhole);
    let format: Option<PayloadFormat> = options
        .get("format")
        .map(|value| value.parse())
        .transpose()?;

    if let Some(path) = options.get("config") {
        std::env::set_var(CONFIG_PATH_ENV, path);
        info!("Using custom config: {}", path);
    }

    let config = Config::load(network)?;
    info!("Loaded {} configuration", config.network);

    let action = GovernanceAction::from_config(kind, &config)?;
    let file = options.get("file").map(PathBuf::from);

    match command {
        "generate" => handle_generate(&action, protocol, &config, file.as_deref(), format),
        "decode" => {
            let payload = load_payload(file.as_deref(), format)?;
            let instruction = action.decode(protocol, &config, &payload)?;
            print_instruction(&instruction);
            Ok(())
        }
        "simulate" => {
            let payload = load_payload(file.as_deref(), format)?;
            let report = simulate_payload(&action, protocol, &config, &payload).await?;
            print_report(&report);
            Ok(())
        }
        "validate" => {
            let payload = load_payload(file.as_deref(), format)?;
            let report = simulate_payload(&action, protocol, &config, &payload).await?;
            let authority = action.resolved_authority(protocol, &config)?;
            validate_simulation(&action, &report, &config.payer()?, &authority)?;
            println!("{} payload validated on {}", kind.name(), config.network);
            Ok(())
        }
        other => {
            print_usage();
            Err(anyhow::anyhow!("Unknown command '{}'", other))
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

fn handle_generate(
    action: &GovernanceAction,
    protocol: GovernanceProtocol,
    config: &Config,
    file: Option<&Path>,
    format: Option<PayloadFormat>,
) -> Result<()> {
    let payload = action.encode(protocol, config)?;
    info!(
        "Generated {} byte {} payload for {}",
        payload.len(),
        protocol,
        action.kind().name()
    );

    match file {
        Some(path) => {
            let format = format.unwrap_or_else(|| PayloadFormat::from_path(path));
            write_payload(path, &payload, format)?;
            println!("Wrote {} payload to {}", format, path.display());
        }
        None => println!("{}", format_payload(&payload, format.unwrap_or(PayloadFormat::Hex))),
    }
    Ok(())
}

fn load_payload(file: Option<&Path>, format: Option<PayloadFormat>) -> Result<Vec<u8>> {
    let path = file.ok_or_else(|| anyhow::anyhow!("--file <path> is required"))?;
    let payload = match format {
        Some(format) => read_payload_as(path, format)?,
        None => read_payload(path)?,
    };
    info!("Read {} byte payload from {}", payload.len(), path.display());
    Ok(payload)
}

async fn simulate_payload(
    action: &GovernanceAction,
    protocol: GovernanceProtocol,
    config: &Config,
    payload: &[u8],
) -> Result<SimulationReport> {
    let instruction = action.decode(protocol, config, payload)?;
    let client = SvmClient::new(&config.rpc_url)?;
    let payer = config.payer()?;

    match simulate_instructions(&client, &payer, &[instruction]).await {
        Ok(report) => Ok(report),
        Err(SimulationError::Failed { err, logs }) => {
            for line in &logs {
                eprintln!("  {}", line);
            }
            Err(anyhow::anyhow!("Simulation failed: {}", err))
        }
        Err(SimulationError::Rpc(error)) => Err(error).context("Simulation RPC call failed"),
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_instruction(instruction: &Instruction) {
    println!("Program: {}", instruction.program_id);
    println!("Accounts:");
    for (i, account) in instruction.accounts.iter().enumerate() {
        println!(
            "  {:>2}: {} signer={} writable={}",
            i, account.pubkey, account.is_signer, account.is_writable
        );
    }
    println!("Data: {}", hex::encode(&instruction.data));
}

fn print_report(report: &SimulationReport) {
    for key in &report.keys {
        let Some(change) = report.get(key) else {
            continue;
        };
        println!("{}", key);
        match (&change.before, &change.after) {
            (None, None) => println!("  does not exist"),
            (None, Some(_)) => println!("  created"),
            (Some(_), None) => println!("  closed"),
            (Some(before), Some(after)) => {
                if before.lamports != after.lamports {
                    println!("  lamports {} -> {}", before.lamports, after.lamports);
                }
                if before.owner != after.owner {
                    println!("  owner {} -> {}", before.owner, after.owner);
                }
                let changes = diff_account_data(&before.data, &after.data);
                if changes.is_empty() {
                    println!("  no data changes");
                }
                for data_change in changes {
                    println!(
                        "  data @{}: {} -> {}",
                        data_change.offset,
                        hex::encode(&data_change.before),
                        hex::encode(&data_change.after)
                    );
                }
            }
        }
    }
}

// ============================================================================
// ARGUMENT PARSING
// ============================================================================

/// Collects `--name value` pairs.
fn parse_options(args: &[String]) -> Result<HashMap<String, String>> {
    let mut options = HashMap::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let name = arg
            .strip_prefix("--")
            .ok_or_else(|| anyhow::anyhow!("Unexpected argument '{}'", arg))?;
        let value = iter
            .next()
            .ok_or_else(|| anyhow::anyhow!("Missing value for --{}", name))?;
        options.insert(name.to_string(), value.clone());
    }
    Ok(options)
}

fn print_usage() {
    let actions: Vec<&str> = ActionKind::ALL.iter().map(|kind| kind.name()).collect();
    eprintln!(
        r#"Governance Payloads CLI

Usage:
  governance-payloads <command> <action> [--option value]...

Commands:
  generate   Build the payload for <action>; writes --file or prints to stdout
  decode     Decode --file into the instruction it executes
  simulate   Decode --file and simulate it, printing every account change
  validate   Simulate --file and check the state changes expected for <action>

Actions:
  {}

Options:
  --network <devnet|mainnet>        Network (default: devnet)
  --protocol <wormhole|layerzero>   Governance protocol (default: wormhole)
  --config <path>                   Config file (default: config/governance_<network>.toml)
  --file <path>                     Payload file
  --format <json|hex>               Payload file format (default: from extension)
  --help, -h                        Show this help message

Environment variables:
  GOVERNANCE_CONFIG_PATH   Path to config file (overridden by --config)
  RPC_URL                  Solana RPC endpoint (overrides the config file)"#,
        actions.join(", ")
    );
}
