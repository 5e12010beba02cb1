use anyhow::{Context, Result};
use clap::Parser;
use ledger_core::{Block, HashScheme, Ledger, LedgerConfig, Transaction};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Replay a sequence of actions against an in-memory ledger")]
struct Cli {
    /// TOML file with ledger settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fingerprint scheme (joined or sha256); overrides the config file
    #[arg(long)]
    scheme: Option<HashScheme>,
    /// Default sender for `add` actions; overrides the config file
    #[arg(long)]
    sender: Option<String>,
    /// Print results as JSON lines
    #[arg(long)]
    json: bool,
    /// Actions, run in order: add:RECIPIENT[:AMOUNT], mine, list, last, tamper, verify
    #[arg(required = true)]
    actions: Vec<Action>,
}

#[derive(Clone, Debug, PartialEq)]
enum Action {
    Add {
        recipient: String,
        amount: Option<f64>,
    },
    Mine,
    List,
    Last,
    Tamper,
    Verify,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mine" => return Ok(Action::Mine),
            "list" => return Ok(Action::List),
            "last" => return Ok(Action::Last),
            "tamper" => return Ok(Action::Tamper),
            "verify" => return Ok(Action::Verify),
            _ => {}
        }
        let rest = s
            .strip_prefix("add:")
            .ok_or_else(|| format!("unknown action '{s}'"))?;
        let (recipient, amount) = match rest.split_once(':') {
            Some((recipient, amount)) => {
                let amount = amount
                    .parse::<f64>()
                    .map_err(|e| format!("bad amount '{amount}': {e}"))?;
                (recipient, Some(amount))
            }
            None => (rest, None),
        };
        if recipient.is_empty() {
            return Err("add needs a recipient".into());
        }
        Ok(Action::Add {
            recipient: recipient.to_string(),
            amount,
        })
    }
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Output<'a> {
    Pending { transactions: &'a [Transaction] },
    Mined { block: &'a Block },
    Block { block: &'a Block },
    Last { block: Option<&'a Block> },
    Tampered { index: u64 },
    Valid { blocks: usize },
}

fn emit(json: bool, out: &Output<'_>) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(out)?);
        return Ok(());
    }
    match out {
        Output::Pending { transactions } => println!("pending: {transactions:?}"),
        Output::Mined { block } => println!("mined: {block:?}"),
        Output::Block { block } => println!("{block:?}"),
        Output::Last { block } => match block {
            Some(block) => println!("last: {block:?}"),
            None => println!("last: none"),
        },
        Output::Tampered { index } => println!("overwrote block {index}"),
        Output::Valid { blocks } => println!("chain valid ({blocks} blocks)"),
    }
    Ok(())
}

fn tamper_block() -> Block {
    Block::new("", 0, vec![Transaction::new("Ximena", "Pedro", 10.0)])
}

fn run(ledger: &Ledger, action: &Action, json: bool) -> Result<()> {
    match action {
        Action::Add { recipient, amount } => {
            ledger.add_transaction(recipient, None, *amount)?;
            let pending = ledger.pending_transactions();
            emit(json, &Output::Pending { transactions: &pending })
        }
        Action::Mine => {
            let block = ledger.mine_block()?;
            emit(json, &Output::Mined { block: &block })
        }
        Action::List => {
            for block in ledger.list_blocks() {
                emit(json, &Output::Block { block: &block })?;
            }
            Ok(())
        }
        Action::Last => {
            let last = ledger.get_last_block();
            emit(json, &Output::Last { block: last.as_ref() })
        }
        Action::Tamper => {
            ledger.corrupt_block(0, tamper_block())?;
            emit(json, &Output::Tampered { index: 0 })
        }
        Action::Verify => emit(json, &Output::Valid { blocks: ledger.len() }),
    }
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    if let Some(scheme) = cli.scheme {
        config.hash_scheme = scheme;
    }
    if let Some(sender) = cli.sender {
        config.default_sender = sender;
    }

    let ledger = Ledger::new(config);
    for action in &cli.actions {
        info!("running {:?}", action);
        run(&ledger, action, cli.json)?;
        // The action has already been applied; a broken chain stops the run
        // without undoing it.
        ledger.check_chain().context("chain verification failed")?;
    }
    Ok(())
}
