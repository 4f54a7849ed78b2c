//! `companies` — CLI front end for the issuance engine.
//!
//! Every stateful command loads the snapshot file, applies exactly one
//! operation, and writes the snapshot back, so sequential invocations form
//! one serialized state machine over the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use rand::{rngs::OsRng, RngCore};

use companies_ledger::{
    Address, Amount, CompaniesEngine, CompanyEntry, EngineSnapshot, TextDescriptor,
    DEFAULT_UNIT_PRICE,
};

#[derive(Parser)]
#[command(name = "companies", version, about = "Bounded-catalog token issuance ledger")]
struct Cli {
    /// Snapshot file carrying the engine state between invocations.
    #[arg(long, global = true, default_value = "companies.snapshot.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seed a fresh engine from a JSON catalog file (array of
    /// {name, tags, batch} objects).
    Init {
        /// Catalog seed file.
        #[arg(long)]
        catalog: PathBuf,
        /// Owner address; omit to disable withdrawal permanently.
        #[arg(long)]
        owner: Option<Address>,
        /// Unit price in smallest currency units.
        #[arg(long, default_value_t = DEFAULT_UNIT_PRICE)]
        price: Amount,
    },
    /// Total catalog length.
    Supply,
    /// Remaining unissued slots.
    Available,
    /// Mint tokens against an attached payment.
    Mint {
        #[arg(long)]
        caller: Address,
        #[arg(long)]
        count: u64,
        /// Attached payment in smallest currency units; must equal
        /// count * unit price exactly.
        #[arg(long)]
        payment: Amount,
    },
    /// Token at a 0-based issuance-order index.
    Token { index: u64 },
    /// Owner of an issued token.
    OwnerOf { id: u64 },
    /// Rendered metadata for an issued token.
    Describe { id: u64 },
    /// Token ids held by an address.
    Holdings { address: Address },
    /// Current treasury balance.
    Balance,
    /// Transfer the full treasury balance to the owner.
    Withdraw {
        #[arg(long)]
        caller: Address,
    },
    /// Generate a fresh random address.
    NewAccount,
}

type Engine = CompaniesEngine<TextDescriptor>;

fn load_engine(path: &Path) -> Result<Engine, String> {
    let bytes = fs::read(path).map_err(|err| format!("read {}: {err}", path.display()))?;
    let snapshot: EngineSnapshot = serde_json::from_slice(&bytes)
        .map_err(|err| format!("parse {}: {err}", path.display()))?;
    CompaniesEngine::restore(TextDescriptor, snapshot).map_err(|err| err.to_string())
}

fn save_engine(path: &Path, engine: &Engine) -> Result<(), String> {
    let json = serde_json::to_vec_pretty(&engine.snapshot())
        .map_err(|err| format!("encode snapshot: {err}"))?;
    fs::write(path, json).map_err(|err| format!("write {}: {err}", path.display()))
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Init {
            catalog,
            owner,
            price,
        } => {
            let bytes =
                fs::read(&catalog).map_err(|err| format!("read {}: {err}", catalog.display()))?;
            let entries: Vec<CompanyEntry> = serde_json::from_slice(&bytes)
                .map_err(|err| format!("parse {}: {err}", catalog.display()))?;
            let engine = CompaniesEngine::with_unit_price(TextDescriptor, entries, owner, price);
            save_engine(&cli.state, &engine)?;
            println!(
                "catalog seeded ({} companies) -> {}",
                engine.company_supply(),
                cli.state.display()
            );
        }
        Command::Supply => {
            let engine = load_engine(&cli.state)?;
            println!("{}", engine.company_supply());
        }
        Command::Available => {
            let engine = load_engine(&cli.state)?;
            println!("{}", engine.available_supply());
        }
        Command::Mint {
            caller,
            count,
            payment,
        } => {
            let mut engine = load_engine(&cli.state)?;
            let tokens = engine
                .mint(&caller, count, payment)
                .map_err(|err| err.to_string())?;
            save_engine(&cli.state, &engine)?;
            for token in &tokens {
                println!("token #{} (slot {}) -> {}", token.id, token.slot, token.owner);
            }
        }
        Command::Token { index } => {
            let engine = load_engine(&cli.state)?;
            let token = engine.token_by_index(index).map_err(|err| err.to_string())?;
            println!("token #{} (slot {}) -> {}", token.id, token.slot, token.owner);
        }
        Command::OwnerOf { id } => {
            let engine = load_engine(&cli.state)?;
            println!("{}", engine.owner_of(id).map_err(|err| err.to_string())?);
        }
        Command::Describe { id } => {
            let engine = load_engine(&cli.state)?;
            let meta = engine.describe(id).map_err(|err| err.to_string())?;
            println!("{}", meta.description);
        }
        Command::Holdings { address } => {
            let engine = load_engine(&cli.state)?;
            for id in engine.tokens_of(&address) {
                println!("{id}");
            }
        }
        Command::Balance => {
            let engine = load_engine(&cli.state)?;
            println!("{}", engine.treasury_balance());
        }
        Command::Withdraw { caller } => {
            let mut engine = load_engine(&cli.state)?;
            let withdrawn = engine.withdraw(&caller).map_err(|err| err.to_string())?;
            save_engine(&cli.state, &engine)?;
            println!("withdrawn {withdrawn} -> {caller}");
        }
        Command::NewAccount => {
            let mut bytes = [0u8; 20];
            OsRng.fill_bytes(&mut bytes);
            println!("0x{}", hex::encode(bytes));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
