//! vectorrep CLI
//!
//! Loads key=value pairs into a vector memtable and reads them back in
//! key order.

use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vectorrep::memtable::decode_entry;
use vectorrep::{
    EntryArena, LengthPrefixedKeyComparator, MemTableConfig, MemTableError, MemTableRep,
    MemTableRepFactory, RepIterator, Result, VectorRepFactory,
};

/// vectorrep CLI
#[derive(Parser, Debug)]
#[command(name = "vectorrep-cli")]
#[command(about = "Load entries into a vector memtable and scan them in order")]
#[command(version)]
struct Args {
    /// Memtable representation (vector or vector:<count>)
    #[arg(short, long, default_value = "vector")]
    memtable: String,

    /// Entry to insert, as key=value (repeatable)
    #[arg(short, long = "entry")]
    entries: Vec<String>,

    /// Read through a snapshot of the mutable memtable instead of freezing it
    #[arg(long)]
    mutable: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print all entries in ascending key order
    Scan,

    /// Print all entries in descending key order
    Reverse,

    /// Print entries starting at the first key >= target
    Seek {
        /// The key to seek to
        target: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vectorrep=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config: MemTableConfig = args.memtable.parse()?;
    let factory = VectorRepFactory::from(&config);
    tracing::info!("vectorrep v{} using {} ({})", vectorrep::VERSION, factory.name(), config);

    let mut arena = EntryArena::new();
    for raw in &args.entries {
        let (key, value) = raw.split_once('=').unwrap_or((raw.as_str(), ""));
        arena.add(key.as_bytes(), value.as_bytes())?;
    }

    let rep = factory.create_rep(Arc::new(LengthPrefixedKeyComparator));
    let mut seen = std::collections::HashSet::new();
    for entry in arena.iter() {
        let (key, _) = decode_entry(entry)?;
        if !seen.insert(key) {
            return Err(MemTableError::DuplicateEntry(
                String::from_utf8_lossy(key).into_owned(),
            ));
        }
        rep.insert(entry);
    }

    if !args.mutable {
        rep.mark_read_only();
    }

    tracing::debug!(
        entries = rep.len(),
        arena_bytes = arena.allocated_bytes(),
        memtable_bytes = rep.approximate_memory_usage(),
        "memtable loaded"
    );

    let mut iter = rep.iter();
    match args.command {
        Commands::Scan => {
            iter.seek_to_first();
            while iter.valid() {
                print_entry(iter.key())?;
                iter.next();
            }
        }
        Commands::Reverse => {
            iter.seek_to_last();
            while iter.valid() {
                print_entry(iter.key())?;
                iter.prev();
            }
        }
        Commands::Seek { target } => {
            iter.seek(&vectorrep::memtable::encode_entry(target.as_bytes(), b"")?);
            while iter.valid() {
                print_entry(iter.key())?;
                iter.next();
            }
        }
    }

    Ok(())
}

fn print_entry(entry: &[u8]) -> Result<()> {
    let (key, value) = decode_entry(entry)?;
    println!(
        "{}={}",
        String::from_utf8_lossy(key),
        String::from_utf8_lossy(value)
    );
    Ok(())
}
