//! bptindex CLI
//!
//! Builds a B+tree over a sorted, tab-separated record file and runs every
//! query of a query file against it, printing one report per query.
//!
//! # Usage
//!
//! ```bash
//! bptindex scores_byname.txt queries.txt
//!
//! # Smaller nodes, dump the tree and check its invariants first:
//! bptindex scores_byname.txt queries.txt --capacity 4 --print-tree --verify
//!
//! # Logging goes to stderr, controlled via RUST_LOG (default: warn):
//! RUST_LOG=bptindex=trace bptindex scores_byname.txt queries.txt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bptindex::{source, BPlusTree, IndexConfig, SearchReport, DEFAULT_NODE_CAPACITY};

/// Build a static B+tree over a record file and answer equality queries.
#[derive(ClapParser, Debug)]
#[command(name = "bptindex", version)]
struct Cli {
    /// Tab-separated records, sorted by key: name, showid, score, place, pageid.
    records: PathBuf,

    /// Tab-separated queries: name, showid, score, place (`*` = any).
    queries: PathBuf,

    /// Node capacity (NODECAP). Leaves hold NODECAP - 1 records.
    #[arg(short, long, default_value_t = DEFAULT_NODE_CAPACITY)]
    capacity: usize,

    /// Print the whole tree before searching.
    #[arg(long)]
    print_tree: bool,

    /// Check structural invariants after building.
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "bptindex failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> bptindex::Result<()> {
    let config = IndexConfig::new(cli.capacity);
    config.validate()?;

    let records = source::load_records(&cli.records)?;
    let tree = BPlusTree::build(records, config)?;
    info!(stats = %tree.stats(), "index ready");

    if cli.verify {
        tree.check_invariants()?;
    }
    if cli.print_tree {
        print!("{}", tree.render());
    }

    let queries = source::load_queries(&cli.queries)?;
    if tree.is_empty() {
        println!("Index is empty; {} queries skipped.", queries.len());
        return Ok(());
    }

    for query in &queries {
        let result = tree.search(query)?;
        println!("{}", SearchReport::new(query, &result));
    }
    Ok(())
}
