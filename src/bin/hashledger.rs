#![forbid(unsafe_code)]
//! Terminal front end for HashLedger: one ledger per process, never persisted.

use clap::{Parser, Subcommand};
use colored::*;
use hashledger::blockchain::Ledger;
use hashledger::cli::{chain_table, inspect_block, ledger_from_config, parse_command, Command, SESSION_HELP};
use hashledger::config::load_config;
use hashledger::record::Record;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::Level;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./hashledger.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mine a single Alice → Bob transfer on a fresh chain and validate it
    Demo {
        #[arg(long)]
        difficulty: Option<u32>,
    },
    /// Interactive session reading commands from stdin
    Session {
        #[arg(long)]
        difficulty: Option<u32>,
        /// Creator id stamped on submitted blocks
        #[arg(long)]
        creator_id: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo { difficulty } => {
            let mut ledger = ledger_from_config(&config, difficulty)?;
            demo(&mut ledger, config.miner.creator_id)?;
        }
        Commands::Session { difficulty, creator_id } => {
            let mut ledger = ledger_from_config(&config, difficulty)?;
            let creator_id = creator_id.unwrap_or(config.miner.creator_id);
            session(&mut ledger, creator_id)?;
        }
    }

    Ok(())
}

fn demo(ledger: &mut Ledger, creator_id: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "HashLedger demo".bright_cyan().bold());
    mine_and_report(ledger, Record::new("Alice", "Bob", 10.0), creator_id)?;
    println!("{}", chain_table(ledger));
    report_validity(ledger);
    Ok(())
}

fn session(ledger: &mut Ledger, creator_id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let interactive = io::stdin().is_terminal();
    if interactive {
        println!("{}", "HashLedger session".bright_cyan().bold());
        println!("{}", "Type 'help' for commands.".yellow());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{} ", format!("[d={}]>", ledger.difficulty).bright_black());
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                continue;
            }
        };

        match command {
            Command::Add(record) => {
                if let Err(e) = mine_and_report(ledger, record, creator_id) {
                    eprintln!("{}", format!("Block rejected: {}", e).red());
                }
            }
            Command::Difficulty(d) => match ledger.set_difficulty(d) {
                Ok(()) => println!("Difficulty for the next block: {}", d.to_string().bright_white()),
                Err(e) => eprintln!("{}", e.to_string().red()),
            },
            Command::Show => println!("{}", chain_table(ledger)),
            Command::Inspect(index) => match ledger.get(index).and_then(inspect_block) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("{}", e.to_string().red()),
            },
            Command::Validate => report_validity(ledger),
            Command::Help => println!("{}", SESSION_HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn mine_and_report(
    ledger: &mut Ledger,
    record: Record,
    creator_id: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.yellow} {msg}")?);
    spinner.set_message(format!("Mining at difficulty {}...", ledger.difficulty));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    let result = ledger.submit(record, creator_id).map(|b| (b.hash(), b.nonce));
    let elapsed = start.elapsed();
    spinner.finish_and_clear();

    let (hash, nonce) = result?;
    println!("{}", "✅ Block mined".bright_green().bold());
    println!("  Index:       {}", ledger.len() - 1);
    println!("  Hash:        {}", hash.bright_white());
    println!("  Nonce:       {}", nonce);
    println!(
        "  Mining time: {}",
        humantime::format_duration(Duration::from_millis(elapsed.as_millis() as u64))
    );
    Ok(())
}

fn report_validity(ledger: &Ledger) {
    match ledger.validate() {
        Ok(()) => println!("{}", "Blockchain is valid".bright_green().bold()),
        Err(e) => {
            println!("{}", "Blockchain is invalid!".red().bold());
            println!("  {}", e.to_string().red());
        }
    }
}
