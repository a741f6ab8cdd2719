//! Helpers shared by the `hashledger` binary: ledger setup, chain
//! rendering, and the session command grammar.

use crate::blockchain::{Block, Ledger};
use crate::config::Config;
use crate::error::{ChainError, Result};
use crate::record::{Payload, Record};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

/// Build the process's ledger from configuration, letting CLI flags win.
pub fn ledger_from_config(config: &Config, difficulty_override: Option<u32>) -> Result<Ledger> {
    let difficulty = difficulty_override.unwrap_or(config.ledger.difficulty);
    Ok(Ledger::new(difficulty)?.with_mining_limit(config.ledger.mining_limit()))
}

pub fn short_hash(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() > 20 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 6..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        hash.to_string()
    }
}

/// Tabular view of every block, one row per block.
pub fn chain_table(ledger: &Ledger) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Record").add_attribute(Attribute::Bold),
            Cell::new("Creator").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
            Cell::new("Prev Hash").add_attribute(Attribute::Bold),
            Cell::new("Nonce").add_attribute(Attribute::Bold),
            Cell::new("Hash").add_attribute(Attribute::Bold),
        ]);

    for (index, block) in ledger.blocks().iter().enumerate() {
        let record_cell = match &block.record {
            Payload::Genesis => Cell::new("Genesis").fg(Color::Cyan),
            Payload::Transfer(r) => {
                Cell::new(format!("{} → {}: {}", r.sender, r.receiver, r.amount)).fg(Color::Green)
            }
        };
        table.add_row(vec![
            Cell::new(index),
            record_cell,
            Cell::new(block.creator_id),
            Cell::new(&block.timestamp),
            Cell::new(short_hash(&block.prev_hash)),
            Cell::new(block.nonce),
            Cell::new(short_hash(&block.hash())),
        ]);
    }
    table
}

/// JSON view of one block plus its current hash, for the inspector.
pub fn inspect_block(block: &Block) -> Result<String> {
    let mut value = serde_json::to_value(block)?;
    if let serde_json::Value::Object(map) = &mut value {
        map.insert("hash".to_string(), serde_json::Value::String(block.hash()));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// One line of an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Record),
    Difficulty(u32),
    Show,
    Inspect(usize),
    Validate,
    Help,
    Quit,
}

pub const SESSION_HELP: &str = "\
commands:
  add <sender> <receiver> <amount>   mine and append a transfer
  difficulty <n>                     set difficulty for the next block
  show                               print the chain
  inspect <index>                    print one block as JSON
  validate                           check every link
  help                               this text
  quit                               leave the session";

fn invalid(msg: impl Into<String>) -> ChainError {
    ChainError::InvalidCommand(msg.into())
}

/// Parse one session line. Blank lines parse to `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("add", [sender, receiver, amount]) => {
            let amount: f64 = amount
                .parse()
                .map_err(|_| invalid(format!("amount must be a number, got '{}'", amount)))?;
            if !amount.is_finite() {
                return Err(invalid(format!("amount must be finite, got '{}'", amount)));
            }
            Command::Add(Record::new(*sender, *receiver, amount))
        }
        ("add", _) => return Err(invalid("usage: add <sender> <receiver> <amount>")),
        ("difficulty", [n]) => Command::Difficulty(
            n.parse()
                .map_err(|_| invalid(format!("difficulty must be a positive integer, got '{}'", n)))?,
        ),
        ("difficulty", _) => return Err(invalid("usage: difficulty <n>")),
        ("inspect", [i]) => Command::Inspect(
            i.parse()
                .map_err(|_| invalid(format!("index must be a non-negative integer, got '{}'", i)))?,
        ),
        ("inspect", _) => return Err(invalid("usage: inspect <index>")),
        ("show", []) => Command::Show,
        ("validate", []) => Command::Validate,
        ("help", _) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => return Err(invalid(format!("unknown command '{}' (try 'help')", other))),
    };
    Ok(Some(command))
}
