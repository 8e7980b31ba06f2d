//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Roster guard: sanitized writes into league roster tables.
#[derive(Parser, Debug)]
#[command(name = "roster_cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print core linkage and version
    Ping,

    /// Run one write request through the mutation pipeline
    Apply {
        /// League code: NBA, NFL, NHL or MLB
        #[arg(long)]
        sport: String,

        /// Operation: create, update or delete
        #[arg(long)]
        op: String,

        /// JSON file holding one roster record
        #[arg(long)]
        record: PathBuf,
    },

    /// List every row of one league roster
    List {
        /// League code: NBA, NFL, NHL or MLB
        #[arg(long)]
        sport: String,
    },

    /// Check a single value against the threat signatures
    Scan {
        /// Value to scan
        #[arg(long)]
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn apply_takes_sport_op_and_record() {
        let cli = Cli::try_parse_from([
            "roster_cli",
            "apply",
            "--sport",
            "nfl",
            "--op",
            "create",
            "--record",
            "brady.json",
        ])
        .unwrap();

        match cli.command {
            Command::Apply { sport, op, record } => {
                assert_eq!(sport, "nfl");
                assert_eq!(op, "create");
                assert_eq!(record, PathBuf::from("brady.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn list_requires_sport() {
        assert!(Cli::try_parse_from(["roster_cli", "list"]).is_err());
    }
}
