//! Roster CLI entry point.
//!
//! # Responsibility
//! - Load configuration, start logging and open the roster database.
//! - Route write requests through `RosterService`; never touch tables directly.
//!
//! Exit status is non-zero when a request is rejected or fails.
//! `apply` and `list` need `ROSTER_DB_PATH`; an in-memory database would
//! lose every write on exit.

mod args;

use args::{Cli, Command};
use clap::Parser;
use log::info;
use roster_core::config::ENV_DB_PATH;
use roster_core::db::open_db;
use roster_core::{
    init_logging_from_config, CoreConfig, MlbRoster, MutationKind, MutationOutcome, NbaRoster,
    NflRoster, NhlRoster, PatternRegistry, RosterService, RosterTable, Sport,
};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

fn main() {
    if let Err(message) = run(Cli::parse()) {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Command::Ping = cli.command {
        println!("roster_core ping={}", roster_core::ping());
        println!("roster_core version={}", roster_core::core_version());
        return Ok(());
    }
    if let Command::Scan { value } = &cli.command {
        scan(value);
        return Ok(());
    }

    let config = CoreConfig::load().map_err(|err| err.to_string())?;
    init_logging_from_config(&config)?;
    let conn = open_connection(&config)?;
    let service = RosterService::with_validator(&conn, config.validator());

    match cli.command {
        Command::Apply { sport, op, record } => {
            let sport = parse_sport(&sport)?;
            let kind = MutationKind::parse(&op)
                .ok_or_else(|| format!("unknown operation `{op}`; expected create|update|delete"))?;
            info!(
                "event=cli_apply module=cli status=start sport={} op={}",
                sport,
                kind.as_str()
            );
            match sport {
                Sport::Nba => apply::<NbaRoster>(&service, &record, kind),
                Sport::Nfl => apply::<NflRoster>(&service, &record, kind),
                Sport::Nhl => apply::<NhlRoster>(&service, &record, kind),
                Sport::Mlb => apply::<MlbRoster>(&service, &record, kind),
            }
        }
        Command::List { sport } => match parse_sport(&sport)? {
            Sport::Nba => list::<NbaRoster>(&service),
            Sport::Nfl => list::<NflRoster>(&service),
            Sport::Nhl => list::<NhlRoster>(&service),
            Sport::Mlb => list::<MlbRoster>(&service),
        },
        Command::Ping | Command::Scan { .. } => Ok(()),
    }
}

fn open_connection(config: &CoreConfig) -> Result<Connection, String> {
    let path = require_db_path(config)?;
    open_db(path).map_err(|err| {
        format!(
            "failed to open roster database `{}`: {err}",
            path.display()
        )
    })
}

fn require_db_path(config: &CoreConfig) -> Result<&Path, String> {
    config
        .db_path
        .as_deref()
        .ok_or_else(|| format!("{ENV_DB_PATH} must point at the roster database"))
}

fn parse_sport(value: &str) -> Result<Sport, String> {
    Sport::parse(value).ok_or_else(|| format!("unknown sport `{value}`; expected NBA|NFL|NHL|MLB"))
}

fn apply<R>(service: &RosterService<'_>, path: &Path, kind: MutationKind) -> Result<(), String>
where
    R: RosterTable + DeserializeOwned + Serialize,
{
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read record file `{}`: {err}", path.display()))?;
    let record: R = serde_json::from_str(&raw)
        .map_err(|err| format!("record file `{}` is not a valid record: {err}", path.display()))?;

    match service.apply(record, kind) {
        MutationOutcome::Persisted(record) => {
            let json = serde_json::to_string_pretty(&record).map_err(|err| err.to_string())?;
            println!("{json}");
            Ok(())
        }
        MutationOutcome::Rejected(rejection) => {
            for message in rejection.messages() {
                eprintln!("{message}");
            }
            Err(format!("{:?}: {rejection}", rejection.class()))
        }
    }
}

fn list<R>(service: &RosterService<'_>) -> Result<(), String>
where
    R: RosterTable + Serialize,
{
    let rows = service.list::<R>().map_err(|err| err.to_string())?;
    let json = serde_json::to_string_pretty(&rows).map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

fn scan(value: &str) {
    let mut clean = true;
    for rule in PatternRegistry::global().matching_rules(value) {
        clean = false;
        println!("rule={} category={}", rule.id, rule.category);
    }
    if clean {
        println!("clean");
    }
}
