//! Roster store contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the store session used by the mutation pipeline.
//! - Map roster records to their tables with parameterized SQL only.
//!
//! # Invariants
//! - Table and column names are static identifiers; every value is bound.
//! - `update` and `delete` report `NotFound` when no row changed.

use crate::db::DbError;
use crate::model::roster::{MlbRoster, NbaRoster, NflRoster, NhlRoster, RecordKey, RosterRecord, Sport};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for roster persistence and lookups.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { table: &'static str, key: RecordKey },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, key } => write!(f, "{table} row not found: {key}"),
            Self::InvalidData(message) => write!(f, "invalid persisted roster data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Table mapping for a roster record type.
pub trait RosterTable: RosterRecord + Sized {
    const TABLE: &'static str;
    const KEY_COLUMN: &'static str;
    /// Non-key columns, in `column_values()` order.
    const COLUMNS: &'static [&'static str];

    /// Values for `COLUMNS`, in order.
    fn column_values(&self) -> Vec<Value>;

    /// Builds a record from a row selected with `KEY_COLUMN` and `COLUMNS`.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// Store session consumed by the existence gate and the mutation pipeline.
pub trait RosterStore {
    fn get_by_key<R: RosterTable>(&self, key: &RecordKey) -> RepoResult<Option<R>>;
    fn insert<R: RosterTable>(&self, record: &R) -> RepoResult<RecordKey>;
    fn update<R: RosterTable>(&self, record: &R) -> RepoResult<()>;
    fn delete<R: RosterTable>(&self, key: &RecordKey) -> RepoResult<()>;
}

impl<S: RosterStore + ?Sized> RosterStore for &S {
    fn get_by_key<R: RosterTable>(&self, key: &RecordKey) -> RepoResult<Option<R>> {
        (**self).get_by_key::<R>(key)
    }

    fn insert<R: RosterTable>(&self, record: &R) -> RepoResult<RecordKey> {
        (**self).insert::<R>(record)
    }

    fn update<R: RosterTable>(&self, record: &R) -> RepoResult<()> {
        (**self).update::<R>(record)
    }

    fn delete<R: RosterTable>(&self, key: &RecordKey) -> RepoResult<()> {
        (**self).delete::<R>(key)
    }
}

/// One row of the seeded `position_codes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCode {
    pub sport: Sport,
    pub code: String,
    pub description: String,
}

/// SQLite-backed roster store.
pub struct SqliteRosterStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRosterStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Lists every row of `R`'s table ordered by primary key.
    pub fn list<R: RosterTable>(&self) -> RepoResult<Vec<R>> {
        let sql = format!(
            "{} ORDER BY {} ASC;",
            select_sql::<R>(),
            R::KEY_COLUMN
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(R::from_row(row)?);
        }

        Ok(records)
    }

    /// Lists the position codes known for `sport`, ordered by code.
    pub fn position_codes(&self, sport: Sport) -> RepoResult<Vec<PositionCode>> {
        let mut stmt = self.conn.prepare(
            "SELECT position_code, position_desc
             FROM position_codes
             WHERE sport = ?1
             ORDER BY position_code ASC;",
        )?;
        let mut rows = stmt.query([sport.code()])?;
        let mut codes = Vec::new();

        while let Some(row) = rows.next()? {
            codes.push(PositionCode {
                sport,
                code: row.get(0)?,
                description: row.get(1)?,
            });
        }

        Ok(codes)
    }
}

impl RosterStore for SqliteRosterStore<'_> {
    fn get_by_key<R: RosterTable>(&self, key: &RecordKey) -> RepoResult<Option<R>> {
        let sql = format!("{} WHERE {} = ?1;", select_sql::<R>(), R::KEY_COLUMN);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![key_value(key)])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(R::from_row(row)?));
        }

        Ok(None)
    }

    fn insert<R: RosterTable>(&self, record: &R) -> RepoResult<RecordKey> {
        let key = record.key();
        let placeholders = (1..=R::COLUMNS.len() + 1)
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}, {}) VALUES ({placeholders});",
            R::TABLE,
            R::KEY_COLUMN,
            R::COLUMNS.join(", ")
        );

        let mut values = vec![key_value(&key)];
        values.extend(record.column_values());
        self.conn.execute(&sql, params_from_iter(values))?;

        Ok(key)
    }

    fn update<R: RosterTable>(&self, record: &R) -> RepoResult<()> {
        let key = record.key();
        let assignments = R::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {} = ?{};",
            R::TABLE,
            R::KEY_COLUMN,
            R::COLUMNS.len() + 1
        );

        let mut values = record.column_values();
        values.push(key_value(&key));
        let changed = self.conn.execute(&sql, params_from_iter(values))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: R::TABLE,
                key,
            });
        }

        Ok(())
    }

    fn delete<R: RosterTable>(&self, key: &RecordKey) -> RepoResult<()> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1;", R::TABLE, R::KEY_COLUMN);
        let changed = self.conn.execute(&sql, params![key_value(key)])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: R::TABLE,
                key: key.clone(),
            });
        }

        Ok(())
    }
}

fn select_sql<R: RosterTable>() -> String {
    format!(
        "SELECT {}, {} FROM {}",
        R::KEY_COLUMN,
        R::COLUMNS.join(", "),
        R::TABLE
    )
}

fn key_value(key: &RecordKey) -> Value {
    match key {
        RecordKey::Id(id) => Value::Integer(*id),
        RecordKey::Code(code) => Value::Text(code.clone()),
    }
}

fn text(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::Text)
}

fn integer(value: Option<i64>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}

impl RosterTable for NbaRoster {
    const TABLE: &'static str = "nba_roster";
    const KEY_COLUMN: &'static str = "player_id";
    const COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "team",
        "number",
        "position",
        "height",
        "weight",
        "date_of_birth",
        "college",
    ];

    fn column_values(&self) -> Vec<Value> {
        vec![
            text(&self.first_name),
            text(&self.last_name),
            text(&self.team),
            text(&self.number),
            text(&self.position),
            text(&self.height),
            text(&self.weight),
            text(&self.date_of_birth),
            text(&self.college),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            player_id: row.get("player_id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            team: row.get("team")?,
            number: row.get("number")?,
            position: row.get("position")?,
            height: row.get("height")?,
            weight: row.get("weight")?,
            date_of_birth: row.get("date_of_birth")?,
            college: row.get("college")?,
        })
    }
}

impl RosterTable for NflRoster {
    const TABLE: &'static str = "nfl_roster";
    const KEY_COLUMN: &'static str = "player_id";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "first_name",
        "last_name",
        "team",
        "position",
        "fantasy_position",
        "position_category",
        "height",
        "weight",
        "number",
        "current_status",
        "current_status_color",
        "age",
        "college",
        "injury_status",
        "short_name",
    ];

    fn column_values(&self) -> Vec<Value> {
        vec![
            text(&self.name),
            text(&self.first_name),
            text(&self.last_name),
            text(&self.team),
            text(&self.position),
            text(&self.fantasy_position),
            text(&self.position_category),
            text(&self.height),
            integer(self.weight),
            integer(self.number),
            text(&self.current_status),
            text(&self.current_status_color),
            text(&self.age),
            text(&self.college),
            text(&self.injury_status),
            text(&self.short_name),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            player_id: row.get("player_id")?,
            name: row.get("name")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            team: row.get("team")?,
            position: row.get("position")?,
            fantasy_position: row.get("fantasy_position")?,
            position_category: row.get("position_category")?,
            height: row.get("height")?,
            weight: row.get("weight")?,
            number: row.get("number")?,
            current_status: row.get("current_status")?,
            current_status_color: row.get("current_status_color")?,
            age: row.get("age")?,
            college: row.get("college")?,
            injury_status: row.get("injury_status")?,
            short_name: row.get("short_name")?,
        })
    }
}

impl RosterTable for NhlRoster {
    const TABLE: &'static str = "nhl_roster";
    const KEY_COLUMN: &'static str = "player_id";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "team",
        "number",
        "position",
        "handed",
        "age",
        "drafted",
        "birth_place",
        "birth_country",
    ];

    fn column_values(&self) -> Vec<Value> {
        vec![
            text(&self.name),
            text(&self.team),
            text(&self.number),
            text(&self.position),
            text(&self.handed),
            text(&self.age),
            text(&self.drafted),
            text(&self.birth_place),
            text(&self.birth_country),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            player_id: row.get("player_id")?,
            name: row.get("name")?,
            team: row.get("team")?,
            number: row.get("number")?,
            position: row.get("position")?,
            handed: row.get("handed")?,
            age: row.get("age")?,
            drafted: row.get("drafted")?,
            birth_place: row.get("birth_place")?,
            birth_country: row.get("birth_country")?,
        })
    }
}

impl RosterTable for MlbRoster {
    const TABLE: &'static str = "mlb_roster";
    const KEY_COLUMN: &'static str = "player_id";
    const COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "team_name",
        "league",
        "number",
        "position",
        "throws",
        "bats",
        "height",
        "weight",
        "birth_country",
        "birth_place",
    ];

    fn column_values(&self) -> Vec<Value> {
        vec![
            text(&self.first_name),
            text(&self.last_name),
            text(&self.team_name),
            text(&self.league),
            text(&self.number),
            text(&self.position),
            text(&self.throws),
            text(&self.bats),
            text(&self.height),
            text(&self.weight),
            text(&self.birth_country),
            text(&self.birth_place),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let player_id: String = row.get("player_id")?;
        if player_id.trim().is_empty() {
            return Err(RepoError::InvalidData(
                "empty player id in mlb_roster.player_id".to_string(),
            ));
        }

        Ok(Self {
            player_id,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            team_name: row.get("team_name")?,
            league: row.get("league")?,
            number: row.get("number")?,
            position: row.get("position")?,
            throws: row.get("throws")?,
            bats: row.get("bats")?,
            height: row.get("height")?,
            weight: row.get("weight")?,
            birth_country: row.get("birth_country")?,
            birth_place: row.get("birth_place")?,
        })
    }
}
