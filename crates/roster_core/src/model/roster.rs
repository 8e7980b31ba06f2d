//! Roster record types.
//!
//! # Responsibility
//! - Define NBA/NFL/NHL/MLB roster rows as they cross the write boundary.
//! - Provide by-name access to text fields for scanning, validation and
//!   normalization.
//!
//! # Invariants
//! - Field names returned by `text_fields()` are the external (PascalCase)
//!   names, matching serde naming.
//! - `key()` identifies the row in its roster table.
//! - A text primary key is scanned and validated but never normalized; it is
//!   exposed through `text_key()`, not `text_fields_mut()`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// League a roster record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sport {
    /// Basketball.
    Nba,
    /// American football.
    Nfl,
    /// Ice hockey.
    Nhl,
    /// Baseball.
    Mlb,
}

impl Sport {
    /// Stable upper-case league code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Nba => "NBA",
            Self::Nfl => "NFL",
            Self::Nhl => "NHL",
            Self::Mlb => "MLB",
        }
    }

    /// Parses a league code, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NBA" => Some(Self::Nba),
            "NFL" => Some(Self::Nfl),
            "NHL" => Some(Self::Nhl),
            "MLB" => Some(Self::Mlb),
            _ => None,
        }
    }
}

impl Display for Sport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Primary key of a roster row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Integer player id (NBA, NFL, NHL).
    Id(i64),
    /// Text player id (MLB).
    Code(String),
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Code(code) => f.write_str(code),
        }
    }
}

/// By-name view over a roster record's text fields.
///
/// Implementations list fields in a fixed order; `TEXT_FIELDS` carries the
/// same names so policy descriptors can be built without an instance.
pub trait RosterRecord {
    /// League this record type belongs to.
    const SPORT: Sport;
    /// External names of every text field, in `text_fields()` order.
    const TEXT_FIELDS: &'static [&'static str];

    /// Primary key of this row.
    fn key(&self) -> RecordKey;

    /// Current text field values by external name.
    fn text_fields(&self) -> Vec<(&'static str, Option<&str>)>;

    /// Mutable text field slots by external name.
    fn text_fields_mut(&mut self) -> Vec<(&'static str, &mut Option<String>)>;

    /// External name of the primary key when it is text-valued.
    const TEXT_KEY: Option<&'static str> = None;

    /// Text primary key value, when `TEXT_KEY` is set.
    fn text_key(&self) -> Option<&str> {
        None
    }

    /// Read-only walk over the text key (if any) followed by `text_fields()`.
    fn scanned_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        let mut fields = Vec::with_capacity(Self::TEXT_FIELDS.len() + 1);
        if let Some(name) = Self::TEXT_KEY {
            fields.push((name, self.text_key()));
        }
        fields.extend(self.text_fields());
        fields
    }
}

/// NBA roster row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NbaRoster {
    #[serde(rename = "playerID")]
    pub player_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team: Option<String>,
    pub number: Option<String>,
    pub position: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub date_of_birth: Option<String>,
    pub college: Option<String>,
}

impl RosterRecord for NbaRoster {
    const SPORT: Sport = Sport::Nba;
    const TEXT_FIELDS: &'static [&'static str] = &[
        "FirstName",
        "LastName",
        "Team",
        "Number",
        "Position",
        "Height",
        "Weight",
        "DateOfBirth",
        "College",
    ];

    fn key(&self) -> RecordKey {
        RecordKey::Id(self.player_id)
    }

    fn text_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("FirstName", self.first_name.as_deref()),
            ("LastName", self.last_name.as_deref()),
            ("Team", self.team.as_deref()),
            ("Number", self.number.as_deref()),
            ("Position", self.position.as_deref()),
            ("Height", self.height.as_deref()),
            ("Weight", self.weight.as_deref()),
            ("DateOfBirth", self.date_of_birth.as_deref()),
            ("College", self.college.as_deref()),
        ]
    }

    fn text_fields_mut(&mut self) -> Vec<(&'static str, &mut Option<String>)> {
        vec![
            ("FirstName", &mut self.first_name),
            ("LastName", &mut self.last_name),
            ("Team", &mut self.team),
            ("Number", &mut self.number),
            ("Position", &mut self.position),
            ("Height", &mut self.height),
            ("Weight", &mut self.weight),
            ("DateOfBirth", &mut self.date_of_birth),
            ("College", &mut self.college),
        ]
    }
}

/// NFL roster row.
///
/// `weight` and `number` are stored as integers and therefore bypass the
/// text pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NflRoster {
    pub player_id: i64,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub fantasy_position: Option<String>,
    pub position_category: Option<String>,
    pub height: Option<String>,
    pub weight: Option<i64>,
    pub number: Option<i64>,
    pub current_status: Option<String>,
    pub current_status_color: Option<String>,
    pub age: Option<String>,
    pub college: Option<String>,
    pub injury_status: Option<String>,
    pub short_name: Option<String>,
}

impl RosterRecord for NflRoster {
    const SPORT: Sport = Sport::Nfl;
    const TEXT_FIELDS: &'static [&'static str] = &[
        "Name",
        "FirstName",
        "LastName",
        "Team",
        "Position",
        "FantasyPosition",
        "PositionCategory",
        "Height",
        "CurrentStatus",
        "CurrentStatusColor",
        "Age",
        "College",
        "InjuryStatus",
        "ShortName",
    ];

    fn key(&self) -> RecordKey {
        RecordKey::Id(self.player_id)
    }

    fn text_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Name", self.name.as_deref()),
            ("FirstName", self.first_name.as_deref()),
            ("LastName", self.last_name.as_deref()),
            ("Team", self.team.as_deref()),
            ("Position", self.position.as_deref()),
            ("FantasyPosition", self.fantasy_position.as_deref()),
            ("PositionCategory", self.position_category.as_deref()),
            ("Height", self.height.as_deref()),
            ("CurrentStatus", self.current_status.as_deref()),
            ("CurrentStatusColor", self.current_status_color.as_deref()),
            ("Age", self.age.as_deref()),
            ("College", self.college.as_deref()),
            ("InjuryStatus", self.injury_status.as_deref()),
            ("ShortName", self.short_name.as_deref()),
        ]
    }

    fn text_fields_mut(&mut self) -> Vec<(&'static str, &mut Option<String>)> {
        vec![
            ("Name", &mut self.name),
            ("FirstName", &mut self.first_name),
            ("LastName", &mut self.last_name),
            ("Team", &mut self.team),
            ("Position", &mut self.position),
            ("FantasyPosition", &mut self.fantasy_position),
            ("PositionCategory", &mut self.position_category),
            ("Height", &mut self.height),
            ("CurrentStatus", &mut self.current_status),
            ("CurrentStatusColor", &mut self.current_status_color),
            ("Age", &mut self.age),
            ("College", &mut self.college),
            ("InjuryStatus", &mut self.injury_status),
            ("ShortName", &mut self.short_name),
        ]
    }
}

/// NHL roster row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NhlRoster {
    pub player_id: i64,
    pub name: Option<String>,
    pub team: Option<String>,
    pub number: Option<String>,
    pub position: Option<String>,
    pub handed: Option<String>,
    pub age: Option<String>,
    pub drafted: Option<String>,
    pub birth_place: Option<String>,
    pub birth_country: Option<String>,
}

impl RosterRecord for NhlRoster {
    const SPORT: Sport = Sport::Nhl;
    const TEXT_FIELDS: &'static [&'static str] = &[
        "Name",
        "Team",
        "Number",
        "Position",
        "Handed",
        "Age",
        "Drafted",
        "BirthPlace",
        "BirthCountry",
    ];

    fn key(&self) -> RecordKey {
        RecordKey::Id(self.player_id)
    }

    fn text_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Name", self.name.as_deref()),
            ("Team", self.team.as_deref()),
            ("Number", self.number.as_deref()),
            ("Position", self.position.as_deref()),
            ("Handed", self.handed.as_deref()),
            ("Age", self.age.as_deref()),
            ("Drafted", self.drafted.as_deref()),
            ("BirthPlace", self.birth_place.as_deref()),
            ("BirthCountry", self.birth_country.as_deref()),
        ]
    }

    fn text_fields_mut(&mut self) -> Vec<(&'static str, &mut Option<String>)> {
        vec![
            ("Name", &mut self.name),
            ("Team", &mut self.team),
            ("Number", &mut self.number),
            ("Position", &mut self.position),
            ("Handed", &mut self.handed),
            ("Age", &mut self.age),
            ("Drafted", &mut self.drafted),
            ("BirthPlace", &mut self.birth_place),
            ("BirthCountry", &mut self.birth_country),
        ]
    }
}

/// MLB roster row. The primary key is a text player id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MlbRoster {
    #[serde(rename = "PlayerID")]
    pub player_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team_name: Option<String>,
    pub league: Option<String>,
    pub number: Option<String>,
    pub position: Option<String>,
    pub throws: Option<String>,
    pub bats: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub birth_country: Option<String>,
    pub birth_place: Option<String>,
}

impl RosterRecord for MlbRoster {
    const SPORT: Sport = Sport::Mlb;
    const TEXT_FIELDS: &'static [&'static str] = &[
        "FirstName",
        "LastName",
        "TeamName",
        "League",
        "Number",
        "Position",
        "Throws",
        "Bats",
        "Height",
        "Weight",
        "BirthCountry",
        "BirthPlace",
    ];

    const TEXT_KEY: Option<&'static str> = Some("PlayerID");

    fn key(&self) -> RecordKey {
        RecordKey::Code(self.player_id.clone())
    }

    fn text_key(&self) -> Option<&str> {
        Some(&self.player_id)
    }

    fn text_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("FirstName", self.first_name.as_deref()),
            ("LastName", self.last_name.as_deref()),
            ("TeamName", self.team_name.as_deref()),
            ("League", self.league.as_deref()),
            ("Number", self.number.as_deref()),
            ("Position", self.position.as_deref()),
            ("Throws", self.throws.as_deref()),
            ("Bats", self.bats.as_deref()),
            ("Height", self.height.as_deref()),
            ("Weight", self.weight.as_deref()),
            ("BirthCountry", self.birth_country.as_deref()),
            ("BirthPlace", self.birth_place.as_deref()),
        ]
    }

    fn text_fields_mut(&mut self) -> Vec<(&'static str, &mut Option<String>)> {
        vec![
            ("FirstName", &mut self.first_name),
            ("LastName", &mut self.last_name),
            ("TeamName", &mut self.team_name),
            ("League", &mut self.league),
            ("Number", &mut self.number),
            ("Position", &mut self.position),
            ("Throws", &mut self.throws),
            ("Bats", &mut self.bats),
            ("Height", &mut self.height),
            ("Weight", &mut self.weight),
            ("BirthCountry", &mut self.birth_country),
            ("BirthPlace", &mut self.birth_place),
        ]
    }
}
