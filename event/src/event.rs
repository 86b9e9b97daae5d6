use crate::enums::{AgeGroup, Category, EventType, Experience, Registration};
use crate::errors::{EventError, Result};
use crate::fields::{Field, TimestampFormat};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use gcb_search::{normalize_date, TIMEZONE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DATE_TIME_FORMATS: &[&str] = &["%m/%d/%Y %I:%M %p", "%m/%d/%Y %H:%M", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// A single scheduled convention event, as stored in the index.
///
/// Every field is optional so that blank spreadsheet cells stay unset instead
/// of turning into zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_players: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_players: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_required: Option<AgeGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_required: Option<Experience>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_provided: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_required: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_required_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gm_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rounds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_play_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendee_registration: Option<Registration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets_available: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub also_runs: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_complexity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_order: Option<i64>,
}

/// Accessor for one typed field of an [`Event`]
pub type Slot<T> = fn(&mut Event) -> &mut Option<T>;

/// How a raw cell is written into an [`Event`]
#[derive(Clone, Copy)]
pub enum Coercion {
    Text(Slot<String>),
    Integer(Slot<i64>),
    Float(Slot<f64>),
    Timestamp(TimestampFormat, Slot<DateTime<FixedOffset>>),
    /// Returns false when the value is not one of the enum's literals
    Enumerated(fn(&mut Event, &str) -> bool),
}

fn set_parsed<T: FromStr>(slot: &mut Option<T>, raw: &str) -> bool {
    match raw.parse() {
        Ok(v) => {
            *slot = Some(v);
            true
        }
        Err(_) => false,
    }
}

impl Field {
    /// The coercion table: which slot of [`Event`] a field writes and how
    pub fn coercion(self) -> Coercion {
        use Coercion::{Enumerated, Float, Integer, Text, Timestamp};
        use TimestampFormat::{DateOnly, DateTime as WithTime};

        match self {
            Field::GameId => Text(|e| &mut e.game_id),
            Field::Year => Integer(|e| &mut e.year),
            Field::Group => Text(|e| &mut e.group),
            Field::Title => Text(|e| &mut e.title),
            Field::ShortDescription => Text(|e| &mut e.short_description),
            Field::LongDescription => Text(|e| &mut e.long_description),
            Field::EventType => Enumerated(|e, raw| set_parsed(&mut e.event_type, raw)),
            Field::GameSystem => Text(|e| &mut e.game_system),
            Field::RulesEdition => Text(|e| &mut e.rules_edition),
            Field::MinPlayers => Integer(|e| &mut e.min_players),
            Field::MaxPlayers => Integer(|e| &mut e.max_players),
            Field::AgeRequired => Enumerated(|e, raw| set_parsed(&mut e.age_required, raw)),
            Field::ExperienceRequired => {
                Enumerated(|e, raw| set_parsed(&mut e.experience_required, raw))
            }
            Field::MaterialsProvided => Text(|e| &mut e.materials_provided),
            Field::MaterialsRequired => Text(|e| &mut e.materials_required),
            Field::MaterialsRequiredDetails => Text(|e| &mut e.materials_required_details),
            Field::StartDateTime => Timestamp(WithTime, |e| &mut e.start_date_time),
            Field::Duration => Float(|e| &mut e.duration),
            Field::EndDateTime => Timestamp(WithTime, |e| &mut e.end_date_time),
            Field::GmNames => Text(|e| &mut e.gm_names),
            Field::Website => Text(|e| &mut e.website),
            Field::Email => Text(|e| &mut e.email),
            Field::Tournament => Text(|e| &mut e.tournament),
            Field::RoundNumber => Integer(|e| &mut e.round_number),
            Field::TotalRounds => Integer(|e| &mut e.total_rounds),
            Field::MinimumPlayTime => Float(|e| &mut e.minimum_play_time),
            Field::AttendeeRegistration => {
                Enumerated(|e, raw| set_parsed(&mut e.attendee_registration, raw))
            }
            Field::Cost => Float(|e| &mut e.cost),
            Field::Location => Text(|e| &mut e.location),
            Field::RoomName => Text(|e| &mut e.room_name),
            Field::TableNumber => Text(|e| &mut e.table_number),
            Field::SpecialCategory => {
                Enumerated(|e, raw| set_parsed(&mut e.special_category, raw))
            }
            Field::TicketsAvailable => Integer(|e| &mut e.tickets_available),
            Field::LastModified => Timestamp(WithTime, |e| &mut e.last_modified),
            Field::AlsoRuns => Timestamp(DateOnly, |e| &mut e.also_runs),
            Field::Prize => Text(|e| &mut e.prize),
            Field::RulesComplexity => Text(|e| &mut e.rules_complexity),
            Field::OriginalOrder => Integer(|e| &mut e.original_order),
        }
    }
}

impl Event {
    /// Coerces `raw` into the typed slot of `field`. Blank values leave the
    /// field untouched.
    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<()> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(());
        }

        let name = field.document();
        match field.coercion() {
            Coercion::Text(slot) => *slot(self) = Some(raw.to_string()),
            Coercion::Integer(slot) => {
                let n = value
                    .parse::<i64>()
                    .map_err(|_| EventError::InvalidNumericField {
                        field: name,
                        value: value.to_string(),
                    })?;
                *slot(self) = Some(n);
            }
            Coercion::Float(slot) => {
                let n = value
                    .parse::<f64>()
                    .map_err(|_| EventError::InvalidNumericField {
                        field: name,
                        value: value.to_string(),
                    })?;
                *slot(self) = Some(n);
            }
            Coercion::Timestamp(format, slot) => {
                let ts =
                    parse_timestamp(format, value).ok_or_else(|| EventError::InvalidTimestamp {
                        field: name,
                        value: value.to_string(),
                    })?;
                *slot(self) = Some(ts);
            }
            Coercion::Enumerated(set) => {
                if !set(self, value) {
                    return Err(EventError::InvalidEnumValue {
                        field: name,
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Same as [`Event::set_field`], addressing the field by its document name
    pub fn set_field_by_name(&mut self, name: &str, raw: &str) -> Result<()> {
        let field = Field::from_document(name)?;
        self.set_field(field, raw)
    }

    /// Key used as the document id
    pub fn key(&self) -> Option<&str> {
        self.game_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Only events with a game id can be written to the index
    pub fn is_storable(&self) -> bool {
        self.key().is_some()
    }
}

/// Parses a spreadsheet timestamp. RFC 3339 input keeps its offset; naive
/// input is a wall clock time at the convention.
pub fn parse_timestamp(format: TimestampFormat, raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Some(dt) = normalize_date(raw) {
        return Some(dt);
    }

    let naive = match format {
        TimestampFormat::DateTime => DATE_TIME_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok()),
        TimestampFormat::DateOnly => DATE_FORMATS
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
    }?;

    // Ambiguous wall clock times (the autumn DST overlap) take the earlier instant
    TIMEZONE
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}
