use crate::enums::{AgeGroup, Category, EventType, Experience, Registration};
use crate::errors::{EventError, Result};
use serde_json::{json, Map, Value};
use strum::{EnumIter, IntoEnumIterator};

/// Virtual search parameter matching title and both descriptions at once
pub const FILTER_PARAM: &str = "filter";

/// How a field is searched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Keyword,
    Text,
    Number,
    Date,
}

/// How a spreadsheet cell is turned into a typed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    String,
    Integer,
    Float,
    Enumerated,
    Timestamp(TimestampFormat),
}

/// Layout of timestamps in the spreadsheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    DateTime,
    DateOnly,
}

/// Every searchable and ingestible event field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Field {
    GameId,
    Year,
    Group,
    Title,
    ShortDescription,
    LongDescription,
    EventType,
    GameSystem,
    RulesEdition,
    MinPlayers,
    MaxPlayers,
    AgeRequired,
    ExperienceRequired,
    MaterialsProvided,
    MaterialsRequired,
    MaterialsRequiredDetails,
    StartDateTime,
    Duration,
    EndDateTime,
    GmNames,
    Website,
    Email,
    Tournament,
    RoundNumber,
    TotalRounds,
    MinimumPlayTime,
    AttendeeRegistration,
    Cost,
    Location,
    RoomName,
    TableNumber,
    SpecialCategory,
    TicketsAvailable,
    LastModified,
    AlsoRuns,
    Prize,
    RulesComplexity,
    OriginalOrder,
}

/// Static description of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name used in search query parameters
    pub param: &'static str,
    /// Name of the field in stored documents
    pub document: &'static str,
    /// Lower-cased spreadsheet column header
    pub header: &'static str,
    pub kind: FieldKind,
    pub rule: Rule,
}

const fn spec(
    param: &'static str,
    document: &'static str,
    header: &'static str,
    kind: FieldKind,
    rule: Rule,
) -> FieldSpec {
    FieldSpec {
        param,
        document,
        header,
        kind,
        rule,
    }
}

use FieldKind as K;
use TimestampFormat::{DateOnly, DateTime};

impl Field {
    pub const fn spec(self) -> FieldSpec {
        match self {
            Field::GameId => spec("gameId", "game_id", "game id", K::Keyword, Rule::String),
            Field::Year => spec("year", "year", "year", K::Number, Rule::Integer),
            Field::Group => spec("group", "group", "group", K::Text, Rule::String),
            Field::Title => spec("title", "title", "title", K::Text, Rule::String),
            Field::ShortDescription => spec(
                "shortDescription",
                "short_description",
                "short description",
                K::Text,
                Rule::String,
            ),
            Field::LongDescription => spec(
                "longDescription",
                "long_description",
                "long description",
                K::Text,
                Rule::String,
            ),
            Field::EventType => spec(
                "eventType",
                "event_type",
                "event type",
                K::Keyword,
                Rule::Enumerated,
            ),
            Field::GameSystem => spec(
                "gameSystem",
                "game_system",
                "game system",
                K::Text,
                Rule::String,
            ),
            Field::RulesEdition => spec(
                "rulesEdition",
                "rules_edition",
                "rules edition",
                K::Text,
                Rule::String,
            ),
            Field::MinPlayers => spec(
                "minPlayers",
                "min_players",
                "minimum players",
                K::Number,
                Rule::Integer,
            ),
            Field::MaxPlayers => spec(
                "maxPlayers",
                "max_players",
                "maximum players",
                K::Number,
                Rule::Integer,
            ),
            Field::AgeRequired => spec(
                "ageRequired",
                "age_required",
                "age required",
                K::Keyword,
                Rule::Enumerated,
            ),
            Field::ExperienceRequired => spec(
                "experienceRequired",
                "experience_required",
                "experience required",
                K::Keyword,
                Rule::Enumerated,
            ),
            Field::MaterialsProvided => spec(
                "materialsProvided",
                "materials_provided",
                "materials provided",
                K::Text,
                Rule::String,
            ),
            Field::MaterialsRequired => spec(
                "materialsRequired",
                "materials_required",
                "materials required",
                K::Text,
                Rule::String,
            ),
            Field::MaterialsRequiredDetails => spec(
                "materialsRequiredDetails",
                "materials_required_details",
                "materials required details",
                K::Text,
                Rule::String,
            ),
            Field::StartDateTime => spec(
                "startDateTime",
                "start_date_time",
                "start date & time",
                K::Date,
                Rule::Timestamp(DateTime),
            ),
            Field::Duration => spec("duration", "duration", "duration", K::Number, Rule::Float),
            Field::EndDateTime => spec(
                "endDateTime",
                "end_date_time",
                "end date & time",
                K::Date,
                Rule::Timestamp(DateTime),
            ),
            Field::GmNames => spec("gmNames", "gm_names", "gm names", K::Text, Rule::String),
            Field::Website => spec("website", "website", "website", K::Text, Rule::String),
            Field::Email => spec("email", "email", "email", K::Text, Rule::String),
            Field::Tournament => spec(
                "tournament",
                "tournament",
                "tournament?",
                K::Text,
                Rule::String,
            ),
            Field::RoundNumber => spec(
                "roundNumber",
                "round_number",
                "round number",
                K::Number,
                Rule::Integer,
            ),
            Field::TotalRounds => spec(
                "totalRounds",
                "total_rounds",
                "total rounds",
                K::Number,
                Rule::Integer,
            ),
            Field::MinimumPlayTime => spec(
                "minimumPlayTime",
                "minimum_play_time",
                "minimum play time",
                K::Number,
                Rule::Float,
            ),
            Field::AttendeeRegistration => spec(
                "attendeeRegistration",
                "attendee_registration",
                "attendee registration?",
                K::Keyword,
                Rule::Enumerated,
            ),
            Field::Cost => spec("cost", "cost", "cost $", K::Number, Rule::Float),
            Field::Location => spec("location", "location", "location", K::Text, Rule::String),
            Field::RoomName => spec("roomName", "room_name", "room name", K::Text, Rule::String),
            Field::TableNumber => spec(
                "tableNumber",
                "table_number",
                "table number",
                K::Text,
                Rule::String,
            ),
            Field::SpecialCategory => spec(
                "specialCategory",
                "special_category",
                "special category",
                K::Keyword,
                Rule::Enumerated,
            ),
            Field::TicketsAvailable => spec(
                "ticketsAvailable",
                "tickets_available",
                "tickets available",
                K::Number,
                Rule::Integer,
            ),
            Field::LastModified => spec(
                "lastModified",
                "last_modified",
                "last modified",
                K::Date,
                Rule::Timestamp(DateTime),
            ),
            Field::AlsoRuns => spec(
                "alsoRuns",
                "also_runs",
                "also runs",
                K::Date,
                Rule::Timestamp(DateOnly),
            ),
            Field::Prize => spec("prize", "prize", "prize", K::Text, Rule::String),
            Field::RulesComplexity => spec(
                "rulesComplexity",
                "rules_complexity",
                "rules complexity",
                K::Text,
                Rule::String,
            ),
            Field::OriginalOrder => spec(
                "originalOrder",
                "original_order",
                "original order",
                K::Number,
                Rule::Integer,
            ),
        }
    }

    pub fn param(self) -> &'static str {
        self.spec().param
    }

    pub fn document(self) -> &'static str {
        self.spec().document
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    pub fn rule(self) -> Rule {
        self.spec().rule
    }

    /// Looks up a field by its query parameter name
    pub fn from_param(name: &str) -> Result<Self> {
        Field::iter()
            .find(|f| f.param() == name)
            .ok_or_else(|| EventError::UnknownField(name.to_string()))
    }

    /// Looks up a field by its stored document name
    pub fn from_document(name: &str) -> Result<Self> {
        Field::iter()
            .find(|f| f.document() == name)
            .ok_or_else(|| EventError::UnknownField(name.to_string()))
    }

    /// Maps a spreadsheet header, ignoring case and surrounding whitespace
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim().to_lowercase();
        Field::iter().find(|f| f.spec().header == header)
    }

    /// Canonical stored literal for a value of an enumerated field, if `raw`
    /// is one of its literals or search aliases
    pub fn canonical_value(self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        match self {
            Field::AgeRequired => raw.parse::<AgeGroup>().ok().map(|v| v.to_string()),
            Field::EventType => raw.parse::<EventType>().ok().map(|v| v.to_string()),
            Field::ExperienceRequired => raw.parse::<Experience>().ok().map(|v| v.to_string()),
            Field::AttendeeRegistration => {
                raw.parse::<Registration>().ok().map(|v| v.to_string())
            }
            Field::SpecialCategory => raw.parse::<Category>().ok().map(|v| v.to_string()),
            _ => None,
        }
    }
}

/// Index mapping properties derived from the registry
pub fn index_mappings() -> Value {
    let properties: Map<String, Value> = Field::iter()
        .map(|field| {
            let mapping = match (field.kind(), field.rule()) {
                (FieldKind::Keyword, _) => json!({ "type": "keyword" }),
                (FieldKind::Text, _) => json!({ "type": "text" }),
                (FieldKind::Number, Rule::Integer) => json!({ "type": "long" }),
                (FieldKind::Number, _) => json!({ "type": "double" }),
                (FieldKind::Date, _) => {
                    json!({ "type": "date", "format": "strict_date_optional_time" })
                }
            };
            (field.document().to_string(), mapping)
        })
        .collect();

    json!({ "properties": properties })
}
