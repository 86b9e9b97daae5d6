use crate::errors::{EventError, Result};
use crate::event::Event;
use crate::fields::Field;
use indexmap::IndexMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of reading an event spreadsheet
#[derive(Debug, Default)]
pub struct LoadedEvents {
    /// Rows that carried a game id, in file order
    pub events: Vec<Event>,
    /// Rows dropped because they had no game id
    pub dropped_rows: usize,
    /// Distinct cell coercion errors and how often each occurred
    pub data_errors: IndexMap<String, usize>,
}

pub fn load_events_file(path: impl AsRef<Path>) -> Result<LoadedEvents> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading event csv");
    let file = fs_err::File::open(path)?;
    load_events(file)
}

pub fn load_events_from_str(csv_data: &str) -> Result<LoadedEvents> {
    load_events(csv_data.as_bytes())
}

/// Reads events from CSV with a header row. Headers are matched to fields
/// case-insensitively; unknown columns are skipped. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD instead of failing the load.
///
/// A cell that cannot be coerced leaves its field unset and is counted in
/// [`LoadedEvents::data_errors`]. Rows without a game id are dropped.
pub fn load_events<R: Read>(reader: R) -> Result<LoadedEvents> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.byte_headers()?.clone();
    if headers.is_empty() {
        return Err(EventError::EmptyFile);
    }

    let columns: Vec<Option<Field>> = headers
        .iter()
        .map(|header| {
            let header = String::from_utf8_lossy(header);
            let field = Field::from_header(&header);
            match field {
                Some(f) => debug!(%header, field = f.document(), "Mapped csv header"),
                None => warn!(%header, "No event field for csv header"),
            }
            field
        })
        .collect();

    let mut loaded = LoadedEvents::default();
    for result in csv_reader.byte_records() {
        let record = result?;
        let cells: Vec<String> = record
            .iter()
            .map(|cell| String::from_utf8_lossy(cell).into_owned())
            .collect();
        let mut event = Event::default();
        for (index, value) in cells.iter().enumerate() {
            let Some(field) = columns.get(index).copied().flatten() else {
                continue;
            };
            if let Err(e) = event.set_field(field, value) {
                *loaded.data_errors.entry(e.to_string()).or_insert(0) += 1;
            }
        }

        if event.is_storable() {
            loaded.events.push(event);
        } else {
            warn!(row = ?cells, "Dropping event row without a game id");
            loaded.dropped_rows += 1;
        }
    }

    for (error, count) in &loaded.data_errors {
        warn!(count, "Found data validation error: {}", error);
    }
    info!(
        events = loaded.events.len(),
        dropped = loaded.dropped_rows,
        "Parsed events from csv"
    );

    Ok(loaded)
}
