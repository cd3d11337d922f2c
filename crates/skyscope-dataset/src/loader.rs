//! # OpenFlights Record Loader
//!
//! Reads `airlines.dat`, `airports.dat` and `routes.dat`: headerless,
//! comma-separated, double-quoted text, with `\N` marking a null field.
//!
//! Rows that cannot be parsed are skipped and counted. A missing file loads
//! as an empty collection. Only a failure to read an existing file is an
//! error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use skyscope_core::{AirlineRecord, AirportRecord, RouteRecord, UNKNOWN_COUNTRY};

use crate::catalog::DatasetKind;
use crate::error::LoadError;

/// OpenFlights null marker.
pub const NULL_FIELD: &str = "\\N";

/// A record type parseable from one OpenFlights row.
pub trait FromRow: Sized {
    const KIND: DatasetKind;

    fn from_row(row: &StringRecord) -> Result<Self, String>;
}

/// Records read from one source plus the count of rows skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<R> {
    pub records: Vec<R>,
    pub skipped: usize,
}

impl<R> Default for LoadReport<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// The three record collections, as loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub airlines: Vec<AirlineRecord>,
    pub airports: Vec<AirportRecord>,
    pub routes: Vec<RouteRecord>,
}

impl Datasets {
    /// Load every dataset file found in `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        Ok(Self {
            airlines: load_kind(dir)?,
            airports: load_kind(dir)?,
            routes: load_kind(dir)?,
        })
    }
}

fn load_kind<R: FromRow>(dir: &Path) -> Result<Vec<R>, LoadError> {
    let path = dir.join(R::KIND.file_name());
    let report = load_file::<R>(&path)?;
    if report.skipped > 0 {
        tracing::warn!(
            dataset = %R::KIND,
            path = %path.display(),
            skipped = report.skipped,
            "skipped malformed rows"
        );
    }
    tracing::info!(dataset = %R::KIND, records = report.records.len(), "dataset loaded");
    Ok(report.records)
}

/// Read one dataset file. A missing file yields an empty report.
pub fn load_file<R: FromRow>(path: &Path) -> Result<LoadReport<R>, LoadError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "dataset file not found, serving empty collection");
            return Ok(LoadReport::default());
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    read_records(file)
}

/// Parse rows from any reader.
pub fn read_records<R: FromRow>(reader: impl Read) -> Result<LoadReport<R>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut report = LoadReport::default();
    for row in csv_reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                tracing::debug!(dataset = %R::KIND, error = %e, "unreadable row");
                report.skipped += 1;
                continue;
            }
        };
        match R::from_row(&row) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                tracing::debug!(dataset = %R::KIND, line = ?row.position().map(|p| p.line()), %reason, "malformed row");
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

// -- Field helpers ------------------------------------------------------------

fn optional(row: &StringRecord, i: usize) -> Option<&str> {
    row.get(i)
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NULL_FIELD)
}

fn required<'r>(row: &'r StringRecord, i: usize, name: &str) -> Result<&'r str, String> {
    optional(row, i).ok_or_else(|| format!("missing {name}"))
}

fn owned(row: &StringRecord, i: usize) -> Option<String> {
    optional(row, i).map(str::to_string)
}

fn country(row: &StringRecord, i: usize) -> String {
    optional(row, i).unwrap_or(UNKNOWN_COUNTRY).to_string()
}

fn parse<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{name} is not a number: {value:?}"))
}

fn parse_optional<T: std::str::FromStr>(
    row: &StringRecord,
    i: usize,
    name: &str,
) -> Result<Option<T>, String> {
    optional(row, i).map(|v| parse(v, name)).transpose()
}

fn check_columns(row: &StringRecord, min: usize) -> Result<(), String> {
    if row.len() < min {
        return Err(format!("expected at least {min} columns, found {}", row.len()));
    }
    Ok(())
}

fn flag(row: &StringRecord, i: usize) -> bool {
    optional(row, i).is_some_and(|v| v.eq_ignore_ascii_case("Y"))
}

// -- Row formats --------------------------------------------------------------

/// `id, name, alias, iata, icao, callsign, country, active`
impl FromRow for AirlineRecord {
    const KIND: DatasetKind = DatasetKind::Airlines;

    fn from_row(row: &StringRecord) -> Result<Self, String> {
        check_columns(row, 8)?;
        Ok(Self {
            id: parse(required(row, 0, "id")?, "id")?,
            name: required(row, 1, "name")?.to_string(),
            alias: owned(row, 2),
            iata: owned(row, 3),
            icao: owned(row, 4),
            callsign: owned(row, 5),
            country: country(row, 6),
            active: flag(row, 7),
        })
    }
}

/// `id, name, city, country, iata, icao, latitude, longitude, altitude,
/// utc_offset, dst, tz_database, ...`
impl FromRow for AirportRecord {
    const KIND: DatasetKind = DatasetKind::Airports;

    fn from_row(row: &StringRecord) -> Result<Self, String> {
        check_columns(row, 9)?;
        let altitude = required(row, 8, "altitude")?;
        let altitude = altitude
            .parse::<i32>()
            .or_else(|_| parse::<f64>(altitude, "altitude").map(|v| v.round() as i32))?;
        Ok(Self {
            id: parse(required(row, 0, "id")?, "id")?,
            name: required(row, 1, "name")?.to_string(),
            city: owned(row, 2).unwrap_or_default(),
            country: country(row, 3),
            iata: owned(row, 4),
            icao: owned(row, 5),
            latitude: parse(required(row, 6, "latitude")?, "latitude")?,
            longitude: parse(required(row, 7, "longitude")?, "longitude")?,
            altitude,
            timezone: owned(row, 11),
        })
    }
}

/// `airline, airline_id, source, source_id, destination, destination_id,
/// codeshare, stops, equipment`
impl FromRow for RouteRecord {
    const KIND: DatasetKind = DatasetKind::Routes;

    fn from_row(row: &StringRecord) -> Result<Self, String> {
        check_columns(row, 8)?;
        Ok(Self {
            airline: required(row, 0, "airline")?.to_string(),
            airline_id: parse_optional(row, 1, "airline id")?,
            source_airport: required(row, 2, "source airport")?.to_string(),
            source_airport_id: parse_optional(row, 3, "source airport id")?,
            destination_airport: required(row, 4, "destination airport")?.to_string(),
            destination_airport_id: parse_optional(row, 5, "destination airport id")?,
            codeshare: flag(row, 6),
            stops: parse_optional(row, 7, "stops")?.unwrap_or(0),
            equipment: optional(row, 8)
                .map(|e| e.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }
}
