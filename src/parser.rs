use std::{
    fs,
    path::{Path, PathBuf},
    thread::{self, JoinHandle},
};

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub instability: String,
    pub abstraction: String,
    pub distance: String,
}

pub type ParseResult = Vec<Record>;

impl Record {
    // missing fields stay empty, surplus fields are dropped
    fn from_fields<'a>(mut fields: impl Iterator<Item = &'a str>) -> Self {
        let mut next = || fields.next().map(String::from).unwrap_or_default();
        Record {
            name: next(),
            instability: next(),
            abstraction: next(),
            distance: next(),
        }
    }
}

pub fn parse_str(content: &str) -> ParseResult {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = ParseResult::new();
    for (i, entry) in rdr.records().enumerate() {
        match entry {
            Ok(entry) => records.push(Record::from_fields(entry.iter())),
            // skips unreadable rows
            Err(err) => log::warn!("could not split row {}: {}", i + 1, err),
        }
    }
    records
}

pub fn parse_file(path: &Path) -> Result<ParseResult, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_str(&content);
    log::debug!("parsed {} records from {path:?}", records.len());
    Ok(records)
}

/// `on_complete` runs exactly once on the worker thread.
pub fn parse_file_async<F>(path: PathBuf, on_complete: F) -> JoinHandle<()>
where
    F: FnOnce(Result<ParseResult, ParseError>) + Send + 'static,
{
    thread::spawn(move || on_complete(parse_file(&path)))
}
