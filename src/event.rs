use std::path::PathBuf;

use crate::{
    app::App,
    errors::ParseError,
    parser::ParseResult,
};

/// A one-shot change to the app state. Messages returned from `apply` end
/// up in the error log.
pub trait AppEvent: Sized {
    fn apply(self, app: &mut App) -> Vec<String>;
    fn run(self, app: &mut App) {
        let errors = self.apply(app);
        app.errors.extend(errors);
    }
}

pub struct DataLoaded {
    path: PathBuf,
    records: ParseResult,
}

impl AppEvent for DataLoaded {
    fn apply(self, app: &mut App) -> Vec<String> {
        log::info!("loaded {} records from {:?}", self.records.len(), self.path);
        app.table.show_records(self.path, self.records);
        Vec::new()
    }
}

pub struct LoadFailed {
    error: ParseError,
}

impl AppEvent for LoadFailed {
    fn apply(self, _app: &mut App) -> Vec<String> {
        // the table keeps showing whatever was loaded before
        log::error!("{}", self.error);
        vec![format!("ERROR: {}", self.error)]
    }
}

pub fn deliver(app: &mut App, path: PathBuf, result: Result<ParseResult, ParseError>) {
    match result {
        Ok(records) => DataLoaded { path, records }.run(app),
        Err(error) => LoadFailed { error }.run(app),
    }
}
