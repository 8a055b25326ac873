// Primitives for reading CSV files.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use dialect_tally::builder::{Builder, RecordOutcome};
use log::debug;
use snafu::prelude::*;

use crate::survey::*;

/// What happened to the rows of a file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ReadStats {
    pub rows: u64,
    pub counted: u64,
    pub too_short: u64,
    pub unclassified: u64,
    pub empty_region: u64,
}

/// Feeds every row of the file to the builder.
///
/// The rows are consumed as they are read. Rows that the builder cannot use are
/// only counted; a row that cannot be read at all (bad UTF-8, I/O error) stops
/// the reading.
pub fn read_csv_responses(
    path: &Path,
    has_headers: bool,
    builder: &mut Builder,
) -> SurveyResult<ReadStats> {
    let path_s = path.display().to_string();
    let records = get_records(path, has_headers)?;
    let mut stats = ReadStats::default();

    for (idx, line_r) in records.enumerate() {
        let record = idx as u64 + 1;
        let line: StringRecord = line_r.context(CsvRecordSnafu {
            path: &path_s,
            record,
        })?;
        debug!("read_csv_responses: record: {:?} row: {:?}", record, line);
        stats.rows += 1;

        let fields: Vec<&str> = line.iter().collect();
        match builder.add_record(&fields) {
            RecordOutcome::Counted(_) => stats.counted += 1,
            RecordOutcome::TooShort => stats.too_short += 1,
            RecordOutcome::Unclassified => stats.unclassified += 1,
            RecordOutcome::EmptyRegion => stats.empty_region += 1,
        }
    }
    Ok(stats)
}

fn get_records(path: &Path, has_headers: bool) -> SurveyResult<csv::StringRecordsIntoIter<File>> {
    // Rows do not need to have the same number of fields.
    let rdr = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu {
            path: path.display().to_string(),
        })?;
    Ok(rdr.into_records())
}
