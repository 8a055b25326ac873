use log::{debug, info, warn};

use dialect_tally::builder::Builder;
use dialect_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod io_csv;

pub const DEFAULT_INPUT_PATH: &str = "users_votes_clean.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "data/votes.json";

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening input file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading record {record} of {path}"))]
    CsvRecord {
        source: csv::Error,
        path: String,
        record: u64,
    },
    #[snafu(display("Could not create the output directory {path}"))]
    CreateOutputDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Could not write the summary to {path}"))]
    WriteOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Could not serialize the summary"))]
    SerializeJson { source: serde_json::Error },
    #[snafu(display("Error opening reference summary {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing reference summary {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary {path}"))]
    ReferenceMismatch { path: String },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Where the summary goes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Everything a run needs to know. Nothing is read from the environment.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyConfig {
    pub input_path: PathBuf,
    pub output: OutputTarget,
    /// Skip the first row of the input.
    pub has_headers: bool,
    pub variants: VariantMap,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        SurveyConfig {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output: OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT_PATH)),
            has_headers: false,
            variants: VariantMap::DEFAULT,
        }
    }
}

// The statistics of one district, as consumed by the map.
#[derive(PartialEq, Debug, Clone, Serialize)]
struct RegionStats {
    total: u64,
    counts: JSMap<String, JSValue>,
    percentages: JSMap<String, JSValue>,
    dominant: String,
    #[serde(rename = "dominantShare")]
    dominant_share: f64,
}

fn region_stats(rs: &RegionSummary) -> RegionStats {
    let mut counts: JSMap<String, JSValue> = JSMap::new();
    for (answer, count) in rs.counts.iter() {
        counts.insert(answer.label().to_string(), json!(count));
    }
    let mut percentages: JSMap<String, JSValue> = JSMap::new();
    for (answer, pct) in rs.percentages.iter() {
        percentages.insert(answer.label().to_string(), json!(pct));
    }
    RegionStats {
        total: rs.total,
        counts,
        percentages,
        dominant: rs.dominant.label().to_string(),
        dominant_share: rs.dominant_share,
    }
}

fn build_summary_js(summary: &Summary) -> JSValue {
    let mut res: JSMap<String, JSValue> = JSMap::new();
    // The summary is sorted by region: the insertion order is the output order.
    for (region, rs) in summary.iter() {
        res.insert(region.clone(), json!(region_stats(rs)));
    }
    JSValue::Object(res)
}

/// Reads all the responses of the input file and aggregates them.
pub fn aggregate_file(config: &SurveyConfig) -> SurveyResult<Summary> {
    info!("Attempting to read responses {:?}", config.input_path);
    let mut builder = Builder::new(&config.variants);
    let stats = io_csv::read_csv_responses(&config.input_path, config.has_headers, &mut builder)?;
    info!(
        "Read {} rows: {} counted, {} too short, {} unclassified, {} without region",
        stats.rows, stats.counted, stats.too_short, stats.unclassified, stats.empty_region
    );
    Ok(builder.finish())
}

/// The summary as a pretty-printed JSON document.
pub fn render_summary(summary: &Summary) -> SurveyResult<String> {
    serde_json::to_string_pretty(&build_summary_js(summary)).context(SerializeJsonSnafu {})
}

pub fn read_reference(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read reference content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

fn write_summary(output: &OutputTarget, contents: &str) -> SurveyResult<()> {
    match output {
        OutputTarget::Stdout => {
            println!("{}", contents);
        }
        OutputTarget::File(path) => {
            let path_s = path.display().to_string();
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context(CreateOutputDirSnafu {
                    path: parent.display().to_string(),
                })?;
            }
            fs::write(path, contents).context(WriteOutputSnafu { path: path_s })?;
        }
    }
    Ok(())
}

/// Runs the whole aggregation: read, aggregate, write.
///
/// The output is only written once the full summary is computed and, if a reference
/// is given, matches it.
/// Returns the number of regions in the summary.
pub fn run_survey(config: &SurveyConfig, check_summary_path: Option<String>) -> SurveyResult<usize> {
    let summary = aggregate_file(config)?;
    let pretty_js_stats = render_summary(&summary)?;

    // The reference summary, if provided for comparison. Nothing is written on a mismatch.
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_reference(&summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializeJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu { path: summary_p }.fail();
        }
        info!("Summary matches the reference {}", summary_p);
    }

    write_summary(&config.output, &pretty_js_stats)?;

    Ok(summary.len())
}

/// Human readable location of the output, for the final message.
pub fn describe_output(output: &OutputTarget) -> String {
    match output {
        OutputTarget::Stdout => "stdout".to_string(),
        OutputTarget::File(p) => p.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    const SCENARIO: &str = "dýl,Praha\ndyl,Praha\npozději,Praha\nxyz,Praha\npozdeji, Brno \n";

    const SCENARIO_JSON: &str = r#"{
  "Brno": {
    "total": 1,
    "counts": {
      "později": 1
    },
    "percentages": {
      "později": 100.0
    },
    "dominant": "později",
    "dominantShare": 100.0
  },
  "Praha": {
    "total": 3,
    "counts": {
      "dýl": 2,
      "později": 1
    },
    "percentages": {
      "dýl": 66.67,
      "později": 33.33
    },
    "dominant": "dýl",
    "dominantShare": 66.67
  }
}"#;

    fn config_in(dir: &Path, input: &str) -> SurveyConfig {
        let input_path = dir.join("users_votes_clean.csv");
        fs::write(&input_path, input).unwrap();
        SurveyConfig {
            input_path,
            output: OutputTarget::File(dir.join("data").join("votes.json")),
            ..SurveyConfig::default()
        }
    }

    #[test]
    fn scenario_end_to_end() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), SCENARIO);
        assert_eq!(run_survey(&config, None).unwrap(), 2);
        let written = fs::read_to_string(dir.path().join("data/votes.json")).unwrap();
        assert_eq!(written, SCENARIO_JSON);
    }

    #[test]
    fn one_field_row_is_ignored() {
        let dir = tempdir().unwrap();
        let input = format!("dyl\n{}pozdeji\n", SCENARIO);
        let config = config_in(dir.path(), &input);
        run_survey(&config, None).unwrap();
        let written = fs::read_to_string(dir.path().join("data/votes.json")).unwrap();
        assert_eq!(written, SCENARIO_JSON);
    }

    #[test]
    fn empty_input_gives_empty_object() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), "");
        assert_eq!(run_survey(&config, None).unwrap(), 0);
        let written = fs::read_to_string(dir.path().join("data/votes.json")).unwrap();
        assert_eq!(written, "{}");
    }

    #[test]
    fn output_is_deterministic() {
        let dir = tempdir().unwrap();
        let input = "pozdeji,Zlín\ndyl,Zlín\nDÝL,Aš\npozdeji,Zlín\ndyl,Most\npozdeji,Most\n";
        let config = config_in(dir.path(), input);
        let out = dir.path().join("data/votes.json");
        run_survey(&config, None).unwrap();
        let first = fs::read(&out).unwrap();
        run_survey(&config, None).unwrap();
        let second = fs::read(&out).unwrap();
        assert_eq!(first, second);

        let js: JSValue = serde_json::from_slice(&first).unwrap();
        let regions: Vec<&String> = js.as_object().unwrap().keys().collect();
        assert_eq!(regions, vec!["Aš", "Most", "Zlín"]);
        assert_eq!(js["Most"]["dominant"], json!("dýl"));
        assert_eq!(js["Most"]["dominantShare"], json!(50.0));
    }

    #[test]
    fn header_row_is_data_unless_skipped() {
        let dir = tempdir().unwrap();
        let input = "dyl,Region\ndyl,Praha\n";
        let config = config_in(dir.path(), input);
        assert_eq!(run_survey(&config, None).unwrap(), 2);

        let skip_header = SurveyConfig {
            has_headers: true,
            ..config
        };
        assert_eq!(run_survey(&skip_header, None).unwrap(), 1);
    }

    #[test]
    fn missing_input_fails() {
        let dir = tempdir().unwrap();
        let config = SurveyConfig {
            input_path: dir.path().join("missing.csv"),
            output: OutputTarget::File(dir.path().join("data").join("votes.json")),
            ..SurveyConfig::default()
        };
        let res = run_survey(&config, None);
        assert!(matches!(res, Err(SurveyError::CsvOpen { .. })));
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn reference_comparison() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), SCENARIO);
        let out = dir.path().join("data").join("votes.json");

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{}").unwrap();
        let res = run_survey(&config, Some(bad.display().to_string()));
        assert!(matches!(res, Err(SurveyError::ReferenceMismatch { .. })));
        assert!(!out.exists());

        let good = dir.path().join("good.json");
        fs::write(&good, SCENARIO_JSON).unwrap();
        let res = run_survey(&config, Some(good.display().to_string()));
        assert_eq!(res.unwrap(), 2);
        assert_eq!(fs::read_to_string(&out).unwrap(), SCENARIO_JSON);
    }

    #[test]
    fn unwritable_output_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let config = SurveyConfig {
            output: OutputTarget::File(blocker.join("votes.json")),
            ..config_in(dir.path(), SCENARIO)
        };
        let res = run_survey(&config, None);
        assert!(matches!(res, Err(SurveyError::CreateOutputDir { .. })));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }
}
