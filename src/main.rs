mod args;
mod survey;

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{debug, error, info};
use snafu::ErrorCompat;

use crate::args::Args;
use crate::survey::{OutputTarget, SurveyConfig};

fn build_config(args: &Args) -> SurveyConfig {
    let default = SurveyConfig::default();
    SurveyConfig {
        input_path: args
            .input
            .clone()
            .map(PathBuf::from)
            .unwrap_or(default.input_path),
        output: match args.out.as_deref() {
            Some("stdout") => OutputTarget::Stdout,
            Some(p) => OutputTarget::File(PathBuf::from(p)),
            None => default.output,
        },
        has_headers: args.has_headers,
        variants: default.variants,
    }
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    debug!("args: {:?}", args);

    let config = build_config(&args);
    info!("config: {:?}", config);

    match survey::run_survey(&config, args.reference.clone()) {
        Ok(num_regions) => match config.output {
            OutputTarget::Stdout => info!("Aggregated data for {} districts", num_regions),
            OutputTarget::File(_) => println!(
                "Aggregated data for {} districts written to {}",
                num_regions,
                survey::describe_output(&config.output)
            ),
        },
        Err(e) => {
            error!("Error: {}", e);
            eprintln!("An error occured: {}", e);
            let mut cause = e.source();
            while let Some(c) = cause {
                eprintln!("  caused by: {}", c);
                cause = c.source();
            }
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                eprintln!("trace: {}", bt);
            }
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_uses_defaults() {
        let args = Args::parse_from(["dialectvotes"]);
        assert_eq!(build_config(&args), SurveyConfig::default());
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "dialectvotes",
            "-i",
            "in.csv",
            "--out",
            "stdout",
            "--has-headers",
        ]);
        let config = build_config(&args);
        assert_eq!(config.input_path, PathBuf::from("in.csv"));
        assert_eq!(config.output, OutputTarget::Stdout);
        assert!(config.has_headers);

        let args = Args::parse_from(["dialectvotes", "-o", "out/votes.json"]);
        assert_eq!(
            build_config(&args).output,
            OutputTarget::File(PathBuf::from("out/votes.json"))
        );
    }
}
