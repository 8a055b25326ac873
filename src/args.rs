use clap::Parser;

/// Aggregates the answers of the dialect survey per district.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, default users_votes_clean.csv) The CSV file with the responses: the answer in the
    /// first column, the district in the second column.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path or 'stdout', default data/votes.json) The location of the JSON summary. The parent
    /// directory is created if it does not exist.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) A reference summary in JSON format. If provided, dialectvotes will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, the first row of the input is a header and is skipped.
    #[clap(long, takes_value = false)]
    pub has_headers: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
