use clap::Parser;

/// This is an AHP ranking tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the analysis description in JSON format: criteria,
    /// alternatives, pairwise judgments, dataset sources and rules. For more information about
    /// the file format, read the documentation of the ahp_ranking crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the summary of an analysis in JSON format. If
    /// provided, padirank will check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, overrides the dataset file declared in the
    /// configuration.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the dataset input: csv or excel.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (list of comma-separated positive numbers or not specified) If specified, overrides the
    /// configured pairwise judgments. The values are taken in row-major upper-triangular order
    /// over the configured criteria.
    #[clap(long, value_parser, use_value_delimiter = true)]
    pub judgments: Option<Vec<f64>>,

    /// When using an Excel file, indicates the name of the worksheet to use. Defaults to the
    /// first worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
