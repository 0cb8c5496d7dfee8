use clap::Parser;

/// This is a voting program for numeric valuations: each agent gives a value to every alternative,
/// and a voting rule picks the winning alternative.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the description of the vote in JSON format.
    /// The paths of the valuation files are relative to the directory of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the outcome of a vote in JSON format. If provided, timvote will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the vote will be written in JSON format to the given
    /// location. Setting this option overrides the output directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, the file containing the valuations. Setting this option overrides the
    /// valuation sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. Inferred from the extension of the input if not specified.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. Not needed if the file has a single
    /// worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default 1) The first row of the input that contains valuations, starting at 1.
    #[clap(long, value_parser)]
    pub first_row: Option<usize>,

    /// (default 1) The first column of the input that contains valuations, as a number starting at 1 or as a
    /// column letter (A, B, ...).
    #[clap(long, value_parser)]
    pub first_column: Option<String>,

    /// The voting rule: dictatorship, plurality, veto, borda, harmonic, scoring, stv or range.
    #[clap(long, value_parser)]
    pub rule: Option<String>,

    /// (default min) How to break ties between alternatives: 'min', 'max' or the number of an agent whose
    /// preferences decide.
    #[clap(long, value_parser)]
    pub tie_break: Option<String>,

    /// The agent whose first choice wins, for the dictatorship rule.
    #[clap(long, value_parser)]
    pub agent: Option<u32>,

    /// (list of comma-separated numbers) The score of each rank, for the scoring rule.
    #[clap(long, value_parser)]
    pub score_vector: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_flags() {
        let args = Args::parse_from([
            "timvote",
            "-i",
            "lunch.csv",
            "--rule",
            "scoring",
            "--score-vector",
            "3,2,1,0",
            "--first-column",
            "B",
            "--tie-break",
            "max",
            "--verbose",
        ]);
        assert_eq!(args.input.as_deref(), Some("lunch.csv"));
        assert_eq!(args.rule.as_deref(), Some("scoring"));
        assert_eq!(args.score_vector.as_deref(), Some("3,2,1,0"));
        assert_eq!(args.first_column.as_deref(), Some("B"));
        assert_eq!(args.tie_break.as_deref(), Some("max"));
        assert_eq!(args.first_row, None);
        assert!(args.verbose);
        assert!(args.config.is_none());
    }
}
