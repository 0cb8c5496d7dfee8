use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use voting_rules::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::vote::config_reader::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum VoteError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet found in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {worksheet} not found in {path}"))]
    MissingWorksheet { worksheet: String, path: String },
    #[snafu(display("Several worksheets in {path}, the worksheet name must be provided"))]
    AmbiguousWorksheet { path: String },
    #[snafu(display("Line {lineno}: cell is not a number: {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a line of the CSV file"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno}: cell is not a number: {content:?}"))]
    NonNumericCell { lineno: usize, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive number or a column letter"))]
    ParsingJsonNumber {},
    #[snafu(display("Expected a positive agent number, found {content}"))]
    ParsingAgent { content: String },
    #[snafu(display("Cannot understand the score vector {content:?}"))]
    ParsingScoreVector { content: String },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No valuation source: provide an input file or a configuration"))]
    MissingInput {},
    #[snafu(display("No voting rule: provide one with --rule or in the configuration"))]
    MissingRule {},
    #[snafu(display("Unknown input type {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Voting error: {source}"))]
    Voting { source: VotingErrors },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
}

pub type VoteResult<T> = Result<T, VoteError>;
pub type BVoteResult<T> = Result<T, Box<VoteError>>;

fn round_stats_to_json(rs: &VotingResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for round_stat in rs.round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (aid, count) in round_stat.tally.iter() {
            tally.insert(aid.to_string(), json!(count.to_string()));
        }
        let eliminated: Vec<u32> = round_stat.eliminated.iter().map(|aid| aid.0).collect();
        l.push(json!({"round": round_stat.round, "tally": tally, "eliminated": eliminated}));
    }
    l
}

fn build_summary_js(
    config: &VoteConfig,
    rule: &VotingRule,
    tie_break: TieBreak,
    matrix: &ValuationMatrix,
    rv: &VotingResult,
) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
        rule: rule.name().to_string(),
        tie_break: tie_break.to_string(),
        agents: matrix.num_agents(),
        alternatives: matrix.num_alternatives(),
    };
    let mut tally: JSMap<String, JSValue> = JSMap::new();
    for (aid, total) in rv.tally.iter() {
        tally.insert(aid.to_string(), json!(total.to_string()));
    }
    json!({
        "config": c,
        "results": {
            "winner": rv.winner.0,
            "tiebreak": rv.tiebreak_applied,
            "tally": tally,
            "rounds": round_stats_to_json(rv)
        }
    })
}

fn read_valuation_data(root_path: &Path, cfs: &FileSource) -> BVoteResult<Vec<Vec<f64>>> {
    let p: PathBuf = root_path.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read valuation file {:?}", p2);
    match cfs.provider.to_lowercase().as_str() {
        "csv" => io_csv::read_csv_valuations(p2, cfs),
        "xlsx" | "excel" => io_xlsx::read_xlsx_valuations(p2, cfs),
        x => UnknownProviderSnafu { provider: x }.fail().map_err(Box::new),
    }
}

fn parse_score_vector(s: &str) -> VoteResult<Vec<f64>> {
    s.split(',')
        .map(|x| x.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()
        .context(ParsingScoreVectorSnafu { content: s })
}

fn infer_provider(path: &str) -> String {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => "xlsx".to_string(),
        _ => "csv".to_string(),
    }
}

/// Reads the configuration file if any, and applies the overrides from the
/// command line. Returns the directory that the file paths are relative to.
fn assemble_config(args: &Args) -> BVoteResult<(VoteConfig, PathBuf)> {
    let (mut config, mut root_p) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root_p = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root_p)
        }
        None => (VoteConfig::default(), PathBuf::new()),
    };

    // The input on the command line replaces all the sources of the configuration.
    if let Some(input) = &args.input {
        let provider = args
            .input_type
            .clone()
            .unwrap_or_else(|| infer_provider(input));
        config.valuation_sources = vec![FileSource {
            provider,
            file_path: input.clone(),
            first_value_row_index: args.first_row.map(|x| json!(x)),
            first_value_column_index: args.first_column.clone().map(JSValue::String),
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        }];
        root_p = PathBuf::new();
    }

    if let Some(rule) = &args.rule {
        config.rules.rule = Some(rule.clone());
    }
    if let Some(tb) = &args.tie_break {
        config.rules.tie_break = Some(JSValue::String(tb.clone()));
    }
    if let Some(agent) = args.agent {
        config.rules.dictator = Some(json!(agent));
    }
    if let Some(sv) = &args.score_vector {
        config.rules.score_vector = Some(parse_score_vector(sv)?);
    }
    Ok((config, root_p))
}

fn write_summary(
    pretty_js_stats: &str,
    out: &Option<String>,
    settings: &OutputSettings,
    root_p: &Path,
) -> BVoteResult<()> {
    let out_path: Option<PathBuf> = match (out, &settings.output_directory) {
        (Some(x), _) if x == "stdout" => None,
        (Some(x), _) => Some(PathBuf::from(x)),
        (None, Some(dir)) => {
            let dir_p = root_p.join(dir);
            fs::create_dir_all(&dir_p).context(WritingOutputSnafu {
                path: dir_p.display().to_string(),
            })?;
            Some(dir_p.join("summary.json"))
        }
        (None, None) => None,
    };
    match out_path {
        Some(p) => {
            info!("Writing summary to {:?}", p);
            fs::write(&p, pretty_js_stats).context(WritingOutputSnafu {
                path: p.display().to_string(),
            })?;
        }
        None => println!("{}", pretty_js_stats),
    }
    Ok(())
}

pub fn run_vote(args: &Args) -> BVoteResult<()> {
    let (config, root_p) = assemble_config(args)?;
    debug!("run_vote: config: {:?}", config);

    let rule = config.rules.voting_rule()?;
    let tie_break = config.rules.tie_break()?;

    if config.valuation_sources.is_empty() {
        return MissingInputSnafu {}.fail().map_err(Box::new);
    }

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for cfs in config.valuation_sources.iter() {
        let mut file_data = read_valuation_data(&root_p, cfs)?;
        rows.append(&mut file_data);
    }
    let matrix = ValuationMatrix::new(rows).context(VotingSnafu {})?;
    debug!("run_vote: matrix: {:?}", matrix);

    let result = run_voting_stats(&matrix, &rule, tie_break).context(VotingSnafu {})?;
    info!("run_vote: result: {:?}", result);

    // Assemble the final json
    let result_js = build_summary_js(&config, &rule, tie_break, &matrix, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_summary(&pretty_js_stats, &args.out, &config.output_settings, &root_p)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail().map_err(Box::new);
        }
        info!("The summary matches the reference {:?}", summary_p);
    }

    Ok(())
}

#[cfg(test)]
fn run_vote_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> BVoteResult<()> {
    use clap::Parser;
    let _ = env_logger::builder().is_test(true).try_init();
    let test_dir = format!("{}/tests/data", env!("CARGO_MANIFEST_DIR"));
    info!("Running test {}", test_name);
    let config_p = format!("{}/{}", test_dir, config_lpath);
    let summary_p = format!("{}/{}", test_dir, summary_lpath);
    let args = Args::parse_from(["timvote", "-c", config_p.as_str(), "-r", summary_p.as_str()]);
    run_vote(&args)
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    let res = run_vote_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    );
    if let Err(e) = &res {
        eprintln!("An error occured {}", e);
    }
    assert!(res.is_ok());
}
