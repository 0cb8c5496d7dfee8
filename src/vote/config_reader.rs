use crate::vote::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName", default)]
    pub contest_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
}

/// The description of the vote, as written in the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub rule: String,
    #[serde(rename = "tieBreak")]
    pub tie_break: String,
    pub agents: usize,
    pub alternatives: usize,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstValueRowIndex")]
    pub first_value_row_index: Option<JSValue>,
    #[serde(rename = "firstValueColumnIndex")]
    pub first_value_column_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    /// The first row with valuations, starting at 0. Defaults to the first row.
    pub fn first_value_row_index(&self) -> VoteResult<usize> {
        read_js_index(&self.first_value_row_index)
    }

    /// The first column with valuations, starting at 0. Defaults to the first column.
    pub fn first_value_column_index(&self) -> VoteResult<usize> {
        read_js_index(&self.first_value_column_index)
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSettings {
    pub rule: Option<String>,
    #[serde(rename = "tieBreak")]
    pub tie_break: Option<JSValue>,
    pub dictator: Option<JSValue>,
    #[serde(rename = "scoreVector")]
    pub score_vector: Option<Vec<f64>>,
}

impl RuleSettings {
    /// The tie-break, `min` if not specified.
    pub fn tie_break(&self) -> VoteResult<TieBreak> {
        let tb = match &self.tie_break {
            None => TieBreak::Min,
            Some(JSValue::String(s)) => s.parse::<TieBreak>().context(VotingSnafu {})?,
            Some(JSValue::Number(n)) => n
                .to_string()
                .parse::<TieBreak>()
                .context(VotingSnafu {})?,
            Some(x) => {
                return Err(VotingErrors::InvalidTieBreak(x.to_string())).context(VotingSnafu {});
            }
        };
        Ok(tb)
    }

    pub fn voting_rule(&self) -> VoteResult<VotingRule> {
        let name = self.rule.clone().context(MissingRuleSnafu {})?;
        let dictator = match &self.dictator {
            Some(x) => Some(read_js_agent(x)?),
            None => None,
        };
        VotingRule::from_name(&name, dictator, self.score_vector.as_deref()).context(VotingSnafu {})
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "valuationSources", default)]
    pub valuation_sources: Vec<FileSource>,
    #[serde(default)]
    pub rules: RuleSettings,
}

pub fn read_config(path: &str) -> BVoteResult<VoteConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: VoteConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> BVoteResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

// A 1-based index, as a number or an Excel-style column name.
fn read_js_int(x: &Option<JSValue>) -> VoteResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        // Parsing the Excel-style columns: A is 1, Z is 26, AA is 27
        Some(JSValue::String(s)) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            Ok(s.to_ascii_uppercase()
                .chars()
                .fold(0, |acc, c| acc * 26 + (c as usize - 'A' as usize + 1)))
        }
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}

// An agent number: a positive integer, as a number or a string.
fn read_js_agent(x: &JSValue) -> VoteResult<AgentId> {
    let aid = match x {
        JSValue::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        JSValue::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    match aid {
        Some(aid) if aid > 0 => Ok(AgentId(aid)),
        _ => ParsingAgentSnafu {
            content: x.to_string(),
        }
        .fail(),
    }
}

fn read_js_index(x: &Option<JSValue>) -> VoteResult<usize> {
    if x.is_none() {
        return Ok(0);
    }
    match read_js_int(x)? {
        0 => None.context(ParsingJsonNumberSnafu {}),
        idx => Ok(idx - 1),
    }
}
