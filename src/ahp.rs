use log::{debug, info, warn};

use ahp_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::ahp::config_reader::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

#[derive(Debug, Snafu)]
pub enum AhpCliError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No usable worksheet in workbook {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening file"))]
    OpeningJson { source: std::io::Error },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a number, in numeric or string form"))]
    ParsingJsonNumber {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Error opening CSV file"))]
    CsvOpen { source: csv::Error },
    #[snafu(display("Error reading a CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("The dataset is missing the column {column}"))]
    MissingColumn { column: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AhpCliResult<T> = Result<T, AhpCliError>;

/// Command-line overrides applied on top of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: Option<String>,
    pub input_type: Option<String>,
    pub excel_worksheet_name: Option<String>,
    /// Judgment values in row-major upper-triangular order over the
    /// configured criteria.
    pub judgments: Option<Vec<f64>>,
    pub out: Option<String>,
    pub reference: Option<String>,
}

/// A dataset row, as produced by the readers, before numeric validation.
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedRecord {
    pub id: Option<String>,
    pub alternative: String,
    /// Column name and value, for the cells that parsed as numbers.
    pub values: Vec<(String, Option<f64>)>,
}

fn result_stats_to_json(rs: &AhpResult) -> JSValue {
    let mut priorities: JSMap<String, JSValue> = JSMap::new();
    for (name, w) in rs.priorities.iter() {
        priorities.insert(name.clone(), json!(format!("{:.6}", w)));
    }

    let criteria: Vec<JSValue> = rs.priorities.iter().map(|(name, _)| json!(name)).collect();

    let mut scores: Vec<JSValue> = Vec::new();
    for (name, score) in rs.scores.iter() {
        scores.push(json!({
            "alternative": name,
            "score": format!("{:.6}", score)
        }));
    }

    let ranking: Vec<JSValue> = rs.ranking.iter().map(|name| json!(name)).collect();

    json!({
        "criteria": criteria,
        "priorities": priorities,
        "lambdaMax": format!("{:.6}", rs.consistency.lambda_max),
        "consistencyIndex": format!("{:.6}", rs.consistency.consistency_index),
        "consistencyRatio": format!("{:.6}", rs.consistency.consistency_ratio),
        "consistent": rs.consistency.acceptable,
        "scores": scores,
        "ranking": ranking,
        "best": rs.ranking.first(),
        "worst": rs.ranking.last()
    })
}

fn build_summary_js(config: &AhpConfig, rules: &AhpRules, rs: &AhpResult) -> JSValue {
    let c = OutputConfig {
        analysis: config.output_settings.analysis_name.clone(),
        date: config.output_settings.analysis_date.clone(),
        region: config.output_settings.analysis_region.clone(),
        threshold: Some(format!("{:.2}", rules.consistency_threshold)),
    };
    json!({
        "config": c,
        "results": result_stats_to_json(rs) })
}

fn validate_rules(config_rules: &AhpConfigRules) -> AhpCliResult<AhpRules> {
    let res = AhpRules {
        consistency_threshold: config_rules.consistency_threshold()?,
        zero_judgment_policy: match config_rules.zero_judgment_policy.as_deref() {
            None | Some("reject") => ZeroJudgmentPolicy::Reject,
            Some("allowDegenerate") => ZeroJudgmentPolicy::AllowDegenerate,
            Some(x) => {
                whatever!("Cannot use zero judgment policy {:?} (currently not implemented)", x)
            }
        },
    };
    Ok(res)
}

// TODO: add a policy on how to treat rows naming an unknown alternative.
/// Drops the cells that did not parse as numbers and the rows without an
/// alternative name.
fn validate_records(records: &[ParsedRecord]) -> Vec<Observation> {
    let mut res: Vec<Observation> = Vec::new();
    for record in records.iter() {
        if record.alternative.is_empty() {
            warn!(
                "validate_records: record {:?} has no alternative name, skipping",
                record.id
            );
            continue;
        }
        let values: Vec<(String, f64)> = record
            .values
            .iter()
            .filter_map(|(column, cell)| match cell {
                Some(v) => Some((column.clone(), *v)),
                None => {
                    debug!(
                        "validate_records: record {:?}: column {} is not numeric, skipping",
                        record.id, column
                    );
                    None
                }
            })
            .collect();
        res.push(Observation {
            alternative: record.alternative.clone(),
            values,
        });
    }
    res
}

fn assemble_judgments(
    config: &AhpConfig,
    override_values: &Option<Vec<f64>>,
) -> AhpCliResult<Vec<Judgment>> {
    if let Some(values) = override_values {
        let names: Vec<String> = config.criteria.iter().map(|c| c.name.clone()).collect();
        let expected = names.len() * (names.len().saturating_sub(1)) / 2;
        if values.len() != expected {
            whatever!(
                "Expected {} judgment values for {} criteria, got {}",
                expected,
                names.len(),
                values.len()
            );
        }
        let mut res: Vec<Judgment> = Vec::new();
        let mut k = 0;
        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                res.push(Judgment {
                    first: names[i].clone(),
                    second: names[j].clone(),
                    value: values[k],
                });
                k += 1;
            }
        }
        Ok(res)
    } else {
        config
            .judgments
            .iter()
            .map(|j| {
                Ok(Judgment {
                    first: j.first.clone(),
                    second: j.second.clone(),
                    value: j.value()?,
                })
            })
            .collect()
    }
}

fn read_dataset(root_path: String, source: &DatasetSource) -> AhpCliResult<Vec<ParsedRecord>> {
    let p: PathBuf = [root_path, source.file_path.clone()].iter().collect();
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read dataset file {:?}", p2);
    match source.provider.as_str() {
        "csv" => io_csv::read_csv_dataset(p2, source),
        "excel" => io_excel::read_excel_dataset(p2, source),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

fn write_summary(pretty_js: &str, out: &Option<String>) -> AhpCliResult<()> {
    match out {
        None => println!("stats:{}", pretty_js),
        Some(p) if p == "stdout" => println!("{}", pretty_js),
        Some(p) => {
            fs::write(p, pretty_js).context(OpeningJsonSnafu {})?;
            info!("Summary written to {}", p);
        }
    }
    Ok(())
}

pub fn run_analysis(config_path: String, opts: &RunOptions) -> AhpCliResult<()> {
    let config_p = Path::new(config_path.as_str());
    let config_str = fs::read_to_string(config_path.clone()).context(OpeningJsonSnafu {})?;
    let mut config: AhpConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    info!("config: {:?}", config);

    // Validate the rules:
    let rules = validate_rules(&config.rules)?;

    if config.dataset_sources.is_empty() {
        whatever!("no dataset sources declared in the configuration");
    }

    // The command-line overrides apply to the first dataset source.
    if let Some(input) = opts.input.clone() {
        let first = &mut config.dataset_sources[0];
        first.file_path = input;
        if let Some(t) = opts.input_type.clone() {
            first.provider = t;
        }
        if let Some(ws) = opts.excel_worksheet_name.clone() {
            first.excel_worksheet_name = Some(ws);
        }
    }

    let root_p = config_p.parent().context(MissingParentDirSnafu {})?;
    let mut records: Vec<ParsedRecord> = Vec::new();
    for source in config.dataset_sources.iter() {
        let mut file_records = read_dataset(
            root_p.as_os_str().to_str().unwrap().to_string(),
            source,
        )?;
        records.append(&mut file_records);
    }
    debug!("run_analysis: {} dataset rows", records.len());

    let observations = validate_records(&records);

    let criteria: Vec<Criterion> = config
        .criteria
        .iter()
        .map(|c| Criterion {
            name: c.name.clone(),
            code: match c.code.clone() {
                Some(x) if x.is_empty() => None,
                x => x,
            },
        })
        .collect();
    let alternatives: Vec<Alternative> = config
        .alternatives
        .iter()
        .map(|a| Alternative {
            name: a.name.clone(),
            excluded: a.excluded.unwrap_or(false),
        })
        .collect();
    let judgments = assemble_judgments(&config, &opts.judgments)?;

    let res = run_ahp_stats(&judgments, &rules, &criteria, &alternatives, &observations);

    info!("res {:?}", res);

    let result = match res {
        Result::Ok(x) => x,
        Result::Err(x) => {
            whatever!("Analysis error: {:?}", x)
        }
    };

    // Assemble the final json
    let result_js = build_summary_js(&config, &rules, &result);

    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_summary(&pretty_js_stats, &opts.out)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = opts.reference.clone() {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run_analysis, RunOptions};

    fn run_analysis_test(test_name: &str, config_lpath: &str, summary_lpath: &str) {
        let test_dir = option_env!("AHP_TEST_DIR").unwrap_or("test_data");
        let opts = RunOptions {
            reference: Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
            ..RunOptions::default()
        };
        let res = run_analysis(format!("{}/{}/{}", test_dir, test_name, config_lpath), &opts);
        if let Err(e) = &res {
            eprintln!("An error occured {}", e);
        }
        assert!(res.is_ok(), "{:?}", res.err());
    }

    fn test_wrapper(test_name: &str) {
        run_analysis_test(
            test_name,
            format!("{}_config.json", test_name).as_str(),
            format!("{}_expected_summary.json", test_name).as_str(),
        )
    }

    #[test]
    fn sumatra_padi() {
        test_wrapper("sumatra_padi");
    }

    #[test]
    fn uniform_judgments() {
        test_wrapper("uniform_judgments");
    }

    #[test]
    fn zero_judgment_is_rejected() {
        let test_dir = option_env!("AHP_TEST_DIR").unwrap_or("test_data");
        let res = run_analysis(
            format!("{}/zero_judgment/zero_judgment_config.json", test_dir),
            &RunOptions::default(),
        );
        assert!(res.is_err());
    }

    #[test]
    fn judgment_override_must_cover_all_pairs() {
        let test_dir = option_env!("AHP_TEST_DIR").unwrap_or("test_data");
        let opts = RunOptions {
            judgments: Some(vec![1.0, 2.0]),
            ..RunOptions::default()
        };
        let res = run_analysis(
            format!("{}/uniform_judgments/uniform_judgments_config.json", test_dir),
            &opts,
        );
        assert!(res.is_err());
    }

    #[test]
    #[ignore = "needs an xlsx dataset fixture"]
    fn excel_dataset() {
        test_wrapper("excel_dataset");
    }
}
