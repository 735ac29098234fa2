use crate::ahp::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "analysisName")]
    pub analysis_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "analysisDate")]
    pub analysis_date: Option<String>,
    #[serde(rename = "analysisRegion")]
    pub analysis_region: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub analysis: String,
    pub date: Option<String>,
    pub region: Option<String>,
    pub threshold: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "alternativeColumn")]
    _alternative_column: Option<String>,
    #[serde(rename = "firstDataRowIndex")]
    _first_data_row_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl DatasetSource {
    pub fn alternative_column(&self) -> String {
        self._alternative_column
            .clone()
            .unwrap_or_else(|| "Provinsi".to_string())
    }

    /// 1-based index of the first data row, header included, following the
    /// spreadsheet convention. Defaults to 2: the row after the header.
    pub fn first_data_row_index(&self) -> AhpCliResult<usize> {
        match &self._first_data_row_index {
            None => Ok(2),
            x => read_js_int(x),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AhpCriterion {
    pub name: String,
    pub code: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AhpAlternative {
    pub name: String,
    pub excluded: Option<bool>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AhpJudgment {
    pub first: String,
    pub second: String,
    #[serde(rename = "value")]
    _value: JSValue,
}

impl AhpJudgment {
    pub fn value(&self) -> AhpCliResult<f64> {
        read_js_f64(&Some(self._value.clone()))
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AhpConfigRules {
    #[serde(rename = "consistencyThreshold")]
    _consistency_threshold: Option<JSValue>,
    #[serde(rename = "zeroJudgmentPolicy")]
    pub zero_judgment_policy: Option<String>,
}

impl AhpConfigRules {
    pub fn consistency_threshold(&self) -> AhpCliResult<f64> {
        match &self._consistency_threshold {
            None => Ok(0.10),
            x => read_js_f64(x),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AhpConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "datasetSources")]
    pub dataset_sources: Vec<DatasetSource>,
    pub criteria: Vec<AhpCriterion>,
    pub alternatives: Vec<AhpAlternative>,
    pub judgments: Vec<AhpJudgment>,
    pub rules: AhpConfigRules,
}

pub fn read_summary(path: String) -> AhpCliResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> AhpCliResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}

fn read_js_f64(x: &Option<JSValue>) -> AhpCliResult<f64> {
    match x {
        Some(JSValue::Number(n)) => n.as_f64().context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<f64>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
