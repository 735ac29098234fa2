// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A decision criterion.
///
/// The order of the criteria set is significant: row and column i of the
/// comparison matrix both refer to criterion i.
#[derive(PartialEq, Debug, Clone)]
pub struct Criterion {
    pub name: String,
    pub code: Option<String>,
}

/// An alternative to be ranked (a province, in the original rice dataset).
///
/// Excluded alternatives are kept in the input for documentation purposes but
/// do not receive a score.
#[derive(PartialEq, Debug, Clone)]
pub struct Alternative {
    pub name: String,
    pub excluded: bool,
}

/// A single pairwise judgment collected from a human: how much more important
/// `first` is compared to `second`.
///
/// The pair may be given in either order; a reversed pair is folded into the
/// upper triangle of the comparison matrix as the reciprocal value.
#[derive(PartialEq, Debug, Clone)]
pub struct Judgment {
    pub first: String,
    pub second: String,
    pub value: f64,
}

/// One row of the dataset: the alternative it belongs to and the numeric
/// cells, keyed by column name.
#[derive(PartialEq, Debug, Clone)]
pub struct Observation {
    pub alternative: String,
    pub values: Vec<(String, f64)>,
}

// ******** Output data structures *********

/// Consistency statistics of a comparison matrix.
#[derive(PartialEq, Debug, Clone)]
pub struct ConsistencyStats {
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub consistency_ratio: f64,
    /// true when the ratio is at or below the configured threshold.
    pub acceptable: bool,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AhpResult {
    /// Weight per criterion, in criteria order. Sums to ~1 for well-formed
    /// judgments.
    pub priorities: Vec<(String, f64)>,
    pub consistency: ConsistencyStats,
    /// Weighted score per alternative, in the input alternative order.
    pub scores: Vec<(String, f64)>,
    /// Alternative names sorted by decreasing score. Ties keep the input
    /// order.
    pub ranking: Vec<String>,
}

/// Errors that prevent the analysis from completing successfully.
#[derive(PartialEq, Debug, Clone)]
pub enum AhpErrors {
    EmptyCriteria,
    /// (expected, actual)
    WrongJudgmentCount(usize, usize),
    UnknownCriterion(String),
    SelfComparison(String),
    DuplicateJudgment(String, String),
    NonPositiveJudgment(String, String),
}

impl Error for AhpErrors {}

impl Display for AhpErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AhpErrors::EmptyCriteria => write!(f, "the criteria set is empty"),
            AhpErrors::WrongJudgmentCount(expected, actual) => {
                write!(f, "expected {} pairwise judgments, got {}", expected, actual)
            }
            AhpErrors::UnknownCriterion(name) => {
                write!(f, "judgment refers to an unknown criterion: {}", name)
            }
            AhpErrors::SelfComparison(name) => {
                write!(f, "criterion {} is compared against itself", name)
            }
            AhpErrors::DuplicateJudgment(first, second) => {
                write!(f, "duplicate judgment for the pair {} / {}", first, second)
            }
            AhpErrors::NonPositiveJudgment(first, second) => {
                write!(
                    f,
                    "the judgment for the pair {} / {} must be strictly positive",
                    first, second
                )
            }
        }
    }
}

// ********* Configuration **********

/// Policy for judgment values that are zero or negative.
///
/// The classical AHP scale runs from 1 to 9. Some collection front-ends allow
/// a zero slider value, which makes the reciprocal entry infinite and poisons
/// the normalization step further down.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ZeroJudgmentPolicy {
    /// Refuse the judgment with a structured error before any arithmetic.
    Reject,
    /// Keep the value as a literal ratio. The resulting priorities may be
    /// non-finite.
    AllowDegenerate,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AhpRules {
    /// Largest consistency ratio still considered acceptable. Judgments above
    /// it are reported, never rejected.
    pub consistency_threshold: f64,
    pub zero_judgment_policy: ZeroJudgmentPolicy,
}

impl AhpRules {
    pub const DEFAULT_RULES: AhpRules = AhpRules {
        consistency_threshold: 0.10,
        zero_judgment_policy: ZeroJudgmentPolicy::Reject,
    };
}
