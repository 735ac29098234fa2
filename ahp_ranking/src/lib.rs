mod builder;
mod config;
pub mod manual;

use log::{debug, info, warn};

use std::collections::HashMap;

pub use crate::builder::Builder;
pub use crate::config::*;

// **** Private structures ****

/// The random-index baselines of Saaty, indexed by matrix size (1-based).
/// Sizes beyond the table fall back to the last entry.
const RANDOM_INDEX: [f64; 9] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45];

fn random_index(n: usize) -> f64 {
    if n == 0 {
        0.0
    } else if n <= RANDOM_INDEX.len() {
        RANDOM_INDEX[n - 1]
    } else {
        RANDOM_INDEX[RANDOM_INDEX.len() - 1]
    }
}

// Row-major offset into the upper triangle, diagonal excluded.
fn slot_index(n: usize, i: usize, j: usize) -> usize {
    i * (2 * n - i - 1) / 2 + (j - i - 1)
}

/// Folds named judgments into the row-major upper-triangular order expected
/// by [build_comparison_matrix]. A pair given in reverse order contributes
/// the reciprocal value.
pub(crate) fn resolve_judgments(
    criteria: &[Criterion],
    judgments: &[Judgment],
    rules: &AhpRules,
) -> Result<Vec<f64>, AhpErrors> {
    let n = criteria.len();
    if n == 0 {
        return Err(AhpErrors::EmptyCriteria);
    }
    let expected = n * (n - 1) / 2;
    if judgments.len() != expected {
        return Err(AhpErrors::WrongJudgmentCount(expected, judgments.len()));
    }
    let index: HashMap<&str, usize> = criteria
        .iter()
        .enumerate()
        .map(|(idx, c)| (c.name.as_str(), idx))
        .collect();

    let mut slots: Vec<Option<f64>> = vec![None; expected];
    for judgment in judgments.iter() {
        let first = *index
            .get(judgment.first.as_str())
            .ok_or_else(|| AhpErrors::UnknownCriterion(judgment.first.clone()))?;
        let second = *index
            .get(judgment.second.as_str())
            .ok_or_else(|| AhpErrors::UnknownCriterion(judgment.second.clone()))?;
        if first == second {
            return Err(AhpErrors::SelfComparison(judgment.first.clone()));
        }
        if rules.zero_judgment_policy == ZeroJudgmentPolicy::Reject && judgment.value <= 0.0 {
            return Err(AhpErrors::NonPositiveJudgment(
                judgment.first.clone(),
                judgment.second.clone(),
            ));
        }
        let (i, j, value) = if first < second {
            (first, second, judgment.value)
        } else {
            (second, first, 1.0 / judgment.value)
        };
        let slot = slot_index(n, i, j);
        if slots[slot].is_some() {
            return Err(AhpErrors::DuplicateJudgment(
                judgment.first.clone(),
                judgment.second.clone(),
            ));
        }
        slots[slot] = Some(value);
    }
    // The count matched and no slot was filled twice, so every slot is set.
    Ok(slots.iter().map(|x| x.unwrap()).collect())
}

/// Expands the n(n-1)/2 upper-triangle judgments, given in row-major order,
/// into the full reciprocal comparison matrix.
///
/// The caller is responsible for supplying one judgment per unordered pair:
/// no validation is performed here and a short slice panics.
pub fn build_comparison_matrix(n: usize, judgments: &[f64]) -> Vec<Vec<f64>> {
    let mut matrix = vec![vec![1.0; n]; n];
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let v = judgments[k];
            k += 1;
            matrix[i][j] = v;
            matrix[j][i] = 1.0 / v;
        }
    }
    matrix
}

/// Divides every entry by its column sum.
///
/// Pure: a zero column sum produces non-finite entries rather than an error.
pub fn normalize(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = matrix.len();
    let mut column_sums = vec![0.0; n];
    for row in matrix.iter() {
        for (j, x) in row.iter().enumerate() {
            column_sums[j] += x;
        }
    }
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(column_sums.iter())
                .map(|(x, s)| x / s)
                .collect()
        })
        .collect()
}

/// Row-wise arithmetic mean of the normalized matrix. Sums to ~1 when the
/// input columns each sum to 1.
pub fn priority_vector(normalized: &[Vec<f64>]) -> Vec<f64> {
    let n = normalized.len();
    normalized
        .iter()
        .map(|row| row.iter().sum::<f64>() / n as f64)
        .collect()
}

fn lambda_max(matrix: &[Vec<f64>], priorities: &[f64]) -> f64 {
    let n = matrix.len();
    if n == 0 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (row, w) in matrix.iter().zip(priorities.iter()) {
        let weighted: f64 = row.iter().zip(priorities.iter()).map(|(x, wj)| x * wj).sum();
        acc += weighted / w;
    }
    acc / n as f64
}

fn consistency_stats(matrix: &[Vec<f64>], priorities: &[f64], threshold: f64) -> ConsistencyStats {
    let n = matrix.len();
    let lambda = lambda_max(matrix, priorities);
    // The index formula divides by n - 1. It is degenerate below n = 3,
    // where a reciprocal matrix is always consistent: the ratio is defined
    // as 0 there instead of crashing.
    let (ci, cr) = if n <= 2 {
        (0.0, 0.0)
    } else {
        let ci = (lambda - n as f64) / (n as f64 - 1.0);
        (ci, ci / random_index(n))
    };
    ConsistencyStats {
        lambda_max: lambda,
        consistency_index: ci,
        consistency_ratio: cr,
        acceptable: cr <= threshold,
    }
}

/// Consistency ratio of a comparison matrix against its priority vector.
///
/// Values above 0.10 conventionally mean the judgments should be revised.
/// The interpretation is left to the caller; only the scalar is returned.
pub fn consistency_ratio(matrix: &[Vec<f64>], priorities: &[f64]) -> f64 {
    consistency_stats(
        matrix,
        priorities,
        AhpRules::DEFAULT_RULES.consistency_threshold,
    )
    .consistency_ratio
}

/// Scores every alternative by weighting its mean per-criterion value.
///
/// Criteria absent from the dataset columns contribute zero, as do
/// alternatives without any matching row. Excluded alternatives are skipped.
/// The output keeps the input alternative order.
pub fn score_alternatives(
    observations: &[Observation],
    criteria: &[Criterion],
    alternatives: &[Alternative],
    weights: &[f64],
) -> Vec<(String, f64)> {
    let mut res: Vec<(String, f64)> = Vec::new();
    for alternative in alternatives.iter() {
        if alternative.excluded {
            debug!("score_alternatives: skipping excluded {}", alternative.name);
            continue;
        }
        let rows: Vec<&Observation> = observations
            .iter()
            .filter(|o| o.alternative == alternative.name)
            .collect();
        let mut score = 0.0;
        for (criterion, weight) in criteria.iter().zip(weights.iter()) {
            let values: Vec<f64> = rows
                .iter()
                .flat_map(|o| {
                    o.values
                        .iter()
                        .filter(|(c, _)| *c == criterion.name)
                        .map(|(_, v)| *v)
                })
                .collect();
            if values.is_empty() {
                continue;
            }
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            score += mean * weight;
        }
        res.push((alternative.name.clone(), score));
    }
    res
}

fn rank_alternatives(scores: &[(String, f64)]) -> Vec<String> {
    let mut sorted: Vec<(String, f64)> = scores.to_vec();
    // Stable sort: equal scores keep the input order. Non-finite scores from
    // degenerate inputs compare as equal and stay in place.
    sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    sorted.iter().map(|(name, _)| name.clone()).collect()
}

/// Runs the full analysis with the given rules for the given judgments.
///
/// Arguments:
/// * `judgments` the pairwise judgments, one per unordered criteria pair
/// * `rules` the rules that govern this analysis
/// * `criteria` the criteria, in matrix row/column order
/// * `alternatives` the alternatives to score, in presentation order
/// * `observations` the materialized dataset rows
pub fn run_ahp_stats(
    judgments: &[Judgment],
    rules: &AhpRules,
    criteria: &[Criterion],
    alternatives: &[Alternative],
    observations: &[Observation],
) -> Result<AhpResult, AhpErrors> {
    info!(
        "Processing {:?} judgments over {:?} criteria, {:?} observations, rules: {:?}",
        judgments.len(),
        criteria.len(),
        observations.len(),
        rules
    );

    let upper = resolve_judgments(criteria, judgments, rules)?;
    let matrix = build_comparison_matrix(criteria.len(), &upper);
    debug!("run_ahp_stats: comparison matrix: {:?}", matrix);

    let normalized = normalize(&matrix);
    let priorities = priority_vector(&normalized);
    for (c, w) in criteria.iter().zip(priorities.iter()) {
        info!("Criterion: {}: {}", c.name, w);
    }

    let consistency = consistency_stats(&matrix, &priorities, rules.consistency_threshold);
    debug!("run_ahp_stats: consistency: {:?}", consistency);
    if !consistency.acceptable {
        warn!(
            "Consistency ratio {} is above the threshold {}: the judgments should be revised",
            consistency.consistency_ratio, rules.consistency_threshold
        );
    }

    let scores = score_alternatives(observations, criteria, alternatives, &priorities);
    let ranking = rank_alternatives(&scores);
    for (name, score) in scores.iter() {
        info!("Alternative: {}: {}", name, score);
    }

    let named_priorities: Vec<(String, f64)> = criteria
        .iter()
        .zip(priorities.iter())
        .map(|(c, w)| (c.name.clone(), *w))
        .collect();

    Ok(AhpResult {
        priorities: named_priorities,
        consistency,
        scores,
        ranking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(names: &[&str]) -> Vec<Criterion> {
        names
            .iter()
            .map(|n| Criterion {
                name: n.to_string(),
                code: None,
            })
            .collect()
    }

    fn alternatives(names: &[&str]) -> Vec<Alternative> {
        names
            .iter()
            .map(|n| Alternative {
                name: n.to_string(),
                excluded: false,
            })
            .collect()
    }

    fn observation(alternative: &str, values: &[(&str, f64)]) -> Observation {
        Observation {
            alternative: alternative.to_string(),
            values: values
                .iter()
                .map(|(c, v)| (c.to_string(), *v))
                .collect(),
        }
    }

    #[test]
    fn normalize_columns_sum_to_one() {
        let m = build_comparison_matrix(4, &[3.0, 5.0, 2.0, 4.0, 0.5, 1.5]);
        let normalized = normalize(&m);
        for j in 0..4 {
            let col_sum: f64 = (0..4).map(|i| normalized[i][j]).sum();
            assert!((col_sum - 1.0).abs() < 1e-9, "column {}: {}", j, col_sum);
        }
    }

    #[test]
    fn priority_vector_sums_to_one() {
        let m = build_comparison_matrix(4, &[3.0, 5.0, 2.0, 4.0, 0.5, 1.5]);
        let w = priority_vector(&normalize(&m));
        let total: f64 = w.iter().sum();
        assert!((total - 1.0).abs() < 1e-6, "total: {}", total);
    }

    #[test]
    fn consistent_three_criteria_scenario() {
        // A-vs-B=2, A-vs-C=4, B-vs-C=2 is exactly consistent since 2*2=4.
        let m = build_comparison_matrix(3, &[2.0, 4.0, 2.0]);
        assert_eq!(m, vec![
            vec![1.0, 2.0, 4.0],
            vec![0.5, 1.0, 2.0],
            vec![0.25, 0.5, 1.0]
        ]);
        let w = priority_vector(&normalize(&m));
        assert!((w[0] - 4.0 / 7.0).abs() < 1e-6, "w0: {}", w[0]);
        assert!((w[1] - 2.0 / 7.0).abs() < 1e-6, "w1: {}", w[1]);
        assert!((w[2] - 1.0 / 7.0).abs() < 1e-6, "w2: {}", w[2]);
        assert!(consistency_ratio(&m, &w).abs() < 1e-9);
    }

    #[test]
    fn identity_judgments_are_consistent() {
        let m = build_comparison_matrix(6, &[1.0; 15]);
        let w = priority_vector(&normalize(&m));
        for x in w.iter() {
            assert!((x - 1.0 / 6.0).abs() < 1e-9);
        }
        assert!(consistency_ratio(&m, &w).abs() < 1e-9);
    }

    #[test]
    fn small_matrices_never_divide_by_zero() {
        let m1 = build_comparison_matrix(1, &[]);
        let w1 = priority_vector(&normalize(&m1));
        assert_eq!(consistency_ratio(&m1, &w1), 0.0);

        let m2 = build_comparison_matrix(2, &[3.0]);
        let w2 = priority_vector(&normalize(&m2));
        assert_eq!(consistency_ratio(&m2, &w2), 0.0);
    }

    #[test]
    fn zero_weights_give_zero_scores() {
        let crits = criteria(&["Produksi", "Luas Panen"]);
        let alts = alternatives(&["Lampung", "Riau"]);
        let obs = vec![
            observation("Lampung", &[("Produksi", 100.0), ("Luas Panen", 20.0)]),
            observation("Riau", &[("Produksi", 50.0), ("Luas Panen", 10.0)]),
        ];
        let scores = score_alternatives(&obs, &crits, &alts, &[0.0, 0.0]);
        assert_eq!(scores, vec![
            ("Lampung".to_string(), 0.0),
            ("Riau".to_string(), 0.0)
        ]);
    }

    #[test]
    fn absent_alternative_scores_zero() {
        let crits = criteria(&["Produksi"]);
        let alts = alternatives(&["Lampung", "Jambi"]);
        let obs = vec![observation("Lampung", &[("Produksi", 100.0)])];
        let scores = score_alternatives(&obs, &crits, &alts, &[1.0]);
        assert_eq!(scores[1], ("Jambi".to_string(), 0.0));
    }

    #[test]
    fn mean_of_rows_is_weighted() {
        // mean(100, 200) * 0.5 = 75
        let crits = criteria(&["Produksi", "Curah hujan"]);
        let alts = alternatives(&["Lampung"]);
        let obs = vec![
            observation("Lampung", &[("Produksi", 100.0)]),
            observation("Lampung", &[("Produksi", 200.0)]),
        ];
        let scores = score_alternatives(&obs, &crits, &alts, &[0.5, 0.5]);
        assert_eq!(scores, vec![("Lampung".to_string(), 75.0)]);
    }

    #[test]
    fn criteria_missing_from_dataset_are_skipped() {
        let crits = criteria(&["Produksi", "Suhu rata-rata"]);
        let alts = alternatives(&["Riau"]);
        let obs = vec![observation("Riau", &[("Produksi", 40.0)])];
        let scores = score_alternatives(&obs, &crits, &alts, &[0.5, 0.5]);
        assert_eq!(scores, vec![("Riau".to_string(), 20.0)]);
    }

    #[test]
    fn excluded_alternatives_are_not_scored() {
        let crits = criteria(&["Produksi"]);
        let mut alts = alternatives(&["Lampung", "Riau"]);
        alts[1].excluded = true;
        let obs = vec![
            observation("Lampung", &[("Produksi", 10.0)]),
            observation("Riau", &[("Produksi", 99.0)]),
        ];
        let scores = score_alternatives(&obs, &crits, &alts, &[1.0]);
        assert_eq!(scores, vec![("Lampung".to_string(), 10.0)]);
    }

    #[test]
    fn run_ranks_by_decreasing_score() {
        let crits = criteria(&["Produksi", "Luas Panen", "Curah hujan"]);
        let alts = alternatives(&["Lampung", "Jambi"]);
        let judgments = vec![
            Judgment {
                first: "Produksi".to_string(),
                second: "Luas Panen".to_string(),
                value: 2.0,
            },
            Judgment {
                first: "Produksi".to_string(),
                second: "Curah hujan".to_string(),
                value: 4.0,
            },
            Judgment {
                first: "Luas Panen".to_string(),
                second: "Curah hujan".to_string(),
                value: 2.0,
            },
        ];
        let obs = vec![
            observation("Lampung", &[("Produksi", 10.0), ("Luas Panen", 5.0)]),
            observation("Jambi", &[("Produksi", 90.0), ("Luas Panen", 30.0)]),
        ];
        let res = run_ahp_stats(&judgments, &AhpRules::DEFAULT_RULES, &crits, &alts, &obs).unwrap();
        assert_eq!(res.ranking, vec!["Jambi".to_string(), "Lampung".to_string()]);
        assert!(res.consistency.acceptable);
        let total: f64 = res.priorities.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn reversed_pairs_fold_into_the_upper_triangle() {
        let crits = criteria(&["A", "B"]);
        let judgments = vec![Judgment {
            first: "B".to_string(),
            second: "A".to_string(),
            value: 4.0,
        }];
        let upper = resolve_judgments(&crits, &judgments, &AhpRules::DEFAULT_RULES).unwrap();
        assert_eq!(upper, vec![0.25]);
    }

    #[test]
    fn zero_judgments_are_rejected_by_default() {
        let crits = criteria(&["A", "B"]);
        let judgments = vec![Judgment {
            first: "A".to_string(),
            second: "B".to_string(),
            value: 0.0,
        }];
        let res = resolve_judgments(&crits, &judgments, &AhpRules::DEFAULT_RULES);
        assert_eq!(
            res,
            Err(AhpErrors::NonPositiveJudgment(
                "A".to_string(),
                "B".to_string()
            ))
        );
    }

    #[test]
    fn zero_judgments_propagate_when_allowed() {
        let rules = AhpRules {
            zero_judgment_policy: ZeroJudgmentPolicy::AllowDegenerate,
            ..AhpRules::DEFAULT_RULES
        };
        let crits = criteria(&["A", "B"]);
        let judgments = vec![Judgment {
            first: "A".to_string(),
            second: "B".to_string(),
            value: 0.0,
        }];
        let upper = resolve_judgments(&crits, &judgments, &rules).unwrap();
        let m = build_comparison_matrix(2, &upper);
        assert!(m[1][0].is_infinite());
        let w = priority_vector(&normalize(&m));
        assert!(w.iter().any(|x| !x.is_finite() || *x == 0.0));
    }

    #[test]
    fn shape_errors_are_structured() {
        let crits = criteria(&["A", "B", "C"]);
        let j = |first: &str, second: &str, value: f64| Judgment {
            first: first.to_string(),
            second: second.to_string(),
            value,
        };
        assert_eq!(
            resolve_judgments(&crits, &[j("A", "B", 1.0)], &AhpRules::DEFAULT_RULES),
            Err(AhpErrors::WrongJudgmentCount(3, 1))
        );
        assert_eq!(
            resolve_judgments(
                &crits,
                &[j("A", "B", 1.0), j("B", "A", 2.0), j("B", "C", 1.0)],
                &AhpRules::DEFAULT_RULES
            ),
            Err(AhpErrors::DuplicateJudgment("B".to_string(), "A".to_string()))
        );
        assert_eq!(
            resolve_judgments(
                &crits,
                &[j("A", "B", 1.0), j("A", "D", 2.0), j("B", "C", 1.0)],
                &AhpRules::DEFAULT_RULES
            ),
            Err(AhpErrors::UnknownCriterion("D".to_string()))
        );
        assert_eq!(
            resolve_judgments(&crits, &[], &AhpRules::DEFAULT_RULES),
            Err(AhpErrors::WrongJudgmentCount(3, 0))
        );
    }
}
