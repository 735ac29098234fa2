pub use crate::config::*;

/// A builder for collecting pairwise judgments.
///
/// It decouples the collection of judgments (one slider or prompt at a time,
/// in whatever order the front-end presents the pairs) from the assembly of
/// the comparison matrix.
///
/// ```
/// pub use ahp_ranking::Builder;
/// pub use ahp_ranking::AhpRules;
/// # use ahp_ranking::AhpErrors;
///
/// let mut builder = Builder::new(&AhpRules::DEFAULT_RULES)?
///     .criteria(&["Produksi".to_string(), "Luas Panen".to_string()])?;
///
/// builder.add_judgment("Produksi", "Luas Panen", 3.0)?;
/// let matrix = builder.comparison_matrix()?;
/// assert_eq!(matrix[0][1], 3.0);
///
/// # Ok::<(), AhpErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: AhpRules,
    pub(crate) _criteria: Vec<Criterion>,
    pub(crate) _judgments: Vec<Judgment>,
}

impl Builder {
    pub fn new(rules: &AhpRules) -> Result<Builder, AhpErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _criteria: Vec::new(),
            _judgments: Vec::new(),
        })
    }

    pub fn criteria(self, names: &[String]) -> Result<Builder, AhpErrors> {
        Ok(Builder {
            _rules: self._rules,
            _criteria: names
                .iter()
                .map(|name| Criterion {
                    name: name.clone(),
                    code: None,
                })
                .collect(),
            _judgments: Vec::new(),
        })
    }

    /// Records one judgment: how much more important `first` is compared to
    /// `second`. Pairs may arrive in any order; validation happens when the
    /// matrix is assembled.
    pub fn add_judgment(
        &mut self,
        first: &str,
        second: &str,
        value: f64,
    ) -> Result<(), AhpErrors> {
        self.add_judgment_2(&Judgment {
            first: first.to_string(),
            second: second.to_string(),
            value,
        })
    }

    pub fn add_judgment_2(&mut self, judgment: &Judgment) -> Result<(), AhpErrors> {
        self._judgments.push(judgment.clone());
        Ok(())
    }

    /// Assembles the full reciprocal comparison matrix from the collected
    /// judgments, validating the pair set against the rules.
    pub fn comparison_matrix(&self) -> Result<Vec<Vec<f64>>, AhpErrors> {
        let upper = crate::resolve_judgments(&self._criteria, &self._judgments, &self._rules)?;
        Ok(crate::build_comparison_matrix(self._criteria.len(), &upper))
    }

    /// Runs the full analysis over the collected judgments.
    pub fn run(
        &self,
        alternatives: &[Alternative],
        observations: &[Observation],
    ) -> Result<AhpResult, AhpErrors> {
        crate::run_ahp_stats(
            &self._judgments,
            &self._rules,
            &self._criteria,
            alternatives,
            observations,
        )
    }
}
