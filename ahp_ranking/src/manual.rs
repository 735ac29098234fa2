/*!

This is the long-form manual for `ahp_ranking` and `padirank`.

## Method

The Analytic Hierarchy Process converts pairwise qualitative judgments
between criteria into a quantitative weighting, checks how self-consistent
those judgments are, and scores a set of alternatives against the weighted
criteria. The pipeline is:

1. one judgment per unordered pair of criteria is expanded into a reciprocal
   comparison matrix (diagonal 1, lower triangle the reciprocal of the upper
   triangle);
2. the matrix is normalized column-wise and averaged row-wise into the
   priority vector;
3. the consistency ratio compares the implied principal eigenvalue against
   the random-index baseline for the matrix size. A ratio above 0.10 means
   the judgments contradict each other more than random filling would and
   should be revised. The analysis still completes; the summary carries a
   `consistent` flag;
4. every alternative is scored as the weighted sum of its mean
   per-criterion value over the dataset rows that belong to it.

## Input formats

The following dataset providers are supported by `padirank`:
* `csv` a headered CSV table
* `excel` an Excel (.xlsx) worksheet with the same table shape

In both cases, one column (`alternativeColumn`, by default `Provinsi`) names
the alternative a row belongs to, and every other column is read as a
numeric criterion column where possible. Cells that do not parse as numbers
are skipped with a warning. Criteria listed in the configuration but absent
from the dataset contribute nothing to the scores.

## Configuration

The analysis is described by a JSON file:

```json
{
  "outputSettings": {
    "analysisName": "sumatra_padi",
    "analysisDate": "2024-05-01",
    "analysisRegion": "Sumatera"
  },
  "datasetSources": [
    { "provider": "csv", "filePath": "dataset.csv",
      "alternativeColumn": "Provinsi" }
  ],
  "criteria": [
    { "name": "Produksi" },
    { "name": "Luas Panen" }
  ],
  "alternatives": [
    { "name": "Lampung" },
    { "name": "Riau" }
  ],
  "judgments": [
    { "first": "Produksi", "second": "Luas Panen", "value": 3 }
  ],
  "rules": {
    "consistencyThreshold": "0.10",
    "zeroJudgmentPolicy": "reject"
  }
}
```

Dataset file paths are resolved relative to the directory of the
configuration file. Judgment values may be given as JSON numbers or as
strings.

### Rules

* `consistencyThreshold` (default `0.10`): largest consistency ratio
  reported as acceptable.
* `zeroJudgmentPolicy` (default `reject`): what to do with a judgment value
  of zero or below. `reject` refuses the input with an error before any
  arithmetic. `allowDegenerate` keeps the literal value; the reciprocal
  entry becomes infinite and the resulting priorities are typically
  non-finite. This second mode exists for compatibility with front-ends
  whose sliders start at zero.

*/
