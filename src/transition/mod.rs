//! Transition Analyzer
//!
//! Reshapes a balanced two-wave panel to one row per individual and
//! computes weighted state-transition matrices over four categorical
//! dimensions: employment, employment type, welfare quintile and
//! occupational skill group.
//!
//! Missing-data policy: an individual missing a dimension in both waves is
//! excluded from that dimension's table; missing in exactly one wave is
//! recoded to the sentinel category 0 ("not working" / "no income") and
//! kept. The employment-type and skill tables are further recoded against
//! the cleaned employment status so all four tables describe the same
//! not-working population. Category 0 deliberately conflates structural
//! non-participation with single-wave missingness; the labels keep that
//! visible.

pub mod quantile;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{HarmonizeError, Result};
use crate::models::{EmploymentType, PanelDataset, PersonYear, SkillLevel};
use crate::transition::quantile::{QUINTILE_PROBS, classify, weighted_cutpoints};

/// Absolute tolerance on the percentage sum of a normalized matrix
pub const NORMALIZATION_TOLERANCE: f64 = 0.01;

/// The four tracked dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    /// Working vs not working
    Employment,
    /// Four-way relationship to the job
    EmploymentType,
    /// Wave-specific weighted welfare quintile
    WelfareQuintile,
    /// Three-way occupational skill group
    Skill,
}

impl Dimension {
    /// All dimensions, in report order
    #[must_use]
    pub fn all() -> [Self; 4] {
        [
            Self::Employment,
            Self::EmploymentType,
            Self::WelfareQuintile,
            Self::Skill,
        ]
    }

    /// Human-readable name
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Employment => "Employment status",
            Self::EmploymentType => "Employment type",
            Self::WelfareQuintile => "Welfare quintile",
            Self::Skill => "Occupational skill group",
        }
    }

    /// Category codes and labels, sentinel first
    #[must_use]
    pub fn categories(self) -> Vec<Category> {
        let labeled: &[(i32, &str)] = match self {
            Self::Employment => &[(0, "Not working"), (1, "Working")],
            Self::EmploymentType => &[
                (0, "Not working"),
                (1, "Unpaid"),
                (2, "Self-employed"),
                (3, "Salaried"),
                (4, "Employer"),
            ],
            Self::WelfareQuintile => &[
                (0, "No income"),
                (1, "Q1"),
                (2, "Q2"),
                (3, "Q3"),
                (4, "Q4"),
                (5, "Q5"),
            ],
            Self::Skill => &[(0, "Not working"), (1, "Low"), (2, "Medium"), (3, "High")],
        };
        labeled
            .iter()
            .map(|&(code, label)| Category {
                code,
                label: label.to_string(),
            })
            .collect()
    }
}

/// One category of a tracked dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Numeric code; 0 is the "not working" / "no income" sentinel
    pub code: i32,
    /// Display label
    pub label: String,
}

/// A weighted transition matrix for one dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionMatrix {
    /// The tracked dimension
    pub dimension: Dimension,
    /// Row/column categories, in code order
    pub categories: Vec<Category>,
    /// Cell percentages of total retained weight; rows are t0 categories
    pub cells_pct: Vec<Vec<f64>>,
    /// Individuals retained for this dimension
    pub unweighted_n: usize,
    /// Total retained weight
    pub weighted_n: f64,
}

impl TransitionMatrix {
    /// Sum of all cell percentages
    #[must_use]
    pub fn total_pct(&self) -> f64 {
        self.cells_pct.iter().flatten().sum()
    }
}

/// The analyzer output for one panel dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionAnalysis {
    /// ISO-3 country code
    pub country: String,
    /// Initial wave year
    pub t0: i32,
    /// Final wave year
    pub t1: i32,
    /// One matrix per tracked dimension
    pub matrices: Vec<TransitionMatrix>,
}

/// One individual reshaped to wide: both waves side by side
#[derive(Debug, Clone)]
struct PairedIndividual {
    weight: f64,
    employed: [Option<bool>; 2],
    employment_type: [Option<EmploymentType>; 2],
    welfare: [Option<f64>; 2],
    skill: [Option<SkillLevel>; 2],
}

/// Analyze one panel dataset
///
/// The input is restricted to balanced individuals and, per policy, to the
/// household head as the representative member. The monetary converter
/// must already have run if wage-derived output is expected downstream;
/// the quintile dimension itself depends only on welfare.
pub fn analyze(dataset: &PanelDataset) -> Result<TransitionAnalysis> {
    let paired = reshape(dataset);
    log::info!(
        "{} {}-{}: analyzing transitions over {} balanced household heads",
        dataset.country,
        dataset.t0,
        dataset.t1,
        paired.len()
    );

    // Quintile cut-points are wave-specific and fixed before classification
    let welfare_cuts: [Option<Vec<f64>>; 2] = [
        wave_cutpoints(&paired, 0),
        wave_cutpoints(&paired, 1),
    ];

    let mut matrices = Vec::new();
    for dimension in Dimension::all() {
        let pairs = classified_pairs(&paired, dimension, &welfare_cuts);
        matrices.push(tabulate(dimension, &pairs)?);
    }

    Ok(TransitionAnalysis {
        country: dataset.country.clone(),
        t0: dataset.t0,
        t1: dataset.t1,
        matrices,
    })
}

/// Long-to-wide reshape over balanced household heads
///
/// The weight of the pair is the t0 weight. Duplicate records per wave
/// would already have been reported by the panel constructor; the first
/// record per wave is used here.
fn reshape(dataset: &PanelDataset) -> Vec<PairedIndividual> {
    let mut slots: FxHashMap<&str, [Option<&PersonYear>; 2]> = FxHashMap::default();
    for record in &dataset.records {
        if !record.balanced_panel || !record.person.is_head() {
            continue;
        }
        let slot = usize::from(record.time);
        let entry = slots.entry(record.person.individual_id.as_str()).or_default();
        if entry[slot].is_none() {
            entry[slot] = Some(&record.person);
        }
    }

    let mut ids: Vec<&str> = slots.keys().copied().collect();
    ids.sort_unstable();

    ids.into_iter()
        .filter_map(|id| {
            let [t0, t1] = slots[id];
            let (t0, t1) = (t0?, t1?);
            Some(PairedIndividual {
                weight: t0.weight,
                employed: [t0.employed, t1.employed],
                employment_type: [t0.employment_type, t1.employment_type],
                welfare: [t0.welfare_ppp, t1.welfare_ppp],
                skill: [t0.skill, t1.skill],
            })
        })
        .collect()
}

/// Weighted quintile cut-points for one wave of the paired sample
fn wave_cutpoints(paired: &[PairedIndividual], wave: usize) -> Option<Vec<f64>> {
    let observations: Vec<(f64, f64)> = paired
        .iter()
        .filter_map(|p| p.welfare[wave].map(|value| (value, p.weight)))
        .collect();
    weighted_cutpoints(&observations, &QUINTILE_PROBS)
}

/// Raw per-wave category for a dimension, before the missing-data policy
fn raw_category(
    paired: &PairedIndividual,
    dimension: Dimension,
    wave: usize,
    welfare_cuts: &[Option<Vec<f64>>; 2],
) -> Option<i32> {
    match dimension {
        Dimension::Employment => paired.employed[wave].map(i32::from),
        Dimension::EmploymentType => paired.employment_type[wave].map(|t| match t {
            EmploymentType::Unpaid => 1,
            EmploymentType::SelfEmployed => 2,
            EmploymentType::Salaried => 3,
            EmploymentType::Employer => 4,
        }),
        Dimension::WelfareQuintile => match (&welfare_cuts[wave], paired.welfare[wave]) {
            (Some(cuts), Some(value)) => Some(classify(value, cuts)),
            _ => None,
        },
        Dimension::Skill => paired.skill[wave].map(|s| match s {
            SkillLevel::Low => 1,
            SkillLevel::Medium => 2,
            SkillLevel::High => 3,
        }),
    }
}

/// Apply the missing-data policy to one individual's (t0, t1) raw values
///
/// Missing in both waves excludes the individual; missing in one wave is
/// recoded to the sentinel category 0 and kept.
fn clean_pair(raw: (Option<i32>, Option<i32>)) -> Option<(i32, i32)> {
    match raw {
        (None, None) => None,
        (Some(a), None) => Some((a, 0)),
        (None, Some(b)) => Some((0, b)),
        (Some(a), Some(b)) => Some((a, b)),
    }
}

/// Classified (t0, t1, weight) triples for one dimension
fn classified_pairs(
    paired: &[PairedIndividual],
    dimension: Dimension,
    welfare_cuts: &[Option<Vec<f64>>; 2],
) -> Vec<(i32, i32, f64)> {
    paired
        .iter()
        .filter_map(|p| {
            let mut raw = (
                raw_category(p, dimension, 0, welfare_cuts),
                raw_category(p, dimension, 1, welfare_cuts),
            );

            // The employment-derived dimensions must agree with the cleaned
            // employment status: a wave cleaned to "not working" forces
            // category 0 there, overriding any computed value.
            if matches!(dimension, Dimension::EmploymentType | Dimension::Skill) {
                let employment = clean_pair((
                    raw_category(p, Dimension::Employment, 0, welfare_cuts),
                    raw_category(p, Dimension::Employment, 1, welfare_cuts),
                ));
                if let Some((e0, e1)) = employment {
                    if e0 == 0 {
                        raw.0 = Some(0);
                    }
                    if e1 == 0 {
                        raw.1 = Some(0);
                    }
                }
            }

            clean_pair(raw).map(|(a, b)| (a, b, p.weight))
        })
        .collect()
}

/// Weighted contingency table, normalized to percentages of total weight
fn tabulate(dimension: Dimension, pairs: &[(i32, i32, f64)]) -> Result<TransitionMatrix> {
    let categories = dimension.categories();
    let index: FxHashMap<i32, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.code, i))
        .collect();

    let n = categories.len();
    let mut cells = vec![vec![0.0f64; n]; n];
    let mut weighted_n = 0.0;

    for &(from, to, weight) in pairs {
        let (Some(&r), Some(&c)) = (index.get(&from), index.get(&to)) else {
            return Err(HarmonizeError::consistency(format!(
                "{}: transition pair ({from}, {to}) outside the category set",
                dimension.label()
            )));
        };
        cells[r][c] += weight;
        weighted_n += weight;
    }

    let cells_pct = if weighted_n > 0.0 {
        cells
            .iter()
            .map(|row| row.iter().map(|w| 100.0 * w / weighted_n).collect())
            .collect()
    } else {
        cells
    };

    let matrix = TransitionMatrix {
        dimension,
        categories,
        cells_pct,
        unweighted_n: pairs.len(),
        weighted_n,
    };

    if matrix.unweighted_n > 0 {
        let total = matrix.total_pct();
        if (total - 100.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(HarmonizeError::consistency(format!(
                "{}: matrix percentages sum to {total:.4}, outside 100 ± {NORMALIZATION_TOLERANCE}",
                dimension.label()
            )));
        }
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paired(
        weight: f64,
        employed: [Option<bool>; 2],
        employment_type: [Option<EmploymentType>; 2],
        welfare: [Option<f64>; 2],
        skill: [Option<SkillLevel>; 2],
    ) -> PairedIndividual {
        PairedIndividual {
            weight,
            employed,
            employment_type,
            welfare,
            skill,
        }
    }

    #[test]
    fn test_clean_pair_policy() {
        assert_eq!(clean_pair((None, None)), None);
        assert_eq!(clean_pair((Some(3), None)), Some((3, 0)));
        assert_eq!(clean_pair((None, Some(2))), Some((0, 2)));
        assert_eq!(clean_pair((Some(1), Some(1))), Some((1, 1)));
    }

    #[test]
    fn test_cleaned_status_overrides_type_and_skill() {
        // Employed salaried high-skill at t0, out of work at t1: the type
        // and skill dimensions must land in the sentinel at t1, not drop
        // the individual.
        let sample = vec![paired(
            2.0,
            [Some(true), Some(false)],
            [Some(EmploymentType::Salaried), None],
            [None, None],
            [Some(SkillLevel::High), None],
        )];
        let cuts = [None, None];

        let type_pairs = classified_pairs(&sample, Dimension::EmploymentType, &cuts);
        assert_eq!(type_pairs, vec![(3, 0, 2.0)]);

        let skill_pairs = classified_pairs(&sample, Dimension::Skill, &cuts);
        assert_eq!(skill_pairs, vec![(3, 0, 2.0)]);
    }

    #[test]
    fn test_missing_both_waves_is_excluded() {
        let sample = vec![paired(
            1.0,
            [None, None],
            [None, None],
            [None, None],
            [None, None],
        )];
        let cuts = [None, None];
        for dimension in Dimension::all() {
            assert!(classified_pairs(&sample, dimension, &cuts).is_empty());
        }
    }

    #[test]
    fn test_tabulate_normalizes_to_100() {
        let pairs = vec![(1, 1, 3.0), (1, 0, 1.0), (0, 0, 4.0)];
        let matrix = tabulate(Dimension::Employment, &pairs).unwrap();
        assert!((matrix.total_pct() - 100.0).abs() < NORMALIZATION_TOLERANCE);
        assert_eq!(matrix.unweighted_n, 3);
        assert!((matrix.weighted_n - 8.0).abs() < f64::EPSILON);
        // Working -> Working holds 3/8 of the weight
        assert!((matrix.cells_pct[1][1] - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_tabulate_rejects_out_of_range_category() {
        let pairs = vec![(1, 7, 1.0)];
        assert!(tabulate(Dimension::Employment, &pairs).is_err());
    }
}
