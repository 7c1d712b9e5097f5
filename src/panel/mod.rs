//! Panel Constructor
//!
//! Builds one two-wave panel dataset per (country, t0, t1) from the
//! canonical table. Balanced-panel membership is determined by the
//! country's configured rule, never by inspecting the data shape; the
//! resulting balanced id set must be identical whichever rule variant
//! recomputes it on consistent data, which the tests cross-check.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::country::{CountryConfig, MembershipRule};
use crate::error::{HarmonizeError, Result};
use crate::models::{FieldCoverage, PanelDataset, PanelRecord, PanelStats, PersonYear};
use crate::schema::canonical;

/// Build the panel dataset for one year pair
///
/// Selects the rows with `year` in {t0, t1}, applies the membership rule's
/// population filters, and tags every remaining record with its wave
/// position and balanced-panel membership.
pub fn build_panel(
    cfg: &CountryConfig,
    records: &[PersonYear],
    coverage: &FieldCoverage,
    t0: i32,
    t1: i32,
) -> Result<PanelDataset> {
    if t0 >= t1 {
        return Err(HarmonizeError::config(format!(
            "invalid year pair ({t0}, {t1}): t0 must precede t1"
        )));
    }
    require_rule_inputs(cfg, coverage)?;

    let mut subset: Vec<PersonYear> = records
        .iter()
        .filter(|r| r.year == t0 || r.year == t1)
        .cloned()
        .collect();

    apply_population_filters(cfg, &mut subset, t0);

    let balanced = balanced_ids(cfg, &subset, t0, t1);

    let mut tagged: Vec<PanelRecord> = subset
        .into_iter()
        .map(|person| PanelRecord {
            time: person.year == t1,
            balanced_panel: balanced.contains(&person.individual_id),
            person,
        })
        .collect();
    tagged.sort_by(|a, b| {
        (&a.person.individual_id, a.person.year).cmp(&(&b.person.individual_id, b.person.year))
    });

    let structure_violations = detect_structure_violations(&tagged, &balanced);
    let balanced_households: FxHashSet<&str> = tagged
        .iter()
        .filter(|r| r.balanced_panel && !r.time)
        .map(|r| r.person.household_id.as_str())
        .collect();

    let stats = PanelStats {
        total_records: tagged.len(),
        balanced_individuals: balanced.len(),
        balanced_households: balanced_households.len(),
        structure_violations,
    };

    log::info!(
        "{} panel {t0}-{t1}: {} records, {} balanced individuals in {} households",
        cfg.code,
        stats.total_records,
        stats.balanced_individuals,
        stats.balanced_households
    );
    if !stats.structure_violations.is_empty() {
        log::warn!(
            "{} panel {t0}-{t1}: {} individuals violate the one-record-per-wave structure (first: {:?})",
            cfg.code,
            stats.structure_violations.len(),
            stats.structure_violations.first()
        );
    }

    Ok(PanelDataset {
        country: cfg.code.to_string(),
        t0,
        t1,
        records: tagged,
        coverage: coverage.clone(),
        stats,
    })
}

/// A membership rule that reads precomputed flags needs those flags mapped
fn require_rule_inputs(cfg: &CountryConfig, coverage: &FieldCoverage) -> Result<()> {
    match cfg.membership {
        MembershipRule::Rederived => Ok(()),
        MembershipRule::Precomputed { .. } => {
            if coverage.has(canonical::WAVE_PRESENT) {
                Ok(())
            } else {
                Err(HarmonizeError::missing_column(
                    cfg.code,
                    cfg.columns.wave_present.unwrap_or("wave_present"),
                ))
            }
        }
        MembershipRule::PairFlag { .. } => {
            if coverage.has(canonical::PANEL_FLAG) {
                Ok(())
            } else {
                Err(HarmonizeError::missing_column(
                    cfg.code,
                    cfg.columns.panel_flag.unwrap_or("panel_flag"),
                ))
            }
        }
    }
}

/// Population filters applied before membership is checked
fn apply_population_filters(cfg: &CountryConfig, subset: &mut Vec<PersonYear>, t0: i32) {
    match cfg.membership {
        MembershipRule::Rederived => {}
        MembershipRule::Precomputed {
            household_coherence,
            heads_only,
        } => {
            if household_coherence {
                subset.retain(|r| r.household_coherent == Some(true));
            }
            if heads_only {
                subset.retain(PersonYear::is_head);
            }
        }
        MembershipRule::PairFlag { min_age } => {
            subset.retain(|r| r.is_head() && r.household_coherent == Some(true));
            let qualifying: FxHashSet<String> = subset
                .iter()
                .filter(|r| r.year == t0 && r.age.is_some_and(|age| age >= min_age))
                .map(|r| r.individual_id.clone())
                .collect();
            subset.retain(|r| qualifying.contains(&r.individual_id));
        }
    }
}

/// The set of individual ids present in both waves under the rule
fn balanced_ids(cfg: &CountryConfig, subset: &[PersonYear], t0: i32, t1: i32) -> FxHashSet<String> {
    let present = |year: i32| -> FxHashSet<&str> {
        subset
            .iter()
            .filter(|r| r.year == year)
            .filter(|r| match cfg.membership {
                MembershipRule::Rederived => true,
                MembershipRule::Precomputed { .. } => r.wave_present == Some(true),
                MembershipRule::PairFlag { .. } => r.panel_flag == Some(true),
            })
            .map(|r| r.individual_id.as_str())
            .collect()
    };

    let at_t0 = present(t0);
    let at_t1 = present(t1);
    at_t0
        .intersection(&at_t1)
        .map(|id| (*id).to_string())
        .collect()
}

/// Balanced individuals must have exactly one record per wave
///
/// Violations are reported for investigation; the constructor never
/// deduplicates silently.
fn detect_structure_violations(
    records: &[PanelRecord],
    balanced: &FxHashSet<String>,
) -> Vec<String> {
    let mut per_wave: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
    for record in records {
        if record.balanced_panel {
            let counts = per_wave.entry(record.person.individual_id.as_str()).or_default();
            if record.time {
                counts.1 += 1;
            } else {
                counts.0 += 1;
            }
        }
    }

    let mut violations: Vec<String> = balanced
        .iter()
        .filter(|id| {
            per_wave
                .get(id.as_str())
                .is_none_or(|&(n0, n1)| n0 != 1 || n1 != 1)
        })
        .cloned()
        .collect();
    violations.sort();
    violations
}
