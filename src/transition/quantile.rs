//! Survey-weighted quantiles
//!
//! Cut-points of a weighted empirical distribution, used to place welfare
//! values into wave-specific quintiles. Cut-points are fixed before any
//! classification happens.

/// Compute weighted quantile cut-points at the given probabilities
///
/// Each cut-point is the smallest observed value whose cumulative weight
/// reaches the probability share of total weight. Returns `None` when
/// there are no observations or no positive weight.
#[must_use]
pub fn weighted_cutpoints(observations: &[(f64, f64)], probabilities: &[f64]) -> Option<Vec<f64>> {
    if observations.is_empty() {
        return None;
    }
    let total: f64 = observations.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return None;
    }

    let mut sorted: Vec<(f64, f64)> = observations.to_vec();
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut cutpoints = Vec::with_capacity(probabilities.len());
    for &p in probabilities {
        let target = p * total;
        let mut cumulative = 0.0;
        let mut cut = sorted[sorted.len() - 1].0;
        for &(value, weight) in &sorted {
            cumulative += weight;
            if cumulative >= target {
                cut = value;
                break;
            }
        }
        cutpoints.push(cut);
    }
    Some(cutpoints)
}

/// Classify a value against fixed cut-points, 1-based
///
/// A value at or below the k-th cut-point lands in bin k; values above
/// every cut-point land in the last bin.
#[must_use]
pub fn classify(value: f64, cutpoints: &[f64]) -> i32 {
    for (i, &cut) in cutpoints.iter().enumerate() {
        if value <= cut {
            return (i + 1) as i32;
        }
    }
    (cutpoints.len() + 1) as i32
}

/// Probabilities for quintile cut-points
pub const QUINTILE_PROBS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];
