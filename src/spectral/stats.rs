// SPDX-License-Identifier: AGPL-3.0-only

//! Quasicrystal diagnostics and band detection.
//!
//! The mass occurrence ratio of a Fibonacci chain tends to the golden ratio
//! φ; band detection exposes the gap hierarchy of the fractal spectrum.

use serde::Serialize;

/// The golden ratio φ = (1 + √5)/2.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Mass occurrence counts of a two-species chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccurrenceRatio {
    /// Generation count the chain was built from
    pub generations: u32,
    /// The more frequent mass and its count
    pub majority: (f64, usize),
    /// The less frequent mass and its count
    pub minority: (f64, usize),
    /// majority count / minority count (≥ 1)
    pub ratio: f64,
}

impl OccurrenceRatio {
    /// Distance from the golden ratio.
    #[must_use]
    pub fn golden_deviation(&self) -> f64 {
        (self.ratio - GOLDEN_RATIO).abs()
    }
}

/// Count distinct masses and, for exactly two, report larger / smaller.
///
/// Returns `None` for a single mass value (nothing to compare, and no
/// division by zero) or for more than two species.
#[must_use]
pub fn occurrence_ratio(masses: &[f64], generations: u32) -> Option<OccurrenceRatio> {
    let mut counts: Vec<(f64, usize)> = Vec::with_capacity(2);
    for &m in masses {
        match counts.iter_mut().find(|(v, _)| v.total_cmp(&m).is_eq()) {
            Some((_, c)) => *c += 1,
            None => counts.push((m, 1)),
        }
    }

    let [first, second] = counts.as_slice() else {
        return None;
    };
    let (majority, minority) = if second.1 > first.1 {
        (*second, *first)
    } else {
        (*first, *second)
    };

    Some(OccurrenceRatio {
        generations,
        majority,
        minority,
        ratio: majority.1 as f64 / minority.1 as f64,
    })
}

/// A contiguous run of spectrum between two gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    /// Lowest value in the band
    pub lo: f64,
    /// Highest value in the band
    pub hi: f64,
    /// Number of modes in the band
    pub modes: usize,
}

/// Group sorted values into bands.
///
/// A gap is a spacing exceeding `gap_factor` times the median spacing.
#[must_use]
pub fn detect_bands(sorted: &[f64], gap_factor: f64) -> Vec<Band> {
    match sorted {
        [] => return Vec::new(),
        [only] => {
            return vec![Band {
                lo: *only,
                hi: *only,
                modes: 1,
            }]
        }
        _ => {}
    }

    let mut spacings: Vec<f64> = sorted.windows(2).map(|w| w[1] - w[0]).collect();
    spacings.sort_by(f64::total_cmp);
    let threshold = spacings[spacings.len() / 2] * gap_factor;

    let mut bands = Vec::new();
    let mut start = 0;
    for (i, w) in sorted.windows(2).enumerate() {
        if w[1] - w[0] > threshold {
            bands.push(Band {
                lo: sorted[start],
                hi: w[0],
                modes: i + 1 - start,
            });
            start = i + 1;
        }
    }
    bands.push(Band {
        lo: sorted[start],
        hi: sorted[sorted.len() - 1],
        modes: sorted.len() - start,
    });
    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MassChain;

    #[test]
    fn occurrence_ratio_six_generations() {
        let chain = MassChain::fibonacci(6, 1.0, 2.0).expect("chain");
        let r = occurrence_ratio(chain.masses(), 6).expect("two species");
        assert_eq!(r.majority.1, 12);
        assert_eq!(r.minority.1, 8);
        assert!(r.ratio > 1.0 && r.ratio < 2.0, "ratio={}", r.ratio);
        assert!((r.ratio - 1.5).abs() < 1e-15);
    }

    #[test]
    fn occurrence_ratio_skipped_for_uniform_chain() {
        let chain = MassChain::fibonacci(6, 2.0, 2.0).expect("chain");
        assert!(occurrence_ratio(chain.masses(), 6).is_none());
    }

    #[test]
    fn occurrence_ratio_three_species_is_none() {
        assert!(occurrence_ratio(&[1.0, 2.0, 3.0], 0).is_none());
    }

    #[test]
    fn occurrence_ratio_tie_is_one() {
        let chain = MassChain::fibonacci(3, 1.0, 3.0).expect("chain");
        let r = occurrence_ratio(chain.masses(), 3).expect("two species");
        assert!((r.ratio - 1.0).abs() < 1e-15);
    }

    #[test]
    fn occurrence_ratio_approaches_golden() {
        let early = occurrence_ratio(MassChain::fibonacci(6, 1.0, 2.0).expect("c").masses(), 6)
            .expect("two species");
        let late = occurrence_ratio(MassChain::fibonacci(14, 1.0, 2.0).expect("c").masses(), 14)
            .expect("two species");
        assert!(late.golden_deviation() < early.golden_deviation());
        assert!(late.golden_deviation() < crate::tolerances::GOLDEN_RATIO_CONVERGENCE);
    }

    #[test]
    fn detect_bands_empty_and_single() {
        assert!(detect_bands(&[], 2.0).is_empty());
        let bands = detect_bands(&[2.5], 2.0);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].modes, 1);
    }

    #[test]
    fn detect_bands_no_gap() {
        let vals: Vec<f64> = (0..20).map(f64::from).collect();
        let bands = detect_bands(&vals, 10.0);
        assert_eq!(bands.len(), 1);
        assert_eq!((bands[0].lo, bands[0].hi, bands[0].modes), (0.0, 19.0, 20));
    }

    #[test]
    fn detect_bands_large_gap() {
        let mut vals: Vec<f64> = (0..5).map(f64::from).collect();
        vals.extend((100..105).map(f64::from));
        let bands = detect_bands(&vals, 2.0);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].modes + bands[1].modes, 10);
        assert!((bands[1].lo - 100.0).abs() < 1e-15);
    }
}
