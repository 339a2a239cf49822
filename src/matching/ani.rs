//! Containment and ANI point estimates for a pair of scaled sketches.
//!
//! ANI is estimated from a containment fraction `c` under a simple mutation
//! model: the per-base distance is `1 - c^(1/k)`. Alongside each estimate we
//! compute the probability that two sequences at that distance would share
//! no hashes at all given the sketch size; when that probability is not
//! negligible the measured overlap may understate the true one.

use crate::core::sketch::Sketch;

/// Probability above which an estimate is flagged as a potential false negative
pub const P_NOTHING_IN_COMMON_THRESHOLD: f64 = 1e-3;

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// One ANI point estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AniEstimate {
    pub ani: f64,
    pub p_nothing_in_common: f64,
}

impl AniEstimate {
    pub fn potential_false_negative(&self) -> bool {
        self.p_nothing_in_common >= P_NOTHING_IN_COMMON_THRESHOLD
    }
}

/// Unweighted comparison statistics between a query and a subject
#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentEstimate {
    pub n_shared: usize,
    pub shared_bp: u64,
    /// Fraction of the query found in the subject
    pub f_query: f64,
    /// Fraction of the subject found in the query
    pub f_match: f64,
    pub jaccard: f64,
    pub query_containment_ani: f64,
    pub match_containment_ani: f64,
    pub average_containment_ani: f64,
    pub max_containment_ani: f64,
    pub potential_false_negative: bool,
}

fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        count_to_f64(part) / count_to_f64(whole)
    }
}

/// Estimate ANI from a containment fraction.
///
/// `n_kmers` is the estimated number of distinct k-mers in the sketch whose
/// containment was measured.
#[must_use]
pub fn containment_to_ani(containment: f64, ksize: u32, scaled: u64, n_kmers: u64) -> AniEstimate {
    let dist = if containment <= 0.0001 {
        1.0
    } else if containment >= 0.9999 {
        0.0
    } else {
        1.0 - containment.powf(1.0 / f64::from(ksize))
    };

    AniEstimate {
        ani: 1.0 - dist,
        p_nothing_in_common: prob_nothing_in_common(dist, ksize, scaled, n_kmers),
    }
}

/// Probability that no hash is shared between two sequences at distance `dist`
#[must_use]
pub fn prob_nothing_in_common(dist: f64, ksize: u32, scaled: u64, n_kmers: u64) -> f64 {
    if dist >= 1.0 || n_kmers == 0 {
        return 1.0;
    }
    if dist <= 0.0 || scaled <= 1 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let (n_kmers, scaled) = (n_kmers as f64, scaled as f64);
    let expected_unmutated = n_kmers * (1.0 - dist).powf(f64::from(ksize));
    (expected_unmutated * (1.0 - 1.0 / scaled).ln()).exp()
}

/// Compare two sketches at the same scale, ksize and alphabet
///
/// # Errors
///
/// Returns the sourmash error if the sketches are at different scales.
pub fn estimate_containment_and_ani(
    query: &Sketch,
    subject: &Sketch,
) -> Result<ContainmentEstimate, sourmash::Error> {
    let scaled = query.scaled().max(subject.scaled());
    let n_query = query.len();
    let n_subject = subject.len();
    let n_shared = query.intersection(subject)?.len();
    let ksize = query.ksize();

    let f_query = fraction(n_shared, n_query);
    let f_match = fraction(n_shared, n_subject);
    let jaccard = fraction(n_shared, n_query + n_subject - n_shared);

    let n_min = n_query.min(n_subject);
    let max_containment = fraction(n_shared, n_min);

    let n_kmers = |n_hashes: usize| (n_hashes as u64).saturating_mul(scaled);
    let query_est = containment_to_ani(f_query, ksize, scaled, n_kmers(n_query));
    let match_est = containment_to_ani(f_match, ksize, scaled, n_kmers(n_subject));
    let max_est = containment_to_ani(max_containment, ksize, scaled, n_kmers(n_min));

    Ok(ContainmentEstimate {
        n_shared,
        shared_bp: n_kmers(n_shared),
        f_query,
        f_match,
        jaccard,
        query_containment_ani: query_est.ani,
        match_containment_ani: match_est.ani,
        average_containment_ani: (query_est.ani + match_est.ani) / 2.0,
        max_containment_ani: max_est.ani,
        potential_false_negative: query_est.potential_false_negative()
            || match_est.potential_false_negative()
            || max_est.potential_false_negative(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Moltype;

    #[test]
    fn test_containment_to_ani_extremes() {
        let full = containment_to_ani(1.0, 31, 1000, 1_000_000);
        assert_eq!(full.ani, 1.0);
        assert_eq!(full.p_nothing_in_common, 0.0);
        assert!(!full.potential_false_negative());

        let none = containment_to_ani(0.0, 31, 1000, 1_000_000);
        assert_eq!(none.ani, 0.0);
        assert_eq!(none.p_nothing_in_common, 1.0);
        assert!(none.potential_false_negative());
    }

    #[test]
    fn test_containment_to_ani_point_estimate() {
        let est = containment_to_ani(0.5, 31, 1000, 5_000_000);
        let expected = 0.5_f64.powf(1.0 / 31.0);
        assert!((est.ani - expected).abs() < 1e-12);
        // large genome at modest distance: overlap is essentially certain
        assert!(!est.potential_false_negative());
    }

    #[test]
    fn test_small_sketch_flags_false_negative() {
        // 3 hashes at scaled=1000 with 10% containment: easy to miss everything
        let est = containment_to_ani(0.1, 31, 1000, 3000);
        assert!(est.potential_false_negative());
    }

    #[test]
    fn test_prob_nothing_in_common_edge_cases() {
        assert_eq!(prob_nothing_in_common(0.05, 31, 1000, 0), 1.0);
        assert_eq!(prob_nothing_in_common(0.05, 31, 1, 1000), 0.0);
        assert_eq!(prob_nothing_in_common(1.0, 31, 1000, 1000), 1.0);
    }

    #[test]
    fn test_estimate_full_containment() {
        let query = Sketch::new(31, Moltype::Dna, 100_000, (1..=42).collect::<Vec<u64>>());
        let subject = Sketch::new(31, Moltype::Dna, 100_000, (1..=4200).collect::<Vec<u64>>());

        let est = estimate_containment_and_ani(&query, &subject).unwrap();
        assert_eq!(est.n_shared, 42);
        assert_eq!(est.shared_bp, 4_200_000);
        assert!((est.f_query - 1.0).abs() < 1e-12);
        assert!((est.f_match - 0.01).abs() < 1e-12);
        assert!((est.jaccard - 0.01).abs() < 1e-12);
        assert_eq!(est.query_containment_ani, 1.0);
        assert_eq!(est.max_containment_ani, 1.0);
        assert!(est.match_containment_ani < 1.0);
        assert!(
            (est.average_containment_ani
                - (est.query_containment_ani + est.match_containment_ani) / 2.0)
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_estimate_disjoint() {
        let query = Sketch::new(31, Moltype::Dna, 1000, [1, 2, 3]);
        let subject = Sketch::new(31, Moltype::Dna, 1000, [4, 5]);

        let est = estimate_containment_and_ani(&query, &subject).unwrap();
        assert_eq!(est.shared_bp, 0);
        assert_eq!(est.f_query, 0.0);
        assert_eq!(est.f_match, 0.0);
        assert_eq!(est.jaccard, 0.0);
        assert_eq!(est.max_containment_ani, 0.0);
        assert!(est.potential_false_negative);
    }

    #[test]
    fn test_estimate_empty_sketches() {
        let empty = Sketch::new(31, Moltype::Dna, 1000, []);
        let est = estimate_containment_and_ani(&empty, &empty).unwrap();
        assert_eq!(est.f_query, 0.0);
        assert_eq!(est.jaccard, 0.0);
    }

    #[test]
    fn test_estimate_huge_scale_does_not_overflow() {
        let query = Sketch::new(31, Moltype::Dna, u64::MAX, [0, 1]);
        let subject = Sketch::new(31, Moltype::Dna, u64::MAX, [0, 1]);

        let est = estimate_containment_and_ani(&query, &subject).unwrap();
        assert_eq!(est.n_shared, 2);
        assert_eq!(est.shared_bp, u64::MAX);
        assert_eq!(est.query_containment_ani, 1.0);
    }

    #[test]
    fn test_estimate_uses_alphabet_ksize() {
        let query = Sketch::new(10, Moltype::Protein, 1, [1, 2, 3, 4]);
        let subject = Sketch::new(10, Moltype::Protein, 1, [1, 2, 5, 6]);

        let est = estimate_containment_and_ani(&query, &subject).unwrap();
        let expected = 0.5_f64.powf(1.0 / 10.0);
        assert!((est.query_containment_ani - expected).abs() < 1e-12);
    }
}
