/// Summary of abundances over a set of hashes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AbundanceSummary {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std: f64,
}

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Mean, median and population standard deviation of `values`.
///
/// An empty slice summarizes to all zeros.
#[must_use]
pub fn summarize(values: &[u64]) -> AbundanceSummary {
    if values.is_empty() {
        return AbundanceSummary::default();
    }

    #[allow(clippy::cast_precision_loss)]
    let floats: Vec<f64> = values.iter().map(|v| *v as f64).collect();
    let n = count_to_f64(floats.len());

    let mean = floats.iter().sum::<f64>() / n;
    let variance = floats.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = floats;
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    AbundanceSummary {
        mean,
        median,
        std: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_empty() {
        let s = summarize(&[]);
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.median, 0.0);
        assert_eq!(s.std, 0.0);
    }

    #[test]
    fn test_summarize_two_values() {
        let s = summarize(&[10, 20]);
        assert!((s.mean - 15.0).abs() < 1e-12);
        assert!((s.median - 15.0).abs() < 1e-12);
        assert!((s.std - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_odd_length_unsorted() {
        let s = summarize(&[9, 1, 5]);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.median - 5.0).abs() < 1e-12);
        // population variance = (16 + 16 + 0) / 3
        assert!((s.std - (32.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_single_value() {
        let s = summarize(&[7]);
        assert_eq!(s.mean, 7.0);
        assert_eq!(s.median, 7.0);
        assert_eq!(s.std, 0.0);
    }
}
