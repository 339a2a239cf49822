use std::borrow::Cow;

use crate::core::sample::SampleRecord;
use crate::core::sketch::Sketch;
use crate::core::types::{Moltype, SearchOptions};
use crate::matching::ani::estimate_containment_and_ani;
use crate::matching::intersect::intersect;
use crate::matching::stats::{summarize, AbundanceSummary};
use crate::matching::SearchError;

#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Abundance-weighted statistics, available only when the subject tracks abundance
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedStats {
    /// Sum of all subject abundances
    pub total_abundance: u64,

    /// Sum of subject abundances over hashes shared with the query
    pub found_abundance: u64,

    /// `found_abundance / total_abundance` (0 when the subject is empty)
    pub f_weighted: f64,

    /// Summary of subject abundances over the shared hashes
    pub summary: AbundanceSummary,
}

/// Result of comparing one query against one subject
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    // === Identity ===
    pub query_filename: String,
    pub query_name: String,
    pub query_md5: String,
    /// Path the subject was loaded from
    pub match_filename: String,
    pub match_name: String,
    pub match_md5: String,
    pub ksize: u32,
    pub moltype: Moltype,
    /// Scale factor the comparison was made at
    pub scaled: u64,

    // === Unweighted ===
    /// Estimated shared bases: shared hashes times `scaled`
    pub intersect_bp: u64,
    pub query_n_hashes: usize,
    pub match_n_hashes: usize,
    /// Fraction of the query found in the subject
    pub f_query: f64,
    /// Fraction of the subject found in the query
    pub f_match: f64,
    pub jaccard: f64,

    // === ANI ===
    pub genome_containment_ani: f64,
    pub match_containment_ani: f64,
    pub average_containment_ani: f64,
    pub max_containment_ani: f64,
    pub potential_false_negative: bool,

    // === Weighted ===
    pub weighted: Option<WeightedStats>,
}

impl ComparisonResult {
    pub fn has_abundance(&self) -> bool {
        self.weighted.is_some()
    }
}

/// Borrow `sketch` if already at `scaled`, otherwise downsample it
fn at_scale(sketch: &Sketch, scaled: u64) -> Result<Cow<'_, Sketch>, SearchError> {
    if scaled <= sketch.scaled() {
        Ok(Cow::Borrowed(sketch))
    } else {
        Ok(Cow::Owned(sketch.downsample(scaled)?))
    }
}

fn check_shape(record: &SampleRecord, options: &SearchOptions) -> Result<(), SearchError> {
    if record.sketch.ksize() != options.ksize || record.sketch.moltype() != options.moltype {
        return Err(SearchError::Resolution {
            path: record.location.clone(),
            count: 0,
            ksize: options.ksize,
            moltype: options.moltype,
        });
    }
    Ok(())
}

/// Compare a query against a subject.
///
/// Both sketches are brought to the coarser of their two scale factors.
///
/// # Errors
///
/// Returns `SearchError::Resolution` if either sketch does not have the
/// requested ksize/alphabet, `SearchError::AbundanceRequired` if abundance
/// is required and the subject does not track it, or `SearchError::Sketch`
/// if sourmash cannot downsample or intersect the sketches.
pub fn compare(
    query: &SampleRecord,
    subject: &SampleRecord,
    options: &SearchOptions,
) -> Result<ComparisonResult, SearchError> {
    check_shape(query, options)?;
    check_shape(subject, options)?;

    if options.require_abundance && !subject.sketch.track_abundance() {
        return Err(SearchError::AbundanceRequired {
            path: subject.location.clone(),
        });
    }

    let scaled = query.sketch.scaled().max(subject.sketch.scaled());
    let query_mh = at_scale(&query.sketch, scaled)?;
    let subject_mh = at_scale(&subject.sketch, scaled)?;

    let est = estimate_containment_and_ani(&query_mh, &subject_mh)?;

    let weighted = match subject_mh.sum_abundances() {
        Some(total_abundance) => {
            let shared = intersect(&query_mh, &subject_mh)?;
            let values = shared.weighted.unwrap_or_default();
            let found_abundance: u64 = values.iter().sum();
            let f_weighted = if total_abundance == 0 {
                0.0
            } else {
                count_to_f64(found_abundance) / count_to_f64(total_abundance)
            };

            Some(WeightedStats {
                total_abundance,
                found_abundance,
                f_weighted,
                summary: summarize(&values),
            })
        }
        None => None,
    };

    Ok(ComparisonResult {
        query_filename: query.filename.clone(),
        query_name: query.name.clone(),
        query_md5: query.md5.clone(),
        match_filename: subject.location.clone(),
        match_name: subject.name.clone(),
        match_md5: subject.md5.clone(),
        ksize: options.ksize,
        moltype: subject.sketch.moltype(),
        scaled,
        intersect_bp: est.shared_bp,
        query_n_hashes: query_mh.len(),
        match_n_hashes: subject_mh.len(),
        f_query: est.f_query,
        f_match: est.f_match,
        jaccard: est.jaccard,
        genome_containment_ani: est.query_containment_ani,
        match_containment_ani: est.match_containment_ani,
        average_containment_ani: est.average_containment_ani,
        max_containment_ani: est.max_containment_ani,
        potential_false_negative: est.potential_false_negative,
        weighted,
    })
}
