use crate::core::sketch::Sketch;

/// Hashes shared between a query and a subject sketch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intersection {
    /// Number of shared hashes
    pub n_hashes: usize,

    /// Estimated shared bases: `n_hashes * scaled`
    pub shared_bp: u64,

    /// Subject abundance of each shared hash, in hash order.
    /// `None` when the subject does not track abundance.
    pub weighted: Option<Vec<u64>>,
}

impl Intersection {
    /// Total subject abundance over the shared hashes
    pub fn weighted_sum(&self) -> Option<u64> {
        self.weighted.as_ref().map(|w| w.iter().sum())
    }
}

/// Intersect `query` with the flattened `subject`, recovering subject abundances.
///
/// Both sketches are expected at the same ksize and alphabet; the caller
/// checks compatibility.
///
/// # Errors
///
/// Returns the sourmash error if the sketches are at different scales.
pub fn intersect(query: &Sketch, subject: &Sketch) -> Result<Intersection, sourmash::Error> {
    // Sketch::intersection compares hashes only, so this is the flattened subject
    let shared = query.intersection(subject)?.hashes();
    let n_hashes = shared.len();

    Ok(Intersection {
        n_hashes,
        shared_bp: (n_hashes as u64).saturating_mul(subject.scaled()),
        weighted: subject.abundances_of(&shared),
    })
}
