//! Scaled k-mer sketches.
//!
//! A [`Sketch`] wraps a sourmash [`KmerMinHash`] holding every hashed k-mer
//! whose hash falls below `u64::MAX / scaled`, so on average one in `scaled`
//! distinct k-mers is retained. Sketches may also carry a per-hash abundance
//! (approximate k-mer coverage). Downsampling, flattening and intersection
//! all return new values.
//!
//! Amino-acid sketches store their k-mer size in nucleotides; [`Sketch::ksize`]
//! always reports it in the sketch's own alphabet.

use sourmash::signature::SigsTrait;
use sourmash::sketch::minhash::KmerMinHash;

use crate::core::types::Moltype;

pub use sourmash::sketch::minhash::{max_hash_for_scaled, scaled_for_max_hash};

/// A scaled sketch with optional abundances
#[derive(Debug, Clone)]
pub struct Sketch {
    moltype: Moltype,
    mh: KmerMinHash,
}

impl Sketch {
    /// Build a sketch without abundance tracking.
    ///
    /// Hashes are sorted, deduplicated and filtered to the scale factor.
    #[must_use]
    pub fn new(ksize: u32, moltype: Moltype, scaled: u64, hashes: impl IntoIterator<Item = u64>) -> Self {
        let max_hash = max_hash_for_scaled(scaled);
        let mut hashes: Vec<u64> = hashes.into_iter().filter(|h| *h <= max_hash).collect();
        hashes.sort_unstable();
        hashes.dedup();

        Self::from_parts(ksize, moltype, max_hash, hashes, None)
    }

    /// Build a sketch that tracks abundance.
    ///
    /// Duplicate hashes have their abundances summed; zero abundances are dropped.
    #[must_use]
    pub fn with_abundances(
        ksize: u32,
        moltype: Moltype,
        scaled: u64,
        pairs: impl IntoIterator<Item = (u64, u64)>,
    ) -> Self {
        let max_hash = max_hash_for_scaled(scaled);
        let mut pairs: Vec<(u64, u64)> = pairs
            .into_iter()
            .filter(|(h, a)| *h <= max_hash && *a > 0)
            .collect();
        pairs.sort_unstable_by_key(|(h, _)| *h);

        let mut hashes: Vec<u64> = Vec::with_capacity(pairs.len());
        let mut abundances: Vec<u64> = Vec::with_capacity(pairs.len());
        for (hash, abund) in pairs {
            if hashes.last() == Some(&hash) {
                if let Some(last) = abundances.last_mut() {
                    *last += abund;
                }
            } else {
                hashes.push(hash);
                abundances.push(abund);
            }
        }

        Self::from_parts(ksize, moltype, max_hash, hashes, Some(abundances))
    }

    /// Wrap a sketch loaded by sourmash.
    ///
    /// Returns `None` for hash functions outside the supported alphabets.
    pub fn from_minhash(mh: KmerMinHash) -> Option<Self> {
        let moltype = Moltype::from_hash_function(&mh.hash_function())?;
        Some(Self { moltype, mh })
    }

    /// `hashes` must be sorted, unique and at most `max_hash`
    fn from_parts(
        ksize: u32,
        moltype: Moltype,
        max_hash: u64,
        hashes: Vec<u64>,
        abundances: Option<Vec<u64>>,
    ) -> Self {
        let mh = KmerMinHash::builder()
            .num(0)
            .ksize(ksize * moltype.ksize_factor())
            .hash_function(moltype.hash_function())
            .max_hash(max_hash)
            .mins(hashes)
            .abunds(abundances)
            .build();

        Self { moltype, mh }
    }

    /// K-mer size in the sketch's alphabet
    pub fn ksize(&self) -> u32 {
        let stored = u32::try_from(self.mh.ksize()).unwrap_or(u32::MAX);
        stored / self.moltype.ksize_factor()
    }

    pub fn moltype(&self) -> Moltype {
        self.moltype
    }

    pub fn scaled(&self) -> u64 {
        self.mh.scaled()
    }

    pub fn max_hash(&self) -> u64 {
        self.mh.max_hash()
    }

    /// Number of distinct hashes (abundance ignored)
    pub fn len(&self) -> usize {
        self.mh.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted hashes
    pub fn hashes(&self) -> Vec<u64> {
        self.mh.mins()
    }

    /// Abundances parallel to [`Sketch::hashes`]
    pub fn abundances(&self) -> Option<Vec<u64>> {
        self.mh.abunds()
    }

    pub fn track_abundance(&self) -> bool {
        self.mh.track_abundance()
    }

    pub fn minhash(&self) -> &KmerMinHash {
        &self.mh
    }

    /// Restrict to a coarser scale factor.
    ///
    /// A scale factor at or below the current one returns an unchanged copy.
    ///
    /// # Errors
    ///
    /// Returns the sourmash error if the sketch cannot be downsampled.
    pub fn downsample(&self, scaled: u64) -> Result<Self, sourmash::Error> {
        if scaled <= self.scaled() {
            return Ok(self.clone());
        }

        Ok(Self {
            moltype: self.moltype,
            mh: self.mh.downsample_scaled(scaled)?,
        })
    }

    /// Copy of this sketch with abundance information removed
    #[must_use]
    pub fn flatten(&self) -> Self {
        let mut mh = self.mh.clone();
        mh.disable_abundance();
        Self {
            moltype: self.moltype,
            mh,
        }
    }

    /// Hashes present in both sketches, as a flat sketch at this sketch's scale
    ///
    /// # Errors
    ///
    /// Returns the sourmash error if the sketches differ in ksize, alphabet
    /// or scale.
    pub fn intersection(&self, other: &Self) -> Result<Self, sourmash::Error> {
        let (shared, _union_size) = self.mh.intersection(&other.mh)?;
        Ok(Self::from_parts(
            self.ksize(),
            self.moltype,
            self.max_hash(),
            shared,
            None,
        ))
    }

    /// Abundances of those `hashes` this sketch contains, in order.
    ///
    /// `None` when abundance is not tracked.
    pub fn abundances_of(&self, hashes: &[u64]) -> Option<Vec<u64>> {
        let abundances = self.mh.abunds()?;
        let mins = self.mh.mins();
        Some(
            hashes
                .iter()
                .filter_map(|h| mins.binary_search(h).ok().map(|idx| abundances[idx]))
                .collect(),
        )
    }

    /// Sum of all abundances, or `None` when abundance is not tracked
    pub fn sum_abundances(&self) -> Option<u64> {
        self.track_abundance().then(|| self.mh.sum_abunds())
    }

    /// Content checksum over the stored ksize and hashes
    #[must_use]
    pub fn md5sum(&self) -> String {
        self.mh.md5sum()
    }
}
