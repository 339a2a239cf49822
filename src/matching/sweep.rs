use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::sample::SampleRecord;
use crate::core::types::SearchOptions;
use crate::matching::engine::{compare, ComparisonResult};
use crate::matching::SearchError;
use crate::parsing::SampleLoader;

/// Load a file that must hold exactly one sketch at the requested ksize/alphabet
///
/// # Errors
///
/// Returns `SearchError::Load` if the file cannot be loaded, or
/// `SearchError::Resolution` if it holds zero or several matching sketches.
pub fn resolve_one<L: SampleLoader + ?Sized>(
    loader: &L,
    path: &Path,
    options: &SearchOptions,
) -> Result<SampleRecord, SearchError> {
    let mut records = loader.load_samples(path, options.ksize, options.moltype)?;
    if records.len() != 1 {
        return Err(SearchError::Resolution {
            path: path.display().to_string(),
            count: records.len(),
            ksize: options.ksize,
            moltype: options.moltype,
        });
    }
    Ok(records.remove(0))
}

/// Lazily compares a fixed set of queries against each subject file in turn.
///
/// Subjects are the outer loop and queries the inner one, so every subject
/// file is loaded exactly once. Results come out in subject order, then query
/// order. The first error ends the sweep.
pub struct Sweep<'a, L: SampleLoader + ?Sized> {
    loader: &'a L,
    options: &'a SearchOptions,
    queries: Vec<SampleRecord>,
    subjects: std::slice::Iter<'a, PathBuf>,
    /// Subject being searched and index of the next query to compare against it
    current: Option<(SampleRecord, usize)>,
    failed: bool,
}

impl<'a, L: SampleLoader + ?Sized> Sweep<'a, L> {
    pub fn new(
        loader: &'a L,
        queries: Vec<SampleRecord>,
        subjects: &'a [PathBuf],
        options: &'a SearchOptions,
    ) -> Self {
        Self {
            loader,
            options,
            queries,
            subjects: subjects.iter(),
            current: None,
            failed: false,
        }
    }

    /// Queries being searched for, after downsampling
    pub fn queries(&self) -> &[SampleRecord] {
        &self.queries
    }

    fn load_subject(&self, path: &Path) -> Result<SampleRecord, SearchError> {
        debug!("Loading subject {}", path.display());
        let subject = resolve_one(self.loader, path, self.options)?;

        if self.options.require_abundance && !subject.sketch.track_abundance() {
            return Err(SearchError::AbundanceRequired {
                path: path.display().to_string(),
            });
        }
        Ok(subject)
    }
}

impl<L: SampleLoader + ?Sized> Iterator for Sweep<'_, L> {
    type Item = Result<ComparisonResult, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.queries.is_empty() {
            return None;
        }

        loop {
            if let Some((subject, next_query)) = &mut self.current {
                if let Some(query) = self.queries.get(*next_query) {
                    *next_query += 1;
                    let result = compare(query, subject, self.options);
                    self.failed = result.is_err();
                    return Some(result);
                }
                self.current = None;
            }

            let path = self.subjects.next()?;
            match self.load_subject(path) {
                Ok(subject) => self.current = Some((subject, 0)),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn downsample_query(
    query: &SampleRecord,
    options: &SearchOptions,
) -> Result<SampleRecord, SearchError> {
    if options.scaled > query.sketch.scaled() {
        debug!(
            "Downsampling query '{}' from scaled={} to scaled={}",
            query.name,
            query.sketch.scaled(),
            options.scaled
        );
    }
    Ok(query.downsampled(options.scaled)?)
}

/// Search for the single sketch in `query_path` in every subject file.
///
/// The query file must hold exactly one sketch at the requested
/// ksize/alphabet; this is checked before any subject is loaded.
///
/// # Errors
///
/// Returns `SearchError::Resolution` or `SearchError::Load` if the query
/// cannot be resolved. Errors for subjects are yielded by the returned sweep.
pub fn single_query_sweep<'a, L: SampleLoader + ?Sized>(
    loader: &'a L,
    query_path: &Path,
    subjects: &'a [PathBuf],
    options: &'a SearchOptions,
) -> Result<Sweep<'a, L>, SearchError> {
    let query = resolve_one(loader, query_path, options)?;
    let query = downsample_query(&query, options)?;
    Ok(Sweep::new(loader, vec![query], subjects, options))
}

/// Search for every sketch found in `query_paths` in every subject file.
///
/// Unlike [`single_query_sweep`], a query file may contribute several
/// sketches. Each subject file is loaded once regardless of query count.
///
/// # Errors
///
/// Returns `SearchError::Load` if a query file cannot be loaded, or
/// `SearchError::NoQueries` if no query sketch matches ksize/alphabet.
pub fn many_query_sweep<'a, L: SampleLoader + ?Sized>(
    loader: &'a L,
    query_paths: &[PathBuf],
    subjects: &'a [PathBuf],
    options: &'a SearchOptions,
) -> Result<Sweep<'a, L>, SearchError> {
    let mut queries = Vec::new();
    for path in query_paths {
        let records = loader.load_samples(path, options.ksize, options.moltype)?;
        debug!("Loaded {} query sketches from {}", records.len(), path.display());
        for record in &records {
            queries.push(downsample_query(record, options)?);
        }
    }

    if queries.is_empty() {
        return Err(SearchError::NoQueries {
            ksize: options.ksize,
            moltype: options.moltype,
        });
    }

    Ok(Sweep::new(loader, queries, subjects, options))
}
