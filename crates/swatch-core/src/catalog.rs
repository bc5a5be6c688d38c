//! Batch decoding into a catalog
//!
//! Files are independent, so they are decoded in parallel with rayon; each
//! worker returns its own result and the results are merged afterwards in
//! input order.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::collection::{ColorRecord, DecodeOptions, decode};
use crate::error::FileError;
use crate::raw::RawFile;

/// Decoded colors keyed by source identifier
///
/// Serializes as a plain map, so the JSON and YAML renderings have the same
/// structure: `{id: [{collection, name, model, values, colorType}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(BTreeMap<String, Vec<ColorRecord>>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add colors under `id`, appending if the id is already present
    pub fn insert(&mut self, id: impl Into<String>, colors: Vec<ColorRecord>) {
        match self.0.entry(id.into()) {
            Entry::Vacant(slot) => {
                slot.insert(colors);
            }
            Entry::Occupied(mut slot) => {
                warn!(id = %slot.key(), "duplicate source id, appending colors");
                slot.get_mut().extend(colors);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&[ColorRecord]> {
        self.0.get(id).map(Vec::as_slice)
    }

    /// Number of sources
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of colors across all sources
    pub fn color_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ColorRecord])> + '_ {
        self.0.iter().map(|(id, colors)| (id.as_str(), colors.as_slice()))
    }
}

/// Outcome of decoding a batch of files
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Colors from every file that decoded
    pub catalog: Catalog,
    /// Files that failed, in input order
    pub failures: Vec<FileError>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Decode many files in parallel
///
/// A failing file is reported in [`BatchReport::failures`] and does not
/// affect the others.
pub fn decode_all(files: &[RawFile], options: &DecodeOptions) -> BatchReport {
    let results: Vec<_> = files.par_iter().map(|file| decode(file, options)).collect();

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(collection) => report.catalog.insert(collection.source, collection.colors),
            Err(failure) => {
                warn!(file = %failure.file, error = %failure.error, "failed to decode");
                report.failures.push(failure);
            }
        }
    }

    info!(
        files = files.len(),
        decoded = report.catalog.len(),
        failed = report.failures.len(),
        colors = report.catalog.color_count(),
        "batch decode finished"
    );
    report
}
