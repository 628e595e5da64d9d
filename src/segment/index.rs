// src/segment/index.rs
//! Per-segment barcode aggregation.

use ahash::AHashMap;
use std::collections::BTreeMap;

use super::{BarcodeIndex, Segment};

/// Ordered map from barcode to the number of read pairs observed for it
/// within one segment.
pub type BarcodeToCount = BTreeMap<BarcodeIndex, u32>;

/// Map from contig segment to its barcode counts.
///
/// Built once per run during the populate phase, then queried read-only
/// during scoring. Mutation goes through `&mut self` and the score phase
/// holds only shared references, so the two phases cannot interleave.
/// Parallel populate builds one of these per worker and reduces them with
/// [`SegmentToBarcode::merge`].
#[derive(Debug, Default)]
pub struct SegmentToBarcode {
    map: AHashMap<Segment, BarcodeToCount>,
}

impl SegmentToBarcode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one read pair for `barcode` within `segment`. Creates the
    /// segment's map on first observation; repeated calls accumulate.
    pub fn add_observation(&mut self, segment: &Segment, barcode: BarcodeIndex) {
        self.add_observations(segment, barcode, 1);
    }

    /// Record `read_pairs` observations at once, for records carrying a
    /// multiplicity.
    pub fn add_observations(&mut self, segment: &Segment, barcode: BarcodeIndex, read_pairs: u32) {
        if let Some(counts) = self.map.get_mut(segment) {
            *counts.entry(barcode).or_insert(0) += read_pairs;
        } else {
            // clone the key only when the segment is first seen
            self.map
                .entry(segment.clone())
                .or_default()
                .insert(barcode, read_pairs);
        }
    }

    /// Append the segment's barcodes to `out` in ascending order. A segment
    /// with no observations appends nothing.
    pub fn append_barcodes(&self, segment: &Segment, out: &mut Vec<BarcodeIndex>) {
        if let Some(counts) = self.map.get(segment) {
            out.extend(counts.keys().copied());
        }
    }

    /// Read-pair count for one (segment, barcode) pair; 0 if unseen.
    pub fn read_pairs(&self, segment: &Segment, barcode: BarcodeIndex) -> u32 {
        self.map
            .get(segment)
            .and_then(|counts| counts.get(&barcode))
            .copied()
            .unwrap_or(0)
    }

    /// Barcode counts of one segment, if it has any observations.
    pub fn counts(&self, segment: &Segment) -> Option<&BarcodeToCount> {
        self.map.get(segment)
    }

    /// Number of segments with at least one observation.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.map.keys()
    }

    /// Fold another partial index into this one; counts for shared
    /// (segment, barcode) pairs add up. Used to reduce worker-local indexes
    /// after the parallel populate phase.
    pub fn merge(&mut self, other: SegmentToBarcode) {
        for (segment, counts) in other.map {
            match self.map.entry(segment) {
                std::collections::hash_map::Entry::Occupied(mut entry) => {
                    let mine = entry.get_mut();
                    for (barcode, n) in counts {
                        *mine.entry(barcode).or_insert(0) += n;
                    }
                }
                std::collections::hash_map::Entry::Vacant(entry) => {
                    entry.insert(counts);
                }
            }
        }
    }
}

/// Interns barcode strings from input records to dense [`BarcodeIndex`]
/// values.
#[derive(Debug, Default)]
pub struct BarcodeTable {
    indices: AHashMap<String, BarcodeIndex>,
    names: Vec<String>,
}

impl BarcodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index for `barcode`, assigning the next free one on first sight.
    pub fn intern(&mut self, barcode: &str) -> BarcodeIndex {
        if let Some(&index) = self.indices.get(barcode) {
            return index;
        }
        let index = self.names.len() as BarcodeIndex;
        self.indices.insert(barcode.to_owned(), index);
        self.names.push(barcode.to_owned());
        index
    }

    pub fn name(&self, index: BarcodeIndex) -> Option<&str> {
        self.names.get(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
