// src/segment/jaccard.rs
//! Barcode-set similarity between contig segments.

use super::index::SegmentToBarcode;
use super::{BarcodeIndex, Segment};

/// Reserve room for this many barcodes per segment before gathering. Deeply
/// sequenced libraries put thousands of barcodes on a segment and the gather
/// runs once per scored pair.
const BARCODE_CAPACITY_HINT: usize = 1024;

/// Jaccard similarity of the barcode sets of two segments, in `[0, 1]`.
/// Counts are ignored here; only barcode identity matters. A segment absent
/// from the index contributes an empty set, and two empty sets score 0.
pub fn jaccard(a: &Segment, b: &Segment, index: &SegmentToBarcode) -> f64 {
    let mut barcodes_a = Vec::with_capacity(BARCODE_CAPACITY_HINT);
    let mut barcodes_b = Vec::with_capacity(BARCODE_CAPACITY_HINT);
    index.append_barcodes(a, &mut barcodes_a);
    index.append_barcodes(b, &mut barcodes_b);
    jaccard_sorted(&barcodes_a, &barcodes_b)
}

/// Jaccard index of two ascending, deduplicated barcode lists.
pub fn jaccard_sorted(a: &[BarcodeIndex], b: &[BarcodeIndex]) -> f64 {
    let mut i = 0;
    let mut j = 0;
    let mut shared = 0usize;
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    let union = a.len() + b.len() - shared;
    if union == 0 {
        // both sets empty; avoid 0/0
        return 0.0;
    }
    shared as f64 / union as f64
}

/// Read pairs supporting a link between two segments: for every barcode seen
/// on both, the smaller of the two counts, summed.
pub fn shared_read_pairs(a: &Segment, b: &Segment, index: &SegmentToBarcode) -> u64 {
    let (Some(counts_a), Some(counts_b)) = (index.counts(a), index.counts(b)) else {
        return 0;
    };
    counts_a
        .iter()
        .map(|(barcode, &n_a)| {
            counts_b
                .get(barcode)
                .map_or(0, |&n_b| u64::from(n_a.min(n_b)))
        })
        .sum()
}
