//! Contig segments and per-segment barcode aggregation.
//!
//! A contig is partitioned into fixed-size segments (head half and tail half,
//! with any non-divisible remainder left unassigned in the exact middle).
//! Each segment accumulates the barcodes of the read pairs aligning to it,
//! and pairs of segments are compared by barcode Jaccard similarity.

pub mod calc;
pub mod index;
pub mod jaccard;

use serde::Serialize;

pub use calc::{SegmentCalc, SegmentIndex, MIDDLE_SEGMENT};

/// Identifier of a draft-assembly sequence, as it appears in the FASTA.
pub type ContigName = String;

/// Dense identifier for a read barcode, assigned by
/// [`index::BarcodeTable`].
pub type BarcodeIndex = u32;

/// One fixed-size partition of a contig, the unit of barcode aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Segment {
    pub contig: ContigName,
    pub index: SegmentIndex,
}

impl Segment {
    pub fn new(contig: impl Into<ContigName>, index: SegmentIndex) -> Self {
        Segment {
            contig: contig.into(),
            index,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.contig, self.index)
    }
}
