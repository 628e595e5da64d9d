//! Pipeline module - populate and score phases of the linking run
//!
//! The populate phase builds the shared [`SegmentToBarcode`] index from
//! either alignment records or k-mer-mapped reads; workers fold into private
//! partial indexes that are merged at the end, so the index only becomes
//! visible once it is complete. The score phase then runs over shared
//! references only.
//!
//! [`SegmentToBarcode`]: crate::segment::index::SegmentToBarcode

pub mod kmer_map;
pub mod link;
pub mod populate;
pub mod score;
