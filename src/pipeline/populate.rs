// src/pipeline/populate.rs
//! Alignment-driven populate phase.

use ahash::AHashMap;
use rayon::prelude::*;
use tracing::info;

use crate::segment::calc::SegmentCalc;
use crate::segment::index::SegmentToBarcode;
use crate::segment::Segment;

/// One barcoded alignment, pre-filtered upstream (mapping quality,
/// alignment-score ratio), with 1-based inclusive coordinates.
#[derive(Debug, Clone)]
pub struct AlignmentRecord {
    pub contig: String,
    pub start: u32,
    pub end: u32,
    pub barcode: crate::segment::BarcodeIndex,
    pub read_pairs: u32,
}

/// Records per worker chunk. Large enough that the per-chunk index merge is
/// amortized, small enough to keep all threads busy on uneven inputs.
const CHUNK_SIZE: usize = 8192;

/// Build the segment index from alignment records.
///
/// Chunks are processed in parallel; each chunk folds into a worker-local
/// index and the locals are merged pairwise, so no counter is ever updated
/// concurrently. The returned index is complete and ready for read-only
/// scoring.
pub fn populate_index(
    records: &[AlignmentRecord],
    lengths: &AHashMap<String, u32>,
    calc: SegmentCalc,
    min_contig_length: u32,
) -> SegmentToBarcode {
    info!(
        "Populating segment index from {} alignment records",
        records.len()
    );

    let index = records
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| {
            let mut local = SegmentToBarcode::new();
            for record in chunk {
                observe(record, lengths, calc, min_contig_length, &mut local);
            }
            local
        })
        .reduce(SegmentToBarcode::new, |mut merged, local| {
            merged.merge(local);
            merged
        });

    info!("Segment index covers {} segments", index.len());
    index
}

fn observe(
    record: &AlignmentRecord,
    lengths: &AHashMap<String, u32>,
    calc: SegmentCalc,
    min_contig_length: u32,
    out: &mut SegmentToBarcode,
) {
    // Alignments to contigs absent from the assembly (or too short to carry
    // two segments) contribute nothing.
    let Some(&length) = lengths.get(&record.contig) else {
        return;
    };
    if length < min_contig_length {
        return;
    }
    let Some((first, last)) = calc.index_range(record.start, record.end, length) else {
        return;
    };
    for index in first..=last {
        out.add_observations(
            &Segment::new(record.contig.clone(), index),
            record.barcode,
            record.read_pairs,
        );
    }
}
