// src/pipeline/kmer_map.rs
//! K-mer-driven populate phase.
//!
//! Instead of consuming alignments, this mode maps barcoded reads onto
//! contig segments directly: every canonical k-mer of every segment is
//! recorded in a lookup map, and a read is assigned to the segment that a
//! strict majority of its matched k-mers vote for. The canonical encoding is
//! the hot inner loop here, so each worker owns a private [`KmerEncoder`].

use ahash::AHashMap;
use rayon::prelude::*;
use tracing::info;

use crate::io::fasta::FastaRecord;
use crate::io::reads::BarcodedRead;
use crate::kmer::encode::KmerEncoder;
use crate::segment::calc::SegmentCalc;
use crate::segment::index::SegmentToBarcode;
use crate::segment::Segment;

/// Packed canonical k-mer to the unique segment containing it. `None` marks
/// a k-mer seen in more than one segment, which is useless for assignment
/// and kept only so later occurrences stay excluded.
type PackedToSegment = AHashMap<Vec<u8>, Option<Segment>>;

pub struct KmerMap {
    k: usize,
    map: PackedToSegment,
}

impl KmerMap {
    /// Index every canonical k-mer of every segment of the given contigs.
    /// Contigs shorter than `min_contig_length` (or too short to hold two
    /// segments) are skipped, as are windows containing ambiguous bases and
    /// windows whose coordinate range does not resolve to a single segment.
    pub fn build(
        contigs: &[FastaRecord],
        calc: SegmentCalc,
        k: usize,
        min_contig_length: u32,
    ) -> Self {
        let map = contigs
            .par_iter()
            .map(|contig| contig_kmers(contig, calc, k, min_contig_length))
            .reduce(PackedToSegment::new, merge_maps);

        let unique = map.values().filter(|seg| seg.is_some()).count();
        info!(
            "k-mer map: {} distinct {}-mers, {} usable (single-segment)",
            map.len(),
            k,
            unique
        );
        KmerMap { k, map }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of k-mers that map to exactly one segment.
    pub fn usable_kmers(&self) -> usize {
        self.map.values().filter(|seg| seg.is_some()).count()
    }

    /// Segment assignment for one read: the segment collecting a strict
    /// majority of the read's matched k-mers, or `None` if no segment does
    /// (too short, no matches, or a tie).
    pub fn assign(&self, seq: &[u8], encoder: &mut KmerEncoder) -> Option<Segment> {
        debug_assert_eq!(encoder.k(), self.k);
        if seq.len() < self.k {
            return None;
        }

        let mut votes: AHashMap<&Segment, u32> = AHashMap::new();
        let mut matched = 0u32;
        for start in 0..=(seq.len() - self.k) {
            // windows with ambiguous bases are skipped, not zero-keyed
            let Some(packed) = encoder.canonical(seq, start) else {
                continue;
            };
            if let Some(Some(segment)) = self.map.get(packed) {
                *votes.entry(segment).or_insert(0) += 1;
                matched += 1;
            }
        }

        let (&best_segment, &best_votes) = votes.iter().max_by_key(|(_, &n)| n)?;
        if 2 * best_votes > matched {
            Some(best_segment.clone())
        } else {
            None
        }
    }
}

/// K-mer map of a single contig.
fn contig_kmers(
    contig: &FastaRecord,
    calc: SegmentCalc,
    k: usize,
    min_contig_length: u32,
) -> PackedToSegment {
    let mut map = PackedToSegment::new();
    let length = contig.sequence.len() as u32;
    if length < min_contig_length || length / 2 < calc.segment_size() {
        return map;
    }

    let seq = contig.sequence.as_bytes();
    if seq.len() < k {
        return map;
    }
    let mut encoder = KmerEncoder::new(k);
    for start in 0..=(seq.len() - k) {
        let Some(packed) = encoder.canonical(seq, start) else {
            continue;
        };
        let window = (start as u32 + 1, start as u32 + k as u32);
        let Some((first, last)) = calc.index_range(window.0, window.1, length) else {
            continue;
        };
        if first != last {
            // straddles a segment boundary
            continue;
        }
        let segment = Segment::new(contig.name.clone(), first);
        map.entry(packed.to_vec())
            .and_modify(|existing| {
                if existing.as_ref() != Some(&segment) {
                    *existing = None;
                }
            })
            .or_insert(Some(segment));
    }
    map
}

fn merge_maps(mut merged: PackedToSegment, other: PackedToSegment) -> PackedToSegment {
    for (packed, segment) in other {
        merged
            .entry(packed)
            .and_modify(|existing| {
                if *existing != segment {
                    *existing = None;
                }
            })
            .or_insert(segment);
    }
    merged
}

/// Reads per worker chunk; a read expands into many k-mer lookups, so chunks
/// are smaller than in the alignment-driven populate.
const CHUNK_SIZE: usize = 1024;

/// Build the segment index by assigning each read to a segment via the k-mer
/// map. Same partition-then-merge discipline as the alignment-driven
/// populate; every worker owns its encoder.
pub fn populate_from_reads(reads: &[BarcodedRead], map: &KmerMap) -> SegmentToBarcode {
    info!("Populating segment index from {} barcoded reads", reads.len());

    let index = reads
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| {
            let mut encoder = KmerEncoder::new(map.k());
            let mut local = SegmentToBarcode::new();
            for read in chunk {
                if let Some(segment) = map.assign(read.sequence.as_bytes(), &mut encoder) {
                    local.add_observation(&segment, read.barcode);
                }
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
