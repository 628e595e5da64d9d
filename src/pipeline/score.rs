// src/pipeline/score.rs
//! Read-only score phase: candidate end pairs and their link statistics.

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::segment::calc::SegmentCalc;
use crate::segment::index::SegmentToBarcode;
use crate::segment::jaccard::{jaccard, shared_read_pairs};
use crate::segment::{BarcodeIndex, Segment};

/// One scored segment pair, handed to the downstream scaffold-graph builder.
/// Thresholding (minimum read pairs, minimum Jaccard, p-values) is the
/// builder's business, not ours.
#[derive(Debug, Clone, Serialize)]
pub struct LinkCandidate {
    pub a: Segment,
    pub b: Segment,
    pub read_pairs: u64,
    pub jaccard: f64,
}

/// Head and tail segments of every contig long enough to be scaffolded,
/// sorted by contig name for deterministic output.
pub fn end_segments(
    lengths: &AHashMap<String, u32>,
    calc: SegmentCalc,
    min_contig_length: u32,
) -> Vec<(Segment, Segment)> {
    let mut ends: Vec<(Segment, Segment)> = lengths
        .iter()
        .filter_map(|(name, &length)| {
            if length < min_contig_length || length / 2 < calc.segment_size() {
                return None;
            }
            let count = calc.segments(length);
            Some((
                Segment::new(name.clone(), 0),
                Segment::new(name.clone(), count - 1),
            ))
        })
        .collect();
    ends.sort_by(|x, y| x.0.contig.cmp(&y.0.contig));
    ends
}

/// Cross-contig end-segment pairs sharing at least one barcode.
///
/// Enumerated through an inverted barcode map rather than all-against-all, so
/// the pair count tracks actual barcode co-occurrence. Pairs are ordered
/// `(smaller, larger)` and sorted for deterministic output. Assumes the
/// index is frozen (read-only borrow).
pub fn candidate_pairs(
    ends: &[(Segment, Segment)],
    index: &SegmentToBarcode,
) -> Vec<(Segment, Segment)> {
    let end_set: AHashSet<&Segment> = ends.iter().flat_map(|(head, tail)| [head, tail]).collect();

    let mut by_barcode: AHashMap<BarcodeIndex, Vec<&Segment>> = AHashMap::new();
    for &segment in &end_set {
        if let Some(counts) = index.counts(segment) {
            for &barcode in counts.keys() {
                by_barcode.entry(barcode).or_default().push(segment);
            }
        }
    }

    let mut pairs: AHashSet<(&Segment, &Segment)> = AHashSet::new();
    for segments in by_barcode.values() {
        for (i, &a) in segments.iter().enumerate() {
            for &b in &segments[i + 1..] {
                if a.contig == b.contig {
                    continue;
                }
                if a < b {
                    pairs.insert((a, b));
                } else {
                    pairs.insert((b, a));
                }
            }
        }
    }

    let mut pairs: Vec<(Segment, Segment)> = pairs
        .into_iter()
        .map(|(a, b)| (a.clone(), b.clone()))
        .collect();
    pairs.sort();
    pairs
}

/// Score every candidate pair. Runs fully in parallel over a shared borrow
/// of the frozen index; pairs without any supporting read pair are dropped
/// (they are not candidates, this is not a tunable threshold).
pub fn score_pairs(pairs: &[(Segment, Segment)], index: &SegmentToBarcode) -> Vec<LinkCandidate> {
    info!("Scoring {} candidate end pairs", pairs.len());
    pairs
        .par_iter()
        .map(|(a, b)| LinkCandidate {
            read_pairs: shared_read_pairs(a, b, index),
            jaccard: jaccard(a, b, index),
            a: a.clone(),
            b: b.clone(),
        })
        .filter(|candidate| candidate.read_pairs > 0)
        .collect()
}
