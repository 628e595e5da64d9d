// src/pipeline/link.rs
//! End-to-end orchestration of one linking run.

use std::io;
use std::time::Instant;

use ahash::AHashMap;
use tracing::info;

use crate::io::alignments::read_alignments;
use crate::io::fasta::{contig_lengths, read_contig_lengths, read_fasta_records};
use crate::io::links::{write_links_tsv, write_run_summary, RunSummary};
use crate::io::reads::read_barcoded_reads;
use crate::pipeline::kmer_map::{populate_from_reads, KmerMap};
use crate::pipeline::populate::populate_index;
use crate::pipeline::score::{candidate_pairs, end_segments, score_pairs};
use crate::segment::calc::SegmentCalc;
use crate::segment::index::{BarcodeTable, SegmentToBarcode};

/// Link contig ends from pre-aligned barcoded records.
pub fn align_link(
    fasta: &str,
    alignments: &str,
    output: &str,
    segment_size: u32,
    min_contig_length: u32,
    summary: bool,
) -> io::Result<()> {
    let start = Instant::now();
    info!("Loading contig lengths from {}", fasta);
    let lengths = read_contig_lengths(fasta)?;
    info!("{} contigs in draft assembly", lengths.len());

    let calc = SegmentCalc::new(segment_size);
    let mut barcodes = BarcodeTable::new();
    let records = read_alignments(alignments, &mut barcodes)?;

    let index = populate_index(&records, &lengths, calc, min_contig_length);
    score_and_write(
        &lengths,
        calc,
        min_contig_length,
        &index,
        barcodes.len(),
        output,
        summary,
    )?;
    info!("Linking finished in {:.2?}", start.elapsed());
    Ok(())
}

/// Link contig ends by mapping barcoded reads with canonical k-mers.
pub fn kmer_link(
    fasta: &str,
    reads: &str,
    output: &str,
    kmer_size: usize,
    segment_size: u32,
    min_contig_length: u32,
    summary: bool,
) -> io::Result<()> {
    let start = Instant::now();
    info!("Loading contigs from {}", fasta);
    let contigs = read_fasta_records(fasta)?;
    let lengths = contig_lengths(&contigs);
    info!("{} contigs in draft assembly", contigs.len());

    let calc = SegmentCalc::new(segment_size);
    info!("Building segment k-mer map (k={})", kmer_size);
    let map = KmerMap::build(&contigs, calc, kmer_size, min_contig_length);

    let mut barcodes = BarcodeTable::new();
    let reads = read_barcoded_reads(reads, &mut barcodes)?;

    let index = populate_from_reads(&reads, &map);
    score_and_write(
        &lengths,
        calc,
        min_contig_length,
        &index,
        barcodes.len(),
        output,
        summary,
    )?;
    info!("Linking finished in {:.2?}", start.elapsed());
    Ok(())
}

/// Shared score-phase tail: enumerate end pairs, score them, write output.
fn score_and_write(
    lengths: &AHashMap<String, u32>,
    calc: SegmentCalc,
    min_contig_length: u32,
    index: &SegmentToBarcode,
    barcode_count: usize,
    output: &str,
    summary: bool,
) -> io::Result<()> {
    let ends = end_segments(lengths, calc, min_contig_length);
    let pairs = candidate_pairs(&ends, index);
    let links = score_pairs(&pairs, index);

    write_links_tsv(output, &links)?;
    info!("Wrote {} candidate links to {}", links.len(), output);

    if summary {
        let path = format!("{output}.summary.json");
        write_run_summary(
            &path,
            &RunSummary {
                contigs: lengths.len(),
                barcodes: barcode_count,
                populated_segments: index.len(),
                candidate_pairs: pairs.len(),
                links_written: links.len(),
            },
        )?;
        info!("Wrote run summary to {}", path);
    }
    Ok(())
}
