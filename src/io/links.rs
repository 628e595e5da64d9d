// src/io/links.rs
//! Candidate-link output for the downstream scaffolder.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use serde::Serialize;

use crate::pipeline::score::LinkCandidate;

/// Write candidate links as TSV, one row per scored segment pair. The
/// downstream scaffold-graph builder applies its own support and similarity
/// thresholds to these rows.
pub fn write_links_tsv(path: &str, links: &[LinkCandidate]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(
        writer,
        "contig_a\tsegment_a\tcontig_b\tsegment_b\tread_pairs\tjaccard"
    )?;
    for link in links {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{:.6}",
            link.a.contig, link.a.index, link.b.contig, link.b.index, link.read_pairs, link.jaccard
        )?;
    }
    writer.flush()
}

/// Summary of one linking run, written as JSON alongside the TSV.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub contigs: usize,
    pub barcodes: usize,
    pub populated_segments: usize,
    pub candidate_pairs: usize,
    pub links_written: usize,
}

pub fn write_run_summary(path: &str, summary: &RunSummary) -> io::Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, summary)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
