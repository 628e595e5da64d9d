// src/io/reads.rs
//! Barcoded reads from FASTQ(.gz) for the k-mer mapping populate mode.
//!
//! The barcode is taken from a `BX:Z:` tag in the header comment (the
//! convention used by linked-read pipelines); if no tag is present the last
//! whitespace-separated header token is used instead. Reads without any
//! barcode are dropped.

use std::io::{self, BufRead};

use tracing::{debug, info};

use super::{open_text, parse_error};
use crate::segment::index::BarcodeTable;
use crate::segment::BarcodeIndex;

/// One read with its molecule barcode already interned.
#[derive(Debug, Clone)]
pub struct BarcodedRead {
    pub sequence: String,
    pub barcode: BarcodeIndex,
}

/// Barcode token of a FASTQ header line, without the leading `@`.
fn header_barcode(header: &str) -> Option<&str> {
    let mut tokens = header.split_whitespace();
    tokens.next()?; // read name
    let rest: Vec<&str> = tokens.collect();
    rest.iter()
        .find_map(|t| t.strip_prefix("BX:Z:"))
        .or_else(|| rest.last().copied())
}

pub fn read_barcoded_reads(path: &str, barcodes: &mut BarcodeTable) -> io::Result<Vec<BarcodedRead>> {
    let reader = open_text(path)?;
    let mut lines = reader.lines().enumerate();
    let mut reads = Vec::new();
    let mut dropped = 0usize;

    while let Some((lineno, header)) = lines.next() {
        let header = header?;
        if header.is_empty() {
            continue;
        }
        if !header.starts_with('@') {
            return Err(parse_error(path, lineno + 1, "expected FASTQ header"));
        }
        let sequence = next_record_line(&mut lines, path)?;
        let plus = next_record_line(&mut lines, path)?;
        if !plus.starts_with('+') {
            return Err(parse_error(path, lineno + 3, "expected '+' separator"));
        }
        next_record_line(&mut lines, path)?; // quality, unused

        match header_barcode(&header[1..]) {
            Some(barcode) => reads.push(BarcodedRead {
                sequence,
                barcode: barcodes.intern(barcode),
            }),
            None => {
                dropped += 1;
                debug!("{}:{}: read without barcode dropped", path, lineno + 1);
            }
        }
    }

    info!(
        "Read {} barcoded reads ({} distinct barcodes, {} dropped) from {}",
        reads.len(),
        barcodes.len(),
        dropped,
        path
    );
    Ok(reads)
}

fn next_record_line(
    lines: &mut impl Iterator<Item = (usize, io::Result<String>)>,
    path: &str,
) -> io::Result<String> {
    match lines.next() {
        Some((_, line)) => line,
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{path}: truncated FASTQ record"),
        )),
    }
}
