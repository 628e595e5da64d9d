// src/io/alignments.rs
//! Barcoded alignment records, one per line:
//!
//! ```text
//! contig <TAB> start <TAB> end <TAB> barcode [<TAB> read_pairs]
//! ```
//!
//! Coordinates are 1-based and inclusive, as in SAM. The upstream aligner
//! stage has already applied its mapping-quality and alignment-score filters;
//! nothing is filtered here. Lines starting with `#` are skipped.

use std::io::{self, BufRead};

use tracing::info;

use super::{open_text, parse_error};
use crate::pipeline::populate::AlignmentRecord;
use crate::segment::index::BarcodeTable;

pub fn read_alignments(path: &str, barcodes: &mut BarcodeTable) -> io::Result<Vec<AlignmentRecord>> {
    let reader = open_text(path)?;
    let mut records = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let lineno = lineno + 1;
        let mut fields = line.split('\t');

        let contig = fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| parse_error(path, lineno, "missing contig name"))?;
        let start = parse_coord(fields.next(), path, lineno, "start")?;
        let end = parse_coord(fields.next(), path, lineno, "end")?;
        let barcode = fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| parse_error(path, lineno, "missing barcode"))?;
        let read_pairs = match fields.next() {
            Some(f) => f
                .parse::<u32>()
                .map_err(|e| parse_error(path, lineno, format!("bad read-pair count: {e}")))?,
            None => 1,
        };

        if end < start {
            return Err(parse_error(
                path,
                lineno,
                format!("end {end} before start {start}"),
            ));
        }

        records.push(AlignmentRecord {
            contig: contig.to_owned(),
            start,
            end,
            barcode: barcodes.intern(barcode),
            read_pairs,
        });
    }

    info!(
        "Read {} alignment records ({} distinct barcodes) from {}",
        records.len(),
        barcodes.len(),
        path
    );
    Ok(records)
}

fn parse_coord(field: Option<&str>, path: &str, lineno: usize, what: &str) -> io::Result<u32> {
    let field = field.ok_or_else(|| parse_error(path, lineno, format!("missing {what}")))?;
    let value = field
        .parse::<u32>()
        .map_err(|e| parse_error(path, lineno, format!("bad {what} coordinate: {e}")))?;
    if value == 0 {
        return Err(parse_error(path, lineno, format!("{what} must be 1-based")));
    }
    Ok(value)
}
