// src/io/fasta.rs
use std::io::{self, BufRead};

use ahash::AHashMap;

use super::{open_text, parse_error};

/// One sequence of the draft assembly.
#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub name: String,
    pub sequence: String,
}

/// Read all records from a FASTA(.gz) file. The record name is the header up
/// to the first whitespace.
pub fn read_fasta_records(path: &str) -> io::Result<Vec<FastaRecord>> {
    let reader = open_text(path)?;
    let mut records: Vec<FastaRecord> = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            let name = header
                .split_whitespace()
                .next()
                .ok_or_else(|| parse_error(path, lineno + 1, "empty FASTA header"))?;
            records.push(FastaRecord {
                name: name.to_owned(),
                sequence: String::new(),
            });
        } else if !line.is_empty() {
            let record = records
                .last_mut()
                .ok_or_else(|| parse_error(path, lineno + 1, "sequence before first header"))?;
            record.sequence.push_str(line.trim_end());
        }
    }
    Ok(records)
}

/// Read only contig names and lengths, which is all the alignment-based
/// populate phase needs.
pub fn read_contig_lengths(path: &str) -> io::Result<AHashMap<String, u32>> {
    let records = read_fasta_records(path)?;
    let mut lengths = AHashMap::with_capacity(records.len());
    for record in records {
        let length = record.sequence.len() as u32;
        if lengths.insert(record.name.clone(), length).is_some() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{path}: duplicate contig name {}", record.name),
            ));
        }
    }
    Ok(lengths)
}

/// Name/length pairs for records already in memory.
pub fn contig_lengths(records: &[FastaRecord]) -> AHashMap<String, u32> {
    records
        .iter()
        .map(|r| (r.name.clone(), r.sequence.len() as u32))
        .collect()
}
