//! Input/output module - assembly, alignment and link-output formats

pub mod alignments;
pub mod fasta;
pub mod links;
pub mod reads;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use flate2::read::MultiGzDecoder;

/// Open a text file for buffered reading, transparently decompressing
/// `.gz` inputs.
pub fn open_text(path: &str) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// An `InvalidData` error tagged with file and line for parse failures.
fn parse_error(path: &str, line: usize, message: impl std::fmt::Display) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{path}:{line}: {message}"),
    )
}
