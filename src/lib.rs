//! tether - barcode-guided contig scaffolding core
//!
//! Links draft-assembly contigs into scaffolds using long-range linkage
//! information from barcoded (linked-read) sequencing data. Contig ends are
//! partitioned into fixed-size segments, each segment accumulates the
//! barcodes of the read pairs placed on it, and pairs of ends are scored by
//! read-pair support and barcode Jaccard similarity for a downstream
//! scaffolder to join.

pub mod io;
pub mod kmer;
pub mod pipeline;
pub mod segment;
