use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tether", version, about = "Barcode-guided contig scaffolding", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score contig-end links from barcoded alignment records
    Link {
        /// Draft assembly FASTA(.gz)
        #[arg(short, long)]
        fasta: String,

        /// Alignment TSV(.gz): contig, start, end, barcode[, read pairs]
        #[arg(short, long)]
        alignments: String,

        /// Output TSV of scored candidate links
        #[arg(short, long)]
        output: String,

        /// Contig segment size in base pairs
        #[arg(long, default_value_t = 1000)]
        segment_size: u32,

        /// Skip contigs shorter than this
        #[arg(long, default_value_t = 2000)]
        min_length: u32,

        /// Also write a JSON run summary next to the output
        #[arg(long)]
        summary: bool,

        /// Number of threads to use
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,
    },

    /// Score contig-end links by mapping barcoded reads with canonical k-mers
    KmerLink {
        /// Draft assembly FASTA(.gz)
        #[arg(short, long)]
        fasta: String,

        /// Barcoded reads FASTQ(.gz), barcode in a BX:Z: header tag
        #[arg(short, long)]
        reads: String,

        /// Output TSV of scored candidate links
        #[arg(short, long)]
        output: String,

        /// K-mer size used to map reads onto segments
        #[arg(short, long, default_value_t = 32)]
        kmer_size: usize,

        /// Contig segment size in base pairs
        #[arg(long, default_value_t = 1000)]
        segment_size: u32,

        /// Skip contigs shorter than this
        #[arg(long, default_value_t = 2000)]
        min_length: u32,

        /// Also write a JSON run summary next to the output
        #[arg(long)]
        summary: bool,

        /// Number of threads to use
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,
    },
}
