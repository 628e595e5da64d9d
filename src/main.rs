mod cli_main;

use clap::Parser;
use rayon::ThreadPoolBuilder;
use tracing_subscriber::FmtSubscriber;

use cli_main::{Cli, Commands};
use tether::pipeline::link::{align_link, kmer_link};

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Setting tracing default failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Link {
            fasta,
            alignments,
            output,
            segment_size,
            min_length,
            summary,
            threads,
        } => {
            configure_threads(threads);
            if let Err(e) = align_link(
                &fasta,
                &alignments,
                &output,
                segment_size,
                min_length,
                summary,
            ) {
                eprintln!("Error during linking: {e}");
                std::process::exit(1);
            }
        }
        Commands::KmerLink {
            fasta,
            reads,
            output,
            kmer_size,
            segment_size,
            min_length,
            summary,
            threads,
        } => {
            configure_threads(threads);
            if let Err(e) = kmer_link(
                &fasta,
                &reads,
                &output,
                kmer_size,
                segment_size,
                min_length,
                summary,
            ) {
                eprintln!("Error during linking: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn configure_threads(threads: usize) {
    if let Err(e) = ThreadPoolBuilder::new().num_threads(threads).build_global() {
        eprintln!("Failed to configure thread pool: {e}");
    }
}
