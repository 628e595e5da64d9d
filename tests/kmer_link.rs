use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tether::io::fasta::FastaRecord;
use tether::io::reads::BarcodedRead;
use tether::kmer::encode::KmerEncoder;
use tether::pipeline::kmer_map::{populate_from_reads, KmerMap};
use tether::segment::calc::SegmentCalc;
use tether::segment::Segment;

fn random_contig(rng: &mut StdRng, name: &str, len: usize) -> FastaRecord {
    let sequence: String = (0..len).map(|_| "ACGT".as_bytes()[rng.gen_range(0..4)] as char).collect();
    FastaRecord {
        name: name.to_owned(),
        sequence,
    }
}

#[test]
fn reads_map_to_their_segment() {
    let mut rng = StdRng::seed_from_u64(1234);
    let contigs = vec![
        random_contig(&mut rng, "ctgA", 400),
        random_contig(&mut rng, "ctgB", 400),
    ];
    let calc = SegmentCalc::new(100);
    let map = KmerMap::build(&contigs, calc, 21, 200);
    assert!(map.usable_kmers() > 0);

    let mut encoder = KmerEncoder::new(21);

    // a read copied out of the last segment of ctgA (positions 321-380,
    // segment 3) votes unanimously for that segment
    let read = contigs[0].sequence[320..380].as_bytes();
    assert_eq!(map.assign(read, &mut encoder), Some(Segment::new("ctgA", 3)));

    // first segment of ctgB
    let read = contigs[1].sequence[10..70].as_bytes();
    assert_eq!(map.assign(read, &mut encoder), Some(Segment::new("ctgB", 0)));

    // too short to hold a single k-mer
    assert_eq!(map.assign(b"ACGTACGT", &mut encoder), None);
}

#[test]
fn duplicated_sequence_is_ambiguous() {
    let mut rng = StdRng::seed_from_u64(99);
    let contig = random_contig(&mut rng, "ctgA", 400);
    let copy = FastaRecord {
        name: "ctgA_dup".to_owned(),
        sequence: contig.sequence.clone(),
    };
    let calc = SegmentCalc::new(100);
    let map = KmerMap::build(&[contig.clone(), copy], calc, 21, 200);
    // every k-mer occurs in two contigs, so none are usable
    assert_eq!(map.usable_kmers(), 0);

    let mut encoder = KmerEncoder::new(21);
    let read = contig.sequence[10..70].as_bytes();
    assert_eq!(map.assign(read, &mut encoder), None);
}

#[test]
fn ambiguous_read_bases_are_skipped() {
    let mut rng = StdRng::seed_from_u64(5);
    let contig = random_contig(&mut rng, "ctgA", 400);
    let calc = SegmentCalc::new(100);
    let map = KmerMap::build(&[contig.clone()], calc, 21, 200);

    // corrupt one base in the middle of the read; windows covering it are
    // skipped but the rest still carry the vote
    let mut read = contig.sequence[10..70].as_bytes().to_vec();
    read[30] = b'N';
    let mut encoder = KmerEncoder::new(21);
    assert_eq!(
        map.assign(&read, &mut encoder),
        Some(Segment::new("ctgA", 0))
    );
}

#[test]
fn populate_counts_assigned_reads() {
    let mut rng = StdRng::seed_from_u64(77);
    let contigs = vec![
        random_contig(&mut rng, "ctgA", 400),
        random_contig(&mut rng, "ctgB", 400),
    ];
    let calc = SegmentCalc::new(100);
    let map = KmerMap::build(&contigs, calc, 21, 200);

    let reads = vec![
        BarcodedRead {
            sequence: contigs[0].sequence[320..380].to_owned(),
            barcode: 0,
        },
        BarcodedRead {
            sequence: contigs[0].sequence[330..390].to_owned(),
            barcode: 0,
        },
        BarcodedRead {
            sequence: contigs[1].sequence[10..70].to_owned(),
            barcode: 0,
        },
        // unmappable junk read
        BarcodedRead {
            sequence: "N".repeat(60),
            barcode: 1,
        },
    ];

    let index = populate_from_reads(&reads, &map);
    assert_eq!(index.read_pairs(&Segment::new("ctgA", 3), 0), 2);
    assert_eq!(index.read_pairs(&Segment::new("ctgB", 0), 0), 1);
    assert_eq!(index.len(), 2);
}
