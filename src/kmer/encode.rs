// src/kmer/encode.rs
//! Canonical bit-packed k-mer encoding.
//!
//! A k-mer and its reverse complement describe the same double-stranded
//! molecule, so both are collapsed onto the lexicographically smaller of the
//! two encodings (A < C < G < T). Bases are packed two bits each, four per
//! byte, most significant pair first, so a plain byte-wise comparison of the
//! packed buffers agrees with string comparison of the bases.

/// Table entry marking a byte that is not one of `ACGTacgt`.
const INVALID: u8 = 0xFF;

const fn forward_code(b: u8) -> u8 {
    match b {
        b'A' | b'a' => 0,
        b'C' | b'c' => 1,
        b'G' | b'g' => 2,
        b'T' | b't' => 3,
        _ => INVALID,
    }
}

const fn complement_code(b: u8) -> u8 {
    match b {
        b'A' | b'a' => 3,
        b'C' | b'c' => 2,
        b'G' | b'g' => 1,
        b'T' | b't' => 0,
        _ => INVALID,
    }
}

/// Build the four per-slot lookup tables for one strand. Slot 0 holds the
/// most significant bit pair of a packed byte, slot 3 the least.
const fn build_tables(complement: bool) -> [[u8; 256]; 4] {
    let mut tables = [[INVALID; 256]; 4];
    let mut b = 0;
    while b < 256 {
        let code = if complement {
            complement_code(b as u8)
        } else {
            forward_code(b as u8)
        };
        if code != INVALID {
            let mut slot = 0;
            while slot < 4 {
                tables[slot][b] = code << (6 - 2 * slot);
                slot += 1;
            }
        }
        b += 1;
    }
    tables
}

static FW: [[u8; 256]; 4] = build_tables(false);
static RV: [[u8; 256]; 4] = build_tables(true);

/// Pack four forward-strand bases starting at `start` into one byte.
fn pack_fw4(seq: &[u8], start: usize) -> Option<u8> {
    let mut byte = 0u8;
    for slot in 0..4 {
        let code = FW[slot][seq[start + slot] as usize];
        if code == INVALID {
            return None;
        }
        byte |= code;
    }
    Some(byte)
}

/// Pack four reverse-complement bases, reading `seq[hi]` down to
/// `seq[hi - 3]`, into one byte.
fn pack_rv4(seq: &[u8], hi: usize) -> Option<u8> {
    let mut byte = 0u8;
    for slot in 0..4 {
        let code = RV[slot][seq[hi - slot] as usize];
        if code == INVALID {
            return None;
        }
        byte |= code;
    }
    Some(byte)
}

/// Pack the trailing `n` (1..=3) forward bases starting at `start`. Bases are
/// accumulated with a right shift so they fill the byte from the most
/// significant bits down, with zero padding below.
fn pack_fw_tail(seq: &[u8], start: usize, n: usize) -> Option<u8> {
    let mut byte = 0u8;
    let mut taken = 0;
    for &b in seq[start..start + n].iter().rev() {
        let code = FW[0][b as usize];
        if code == INVALID {
            return None;
        }
        if taken > 0 {
            byte >>= 2;
        }
        byte |= code;
        taken += 1;
    }
    Some(byte)
}

/// Pack the trailing `n` bases of the reverse-complement strand, which are
/// the complements of the first `n` forward bases in reverse order. Same
/// right-shift accumulation as [`pack_fw_tail`].
fn pack_rv_tail(seq: &[u8], start: usize, n: usize) -> Option<u8> {
    let mut byte = 0u8;
    let mut taken = 0;
    for &b in &seq[start..start + n] {
        let code = RV[0][b as usize];
        if code == INVALID {
            return None;
        }
        if taken > 0 {
            byte >>= 2;
        }
        byte |= code;
        taken += 1;
    }
    Some(byte)
}

/// Canonicalizes fixed-length windows of a larger sequence into bit-packed
/// keys.
///
/// The encoder owns two scratch buffers that are reused across calls, so a
/// single instance must not be shared between threads; give each worker its
/// own.
pub struct KmerEncoder {
    k: usize,
    /// Total packed bytes per k-mer, `ceil(k / 4)`.
    kmer_bytes: usize,
    /// Bytes compared from both ends before the strand is decided,
    /// `ceil(k / 8)`.
    half_bytes: usize,
    /// Bases in the final partial byte, `k % 4`.
    hanging: usize,
    fw: Vec<u8>,
    rv: Vec<u8>,
}

impl KmerEncoder {
    /// Create an encoder for windows of length `k`.
    ///
    /// Panics if `k <= 3`; the strand comparison needs at least one full
    /// packed byte.
    pub fn new(k: usize) -> Self {
        assert!(k > 3, "k-mer size must be greater than 3, got {k}");
        let kmer_bytes = k.div_ceil(4);
        KmerEncoder {
            k,
            kmer_bytes,
            half_bytes: k.div_ceil(8),
            hanging: k % 4,
            fw: vec![0; kmer_bytes],
            rv: vec![0; kmer_bytes],
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of bytes in one packed encoding.
    pub fn packed_len(&self) -> usize {
        self.kmer_bytes
    }

    /// Encode the window `seq[pos..pos + k]` as the lexicographically smaller
    /// of its forward and reverse-complement packings.
    ///
    /// Returns `None` if the window contains any base outside `ACGTacgt`; the
    /// scratch contents are unspecified after a failed call. Panics if the
    /// window does not fit inside `seq`.
    ///
    /// Forward and reverse bytes are built in lockstep from opposite ends of
    /// the window. The first byte position where they differ decides the
    /// strand, and only the winner is encoded from there on. If every
    /// compared byte matches through the halfway point the window is
    /// palindromic and the forward encoding is kept.
    pub fn canonical(&mut self, seq: &[u8], pos: usize) -> Option<&[u8]> {
        assert!(
            pos + self.k <= seq.len(),
            "k-mer window [{}, {}) out of bounds for sequence of length {}",
            pos,
            pos + self.k,
            seq.len()
        );

        let mut byte = 0;
        while byte < self.half_bytes {
            let f = pack_fw4(seq, pos + 4 * byte)?;
            let r = pack_rv4(seq, pos + self.k - 1 - 4 * byte)?;
            self.fw[byte] = f;
            self.rv[byte] = r;
            byte += 1;
            if f < r {
                return self.finish_forward(seq, pos, byte);
            }
            if f > r {
                return self.finish_reverse(seq, pos, byte);
            }
        }
        // Equal through the comparison point: palindromic, keep forward.
        self.finish_forward(seq, pos, byte)
    }

    fn finish_forward(&mut self, seq: &[u8], pos: usize, mut byte: usize) -> Option<&[u8]> {
        let full_bytes = self.kmer_bytes - usize::from(self.hanging > 0);
        while byte < full_bytes {
            self.fw[byte] = pack_fw4(seq, pos + 4 * byte)?;
            byte += 1;
        }
        if self.hanging > 0 {
            self.fw[full_bytes] = pack_fw_tail(seq, pos + 4 * full_bytes, self.hanging)?;
        }
        Some(&self.fw)
    }

    fn finish_reverse(&mut self, seq: &[u8], pos: usize, mut byte: usize) -> Option<&[u8]> {
        let full_bytes = self.kmer_bytes - usize::from(self.hanging > 0);
        while byte < full_bytes {
            self.rv[byte] = pack_rv4(seq, pos + self.k - 1 - 4 * byte)?;
            byte += 1;
        }
        if self.hanging > 0 {
            self.rv[full_bytes] = pack_rv_tail(seq, pos, self.hanging)?;
        }
        Some(&self.rv)
    }
}

/// Unpack an encoded k-mer back into bases, for diagnostics and tests.
pub fn decode(packed: &[u8], k: usize) -> String {
    const BASES: [char; 4] = ['A', 'C', 'G', 'T'];
    (0..k)
        .map(|i| {
            let byte = packed[i / 4];
            let shift = 2 * (3 - i % 4);
            BASES[((byte >> shift) & 3) as usize]
        })
        .collect()
}

/// Reverse complement of a nucleotide sequence. Non-ACGT bases map to `N`.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|&b| match b {
            b'A' | b'a' => b'T',
            b'C' | b'c' => b'G',
            b'G' | b'g' => b'C',
            b'T' | b't' => b'A',
            _ => b'N',
        })
        .collect()
}
