// src/segment/calc.rs
//! Contig coordinate to segment index arithmetic.

/// Zero-based index of a segment within its contig.
pub type SegmentIndex = u32;

/// Sentinel index for positions falling in the unassigned middle remainder of
/// a contig whose length is not evenly divisible by the segment size. Kept
/// out-of-band for tight loops; range queries surface it as `None` instead.
pub const MIDDLE_SEGMENT: SegmentIndex = SegmentIndex::MAX;

/// Pure segment arithmetic over `(contig length, segment size)`.
///
/// All positions are 1-based, as in SAM. Every method requires
/// `segment_size <= l / 2`; violating that (or passing a position outside
/// `[1, l]`) is a caller bug and panics.
#[derive(Debug, Clone, Copy)]
pub struct SegmentCalc {
    segment_size: u32,
}

impl SegmentCalc {
    pub fn new(segment_size: u32) -> Self {
        assert!(segment_size > 0, "segment size must be positive");
        SegmentCalc { segment_size }
    }

    pub fn segment_size(&self) -> u32 {
        self.segment_size
    }

    /// Index of the segment containing the 1-based position `pos`, or
    /// [`MIDDLE_SEGMENT`] if `pos` falls in the middle remainder.
    pub fn index(&self, pos: u32, l: u32) -> SegmentIndex {
        assert!(pos > 0, "positions are 1-based");
        assert!(pos <= l, "position {pos} beyond contig length {l}");
        assert!(self.segment_size <= l / 2);

        let pos = pos - 1;
        let s = self.segment_size;

        if l % s == 0 {
            return pos / s;
        }

        if pos < l / 2 {
            // left half
            let index = pos / s;
            if index >= self.segments_per_half(l) {
                MIDDLE_SEGMENT
            } else {
                index
            }
        } else {
            // right half, shifted left by the remainder so indices continue
            // from the left half
            let index = (pos - self.remainder(l)) / s;
            if index < self.segments_per_half(l) {
                MIDDLE_SEGMENT
            } else {
                index
            }
        }
    }

    /// First and last segment indices covered by the 1-based inclusive range
    /// `[start, end]`.
    ///
    /// Returns `None` when the contig is too short to hold two segments or
    /// when both endpoints fall in the middle remainder. An endpoint that
    /// falls in the remainder alone is clamped to the nearest boundary
    /// segment, so a partially assignable range still contributes.
    pub fn index_range(&self, start: u32, end: u32, l: u32) -> Option<(SegmentIndex, SegmentIndex)> {
        if l / 2 < self.segment_size {
            return None;
        }

        let mut first = self.index(start, l);
        let mut last = self.index(end, l);

        if first == MIDDLE_SEGMENT && last == MIDDLE_SEGMENT {
            return None;
        }
        if first == MIDDLE_SEGMENT {
            // clamp to the first segment of the right half
            first = self.segments_per_half(l);
        } else if last == MIDDLE_SEGMENT {
            // clamp to the last segment of the left half
            last = self.segments_per_half(l) - 1;
        }
        Some((first, last))
    }

    /// Number of segments in each half of the contig. Only meaningful when
    /// the length is not evenly divisible by the segment size.
    pub fn segments_per_half(&self, l: u32) -> u32 {
        assert!(self.segment_size <= l / 2);
        assert!(l % self.segment_size != 0);
        l / 2 / self.segment_size
    }

    /// Total number of segments in a contig of length `l`.
    pub fn segments(&self, l: u32) -> u32 {
        assert!(self.segment_size <= l / 2);
        if l % self.segment_size == 0 {
            l / self.segment_size
        } else {
            self.segments_per_half(l) * 2
        }
    }

    /// Length of the unassigned middle remainder, 0 for divisible lengths.
    pub fn remainder(&self, l: u32) -> u32 {
        assert!(self.segment_size <= l / 2);
        if l % self.segment_size == 0 {
            return 0;
        }
        l - self.segment_size * self.segments_per_half(l) * 2
    }

    /// 1-based start position of the segment with the given index.
    pub fn start(&self, l: u32, index: SegmentIndex) -> u32 {
        assert!(self.segment_size <= l / 2);
        assert!(index < self.segments(l), "segment index {index} out of range");
        let s = self.segment_size;
        if l % s == 0 {
            return index * s + 1;
        }

        let per_half = self.segments_per_half(l);
        if index < per_half {
            index * s + 1
        } else {
            per_half * s + self.remainder(l) + (index - per_half) * s + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_inverse_of_index() {
        let calc = SegmentCalc::new(200);
        for l in [1000u32, 1001, 1150, 1399] {
            for index in 0..calc.segments(l) {
                let start = calc.start(l, index);
                assert_eq!(calc.index(start, l), index, "l={l} index={index}");
            }
        }
    }

    #[test]
    #[should_panic]
    fn oversized_segment_panics() {
        SegmentCalc::new(600).index(1, 1000);
    }
}
