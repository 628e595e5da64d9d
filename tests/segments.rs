use tether::segment::calc::{SegmentCalc, MIDDLE_SEGMENT};

#[test]
fn divisible_length() {
    let calc = SegmentCalc::new(200);
    assert_eq!(calc.segments(1000), 5);
    assert_eq!(calc.remainder(1000), 0);
    assert_eq!(calc.index(1, 1000), 0);
    assert_eq!(calc.index(200, 1000), 0);
    assert_eq!(calc.index(201, 1000), 1);
    assert_eq!(calc.index(1000, 1000), 4);
    assert_eq!(calc.start(1000, 3), 601);
}

#[test]
fn non_divisible_length() {
    let calc = SegmentCalc::new(200);
    assert_eq!(calc.segments_per_half(1001), 2);
    assert_eq!(calc.segments(1001), 4);
    assert_eq!(calc.remainder(1001), 201);
}

#[test]
fn middle_remainder_maps_to_sentinel() {
    let calc = SegmentCalc::new(200);
    // remainder region is [401, 601]
    assert_eq!(calc.index(401, 1001), MIDDLE_SEGMENT);
    assert_eq!(calc.index(500, 1001), MIDDLE_SEGMENT);
    assert_eq!(calc.index(601, 1001), MIDDLE_SEGMENT);

    assert_eq!(calc.index(1, 1001), 0);
    assert_eq!(calc.index(400, 1001), 1);
    assert_eq!(calc.index(602, 1001), 2);
    assert_eq!(calc.index(1001, 1001), 3);
}

#[test]
fn segment_starts_line_up() {
    let calc = SegmentCalc::new(200);
    assert_eq!(calc.start(1001, 0), 1);
    assert_eq!(calc.start(1001, 1), 201);
    assert_eq!(calc.start(1001, 2), 602);
    assert_eq!(calc.start(1001, 3), 802);
}

#[test]
fn range_with_one_endpoint_in_remainder_is_clamped() {
    let calc = SegmentCalc::new(200);
    // end falls in the remainder: clamp to last left-half segment
    assert_eq!(calc.index_range(350, 450, 1001), Some((1, 1)));
    // start falls in the remainder: clamp to first right-half segment
    assert_eq!(calc.index_range(450, 650, 1001), Some((2, 2)));
}

#[test]
fn range_entirely_in_remainder_is_invalid() {
    let calc = SegmentCalc::new(200);
    assert_eq!(calc.index_range(450, 550, 1001), None);
}

#[test]
fn contig_too_short_for_two_segments_is_invalid() {
    let calc = SegmentCalc::new(200);
    assert_eq!(calc.index_range(10, 20, 300), None);
}

#[test]
fn full_contig_range_spans_all_segments() {
    let calc = SegmentCalc::new(200);
    assert_eq!(calc.index_range(1, 1001, 1001), Some((0, 3)));
    assert_eq!(calc.index_range(1, 1000, 1000), Some((0, 4)));
}

#[test]
#[should_panic]
fn zero_position_panics() {
    SegmentCalc::new(200).index(0, 1000);
}

#[test]
#[should_panic]
fn position_beyond_contig_panics() {
    SegmentCalc::new(200).index(1001, 1000);
}
