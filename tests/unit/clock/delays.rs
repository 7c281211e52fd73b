use super::*;

#[test]
fn per_frame_delays_accumulate_in_milliseconds() {
    let delays = FrameDelays::from_centiseconds(&[10, 15, 15]);
    assert_eq!(frame_end_times(&delays, 3), vec![100, 250, 400]);
}

#[test]
fn single_delay_repeats_for_every_frame() {
    let delays = FrameDelays::HasDelays(10u32.to_le_bytes().to_vec());
    assert_eq!(frame_end_times(&delays, 3), vec![100, 200, 300]);
}

#[test]
fn short_delay_list_cycles() {
    let delays = FrameDelays::from_centiseconds(&[1, 2]);
    assert_eq!(frame_end_times(&delays, 5), vec![10, 30, 40, 60, 70]);
}

#[test]
fn missing_delays_yield_zero_table() {
    assert_eq!(frame_end_times(&FrameDelays::NoDelays, 4), vec![0, 0, 0, 0]);
}

#[test]
fn trailing_partial_entry_is_ignored() {
    let mut bytes = 5u32.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0xff, 0xff]);
    let delays = FrameDelays::HasDelays(bytes);
    assert_eq!(delays.entries(), vec![5]);
    assert_eq!(frame_end_times(&delays, 2), vec![50, 100]);
}

#[test]
fn metadata_without_a_whole_entry_behaves_like_no_delays() {
    let delays = FrameDelays::HasDelays(vec![1, 2, 3]);
    assert!(delays.entries().is_empty());
    assert_eq!(frame_end_times(&delays, 2), vec![0, 0]);
}

#[test]
fn indivisible_layout_is_tolerated() {
    let delays = FrameDelays::from_centiseconds(&[1, 2]);
    assert_eq!(frame_end_times(&delays, 3), vec![10, 30, 40]);
}

#[test]
fn entries_decode_little_endian() {
    let delays = FrameDelays::HasDelays(vec![0x2c, 0x01, 0x00, 0x00]);
    assert_eq!(delays.entries(), vec![300]);
    assert_eq!(FrameDelays::NoDelays.entries(), Vec::<u32>::new());
}
