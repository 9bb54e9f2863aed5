//! All-or-nothing commit of the destination position, and what retrying
//! after a failure looks like.

use alloc::{vec, vec::Vec};

use crate::{
    ByteSink, EncodeError, EncodeResult, RawSink, SliceSink, Utf16View, Utf8Encoder, encode,
};

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn overflow_leaves_position_untouched() {
    // Three code points of three bytes each into eight free bytes.
    let units = utf16("€€€");
    let mut buf = [0u8; 8];
    let mut sink = SliceSink::new(&mut buf);
    assert_eq!(
        Utf8Encoder::default().encode_string(&units, &mut sink),
        EncodeResult::Overflow
    );
    assert_eq!(sink.position(), 0);
    assert!(sink.written().is_empty());
}

#[test]
fn overflow_after_earlier_strings_keeps_their_output() {
    let encoder = Utf8Encoder::default();
    let mut buf = [0u8; 8];
    let mut sink = SliceSink::new(&mut buf);
    assert!(encoder.encode_string(&utf16("ok:"), &mut sink).is_underflow());
    assert!(encoder.encode_string(&utf16("€€"), &mut sink).is_overflow());
    assert_eq!(sink.position(), 3);
    assert_eq!(sink.written(), b"ok:");
}

#[test]
fn retry_starts_over_from_the_first_code_unit() {
    let units = utf16("€€€");
    let encoder = Utf8Encoder::default();

    let mut small = [0u8; 8];
    let mut sink = SliceSink::new(&mut small);
    assert!(encoder.encode_string(&units, &mut sink).is_overflow());

    let mut big = [0u8; 9];
    let mut sink = SliceSink::new(&mut big);
    assert!(encoder.encode_string(&units, &mut sink).is_underflow());
    assert_eq!(sink.written(), "€€€".as_bytes());
}

#[test]
fn loop_cursors_are_not_a_resume_point() {
    let units = utf16("a€b");
    let mut buf = [0u8; 3];
    let mut sink = SliceSink::new(&mut buf);
    let stopped = encode(&units, 0, units.len(), &mut sink, 0, 3);
    assert_eq!(stopped.result, EncodeResult::Overflow);
    assert_eq!((stopped.source_pos, stopped.dest_pos), (1, 1));

    // Encoding the whole string again into a big enough sink is the only
    // way to get the complete output.
    let mut bigger = [0u8; 5];
    let mut sink = SliceSink::new(&mut bigger);
    let again = encode(&units, 0, units.len(), &mut sink, 0, 5);
    assert_eq!(again.result, EncodeResult::Underflow);
    assert_eq!(&bigger, "a€b".as_bytes());
}

#[test]
fn malformed_leaves_position_untouched() {
    let units = [0x61, 0x62, 0xD800];
    let mut buf = [0u8; 8];
    let mut sink = RawSink::from_mut_slice(&mut buf);
    sink.try_set_position(1).unwrap();
    assert_eq!(
        Utf8Encoder::default().encode_string(&units, &mut sink),
        EncodeResult::MalformedInput { position: 2 }
    );
    assert_eq!(sink.position(), 1);
}

#[test]
fn view_positions_are_backing_indices() {
    let backing = [0x41, 0x42, 0xD800, 0x43, 0x44];
    let view = Utf16View::new(&backing, 1, 3).unwrap();
    let mut buf = [0u8; 16];
    let mut sink = SliceSink::new(&mut buf);
    assert_eq!(
        Utf8Encoder::default().encode_string_checked(&view, &mut sink),
        Err(EncodeError::MalformedInput { position: 2 })
    );
}

#[test]
fn view_encodes_only_its_window() {
    let backing = utf16("xx€yy");
    let view = Utf16View::new(&backing, 2, 2).unwrap();
    let mut buf = [0u8; 8];
    let mut sink = SliceSink::new(&mut buf);
    assert_eq!(
        Utf8Encoder::default().encode_string_checked(&view, &mut sink),
        Ok(4)
    );
    assert_eq!(sink.written(), "€y".as_bytes());
}

#[test]
fn pair_split_by_view_end_is_malformed() {
    let backing = utf16("a😀");
    let view = Utf16View::new(&backing, 0, 2).unwrap();
    let mut buf = [0u8; 8];
    let mut sink = SliceSink::new(&mut buf);
    assert_eq!(
        Utf8Encoder::default().encode_string(&view, &mut sink),
        EncodeResult::MalformedInput { position: 1 }
    );
}

#[test]
fn windowed_slice_sink_commits_relative_to_offset() {
    let mut buf = *b"##########";
    {
        let mut sink = SliceSink::with_window(&mut buf, 4, 4).unwrap();
        assert!(
            Utf8Encoder::default()
                .encode_string(&utf16("é!"), &mut sink)
                .is_underflow()
        );
        assert_eq!(sink.position(), 3);
        assert_eq!(sink.written(), "é!".as_bytes());
    }
    assert_eq!(&buf[..4], b"####");
    assert_eq!(&buf[7..], b"###");
}

#[test]
fn sink_is_reusable_after_clear() {
    let encoder = Utf8Encoder::default();
    let mut buf = [0u8; 4];
    let mut sink = SliceSink::new(&mut buf);
    let mut total = 0;
    for word in ["one", "two", "six"] {
        assert!(encoder.encode_string(&utf16(word), &mut sink).is_underflow());
        total += sink.position();
        sink.clear();
    }
    assert_eq!(total, 9);
}

fn assert_send_sync<T: Send + Sync + Copy>() {}

#[test]
fn encoder_holds_no_per_call_state() {
    assert_send_sync::<Utf8Encoder>();
    assert_send_sync::<crate::EncoderOptions>();
}

#[test]
fn one_encoder_and_source_shared_across_threads() {
    let encoder = Utf8Encoder::default();
    let units = utf16("héllo 😀");
    let (encoder, units) = (&encoder, &units);
    let outputs: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    let mut buf = [0u8; 16];
                    let mut rounds = vec![];
                    for _ in 0..64 {
                        let mut sink = SliceSink::new(&mut buf);
                        assert!(encoder.encode_string(units, &mut sink).is_underflow());
                        rounds.push(sink.written().to_vec());
                    }
                    rounds.concat()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("encoder thread panicked"))
            .collect()
    });

    let expected = "héllo 😀".as_bytes().repeat(64);
    assert_eq!(outputs.len(), 4);
    for out in outputs {
        assert_eq!(out, expected);
    }
}
