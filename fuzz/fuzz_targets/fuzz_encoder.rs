#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, SeedableRng};
use utf8sink::{
    ByteSink, EncodeResult, EncoderOptions, RawSink, SliceSink, Utf16View, Utf8Encoder, encoded_len,
};

#[derive(Debug, Arbitrary)]
struct Input {
    units: Vec<u16>,
    view_start: u8,
    view_trim: u8,
    seed: u64,
    raw_sink: bool,
    ascii_fast_path: bool,
}

/// What `core`'s decoder makes of the view: the UTF-8 bytes, or the backing
/// index of the first unpaired surrogate.
fn reference(view: &Utf16View<'_>) -> Result<Vec<u8>, usize> {
    let mut out = Vec::new();
    let mut pos = view.offset();
    for decoded in char::decode_utf16(view.as_units().iter().copied()) {
        match decoded {
            Ok(ch) => {
                let mut tmp = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
                pos += ch.len_utf16();
            }
            Err(_) => return Err(pos),
        }
    }
    Ok(out)
}

/// UTF-8 length of the well-formed units between the view start and the
/// first unpaired surrogate at `bad`.
fn valid_prefix_len(view: &Utf16View<'_>, bad: usize) -> usize {
    encoded_len(&view.backing()[view.offset()..bad]).expect("prefix is well-formed")
}

fn check<S: ByteSink>(
    sink: &mut S,
    written: impl Fn(&S) -> Vec<u8>,
    input: &Input,
    view: &Utf16View<'_>,
) {
    let encoder = Utf8Encoder::new(EncoderOptions {
        ascii_fast_path: input.ascii_fast_path,
    });
    let before = sink.position();
    let free = sink.limit() - before;
    let result = encoder.encode_string(view, sink);

    match (reference(view), result) {
        (Ok(bytes), EncodeResult::Underflow) => {
            assert!(bytes.len() <= free);
            assert_eq!(sink.position(), before + bytes.len());
            assert_eq!(&written(sink)[before..], &bytes[..]);
        }
        (Ok(bytes), EncodeResult::Overflow) => {
            assert!(bytes.len() > free, "overflow with {free} free for {} bytes", bytes.len());
            assert_eq!(sink.position(), before);
        }
        (Err(expected), EncodeResult::MalformedInput { position }) => {
            assert_eq!(position, expected);
            let prefix = valid_prefix_len(view, expected);
            assert!(prefix <= free, "malformed reported but {prefix} prefix bytes exceed {free} free");
            assert_eq!(sink.position(), before);
        }
        (Err(expected), EncodeResult::Overflow) => {
            // The bad surrogate is checked before its own room, so only the
            // valid prefix can run out of space.
            let prefix = valid_prefix_len(view, expected);
            assert!(prefix > free, "overflow with {free} free for a {prefix} byte prefix");
            assert_eq!(sink.position(), before);
        }
        (expected, got) => panic!("reference {expected:?} but encoder returned {got:?}"),
    }
}

fn encoder(input: &Input) {
    let len = input.units.len();
    let start = usize::from(input.view_start) % (len + 1);
    let view_len = (len - start).saturating_sub(usize::from(input.view_trim) % 4);
    let Ok(view) = Utf16View::new(&input.units, start, view_len) else {
        return;
    };

    let mut rng = SmallRng::seed_from_u64(input.seed);
    let capacity = rng.random_range(0..=view_len * 3 + 4);
    let position = rng.random_range(0..=capacity.min(3));
    let mut buf = vec![0u8; capacity];

    if input.raw_sink {
        let mut sink = RawSink::from_mut_slice(&mut buf);
        sink.try_set_position(position).expect("position within capacity");
        check(&mut sink, |s: &RawSink<'_>| s.written().to_vec(), input, &view);
    } else {
        let mut sink = SliceSink::new(&mut buf);
        sink.try_set_position(position).expect("position within capacity");
        check(&mut sink, |s: &SliceSink<'_>| s.written().to_vec(), input, &view);
    }
}

fuzz_target!(|input: Input| encoder(&input));
