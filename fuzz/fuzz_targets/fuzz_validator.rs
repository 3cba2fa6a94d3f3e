#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonpda::{Validator, ValidatorOptions, validate_with};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    "\u{2003}".as_bytes(),
    "\u{3000}".as_bytes(),
];

// Occasional structural damage so rejections get exercised too.
static NOISE_TABLE: &[&[u8]] = &[b",", b"]", b"}", b"[", b"{", b":", b"\"", b"tru", b"@"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x0F);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size && prefix < max_size {
            prefix += append_from(WS_TABLE, &mut data[prefix..], max_size - prefix);
            prefix += append_value(&mut data[prefix..], size, max_size - prefix);
            if with_rng(|rng| rng.random_ratio(1, 8)) {
                prefix += append_from(NOISE_TABLE, &mut data[prefix..], max_size - prefix);
            }
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends 1..=4 entries of `table` to `buf` without exceeding `limit`.
fn append_from(table: &[&[u8]], buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let mut written = 0;
        for _ in 0..rng.random_range(1..=4) {
            let w = table[rng.random_range(0..table.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2 + 1).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn validator(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes(data[1..5].try_into().unwrap()) as usize;
    let data = &data[HEADER..];

    let options = ValidatorOptions {
        allow_multiple_json_values: flags & 1 != 0,
        allow_unicode_whitespace: flags & 2 != 0,
        lenient_lexing: flags & 4 != 0,
        max_depth: (flags & 8 != 0).then_some(16),
    };

    // Byte chunks at arbitrary cut points, including inside characters.
    let mut chunked = Validator::new(options);
    let mut start = 0;
    let mut chunked_result = Ok(());
    while start < data.len() {
        let size = split_seed % (data.len() - start) + 1;
        if let Err(err) = chunked.feed_bytes(&data[start..start + size]) {
            chunked_result = Err(err);
            break;
        }
        start += size;
    }
    let chunked_result = chunked_result.and_then(|()| chunked.finish());

    // Lossy decoding produces the same characters as the byte path whenever
    // the input is valid UTF-8, so the verdicts must agree there.
    if let Ok(text) = std::str::from_utf8(data) {
        let whole = validate_with(text, options);
        assert_eq!(whole, chunked_result, "chunked and one-shot results differ");

        let strict = ValidatorOptions {
            allow_multiple_json_values: false,
            allow_unicode_whitespace: false,
            lenient_lexing: false,
            max_depth: None,
        };
        if serde_json::from_str::<Value>(text).is_ok() {
            assert!(
                validate_with(text, strict).is_ok(),
                "serde_json accepted a document that was rejected"
            );
        }
    }
}

fuzz_target!(|data: &[u8]| validator(data));
