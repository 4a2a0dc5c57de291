//! Huffman codec integration tests.

use oxihuff_huffman::{
    CodeTable, Container, DecodeStrategy, FrequencyTable, HuffConfig, HuffmanDecoder,
    HuffmanTree, compress, decode, decompress, decompress_with, encode,
};
use proptest::prelude::*;

#[test]
fn test_empty_input() {
    let container = encode(b"").expect("encode failed");
    assert_eq!(container.original_len(), 0);
    assert!(container.table().is_empty());
    assert!(container.payload().is_empty());
    assert_eq!(container.usable_bits(), 0);

    let bytes = container.to_bytes();
    assert_eq!(
        bytes,
        [
            0u8, 0, 0, 0, // original symbol count
            0, 0, 0, 0, // code table entry count
            0, // usable bits
            0, 0, 0, 0, // payload byte count
        ]
    );
    assert!(decompress(&bytes).expect("decode failed").is_empty());
}

#[test]
fn test_single_symbol_repeated() {
    let original = b"aaaaa";
    let container = encode(original).expect("encode failed");

    assert_eq!(container.table().len(), 1);
    let code = container.table().get(b'a').expect("no code for 'a'");
    assert_eq!(code.to_string(), "0");
    assert_eq!(container.original_len(), 5);

    let bytes = container.to_bytes();
    assert_eq!(decompress(&bytes).expect("decode failed"), original);
}

#[test]
fn test_single_byte() {
    let compressed = compress(b"A").expect("compression failed");
    assert_eq!(decompress(&compressed).expect("decompression failed"), b"A");
}

#[test]
fn test_abracadabra() {
    let original = b"abracadabra";
    let freq = FrequencyTable::count(original);
    assert_eq!(freq.get(b'a'), Some(5));
    assert_eq!(freq.get(b'b'), Some(2));
    assert_eq!(freq.get(b'r'), Some(2));
    assert_eq!(freq.get(b'c'), Some(1));
    assert_eq!(freq.get(b'd'), Some(1));
    assert_eq!(freq.distinct(), 5);

    let container = encode(original).expect("encode failed");
    assert!(container.table().is_prefix_free());
    assert_eq!(container.table().len(), 5);
    assert_eq!(decode(&container).expect("decode failed"), original);
}

#[test]
fn test_binary_safe_symbols() {
    // Zero bytes, 0xFF and newlines would break a delimited text table.
    let mut original = Vec::new();
    for i in 0..200u32 {
        original.push(0x00);
        original.push(b'\n');
        original.push(0xFF);
        if i % 3 == 0 {
            original.push(b'_');
            original.push(b'\r');
        }
    }

    let compressed = compress(&original).expect("compression failed");
    assert_eq!(decompress(&compressed).expect("decompression failed"), original);

    let container = Container::from_bytes(&compressed).expect("parse failed");
    for symbol in [0x00, b'\n', 0xFF, b'_', b'\r'] {
        assert!(container.table().get(symbol).is_some(), "missing {symbol:#04x}");
    }
}

#[test]
fn test_all_byte_values() {
    let original: Vec<u8> = (0..=255u8).cycle().take(256 * 4).collect();
    let container = encode(&original).expect("encode failed");
    assert_eq!(container.table().len(), 256);
    // Uniform frequencies over 256 symbols give 8-bit codes.
    assert_eq!(container.table().max_code_length(), 8);
    assert_eq!(container.payload().len(), original.len());
    assert_eq!(decode(&container).expect("decode failed"), original);
}

#[test]
fn test_skewed_data_compresses() {
    let mut original = vec![b'e'; 5000];
    original.extend_from_slice(b"the rest of the alphabet is rare");
    let compressed = compress(&original).expect("compression failed");

    println!("Original size: {} bytes", original.len());
    println!("Compressed size: {} bytes", compressed.len());

    assert!(compressed.len() < original.len() / 4);
    assert_eq!(decompress(&compressed).expect("decompression failed"), original);
}

#[test]
fn test_stats() {
    let original = b"This is a test of compression! ".repeat(10);
    let stats = encode(&original).expect("encode failed").stats();
    assert_eq!(stats.original_size, 310);
    assert!(stats.compressed_size < 310);
    assert!(stats.space_savings() > 0.0);
    assert!(stats.bits_per_symbol() < 8.0);
}

#[test]
fn test_strategies_agree_on_text() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(50);
    let compressed = compress(&original).expect("compression failed");
    let table = decompress_with(&compressed, HuffConfig::DEFAULT).expect("table decode failed");
    let tree = decompress_with(
        &compressed,
        HuffConfig::new().with_decode_strategy(DecodeStrategy::Tree),
    )
    .expect("tree decode failed");
    assert_eq!(table, original);
    assert_eq!(tree, original);
}

#[test]
fn test_table_serialization_is_independent_of_tree() {
    let original = b"mississippi";
    let container = encode(original).expect("encode failed");
    let bytes = container.table().serialize();
    let (table, consumed) = CodeTable::deserialize(&bytes).expect("deserialize failed");
    assert_eq!(consumed, bytes.len());
    assert_eq!(&table, container.table());
}

fn ceil_log2(k: usize) -> u64 {
    (usize::BITS - (k - 1).leading_zeros()) as u64
}

proptest! {
    #[test]
    fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let compressed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn prop_roundtrip_small_alphabet(
        data in prop::collection::vec(prop::sample::select(vec![0u8, 1, 2, b'\n', 0xFF]), 0..4096)
    ) {
        let compressed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn prop_codes_are_prefix_free(data in prop::collection::vec(any::<u8>(), 1..1024)) {
        let freq = FrequencyTable::count(&data);
        let tree = HuffmanTree::build(&freq).unwrap().unwrap();
        let codes = tree.codes().unwrap();
        prop_assert_eq!(codes.len(), freq.distinct());

        let entries: Vec<_> = codes.iter().collect();
        for (i, (_, a)) in entries.iter().enumerate() {
            for (_, b) in &entries[i + 1..] {
                prop_assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a));
            }
        }
    }

    #[test]
    fn prop_no_worse_than_fixed_width(data in prop::collection::vec(any::<u8>(), 2..2048)) {
        let freq = FrequencyTable::count(&data);
        prop_assume!(freq.distinct() >= 2);
        let container = encode(&data).unwrap();
        let fixed = data.len() as u64 * ceil_log2(freq.distinct());
        prop_assert!(container.payload_bits() <= fixed);
    }

    #[test]
    fn prop_strategies_agree(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let container = encode(&data).unwrap();
        let table = HuffmanDecoder::new(HuffConfig::DEFAULT).decode(&container).unwrap();
        let tree = HuffmanDecoder::new(
            HuffConfig::new().with_decode_strategy(DecodeStrategy::Tree),
        )
        .decode(&container)
        .unwrap();
        prop_assert_eq!(&table, &data);
        prop_assert_eq!(tree, table);
    }
}
