use std::fs;
use std::path::PathBuf;

use hfm::{compress_file, decode_bytes, decompress_file, encode_bytes, CodecError};

/// A fresh scratch directory per test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hfm-it-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Compress `data` to the default output path, uncompress it again and return the container.
fn file_round_trip(name: &str, data: &[u8]) -> Vec<u8> {
    let dir = scratch_dir(name);
    let source = dir.join("source.bin");
    let restored = dir.join("restored.bin");
    fs::write(&source, data).unwrap();

    let stats = compress_file(&source, None).unwrap();
    let packed = dir.join("source.bin.hfm");
    let container = fs::read(&packed).unwrap();
    assert_eq!(stats.container_len(), container.len() as u64);

    let written = decompress_file(&packed, &restored).unwrap();
    assert_eq!(written, data.len() as u64);
    assert_eq!(fs::read(&restored).unwrap(), data);

    fs::remove_dir_all(&dir).unwrap();
    container
}

#[test]
fn empty_file_test() {
    let container = file_round_trip("empty", &[]);
    assert!(container.is_empty());
}

#[test]
fn single_symbol_file_test() {
    let container = file_round_trip("single", &[0x41; 10]);
    assert_eq!(container, vec![1, 0x41, 0, 0, 0, 10]);
}

#[test]
fn three_symbol_file_test() {
    let container = file_round_trip("three", &[0x00, 0x01, 0x00, 0x01, 0x02]);
    assert_eq!(container.len(), 1 + 3 * 5 + 1);
    assert_eq!(&container[..6], &[3, 0x00, 0, 0, 0, 2]);
}

#[test]
fn all_byte_values_file_test() {
    let data: Vec<u8> = (0..=255).collect();
    let container = file_round_trip("all", &data);
    assert_eq!(container[0], 0);
    // Every byte once: a balanced tree of 8 bit codes
    assert_eq!(container.len(), 1 + 256 * 5 + 256);
}

#[test]
fn larger_file_test() {
    let data: Vec<u8> = (0..300_000_u32)
        .map(|i| if i % 5 == 0 { (i >> 3) as u8 } else { b"etaoin "[(i % 7) as usize] })
        .collect();
    let container = file_round_trip("large", &data);
    assert!(container.len() < data.len());
}

#[test]
fn explicit_output_path_test() {
    let dir = scratch_dir("explicit");
    let source = dir.join("in.txt");
    let packed = dir.join("packed.bin");
    fs::write(&source, b"explicit output path").unwrap();
    compress_file(&source, Some(&packed)).unwrap();
    assert!(packed.exists());
    assert!(!dir.join("in.txt.hfm").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input_test() {
    let dir = scratch_dir("missing");
    let result = compress_file(&dir.join("nope"), None);
    assert!(matches!(result, Err(CodecError::Io(_))));
    // Nothing written, not even the scratch file
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_container_leaves_no_output_test() {
    let dir = scratch_dir("malformed");
    let packed = dir.join("bad.hfm");
    let restored = dir.join("out.bin");
    fs::write(&packed, [5_u8, 1, 2]).unwrap();
    let result = decompress_file(&packed, &restored);
    assert!(matches!(result, Err(CodecError::MalformedContainer(_))));
    assert!(!restored.exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn in_memory_matches_file_test() {
    let data = b"in memory and on disk agree".to_vec();
    let container = file_round_trip("agree", &data);
    assert_eq!(encode_bytes(&data).unwrap(), container);
    assert_eq!(decode_bytes(&container).unwrap(), data);
}
