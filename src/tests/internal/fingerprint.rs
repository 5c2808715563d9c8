use crate::fingerprint::{fingerprint, fingerprints_match, READ_BUFFER_SIZE};
use crate::tests::md5_hex;

#[tokio::test]
async fn fingerprint_is_md5_hex_and_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.txt");
    std::fs::write(&path, b"hello").unwrap();

    let first = fingerprint(&path).await;
    let second = fingerprint(&path).await;

    assert_eq!(first, "5d41402abc4b2a76b9719d911017c592");
    assert_eq!(first, second);
}

#[tokio::test]
async fn fingerprint_streams_files_larger_than_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.bin");
    let data: Vec<u8> = (0..READ_BUFFER_SIZE * 3 + 123)
        .map(|i| (i % 251) as u8)
        .collect();
    std::fs::write(&path, &data).unwrap();

    assert_eq!(fingerprint(&path).await, md5_hex(&data));
}

#[tokio::test]
async fn fingerprint_of_missing_or_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();

    assert_eq!(fingerprint(dir.path().join("nope")).await, "");
    assert_eq!(fingerprint(dir.path()).await, "");
}

#[tokio::test]
async fn fingerprint_of_empty_file_is_not_empty_string() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty");
    std::fs::write(&path, b"").unwrap();

    assert_eq!(fingerprint(&path).await, "d41d8cd98f00b204e9800998ecf8427e");
}

#[test]
fn match_requires_both_sides() {
    assert!(fingerprints_match("abc123", "ABC123"));
    assert!(!fingerprints_match("", ""));
    assert!(!fingerprints_match("abc123", ""));
    assert!(!fingerprints_match("", "abc123"));
    assert!(!fingerprints_match("abc123", "abc124"));
}
