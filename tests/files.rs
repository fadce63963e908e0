use std::fs;
use std::io::ErrorKind;

use ini::{Document, LoadError, LookupError, ParseError};
use tempfile::TempDir;

const SSH: &str = "tests/data/ssh.ini";

#[test]
fn load_file_with_comments() {
    let document = Document::read_file(SSH).expect("failed to load test data");

    assert_eq!(
        document.section_names().collect::<Vec<_>>(),
        vec!["forge.example", "topsecret.server.example"]
    );
    assert_eq!(document.get("forge.example", "User"), Ok("hg"));
    assert_eq!(document.get("topsecret.server.example", "Port"), Ok("50022"));
    assert_eq!(
        document.get("topsecret.server.example", "ForwardX11"),
        Ok("no")
    );
    assert!(matches!(
        document.get("forge.example", "Port"),
        Err(LookupError::KeyNotFound { .. })
    ));
}

#[test]
fn missing_file() {
    let dir = TempDir::new().expect("failed to create temporary directory");
    let path = dir.path().join("missing.ini");

    let result = Document::read_file(&path);

    match result {
        Err(LoadError::FileNotFound { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn invalid_file_contents() {
    let dir = TempDir::new().expect("failed to create temporary directory");
    let path = dir.path().join("bad.ini");
    fs::write(&path, "[s]\nkey = value\nno separator here\n").expect("failed to write file");

    let result = Document::read_file(&path);

    assert!(matches!(
        result,
        Err(LoadError::Parse {
            source: ParseError::Syntax { line: 3, .. }
        })
    ));
}

#[test]
fn save_then_load() {
    let dir = TempDir::new().expect("failed to create temporary directory");
    let path = dir.path().join("saved.ini");
    let mut document = Document::read_file(SSH).expect("failed to load test data");
    document
        .set("forge.example", "IdentityFile", "~/.ssh/id_ed25519")
        .expect("expected valid assignment");

    document.save_file(&path).expect("failed to save document");
    let loaded = Document::read_file(&path).expect("failed to load saved document");

    assert_eq!(loaded, document);
    assert_eq!(
        fs::read_to_string(&path).expect("failed to read saved file"),
        "[forge.example]
User = hg
IdentityFile = ~/.ssh/id_ed25519

[topsecret.server.example]
Port = 50022
ForwardX11 = no
"
    );
}

#[test]
fn save_overwrites_existing_content() {
    let dir = TempDir::new().expect("failed to create temporary directory");
    let path = dir.path().join("existing.ini");
    fs::write(&path, "[old]\nkey = a much longer value than the new one\n")
        .expect("failed to write file");

    let document = Document::parse("[new]\nk = v\n").expect("failed to parse hardcoded text");
    document.save_file(&path).expect("failed to save document");

    assert_eq!(
        fs::read_to_string(&path).expect("failed to read saved file"),
        "[new]\nk = v\n"
    );
}

#[test]
fn load_file_merges() {
    let mut document = Document::parse("[local]\nHost = localhost\n[forge.example]\nUser = git\n")
        .expect("failed to parse hardcoded text");

    document.load_file(SSH).expect("failed to load test data");

    assert_eq!(document.len(), 3);
    assert_eq!(document.get("local", "Host"), Ok("localhost"));
    assert_eq!(document.get("forge.example", "User"), Ok("hg"));
}

#[test]
fn load_file_skips_utf8_bom() {
    let dir = TempDir::new().expect("failed to create temporary directory");
    let path = dir.path().join("bom.ini");
    let mut data = vec![0xEF_u8, 0xBB, 0xBF];
    data.extend_from_slice(b"[s]\nkey = value\n");
    fs::write(&path, data).expect("failed to write file");

    let document = Document::read_file(&path).expect("failed to load BOM-prefixed file");

    assert_eq!(document.section_names().collect::<Vec<_>>(), vec!["s"]);
    assert_eq!(document.get("s", "key"), Ok("value"));
}

#[test]
fn load_file_decodes_utf16_le() {
    let dir = TempDir::new().expect("failed to create temporary directory");
    let path = dir.path().join("utf16.ini");
    let mut data = vec![0xFF_u8, 0xFE];
    data.extend("[s]\r\nkey = value\r\n".encode_utf16().flat_map(u16::to_le_bytes));
    fs::write(&path, data).expect("failed to write file");

    let document = Document::read_file(&path).expect("failed to load UTF-16 file");

    assert_eq!(document.get("s", "key"), Ok("value"));
}

#[test]
fn invalid_encoding_is_a_read_failure() {
    let dir = TempDir::new().expect("failed to create temporary directory");
    let utf8 = dir.path().join("invalid-utf8.ini");
    let utf16 = dir.path().join("odd-utf16.ini");
    fs::write(&utf8, b"[s]\nkey = \xFF\n").expect("failed to write file");
    fs::write(&utf16, b"\xFF\xFE[").expect("failed to write file");

    for path in [utf8, utf16] {
        match Document::read_file(&path) {
            Err(LoadError::ReadFailure { source }) => {
                assert_eq!(source.kind(), ErrorKind::InvalidData, "{path:?}");
            }
            other => panic!("expected ReadFailure for {path:?}, got {other:?}"),
        }
    }
}
