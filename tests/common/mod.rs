//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build a jar in memory.
pub fn jar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (entry, contents) in entries {
        writer
            .start_file(*entry, SimpleFileOptions::default())
            .expect("failed to start zip entry");
        writer.write_all(contents).expect("failed to write zip entry");
    }
    writer.finish().expect("failed to finish zip").into_inner()
}

/// Write a jar at `dir/name`.
pub fn write_jar(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, jar_bytes(entries)).expect("failed to write jar");
    path
}

/// Number of entries in a directory.
pub fn dir_len(dir: &Path) -> usize {
    std::fs::read_dir(dir).expect("failed to read dir").count()
}
