//! Presentation helpers for showing a [`CompressionResult`] to a person.
//!
//! Nothing in the compressor depends on this module.

use std::{fmt::{self, Display}, path::Path};

use crate::result::CompressionResult;

/// Bits shown by the collapsed view of the encoded stream.
pub const PREVIEW_BITS: usize = 1000;

/// Formats a byte count as bytes, KB or MB (decimal units, two decimals).
pub fn format_file_size(bytes: usize) -> String {
    if bytes >= 1_000_000 {
        format!("{:.2} MB", bytes as f64 / 1e6)
    } else if bytes >= 1_000 {
        format!("{:.2} KB", bytes as f64 / 1e3)
    } else {
        format!("{} bytes", bytes)
    }
}

/// The basename an exported artifact gets: the source file stem plus `_compressed`.
pub fn export_name(source: &str) -> String {
    let path = Path::new(source);
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = format!("{}_compressed", stem);

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name).to_string_lossy().into_owned(),
        _ => name,
    }
}

pub struct Report<'a> {
    pub result: &'a CompressionResult,
    /// Show every packed byte instead of the first bits of the stream
    pub expanded: bool,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a CompressionResult, expanded: bool) -> Self {
        Self { result, expanded }
    }

    pub fn is_truncated(&self) -> bool {
        self.result.encoded_bits() > PREVIEW_BITS
    }

    /// The first [`PREVIEW_BITS`] encoded bits.
    pub fn preview(&self) -> String {
        let mut bits = self.result.bit_string();
        bits.truncate(PREVIEW_BITS);
        bits
    }

    /// Every packed byte in decimal, comma separated.
    pub fn expanded_view(&self) -> String {
        self.result.packed_bytes.iter().map(u8::to_string).collect::<Vec<_>>().join(", ")
    }
}

impl<'a> Display for Report<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original file size: {}", format_file_size(self.result.original_size))?;
        writeln!(f, "Compressed file size: {}", format_file_size(self.result.compressed_size))?;
        writeln!(f, "Distinct symbols: {}", self.result.codebook.len())?;
        writeln!(f, "Padding bits: {}", self.result.padding_bits)?;

        if self.expanded {
            writeln!(f, "{}", self.expanded_view())
        } else if self.is_truncated() {
            writeln!(f, "{}... ({} more bits, use --expanded)", self.preview(), self.result.encoded_bits() - PREVIEW_BITS)
        } else {
            writeln!(f, "{}", self.preview())
        }
    }
}

#[test]
fn test_format_file_size() {
    assert_eq!(format_file_size(0), "0 bytes");
    assert_eq!(format_file_size(999), "999 bytes");
    assert_eq!(format_file_size(1000), "1.00 KB");
    assert_eq!(format_file_size(123_456), "123.46 KB");
    assert_eq!(format_file_size(2_500_000), "2.50 MB");
}

#[test]
fn test_export_name() {
    assert_eq!(export_name("notes.txt"), "notes_compressed");
    assert_eq!(export_name("archive.tar.gz"), "archive.tar_compressed");
    assert_eq!(export_name("dir/README"), "dir/README_compressed");
}

#[test]
fn test_preview_truncation() {
    let result = crate::compress(&b"ab".repeat(600));
    let report = Report::new(&result, false);

    assert!(report.is_truncated());
    assert_eq!(report.preview().len(), PREVIEW_BITS);
    assert!(report.to_string().contains("200 more bits"));

    let small = crate::compress(b"abb");
    let report = Report::new(&small, true);

    assert!(!report.is_truncated());
    assert_eq!(report.expanded_view(), "96");
    assert!(report.to_string().contains("Original file size: 3 bytes"));
}
