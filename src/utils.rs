use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;
use sha2::{Digest, Sha256};

/// How many leading bytes are inspected when sniffing for binary content.
pub const SNIFF_LEN: usize = 8192;

/// Text encodings tried, in order, when decoding a file for line diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

pub const FALLBACK_ENCODINGS: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

impl TextEncoding {
    /// Decodes the whole buffer, or `None` if any byte sequence is invalid
    /// for this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
            TextEncoding::Windows1252 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
        }
    }
}

/// SHA-256 of the whole file, hex encoded. `None` when the file can't be read.
pub fn file_digest(path: &Path) -> Option<String> {
    let mut file = File::open(path).ok()?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).ok()?;
    Some(hex::encode(hasher.finalize()))
}

pub fn is_probably_binary(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return true,
    };
    let mut buffer = vec![0u8; SNIFF_LEN];
    let mut filled = 0;
    // a single read() may return short on some platforms
    while filled < SNIFF_LEN {
        match file.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => return true,
        }
    }
    buffer[..filled].contains(&0)
}

/// Decodes `bytes` with the first encoding in [`FALLBACK_ENCODINGS`] that
/// accepts the entire buffer.
pub fn decode_best_effort(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    FALLBACK_ENCODINGS
        .iter()
        .find_map(|enc| enc.decode(bytes).map(|text| (text, *enc)))
}

/// Splits text into lines, keeping each line's terminator.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

/// Reads a file as text lines. `Ok(None)` means no fallback encoding could
/// decode it.
pub fn read_lines_best_effort(path: &Path, normalize_eol: bool) -> Result<Option<Vec<String>>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let Some((content, encoding)) = decode_best_effort(&bytes) else {
        return Ok(None);
    };
    tracing::trace!(path = %path.display(), ?encoding, "decoded text");

    if normalize_eol {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        Ok(Some(split_lines(&normalized)))
    } else {
        Ok(Some(split_lines(&content)))
    }
}

pub fn file_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|m| m.len())
}

pub fn file_size_human(size: u64) -> String {
    let mut value = size as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} TB")
}

/// Lowercase extension including the leading dot, or an empty string.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(bytes: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn human_sizes() {
        assert_eq!(file_size_human(0), "0.0 B");
        assert_eq!(file_size_human(1023), "1023.0 B");
        assert_eq!(file_size_human(1536), "1.5 KB");
        assert_eq!(file_size_human(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(file_size_human(3 * 1024u64.pow(4)), "3.0 TB");
    }

    #[test]
    fn digest_matches_for_same_bytes() {
        let a = temp_with(b"same bytes");
        let b = temp_with(b"same bytes");
        let c = temp_with(b"other bytes");
        assert_eq!(file_digest(a.path()), file_digest(b.path()));
        assert_ne!(file_digest(a.path()), file_digest(c.path()));
        assert_eq!(file_digest(a.path()).unwrap().len(), 64);
    }

    #[test]
    fn digest_of_missing_file_is_none() {
        assert!(file_digest(Path::new("/definitely/not/here")).is_none());
    }

    #[test]
    fn nul_in_prefix_is_binary() {
        let f = temp_with(b"abc\0def");
        assert!(is_probably_binary(f.path()));
        let f = temp_with(b"plain text\n");
        assert!(!is_probably_binary(f.path()));
        let f = temp_with(b"");
        assert!(!is_probably_binary(f.path()));
    }

    #[test]
    fn nul_after_prefix_is_not_sniffed() {
        let mut bytes = vec![b'a'; SNIFF_LEN];
        bytes.push(0);
        let f = temp_with(&bytes);
        assert!(!is_probably_binary(f.path()));
    }

    #[test]
    fn unreadable_is_binary() {
        assert!(is_probably_binary(Path::new("/definitely/not/here")));
    }

    #[test]
    fn utf8_is_tried_first() {
        let (text, enc) = decode_best_effort("héllo".as_bytes()).unwrap();
        assert_eq!(text, "héllo");
        assert_eq!(enc, TextEncoding::Utf8);
    }

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        let (text, enc) = decode_best_effort(&[b'c', b'a', b'f', 0xE9]).unwrap();
        assert_eq!(text, "café");
        assert_eq!(enc, TextEncoding::Latin1);
    }

    #[test]
    fn windows_1252_maps_euro_sign() {
        assert_eq!(TextEncoding::Windows1252.decode(&[0x80]).as_deref(), Some("€"));
    }

    #[test]
    fn lines_keep_terminators() {
        assert_eq!(split_lines("a\nb\nc"), vec!["a\n", "b\n", "c"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn eol_normalization() {
        let f = temp_with(b"one\r\ntwo\rthree\n");
        let lines = read_lines_best_effort(f.path(), true).unwrap().unwrap();
        assert_eq!(lines, vec!["one\n", "two\n", "three\n"]);

        let lines = read_lines_best_effort(f.path(), false).unwrap().unwrap();
        assert_eq!(lines, vec!["one\r\n", "two\rthree\n"]);
    }

    #[test]
    fn dotted_extension_is_lowercase() {
        assert_eq!(dotted_extension(Path::new("a/B.PNG")), ".png");
        assert_eq!(dotted_extension(Path::new("Makefile")), "");
        assert_eq!(dotted_extension(Path::new(".bashrc")), "");
        assert_eq!(dotted_extension(Path::new("notes.")), "");
    }
}
