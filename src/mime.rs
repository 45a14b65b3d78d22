//! MIME type detection.
//!
//! [`sniff`] looks at magic numbers; [`from_extension`] is the lookup table
//! used when sniffing is unavailable or inconclusive.

/// MIME type reported for content that could not be identified.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// MIME type reported for an empty file.
pub const EMPTY: &str = "inode/x-empty";

const MAGIC: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b", "application/gzip"),
    (b"BM", "image/bmp"),
    (b"\x7fELF", "application/x-executable"),
    (b"OggS", "audio/ogg"),
    (b"fLaC", "audio/flac"),
    (b"ID3", "audio/mpeg"),
    (b"\x00asm", "application/wasm"),
];

/// Identify content by its leading bytes.
///
/// Empty content is reported as [`EMPTY`]; unrecognised content as `None`.
pub fn sniff(head: &[u8]) -> Option<&'static str> {
    if head.is_empty() {
        return Some(EMPTY);
    }
    if head.len() >= 12 && &head[..4] == b"RIFF" && &head[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    MAGIC
        .iter()
        .find(|(magic, _)| head.starts_with(magic))
        .map(|(_, mime)| *mime)
}

/// Look up a MIME type by file extension (without the leading dot).
///
/// Matching is case-insensitive; unknown extensions map to [`OCTET_STREAM`].
pub fn from_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "txt" | "text" | "log" => "text/plain",
        "htm" | "html" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "md" | "markdown" => "text/markdown",
        "xml" => "application/xml",
        "js" | "mjs" => "text/javascript",
        "json" => "application/json",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        "php" => "application/x-httpd-php",
        "rs" => "text/x-rust",
        "sh" => "application/x-sh",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "wasm" => "application/wasm",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => OCTET_STREAM,
    }
}

/// Returns `true` for sniffing results that say nothing useful about the
/// content, so the extension table should be consulted instead.
pub fn is_generic(mime: &str) -> bool {
    mime.is_empty() || mime == OCTET_STREAM || mime == EMPTY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_known_signatures() {
        assert_eq!(sniff(b"\x89PNG\r\n\x1a\n...."), Some("image/png"));
        assert_eq!(sniff(b"%PDF-1.7"), Some("application/pdf"));
        assert_eq!(sniff(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
    }

    #[test]
    fn sniff_empty_and_unknown() {
        assert_eq!(sniff(b""), Some(EMPTY));
        assert_eq!(sniff(b"hello world"), None);
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(from_extension("JSON"), "application/json");
        assert_eq!(from_extension("txt"), "text/plain");
        assert_eq!(from_extension("nope"), OCTET_STREAM);
        assert_eq!(from_extension(""), OCTET_STREAM);
    }

    #[test]
    fn generic_results() {
        assert!(is_generic(OCTET_STREAM));
        assert!(is_generic(EMPTY));
        assert!(!is_generic("image/png"));
    }
}
