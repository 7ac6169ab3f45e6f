use anyhow::{Result, anyhow};
use std::path::Path;

/// Sanitizes a client-supplied filename to prevent path traversal
/// Returns the sanitized filename or an error if nothing usable remains
pub fn sanitize_filename(filename: &str) -> Result<String> {
    // Get only the filename component (remove any path)
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(anyhow!("Filename cannot be empty"));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!("Path traversal attempt detected: {}", filename);
    }

    // Block path separators and reserved characters, keep the rest
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control()
                || c == '/'
                || c == '\\'
                || c == ':'
                || c == '*'
                || c == '?'
                || c == '"'
                || c == '<'
                || c == '>'
                || c == '|'
                || c == ';'
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Limit length safely for UTF-8
    let sanitized = if sanitized.len() > 255 {
        let mut end = 255;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    if sanitized.chars().all(|c| c == '_' || c == '.') {
        return Err(anyhow!("Filename contains no usable characters"));
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_passes_through() {
        assert_eq!(sanitize_filename("memo.wav").unwrap(), "memo.wav");
    }

    #[test]
    fn test_path_components_are_stripped() {
        assert_eq!(
            sanitize_filename("../../etc/passwd.wav").unwrap(),
            "passwd.wav"
        );
        assert_eq!(sanitize_filename("/tmp/rec.wav").unwrap(), "rec.wav");
    }

    #[test]
    fn test_reserved_characters_are_replaced() {
        assert_eq!(
            sanitize_filename("a:b*c?.wav").unwrap(),
            "a_b_c_.wav"
        );
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("///").is_err());
    }
}
