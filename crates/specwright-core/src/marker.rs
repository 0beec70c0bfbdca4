use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Lines scanned for a marker when a file has no YAML front matter.
const HEADER_LINES: usize = 20;

static MARKER_RE: OnceLock<Regex> = OnceLock::new();

fn marker_re() -> &'static Regex {
    MARKER_RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*(?:#\s*)?generatedBy\s*[:=]\s*["']?([^"'\s]+)["']?\s*$"#).unwrap()
    })
}

/// The part of a managed file where the marker lives: the YAML front matter
/// when present, otherwise the first few lines.
pub fn header_region(text: &str) -> &str {
    if let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    {
        let start = text.len() - rest.len();
        let end = rest
            .find("\n---")
            .map(|i| start + i)
            .unwrap_or(text.len());
        return &text[start..end];
    }
    let end = text
        .match_indices('\n')
        .nth(HEADER_LINES - 1)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}

/// Extract the `generatedBy` version from a managed file's header.
pub fn parse_generated_by(text: &str) -> Option<String> {
    marker_re()
        .captures(header_region(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Read `path` and extract its marker. Unreadable files count as unmarked.
pub fn read_generated_by(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_generated_by(&text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "managed file unreadable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_nested_yaml_marker() {
        let text = "---\nname: x\nmetadata:\n  generatedBy: \"0.3.1\"\n---\n\nbody\n";
        assert_eq!(parse_generated_by(text).as_deref(), Some("0.3.1"));
    }

    #[test]
    fn parses_toml_comment_marker() {
        let text = "# generatedBy: \"1.0.0\"\ndescription = \"d\"\n";
        assert_eq!(parse_generated_by(text).as_deref(), Some("1.0.0"));
    }

    #[test]
    fn ignores_marker_outside_front_matter() {
        let text = "---\nname: x\n---\n\ngeneratedBy: \"9.9.9\"\n";
        assert_eq!(parse_generated_by(text), None);
    }

    #[test]
    fn unquoted_and_missing() {
        assert_eq!(
            parse_generated_by("---\ngeneratedBy: 2.1.0\n---\n").as_deref(),
            Some("2.1.0")
        );
        assert_eq!(parse_generated_by("---\nname: x\n---\n"), None);
        assert_eq!(parse_generated_by(""), None);
    }

    #[test]
    fn unreadable_file_is_unmarked() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_generated_by(&dir.path().join("missing.md")), None);
        // A directory cannot be read as a string either.
        assert_eq!(read_generated_by(dir.path()), None);
    }
}
