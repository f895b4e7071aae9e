//! Leading-heading extraction from Markdown documents.

use std::fs;
use std::path::Path;
use tracing::debug;

/// Return the first heading line of a Markdown file, or `None`.
///
/// `None` when the path does not exist, the extension is not exactly `md` or
/// `MD`, the file cannot be read, or no line contains the `"# "` marker. The
/// first occurrence of the marker is removed and the remainder returned
/// verbatim, so `## Section` yields `#Section`; the convention expects a
/// single top-level `# Title` line.
///
/// Read failures are recovered here (callers fall back to the file name);
/// they never abort a walk.
pub fn extract_title(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    let ext = path.extension()?.to_str()?;
    if ext != "md" && ext != "MD" {
        return None;
    }
    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "unreadable document; no title");
            return None;
        }
    };
    data.lines()
        .find(|line| line.contains("# "))
        .map(|line| line.replacen("# ", "", 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_heading_line_wins() {
        let td = tempdir().unwrap();
        let f = td.path().join("doc.md");
        fs::write(&f, "intro text\n# Real Title\n# Second Title\n").unwrap();
        assert_eq!(extract_title(&f).as_deref(), Some("Real Title"));
    }

    #[test]
    fn no_heading_yields_none() {
        let td = tempdir().unwrap();
        let f = td.path().join("doc.md");
        fs::write(&f, "just\nplain\nlines\n").unwrap();
        assert_eq!(extract_title(&f), None);
    }

    #[test]
    fn missing_path_yields_none() {
        assert_eq!(extract_title(Path::new("/definitely/not/here.md")), None);
    }

    #[test]
    fn non_markdown_extension_yields_none() {
        let td = tempdir().unwrap();
        let f = td.path().join("doc.txt");
        fs::write(&f, "# Title").unwrap();
        assert_eq!(extract_title(&f), None);
    }

    #[test]
    fn uppercase_md_extension_is_accepted() {
        let td = tempdir().unwrap();
        let f = td.path().join("doc.MD");
        fs::write(&f, "# Loud Title").unwrap();
        assert_eq!(extract_title(&f).as_deref(), Some("Loud Title"));
    }

    #[test]
    fn marker_removed_once_only() {
        let td = tempdir().unwrap();
        let f = td.path().join("doc.md");
        fs::write(&f, "## Nested\n").unwrap();
        // "## Nested" contains "# " at offset 1; only that occurrence goes.
        assert_eq!(extract_title(&f).as_deref(), Some("#Nested"));
    }

    #[test]
    fn crlf_lines_are_handled() {
        let td = tempdir().unwrap();
        let f = td.path().join("doc.md");
        fs::write(&f, "# Title\r\nbody\r\n").unwrap();
        assert_eq!(extract_title(&f).as_deref(), Some("Title"));
    }
}
