//! Naming rules for uploaded attachments.
//!
//! Files are stored flat in one directory as `<millis>-<original-name>` and
//! exposed to browsers under [`PUBLIC_PREFIX`].

/// URL prefix the upload directory is served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Upper bound on files accepted by a single create request.
pub const DEFAULT_MAX_FILES: usize = 10;

/// Characters that would end or re-encode the path part of a URL.
const URL_DELIMITERS: [char; 3] = ['#', '?', '%'];

/// Name used when the client sends no usable file name.
const FALLBACK_NAME: &str = "upload";

/// Build the on-disk file name for an upload received at `now_millis`.
///
/// Directory components are stripped from `original`. URL delimiters
/// (`#`, `?`, `%`) and every run of whitespace become a single `-`, so the
/// public path can be requested verbatim.
pub fn stored_file_name(now_millis: i64, original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .split(|c: char| c.is_whitespace() || URL_DELIMITERS.contains(&c))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let base = if base.is_empty() || base == "." || base == ".." {
        FALLBACK_NAME.to_string()
    } else {
        base
    };

    format!("{now_millis}-{base}")
}

/// Public path for a stored file, e.g. `/uploads/1700000000000-cv.pdf`.
pub fn public_path(file_name: &str) -> String {
    format!("{PUBLIC_PREFIX}/{file_name}")
}

/// Recover the stored file name from a public path.
///
/// Returns `None` for paths outside [`PUBLIC_PREFIX`] or anything that
/// would escape the upload directory.
pub fn file_name_from_public_path(path: &str) -> Option<&str> {
    let name = path
        .strip_prefix(PUBLIC_PREFIX)?
        .strip_prefix('/')?;

    let safe = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\']);

    safe.then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_becomes_dashes() {
        assert_eq!(
            stored_file_name(1_700, "my  holiday photo.png"),
            "1700-my-holiday-photo.png"
        );
    }

    #[test]
    fn url_delimiters_are_replaced() {
        assert_eq!(stored_file_name(3, "a#b.png"), "3-a-b.png");
        assert_eq!(stored_file_name(3, "cv?v=2 final.pdf"), "3-cv-v=2-final.pdf");
        assert_eq!(stored_file_name(3, "100%.txt"), "3-100-.txt");
        assert_eq!(stored_file_name(3, "#?%"), "3-upload");
    }

    #[test]
    fn directories_are_stripped() {
        assert_eq!(stored_file_name(5, "../../etc/passwd"), "5-passwd");
        assert_eq!(stored_file_name(5, "C:\\Users\\ann\\cv.pdf"), "5-cv.pdf");
    }

    #[test]
    fn empty_name_uses_fallback() {
        assert_eq!(stored_file_name(9, ""), "9-upload");
        assert_eq!(stored_file_name(9, "   "), "9-upload");
        assert_eq!(stored_file_name(9, "dir/.."), "9-upload");
    }

    #[test]
    fn public_path_round_trips() {
        let name = stored_file_name(42, "a b.jpg");
        let path = public_path(&name);
        assert_eq!(path, "/uploads/42-a-b.jpg");
        assert_eq!(file_name_from_public_path(&path), Some(name.as_str()));
    }

    #[test]
    fn foreign_or_traversing_paths_are_rejected() {
        assert_eq!(file_name_from_public_path("/static/x.png"), None);
        assert_eq!(file_name_from_public_path("/uploads/"), None);
        assert_eq!(file_name_from_public_path("/uploads/../secret"), None);
        assert_eq!(file_name_from_public_path("/uploads/a/b.png"), None);
        assert_eq!(file_name_from_public_path("/uploadsx/b.png"), None);
    }
}
