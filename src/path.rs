use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use std::str::Utf8Error;

#[derive(Debug, PartialEq, Eq)]
pub struct Resolved {
    pub fs_path: PathBuf,
    /// Percent-decoded request path, for display.
    pub decoded: String,
    pub trailing_slash: bool,
}

/// Map a request path onto the filesystem under `root`.
///
/// Empty, `.` and `..` segments are dropped rather than interpreted,
/// so the result can never name anything outside of `root`.
pub fn resolve(root: &Path, uri_path: &str) -> Result<Resolved, Utf8Error> {
    let decoded = percent_decode_str(uri_path).decode_utf8()?.into_owned();

    let mut fs_path = root.to_path_buf();
    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." || has_separator(segment) {
            continue;
        }
        fs_path.push(segment);
    }

    Ok(Resolved {
        fs_path,
        trailing_slash: decoded.ends_with('/'),
        decoded,
    })
}

fn has_separator(segment: &str) -> bool {
    segment.chars().any(std::path::is_separator)
        || Path::new(segment)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/www")
    }

    #[test]
    fn plain_file() {
        let r = resolve(&root(), "/css/site.css").unwrap();
        assert_eq!(r.fs_path, root().join("css").join("site.css"));
        assert_eq!(r.decoded, "/css/site.css");
        assert!(!r.trailing_slash);
    }

    #[test]
    fn root_path() {
        let r = resolve(&root(), "/").unwrap();
        assert_eq!(r.fs_path, root());
        assert!(r.trailing_slash);
    }

    #[test]
    fn traversal_is_dropped() {
        let r = resolve(&root(), "/../../etc/passwd").unwrap();
        assert_eq!(r.fs_path, root().join("etc").join("passwd"));

        let r = resolve(&root(), "/a/./b/../c").unwrap();
        assert_eq!(r.fs_path, root().join("a").join("b").join("c"));
    }

    #[test]
    fn encoded_traversal_is_dropped() {
        let r = resolve(&root(), "/%2e%2e/%2E%2E/secret").unwrap();
        assert_eq!(r.fs_path, root().join("secret"));
    }

    #[test]
    fn percent_decoding() {
        let r = resolve(&root(), "/my%20file.txt").unwrap();
        assert_eq!(r.fs_path, root().join("my file.txt"));
        assert_eq!(r.decoded, "/my file.txt");
    }

    #[test]
    fn duplicate_slashes_collapse() {
        let r = resolve(&root(), "//a///b/").unwrap();
        assert_eq!(r.fs_path, root().join("a").join("b"));
        assert!(r.trailing_slash);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert!(resolve(&root(), "/%ff%fe").is_err());
    }
}
