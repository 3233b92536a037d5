//! Endpoint construction
//!
//! The API requires a trailing slash on collection and singular resource URLs
//! for create, read and delete. Update keeps the un-slashed form.

/// Lexically clean a slash separated path.
///
/// Collapses repeated slashes, drops `.` segments, resolves `..` against the
/// preceding segment and strips any trailing slash. A rooted path never
/// climbs above `/`; an empty result becomes `.` (or `/` when rooted).
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Collection endpoint used for create: `<endpoint>/`
pub fn collection(endpoint: &str) -> String {
    with_trailing_slash(clean(endpoint))
}

/// Singular resource endpoint used for read and delete: `<endpoint>/<id>/`
pub fn item(endpoint: &str, id: i64) -> String {
    with_trailing_slash(clean(&format!("{}/{}", endpoint, id)))
}

/// Singular resource endpoint used for update: `<endpoint>/<id>`
pub fn item_without_slash(endpoint: &str, id: i64) -> String {
    format!("{}/{}", clean(endpoint).trim_end_matches('/'), id)
}

fn with_trailing_slash(mut path: String) -> String {
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        let cases = [
            ("", "."),
            ("/", "/"),
            ("//", "/"),
            ("/api/v2/credentials/", "/api/v2/credentials"),
            ("/api//v2/./credentials", "/api/v2/credentials"),
            ("/api/v2/../v1", "/api/v1"),
            ("/..", "/"),
            ("a/../..", ".."),
            ("a/./b/", "a/b"),
            ("./", "."),
        ];
        for (input, expected) in cases {
            assert_eq!(clean(input), expected, "clean({:?})", input);
        }
    }

    #[test]
    fn test_collection_has_trailing_slash() {
        assert_eq!(collection("/api/v2/credentials/"), "/api/v2/credentials/");
        assert_eq!(collection("/api/v2/credentials"), "/api/v2/credentials/");
        assert_eq!(collection("/"), "/");
    }

    #[test]
    fn test_item_has_trailing_slash() {
        assert_eq!(item("/api/v2/credentials/", 7), "/api/v2/credentials/7/");
        assert_eq!(item("/", 1), "/1/");
    }

    #[test]
    fn test_update_item_has_no_trailing_slash() {
        assert_eq!(
            item_without_slash("/api/v2/credentials/", 7),
            "/api/v2/credentials/7"
        );
        assert_eq!(item_without_slash("/", 1), "/1");
    }
}
