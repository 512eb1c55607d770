//! Request path sanitisation.
//!
//! # Design Decisions
//! - Purely lexical, the filesystem is never consulted
//! - A rooted path can never climb above `/`, so joining the result onto the
//!   content root stays inside it

use percent_encoding::percent_decode_str;

/// Derive the path used to resolve a request against the content root.
///
/// The URI path is percent-decoded, forced to start with `/` and cleaned.
/// Callers must use the returned value; the request itself is left as is.
pub fn sanitise_path(uri_path: &str) -> String {
    let decoded = percent_decode_str(uri_path).decode_utf8_lossy();
    if decoded.starts_with('/') {
        clean(&decoded)
    } else {
        clean(&format!("/{}", decoded))
    }
}

/// Shortest lexically equivalent path.
///
/// Collapses repeated separators, drops `.` segments and resolves `..`
/// against the preceding segment. `..` at the root of a rooted path is
/// dropped. Trailing slashes are removed except for the root itself; an
/// empty result becomes `.` (or `/` if rooted).
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
