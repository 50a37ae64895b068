//! Path-safe names derived from qualified Doxygen names.
//!
//! A qualified name such as `geo::Box< std::pair< int, int > >` is split on
//! `::` outside template brackets, template arguments are cut from every
//! segment (they become the template fingerprint), and each remaining
//! segment is sanitized for use in URLs and file names.

use sha2::{Digest, Sha256};

/// Split a qualified name on `::`, ignoring separators inside `<...>`.
pub fn split_scope(name: &str) -> Vec<&str> {
    let bytes = name.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&name[start..i]);
                start = i + 2;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&name[start..]);
    segments
}

/// Cut every top-level `<...>` run out of `segment`. Returns the bare name
/// and the removed text.
pub fn strip_template(segment: &str) -> (String, String) {
    let mut base = String::with_capacity(segment.len());
    let mut args = String::new();
    let mut depth = 0usize;
    for c in segment.chars() {
        match c {
            '<' => {
                depth += 1;
                args.push(c);
            }
            '>' if depth > 0 => {
                depth -= 1;
                args.push(c);
            }
            _ if depth > 0 => args.push(c),
            _ => base.push(c),
        }
    }
    (base.trim().to_string(), args)
}

/// Keep ASCII alphanumerics and `_ - . { }`; everything else becomes `-`.
pub fn sanitize_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        let keep = c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '{' | '}');
        let c = if keep { c } else { '-' };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

/// First 8 hex digits of the SHA-256 of `text`.
pub fn short_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Backslashes to `/`, no leading `./`, no repeated or trailing `/`.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut rest = unified.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    let absolute = rest.starts_with('/');
    let joined = rest
        .split('/')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

/// If `segment` names an anonymous namespace, the file it lives in.
///
/// Doxygen spells these `anonymous_namespace{file.cpp}` or, in older
/// releases, `@0`, `@1`, ... in which case the file comes from the
/// compound location.
pub fn anonymous_file(segment: &str, location_file: Option<&str>) -> Option<String> {
    if let Some(rest) = segment.strip_prefix("anonymous_namespace{") {
        return Some(rest.strip_suffix('}').unwrap_or(rest).to_string());
    }
    let numbered = segment
        .strip_prefix('@')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
    if numbered || segment.is_empty() {
        return Some(location_file.map(basename).unwrap_or("unknown").to_string());
    }
    None
}

/// Path form of a qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedPath {
    /// Sanitized path segments.
    pub segments: Vec<String>,
    /// Display segments, template arguments kept, anonymous namespaces
    /// shown as `anonymous{file}`.
    pub display: Vec<String>,
    /// Concatenated template arguments of all segments.
    pub fingerprint: String,
}

impl ScopedPath {
    pub fn new(qualified: &str, location_file: Option<&str>) -> ScopedPath {
        let raw = split_scope(qualified);
        let mut segments = Vec::with_capacity(raw.len());
        let mut display = Vec::with_capacity(raw.len());
        let mut fingerprint = String::new();
        for (i, segment) in raw.iter().enumerate() {
            if let Some(file) = anonymous_file(segment, location_file) {
                let prefix = raw[..=i].join("::");
                segments.push(format!("anonymous{{{}}}-{}", sanitize_file(&file), short_hash(&prefix)));
                display.push(format!("anonymous{{{}}}", file));
                continue;
            }
            let (base, args) = strip_template(segment);
            fingerprint.push_str(&args);
            segments.push(sanitize_segment(&base));
            display.push(segment.trim().to_string());
        }
        ScopedPath {
            segments,
            display,
            fingerprint,
        }
    }

    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn display_name(&self) -> String {
        self.display.join("::")
    }

    pub fn last_display(&self) -> &str {
        self.display.last().map(String::as_str).unwrap_or("")
    }
}

/// File names inside `anonymous{...}` keep their dots.
fn sanitize_file(file: &str) -> String {
    sanitize_segment(file).replace(|c: char| c == '{' || c == '}', "-")
}

/// `include/geo/shape.h` -> `include/geo/shape-h`.
pub fn file_path(path: &str) -> String {
    let normalized = normalize_path(path);
    let mut parts: Vec<String> = normalized
        .split('/')
        .filter(|p| !p.is_empty())
        .map(sanitize_segment)
        .collect();
    if let Some(last) = parts.last_mut() {
        *last = sanitize_segment(&last.replace('.', "-"));
    }
    if parts.is_empty() {
        parts.push("unnamed".to_string());
    }
    parts.join("/")
}

/// `include/geo` -> `include/geo`, each segment sanitized.
pub fn folder_path(path: &str) -> String {
    let normalized = normalize_path(path);
    let parts: Vec<String> = normalized
        .split('/')
        .filter(|p| !p.is_empty())
        .map(sanitize_segment)
        .collect();
    if parts.is_empty() {
        "unnamed".to_string()
    } else {
        parts.join("/")
    }
}

/// Flatten a permalink into a page identifier:
/// `classes/geo/Widget` -> `classes/geo-Widget`.
pub fn page_id(permalink: &str) -> String {
    match permalink.split_once('/') {
        Some((collection, rest)) => format!("{}/{}", collection, rest.replace('/', "-")),
        None => permalink.to_string(),
    }
}
