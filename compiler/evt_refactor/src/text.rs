//! Plain-text matching for replace and search.
//!
//! No parsing is involved: parameters are matched as raw text whatever
//! their declared kind.
//!
//! # Case-insensitive matching
//!
//! Positions are found in uppercased copies of the haystack and the needle,
//! then applied to the original text, so everything outside a match keeps
//! its casing. Uppercasing is done character by character and a character
//! is left as is when its uppercase form would have a different UTF-8
//! length (`ß` → `SS`, for instance). Byte offsets in a folded copy are
//! therefore always valid offsets in the original.

/// Uppercase `text` without changing the byte offset of any character.
pub fn fold_case(text: &str) -> String {
    if text.is_ascii() {
        return text.to_ascii_uppercase();
    }
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        let mut upper = c.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) if u.len_utf8() == c.len_utf8() => folded.push(u),
            _ => folded.push(c),
        }
    }
    folded
}

/// A needle prepared for repeated matching.
#[derive(Clone, Debug)]
pub struct TextPattern {
    /// The needle, already folded when matching ignores case.
    needle: String,
    match_case: bool,
}

impl TextPattern {
    pub fn new(needle: &str, match_case: bool) -> Self {
        let needle = if match_case {
            needle.to_owned()
        } else {
            fold_case(needle)
        };
        TextPattern { needle, match_case }
    }

    /// An empty needle matches nothing.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether the needle occurs in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.match_case {
            haystack.contains(self.needle.as_str())
        } else {
            fold_case(haystack).contains(self.needle.as_str())
        }
    }

    /// Replace every non-overlapping occurrence, left to right.
    ///
    /// Scanning resumes after each match in the original text, so
    /// `replacement` itself is never scanned. Returns `None` when nothing
    /// matched.
    pub fn replace_all(&self, haystack: &str, replacement: &str) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        if self.match_case {
            return haystack
                .contains(self.needle.as_str())
                .then(|| haystack.replace(self.needle.as_str(), replacement));
        }

        let folded = fold_case(haystack);
        let mut matches = folded.match_indices(self.needle.as_str()).peekable();
        matches.peek()?;

        let mut out = String::with_capacity(haystack.len());
        let mut last = 0;
        for (start, matched) in matches {
            out.push_str(&haystack[last..start]);
            out.push_str(replacement);
            last = start + matched.len();
        }
        out.push_str(&haystack[last..]);
        Some(out)
    }
}

/// Replace all occurrences of `needle` in `haystack`.
///
/// Returns `haystack` unchanged when `needle` is empty or absent.
pub fn replace_all(haystack: &str, needle: &str, replacement: &str, match_case: bool) -> String {
    TextPattern::new(needle, match_case)
        .replace_all(haystack, replacement)
        .unwrap_or_else(|| haystack.to_owned())
}
