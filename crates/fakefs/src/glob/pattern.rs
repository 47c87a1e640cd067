//! Pure string-level pattern algebra.
//!
//! Everything here is a side-effect-free transform over a glob pattern
//! string. Brace nesting is always tracked with a single forward scan that
//! increments depth on `{` and decrements on `}`; braces nest arbitrarily
//! deep, so no fixed regex can do this job.

use regex::Regex;

use crate::error::{FakeFsError, Result};

/// Splits a pattern on `/`, but only outside brace groups.
///
/// A separator inside any brace group stays in its component, which is what
/// lets `{a/b,c/d}` travel as a single component. The empty component from
/// a leading root `/` is dropped, as are all other empty components.
pub fn path_components(pattern: &str) -> Vec<String> {
    let mut part = String::new();
    let mut parts = Vec::new();
    let mut depth = 0i32;

    for c in pattern.chars() {
        if depth == 0 && c == '/' {
            parts.push(std::mem::take(&mut part));
        } else {
            part.push(c);
        }
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
    }
    parts.push(part);
    parts.retain(|p| !p.is_empty());
    parts
}

/// Returns true if `pattern` is exactly one balanced brace group spanning
/// its entire text.
pub(crate) fn is_brace_group(pattern: &str) -> bool {
    if !pattern.starts_with('{') || !pattern.ends_with('}') {
        return false;
    }
    let mut depth = 0i32;
    for (i, c) in pattern.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth <= 0 {
                    // The opening brace may only close at the very end.
                    return depth == 0 && i == pattern.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// Expands a top-level brace alternation into its alternatives.
///
/// If the whole pattern is one balanced brace group, its contents are split
/// on commas at depth 1 relative to that group (nested braces are never
/// split) and returned left to right. Any other shape comes back unchanged
/// as a single alternative.
pub fn expand(pattern: &str) -> Vec<String> {
    if !is_brace_group(pattern) {
        return vec![pattern.to_string()];
    }
    split_outside_braces(&pattern[1..pattern.len() - 1], ',')
}

/// Splits `text` on `sep` occurrences that sit outside any brace group.
pub(crate) fn split_outside_braces(text: &str, sep: char) -> Vec<String> {
    let mut part = String::new();
    let mut parts = Vec::new();
    let mut depth = 0i32;

    for c in text.chars() {
        if depth == 0 && c == sep {
            parts.push(std::mem::take(&mut part));
        } else {
            part.push(c);
        }
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
    }
    parts.push(part);
    parts
}

/// A single path component compiled to an anchored match expression.
///
/// Hidden-entry suppression is carried as an explicit flag rather than a
/// lookahead inside the regex: a component opening with `*` or `?` must not
/// match names that start with a dot, while a component that spells out the
/// leading dot (or anything else) matches whatever its expression says.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    regex: Regex,
    reject_hidden: bool,
}

impl GlobPattern {
    /// Compiles one path component into a full-string match expression.
    ///
    /// `?` matches exactly one character, `*` zero or more; `. + ( ) $` are
    /// escaped; brace groups resolve innermost-first into `(a|b)`
    /// alternations. Unresolvable braces surface as `PatternSyntax`.
    pub fn compile(component: &str) -> Result<Self> {
        let body = resolve_brace_groups(translate_component(component));
        let regex = Regex::new(&format!(r"\A{body}\z"))
            .map_err(|_| FakeFsError::pattern_syntax(component))?;
        let reject_hidden = matches!(component.as_bytes().first(), Some(b'*' | b'?'));
        Ok(Self {
            regex,
            reject_hidden,
        })
    }

    /// Tests a candidate entry name against the component.
    pub fn is_match(&self, name: &str) -> bool {
        if self.reject_hidden && name.starts_with('.') {
            return false;
        }
        self.regex.is_match(name)
    }
}

/// Escapes regex metacharacters and translates the glob wildcards.
fn translate_component(component: &str) -> String {
    let mut body = String::with_capacity(component.len() * 2);
    for c in component.chars() {
        match c {
            '.' | '+' | '(' | ')' | '$' => {
                body.push('\\');
                body.push(c);
            }
            '?' => body.push('.'),
            '*' => body.push_str(".*"),
            c => body.push(c),
        }
    }
    body
}

/// Rewrites brace groups into parenthesized alternations, innermost first.
///
/// The first `}` in the body closes the innermost group, so pairing it with
/// the nearest `{` before it and looping terminates even for deep nesting.
/// Stray braces are left in place for the regex parser to accept or reject.
fn resolve_brace_groups(mut body: String) -> String {
    loop {
        let Some(close) = body.find('}') else {
            return body;
        };
        let Some(open) = body[..close].rfind('{') else {
            return body;
        };
        let alternation = format!("({})", body[open + 1..close].replace(',', "|"));
        body.replace_range(open..=close, &alternation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_split_on_separators() {
        assert_eq!(path_components("a/b/c"), ["a", "b", "c"]);
        assert_eq!(path_components("/a/b"), ["a", "b"]);
        assert_eq!(path_components("a//b/"), ["a", "b"]);
        assert_eq!(path_components("/"), Vec::<String>::new());
        assert_eq!(path_components(""), Vec::<String>::new());
    }

    #[test]
    fn components_keep_braced_separators() {
        assert_eq!(path_components("a/{b,c/d}/e"), ["a", "{b,c/d}", "e"]);
        assert_eq!(path_components("{a/{b/c,d}}"), ["{a/{b/c,d}}"]);
    }

    #[test]
    fn expand_splits_top_level_alternatives() {
        assert_eq!(expand("{a,b,c}"), ["a", "b", "c"]);
        assert_eq!(expand("{a,{b,c},d}"), ["a", "{b,c}", "d"]);
        assert_eq!(expand("{a/b,c/d}"), ["a/b", "c/d"]);
        assert_eq!(expand("{,a}"), ["", "a"]);
    }

    #[test]
    fn expand_passes_through_non_groups() {
        assert_eq!(expand("plain"), ["plain"]);
        assert_eq!(expand("a{b,c}"), ["a{b,c}"]);
        assert_eq!(expand("{a}{b}"), ["{a}{b}"]);
        assert_eq!(expand("{a,b"), ["{a,b"]);
    }

    #[test]
    fn brace_group_detection() {
        assert!(is_brace_group("{a,b}"));
        assert!(is_brace_group("{a,{b,c}}"));
        assert!(!is_brace_group("{a},{b}"));
        assert!(!is_brace_group("x{a,b}"));
        assert!(!is_brace_group("{a,b}x"));
        assert!(!is_brace_group("{unclosed"));
    }

    #[test]
    fn literal_components_match_exactly() {
        let p = GlobPattern::compile("file.txt").unwrap();
        assert!(p.is_match("file.txt"));
        assert!(!p.is_match("fileAtxt"));
        assert!(!p.is_match("file.txt.bak"));
        assert!(!p.is_match("afile.txt"));
    }

    #[test]
    fn metacharacters_are_escaped() {
        let p = GlobPattern::compile("a+b(c)$").unwrap();
        assert!(p.is_match("a+b(c)$"));
        assert!(!p.is_match("aab(c)$"));
    }

    #[test]
    fn question_mark_matches_one_character() {
        let p = GlobPattern::compile("a?c").unwrap();
        assert!(p.is_match("abc"));
        assert!(p.is_match("a.c"));
        assert!(!p.is_match("ac"));
        assert!(!p.is_match("abbc"));
    }

    #[test]
    fn star_matches_any_run() {
        let p = GlobPattern::compile("*.rs").unwrap();
        assert!(p.is_match("main.rs"));
        assert!(p.is_match("a.b.rs"));
        assert!(!p.is_match("main.rb"));
        // Leading-wildcard patterns never reach dotfiles.
        assert!(!p.is_match(".rs"));
    }

    #[test]
    fn braces_become_alternations() {
        let p = GlobPattern::compile("{a,b}.txt").unwrap();
        assert!(p.is_match("a.txt"));
        assert!(p.is_match("b.txt"));
        assert!(!p.is_match("c.txt"));

        let nested = GlobPattern::compile("{a,{b,c}d}").unwrap();
        assert!(nested.is_match("a"));
        assert!(nested.is_match("bd"));
        assert!(nested.is_match("cd"));
        assert!(!nested.is_match("d"));
    }

    #[test]
    fn hidden_entries_are_suppressed_for_wildcard_lead() {
        let star = GlobPattern::compile("*").unwrap();
        assert!(star.is_match("visible"));
        assert!(!star.is_match(".hidden"));

        let question = GlobPattern::compile("?a").unwrap();
        assert!(question.is_match("ba"));
        assert!(!question.is_match(".a"));

        let dotted = GlobPattern::compile(".*").unwrap();
        assert!(dotted.is_match(".hidden"));

        // A brace alternative spelling the dot out is allowed through.
        let braced = GlobPattern::compile("{.a,b}").unwrap();
        assert!(braced.is_match(".a"));
        assert!(braced.is_match("b"));
    }

    #[test]
    fn unbalanced_open_brace_fails_compilation() {
        // `{` with no partner reaches the regex parser as a bare
        // quantifier opener, which it rejects.
        assert!(GlobPattern::compile("a{b").is_err());
    }
}
