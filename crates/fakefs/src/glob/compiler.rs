//! Compiles glob patterns into matcher chains.

use crate::error::{FakeFsError, Result};
use crate::tree::{FakeTree, NodeId};

use super::matcher::Matcher;
use super::pattern::{expand, is_brace_group, path_components, split_outside_braces, GlobPattern};

/// Compiles `pattern` into an immutable matcher chain.
///
/// Components are processed last to first, each wrapping the chain built so
/// far, so the first component ends up as the outermost node. The chain is
/// stateless and reusable across trees. An empty pattern (no components)
/// is a syntax error.
pub fn build_matcher(pattern: &str) -> Result<Matcher> {
    build_onto(pattern, None)?.ok_or_else(|| FakeFsError::pattern_syntax(pattern))
}

/// Compiles `pattern` and runs it against `start` in one call.
pub fn glob(tree: &FakeTree, start: NodeId, pattern: &str) -> Result<Vec<NodeId>> {
    Ok(build_matcher(pattern)?.find(tree, start))
}

/// Builds the chain for `pattern` on top of an already-built descendant.
///
/// Brace alternatives re-enter here with the shared descendant so that
/// `{a,b}/c` applies `c` below both branches.
fn build_onto(pattern: &str, descendant: Option<Matcher>) -> Result<Option<Matcher>> {
    let mut matcher = descendant;
    for component in path_components(pattern).iter().rev() {
        matcher = Some(new_matcher(component, matcher)?);
    }
    Ok(matcher)
}

fn new_matcher(component: &str, descendant: Option<Matcher>) -> Result<Matcher> {
    // Recursive descent. In leaf position `**` degenerates to `*`: it
    // matches every non-hidden entry of the current directory.
    if component == "**" {
        return Ok(match descendant {
            None => Matcher::Name {
                pattern: GlobPattern::compile("*")?,
                descendant: None,
            },
            Some(inner) => Matcher::Recurse {
                descendant: Box::new(inner),
            },
        });
    }

    // A brace group spanning the whole component alternates whole
    // subpatterns, each of which may span several path components.
    if is_brace_group(component) {
        let branches = expand(component)
            .iter()
            .map(|alternative| build_onto(alternative, descendant.clone()))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        if branches.is_empty() {
            return Err(FakeFsError::pattern_syntax(component));
        }
        return Ok(Matcher::Alternate { branches });
    }

    // An embedded group whose alternatives cross a separator cannot compile
    // to a single-name expression; each reassembled alternative recompiles
    // as a full pattern instead.
    let alternatives = split_multidir_alternation(component)?;
    if alternatives.len() > 1 {
        log::debug!(
            "expanding multi-directory alternation '{}' into {} branches",
            component,
            alternatives.len()
        );
        let branches = alternatives
            .iter()
            .map(|alternative| build_onto(alternative, descendant.clone()))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        return Ok(Matcher::Alternate { branches });
    }

    Ok(Matcher::Name {
        pattern: GlobPattern::compile(component)?,
        descendant: descendant.map(Box::new),
    })
}

/// Splits a component around its first top-level brace group containing a
/// path separator.
///
/// `x{a/b,c/d}y` becomes `["xa/by", "xc/dy"]`: literal prefix, each
/// alternative (split on commas outside nested braces), literal suffix.
/// Components without such a group come back as a single element.
/// Unbalanced braces are a syntax error.
fn split_multidir_alternation(component: &str) -> Result<Vec<String>> {
    if !component.contains('{') {
        return Ok(vec![component.to_string()]);
    }

    let mut depth = 0i32;
    let mut group_start = None;
    for (i, c) in component.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    group_start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(FakeFsError::pattern_syntax(component));
                }
                depth -= 1;
                if depth == 0 {
                    if let Some(start) = group_start.take() {
                        let inner = &component[start + 1..i];
                        if inner.contains('/') {
                            let prefix = &component[..start];
                            let suffix = &component[i + 1..];
                            return Ok(split_outside_braces(inner, ',')
                                .into_iter()
                                .map(|alternative| format!("{prefix}{alternative}{suffix}"))
                                .collect());
                        }
                    }
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(FakeFsError::pattern_syntax(component));
    }
    Ok(vec![component.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_depth(matcher: &Matcher) -> usize {
        match matcher {
            Matcher::Name {
                descendant: Some(inner),
                ..
            } => 1 + chain_depth(inner),
            Matcher::Name {
                descendant: None, ..
            } => 1,
            Matcher::Recurse { descendant } => 1 + chain_depth(descendant),
            Matcher::Alternate { branches } => {
                1 + branches.iter().map(chain_depth).max().unwrap_or(0)
            }
        }
    }

    #[test]
    fn literal_pattern_builds_name_chain() {
        let matcher = build_matcher("a/b/c").unwrap();
        assert!(matches!(matcher, Matcher::Name { .. }));
        assert_eq!(chain_depth(&matcher), 3);
    }

    #[test]
    fn trailing_double_star_is_a_leaf() {
        let matcher = build_matcher("a/**").unwrap();
        let Matcher::Name {
            descendant: Some(leaf),
            ..
        } = &matcher
        else {
            panic!("expected name node at the chain root");
        };
        assert!(matches!(
            **leaf,
            Matcher::Name {
                descendant: None,
                ..
            }
        ));
    }

    #[test]
    fn inner_double_star_recurses() {
        let matcher = build_matcher("**/c").unwrap();
        assert!(matches!(matcher, Matcher::Recurse { .. }));
    }

    #[test]
    fn brace_component_alternates() {
        let matcher = build_matcher("{a,b}/c").unwrap();
        let Matcher::Alternate { branches } = &matcher else {
            panic!("expected alternation");
        };
        assert_eq!(branches.len(), 2);
        // Each branch carries the shared `c` descendant.
        for branch in branches {
            assert_eq!(chain_depth(branch), 2);
        }
    }

    #[test]
    fn multidir_group_splits_prefix_and_suffix() {
        let matcher = build_matcher("{a/b,c/d}tail").unwrap();
        let Matcher::Alternate { branches } = &matcher else {
            panic!("expected alternation");
        };
        assert_eq!(branches.len(), 2);
        // "a/btail" and "c/dtail" are two-component chains.
        for branch in branches {
            assert_eq!(chain_depth(branch), 2);
        }
    }

    #[test]
    fn split_reassembles_alternatives() {
        assert_eq!(
            split_multidir_alternation("x{a/b,c/d}y").unwrap(),
            ["xa/by", "xc/dy"]
        );
        assert_eq!(
            split_multidir_alternation("{a/{b,c},d/e}").unwrap(),
            ["a/{b,c}", "d/e"]
        );
        assert_eq!(split_multidir_alternation("{a,b}").unwrap(), ["{a,b}"]);
        assert_eq!(split_multidir_alternation("plain").unwrap(), ["plain"]);
    }

    #[test]
    fn unbalanced_braces_are_syntax_errors() {
        assert!(matches!(
            split_multidir_alternation("{a/b"),
            Err(FakeFsError::PatternSyntax { .. })
        ));
        assert!(matches!(
            split_multidir_alternation("a/b}x{"),
            Err(FakeFsError::PatternSyntax { .. })
        ));
        assert!(build_matcher("x{a/b").is_err());
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert!(matches!(
            build_matcher(""),
            Err(FakeFsError::PatternSyntax { .. })
        ));
        assert!(build_matcher("/").is_err());
    }

    #[test]
    fn empty_alternative_collapses_to_descendant() {
        // `{,sub}/x` matches both `x` and `sub/x`.
        let matcher = build_matcher("{,sub}/x").unwrap();
        let Matcher::Alternate { branches } = &matcher else {
            panic!("expected alternation");
        };
        assert_eq!(branches.len(), 2);
        assert_eq!(chain_depth(&branches[0]), 1);
        assert_eq!(chain_depth(&branches[1]), 2);
    }
}
