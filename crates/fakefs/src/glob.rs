//! Glob pattern compilation and matching.
//!
//! Shell-style patterns (`*`, `?`, `**`, brace alternation, nested and
//! multi-directory alternation) compile into immutable matcher chains that
//! walk the fake tree:
//! - Pattern algebra: component splitting and brace expansion
//! - Compiler: one chain node per path component, built leaf-first
//! - Matcher engine: plain, recursive-descent, and alternation nodes

mod compiler;
mod matcher;
mod pattern;

pub use compiler::{build_matcher, glob};
pub use matcher::Matcher;
pub use pattern::{expand, path_components, GlobPattern};
