//! Merge engine
//!
//! Reconciles two declarations of the same block. The policy is lenient and
//! lossy on conflicts:
//!
//! - a child missing from the destination is moved over
//! - container against leaf: the container wins and the leaf's scalar is dropped
//! - container against container: recurse
//! - leaf against leaf: the first one is kept, unless either is a switch,
//!   in which case the later directive replaces it

use crate::token::Token;
use tracing::debug;

/// Fold `src` into `dst`.
///
/// Returns `false` without touching `dst` when the two are not the same
/// declaration or when neither side is a block. A `true` result means `src`
/// has been absorbed and must not be inserted as a separate sibling.
pub fn merge(dst: &mut Token, src: Token) -> bool {
    if !dst.same_declaration(&src) {
        return false;
    }

    if !dst.is_block() && !src.is_block() {
        return false;
    }

    if src.container {
        dst.container = true;
    }

    for child in src.children {
        adopt(dst, child);
    }

    true
}

/// Attach `child` under `parent`, reconciling it with an existing sibling of
/// the same identity.
///
/// Returns `true` when a sibling with that identity already existed.
pub fn adopt(parent: &mut Token, child: Token) -> bool {
    let Some(idx) = parent.children.iter().position(|c| c.same_identity(&child)) else {
        parent.push_child(child);
        return false;
    };
    let existing = &mut parent.children[idx];

    match (existing.is_block(), child.is_block()) {
        (true, true) => {
            if !existing.same_declaration(&child) {
                debug!(identity = %child.identity(), "declaration mismatch, keeping first block");
            } else {
                merge(existing, child);
            }
        }
        (false, true) => *existing = child,
        (true, false) => {
            debug!(identity = %child.identity(), "leaf shadowed by container, dropped");
        }
        (false, false) => {
            if existing.switch || child.switch {
                *existing = child;
            } else {
                debug!(identity = %child.identity(), "duplicate leaf dropped");
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> Token {
        Token::container("system", None, 4)
            .with_child(Token::leaf("name", "PE1", 8))
            .with_child(
                Token::container("netconf", None, 8).with_child(Token::switch("shutdown", true, 12)),
            )
    }

    #[test]
    fn test_merge_requires_same_declaration() {
        let mut dst = system();
        let src = Token::container("system", None, 0);
        assert!(!merge(&mut dst, src));

        let src = Token::container("router", Some("Base".into()), 4);
        assert!(!merge(&mut dst, src));
        assert_eq!(dst, system());
    }

    #[test]
    fn test_merge_identical_container_is_idempotent() {
        let mut dst = system();
        assert!(merge(&mut dst, system()));
        assert_eq!(dst, system());
    }

    #[test]
    fn test_merge_identical_leaf_reports_nothing() {
        let mut dst = Token::leaf("config-backup", "5", 8);
        assert!(!merge(&mut dst, Token::leaf("config-backup", "5", 8)));
        assert_eq!(dst, Token::leaf("config-backup", "5", 8));
    }

    #[test]
    fn test_merge_adds_missing_children() {
        let mut dst = system();
        let src = Token::container("system", None, 4).with_child(Token::leaf("location", "site 1", 8));

        assert!(merge(&mut dst, src));
        let ids: Vec<String> = dst.children().iter().map(Token::identity).collect();
        assert_eq!(ids, vec!["name PE1", "netconf", "location site 1"]);
    }

    #[test]
    fn test_merge_recurses_into_containers() {
        let mut dst = system();
        let src = Token::container("system", None, 4).with_child(
            Token::container("netconf", None, 8).with_child(Token::new("listen", None, 12)),
        );

        assert!(merge(&mut dst, src));
        let netconf = dst.child("netconf").unwrap();
        assert_eq!(netconf.children().len(), 2);
        assert!(netconf.child("listen").is_some());
    }

    #[test]
    fn test_container_beats_leaf() {
        let mut dst = Token::container("system", None, 4).with_child(Token::new("field", None, 8));
        let src = Token::container("system", None, 4)
            .with_child(Token::new("field", None, 8).with_child(Token::leaf("inner", "1", 12)));

        assert!(merge(&mut dst, src));
        let field = dst.child("field").unwrap();
        assert!(field.is_block());
        assert_eq!(field.children().len(), 1);

        // and the other way round the container stays
        let src = Token::container("system", None, 4).with_child(Token::new("field", None, 8));
        assert!(merge(&mut dst, src));
        assert!(dst.child("field").unwrap().is_block());
    }

    #[test]
    fn test_switch_keeps_last_directive() {
        let mut dst = system();
        let src = Token::container("system", None, 4).with_child(
            Token::container("netconf", None, 8).with_child(Token::switch("shutdown", false, 12)),
        );

        assert!(merge(&mut dst, src));
        let shutdown = dst.child("netconf").unwrap().child("shutdown").unwrap();
        assert_eq!(shutdown.value(), Some("no"));
    }

    #[test]
    fn test_adopt_plain_leaf_and_switch() {
        let mut parent = Token::container("md-cli", None, 16);
        assert!(!adopt(&mut parent, Token::new("auto-config-save", None, 20)));
        assert!(adopt(&mut parent, Token::switch("auto-config-save", false, 20)));

        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.children()[0].value(), Some("no"));
    }
}
