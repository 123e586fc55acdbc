//! Depth-first traversal over the syntax tree.
//!
//! Two primitives are provided: [`walk`] (pre-order, unrestricted depth, with
//! early exit) and [`for_each_top_level_child`] (exactly one level below a
//! scope). Symbol extraction picks whichever matches the scoping rule it needs.

use super::types::{Node, NodeData};

/// What the walker should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    /// Descend into the node's children.
    Continue,
    /// Do not descend into this node's children, but keep walking.
    SkipChildren,
    /// Stop the walk immediately.
    Stop,
}

/// Options for [`walk`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Descend into the trees of imported files. Off by default: imported files
    /// should be analysed on their own.
    pub walk_imports: bool,
}

/// Walks `root` in pre-order, calling `visit` on every node.
///
/// Import nodes are visited, but their children (path, media features, and
/// the imported tree) are only walked when `options.walk_imports` is set.
///
/// Returns `true` when `visit` stopped the walk.
pub fn walk<'a, F>(root: &'a Node, options: WalkOptions, mut visit: F) -> bool
where
    F: FnMut(&'a Node) -> WalkAction,
{
    let mut stack = vec![root];
    let mut visited = 0usize;

    while let Some(node) = stack.pop() {
        visited += 1;
        match visit(node) {
            WalkAction::Stop => {
                tracing::trace!(visited, "walk stopped early");
                return true;
            }
            WalkAction::SkipChildren => continue,
            WalkAction::Continue => {}
        }

        if !options.walk_imports && matches!(node.data, NodeData::Import(_)) {
            continue;
        }

        // Reversed so the first child is popped first.
        stack.extend(node.children().into_iter().rev());
    }

    tracing::trace!(visited, "walk finished");
    false
}

/// Visits every node under `root` (imports not entered).
pub fn walk_all<'a, F>(root: &'a Node, mut visit: F)
where
    F: FnMut(&'a Node),
{
    walk(root, WalkOptions::default(), |node| {
        visit(node);
        WalkAction::Continue
    });
}

/// Visits the direct children of `scope`, and nothing below them.
pub fn for_each_top_level_child<'a, F>(scope: &'a Node, mut visit: F)
where
    F: FnMut(&'a Node),
{
    for child in scope.children() {
        visit(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build::*;
    use crate::tree::NodeKind;

    fn sample() -> Node {
        root(vec![
            import("./colors", Some(root(vec![var_decl("@brand", anonymous("red"))])), true),
            ruleset(
                &["body"],
                vec![property("color", value(vec![variable("@brand")]))],
            ),
        ])
    }

    fn kinds_visited(node: &Node, options: WalkOptions) -> Vec<NodeKind> {
        let mut kinds = Vec::new();
        walk(node, options, |n| {
            kinds.push(n.kind());
            WalkAction::Continue
        });
        kinds
    }

    #[test]
    fn test_walk_is_pre_order() {
        let kinds = kinds_visited(&sample(), WalkOptions::default());
        assert_eq!(
            kinds,
            vec![
                NodeKind::Ruleset,
                NodeKind::Import,
                NodeKind::Ruleset,
                NodeKind::Selector,
                NodeKind::Element,
                NodeKind::Combinator,
                NodeKind::Declaration,
                NodeKind::Keyword,
                NodeKind::Value,
                NodeKind::Expression,
                NodeKind::Variable,
            ]
        );
    }

    #[test]
    fn test_walk_skips_imported_tree_by_default() {
        let kinds = kinds_visited(&sample(), WalkOptions::default());
        assert_eq!(kinds.iter().filter(|k| **k == NodeKind::Quoted).count(), 0);
        assert!(!kinds.contains(&NodeKind::Anonymous));
    }

    #[test]
    fn test_walk_can_enter_imports() {
        let kinds = kinds_visited(&sample(), WalkOptions { walk_imports: true });
        assert!(kinds.contains(&NodeKind::Quoted));
        assert!(kinds.contains(&NodeKind::Anonymous));
        // root, imported root, body
        assert_eq!(kinds.iter().filter(|k| **k == NodeKind::Ruleset).count(), 3);
    }

    #[test]
    fn test_walk_stops_early() {
        let tree = sample();
        let mut seen = 0;
        let found = walk(&tree, WalkOptions::default(), |node| {
            seen += 1;
            if node.kind() == NodeKind::Selector {
                WalkAction::Stop
            } else {
                WalkAction::Continue
            }
        });
        assert!(found);
        assert_eq!(seen, 4);
    }

    #[test]
    fn test_walk_without_match_returns_false() {
        let found = walk(&sample(), WalkOptions::default(), |_| WalkAction::Continue);
        assert!(!found);
    }

    #[test]
    fn test_skip_children_prunes_subtree() {
        let tree = sample();
        let mut kinds = Vec::new();
        walk(&tree, WalkOptions::default(), |node| {
            kinds.push(node.kind());
            if node.kind() == NodeKind::Declaration {
                WalkAction::SkipChildren
            } else {
                WalkAction::Continue
            }
        });
        assert!(kinds.contains(&NodeKind::Declaration));
        assert!(!kinds.contains(&NodeKind::Variable));
    }

    #[test]
    fn test_top_level_children_only() {
        let tree = root(vec![
            var_decl("@a", anonymous("1")),
            mixin_definition(".outer", vec![var_decl("@inner", anonymous("2"))]),
        ]);
        let mut kinds = Vec::new();
        for_each_top_level_child(&tree, |node| kinds.push(node.kind()));
        assert_eq!(kinds, vec![NodeKind::Declaration, NodeKind::MixinDefinition]);
    }
}
