//! Enumeration of `@import` statements and the names they bring in.

use std::collections::HashSet;

use super::exportable::collect_exportables;
use crate::tree::{walk, Import, Node, NodeData, TreeResult, WalkAction, WalkOptions};

/// An `@import` statement found in a tree.
#[derive(Debug, Clone, Copy)]
pub struct ImportSite<'a> {
    pub node: &'a Node,
    pub import: &'a Import,
}

impl<'a> ImportSite<'a> {
    /// Source offset of the statement, in less.js units.
    pub fn index(&self) -> Option<usize> {
        self.node.index
    }

    /// The path as written, e.g. `./mixins` or `theme.less`.
    pub fn path(&self) -> &'a str {
        self.import.path_text().unwrap_or("")
    }

    pub fn is_reference(&self) -> bool {
        self.import.options.reference
    }

    /// The imported file's tree, if less.js resolved and parsed it.
    pub fn resolved_root(&self) -> Option<&'a Node> {
        self.import.root.as_deref()
    }

    /// Where less.js found the imported file.
    pub fn imported_filename(&self) -> Option<&'a str> {
        self.import.imported_filename.as_deref()
    }
}

/// An import together with the exportable names of its resolved tree.
#[derive(Debug, Clone)]
pub struct AvailableImport<'a> {
    pub site: ImportSite<'a>,
    pub names: HashSet<String>,
    /// False for imports less.js does not parse (plain CSS, `(inline)`,
    /// `url(...)`). Their contents are unknown, so `names` is empty.
    pub resolved: bool,
}

/// Collects every import under `root`, in document order.
///
/// Imports nested in rulesets or media blocks are included; imports made by
/// the imported files themselves are not.
pub fn collect_imports(root: &Node) -> Vec<ImportSite<'_>> {
    let mut sites = Vec::new();
    walk(root, WalkOptions::default(), |node| {
        if let NodeData::Import(import) = &node.data {
            sites.push(ImportSite { node, import });
        }
        WalkAction::Continue
    });
    sites
}

/// Pairs each import under `root` with the names its resolved tree exports.
pub fn collect_available_imports(root: &Node) -> TreeResult<Vec<AvailableImport<'_>>> {
    collect_imports(root)
        .into_iter()
        .map(|site| match site.resolved_root() {
            Some(imported) => Ok(AvailableImport {
                site,
                names: collect_exportables(imported)?,
                resolved: true,
            }),
            None => Ok(AvailableImport {
                site,
                names: HashSet::new(),
                resolved: false,
            }),
        })
        .collect()
}
