//! Detection of imports that contribute nothing to a file.

use super::importable::collect_importables;
use super::imports::{collect_available_imports, ImportSite};
use crate::tree::{Node, TreeResult};

/// Options for unused import detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectOptions {
    /// Only `(reference)` imports are candidates. A plain import also emits
    /// the imported CSS, so removing it changes output even when none of its
    /// names are used.
    pub reference_only: bool,
}

/// Finds the imports under `root` none of whose exported names are used.
pub fn find_unused_imports(root: &Node) -> TreeResult<Vec<ImportSite<'_>>> {
    find_unused_imports_with(root, DetectOptions::default())
}

/// Like [`find_unused_imports`], with explicit options.
///
/// An import is unused when its resolved tree exports no name the file
/// references. A single match keeps it. Imports less.js did not resolve are
/// never reported.
pub fn find_unused_imports_with(
    root: &Node,
    options: DetectOptions,
) -> TreeResult<Vec<ImportSite<'_>>> {
    let referenced = collect_importables(root)?;
    let available = collect_available_imports(root)?;

    let unused: Vec<_> = available
        .into_iter()
        .filter(|import| import.resolved)
        .filter(|import| !options.reference_only || import.site.is_reference())
        .filter(|import| import.names.is_disjoint(&referenced))
        .map(|import| import.site)
        .collect();

    for site in &unused {
        tracing::debug!(path = site.path(), index = ?site.index(), "unused import");
    }

    Ok(unused)
}
