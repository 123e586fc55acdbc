//! Names a stylesheet makes available to files that import it.
//!
//! Only the top level of a file counts. A mixin or class nested inside
//! another ruleset is reachable only through its parent, so the parent is
//! the exportable unit.

use std::collections::HashSet;

use crate::tree::{
    for_each_top_level_child, DeclarationName, Node, NodeData, TreeError, TreeResult, Value,
};

/// Collects the exportable names defined directly in `scope`.
///
/// `scope` itself is classified first, then each of its direct children.
/// The names are:
///
/// - variable declarations, e.g. `@brand`
/// - mixin definitions, e.g. `.button-variant`
/// - non-root rulesets, one name per selector that is a single `.class` or
///   `#id` element (`a b`, `.a .b`, and `div` yield nothing)
pub fn collect_exportables(scope: &Node) -> TreeResult<HashSet<String>> {
    let mut names = HashSet::new();
    collect_from(scope, &mut names)?;

    let mut result = Ok(());
    for_each_top_level_child(scope, |child| {
        if result.is_ok() {
            result = collect_from(child, &mut names);
        }
    });
    result?;

    Ok(names)
}

fn collect_from(node: &Node, names: &mut HashSet<String>) -> TreeResult<()> {
    match &node.data {
        NodeData::Declaration(declaration) if declaration.variable => match &declaration.name {
            DeclarationName::Text(name) if !name.is_empty() => {
                names.insert(name.clone());
            }
            _ => return Err(TreeError::structure(node, "variable declaration has no text name")),
        },
        NodeData::MixinDefinition(definition) => {
            if definition.name.is_empty() {
                return Err(TreeError::structure(node, "mixin definition has no name"));
            }
            names.insert(definition.name.clone());
        }
        NodeData::Ruleset(ruleset) if !ruleset.root => {
            for selector in ruleset.selectors.iter().flatten() {
                if let Some(name) = selector_name(selector)? {
                    names.insert(name.to_string());
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// The callable name of a one-element `.class` or `#id` selector.
fn selector_name(selector: &Node) -> TreeResult<Option<&str>> {
    let NodeData::Selector(inner) = &selector.data else {
        return Err(TreeError::structure(selector, "ruleset selector is not a Selector"));
    };
    let [element] = inner.elements.as_slice() else {
        return Ok(None);
    };
    let NodeData::Element(element_data) = &element.data else {
        return Err(TreeError::structure(element, "selector element is not an Element"));
    };

    Ok(match &element_data.value {
        Value::Text(text) if text.starts_with('.') || text.starts_with('#') => Some(text.as_str()),
        _ => None,
    })
}
