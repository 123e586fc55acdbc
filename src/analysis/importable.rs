//! Names a stylesheet references and may therefore need from its imports.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tree::{walk, Node, NodeData, TreeError, TreeResult, Value, WalkAction, WalkOptions};

/// `@{name}` inside selectors, strings, and urls.
static INTERPOLATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\{([\w-]+)\}").expect("interpolation pattern is valid"));

/// Collects every name referenced anywhere under `scope`.
///
/// Imported trees are not entered. The names are:
///
/// - variables used as values (`@brand`), and the target of a
///   variable-variable (`@@name` also references `@name`)
/// - variable calls and map lookups (`@rules();`, `@config[width]`)
/// - the first element of a mixin call (`#ns` for `#ns.mixin();`)
/// - every target of an extend (`&:extend(.a, .b)`)
/// - variables interpolated as `@{name}` into selectors, strings, and urls
pub fn collect_importables(scope: &Node) -> TreeResult<HashSet<String>> {
    let mut names = HashSet::new();
    let mut failure = None;

    walk(scope, WalkOptions::default(), |node| {
        match collect_from(node, &mut names) {
            Ok(()) => WalkAction::Continue,
            Err(err) => {
                failure = Some(err);
                WalkAction::Stop
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(names),
    }
}

fn collect_from(node: &Node, names: &mut HashSet<String>) -> TreeResult<()> {
    match &node.data {
        NodeData::VariableCall(call) => {
            if call.variable.is_empty() {
                return Err(TreeError::structure(node, "variable call has no variable"));
            }
            names.insert(call.variable.clone());
        }
        NodeData::Variable(variable) => {
            if variable.name.is_empty() {
                return Err(TreeError::structure(node, "variable has no name"));
            }
            if let Some(target) = variable.name.strip_prefix('@').filter(|n| n.starts_with('@')) {
                names.insert(target.to_string());
            }
            names.insert(variable.name.clone());
        }
        NodeData::MixinCall(call) => {
            names.insert(mixin_call_name(node, &call.selector)?.to_string());
        }
        NodeData::Extend(extend) => {
            let NodeData::Selector(selector) = &extend.selector.data else {
                return Err(TreeError::structure(node, "extend target is not a Selector"));
            };
            for element in &selector.elements {
                let NodeData::Element(element) = &element.data else {
                    return Err(TreeError::structure(node, "extend target element is not an Element"));
                };
                if let Value::Text(text) = &element.value {
                    names.insert(text.clone());
                }
            }
        }
        NodeData::Element(element) => interpolated(&element.value, names),
        NodeData::Quoted(quoted) => interpolated(&quoted.value, names),
        NodeData::Url(url) => interpolated(&url.value, names),
        _ => {}
    }
    Ok(())
}

fn mixin_call_name<'a>(call: &Node, selector: &'a Node) -> TreeResult<&'a str> {
    let NodeData::Selector(selector) = &selector.data else {
        return Err(TreeError::structure(call, "mixin call selector is not a Selector"));
    };
    let first = selector
        .elements
        .first()
        .ok_or_else(|| TreeError::structure(call, "mixin call has no selector elements"))?;

    match &first.data {
        NodeData::Element(element) => match &element.value {
            Value::Text(text) if !text.is_empty() => Ok(text),
            _ => Err(TreeError::structure(call, "mixin call name is not text")),
        },
        _ => Err(TreeError::structure(call, "mixin call selector element is not an Element")),
    }
}

fn interpolated(value: &Value, names: &mut HashSet<String>) {
    if let Value::Text(text) = value {
        for captures in INTERPOLATION_PATTERN.captures_iter(text) {
            names.insert(format!("@{}", &captures[1]));
        }
    }
}
