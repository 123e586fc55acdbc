//! One-line diagnostic rendering of a node.
//!
//! Follows the chain of members from a node down to its first text or number
//! leaf, e.g. `MixinCall.selector: -> Selector.elements: -> Array[0] ->
//! Element.value: .mixin`. Used for error dumps and the `nodes` command; no
//! analysis depends on it.

use super::types::{DeclarationName, Node, NodeData, Value};
use super::{TreeError, TreeResult};

/// Renders the member chain from `node` to its leaf values.
pub fn node_to_line_string(node: &Node) -> TreeResult<String> {
    let mut segments = Vec::new();
    push_node(node, &mut segments)?;
    Ok(segments.join(" "))
}

fn push_node(node: &Node, out: &mut Vec<String>) -> TreeResult<()> {
    let kind = node.kind();
    match &node.data {
        NodeData::NamespaceValue(ns) => {
            out.push(format!("{kind}.value: ->"));
            push_node(&ns.value, out)?;
            for (i, lookup) in ns.lookups.iter().enumerate() {
                out.push(format!("{kind}.lookups.{i}: {lookup}"));
            }
            Ok(())
        }
        NodeData::Selector(selector) => push_node_list(node, "elements", &selector.elements, out),
        NodeData::MixinCall(call) => {
            out.push(format!("{kind}.selector: ->"));
            push_node(&call.selector, out)
        }
        NodeData::Extend(extend) => {
            out.push(format!("{kind}.selector: ->"));
            push_node(&extend.selector, out)
        }
        NodeData::Import(import) => push_value(node, "path", &import.path, out),
        NodeData::Ruleset(ruleset) => push_node_list(node, "rules", &ruleset.rules, out),
        NodeData::MixinDefinition(definition) => {
            push_node_list(node, "rules", &definition.rules, out)
        }
        NodeData::Media(media) => push_node_list(node, "rules", &media.rules, out),
        NodeData::AtRule(at_rule) if !at_rule.rules.is_empty() => {
            push_node_list(node, "rules", &at_rule.rules, out)
        }
        NodeData::AtRule(at_rule) => match &at_rule.name {
            Some(name) => {
                out.push(format!("{kind}.name: {name}"));
                Ok(())
            }
            None => push_value(node, "value", &at_rule.value, out),
        },
        NodeData::VariableCall(call) => {
            out.push(format!("{kind}.variable: {}", call.variable));
            Ok(())
        }
        NodeData::Declaration(declaration) => match &declaration.name {
            DeclarationName::Text(name) => {
                out.push(format!("{kind}.name: {name}"));
                Ok(())
            }
            DeclarationName::Parts(parts) => push_node_list(node, "name", parts, out),
        },
        NodeData::Variable(variable) => {
            out.push(format!("{kind}.name: {}", variable.name));
            Ok(())
        }
        NodeData::Call(call) => {
            out.push(format!("{kind}.name: {}", call.name));
            Ok(())
        }
        NodeData::Property(property) => {
            out.push(format!("{kind}.name: {}", property.name));
            Ok(())
        }
        NodeData::DetachedRuleset(detached) => {
            out.push(format!("{kind}.ruleset: ->"));
            push_node(&detached.ruleset, out)
        }
        NodeData::Unit(unit) => {
            out.push(format!("{kind}.numerator: {}", unit.numerator.join("*")));
            Ok(())
        }
        NodeData::Condition(condition) => push_value(node, "lvalue", &condition.lvalue, out),
        NodeData::Operation(operation) => {
            out.push(format!("{kind}.operands: ->"));
            push_array(node, &operation.operands, out)
        }
        NodeData::Attribute(attribute) => push_value(node, "key", &attribute.key, out),
        NodeData::JavaScript(js) => push_value(node, "expression", &js.expression, out),
        NodeData::Anonymous(n) => push_value(node, "value", &n.value, out),
        NodeData::Assignment(n) => push_value(node, "value", &n.value, out),
        NodeData::Color(n) => push_value(node, "value", &n.value, out),
        NodeData::Combinator(n) => push_value(node, "value", &n.value, out),
        NodeData::Comment(n) => push_value(node, "value", &n.value, out),
        NodeData::Dimension(n) => push_value(node, "value", &n.value, out),
        NodeData::Element(n) => push_value(node, "value", &n.value, out),
        NodeData::Expression(n) => push_value(node, "value", &n.value, out),
        NodeData::Keyword(n) => push_value(node, "value", &n.value, out),
        NodeData::Negative(n) => push_value(node, "value", &n.value, out),
        NodeData::Paren(n) => push_value(node, "value", &n.value, out),
        NodeData::Quoted(n) => push_value(node, "value", &n.value, out),
        NodeData::UnicodeDescriptor(n) => push_value(node, "value", &n.value, out),
        NodeData::Url(n) => push_value(node, "value", &n.value, out),
        NodeData::Value(n) => push_value(node, "value", &n.value, out),
    }
}

fn push_value(owner: &Node, key: &str, value: &Value, out: &mut Vec<String>) -> TreeResult<()> {
    let kind = owner.kind();
    match value {
        Value::Text(text) => out.push(format!("{kind}.{key}: {text}")),
        Value::Number(number) => out.push(format!("{kind}.{key}: {number}")),
        Value::Node(child) => {
            out.push(format!("{kind}.{key}: ->"));
            push_node(child, out)?;
        }
        Value::List(items) => {
            out.push(format!("{kind}.{key}: ->"));
            push_array(owner, items, out)?;
        }
        Value::Flag(_) | Value::Null => {
            return Err(no_leaf(owner, key));
        }
    }
    Ok(())
}

fn push_node_list(
    owner: &Node,
    key: &str,
    nodes: &[Node],
    out: &mut Vec<String>,
) -> TreeResult<()> {
    if nodes.is_empty() {
        return Err(no_leaf(owner, key));
    }
    out.push(format!("{}.{key}: ->", owner.kind()));
    for (i, node) in nodes.iter().enumerate() {
        out.push(format!("Array[{i}] ->"));
        push_node(node, out)?;
    }
    Ok(())
}

fn push_array(owner: &Node, items: &[Value], out: &mut Vec<String>) -> TreeResult<()> {
    if items.is_empty() {
        return Err(no_leaf(owner, "[]"));
    }
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::Node(node) => {
                out.push(format!("Array[{i}] ->"));
                push_node(node, out)?;
            }
            Value::List(inner) => {
                out.push(format!("Array[{i}] ->"));
                push_array(owner, inner, out)?;
            }
            Value::Text(text) => out.push(format!("Array[{i}] {text}")),
            Value::Number(number) => out.push(format!("Array[{i}] {number}")),
            Value::Flag(_) | Value::Null => return Err(no_leaf(owner, "[]")),
        }
    }
    Ok(())
}

// Built directly rather than through `TreeError::structure`, which renders a
// dump with this module and would recurse on the same failure.
fn no_leaf(owner: &Node, key: &str) -> TreeError {
    TreeError::Structure {
        kind: owner.kind(),
        reason: format!("member \"{key}\" has no text or node to follow"),
        dump: format!("{:?}", owner.data),
    }
}
