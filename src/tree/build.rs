//! Helpers for assembling syntax trees by hand.
//!
//! The shapes match what less.js produces for the equivalent source, so trees
//! built here analyse exactly like parsed ones. Offsets are left unset; attach
//! them with [`Node::with_index`] where a test needs them.

use super::types::*;

/// The synthetic root ruleset of a file.
pub fn root(rules: Vec<Node>) -> Node {
    Node::new(NodeData::Ruleset(Ruleset {
        selectors: None,
        rules,
        root: true,
    }))
}

/// A selector element such as `.btn` or `#nav`.
pub fn element(value: &str) -> Node {
    Node::new(NodeData::Element(Element {
        combinator: Some(Box::new(combinator(""))),
        value: value.into(),
        is_variable: false,
    }))
}

pub fn combinator(value: &str) -> Node {
    Node::new(NodeData::Combinator(Combinator {
        value: value.into(),
    }))
}

/// A selector; whitespace separates its elements, so `".a .b"` has two.
pub fn selector(text: &str) -> Node {
    Node::new(NodeData::Selector(Selector {
        elements: text.split_whitespace().map(element).collect(),
        ..Selector::default()
    }))
}

/// A ruleset with one selector per entry of `selectors`.
pub fn ruleset(selectors: &[&str], rules: Vec<Node>) -> Node {
    Node::new(NodeData::Ruleset(Ruleset {
        selectors: Some(selectors.iter().map(|s| selector(s)).collect()),
        rules,
        root: false,
    }))
}

pub fn keyword(value: &str) -> Node {
    Node::new(NodeData::Keyword(Keyword {
        value: value.into(),
    }))
}

pub fn anonymous(value: &str) -> Node {
    Node::new(NodeData::Anonymous(Anonymous {
        value: value.into(),
    }))
}

pub fn quoted(value: &str) -> Node {
    Node::new(NodeData::Quoted(Quoted {
        value: value.into(),
        quote: Some("'".to_string()),
        escaped: false,
    }))
}

pub fn comment(value: &str) -> Node {
    Node::new(NodeData::Comment(Comment {
        value: value.into(),
        is_line_comment: value.starts_with("//"),
    }))
}

/// A comma-free value made of one space separated expression.
pub fn value(items: Vec<Node>) -> Node {
    let expression = Node::new(NodeData::Expression(Expression {
        value: Value::List(items.into_iter().map(Value::from).collect()),
    }));
    Node::new(NodeData::Value(ValueList {
        value: Value::List(vec![expression.into()]),
    }))
}

/// `@name: value;`
pub fn var_decl(name: &str, value: Node) -> Node {
    Node::new(NodeData::Declaration(Declaration {
        name: DeclarationName::Text(name.to_string()),
        value: value.into(),
        variable: true,
    }))
}

/// `name: value;` for a CSS property.
pub fn property(name: &str, value: Node) -> Node {
    Node::new(NodeData::Declaration(Declaration {
        name: DeclarationName::Parts(vec![keyword(name)]),
        value: value.into(),
        variable: false,
    }))
}

/// Usage of `@name`.
pub fn variable(name: &str) -> Node {
    Node::new(NodeData::Variable(Variable {
        name: name.to_string(),
    }))
}

/// `@name()` or the head of a map lookup.
pub fn variable_call(name: &str) -> Node {
    Node::new(NodeData::VariableCall(VariableCall {
        variable: name.to_string(),
    }))
}

/// `@map[key]`.
pub fn namespace_value(map: &str, lookups: &[&str]) -> Node {
    Node::new(NodeData::NamespaceValue(NamespaceValue {
        value: Box::new(variable_call(map)),
        lookups: lookups.iter().map(|l| l.to_string()).collect(),
    }))
}

/// `@rules: { ... }` value.
pub fn detached_ruleset(rules: Vec<Node>) -> Node {
    Node::new(NodeData::DetachedRuleset(DetachedRuleset {
        ruleset: Box::new(Node::new(NodeData::Ruleset(Ruleset {
            selectors: None,
            rules,
            root: false,
        }))),
    }))
}

/// `.name() { ... }`
pub fn mixin_definition(name: &str, rules: Vec<Node>) -> Node {
    Node::new(NodeData::MixinDefinition(MixinDefinition {
        name: name.to_string(),
        selectors: vec![selector(name)],
        rules,
        ..MixinDefinition::default()
    }))
}

/// `.a.b();` style call where `path` lists the selector elements.
pub fn mixin_call(path: &[&str]) -> Node {
    Node::new(NodeData::MixinCall(MixinCall {
        selector: Box::new(Node::new(NodeData::Selector(Selector {
            elements: path.iter().map(|p| element(p)).collect(),
            ..Selector::default()
        }))),
        arguments: Vec::new(),
    }))
}

/// `&:extend(...)` with one selector element per target.
pub fn extend(targets: &[&str]) -> Node {
    Node::new(NodeData::Extend(Extend {
        selector: Box::new(Node::new(NodeData::Selector(Selector {
            elements: targets.iter().map(|t| element(t)).collect(),
            ..Selector::default()
        }))),
        option: None,
    }))
}

/// `@import 'path';`, optionally already resolved to `tree`.
pub fn import(path: &str, tree: Option<Node>, reference: bool) -> Node {
    Node::new(NodeData::Import(Import {
        path: quoted(path).into(),
        features: Value::Null,
        options: ImportOptions {
            reference,
            ..ImportOptions::default()
        },
        root: tree.map(Box::new),
        imported_filename: None,
    }))
}
