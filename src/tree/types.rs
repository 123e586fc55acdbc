//! Node types for the less.js syntax tree.
//!
//! The tree arrives as JSON from the less.js adapter. Every node object carries a
//! `type` tag naming one of a closed set of kinds, and decoding rejects tags that
//! are missing or unknown. A decoded [`Node`] therefore always agrees with its
//! [`NodeKind`], and consumers never need to re-check it.
//!
//! Only the members that hold child nodes or names are modelled. Everything else
//! less.js attaches to its nodes (file info, visibility flags, caches) is ignored
//! during decoding.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use super::TreeError;

/// A single node of the parsed stylesheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    /// Source offset reported by less.js, in UTF-16 code units of the
    /// normalised input (BOM stripped, line endings folded to `\n`).
    #[serde(default)]
    pub index: Option<usize>,

    /// Kind-specific payload.
    #[serde(flatten)]
    pub data: NodeData,
}

/// Kind-specific node payload, tagged by the less.js `type` string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum NodeData {
    Anonymous(Anonymous),
    Assignment(Assignment),
    AtRule(AtRule),
    Attribute(Attribute),
    Call(Call),
    Color(Color),
    Combinator(Combinator),
    Comment(Comment),
    Condition(Condition),
    Declaration(Declaration),
    DetachedRuleset(DetachedRuleset),
    Dimension(Dimension),
    Element(Element),
    Expression(Expression),
    Extend(Extend),
    Import(Import),
    JavaScript(JavaScript),
    Keyword(Keyword),
    Media(Media),
    MixinCall(MixinCall),
    MixinDefinition(MixinDefinition),
    NamespaceValue(NamespaceValue),
    Negative(Negative),
    Operation(Operation),
    Paren(Paren),
    Property(Property),
    Quoted(Quoted),
    Ruleset(Ruleset),
    Selector(Selector),
    UnicodeDescriptor(UnicodeDescriptor),
    Unit(Unit),
    Url(Url),
    Value(ValueList),
    Variable(Variable),
    VariableCall(VariableCall),
}

/// A loosely typed member of a less.js node.
///
/// less.js stores strings, numbers, single nodes, or arrays of either in the
/// same member depending on how the node was built.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Node(Box<Node>),
    List(Vec<Value>),
    Text(String),
    Number(f64),
    Flag(bool),
    #[default]
    Null,
}

impl Value {
    /// Returns the value as text when it is a plain string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Appends every node held by this value, in order.
    pub fn push_nodes<'a>(&'a self, out: &mut Vec<&'a Node>) {
        match self {
            Value::Node(node) => out.push(node),
            Value::List(items) => items.iter().for_each(|item| item.push_nodes(out)),
            _ => {}
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(Box::new(node))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

/// Treats an explicit `null` the same as a missing member.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Anonymous {
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AtRule {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// A CSS/less function call such as `darken(@c, 10%)`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Call {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Color {
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Combinator {
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub value: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_line_comment: bool,
}

/// A guard condition on a mixin definition or `when` block.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default)]
    pub lvalue: Value,
    #[serde(default)]
    pub rvalue: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub negate: bool,
}

/// Name of a declaration: plain text for variables, keyword parts for properties.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeclarationName {
    Text(String),
    Parts(Vec<Node>),
}

impl Default for DeclarationName {
    fn default() -> Self {
        DeclarationName::Text(String::new())
    }
}

/// A `name: value` pair. Variable definitions (`@name: value`) have `variable` set.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Declaration {
    #[serde(default)]
    pub name: DeclarationName,
    #[serde(default)]
    pub value: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variable: bool,
}

/// A ruleset bound to a variable: `@rules: { ... }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetachedRuleset {
    pub ruleset: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Dimension {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub unit: Option<Box<Node>>,
}

/// One compound part of a selector, e.g. `.btn` in `.nav .btn`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(default)]
    pub combinator: Option<Box<Node>>,
    #[serde(default)]
    pub value: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_variable: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Expression {
    #[serde(default)]
    pub value: Value,
}

/// `&:extend(.target)` or `.a:extend(.target)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Extend {
    pub selector: Box<Node>,
    #[serde(default)]
    pub option: Option<String>,
}

/// Options in parentheses after `@import`, e.g. `(reference)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ImportOptions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reference: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inline: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub css: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub less: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub optional: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub multiple: bool,
}

/// An `@import` statement and, once less.js has resolved it, the imported tree.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Import {
    #[serde(default)]
    pub path: Value,
    #[serde(default)]
    pub features: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: ImportOptions,
    #[serde(default)]
    pub root: Option<Box<Node>>,
    #[serde(default)]
    pub imported_filename: Option<String>,
}

impl Import {
    /// The import path as written, without quotes or `url()`.
    pub fn path_text(&self) -> Option<&str> {
        fn text_of(value: &Value) -> Option<&str> {
            match value {
                Value::Text(text) => Some(text),
                Value::Node(node) => match &node.data {
                    NodeData::Quoted(quoted) => text_of(&quoted.value),
                    NodeData::Url(url) => text_of(&url.value),
                    NodeData::Anonymous(anonymous) => text_of(&anonymous.value),
                    _ => None,
                },
                _ => None,
            }
        }
        text_of(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct JavaScript {
    #[serde(default)]
    pub expression: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Keyword {
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub features: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Node>,
}

/// Argument passed to a mixin call. Not a node in less.js, just a record.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MixinArgument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// `.mixin();` or `#namespace.mixin();`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MixinCall {
    pub selector: Box<Node>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arguments: Vec<MixinArgument>,
}

/// Parameter of a mixin definition, possibly with a default value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MixinParameter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variadic: bool,
}

/// `.mixin(@a; @b: 2) when (@a > 0) { ... }`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MixinDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selectors: Vec<Node>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Vec<MixinParameter>,
    #[serde(default)]
    pub condition: Option<Box<Node>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Node>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variadic: bool,
}

/// A map or namespace lookup such as `@config[width]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamespaceValue {
    pub value: Box<Node>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lookups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Negative {
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operands: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Paren {
    #[serde(default)]
    pub value: Value,
}

/// Property accessor `$color`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Quoted {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub escaped: bool,
}

/// A block of rules. The file root and detached rulesets have no selectors.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Ruleset {
    #[serde(default)]
    pub selectors: Option<Vec<Node>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Node>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub root: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    #[serde(default, deserialize_with = "null_as_default")]
    pub elements: Vec<Node>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extend_list: Vec<Node>,
    #[serde(default)]
    pub condition: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UnicodeDescriptor {
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub numerator: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub denominator: Vec<String>,
    #[serde(default)]
    pub backup_unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Url {
    #[serde(default)]
    pub value: Value,
}

/// Comma separated list of expressions (the `Value` kind in less.js).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ValueList {
    #[serde(default)]
    pub value: Value,
}

/// Usage of a variable: `@name`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Variable {
    #[serde(default)]
    pub name: String,
}

/// Call of a detached ruleset or map: `@rules();` or the head of `@map[key]`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VariableCall {
    #[serde(default)]
    pub variable: String,
}

/// The closed set of node kinds less.js produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Anonymous,
    Assignment,
    AtRule,
    Attribute,
    Call,
    Color,
    Combinator,
    Comment,
    Condition,
    Declaration,
    DetachedRuleset,
    Dimension,
    Element,
    Expression,
    Extend,
    Import,
    JavaScript,
    Keyword,
    Media,
    MixinCall,
    MixinDefinition,
    NamespaceValue,
    Negative,
    Operation,
    Paren,
    Property,
    Quoted,
    Ruleset,
    Selector,
    UnicodeDescriptor,
    Unit,
    Url,
    Value,
    Variable,
    VariableCall,
}

impl NodeKind {
    /// Every kind, in tag order.
    pub const ALL: [NodeKind; 35] = [
        NodeKind::Anonymous,
        NodeKind::Assignment,
        NodeKind::AtRule,
        NodeKind::Attribute,
        NodeKind::Call,
        NodeKind::Color,
        NodeKind::Combinator,
        NodeKind::Comment,
        NodeKind::Condition,
        NodeKind::Declaration,
        NodeKind::DetachedRuleset,
        NodeKind::Dimension,
        NodeKind::Element,
        NodeKind::Expression,
        NodeKind::Extend,
        NodeKind::Import,
        NodeKind::JavaScript,
        NodeKind::Keyword,
        NodeKind::Media,
        NodeKind::MixinCall,
        NodeKind::MixinDefinition,
        NodeKind::NamespaceValue,
        NodeKind::Negative,
        NodeKind::Operation,
        NodeKind::Paren,
        NodeKind::Property,
        NodeKind::Quoted,
        NodeKind::Ruleset,
        NodeKind::Selector,
        NodeKind::UnicodeDescriptor,
        NodeKind::Unit,
        NodeKind::Url,
        NodeKind::Value,
        NodeKind::Variable,
        NodeKind::VariableCall,
    ];

    /// The less.js `type` tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Anonymous => "Anonymous",
            NodeKind::Assignment => "Assignment",
            NodeKind::AtRule => "AtRule",
            NodeKind::Attribute => "Attribute",
            NodeKind::Call => "Call",
            NodeKind::Color => "Color",
            NodeKind::Combinator => "Combinator",
            NodeKind::Comment => "Comment",
            NodeKind::Condition => "Condition",
            NodeKind::Declaration => "Declaration",
            NodeKind::DetachedRuleset => "DetachedRuleset",
            NodeKind::Dimension => "Dimension",
            NodeKind::Element => "Element",
            NodeKind::Expression => "Expression",
            NodeKind::Extend => "Extend",
            NodeKind::Import => "Import",
            NodeKind::JavaScript => "JavaScript",
            NodeKind::Keyword => "Keyword",
            NodeKind::Media => "Media",
            NodeKind::MixinCall => "MixinCall",
            NodeKind::MixinDefinition => "MixinDefinition",
            NodeKind::NamespaceValue => "NamespaceValue",
            NodeKind::Negative => "Negative",
            NodeKind::Operation => "Operation",
            NodeKind::Paren => "Paren",
            NodeKind::Property => "Property",
            NodeKind::Quoted => "Quoted",
            NodeKind::Ruleset => "Ruleset",
            NodeKind::Selector => "Selector",
            NodeKind::UnicodeDescriptor => "UnicodeDescriptor",
            NodeKind::Unit => "Unit",
            NodeKind::Url => "Url",
            NodeKind::Value => "Value",
            NodeKind::Variable => "Variable",
            NodeKind::VariableCall => "VariableCall",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TreeError::UnknownKind(s.to_string()))
    }
}

impl Node {
    /// Creates a node with no source offset.
    pub fn new(data: NodeData) -> Self {
        Self { index: None, data }
    }

    /// Sets the source offset.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match &self.data {
            NodeData::Anonymous(_) => NodeKind::Anonymous,
            NodeData::Assignment(_) => NodeKind::Assignment,
            NodeData::AtRule(_) => NodeKind::AtRule,
            NodeData::Attribute(_) => NodeKind::Attribute,
            NodeData::Call(_) => NodeKind::Call,
            NodeData::Color(_) => NodeKind::Color,
            NodeData::Combinator(_) => NodeKind::Combinator,
            NodeData::Comment(_) => NodeKind::Comment,
            NodeData::Condition(_) => NodeKind::Condition,
            NodeData::Declaration(_) => NodeKind::Declaration,
            NodeData::DetachedRuleset(_) => NodeKind::DetachedRuleset,
            NodeData::Dimension(_) => NodeKind::Dimension,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Expression(_) => NodeKind::Expression,
            NodeData::Extend(_) => NodeKind::Extend,
            NodeData::Import(_) => NodeKind::Import,
            NodeData::JavaScript(_) => NodeKind::JavaScript,
            NodeData::Keyword(_) => NodeKind::Keyword,
            NodeData::Media(_) => NodeKind::Media,
            NodeData::MixinCall(_) => NodeKind::MixinCall,
            NodeData::MixinDefinition(_) => NodeKind::MixinDefinition,
            NodeData::NamespaceValue(_) => NodeKind::NamespaceValue,
            NodeData::Negative(_) => NodeKind::Negative,
            NodeData::Operation(_) => NodeKind::Operation,
            NodeData::Paren(_) => NodeKind::Paren,
            NodeData::Property(_) => NodeKind::Property,
            NodeData::Quoted(_) => NodeKind::Quoted,
            NodeData::Ruleset(_) => NodeKind::Ruleset,
            NodeData::Selector(_) => NodeKind::Selector,
            NodeData::UnicodeDescriptor(_) => NodeKind::UnicodeDescriptor,
            NodeData::Unit(_) => NodeKind::Unit,
            NodeData::Url(_) => NodeKind::Url,
            NodeData::Value(_) => NodeKind::Value,
            NodeData::Variable(_) => NodeKind::Variable,
            NodeData::VariableCall(_) => NodeKind::VariableCall,
        }
    }

    /// Direct children of this node, in member order.
    ///
    /// Every child is owned by exactly one parent, so no node is listed twice.
    /// An Import lists its resolved root last; callers that must not enter
    /// imported files filter Import nodes themselves.
    pub fn children(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        match &self.data {
            NodeData::Anonymous(n) => n.value.push_nodes(&mut out),
            NodeData::Assignment(n) => {
                n.key.push_nodes(&mut out);
                n.value.push_nodes(&mut out);
            }
            NodeData::AtRule(n) => {
                n.value.push_nodes(&mut out);
                out.extend(n.rules.iter());
            }
            NodeData::Attribute(n) => {
                n.key.push_nodes(&mut out);
                n.value.push_nodes(&mut out);
            }
            NodeData::Call(n) => n.args.iter().for_each(|arg| arg.push_nodes(&mut out)),
            NodeData::Color(n) => n.value.push_nodes(&mut out),
            NodeData::Combinator(_) => {}
            NodeData::Comment(_) => {}
            NodeData::Condition(n) => {
                n.lvalue.push_nodes(&mut out);
                n.rvalue.push_nodes(&mut out);
            }
            NodeData::Declaration(n) => {
                if let DeclarationName::Parts(parts) = &n.name {
                    out.extend(parts.iter());
                }
                n.value.push_nodes(&mut out);
            }
            NodeData::DetachedRuleset(n) => out.push(&n.ruleset),
            NodeData::Dimension(n) => {
                n.value.push_nodes(&mut out);
                out.extend(n.unit.as_deref());
            }
            NodeData::Element(n) => {
                out.extend(n.combinator.as_deref());
                n.value.push_nodes(&mut out);
            }
            NodeData::Expression(n) => n.value.push_nodes(&mut out),
            NodeData::Extend(n) => out.push(&n.selector),
            NodeData::Import(n) => {
                n.path.push_nodes(&mut out);
                n.features.push_nodes(&mut out);
                out.extend(n.root.as_deref());
            }
            NodeData::JavaScript(_) => {}
            NodeData::Keyword(_) => {}
            NodeData::Media(n) => {
                n.features.push_nodes(&mut out);
                out.extend(n.rules.iter());
            }
            NodeData::MixinCall(n) => {
                out.push(&n.selector);
                n.arguments
                    .iter()
                    .for_each(|arg| arg.value.push_nodes(&mut out));
            }
            NodeData::MixinDefinition(n) => {
                out.extend(n.selectors.iter());
                n.params
                    .iter()
                    .for_each(|param| param.value.push_nodes(&mut out));
                out.extend(n.condition.as_deref());
                out.extend(n.rules.iter());
            }
            NodeData::NamespaceValue(n) => out.push(&n.value),
            NodeData::Negative(n) => n.value.push_nodes(&mut out),
            NodeData::Operation(n) => n.operands.iter().for_each(|op| op.push_nodes(&mut out)),
            NodeData::Paren(n) => n.value.push_nodes(&mut out),
            NodeData::Property(_) => {}
            NodeData::Quoted(_) => {}
            NodeData::Ruleset(n) => {
                out.extend(n.selectors.iter().flatten());
                out.extend(n.rules.iter());
            }
            NodeData::Selector(n) => {
                out.extend(n.elements.iter());
                out.extend(n.extend_list.iter());
                n.condition.push_nodes(&mut out);
            }
            NodeData::UnicodeDescriptor(_) => {}
            NodeData::Unit(_) => {}
            NodeData::Url(n) => n.value.push_nodes(&mut out),
            NodeData::Value(n) => n.value.push_nodes(&mut out),
            NodeData::Variable(_) => {}
            NodeData::VariableCall(_) => {}
        }
        out
    }
}
