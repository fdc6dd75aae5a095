use crate::Comparator;

/// A query as written, before names are resolved and values are typed.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    And(Vec<RawNode>),
    Or(Vec<RawNode>),
    Category(Vec<String>),
    Concept(String),
    Namespace(String),
    Values(Vec<RawValue>),
    Property {
        chain: Vec<RawChainElement>,
        values: Vec<RawValue>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChainElement {
    pub inverse: bool,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// `+`
    Any,
    Subquery(RawNode),
    Literal {
        comparator: Comparator,
        text: String,
    },
}

fn collapse(mut nodes: Vec<RawNode>, combine: fn(Vec<RawNode>) -> RawNode) -> RawNode {
    if nodes.len() == 1 {
        if let Some(node) = nodes.pop() {
            return node;
        }
    }
    combine(nodes)
}

peg::parser! {
    pub grammar ask_query() for str {
        pub rule query() -> RawNode
            = _ node:disjunction() _ { node }

        rule disjunction() -> RawNode
            = groups:(conjunction() ++ (_ ("OR" / "||") _)) { collapse(groups, RawNode::Or) }

        rule conjunction() -> RawNode
            = elements:(element() ++ _) { collapse(elements, RawNode::And) }

        rule element() -> RawNode
            = "<q>" _ node:disjunction() _ "</q>" { node }
            / "[[" _ node:condition() _ "]]" { node }

        rule condition() -> RawNode
            = name:$(['A'..='Z' | 'a'..='z' | '_' | ' ']*) ":+" &(_ "]]") {
                RawNode::Namespace(name.trim().to_owned())
            }
            / ['C' | 'c'] "ategory:" !":" names:(title() ++ "||") { RawNode::Category(names) }
            / ['C' | 'c'] "oncept:" !":" name:title() { RawNode::Concept(name) }
            / chain:(chain_element() ++ ".") "::" values:value_list() {
                RawNode::Property { chain, values }
            }
            / values:value_list() { RawNode::Values(values) }

        rule title() -> String
            = text:$((!("||" / "]]" / "[[") [_])+) { text.trim().to_owned() }

        rule chain_element() -> RawChainElement
            = inverse:"-"? name:$((!("::" / "." / "]]" / "[[" / "||" / "<q>") [_])+) {
                RawChainElement { inverse: inverse.is_some(), name: name.trim().to_owned() }
            }

        rule value_list() -> Vec<RawValue>
            = values:(value() ++ "||") { values }

        rule value() -> RawValue
            = _ "+" _ &("||" / "]]") { RawValue::Any }
            / _ "<q>" _ node:disjunction() _ "</q>" _ { RawValue::Subquery(node) }
            / _ comparator:comparator() text:$((!("||" / "]]" / "[[") [_])*) {
                RawValue::Literal { comparator, text: text.trim().to_owned() }
            }

        rule comparator() -> Comparator
            = "<<" { Comparator::Less }
            / ">>" { Comparator::Greater }
            / ("<" / "\u{2264}") { Comparator::LessOrEqual }
            / (">" / "\u{2265}") { Comparator::GreaterOrEqual }
            / "!~" { Comparator::NotLike }
            / "~" { Comparator::Like }
            / "!" { Comparator::NotEqual }
            / "nlike:" { Comparator::PrimitiveNotLike }
            / "like:" { Comparator::PrimitiveLike }
            / "in:" { Comparator::In }
            / "phrase:" { Comparator::Phrase }
            / "not:" { Comparator::Not }
            / "" { Comparator::Equal }

        rule _() = quiet!{[' ' | '\t' | '\r' | '\n']*}
    }
}
