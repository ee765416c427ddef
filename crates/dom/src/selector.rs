//! Selector matching for `query_selector`.
//!
//! Supports compound selectors made of a tag, `#id`, `.class` and `*`,
//! joined by descendant (whitespace) and child (`>`) combinators, and
//! comma-separated lists.

use crate::element::ElementData;
use crate::node::NodeId;
use crate::tree::DomTree;
use common::{GalleryError, GalleryResult};
use std::fmt;

/// Combinator linking a compound selector to the one on its left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant (space).
    Descendant,
    /// Child (>).
    Child,
}

/// A compound selector such as `div.card#first`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Compound {
    pub fn matches(&self, element: &ElementData) -> bool {
        if let Some(ref tag) = self.tag {
            if element.tag_name.as_str() != tag {
                return false;
            }
        }

        if let Some(ref id) = self.id {
            match &element.id {
                Some(elem_id) if elem_id.as_ref() == id.as_str() => {}
                _ => return false,
            }
        }

        self.classes.iter().all(|class| element.has_class(class))
    }
}

/// A complex selector: compounds from left to right, each but the first
/// preceded by the combinator linking it to its left neighbour.
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    parts: Vec<(Combinator, Compound)>,
}

impl Selector {
    /// Parse a single complex selector.
    pub fn parse(input: &str) -> GalleryResult<Self> {
        let mut parts = Vec::new();
        let mut pending = Combinator::Descendant;
        let mut chars = input.trim().chars().peekable();

        while let Some(&c) = chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    chars.next();
                }
                '>' => {
                    if parts.is_empty() || pending == Combinator::Child {
                        return Err(invalid(input));
                    }
                    pending = Combinator::Child;
                    chars.next();
                }
                _ => {
                    let mut token = String::new();
                    while let Some(&c) = chars.peek() {
                        if c.is_whitespace() || c == '>' {
                            break;
                        }
                        token.push(c);
                        chars.next();
                    }
                    let compound = parse_compound(&token).ok_or_else(|| invalid(input))?;
                    parts.push((pending, compound));
                    pending = Combinator::Descendant;
                }
            }
        }

        if parts.is_empty() || pending == Combinator::Child {
            return Err(invalid(input));
        }
        Ok(Self { parts })
    }

    /// Check whether `node` matches, walking ancestors right to left.
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self.parts.split_last() {
            Some(((_, subject), rest)) => {
                element_matches(tree, node, subject)
                    && self.matches_left(tree, node, rest, self.parts.last().map(|p| p.0))
            }
            None => false,
        }
    }

    fn matches_left(
        &self,
        tree: &DomTree,
        node: NodeId,
        rest: &[(Combinator, Compound)],
        combinator: Option<Combinator>,
    ) -> bool {
        let Some(((next_combinator, compound), remaining)) = rest.split_last() else {
            return true;
        };

        match combinator {
            Some(Combinator::Child) => match tree.parent(node) {
                Some(parent) => {
                    element_matches(tree, parent, compound)
                        && self.matches_left(tree, parent, remaining, Some(*next_combinator))
                }
                None => false,
            },
            _ => tree.ancestors(node).any(|ancestor| {
                element_matches(tree, ancestor, compound)
                    && self.matches_left(tree, ancestor, remaining, Some(*next_combinator))
            }),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (combinator, compound)) in self.parts.iter().enumerate() {
            if index > 0 {
                match combinator {
                    Combinator::Descendant => write!(f, " ")?,
                    Combinator::Child => write!(f, " > ")?,
                }
            }
            match &compound.tag {
                Some(tag) => write!(f, "{tag}")?,
                None if compound.id.is_none() && compound.classes.is_empty() => write!(f, "*")?,
                None => {}
            }
            if let Some(ref id) = compound.id {
                write!(f, "#{id}")?;
            }
            for class in &compound.classes {
                write!(f, ".{class}")?;
            }
        }
        Ok(())
    }
}

/// Comma-separated selectors.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    pub fn parse(input: &str) -> GalleryResult<Self> {
        let selectors = input
            .split(',')
            .map(Selector::parse)
            .collect::<GalleryResult<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, node))
    }
}

fn element_matches(tree: &DomTree, node: NodeId, compound: &Compound) -> bool {
    tree.get_element(node)
        .is_some_and(|element| compound.matches(element))
}

fn parse_compound(token: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = token;

    let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
    let tag = &rest[..tag_end];
    if tag != "*" && !tag.is_empty() {
        if !is_ident(tag) {
            return None;
        }
        compound.tag = Some(tag.to_ascii_lowercase());
    }
    rest = &rest[tag_end..];

    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..end];
        if !is_ident(name) {
            return None;
        }
        match marker {
            '.' => compound.classes.push(name.to_string()),
            '#' => compound.id = Some(name.to_string()),
            _ => return None,
        }
        rest = &body[end..];
    }

    Some(compound)
}

fn is_ident(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

fn invalid(input: &str) -> GalleryError {
    GalleryError::parse(format!("invalid selector '{input}'"))
}
