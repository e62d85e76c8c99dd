//! Document seam between the bootstrap logic and the hosting page.
//!
//! The hosting page supplies a [`Document`] instead of the crate reaching
//! for a global one, so the bootstrap can be exercised deterministically
//! against [`StaticDom`], an in-memory mirror of server-rendered markup.
//!
//! The selector language is deliberately small: tag names, `.class`,
//! `[attr="value"]`, and the descendant combinator. That covers every
//! selector the bootstrap uses (`[data-bs-toggle="tooltip"]`, `.alert`,
//! `.navbar-nav a.nav-link`).

use std::collections::HashMap;
use std::sync::Mutex;

/// Handle to one element in a [`Document`].
pub type NodeId = usize;

/// The page structure the bootstrap runs against.
pub trait Document: Send + Sync {
    /// Elements matching `selector`, in document order.
    fn query(&self, selector: &str) -> Vec<NodeId>;

    /// Value of an attribute, if present on the element.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Add a class to the element. Adding a class twice is a no-op.
    fn add_class(&self, node: NodeId, class: &str);
}

/// One compound part of a selector (everything between descendant gaps).
#[derive(Debug, Default, Clone, PartialEq)]
struct SimpleSelector {
    tag: Option<String>,
    classes: Vec<String>,
    /// Attribute constraints; `None` means presence-only (`[attr]`).
    attrs: Vec<(String, Option<String>)>,
}

fn parse_selector(selector: &str) -> Vec<SimpleSelector> {
    selector.split_whitespace().map(parse_simple).collect()
}

fn parse_simple(part: &str) -> SimpleSelector {
    let mut sel = SimpleSelector::default();

    let tag_end = part.find(['.', '[']).unwrap_or(part.len());
    if tag_end > 0 {
        sel.tag = Some(part[..tag_end].to_string());
    }

    let mut rest = &part[tag_end..];
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('.') {
            let end = after.find(['.', '[']).unwrap_or(after.len());
            sel.classes.push(after[..end].to_string());
            rest = &after[end..];
        } else if let Some(after) = rest.strip_prefix('[') {
            let Some(end) = after.find(']') else {
                // unterminated attribute selector, take it as presence-only
                sel.attrs.push((after.to_string(), None));
                break;
            };
            match after[..end].split_once('=') {
                Some((name, value)) => sel
                    .attrs
                    .push((name.to_string(), Some(value.trim_matches('"').to_string()))),
                None => sel.attrs.push((after[..end].to_string(), None)),
            }
            rest = &after[end + 1..];
        } else {
            break;
        }
    }
    sel
}

#[derive(Debug, Default, Clone)]
struct ElementData {
    tag: String,
    parent: Option<NodeId>,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
}

fn matches_simple(el: &ElementData, sel: &SimpleSelector) -> bool {
    if let Some(tag) = &sel.tag {
        if el.tag != *tag {
            return false;
        }
    }
    if !sel.classes.iter().all(|c| el.classes.contains(c)) {
        return false;
    }
    sel.attrs.iter().all(|(name, value)| match value {
        Some(v) => el.attributes.get(name) == Some(v),
        None => el.attributes.contains_key(name),
    })
}

/// Whether the element at `idx` matches a full descendant chain.
///
/// The last part must match the element itself; each earlier part must
/// match some strict ancestor, innermost first. Taking the nearest matching
/// ancestor at each step is sufficient: anything that satisfies an outer
/// part above a farther ancestor also sits above the nearest one.
fn matches_at(elements: &[ElementData], idx: NodeId, parts: &[SimpleSelector]) -> bool {
    let Some((last, ancestor_parts)) = parts.split_last() else {
        return false;
    };
    if !matches_simple(&elements[idx], last) {
        return false;
    }

    let mut remaining = ancestor_parts;
    let mut cursor = elements[idx].parent;
    while let Some((need, rest)) = remaining.split_last() {
        let mut walk = cursor;
        let mut found = None;
        while let Some(pid) = walk {
            // a parent handle that was never inserted ends the chain
            let Some(el) = elements.get(pid) else {
                break;
            };
            if matches_simple(el, need) {
                found = Some(el.parent);
                break;
            }
            walk = el.parent;
        }
        match found {
            Some(parent) => {
                cursor = parent;
                remaining = rest;
            }
            None => return false,
        }
    }
    true
}

/// In-memory [`Document`] mirroring server-rendered markup.
///
/// Elements live in a flat arena with parent links; insertion order is
/// document order. Mutation goes through `&self` so the bootstrap's timers
/// can hold the document across await points.
#[derive(Debug, Default)]
pub struct StaticDom {
    elements: Mutex<Vec<ElementData>>,
}

impl StaticDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element; `None` parent attaches it at the document root.
    ///
    /// A parent handle that does not reference an already-inserted element
    /// is treated as `None`. Parents therefore always precede their
    /// children, so ancestor walks terminate.
    pub fn insert(&self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let mut elements = self.elements.lock().unwrap();
        let parent = parent.filter(|&p| p < elements.len());
        elements.push(ElementData {
            tag: tag.to_string(),
            parent,
            classes: Vec::new(),
            attributes: HashMap::new(),
        });
        elements.len() - 1
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        let mut elements = self.elements.lock().unwrap();
        if let Some(el) = elements.get_mut(node) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        let mut elements = self.elements.lock().unwrap();
        if let Some(el) = elements.get_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        let elements = self.elements.lock().unwrap();
        elements
            .get(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    pub fn len(&self) -> usize {
        self.elements.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Document for StaticDom {
    fn query(&self, selector: &str) -> Vec<NodeId> {
        let parts = parse_selector(selector);
        if parts.is_empty() {
            return Vec::new();
        }
        let elements = self.elements.lock().unwrap();
        (0..elements.len())
            .filter(|&idx| matches_at(&elements, idx, &parts))
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let elements = self.elements.lock().unwrap();
        elements.get(node)?.attributes.get(name).cloned()
    }

    fn add_class(&self, node: NodeId, class: &str) {
        StaticDom::add_class(self, node, class);
    }
}
