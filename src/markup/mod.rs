//! Minimal markup document used as the host page for tag editors.
//!
//! Editors render into a container element owned by the host. This module
//! provides that host: an arena of elements addressed by [`NodeId`], with just
//! enough of the DOM surface (attributes, classes, text, ordered children and
//! subtree queries) for editors to mount, render and be discovered.
//!
//! Invariants:
//! - A node has at most one parent, and never becomes its own ancestor.
//! - Removing a node frees its whole subtree. Freed slots are reused, but each
//!   reuse bumps the slot generation, so a stale id simply stops resolving.
//! - Child order is explicit and preserved.

mod html;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

/// Document shared between the host and its mounted editors.
///
/// Everything runs on one event loop, so shared ownership is an `Rc<RefCell>`.
pub type SharedDocument = Rc<RefCell<Document>>;

/// Errors from structural document operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    /// The node id does not resolve to a live element.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// The node is already attached to a parent.
    #[error("node {0} is already attached")]
    AlreadyAttached(NodeId),

    /// Attaching the node would make it its own ancestor.
    #[error("attaching node {child} under {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },
}

/// Result type for markup operations.
pub type Result<T> = std::result::Result<T, MarkupError>;

/// Stable identity of an element within a [`Document`].
///
/// The generation distinguishes successive elements stored in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.index)
        } else {
            write!(f, "#{}v{}", self.index, self.generation)
        }
    }
}

/// A single element node.
#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// One arena slot.
#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// An arena-backed element tree.
#[derive(Debug)]
pub struct Document {
    slots: Vec<Slot>,
    /// Indexes of empty slots, reused by `create_element`.
    free: Vec<usize>,
    root: NodeId,
}

impl Document {
    /// Create a document with an empty `body` root.
    pub fn new() -> Self {
        let root = Element {
            tag: "body".to_string(),
            ..Element::default()
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                element: Some(root),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    /// Wrap the document for sharing with editors.
    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether the id resolves to a live element.
    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    /// Number of live elements, the root included.
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Slots allocated by the arena, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.slots
            .get(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.slots
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    fn element(&self, node: NodeId) -> Result<&Element> {
        self.get(node).ok_or(MarkupError::UnknownNode(node))
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut Element> {
        self.get_mut(node).ok_or(MarkupError::UnknownNode(node))
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let element = Element {
            tag: tag.into(),
            ..Element::default()
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation = slot.generation.wrapping_add(1);
                slot.element = Some(element);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    element: Some(element),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Append a detached node to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_attach(parent, child)?;
        self.element_mut(parent)?.children.push(child);
        self.element_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert a detached node before an existing child of `parent`.
    ///
    /// Falls back to appending when `before` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, before: NodeId) -> Result<()> {
        self.check_attach(parent, child)?;
        let children = &mut self.element_mut(parent)?.children;
        match children.iter().position(|&c| c == before) {
            Some(index) => children.insert(index, child),
            None => children.push(child),
        }
        self.element_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.element(parent)?;
        if self.element(child)?.parent.is_some() {
            return Err(MarkupError::AlreadyAttached(child));
        }
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(MarkupError::CycleDetected { parent, child });
            }
            cursor = self.get(node).and_then(|e| e.parent);
        }
        Ok(())
    }

    /// Detach a node and free its whole subtree.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        let parent = self.element(node)?.parent;
        if let Some(parent) = parent {
            if let Some(p) = self.get_mut(parent) {
                p.children.retain(|&c| c != node);
            }
        }
        self.free_subtree(node);
        Ok(())
    }

    /// Free every descendant of `node`, leaving it empty.
    pub fn clear_children(&mut self, node: NodeId) -> Result<()> {
        let children = std::mem::take(&mut self.element_mut(node)?.children);
        for child in children {
            self.free_subtree(child);
        }
        Ok(())
    }

    fn free_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            if let Some(element) = slot.element.take() {
                stack.extend(element.children);
                if current != self.root {
                    self.free.push(current.index);
                }
            }
        }
    }

    /// Children of a node in order. Empty for unknown nodes.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of a node, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|e| e.parent)
    }

    /// Tag name of a node.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|e| e.tag.as_str())
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.element_mut(node)?
            .attributes
            .insert(name.into(), value.into());
        Ok(())
    }

    /// Read an attribute.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Whether the node carries the attribute.
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Remove an attribute, returning the previous value.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Option<String> {
        self.get_mut(node).and_then(|e| e.attributes.remove(name))
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        let element = self.element_mut(node)?;
        if !element.classes.iter().any(|c| c == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        self.element_mut(node)?.classes.retain(|c| c != class);
        Ok(())
    }

    /// Add or remove a class depending on `on`.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) -> Result<()> {
        if on {
            self.add_class(node, class)
        } else {
            self.remove_class(node, class)
        }
    }

    /// Whether the node has a class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node)
            .map(|e| e.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Classes of a node in insertion order.
    pub fn classes(&self, node: NodeId) -> &[String] {
        self.get(node).map(|e| e.classes.as_slice()).unwrap_or(&[])
    }

    /// Set the text content of a node.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) -> Result<()> {
        self.element_mut(node)?.text = Some(text.into());
        Ok(())
    }

    /// Text content of a node (not including descendants).
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node).and_then(|e| e.text.as_deref())
    }

    /// Descendants of `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Find the first element whose `id` attribute matches.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&node| self.attribute(node, "id") == Some(id))
    }

    /// Elements under `node` carrying the attribute, in document order.
    pub fn query_attribute(&self, node: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|&n| self.has_attribute(n, name))
            .collect()
    }

    /// Elements under `node` carrying the class, in document order.
    pub fn query_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// `data-*` attributes keyed the way the browser's `dataset` keys them.
    ///
    /// `data-max-tags` becomes `maxTags`.
    pub fn dataset(&self, node: NodeId) -> BTreeMap<String, String> {
        let Some(element) = self.get(node) else {
            return BTreeMap::new();
        };
        element
            .attributes
            .iter()
            .filter_map(|(name, value)| {
                name.strip_prefix("data-")
                    .map(|rest| (camel_case(rest), value.clone()))
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a dash-separated attribute suffix into camelCase.
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a camelCase dataset key back into its `data-*` attribute name.
pub fn data_attribute_name(key: &str) -> String {
    let mut out = String::from("data-");
    for c in key.chars() {
        if c.is_uppercase() {
            out.push('-');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
