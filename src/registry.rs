//! Registry of mounted tag editors.
//!
//! The registry owns every editor mounted on a document, keyed by container.
//! Declarative containers (marked with `data-mosaic-tags`) are discovered by
//! [`TagEditorRegistry::mount_all`]; nothing is mounted until it is called.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::{config_from_dataset, TagEditorConfig, MARKER_ATTRIBUTE};
use crate::editor::{ContainerRef, TagEditor, TagEditorHooks};
use crate::markup::{NodeId, SharedDocument};

/// Owns the editors mounted on one document.
#[derive(Debug)]
pub struct TagEditorRegistry {
    document: SharedDocument,
    editors: BTreeMap<NodeId, TagEditor>,
}

impl TagEditorRegistry {
    /// Create an empty registry for `document`.
    pub fn new(document: &SharedDocument) -> Self {
        Self {
            document: document.clone(),
            editors: BTreeMap::new(),
        }
    }

    /// Mount an editor with an explicit config.
    ///
    /// Returns the container, or `None` if it cannot be resolved or already
    /// hosts an editor.
    pub fn mount(
        &mut self,
        container: impl Into<ContainerRef>,
        config: TagEditorConfig,
        hooks: TagEditorHooks,
    ) -> Option<NodeId> {
        let container = container.into();
        let node = {
            let doc = self.document.try_borrow().ok()?;
            container.resolve(&doc)?
        };
        if self.editors.contains_key(&node) {
            debug!(container = %node, "Container already mounted");
            return None;
        }

        let editor = TagEditor::create_with_hooks(&self.document, node, config, hooks)?;
        self.editors.insert(node, editor);
        Some(node)
    }

    /// Mount every marked container under `root`, `root` included.
    ///
    /// Containers that already host an editor are skipped, so calling this
    /// again only picks up new containers. Returns the newly mounted ones in
    /// document order.
    pub fn mount_all(&mut self, root: NodeId) -> Vec<NodeId> {
        let pending: Vec<(NodeId, TagEditorConfig)> = {
            let Ok(doc) = self.document.try_borrow() else {
                return Vec::new();
            };
            let mut candidates = Vec::new();
            if doc.has_attribute(root, MARKER_ATTRIBUTE) {
                candidates.push(root);
            }
            candidates.extend(doc.query_attribute(root, MARKER_ATTRIBUTE));
            candidates
                .into_iter()
                .filter(|node| !self.editors.contains_key(node))
                .map(|node| (node, config_from_dataset(&doc.dataset(node))))
                .collect()
        };

        let mut mounted = Vec::new();
        for (node, config) in pending {
            if let Some(editor) = TagEditor::create(&self.document, node, config) {
                self.editors.insert(node, editor);
                mounted.push(node);
            }
        }

        info!(root = %root, mounted = mounted.len(), "Declarative tag editors mounted");
        mounted
    }

    /// The editor mounted on `container`.
    pub fn get(&self, container: NodeId) -> Option<&TagEditor> {
        self.editors.get(&container)
    }

    /// The editor mounted on `container`, mutably.
    pub fn get_mut(&mut self, container: NodeId) -> Option<&mut TagEditor> {
        self.editors.get_mut(&container)
    }

    /// Containers hosting an editor, in document creation order.
    pub fn containers(&self) -> Vec<NodeId> {
        self.editors.keys().copied().collect()
    }

    /// Number of mounted editors.
    pub fn len(&self) -> usize {
        self.editors.len()
    }

    /// Whether no editor is mounted.
    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    /// Destroy and forget the editor on `container`.
    pub fn destroy(&mut self, container: NodeId) -> bool {
        match self.editors.remove(&container) {
            Some(mut editor) => {
                editor.destroy();
                true
            }
            None => false,
        }
    }

    /// Fire expired deadlines on every editor.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Fire deadlines expired at `now` on every editor.
    pub fn tick_at(&mut self, now: Instant) {
        for editor in self.editors.values_mut() {
            editor.tick_at(now);
        }
    }

    /// Destroy every editor.
    pub fn teardown(&mut self) {
        let count = self.editors.len();
        for (_, mut editor) in std::mem::take(&mut self.editors) {
            editor.destroy();
        }
        debug!(count, "Tag editor registry torn down");
    }
}
