// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Arena-backed content tree implementing `ContentRepository`.

use std::sync::{Arc, Mutex, MutexGuard};
use template_model_core::{CollaboratorError, ContentNode, ContentRepository, TemplateId};

/// Handle to a node in an [`InMemoryContentTree`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreeNode {
    index: usize,
    name: Arc<str>,
    template: TemplateId,
}

impl TreeNode {
    /// Arena slot of the node; stable for the tree's lifetime.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name given when the node was added.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ContentNode for TreeNode {
    fn template_id(&self) -> TemplateId {
        self.template
    }
}

struct Entry {
    node: TreeNode,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Default)]
struct TreeState {
    entries: Vec<Entry>,
    calls: usize,
    fail: bool,
}

impl TreeState {
    fn entry(&self, node: &TreeNode) -> Result<&Entry, CollaboratorError> {
        self.entries
            .get(node.index)
            .filter(|entry| entry.node == *node)
            .ok_or_else(|| format!("node {:?} is not part of this tree", node.name).into())
    }

    fn node_at(&self, index: usize) -> TreeNode {
        self.entries[index].node.clone()
    }

    // Every repository call funnels through here so counting and failure
    // injection cover all four traversals.
    fn begin_call(&mut self) -> Result<(), CollaboratorError> {
        self.calls += 1;
        if self.fail {
            return Err("simulated repository failure".into());
        }
        Ok(())
    }
}

/// In-memory content tree.
///
/// Children keep insertion order; descendants come back in pre-order and
/// ancestors nearest first. Clones share the same arena.
///
/// ```
/// use template_model_core::{ContentRepository, TemplateId};
/// use template_model_dry_tests::InMemoryContentTree;
///
/// let tree = InMemoryContentTree::new();
/// let root = tree.add_root("home", TemplateId::NIL);
/// let about = tree.add_child(&root, "about", TemplateId::NIL);
/// assert_eq!(tree.children(&root).unwrap(), vec![about]);
/// assert_eq!(tree.call_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryContentTree {
    state: Arc<Mutex<TreeState>>,
}

impl InMemoryContentTree {
    /// Empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, TreeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a parentless node.
    pub fn add_root(&self, name: &str, template: TemplateId) -> TreeNode {
        self.insert(None, name, template)
    }

    /// Add `name` as the last child of `parent`.
    ///
    /// A `parent` from another tree is treated as a root.
    pub fn add_child(&self, parent: &TreeNode, name: &str, template: TemplateId) -> TreeNode {
        self.insert(Some(parent), name, template)
    }

    fn insert(&self, parent: Option<&TreeNode>, name: &str, template: TemplateId) -> TreeNode {
        let mut state = self.state();
        let index = state.entries.len();
        let node = TreeNode {
            index,
            name: Arc::from(name),
            template,
        };
        let parent = parent
            .filter(|p| state.entry(p).is_ok())
            .map(TreeNode::index);
        if let Some(parent) = parent {
            state.entries[parent].children.push(index);
        }
        state.entries.push(Entry {
            node: node.clone(),
            parent,
            children: Vec::new(),
        });
        node
    }

    /// Repository calls so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.state().calls
    }

    /// Make every subsequent repository call fail.
    pub fn set_fail(&self, fail: bool) {
        self.state().fail = fail;
    }
}

impl ContentRepository for InMemoryContentTree {
    type Node = TreeNode;

    fn children(&self, node: &TreeNode) -> Result<Vec<TreeNode>, CollaboratorError> {
        let mut state = self.state();
        state.begin_call()?;
        let entry = state.entry(node)?;
        Ok(entry.children.iter().map(|&i| state.node_at(i)).collect())
    }

    fn descendants(&self, node: &TreeNode) -> Result<Vec<TreeNode>, CollaboratorError> {
        let mut state = self.state();
        state.begin_call()?;
        let mut stack: Vec<usize> = state.entry(node)?.children.iter().rev().copied().collect();
        let mut out = Vec::new();
        while let Some(index) = stack.pop() {
            out.push(state.node_at(index));
            stack.extend(state.entries[index].children.iter().rev());
        }
        Ok(out)
    }

    fn ancestors(&self, node: &TreeNode) -> Result<Vec<TreeNode>, CollaboratorError> {
        let mut state = self.state();
        state.begin_call()?;
        let mut cursor = state.entry(node)?.parent;
        let mut out = Vec::new();
        while let Some(index) = cursor {
            out.push(state.node_at(index));
            cursor = state.entries[index].parent;
        }
        Ok(out)
    }

    fn parent(&self, node: &TreeNode) -> Result<Option<TreeNode>, CollaboratorError> {
        let mut state = self.state();
        state.begin_call()?;
        Ok(state.entry(node)?.parent.map(|i| state.node_at(i)))
    }
}
