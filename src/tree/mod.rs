//! Arena-based search tree shared by both engines.
//!
//! Nodes live in a flat `Vec` and reference each other through `NodeId`
//! indices, so parent back-references cost nothing to maintain and
//! re-rooting is an index reassignment plus a bulk free of the orphaned
//! slots. Freed slots go on a free list and are reused by later
//! expansions; the tree persists across turns and is pruned incrementally.

use std::cmp::Ordering;

use smallvec::SmallVec;

/// Index into the tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    #[must_use]
    const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    fn index(self) -> usize {
        self.0 as usize
    }
}

struct Slot<T> {
    /// `None` marks a freed slot awaiting reuse.
    payload: Option<T>,
    parent: NodeId,
    children: SmallVec<[NodeId; 8]>,
}

/// A mutable, node-owning tree with parent lookup, child sorting, bulk
/// subtree removal, and re-rooting.
pub struct SearchTree<T> {
    slots: Vec<Slot<T>>,
    free: Vec<NodeId>,
    root: NodeId,
    live: usize,
}

impl<T> SearchTree<T> {
    /// Create a tree holding a single root node.
    pub fn new(payload: T) -> Self {
        let mut tree = Self {
            slots: Vec::with_capacity(1024),
            free: Vec::new(),
            root: NodeId(0),
            live: 0,
        };
        tree.root = tree.alloc(payload, NodeId::NONE);
        tree
    }

    /// Discard every node and restart from a single root.
    pub fn reset(&mut self, payload: T) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
        self.root = self.alloc(payload, NodeId::NONE);
    }

    /// The current root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the tree holds no live nodes. Never true in practice:
    /// the root always exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Payload of a node. Panics on a freed id (programmer error).
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &T {
        self.slots[id.index()]
            .payload
            .as_ref()
            .expect("access to freed tree node")
    }

    /// Mutable payload of a node.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        self.slots[id.index()]
            .payload
            .as_mut()
            .expect("access to freed tree node")
    }

    /// Parent of a node, `None` at the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.slots[id.index()].parent;
        if parent.is_none() {
            None
        } else {
            Some(parent)
        }
    }

    /// Children of a node, in insertion (or last sorted) order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.index()].children
    }

    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.slots[id.index()].children.is_empty()
    }

    #[must_use]
    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    /// Append a child under `parent`, returning its id.
    pub fn add_child(&mut self, parent: NodeId, payload: T) -> NodeId {
        let child = self.alloc(payload, parent);
        self.slots[parent.index()].children.push(child);
        child
    }

    /// Stable-sort the direct children of `id` by a payload ordering.
    ///
    /// Only the child list of `id` moves; no id is invalidated.
    pub fn sort_children_by<F>(&mut self, id: NodeId, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut kids = std::mem::take(&mut self.slots[id.index()].children);
        kids.sort_by(|&a, &b| cmp(self.get(a), self.get(b)));
        self.slots[id.index()].children = kids;
    }

    /// Remove and free the entire subtree below `id` (not `id` itself).
    /// Irrecoverable.
    pub fn drop_children(&mut self, id: NodeId) {
        let kids = std::mem::take(&mut self.slots[id.index()].children);
        for kid in kids {
            self.free_subtree(kid);
        }
    }

    /// Make `id` the logical root, freeing every node outside its subtree.
    pub fn reroot(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        let parent = self.slots[id.index()].parent;
        debug_assert!(!parent.is_none(), "non-root node must have a parent");
        self.slots[parent.index()].children.retain(|&mut c| c != id);
        let old_root = self.root;
        self.free_subtree(old_root);
        self.slots[id.index()].parent = NodeId::NONE;
        self.root = id;
    }

    /// Depth-first scan from the root for a payload matching `pred`,
    /// descending at most `max_depth` plies. The cap bounds the cost of a
    /// fruitless scan on a deep, long-lived tree.
    #[must_use]
    pub fn find<F>(&self, pred: F, max_depth: u32) -> Option<NodeId>
    where
        F: Fn(&T) -> bool,
    {
        let mut stack = vec![(self.root, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            if pred(self.get(id)) {
                return Some(id);
            }
            if depth < max_depth {
                for &child in self.children(id) {
                    stack.push((child, depth + 1));
                }
            }
        }
        None
    }

    fn alloc(&mut self, payload: T, parent: NodeId) -> NodeId {
        self.live += 1;
        if let Some(id) = self.free.pop() {
            let slot = &mut self.slots[id.index()];
            slot.payload = Some(payload);
            slot.parent = parent;
            slot.children.clear();
            id
        } else {
            let id = NodeId(self.slots.len() as u32);
            self.slots.push(Slot {
                payload: Some(payload),
                parent,
                children: SmallVec::new(),
            });
            id
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index()];
            debug_assert!(slot.payload.is_some(), "double free of tree node");
            slot.payload = None;
            stack.extend(std::mem::take(&mut slot.children));
            self.free.push(current);
            self.live -= 1;
        }
    }
}
