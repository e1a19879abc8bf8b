//! The reference element tree.

use std::fmt::Write as _;

use slotmap::SlotMap;

use super::node::{NodeData, NodeId};
use crate::geometry::Rect;

/// One arena slot: the element plus its links.
#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Slot {
    fn detached(data: NodeData) -> Self {
        Self { data, parent: None, children: Vec::new() }
    }
}

/// An element tree backed by a slotmap arena.
///
/// Several top-level elements may coexist; each is the root of its own
/// subtree. Stale ids are tolerated everywhere and behave like missing nodes.
///
/// Positions are absolute. Moving a node with [`Dom::move_to`] carries its
/// descendants along, so a container and its content stay together.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    slots: SlotMap<NodeId, Slot>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a top-level element.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        self.slots.insert(Slot::detached(data))
    }

    /// Insert an element as the last child of `parent`. A missing `parent`
    /// leaves the new element top-level.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.insert(data);
        self.attach(id, parent);
        id
    }

    /// Remove an element and its whole subtree, returning the element's data.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        self.detach(id);
        let slot = self.slots.remove(id)?;
        let mut pending = slot.children;
        while let Some(next) = pending.pop() {
            if let Some(child) = self.slots.remove(next) {
                pending.extend(child.children);
            }
        }
        Some(slot.data)
    }

    /// Make `node` the last child of `new_parent`. Geometry is untouched.
    ///
    /// Returns `false` (and changes nothing) when either id is stale or the
    /// move would put `node` inside its own subtree.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> bool {
        if !self.contains(node) || !self.contains(new_parent) || self.is_within(new_parent, node) {
            return false;
        }
        self.detach(node);
        self.attach(node, new_parent);
        true
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id).and_then(|slot| slot.parent)
    }

    /// Children in insertion order; empty for leaves and stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots.get(id).map_or(&[], |slot| slot.children.as_slice())
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.slots.get(id).map(|slot| &slot.data)
    }

    /// Mutable element access. Writing `bounds` here does not move
    /// descendants; use [`Dom::move_to`] for that.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.slots.get_mut(id).map(|slot| &mut slot.data)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains_key(id)
    }

    /// First live element (in arena order) carrying `tag`.
    pub fn find_tagged(&self, tag: &str) -> Option<NodeId> {
        self.slots
            .iter()
            .find_map(|(id, slot)| slot.data.has_tag(tag).then_some(id))
    }

    /// `start` and its descendants in pre-order.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(slot) = self.slots.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(slot.children.iter().rev());
        }
        order
    }

    /// Put the top-left corner of `id` at `(x, y)` and translate every
    /// descendant by the same delta.
    pub fn move_to(&mut self, id: NodeId, x: f32, y: f32) {
        let Some(slot) = self.slots.get(id) else {
            return;
        };
        let (dx, dy) = (x - slot.data.bounds.x, y - slot.data.bounds.y);
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        for node in self.walk_depth_first(id) {
            if let Some(slot) = self.slots.get_mut(node) {
                slot.data.bounds.x += dx;
                slot.data.bounds.y += dy;
            }
        }
    }

    /// Unrotated border box; empty for stale ids.
    pub fn bounds(&self, id: NodeId) -> Rect {
        self.get(id).map(|data| data.bounds).unwrap_or_default()
    }

    /// One line per element under `start`: `x,y wxh [tags]`, indented two
    /// spaces per level.
    pub fn dump_geometry(&self, start: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![(start, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(slot) = self.slots.get(id) else {
                continue;
            };
            let b = slot.data.bounds;
            let _ = write!(out, "{:1$}{2},{3} {4}x{5}", "", depth * 2, b.x, b.y, b.width, b.height);
            if !slot.data.tags.is_empty() {
                let _ = write!(out, " [{}]", slot.data.tags.join(","));
            }
            out.push('\n');
            stack.extend(slot.children.iter().rev().map(|&child| (child, depth + 1)));
        }
        out
    }

    fn attach(&mut self, id: NodeId, parent: NodeId) {
        let Some(parent_slot) = self.slots.get_mut(parent) else {
            return;
        };
        parent_slot.children.push(id);
        if let Some(slot) = self.slots.get_mut(id) {
            slot.parent = Some(parent);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.slots.get_mut(id).and_then(|slot| slot.parent.take()) else {
            return;
        };
        if let Some(parent_slot) = self.slots.get_mut(parent) {
            parent_slot.children.retain(|&child| child != id);
        }
    }

    /// Whether `node` is `ancestor` or lies below it.
    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Panel {
        dom: Dom,
        window: NodeId,
        toolbar: NodeId,
        content: NodeId,
        save: NodeId,
        open: NodeId,
    }

    /// window > [toolbar > [save, open], content]
    fn panel() -> Panel {
        let mut dom = Dom::new();
        let window = dom.insert(NodeData::new().with_tag("window"));
        let toolbar = dom.insert_child(window, NodeData::new().with_tag("toolbar"));
        let content = dom.insert_child(window, NodeData::new().with_tag("content"));
        let save = dom.insert_child(toolbar, NodeData::new().with_tag("save"));
        let open = dom.insert_child(toolbar, NodeData::new().with_tag("open"));
        Panel { dom, window, toolbar, content, save, open }
    }

    #[test]
    fn links() {
        let p = panel();
        assert_eq!(p.dom.parent(p.save), Some(p.toolbar));
        assert_eq!(p.dom.parent(p.window), None);
        assert_eq!(p.dom.children(p.window), &[p.toolbar, p.content]);
        assert!(p.dom.children(p.open).is_empty());
    }

    #[test]
    fn insert_child_of_stale_parent_is_top_level() {
        let mut dom = Dom::new();
        let gone = dom.insert(NodeData::new());
        dom.remove(gone);
        let orphan = dom.insert_child(gone, NodeData::new());
        assert_eq!(dom.parent(orphan), None);
    }

    #[test]
    fn remove_takes_subtree() {
        let mut p = panel();
        let data = p.dom.remove(p.toolbar);
        assert!(data.is_some_and(|d| d.has_tag("toolbar")));
        assert!(!p.dom.contains(p.save));
        assert!(!p.dom.contains(p.open));
        assert_eq!(p.dom.children(p.window), &[p.content]);
        assert_eq!(p.dom.len(), 2);
        assert!(p.dom.remove(p.toolbar).is_none());
    }

    #[test]
    fn reparent_moves_links_only() {
        let mut p = panel();
        assert!(p.dom.reparent(p.open, p.content));
        assert_eq!(p.dom.children(p.toolbar), &[p.save]);
        assert_eq!(p.dom.children(p.content), &[p.open]);
        assert_eq!(p.dom.parent(p.open), Some(p.content));
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut p = panel();
        assert!(!p.dom.reparent(p.window, p.save));
        assert!(!p.dom.reparent(p.toolbar, p.toolbar));
        assert_eq!(p.dom.parent(p.toolbar), Some(p.window));
    }

    #[test]
    fn tag_lookup_and_walk() {
        let p = panel();
        assert_eq!(p.dom.find_tagged("open"), Some(p.open));
        assert_eq!(p.dom.find_tagged("nope"), None);
        assert_eq!(
            p.dom.walk_depth_first(p.window),
            vec![p.window, p.toolbar, p.save, p.open, p.content]
        );
    }

    #[test]
    fn move_to_carries_descendants() {
        let mut dom = Dom::new();
        let outer = dom.insert(NodeData::new().with_bounds(0.0, 0.0, 100.0, 100.0));
        let inner = dom.insert_child(outer, NodeData::new().with_bounds(10.0, 10.0, 5.0, 5.0));
        let leaf = dom.insert_child(inner, NodeData::new().with_bounds(12.0, 11.0, 1.0, 1.0));
        dom.move_to(inner, 20.0, 30.0);
        assert_eq!(dom.bounds(inner), Rect::new(20.0, 30.0, 5.0, 5.0));
        assert_eq!(dom.bounds(leaf), Rect::new(22.0, 31.0, 1.0, 1.0));
        assert_eq!(dom.bounds(outer), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn dump_format() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new().with_tag("root").with_bounds(0.0, 0.0, 10.0, 20.0));
        let mid = dom.insert_child(root, NodeData::new().with_bounds(1.0, 2.0, 3.0, 4.5));
        dom.insert_child(mid, NodeData::new().with_tag("a").with_tag("b"));
        dom.insert_child(root, NodeData::new());
        assert_eq!(
            dom.dump_geometry(root),
            "0,0 10x20 [root]\n  1,2 3x4.5\n    0,0 0x0 [a,b]\n  0,0 0x0\n"
        );
    }
}
