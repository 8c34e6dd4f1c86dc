//! Region tree
//!
//! Regions are opaque handles to rectangular areas of the rendered page.
//! The host view layer mounts them with their laid-out bounds; animation
//! code only reads bounds and writes visual state. `RegionId`s are
//! generational, so a handle to an unmounted region never aliases a newer
//! region that reused its slot.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::geometry::Rect;
use crate::visual::VisualState;

new_key_type! {
    /// Handle to a mounted region
    pub struct RegionId;
}

#[derive(Debug)]
struct RegionNode {
    bounds: Rect,
    parent: Option<RegionId>,
    children: SmallVec<[RegionId; 8]>,
    visual: VisualState,
    label: Option<String>,
}

impl RegionNode {
    fn new(bounds: Rect, parent: Option<RegionId>) -> Self {
        Self {
            bounds,
            parent,
            children: SmallVec::new(),
            visual: VisualState::VISIBLE,
            label: None,
        }
    }
}

/// Owner of all mounted regions of a page
#[derive(Debug, Default)]
pub struct RegionTree {
    nodes: SlotMap<RegionId, RegionNode>,
}

impl RegionTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Mount a top-level region
    pub fn mount(&mut self, bounds: Rect) -> RegionId {
        self.nodes.insert(RegionNode::new(bounds, None))
    }

    /// Mount a top-level region with a debug label
    pub fn mount_labeled(&mut self, label: impl Into<String>, bounds: Rect) -> RegionId {
        let id = self.mount(bounds);
        if let Some(node) = self.nodes.get_mut(id) {
            node.label = Some(label.into());
        }
        id
    }

    /// Mount a region as the last child of `parent`
    ///
    /// Returns `None` if the parent is not mounted.
    pub fn mount_child(&mut self, parent: RegionId, bounds: Rect) -> Option<RegionId> {
        if !self.nodes.contains_key(parent) {
            tracing::warn!("mount_child: parent region {:?} is not mounted", parent);
            return None;
        }
        let child = self.nodes.insert(RegionNode::new(bounds, Some(parent)));
        self.nodes.get_mut(parent)?.children.push(child);
        Some(child)
    }

    /// Unmount a region and all of its descendants
    ///
    /// Returns false if the region was not mounted.
    pub fn unmount(&mut self, id: RegionId) -> bool {
        let Some(node) = self.nodes.remove(id) else {
            return false;
        };

        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }

        let mut stack: Vec<RegionId> = node.children.into_vec();
        while let Some(child) = stack.pop() {
            if let Some(removed) = self.nodes.remove(child) {
                stack.extend(removed.children);
            }
        }
        true
    }

    pub fn is_mounted(&self, id: RegionId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn bounds(&self, id: RegionId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.bounds)
    }

    /// Update a region's laid-out bounds (e.g. after a resize)
    pub fn set_bounds(&mut self, id: RegionId, bounds: Rect) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Ordered children of a region (empty if unmounted)
    pub fn children(&self, id: RegionId) -> &[RegionId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: RegionId) -> Option<RegionId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn visual(&self, id: RegionId) -> Option<VisualState> {
        self.nodes.get(id).map(|n| n.visual)
    }

    /// Write a region's visual state. No-op for unmounted regions.
    pub fn set_visual(&mut self, id: RegionId, visual: VisualState) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.visual = visual;
                true
            }
            None => false,
        }
    }

    pub fn label(&self, id: RegionId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.label.as_deref())
    }

    /// Iterate all mounted regions with their visual state
    pub fn iter_visual(&self) -> impl Iterator<Item = (RegionId, VisualState)> + '_ {
        self.nodes.iter().map(|(id, n)| (id, n.visual))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
