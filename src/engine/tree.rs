//! Element Tree - Arena of elements with a parent context stack.
//!
//! Building mirrors markup nesting:
//!
//! ```ignore
//! let mut tree = ElementTree::new();
//! tree.open(BoxStyle::column());          // becomes the parent context
//! tree.text("Hello", TextStyle::default());
//! tree.close();                           // pop back to the outer parent
//! ```

use crate::state::reveal::RevealSpec;
use crate::types::BlockKey;

use super::element::{BoxStyle, DynamicText, Element, ElementKind, HitTarget, ScrollFade, TextSource, TextStyle};

/// A named scroll target (navigation shortcut).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub id: String,
    pub label: String,
    pub element: usize,
}

#[derive(Debug, Default)]
pub struct ElementTree {
    elements: Vec<Element>,
    parent_stack: Vec<usize>,
    blocks: Vec<(BlockKey, RevealSpec)>,
    anchors: Vec<Anchor>,
    overlays: Vec<usize>,
    /// Page parent stacks suspended while an overlay is open.
    saved_stacks: Vec<Vec<usize>>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Parent Context Stack
    // =========================================================================

    pub fn current_parent(&self) -> Option<usize> {
        self.parent_stack.last().copied()
    }

    fn push(&mut self, kind: ElementKind) -> usize {
        let parent = self.current_parent();
        let index = self.elements.len();
        self.elements.push(Element::new(kind, parent));
        if let Some(parent) = parent {
            self.elements[parent].children.push(index);
        }
        index
    }

    /// Add a box and make it the parent context. Pair with [`close`](Self::close).
    pub fn open(&mut self, style: BoxStyle) -> usize {
        let index = self.push(ElementKind::Box(style));
        self.parent_stack.push(index);
        index
    }

    /// Add a root-level box drawn above the page (header, chat panel).
    ///
    /// Overlays are laid out and painted separately from the page root.
    pub fn open_overlay(&mut self, style: BoxStyle) -> usize {
        let saved = std::mem::take(&mut self.parent_stack);
        self.saved_stacks.push(saved);
        let index = self.open(style);
        self.overlays.push(index);
        index
    }

    /// Pop the current parent context.
    pub fn close(&mut self) {
        let closed = self.parent_stack.pop();
        if self.parent_stack.is_empty() {
            if let Some(closed) = closed {
                if self.overlays.contains(&closed) {
                    if let Some(saved) = self.saved_stacks.pop() {
                        self.parent_stack = saved;
                    }
                }
            }
        }
    }

    /// Add a static text leaf under the current parent.
    pub fn text(&mut self, text: impl Into<String>, style: TextStyle) -> usize {
        self.push(ElementKind::Text(TextSource::Static(text.into()), style))
    }

    /// Add a dynamic single-line text leaf reserving `width` cells.
    pub fn dynamic_text(&mut self, text: DynamicText, width: u16, style: TextStyle) -> usize {
        self.push(ElementKind::Text(TextSource::Dynamic { text, width }, style))
    }

    // =========================================================================
    // Element Decoration
    // =========================================================================

    /// Drive the subtree at `index` with a content block's reveal.
    pub fn reveal(&mut self, index: usize, key: BlockKey, spec: RevealSpec) {
        self.elements[index].block = Some(key.clone());
        self.blocks.push((key, spec));
    }

    pub fn hit(&mut self, index: usize, target: HitTarget) {
        self.elements[index].hit = Some(target);
    }

    pub fn scroll_fade(&mut self, index: usize, fade: ScrollFade) {
        self.elements[index].scroll_fade = Some(fade);
    }

    /// Register `index` as a navigation target. Returns the anchor number.
    pub fn anchor(&mut self, index: usize, id: impl Into<String>, label: impl Into<String>) -> usize {
        self.anchors.push(Anchor {
            id: id.into(),
            label: label.into(),
            element: index,
        });
        self.anchors.len() - 1
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Page root: the first element that is not an overlay.
    pub fn root(&self) -> Option<usize> {
        self.elements
            .iter()
            .enumerate()
            .find(|(i, e)| e.parent.is_none() && !self.overlays.contains(i))
            .map(|(i, _)| i)
    }

    pub fn overlays(&self) -> &[usize] {
        &self.overlays
    }

    pub fn blocks(&self) -> &[(BlockKey, RevealSpec)] {
        &self.blocks
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Element carrying the block `key`.
    pub fn block_element(&self, key: &BlockKey) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.block.as_ref() == Some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::reveal::RevealMotion;
    use std::time::Duration;

    #[test]
    fn test_nesting() {
        let mut tree = ElementTree::new();
        let root = tree.open(BoxStyle::column());
        let child = tree.open(BoxStyle::row());
        let leaf = tree.text("hi", TextStyle::default());
        tree.close();
        let sibling = tree.text("there", TextStyle::default());
        tree.close();

        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.get(root).unwrap().children, vec![child, sibling]);
        assert_eq!(tree.get(child).unwrap().children, vec![leaf]);
        assert_eq!(tree.get(leaf).unwrap().parent, Some(child));
        assert_eq!(tree.current_parent(), None);
    }

    #[test]
    fn test_overlay_is_separate_root() {
        let mut tree = ElementTree::new();
        let root = tree.open(BoxStyle::column());
        tree.text("page", TextStyle::default());

        let overlay = tree.open_overlay(BoxStyle::column());
        let inner = tree.text("floating", TextStyle::default());
        tree.close();

        // Back inside the page root
        let after = tree.text("more page", TextStyle::default());
        tree.close();

        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.overlays(), &[overlay]);
        assert_eq!(tree.get(overlay).unwrap().parent, None);
        assert_eq!(tree.get(inner).unwrap().parent, Some(overlay));
        assert_eq!(tree.get(after).unwrap().parent, Some(root));
    }

    #[test]
    fn test_reveal_registration() {
        let mut tree = ElementTree::new();
        let root = tree.open(BoxStyle::column());
        let spec = RevealSpec::in_view(0.1, RevealMotion::Fade, Duration::from_millis(800));
        tree.reveal(root, BlockKey::from("about"), spec);
        tree.close();

        assert_eq!(tree.blocks().len(), 1);
        assert_eq!(tree.block_element(&BlockKey::from("about")), Some(root));
        assert_eq!(tree.block_element(&BlockKey::from("other")), None);
    }

    #[test]
    fn test_anchor_numbers() {
        let mut tree = ElementTree::new();
        let a = tree.open(BoxStyle::column());
        assert_eq!(tree.anchor(a, "about", "About Me"), 0);
        assert_eq!(tree.anchor(a, "projects", "Projects"), 1);
        tree.close();
        assert_eq!(tree.anchors()[1].label, "Projects");
    }
}
