use crate::arena::{Arena, SkipNode, HEAD, NIL};
use crate::skiplist::SkipList;

/// Nodes linked at one layer, in ascending order.
pub struct Nodes<'a, T> {
    arena: &'a Arena<T>,
    layer: usize,
    cur: usize,
}

impl<'a, T> Nodes<'a, T> {
    fn new(arena: &'a Arena<T>, layer: usize) -> Self {
        Self {
            arena,
            layer,
            cur: arena.link(HEAD, layer),
        }
    }
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = &'a SkipNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == NIL {
            return None;
        }
        let arena: &'a Arena<T> = self.arena;
        let node = &arena[self.cur];
        self.cur = node.next[self.layer];
        Some(node)
    }
}

pub struct LayerIter<'a, T> {
    nodes: Nodes<'a, T>,
}

impl<'a, T> LayerIter<'a, T> {
    pub fn layer(&self) -> usize {
        self.nodes.layer
    }
}

impl<'a, T> Iterator for LayerIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(SkipNode::item)
    }
}

pub struct Layers<'a, T> {
    arena: &'a Arena<T>,
    remaining: usize,
}

impl<'a, T> Iterator for Layers<'a, T> {
    type Item = LayerIter<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(LayerIter {
            nodes: Nodes::new(self.arena, self.remaining),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Layers<'a, T> {}

pub struct Iter<'a, T> {
    items: LayerIter<'a, T>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<T> SkipList<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            items: self.layer(0),
            remaining: self.len(),
        }
    }

    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes::new(&self.arena, 0)
    }

    /// Panics if `layer >= self.max_layers()`.
    pub fn layer(&self, layer: usize) -> LayerIter<'_, T> {
        assert!(
            layer < self.max_layers(),
            "layer {} out of {} layers",
            layer,
            self.max_layers()
        );
        LayerIter {
            nodes: Nodes::new(&self.arena, layer),
        }
    }

    pub fn layers(&self) -> Layers<'_, T> {
        Layers {
            arena: &self.arena,
            remaining: self.max_layers(),
        }
    }
}

impl<'a, T> IntoIterator for &'a SkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
