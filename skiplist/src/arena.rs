use std::ops::Index;

/// Slot of the head sentinel. Nothing ever links to the head, so the same
/// index stands for a null link.
pub(crate) const HEAD: usize = 0;
pub(crate) const NIL: usize = HEAD;

#[derive(Debug)]
pub struct SkipNode<T> {
    item: T,
    pub(crate) next: Vec<usize>,
}

impl<T> SkipNode<T> {
    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn num_layers(&self) -> usize {
        self.next.len()
    }
}

/// Node storage addressed by slot index. Slot 0 belongs to the head, whose
/// links are kept apart because it carries no item.
pub(crate) struct Arena<T> {
    head: Vec<usize>,
    slots: Vec<Option<SkipNode<T>>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub fn new(max_layers: usize) -> Self {
        Self {
            head: vec![NIL; max_layers],
            slots: vec![None],
            free: Vec::new(),
        }
    }

    pub fn alloc(&mut self, item: T, layers: usize) -> usize {
        let node = SkipNode {
            item,
            next: vec![NIL; layers],
        };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    pub fn release(&mut self, idx: usize) -> Option<T> {
        if idx == HEAD {
            return None;
        }
        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        Some(node.item)
    }

    pub fn get(&self, idx: usize) -> Option<&SkipNode<T>> {
        self.slots.get(idx)?.as_ref()
    }

    pub fn link(&self, idx: usize, layer: usize) -> usize {
        if idx == HEAD {
            self.head[layer]
        } else {
            self[idx].next[layer]
        }
    }

    pub fn set_link(&mut self, idx: usize, layer: usize, to: usize) {
        let links = if idx == HEAD {
            &mut self.head
        } else {
            match self.slots[idx].as_mut() {
                Some(node) => &mut node.next,
                None => panic!("dangling link to slot {}", idx),
            }
        };
        links[layer] = to;
    }

    #[cfg(test)]
    pub fn head_links(&self) -> &[usize] {
        &self.head
    }

    /// Slots ever allocated, head included.
    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = SkipNode<T>;

    fn index(&self, idx: usize) -> &SkipNode<T> {
        match self.get(idx) {
            Some(node) => node,
            None => panic!("dangling link to slot {}", idx),
        }
    }
}
