use std::collections::HashSet;
use std::fmt;
use std::iter::FromIterator;

use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::arena::{Arena, SkipNode, HEAD, NIL};
use crate::config::Config;
use crate::error::{Error, Result};

/// An ordered set kept in several linked layers. Layer 0 holds every item,
/// each layer above holds about half of the layer below it.
pub struct SkipList<T> {
    pub(crate) arena: Arena<T>,
    max_layers: usize,
    len: usize,
    rng: StdRng,
}

impl<T> SkipList<T> {
    fn build(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(
            "new skip list with {} layers, seed {:?}",
            config.max_layers, config.seed
        );
        Self {
            arena: Arena::new(config.max_layers),
            max_layers: config.max_layers,
            len: 0,
            rng,
        }
    }

    pub fn new() -> Self {
        Self::build(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::build(Config::new().seed(seed))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_layers(&self) -> usize {
        self.max_layers
    }

    /// Drops every item. The random generator keeps its state.
    pub fn clear(&mut self) {
        debug!("clearing skip list of {} items", self.len);
        self.arena = Arena::new(self.max_layers);
        self.len = 0;
    }

    pub fn first(&self) -> Option<&T> {
        self.arena.get(self.arena.link(HEAD, 0)).map(SkipNode::item)
    }

    pub fn last(&self) -> Option<&T> {
        let mut cur = HEAD;
        for layer in (0..self.max_layers).rev() {
            loop {
                let next = self.arena.link(cur, layer);
                if next == NIL {
                    break;
                }
                cur = next;
            }
        }
        self.arena.get(cur).map(SkipNode::item)
    }

    /// Draws a layer count in `1..=max_layers`. Every threshold of
    /// 2^64 / 2^i passed by one uniform draw adds a layer, so a node reaches
    /// `i` layers with probability 2^(1-i).
    fn random_layers(&mut self) -> usize {
        let draw: u64 = self.rng.gen();
        let mut layers = 1;
        while layers < self.max_layers && draw < 1u64 << (64 - layers) {
            layers += 1;
        }
        layers
    }
}

impl<T: Ord> SkipList<T> {
    /// Moves right on `layer` from `from` while the next item is less than
    /// `item`. Returns the last node passed and its successor, which is
    /// either null or not less than `item`.
    fn advance(&self, mut from: usize, layer: usize, item: &T) -> (usize, usize) {
        loop {
            let next = self.arena.link(from, layer);
            if next == NIL || self.arena[next].item() >= item {
                return (from, next);
            }
            from = next;
        }
    }

    fn holds(&self, idx: usize, item: &T) -> bool {
        idx != NIL && self.arena[idx].item() == item
    }

    /// Adds `item` unless an equal item is present. Returns whether a node
    /// was created.
    pub fn insert(&mut self, item: T) -> bool {
        let mut preds = vec![HEAD; self.max_layers];
        let mut cur = HEAD;
        for layer in (0..self.max_layers).rev() {
            let (pred, next) = self.advance(cur, layer, &item);
            if self.holds(next, &item) {
                trace!("duplicate insert at layer {} ignored", layer);
                return false;
            }
            preds[layer] = pred;
            cur = pred;
        }

        // Nothing has been spliced yet, so the duplicate check above leaves
        // the structure untouched.
        let layers = self.random_layers();
        let node = self.arena.alloc(item, layers);
        for layer in (0..layers).rev() {
            let pred = preds[layer];
            let next = self.arena.link(pred, layer);
            self.arena.set_link(node, layer, next);
            self.arena.set_link(pred, layer, node);
        }
        self.len += 1;
        true
    }

    pub fn search(&self, item: &T) -> Option<&SkipNode<T>> {
        let mut cur = HEAD;
        for layer in (0..self.max_layers).rev() {
            let (pred, next) = self.advance(cur, layer, item);
            if self.holds(next, item) {
                return Some(&self.arena[next]);
            }
            cur = pred;
        }
        None
    }

    pub fn contains(&self, item: &T) -> bool {
        self.search(item).is_some()
    }

    /// Unlinks the node equal to `item` from every layer it takes part in and
    /// hands back its item. Absent items leave the list untouched.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let mut cur = HEAD;
        let mut found = NIL;
        for layer in (0..self.max_layers).rev() {
            let (pred, next) = self.advance(cur, layer, item);
            if self.holds(next, item) {
                let after = self.arena.link(next, layer);
                self.arena.set_link(pred, layer, after);
                found = next;
            }
            cur = pred;
        }
        if found == NIL {
            trace!("remove of absent item ignored");
            return None;
        }
        self.len -= 1;
        self.arena.release(found)
    }

    /// Checks ordering, nesting and bookkeeping of every layer, bottom up.
    pub fn validate(&self) -> Result<()> {
        let mut bottom: Vec<usize> = Vec::with_capacity(self.len);
        let mut below: Option<HashSet<usize>> = None;
        for layer in 0..self.max_layers {
            let mut linked = HashSet::new();
            let mut prev: Option<&T> = None;
            let mut cur = self.arena.link(HEAD, layer);
            while cur != NIL {
                let node = self
                    .arena
                    .get(cur)
                    .ok_or(Error::DanglingLink { layer, slot: cur })?;
                if node.num_layers() <= layer {
                    return Err(Error::LinkBeyondLayers {
                        layer,
                        slot: cur,
                        layers: node.num_layers(),
                    });
                }
                if let Some(below) = &below {
                    if !below.contains(&cur) {
                        return Err(Error::BrokenNesting { layer, slot: cur });
                    }
                }
                if let Some(prev) = prev {
                    if prev >= node.item() {
                        return Err(Error::OutOfOrder { layer, slot: cur });
                    }
                }
                if layer == 0 {
                    bottom.push(cur);
                }
                linked.insert(cur);
                prev = Some(node.item());
                cur = node.next[layer];
            }

            let expected = bottom
                .iter()
                .filter(|&&slot| self.arena[slot].num_layers() > layer)
                .count();
            if linked.len() != expected {
                return Err(Error::UnlinkedLayer {
                    layer,
                    expected,
                    linked: linked.len(),
                });
            }
            below = Some(linked);
        }

        // after the layer walk, so a node dropped from layer 0 alone shows up
        // as a nesting break rather than a short count
        if bottom.len() != self.len {
            return Err(Error::LengthMismatch {
                counted: bottom.len(),
                recorded: self.len,
            });
        }
        Ok(())
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for SkipList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Two skip lists are equal when they hold the same items, whatever their
/// layer layout.
impl<T: PartialEq> PartialEq for SkipList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for SkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn seeded(max_layers: usize, seed: u64) -> SkipList<i32> {
        SkipList::with_config(Config::new().max_layers(max_layers).seed(seed)).unwrap()
    }

    fn assert_fresh(list: &SkipList<i32>) {
        assert!(list.is_empty());
        assert!(list.arena.head_links().iter().all(|&link| link == NIL));
        assert!(list.layers().all(|mut layer| layer.next().is_none()));
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_eq!(list.layer_histogram().total(), 0);
        list.validate().unwrap();
    }

    #[test]
    fn new_list_is_empty() {
        let list: SkipList<i32> = SkipList::new();
        assert_eq!(list.max_layers(), 10);
        assert_fresh(&list);
    }

    #[test]
    fn rejects_bad_config() {
        assert_eq!(
            SkipList::<i32>::with_config(Config::new().max_layers(0)).err(),
            Some(Error::ZeroLayers)
        );
        assert!(SkipList::<i32>::with_config(Config::new().max_layers(100)).is_err());
    }

    #[test]
    fn scenario() {
        let mut list = seeded(10, 1);
        for v in &[5, 3, 8, 1, 9] {
            assert!(list.insert(*v));
        }
        assert_eq!(list.search(&8).map(|node| *node.item()), Some(8));
        assert!(list.search(&100).is_none());

        assert_eq!(list.remove(&3), Some(3));
        assert!(list.search(&3).is_none());
        for v in &[5, 8, 1, 9] {
            assert!(list.contains(v), "{} should still be present", v);
        }

        assert!(list.insert(3));
        assert_eq!(list.search(&3).map(|node| *node.item()), Some(3));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8, 9]);
        list.validate().unwrap();
    }

    #[test]
    fn duplicate_insert_is_noop() {
        let mut list = seeded(8, 2);
        for v in 0..50 {
            list.insert(v * 2);
        }
        let before: Vec<i32> = list.iter().copied().collect();
        let layout: Vec<Vec<i32>> = list.layers().map(|l| l.copied().collect()).collect();
        for v in 0..50 {
            assert!(!list.insert(v * 2));
        }
        assert_eq!(list.len(), 50);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), before);
        let after: Vec<Vec<i32>> = list.layers().map(|l| l.copied().collect()).collect();
        assert_eq!(layout, after);
        assert_eq!(list.iter().filter(|&&v| v == 42).count(), 1);
        list.validate().unwrap();
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut list = seeded(6, 3);
        assert_eq!(list.remove(&1), None);
        list.extend(vec![1, 2, 3]);
        assert_eq!(list.remove(&4), None);
        assert_eq!(list.remove(&2), Some(2));
        assert_eq!(list.remove(&2), None);
        assert!(!list.contains(&2));
        assert_eq!(list.len(), 2);
        list.validate().unwrap();
    }

    #[test]
    fn insert_then_search_round_trip() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut list = seeded(10, 4);
        let mut inserted = Vec::new();
        for _ in 0..2000 {
            let v = rng.gen_range(-5000..5000);
            let fresh = !list.contains(&v);
            assert_eq!(list.insert(v), fresh);
            assert_eq!(list.search(&v).map(|node| *node.item()), Some(v));
            if fresh {
                inserted.push(v);
            }
        }
        assert_eq!(list.len(), inserted.len());
        inserted.sort_unstable();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), inserted);
        assert_eq!(list.first(), inserted.first());
        assert_eq!(list.last(), inserted.last());
        list.validate().unwrap();
    }

    #[test]
    fn layers_stay_ordered_and_nested() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut list = seeded(12, 5);
        for round in 0..20_000 {
            let v = rng.gen_range(0..500);
            if rng.gen_bool(0.6) {
                list.insert(v);
            } else {
                list.remove(&v);
                assert!(!list.contains(&v));
            }
            if round % 1000 == 0 {
                list.validate().unwrap();
            }
        }
        list.validate().unwrap();

        let layers: Vec<Vec<i32>> = list.layers().map(|l| l.copied().collect()).collect();
        assert_eq!(layers.len(), 12);
        for pair in layers.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            assert!(upper.windows(2).all(|w| w[0] < w[1]));
            assert!(upper.iter().all(|v| lower.binary_search(v).is_ok()));
        }
    }

    #[test]
    fn fill_and_drain_leaves_fresh_list() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut values: Vec<i32> = (1..=1000).collect();
        values.shuffle(&mut rng);
        let mut list = seeded(10, 6);
        for v in &values {
            assert!(list.insert(*v));
        }
        assert_eq!(list.len(), 1000);
        list.validate().unwrap();

        values.shuffle(&mut rng);
        for v in &values {
            assert_eq!(list.remove(v), Some(*v));
        }
        assert_fresh(&list);
        assert_eq!(list, SkipList::new());
        assert_eq!(list.arena.free_count(), 1000);

        // released slots are handed out again
        let slots = list.arena.slot_count();
        list.extend(1..=1000);
        assert_eq!(list.arena.slot_count(), slots);
        list.validate().unwrap();
    }

    #[test]
    fn layer_counts_are_geometric() {
        let mut list = seeded(10, 7);
        for v in 0..100_000 {
            list.insert(v);
        }
        let histo = list.layer_histogram();
        assert_eq!(histo.total(), 100_000);
        assert_eq!(histo.count(0), 0);
        for layers in 1..=8 {
            let expected = 0.5f64.powi(layers as i32 - 1);
            let observed = histo.fraction_at_least(layers);
            assert!(
                (observed - expected).abs() < 0.01,
                "P(layers >= {}) = {}, expected {}",
                layers,
                observed,
                expected
            );
        }
    }

    #[test]
    fn layer_count_respects_cap() {
        let mut list = seeded(1, 8);
        list.extend(0..1000);
        assert_eq!(list.layer_histogram().count(1), 1000);

        let mut list = seeded(3, 8);
        list.extend(0..1000);
        let histo = list.layer_histogram();
        assert_eq!(histo.at_least(4), 0);
        assert_eq!(histo.total(), 1000);
        assert!(histo.count(3) > 0);
    }

    #[test]
    fn same_seed_same_layout() {
        let mut a = seeded(10, 9);
        let mut b = seeded(10, 9);
        a.extend(0..300);
        b.extend(0..300);
        let layout = |list: &SkipList<i32>| -> Vec<Vec<i32>> {
            list.layers().map(|l| l.copied().collect()).collect()
        };
        assert_eq!(layout(&a), layout(&b));
    }

    #[test]
    fn clear_resets() {
        let mut list = seeded(5, 10);
        list.extend(vec![3, 1, 2]);
        list.clear();
        assert_fresh(&list);
        list.insert(7);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![7]);
    }

    fn corruptible() -> SkipList<i32> {
        let mut list = seeded(4, 11);
        list.extend(1..=20);
        list.validate().unwrap();
        list
    }

    // (layer 0 predecessor, slot) of the first node matching `pick`
    fn find_slot(
        list: &SkipList<i32>,
        pick: impl Fn(&SkipNode<i32>) -> bool,
    ) -> (usize, usize) {
        let mut prev = HEAD;
        let mut cur = list.arena.link(HEAD, 0);
        while cur != NIL {
            if pick(&list.arena[cur]) {
                return (prev, cur);
            }
            prev = cur;
            cur = list.arena.link(cur, 0);
        }
        panic!("no node matches");
    }

    #[test]
    fn validate_reports_nesting_break() {
        let mut list = corruptible();
        let (prev, slot) = find_slot(&list, |node| node.num_layers() >= 2);
        let after = list.arena.link(slot, 0);
        list.arena.set_link(prev, 0, after);
        assert_eq!(list.validate(), Err(Error::BrokenNesting { layer: 1, slot }));
    }

    #[test]
    fn validate_reports_short_bottom_layer() {
        let mut list = corruptible();
        let (prev, slot) = find_slot(&list, |node| node.num_layers() == 1);
        let after = list.arena.link(slot, 0);
        list.arena.set_link(prev, 0, after);
        assert_eq!(
            list.validate(),
            Err(Error::LengthMismatch {
                counted: 19,
                recorded: 20
            })
        );
    }

    #[test]
    fn validate_reports_swapped_nodes() {
        let mut list = corruptible();
        let first = list.arena.link(HEAD, 0);
        let second = list.arena.link(first, 0);
        let third = list.arena.link(second, 0);
        list.arena.set_link(HEAD, 0, second);
        list.arena.set_link(second, 0, first);
        list.arena.set_link(first, 0, third);
        assert_eq!(
            list.validate(),
            Err(Error::OutOfOrder {
                layer: 0,
                slot: first
            })
        );
    }

    #[test]
    fn validate_reports_link_above_node_height() {
        let mut list = corruptible();
        let (_, slot) = find_slot(&list, |node| node.num_layers() == 1);
        list.arena.set_link(HEAD, 3, slot);
        assert_eq!(
            list.validate(),
            Err(Error::LinkBeyondLayers {
                layer: 3,
                slot,
                layers: 1
            })
        );
    }

    #[test]
    fn collects_and_compares() {
        let list: SkipList<i32> = vec![4, 2, 4, 1].into_iter().collect();
        assert_eq!(list.len(), 3);
        assert_eq!(format!("{:?}", list), "{1, 2, 4}");
        let other: SkipList<i32> = vec![1, 2, 4].into_iter().collect();
        assert_eq!(list, other);
    }

    #[test]
    fn shared_behind_mutex() {
        let list = Arc::new(Mutex::new(SkipList::with_seed(12)));
        let mut handlers = vec![];
        for t in 0..4 {
            let list = Arc::clone(&list);
            handlers.push(thread::spawn(move || {
                for v in 0..250 {
                    list.lock().unwrap().insert(t * 250 + v);
                }
            }));
        }
        for handler in handlers {
            handler.join().unwrap();
        }
        let list = list.lock().unwrap();
        assert_eq!(list.len(), 1000);
        assert!(list.iter().copied().eq(0..1000));
        list.validate().unwrap();
    }
}
