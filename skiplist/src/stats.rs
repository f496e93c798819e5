use std::fmt;

use crate::skiplist::SkipList;

/// How many nodes carry each layer count. The head sentinel is not counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerHistogram {
    // counts[i] is the number of nodes with exactly i layers; counts[0] stays 0
    counts: Vec<usize>,
}

impl LayerHistogram {
    fn new(max_layers: usize) -> Self {
        Self {
            counts: vec![0; max_layers + 1],
        }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn count(&self, layers: usize) -> usize {
        self.counts.get(layers).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn at_least(&self, layers: usize) -> usize {
        self.counts.iter().skip(layers).sum()
    }

    pub fn fraction_at_least(&self, layers: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.at_least(layers) as f64 / total as f64,
        }
    }
}

impl fmt::Display for LayerHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (layers, count) in self.counts.iter().enumerate().skip(1) {
            if layers > 1 {
                write!(f, "  ")?;
            }
            write!(f, "{}: {}", layers, count)?;
        }
        Ok(())
    }
}

impl<T> SkipList<T> {
    pub fn layer_histogram(&self) -> LayerHistogram {
        let mut histo = LayerHistogram::new(self.max_layers());
        for node in self.nodes() {
            histo.counts[node.num_layers()] += 1;
        }
        histo
    }
}
