use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("a skip list needs at least one layer")]
    ZeroLayers,
    #[error("{requested} layers requested, at most {max} are supported")]
    TooManyLayers { requested: usize, max: usize },

    // Reported by `SkipList::validate`.
    #[error("layer {layer} links to empty slot {slot}")]
    DanglingLink { layer: usize, slot: usize },
    #[error("layer {layer} is not strictly increasing at slot {slot}")]
    OutOfOrder { layer: usize, slot: usize },
    #[error("slot {slot} is linked at layer {layer} but missing from the layer below")]
    BrokenNesting { layer: usize, slot: usize },
    #[error("slot {slot} is linked at layer {layer} but only has {layers} layers")]
    LinkBeyondLayers {
        layer: usize,
        slot: usize,
        layers: usize,
    },
    #[error("layer {layer} links {linked} nodes, {expected} nodes reach it")]
    UnlinkedLayer {
        layer: usize,
        expected: usize,
        linked: usize,
    },
    #[error("{counted} nodes reachable but length is {recorded}")]
    LengthMismatch { counted: usize, recorded: usize },
}
