#![doc = include_str!("../README.md")]

pub mod checkpoint;
pub mod concepts;
pub mod error;
pub mod features;
pub mod network;
pub mod preprocess;
pub mod report;
pub mod wordnet;

pub use checkpoint::Checkpoint;
pub use concepts::{ConceptList, Wnid};
pub use error::{Error, Result};
pub use features::{Features, Prediction};
pub use network::{Layer, Network};
pub use report::write_top_concepts;
pub use wordnet::{Synset, WordNet};

/// Side length of the square input the network is bound to.
pub const INPUT_SIZE: u32 = 224;

/// Fixed input shape: one RGB frame, channels first.
pub const INPUT_SHAPE: [usize; 4] = [1, 3, INPUT_SIZE as usize, INPUT_SIZE as usize];
