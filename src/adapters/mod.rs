//! Adapters implementing domain ports.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports module: a bag-of-words feature extractor and a table-driven world.

pub mod bag_of_words;
pub mod table_world;

pub use bag_of_words::{BagOfWords, Vocabulary, tokenize};
pub use table_world::{StateDefinition, TableWorld, TransitionDefinition, WorldDefinition};
