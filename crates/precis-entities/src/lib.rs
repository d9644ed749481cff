//! # precis-entities
//!
//! Named-entity aggregation: text is sliced into sentences, each sentence
//! goes through an injected [`EntityModel`](precis_core::EntityModel), and
//! occurrences are merged into an [`EntityMap`](precis_core::EntityMap)
//! that keeps the highest-scoring label per surface form.

#![deny(unsafe_code)]

pub mod aggregator;

pub use aggregator::{AggregatorConfig, EntityAggregator, split_sentences};
