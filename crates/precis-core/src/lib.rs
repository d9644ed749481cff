//! # precis-core
//!
//! Shared vocabulary for the precis workspace:
//!
//! - **Documents and segments**: [`Document`], [`Segment`], [`SegmentSummary`]
//! - **Entities**: [`Entity`], [`EntityMap`] with max-score merging
//! - **Capabilities**: the [`SummarizationModel`] and [`EntityModel`] traits
//!   that every model backend implements
//! - **Errors**: [`InvalidInputError`], [`ModelError`], [`SegmentFailure`]
//! - **Text helpers**: whitespace word counting used by every component

#![deny(unsafe_code)]

pub mod capability;
pub mod document;
pub mod entity;
pub mod errors;
pub mod segment;
pub mod text;

pub use capability::{EntityModel, SummarizationModel};
pub use document::Document;
pub use entity::{Entity, EntityLabel, EntityMap, EntityRecord};
pub use errors::{InvalidInputError, ModelError, SegmentFailure};
pub use segment::{Segment, SegmentOutcome, SegmentSummary};
pub use text::{char_count, word_count};
