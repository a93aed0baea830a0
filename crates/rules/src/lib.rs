//! Editing protocol for ordered color rule lists.
//!
//! This crate provides:
//! - Serde schema for rule records and their comparison operators
//! - Typed coercion of raw widget input (numeric, text, operator)
//! - Copy-on-write collection actions (add, delete, update)
//! - A callback-style editor that proposes new collections to their owner
//! - Row view state and color resolution for a metric value

pub mod coerce;
pub mod collection;
pub mod editor;
pub mod evaluator;
pub mod model;
pub mod schema;
pub mod view;

pub use coerce::{Coerced, FieldCoercer};
pub use collection::CollectionAction;
pub use editor::{EditorOptions, RuleListEditor};
pub use model::ModelPatch;
pub use schema::{ColorRule, ThresholdOperator};
