//! Schema types for color rules with serde (de)serialization.
//!
//! - `ThresholdOperator`: the fixed `gt | gte | lt | lte` set
//! - `ColorRule`: one record of a rule collection

mod operator;
mod rule;

pub use operator::*;
pub use rule::*;

#[cfg(test)]
mod tests;
