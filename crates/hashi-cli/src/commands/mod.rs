//! CLI command definitions.

pub mod call;
pub mod check;
pub mod methods;
pub mod serve;
