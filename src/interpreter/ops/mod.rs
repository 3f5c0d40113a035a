//! Operator and object operation implementations, split by concern.

pub mod assign;
pub mod binary;
pub mod objects;
pub mod unary;
