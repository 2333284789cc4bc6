//! Core domain types for bulk order signing.

pub mod abi;
pub mod item;
pub mod order;

pub use item::*;
pub use order::*;
