//! Core data types for the spread scanner.

pub mod exchange;
pub mod opportunity;
pub mod quote;
pub mod symbol;

pub use exchange::*;
pub use opportunity::*;
pub use quote::*;
pub use symbol::*;
