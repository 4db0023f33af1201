pub mod quote;
pub mod row;

pub use quote::*;
pub use row::*;
