//! Buck converter quantities and the data records built from them.
//!
//! A [`ParameterSet`] holds what the user knows about a design: up to eleven
//! primary quantities, each a finite SI value or absent. [`DerivedValues`]
//! holds what the [`infer`](crate::infer) engine computed from them.

mod derived;
mod set;
mod types;

pub use derived::{DerivedValues, Entry};
pub use set::ParameterSet;
pub use types::*;
