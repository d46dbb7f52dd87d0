mod catalog;
mod product;
mod query;

pub use catalog::*;
pub use product::*;
pub use query::*;
