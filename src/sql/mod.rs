//! Safe SQL builder: identifiers from entity definitions only, values as named parameters.

mod builder;
pub mod params;
mod query;
pub use builder::*;
pub use params::*;
pub use query::*;
