//! Path router: pattern table, matcher, and the parameter bag it produces.

mod matcher;
mod params;
mod pattern;
mod table;

pub use matcher::{match_path, RouteMatch};
pub use params::RouteParams;
pub use pattern::{split_path, RoutePattern, Segment};
pub use table::{HandlerRef, Route, RouteTable};

#[cfg(test)]
mod tests;
