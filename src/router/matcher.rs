//! Path matching: first declared pattern with equal segment count and matching literals wins.

use crate::router::{split_path, HandlerRef, RouteParams, RouteTable, Segment};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub handler: HandlerRef,
    pub params: RouteParams,
    /// Pattern text that matched, for logging.
    pub pattern: String,
}

/// Pure: no ranking by specificity and no ambiguity detection. A pattern that
/// repeats a parameter name keeps the last extracted value.
pub fn match_path(path: &str, table: &RouteTable) -> Option<RouteMatch> {
    let requested = split_path(path);
    'candidates: for route in table.routes() {
        if route.pattern.len() != requested.len() {
            continue;
        }
        let mut params = RouteParams::new();
        for (segment, part) in route.pattern.segments().iter().zip(&requested) {
            match segment {
                Segment::Param(name) => params.insert(name.as_str(), *part),
                Segment::Literal(text) => {
                    if text.as_str() != *part {
                        continue 'candidates;
                    }
                }
            }
        }
        return Some(RouteMatch {
            handler: route.handler.clone(),
            params,
            pattern: route.pattern.as_str().to_string(),
        });
    }
    None
}
