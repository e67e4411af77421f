//! Route patterns: slash-separated literal and `{name}` segments.

use std::fmt;

/// Trims leading/trailing `/` and splits on `/`. `""` and `"/"` both give no segments.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// `{name}`: matches any one requested segment.
    Param(String),
}

impl Segment {
    pub fn parse(s: &str) -> Segment {
        if s.len() >= 2 && s.starts_with('{') && s.ends_with('}') {
            Segment::Param(s[1..s.len() - 1].to_string())
        } else {
            Segment::Literal(s.to_string())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Never fails; syntax problems are reported by the config validator.
    pub fn parse(raw: &str) -> RoutePattern {
        RoutePattern {
            raw: raw.to_string(),
            segments: split_path(raw).into_iter().map(Segment::parse).collect(),
        }
    }

    /// The pattern as written in config.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Normalized form with parameter names erased: `/posts/{id}` and `posts/{slug}/` share `/posts/{}`.
    pub fn shape(&self) -> String {
        let mut out = String::new();
        for s in &self.segments {
            out.push('/');
            match s {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(_) => out.push_str("{}"),
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        out
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
