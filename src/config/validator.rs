//! Config validation: route syntax and uniqueness, checked once at startup.

use crate::config::{FullConfig, RouteConfig};
use crate::error::ConfigError;
use crate::router::{RoutePattern, Segment};
use regex::Regex;
use std::collections::HashSet;

pub fn validate(config: &FullConfig) -> Result<(), ConfigError> {
    if config.app.body_limit == 0 {
        return Err(ConfigError::Validation("app.body_limit must be positive".into()));
    }
    validate_routes(&config.routes)
}

/// Rejects empty handler names, malformed or repeated placeholders, and patterns
/// with the same shape as an earlier pattern. A literal declared after a
/// parameter pattern that covers it is accepted; first-declared still wins.
pub fn validate_routes(routes: &[RouteConfig]) -> Result<(), ConfigError> {
    let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").map_err(|e| ConfigError::Validation(e.to_string()))?;
    let mut shapes = HashSet::new();

    for route in routes {
        if route.controller.trim().is_empty() || route.method.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "route '{}' needs a controller and a method",
                route.path
            )));
        }
        let pattern = RoutePattern::parse(&route.path);
        let mut names = HashSet::new();
        for segment in pattern.segments() {
            match segment {
                Segment::Param(name) => {
                    if !ident.is_match(name) {
                        return Err(ConfigError::InvalidPlaceholder {
                            pattern: route.path.clone(),
                            segment: format!("{{{}}}", name),
                        });
                    }
                    if !names.insert(name.as_str()) {
                        return Err(ConfigError::DuplicateParam {
                            pattern: route.path.clone(),
                            name: name.clone(),
                        });
                    }
                }
                Segment::Literal(text) => {
                    if text.contains('{') || text.contains('}') {
                        return Err(ConfigError::InvalidPlaceholder {
                            pattern: route.path.clone(),
                            segment: text.clone(),
                        });
                    }
                }
            }
        }
        if !shapes.insert(pattern.shape()) {
            return Err(ConfigError::DuplicatePattern(route.path.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str) -> RouteConfig {
        RouteConfig {
            path: path.into(),
            controller: "MainController".into(),
            method: "home".into(),
        }
    }

    #[test]
    fn accepts_ordinary_table() {
        let routes = vec![route("/"), route("/posts/new"), route("/posts/{id}"), route("/posts/{id}/comments/{cid}")];
        validate_routes(&routes).unwrap();
    }

    #[test]
    fn rejects_repeated_parameter_name() {
        let err = validate_routes(&[route("/a/{id}/b/{id}")]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateParam { ref name, .. } if name == "id"));
    }

    #[test]
    fn rejects_malformed_placeholders() {
        assert!(matches!(
            validate_routes(&[route("/a/{}")]).unwrap_err(),
            ConfigError::InvalidPlaceholder { .. }
        ));
        assert!(matches!(
            validate_routes(&[route("/a/x{id}")]).unwrap_err(),
            ConfigError::InvalidPlaceholder { .. }
        ));
        assert!(matches!(
            validate_routes(&[route("/a/{1d}")]).unwrap_err(),
            ConfigError::InvalidPlaceholder { .. }
        ));
    }

    #[test]
    fn rejects_shadowed_pattern() {
        let err = validate_routes(&[route("/posts/{id}"), route("posts/{slug}/")]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePattern(ref p) if p == "posts/{slug}/"));
    }

    #[test]
    fn literal_after_parameter_is_accepted() {
        validate_routes(&[route("/posts/{id}"), route("/posts/new")]).unwrap();
    }

    #[test]
    fn rejects_missing_method() {
        let mut r = route("/");
        r.method = " ".into();
        assert!(matches!(validate_routes(&[r]).unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_zero_body_limit() {
        let mut config = FullConfig::default();
        config.app.body_limit = 0;
        assert!(validate(&config).is_err());
    }
}
