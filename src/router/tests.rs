use super::*;
use crate::config::RouteConfig;

fn table(paths: &[(&str, &str)]) -> RouteTable {
    let routes: Vec<RouteConfig> = paths
        .iter()
        .map(|(path, method)| RouteConfig {
            path: path.to_string(),
            controller: "ArticleController".into(),
            method: method.to_string(),
        })
        .collect();
    RouteTable::from_config(&routes)
}

#[test]
fn test_split_path() {
    assert!(split_path("").is_empty());
    assert!(split_path("/").is_empty());
    assert_eq!(split_path("/blog/"), vec!["blog"]);
    assert_eq!(split_path("a/b"), vec!["a", "b"]);
}

#[test]
fn test_root_and_empty_match_alike() {
    let t = table(&[("/", "home")]);
    let a = match_path("/", &t).unwrap();
    let b = match_path("", &t).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.handler.method, "home");
    assert!(a.params.is_empty());
}

#[test]
fn test_nested_params() {
    let t = table(&[("/posts/{id}/comments/{cid}", "comment")]);
    let m = match_path("/posts/42/comments/7", &t).unwrap();
    assert_eq!(m.params.get("id"), Some("42"));
    assert_eq!(m.params.get("cid"), Some("7"));
    assert_eq!(m.params.len(), 2);
}

#[test]
fn test_first_declared_wins() {
    let t = table(&[("/posts/new", "add"), ("/posts/{id}", "show")]);
    assert_eq!(match_path("/posts/new", &t).unwrap().handler.method, "add");
    assert_eq!(match_path("/posts/3", &t).unwrap().handler.method, "show");

    let reversed = table(&[("/posts/{id}", "show"), ("/posts/new", "add")]);
    let m = match_path("/posts/new", &reversed).unwrap();
    assert_eq!(m.handler.method, "show");
    assert_eq!(m.params.get("id"), Some("new"));
}

#[test]
fn test_segment_count_must_match() {
    let t = table(&[("/posts/{id}", "show")]);
    assert!(match_path("/posts", &t).is_none());
    assert!(match_path("/posts/1/edit", &t).is_none());
    assert!(match_path("/", &t).is_none());
}

#[test]
fn test_literal_mismatch_tries_next() {
    let t = table(&[("/blog/{id}", "show"), ("/posts/{id}", "other")]);
    let m = match_path("/posts/1", &t).unwrap();
    assert_eq!(m.handler.method, "other");
    assert_eq!(m.pattern, "/posts/{id}");
}

#[test]
fn test_literals_are_case_sensitive() {
    let t = table(&[("/blog", "list")]);
    assert!(match_path("/Blog", &t).is_none());
}

#[test]
fn test_trailing_slash_ignored() {
    let t = table(&[("blog/", "list")]);
    assert!(match_path("/blog/", &t).is_some());
    assert!(match_path("blog", &t).is_some());
}

#[test]
fn test_repeated_param_last_wins() {
    let t = table(&[("/a/{x}/b/{x}", "twice")]);
    let m = match_path("/a/1/b/2", &t).unwrap();
    assert_eq!(m.params.get("x"), Some("2"));
    assert_eq!(m.params.len(), 1);
}

#[test]
fn test_matching_is_deterministic() {
    let t = table(&[("/posts/new", "add"), ("/posts/{id}", "show"), ("/", "home")]);
    for path in ["/posts/new", "/posts/9", "/", "/missing/x/y"] {
        assert_eq!(match_path(path, &t), match_path(path, &t));
    }
}

#[test]
fn test_no_match() {
    let t = table(&[("/blog", "list")]);
    assert!(t.resolve("/contact").is_none());
    assert!(match_path("/blog", &RouteTable::default()).is_none());
}

#[test]
fn test_pattern_shape() {
    assert_eq!(RoutePattern::parse("/posts/{id}").shape(), "/posts/{}");
    assert_eq!(RoutePattern::parse("/").shape(), "/");
    let names: Vec<_> = RoutePattern::parse("/p/{a}/x/{b}").param_names().map(String::from).collect();
    assert_eq!(names, vec!["a", "b"]);
}
