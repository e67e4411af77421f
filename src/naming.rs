//! Naming conventions: Rust type path -> table name.

/// Unqualified name of a type path, with any generic arguments stripped.
/// e.g. "blog::model::Article" -> "Article", "app::Wrapper<x::Y>" -> "Wrapper"
pub fn unqualified_type_name(type_path: &str) -> &str {
    let base = type_path.split('<').next().unwrap_or(type_path);
    base.rsplit("::").next().unwrap_or(base)
}

/// Table name for a type path: the unqualified name, lowercased. No pluralization.
/// e.g. "blog::model::Article" -> "article", "BlogPost" -> "blogpost"
pub fn table_name_for(type_path: &str) -> String {
    unqualified_type_name(type_path).to_lowercase()
}

/// Table name for `T`, derived from its type name.
pub fn table_name_of<T: ?Sized>() -> String {
    table_name_for(std::any::type_name::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Article;

    #[test]
    fn strips_module_path_and_lowercases() {
        assert_eq!(table_name_for("app::model::Article"), "article");
        assert_eq!(table_name_for("Article"), "article");
    }

    #[test]
    fn no_pluralization_or_snake_casing() {
        assert_eq!(table_name_for("crate::BlogPost"), "blogpost");
    }

    #[test]
    fn generic_arguments_are_ignored() {
        assert_eq!(unqualified_type_name("a::Wrapper<b::Inner>"), "Wrapper");
    }

    #[test]
    fn derives_from_rust_type() {
        assert_eq!(table_name_of::<Article>(), "article");
    }
}
