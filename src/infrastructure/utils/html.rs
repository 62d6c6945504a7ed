use ammonia::{Builder, UrlRelative};

/// Strips scripts, event handlers and unsafe URLs from admin-authored page
/// HTML before it is served publicly. Relative links stay, since pages link
/// to each other and to the directory.
pub fn sanitize_page_html(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::PassThrough)
        .clean(content)
        .to_string()
}
