//! Askama template structs for the generated site.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.

use askama::Template;

use crate::viewer::QuatrainView;

/// Filters available to the templates.
mod filters {
    use std::fmt::Display;

    /// `{{ path|absolute_url(base_url) }}`
    pub fn absolute_url<T: Display>(path: T, base_url: &str) -> askama::Result<String> {
        Ok(crate::site::filters::absolute_url(base_url, &path.to_string()))
    }

    /// `{{ number|pad_start(3, '0') }}`
    pub fn pad_start<T: Display>(value: T, len: usize, fill: char) -> askama::Result<String> {
        Ok(crate::utils::pad_start(value, len, fill))
    }
}

/// Link to a neighbouring quatrain page.
pub struct PageLink {
    pub href: String,
    pub label: String,
}

/// Option in the century selector.
pub struct CenturyOption {
    pub value: u8,
    pub label: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub base_url: &'a str,
    /// Site path of the page; the canonical URL is built from it.
    pub path: String,
    pub centuries: Vec<CenturyOption>,
    pub quatrain_count: usize,
}

#[derive(Template)]
#[template(path = "quatrain.html")]
pub struct QuatrainPageTemplate<'a> {
    pub title: String,
    pub base_url: &'a str,
    pub path: String,
    pub view: &'a QuatrainView,
    pub prev: Option<PageLink>,
    pub next: Option<PageLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quatrain, QuatrainId};
    use crate::viewer::{render::render, RenderOptions};

    #[test]
    fn test_index_canonical_from_base_url() {
        let page = IndexTemplate {
            title: "Quatrains",
            base_url: "https://quatrains.test/",
            path: "/".into(),
            centuries: Vec::new(),
            quatrain_count: 0,
        };
        let html = page.render().unwrap();
        assert!(html.contains(r#"<link rel="canonical" href="https://quatrains.test/">"#));
    }

    #[test]
    fn test_quatrain_permalink_is_padded() {
        let id = QuatrainId::from_parts(3, 7).unwrap();
        let view = render(id, &Quatrain::default(), &RenderOptions::default());
        let page = QuatrainPageTemplate {
            title: view.title.clone(),
            base_url: "https://quatrains.test",
            path: id.link(),
            view: &view,
            prev: None,
            next: None,
        };
        let html = page.render().unwrap();
        assert!(html.contains(r#"id="permalink" href="/c3/q007/""#));
        assert!(html.contains(r#"<meta property="og:url" content="https://quatrains.test/c3/q007/">"#));
    }
}
