//! Helpers shared by the page templates.

pub use crate::utils::pad_start;

/// Join `path` onto `base_url`.
///
/// The base loses any trailing slash and the path gains a leading one; an
/// empty path yields the base itself.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Root-relative form of a site path, left alone if it is already absolute
/// or a full URL.
pub fn site_path(path: &str) -> String {
    if path.contains("://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
