//! Repositories
//!
//! Data access for the four record kinds. Each repository is a trait with
//! an sqlx-backed implementation so handlers and tests can depend on the
//! interface.

mod contact;
mod gallery;
mod timeline;
mod tribute;

pub use contact::{ContactRepository, SqlxContactRepository};
pub use gallery::{GalleryRepository, SqlxGalleryRepository};
pub use timeline::{SqlxTimelineRepository, TimelineRepository};
pub use tribute::{SqlxTributeRepository, TributeRepository};

/// Escape LIKE wildcards so a user-supplied search term matches literally.
///
/// Used with `LIKE ? ESCAPE '\'`.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like_passthrough() {
        assert_eq!(escape_like("grandpa"), "grandpa");
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\d"), "c:\\\\d");
    }
}
