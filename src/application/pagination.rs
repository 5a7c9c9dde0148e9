//! Pure sort-and-slice pagination over the loaded post collection.

use std::num::NonZeroUsize;

use crate::domain::posts::Post;

/// One display page plus the page count for the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub items: Vec<Post>,
    pub total_pages: usize,
}

/// Sort the collection by `date` descending and cut the requested window.
///
/// The sort is stable: posts sharing a timestamp keep their relative order
/// from the input collection. A page past the end of the data yields an empty
/// slice rather than an error; `total_pages` is zero for an empty collection.
/// Clamping raw user input into the `NonZeroUsize` arguments is the caller's
/// job, not this helper's.
pub fn paginate(mut posts: Vec<Post>, page: NonZeroUsize, page_size: NonZeroUsize) -> PostPage {
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    let size = page_size.get();
    let total_pages = posts.len().div_ceil(size);

    let start = (page.get() - 1).saturating_mul(size);
    let items = if start >= posts.len() {
        Vec::new()
    } else {
        let end = (start + size).min(posts.len());
        posts[start..end].to_vec()
    };

    PostPage { items, total_pages }
}
