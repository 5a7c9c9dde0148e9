//! Application service behind the form-facing post operations.
//!
//! Every operation re-loads the collection from the backing file and, when it
//! mutates, writes the whole collection back. Nothing is cached across calls,
//! so two handlers racing on the same file follow last-writer-wins.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::posts::{Post, current_timestamp, next_post_id};
use crate::infra::store::PostStore;

use super::pagination::{PostPage, paginate};

/// Posts shown per listing page. Fixed by design.
pub const LISTING_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(5).unwrap();

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct PostPatch {
    pub title: String,
    pub content: String,
}

/// One listing page plus the figures the pagination links need.
#[derive(Debug, Clone)]
pub struct PostListing {
    pub posts: Vec<Post>,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Clone)]
pub struct PostService {
    store: Arc<PostStore>,
}

impl PostService {
    pub fn new(store: Arc<PostStore>) -> Self {
        Self { store }
    }

    /// One listing page, most recent first.
    pub async fn list_page(&self, page: NonZeroUsize) -> PostListing {
        let posts = self.store.load().await;
        let PostPage { items, total_pages } = paginate(posts, page, LISTING_PAGE_SIZE);
        PostListing {
            posts: items,
            page: page.get(),
            total_pages,
        }
    }

    pub async fn get(&self, id: u64) -> Result<Post, DomainError> {
        self.store
            .load()
            .await
            .into_iter()
            .find(|post| post.id == id)
            .ok_or_else(|| DomainError::not_found("post"))
    }

    /// Append a new post with the next identifier and the current timestamp.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        ensure_non_blank(&input.title, "title")?;
        ensure_non_blank(&input.content, "content")?;

        let mut posts = self.store.load().await;
        let post = Post {
            id: next_post_id(&posts),
            title: input.title,
            content: input.content,
            date: current_timestamp(),
        };
        posts.push(post.clone());
        self.store.save(&posts).await;
        Ok(post)
    }

    /// Overwrite title, content, and date in place. The id never changes.
    pub async fn update(&self, id: u64, patch: PostPatch) -> Result<Post, DomainError> {
        ensure_non_blank(&patch.title, "title")?;
        ensure_non_blank(&patch.content, "content")?;

        let mut posts = self.store.load().await;
        let Some(existing) = posts.iter_mut().find(|post| post.id == id) else {
            return Err(DomainError::not_found("post"));
        };
        existing.title = patch.title;
        existing.content = patch.content;
        existing.date = current_timestamp();
        let updated = existing.clone();
        self.store.save(&posts).await;
        Ok(updated)
    }

    /// Drop the record from the collection. A missing id is rejected before
    /// anything is written, leaving the stored collection untouched.
    pub async fn delete(&self, id: u64) -> Result<(), DomainError> {
        let mut posts = self.store.load().await;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(DomainError::not_found("post"));
        }
        self.store.save(&posts).await;
        Ok(())
    }
}

fn ensure_non_blank(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} must not be blank")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use time::macros::datetime;

    use super::*;

    fn service(dir: &TempDir) -> PostService {
        let store = PostStore::open(dir.path().join("posts.json")).expect("opened store");
        PostService::new(Arc::new(store))
    }

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("{title} body"),
        }
    }

    #[tokio::test]
    async fn first_post_gets_id_one() {
        let dir = TempDir::new().expect("temp dir");
        let service = service(&dir);

        let post = service.create(new_post("hello")).await.expect("created");

        assert_eq!(post.id, 1);
    }

    #[tokio::test]
    async fn ids_continue_from_the_current_maximum() {
        let dir = TempDir::new().expect("temp dir");
        let service = service(&dir);

        let seeded = vec![
            Post {
                id: 3,
                title: "three".to_string(),
                content: "body".to_string(),
                date: datetime!(2025-01-03 08:00:00),
            },
            Post {
                id: 7,
                title: "seven".to_string(),
                content: "body".to_string(),
                date: datetime!(2025-01-07 08:00:00),
            },
        ];
        service.store.save(&seeded).await;

        let post = service.create(new_post("eight")).await.expect("created");

        assert_eq!(post.id, 8);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let service = service(&dir);

        let result = service
            .create(NewPost {
                title: "   ".to_string(),
                content: "body".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn get_missing_post_is_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let service = service(&dir);

        assert!(matches!(
            service.get(42).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn update_overwrites_everything_but_the_id() {
        let dir = TempDir::new().expect("temp dir");
        let service = service(&dir);

        let seeded = vec![Post {
            id: 1,
            title: "old title".to_string(),
            content: "old body".to_string(),
            date: datetime!(2020-01-01 08:00:00),
        }];
        service.store.save(&seeded).await;

        let updated = service
            .update(
                1,
                PostPatch {
                    title: "new title".to_string(),
                    content: "new body".to_string(),
                },
            )
            .await
            .expect("updated");

        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, "new title");
        assert_eq!(updated.content, "new body");
        assert!(updated.date > datetime!(2020-01-01 08:00:00));
    }

    #[tokio::test]
    async fn edited_post_sorts_to_the_front_of_the_listing() {
        let dir = TempDir::new().expect("temp dir");
        let service = service(&dir);

        let seeded = vec![
            Post {
                id: 1,
                title: "older".to_string(),
                content: "body".to_string(),
                date: datetime!(2020-01-01 08:00:00),
            },
            Post {
                id: 2,
                title: "newer".to_string(),
                content: "body".to_string(),
                date: datetime!(2021-01-01 08:00:00),
            },
        ];
        service.store.save(&seeded).await;

        service
            .update(
                1,
                PostPatch {
                    title: "freshly edited".to_string(),
                    content: "body".to_string(),
                },
            )
            .await
            .expect("updated");

        let listing = service
            .list_page(NonZeroUsize::new(1).unwrap())
            .await;
        let ids: Vec<u64> = listing.posts.iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn deleting_a_missing_id_leaves_the_collection_unchanged() {
        let dir = TempDir::new().expect("temp dir");
        let service = service(&dir);

        let first = service.create(new_post("keep me")).await.expect("created");

        let result = service.delete(99).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        let posts = service.store.load().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, first.id);
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let service = service(&dir);

        let result = service
            .update(
                5,
                PostPatch {
                    title: "title".to_string(),
                    content: "body".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
