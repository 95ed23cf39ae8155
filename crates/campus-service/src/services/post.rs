//! Post service
//!
//! Listing, search, trending, CRUD, and the upvote/save toggles.

use std::collections::{HashMap, HashSet};

use campus_core::entities::{Post, PostStatus, User};
use campus_core::traits::{Page, PostFilter};
use chrono::{Duration, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CreatePostRequest, ListPostsQuery, PaginatedResponse, PostResponse, SaveToggleResponse,
    UpdatePostRequest, UpvoteToggleResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Rolling window for the trending feed
const TRENDING_WINDOW_DAYS: i64 = 7;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List posts with filters and viewer enrichment
    #[instrument(skip(self, query))]
    pub async fn list_posts(
        &self,
        query: ListPostsQuery,
        viewer: Option<Uuid>,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let filter = PostFilter {
            post_type: query.post_type,
            college: query.college,
            department: query.department,
            query: query.query,
            only_pinned: query.only_pinned,
            ..PostFilter::default()
        };
        let page = Page::new(query.skip.unwrap_or(0), query.limit.unwrap_or(20));

        self.list_filtered(&filter, page, viewer).await
    }

    /// List the viewer's saved posts
    #[instrument(skip(self))]
    pub async fn saved_posts(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let filter = PostFilter {
            saved_by: Some(user_id),
            ..PostFilter::default()
        };

        self.list_filtered(&filter, page, Some(user_id)).await
    }

    /// Shared filtered listing with a true total count
    pub(crate) async fn list_filtered(
        &self,
        filter: &PostFilter,
        page: Page,
        viewer: Option<Uuid>,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let posts = self.ctx.post_repo().list(filter, page).await?;
        let total = self.ctx.post_repo().count(filter).await?;
        let data = self.enrich(posts, viewer).await?;

        Ok(PaginatedResponse::new(data, page.offset, page.limit, total))
    }

    /// Trending posts: active, created in the last 7 rolling days, scored by
    /// upvotes + 3x comments + views/100
    #[instrument(skip(self))]
    pub async fn trending(
        &self,
        limit: i64,
        viewer: Option<Uuid>,
    ) -> ServiceResult<Vec<PostResponse>> {
        let since = Utc::now() - Duration::days(TRENDING_WINDOW_DAYS);
        let posts = self.ctx.post_repo().trending(since, limit).await?;

        self.enrich(posts, viewer).await
    }

    /// Get a single post, bumping its view counter
    ///
    /// The view increment happens on every fetch; it is deliberately not
    /// deduplicated per viewer.
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Uuid, viewer: Option<Uuid>) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        self.ctx.post_repo().increment_views(post_id).await?;

        let mut responses = self.enrich(vec![post], viewer).await?;
        responses
            .pop()
            .ok_or_else(|| ServiceError::internal("post enrichment dropped the row"))
    }

    /// Create a new post
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: Uuid,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            post_type: request.post_type,
            title: request.title,
            content: request.content,
            image_url: request.image_url,
            author_id,
            tags: request.tags,
            target_colleges: request.target_colleges,
            target_departments: request.target_departments,
            event_date: request.event_date,
            event_time: request.event_time,
            location: request.location,
            price: request.price,
            condition: request.condition,
            contact_info: request.contact_info,
            link_url: request.link_url,
            deadline: request.deadline,
            views: 0,
            upvotes_count: 0,
            saves_count: 0,
            comments_count: 0,
            community_id: request.community_id,
            status: PostStatus::Active,
            is_pinned: request.is_pinned,
            created_at: now,
            updated_at: now,
        };

        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        Ok(PostResponse::from_post(&post, &author, false, false))
    }

    /// Update a post (owner or platform admin only)
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        post_id: Uuid,
        actor_id: Uuid,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        self.require_author_or_admin(&post, actor_id, "You can only update your own posts")
            .await?;

        if let Some(title) = request.title {
            post.title = title;
        }
        if let Some(content) = request.content {
            post.content = content;
        }
        if let Some(tags) = request.tags {
            post.tags = tags;
        }
        if let Some(status) = request.status {
            post.status = status;
        }
        if let Some(image_url) = request.image_url {
            post.image_url = Some(image_url);
        }
        if let Some(location) = request.location {
            post.location = Some(location);
        }
        if let Some(price) = request.price {
            post.price = Some(price);
        }
        if let Some(link_url) = request.link_url {
            post.link_url = Some(link_url);
        }
        post.updated_at = Utc::now();

        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post_id, actor_id = %actor_id, "Post updated");

        let mut responses = self.enrich(vec![post], Some(actor_id)).await?;
        responses
            .pop()
            .ok_or_else(|| ServiceError::internal("post enrichment dropped the row"))
    }

    /// Delete a post (owner or platform admin only)
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Uuid, actor_id: Uuid) -> ServiceResult<()> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        self.require_author_or_admin(&post, actor_id, "You can only delete your own posts")
            .await?;

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, actor_id = %actor_id, "Post deleted");

        Ok(())
    }

    /// Flip the viewer's upvote on a post
    #[instrument(skip(self))]
    pub async fn toggle_upvote(
        &self,
        post_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<UpvoteToggleResponse> {
        let outcome = self.ctx.post_repo().toggle_upvote(post_id, user_id).await?;

        info!(
            post_id = %post_id,
            user_id = %user_id,
            upvoted = outcome.active,
            "Upvote toggled"
        );

        Ok(UpvoteToggleResponse {
            upvoted: outcome.active,
            count: outcome.count,
        })
    }

    /// Flip the viewer's save on a post
    #[instrument(skip(self))]
    pub async fn toggle_save(
        &self,
        post_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<SaveToggleResponse> {
        let outcome = self.ctx.post_repo().toggle_save(post_id, user_id).await?;

        info!(
            post_id = %post_id,
            user_id = %user_id,
            saved = outcome.active,
            "Save toggled"
        );

        Ok(SaveToggleResponse {
            saved: outcome.active,
            count: outcome.count,
        })
    }

    /// Attach authors and per-viewer flags to a page of posts
    ///
    /// Flags are resolved with one batched query per flag for the whole page;
    /// an anonymous viewer gets both flags false.
    pub(crate) async fn enrich(
        &self,
        posts: Vec<Post>,
        viewer: Option<Uuid>,
    ) -> ServiceResult<Vec<PostResponse>> {
        if posts.is_empty() {
            return Ok(vec![]);
        }

        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let (upvoted, saved) = match viewer {
            Some(viewer_id) => {
                let upvoted: HashSet<Uuid> = self
                    .ctx
                    .post_repo()
                    .upvoted_ids(viewer_id, &post_ids)
                    .await?
                    .into_iter()
                    .collect();
                let saved: HashSet<Uuid> = self
                    .ctx
                    .post_repo()
                    .saved_ids(viewer_id, &post_ids)
                    .await?
                    .into_iter()
                    .collect();
                (upvoted, saved)
            }
            None => (HashSet::new(), HashSet::new()),
        };

        let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<Uuid, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        posts
            .iter()
            .map(|post| {
                let author = authors.get(&post.author_id).ok_or_else(|| {
                    ServiceError::internal(format!("author {} missing for post", post.author_id))
                })?;
                Ok(PostResponse::from_post(
                    post,
                    author,
                    upvoted.contains(&post.id),
                    saved.contains(&post.id),
                ))
            })
            .collect()
    }

    /// Ownership check with platform-admin bypass
    async fn require_author_or_admin(
        &self,
        post: &Post,
        actor_id: Uuid,
        denial: &str,
    ) -> ServiceResult<()> {
        if post.is_author(actor_id) {
            return Ok(());
        }

        let actor = self
            .ctx
            .user_repo()
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", actor_id.to_string()))?;

        if actor.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(denial))
        }
    }
}

#[cfg(test)]
mod tests {
    // Listing, toggles, and trending are exercised end-to-end in
    // tests/integration and campus-db's repository tests.
}
