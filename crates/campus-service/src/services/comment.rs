//! Comment service
//!
//! Comment creation with its reply-notification side effect, and reply-tree
//! assembly for listing.

use std::collections::HashMap;

use campus_core::entities::{Comment, Notification, NotificationType, User};
use campus_core::traits::Page;
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{CommentResponse, CreateCommentRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a comment on a post
    ///
    /// When the commenter is not the post author, a `reply` notification is
    /// fired at the author. The notification is best-effort: a failure is
    /// logged and never fails the comment creation.
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        if let Some(parent_id) = request.parent_id {
            let parent = self
                .ctx
                .comment_repo()
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Comment", parent_id.to_string()))?;

            if parent.post_id != post_id {
                return Err(ServiceError::validation(
                    "Parent comment belongs to a different post",
                ));
            }
        }

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            content: request.content,
            post_id,
            author_id,
            parent_id: request.parent_id,
            created_at: now,
            updated_at: now,
        };

        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");

        if post.author_id != author_id {
            let notification = Notification {
                id: Uuid::new_v4(),
                notification_type: NotificationType::Reply,
                message: format!("{} commented on your post", author.display_name),
                read: false,
                user_id: post.author_id,
                post_id: Some(post_id),
                comment_id: Some(comment.id),
                community_id: None,
                meta: json!({ "commenter_id": author_id }),
                created_at: now,
            };

            // Best-effort: the comment stands even if the notification fails
            if let Err(e) = self.ctx.notification_repo().create(&notification).await {
                warn!(
                    error = %e,
                    comment_id = %comment.id,
                    "Failed to create reply notification"
                );
            }
        }

        Ok(comment_response(&comment, &author, vec![]))
    }

    /// List a post's top-level comments with their full reply trees
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        post_id: Uuid,
        page: Page,
    ) -> ServiceResult<Vec<CommentResponse>> {
        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(ServiceError::not_found("Post", post_id.to_string()));
        }

        let top_level = self.ctx.comment_repo().find_top_level(post_id, page).await?;

        // Breadth-first fetch of every reply level under the page
        let mut all_replies: Vec<Comment> = Vec::new();
        let mut level_ids: Vec<Uuid> = top_level.iter().map(|c| c.id).collect();
        while !level_ids.is_empty() {
            let replies = self.ctx.comment_repo().find_replies(&level_ids).await?;
            if replies.is_empty() {
                break;
            }
            level_ids = replies.iter().map(|c| c.id).collect();
            all_replies.extend(replies);
        }

        // Batch the authors for the whole tree
        let mut author_ids: Vec<Uuid> = top_level
            .iter()
            .chain(all_replies.iter())
            .map(|c| c.author_id)
            .collect();
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

        let mut children: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for reply in all_replies {
            if let Some(parent_id) = reply.parent_id {
                children.entry(parent_id).or_default().push(reply);
            }
        }

        top_level
            .iter()
            .map(|comment| build_tree(comment, &children, &authors))
            .collect()
    }
}

/// Recursively assemble a comment's reply tree
fn build_tree(
    comment: &Comment,
    children: &HashMap<Uuid, Vec<Comment>>,
    authors: &HashMap<Uuid, User>,
) -> ServiceResult<CommentResponse> {
    let author = authors.get(&comment.author_id).ok_or_else(|| {
        ServiceError::internal(format!("author {} missing for comment", comment.author_id))
    })?;

    let replies = children
        .get(&comment.id)
        .map(|replies| {
            replies
                .iter()
                .map(|reply| build_tree(reply, children, authors))
                .collect::<ServiceResult<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(comment_response(comment, author, replies))
}

fn comment_response(
    comment: &Comment,
    author: &User,
    replies: Vec<CommentResponse>,
) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        content: comment.content.clone(),
        post_id: comment.post_id,
        author: UserResponse::from(author),
        parent_id: comment.parent_id,
        replies,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::entities::UserRole;
    use campus_core::value_objects::College;

    fn sample_user(id: Uuid) -> User {
        User {
            id,
            username: "jdoe".to_string(),
            email: "jdoe@stu.cu.edu.ng".to_string(),
            display_name: "Jane Doe".to_string(),
            role: UserRole::Student,
            avatar_url: None,
            college: College::Cst,
            department: "Computer Science".to_string(),
            bio: None,
            is_verified: false,
            interests: vec![],
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn sample_comment(id: Uuid, author_id: Uuid, parent_id: Option<Uuid>) -> Comment {
        let now = Utc::now();
        Comment {
            id,
            content: "text".to_string(),
            post_id: Uuid::new_v4(),
            author_id,
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_build_tree_nests_replies() {
        let author_id = Uuid::new_v4();
        let root_id = Uuid::new_v4();
        let reply_id = Uuid::new_v4();
        let nested_id = Uuid::new_v4();

        let root = sample_comment(root_id, author_id, None);
        let reply = sample_comment(reply_id, author_id, Some(root_id));
        let nested = sample_comment(nested_id, author_id, Some(reply_id));

        let mut children: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        children.insert(root_id, vec![reply]);
        children.insert(reply_id, vec![nested]);

        let mut authors = HashMap::new();
        authors.insert(author_id, sample_user(author_id));

        let tree = build_tree(&root, &children, &authors).unwrap();
        assert_eq!(tree.replies.len(), 1);
        assert_eq!(tree.replies[0].id, reply_id);
        assert_eq!(tree.replies[0].replies.len(), 1);
        assert_eq!(tree.replies[0].replies[0].id, nested_id);
        assert!(tree.replies[0].replies[0].replies.is_empty());
    }

    #[test]
    fn test_build_tree_missing_author_is_an_error() {
        let root = sample_comment(Uuid::new_v4(), Uuid::new_v4(), None);
        let result = build_tree(&root, &HashMap::new(), &HashMap::new());
        assert!(result.is_err());
    }
}
