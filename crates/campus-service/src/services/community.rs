//! Community service
//!
//! Search, creation (with the creator auto-joined as admin), the join/leave
//! state machine, member listings, and community post feeds.

use std::collections::HashMap;

use campus_core::entities::Community;
use campus_core::traits::{Page, PostFilter};
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CommunityResponse, CreateCommunityRequest, JoinResponse, LeaveResponse, ListCommunitiesQuery,
    MemberResponse, PaginatedResponse, PostResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::PostService;

/// Community service
pub struct CommunityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommunityService<'a> {
    /// Create a new CommunityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Search communities, ordered by member count
    #[instrument(skip(self, query))]
    pub async fn list_communities(
        &self,
        query: ListCommunitiesQuery,
        viewer: Option<Uuid>,
    ) -> ServiceResult<Vec<CommunityResponse>> {
        let page = Page::new(query.skip.unwrap_or(0), query.limit.unwrap_or(20));
        let communities = self
            .ctx
            .community_repo()
            .search(query.query.as_deref(), query.community_type, page)
            .await?;

        self.enrich(communities, viewer).await
    }

    /// Create a community; the creator becomes its first (admin) member
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_community(
        &self,
        creator_id: Uuid,
        request: CreateCommunityRequest,
    ) -> ServiceResult<CommunityResponse> {
        if self
            .ctx
            .community_repo()
            .find_by_name(&request.name)
            .await?
            .is_some()
        {
            return Err(ServiceError::Domain(
                campus_core::DomainError::CommunityNameExists(request.name),
            ));
        }

        let now = Utc::now();
        let community = Community {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            member_count: 1,
            community_type: request.community_type,
            image_url: request.image_url,
            college: request.college,
            creator_id,
            created_at: now,
            updated_at: now,
        };

        self.ctx.community_repo().create(&community).await?;

        info!(community_id = %community.id, creator_id = %creator_id, "Community created");

        Ok(CommunityResponse::from_community(&community, true, true))
    }

    /// Get a community with the viewer's membership flags
    #[instrument(skip(self))]
    pub async fn get_community(
        &self,
        community_id: Uuid,
        viewer: Option<Uuid>,
    ) -> ServiceResult<CommunityResponse> {
        let community = self
            .ctx
            .community_repo()
            .find_by_id(community_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Community", community_id.to_string()))?;

        let (is_member, is_admin) = match viewer {
            Some(viewer_id) => {
                let membership = self.ctx.member_repo().find(community_id, viewer_id).await?;
                (
                    membership.is_some(),
                    membership.is_some_and(|m| m.is_admin),
                )
            }
            None => (false, false),
        };

        Ok(CommunityResponse::from_community(
            &community, is_member, is_admin,
        ))
    }

    /// Join a community (soft failure on missing community / duplicate join)
    #[instrument(skip(self))]
    pub async fn join(&self, community_id: Uuid, user_id: Uuid) -> ServiceResult<JoinResponse> {
        let outcome = self.ctx.member_repo().join(community_id, user_id).await?;

        if outcome.joined {
            info!(community_id = %community_id, user_id = %user_id, "User joined community");
        }

        Ok(JoinResponse {
            joined: outcome.joined,
            member_count: outcome.member_count,
            message: outcome.message,
        })
    }

    /// Leave a community (soft failure on missing membership / admin)
    #[instrument(skip(self))]
    pub async fn leave(&self, community_id: Uuid, user_id: Uuid) -> ServiceResult<LeaveResponse> {
        let outcome = self.ctx.member_repo().leave(community_id, user_id).await?;

        if outcome.left {
            info!(community_id = %community_id, user_id = %user_id, "User left community");
        }

        Ok(LeaveResponse {
            left: outcome.left,
            member_count: outcome.member_count,
            message: outcome.message,
        })
    }

    /// Member listing ordered by join time
    #[instrument(skip(self))]
    pub async fn members(
        &self,
        community_id: Uuid,
        page: Page,
    ) -> ServiceResult<Vec<MemberResponse>> {
        if self
            .ctx
            .community_repo()
            .find_by_id(community_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Community", community_id.to_string()));
        }

        let members = self.ctx.member_repo().list(community_id, page).await?;

        Ok(members.into_iter().map(MemberResponse::from).collect())
    }

    /// Posts attached to a community via its foreign key
    #[instrument(skip(self))]
    pub async fn community_posts(
        &self,
        community_id: Uuid,
        page: Page,
        viewer: Option<Uuid>,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        if self
            .ctx
            .community_repo()
            .find_by_id(community_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Community", community_id.to_string()));
        }

        let filter = PostFilter {
            community_id: Some(community_id),
            ..PostFilter::default()
        };

        PostService::new(self.ctx)
            .list_filtered(&filter, page, viewer)
            .await
    }

    /// Attach per-viewer membership flags to a page of communities
    ///
    /// Flags are resolved with one batched query for the whole page; an
    /// anonymous viewer gets both flags false.
    async fn enrich(
        &self,
        communities: Vec<Community>,
        viewer: Option<Uuid>,
    ) -> ServiceResult<Vec<CommunityResponse>> {
        if communities.is_empty() {
            return Ok(vec![]);
        }

        let memberships: HashMap<Uuid, bool> = match viewer {
            Some(viewer_id) => {
                let community_ids: Vec<Uuid> = communities.iter().map(|c| c.id).collect();
                self.ctx
                    .member_repo()
                    .membership_flags(viewer_id, &community_ids)
                    .await?
                    .into_iter()
                    .collect()
            }
            None => HashMap::new(),
        };

        Ok(communities
            .iter()
            .map(|community| {
                let membership = memberships.get(&community.id);
                CommunityResponse::from_community(
                    community,
                    membership.is_some(),
                    membership.copied().unwrap_or(false),
                )
            })
            .collect())
    }
}
