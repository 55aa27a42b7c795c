//! Blog generation and retrieval handlers.

use actix_web::{HttpResponse, web};

use blogforge_core::domain::BlogPost;
use blogforge_core::pipeline::BlogRequest;
use blogforge_shared::dto::{
    BlogPostResponse, ComposeInfoResponse, GenerateBlogRequest, GenerateBlogResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const LIST_LOCATION: &str = "/api/blogs";

fn post_response(post: &BlogPost) -> BlogPostResponse {
    BlogPostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        source_link: post.source_link.clone(),
        content: post.content.clone(),
        created_at: post.created_at.to_rfc3339(),
    }
}

fn redirect_to_list() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", LIST_LOCATION))
        .finish()
}

/// GET /api/blogs/compose - bootstrap data for the compose view.
pub async fn compose_info(
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ComposeInfoResponse {
        transcript_strategy: state.transcript_strategy.as_str().to_string(),
        generator_ready: state.generator_ready,
        metadata_ready: state.metadata_ready,
    }))
}

/// POST /api/blogs - run the generate pipeline and persist the result.
///
/// The post is only created after every stage succeeded; a failure anywhere
/// leaves nothing behind.
pub async fn generate(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<GenerateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let generated = state
        .pipeline
        .run(&BlogRequest {
            title: req.title,
            transcript: req.transcript,
            link: req.link,
        })
        .await?;

    let post = BlogPost::new(
        identity.user_id,
        generated.title,
        generated.source_link,
        generated.content,
    );
    let saved = state.posts.save(post).await?;

    tracing::info!(post_id = %saved.id, owner = %identity.username, "blog post generated");

    Ok(HttpResponse::Ok().json(GenerateBlogResponse {
        title: saved.title,
        content: saved.content,
    }))
}

/// GET /api/blogs - the authenticated user's posts, newest first.
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.find_by_user_id(identity.user_id).await?;

    let response: Vec<BlogPostResponse> = posts.iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/blogs/{id} - a single post, owner only.
///
/// Anything that is not the owner's own existing post redirects back to the
/// list rather than erroring, so the response does not reveal whether the
/// post exists.
pub async fn detail(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let Ok(post_id) = path.into_inner().parse::<uuid::Uuid>() else {
        return Ok(redirect_to_list());
    };

    let Some(post) = state.posts.find_by_id(post_id).await? else {
        return Ok(redirect_to_list());
    };

    if post.user_id != identity.user_id {
        tracing::debug!(%post_id, requester = %identity.username, "non-owner detail access");
        return Ok(redirect_to_list());
    }

    Ok(HttpResponse::Ok().json(post_response(&post)))
}
