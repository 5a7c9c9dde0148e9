use std::num::NonZeroUsize;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::Response,
    routing::{get, post},
};
use serde::Deserialize;

use crate::{
    application::posts::PostService,
    infra::store::PostStore,
    presentation::views::{
        AboutTemplate, AboutView, HomeTemplate, HomeView, LayoutContext, PostDetailView,
        PostTemplate, render_not_found_response, render_template_response,
    },
};

use super::{
    admin,
    middleware::{log_responses, set_request_context},
    store_health_response,
};

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub store: Arc<PostStore>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/blog", get(index))
        .route("/blog/about", get(about))
        .route("/blog/post/new", get(admin::new_post))
        .route("/blog/post", post(admin::create_post))
        .route("/blog/post/{id}", get(post_detail).post(admin::update_post))
        .route("/blog/post/{id}/edit", get(admin::edit_post))
        .route("/blog/post/{id}/delete", post(admin::delete_post))
        .route("/_health/store", get(store_health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageQuery {
    page: Option<usize>,
}

async fn index(State(state): State<HttpState>, Query(query): Query<PageQuery>) -> Response {
    // The pagination helper takes a 1-based NonZero page; clamping raw query
    // input is this caller's responsibility.
    let page = NonZeroUsize::new(query.page.unwrap_or(1).max(1)).expect("clamped to at least one");

    let listing = state.posts.list_page(page).await;
    let view = LayoutContext::new(HomeView::from_listing(&listing));
    render_template_response(HomeTemplate { view }, StatusCode::OK)
}

async fn post_detail(State(state): State<HttpState>, Path(id): Path<u64>) -> Response {
    match state.posts.get(id).await {
        Ok(post) => {
            let view = LayoutContext::new(PostDetailView::from_post(&post));
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        Err(_) => render_not_found_response(),
    }
}

async fn about() -> Response {
    let view = LayoutContext::new(AboutView);
    render_template_response(AboutTemplate { view }, StatusCode::OK)
}

async fn store_health(State(state): State<HttpState>) -> Response {
    store_health_response(state.store.try_load().await.map(|_| ()))
}

async fn fallback() -> Response {
    render_not_found_response()
}
