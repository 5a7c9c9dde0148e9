//! Form handlers for creating, editing, and deleting posts.
//!
//! There is no authentication in front of these; whoever can reach the server
//! can edit the blog. Each handler finishes with a redirect so a refresh never
//! replays the form submission.

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    application::posts::{NewPost, PostPatch},
    presentation::views::{
        LayoutContext, PostFormTemplate, PostFormView, render_template_response,
    },
};

use super::{domain_error_to_http, public::HttpState};

#[derive(Debug, Deserialize)]
pub(crate) struct PostForm {
    pub(crate) title: String,
    pub(crate) content: String,
}

pub(crate) async fn new_post() -> Response {
    let view = LayoutContext::new(PostFormView::blank());
    render_template_response(PostFormTemplate { view }, StatusCode::OK)
}

pub(crate) async fn create_post(
    State(state): State<HttpState>,
    Form(form): Form<PostForm>,
) -> Response {
    let input = NewPost {
        title: form.title.trim().to_string(),
        content: form.content.trim().to_string(),
    };

    match state.posts.create(input).await {
        Ok(_) => Redirect::to("/blog").into_response(),
        Err(err) => domain_error_to_http("infra::http::create_post", err).into_response(),
    }
}

pub(crate) async fn edit_post(State(state): State<HttpState>, Path(id): Path<u64>) -> Response {
    match state.posts.get(id).await {
        Ok(post) => {
            let view = LayoutContext::new(PostFormView::for_post(&post));
            render_template_response(PostFormTemplate { view }, StatusCode::OK)
        }
        Err(err) => domain_error_to_http("infra::http::edit_post", err).into_response(),
    }
}

pub(crate) async fn update_post(
    State(state): State<HttpState>,
    Path(id): Path<u64>,
    Form(form): Form<PostForm>,
) -> Response {
    let patch = PostPatch {
        title: form.title.trim().to_string(),
        content: form.content.trim().to_string(),
    };

    match state.posts.update(id, patch).await {
        Ok(post) => Redirect::to(&format!("/blog/post/{}", post.id)).into_response(),
        Err(err) => domain_error_to_http("infra::http::update_post", err).into_response(),
    }
}

pub(crate) async fn delete_post(State(state): State<HttpState>, Path(id): Path<u64>) -> Response {
    match state.posts.delete(id).await {
        Ok(()) => Redirect::to("/blog").into_response(),
        Err(err) => domain_error_to_http("infra::http::delete_post", err).into_response(),
    }
}
