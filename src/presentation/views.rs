//! View models and askama templates for the public pages and the post forms.

use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use time::OffsetDateTime;

use crate::application::error::{ErrorReport, HttpError};
use crate::application::posts::PostListing;
use crate::domain::posts::{Post, format_human_date};

const BRAND_TITLE: &str = "Foglio";
const PREVIEW_CHARS: usize = 240;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let view = LayoutContext::new(ErrorPageView::not_found());
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// Shared page shell: brand plus the footer year, recomputed per render.
#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: &'static str,
    pub year: i32,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(content: T) -> Self {
        Self {
            brand: BRAND_TITLE,
            year: OffsetDateTime::now_utc().year(),
            content,
        }
    }
}

#[derive(Clone)]
pub struct PostCardView {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub preview: String,
}

impl PostCardView {
    fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            date: format_human_date(post.date),
            preview: preview_of(&post.content),
        }
    }
}

#[derive(Clone)]
pub struct HomeView {
    pub posts: Vec<PostCardView>,
    pub page: usize,
    pub total_pages: usize,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

impl HomeView {
    pub fn from_listing(listing: &PostListing) -> Self {
        let prev_page = (listing.page > 1).then(|| listing.page - 1);
        let next_page = (listing.page < listing.total_pages).then(|| listing.page + 1);
        Self {
            posts: listing.posts.iter().map(PostCardView::from_post).collect(),
            page: listing.page,
            total_pages: listing.total_pages,
            prev_page,
            next_page,
        }
    }
}

#[derive(Clone)]
pub struct PostDetailView {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub paragraphs: Vec<String>,
}

impl PostDetailView {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            date: format_human_date(post.date),
            paragraphs: paragraphs_of(&post.content),
        }
    }
}

#[derive(Clone)]
pub struct PostFormView {
    pub heading: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub title_value: String,
    pub content_value: String,
}

impl PostFormView {
    pub fn blank() -> Self {
        Self {
            heading: "New post",
            action: "/blog/post".to_string(),
            submit_label: "Publish",
            title_value: String::new(),
            content_value: String::new(),
        }
    }

    pub fn for_post(post: &Post) -> Self {
        Self {
            heading: "Edit post",
            action: format!("/blog/post/{}", post.id),
            submit_label: "Save changes",
            title_value: post.title.clone(),
            content_value: post.content.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AboutView;

#[derive(Clone)]
pub struct ErrorPageView {
    pub heading: &'static str,
    pub message: &'static str,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            heading: "Page not found",
            message: "The post or page you were looking for does not exist.",
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub view: LayoutContext<HomeView>,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailView>,
}

#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    pub view: LayoutContext<PostFormView>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub view: LayoutContext<AboutView>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

/// First `PREVIEW_CHARS` characters of the body, cut on a character boundary
/// with an ellipsis when anything was dropped.
fn preview_of(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    format!("{}…", cut.trim_end())
}

fn paragraphs_of(content: &str) -> Vec<String> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(str::to_string)
        .collect()
}
