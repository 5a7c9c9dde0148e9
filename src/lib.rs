//! foglio keeps a blog in one flat JSON file and serves it over plain HTML forms.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
