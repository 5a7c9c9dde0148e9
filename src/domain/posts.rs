//! The post record and the rules that govern its identity and timestamps.

use serde::{Deserialize, Serialize};
use time::{
    OffsetDateTime, PrimitiveDateTime,
    format_description::FormatItem,
    macros::format_description,
};

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

// Wire format for the `date` field. Zero-padded so the textual form sorts the
// same way the parsed value does.
time::serde::format_description!(
    stored_date,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// A single blog post as persisted in the backing file.
///
/// All four fields are required: deserialization of the collection fails when
/// any record omits one, which is what makes the store's fail-closed load work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(with = "stored_date")]
    pub date: PrimitiveDateTime,
}

/// Identifier for the next post: one past the current maximum, starting at 1.
pub fn next_post_id(posts: &[Post]) -> u64 {
    posts
        .iter()
        .map(|post| post.id)
        .max()
        .map_or(1, |max| max + 1)
}

/// Current UTC wall-clock, truncated to whole seconds so a stamped value
/// survives a serialize/parse cycle unchanged.
pub fn current_timestamp() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    let time = now
        .time()
        .replace_nanosecond(0)
        .expect("zero nanoseconds is always in range");
    PrimitiveDateTime::new(now.date(), time)
}

pub fn format_human_date(date: PrimitiveDateTime) -> String {
    date.format(HUMAN_DATE_FORMAT).expect("valid calendar date")
}
