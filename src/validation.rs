//! Checks applied to untrusted path, query and body values before any
//! statement is built from them.

use std::num::IntErrorKind;
use std::str::FromStr;

use serde_json::Value;

use crate::errors::RequestError;

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;

/// Parses a numeric path identifier such as `article_id` or `comment_id`.
///
/// Only the shape is checked here; whether the row exists is the accessor's job.
pub fn parse_id(raw: &str) -> Result<i64, RequestError> {
    raw.parse::<i64>().map_err(|_| RequestError::MalformedInput)
}

/// Columns an article listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    Author,
    Title,
    Topic,
    #[default]
    CreatedAt,
    Votes,
    ArticleImgUrl,
    CommentCount,
}

impl SortBy {
    pub fn column(&self) -> &'static str {
        match self {
            SortBy::Author => "author",
            SortBy::Title => "title",
            SortBy::Topic => "topic",
            SortBy::CreatedAt => "created_at",
            SortBy::Votes => "votes",
            SortBy::ArticleImgUrl => "article_img_url",
            SortBy::CommentCount => "comment_count",
        }
    }

    /// `comment_count` only exists as an alias of the aggregate, every other
    /// column lives on `articles`.
    pub fn table(&self) -> Option<&'static str> {
        match self {
            SortBy::CommentCount => None,
            _ => Some("articles"),
        }
    }
}

impl FromStr for SortBy {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "author" => Ok(SortBy::Author),
            "title" => Ok(SortBy::Title),
            "topic" => Ok(SortBy::Topic),
            "created_at" => Ok(SortBy::CreatedAt),
            "votes" => Ok(SortBy::Votes),
            "article_img_url" => Ok(SortBy::ArticleImgUrl),
            "comment_count" => Ok(SortBy::CommentCount),
            _ => Err(RequestError::MalformedInput),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub fn keyword(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Order::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Order::Desc)
        } else {
            Err(RequestError::MalformedInput)
        }
    }
}

/// Parses an optional allow-listed query value, falling back to its default.
pub fn parse_or_default<T>(raw: Option<&str>) -> Result<T, RequestError>
where
    T: FromStr<Err = RequestError> + Default,
{
    match raw {
        Some(value) => value.parse(),
        None => Ok(T::default()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl Pagination {
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Result<Self, RequestError> {
        Ok(Self {
            limit: positive_or(limit, DEFAULT_LIMIT)?,
            page: positive_or(page, DEFAULT_PAGE)?,
        })
    }

    pub fn limit(&self) -> i64 {
        saturating_i64(self.limit)
    }

    /// Saturates, so a page far past the end still yields an empty page.
    pub fn offset(&self) -> i64 {
        saturating_i64((self.page - 1).saturating_mul(self.limit))
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn positive_or(raw: Option<&str>, default: u64) -> Result<u64, RequestError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(u64::MAX),
        _ => Err(RequestError::MalformedInput),
    }
}

/// Requires a body field to be present.
pub fn required<T>(value: Option<T>) -> Result<T, RequestError> {
    value.ok_or(RequestError::MalformedInput)
}

/// `inc_votes` must be present and an integral JSON number.
pub fn vote_delta(value: Option<&Value>) -> Result<i64, RequestError> {
    value
        .and_then(Value::as_i64)
        .ok_or(RequestError::MalformedInput)
}
