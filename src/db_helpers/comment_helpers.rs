use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::{CommentQueryParams, NewCommentRequest};
use crate::errors::RequestError;
use crate::models::Comment;
use crate::validation::{self, Pagination};

use super::{article_exists, comment_exists, user_exists, ARTICLE_NOT_FOUND, AUTHOR_NOT_REGISTERED};

pub const COMMENT_NOT_FOUND: &str = "Comment not found.";
pub const COMMENT_PAGE_NOT_FOUND: &str = "Comment page for article not found.";
pub const ARTICLE_HAS_NO_COMMENTS: &str = "Article does not have any comments.";

const COMMENT_COLUMNS: &str = "comment_id, body, article_id, author, votes, created_at";

pub async fn get_comments_for_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
    params: &CommentQueryParams,
) -> Result<Vec<Comment>, RequestError> {
    let pagination = Pagination::parse(params.limit.as_deref(), params.page.as_deref())?;
    if !article_exists(pool, article_id).await? {
        return Err(RequestError::NotFound(ARTICLE_NOT_FOUND));
    }

    let query = format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM   comments
        WHERE  article_id = $1
        ORDER  BY created_at DESC, comment_id DESC
        LIMIT  $2 OFFSET $3
        "#
    );
    let comments = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(article_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(pool)
        .await?;

    if comments.is_empty() {
        let message = if pagination.is_first_page() {
            ARTICLE_HAS_NO_COMMENTS
        } else {
            COMMENT_PAGE_NOT_FOUND
        };
        return Err(RequestError::NotFound(message));
    }
    Ok(comments)
}

pub async fn add_comment_to_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
    NewCommentRequest { author, body }: NewCommentRequest,
) -> Result<Comment, RequestError> {
    let author = validation::required(author)?;
    let body = validation::required(body)?;

    if !article_exists(pool, article_id).await? {
        return Err(RequestError::NotFound(ARTICLE_NOT_FOUND));
    }
    if !user_exists(pool, &author).await? {
        return Err(RequestError::NotFound(AUTHOR_NOT_REGISTERED));
    }

    let query = format!(
        r#"
        INSERT INTO comments (body, article_id, author)
        VALUES ($1, $2, $3)
        RETURNING {COMMENT_COLUMNS}
        "#
    );
    let comment = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(&body)
        .bind(article_id)
        .bind(&author)
        .fetch_one(pool)
        .await?;

    tracing::debug!(comment_id = comment.comment_id, article_id, "created comment");
    Ok(comment)
}

pub async fn update_comment_votes_in_db(
    pool: &SqlitePool,
    comment_id: i64,
    inc_votes: Option<&serde_json::Value>,
) -> Result<Comment, RequestError> {
    if !comment_exists(pool, comment_id).await? {
        return Err(RequestError::NotFound(COMMENT_NOT_FOUND));
    }
    let inc_votes = validation::vote_delta(inc_votes)?;

    let query = format!(
        r#"
        UPDATE comments
        SET    votes = votes + $1
        WHERE  comment_id = $2
        RETURNING {COMMENT_COLUMNS}
        "#
    );
    let comment = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(inc_votes)
        .bind(comment_id)
        .fetch_optional(pool)
        .await?
        .ok_or(RequestError::NotFound(COMMENT_NOT_FOUND))?;

    tracing::debug!(comment_id, inc_votes, "updated comment votes");
    Ok(comment)
}

pub async fn delete_comment_in_db(pool: &SqlitePool, comment_id: i64) -> Result<(), RequestError> {
    let deleted = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Err(RequestError::NotFound(COMMENT_NOT_FOUND));
    }

    tracing::debug!(comment_id, "deleted comment");
    Ok(())
}
