use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::{ArticleQueryParams, NewArticleRequest};
use crate::errors::RequestError;
use crate::models::{Article, ArticleSummary, DEFAULT_ARTICLE_IMG_URL};
use crate::validation::{self, Order, Pagination, SortBy};

use super::{
    article_exists, fetch_all_built, fetch_count_built, topic_exists, user_exists, QueryBuilder,
};

const ARTICLE_SUMMARY_QUERY: &str = r#"
            SELECT articles.article_id,
                   articles.author,
                   articles.title,
                   articles.topic,
                   articles.created_at,
                   articles.votes,
                   articles.article_img_url,
                   COUNT(comments.comment_id) AS comment_count
            FROM   articles
                LEFT JOIN comments
                       ON comments.article_id = articles.article_id
            WHERE  1 = 1
"#;

const ARTICLE_COUNT_QUERY: &str = "SELECT COUNT(*) FROM articles WHERE 1 = 1";

const SINGLE_ARTICLE_QUERY: &str = r#"
            SELECT articles.article_id,
                   articles.author,
                   articles.title,
                   articles.body,
                   articles.topic,
                   articles.created_at,
                   articles.votes,
                   articles.article_img_url,
                   COUNT(comments.comment_id) AS comment_count
            FROM   articles
                LEFT JOIN comments
                       ON comments.article_id = articles.article_id
            WHERE  articles.article_id = $1
            GROUP  BY articles.article_id
"#;

pub const ARTICLE_NOT_FOUND: &str = "Article not found.";
pub const ARTICLE_PAGE_NOT_FOUND: &str = "Article page not found.";
pub const AUTHOR_NOT_REGISTERED: &str = "User account does not exist. Please make an account.";

/// One page of articles plus the number of rows matching the filter.
#[derive(Debug)]
pub struct ArticlePage {
    pub articles: Vec<ArticleSummary>,
    pub total_count: i64,
}

pub async fn list_articles_in_db(
    pool: &SqlitePool,
    params: &ArticleQueryParams,
) -> Result<ArticlePage, RequestError> {
    let sort_by: SortBy = validation::parse_or_default(params.sort_by.as_deref())?;
    let order: Order = validation::parse_or_default(params.order.as_deref())?;
    let pagination = Pagination::parse(params.limit.as_deref(), params.page.as_deref())?;

    let topic = params.topic.as_deref();
    if let Some(slug) = topic {
        if !topic_exists(pool, slug).await? {
            return Err(RequestError::MalformedInput);
        }
    }

    let page_query = QueryBuilder::new(ARTICLE_SUMMARY_QUERY.trim())
        .add_filter("AND articles.topic =", topic)
        .push("GROUP BY articles.article_id ORDER BY")
        .push_identifier(sort_by.table(), sort_by.column())
        .push(order.keyword())
        .push(",")
        .push_identifier(Some("articles"), "article_id")
        .push(order.keyword())
        .push("LIMIT")
        .push_int(pagination.limit())
        .push("OFFSET")
        .push_int(pagination.offset())
        .build();
    let count_query = QueryBuilder::new(ARTICLE_COUNT_QUERY)
        .add_filter("AND topic =", topic)
        .build();

    let articles: Vec<ArticleSummary> = fetch_all_built(pool, page_query).await?;
    if articles.is_empty() && !pagination.is_first_page() {
        return Err(RequestError::NotFound(ARTICLE_PAGE_NOT_FOUND));
    }
    let total_count = fetch_count_built(pool, count_query).await?;

    Ok(ArticlePage {
        articles,
        total_count,
    })
}

async fn select_article<'e, E>(
    executor: E,
    article_id: i64,
) -> Result<Option<Article>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<Sqlite, Article>(SINGLE_ARTICLE_QUERY)
        .bind(article_id)
        .fetch_optional(executor)
        .await
}

pub async fn get_article_by_id_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Article, RequestError> {
    select_article(pool, article_id)
        .await?
        .ok_or(RequestError::NotFound(ARTICLE_NOT_FOUND))
}

pub async fn create_article_in_db(
    pool: &SqlitePool,
    NewArticleRequest {
        author,
        title,
        body,
        topic,
        article_img_url,
    }: NewArticleRequest,
) -> Result<Article, RequestError> {
    let author = validation::required(author)?;
    let title = validation::required(title)?;
    let body = validation::required(body)?;
    let topic = validation::required(topic)?;
    let article_img_url = article_img_url.unwrap_or_else(|| DEFAULT_ARTICLE_IMG_URL.to_owned());

    if !user_exists(pool, &author).await? {
        return Err(RequestError::NotFound(AUTHOR_NOT_REGISTERED));
    }

    let mut tx = pool.begin().await?;
    let topic_created = sqlx::query("INSERT INTO topics (slug) VALUES ($1) ON CONFLICT (slug) DO NOTHING")
        .bind(&topic)
        .execute(&mut tx)
        .await?
        .rows_affected();
    if topic_created > 0 {
        tracing::debug!(slug = %topic, "created topic for new article");
    }

    let article_id = sqlx::query_scalar::<Sqlite, i64>(
        r#"
        INSERT INTO articles (author, title, body, topic, article_img_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING article_id
        "#,
    )
    .bind(&author)
    .bind(&title)
    .bind(&body)
    .bind(&topic)
    .bind(&article_img_url)
    .fetch_one(&mut tx)
    .await?;

    let article = select_article(&mut tx, article_id)
        .await?
        .ok_or(RequestError::Internal)?;
    tx.commit().await?;

    tracing::debug!(article_id, "created article");
    Ok(article)
}

// Mutations are single autocommit statements; no write transaction starts with a read.
pub async fn update_article_votes_in_db(
    pool: &SqlitePool,
    article_id: i64,
    inc_votes: Option<&serde_json::Value>,
) -> Result<Article, RequestError> {
    if !article_exists(pool, article_id).await? {
        return Err(RequestError::NotFound(ARTICLE_NOT_FOUND));
    }
    let inc_votes = validation::vote_delta(inc_votes)?;

    let updated = sqlx::query("UPDATE articles SET votes = votes + $1 WHERE article_id = $2")
        .bind(inc_votes)
        .bind(article_id)
        .execute(pool)
        .await?
        .rows_affected();
    if updated == 0 {
        return Err(RequestError::NotFound(ARTICLE_NOT_FOUND));
    }

    let article = select_article(pool, article_id)
        .await?
        .ok_or(RequestError::NotFound(ARTICLE_NOT_FOUND))?;

    tracing::debug!(article_id, inc_votes, "updated article votes");
    Ok(article)
}

pub async fn delete_article_in_db(pool: &SqlitePool, article_id: i64) -> Result<(), RequestError> {
    let deleted = sqlx::query("DELETE FROM articles WHERE article_id = $1")
        .bind(article_id)
        .execute(pool)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Err(RequestError::NotFound(ARTICLE_NOT_FOUND));
    }

    tracing::debug!(article_id, "deleted article");
    Ok(())
}
