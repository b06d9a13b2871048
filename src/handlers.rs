use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    data_formats::*,
    db_helpers::{
        add_comment_to_article_in_db, create_article_in_db, create_topic_in_db,
        delete_article_in_db, delete_comment_in_db, get_article_by_id_in_db,
        get_comments_for_article_in_db, get_topics_in_db, get_user_by_username_in_db,
        get_users_in_db, list_articles_in_db, update_article_votes_in_db,
        update_comment_votes_in_db,
    },
    errors::RequestError,
    validation::parse_id,
    JsonResponse,
};

type Pool = Extension<Arc<SqlitePool>>;
type JsonResult<T> = Result<JsonResponse<T>, RequestError>;

const ENDPOINTS: &str = concat!(r#"{"endpoints":"#, include_str!("../endpoints.json"), "}");

fn ok<T>(body: T) -> JsonResult<T> {
    Ok((StatusCode::OK, Json(body)))
}

fn created<T>(body: T) -> JsonResult<T> {
    Ok((StatusCode::CREATED, Json(body)))
}

// ----------------- Helper Handlers -----------------
pub async fn get_endpoints() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], ENDPOINTS)
}

pub async fn not_found() -> RequestError {
    RequestError::NotFound("Path not found.")
}

// ----------------- Topic Handlers -----------------
pub async fn get_topics(Extension(pool): Pool) -> JsonResult<TopicsWrapper> {
    let topics = get_topics_in_db(&pool).await?;
    ok(TopicsWrapper { topics })
}

pub async fn post_topic(
    Extension(pool): Pool,
    payload: Result<Json<NewTopicRequest>, JsonRejection>,
) -> JsonResult<TopicWrapper> {
    let Json(request) = payload?;
    let topic = create_topic_in_db(&pool, request).await?;
    created(TopicWrapper { topic: vec![topic] })
}

// ----------------- Article Handlers -----------------
pub async fn get_articles(
    Extension(pool): Pool,
    query: Result<Query<ArticleQueryParams>, QueryRejection>,
) -> JsonResult<MultipleArticlesWrapper> {
    let Query(params) = query?;
    let page = list_articles_in_db(&pool, &params).await?;
    ok(MultipleArticlesWrapper {
        articles: page.articles,
        total_count: page.total_count,
    })
}

pub async fn get_article_by_id(
    Extension(pool): Pool,
    Path(article_id): Path<String>,
) -> JsonResult<ArticleWrapper> {
    let article_id = parse_id(&article_id)?;
    let article = get_article_by_id_in_db(&pool, article_id).await?;
    ok(ArticleWrapper::wrap(article))
}

pub async fn post_article(
    Extension(pool): Pool,
    payload: Result<Json<NewArticleRequest>, JsonRejection>,
) -> JsonResult<ArticleWrapper> {
    let Json(request) = payload?;
    let article = create_article_in_db(&pool, request).await?;
    created(ArticleWrapper::wrap(article))
}

pub async fn patch_article_by_id(
    Extension(pool): Pool,
    Path(article_id): Path<String>,
    payload: Result<Json<VotesRequest>, JsonRejection>,
) -> JsonResult<UpdatedArticleWrapper> {
    let article_id = parse_id(&article_id)?;
    let Json(request) = payload?;
    let article = update_article_votes_in_db(&pool, article_id, request.inc_votes.as_ref()).await?;
    ok(UpdatedArticleWrapper {
        updated_article: vec![article],
    })
}

pub async fn delete_article_by_id(
    Extension(pool): Pool,
    Path(article_id): Path<String>,
) -> Result<StatusCode, RequestError> {
    let article_id = parse_id(&article_id)?;
    delete_article_in_db(&pool, article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- Comment Handlers -----------------
pub async fn get_article_comments(
    Extension(pool): Pool,
    Path(article_id): Path<String>,
    query: Result<Query<CommentQueryParams>, QueryRejection>,
) -> JsonResult<MultipleCommentsWrapper> {
    let article_id = parse_id(&article_id)?;
    let Query(params) = query?;
    let comments = get_comments_for_article_in_db(&pool, article_id, &params).await?;
    ok(MultipleCommentsWrapper { comments })
}

pub async fn post_comment(
    Extension(pool): Pool,
    Path(article_id): Path<String>,
    payload: Result<Json<NewCommentRequest>, JsonRejection>,
) -> JsonResult<CommentWrapper> {
    let article_id = parse_id(&article_id)?;
    let Json(request) = payload?;
    let comment = add_comment_to_article_in_db(&pool, article_id, request).await?;
    created(CommentWrapper {
        comment: vec![comment],
    })
}

pub async fn patch_comment_by_id(
    Extension(pool): Pool,
    Path(comment_id): Path<String>,
    payload: Result<Json<VotesRequest>, JsonRejection>,
) -> JsonResult<UpdatedCommentWrapper> {
    let comment_id = parse_id(&comment_id)?;
    let Json(request) = payload?;
    let comment = update_comment_votes_in_db(&pool, comment_id, request.inc_votes.as_ref()).await?;
    ok(UpdatedCommentWrapper {
        updated_comment: vec![comment],
    })
}

pub async fn delete_comment_by_id(
    Extension(pool): Pool,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, RequestError> {
    let comment_id = parse_id(&comment_id)?;
    delete_comment_in_db(&pool, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- User Handlers -----------------
pub async fn get_users(Extension(pool): Pool) -> JsonResult<UsersWrapper> {
    let users = get_users_in_db(&pool).await?;
    ok(UsersWrapper { users })
}

pub async fn get_user_by_username(
    Extension(pool): Pool,
    Path(username): Path<String>,
) -> JsonResult<UserWrapper> {
    let user = get_user_by_username_in_db(&pool, &username).await?;
    ok(UserWrapper { user: vec![user] })
}
