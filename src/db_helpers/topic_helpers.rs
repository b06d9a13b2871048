use sqlx::{Sqlite, SqlitePool};

use crate::{data_formats::NewTopicRequest, errors::RequestError, models::Topic, validation};

pub const TOPIC_EXISTS: &str = "Topic already exists.";

pub async fn get_topics_in_db(pool: &SqlitePool) -> Result<Vec<Topic>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Topic>("SELECT slug, description FROM topics")
        .fetch_all(pool)
        .await?;
    Ok(result)
}

pub async fn create_topic_in_db(
    pool: &SqlitePool,
    NewTopicRequest { slug, description }: NewTopicRequest,
) -> Result<Topic, RequestError> {
    let slug = validation::required(slug)?;

    let topic = sqlx::query_as::<Sqlite, Topic>(
        r#"
        INSERT INTO topics (slug, description)
        VALUES ($1, $2)
        ON CONFLICT (slug) DO NOTHING
        RETURNING slug, description
        "#,
    )
    .bind(&slug)
    .bind(description)
    .fetch_optional(pool)
    .await?
    .ok_or(RequestError::Conflict(TOPIC_EXISTS))?;

    tracing::debug!(slug = %topic.slug, "created topic");
    Ok(topic)
}
