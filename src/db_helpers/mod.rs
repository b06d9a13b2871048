use sqlx::{
    query::{QueryAs, QueryScalar},
    sqlite::SqliteArguments,
    Executor, FromRow, Sqlite,
};

mod article_helpers;
mod comment_helpers;
mod topic_helpers;
mod user_helpers;

pub use article_helpers::*;
pub use comment_helpers::*;
pub use topic_helpers::*;
pub use user_helpers::*;

#[derive(Debug, Clone, PartialEq)]
enum Param {
    Text(String),
    Int(i64),
}

/// Assembles a statement whose shape depends on the request.
///
/// Values always go through numbered bind parameters. Identifiers that cannot
/// be bound (sort columns) must come from an allow-list and are spliced in
/// through [`QueryBuilder::push_identifier`], which quotes them.
#[derive(Debug, Default)]
struct QueryBuilder {
    query: String,
    params: Vec<Param>,
}

impl QueryBuilder {
    fn new(initial: &str) -> Self {
        Self {
            query: initial.to_owned(),
            params: vec![],
        }
    }

    fn push(mut self, sql: &str) -> Self {
        self.query.push(' ');
        self.query.push_str(sql.trim());
        self
    }

    fn push_identifier(mut self, table: Option<&str>, column: &str) -> Self {
        self.query.push(' ');
        if let Some(table) = table {
            self.query.push_str(&quote_identifier(table));
            self.query.push('.');
        }
        self.query.push_str(&quote_identifier(column));
        self
    }

    fn next_placeholder(&self) -> String {
        format!("${}", self.params.len() + 1)
    }

    fn push_text(mut self, value: &str) -> Self {
        let placeholder = self.next_placeholder();
        self.query.push(' ');
        self.query.push_str(&placeholder);
        self.params.push(Param::Text(value.to_owned()));
        self
    }

    fn push_int(mut self, value: i64) -> Self {
        let placeholder = self.next_placeholder();
        self.query.push(' ');
        self.query.push_str(&placeholder);
        self.params.push(Param::Int(value));
        self
    }

    /// Appends `<sql> $n` when a value is present.
    fn add_filter(self, sql: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.push(sql).push_text(value),
            None => self,
        }
    }

    fn build(self) -> (String, Vec<Param>) {
        (self.query, self.params)
    }
}

fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn bind_all<'q, T>(
    mut query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    params: Vec<Param>,
) -> QueryAs<'q, Sqlite, T, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Param::Text(value) => query.bind(value),
            Param::Int(value) => query.bind(value),
        };
    }
    query
}

fn bind_all_scalar<'q, T>(
    mut query: QueryScalar<'q, Sqlite, T, SqliteArguments<'q>>,
    params: Vec<Param>,
) -> QueryScalar<'q, Sqlite, T, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Param::Text(value) => query.bind(value),
            Param::Int(value) => query.bind(value),
        };
    }
    query
}

async fn fetch_all_built<'e, E, T>(
    executor: E,
    built: (String, Vec<Param>),
) -> Result<Vec<T>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
    T: for<'r> FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
{
    let (query, params) = built;
    bind_all(sqlx::query_as::<Sqlite, T>(&query), params)
        .fetch_all(executor)
        .await
}

async fn fetch_count_built<'e, E>(
    executor: E,
    built: (String, Vec<Param>),
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (query, params) = built;
    bind_all_scalar(sqlx::query_scalar::<Sqlite, i64>(&query), params)
        .fetch_one(executor)
        .await
}

// ----------------- Existence Probes -----------------

async fn article_exists<'e, E>(executor: E, article_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT article_id FROM articles WHERE article_id = $1")
        .bind(article_id)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}

async fn comment_exists<'e, E>(executor: E, comment_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT comment_id FROM comments WHERE comment_id = $1")
        .bind(comment_id)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}

async fn user_exists<'e, E>(executor: E, username: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT username FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}

async fn topic_exists<'e, E>(executor: E, slug: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT slug FROM topics WHERE slug = $1")
        .bind(slug)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_numbered_in_order() {
        let (query, params) = QueryBuilder::new("SELECT * FROM articles WHERE 1 = 1")
            .add_filter("AND topic =", Some("cats"))
            .add_filter("AND author =", None)
            .push("LIMIT")
            .push_int(5)
            .push("OFFSET")
            .push_int(10)
            .build();
        assert_eq!(
            query,
            "SELECT * FROM articles WHERE 1 = 1 AND topic = $1 LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            params,
            vec![Param::Text("cats".into()), Param::Int(5), Param::Int(10)]
        );
    }

    #[test]
    fn identifiers_are_quoted() {
        let (query, params) = QueryBuilder::new("ORDER BY")
            .push_identifier(Some("articles"), "created_at")
            .push("DESC")
            .build();
        assert_eq!(query, r#"ORDER BY "articles"."created_at" DESC"#);
        assert!(params.is_empty());
    }

    #[test]
    fn embedded_quotes_cannot_escape_the_identifier() {
        assert_eq!(quote_identifier(r#"votes" --"#), r#""votes"" --""#);
    }
}
