#![allow(dead_code)]

use std::net::SocketAddr;

use nc_news::{get_random_free_port, init_db, make_router, serve};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const IMG_URL: &str =
    "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700";

const TOPICS: &[(&str, &str)] = &[
    ("mitch", "The man, the Mitch, the legend"),
    ("cats", "Not dogs"),
    ("paper", "what books are made of"),
];

const USERS: &[(&str, &str)] = &[
    ("butter_bridge", "jonny"),
    ("icellusedkars", "sam"),
    ("rogersop", "paul"),
    ("lurker", "do_nothing"),
];

// (article_id, title, topic, author, created_at, votes)
const ARTICLES: &[(i64, &str, &str, &str, &str, i64)] = &[
    (1, "Living in the shadow of a great man", "mitch", "butter_bridge", "2020-07-09 20:11:00", 100),
    (2, "Sony Vaio; or, The Laptop", "mitch", "icellusedkars", "2020-10-16 05:03:00", 0),
    (3, "Eight pug gifs that remind me of mitch", "mitch", "icellusedkars", "2020-11-03 09:12:00", 0),
    (4, "Student SUES Mitch!", "mitch", "rogersop", "2020-05-06 01:14:00", 0),
    (5, "UNCOVERED: catspiracy to bring down democracy", "cats", "rogersop", "2020-08-03 13:14:00", 0),
    (6, "A", "mitch", "icellusedkars", "2020-10-18 01:00:00", 0),
    (7, "Z", "mitch", "icellusedkars", "2020-01-07 14:08:00", 0),
    (8, "Does Mitch predate civilisation?", "mitch", "icellusedkars", "2020-04-17 01:08:00", 0),
    (9, "They're not exactly dogs, are they?", "mitch", "butter_bridge", "2020-06-06 09:10:00", 0),
    (10, "Seven inspirational thought leaders from Manchester UK", "mitch", "rogersop", "2020-05-14 04:15:00", 0),
    (11, "Am I a cat?", "mitch", "icellusedkars", "2020-01-15 22:21:00", 0),
    (12, "Moustache", "mitch", "butter_bridge", "2020-10-11 11:24:00", 0),
];

/// Article ids ordered by `created_at`, newest first.
pub const ARTICLES_BY_DATE_DESC: [i64; 12] = [3, 6, 2, 12, 5, 1, 9, 10, 4, 8, 11, 7];

// (comment_id, article_id, author, votes, created_at, body)
const COMMENTS: &[(i64, i64, &str, i64, &str, &str)] = &[
    (1, 9, "butter_bridge", 16, "2020-04-06 12:17:00", "Oh, I've got compassion running out of my nose, pal!"),
    (2, 1, "butter_bridge", 14, "2020-10-31 03:03:00", "The beautiful thing about treasure is that it exists."),
    (3, 1, "icellusedkars", 100, "2020-03-01 01:13:00", "Replacing the quiet elegance of the dark suit and tie."),
    (4, 1, "icellusedkars", -100, "2020-02-23 12:01:00", "I carry a log - yes. Is it funny to you? It is not to me."),
    (5, 1, "icellusedkars", 0, "2020-11-03 21:00:00", "I hate streaming noses"),
    (6, 1, "icellusedkars", 0, "2020-04-11 21:02:00", "I hate streaming eyes even more"),
    (7, 1, "icellusedkars", 0, "2020-05-15 20:19:00", "Lobster pot"),
    (8, 1, "icellusedkars", 0, "2020-04-14 20:19:00", "Delicious crackerbreads"),
    (9, 3, "icellusedkars", 0, "2020-01-01 03:08:00", "Superficially charming"),
    (10, 3, "icellusedkars", 0, "2020-06-20 07:24:00", "git push origin master"),
    (11, 5, "icellusedkars", 0, "2020-09-19 23:10:00", "Ambidextrous marsupial"),
];

pub const ARTICLE_ONE_COMMENTS: i64 = 7;
pub const TOTAL_COMMENTS: i64 = 11;

pub struct TestApp {
    pub address: SocketAddr,
    pub client: reqwest::Client,
    pub pool: SqlitePool,
    _dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> TestApp {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", dir.path().join("nc_news_test.db").display());
        let pool = init_db(&db_url).await.expect("Failed to init test database");
        seed(&pool).await;

        let (listener, address) = get_random_free_port().expect("Failed to bind test port");
        tokio::spawn(serve(make_router(), listener, pool.clone()));

        TestApp {
            address,
            client: reqwest::Client::new(),
            pool,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn patch(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn comment_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count comments")
    }
}

pub async fn json(response: reqwest::Response) -> Value {
    response.json().await.expect("Response was not JSON")
}

pub async fn message(response: reqwest::Response) -> String {
    json(response).await["message"]
        .as_str()
        .expect("Error body has no message")
        .to_owned()
}

async fn seed(pool: &SqlitePool) {
    for (slug, description) in TOPICS {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(slug)
            .bind(description)
            .execute(pool)
            .await
            .expect("Failed to seed topics");
    }
    for (username, name) in USERS {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(name)
            .bind(format!("https://avatars.example.com/{username}.png"))
            .execute(pool)
            .await
            .expect("Failed to seed users");
    }
    for (article_id, title, topic, author, created_at, votes) in ARTICLES {
        sqlx::query(
            r#"
            INSERT INTO articles (article_id, title, topic, author, body, created_at, votes, article_img_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(article_id)
        .bind(title)
        .bind(topic)
        .bind(author)
        .bind(format!("Body of {title}"))
        .bind(created_at)
        .bind(votes)
        .bind(IMG_URL)
        .execute(pool)
        .await
        .expect("Failed to seed articles");
    }
    for (comment_id, article_id, author, votes, created_at, body) in COMMENTS {
        sqlx::query(
            r#"
            INSERT INTO comments (comment_id, article_id, author, votes, created_at, body)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment_id)
        .bind(article_id)
        .bind(author)
        .bind(votes)
        .bind(created_at)
        .bind(body)
        .execute(pool)
        .await
        .expect("Failed to seed comments");
    }
}
