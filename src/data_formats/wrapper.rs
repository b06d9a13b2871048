use serde::{Deserialize, Serialize};

use crate::models::{Article, ArticleSummary, Comment, Topic, User};

#[derive(Debug, Deserialize, Serialize)]
pub struct EndpointsWrapper {
    pub endpoints: serde_json::Value,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TopicsWrapper {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TopicWrapper {
    pub topic: Vec<Topic>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UsersWrapper {
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserWrapper {
    pub user: Vec<User>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleArticlesWrapper {
    pub articles: Vec<ArticleSummary>,
    #[serde(rename = "totalCount")]
    pub total_count: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ArticleWrapper {
    pub article: Vec<Article>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdatedArticleWrapper {
    #[serde(rename = "updatedArticle")]
    pub updated_article: Vec<Article>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleCommentsWrapper {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentWrapper {
    pub comment: Vec<Comment>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdatedCommentWrapper {
    #[serde(rename = "updatedComment")]
    pub updated_comment: Vec<Comment>,
}

impl ArticleWrapper {
    pub fn wrap(article: Article) -> ArticleWrapper {
        ArticleWrapper {
            article: vec![article],
        }
    }
}
