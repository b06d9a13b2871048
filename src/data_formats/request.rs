use serde::{Deserialize, Serialize};
use serde_json::Value;

// Fields are optional so that a missing value is reported by the validator
// as a malformed request rather than by the JSON extractor.

// ----------------- Topic Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct NewTopicRequest {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// ----------------- Article Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct NewArticleRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub article_img_url: Option<String>,
}

// ----------------- Comment Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct NewCommentRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

// ----------------- Votes Request -----------------
/// Kept as a raw JSON value: the type is checked only after the target row
/// is known to exist.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct VotesRequest {
    #[serde(default)]
    pub inc_votes: Option<Value>,
}
