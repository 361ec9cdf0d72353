use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Result;
use crate::executor::RequestExecutor;

/// Maximum number of tags on a question
pub const MAX_TAGS: usize = 5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposerError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Question body must not be empty")]
    EmptyBody,

    #[error("At most 5 tags are allowed, got {0}")]
    TooManyTags(usize),
}

/// Question as typed into the composer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionDraft {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl QuestionDraft {
    /// Trim title and body, lowercase tags, drop empty and duplicate tags
    pub fn normalize(self) -> std::result::Result<QuestionDraft, ComposerError> {
        let title = self.title.trim().to_string();
        let body = self.body.trim().to_string();
        if title.is_empty() {
            return Err(ComposerError::EmptyTitle);
        }
        if body.is_empty() {
            return Err(ComposerError::EmptyBody);
        }

        let mut tags: Vec<String> = Vec::new();
        for tag in self.tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        if tags.len() > MAX_TAGS {
            return Err(ComposerError::TooManyTags(tags.len()));
        }

        Ok(QuestionDraft { title, body, tags })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(alias = "_id")]
    pub id: String,
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuestionList {
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct VoteRequest {
    up: bool,
}

pub async fn get_questions(api: &RequestExecutor) -> Result<QuestionList> {
    log::trace!("Fetching forum questions");
    let result: Result<QuestionList> = api.get("/api/forum/questions").await;
    match &result {
        Ok(list) => log::info!("Fetched {} forum questions", list.questions.len()),
        Err(e) => log::error!("Failed to fetch forum questions: {}", e),
    }
    result
}

/// Post a draft; callers run [`QuestionDraft::normalize`] first
pub async fn post_question(api: &RequestExecutor, draft: &QuestionDraft) -> Result<Question> {
    log::debug!("Posting question: {}", draft.title);
    let result: Result<Question> = api.post("/api/forum/questions", draft).await;
    match &result {
        Ok(question) => log::info!("Posted question '{}' (ID: {})", question.title, question.id),
        Err(e) => log::error!("Failed to post question '{}': {}", draft.title, e),
    }
    result
}

pub async fn post_answer(api: &RequestExecutor, question_id: &str, body: &str) -> Result<Answer> {
    log::debug!("Answering question {}", question_id);
    let endpoint = format!("/api/forum/questions/{}/answers", question_id);
    let result: Result<Answer> = api.post(&endpoint, &AnswerRequest { body }).await;
    match &result {
        Ok(answer) => log::info!("Posted answer {} to question {}", answer.id, question_id),
        Err(e) => log::error!("Failed to answer question {}: {}", question_id, e),
    }
    result
}

pub async fn vote_question(api: &RequestExecutor, question_id: &str, up: bool) -> Result<Question> {
    log::debug!("Voting {} on question {}", if up { "up" } else { "down" }, question_id);
    let endpoint = format!("/api/forum/questions/{}/vote", question_id);
    let result: Result<Question> = api.patch(&endpoint, &VoteRequest { up }).await;
    if let Err(e) = &result {
        log::error!("Failed to vote on question {}: {}", question_id, e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;
    use crate::transport::Method;

    fn draft(title: &str, body: &str, tags: &[&str]) -> QuestionDraft {
        QuestionDraft {
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_normalize_cleans_tags() {
        let normalized = draft("  Why is quicksort O(n^2)? ", " worst case pivot ", &["Sorting", " sorting", "", "complexity"])
            .normalize()
            .unwrap();

        assert_eq!(normalized.title, "Why is quicksort O(n^2)?");
        assert_eq!(normalized.body, "worst case pivot");
        assert_eq!(normalized.tags, vec!["sorting", "complexity"]);
    }

    #[test]
    fn test_normalize_rejects_incomplete_drafts() {
        assert_eq!(draft("  ", "body", &[]).normalize(), Err(ComposerError::EmptyTitle));
        assert_eq!(draft("title", "\n", &[]).normalize(), Err(ComposerError::EmptyBody));
        assert_eq!(
            draft("title", "body", &["a", "b", "c", "d", "e", "f"]).normalize(),
            Err(ComposerError::TooManyTags(6))
        );
    }

    #[tokio::test]
    async fn test_post_question_and_vote() {
        let h = harness();
        h.transport.respond(201, r#"{"_id":"q1","title":"Heaps","body":"How?","tags":["heap"]}"#);
        h.transport.respond(200, r#"{"_id":"q1","title":"Heaps","votes":1}"#);

        let question = post_question(&h.executor, &draft("Heaps", "How?", &["heap"])).await.unwrap();
        assert_eq!(question.id, "q1");
        assert_eq!(
            h.transport.last_request().body.as_deref(),
            Some(r#"{"title":"Heaps","body":"How?","tags":["heap"]}"#)
        );

        let voted = vote_question(&h.executor, "q1", true).await.unwrap();
        assert_eq!(voted.votes, 1);
        assert_eq!(h.transport.last_request().method, Method::Patch);
    }
}
