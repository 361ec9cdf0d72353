use anyhow::Result;
use client::RequestExecutor;
use client::api::forum::{self, Question, QuestionDraft, QuestionList};
use tracing::{debug, trace};

use crate::cli::reporting;

pub async fn list(api: &RequestExecutor) -> Result<QuestionList> {
    trace!("Entering forum list command");
    let loading = reporting::loading();

    let list = loading
        .with_loading(|| forum::get_questions(api), Some("Loading questions..."))
        .await?;

    for question in &list.questions {
        println!(
            "  [{}] {:+} {}  ({} answers) {}",
            question.id,
            question.votes,
            question.title,
            question.answers.len(),
            question.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ")
        );
    }
    Ok(list)
}

/// Validate the draft locally, then post it
pub async fn ask(api: &RequestExecutor, title: String, body: String, tags: Vec<String>) -> Result<Question> {
    trace!("Entering forum ask command");
    let draft = QuestionDraft { title, body, tags }.normalize()?;
    debug!("Normalized draft tags: {:?}", draft.tags);

    let loading = reporting::loading();
    let question = loading
        .with_loading(|| forum::post_question(api, &draft), Some("Posting question..."))
        .await?;

    println!("Posted question {}: {}", question.id, question.title);
    Ok(question)
}

pub async fn answer(api: &RequestExecutor, question_id: &str, body: &str) -> Result<()> {
    let body = body.trim();
    if body.is_empty() {
        anyhow::bail!("Answer must not be empty");
    }

    let loading = reporting::loading();
    let answer = loading
        .with_loading(|| forum::post_answer(api, question_id, body), Some("Posting answer..."))
        .await?;

    println!("Posted answer {} to question {}", answer.id, question_id);
    Ok(())
}

pub async fn vote(api: &RequestExecutor, question_id: &str, up: bool) -> Result<()> {
    let loading = reporting::loading();
    let question = loading
        .with_loading(|| forum::vote_question(api, question_id, up), Some("Voting..."))
        .await?;

    println!("Question {} now has {} votes", question.id, question.votes);
    Ok(())
}
