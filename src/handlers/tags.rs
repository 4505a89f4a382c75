use chrono::Utc;

use crate::{
    AppState,
    error::Result,
    models::TagPage,
    services::question_service,
    utils::pluralize,
};

/// Questions filed under `tag`, in index order, plus the tags seen alongside it.
pub fn get_tag_questions(state: &AppState, tag: &str) -> Result<TagPage> {
    let questions = question_service::get_questions_by_tag(state.store.as_ref(), tag)?;
    let now = Utc::now();

    let empty_message = questions
        .is_empty()
        .then(|| format!("There are no questions tagged with \"{}\" yet.", tag));

    Ok(TagPage {
        tag: tag.to_string(),
        count_label: format!(
            "{} tagged with \"{}\"",
            pluralize(questions.len(), "question"),
            tag
        ),
        can_ask: state.session.is_signed_in(),
        related_tags: question_service::related_tags(&questions, tag),
        questions: questions
            .iter()
            .map(|q| question_service::to_list_response(q, now))
            .collect(),
        empty_message,
        back_link: "/".to_string(),
    })
}
