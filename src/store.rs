//! Question storage port and its in-memory implementation.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::{
    error::{AppError, Result},
    models::{Answer, AnswerId, Question, QuestionId, User},
};

const BUILTIN_SEED: &str = include_str!("../seed/questions.json");

/// Persistence contract for questions and their answers.
pub trait QuestionRepository {
    /// All questions in insertion order.
    fn load_questions(&self) -> Result<Vec<Question>>;
    fn get_question(&self, id: QuestionId) -> Result<Option<Question>>;
    /// Questions indexed under exactly `tag` (case-sensitive).
    fn get_questions_by_tag(&self, tag: &str) -> Result<Vec<Question>>;

    /// Inserts a new question or overwrites the record with the same id.
    fn save_question(&mut self, question: Question) -> Result<()>;
    /// Replaces an existing question as one unit.
    fn replace_question(&mut self, id: QuestionId, question: Question) -> Result<()>;
    fn save_answer(&mut self, question_id: QuestionId, answer: Answer) -> Result<()>;

    fn next_question_id(&mut self) -> QuestionId;
    fn next_answer_id(&mut self) -> AnswerId;
}

#[derive(Debug, Default)]
pub struct InMemoryQuestionStore {
    questions: Vec<Question>,
    tag_index: BTreeMap<String, Vec<QuestionId>>,
    last_question_id: QuestionId,
    last_answer_id: AnswerId,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store loaded with the bundled mock questions.
    pub fn seeded() -> Result<Self> {
        Self::from_seed_json(BUILTIN_SEED)
    }

    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        tracing::info!("Loading seed questions from {}", path.as_ref().display());
        Self::from_seed_json(&raw)
    }

    pub fn from_seed_json(raw: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(raw)?;
        Self::from_questions(questions)
    }

    pub fn from_questions(questions: Vec<Question>) -> Result<Self> {
        check_seed(&questions)?;

        let mut store = Self::new();
        for question in questions {
            store.insert(question);
        }
        tracing::debug!(
            "Store ready with {} questions across {} tags",
            store.questions.len(),
            store.tag_index.len()
        );
        Ok(store)
    }

    /// Distinct authors of seeded questions and answers, by first appearance.
    pub fn known_users(&self) -> Vec<User> {
        let mut seen = HashSet::new();
        let mut users = Vec::new();
        for question in &self.questions {
            let authors = std::iter::once((question.author_id, &question.author)).chain(
                question
                    .answers
                    .iter()
                    .map(|answer| (answer.author_id, &answer.author)),
            );
            for (id, username) in authors {
                if seen.insert(id) {
                    users.push(User::new(id, username.clone()));
                }
            }
        }
        users
    }

    fn position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    fn insert(&mut self, question: Question) {
        self.last_question_id = self.last_question_id.max(question.id);
        if let Some(max_answer) = question.answers.iter().map(|a| a.id).max() {
            self.last_answer_id = self.last_answer_id.max(max_answer);
        }
        self.index_tags(&question);

        match self.position(question.id) {
            Some(pos) => self.questions[pos] = question,
            None => self.questions.push(question),
        }
    }

    fn index_tags(&mut self, question: &Question) {
        for ids in self.tag_index.values_mut() {
            ids.retain(|id| *id != question.id);
        }
        self.tag_index.retain(|_, ids| !ids.is_empty());

        for tag in &question.tags {
            self.tag_index
                .entry(tag.clone())
                .or_default()
                .push(question.id);
        }
    }
}

fn check_seed(questions: &[Question]) -> Result<()> {
    let mut question_ids = HashSet::new();
    let mut answer_ids = HashSet::new();

    for question in questions {
        if !question_ids.insert(question.id) {
            return Err(AppError::BadRequest(format!(
                "Duplicate question id {} in seed",
                question.id
            )));
        }
        for answer in &question.answers {
            if !answer_ids.insert(answer.id) {
                return Err(AppError::BadRequest(format!(
                    "Duplicate answer id {} in seed",
                    answer.id
                )));
            }
        }
        if question.answers.iter().filter(|a| a.is_accepted).count() > 1 {
            return Err(AppError::BadRequest(format!(
                "Question {} has more than one accepted answer",
                question.id
            )));
        }
    }

    Ok(())
}

impl QuestionRepository for InMemoryQuestionStore {
    fn load_questions(&self) -> Result<Vec<Question>> {
        Ok(self.questions.clone())
    }

    fn get_question(&self, id: QuestionId) -> Result<Option<Question>> {
        Ok(self.questions.iter().find(|q| q.id == id).cloned())
    }

    fn get_questions_by_tag(&self, tag: &str) -> Result<Vec<Question>> {
        let Some(ids) = self.tag_index.get(tag) else {
            return Ok(Vec::new());
        };

        ids.iter()
            .map(|id| {
                self.questions
                    .iter()
                    .find(|q| q.id == *id)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::Internal(format!("Tag index points at missing question {}", id))
                    })
            })
            .collect()
    }

    fn save_question(&mut self, question: Question) -> Result<()> {
        self.insert(question);
        Ok(())
    }

    fn replace_question(&mut self, id: QuestionId, question: Question) -> Result<()> {
        if question.id != id {
            return Err(AppError::BadRequest(format!(
                "Cannot replace question {} with record for question {}",
                id, question.id
            )));
        }
        if self.position(id).is_none() {
            return Err(AppError::NotFound("Question not found".to_string()));
        }
        self.insert(question);
        Ok(())
    }

    fn save_answer(&mut self, question_id: QuestionId, answer: Answer) -> Result<()> {
        let pos = self
            .position(question_id)
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        self.last_answer_id = self.last_answer_id.max(answer.id);
        self.questions[pos].answers.push(answer);
        Ok(())
    }

    fn next_question_id(&mut self) -> QuestionId {
        self.last_question_id += 1;
        self.last_question_id
    }

    fn next_answer_id(&mut self) -> AnswerId {
        self.last_answer_id += 1;
        self.last_answer_id
    }
}
