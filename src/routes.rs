//! Navigable destinations and how each one renders.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::{
    AppState,
    error::{FieldErrors, Result},
    handlers::{self, questions::GetQuestionsQuery},
    models::{NotFoundPage, Page, QuestionDraft, QuestionId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Tag(String),
    Ask,
    Question(QuestionId),
    Login,
    Signup,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let trimmed = trimmed.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["ask"] => Route::Ask,
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["tags", tag] => Route::Tag((*tag).to_string()),
            ["question", id] => match id.parse::<QuestionId>() {
                Ok(id) => Route::Question(id),
                Err(_) => Route::NotFound(trimmed.to_string()),
            },
            _ => Route::NotFound(trimmed.to_string()),
        }
    }
}

impl FromStr for Route {
    type Err = Infallible;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Route::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Tag(tag) => write!(f, "/tags/{}", tag),
            Route::Ask => f.write_str("/ask"),
            Route::Question(id) => write!(f, "/question/{}", id),
            Route::Login => f.write_str("/login"),
            Route::Signup => f.write_str("/signup"),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}

/// Renders `route` against the current state. `query` only affects the home list.
pub fn render(state: &AppState, route: &Route, query: GetQuestionsQuery) -> Result<Page> {
    tracing::debug!("Rendering {}", route);

    let page = match route {
        Route::Home => Page::Home(handlers::questions::get_questions(state, query)?),
        Route::Tag(tag) => Page::Tag(handlers::tags::get_tag_questions(state, tag)?),
        Route::Ask => Page::Ask(handlers::questions::ask_form(
            state,
            QuestionDraft::default(),
            FieldErrors::new(),
        )),
        Route::Question(id) => handlers::questions::get_question(state, *id)?,
        Route::Login => Page::Login(handlers::auth::auth_page(state)),
        Route::Signup => Page::Signup(handlers::auth::auth_page(state)),
        Route::NotFound(path) => Page::NotFound(NotFoundPage::new(format!("No page at {}", path))),
    };

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/ask"), Route::Ask);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/signup/"), Route::Signup);
        assert_eq!(Route::parse("/tags/sql"), Route::Tag("sql".to_string()));
        assert_eq!(Route::parse("/question/12?tab=votes"), Route::Question(12));
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert!(matches!(Route::parse("/question/abc"), Route::NotFound(_)));
        assert!(matches!(Route::parse("/question"), Route::NotFound(_)));
        assert!(matches!(Route::parse("/users/1"), Route::NotFound(_)));
        assert!(matches!(Route::parse("/tags/a/b"), Route::NotFound(_)));
    }

    #[test]
    fn test_display_round_trips() {
        for route in [
            Route::Home,
            Route::Ask,
            Route::Login,
            Route::Signup,
            Route::Tag("error-handling".to_string()),
            Route::Question(3),
        ] {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
    }
}
