//! Line-oriented driver over [`AppState`]: each input line is parsed as a
//! command, applied, and answered with the JSON of the page now on screen.

use clap::{Parser, Subcommand};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, FieldErrors, Result},
    handlers::{self, questions::GetQuestionsQuery},
    models::{
        AnswerId, LoginRequest, Outcome, Page, QuestionDraft, QuestionFilter, QuestionId,
        QuestionSort, SignupRequest, TagInput, VoteDirection, VoteTarget, VoteTargetKind,
    },
    routes::{self, Route},
};

#[derive(Debug, Parser)]
#[command(
    name = "stackit",
    about = "Browse, ask, answer and vote on StackIt questions",
    no_binary_name = true,
    disable_version_flag = true
)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Navigate to a path: /, /tags/<tag>, /ask, /question/<id>, /login, /signup
    Go { path: String },

    /// Render the current page again
    Show,

    /// Sort the home list: newest, votes, answers or views
    Sort { key: QuestionSort },

    /// Filter the home list: all, unanswered, answered or accepted
    Filter { key: QuestionFilter },

    /// Sign in as an existing user
    Login { username: String },

    /// Create a user and sign in as them
    Signup { username: String },

    /// Sign out
    Logout,

    /// Vote on a question or an answer
    Vote {
        /// up or down
        direction: VoteDirection,
        /// question or answer
        target: VoteTargetKind,
        id: u64,
    },

    /// Accept an answer on one of your questions
    Accept {
        question_id: QuestionId,
        answer_id: AnswerId,
    },

    /// Post an answer
    Answer {
        question_id: QuestionId,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Ask a question: <title> | <description> | <tag>, <tag>
    Ask {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        form: Vec<String>,
    },

    /// List notifications, newest first
    Notifications,

    /// Mark one notification as read
    Read { id: Uuid },

    /// Mark every notification as read
    ReadAll,

    /// Leave the shell
    Quit,
}

#[derive(Debug)]
pub enum Reply {
    View(Value),
    Text(String),
    Quit,
}

/// Splits `title | description | tags` into a draft. Missing sections stay
/// empty so validation reports them.
pub fn parse_ask_form(form: &str, max_tags: usize) -> QuestionDraft {
    let mut parts = form.splitn(3, '|').map(str::trim);
    let title = parts.next().unwrap_or_default();
    let description = parts.next().unwrap_or_default();

    let mut tags = TagInput::new(max_tags);
    if let Some(raw) = parts.next() {
        tags.add_many(raw);
    }

    QuestionDraft::new(title, description, tags.into_tags())
}

pub struct Shell {
    state: AppState,
    route: Route,
    query: GetQuestionsQuery,
    rejected_draft: Option<(QuestionDraft, FieldErrors)>,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route: Route::Home,
            query: GetQuestionsQuery::default(),
            rejected_draft: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Parses and runs one input line. Parse failures and `help` come back as
    /// text; command errors come back as their rendered JSON body.
    pub fn execute_line(&mut self, line: &str) -> Reply {
        let command = match CommandLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(err) => return Reply::Text(err.to_string()),
        };

        match self.execute(command) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!("Command failed: {}", err);
                Reply::View(err.render())
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Go { path } => {
                self.navigate(Route::parse(&path));
            }
            Command::Show => {}
            Command::Sort { key } => {
                self.query.sort = Some(key);
                self.navigate(Route::Home);
            }
            Command::Filter { key } => {
                self.query.filter = Some(key);
                self.navigate(Route::Home);
            }
            Command::Login { username } => {
                let user = handlers::auth::login(&mut self.state, LoginRequest { username })?;
                tracing::info!("Signed in as {}", user.username);
                self.leave_auth_page();
            }
            Command::Signup { username } => {
                let user = handlers::auth::signup(&mut self.state, SignupRequest { username })?;
                tracing::info!("Signed up as {}", user.username);
                self.leave_auth_page();
            }
            Command::Logout => {
                if let Some(user) = handlers::auth::logout(&mut self.state) {
                    tracing::info!("Signed out {}", user.username);
                }
            }
            Command::Vote {
                direction,
                target,
                id,
            } => {
                let outcome = handlers::questions::vote(
                    &mut self.state,
                    direction,
                    VoteTarget::new(target, id),
                )?;
                log_ignored("vote", &outcome);
            }
            Command::Accept {
                question_id,
                answer_id,
            } => {
                let outcome =
                    handlers::answers::accept_answer(&mut self.state, question_id, answer_id)?;
                log_ignored("accept", &outcome);
            }
            Command::Answer { question_id, text } => {
                let outcome =
                    handlers::answers::create_answer(&mut self.state, question_id, &text.join(" "))?;
                log_ignored("answer", &outcome);
                self.navigate(Route::Question(question_id));
            }
            Command::Ask { form } => {
                let draft = parse_ask_form(&form.join(" "), self.state.config.max_tags);
                return self.ask(draft);
            }
            Command::Notifications => {
                let list = handlers::notifications::get_notifications(&self.state);
                return Ok(Reply::View(serde_json::to_value(list)?));
            }
            Command::Read { id } => {
                let list = handlers::notifications::mark_notification_read(&mut self.state, id)?;
                return Ok(Reply::View(serde_json::to_value(list)?));
            }
            Command::ReadAll => {
                let list = handlers::notifications::mark_all_notifications_read(&mut self.state);
                return Ok(Reply::View(serde_json::to_value(list)?));
            }
            Command::Quit => return Ok(Reply::Quit),
        }

        self.view().map(Reply::View)
    }

    /// JSON for the page at the current route.
    pub fn view(&self) -> Result<Value> {
        let page = match (&self.route, &self.rejected_draft) {
            (Route::Ask, Some((draft, errors))) => serde_json::to_value(Page::Ask(
                handlers::questions::ask_form(&self.state, draft.clone(), errors.clone()),
            ))?,
            (route, _) => serde_json::to_value(routes::render(&self.state, route, self.query)?)?,
        };
        Ok(page)
    }

    fn ask(&mut self, draft: QuestionDraft) -> Result<Reply> {
        match handlers::questions::create_question(&mut self.state, &draft) {
            Ok(Outcome::Applied(question)) => {
                tracing::info!("Question {} posted", question.id);
                self.navigate(Route::Home);
            }
            Ok(outcome) => {
                log_ignored("ask", &outcome);
                self.navigate(Route::Ask);
            }
            Err(AppError::Validation(errors)) => {
                self.route = Route::Ask;
                self.rejected_draft = Some((draft, errors));
            }
            Err(err) => return Err(err),
        }

        self.view().map(Reply::View)
    }

    fn navigate(&mut self, route: Route) {
        self.rejected_draft = None;
        self.route = route;
    }

    fn leave_auth_page(&mut self) {
        if matches!(self.route, Route::Login | Route::Signup) {
            self.navigate(Route::Home);
        }
    }
}

fn log_ignored<T>(action: &str, outcome: &Outcome<T>) {
    if let Some(reason) = outcome.ignored_reason() {
        tracing::debug!("Ignored {}: {:?}", action, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::QuestionRepository;

    fn shell() -> Shell {
        Shell::new(AppState::new(Config::default()).unwrap())
    }

    fn run(shell: &mut Shell, line: &str) -> Value {
        match shell.execute_line(line) {
            Reply::View(value) => value,
            other => panic!("expected a view for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_parse_ask_form() {
        let draft = parse_ask_form(
            "How do I join tables? | I want rows from both tables at once | SQL, Joins",
            5,
        );
        assert_eq!(draft.title, "How do I join tables?");
        assert_eq!(draft.description, "I want rows from both tables at once");
        assert_eq!(draft.tags, vec!["sql", "joins"]);

        let partial = parse_ask_form("Only a title", 5);
        assert_eq!(partial.title, "Only a title");
        assert!(partial.description.is_empty());
        assert!(partial.tags.is_empty());
    }

    #[test]
    fn test_home_sort_and_filter() {
        let mut shell = shell();
        let home = run(&mut shell, "sort votes");
        let ids: Vec<u64> = home["questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 4, 3, 5, 1]);

        let home = run(&mut shell, "filter unanswered");
        assert_eq!(home["count_label"], "1 question");
        assert_eq!(home["sort"], "votes");
    }

    #[test]
    fn test_go_unknown_path_renders_not_found() {
        let mut shell = shell();
        let page = run(&mut shell, "go /nowhere");
        assert_eq!(page["page"], "not_found");
        assert_eq!(shell.route(), &Route::NotFound("/nowhere".to_string()));
    }

    #[test]
    fn test_ask_signed_out_stays_on_form() {
        let mut shell = shell();
        let page = run(
            &mut shell,
            "ask A long enough title | A description that is long enough | rust",
        );
        assert_eq!(page["page"], "ask");
        assert_eq!(page["signed_in"], false);
        assert_eq!(shell.state().store.load_questions().unwrap().len(), 5);
    }

    #[test]
    fn test_ask_validation_keeps_draft() {
        let mut shell = shell();
        run(&mut shell, "login john_doe");
        let page = run(&mut shell, "ask Short | tiny");
        assert_eq!(page["page"], "ask");
        assert_eq!(page["draft"]["title"], "Short");
        assert_eq!(page["errors"]["title"], "Title must be at least 10 characters");
        assert_eq!(page["errors"]["tags"], "At least one tag is required");

        let page = run(&mut shell, "go /ask");
        assert_eq!(page["draft"]["title"], "");
    }

    #[test]
    fn test_ask_success_returns_home() {
        let mut shell = shell();
        run(&mut shell, "login john_doe");
        let home = run(
            &mut shell,
            "ask How to borrow twice? | The compiler rejects my second mutable borrow | rust, borrowck",
        );
        assert_eq!(home["page"], "home");
        assert_eq!(home["questions"][0]["id"], 6);
        assert_eq!(shell.route(), &Route::Home);
    }

    #[test]
    fn test_login_from_login_page_goes_home() {
        let mut shell = shell();
        run(&mut shell, "go /login");
        let page = run(&mut shell, "login react_dev");
        assert_eq!(page["page"], "home");
        assert_eq!(page["can_ask"], true);
    }

    #[test]
    fn test_unknown_user_renders_error() {
        let mut shell = shell();
        let body = run(&mut shell, "login nobody_here");
        assert!(body["error"].is_string());
    }

    #[test]
    fn test_parse_errors_and_quit() {
        let mut shell = shell();
        assert!(matches!(shell.execute_line("dance"), Reply::Text(_)));
        assert!(matches!(shell.execute_line("vote sideways question 1"), Reply::Text(_)));
        assert!(matches!(shell.execute_line("help"), Reply::Text(_)));
        assert!(matches!(shell.execute_line("quit"), Reply::Quit));
    }
}
