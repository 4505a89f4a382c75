use serde_json::Value;
use stackit::AppState;
use stackit::cli::{Reply, Shell};
use stackit::config::Config;
use stackit::models::VoteMode;

fn shell_with(config: Config) -> Shell {
    Shell::new(AppState::new(config).expect("seeded state"))
}

fn run(shell: &mut Shell, line: &str) -> Value {
    match shell.execute_line(line) {
        Reply::View(value) => value,
        other => panic!("expected a view for {:?}, got {:?}", line, other),
    }
}

fn ids(list: &Value) -> Vec<u64> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|item| item["id"].as_u64().expect("id"))
        .collect()
}

#[test]
fn test_browse_seeded_forum() {
    let mut shell = shell_with(Config::default());

    let home = shell.view().unwrap();
    assert_eq!(home["page"], "home");
    assert_eq!(home["count_label"], "5 questions");
    assert_eq!(ids(&home["questions"]), vec![1, 2, 3, 4, 5]);
    assert_eq!(home["can_ask"], false);

    let home = run(&mut shell, "sort answers");
    assert_eq!(ids(&home["questions"]), vec![1, 2, 4, 3, 5]);
    let home = run(&mut shell, "sort views");
    assert_eq!(ids(&home["questions"]), vec![4, 2, 3, 5, 1]);
    let home = run(&mut shell, "filter accepted");
    assert_eq!(ids(&home["questions"]), vec![4, 3, 1]);

    let tag = run(&mut shell, "go /tags/sql");
    assert_eq!(tag["page"], "tag");
    assert_eq!(ids(&tag["questions"]), vec![1, 4]);
    assert_eq!(tag["count_label"], "2 questions tagged with \"sql\"");
    assert_eq!(
        tag["related_tags"],
        serde_json::json!(["mysql", "database", "performance", "optimization"])
    );

    let empty = run(&mut shell, "go /tags/cobol");
    assert_eq!(empty["count_label"], "0 questions tagged with \"cobol\"");
    assert!(empty["empty_message"].is_string());

    let detail = run(&mut shell, "go /question/4");
    assert_eq!(detail["page"], "question");
    assert_eq!(ids(&detail["question"]["answers"]), vec![6, 7]);
    assert_eq!(detail["question"]["answer_count_label"], "2 Answers");
    assert_eq!(detail["can_answer"], false);

    let missing = run(&mut shell, "go /question/99");
    assert_eq!(missing["page"], "not_found");
    assert_eq!(missing["back_link"], "/");
}

#[test]
fn test_answer_and_accept_flow() {
    let mut shell = shell_with(Config::default());

    // Signed-out answers are dropped silently.
    let detail = run(&mut shell, "answer 5 Closures capture their environment by reference");
    assert_eq!(detail["question"]["answers"], serde_json::json!([]));

    run(&mut shell, "login js_learner");
    let detail = run(&mut shell, "answer 5 Closures capture their environment by reference");
    assert_eq!(ids(&detail["question"]["answers"]), vec![8]);
    assert_eq!(detail["can_accept"], true);

    let notes = run(&mut shell, "notifications");
    assert_eq!(notes["notifications"], serde_json::json!([]));

    let detail = run(&mut shell, "accept 5 8");
    assert_eq!(detail["question"]["answers"][0]["is_accepted"], true);

    let home = run(&mut shell, "filter unanswered");
    assert_eq!(home["count_label"], "0 questions");

    let notes = run(&mut shell, "notifications");
    assert_eq!(notes["unread_count"], 1);
    assert_eq!(notes["notifications"][0]["notification_type"], "answer_accepted");

    let notes = run(&mut shell, "read-all");
    assert_eq!(notes["unread_count"], 0);

    run(&mut shell, "logout");
    let notes = run(&mut shell, "notifications");
    assert_eq!(notes["notifications"], serde_json::json!([]));
}

#[test]
fn test_accept_moves_the_mark() {
    let mut shell = shell_with(Config::default());
    run(&mut shell, "login db_admin");

    let detail = run(&mut shell, "accept 4 7");
    let answers = detail["question"]["answers"].as_array().unwrap();
    assert_eq!(answers[0]["id"], 7);
    assert_eq!(answers[0]["is_accepted"], true);
    assert_eq!(answers[1]["is_accepted"], false);

    // Someone else's question: nothing changes.
    let detail = run(&mut shell, "accept 2 3");
    assert_eq!(detail["question"]["id"], 4);
    let question = run(&mut shell, "go /question/2");
    assert_eq!(question["can_accept"], false);
    assert!(
        question["question"]["answers"]
            .as_array()
            .unwrap()
            .iter()
            .all(|a| a["is_accepted"] == false)
    );

    let body = run(&mut shell, "accept 4 42");
    assert_eq!(body["status"], 404);
}

#[test]
fn test_votes_in_both_modes() {
    let mut strict = shell_with(Config::default());
    run(&mut strict, "login hooks_fan");
    let detail = run(&mut strict, "go /question/2");
    assert_eq!(detail["question"]["votes"], 12);
    let detail = run(&mut strict, "vote up question 2");
    assert_eq!(detail["question"]["votes"], 12);
    assert_eq!(detail["question"]["user_vote"], "up");

    let mut optimistic = shell_with(Config {
        vote_mode: VoteMode::Optimistic,
        ..Config::default()
    });
    run(&mut optimistic, "login hooks_fan");
    run(&mut optimistic, "go /question/2");
    let detail = run(&mut optimistic, "vote up question 2");
    assert_eq!(detail["question"]["votes"], 13);
    let detail = run(&mut optimistic, "vote up question 2");
    assert_eq!(detail["question"]["votes"], 13);
    let detail = run(&mut optimistic, "vote down question 2");
    assert_eq!(detail["question"]["votes"], 11);
    assert_eq!(detail["question"]["user_vote"], "down");

    let detail = run(&mut optimistic, "vote up answer 4");
    let answer = detail["question"]["answers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == 4)
        .cloned()
        .unwrap();
    assert_eq!(answer["votes"], 3);
    assert_eq!(answer["user_vote"], "up");
}

#[test]
fn test_ask_question_flow() {
    let mut shell = shell_with(Config {
        max_tags: 2,
        ..Config::default()
    });

    let form = run(&mut shell, "go /ask");
    assert_eq!(form["signed_in"], false);

    run(&mut shell, "signup new_asker");
    let form = run(&mut shell, "ask Too short | also short |");
    assert_eq!(form["errors"]["title"], "Title must be at least 10 characters");
    assert_eq!(
        form["errors"]["description"],
        "Description must be at least 20 characters"
    );
    assert_eq!(form["errors"]["tags"], "At least one tag is required");

    let home = run(
        &mut shell,
        "ask Why is my iterator lazy? | Calling map does nothing until I collect it | Rust, Iterators, Laziness",
    );
    assert_eq!(home["page"], "home");
    assert_eq!(home["questions"][0]["id"], 6);
    assert_eq!(
        home["questions"][0]["tags"],
        serde_json::json!(["rust", "iterators"])
    );

    let tag = run(&mut shell, "go /tags/rust");
    assert_eq!(ids(&tag["questions"]), vec![6]);

    let notes = run(&mut shell, "notifications");
    assert_eq!(notes["notifications"][0]["notification_type"], "question_posted");
}

#[test]
fn test_duplicate_signup_conflicts() {
    let mut shell = shell_with(Config::default());
    let body = run(&mut shell, "signup john_doe");
    assert_eq!(body["status"], 409);
    let body = run(&mut shell, "signup ab");
    assert_eq!(body["status"], 400);
}
