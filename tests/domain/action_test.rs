use docassist::domain::{
    Action, ActionRequest, ActionResult, Answer, FIX_GRAMMAR_PREFIX, SUMMARIZE_PREFIX,
};

#[test]
fn given_action_names_when_deserializing_then_maps_snake_case() {
    let summarize: Action = serde_json::from_str("\"summarize\"").unwrap();
    let ask: Action = serde_json::from_str("\"ask\"").unwrap();
    let fix: Action = serde_json::from_str("\"fix_grammar\"").unwrap();

    assert_eq!(summarize, Action::Summarize);
    assert_eq!(ask, Action::Ask);
    assert_eq!(fix, Action::FixGrammar);
}

#[test]
fn given_unknown_action_name_when_deserializing_then_fails() {
    let result = serde_json::from_str::<Action>("\"translate\"");

    assert!(result.is_err());
}

#[test]
fn given_action_when_serializing_then_matches_display() {
    for action in [Action::Summarize, Action::Ask, Action::FixGrammar] {
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, format!("\"{action}\""));
    }
}

#[test]
fn given_actions_when_reading_prefix_then_only_generators_have_one() {
    assert_eq!(Action::Summarize.instruction_prefix(), Some(SUMMARIZE_PREFIX));
    assert_eq!(Action::FixGrammar.instruction_prefix(), Some(FIX_GRAMMAR_PREFIX));
    assert_eq!(Action::Ask.instruction_prefix(), None);
    assert_eq!(SUMMARIZE_PREFIX, "summarize: ");
    assert_eq!(FIX_GRAMMAR_PREFIX, "fix grammar: ");
}

#[test]
fn given_empty_question_when_reading_then_treated_as_missing() {
    let empty = ActionRequest::ask("", "context");
    let present = ActionRequest::ask("Who?", "context");

    assert_eq!(empty.question(), None);
    assert_eq!(present.question(), Some("Who?"));
    assert_eq!(ActionRequest::summarize("context").question(), None);
}

#[test]
fn given_results_when_reading_then_expose_action_and_text() {
    let answer = ActionResult::Answer(Answer {
        text: "cats".to_string(),
        score: 0.9,
        start: 4,
        end: 8,
    });
    let summary = ActionResult::Summary("short".to_string());
    let correction = ActionResult::Correction("fixed".to_string());

    assert_eq!(answer.action(), Action::Ask);
    assert_eq!(answer.text(), "cats");
    assert_eq!(summary.action(), Action::Summarize);
    assert_eq!(summary.text(), "short");
    assert_eq!(correction.action(), Action::FixGrammar);
    assert_eq!(correction.text(), "fixed");
}
