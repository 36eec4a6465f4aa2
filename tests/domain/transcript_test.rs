use docchat::domain::{
    Alignment, ChatTurn, Source, Speaker, TextDirection, Transcript, TurnView,
};

#[test]
fn given_pushed_turns_when_reading_then_keeps_append_order() {
    let mut transcript = Transcript::new();
    transcript.push(ChatTurn::user("first"));
    transcript.push(ChatTurn::assistant("second", Vec::new()));

    let texts: Vec<&str> = transcript.turns().iter().map(|t| t.text.as_str()).collect();

    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(transcript.last().map(|t| t.speaker), Some(Speaker::Assistant));
}

#[test]
fn given_multiline_text_when_building_view_then_splits_on_newlines() {
    let turn = ChatTurn::assistant("line one\nline two\n", Vec::new());

    let view = TurnView::from_turn(&turn);

    assert_eq!(view.body_lines, vec!["line one", "line two", ""]);
}

#[test]
fn given_sources_when_building_view_then_numbers_from_one_in_order() {
    let sources = vec![
        Source::new("https://a.example", "A").unwrap(),
        Source::new("https://b.example", "B").unwrap(),
    ];
    let turn = ChatTurn::assistant("answer", sources);

    let view = TurnView::from_turn(&turn);

    assert_eq!(view.sources.len(), 2);
    assert_eq!(view.sources[0].number, 1);
    assert_eq!(view.sources[0].source.title, "A");
    assert_eq!(view.sources[1].number, 2);
    assert_eq!(view.sources[1].source.title, "B");
}

#[test]
fn given_arabic_user_turn_when_building_view_then_right_aligned() {
    let view = TurnView::from_turn(&ChatTurn::user("ما هو الطقس؟"));

    assert_eq!(view.direction, TextDirection::Rtl);
    assert_eq!(view.alignment, Alignment::Right);
    assert!(!view.has_sources());
}

#[test]
fn given_turns_with_same_content_when_compared_then_they_are_equal() {
    let first = ChatTurn::assistant("Same answer", Vec::new());
    let second = ChatTurn::assistant("Same answer", Vec::new());

    assert_eq!(first, second);
    assert_ne!(first, ChatTurn::user("Same answer"));
}
