use super::*;

#[test]
fn new_log_is_empty() {
    let log = ChatLog::new();
    assert!(log.is_empty());
    assert!(log.last().is_none());
}

#[test]
fn append_grows_by_one_and_returns_entry() {
    let mut log = ChatLog::new();
    let msg = log.append(Role::User, MessageContent::plain("hello"));
    assert_eq!(log.len(), 1);
    assert_eq!(log.last(), Some(&msg));
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content.as_str(), "hello");
    assert!(!msg.is_html);
}

#[test]
fn append_preserves_earlier_entries() {
    let mut log = ChatLog::new();
    let first = log.append(Role::User, MessageContent::plain("one"));
    let second = log.append(Role::Ai, MessageContent::rich("<b>two</b>"));
    log.append(Role::User, MessageContent::plain("three"));

    assert_eq!(log.len(), 3);
    assert_eq!(log.messages()[0], first);
    assert_eq!(log.messages()[1], second);
    assert_eq!(log.messages()[2].content.as_str(), "three");
}

#[test]
fn ids_are_strictly_increasing() {
    let mut log = ChatLog::new();
    for i in 0..5 {
        log.append(Role::User, MessageContent::plain(format!("m{i}")));
    }
    let ids: Vec<u64> = log.messages().iter().map(|m| m.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids[0], 1);
}

#[test]
fn rich_content_sets_is_html() {
    let mut log = ChatLog::new();
    let msg = log.append(Role::Ai, MessageContent::rich("<p>x</p>"));
    assert!(msg.is_html);
    assert!(msg.content.is_html());
}

#[test]
fn greeting_appends_rich_ai_messages_in_order() {
    let log = ChatLog::with_greeting(["<b>hi</b>", "second"]);
    assert_eq!(log.len(), 2);
    assert!(log.messages().iter().all(|m| m.role == Role::Ai && m.is_html));
    assert_eq!(log.messages()[1].content.as_str(), "second");
}

#[test]
fn message_serializes_tagged_content() {
    let mut log = ChatLog::new();
    let msg = log.append(Role::Ai, MessageContent::plain("sorry"));
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["role"], "ai");
    assert_eq!(value["content"]["kind"], "plain");
    assert_eq!(value["content"]["text"], "sorry");
    assert_eq!(value["isHtml"], false);
    assert!(value["createdAtMs"].as_i64().unwrap() > 0);
}
