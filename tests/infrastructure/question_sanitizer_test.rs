use kb_chat::infrastructure::observability::sanitize_question;

#[test]
fn given_blank_question_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_question("   "), "[EMPTY]");
}

#[test]
fn given_short_question_when_sanitizing_then_returns_trimmed_text() {
    assert_eq!(sanitize_question("  What is RAG?  "), "What is RAG?");
}

#[test]
fn given_long_multibyte_question_when_sanitizing_then_truncates_on_char_boundary() {
    let question = "é".repeat(150);

    let sanitized = sanitize_question(&question);

    assert!(sanitized.starts_with(&"é".repeat(100)));
    assert!(sanitized.ends_with("... (150 chars total)"));
}

#[test]
fn given_secrets_when_sanitizing_then_every_occurrence_is_redacted() {
    let sanitized = sanitize_question("token=abc and token=def with Bearer xyz");

    assert_eq!(
        sanitized,
        "token=[REDACTED] and token=[REDACTED] with Bearer [REDACTED]"
    );
}
