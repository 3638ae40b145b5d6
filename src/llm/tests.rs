use super::*;

#[test]
fn test_clean_completion_trims_and_flattens() {
    assert_eq!(
        clean_completion("  Rome is the capital\nof Italy.  "),
        "Rome is the capital of Italy."
    );
}

#[test]
fn test_clean_completion_cuts_at_next_question() {
    assert_eq!(
        clean_completion("Yes, it is. Q: Is grass green?"),
        "Yes, it is."
    );
    assert_eq!(clean_completion("Q: anything"), "");
}

#[test]
fn test_chat_generator_defaults() {
    let generator = ChatGenerator::new("llama2");
    assert_eq!(generator.model(), "llama2");
    assert_eq!(generator.max_tokens, DEFAULT_GENERATION_MAX_TOKENS);
    assert_eq!(generator.with_max_tokens(8).max_tokens, 8);
}

#[tokio::test]
async fn test_static_generator() {
    let generator = StaticGenerator::new().with_answer("Is the sky blue?", "Yes.");
    assert_eq!(
        generator.generate_answer("Is the sky blue?").await.unwrap(),
        "Yes."
    );
    assert!(matches!(
        generator.generate_answer("Unknown?").await,
        Err(GenerationError::Upstream { .. })
    ));
    assert_eq!(generator.calls().len(), 2);

    let generator = StaticGenerator::new().with_fallback("I don't know.");
    assert_eq!(
        generator.generate_answer("Anything?").await.unwrap(),
        "I don't know."
    );
}
