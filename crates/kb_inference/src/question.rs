/// Words that open an interrogative sentence.
pub const INTERROGATIVES: &[&str] = &[
    "who", "what", "when", "where", "why", "how", "is", "are", "can", "does", "do", "did", "will",
    "should", "could", "would", "may", "might",
];

/// Local gate run before the model is asked anything: the text opens with an
/// interrogative word followed by a space, or ends with a question mark.
pub fn is_question(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    lower.ends_with('?')
        || INTERROGATIVES
            .iter()
            .any(|w| lower.strip_prefix(w).is_some_and(|rest| rest.starts_with(' ')))
}

/// True for a non-empty run of ASCII digits and nothing else.
pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
