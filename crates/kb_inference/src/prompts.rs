use kb_core::{numbered_titles, Article};

pub const SYSTEM_PROMPT: &str = "You are a strict knowledge base assistant.";

/// Reply meaning the question matched no article.
pub const NOT_FOUND_REPLY: &str = "article-doesnt-exist";

/// Reply meaning the input was not a question.
pub const NOT_A_QUESTION_REPLY: &str = "I can only answer questions";

/// Few-shot pairs shown to the model after the rules. Numbers refer to the
/// production knowledge base ordering.
const EXAMPLES: &[(&str, &str)] = &[
    ("When did Reveel launch?", "3"),
    ("how can I reset my password", "1"),
    ("Where can I adjust the speed?", "6"),
    ("i want to delete my account", NOT_FOUND_REPLY),
    ("how to save movies on Favorites", "4"),
    ("how do I contact support", NOT_FOUND_REPLY),
    ("What is Reveel?", "7"),
    ("How do I sign up for Reveel?", "5"),
    ("Are subtitles required for monetization?", "25"),
    ("Who can use Reveel?", NOT_FOUND_REPLY),
    ("Is there batch uploading?", NOT_FOUND_REPLY),
    ("What is the meaning of life?", NOT_FOUND_REPLY),
    ("Can I upload videos in 4K?", "12"),
    ("How do I change my email address?", "8"),
    ("What payment methods are accepted?", "15"),
    ("How do I delete my account?", NOT_FOUND_REPLY),
    ("What is the refund policy?", "17"),
    ("How do I contact technical support?", NOT_FOUND_REPLY),
    ("Can I share my account?", NOT_FOUND_REPLY),
    ("How do I reset my password?", "1"),
    ("How do I update my profile picture?", "9"),
    ("How do I enable notifications?", "10"),
    ("How do I turn off notifications?", "11"),
    ("How do I change my subscription plan?", "13"),
    ("How do I cancel my subscription?", "14"),
    ("What is the maximum video length?", "16"),
    ("How do I report a bug?", "18"),
    ("How do I request a feature?", "19"),
    ("How do I access analytics?", "20"),
    ("How do I monetize my content?", "21"),
    ("How do I withdraw my earnings?", "22"),
    ("How do I set up two-factor authentication?", "23"),
    ("How do I invite collaborators?", "24"),
    ("What are the community guidelines?", "26"),
    ("What is the privacy policy?", "27"),
    ("What is the terms of service?", "28"),
    ("What is the copyright policy?", "29"),
    ("What is the content rating system?", "30"),
    ("hello", NOT_A_QUESTION_REPLY),
    ("hey", NOT_A_QUESTION_REPLY),
    ("hi", NOT_A_QUESTION_REPLY),
    ("wsg", NOT_A_QUESTION_REPLY),
    ("yo", NOT_A_QUESTION_REPLY),
    ("sup", NOT_A_QUESTION_REPLY),
    ("randomtext", NOT_A_QUESTION_REPLY),
    ("asdfghjkl", NOT_A_QUESTION_REPLY),
    ("123123@gmail.com", NOT_A_QUESTION_REPLY),
    ("sigma", NOT_A_QUESTION_REPLY),
    ("2", NOT_A_QUESTION_REPLY),
    ("42", NOT_A_QUESTION_REPLY),
    ("what's up", NOT_A_QUESTION_REPLY),
    ("hmm i wonder what is reveel", NOT_A_QUESTION_REPLY),
    ("I want to know about Reveel", NOT_A_QUESTION_REPLY),
    ("Tell me about Reveel", NOT_A_QUESTION_REPLY),
    ("Give me information about Reveel", NOT_A_QUESTION_REPLY),
    ("I am interested in Reveel", NOT_A_QUESTION_REPLY),
    ("Please help", NOT_A_QUESTION_REPLY),
    ("Help", NOT_A_QUESTION_REPLY),
    ("Support", NOT_A_QUESTION_REPLY),
    ("I have a problem", NOT_A_QUESTION_REPLY),
    ("I need assistance", NOT_A_QUESTION_REPLY),
    ("I have a question", NOT_A_QUESTION_REPLY),
    ("?", NOT_A_QUESTION_REPLY),
];

fn examples() -> String {
    EXAMPLES
        .iter()
        .map(|(input, output)| format!("Input: {}\nOutput: {}", input, output))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the classification prompt for `query` over the numbered titles.
pub fn classification_prompt(articles: &[Article], query: &str) -> String {
    format!(
        r#"
You are a strict Q&A classifier. You have a knowledge base of articles.

Articles:
{articles}

Your job is to read the user's input and follow these exact rules:

RULES:
1. If the input is NOT a question (not interrogative), reply EXACTLY: {not_question}.
2. If the input IS a question:
    - If it semantically matches an article from the list, reply ONLY with the article number (just the number, no extra text).
    - If no article is relevant, reply EXACTLY: {not_found}.
    - If the input is a greeting, slang, random text, or just a number, reply EXACTLY: {not_question}.
3. NEVER explain your reasoning, NEVER output anything other than:
    - a single number (e.g., 2)
    - OR "{not_found}"
    - OR "{not_question}".

EXAMPLES:

{examples}

NOW follow the rules STRICTLY.

Input: "{query}"
"#,
        articles = numbered_titles(articles),
        not_question = NOT_A_QUESTION_REPLY,
        not_found = NOT_FOUND_REPLY,
        examples = examples(),
        query = query,
    )
}
