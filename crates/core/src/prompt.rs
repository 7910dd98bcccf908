//! Prompt construction for the AI provider

/// Build the symptom analysis prompt.
///
/// The reply is expected to end with `Doctor:` and `Reason:` lines, which
/// [`crate::advice::parse_advice`] extracts.
pub fn symptom_prompt(symptoms: &str, language: &str) -> String {
    format!(
        r#"Patient symptoms: {symptoms}

Reply ONLY in {language}.
Explain briefly:
possible cause,
basic home care,
when to see a doctor.

Do not use markdown formatting.

Then give:
Doctor: <specialist>
Reason: <one line>"#,
        symptoms = symptoms.trim(),
    )
}

/// Build the prompt for the free-form chat widget.
pub fn chat_prompt(message: &str) -> String {
    format!(
        r#"You are a friendly health assistant on a symptom checker website.
Answer the user's message in at most four short sentences of plain text.
Do not diagnose. If the symptoms sound serious, tell the user to see a doctor or call emergency services.

User: {message}"#,
        message = message.trim(),
    )
}
