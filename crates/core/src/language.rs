//! Reply-language selection for the AI prompt

/// Language tag used when the form does not send one
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Languages offered in the symptom form, in display order
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en-US", "English"),
    ("hi-IN", "Hindi"),
    ("bn-IN", "Bengali"),
    ("ta-IN", "Tamil"),
    ("te-IN", "Telugu"),
    ("kn-IN", "Kannada"),
    ("ml-IN", "Malayalam"),
    ("mr-IN", "Marathi"),
    ("gu-IN", "Gujarati"),
    ("pa-IN", "Punjabi"),
    ("ur-IN", "Urdu"),
    ("es-ES", "Spanish"),
    ("fr-FR", "French"),
    ("de-DE", "German"),
    ("ar-SA", "Arabic"),
    ("zh-CN", "Chinese"),
];

/// Resolve a BCP-47 tag (`hi-IN`, `ta`, `EN-us`) to the language name put in the prompt.
///
/// The full tag is tried first, then its primary subtag. Anything unknown is English.
pub fn language_name(code: &str) -> &'static str {
    let code = code.trim();
    if code.is_empty() {
        return "English";
    }

    if let Some(&(_, name)) = SUPPORTED_LANGUAGES
        .iter()
        .find(|(tag, _)| tag.eq_ignore_ascii_case(code))
    {
        return name;
    }

    let primary = code.split(['-', '_']).next().unwrap_or(code);
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(tag, _)| {
            tag.split('-')
                .next()
                .is_some_and(|p| p.eq_ignore_ascii_case(primary))
        })
        .map(|(_, name)| *name)
        .unwrap_or("English")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_tag() {
        assert_eq!(language_name("hi-IN"), "Hindi");
        assert_eq!(language_name("en-US"), "English");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(language_name("TA-in"), "Tamil");
    }

    #[test]
    fn test_primary_subtag_fallback() {
        assert_eq!(language_name("fr"), "French");
        assert_eq!(language_name("es-MX"), "Spanish");
        assert_eq!(language_name("zh_TW"), "Chinese");
    }

    #[test]
    fn test_unknown_defaults_to_english() {
        assert_eq!(language_name("xx-YY"), "English");
        assert_eq!(language_name(""), "English");
        assert_eq!(language_name("   "), "English");
    }
}
