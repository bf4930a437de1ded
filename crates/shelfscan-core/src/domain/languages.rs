//! Display names for the language codes Open Library returns

/// MARC language codes seen in Open Library results, mapped to display
/// names for the input form. Unknown codes fall through to the raw code.
static LANGUAGES: &[(&str, &str)] = &[
    ("ara", "Arabic"),
    ("chi", "Chinese"),
    ("dut", "Dutch"),
    ("eng", "English"),
    ("fre", "French"),
    ("ger", "German"),
    ("gre", "Greek"),
    ("heb", "Hebrew"),
    ("hin", "Hindi"),
    ("ita", "Italian"),
    ("jpn", "Japanese"),
    ("kor", "Korean"),
    ("lat", "Latin"),
    ("pol", "Polish"),
    ("por", "Portuguese"),
    ("rus", "Russian"),
    ("spa", "Spanish"),
    ("swe", "Swedish"),
    ("tur", "Turkish"),
    ("vie", "Vietnamese"),
];

/// Resolve a language code to its display name, if known.
pub fn display_language(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, display)| *display)
}
