use unic_langid::LanguageIdentifier;

/// ISO 639-1 codes and their English display names.
const LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bangla"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ku", "Kurdish"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("ms", "Malay"),
    ("nb", "Norwegian Bokmål"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// English display name of a locale tag's language.
///
/// Accepts `en-US`, `en_US` or `en_US.UTF-8`. Unknown languages come back
/// as the bare language subtag.
///
/// ```
/// use msfeedback::report::language_display_name;
///
/// assert_eq!(language_display_name("fa-IR"), "Persian");
/// assert_eq!(language_display_name("xx"), "xx");
/// ```
#[must_use]
pub fn language_display_name(tag: &str) -> String {
    // POSIX locales carry an encoding or modifier suffix the BCP 47 parser rejects.
    let locale = tag.split(['.', '@']).next().unwrap_or_default();
    let subtag = match locale.parse::<LanguageIdentifier>() {
        Ok(id) if id.language.as_str() != "und" => id.language.as_str().to_string(),
        _ => locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase(),
    };

    LANGUAGES
        .binary_search_by_key(&subtag.as_str(), |&(code, _)| code)
        .map_or(subtag.clone(), |index| LANGUAGES[index].1.to_string())
}
