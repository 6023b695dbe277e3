//! Localized UI strings.
//!
//! Translations are embedded `key=value` files under `locales/`. The `t!("key")`
//! macro looks up the current language, falling back to English, then to the
//! key itself. Language can be switched at runtime via `set_language()`.

use std::collections::HashMap;
use std::sync::Mutex;

static I18N: Mutex<Option<I18nState>> = Mutex::new(None);

struct I18nState {
    current_lang: String,
    /// lang_code → (key → translated_string)
    translations: HashMap<String, HashMap<String, String>>,
}

/// Supported languages: (code, native_name)
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("de", "Deutsch"),
    ("es", "Español"),
    ("fr", "Français"),
];

fn embedded(code: &str) -> &'static str {
    match code {
        "de" => include_str!("../locales/de.txt"),
        "es" => include_str!("../locales/es.txt"),
        "fr" => include_str!("../locales/fr.txt"),
        _ => include_str!("../locales/en.txt"),
    }
}

/// Load the embedded translations. Safe to call more than once; the current
/// language survives re-initialisation.
pub fn init() {
    let translations = LANGUAGES
        .iter()
        .map(|&(code, _)| (code.to_string(), parse_translations(embedded(code))))
        .collect();

    if let Ok(mut guard) = I18N.lock() {
        let current_lang = guard
            .as_ref()
            .map_or_else(|| "en".to_string(), |s| s.current_lang.clone());
        *guard = Some(I18nState {
            current_lang,
            translations,
        });
    }
}

/// Set the active language. Unknown codes fall back to "en".
pub fn set_language(code: &str) {
    if let Ok(mut guard) = I18N.lock()
        && let Some(ref mut state) = *guard
    {
        if state.translations.contains_key(code) {
            state.current_lang = code.to_string();
        } else {
            state.current_lang = "en".to_string();
        }
    }
}

pub fn current_language() -> String {
    if let Ok(guard) = I18N.lock()
        && let Some(ref state) = *guard
    {
        return state.current_lang.clone();
    }
    "en".to_string()
}

/// Look up a translation key in the current language, then English, then
/// return the key itself.
pub fn translate(key: &str) -> String {
    if let Ok(guard) = I18N.lock()
        && let Some(ref state) = *guard
    {
        if let Some(map) = state.translations.get(&state.current_lang)
            && let Some(val) = map.get(key)
        {
            return val.clone();
        }
        if state.current_lang != "en"
            && let Some(map) = state.translations.get("en")
            && let Some(val) = map.get(key)
        {
            return val.clone();
        }
    }
    key.to_string()
}

/// Best matching language for the environment's locale, or "en".
pub fn detect_system_language() -> String {
    for var in &["LC_ALL", "LC_MESSAGES", "LANG", "LANGUAGE"] {
        if let Ok(val) = std::env::var(var)
            && let Some(lang) = match_system_locale(&val)
        {
            return lang;
        }
    }
    "en".to_string()
}

/// Match a locale string ("de_DE.UTF-8", "fr-CA", "es") to a supported language.
fn match_system_locale(locale: &str) -> Option<String> {
    let normalized = locale.to_lowercase().replace('_', "-");
    let lang_part = normalized.split(['.', '@']).next().unwrap_or(&normalized);
    let primary = lang_part.split('-').next().unwrap_or(lang_part);

    LANGUAGES
        .iter()
        .find(|&&(code, _)| code == primary)
        .map(|&(code, _)| code.to_string())
}

/// Parse a `key=value` translation file. `#` starts a comment line.
fn parse_translations(data: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            map.insert(key.trim().to_string(), val.trim().to_string());
        }
    }
    map
}

/// Translation macro. Usage: `t!("common.ok")` or
/// `t!("shader_tune.setting", name = "Gamma", value = "1")`
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::translate($key)
    };
    ($key:expr, $($name:ident = $val:expr),+ $(,)?) => {{
        let mut s = $crate::i18n::translate($key);
        $(
            s = s.replace(concat!("{", stringify!($name), "}"), &format!("{}", $val));
        )+
        s
    }};
}
