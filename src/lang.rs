use locale_config::Locale;

/// Locales with a translation file under `i18n/`
pub const AVAILABLE_LOCALES: [&str; 2] = ["en", "ro"];

/// Retrieves the system's locale and standardizes it.
///
/// See [`normalize_locale`] for the mapping.
pub fn get_system_locale() -> String {
    normalize_locale(&Locale::current().to_string())
}

/// Maps a system locale string to one of [`AVAILABLE_LOCALES`].
///
/// The system may report a list (`ro-RO,en-US`) or use underscores
/// (`ro_RO.UTF-8`); only the language of the first tag counts. Languages
/// without a translation fall back to `en`.
pub fn normalize_locale(locale: &str) -> String {
    let first = locale.split(',').next().unwrap_or_default().trim();
    let language = first
        .split(|c| c == '-' || c == '_' || c == '.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match language.as_str() {
        // Romanian and Moldovan regions are unified to ro
        "ro" | "mo" => "ro".to_string(),
        // Everything else uses the English fallback
        _ => "en".to_string(),
    }
}

/// Applies the system locale to every label built from now on
pub fn apply_system_locale() -> String {
    let locale = get_system_locale();
    rust_i18n::set_locale(&locale);
    log::info!("Set interface language to {}", locale);
    locale
}
