//! Internationalization support using Fluent

use fluent::concurrent::FluentBundle;
use fluent::FluentResource;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

pub use fluent::FluentArgs;

/// Locales compiled into the binary
const BUILTIN_LOCALES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.ftl")),
    ("ja", include_str!("../locales/ja.ftl")),
];

/// Localization manager
pub struct I18n {
    bundles: RwLock<HashMap<String, Arc<FluentBundle<FluentResource>>>>,
    current_locale: RwLock<String>,
    fallback_locale: String,
}

impl I18n {
    /// Create an empty manager; nothing resolves until a locale is loaded
    pub fn new(default_locale: &str) -> Self {
        Self {
            bundles: RwLock::new(HashMap::new()),
            current_locale: RwLock::new(default_locale.to_string()),
            fallback_locale: "en".to_string(),
        }
    }

    /// Manager with every built-in locale loaded and `locale` selected.
    ///
    /// An unknown locale logs a warning and falls back to English.
    pub fn with_builtin(locale: &str) -> anyhow::Result<Self> {
        let i18n = Self::new(locale);

        for (name, source) in BUILTIN_LOCALES {
            i18n.add_locale(name, source.to_string())?;
        }

        if !i18n.set_locale(locale) {
            tracing::warn!("Locale {} not available, using {}", locale, i18n.fallback_locale);
            *i18n.current_locale.write() = i18n.fallback_locale.clone();
        }

        Ok(i18n)
    }

    /// Parse one locale's source and register it, replacing any earlier bundle
    pub fn add_locale(&self, locale: &str, source: String) -> anyhow::Result<()> {
        let lang_id: LanguageIdentifier = locale
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid locale {}: {}", locale, e))?;

        let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
            anyhow::anyhow!("Fluent parse errors in {}: {:?}", locale, errors)
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        // Terminal output has no use for bidi isolation marks
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow::anyhow!("Fluent bundle errors: {:?}", errors))?;

        self.bundles.write().insert(locale.to_string(), Arc::new(bundle));
        tracing::debug!("Loaded locale: {}", locale);

        Ok(())
    }

    /// Set the current locale
    pub fn set_locale(&self, locale: &str) -> bool {
        if self.bundles.read().contains_key(locale) {
            *self.current_locale.write() = locale.to_string();
            true
        } else {
            false
        }
    }

    /// Get the current locale
    pub fn current_locale(&self) -> String {
        self.current_locale.read().clone()
    }

    /// Get a localized string
    pub fn get(&self, key: &str) -> String {
        self.get_with_args(key, None)
    }

    /// Get a localized string with arguments
    pub fn get_with_args(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let bundles = self.bundles.read();
        let current = self.current_locale.read().clone();

        if let Some(text) = bundles.get(&current).and_then(|b| format_message(b, key, args)) {
            return text;
        }

        if current != self.fallback_locale {
            if let Some(text) = bundles
                .get(&self.fallback_locale)
                .and_then(|b| format_message(b, key, args))
            {
                return text;
            }
        }

        key.to_string()
    }

    /// Get available locales
    pub fn available_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.bundles.read().keys().cloned().collect();
        locales.sort();
        locales
    }
}

fn format_message(
    bundle: &FluentBundle<FluentResource>,
    key: &str,
    args: Option<&FluentArgs>,
) -> Option<String> {
    let pattern = bundle.get_message(key)?.value()?;
    let mut errors = Vec::new();
    let result = bundle.format_pattern(pattern, args, &mut errors);

    if errors.is_empty() {
        Some(result.into_owned())
    } else {
        tracing::debug!("Fluent format errors for {}: {:?}", key, errors);
        None
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("en")
    }
}

/// Convenience macro for getting localized strings
#[macro_export]
macro_rules! t {
    ($i18n:expr, $key:expr) => {
        $i18n.get($key)
    };
    ($i18n:expr, $key:expr, $($arg_name:ident = $arg_value:expr),+ $(,)?) => {{
        let mut args = $crate::i18n::FluentArgs::new();
        $(
            args.set(stringify!($arg_name), $arg_value);
        )+
        $i18n.get_with_args($key, Some(&args))
    }};
}
