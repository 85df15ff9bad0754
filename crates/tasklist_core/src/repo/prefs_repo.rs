//! Theme and locale preference load/save.
//!
//! Preferences are stored as bare UTF-8 tokens (`light`, `dark`, `zh`,
//! `en`), not JSON. Unknown or unreadable values fall back to defaults.

use crate::model::prefs::{Locale, Theme};
use crate::store::{KvStore, StoreResult};
use log::{debug, warn};

/// Loads the stored theme.
///
/// Without a valid stored value, `prefers_dark` (the platform color scheme
/// hint supplied by the caller) decides between `Dark` and `Light`.
pub fn load_theme<S: KvStore + ?Sized>(store: &S, key: &str, prefers_dark: bool) -> Theme {
    if let Some(theme) = read_token(store, key).as_deref().and_then(Theme::parse) {
        return theme;
    }
    if prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Persists `theme` at `key`. No-op on an unavailable store.
pub fn save_theme<S: KvStore + ?Sized>(store: &S, key: &str, theme: Theme) -> StoreResult<()> {
    write_token(store, key, theme.as_str())
}

/// Loads the stored locale, defaulting to [`Locale::Zh`].
pub fn load_locale<S: KvStore + ?Sized>(store: &S, key: &str) -> Locale {
    read_token(store, key)
        .as_deref()
        .and_then(Locale::parse)
        .unwrap_or_default()
}

/// Persists `locale` at `key`. No-op on an unavailable store.
pub fn save_locale<S: KvStore + ?Sized>(store: &S, key: &str, locale: Locale) -> StoreResult<()> {
    write_token(store, key, locale.as_str())
}

fn read_token<S: KvStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(Some(raw)) => String::from_utf8(raw).ok(),
        Ok(None) => None,
        Err(err) => {
            warn!(
                "event=pref_load module=repo status=degraded reason=store_read_failed key={key} error={err}"
            );
            None
        }
    }
}

fn write_token<S: KvStore + ?Sized>(store: &S, key: &str, token: &str) -> StoreResult<()> {
    if !store.is_available() {
        debug!("event=pref_save module=repo status=skipped reason=store_unavailable key={key}");
        return Ok(());
    }
    store.set(key, token.as_bytes())?;
    debug!("event=pref_save module=repo status=ok key={key} value={token}");
    Ok(())
}
