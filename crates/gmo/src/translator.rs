//! Translation context: which catalog, if any, answers lookups.
//!
//! A [`Translator`] is picked once at startup from a table of candidate
//! catalogs and then only read. [`ActiveTranslator`] is the once-only slot
//! for programs that want a single process-wide translator.

use std::sync::OnceLock;

use gmo_locale::{LocaleEntry, find_best_entry};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::InitError;

#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    catalog: Option<Catalog<'a>>,
    locale: Option<&'a str>,
}

impl Default for Translator<'_> {
    fn default() -> Self {
        Translator::identity()
    }
}

impl<'a> Translator<'a> {
    /// Translator that returns every message unchanged.
    pub const fn identity() -> Self {
        Translator {
            catalog: None,
            locale: None,
        }
    }

    pub fn from_catalog(catalog: Catalog<'a>) -> Self {
        Translator {
            catalog: Some(catalog),
            locale: None,
        }
    }

    /// Bind the catalog in `entries` that best matches `locale_name`,
    /// trying its fallback names from most to least specific. Falls back to
    /// the identity translator when nothing matches.
    pub fn for_locale<D>(entries: &'a [LocaleEntry<'a, D>], locale_name: &str) -> Self
    where
        D: AsRef<[u8]>,
    {
        if let Some(entry) = find_best_entry(entries, locale_name) {
            debug!(requested = locale_name, matched = entry.name, "selected catalog");
            return Translator {
                catalog: Some(Catalog::new(entry.data.as_ref())),
                locale: Some(entry.name),
            };
        }
        debug!(requested = locale_name, "no catalog for locale; messages stay untranslated");
        Translator::identity()
    }

    pub fn catalog(&self) -> Option<&Catalog<'a>> {
        self.catalog.as_ref()
    }

    /// Name of the table entry this translator was bound from.
    pub fn locale(&self) -> Option<&'a str> {
        self.locale
    }

    pub fn is_identity(&self) -> bool {
        self.catalog.is_none()
    }

    pub fn translate<'s>(&self, message: &'s str) -> &'s str
    where
        'a: 's,
    {
        match &self.catalog {
            Some(catalog) => catalog.find_translation_str(message),
            None => message,
        }
    }

    pub fn translate_bytes<'s>(&self, message: &'s [u8]) -> &'s [u8]
    where
        'a: 's,
    {
        match &self.catalog {
            Some(catalog) => catalog.find_translation(message),
            None => message,
        }
    }
}

/// Process-wide translator, installed at most once.
///
/// ```
/// use gmo::{ActiveTranslator, Translator};
///
/// static TRANSLATIONS: ActiveTranslator = ActiveTranslator::new();
///
/// TRANSLATIONS.initialize(Translator::identity()).unwrap();
/// assert!(TRANSLATIONS.initialize(Translator::identity()).is_err());
/// assert_eq!(TRANSLATIONS.translate("Save"), "Save");
/// ```
#[derive(Debug)]
pub struct ActiveTranslator {
    cell: OnceLock<Translator<'static>>,
}

impl Default for ActiveTranslator {
    fn default() -> Self {
        ActiveTranslator::new()
    }
}

impl ActiveTranslator {
    pub const fn new() -> Self {
        ActiveTranslator {
            cell: OnceLock::new(),
        }
    }

    /// Install `translator`. Only the first call wins; racing callers get
    /// [`InitError::AlreadyInitialized`].
    pub fn initialize(
        &self,
        translator: Translator<'static>,
    ) -> Result<&Translator<'static>, InitError> {
        let mut installed = false;
        let active = self.cell.get_or_init(|| {
            installed = true;
            translator
        });
        if installed {
            Ok(active)
        } else {
            Err(InitError::AlreadyInitialized)
        }
    }

    pub fn get(&self) -> Option<&Translator<'static>> {
        self.cell.get()
    }

    /// Translate through the installed translator, or return `message`
    /// unchanged if none was installed.
    pub fn translate<'s>(&self, message: &'s str) -> &'s str {
        match self.cell.get() {
            Some(translator) => translator.translate(message),
            None => message,
        }
    }
}
