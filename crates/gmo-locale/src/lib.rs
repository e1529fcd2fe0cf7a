//! Locale-name matching for tables of compiled-in catalogs.
//!
//! Locale names follow the POSIX shape `language[_territory][.codeset][@modifier]`.
//! A request for `de_AT.UTF-8` should still find a table entry named `de`,
//! so lookups walk [`locale_name_combinations`] from most to least specific.

/// One named payload in a locale table.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LocaleEntry<'n, T> {
    pub name: &'n str,
    pub data: T,
}

impl<'n, T> LocaleEntry<'n, T> {
    pub const fn new(name: &'n str, data: T) -> Self {
        LocaleEntry { name, data }
    }

    pub fn has_locale_name(&self, name: &str) -> bool {
        self.name == name
    }
}

/// A locale name split into its POSIX components.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LocaleName<'a> {
    pub language: &'a str,
    pub territory: Option<&'a str>,
    pub codeset: Option<&'a str>,
    pub modifier: Option<&'a str>,
}

impl<'a> LocaleName<'a> {
    /// Split `name` at the first `@`, then `.`, then `_`. Never fails; a
    /// name without separators is all language.
    pub fn parse(name: &'a str) -> Self {
        let (rest, modifier) = split_once_opt(name, '@');
        let (rest, codeset) = split_once_opt(rest, '.');
        let (language, territory) = split_once_opt(rest, '_');
        LocaleName {
            language,
            territory,
            codeset,
            modifier,
        }
    }

    fn render(&self, territory: bool, codeset: bool, modifier: bool) -> String {
        let mut out = String::from(self.language);
        if let Some(t) = self.territory.filter(|_| territory) {
            out.push('_');
            out.push_str(t);
        }
        if let Some(c) = self.codeset.filter(|_| codeset) {
            out.push('.');
            out.push_str(c);
        }
        if let Some(m) = self.modifier.filter(|_| modifier) {
            out.push('@');
            out.push_str(m);
        }
        out
    }
}

fn split_once_opt(s: &str, sep: char) -> (&str, Option<&str>) {
    match s.split_once(sep) {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

const TERRITORY: u8 = 0b100;
const CODESET: u8 = 0b010;
const MODIFIER: u8 = 0b001;

/// Fallback names for `locale_name`, most specific first, ending with the
/// bare language.
///
/// Every combination of the components actually present is produced, with
/// territory weighted above codeset above modifier:
///
/// ```
/// let names = gmo_locale::locale_name_combinations("en_US.UTF-8@euro");
/// assert_eq!(names.first().map(String::as_str), Some("en_US.UTF-8@euro"));
/// assert_eq!(names[1], "en_US.UTF-8");
/// assert_eq!(names.last().map(String::as_str), Some("en"));
/// ```
pub fn locale_name_combinations(locale_name: &str) -> Vec<String> {
    if locale_name.is_empty() {
        return Vec::new();
    }
    let parts = LocaleName::parse(locale_name);
    let mut present = 0u8;
    if parts.territory.is_some() {
        present |= TERRITORY;
    }
    if parts.codeset.is_some() {
        present |= CODESET;
    }
    if parts.modifier.is_some() {
        present |= MODIFIER;
    }

    (0..=present)
        .rev()
        .filter(|mask| mask & !present == 0)
        .map(|mask| {
            parts.render(
                mask & TERRITORY != 0,
                mask & CODESET != 0,
                mask & MODIFIER != 0,
            )
        })
        .collect()
}

/// First entry whose name is exactly `locale_name`.
pub fn find_entry<'e, 'n, T>(
    entries: &'e [LocaleEntry<'n, T>],
    locale_name: &str,
) -> Option<&'e LocaleEntry<'n, T>> {
    entries.iter().find(|entry| entry.has_locale_name(locale_name))
}

/// Best entry for `locale_name`: the first hit while walking its fallback
/// combinations from most to least specific.
pub fn find_best_entry<'e, 'n, T>(
    entries: &'e [LocaleEntry<'n, T>],
    locale_name: &str,
) -> Option<&'e LocaleEntry<'n, T>> {
    locale_name_combinations(locale_name)
        .iter()
        .find_map(|candidate| find_entry(entries, candidate))
}

#[cfg(test)]
mod tests {
    use super::{LocaleEntry, LocaleName, find_best_entry, find_entry, locale_name_combinations};

    const TABLE: &[LocaleEntry<'static, u32>] = &[
        LocaleEntry::new("de", 1),
        LocaleEntry::new("en_US", 2),
        LocaleEntry::new("pt_BR", 3),
        LocaleEntry::new("pt", 4),
        LocaleEntry::new("sr@latin", 5),
    ];

    #[test]
    fn parses_all_components() {
        assert_eq!(
            LocaleName::parse("en_US.UTF-8@euro"),
            LocaleName {
                language: "en",
                territory: Some("US"),
                codeset: Some("UTF-8"),
                modifier: Some("euro"),
            }
        );
        assert_eq!(
            LocaleName::parse("sr@latin"),
            LocaleName {
                language: "sr",
                territory: None,
                codeset: None,
                modifier: Some("latin"),
            }
        );
        assert_eq!(LocaleName::parse("C").language, "C");
    }

    #[test]
    fn combinations_run_from_full_to_language() {
        assert_eq!(
            locale_name_combinations("en_US.UTF-8@euro"),
            vec![
                "en_US.UTF-8@euro",
                "en_US.UTF-8",
                "en_US@euro",
                "en_US",
                "en.UTF-8@euro",
                "en.UTF-8",
                "en@euro",
                "en",
            ]
        );
    }

    #[test]
    fn combinations_skip_absent_components() {
        assert_eq!(locale_name_combinations("de_AT"), vec!["de_AT", "de"]);
        assert_eq!(
            locale_name_combinations("fr.ISO-8859-1"),
            vec!["fr.ISO-8859-1", "fr"]
        );
        assert_eq!(locale_name_combinations("ja"), vec!["ja"]);
        assert!(locale_name_combinations("").is_empty());
    }

    #[test]
    fn find_entry_is_exact() {
        assert_eq!(find_entry(TABLE, "pt").map(|e| e.data), Some(4));
        assert_eq!(find_entry(TABLE, "pt_BR").map(|e| e.data), Some(3));
        assert!(find_entry(TABLE, "en").is_none());
        assert!(find_entry(TABLE, "DE").is_none());
        assert!(find_entry(TABLE, "").is_none());
    }

    #[test]
    fn best_entry_prefers_most_specific() {
        assert_eq!(find_best_entry(TABLE, "pt_BR.UTF-8").map(|e| e.data), Some(3));
        assert_eq!(find_best_entry(TABLE, "pt_PT.UTF-8").map(|e| e.data), Some(4));
        assert_eq!(find_best_entry(TABLE, "en_US.UTF-8@euro").map(|e| e.data), Some(2));
        assert_eq!(find_best_entry(TABLE, "sr_RS@latin").map(|e| e.data), Some(5));
        assert!(find_best_entry(TABLE, "fr_FR.UTF-8").is_none());
        assert!(find_best_entry(TABLE, "").is_none());
    }

    #[test]
    fn language_only_table_matches_last_fallback() {
        let table = [LocaleEntry::new("en", "english")];
        let names = locale_name_combinations("en_US.UTF-8@euro");
        let last = names.last().expect("at least one candidate");
        assert!(find_entry(&table, &names[0]).is_none());
        assert_eq!(find_entry(&table, last).map(|e| e.data), Some("english"));
        assert_eq!(find_best_entry(&table, "en_US.UTF-8@euro").map(|e| e.data), Some("english"));
    }
}
