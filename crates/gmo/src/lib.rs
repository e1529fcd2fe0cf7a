//! Zero-copy reader for compiled gettext message catalogs (`.mo` / GMO).
//!
//! The binary layout is described in [`format`]. A [`Catalog`] is a view
//! over caller-owned bytes; nothing is copied or allocated during lookup.

pub mod catalog;
pub mod error;
pub mod format;
pub mod hash;
pub mod mapped;
pub mod translator;

#[cfg(test)]
mod fixture;

pub use crate::catalog::{Catalog, Entries, Entry, LookupStrategy};
pub use crate::error::{CatalogError, InitError, Region};
pub use crate::format::{Endian, StringTable};
pub use crate::mapped::MappedCatalog;
pub use crate::translator::{ActiveTranslator, Translator};
pub use gmo_locale::LocaleEntry;
