//! Lookup over a borrowed `.mo` buffer.
//!
//! Nothing is parsed up front beyond the byte order and the lookup
//! strategy; every other field is read on demand. Every read is bounds
//! checked, so a truncated or corrupt catalog produces
//! [`CatalogError::MalformedCatalog`] rather than reading past the buffer.

use tracing::debug;

use crate::error::{CatalogError, Region, Result};
use crate::format::{
    DESCRIPTOR_LEN, Endian, HASH_TABLE_OFFSET, HASH_TABLE_SIZE_OFFSET, REVISION_OFFSET,
    STRING_COUNT_OFFSET, StringTable, WORD_LEN,
};
use crate::hash::{hash_string, probe};

/// How [`Catalog::lookup`] finds a key. Chosen once, when the view is built.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LookupStrategy {
    /// Linear scan of the original-string table.
    Scan,
    /// Open addressing with double hashing over the catalog's hash table.
    Hashed { size: u32, offset: u32 },
}

/// A zero-copy view over a compiled message catalog.
#[derive(Debug, Copy, Clone)]
pub struct Catalog<'a> {
    data: &'a [u8],
    endian: Endian,
    strategy: LookupStrategy,
}

/// One original/translated pair, borrowed from the catalog.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Entry<'a> {
    pub original: &'a [u8],
    pub translated: &'a [u8],
}

impl<'a> Catalog<'a> {
    /// Bind a view over `data`. The buffer is trusted: no validation
    /// happens here and construction cannot fail.
    pub fn new(data: &'a [u8]) -> Self {
        let endian = Endian::detect(data);
        let strategy = select_strategy(data, endian);
        Catalog {
            data,
            endian,
            strategy,
        }
    }

    /// Same bytes, different lookup strategy.
    pub fn with_strategy(self, strategy: LookupStrategy) -> Self {
        Catalog { strategy, ..self }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn strategy(&self) -> LookupStrategy {
        self.strategy
    }

    pub fn revision(&self) -> Result<u32> {
        self.header_word(REVISION_OFFSET)
    }

    pub fn string_count(&self) -> Result<u32> {
        self.header_word(STRING_COUNT_OFFSET)
    }

    pub fn hash_table_size(&self) -> Result<u32> {
        self.header_word(HASH_TABLE_SIZE_OFFSET)
    }

    pub fn original_string_at(&self, index: u32) -> Result<&'a [u8]> {
        self.string_at(StringTable::Original, index)
    }

    pub fn translated_string_at(&self, index: u32) -> Result<&'a [u8]> {
        self.string_at(StringTable::Translated, index)
    }

    /// Bytes of entry `index` in `table`, borrowed from the catalog.
    pub fn string_at(&self, table: StringTable, index: u32) -> Result<&'a [u8]> {
        let count = self.string_count()?;
        if index >= count {
            return Err(CatalogError::IndexOutOfRange { index, count });
        }
        self.string_at_unchecked_index(table, index)
    }

    /// Translation of `original`, or `original` itself when the catalog has
    /// no entry for it. A malformed catalog behaves as if the entry were
    /// absent.
    pub fn find_translation<'s>(&self, original: &'s [u8]) -> &'s [u8]
    where
        'a: 's,
    {
        match self.lookup(original) {
            Ok(Some(translated)) => translated,
            Ok(None) => original,
            Err(err) => {
                debug!(error = %err, "catalog lookup failed; returning original");
                original
            }
        }
    }

    /// [`find_translation`](Self::find_translation) for text. A translation
    /// that is not valid UTF-8 counts as absent.
    pub fn find_translation_str<'s>(&self, original: &'s str) -> &'s str
    where
        'a: 's,
    {
        let translated = self.find_translation(original.as_bytes());
        std::str::from_utf8(translated).unwrap_or(original)
    }

    /// Like [`find_translation`](Self::find_translation), but tells "absent"
    /// and "malformed" apart.
    pub fn lookup(&self, original: &[u8]) -> Result<Option<&'a [u8]>> {
        match self.strategy {
            LookupStrategy::Scan => self.lookup_scanning(original),
            LookupStrategy::Hashed { size, offset } => self.lookup_hashing(original, size, offset),
        }
    }

    /// Translation of the empty msgid, which holds the PO header fields.
    pub fn metadata(&self) -> Option<&'a [u8]> {
        self.lookup(b"").ok().flatten()
    }

    pub fn entries(&self) -> Entries<'a> {
        Entries {
            catalog: *self,
            next: 0,
            count: self.string_count(),
        }
    }

    fn lookup_scanning(&self, original: &[u8]) -> Result<Option<&'a [u8]>> {
        let count = self.string_count()?;
        for index in 0..count {
            if self.string_at_unchecked_index(StringTable::Original, index)? == original {
                return self
                    .string_at_unchecked_index(StringTable::Translated, index)
                    .map(Some);
            }
        }
        Ok(None)
    }

    fn lookup_hashing(&self, original: &[u8], size: u32, offset: u32) -> Result<Option<&'a [u8]>> {
        let Some((mut bucket, increment)) = probe(hash_string(original), size) else {
            return self.lookup_scanning(original);
        };

        // A well-formed table has an empty slot on every probe path and never
        // more occupied slots than strings; a full or corrupt one would
        // otherwise probe forever.
        let limit = size.min(self.string_count()?.saturating_add(1));
        for _ in 0..limit {
            let slot = offset as u64 + bucket as u64 * WORD_LEN;
            let string_number = self.word(slot, Region::HashSlot)?;
            if string_number == 0 {
                return Ok(None);
            }
            let index = string_number - 1;
            if self.string_at(StringTable::Original, index)? == original {
                return self.string_at(StringTable::Translated, index).map(Some);
            }
            bucket = ((bucket as u64 + increment as u64) % size as u64) as u32;
        }

        debug!(size, limit, "hash probe sequence exhausted");
        Ok(None)
    }

    fn string_at_unchecked_index(&self, table: StringTable, index: u32) -> Result<&'a [u8]> {
        let table_offset = self.header_word(table.header_field())?;
        let descriptor = table_offset as u64 + index as u64 * DESCRIPTOR_LEN;
        let length = self.word(descriptor, Region::Descriptor)?;
        let start = self.word(descriptor + WORD_LEN, Region::Descriptor)?;

        let end = start as u64 + length as u64;
        let range = usize::try_from(start)
            .ok()
            .zip(usize::try_from(end).ok())
            .filter(|&(_, end)| end <= self.data.len());
        match range {
            Some((start, end)) => Ok(&self.data[start..end]),
            None => Err(self.malformed(Region::StringData, start as u64)),
        }
    }

    fn header_word(&self, offset: u64) -> Result<u32> {
        self.word(offset, Region::Header)
    }

    fn word(&self, offset: u64, region: Region) -> Result<u32> {
        self.endian
            .read_word(self.data, offset)
            .ok_or_else(|| self.malformed(region, offset))
    }

    fn malformed(&self, region: Region, offset: u64) -> CatalogError {
        CatalogError::MalformedCatalog {
            region,
            offset,
            len: self.data.len(),
        }
    }
}

fn select_strategy(data: &[u8], endian: Endian) -> LookupStrategy {
    let size = endian.read_word(data, HASH_TABLE_SIZE_OFFSET).unwrap_or(0);
    if size == 0 {
        return LookupStrategy::Scan;
    }
    if probe(0, size).is_none() {
        debug!(size, "hash table too small to probe; scanning instead");
        return LookupStrategy::Scan;
    }
    match endian.read_word(data, HASH_TABLE_OFFSET) {
        Some(offset) => LookupStrategy::Hashed { size, offset },
        None => LookupStrategy::Scan,
    }
}

/// Iterator over a catalog's entries in table order.
///
/// Yields a single error and stops if the header or a descriptor is
/// unreadable.
pub struct Entries<'a> {
    catalog: Catalog<'a>,
    next: u32,
    count: Result<u32>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<Entry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let count = match self.count {
            Ok(count) => count,
            Err(_) => {
                let err = std::mem::replace(&mut self.count, Ok(0));
                return err.err().map(Err);
            }
        };
        if self.next >= count {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let entry = self
            .catalog
            .string_at_unchecked_index(StringTable::Original, index)
            .and_then(|original| {
                self.catalog
                    .string_at_unchecked_index(StringTable::Translated, index)
                    .map(|translated| Entry {
                        original,
                        translated,
                    })
            });
        if entry.is_err() {
            self.next = count;
        }
        Some(entry)
    }
}
