use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use memmap2::Mmap;

use crate::catalog::Catalog;
use crate::error::{CatalogError, Region, Result};
use crate::format::{HEADER_LEN, MAGIC_BE, MAGIC_LE};

/// A catalog file mapped into memory.
///
/// Unlike [`Catalog::new`], opening a file checks that it is at least one
/// header long and starts with a known magic, so a stray file is rejected
/// up front instead of translating nothing.
pub struct MappedCatalog {
    mmap: Mmap,
}

impl MappedCatalog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        // SAFETY: the map is read-only; catalogs are not expected to be
        // rewritten while mapped, and every read is bounds checked.
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < HEADER_LEN {
            return Err(CatalogError::MalformedCatalog {
                region: Region::Header,
                offset: 0,
                len: mmap.len(),
            });
        }
        let magic = LittleEndian::read_u32(&mmap[..4]);
        if magic != MAGIC_LE && magic != MAGIC_BE {
            return Err(CatalogError::InvalidMagic(magic));
        }

        Ok(MappedCatalog { mmap })
    }

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.mmap[..])
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}
