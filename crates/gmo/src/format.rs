//! Layout constants for the GNU `.mo` catalog format.
//!
//! ```text
//! 0x00  magic                  0x950412de in the file's byte order
//! 0x04  revision
//! 0x08  string count N
//! 0x0c  offset of original-string descriptor table
//! 0x10  offset of translated-string descriptor table
//! 0x14  hash table size (0 = no hash table)
//! 0x18  hash table offset
//! ```
//!
//! Each descriptor table holds N `{length, offset}` word pairs. Lengths
//! exclude the NUL that usually trails each string in the file. Hash slots
//! are single words holding a 1-based string number, 0 for an empty slot.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Magic word of a little-endian catalog, read little-endian.
pub const MAGIC_LE: u32 = 0x9504_12de;

/// The same magic as seen when a big-endian catalog is read little-endian.
pub const MAGIC_BE: u32 = 0xde12_0495;

pub const HEADER_LEN: usize = 28;
pub const WORD_LEN: u64 = 4;
pub const DESCRIPTOR_LEN: u64 = 8;

pub const REVISION_OFFSET: u64 = 0x04;
pub const STRING_COUNT_OFFSET: u64 = 0x08;
pub const ORIGINAL_TABLE_OFFSET: u64 = 0x0c;
pub const TRANSLATED_TABLE_OFFSET: u64 = 0x10;
pub const HASH_TABLE_SIZE_OFFSET: u64 = 0x14;
pub const HASH_TABLE_OFFSET: u64 = 0x18;

/// Byte order of every word in a catalog, fixed by its magic.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Little-endian iff the first four bytes read little-endian give
    /// [`MAGIC_LE`]. Anything else, including a buffer shorter than a word,
    /// is treated as big-endian.
    pub fn detect(data: &[u8]) -> Self {
        match data.get(..4) {
            Some(magic) if LittleEndian::read_u32(magic) == MAGIC_LE => Endian::Little,
            _ => Endian::Big,
        }
    }

    /// Read the word at `offset`, or `None` if it does not fit in `data`.
    #[inline]
    pub fn read_word(self, data: &[u8], offset: u64) -> Option<u32> {
        let start = usize::try_from(offset).ok()?;
        let bytes = data.get(start..start.checked_add(WORD_LEN as usize)?)?;
        Some(match self {
            Endian::Little => LittleEndian::read_u32(bytes),
            Endian::Big => BigEndian::read_u32(bytes),
        })
    }
}

/// Which of the two parallel descriptor tables to read from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StringTable {
    Original,
    Translated,
}

impl StringTable {
    /// Header field holding this table's offset.
    pub fn header_field(self) -> u64 {
        match self {
            StringTable::Original => ORIGINAL_TABLE_OFFSET,
            StringTable::Translated => TRANSLATED_TABLE_OFFSET,
        }
    }
}
