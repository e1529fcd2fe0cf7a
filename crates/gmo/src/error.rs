use std::fmt;

use thiserror::Error;

/// Catalog structure a failed read was aimed at.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Region {
    Header,
    Descriptor,
    StringData,
    HashSlot,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Header => "header",
            Region::Descriptor => "string descriptor",
            Region::StringData => "string data",
            Region::HashSlot => "hash slot",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid magic {0:#010x}")]
    InvalidMagic(u32),
    #[error("malformed catalog: {region} at offset {offset:#x} out of bounds ({len} bytes)")]
    MalformedCatalog {
        region: Region,
        offset: u64,
        len: usize,
    },
    #[error("string index {index} out of range ({count} strings)")]
    IndexOutOfRange { index: u32, count: u32 },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum InitError {
    #[error("translations already initialized")]
    AlreadyInitialized,
}
