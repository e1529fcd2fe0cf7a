//! Builds catalogs in memory for tests, laid out the way `msgfmt` does:
//! header, original descriptors, translated descriptors, hash table, then
//! NUL-terminated string bodies.

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

use crate::format::{Endian, HEADER_LEN, MAGIC_LE};
use crate::hash::{hash_string, probe};

#[derive(Debug, Clone)]
pub(crate) struct CatalogBuilder {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    endian: Endian,
    hash_size: Option<u32>,
}

impl CatalogBuilder {
    pub(crate) fn new() -> Self {
        CatalogBuilder {
            entries: Vec::new(),
            endian: Endian::Little,
            hash_size: None,
        }
    }

    pub(crate) fn entry(self, original: &str, translated: &str) -> Self {
        self.entry_bytes(original.as_bytes(), translated.as_bytes())
    }

    pub(crate) fn entry_bytes(mut self, original: &[u8], translated: &[u8]) -> Self {
        self.entries.push((original.to_vec(), translated.to_vec()));
        self
    }

    pub(crate) fn endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Include a hash table sized the way `msgfmt` sizes it.
    pub(crate) fn hash_table(mut self, enabled: bool) -> Self {
        self.hash_size = enabled.then(|| default_hash_size(self.entries.len()));
        self
    }

    pub(crate) fn hash_table_size(mut self, size: u32) -> Self {
        self.hash_size = Some(size);
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        match self.endian {
            Endian::Little => self.build_with::<LittleEndian>(),
            Endian::Big => self.build_with::<BigEndian>(),
        }
    }

    fn build_with<B: ByteOrder>(&self) -> Vec<u8> {
        let count = self.entries.len() as u32;
        let hash_size = self.hash_size.unwrap_or(0);
        let original_offset = HEADER_LEN as u32;
        let translated_offset = original_offset + count * 8;
        let hash_offset = translated_offset + count * 8;
        let mut string_offset = hash_offset + hash_size * 4;

        let mut out = Vec::new();
        out.write_u32::<B>(MAGIC_LE).unwrap();
        out.write_u32::<B>(0).unwrap();
        out.write_u32::<B>(count).unwrap();
        out.write_u32::<B>(original_offset).unwrap();
        out.write_u32::<B>(translated_offset).unwrap();
        out.write_u32::<B>(hash_size).unwrap();
        out.write_u32::<B>(hash_offset).unwrap();

        let mut bodies = Vec::new();
        for side in 0..2 {
            for (original, translated) in &self.entries {
                let s = if side == 0 { original } else { translated };
                out.write_u32::<B>(s.len() as u32).unwrap();
                out.write_u32::<B>(string_offset).unwrap();
                bodies.extend_from_slice(s);
                bodies.push(0);
                string_offset += s.len() as u32 + 1;
            }
        }

        for slot in hash_slots(&self.entries, hash_size) {
            out.write_u32::<B>(slot).unwrap();
        }
        out.extend_from_slice(&bodies);
        out
    }
}

fn hash_slots(entries: &[(Vec<u8>, Vec<u8>)], size: u32) -> Vec<u32> {
    let mut slots = vec![0u32; size as usize];
    if probe(0, size).is_none() {
        return slots;
    }
    for (index, (original, _)) in entries.iter().enumerate() {
        let (mut bucket, step) = probe(hash_string(original), size).unwrap();
        while slots[bucket as usize] != 0 {
            bucket = (bucket + step) % size;
        }
        slots[bucket as usize] = index as u32 + 1;
    }
    slots
}

fn default_hash_size(count: usize) -> u32 {
    let mut n = ((count * 4 / 3) as u32).max(3);
    while !is_prime(n) {
        n += 1;
    }
    n
}

fn is_prime(n: u32) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}
