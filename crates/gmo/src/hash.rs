//! String hash used by the catalog's open-addressing index.
//!
//! This is the hash `msgfmt` used when it laid out the table, so it has to
//! match bit for bit. It is not a general-purpose hash.

const HASH_WORD_BITS: u32 = 32;

/// Hash every byte of `key` into a 32-bit bucket selector.
pub fn hash_string(key: &[u8]) -> u32 {
    let mut hval: u32 = 0;
    for &b in key {
        hval = (hval << 4).wrapping_add(b as u32);
        let g = hval & (0xf << (HASH_WORD_BITS - 4));
        if g != 0 {
            hval ^= g >> (HASH_WORD_BITS - 8);
            hval ^= g;
        }
    }
    hval
}

/// Starting bucket and double-hashing step for `hash` in a table of `size`
/// slots. Tables smaller than three slots have no valid step.
#[inline]
pub fn probe(hash: u32, size: u32) -> Option<(u32, u32)> {
    if size < 3 {
        return None;
    }
    Some((hash % size, 1 + hash % (size - 2)))
}

#[cfg(test)]
mod tests {
    use super::{hash_string, probe};

    #[test]
    fn matches_reference_values() {
        assert_eq!(hash_string(b""), 0);
        assert_eq!(hash_string(b"a"), 0x61);
        assert_eq!(hash_string(b"hello"), 0x006e_c32f);
        assert_eq!(hash_string(b"Hello, world!"), 0x0925_c3c1);
        assert_eq!(
            hash_string(b"variable used before declaration"),
            0x069a_fb7e
        );
    }

    #[test]
    fn top_nibble_is_always_folded_away() {
        let long = [0xffu8; 64];
        assert_eq!(hash_string(&long) & 0xf000_0000, 0);
    }

    #[test]
    fn probe_step_is_never_zero() {
        assert_eq!(probe(10, 7), Some((3, 1)));
        assert_eq!(probe(12, 7), Some((5, 3)));
        for hash in 0..64 {
            let (bucket, step) = probe(hash, 5).expect("size 5 is probeable");
            assert!(bucket < 5);
            assert!((1..=3).contains(&step));
        }
    }

    #[test]
    fn tiny_tables_cannot_be_probed() {
        assert_eq!(probe(1, 0), None);
        assert_eq!(probe(1, 1), None);
        assert_eq!(probe(1, 2), None);
    }
}
