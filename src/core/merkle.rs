// Merkle root over transaction ids

use crate::core::{Hash256, hash256};

/// Compute the merkle root of an ordered list of transaction ids.
///
/// Pairs are combined with double SHA256; a level with an odd node count
/// duplicates its last node. The empty list yields the zero hash.
pub fn merkle_root(txids: &[Hash256]) -> Hash256 {
    if txids.is_empty() {
        return Hash256::zero();
    }

    let mut hashes = txids.to_vec();
    while hashes.len() > 1 {
        let mut next_level = Vec::with_capacity(hashes.len().div_ceil(2));

        for chunk in hashes.chunks(2) {
            let left = chunk[0];
            let right = if chunk.len() == 2 { chunk[1] } else { chunk[0] };

            let mut combined = Vec::with_capacity(64);
            combined.extend_from_slice(left.as_bytes());
            combined.extend_from_slice(right.as_bytes());
            next_level.push(hash256(&combined));
        }

        hashes = next_level;
    }

    hashes[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert_eq!(merkle_root(&[]), Hash256::zero());
    }

    #[test]
    fn test_single_id_is_its_own_root() {
        let id = Hash256::new([3u8; 32]);
        assert_eq!(merkle_root(&[id]), id);
    }

    #[test]
    fn test_two_ids() {
        let a = Hash256::new([1u8; 32]);
        let b = Hash256::new([2u8; 32]);

        let mut combined = Vec::new();
        combined.extend_from_slice(a.as_bytes());
        combined.extend_from_slice(b.as_bytes());

        assert_eq!(merkle_root(&[a, b]), hash256(&combined));
    }

    #[test]
    fn test_odd_count_duplicates_last() {
        let a = Hash256::new([1u8; 32]);
        let b = Hash256::new([2u8; 32]);
        let c = Hash256::new([3u8; 32]);

        assert_eq!(merkle_root(&[a, b, c]), merkle_root(&[a, b, c, c]));
    }

    #[test]
    fn test_order_sensitive() {
        let a = Hash256::new([1u8; 32]);
        let b = Hash256::new([2u8; 32]);

        assert_ne!(merkle_root(&[a, b]), merkle_root(&[b, a]));
    }
}
