//! SHA-256 hashing for blocks and voter ids.

use sha2::{Digest as _, Sha256};
use votechain_types::Digest;

/// Compute the SHA-256 hash of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Anonymize a raw voter id.
///
/// One-way and deterministic: the same raw id always maps to the same digest,
/// so the ledger can hold votes without retaining the identifying string.
/// This is not unlinkable: anyone holding a list of candidate ids can hash
/// them and compare.
pub fn hash_voter_id(raw_voter_id: &str) -> Digest {
    Digest::new(sha256(raw_voter_id.as_bytes()))
}

/// Hash a block's canonical serialized form to produce its chain-link digest.
pub fn hash_block(canonical_bytes: &[u8]) -> Digest {
    Digest::new(sha256(canonical_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        let h = sha256(b"abc");
        assert_eq!(
            Digest::new(h).to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha256_different_inputs() {
        assert_ne!(sha256(b"hello"), sha256(b"world"));
    }

    #[test]
    fn sha256_multi_equivalent() {
        let single = sha256(b"hello world");
        let parts: [&[u8]; 3] = [b"hello", b" ", b"world"];
        let multi = sha256_multi(&parts);
        assert_eq!(single, multi);
    }

    #[test]
    fn voter_id_hash_is_deterministic() {
        let a = hash_voter_id("voter1@school.edu");
        let b = hash_voter_id("voter1@school.edu");
        assert_eq!(a, b);
        assert_eq!(
            a.to_hex(),
            "f36eef93db523de745abd4a06c3383dbd9a6003eb9e3d5ab11ab69b58ce1cd97"
        );
    }

    #[test]
    fn voter_id_hash_differs_from_raw() {
        let raw = "voter2@school.edu";
        assert_ne!(hash_voter_id(raw).to_hex(), raw);
        assert_ne!(hash_voter_id(raw), hash_voter_id("voter3@school.edu"));
    }

    #[test]
    fn block_hash_matches_sha256() {
        let bytes = br#"{"index":1}"#;
        assert_eq!(hash_block(bytes).as_bytes(), &sha256(bytes));
    }
}
