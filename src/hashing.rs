//! Deterministic hashing. The standard library hashers are randomly seeded,
//! which would make stream-name seed offsets differ between runs; random
//! number streams derived from them would not be reproducible.

use xxhash_rust::xxh3::xxh3_64;

/// A convenience method to compute the hash of a `&str`.
pub fn hash_str(data: &str) -> u64 {
    xxh3_64(data.as_bytes())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hashes_strings() {
        let a = hash_str("hello");
        let b = hash_str("hello");
        let c = hash_str("world");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn stable_across_calls() {
        // Seed offsets must not change between processes.
        assert_eq!(hash_str("TransmissionRng"), hash_str("TransmissionRng"));
    }
}
