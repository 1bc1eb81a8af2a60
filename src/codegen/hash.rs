//! BKDR string hash shared by the generator and the game's loader dispatch.

/// Seed used by the game runtime when it hashes table names.
pub const DEFAULT_SEED: u32 = 123;

const MASK: u64 = 0x7FFF_FFFF;

/// Polynomial rolling hash over the code points of `name`, kept to 31 bits so it
/// fits a non-negative 32-bit integer in generated code.
pub fn bkdr_hash(name: &str, seed: u32) -> u32 {
    let hash = name
        .chars()
        .fold(0u64, |hash, character| (hash * u64::from(seed) + u64::from(character)) & MASK);
    (hash & MASK) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_runtime_hashes() {
        assert_eq!(bkdr_hash("CEArea", DEFAULT_SEED), 1_647_651_811);
        assert_eq!(bkdr_hash("CEAutoLoad", DEFAULT_SEED), 420_587_931);
        assert_eq!(bkdr_hash("CEConfig", DEFAULT_SEED), 1_283_261_664);
    }

    #[test]
    fn short_inputs() {
        assert_eq!(bkdr_hash("", DEFAULT_SEED), 0);
        assert_eq!(bkdr_hash("a", DEFAULT_SEED), 97);
        assert_eq!(bkdr_hash("ab", DEFAULT_SEED), 97 * 123 + 98);
    }

    #[test]
    fn non_ascii_uses_code_points() {
        assert_eq!(bkdr_hash("中", DEFAULT_SEED), 0x4E2D);
    }

    proptest! {
        #[test]
        fn hash_is_stable_and_31_bit(name in ".*", seed in any::<u32>()) {
            let first = bkdr_hash(&name, seed);
            prop_assert_eq!(first, bkdr_hash(&name, seed));
            prop_assert!(first < (1 << 31));
        }
    }
}
