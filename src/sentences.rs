use rand::Rng;

/// The fixed pool of race texts.
pub const SENTENCES: [&str; 10] = [
    "The quick brown fox jumps over the lazy dog.",
    "Technology is best when it brings people together.",
    "Innovation distinguishes between a leader and a follower.",
    "The only way to do great work is to love what you do.",
    "Stay hungry, stay foolish, and never stop learning.",
    "Code is poetry written in logic and creativity.",
    "Every expert was once a beginner who never gave up.",
    "The future belongs to those who believe in the beauty of their dreams.",
    "Success is not final, failure is not fatal, it is the courage to continue that counts.",
    "Programming is the art of telling another human what one wants the computer to do.",
];

/// Picks a sentence uniformly at random.
pub fn random_sentence<R: Rng>(rng: &mut R) -> &'static str {
    SENTENCES[rng.gen_range(0..SENTENCES.len())]
}

/// Looks up a sentence by its position in [`SENTENCES`].
pub fn sentence_at(index: usize) -> Option<&'static str> {
    SENTENCES.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_sentences_are_non_empty_and_single_line() {
        for s in SENTENCES {
            assert!(!s.trim().is_empty());
            assert!(!s.contains('\n'));
        }
    }

    #[test]
    fn test_random_sentence_comes_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let s = random_sentence(&mut rng);
            assert!(SENTENCES.contains(&s));
        }
    }

    #[test]
    fn test_random_sentence_covers_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<&str> = (0..1000).map(|_| random_sentence(&mut rng)).collect();
        assert_eq!(seen.len(), SENTENCES.len());
    }

    #[test]
    fn test_sentence_at() {
        assert_eq!(sentence_at(0), Some(SENTENCES[0]));
        assert_eq!(sentence_at(9), Some(SENTENCES[9]));
        assert_eq!(sentence_at(10), None);
    }
}
