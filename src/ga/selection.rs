//! Truncation selection and parent pairing.

use rand::seq::index;
use rand::Rng;

/// Keeps the `k` highest-scoring individuals, best first.
///
/// Ties keep their population order. Scores must be comparable (the runner
/// rejects non-finite objectives before selection).
pub fn truncation<S>(scored: Vec<(S, f64)>, k: usize) -> Vec<S> {
    let mut scored = scored;
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(k);
    scored.into_iter().map(|(individual, _)| individual).collect()
}

/// Draws two distinct indices uniformly from `0..n`.
///
/// # Panics
/// Panics if `n < 2`.
pub(crate) fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "need at least two parents to draw a pair");
    let picks = index::sample(rng, n, 2);
    (picks.index(0), picks.index(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_truncation_keeps_best_descending() {
        let scored = vec![("a", 0.2), ("b", 0.9), ("c", 0.5), ("d", 0.7)];
        assert_eq!(truncation(scored, 2), vec!["b", "d"]);
    }

    #[test]
    fn test_truncation_stable_on_ties() {
        let scored = vec![("a", 0.5), ("b", 0.5), ("c", 0.1)];
        assert_eq!(truncation(scored, 2), vec!["a", "b"]);
    }

    #[test]
    fn test_truncation_all() {
        let scored = vec![(1, 1.0), (2, 3.0), (3, 2.0)];
        assert_eq!(truncation(scored, 3), vec![2, 3, 1]);
    }

    #[test]
    fn test_distinct_pair() {
        let mut rng = create_rng(Some(42));
        for _ in 0..200 {
            let (a, b) = distinct_pair(2, &mut rng);
            assert_ne!(a, b);
            assert!(a < 2 && b < 2);
        }
        let mut seen = [0usize; 5];
        for _ in 0..500 {
            let (a, b) = distinct_pair(5, &mut rng);
            assert_ne!(a, b);
            seen[a] += 1;
            seen[b] += 1;
        }
        assert!(seen.iter().all(|&c| c > 0));
    }
}
