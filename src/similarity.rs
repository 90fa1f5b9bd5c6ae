//! Title similarity for fuzzy song matching.
//!
//! The ratio is the longest-matching-block measure (Ratcliff/Obershelp):
//! find the longest common block, recurse on both sides of it, and score
//! `2 * matched / total_len`. Unlike edit distance it rewards long shared
//! runs, so "Song" vs "Song - Remastered" scores on the shared prefix.

use rustc_hash::FxHashMap;

// ============================================================================
// Thresholds
// ============================================================================

/// Minimum ratio for two titles to count as the same recording.
pub const MATCH_THRESHOLD: f64 = 0.80;

// ============================================================================
// Matching Blocks
// ============================================================================

/// A run of `size` equal chars at `a[a_start..]` and `b[b_start..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of every char in `b`, ascending.
    b2j: FxHashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest block inside `a[alo..ahi]` x `b[blo..bhi]`.
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let mut best = MatchingBlock {
            a_start: alo,
            b_start: blo,
            size: 0,
        };
        // j2len[j] = length of the match ending at a[i-1], b[j]
        let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();

        for i in alo..ahi {
            let mut next: FxHashMap<usize, usize> = FxHashMap::default();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best.size {
                        best = MatchingBlock {
                            a_start: i + 1 - k,
                            b_start: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            j2len = next;
        }

        best
    }

    fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a_start && blo < m.b_start {
                pending.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                pending.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
            blocks.push(m);
        }

        blocks.sort_by_key(|m| (m.a_start, m.b_start));
        blocks
    }
}

/// Non-overlapping matching blocks of `a` and `b`, ordered by position.
pub fn matching_blocks(a: &str, b: &str) -> Vec<MatchingBlock> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::new(&a, &b).matching_blocks()
}

// ============================================================================
// Ratios
// ============================================================================

/// Similarity in `0.0..=1.0`. Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched: usize = SequenceMatcher::new(&a, &b)
        .matching_blocks()
        .iter()
        .map(|m| m.size)
        .sum();

    2.0 * matched as f64 / total as f64
}

/// Case-insensitive title similarity.
///
/// The block search is order-sensitive, so `ratio(a, b)` and `ratio(b, a)`
/// can differ on unrelated titles. Both orientations are scored and the
/// larger one wins, which keeps the predicate symmetric.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    ratio(&a, &b).max(ratio(&b, &a))
}

/// Whether two titles name the same recording.
///
/// Symmetric and reflexive but NOT transitive: "Sunday Morning" matches
/// "Sunday Mourning", which matches "Sunday Mourner", yet the outer pair
/// falls below the threshold. Callers must not treat this as an
/// equivalence relation.
pub fn titles_match(a: &str, b: &str) -> bool {
    title_similarity(a, b) >= MATCH_THRESHOLD
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ratio_identical_and_empty() {
        assert_eq!(ratio("hello", "hello"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_ratio_single_substitution() {
        // one 2-char block out of 6 chars
        assert!(approx(ratio("abc", "abd"), 4.0 / 6.0));
        assert!(approx(ratio("hello", "hallo"), 0.8));
    }

    #[test]
    fn test_ratio_uses_ordered_blocks_not_bags() {
        // "world" is the longest block; " hello" lies on the wrong side of it
        assert!(approx(ratio("hello world", "world hello"), 10.0 / 22.0));
    }

    #[test]
    fn test_matching_blocks_ordered() {
        let blocks = matching_blocks("abxcd", "abcd");
        assert_eq!(
            blocks,
            vec![
                MatchingBlock { a_start: 0, b_start: 0, size: 2 },
                MatchingBlock { a_start: 3, b_start: 2, size: 2 },
            ]
        );
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        let blocks = matching_blocks("ab", "abab");
        assert_eq!(
            blocks,
            vec![MatchingBlock { a_start: 0, b_start: 0, size: 2 }]
        );
    }

    #[test]
    fn test_title_similarity_ignores_case() {
        assert_eq!(title_similarity("Hey Jude", "HEY JUDE"), 1.0);
        assert!(titles_match("Mr. Brightside", "mr brightside"));
    }

    #[test]
    fn test_remaster_tags_reduce_similarity() {
        assert!(!titles_match("Come Together", "Come Together - Remastered"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 28 of 35 characters matched: exactly 0.80
        assert_eq!(title_similarity("Paint It Black", "Paint It Black - Mono"), MATCH_THRESHOLD);
        assert!(titles_match("Paint It Black", "Paint It Black - Mono"));
    }

    #[test]
    fn test_titles_match_not_transitive() {
        assert!(titles_match("Sunday Morning", "Sunday Mourning"));
        assert!(titles_match("Sunday Mourning", "Sunday Mourner"));
        assert!(!titles_match("Sunday Morning", "Sunday Mourner"));
    }

    #[test]
    fn test_raw_ratio_is_order_sensitive() {
        assert!(approx(ratio("yesterday - live", "let it be"), 0.24));
        assert!(approx(ratio("let it be", "yesterday - live"), 0.16));
        assert!(approx(title_similarity("Let It Be", "Yesterday - Live"), 0.24));
    }

    #[test]
    fn test_symmetry() {
        let titles = ["Yesterday", "Yesterday - Live", "Let It Be", "Let It Bleed", ""];
        for a in titles {
            for b in titles {
                assert!(approx(title_similarity(a, b), title_similarity(b, a)), "{a} / {b}");
            }
        }
    }
}
