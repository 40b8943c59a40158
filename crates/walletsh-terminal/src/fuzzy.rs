//! Typo-tolerant ranking of completion candidates.
//!
//! Scores are an indel-distance similarity ratio in `0..=100`: insertions
//! and deletions cost 1, so the ratio is `2 * lcs / (len(a) + len(b))`.
//! Comparison is case-insensitive.

use walletsh_types::config::CompletionConfig;

/// Similarity of two strings, `0..=100`. Symmetric; identical strings score 100.
pub fn score(query: &str, candidate: &str) -> u8 {
    let a: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    let b: Vec<char> = candidate.chars().flat_map(char::to_lowercase).collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let lcs = longest_common_subsequence(&a, &b);
    ((200 * lcs + total / 2) / total) as u8
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Input made only of these characters is worth ranking.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Narrows a candidate set against a partial word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatcher {
    limit: usize,
    cutoff: u8,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::from_config(&CompletionConfig::default())
    }
}

impl FuzzyMatcher {
    pub fn new(limit: usize, cutoff: u8) -> Self {
        Self { limit, cutoff }
    }

    pub fn from_config(config: &CompletionConfig) -> Self {
        Self::new(config.max_candidates, config.min_score)
    }

    /// Keep the best matches for `partial`, best first.
    ///
    /// Returns `candidates` untouched when `partial` is empty, when it
    /// contains punctuation, or when nothing clears the cutoff. Completion
    /// should over-show rather than hide a valid value.
    pub fn filter(&self, partial: &str, candidates: Vec<String>) -> Vec<String> {
        if partial.is_empty() || !partial.chars().all(is_word_char) {
            return candidates;
        }

        let mut ranked: Vec<(usize, u8)> = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (i, score(partial, c)))
            .collect();
        // Stable: equal scores keep their original order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let kept: Vec<usize> = ranked
            .into_iter()
            .take(self.limit)
            .filter(|&(_, s)| s > self.cutoff)
            .map(|(i, _)| i)
            .collect();

        if kept.is_empty() {
            log::debug!("no confident match for {partial:?}, showing all candidates");
            return candidates;
        }
        kept.into_iter().map(|i| candidates[i].clone()).collect()
    }
}
