//! Frequency Aggregator
//!
//! Filters a stopword set, bounds very large inputs by uniform random
//! sampling, and produces the top-K most frequent tokens. Ties are broken by
//! first-seen order, so results are stable for a given token stream. Sampling
//! is non-deterministic unless a seed is configured.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::models::WordFrequency;

// == Stopwords ==
/// Tokens excluded from frequency counting.
pub const STOPWORDS: [&str; 13] = [
    "the", "of", "to", "a", "or", "and", "in", "for", "that", "be", "by", "is", "with",
];

/// Builds the default stopword set.
pub fn default_stopwords() -> HashSet<String> {
    STOPWORDS.iter().map(|s| s.to_string()).collect()
}

// == Frequency Config ==
/// Knobs for a frequency aggregation run.
#[derive(Debug, Clone)]
pub struct FrequencyConfig {
    /// Tokens to drop before counting
    pub stopwords: HashSet<String>,
    /// Filtered-token count above which the input is sampled down
    pub sampling_threshold: usize,
    /// How many (word, count) pairs to return
    pub top_words: usize,
    /// Optional RNG seed making the sampling step deterministic
    pub rng_seed: Option<u64>,
}

impl FrequencyConfig {
    /// Derives aggregation knobs from the service configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            stopwords: default_stopwords(),
            sampling_threshold: config.sampling_threshold,
            top_words: config.top_words,
            rng_seed: config.rng_seed,
        }
    }
}

// == Frequency Counter ==
/// Incremental token counter.
///
/// Memory is proportional to the distinct vocabulary, not the input length,
/// so tokens can be fed chunk by chunk.
#[derive(Debug, Default)]
pub struct FrequencyCounter {
    counts: HashMap<String, WordStat>,
    next_rank: u64,
}

#[derive(Debug)]
struct WordStat {
    count: u64,
    first_seen: u64,
}

impl FrequencyCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `token`.
    pub fn add(&mut self, token: String) {
        let rank = self.next_rank;
        let stat = self.counts.entry(token).or_insert(WordStat {
            count: 0,
            first_seen: rank,
        });
        if stat.count == 0 {
            self.next_rank += 1;
        }
        stat.count += 1;
    }

    /// Number of distinct tokens seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total occurrences recorded.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|s| s.count).sum()
    }

    /// Returns the top `k` tokens by count descending, ties by first-seen
    /// order.
    pub fn top(&self, k: usize) -> Vec<WordFrequency> {
        let mut ranked: Vec<(&String, &WordStat)> = self.counts.iter().collect();
        ranked.sort_by(|(_, a), (_, b)| {
            b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen))
        });
        ranked
            .into_iter()
            .take(k)
            .map(|(word, stat)| (word.clone(), stat.count))
            .collect()
    }
}

// == Top Words ==
/// Full aggregation: filter stopwords, sample down oversized inputs, count,
/// and rank.
pub fn top_words(
    tokens: impl Iterator<Item = String>,
    config: &FrequencyConfig,
) -> Vec<WordFrequency> {
    let filtered: Vec<String> = tokens
        .filter(|t| !config.stopwords.contains(t.as_str()))
        .collect();

    let sampled = sample_down(filtered, config.sampling_threshold, config.rng_seed);

    let mut counter = FrequencyCounter::new();
    for token in sampled {
        counter.add(token);
    }
    counter.top(config.top_words)
}

/// Uniformly samples `tokens` down to exactly `limit` when it is larger,
/// preserving relative order of the kept tokens.
fn sample_down(tokens: Vec<String>, limit: usize, seed: Option<u64>) -> Vec<String> {
    if tokens.len() <= limit {
        return tokens;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut keep = vec![false; tokens.len()];
    for index in rand::seq::index::sample(&mut rng, tokens.len(), limit) {
        keep[index] = true;
    }

    tokens
        .into_iter()
        .zip(keep)
        .filter_map(|(token, kept)| kept.then_some(token))
        .collect()
}
