//! Text scoring primitives shared by the condenser and the annealer.

use std::collections::{HashMap, HashSet};

use crate::digest::ContentDigest;

/// Default shingle width, in characters.
pub const DEFAULT_SHINGLE_LEN: usize = 8;

/// Set of fixed-width character substrings of a normalized text.
pub type ShingleSet = HashSet<String>;

/// Collapse whitespace runs to one space, lower-case, and trim.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace-delimited tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

pub fn token_count(text: &str) -> usize {
    tokens(text).count()
}

/// Overlapping `k`-character shingles of the normalized text.
///
/// A text shorter than `k` (after normalization) has no shingles.
pub fn shingles(text: &str, k: usize) -> ShingleSet {
    let chars: Vec<char> = normalize(text).chars().collect();
    if k == 0 || chars.len() < k {
        return ShingleSet::new();
    }
    chars
        .windows(k)
        .map(|w| w.iter().collect::<String>())
        .collect()
}

/// Jaccard similarity `|A∩B| / |A∪B|`. Zero when either set is empty.
pub fn jaccard(a: &ShingleSet, b: &ShingleSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let inter = small.iter().filter(|s| large.contains(*s)).count();
    let union = a.len() + b.len() - inter;
    if union == 0 {
        0.0
    } else {
        inter as f64 / union as f64
    }
}

/// Coarse similarity-bucket fingerprint: the first 8 bytes of the
/// SHA-256 of the normalized text.
pub fn bucket_key(text: &str) -> u64 {
    ContentDigest::of_str(&normalize(text)).prefix_u64()
}

/// Shannon entropy (base 2) of a token multiset. Zero for an empty set.
pub fn shannon_entropy<'a, I>(tokens: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    let mut total = 0usize;
    for tok in tokens {
        *counts.entry(tok).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    // Sum in a fixed order so equal multisets give bit-identical results.
    let mut counts: Vec<usize> = counts.into_values().collect();
    counts.sort_unstable();
    let total = total as f64;
    counts
        .into_iter()
        .map(|n| {
            let p = n as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Cosine similarity. Zero when either vector has zero norm or the
/// lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    let denom = na.sqrt() * nb.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
