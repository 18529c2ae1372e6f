use kolmo_core::{bucket_key, jaccard, shingles, ChunkRecord, ContentDigest, ShingleSet};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

use crate::error::CondenseResult;
use crate::strategy::{Bucketing, CanonicalPolicy, CondenseStrategy};

/// Anything with a text body can be condensed.
pub trait Condensable {
    fn text(&self) -> &str;
}

impl Condensable for ChunkRecord {
    fn text(&self) -> &str {
        &self.text
    }
}

impl Condensable for String {
    fn text(&self) -> &str {
        self
    }
}

/// Why an item was archived.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArchiveReason {
    Exact,
    Near { similarity: f64 },
}

/// An accepted item and its position in the input.
#[derive(Clone, Debug)]
pub struct Kept<T> {
    pub index: usize,
    pub item: T,
}

/// An archived item, with the input index of the kept item it duplicates.
#[derive(Clone, Debug)]
pub struct Archived<T> {
    pub index: usize,
    pub item: T,
    pub into: usize,
    pub reason: ArchiveReason,
}

/// Partition produced by one condensation pass.
#[derive(Clone, Debug)]
pub struct CondenseOutcome<T> {
    /// Accepted items, in visit order.
    pub kept: Vec<Kept<T>>,
    /// Archived items, in encounter order.
    pub archived: Vec<Archived<T>>,
    /// Empty or whitespace-only items, neither kept nor archived.
    pub dropped: usize,
}

impl<T> CondenseOutcome<T> {
    pub fn kept_items(&self) -> impl Iterator<Item = &T> {
        self.kept.iter().map(|k| &k.item)
    }

    pub fn archived_items(&self) -> impl Iterator<Item = &T> {
        self.archived.iter().map(|a| &a.item)
    }

    pub fn exact_count(&self) -> usize {
        self.archived
            .iter()
            .filter(|a| a.reason == ArchiveReason::Exact)
            .count()
    }

    pub fn near_count(&self) -> usize {
        self.archived.len() - self.exact_count()
    }
}

/// Exact + near-duplicate condensation engine.
pub struct Condenser {
    strategy: CondenseStrategy,
    seen: HashMap<ContentDigest, usize>,
    buckets: HashMap<u64, Vec<(usize, ShingleSet)>>,
}

impl Condenser {
    pub fn new(strategy: CondenseStrategy) -> CondenseResult<Self> {
        strategy.validate()?;
        Ok(Self {
            strategy,
            seen: HashMap::new(),
            buckets: HashMap::new(),
        })
    }

    pub fn strategy(&self) -> &CondenseStrategy {
        &self.strategy
    }

    /// Partition `items` into kept and archived sets.
    pub fn condense<T: Condensable>(mut self, items: Vec<T>) -> CondenseOutcome<T> {
        let order = self.visit_order(&items);
        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        let mut outcome = CondenseOutcome {
            kept: Vec::new(),
            archived: Vec::new(),
            dropped: 0,
        };

        for index in order {
            let Some(item) = slots[index].take() else {
                continue;
            };

            let trimmed = item.text().trim();
            if trimmed.is_empty() {
                outcome.dropped += 1;
                continue;
            }

            let exact = ContentDigest::of_str(trimmed);
            if let Some(&owner) = self.seen.get(&exact) {
                outcome.archived.push(Archived {
                    index,
                    item,
                    into: owner,
                    reason: ArchiveReason::Exact,
                });
                continue;
            }

            let (key, shingle_set) = {
                let text = item.text().trim();
                let key = match self.strategy.bucketing {
                    Bucketing::DigestPrefix => bucket_key(text),
                    Bucketing::Global => 0,
                };
                (key, shingles(text, self.strategy.shingle_len))
            };

            let threshold = self.strategy.threshold;
            let bucket = self.buckets.entry(key).or_default();
            let near = bucket.iter().find_map(|(owner, other)| {
                let similarity = jaccard(&shingle_set, other);
                (similarity >= threshold).then_some((*owner, similarity))
            });

            match near {
                Some((owner, similarity)) => {
                    debug!(index, into = owner, similarity, "near duplicate");
                    outcome.archived.push(Archived {
                        index,
                        item,
                        into: owner,
                        reason: ArchiveReason::Near { similarity },
                    });
                }
                None => {
                    self.seen.insert(exact, index);
                    bucket.push((index, shingle_set));
                    outcome.kept.push(Kept { index, item });
                }
            }
        }

        outcome
    }

    fn visit_order<T: Condensable>(&self, items: &[T]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..items.len()).collect();
        if self.strategy.canonical == CanonicalPolicy::Longest {
            order.sort_by_key(|&i| Reverse(items[i].text().chars().count()));
        }
        order
    }
}
