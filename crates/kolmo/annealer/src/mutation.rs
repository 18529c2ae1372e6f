//! Line-level structural edits over a prompt.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minimum token count (exclusive) for a line to be trimmable.
const TRIM_MIN_TOKENS: usize = 4;
/// Upper bound on tokens removed by one trim.
const TRIM_MAX_DROP: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// Remove one line.
    Delete,
    /// Exchange two distinct lines.
    Swap,
    /// Permute every line.
    Shuffle,
    /// Drop trailing tokens from one long line.
    Trim,
}

impl MutationKind {
    pub const ALL: [MutationKind; 4] = [
        MutationKind::Delete,
        MutationKind::Swap,
        MutationKind::Shuffle,
        MutationKind::Trim,
    ];
}

/// The result of one mutation attempt.
///
/// `applied = false` means the precondition for `kind` did not hold and
/// `lines` equals the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub lines: Vec<String>,
    pub applied: bool,
}

impl Mutation {
    fn noop(kind: MutationKind, lines: &[String]) -> Self {
        Self {
            kind,
            lines: lines.to_vec(),
            applied: false,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Apply one uniformly chosen mutation to `lines`.
pub fn mutate<R: Rng + ?Sized>(lines: &[String], rng: &mut R) -> Mutation {
    let kind = MutationKind::ALL[rng.gen_range(0..MutationKind::ALL.len())];
    apply(kind, lines, rng)
}

/// Apply a specific mutation kind to `lines`.
pub fn apply<R: Rng + ?Sized>(kind: MutationKind, lines: &[String], rng: &mut R) -> Mutation {
    if lines.is_empty() {
        return Mutation::noop(kind, lines);
    }
    match kind {
        MutationKind::Delete => {
            if lines.len() < 2 {
                return Mutation::noop(kind, lines);
            }
            let mut out = lines.to_vec();
            out.remove(rng.gen_range(0..out.len()));
            applied(kind, out)
        }
        MutationKind::Swap => {
            if lines.len() < 2 {
                return Mutation::noop(kind, lines);
            }
            let a = rng.gen_range(0..lines.len());
            let mut b = rng.gen_range(0..lines.len() - 1);
            if b >= a {
                b += 1;
            }
            let mut out = lines.to_vec();
            out.swap(a, b);
            applied(kind, out)
        }
        MutationKind::Shuffle => {
            let mut out = lines.to_vec();
            out.shuffle(rng);
            applied(kind, out)
        }
        MutationKind::Trim => {
            let long: Vec<usize> = lines
                .iter()
                .enumerate()
                .filter(|(_, line)| line.split_whitespace().count() > TRIM_MIN_TOKENS)
                .map(|(i, _)| i)
                .collect();
            let Some(&target) = long.choose(rng) else {
                return Mutation::noop(kind, lines);
            };
            let words: Vec<&str> = lines[target].split_whitespace().collect();
            let drop = rng.gen_range(1..=TRIM_MAX_DROP).min(words.len() - 1);
            let mut out = lines.to_vec();
            out[target] = words[..words.len() - drop].join(" ");
            applied(kind, out)
        }
    }
}

fn applied(kind: MutationKind, lines: Vec<String>) -> Mutation {
    Mutation {
        kind,
        lines,
        applied: true,
    }
}
