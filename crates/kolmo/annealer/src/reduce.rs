//! Deterministic whitespace and header reduction, run before annealing.

use kolmo_core::ContentDigest;
use serde::{Deserialize, Serialize};

const HEADER_PREFIX: &str = "#VBH:";
const CONFIRM_PREFIX: &str = "CONFIRM:";

/// Cheap structural reduction of a prompt.
///
/// Trailing whitespace is stripped from every line. The last `#VBH:`
/// header line and the first `CONFIRM:` line are hoisted to the top, in
/// that order. Blank-line runs collapse to one and the result is trimmed.
pub fn classical_reduce(text: &str) -> String {
    let mut header: Option<&str> = None;
    let mut confirm: Option<&str> = None;
    let mut body = Vec::new();

    for line in text.lines().map(str::trim_end) {
        if line.starts_with(HEADER_PREFIX) {
            header = Some(line);
        } else if line.starts_with(CONFIRM_PREFIX) && confirm.is_none() {
            confirm = Some(line);
        } else {
            body.push(line);
        }
    }

    let mut out: Vec<&str> = header.into_iter().chain(confirm).collect();
    let mut last_blank = true;
    for line in body {
        let blank = line.is_empty();
        if blank && last_blank {
            continue;
        }
        out.push(line);
        last_blank = blank;
    }
    out.join("\n").trim().to_string()
}

/// Before/after summary of one reduction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionReport {
    pub in_hash: String,
    pub out_hash: String,
    /// Input length in chars.
    pub len_in: usize,
    /// Output length in chars.
    pub len_out: usize,
    pub gain: i64,
}

impl ReductionReport {
    pub fn new(input: &str, output: &str) -> Self {
        let len_in = input.chars().count();
        let len_out = output.chars().count();
        Self {
            in_hash: ContentDigest::of_str(input).short(),
            out_hash: ContentDigest::of_str(output).short(),
            len_in,
            len_out,
            gain: len_in as i64 - len_out as i64,
        }
    }
}
