//! Property tests: chunk windows cover every character and match the count formula.

use kolmo_chunker::{expected_chunk_count, ChunkParams, ChunkSplitter};
use kolmo_core::ContentDigest;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

/// Window parameters that always advance.
fn arb_params() -> impl Strategy<Value = ChunkParams> {
    (1usize..40)
        .prop_flat_map(|max| (Just(max), 0..max))
        .prop_map(|(max, overlap)| ChunkParams::new(max, overlap))
}

/// Text mixing ASCII with multi-byte characters.
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zé日 \n]{0,200}"
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Windows start every `step` chars, the last one reaches the end, and
    /// their union is the whole text.
    #[test]
    fn windows_cover_every_char(text in arb_text(), params in arb_params()) {
        let splitter = ChunkSplitter::new(params).unwrap();
        let chars: Vec<char> = text.chars().collect();
        let records = splitter.split(&text, "doc.md", "pack");

        prop_assert_eq!(records.len(), expected_chunk_count(chars.len(), params));

        let mut covered = 0usize;
        for (i, record) in records.iter().enumerate() {
            let start = i * params.step();
            let end = (start + params.max_chars).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            prop_assert_eq!(&record.text, &window);
            prop_assert!(start <= covered);
            covered = end;
        }
        prop_assert_eq!(covered, chars.len());
    }

    /// A text no longer than the window yields exactly one chunk.
    #[test]
    fn short_text_is_one_chunk(params in arb_params(), len in 1usize..40) {
        let text: String = "x".repeat(len.min(params.max_chars));
        let records = ChunkSplitter::new(params).unwrap().split(&text, "a", "p");
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(&records[0].text, &text);
    }

    /// Every chunk carries the digest of the whole document.
    #[test]
    fn chunks_carry_document_digest(text in arb_text(), params in arb_params()) {
        let digest = ContentDigest::of_str(&text);
        for record in ChunkSplitter::new(params).unwrap().split(&text, "a", "p") {
            prop_assert_eq!(record.content_hash, digest);
        }
    }
}
