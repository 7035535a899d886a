//! The flat input sequence of a generalized suffix tree.
//!
//! Every phrase (a maximal run of words between separators or punctuation)
//! is appended to one integer sequence, followed by a sentinel. Sentinels are
//! negative and unique, so no suffix ever matches across a phrase boundary
//! and every suffix ends in its own leaf.

/// Collects phrases of word indices, document by document.
#[derive(Debug, Clone)]
pub struct SequenceBuilder {
    input: Vec<i64>,
    document_ends: Vec<usize>,
    next_sentinel: i64,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        SequenceBuilder {
            input: Vec::new(),
            document_ends: Vec::new(),
            next_sentinel: -1,
        }
    }

    /// Append one phrase of the current document.
    pub fn add_phrase(&mut self, words: &[usize]) {
        if words.is_empty() {
            return;
        }
        self.input.extend(words.iter().map(|&word| word as i64));
        self.input.push(self.next_sentinel);
        self.next_sentinel -= 1;
    }

    /// Close the current document. Documents without phrases still take a
    /// document index.
    pub fn end_document(&mut self) {
        self.document_ends.push(self.input.len());
    }

    pub fn build(self) -> PhraseSequence {
        PhraseSequence {
            input: self.input,
            document_ends: self.document_ends,
        }
    }
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Phrases of all documents, separated by sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSequence {
    pub(crate) input: Vec<i64>,
    /// Exclusive end offset of each document in `input`.
    pub(crate) document_ends: Vec<usize>,
}

impl PhraseSequence {
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.document_ends.len()
    }

    /// The word at `position`, or `None` for a sentinel.
    pub fn word(&self, position: usize) -> Option<usize> {
        usize::try_from(self.input[position]).ok()
    }

    /// The document a position of the sequence belongs to.
    pub fn document_of(&self, position: usize) -> usize {
        self.document_ends.partition_point(|&end| end <= position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_and_documents() {
        let mut builder = SequenceBuilder::new();
        builder.add_phrase(&[0, 1]);
        builder.add_phrase(&[2]);
        builder.end_document();
        builder.end_document();
        builder.add_phrase(&[]);
        builder.add_phrase(&[0]);
        builder.end_document();
        let sequence = builder.build();

        assert_eq!(sequence.input, vec![0, 1, -1, 2, -2, 0, -3]);
        assert_eq!(sequence.document_count(), 3);
        assert_eq!(sequence.document_of(0), 0);
        assert_eq!(sequence.document_of(4), 0);
        assert_eq!(sequence.document_of(5), 2);
        assert_eq!(sequence.word(1), Some(1));
        assert_eq!(sequence.word(2), None);
    }
}
