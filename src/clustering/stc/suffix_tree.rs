//! A generalized suffix tree over a [`PhraseSequence`].
//!
//! Every suffix of every phrase is inserted into a compressed trie. Phrases
//! are short, so plain insertion is fast enough and keeps the tree simple:
//! nodes live in an arena, edges are ranges of the input sequence and
//! children are keyed by the first element of their edge. Internal nodes are
//! exactly the phrases that occur at least twice with different
//! continuations; the documents under a node are the documents containing
//! its phrase.

use std::collections::BTreeMap;

use crate::clustering::stc::sequence::PhraseSequence;
use crate::error::Result;
use crate::util::bitset::DocumentSet;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct Node {
    /// Edge from the parent: `input[start..end]`.
    start: usize,
    end: usize,
    children: BTreeMap<i64, usize>,
    /// Document of the suffix ending at this node, for leaves.
    document: Option<usize>,
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An internal node reported by [`GeneralizedSuffixTree::visit`].
#[derive(Debug)]
pub struct InternalNode<'t> {
    /// Words on the path from the root.
    pub phrase: &'t [usize],
    /// Offset in `phrase` where the edge into this node starts.
    pub edge_start: usize,
    /// Documents containing the phrase.
    pub documents: &'t DocumentSet,
}

#[derive(Debug, Clone)]
pub struct GeneralizedSuffixTree {
    sequence: PhraseSequence,
    nodes: Vec<Node>,
}

impl GeneralizedSuffixTree {
    pub fn build(sequence: PhraseSequence) -> Self {
        let mut tree = GeneralizedSuffixTree {
            nodes: vec![Node {
                start: 0,
                end: 0,
                children: BTreeMap::new(),
                document: None,
            }],
            sequence,
        };

        let mut phrase_end = 0;
        for position in 0..tree.sequence.len() {
            if position >= phrase_end {
                phrase_end = (position..tree.sequence.len())
                    .find(|&p| tree.sequence.input[p] < 0)
                    .map_or(tree.sequence.len(), |sentinel| sentinel + 1);
            }
            if tree.sequence.input[position] >= 0 {
                tree.insert(position, phrase_end);
            }
        }

        log::debug!(
            "Suffix tree of {} nodes over {} sequence elements",
            tree.nodes.len(),
            tree.sequence.len()
        );
        tree
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert the suffix `input[start..end]`, which ends in a unique
    /// sentinel.
    fn insert(&mut self, start: usize, end: usize) {
        let document = self.sequence.document_of(start);
        let mut node = ROOT;
        let mut position = start;

        while position < end {
            let key = self.sequence.input[position];
            let Some(&child) = self.nodes[node].children.get(&key) else {
                let leaf = self.add_node(position, end, Some(document));
                self.nodes[node].children.insert(key, leaf);
                return;
            };

            let (edge_start, edge_end) = (self.nodes[child].start, self.nodes[child].end);
            let mut matched = 0;
            while edge_start + matched < edge_end
                && position + matched < end
                && self.sequence.input[edge_start + matched]
                    == self.sequence.input[position + matched]
            {
                matched += 1;
            }

            if edge_start + matched == edge_end {
                node = child;
                position += matched;
                continue;
            }

            // Split the edge: the common part becomes a new internal node.
            let middle = self.add_node(edge_start, edge_start + matched, None);
            self.nodes[child].start = edge_start + matched;
            let child_key = self.sequence.input[edge_start + matched];
            self.nodes[middle].children.insert(child_key, child);
            self.nodes[node].children.insert(key, middle);

            let leaf = self.add_node(position + matched, end, Some(document));
            let leaf_key = self.sequence.input[position + matched];
            self.nodes[middle].children.insert(leaf_key, leaf);
            return;
        }
    }

    fn add_node(&mut self, start: usize, end: usize, document: Option<usize>) -> usize {
        self.nodes.push(Node {
            start,
            end,
            children: BTreeMap::new(),
            document,
        });
        self.nodes.len() - 1
    }

    /// Walk the tree depth first, children in key order, and report every
    /// internal node below the root whose phrase occurs in at least
    /// `min_documents` documents. Nodes are reported after their
    /// descendants. The walk uses an explicit stack.
    pub fn visit<F>(&self, min_documents: usize, mut visitor: F) -> Result<()>
    where
        F: FnMut(InternalNode<'_>),
    {
        enum Step {
            Enter(usize),
            Exit(usize, usize),
        }

        let document_count = self.sequence.document_count();
        let mut sets: Vec<Option<DocumentSet>> = vec![None; self.nodes.len()];
        let mut phrase: Vec<usize> = Vec::new();
        let mut stack = vec![Step::Enter(ROOT)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) => {
                    let current = &self.nodes[node];
                    if current.is_leaf() {
                        let mut set = DocumentSet::new(document_count);
                        if let Some(document) = current.document {
                            set.insert(document)?;
                        }
                        sets[node] = Some(set);
                        continue;
                    }

                    let edge_start = phrase.len();
                    if node != ROOT {
                        phrase.extend(
                            (current.start..current.end).filter_map(|p| self.sequence.word(p)),
                        );
                    }
                    stack.push(Step::Exit(node, edge_start));
                    for &child in current.children.values().rev() {
                        stack.push(Step::Enter(child));
                    }
                }
                Step::Exit(node, edge_start) => {
                    let mut set = DocumentSet::new(document_count);
                    for &child in self.nodes[node].children.values() {
                        if let Some(child_set) = sets[child].take() {
                            set.union_with(&child_set);
                        }
                    }

                    if node != ROOT && set.len() >= min_documents {
                        visitor(InternalNode {
                            phrase: &phrase,
                            edge_start,
                            documents: &set,
                        });
                    }
                    sets[node] = Some(set);
                    phrase.truncate(edge_start);
                }
            }
        }
        Ok(())
    }
}
