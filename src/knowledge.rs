//! Knowledge-graph triples from cleaned message bodies
//!
//! Entity and relation extraction is delegated to a [`SentenceAnalyzer`]
//! supplied by the caller (typically a wrapper around a dependency parser).
//! This module only splits text into sentences, filters uninformative
//! entities and tallies what comes back.

use crate::config::{ENTITY_EXCLUSIONS, PipelineConfig};
use crate::graph::{OneToOneMapping, one_to_one_mapping};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Sentence-level entity and relation extraction
pub trait SentenceAnalyzer {
    /// Subject and object phrases; empty strings when none were found
    fn entities(&self, sentence: &str) -> (String, String);

    /// Verb phrase linking the two entities
    fn relation(&self, sentence: &str) -> String;
}

impl<T: SentenceAnalyzer + ?Sized> SentenceAnalyzer for &T {
    fn entities(&self, sentence: &str) -> (String, String) {
        (**self).entities(sentence)
    }

    fn relation(&self, sentence: &str) -> String {
        (**self).relation(sentence)
    }
}

/// Subject, object and the relation between them
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub source: String,
    pub destination: String,
    pub relation: String,
}

/// Split text after `.`, `!` or `?` followed by whitespace. Blank pieces are
/// dropped and the rest trimmed.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|&(_, next)| next.is_whitespace());
        if at_boundary {
            let end = idx + c.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece);
    }
}

/// Runs an analyzer over sentences and keeps informative triples
pub struct KnowledgeGraphBuilder<A> {
    analyzer: A,
    exclusions: HashSet<String>,
}

impl<A: SentenceAnalyzer> KnowledgeGraphBuilder<A> {
    /// Builder with the default pronoun-like exclusions
    #[must_use]
    pub fn new(analyzer: A) -> Self {
        Self::with_exclusions(analyzer, ENTITY_EXCLUSIONS)
    }

    /// Builder with the exclusions of `config`
    #[must_use]
    pub fn from_config(analyzer: A, config: &PipelineConfig) -> Self {
        Self::with_exclusions(analyzer, &config.entity_exclusions)
    }

    #[must_use]
    pub fn with_exclusions<I, S>(analyzer: A, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            analyzer,
            exclusions: exclusions
                .into_iter()
                .map(|e| str::to_lowercase(e.as_ref()))
                .collect(),
        }
    }

    /// Whether `entity`, lower-cased, is in the exclusion set
    #[must_use]
    pub fn is_excluded(&self, entity: &str) -> bool {
        self.exclusions.contains(&entity.to_lowercase())
    }

    /// Triple for one sentence, unless either entity is excluded
    #[must_use]
    pub fn triple(&self, sentence: &str) -> Option<Triple> {
        let (source, destination) = self.analyzer.entities(sentence);
        if self.is_excluded(&source) || self.is_excluded(&destination) {
            return None;
        }
        Some(Triple {
            source,
            destination,
            relation: self.analyzer.relation(sentence),
        })
    }

    /// Join `bodies` with spaces, split into sentences and collect triples
    /// in sentence order
    #[must_use]
    pub fn build<S: AsRef<str>>(&self, bodies: &[S]) -> KnowledgeGraph {
        let text = bodies
            .iter()
            .map(|b| b.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        let sentences = split_sentences(&text);
        let triples: Vec<Triple> = sentences.iter().filter_map(|s| self.triple(s)).collect();

        debug!(
            sentences = sentences.len(),
            triples = triples.len(),
            "Built knowledge graph"
        );
        KnowledgeGraph { triples }
    }
}

/// Triples extracted from a corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub triples: Vec<Triple>,
}

impl KnowledgeGraph {
    /// Most frequent (source, destination) pairs
    #[must_use]
    pub fn top_pairs(&self, n: usize) -> Vec<((String, String), usize)> {
        rank(
            self.triples
                .iter()
                .map(|t| (t.source.clone(), t.destination.clone())),
            n,
        )
    }

    /// Most frequent relations
    #[must_use]
    pub fn top_relations(&self, n: usize) -> Vec<(String, usize)> {
        rank(self.triples.iter().map(|t| t.relation.clone()), n)
    }

    /// Triples whose source or destination matches `pattern`
    #[must_use]
    pub fn filter_by_pattern(&self, pattern: &Regex) -> Self {
        Self {
            triples: self
                .triples
                .iter()
                .filter(|t| pattern.is_match(&t.source) || pattern.is_match(&t.destination))
                .cloned()
                .collect(),
        }
    }

    /// Source to destination edges, one pair per triple
    #[must_use]
    pub fn edges(&self) -> OneToOneMapping {
        let sources: Vec<&str> = self.triples.iter().map(|t| t.source.as_str()).collect();
        let destinations: Vec<Vec<&str>> = self
            .triples
            .iter()
            .map(|t| vec![t.destination.as_str()])
            .collect();
        one_to_one_mapping(&sources, &destinations).unwrap_or_default()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.triples.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

// Count descending, ties broken by key ascending.
fn rank<K: Ord>(items: impl Iterator<Item = K>, n: usize) -> Vec<(K, usize)> {
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}
