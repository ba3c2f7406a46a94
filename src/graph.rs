//! Source/destination edges for domain-flow and sender-recipient graphs

use crate::error::{CorpusError, Result};
use crate::types::StructuredRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Directed relationship with its number of occurrences
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub destination: String,
    pub count: usize,
}

/// Link of a Sankey diagram, expressed in node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: usize,
    pub target: usize,
    pub value: usize,
}

/// Records fanned out into one (source, destination) pair per destination.
///
/// `sources` and `destinations` are the expanded pairs in input order;
/// `counts` and `unique_pairs` are keyed and sorted by pair, so identical
/// input always yields identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneToOneMapping {
    pub sources: Vec<String>,
    pub destinations: Vec<String>,
    pub counts: BTreeMap<(String, String), usize>,
    pub unique_pairs: Vec<(String, String)>,
}

/// Expand per-record sources and destination sets into flat pairs.
///
/// A record with k destinations contributes k pairs sharing its source; a
/// record with none contributes nothing.
pub fn one_to_one_mapping<S, D>(sources: &[S], destinations: &[Vec<D>]) -> Result<OneToOneMapping>
where
    S: AsRef<str>,
    D: AsRef<str>,
{
    if sources.len() != destinations.len() {
        return Err(CorpusError::MismatchedLengths {
            sources: sources.len(),
            destinations: destinations.len(),
        });
    }

    let pairs = sources
        .iter()
        .zip(destinations)
        .flat_map(|(source, dests)| {
            let source: &str = source.as_ref();
            dests.iter().map(move |d| {
                let destination: &str = d.as_ref();
                (source.to_string(), destination.to_string())
            })
        })
        .collect();

    Ok(OneToOneMapping::from_pairs(pairs))
}

impl OneToOneMapping {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut counts = BTreeMap::new();
        for pair in &pairs {
            *counts.entry(pair.clone()).or_insert(0) += 1;
        }
        let unique_pairs = counts.keys().cloned().collect();
        let (sources, destinations) = pairs.into_iter().unzip();

        Self {
            sources,
            destinations,
            counts,
            unique_pairs,
        }
    }

    /// Keep only the pairs accepted by `keep`
    #[must_use]
    pub fn retain(self, keep: impl Fn(&str, &str) -> bool) -> Self {
        let pairs = self
            .sources
            .into_iter()
            .zip(self.destinations)
            .filter(|(s, d)| keep(s.as_str(), d.as_str()))
            .collect();
        Self::from_pairs(pairs)
    }

    /// Drop pairs whose destination is blank
    #[must_use]
    pub fn without_blank_destinations(self) -> Self {
        self.retain(|_, d| !d.trim().is_empty())
    }

    #[must_use]
    pub fn count(&self, source: &str, destination: &str) -> usize {
        self.counts
            .get(&(source.to_string(), destination.to_string()))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Unique pairs with their counts, sorted by pair
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.counts
            .iter()
            .map(|((source, destination), &count)| Edge {
                source: source.clone(),
                destination: destination.clone(),
                count,
            })
            .collect()
    }

    /// Sorted unique node names
    #[must_use]
    pub fn nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self
            .unique_pairs
            .iter()
            .flat_map(|(s, d)| [s.clone(), d.clone()])
            .collect();
        nodes.sort();
        nodes.dedup();
        nodes
    }

    /// Node list plus one link per unique pair, indexed into that list
    #[must_use]
    pub fn sankey(&self) -> (Vec<String>, Vec<SankeyLink>) {
        let nodes = self.nodes();
        let index: BTreeMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();

        let links = self
            .counts
            .iter()
            .filter_map(|((s, d), &value)| {
                Some(SankeyLink {
                    source: *index.get(s.as_str())?,
                    target: *index.get(d.as_str())?,
                    value,
                })
            })
            .collect();

        (nodes, links)
    }
}

/// Sender domain to recipient domains, one entry per record with a sender
/// domain. Blank destinations are dropped.
#[must_use]
pub fn domain_flow(records: &[StructuredRecord]) -> OneToOneMapping {
    let (sources, destinations): (Vec<&str>, Vec<Vec<&str>>) = records
        .iter()
        .filter_map(|r| {
            let source = r.sender_domain()?;
            Some((source, r.to.domains.iter().map(String::as_str).collect()))
        })
        .unzip();

    expand(&sources, &destinations).without_blank_destinations()
}

/// Sender address to recipient addresses. Blank destinations and
/// self-addressed pairs are dropped.
#[must_use]
pub fn sender_network(records: &[StructuredRecord]) -> OneToOneMapping {
    let (sources, destinations): (Vec<&str>, Vec<Vec<&str>>) = records
        .iter()
        .filter_map(|r| {
            let source = r.sender()?;
            Some((source, r.to.addresses.iter().map(String::as_str).collect()))
        })
        .unzip();

    expand(&sources, &destinations)
        .without_blank_destinations()
        .retain(|s, d| s != d)
}

// Inputs built side by side always agree in length.
fn expand(sources: &[&str], destinations: &[Vec<&str>]) -> OneToOneMapping {
    one_to_one_mapping(sources, destinations).unwrap_or_default()
}

/// Category of a graph node, used for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Matches a name of interest
    Interest,
    /// Belongs to the affiliated organization
    Affiliated,
    Other,
}

impl NodeCategory {
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Interest => "red",
            Self::Affiliated => "#AEF359",
            Self::Other => "#3944BC",
        }
    }
}

/// Names of interest in the Enron network graph
pub const DEFAULT_INTEREST_PATTERN: &str = "[Ss]killing|[Ff]astow|[Jj]usbasche|[Cc]ooper|[Bb]elden";

/// Labels nodes by substring and pattern matching on their lower-cased name
#[derive(Debug, Clone)]
pub struct NodeClassifier {
    interest: Regex,
    affiliation: Option<String>,
}

impl NodeClassifier {
    pub fn new(interest_pattern: &str, affiliation: Option<&str>) -> Result<Self> {
        Ok(Self {
            interest: Regex::new(interest_pattern)?,
            affiliation: affiliation.map(str::to_lowercase),
        })
    }

    #[must_use]
    pub fn classify(&self, node: &str) -> NodeCategory {
        let lower = node.to_lowercase();
        if self.interest.is_match(&lower) {
            NodeCategory::Interest
        } else if self
            .affiliation
            .as_deref()
            .is_some_and(|a| lower.contains(a))
        {
            NodeCategory::Affiliated
        } else {
            NodeCategory::Other
        }
    }
}

impl Default for NodeClassifier {
    fn default() -> Self {
        Self {
            interest: Regex::new(DEFAULT_INTEREST_PATTERN).unwrap(),
            affiliation: Some("enron".to_string()),
        }
    }
}
