//! Relationship path search between individuals
//!
//! A path is a sequence of individuals where each neighbour pair is a parent
//! and child, or two children of the same family. The search is recursive and
//! depth first with no visited set, so a pedigree that loops back on itself is
//! only stopped by the depth limit in [`RelationshipQuery`].

use crate::document::Document;
use crate::element::ElementId;
use crate::individual::Individual;
use crate::limits::{validate_search_depth, ValidationError, DEFAULT_SEARCH_DEPTH};
use serde::{Deserialize, Serialize};

/// Relationship search options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipQuery {
    /// Deepest recursion level explored before a branch is pruned
    #[serde(default = "default_depth")]
    pub max_depth: u32,
}

fn default_depth() -> u32 {
    DEFAULT_SEARCH_DEPTH
}

impl Default for RelationshipQuery {
    fn default() -> Self {
        Self {
            max_depth: default_depth(),
        }
    }
}

impl RelationshipQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum recursion depth
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_search_depth(self.max_depth)
    }
}

/// Search statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Recursive steps taken, pruned ones included
    pub calls: usize,
    pub max_depth_reached: u32,
    /// At least one branch was cut off by the depth limit
    pub depth_limit_hit: bool,
    pub path_found: bool,
}

/// Result of a relationship search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub start: ElementId,
    pub target: ElementId,

    /// Shortest path found, both ends included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<ElementId>>,

    pub stats: SearchStats,
}

/// Where a path's climb through the ancestors ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ancestor {
    pub individual: ElementId,
    /// Generations climbed
    pub distance: u32,
    /// Negative leans paternal, positive maternal; always in (-1, 1)
    pub direction: f64,
}

/// Relationship search engine
pub struct RelationshipEngine;

impl RelationshipEngine {
    /// Find the shortest relationship path from `start` to `target`.
    ///
    /// Among equally short candidates the first found wins, trying parents
    /// first, then siblings, then children. Both ends must be individuals;
    /// otherwise there is no path.
    pub fn search(
        doc: &Document,
        start: ElementId,
        target: ElementId,
        query: &RelationshipQuery,
    ) -> SearchResult {
        tracing::debug!(
            "Searching relationship: start={}, target={}, depth={}",
            start,
            target,
            query.max_depth
        );

        let mut search = Search {
            target,
            max_depth: query.max_depth,
            stats: SearchStats::default(),
        };

        let path = match (
            doc.get(start).as_individual(),
            doc.get(target).as_individual(),
        ) {
            (Some(from), Some(_)) => search.connect(from, 0),
            _ => {
                tracing::warn!(
                    "Relationship search needs two individuals, got {} and {}",
                    doc.get(start).tag(),
                    doc.get(target).tag()
                );
                None
            }
        };

        search.stats.path_found = path.is_some();
        tracing::debug!(
            "Relationship search finished: found={}, calls={}, depth={}",
            search.stats.path_found,
            search.stats.calls,
            search.stats.max_depth_reached
        );

        SearchResult {
            start,
            target,
            path,
            stats: search.stats,
        }
    }
}

struct Search {
    target: ElementId,
    max_depth: u32,
    stats: SearchStats,
}

impl Search {
    /// Record a step at `depth`; false if it lies beyond the limit
    fn enter(&mut self, depth: u32) -> bool {
        self.stats.calls += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
        if depth > self.max_depth {
            if !self.stats.depth_limit_hit {
                tracing::warn!(
                    "Relationship search pruned at depth {}; the pedigree may contain a loop",
                    depth
                );
            }
            self.stats.depth_limit_hit = true;
            return false;
        }
        true
    }

    fn connect(&mut self, start: Individual<'_>, depth: u32) -> Option<Vec<ElementId>> {
        if !self.enter(depth) {
            return None;
        }
        if start.id() == self.target {
            return Some(vec![start.id()]);
        }

        let mut best = None;
        for parent in start.parents() {
            if let Some(rest) = self.connect(parent, depth + 1) {
                keep_shorter(&mut best, prepend(start.id(), rest));
            }
        }
        if let Some(path) = self.siblings(start, depth) {
            keep_shorter(&mut best, path);
        }
        if let Some(path) = self.descend(start, depth) {
            keep_shorter(&mut best, path);
        }
        best
    }

    fn siblings(&mut self, start: Individual<'_>, depth: u32) -> Option<Vec<ElementId>> {
        let mut best = None;
        for family in start.child_families() {
            for sibling in family.child_individuals() {
                if sibling.id() == start.id() {
                    continue;
                }
                if sibling.id() == self.target {
                    return Some(vec![start.id(), sibling.id()]);
                }
                if let Some(rest) = self.descend_from(sibling, depth + 1) {
                    keep_shorter(&mut best, prepend(start.id(), rest));
                }
            }
        }
        best
    }

    fn descend_from(&mut self, start: Individual<'_>, depth: u32) -> Option<Vec<ElementId>> {
        if !self.enter(depth) {
            return None;
        }
        self.descend(start, depth)
    }

    fn descend(&mut self, start: Individual<'_>, depth: u32) -> Option<Vec<ElementId>> {
        let mut best = None;
        for family in start.spouse_families() {
            for child in family.child_individuals() {
                if child.id() == self.target {
                    return Some(vec![start.id(), child.id()]);
                }
                if let Some(rest) = self.descend_from(child, depth + 1) {
                    keep_shorter(&mut best, prepend(start.id(), rest));
                }
            }
        }
        best
    }
}

fn prepend(head: ElementId, mut rest: Vec<ElementId>) -> Vec<ElementId> {
    rest.insert(0, head);
    rest
}

fn keep_shorter(best: &mut Option<Vec<ElementId>>, candidate: Vec<ElementId>) {
    if best.as_ref().map_or(true, |b| candidate.len() < b.len()) {
        *best = Some(candidate);
    }
}

/// Fold a path into the ancestor reached by its leading run of parent steps.
///
/// Each step to a parent adds a generation and moves the direction by
/// `0.5^distance`, down for a father and up for a mother. The fold stops at
/// the first step that is not to a parent. Returns `None` for an empty path.
pub fn ancestor(doc: &Document, path: &[ElementId]) -> Option<Ancestor> {
    let (&first, _) = path.split_first()?;
    let mut result = Ancestor {
        individual: first,
        distance: 0,
        direction: 0.0,
    };

    for step in path.windows(2) {
        let (current, next) = (step[0], step[1]);
        let Some(person) = doc.get(current).as_individual() else {
            break;
        };
        if !person.parents().iter().any(|p| p.id() == next) {
            break;
        }

        result.distance += 1;
        let weight = 0.5f64.powi(result.distance as i32);
        if person.father().is_some_and(|f| f.id() == next) {
            result.direction -= weight;
        } else if person.mother().is_some_and(|m| m.id() == next) {
            result.direction += weight;
        }
        result.individual = next;
    }
    Some(result)
}

impl Document {
    /// Shortest relationship path with default search options
    pub fn relationship_path(&self, start: ElementId, target: ElementId) -> Option<Vec<ElementId>> {
        RelationshipEngine::search(self, start, target, &RelationshipQuery::default()).path
    }
}
