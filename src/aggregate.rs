//! Aggregation of per-path results into one sparse result tree.

use crate::tree::ResultTree;

/// Accumulates per-path result fragments.
///
/// Fragments are deep-unioned in the order they are added; when two
/// fragments carry the same leaf the later one wins.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    merged: ResultTree,
    fragments: usize,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, fragment: ResultTree) {
        self.merged.default.merge_from(fragment.default);
        for (code, tree) in fragment.websites {
            self.merged.websites.entry(code).or_default().merge_from(tree);
        }
        for (code, tree) in fragment.stores {
            self.merged.stores.entry(code).or_default().merge_from(tree);
        }
        self.fragments += 1;
    }

    /// Number of fragments added so far.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Finish aggregation, dropping every branch left without values.
    pub fn finish(mut self) -> ResultTree {
        self.merged.collapse_empty();
        self.merged
    }
}

/// Merge fragments in order into one result tree.
pub fn merge<I>(fragments: I) -> ResultTree
where
    I: IntoIterator<Item = ResultTree>,
{
    let mut aggregator = ResultAggregator::new();
    for fragment in fragments {
        aggregator.add(fragment);
    }
    aggregator.finish()
}
