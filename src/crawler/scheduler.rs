//! Depth-first frontier for a single crawl
//!
//! The frontier is an explicit stack of `(url, depth)` entries. Children are
//! pushed in reverse link order so they pop in link order, which reproduces
//! a recursive depth-first traversal without recursion.

/// A URL waiting to be visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The URL to fetch
    pub url: String,

    /// Link distance from the seed (seed is 0)
    pub depth: u32,
}

/// Work-list of URLs for one crawl call
#[derive(Debug, Default)]
pub struct Scheduler {
    stack: Vec<QueuedUrl>,
}

impl Scheduler {
    /// Creates a frontier holding only the seed at depth 0
    pub fn seeded(seed: impl Into<String>) -> Self {
        Self {
            stack: vec![QueuedUrl {
                url: seed.into(),
                depth: 0,
            }],
        }
    }

    /// Schedules a page's links so the first link is visited next
    pub fn push_links<I>(&mut self, links: I, depth: u32)
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: DoubleEndedIterator,
    {
        self.stack.extend(
            links
                .into_iter()
                .rev()
                .map(|url| QueuedUrl { url, depth }),
        );
    }

    /// Takes the next URL to visit
    pub fn next_url(&mut self) -> Option<QueuedUrl> {
        self.stack.pop()
    }

    /// Number of URLs still waiting
    pub fn frontier_size(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
