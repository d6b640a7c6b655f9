//! Lazy endpoint rotation for image fetches.
//!
//! Metadata resolution does not retry image delivery; render layers do,
//! one failed fetch at a time. `ImageSource` hands out each endpoint of a
//! fixed priority list exactly once, so a broken image terminates with "no
//! image available" instead of looping or flickering between mirrors.

use crate::models::ContentRef;

/// Fixed-order supply of delivery URLs for one image.
#[derive(Clone, Debug)]
pub struct ImageSource {
    content: ContentRef,
    hosts: Vec<String>,
    cursor: usize,
}

impl ImageSource {
    pub fn new(content: ContentRef, hosts: Vec<String>) -> Self {
        Self {
            content,
            hosts,
            cursor: 0,
        }
    }

    /// The next untried endpoint, or `None` once the list is exhausted.
    ///
    /// Each endpoint is handed out at most once; after exhaustion every
    /// further call returns `None`.
    pub fn next_url(&mut self) -> Option<String> {
        let host = self.hosts.get(self.cursor)?;
        self.cursor += 1;
        Some(self.content.gateway_url(host))
    }

    pub fn exhausted(&self) -> bool {
        self.cursor >= self.hosts.len()
    }

    /// Endpoints not yet handed out.
    pub fn remaining(&self) -> usize {
        self.hosts.len().saturating_sub(self.cursor)
    }
}
