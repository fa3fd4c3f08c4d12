//! Caller-owned cache of parsed regions.
//!
//! Editors ask for the path under every cursor move but the text only
//! changes on edits. The cache keeps one parse outcome per region for the
//! current buffer version; moving to a new version drops every entry.

use crate::{ParseError, YamlNode};
use std::collections::HashMap;

/// Which part of the buffer a cached parse covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionSpan {
    /// The entire buffer. Its end moves with every edit, so it gets a key of
    /// its own instead of a range.
    Whole,

    /// Character range `[start, end)` of an embedded region.
    Range { start: usize, end: usize },
}

/// Outcome of parsing one region.
#[derive(Debug, Clone)]
pub struct CachedParse {
    pub outcome: Result<Vec<YamlNode>, ParseError>,

    /// Buffer line on which the region starts; resolver lines are relative
    /// to it.
    pub first_line: usize,
}

impl CachedParse {
    pub fn parse(text: &str, first_line: usize) -> Self {
        Self {
            outcome: crate::parse(text),
            first_line,
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.outcome.as_ref().err()
    }
}

/// Parse results keyed by buffer version and region.
#[derive(Debug, Default)]
pub struct ParseCache {
    version: Option<u64>,
    regions: HashMap<RegionSpan, CachedParse>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached parse of `region` at `version`, parsing `text` on a miss.
    ///
    /// A version different from the cached one invalidates every entry
    /// before the lookup.
    pub fn get_or_parse(
        &mut self,
        version: u64,
        region: RegionSpan,
        text: &str,
        first_line: usize,
    ) -> &CachedParse {
        if self.version != Some(version) {
            if !self.regions.is_empty() {
                tracing::debug!(previous = ?self.version, version, "buffer version changed, dropping cached parses");
            }
            self.regions.clear();
            self.version = Some(version);
        }
        self.regions.entry(region).or_insert_with(|| {
            tracing::debug!(?region, "parsing region");
            CachedParse::parse(text, first_line)
        })
    }

    /// Cached parse of `region`, if it belongs to `version`.
    pub fn get(&self, version: u64, region: RegionSpan) -> Option<&CachedParse> {
        if self.version != Some(version) {
            return None;
        }
        self.regions.get(&region)
    }

    /// Drop everything, e.g. on an edit notification.
    pub fn invalidate(&mut self) {
        self.regions.clear();
        self.version = None;
    }

    /// Any cached region that failed to parse at `version`.
    pub fn first_error(&self, version: u64) -> Option<(RegionSpan, &ParseError)> {
        if self.version != Some(version) {
            return None;
        }
        self.regions
            .iter()
            .find_map(|(region, cached)| cached.error().map(|err| (*region, err)))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_reuses_entry() {
        let mut cache = ParseCache::new();
        cache.get_or_parse(1, RegionSpan::Whole, "a: 1\n", 0);
        // Different text at the same version is not re-parsed.
        let cached = cache.get_or_parse(1, RegionSpan::Whole, "b: [", 0);
        assert!(cached.outcome.is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_new_version_drops_entries() {
        let mut cache = ParseCache::new();
        cache.get_or_parse(1, RegionSpan::Whole, "a: 1\n", 0);
        cache.get_or_parse(1, RegionSpan::Range { start: 10, end: 20 }, "b: 2\n", 3);
        assert_eq!(cache.len(), 2);

        let cached = cache.get_or_parse(2, RegionSpan::Whole, "b: [", 0);
        assert!(cached.error().is_some());
        assert_eq!(cache.len(), 1);
        assert!(cache.get(1, RegionSpan::Whole).is_none());
    }

    #[test]
    fn test_invalidate() {
        let mut cache = ParseCache::new();
        cache.get_or_parse(7, RegionSpan::Whole, "a: 1\n", 0);
        cache.invalidate();
        assert!(cache.is_empty());
        assert!(cache.get(7, RegionSpan::Whole).is_none());
    }

    #[test]
    fn test_first_error() {
        let mut cache = ParseCache::new();
        cache.get_or_parse(1, RegionSpan::Whole, "a: 1\n", 0);
        assert!(cache.first_error(1).is_none());

        let region = RegionSpan::Range { start: 0, end: 4 };
        cache.get_or_parse(1, region, "a: [", 0);
        let (found, err) = cache.first_error(1).unwrap();
        assert_eq!(found, region);
        assert_eq!(err.line(), 0);
    }
}
