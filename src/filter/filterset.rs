//! Name matchers backing each side of a rule set.

use std::collections::HashSet;
use std::fmt;

use moka::sync::Cache;
use regex::Regex;

use super::config::{MatchProperties, MatchType};
use crate::error::PatternError;
use crate::telemetry;

/// Decides whether a metric name matches a compiled set of patterns.
pub trait FilterSet: Send + Sync + fmt::Debug {
    fn matches(&self, name: &str) -> bool;
}

/// Compile `props` into the matcher its `match_type` asks for.
pub fn new_filter_set(props: &MatchProperties) -> Result<Box<dyn FilterSet>, PatternError> {
    match props.match_type {
        MatchType::Strict => Ok(Box::new(StrictFilterSet::new(&props.metric_names))),
        MatchType::Regexp => {
            let mut set = RegexpFilterSet::new(&props.metric_names)?;
            if let Some(cfg) = props.regexp.as_ref().filter(|cfg| cfg.cache_enabled) {
                set = set.with_cache(cfg.cache_max_num_entries);
            }
            Ok(Box::new(set))
        }
    }
}

/// Exact-name matcher.
#[derive(Debug, Clone)]
pub struct StrictFilterSet {
    names: HashSet<String>,
}

impl StrictFilterSet {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            names: names.iter().map(|n| n.as_ref().to_owned()).collect(),
        }
    }
}

impl FilterSet for StrictFilterSet {
    fn matches(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Regular expression matcher with an optional per-name result cache.
///
/// Patterns are unanchored: `"http"` matches `"http.server.duration"`.
/// Add `^`/`$` for whole-name matches.
pub struct RegexpFilterSet {
    patterns: Vec<Regex>,
    cache: Option<Cache<String, bool>>,
}

impl RegexpFilterSet {
    /// Compile every pattern, failing on the first one that does not parse.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(pattern).map_err(|source| PatternError::InvalidRegex {
                    pattern: pattern.to_owned(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            patterns,
            cache: None,
        })
    }

    /// Cache match results for up to `max_entries` names (0 = unbounded).
    pub fn with_cache(mut self, max_entries: u64) -> Self {
        let mut builder = Cache::builder();
        if max_entries > 0 {
            builder = builder.max_capacity(max_entries);
        }
        self.cache = Some(builder.build());
        self
    }

    fn matches_uncached(&self, name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(name))
    }
}

impl FilterSet for RegexpFilterSet {
    fn matches(&self, name: &str) -> bool {
        let Some(cache) = &self.cache else {
            return self.matches_uncached(name);
        };
        if let Some(matched) = cache.get(name) {
            metrics::counter!(telemetry::REGEXP_CACHE_HITS_TOTAL).increment(1);
            return matched;
        }
        metrics::counter!(telemetry::REGEXP_CACHE_MISSES_TOTAL).increment(1);
        let matched = self.matches_uncached(name);
        cache.insert(name.to_owned(), matched);
        matched
    }
}

impl fmt::Debug for RegexpFilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexpFilterSet")
            .field(
                "patterns",
                &self.patterns.iter().map(Regex::as_str).collect::<Vec<_>>(),
            )
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_requires_exact_name() {
        let set = StrictFilterSet::new(&["http.server.duration"]);
        assert!(set.matches("http.server.duration"));
        assert!(!set.matches("http.server.duration.bucket"));
        assert!(!set.matches("http"));
    }

    #[test]
    fn regexp_is_unanchored() {
        let set = RegexpFilterSet::new(&["server"]).unwrap();
        assert!(set.matches("http.server.duration"));
        assert!(!set.matches("http.client.duration"));

        let anchored = RegexpFilterSet::new(&["^http\\.server$"]).unwrap();
        assert!(anchored.matches("http.server"));
        assert!(!anchored.matches("http.server.duration"));
    }

    #[test]
    fn regexp_any_pattern_matches() {
        let set = RegexpFilterSet::new(&["^cpu", "^mem"]).unwrap();
        assert!(set.matches("cpu.utilization"));
        assert!(set.matches("memory.usage"));
        assert!(!set.matches("disk.io"));
    }

    #[test]
    fn invalid_regexp_names_pattern() {
        let err = RegexpFilterSet::new(&["ok", "(unclosed"]).unwrap_err();
        let PatternError::InvalidRegex { pattern, .. } = &err;
        assert_eq!(pattern, "(unclosed");
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn cached_results_agree_with_uncached() {
        let set = RegexpFilterSet::new(&["^http"]).unwrap().with_cache(2);
        for _ in 0..3 {
            assert!(set.matches("http.server.duration"));
            assert!(!set.matches("rpc.server.duration"));
        }
    }

    #[test]
    fn factory_honours_match_type() {
        let strict = new_filter_set(&MatchProperties::strict(["a.b"])).unwrap();
        assert!(!strict.matches("aXb"));

        let regexp = new_filter_set(&MatchProperties::regexp(["a.b"])).unwrap();
        assert!(regexp.matches("aXb"));

        assert!(new_filter_set(&MatchProperties::regexp(["["])).is_err());
    }
}
