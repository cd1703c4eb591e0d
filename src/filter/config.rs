//! Include/exclude rule sets.
//!
//! Used by both the builder-style API and configuration files:
//!
//! ```toml
//! [include]
//! match_type = "regexp"
//! metric_names = ["http.*"]
//!
//! [exclude]
//! match_type = "strict"
//! metric_names = ["http.server.duration"]
//! ```

use serde::{Deserialize, Serialize};

/// How metric names are compared against the configured patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Exact string equality.
    #[default]
    Strict,
    /// Regular expression search (unanchored).
    Regexp,
}

/// Options for `regexp` matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexpConfig {
    /// Remember match results per metric name.
    #[serde(default)]
    pub cache_enabled: bool,
    /// Upper bound on cached names. 0 means unbounded.
    #[serde(default)]
    pub cache_max_num_entries: u64,
}

/// One side of a rule set: a match type and the patterns to match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchProperties {
    #[serde(default)]
    pub match_type: MatchType,
    /// Only meaningful when `match_type` is `regexp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp: Option<RegexpConfig>,
    #[serde(default)]
    pub metric_names: Vec<String>,
}

impl MatchProperties {
    /// Exact-name matching against `names`.
    pub fn strict<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            match_type: MatchType::Strict,
            regexp: None,
            metric_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Regular expression matching against `patterns`.
    pub fn regexp<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            match_type: MatchType::Regexp,
            regexp: None,
            metric_names: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Cache regexp match results, keeping at most `max_entries` names (0 = unbounded).
    pub fn with_cache(mut self, max_entries: u64) -> Self {
        self.regexp = Some(RegexpConfig {
            cache_enabled: true,
            cache_max_num_entries: max_entries,
        });
        self
    }

    /// Whether this side lists no patterns at all.
    pub fn is_empty(&self) -> bool {
        self.metric_names.is_empty()
    }
}

/// Include and exclude rules for a filtering stage.
///
/// Both sides are optional. A missing or empty include side keeps every
/// metric; a missing or empty exclude side drops none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<MatchProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<MatchProperties>,
}

impl MetricFilters {
    /// Rules that keep everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the include side.
    pub fn include(mut self, props: MatchProperties) -> Self {
        self.include = Some(props);
        self
    }

    /// Set the exclude side.
    pub fn exclude(mut self, props: MatchProperties) -> Self {
        self.exclude = Some(props);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_type_defaults_to_strict() {
        let props: MatchProperties = toml::from_str(r#"metric_names = ["a"]"#).unwrap();
        assert_eq!(props.match_type, MatchType::Strict);
        assert!(props.regexp.is_none());
    }

    #[test]
    fn unknown_match_type_is_rejected() {
        let result: Result<MatchProperties, _> =
            toml::from_str(r#"match_type = "glob""#);
        assert!(result.is_err());
    }

    #[test]
    fn builder() {
        let filters = MetricFilters::new()
            .include(MatchProperties::regexp(["http.*"]).with_cache(10))
            .exclude(MatchProperties::strict(["http.server.duration"]));

        let include = filters.include.unwrap();
        assert_eq!(include.match_type, MatchType::Regexp);
        assert_eq!(
            include.regexp,
            Some(RegexpConfig {
                cache_enabled: true,
                cache_max_num_entries: 10,
            })
        );
        assert_eq!(
            filters.exclude.unwrap().metric_names,
            vec!["http.server.duration".to_string()]
        );
    }
}
