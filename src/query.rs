//! Query-string assembly for list and search endpoints.
//!
//! Values are always percent-encoded, so arbitrary user text reaches the API
//! as a literal filter value.

/// Ordered list of query parameters; keys may repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single `key=value` pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Builder-style variant of [`QueryParams::push`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Splits `values` on commas and appends one trimmed pair per item.
    ///
    /// Items that are blank after trimming are skipped.
    pub fn push_comma_separated(&mut self, key: &str, values: &str) -> &mut Self {
        for value in values.split(',').map(str::trim).filter(|v| !v.is_empty()) {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Values recorded for `key`, in insertion order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Form-encoded query string without a leading `?`.
    pub fn to_query_string(&self) -> String {
        // A slice of string pairs always serializes.
        serde_html_form::to_string(&self.pairs).unwrap_or_default()
    }

    /// Encoded `key=value&` fragments, one per pair, including the trailing `&`.
    pub fn to_fragment(&self) -> String {
        self.pairs
            .iter()
            .map(|pair| {
                let encoded = serde_html_form::to_string([pair]).unwrap_or_default();
                format!("{encoded}&")
            })
            .collect()
    }

    /// Appends the query string to `path`.
    pub fn apply_to(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}{}", self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_separated_values_expand_into_repeated_pairs() {
        let mut params = QueryParams::new();
        params.push_comma_separated("amenities", "pool, gym");
        assert_eq!(params.to_fragment(), "amenities=pool&amenities=gym&");
        assert_eq!(params.to_query_string(), "amenities=pool&amenities=gym");
    }

    #[test]
    fn blank_items_are_skipped() {
        let mut params = QueryParams::new();
        params.push_comma_separated("classes", " ,yoga,, spin ,");
        assert_eq!(params.values("classes").collect::<Vec<_>>(), vec!["yoga", "spin"]);
    }

    #[test]
    fn values_are_percent_encoded() {
        let params = QueryParams::new().with("name", "Rock & Roll=fun?");
        let fragment = params.to_fragment();
        assert_eq!(fragment, "name=Rock+%26+Roll%3Dfun%3F&");
    }

    #[test]
    fn apply_to_respects_existing_query() {
        let params = QueryParams::new().with("page", "2");
        assert_eq!(params.apply_to("/studios/search"), "/studios/search?page=2");
        assert_eq!(params.apply_to("/a?b=1"), "/a?b=1&page=2");
        assert_eq!(QueryParams::new().apply_to("/a"), "/a");
    }
}
