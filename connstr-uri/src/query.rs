//! Ordered multimap of decoded query parameters.

use url::form_urlencoded;

/// Decoded query parameters in their original order.
///
/// Duplicate keys are kept. [`QueryParams::get`] returns the first occurrence,
/// later ones are shadowed rather than merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string (without the leading `?`).
    ///
    /// Tokens are split on `&`, then on the first `=`. Keys and values are
    /// percent-decoded independently; `+` decodes to a space and malformed
    /// escapes are kept as literal text. A bare key yields an empty value.
    pub fn parse(raw: &str) -> Self {
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Get the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get every value for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether `key` occurs at least once.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Iterate over all `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs, duplicates included.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_pairs_in_order() {
        let params = QueryParams::parse("sslmode=require&application_name=myapp");
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![("sslmode", "require"), ("application_name", "myapp")]
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = QueryParams::parse("ssl=true&ssl=false");
        assert_eq!(params.get("ssl"), Some("true"));
        assert_eq!(params.get_all("ssl").collect::<Vec<_>>(), vec!["true", "false"]);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_bare_key_has_empty_value() {
        let params = QueryParams::parse("ssl&sslmode=");
        assert_eq!(params.get("ssl"), Some(""));
        assert_eq!(params.get("sslmode"), Some(""));
        assert!(params.contains_key("ssl"));
    }

    #[test]
    fn test_split_on_first_equals() {
        let params = QueryParams::parse("options=-c%20search_path=auth");
        assert_eq!(params.get("options"), Some("-c search_path=auth"));
    }

    #[test]
    fn test_percent_decoding() {
        let params = QueryParams::parse("sslrootcert=%2Fetc%2Fssl%2Fca.pem&na%6De=caf%C3%A9");
        assert_eq!(params.get("sslrootcert"), Some("/etc/ssl/ca.pem"));
        assert_eq!(params.get("name"), Some("café"));
    }

    #[test]
    fn test_malformed_escape_is_literal() {
        let params = QueryParams::parse("password=100%&x=%zz");
        assert_eq!(params.get("password"), Some("100%"));
        assert_eq!(params.get("x"), Some("%zz"));
    }

    #[test]
    fn test_plus_decodes_to_space() {
        let params = QueryParams::parse("application_name=my+app");
        assert_eq!(params.get("application_name"), Some("my app"));
    }

    #[test]
    fn test_empty_query() {
        let params = QueryParams::parse("");
        assert!(params.is_empty());
        assert_eq!(params.get("sslmode"), None);
    }

    #[test]
    fn test_from_iter() {
        let params: QueryParams = [("sslmode", "disable")].into_iter().collect();
        assert_eq!(params.get("sslmode"), Some("disable"));
    }
}
