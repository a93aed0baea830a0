//! Codec for routes carried in a URL fragment.
//!
//! Client-side routed pages keep their own path and query string inside the
//! fragment: `https://host/app/kibana#/dashboard/abc?_g=(...)&_a=(...)`.
//! [`FragmentRoute::parse`] and [`FragmentRoute::format`] are the two halves
//! of that second-layer parse; the outer URL is handled by the `url` crate.
//!
//! Query parameters are decoded on parse and form-urlencoded on format, so a
//! round trip keeps every decoded value and its order but not the original
//! bytes: a space comes back as `+`, rison's `(` and `:` as `%28` and `%3A`.

use url::form_urlencoded;

/// Path and query of a fragment-nested route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentRoute {
    pub path: String,
    /// Decoded query parameters in their original order.
    pub query: Vec<(String, String)>,
    /// A further `#...` inside the fragment, kept verbatim.
    pub trailing: Option<String>,
}

impl FragmentRoute {
    /// Parse a fragment payload; a leading `#` is ignored.
    pub fn parse(fragment: &str) -> Self {
        let payload = fragment.strip_prefix('#').unwrap_or(fragment);

        let (route, trailing) = match payload.split_once('#') {
            Some((route, rest)) => (route, Some(rest.to_string())),
            None => (payload, None),
        };

        let (path, query) = match route.split_once('?') {
            Some((path, qs)) => (path, form_urlencoded::parse(qs.as_bytes()).into_owned().collect()),
            None => (route, Vec::new()),
        };

        Self {
            path: path.to_string(),
            query,
            trailing,
        }
    }

    /// Serialize back to a fragment payload (without the leading `#`).
    pub fn format(&self) -> String {
        let mut out = self.path.clone();
        if !self.query.is_empty() {
            let qs = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            out.push('?');
            out.push_str(&qs);
        }
        if let Some(trailing) = &self.trailing {
            out.push('#');
            out.push_str(trailing);
        }
        out
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Overwrite `key` where it first appears (dropping repeats) or append it.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.query.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.query[first].1 = value.to_string();
                let mut index = 0;
                self.query.retain(|(k, _)| {
                    let keep = index <= first || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.query.push((key.to_string(), value.to_string())),
        }
    }
}
