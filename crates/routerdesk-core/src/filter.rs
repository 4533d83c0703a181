// ── Record filtering ──
//
// Free-text search plus equality facets over any `Filterable` record.
// Used by every list view: the TUI filter bar, CLI `--search`/`--category`
// flags and the log viewer's type + level selectors.

use std::fmt;

/// A record that can be searched and faceted.
pub trait Filterable {
    /// Facet that [`RecordFilter::category`] matches against, if any.
    const CATEGORY_FIELD: Option<&'static str> = None;

    /// Text fields the free-text query looks into.
    fn search_fields(&self) -> Vec<&str>;

    /// Display value of a named facet (`None` if the record has no such facet).
    fn facet(&self, field: &str) -> Option<String>;
}

/// A facet selection. `All` matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Only(String),
}

impl Category {
    /// Exact, case-sensitive equality.
    fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value.is_some_and(|v| v == wanted),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// `"all"` (any case) and blank input disable the facet.
impl From<&str> for Category {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }
}

impl From<Option<&str>> for Category {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::All, Self::from)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(v) => f.write_str(v),
        }
    }
}

/// Query + category + facet filter, built fluently.
///
/// ```
/// use routerdesk_core::filter::RecordFilter;
///
/// let filter = RecordFilter::new().query("bgp").category("Enrutamiento");
/// assert!(!filter.is_identity());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Lowercased search text, kept verbatim otherwise (spaces count);
    /// empty means no text filter.
    query: String,
    category: Category,
    facets: Vec<(String, Category)>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl AsRef<str>) -> Self {
        self.query = query.as_ref().to_lowercase();
        self
    }

    pub fn category(mut self, category: impl Into<Category>) -> Self {
        self.category = category.into();
        self
    }

    pub fn facet(mut self, field: impl Into<String>, value: impl Into<Category>) -> Self {
        let value = value.into();
        if !value.is_all() {
            self.facets.push((field.into(), value));
        }
        self
    }

    pub fn query_text(&self) -> &str {
        &self.query
    }

    pub fn category_value(&self) -> &Category {
        &self.category
    }

    /// Empty query, `all` category and no facets.
    pub fn is_identity(&self) -> bool {
        self.query.is_empty() && self.category.is_all() && self.facets.is_empty()
    }

    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.matches_category(record) && self.matches_facets(record) && self.matches_query(record)
    }

    /// Filtered view, preserving input order. The input is never modified.
    pub fn apply<'a, T, I>(&self, records: I) -> Vec<&'a T>
    where
        T: Filterable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        records.into_iter().filter(|r| self.matches(*r)).collect()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn matches_category<T: Filterable>(&self, record: &T) -> bool {
        if self.category.is_all() {
            return true;
        }
        let value = T::CATEGORY_FIELD.and_then(|field| record.facet(field));
        self.category.matches(value.as_deref())
    }

    fn matches_facets<T: Filterable>(&self, record: &T) -> bool {
        self.facets
            .iter()
            .all(|(field, wanted)| wanted.matches(record.facet(field).as_deref()))
    }

    fn matches_query<T: Filterable>(&self, record: &T) -> bool {
        self.query.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|text| text.to_lowercase().contains(&self.query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        kind: &'static str,
        level: &'static str,
        message: &'static str,
        source: &'static str,
    }

    impl Filterable for Entry {
        const CATEGORY_FIELD: Option<&'static str> = Some("kind");

        fn search_fields(&self) -> Vec<&str> {
            vec![self.message, self.source]
        }

        fn facet(&self, field: &str) -> Option<String> {
            match field {
                "kind" => Some(self.kind.to_owned()),
                "level" => Some(self.level.to_owned()),
                _ => None,
            }
        }
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry {
                kind: "network",
                level: "warning",
                message: "DHCP pool at 85%",
                source: "dhcp",
            },
            Entry {
                kind: "security",
                level: "error",
                message: "Access attempt blocked",
                source: "firewall",
            },
            Entry {
                kind: "network",
                level: "error",
                message: "WAN connectivity lost",
                source: "wan",
            },
        ]
    }

    fn messages(view: &[&Entry]) -> Vec<&'static str> {
        view.iter().map(|e| e.message).collect()
    }

    #[test]
    fn empty_query_and_all_is_identity() {
        let data = entries();
        let filter = RecordFilter::new().query("").category("ALL");
        assert!(filter.is_identity());
        assert_eq!(filter.apply(&data).len(), data.len());
    }

    #[test]
    fn query_is_case_insensitive_over_search_fields() {
        let data = entries();
        let view = RecordFilter::new().query("FIREwall").apply(&data);
        assert_eq!(messages(&view), ["Access attempt blocked"]);
    }

    #[test]
    fn category_and_level_combine() {
        let data = entries();
        let view = RecordFilter::new()
            .category("network")
            .facet("level", "error")
            .apply(&data);
        assert_eq!(messages(&view), ["WAN connectivity lost"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let data = entries();
        let filter = RecordFilter::new().query("a").category("network");
        let once = filter.apply(&data);
        let twice = filter.apply(once.iter().copied());
        assert_eq!(messages(&once), messages(&twice));
    }

    #[test]
    fn category_must_match_exactly() {
        let data = entries();
        assert!(RecordFilter::new().category("NETWORK").apply(&data).is_empty());
        assert!(RecordFilter::new().facet("level", "Error").apply(&data).is_empty());
        assert_eq!(RecordFilter::new().category("network").apply(&data).len(), 2);
    }

    #[test]
    fn query_spaces_are_significant() {
        let data = entries();
        assert!(RecordFilter::new().query(" firewall").apply(&data).is_empty());
        assert_eq!(RecordFilter::new().query("wan ").apply(&data).len(), 1);
    }

    #[test]
    fn unknown_facet_matches_nothing() {
        let data = entries();
        assert!(RecordFilter::new().facet("colour", "red").apply(&data).is_empty());
        assert_eq!(RecordFilter::new().facet("colour", "all").apply(&data).len(), 3);
    }
}
