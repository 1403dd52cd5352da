//! Document-id filters for the search index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Index field holding the document identifier.
pub const DOCUMENT_ID_FIELD: &str = "id";

/// Restricts a search to hits whose document id is one of a fixed set.
///
/// Ids are kept as integers and only turned into filter syntax by
/// [`DocumentFilter::to_odata`], so caller-supplied values can never alter
/// the structure of the expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    ids: BTreeSet<i64>,
}

impl DocumentFilter {
    /// Build a filter for an id set. Returns `None` for an empty set, which
    /// means "no filter", never "match nothing".
    pub fn any_of<I>(ids: I) -> Option<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let ids: BTreeSet<i64> = ids.into_iter().collect();
        if ids.is_empty() {
            None
        } else {
            Some(Self { ids })
        }
    }

    pub fn ids(&self) -> &BTreeSet<i64> {
        &self.ids
    }

    /// Render as an OData disjunction: `id eq '5' or id eq '9'`.
    ///
    /// The key field of the index is a string, hence the quoted values.
    pub fn to_odata(&self) -> String {
        self.ids
            .iter()
            .map(|id| format!("{} eq '{}'", DOCUMENT_ID_FIELD, id))
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
