//! The harvested record type

use serde::Serialize;

/// One detail record, as written to the output file
///
/// Field order matches the CSV columns `id,name,type_1,type_2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Identifier assigned by the remote source
    pub id: i64,

    /// Name assigned by the remote source
    pub name: String,

    /// First category listed by the source
    #[serde(rename = "type_1")]
    pub primary_category: String,

    /// Second category listed by the source, or empty
    #[serde(rename = "type_2")]
    pub secondary_category: String,
}

impl Record {
    /// Builds a record from the categories listed by the source
    ///
    /// Returns `None` when no category is listed. Anything past the second
    /// category is ignored.
    pub fn from_categories<I>(id: i64, name: impl Into<String>, categories: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut categories = categories.into_iter();
        let primary_category = categories.next()?;
        let secondary_category = categories.next().unwrap_or_default();

        Some(Self {
            id,
            name: name.into(),
            primary_category,
            secondary_category,
        })
    }
}
