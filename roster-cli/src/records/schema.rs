//! Declarative column contract for uploaded sheets

/// Column names a sheet must start with, in order
///
/// Both the header check and the per-row completeness check are driven by
/// this list, so changing the contract never touches the validation loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    columns: Vec<String>,
}

/// Column that feeds [`crate::records::Record::id`]
pub const ID: &str = "id";
/// Column that feeds [`crate::records::Record::name`]
pub const NAME: &str = "name";
/// Column that feeds [`crate::records::Record::email`]
pub const EMAIL: &str = "email";

impl RecordSchema {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(|c| c.into().to_lowercase()).collect(),
        }
    }

    /// The user contract: `id`, `name`, `email`
    pub fn users() -> Self {
        Self::new([ID, NAME, EMAIL])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Case-insensitive positional match of the leading headers
    pub fn matches_headers(&self, headers: &[String]) -> bool {
        if headers.len() < self.columns.len() {
            return false;
        }

        self.columns
            .iter()
            .zip(headers)
            .all(|(expected, actual)| actual.to_lowercase() == *expected)
    }

    /// Expected labels formatted as `'id', 'name', 'email'`
    pub fn describe(&self) -> String {
        self.columns
            .iter()
            .map(|c| format!("'{}'", c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::users()
    }
}
