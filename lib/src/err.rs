use std::error;

#[derive(Debug, Clone)]
pub enum CatalogError {
    Missing(String),
    MissingColumn(&'static str),
    Malformed(String),
}

impl error::Error for CatalogError {}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Missing(path) => {
                write!(f, "Could not open catalog file {}", path)
            }
            CatalogError::MissingColumn(column) => {
                write!(f, "Catalog file is missing the {} column", column)
            }
            CatalogError::Malformed(reason) => {
                write!(f, "Catalog file could not be read: {}", reason)
            }
        }
    }
}
