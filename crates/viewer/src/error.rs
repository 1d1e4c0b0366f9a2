/// Initialization failures. Each one is terminal for the session: the shell
/// shows the message in place of the loading indicator and does not retry.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerError {
    /// The drawing surface (canvas element) does not exist
    MissingCanvas(String),
    /// No rendering context could be created
    RenderContext(String),
    /// The product catalog failed validation
    InvalidCatalog(String),
    /// A file could not be read or written
    Io(String),
    /// A JSON document could not be parsed
    Parse(String),
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::MissingCanvas(id) => write!(f, "Canvas element '{}' not found", id),
            ViewerError::RenderContext(msg) => {
                write!(f, "Failed to create rendering context: {}", msg)
            }
            ViewerError::InvalidCatalog(msg) => write!(f, "Invalid product catalog: {}", msg),
            ViewerError::Io(msg) => write!(f, "I/O error: {}", msg),
            ViewerError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ViewerError {}

impl From<shared::CatalogError> for ViewerError {
    fn from(e: shared::CatalogError) -> Self {
        match e {
            shared::CatalogError::Parse(msg) => ViewerError::Parse(msg),
            other => ViewerError::InvalidCatalog(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        ViewerError::Io(e.to_string())
    }
}

/// Read and validate a catalog JSON file
pub fn load_catalog(path: &std::path::Path) -> Result<shared::ProductCatalog, ViewerError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| ViewerError::Io(format!("{}: {e}", path.display())))?;
    Ok(shared::ProductCatalog::from_json(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = ViewerError::MissingCanvas("viewer".to_string());
        assert_eq!(e.to_string(), "Canvas element 'viewer' not found");
        let e = ViewerError::RenderContext("no GL".to_string());
        assert!(e.to_string().contains("no GL"));
    }

    #[test]
    fn test_catalog_error_conversion() {
        let e: ViewerError = shared::CatalogError::Parse("eof".to_string()).into();
        assert_eq!(e, ViewerError::Parse("eof".to_string()));
        let e: ViewerError = shared::CatalogError::EmptyId.into();
        assert!(matches!(e, ViewerError::InvalidCatalog(_)));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog(std::path::Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, ViewerError::Io(_)));
    }
}
