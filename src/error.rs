use thiserror::Error;

/// Main error type for the conf_sheet exporter.
/// Aggregates errors from the standard library, dependencies and every pipeline stage.
#[derive(Error, Debug)]
pub enum ConfSheetError {
    #[error("{0}: {1}")]
    WithContextError(String, #[source] Box<ConfSheetError>),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    // Third-party library errors
    #[error("{0}")]
    PatternError(#[from] glob::PatternError),

    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    // Database module errors
    #[error("{0}")]
    SchemaError(#[from] crate::database::table::SchemaError),

    #[error("{0}")]
    CoercionError(#[from] crate::database::coerce::CoercionError),

    // Output stage errors
    #[error("{0}")]
    CodegenError(#[from] crate::codegen::CodegenError),

    #[error("{0}")]
    PipelineError(#[from] crate::pipeline::PipelineError),
}

impl ConfSheetError {
    /// Returns the innermost error, skipping any context prefixes.
    pub fn root(&self) -> &ConfSheetError {
        match self {
            ConfSheetError::WithContextError(_, source) => source.root(),
            _ => self,
        }
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, ConfSheetError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| ConfSheetError::WithContextError(message.to_owned(), Box::new(e)))
    }
}
