use thiserror::Error;

/// Failures while reading the voltage series from disk. The whole request
/// fails on these; there is no partial-read recovery.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("voltage data file not found: {0}")]
    FileNotFound(String),

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("non-numeric voltage at line {line}: {value:?}")]
    Malformed { line: usize, value: String },

    #[error("failed to read voltage data: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while producing chart images or the HTML page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render chart: {0}")]
    Chart(String),

    #[error("failed to encode chart image: {0}")]
    Png(#[from] image::ImageError),

    #[error("failed to render page template: {0}")]
    Template(#[from] tera::Error),
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for RenderError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        RenderError::Chart(format!("{value:?}"))
    }
}

/// Failures while appending to the acceleration log. Non-fatal for the page:
/// the dashboard still renders and surfaces these as a warning.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to open acceleration log: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write acceleration record: {0}")]
    Csv(#[from] csv::Error),
}
