use std::fmt;

use project::DocumentError;
use render::RenderError;

#[derive(Debug)]
pub enum CliError {
    Io(std::io::Error),
    Document(DocumentError),
    Render(RenderError),
    InvalidColor(String),
    NoSuchLayer(usize),
    UnknownImageType(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "{}", err),
            CliError::Document(err) => write!(f, "{}", err),
            CliError::Render(err) => write!(f, "render failed: {}", err),
            CliError::InvalidColor(color) => write!(f, "could not parse color {:?}", color),
            CliError::NoSuchLayer(index) => write!(f, "project has no layer {}", index),
            CliError::UnknownImageType(path) => {
                write!(f, "cannot tell image type from {:?} (use .png, .bmp or .tiff)", path)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<DocumentError> for CliError {
    fn from(err: DocumentError) -> Self {
        CliError::Document(err)
    }
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        CliError::Render(err)
    }
}
