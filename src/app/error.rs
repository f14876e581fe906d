use thiserror::Error;

// Custom Application Error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Graph error: {0}")]
    Graph(#[from] crate::graph::GraphError),
    #[error("Fixture error: {0}")]
    Fixture(#[from] crate::fixture::FixtureError),
    #[error("Invalid file path: {0}")]
    InvalidPath(String),
}
