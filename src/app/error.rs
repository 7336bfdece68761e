use thiserror::Error;

// Custom Application Error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Trail loading error: {0}")]
    Load(#[from] trail_walker::trail_loader::LoaderError),
    #[error("Trail error: {0}")]
    Trail(#[from] trail_walker::TrailError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
