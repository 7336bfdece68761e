pub mod error;
mod loader;

pub use error::LoaderError;
pub use loader::{load_trail_from_file, parse_trail};
