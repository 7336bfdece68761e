mod app;

use app::{run_app, AppError, Cli};
use clap::Parser;

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    run_app(cli)
}
