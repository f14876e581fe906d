mod app;
mod fixture;
mod graph;

use clap::Parser;

fn main() -> Result<(), app::AppError> {
    let cli = app::Cli::parse();
    app::run_app(cli)
}
