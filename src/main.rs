use anyhow::Result;
use clap::{crate_version, App as ClapApp, Arg};
use kanban_tui::app::App;
use kanban_tui::config::Config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new("kanban-tui")
        .version(crate_version!())
        .about("A keyboard-driven personal kanban board for the terminal")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("board")
                .value_name("BOARD_DIR")
                .help("Open the board in this directory, registering it as a project")
                .index(1),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    App::start(config, matches.value_of("board").map(PathBuf::from)).await?;
    Ok(())
}
