#![deny(dead_code)] // DO NOT REMOVE THIS EVER
use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};

mod settings;
mod ui;
mod utils;

use crate::{
    settings::{load_settings, set_config_path_override, Settings},
    ui::PeopleScreen,
};
use people_screen::{AvatarCatalog, ContactDirectory};

/// Command line arguments for the People screen
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "People: the contacts screen of a chat app, rendered in the terminal.",
    long_about = "Renders a static People screen (stories, top contacts, recently active) \
    from built-in sample data.\n\n\
    Press q, Esc or Ctrl+C to leave. Use --snapshot to print a single frame instead."
)]
struct Args {
    /// Directory holding avatar images, looked up by file name
    #[arg(long, value_name = "PATH")]
    assets_dir: Option<PathBuf>,

    /// Settings file to use instead of the one in the config directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "PATH", default_value = "people.log")]
    log_file: PathBuf,

    /// error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Text shown as the status bar clock
    #[arg(long, value_name = "LABEL")]
    clock: Option<String>,

    /// Print one rendered frame to stdout and exit
    #[arg(long)]
    snapshot: bool,

    #[arg(long, default_value_t = 48, help = "Snapshot width in columns")]
    width: u16,

    #[arg(long, default_value_t = 30, help = "Snapshot height in rows")]
    height: u16,
}

impl Args {
    fn overrides(&self) -> Settings {
        Settings {
            assets_dir: self.assets_dir.clone(),
            log_level: self.log_level.clone(),
            clock_label: self.clock.clone(),
        }
    }
}

/// Scan the assets directory; any failure leaves every avatar as a placeholder.
fn load_catalog(assets_dir: Option<&Path>) -> AvatarCatalog {
    let Some(dir) = assets_dir else {
        info!("No assets directory configured, avatars will use placeholder colors");
        return AvatarCatalog::empty();
    };

    match AvatarCatalog::scan(dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("{}; avatars will use placeholder colors", e);
            AvatarCatalog::empty()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.config {
        set_config_path_override(path.clone());
    }

    // file < environment < command line
    let settings = load_settings()?
        .merge(Settings::from_env())
        .merge(args.overrides());

    utils::setup_logging(Some(args.log_file.as_path()), settings.level_filter()?)?;
    info!("People screen starting up");
    info!("System information: {} {}", std::env::consts::OS, std::env::consts::ARCH);
    info!("Logging to file: {}", args.log_file.display());

    let directory = ContactDirectory::sample();
    info!(
        "Directory has {} contacts ({} top, {} recently active)",
        directory.len(),
        directory.first_group().len(),
        directory.second_group().len()
    );

    let catalog = load_catalog(settings.assets_dir.as_deref());
    let screen = PeopleScreen::new(&directory, &catalog, settings.clock_label());

    if args.snapshot {
        println!("{}", ui::snapshot(&screen, args.width, args.height)?);
        return Ok(());
    }

    let mut terminal = ui::setup_terminal()?;
    let result = ui::run(&mut terminal, &screen);
    ui::restore_terminal(terminal)?;

    info!("People screen closed");
    result
}
