use std::fs;

use anyhow::Context as _;
use chronicle_application::AppContext;
use chronicle_storage::{DataLoader, load_settings};
use chronicle_ui::Ui;
use directories::ProjectDirs;

mod logging;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let project_dirs =
        ProjectDirs::from("dev", "chronicle", "chronicle").context("resolve project dirs")?;

    let config_dir = project_dirs.config_dir();
    fs::create_dir_all(config_dir)
        .with_context(|| format!("create config dir {}", config_dir.display()))?;

    let settings_path = config_dir.join("settings.json");
    let settings = load_settings(&settings_path)?;

    let log_dir = project_dirs.data_local_dir().join("logs");
    let _logger = match logging::init_logging(settings.log_level, &log_dir) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };
    log::info!(
        "settings loaded from {} data_path={} animations={} apply_category_filters={}",
        settings_path.display(),
        settings.data_path,
        settings.animations,
        settings.apply_category_filters
    );

    let cwd = std::env::current_dir().context("get cwd")?;
    let loader = DataLoader::from_settings(&cwd, &settings);

    log::info!("starting ui");
    let ctx = Ui::new(AppContext::new(settings), loader).run()?;
    log::info!("ui exited active_filters={}", ctx.active_filters.len());

    Ok(())
}
