//! PhotoSweep - review a photo folder one image at a time and sweep out
//! the ones you do not want.

mod input;
mod terminal;

use anyhow::Result;
use app_core::{t, AppConfig, FsLibraryOptions, FsPhotoLibrary, I18n, KeyMap, SessionController};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use terminal::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "photo_sweep", version, about = "Review a photo folder and sweep out unwanted images")]
struct Args {
    /// Photo folder to review (defaults to the configured library root)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Include images in subfolders
    #[arg(long)]
    recursive: bool,

    /// Delete committed images for good instead of using the recycle bin
    #[arg(long)]
    permanent: bool,

    /// Interface language, e.g. "en" or "ja"
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// Command-line flags win over the configuration file
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(root) = &self.root {
            config.library.root = root.clone();
        }
        if self.recursive {
            config.library.recursive = true;
        }
        if self.permanent {
            config.library.use_recycle_bin = false;
        }
        if let Some(lang) = &self.lang {
            config.general.language = lang.clone();
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging is configured from the file, so errors here are reported once it is up
    let loaded = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let (mut config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    args.apply_to(&mut config);

    let _log_guard = app_log::init(&config.general.log_level)?;

    if let Some(e) = config_error {
        tracing::warn!("Failed to load configuration, using defaults: {:#}", e);
    }

    if let Err(e) = app_log::cleanup_old_logs(config.general.log_retention_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("PhotoSweep starting on {}", config.library.root.display());

    let i18n = Arc::new(I18n::with_builtin(&config.general.language)?);
    let keymap = KeyMap::from_config(&config.keybindings);
    println!("{}", help_line(&i18n, &keymap));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(config, i18n, keymap))
}

async fn run(config: AppConfig, i18n: Arc<I18n>, keymap: KeyMap) -> Result<()> {
    let library = Arc::new(FsPhotoLibrary::new(FsLibraryOptions::from_config(&config)));
    let view = TerminalView::new(std::io::stdout(), Arc::clone(&i18n));
    let controller = SessionController::new(library, view, config.viewer.thumbnail_size());
    let handle = controller.handle();

    let unbound_i18n = Arc::clone(&i18n);
    input::spawn_stdin_reader(keymap, handle.clone(), move |key| {
        println!("{}", t!(unbound_i18n, "unknown-key", key = key.to_string()));
    })?;

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted");
            let _ = handle.quit();
        }
    });

    controller.run().await?;

    tracing::info!("PhotoSweep finished");
    Ok(())
}

fn help_line(i18n: &I18n, keymap: &KeyMap) -> String {
    let keys = |id: &str| keymap.keys_for(id).join("/");
    t!(
        i18n,
        "help-keys",
        next = keys(app_core::CommandId::NAV_NEXT_ITEM),
        delete = keys(app_core::CommandId::FILE_DELETE),
        commit = keys(app_core::CommandId::FILE_EMPTY_TRASH),
        reload = keys(app_core::CommandId::APP_RELOAD),
        quit = keys(app_core::CommandId::APP_QUIT),
    )
}
