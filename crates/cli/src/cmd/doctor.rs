use notevault_core::config::{ConfigLoader, default_config_path};
use notevault_core::vault::{Cancellation, Vault};

use crate::{ConfigArgs, logging};

pub fn run(cfg: &ConfigArgs) {
    let cfg_path = cfg.config.clone().unwrap_or_else(default_config_path);

    let rc = match ConfigLoader::load_with_vault(
        cfg.config.as_deref(),
        cfg.profile.as_deref(),
        cfg.vault.as_deref(),
    ) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL nvault doctor");
            println!("{e}");
            if cfg.config.is_none() {
                println!("looked for: {}", cfg_path.display());
            }
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&rc) {
        println!("FAIL nvault doctor");
        println!("cannot open log file: {e}");
        std::process::exit(1);
    }
    tracing::debug!("doctor using profile {}", rc.active_profile);

    let config_source = if cfg_path.exists() {
        cfg_path.display().to_string()
    } else {
        "(none)".to_string()
    };

    let vault = match Vault::open(&rc.vault_root) {
        Ok(vault) => vault,
        Err(e) => {
            println!("FAIL nvault doctor");
            println!("{e}");
            logging::flush();
            std::process::exit(1);
        }
    };

    let notes = match vault.list("", true, &Cancellation::new()) {
        Ok(notes) => notes.len(),
        Err(e) => {
            println!("FAIL nvault doctor");
            println!("{e}");
            logging::flush();
            std::process::exit(1);
        }
    };

    println!("OK   nvault doctor");
    println!("path: {}", config_source);
    println!("profile: {}", rc.active_profile);
    println!("vault_root: {}", vault.root().display());
    println!("notes: {}", notes);
    println!("logging.level: {}", rc.logging.level);
    if let Some(ref file) = rc.logging.file {
        println!("logging.file: {}", file.display());
    }
}
