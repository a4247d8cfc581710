//! Config loading and vault opening shared by the vault commands.

use std::fmt::Display;

use notevault_core::config::{ConfigLoader, ResolvedConfig};
use notevault_core::vault::Vault;

use crate::{ConfigArgs, OutputFormat, logging};

/// Load configuration, honouring `--vault`, and install logging.
pub fn load_config(args: &ConfigArgs) -> ResolvedConfig {
    let rc = match ConfigLoader::load_with_vault(
        args.config.as_deref(),
        args.profile.as_deref(),
        args.vault.as_deref(),
    ) {
        Ok(rc) => rc,
        Err(e) => fail(format_args!("Error loading config: {}", e)),
    };

    if let Err(e) = logging::init(&rc) {
        fail(format_args!("Error opening log file: {}", e));
    }
    rc
}

/// Load configuration and open the selected vault.
pub fn open_vault(args: &ConfigArgs) -> Vault {
    let rc = load_config(args);

    match Vault::open(&rc.vault_root) {
        Ok(vault) => vault,
        Err(e) => fail(format_args!("Error opening vault: {}", e)),
    }
}

/// Print an error and exit with status 1.
pub fn fail(msg: impl Display) -> ! {
    eprintln!("{}", msg);
    logging::flush();
    std::process::exit(1);
}

pub fn resolve_format(output: OutputFormat, json: bool, quiet: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else if quiet {
        OutputFormat::Quiet
    } else {
        output
    }
}
