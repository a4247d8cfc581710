//! Create and update commands.

use std::io::{self, Read};

use notevault_core::vault::{Vault, VaultError};

use super::common::{fail, open_vault};
use crate::{ConfigArgs, WriteArgs};

pub fn run_create(cfg: &ConfigArgs, args: WriteArgs) {
    run(cfg, args, "creating", "created", Vault::create);
}

pub fn run_update(cfg: &ConfigArgs, args: WriteArgs) {
    run(cfg, args, "updating", "updated", Vault::update);
}

fn run<F>(cfg: &ConfigArgs, args: WriteArgs, doing: &str, done: &str, op: F)
where
    F: Fn(&Vault, &str, &str) -> Result<(), VaultError>,
{
    let vault = open_vault(cfg);

    let content = match args.content {
        Some(content) => content,
        None => read_stdin().unwrap_or_else(|e| fail(format_args!("Error reading stdin: {}", e))),
    };

    if let Err(e) = op(&vault, &args.path, &content) {
        fail(format_args!("Error {} note: {}", doing, e));
    }

    println!("Successfully {} note: {}", done, args.path);
}

fn read_stdin() -> io::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
