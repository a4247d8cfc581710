//! List command implementation.

use notevault_core::vault::Cancellation;

use super::common::{fail, open_vault, resolve_format};
use super::output::{print_notes_json, print_notes_quiet, print_notes_table};
use crate::{ConfigArgs, ListArgs, OutputFormat};

pub fn run(cfg: &ConfigArgs, args: ListArgs) {
    let vault = open_vault(cfg);

    let notes = match vault.list(&args.path, !args.flat, &Cancellation::new()) {
        Ok(notes) => notes,
        Err(e) => fail(format_args!("Error listing notes: {}", e)),
    };

    match resolve_format(args.output, args.json, args.quiet) {
        OutputFormat::Table => print_notes_table(&notes),
        OutputFormat::Json => print_notes_json(&notes),
        OutputFormat::Quiet => print_notes_quiet(&notes),
    }
}
