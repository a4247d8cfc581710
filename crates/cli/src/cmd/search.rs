//! Search command implementation.

use notevault_core::vault::Cancellation;

use super::common::{fail, open_vault, resolve_format};
use super::output::{print_notes_json, print_notes_quiet, print_notes_table};
use crate::{ConfigArgs, OutputFormat, SearchArgs};

pub fn run(cfg: &ConfigArgs, args: SearchArgs) {
    let vault = open_vault(cfg);

    let results = match vault.search(&args.query, &args.path, &args.tags, &Cancellation::new())
    {
        Ok(results) => results,
        Err(e) => fail(format_args!("Error searching: {}", e)),
    };

    match resolve_format(args.output, args.json, args.quiet) {
        OutputFormat::Table => print_notes_table(&results),
        OutputFormat::Json => print_notes_json(&results),
        OutputFormat::Quiet => print_notes_quiet(&results),
    }
}
