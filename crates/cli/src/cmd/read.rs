use std::io::{self, Write};

use super::common::{fail, open_vault};
use crate::{ConfigArgs, ReadArgs};

pub fn run(cfg: &ConfigArgs, args: ReadArgs) {
    let vault = open_vault(cfg);

    let content = match vault.read(&args.path) {
        Ok(content) => content,
        Err(e) => fail(format_args!("Error reading note: {}", e)),
    };

    // written as-is so the output matches the file byte for byte
    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(content.as_bytes()).and_then(|_| stdout.flush()) {
        fail(format_args!("Error writing output: {}", e));
    }
}
