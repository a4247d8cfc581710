use super::common::{fail, open_vault};
use crate::{ConfigArgs, mcp};

pub fn run(cfg: &ConfigArgs) {
    let vault = open_vault(cfg);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => fail(format_args!("Error starting runtime: {}", e)),
    };

    if let Err(e) = runtime.block_on(mcp::run(vault)) {
        fail(format_args!("MCP server error: {}", e));
    }
}
