//! Configuration handlers for Xenophon CLI

use crate::cli::args::ConfigArgs;
use crate::cli::CliApp;
use crate::error::Result;

pub fn handle_config(app: &mut CliApp, args: &ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", app.config_path.display());
    } else {
        let config_json = serde_json::to_string_pretty(&app.config)?;
        println!("{}", config_json);
    }

    Ok(())
}
