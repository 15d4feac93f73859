//! `mart completions <shell>`: prints a completion script, or installs it at
//! `--out`.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap_complete::{generate, Shell};
use mart_cli::build_cli_command;
use tracing::info;

/// Renders the script for `shell` under the command's own binary name.
pub fn render(shell: Shell, sink: &mut dyn Write) {
    let mut cmd = build_cli_command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, sink);
}

pub fn handle(shell: Shell, out: Option<&Path>) -> Result<()> {
    let Some(path) = out else {
        render(shell, &mut io::stdout().lock());
        return Ok(());
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    render(shell, &mut file);
    file.flush()?;
    info!(shell = ?shell, path = %path.display(), "wrote completion script");
    Ok(())
}
