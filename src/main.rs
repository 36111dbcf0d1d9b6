// src/main.rs

use anyhow::Result;
use code_index::commands;

fn main() -> Result<()> {
    commands::run_cli()
}
