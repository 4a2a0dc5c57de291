//! Completions command implementation.

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

pub fn cmd_completions<C: CommandFactory>(shell: Shell) {
    let mut command = C::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
}
