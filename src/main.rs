//! ruleplan CLI entry point

use clap::Parser;
use ruleplan::cli::common::{EXIT_ERROR, EXIT_SUCCESS, init_tracing};
use ruleplan::cli::{Command, access, args::Cli, compile, init, list};
use std::process;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Command::Init { force } => match init::run_init(&cli.config, force) {
            Ok(outcome) => {
                println!("{}", init::describe_outcome(&cli.config, outcome));
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Command::Compile { fields, format } => {
            compile::run_compile(&cli.config, &fields, format, cli.color)
        }
        Command::Explain {
            declaration,
            format,
        } => compile::run_explain(&cli.config, &declaration, format, cli.color),
        Command::List { format } => list::run_list(&cli.config, format, cli.color),
        Command::Get { file, path } => access::run_get(&file, &path),
        Command::Set { file, path, value } => access::run_set(&file, &path, &value),
    };

    process::exit(exit_code);
}
