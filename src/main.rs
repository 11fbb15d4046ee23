use std::{io, process::ExitCode};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use log::debug;

use gh_hook::{
    CreateArgs, HookError, Logging, PROJECT_NAME, PROJECT_VERSION,
    config::Config,
    create, delete,
    github::{HookClient, RestClient},
    list, print_header, resolve_repository,
};

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    #[command(subcommand)]
    command: Option<Command>,

    /// Repository to use, as [HOST/]OWNER/REPO or a URL. Defaults to the current repository
    #[arg(short = 'R', long, global = true, value_name = "REPO")]
    repo: Option<String>,

    /// Verbose
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new webhook
    Create(CreateArgs),

    /// List the webhooks of a repository
    #[command(visible_alias = "ls")]
    List,

    /// Delete webhooks
    #[command(visible_alias = "rm")]
    Delete,
}

fn init_logging(verbose: bool) -> Result<()> {
    if verbose {
        Logging::new().with_verbose(true).start()
    } else {
        let file_name = format!("{PROJECT_NAME}.log");
        Logging::new().with_file(file_name).start()
    }
}

/// Backing out of a prompt exits non-zero without an error report.
fn exit_code(result: Result<()>) -> Result<ExitCode> {
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if HookError::is_cancelled(&e) => {
            eprintln!("cancelled");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}

fn main() -> Result<ExitCode> {
    let args = UserArgs::parse();

    let Some(command) = args.command else {
        UserArgs::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    init_logging(args.verbose)?;

    let repo = resolve_repository(args.repo.as_deref())?;
    debug!("Target repository: {}/{repo}", repo.host);

    let config = Config::load().context("Unable to load configuration")?;
    let rest = RestClient::for_host(&repo.host, &config);
    debug!("Using API at {}", rest.base_url());
    let client = HookClient::new(rest);

    let mut stdout = io::stdout().lock();

    let result = match command {
        Command::Create(create_args) => {
            if create_args.input.is_none() {
                print_header();
            }
            create(&create_args, &client, &repo, &mut stdout)
        }
        Command::List => list(&client, &repo, &mut stdout),
        Command::Delete => delete(&client, &repo, &mut stdout),
    };

    exit_code(result)
}
