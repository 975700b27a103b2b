//! notegraph - linked notes with tags and revision history

pub mod cli;
pub mod domain;
pub mod graph;
pub mod infra;
pub mod store;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_backlinks, handle_completions, handle_drop_revision, handle_edit, handle_graph,
        handle_list, handle_new, handle_reindex, handle_revisions, handle_rm, handle_set,
        handle_show, handle_tags, open_service,
    },
    logging,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load()?;
    let data_dir = config.data_dir(cli.dir.as_ref());
    let service = open_service(&data_dir, &config)?;
    let author = || config.author(cli.author.as_deref());

    match &cli.command {
        Command::New(args) => handle_new(args, &service, &author()?, &config),
        Command::Show(args) => handle_show(args, &service),
        Command::Edit(args) => handle_edit(args, &service, &author()?, &config),
        Command::Set(args) => handle_set(args, &service, &author()?),
        Command::Rm(args) => handle_rm(args, &service),
        Command::List(args) => handle_list(args, &service),
        Command::Backlinks(args) => handle_backlinks(args, &service),
        Command::Graph(args) => handle_graph(args, &service),
        Command::Tags(args) => handle_tags(args, &service),
        Command::Revisions(args) => handle_revisions(args, &service),
        Command::DropRevision(args) => handle_drop_revision(args, &service),
        Command::Reindex(args) => handle_reindex(args, &service),
        Command::Completions(args) => handle_completions(args),
    }
}
