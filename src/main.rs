mod cli;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;

use cli::{BrowseCommand, Cli, Commands, BROWSE_HELP};
use vitrine::config::Config;
use vitrine::presenter::{JsonPresenter, Presenter, TerminalPresenter};
use vitrine::{LoadStatus, Vitrine, NO_RESULTS_MESSAGE};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    vitrine::logging::init(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(n) = cli.page_size {
        config.page_size = n;
    }
    let mut session = Vitrine::from_config(&config).context("setting up catalog source")?;

    match cli.command {
        Commands::List { search, page, json } => {
            let mut presenter = presenter_for(json);
            prepare(&mut session, &search, presenter.as_mut()).await?;
            session.go_to(page, presenter.as_mut())?;
        }
        Commands::Show { position, search, json } => {
            let mut presenter = presenter_for(json);
            prepare(&mut session, &search, presenter.as_mut()).await?;
            let opened = position >= 1 && session.open_position(position - 1, presenter.as_mut())?;
            if !opened {
                let count = session.browser().filtered().len();
                if count == 0 {
                    presenter.show_empty_state(NO_RESULTS_MESSAGE)?;
                } else {
                    bail!("no item at position {position}; {count} item(s) match");
                }
            }
        }
        Commands::Browse => browse(&mut session).await?,
    }
    Ok(())
}

fn presenter_for(json: bool) -> Box<dyn Presenter> {
    if json {
        Box::new(JsonPresenter::new(io::stdout()))
    } else {
        Box::new(TerminalPresenter::new(io::stdout()))
    }
}

/// Load and filter without drawing; a failed load is shown and ends the run.
async fn prepare(session: &mut Vitrine, search: &str, presenter: &mut dyn Presenter) -> Result<()> {
    if let Err(e) = session.load_and_filter(search).await {
        session.report_failure(&e, presenter)?;
        return Err(e).context("loading catalog");
    }
    Ok(())
}

async fn browse(session: &mut Vitrine) -> Result<()> {
    let mut presenter = TerminalPresenter::new(io::stdout());
    if let LoadStatus::Failed(e) = session.load_and_search("", &mut presenter).await? {
        tracing::warn!(error = %e, "starting without a catalog; use `reload` to try again");
    }
    println!("{BROWSE_HELP}");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line.context("reading stdin")?;
        let Some(cmd) = BrowseCommand::parse(&line) else { continue };
        match cmd {
            BrowseCommand::Next => {
                if !session.next(&mut presenter)? {
                    println!("already on the last page");
                }
            }
            BrowseCommand::Previous => {
                if !session.previous(&mut presenter)? {
                    println!("already on the first page");
                }
            }
            BrowseCommand::Search(term) => {
                if !session.search_input(&term, &mut presenter)? {
                    session.load_and_search(&term, &mut presenter).await?;
                }
            }
            BrowseCommand::Open(n) => {
                if !session.open(n - 1, &mut presenter)? {
                    println!("no card {n} on this page");
                }
            }
            BrowseCommand::Close => {
                session.close(&mut presenter)?;
            }
            BrowseCommand::Theme => {
                session.toggle_theme(&mut presenter)?;
            }
            BrowseCommand::Reload => {
                session.reload(&mut presenter).await?;
            }
            BrowseCommand::Help => println!("{BROWSE_HELP}"),
            BrowseCommand::Quit => break,
            BrowseCommand::Unknown(s) => println!("unknown command: {s} ({BROWSE_HELP})"),
        }
    }
    Ok(())
}
