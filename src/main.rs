use clap::Parser;
use nt_pref_ls::cli::{self, Cli, Command};
use nt_pref_ls::server::Backend;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    cli::init_tracing(&args.log_level)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!("starting language server on stdio");
            let (service, socket) = LspService::new(Backend::new);
            Server::new(stdin(), stdout(), socket).serve(service).await;
        }
        Command::Check { path, json } => {
            let report = cli::check(&path)?;
            cli::write_report(&mut std::io::stdout().lock(), &report, json)?;
        }
    }

    Ok(())
}
