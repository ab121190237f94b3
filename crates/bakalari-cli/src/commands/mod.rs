//! Subcommand implementations.

mod attachment;
mod fetch;
mod get;
mod login;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use bakalari::{BaseUrl, Client, Credentials, Login, SessionConfig};

use crate::cli::{Cli, Commands, ServerArgs};

/// Log in, run the command and close the session, whatever the outcome.
pub async fn handle(cli: Cli) -> Result<()> {
    let (client, login) = connect(&cli.server).await?;

    let result = run(&client, &login, cli.command, cli.pretty).await;

    client.close().await;
    result
}

async fn run(client: &Client, session: &Login, command: Commands, pretty: bool) -> Result<()> {
    match command {
        Commands::Login => login::run(session),
        Commands::User => fetch::user(client, pretty).await,
        Commands::Subjects => fetch::subjects(client, pretty).await,
        Commands::Marks => fetch::marks(client, pretty).await,
        Commands::Absence => fetch::absence(client, pretty).await,
        Commands::Homework(args) => fetch::homework(client, args, pretty).await,
        Commands::Timetable(args) => fetch::timetable(client, args, pretty).await,
        Commands::Messages(args) => fetch::messages(client, args, pretty).await,
        Commands::Attachment(args) => attachment::run(client, args).await,
        Commands::Get(args) => get::run(client, args, pretty).await,
    }
}

async fn connect(server: &ServerArgs) -> Result<(Client, Login)> {
    let base = BaseUrl::new(&server.url).context("Invalid server URL")?;
    let config = SessionConfig::default()
        .with_user_agent(concat!("bakalari-cli/", env!("BAKALARI_CLI_VERSION")));
    let client = Client::with_config(base, config);

    eprintln!("{}", "Logging in...".dimmed());

    let credentials = Credentials::new(&server.username, &server.password);
    let login = match client.login(credentials, false).await {
        Ok(login) => login,
        Err(e) => {
            client.close().await;
            return Err(e).context("Failed to login");
        }
    };
    debug!(api_version = %login.api_version, "Connected");

    Ok((client, login))
}
