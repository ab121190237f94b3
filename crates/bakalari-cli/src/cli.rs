//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Command-line client for the Bakaláři school information system.
#[derive(Parser, Debug)]
#[command(name = "bakalari")]
#[command(author, version = env!("BAKALARI_CLI_VERSION"), about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to connect and who to log in as.
#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Base URL of the Bakaláři server
    #[arg(long, env = "BAKALARI_URL")]
    pub url: String,

    /// Login name
    #[arg(long, env = "BAKALARI_USERNAME")]
    pub username: String,

    /// Password
    #[arg(long, env = "BAKALARI_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and show the API version and token lifetime
    Login,

    /// Show the logged-in user
    User,

    /// List subjects
    Subjects,

    /// List marks by subject
    Marks,

    /// Show the absence summary
    Absence,

    /// List homework
    Homework(HomeworkArgs),

    /// Show the timetable
    Timetable(TimetableArgs),

    /// List Komens messages
    Messages(MessagesArgs),

    /// Download a message attachment
    Attachment(AttachmentArgs),

    /// GET an arbitrary API path and print the JSON response
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct HomeworkArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct TimetableArgs {
    /// Show the regular timetable instead of the actual week
    #[arg(long)]
    pub permanent: bool,

    /// Any day of the week to show (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct MessagesArgs {
    /// Show noticeboard messages instead of received ones
    #[arg(long)]
    pub noticeboard: bool,
}

#[derive(Args, Debug)]
pub struct AttachmentArgs {
    /// Attachment ID
    pub id: String,

    /// File to write the attachment to
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// API path, e.g. /api/3/user
    pub path: String,
}
