//! Read-only listing commands.

use anyhow::{Context, Result};

use bakalari::{Client, TimetableKind};

use crate::cli::{HomeworkArgs, MessagesArgs, TimetableArgs};
use crate::output;

pub async fn user(client: &Client, pretty: bool) -> Result<()> {
    let user = client.user().await.context("Failed to fetch user")?;
    output::json(&user, pretty)
}

pub async fn subjects(client: &Client, pretty: bool) -> Result<()> {
    let subjects = client.subjects().await.context("Failed to fetch subjects")?;
    output::json(&subjects, pretty)
}

pub async fn marks(client: &Client, pretty: bool) -> Result<()> {
    let marks = client.marks().await.context("Failed to fetch marks")?;
    output::json(&marks, pretty)
}

pub async fn absence(client: &Client, pretty: bool) -> Result<()> {
    let absence = client.absence().await.context("Failed to fetch absence")?;
    output::json(&absence, pretty)
}

pub async fn homework(client: &Client, args: HomeworkArgs, pretty: bool) -> Result<()> {
    let homework = client
        .homework(args.since, args.until)
        .await
        .context("Failed to fetch homework")?;
    output::json(&homework, pretty)
}

pub async fn timetable(client: &Client, args: TimetableArgs, pretty: bool) -> Result<()> {
    let kind = if args.permanent {
        TimetableKind::Permanent
    } else {
        TimetableKind::Actual
    };
    let timetable = client
        .timetable(kind, args.date)
        .await
        .context("Failed to fetch timetable")?;
    output::json(&timetable, pretty)
}

pub async fn messages(client: &Client, args: MessagesArgs, pretty: bool) -> Result<()> {
    let messages = if args.noticeboard {
        client.noticeboard().await
    } else {
        client.received_messages().await
    }
    .context("Failed to fetch messages")?;
    output::json(&messages, pretty)
}
