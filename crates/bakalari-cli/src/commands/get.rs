//! Raw GET command implementation.

use anyhow::{Context, Result};

use bakalari::{Client, Method, RequestOptions, Route};

use crate::cli::GetArgs;
use crate::output;

pub async fn run(client: &Client, args: GetArgs, pretty: bool) -> Result<()> {
    let session = client.session();
    let route =
        Route::new(session.base_url(), Method::GET, &args.path).context("Invalid API path")?;

    let body = session
        .request_json(&route, RequestOptions::new())
        .await
        .with_context(|| format!("GET {} failed", args.path))?;

    output::json(&body, pretty)
}
