//! Login command implementation.

use anyhow::Result;

use bakalari::Login;

use crate::output;

pub fn run(login: &Login) -> Result<()> {
    output::success("Logged in successfully");
    println!();
    output::field("API version", &login.api_version);
    output::field(
        "Token expires in",
        &format!("{}s", login.expires_in.as_secs()),
    );

    Ok(())
}
