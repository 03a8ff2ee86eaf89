use anyhow::Context;
use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::db::repositories::user::{MAX_NAME_CHARS, MAX_USERNAME_CHARS};
use crate::db::{AdminCredentials, AdminUpsert, Store};
use crate::validation::require_text;

const MISMATCH: &str = "Error: the two entered values do not match.";

pub async fn cmd_admin(
    config: &Config,
    username: Option<String>,
    password: Option<String>,
    name: Option<String>,
) -> anyhow::Result<()> {
    // The stdin lock is not `Send`, so it must be gone before the first await
    let (username, password) = {
        let mut input = io::stdin().lock();
        let mut output = io::stdout();

        let username = match username {
            Some(username) => username,
            None => prompt(&mut input, &mut output, "Username")?,
        };
        let password = match password {
            Some(password) => password,
            None => prompt_confirmed(&mut input, &mut output, "Password")?,
        };
        (username, password)
    };

    require_text("username", &username, MAX_USERNAME_CHARS)?;
    require_text("password", &password, usize::MAX)?;
    if let Some(name) = name.as_deref() {
        require_text("name", name, MAX_NAME_CHARS)?;
    }

    let store = Store::from_config(&config.general).await?;

    let exists = store.get_admin().await?.is_some();
    println!(
        "{}",
        if exists {
            "Updating user..."
        } else {
            "Creating user..."
        }
    );

    let credentials = AdminCredentials {
        username: &username,
        password: &password,
        name: name.as_deref(),
    };
    match store.upsert_admin(&credentials, &config.security).await? {
        AdminUpsert::Created => tracing::info!(username = %username, "Admin created"),
        AdminUpsert::Updated => tracing::info!(username = %username, "Admin updated"),
    }

    println!("Done.");
    Ok(())
}

/// Asks for one line of input, repeating until something non-blank arrives.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> anyhow::Result<String> {
    loop {
        write!(output, "{label}: ")?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        if read == 0 {
            anyhow::bail!("Input closed before {} was entered", label.to_lowercase());
        }

        let value = line.trim_end_matches(['\r', '\n']);
        if !value.trim().is_empty() {
            return Ok(value.to_string());
        }
    }
}

/// Asks for a value twice and starts over until both entries agree.
pub fn prompt_confirmed<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> anyhow::Result<String> {
    loop {
        let first = prompt(input, output, label)?;
        let second = prompt(input, output, &format!("Repeat for confirmation ({label})"))
            .context("Confirmation was not entered")?;

        if first == second {
            return Ok(first);
        }

        writeln!(output, "{MISMATCH}")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_cmd_admin_future_is_send() {
        let config = Config::default();
        let future = cmd_admin(&config, None, None, None);
        assert_send(&future);
    }

    #[test]
    fn test_prompt_skips_blank_lines() {
        let mut input = Cursor::new("\n   \nadmin\n");
        let mut output = Vec::new();

        let value = prompt(&mut input, &mut output, "Username").unwrap();
        assert_eq!(value, "admin");

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Username: ").count(), 3);
    }

    #[test]
    fn test_prompt_fails_on_eof() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(prompt(&mut input, &mut output, "Username").is_err());
    }

    #[test]
    fn test_prompt_confirmed_retries_on_mismatch() {
        let mut input = Cursor::new("secret\nsecrte\nsecret\nsecret\n");
        let mut output = Vec::new();

        let value = prompt_confirmed(&mut input, &mut output, "Password").unwrap();
        assert_eq!(value, "secret");

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches(MISMATCH).count(), 1);
    }

    #[test]
    fn test_prompt_confirmed_keeps_inner_spaces() {
        let mut input = Cursor::new("pass word\r\npass word\r\n");
        let mut output = Vec::new();
        let value = prompt_confirmed(&mut input, &mut output, "Password").unwrap();
        assert_eq!(value, "pass word");
    }
}
