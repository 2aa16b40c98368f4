use clap::Parser;
use error_stack::{Result, ResultExt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use vestibule::config;
use vestibule::directory::InMemoryDirectory;
use vestibule::form::{FieldState, PasswordState, SignupForm};

/// Drive the sign-up form state machine from the terminal
#[derive(Debug, Parser)]
pub struct FormCommand {
    /// Debounce window in milliseconds, overriding the configuration.
    #[clap(long)]
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Error)]
#[error("Failed to run the form driver")]
pub struct FormDriverError;

pub fn run(args: FormCommand) -> Result<(), FormDriverError> {
    let config = config::Server::load().change_context(FormDriverError)?;
    let window = Duration::from_millis(args.debounce_ms.unwrap_or(config.form.debounce_ms));

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .change_context(FormDriverError)
        .attach_printable("could not build tokio runtime")?
        .block_on(drive(window))
}

async fn drive(window: Duration) -> Result<(), FormDriverError> {
    let mut form = SignupForm::new(Arc::new(InMemoryDirectory::seeded()), window);

    println!("commands: email <value> | username <value> | password <value> | state | quit");
    println!("(availability answers arrive after the {window:?} debounce window)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.change_context(FormDriverError)? else {
                    break;
                };

                match line.trim().split_once(' ') {
                    Some(("email", value)) => form.email_input(value.trim()),
                    Some(("username", value)) => form.username_input(value.trim()),
                    Some(("password", value)) => form.password_input(value.trim()),
                    None if line.trim() == "state" => {}
                    None if line.trim() == "quit" => break,
                    None if line.trim().is_empty() => continue,
                    _ => {
                        println!("unrecognized command: {line}");
                        continue;
                    }
                }
                print_state(&form);
            }
            Some(result) = form.next_result() => {
                form.apply(result);
                print_state(&form);
            }
        }
    }

    Ok(())
}

fn print_state(form: &SignupForm) {
    println!(
        "  email:    {}",
        describe_field(form.email_state(), "Email address taken")
    );
    println!(
        "  username: {}",
        describe_field(form.username_state(), "Username taken")
    );
    println!("  password: {}", describe_password(form.password_state()));
    println!(
        "  sign up:  {}",
        if form.submit_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );
}

fn describe_field(state: &FieldState, taken_message: &'static str) -> String {
    match state {
        FieldState::Untouched => "(untouched)".to_owned(),
        FieldState::Invalid => "invalid".to_owned(),
        FieldState::Pending { value } => format!("checking {value:?}..."),
        FieldState::Available { value } => format!("{value:?} is available"),
        FieldState::Taken { value } => format!("{value:?}: {taken_message}"),
    }
}

fn describe_password(state: PasswordState) -> &'static str {
    match state {
        PasswordState::Untouched => "(untouched)",
        PasswordState::Invalid => "Password must be at least 8 characters",
        PasswordState::Valid => "ok",
    }
}
