use crate::command::{self, Command, HELP};
use anyhow::Result;
use rustyline::{DefaultEditor, error::ReadlineError};
use serde::Serialize;
use userdb_core::service::UserService;

///
/// Shell
///

pub struct Shell {
    service: UserService,
    compact: bool,
}

impl Shell {
    pub const fn new(service: UserService, compact: bool) -> Self {
        Self { service, compact }
    }

    pub fn run(&self) -> Result<()> {
        let mut editor = DefaultEditor::new()?;

        println!("userdb v{}. Type 'help' for commands.", env!("CARGO_PKG_VERSION"));

        loop {
            let line = match editor.readline("userdb> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let _ = editor.add_history_entry(trimmed);

            match command::parse(trimmed) {
                Ok(Command::Quit) => break,
                Ok(cmd) => {
                    // Internal faults are reported and the session continues.
                    if let Err(err) = self.execute(cmd) {
                        eprintln!("error: {err:#}");
                    }
                }
                Err(usage) => eprintln!("{usage}"),
            }
        }

        Ok(())
    }

    fn execute(&self, cmd: Command) -> Result<()> {
        let service = &self.service;
        tracing::debug!(?cmd, "execute");

        match cmd {
            Command::Create(req) => self.print(&service.create(req)?),
            Command::List => self.print(&service.list()?),
            Command::Get(req) => self.print(&service.get(&req)?),
            Command::SearchAge(req) => self.print(&service.search_age(req)?),
            Command::SearchName(req) => self.print(&service.search_name(&req)?),
            Command::Metrics => self.print(&service.db().metrics_report()),
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let out = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{out}");

        Ok(())
    }
}
