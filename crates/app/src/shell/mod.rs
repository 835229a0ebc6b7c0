//! Interactive line shell over the [`Catalog`].
//!
//! Each input line is parsed into a [`Command`], executed against the
//! catalog, and its result printed. Errors are shown and the loop continues.

pub mod command;
pub mod render;

use brickshelf_core::edit_session::EditSession;
use brickshelf_core::validation::SetForm;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::catalog::Catalog;
use crate::error::AppResult;

pub use command::{parse_command, Command, ParseError, SetFieldChange};

const PROMPT: &str = "brickshelf> ";

/// Run the read-eval-print loop until `quit`, Ctrl-C or end of input.
pub async fn run(catalog: &Catalog) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("LEGO set catalog. Type 'help' for commands.");

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        let command = match parse_command(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        if let Command::Delete {
            keys,
            confirmed: false,
        } = &command
        {
            let question = format!("Delete {} selected set(s)? [y/N] ", keys.len());
            let answer = match editor.readline(&question) {
                Ok(answer) => answer,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => String::new(),
                Err(e) => return Err(e),
            };
            if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                println!("Cancelled.");
                continue;
            }
        }

        match execute(catalog, command).await {
            Ok(output) => println!("{output}"),
            Err(e) => eprintln!("{}", render::error(&e)),
        }
    }

    println!("Bye.");
    Ok(())
}

/// Execute one command and return the text to print.
///
/// Deletion runs unconditionally here; confirmation belongs to the caller.
pub async fn execute(catalog: &Catalog, command: Command) -> AppResult<String> {
    match command {
        Command::Add(form) => {
            let record = catalog.save(&EditSession::Create, &form).await?;
            Ok(format!("Set {} added.", record.articul))
        }
        Command::Edit { key, changes } => {
            let existing = catalog.find(&key).await?;
            let mut form = SetForm::from_record(&existing);
            for change in changes {
                change.apply(&mut form);
            }
            let record = catalog.save(&EditSession::update(key.clone()), &form).await?;
            if record.articul == key {
                Ok(format!("Set {key} updated."))
            } else {
                Ok(format!("Set {key} updated and renamed to {}.", record.articul))
            }
        }
        Command::Search(form) => {
            let records = catalog.search(&form).await?;
            Ok(render::table(&records))
        }
        Command::Show(key) => {
            let details = catalog.details(&key).await?;
            Ok(render::details(&details))
        }
        Command::Delete { keys, .. } => {
            let removed = catalog.delete(&keys).await?;
            Ok(format!("Deleted {removed} of {} selected set(s).", keys.len()))
        }
        Command::Favorite(key) => {
            let favorite = catalog.toggle_favorite(&key).await?;
            if favorite {
                Ok(format!("{key} is now a favorite."))
            } else {
                Ok(format!("{key} is no longer a favorite."))
            }
        }
        Command::Gallery { favorites_only } => {
            let tiles = catalog.gallery(favorites_only).await?;
            Ok(render::gallery(&tiles))
        }
        Command::Stats => {
            let stats = catalog.statistics().await?;
            Ok(render::stats(&stats))
        }
        Command::Series => {
            let names = catalog.series_options().await?;
            Ok(render::series(&names))
        }
        Command::Help => Ok(render::HELP.to_string()),
        Command::Quit => Ok(String::new()),
    }
}
