//! Line-oriented shell over the same catalog, pokedex and catch rules the
//! HTTP API uses.

use std::fmt::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::catalog::Catalog;
use crate::catch::{self, RollSource};
use crate::creature::LocationPage;
use crate::cursor::{self, PageCursor};
use crate::error::{PokedexError, Result};
use crate::session;
use crate::store::CollectionStore;

const PROMPT: &str = "Pokedex > ";

const HELP: &[(&str, &str)] = &[
    ("help", "Prints the help menu"),
    ("map", "Lists the next page of location areas"),
    ("mapb", "Lists the previous page of location areas"),
    ("explore <location_area>", "Lists the pokemon in a location area"),
    ("catch <pokemon_name>", "Attempt to catch a pokemon and add it to your pokedex"),
    ("inspect <pokemon_name>", "View details about a caught Pokemon"),
    ("pokedex", "View your caught pokemon in your pokedex"),
    ("release <pokemon_name>", "Release a caught Pokemon"),
    ("exit", "Turns off the Pokedex"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    Release(String),
    Exit,
}

impl ReplCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };
        let command = match name.as_str() {
            "help" => ReplCommand::Help,
            "map" => ReplCommand::Map,
            "mapb" => ReplCommand::MapBack,
            "pokedex" => ReplCommand::Pokedex,
            "exit" => ReplCommand::Exit,
            "explore" => ReplCommand::Explore(single_arg(args, "explore <location_area>")?),
            "catch" => ReplCommand::Catch(single_arg(args, "catch <pokemon_name>")?),
            "inspect" => ReplCommand::Inspect(single_arg(args, "inspect <pokemon_name>")?),
            "release" => ReplCommand::Release(single_arg(args, "release <pokemon_name>")?),
            other => {
                return Err(PokedexError::validation(format!(
                    "unknown command '{other}', use help to list available commands"
                )))
            }
        };
        Ok(Some(command))
    }
}

fn clean_input(line: &str) -> Vec<String> {
    line.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn single_arg(args: &[String], usage: &str) -> Result<String> {
    match args {
        [arg] => Ok(arg.clone()),
        _ => Err(PokedexError::validation(format!("usage: {usage}"))),
    }
}

pub enum Outcome {
    Output(String),
    Exit,
}

pub struct Repl {
    catalog: Arc<dyn Catalog>,
    store: Arc<CollectionStore>,
    rolls: Arc<dyn RollSource>,
    cursor: PageCursor,
}

impl Repl {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        store: Arc<CollectionStore>,
        rolls: Arc<dyn RollSource>,
    ) -> Self {
        Self {
            catalog,
            store,
            rolls,
            cursor: PageCursor::default(),
        }
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub async fn execute(&mut self, command: ReplCommand) -> Result<Outcome> {
        let text = match command {
            ReplCommand::Exit => return Ok(Outcome::Exit),
            ReplCommand::Help => help_text(),
            ReplCommand::Map => {
                let (cursor, page) = cursor::next_page(self.catalog.as_ref(), &self.cursor).await?;
                self.cursor = cursor;
                self.page_text(&page)
            }
            ReplCommand::MapBack => {
                let (cursor, page) =
                    cursor::previous_page(self.catalog.as_ref(), &self.cursor).await?;
                self.cursor = cursor;
                self.page_text(&page)
            }
            ReplCommand::Explore(area) => {
                let exploration = session::explore(self.catalog.clone(), &self.store, &area).await?;
                let mut out = format!("Exploring {}...\nFound Pokemon:\n", exploration.name);
                for creature in exploration.creatures {
                    let mark = if creature.caught { " (caught)" } else { "" };
                    let _ = writeln!(out, " - {}{mark}", creature.name);
                }
                out
            }
            ReplCommand::Catch(name) => {
                let attempt = catch::attempt_catch(
                    self.catalog.as_ref(),
                    &self.store,
                    self.rolls.as_ref(),
                    &name,
                )
                .await?;
                format!(
                    "Throwing a Pokeball at {}...\n{}\n",
                    attempt.creature_name, attempt.message
                )
            }
            ReplCommand::Inspect(name) => {
                let creature = self.store.get(&name).await?;
                let mut out = format!(
                    "Name: {}\nHeight: {}\nWeight: {}\nStats:\n",
                    creature.name, creature.height, creature.weight
                );
                for stat in &creature.stats {
                    let _ = writeln!(out, "  -{}: {}", stat.name, stat.base_value);
                }
                out.push_str("Types:\n");
                for kind in &creature.types {
                    let _ = writeln!(out, "  - {kind}");
                }
                out
            }
            ReplCommand::Pokedex => {
                let caught = self.store.list_all().await;
                if caught.is_empty() {
                    "Your Pokedex is empty.\n".to_string()
                } else {
                    let mut out = String::from("Your Pokedex:\n");
                    for creature in caught {
                        let _ = writeln!(out, " - {}", creature.name);
                    }
                    out
                }
            }
            ReplCommand::Release(name) => {
                let released = self.store.remove(&name).await?;
                tracing::info!(pokemon = %released.name, "released");
                format!("Releasing {} into the wild!\n", released.name)
            }
        };
        Ok(Outcome::Output(text))
    }

    fn page_text(&self, page: &LocationPage) -> String {
        let mut out = String::new();
        for location in &page.locations {
            let _ = writeln!(out, "{}", location.name);
        }
        let _ = writeln!(
            out,
            "Page {} of {}",
            self.cursor.current_page_number(),
            self.cursor.total_pages()
        );
        out
    }

    /// Reads commands until `exit` or end of input. Command errors are
    /// printed and the shell keeps going.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let result = match ReplCommand::parse(&line) {
                Ok(Some(command)) => self.execute(command).await,
                Ok(None) => continue,
                Err(err) => Err(err),
            };
            match result {
                Ok(Outcome::Output(text)) => output.write_all(text.as_bytes()).await?,
                Ok(Outcome::Exit) => break,
                Err(err) => output.write_all(format!("{err}\n").as_bytes()).await?,
            }
        }
        output.write_all(b"Closing the Pokedex... Goodbye!\n").await?;
        output.flush().await
    }
}

fn help_text() -> String {
    let mut out = String::from("Welcome to the Pokedex!\nUsage:\n\n");
    for (usage, description) in HELP {
        let _ = writeln!(out, "{usage}: {description}");
    }
    out
}
