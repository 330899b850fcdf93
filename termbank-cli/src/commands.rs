//! The command table and its handlers.
//!
//! Commands are registered in a `name -> handler` table; dispatch looks the
//! name up and hands the handler the session context plus its arguments.
//! Handlers report expected user-level problems ("no such entry") by
//! printing, and real failures (IO, parse) as errors.

use crate::session::{Mode, Session};
use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use termbank_storage::create_dictionary;
use termbank_types::Entry;

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

type Handler = fn(&mut Session, &[String]) -> Result<Outcome>;

struct Command {
    usage: &'static str,
    summary: &'static str,
    handler: Handler,
}

/// The registered command table.
pub struct CommandRegistry {
    table: BTreeMap<&'static str, Command>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Builds the full table.
    #[must_use]
    pub fn new() -> Self {
        let mut table: BTreeMap<&'static str, Command> = BTreeMap::new();
        let mut reg = |name, usage, summary, handler| {
            table.insert(
                name,
                Command {
                    usage,
                    summary,
                    handler,
                },
            );
        };

        reg(
            "new",
            "new <path>",
            "create an empty dictionary and open it",
            cmd_new as Handler,
        );
        reg(
            "open",
            "open <path> [--online]",
            "open a dictionary file; --online reconciles on save",
            cmd_open,
        );
        reg(
            "add",
            "add <headword> [category] [group]",
            "add an entry",
            cmd_add,
        );
        reg(
            "define",
            "define <headword> <text>...",
            "attach definitions to an entry",
            cmd_define,
        );
        reg(
            "undefine",
            "undefine <headword> <text>...",
            "remove definitions from an entry",
            cmd_undefine,
        );
        reg(
            "find",
            "find [pattern] [--category C] [--group G]",
            "search entries",
            cmd_find,
        );
        reg(
            "show",
            "show <headword>",
            "show an entry and its definitions",
            cmd_show,
        );
        reg(
            "remove",
            "remove <headword>",
            "delete an entry and its definitions",
            cmd_remove,
        );
        reg("save", "save", "persist the dictionary", cmd_save);
        reg(
            "discard",
            "discard",
            "abandon all unsaved changes",
            cmd_discard,
        );
        reg("status", "status", "show session state", cmd_status);
        reg("help", "help", "list commands", cmd_help);
        reg("quit", "quit", "exit", cmd_quit);

        Self { table }
    }

    /// Whether a command with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }

    /// Parses one input line and runs the named command.
    ///
    /// Blank lines and unknown commands are not errors; both leave the
    /// session untouched and continue the loop.
    pub fn dispatch(&self, session: &mut Session, line: &str) -> Result<Outcome> {
        let words = split_words(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(Outcome::Continue);
        };
        match self.table.get(name.as_str()) {
            Some(command) => (command.handler)(session, args),
            None => {
                println!("unknown command {name:?} (try `help`)");
                Ok(Outcome::Continue)
            }
        }
    }

    fn print_help(&self) {
        for command in self.table.values() {
            println!("  {:<44} {}", command.usage, command.summary);
        }
    }
}

/// Splits an input line into words, honoring double quotes so headwords and
/// definition texts can contain spaces.
#[must_use]
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

// ── Handlers ─────────────────────────────────────────────────────

fn cmd_new(session: &mut Session, args: &[String]) -> Result<Outcome> {
    let [path] = args else {
        bail!("usage: new <path>");
    };
    let path = PathBuf::from(path);
    create_dictionary(&path)?;
    session.open(path, Mode::Offline)?;
    println!("created");
    Ok(Outcome::Continue)
}

fn cmd_open(session: &mut Session, args: &[String]) -> Result<Outcome> {
    let (flags, positional): (Vec<&String>, Vec<&String>) =
        args.iter().partition(|a| a.starts_with("--"));
    let [path] = positional.as_slice() else {
        bail!("usage: open <path> [--online]");
    };
    let mode = if flags.iter().any(|f| *f == "--online") {
        Mode::Online
    } else {
        Mode::Offline
    };
    session.open(PathBuf::from(path), mode)?;
    let open = session.require_open()?;
    println!(
        "opened {} ({} entries)",
        open.path().display(),
        open.dictionary().entry_count()
    );
    Ok(Outcome::Continue)
}

fn cmd_add(session: &mut Session, args: &[String]) -> Result<Outcome> {
    let (headword, category, group) = match args {
        [h] => (h, "", ""),
        [h, c] => (h, c.as_str(), ""),
        [h, c, g] => (h, c.as_str(), g.as_str()),
        _ => bail!("usage: add <headword> [category] [group]"),
    };
    let entry = Entry::new(headword.clone(), category, group)?;
    let open = session.require_open()?;
    if open.dictionary_mut().add_entry(entry).was_added() {
        println!("added {headword:?}");
    } else {
        println!("{headword:?} already exists");
    }
    Ok(Outcome::Continue)
}

fn cmd_define(session: &mut Session, args: &[String]) -> Result<Outcome> {
    let Some((headword, defs)) = args.split_first() else {
        bail!("usage: define <headword> <text>...");
    };
    if defs.is_empty() {
        bail!("usage: define <headword> <text>...");
    }
    for text in defs {
        if text.trim().is_empty() {
            bail!("definition text must not be empty");
        }
    }
    let open = session.require_open()?;
    let Some(key) = open.dictionary().find_by_headword(headword).map(Entry::key) else {
        println!("no entry {headword:?}");
        return Ok(Outcome::Continue);
    };
    let outcomes = open.dictionary_mut().add_definitions(key, defs.to_vec());
    for (text, outcome) in defs.iter().zip(outcomes) {
        if outcome.was_added() {
            println!("defined: {text}");
        } else {
            println!("already defined: {text}");
        }
    }
    Ok(Outcome::Continue)
}

fn cmd_undefine(session: &mut Session, args: &[String]) -> Result<Outcome> {
    let Some((headword, defs)) = args.split_first() else {
        bail!("usage: undefine <headword> <text>...");
    };
    if defs.is_empty() {
        bail!("usage: undefine <headword> <text>...");
    }
    let open = session.require_open()?;
    let Some(key) = open.dictionary().find_by_headword(headword).map(Entry::key) else {
        println!("no entry {headword:?}");
        return Ok(Outcome::Continue);
    };
    let outcomes = open.dictionary_mut().remove_definitions(key, defs);
    for (text, outcome) in defs.iter().zip(outcomes) {
        if outcome.was_removed() {
            println!("removed: {text}");
        } else {
            println!("not found: {text}");
        }
    }
    Ok(Outcome::Continue)
}

fn cmd_find(session: &mut Session, args: &[String]) -> Result<Outcome> {
    let mut pattern = String::new();
    let mut category = String::new();
    let mut group = String::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--category" => {
                category = iter
                    .next()
                    .map(String::clone)
                    .ok_or_else(|| anyhow::anyhow!("--category needs a value"))?;
            }
            "--group" => {
                group = iter
                    .next()
                    .map(String::clone)
                    .ok_or_else(|| anyhow::anyhow!("--group needs a value"))?;
            }
            _ => pattern = arg.clone(),
        }
    }
    let open = session.require_open()?;
    let mut hits = open.dictionary().search(&pattern, &category, &group);
    hits.sort_by(|a, b| a.headword().cmp(b.headword()));
    if hits.is_empty() {
        println!("no matches");
    }
    for entry in hits {
        println!(
            "{}  [{}]  [{}]",
            entry.headword(),
            entry.category(),
            entry.group()
        );
    }
    Ok(Outcome::Continue)
}

fn cmd_show(session: &mut Session, args: &[String]) -> Result<Outcome> {
    let [headword] = args else {
        bail!("usage: show <headword>");
    };
    let open = session.require_open()?;
    let Some(entry) = open.dictionary().find_by_headword(headword) else {
        println!("no entry {headword:?}");
        return Ok(Outcome::Continue);
    };
    println!(
        "{}  [{}]  [{}]  {}",
        entry.headword(),
        entry.category(),
        entry.group(),
        entry.key()
    );
    let defs = open.dictionary().definitions_for(entry.key());
    if defs.is_empty() {
        println!("  (no definitions)");
    }
    for text in defs {
        println!("  - {text}");
    }
    Ok(Outcome::Continue)
}

fn cmd_remove(session: &mut Session, args: &[String]) -> Result<Outcome> {
    let [headword] = args else {
        bail!("usage: remove <headword>");
    };
    let open = session.require_open()?;
    let Some(key) = open.dictionary().find_by_headword(headword).map(Entry::key) else {
        println!("no entry {headword:?}");
        return Ok(Outcome::Continue);
    };
    open.dictionary_mut().remove_entry(key);
    println!("removed {headword:?}");
    Ok(Outcome::Continue)
}

fn cmd_save(session: &mut Session, _args: &[String]) -> Result<Outcome> {
    match session.save()? {
        Some(report) => println!("saved (reconciled: {report})"),
        None => println!("saved"),
    }
    Ok(Outcome::Continue)
}

fn cmd_discard(session: &mut Session, _args: &[String]) -> Result<Outcome> {
    session.discard()?;
    println!("changes discarded");
    Ok(Outcome::Continue)
}

fn cmd_status(session: &mut Session, _args: &[String]) -> Result<Outcome> {
    match session.open_dictionary() {
        None => println!("no dictionary open"),
        Some(open) => {
            let dict = open.dictionary();
            println!(
                "{} ({:?} mode): {} entries, {} definitions, {}",
                open.path().display(),
                open.mode(),
                dict.entry_count(),
                dict.definition_count(),
                if dict.is_dirty() {
                    "unsaved changes"
                } else {
                    "clean"
                }
            );
        }
    }
    Ok(Outcome::Continue)
}

fn cmd_help(session: &mut Session, _args: &[String]) -> Result<Outcome> {
    let _ = session;
    CommandRegistry::new().print_help();
    Ok(Outcome::Continue)
}

fn cmd_quit(session: &mut Session, _args: &[String]) -> Result<Outcome> {
    if let Some(open) = session.open_dictionary() {
        if open.dictionary().is_dirty() {
            println!("note: unsaved changes were not written (use `save` first)");
        }
    }
    Ok(Outcome::Quit)
}
