use std::{env, process};

use commands::handle_command;
use hashtables::{
    Config, HashTable, Strategy, info,
    log::{self, Level},
};
use highlight::CommandHighlighter;
use palette::{BOLD, MAUVE, RESET, SUBTEXT};
use rustyline::{Editor, error::ReadlineError, history::DefaultHistory};

mod commands;
mod highlight;
mod palette;

const PROMPT: &str = "htsh > ";
const HISTORY: &str = "history.htsh";
const LOG_LEVEL_VAR: &str = "HTSH_LOG";
const USAGE: &str = "usage: htsh [linear|quadratic|chaining] [initial_capacity] [maximum_load_factor]";

pub(crate) type Table = HashTable<String, String>;

fn main() -> rustyline::Result<()> {
    let config = match parse_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            process::exit(2);
        }
    };

    init_log();

    let mut table = match Table::new(config) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            process::exit(2);
        }
    };
    info!("htsh started with {config:?}");

    let mut rsl = Editor::<CommandHighlighter, DefaultHistory>::new()?;
    rsl.set_helper(Some(CommandHighlighter));
    if rsl.load_history(HISTORY).is_err() {
        println!("No previous history")
    };

    println!("{MAUVE}{BOLD}htsh{RESET} | a hash table you can poke at.");
    println!(
        "{SUBTEXT}{} with {} slots, maximum load factor {}{RESET}",
        config.strategy, config.initial_capacity, config.maximum_load_factor
    );
    println!("Type /help for guidance, /quit to leave.");

    loop {
        let line = match rsl.readline(PROMPT) {
            Ok(line) => line,
            Err(err) => {
                match err {
                    ReadlineError::Interrupted => println!("CTRL-C"),
                    ReadlineError::Eof => println!("CTRL-D"),
                    other => println!("Error: {other:#?}"),
                }

                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        rsl.add_history_entry(line)?;

        if handle_command(line, &mut table) {
            break;
        }
    }

    rsl.save_history(HISTORY)?;
    Ok(())
}

/// `[strategy] [initial_capacity] [maximum_load_factor]`, each falling back
/// to the defaults of the strategy.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Config, String> {
    let strategy = match args.next() {
        Some(arg) => Strategy::try_from(arg.as_str()).map_err(|err| err.to_string())?,
        None => Strategy::default(),
    };

    let mut config = Config::new(strategy);

    if let Some(arg) = args.next() {
        let capacity = arg
            .parse()
            .map_err(|_| format!("Invalid initial capacity provided: {arg}"))?;
        config = config.initial_capacity(capacity);
    }

    if let Some(arg) = args.next() {
        let load_factor = arg
            .parse()
            .map_err(|_| format!("Invalid maximum load factor provided: {arg}"))?;
        config = config.maximum_load_factor(load_factor);
    }

    match args.next() {
        Some(arg) => Err(format!("Unexpected argument: {arg}")),
        None => Ok(config),
    }
}

/// Logging stays off unless `HTSH_LOG` names a level.
fn init_log() {
    let Ok(level) = env::var(LOG_LEVEL_VAR) else {
        return;
    };

    match Level::try_from(level.as_str()) {
        Ok(level) => {
            if let Err(err) = log::init(level, log::LOG_FILE_PATH) {
                eprintln!("Couldn't open {}: {err}", log::LOG_FILE_PATH);
            }
        }
        Err(err) => eprintln!("{LOG_LEVEL_VAR}: {err}"),
    }
}
