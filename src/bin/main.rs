use autocomplete_core::{completion_suffix, AutocompleteEngine, EngineConfig};
use crossterm::style::Stylize;
use std::io::{stdin, stdout, Write};
use std::path::Path;
use tracing::{warn, Level};

const DICTIONARY_PATH: &str = "dictionary.txt";

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::INFO)
        .init();

    let mut args = std::env::args().skip(1);
    let dictionary = args.next().unwrap_or_else(|| DICTIONARY_PATH.to_string());
    let config = match args.next() {
        Some(path) => EngineConfig::from_json_file(Path::new(&path)).unwrap_or_else(|e| {
            warn!(path = %path, error = %e, "could not read config, using defaults");
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    };

    let mut engine = AutocompleteEngine::from_file_or_new(&dictionary, config);

    println!("{}", "Trie Autocomplete Console".bold());
    println!("Type text to get a completion for its last word.");
    println!("Commands: :add <word> [freq], :pick <word>, :top <prefix> [k],");
    println!("          :fuzzy <word> [edits] [k], :dump, :exit\n");

    let mut input = String::new();
    loop {
        print!("> ");
        stdout().flush()?;
        input.clear();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line == ":exit" {
            break;
        }
        if let Some(command) = line.strip_prefix(':') {
            run_command(&mut engine, command);
        } else if let Some(word) = line.split_whitespace().last() {
            show_suggestion(&engine, word);
        }
    }

    println!("\nSaving dictionary...");
    match engine.save_dictionary() {
        Ok(()) => println!("Dictionary saved to '{}'", dictionary),
        Err(e) => eprintln!("{} Could not save dictionary: {}", "[ERROR]".red(), e),
    }
    Ok(())
}

fn show_suggestion(engine: &AutocompleteEngine, word: &str) {
    match engine.best_suggestion(word) {
        Some(suggestion) => {
            let suffix = completion_suffix(word, &suggestion);
            println!("  {}{}   ({})", word, suffix.dark_grey(), suggestion.as_str().green());
        }
        None => println!("  {}", "no suggestion".dark_grey()),
    }
}

fn run_command(engine: &mut AutocompleteEngine, command: &str) {
    let parts: Vec<&str> = command.split_whitespace().collect();
    let number = |i: usize, default: usize| parts.get(i).and_then(|s| s.parse().ok()).unwrap_or(default);

    match parts.as_slice() {
        ["add", word, ..] => {
            let frequency = parts.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);
            engine.insert(word, frequency);
            println!("  added '{}' ({})", word, frequency);
        }
        ["pick", word] => {
            if engine.log_selection(word) {
                println!("  '{}' now at {}", word, engine.frequency(word).unwrap_or_default());
            } else {
                println!("  '{}' is not in the dictionary", word);
            }
        }
        ["top", prefix, ..] => {
            for (i, word) in engine.top_k_with_prefix(prefix, number(2, 5)).iter().enumerate() {
                println!("  {}: {}", i + 1, word);
            }
        }
        ["fuzzy", word, ..] => {
            let max_edits = number(2, engine.config().max_edits);
            for m in engine.top_k_fuzzy_matches(word, max_edits, number(3, 5)) {
                println!(
                    "  {} (freq: {}, dist: {}, score: {})",
                    m.word.as_str().green(),
                    m.frequency,
                    m.edit_distance,
                    m.score
                );
            }
        }
        ["dump"] => print!("{}", engine.trie().dump()),
        _ => println!("  unknown command: {}", command),
    }
}
