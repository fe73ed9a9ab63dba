//! Simple CLI for exercising the 2-3 tree.
//!
//! Usage:
//!   tree23_cli <command> [args...] [<command> [args...]]...
//!   tree23_cli menu
//!
//! Commands run in order against one fresh tree of integer keys:
//!   add <key>, remove <key>, search <key>, size, empty, clear, min, max,
//!   show, traverse <in|pre|post>, dump, check
//!
//! `menu` starts the interactive numbered menu on stdin.

use std::io::{self, BufRead, Write};
use std::process::exit;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tree23::{Order, Result, Tree23, TreeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Add(i64),
    Remove(i64),
    Search(i64),
    Size,
    Empty,
    Clear,
    Min,
    Max,
    Show,
    Traverse(Order),
    Dump,
    Check,
}

fn parse_key(input: &str) -> Result<i64> {
    input
        .trim()
        .parse()
        .map_err(|_| TreeError::invalid_key(input.trim()))
}

/// Parse a command line into a sequence of commands
fn parse_commands(args: &[String]) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    let mut args = args.iter();

    while let Some(name) = args.next() {
        let mut argument = || {
            args.next()
                .ok_or_else(|| TreeError::MissingArgument(name.clone()))
        };
        let command = match name.as_str() {
            "add" => Command::Add(parse_key(argument()?)?),
            "remove" => Command::Remove(parse_key(argument()?)?),
            "search" => Command::Search(parse_key(argument()?)?),
            "traverse" => Command::Traverse(argument()?.parse()?),
            "size" => Command::Size,
            "empty" => Command::Empty,
            "clear" => Command::Clear,
            "min" => Command::Min,
            "max" => Command::Max,
            "show" => Command::Show,
            "dump" => Command::Dump,
            "check" => Command::Check,
            other => return Err(TreeError::unknown_command(other)),
        };
        commands.push(command);
    }

    Ok(commands)
}

fn format_keys(tree: &Tree23<i64>, order: Order) -> String {
    if tree.is_empty() {
        return "The tree is empty...".to_string();
    }
    tree.traverse(order)
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_extreme(key: Option<&i64>) -> String {
    key.map_or_else(|| "none".to_string(), |key| key.to_string())
}

fn run(tree: &mut Tree23<i64>, command: Command, out: &mut impl Write) -> io::Result<()> {
    match command {
        Command::Add(key) => {
            let added = tree.add(key);
            writeln!(out, "{}", if added { "ADDED" } else { "DUPLICATE" })
        }
        Command::Remove(key) => {
            let removed = tree.remove(&key);
            writeln!(out, "{}", if removed { "REMOVED" } else { "NOT_FOUND" })
        }
        Command::Search(key) => {
            let found = tree.search(&key);
            writeln!(out, "{}", if found { "FOUND" } else { "NOT_FOUND" })
        }
        Command::Size => writeln!(out, "size: {}", tree.size()),
        Command::Empty => writeln!(out, "empty: {}", tree.is_empty()),
        Command::Clear => {
            tree.clear();
            writeln!(out, "CLEARED")
        }
        Command::Min => writeln!(out, "min: {}", format_extreme(tree.find_min())),
        Command::Max => writeln!(out, "max: {}", format_extreme(tree.find_max())),
        Command::Show => {
            for order in Order::ALL {
                writeln!(out, "{}: {}", order, format_keys(tree, order))?;
            }
            Ok(())
        }
        Command::Traverse(order) => writeln!(out, "{}: {}", order, format_keys(tree, order)),
        Command::Dump => {
            let json = serde_json::to_string_pretty(&tree.export()).map_err(io::Error::other)?;
            writeln!(out, "{}", json)
        }
        Command::Check => match tree.check_invariants() {
            Ok(()) => writeln!(out, "OK"),
            Err(e) => writeln!(out, "INVALID: {}", e),
        },
    }
}

const MENU: &str = "
2-3 Tree Operations:
1) Insert new element
2) Remove element
3) Search element
4) Size tree
5) Check empty
6) Clear tree
7) Get minimum value
8) Get maximum value
9) Display tree
10) Exit...
";

fn prompt(input: &mut impl BufRead, out: &mut impl Write, message: &str) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Interactive numbered menu. Returns when the user exits or stdin closes.
fn menu(tree: &mut Tree23<i64>, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
    loop {
        writeln!(out, "{}", MENU)?;
        let Some(line) = prompt(input, out, "Enter your choice: ")? else {
            return Ok(());
        };
        let choice = match line.trim().parse::<u8>() {
            Ok(choice) => choice,
            Err(_) => {
                writeln!(out, "The value entered is invalid. Try again.")?;
                continue;
            }
        };

        let command = match choice {
            1 | 2 | 3 => {
                if choice != 1 && tree.is_empty() {
                    writeln!(out, "The tree is empty...")?;
                    continue;
                }
                let verb = match choice {
                    1 => "insert",
                    2 => "remove",
                    _ => "search",
                };
                let message = format!("Enter integer element to {}: ", verb);
                let Some(line) = prompt(input, out, &message)? else {
                    return Ok(());
                };
                match parse_key(&line) {
                    Ok(key) if choice == 1 => Command::Add(key),
                    Ok(key) if choice == 2 => Command::Remove(key),
                    Ok(key) => Command::Search(key),
                    Err(e) => {
                        writeln!(out, "{}. Try again.", e)?;
                        continue;
                    }
                }
            }
            4 => Command::Size,
            5 => Command::Empty,
            6 => Command::Clear,
            7 => Command::Min,
            8 => Command::Max,
            9 => Command::Show,
            10 => return Ok(()),
            _ => {
                writeln!(out, "Wrong Entry!")?;
                continue;
            }
        };
        run(tree, command, out)?;
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tree23=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        eprintln!("Usage: tree23_cli <command> [args...] [<command> [args...]]...");
        eprintln!("       tree23_cli menu");
        eprintln!("Commands:");
        eprintln!("  add <key>         - Insert a key");
        eprintln!("  remove <key>      - Remove a key");
        eprintln!("  search <key>      - Check whether a key is present");
        eprintln!("  size | empty      - Show key count / emptiness");
        eprintln!("  clear             - Remove all keys");
        eprintln!("  min | max         - Show the smallest / largest key");
        eprintln!("  show              - Show all three traversals");
        eprintln!("  traverse <order>  - Show one traversal (in, pre, post)");
        eprintln!("  dump              - Print the node structure as JSON");
        eprintln!("  check             - Validate the tree invariants");
        exit(1);
    }

    let mut tree = Tree23::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.len() == 1 && args[0] == "menu" {
        let stdin = io::stdin();
        if let Err(e) = menu(&mut tree, &mut stdin.lock(), &mut out) {
            eprintln!("ERROR: {}", e);
            exit(1);
        }
        return;
    }

    let commands = match parse_commands(&args) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            exit(1);
        }
    };

    for command in commands {
        if let Err(e) = run(&mut tree, command, &mut out) {
            eprintln!("ERROR: {}", e);
            exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn run_all(line: &str) -> String {
        let mut tree = Tree23::new();
        let mut out = Vec::new();
        for command in parse_commands(&args(line)).unwrap() {
            run(&mut tree, command, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_commands(&args("add 5 remove -3 traverse pre size")).unwrap(),
            vec![
                Command::Add(5),
                Command::Remove(-3),
                Command::Traverse(Order::PreOrder),
                Command::Size
            ]
        );
        assert_eq!(
            parse_commands(&args("add x")),
            Err(TreeError::InvalidKey("x".to_string()))
        );
        assert_eq!(
            parse_commands(&args("search")),
            Err(TreeError::MissingArgument("search".to_string()))
        );
        assert_eq!(
            parse_commands(&args("frobnicate")),
            Err(TreeError::UnknownCommand("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_batch_run() {
        let output = run_all("add 10 add 20 add 5 add 10 min max remove 10 search 10 size traverse in");
        assert_eq!(
            output,
            "ADDED\nADDED\nADDED\nDUPLICATE\nmin: 5\nmax: 20\nREMOVED\nNOT_FOUND\nsize: 2\nin-order: 5 20\n"
        );
    }

    #[test]
    fn test_empty_tree_output() {
        let output = run_all("min show check");
        assert_eq!(
            output,
            "min: none\nin-order: The tree is empty...\npre-order: The tree is empty...\npost-order: The tree is empty...\nOK\n"
        );
    }

    #[test]
    fn test_menu_session() {
        let mut tree = Tree23::new();
        let mut input = io::Cursor::new("1\n4\n1\nabc\n2\n4\n4\n10\n");
        let mut out = Vec::new();
        menu(&mut tree, &mut input, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("ADDED"));
        assert!(output.contains("invalid key: abc. Try again."));
        assert!(output.contains("REMOVED"));
        assert!(output.contains("size: 0"));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_menu_rejects_non_numeric_choice() {
        let mut tree = Tree23::new();
        let mut input = io::Cursor::new("two\n3\n");
        let mut out = Vec::new();
        menu(&mut tree, &mut input, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("The value entered is invalid. Try again."));
        assert!(output.contains("The tree is empty..."));
    }
}
