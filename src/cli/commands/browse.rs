//! Interactive browser.
//!
//! Reads commands from stdin and drives a `Viewer` and a `SearchPanel`.
//! Search input is debounced; results arrive between commands.

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use quatrains::config::Settings;
use quatrains::models::QuatrainId;
use quatrains::search::{IndexHandle, SearchHit, SearchOutcome, SearchPanel};
use quatrains::viewer::{RenderOptions, UiEvent, ViewUpdate, Viewer};

use super::helpers::{parse_target, print_outcome, print_update};

/// One line of browser input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Event(UiEvent),
    /// Search box contents (may be empty to clear).
    Search(String),
    /// Open the Nth result of the last search (1-based).
    OpenResult(usize),
    Go(QuatrainId),
    Help,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if let Some(query) = line.strip_prefix('/') {
        return Input::Search(query.to_string());
    }
    if line.is_empty() {
        return Input::Event(UiEvent::Enter);
    }

    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, Some(arg.trim())),
        None => (line, None),
    };
    let number = arg.and_then(|a| a.parse::<u32>().ok());

    match (cmd.to_lowercase().as_str(), arg) {
        ("c" | "century", Some(_)) => match number {
            Some(n) => Input::Event(UiEvent::SelectCentury(n)),
            None => Input::Invalid(line.to_string()),
        },
        ("q" | "quatrain", None) => Input::Event(UiEvent::SelectQuatrain(None)),
        ("q" | "quatrain", Some(_)) => match number {
            Some(n) => Input::Event(UiEvent::SelectQuatrain(Some(n))),
            None => Input::Invalid(line.to_string()),
        },
        ("l" | "load", None) => Input::Event(UiEvent::Load),
        ("n" | "next", None) => Input::Event(UiEvent::Next),
        ("p" | "prev" | "previous", None) => Input::Event(UiEvent::Previous),
        ("r" | "random", None) => Input::Event(UiEvent::Random),
        ("o" | "open", Some(a)) => match a.parse::<usize>() {
            Ok(n) if n > 0 => Input::OpenResult(n),
            _ => Input::Invalid(line.to_string()),
        },
        ("g" | "go", Some(a)) => match parse_target(a) {
            Ok(id) => Input::Go(id),
            Err(_) => Input::Invalid(line.to_string()),
        },
        ("h" | "help" | "?", None) => Input::Help,
        ("exit" | "quit", None) => Input::Quit,
        _ => Input::Invalid(line.to_string()),
    }
}

fn print_help() {
    println!("{}", style("Commands").bold());
    println!("  c <N>        select century N (1-10)");
    println!("  q [N]        select quatrain N (no number clears)");
    println!("  load, Enter  show the selected quatrain");
    println!("  n, p         next / previous quatrain");
    println!("  r            random quatrain");
    println!("  /<text>      search (runs once typing pauses)");
    println!("  open <N>     open the Nth search result");
    println!("  go <C:N>     open a quatrain by id or deep link");
    println!("  quit");
}

/// Run the interactive browser.
pub async fn cmd_browse(settings: &Settings, start: Option<&str>) -> anyhow::Result<()> {
    let source = settings.source()?;
    let options = RenderOptions {
        image_base: settings.image_base.clone(),
    };
    let mut viewer = Viewer::new(source.clone(), options);
    let mut panel = SearchPanel::new(
        IndexHandle::spawn(source.clone(), settings.search.clone()),
        settings.search.debounce,
    );
    let mut rng = rand::thread_rng();
    let mut last_hits: Vec<SearchHit> = Vec::new();

    println!(
        "{} Browsing {} (type {} for commands)",
        style("→").cyan(),
        source.describe(),
        style("help").bold()
    );

    if let Some(target) = start {
        let id = parse_target(target)?;
        let update = viewer.handle(UiEvent::Open(id), &mut rng).await;
        print_update(&update);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Input::Event(event) => {
                        let update = viewer.handle(event, &mut rng).await;
                        print_update(&update);
                    }
                    Input::Search(text) => panel.input(&text),
                    Input::OpenResult(n) => match last_hits.get(n - 1) {
                        Some(hit) => {
                            let update = viewer.handle(UiEvent::Open(hit.id), &mut rng).await;
                            print_update(&update);
                        }
                        None => print_update(&ViewUpdate::Notice(format!("No search result {}", n))),
                    },
                    Input::Go(id) => {
                        let update = viewer.handle(UiEvent::Open(id), &mut rng).await;
                        print_update(&update);
                    }
                    Input::Help => print_help(),
                    Input::Quit => break,
                    Input::Invalid(text) => {
                        println!("{} Unknown command: {}", style("!").yellow(), text);
                    }
                }
            }
            Some(query) = panel.next_settled() => {
                match panel.evaluate(&query).await {
                    Ok(outcome) => {
                        print_outcome(&outcome);
                        last_hits = match outcome {
                            SearchOutcome::Results(hits) => hits,
                            _ => Vec::new(),
                        };
                    }
                    Err(e) => {
                        tracing::error!("Search unavailable: {}", e);
                        println!("{} Search unavailable", style("✗").red());
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        assert_eq!(parse_input("c 3"), Input::Event(UiEvent::SelectCentury(3)));
        assert_eq!(parse_input("q 12"), Input::Event(UiEvent::SelectQuatrain(Some(12))));
        assert_eq!(parse_input("q"), Input::Event(UiEvent::SelectQuatrain(None)));
        assert_eq!(parse_input(""), Input::Event(UiEvent::Enter));
        assert_eq!(parse_input("load"), Input::Event(UiEvent::Load));
        assert_eq!(parse_input("N"), Input::Event(UiEvent::Next));
        assert_eq!(parse_input("prev"), Input::Event(UiEvent::Previous));
        assert_eq!(parse_input("random"), Input::Event(UiEvent::Random));
    }

    #[test]
    fn test_parse_search_and_open() {
        assert_eq!(parse_input("/comet fire"), Input::Search("comet fire".into()));
        assert_eq!(parse_input("/"), Input::Search(String::new()));
        assert_eq!(parse_input("open 2"), Input::OpenResult(2));
        assert_eq!(
            parse_input("go /c3/q007/"),
            Input::Go(QuatrainId::from_parts(3, 7).unwrap())
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(parse_input("c x"), Input::Invalid(_)));
        assert!(matches!(parse_input("open 0"), Input::Invalid(_)));
        assert!(matches!(parse_input("dance"), Input::Invalid(_)));
    }
}
