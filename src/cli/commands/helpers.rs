//! Shared output and parsing helpers for CLI commands.

use console::style;

use quatrains::models::{parse_link, QuatrainId};
use quatrains::search::SearchOutcome;
use quatrains::viewer::{Rendered, ViewUpdate};

/// Accept `C:N` or a deep link.
pub fn parse_target(target: &str) -> quatrains::Result<QuatrainId> {
    let trimmed = target.trim();
    if trimmed.contains('/') {
        parse_link(trimmed)
    } else {
        trimmed.parse()
    }
}

/// Accept either `<century> <number>` as two arguments or one target.
pub fn parse_target_args(args: &[String]) -> quatrains::Result<QuatrainId> {
    match args {
        [century, number] => parse_target(&format!("{}:{}", century, number)),
        _ => parse_target(&args.join(" ")),
    }
}

/// Print a displayed quatrain.
pub fn print_rendered(rendered: &Rendered) {
    let view = &rendered.view;
    println!();
    println!("{}", style(&view.title).bold().yellow());
    println!("{}", style(&rendered.link).dim());
    println!();
    for line in &view.lines {
        println!("  {}", style(&line.french).italic());
    }
    println!();
    for line in &view.lines {
        println!("  {}", line.english);
    }
    if !view.interpretation.is_empty() {
        println!();
        println!("{} {}", style("Interpretation:").cyan(), view.interpretation);
    }
    if let Some(ref video) = view.video {
        println!("{} {}", style("Video:").cyan(), video.src);
    }
    if let Some(ref image) = view.image {
        println!("{} {}", style("Image:").cyan(), image.src);
    }

    let prev = if rendered.nav.prev_disabled {
        style("[prev]").dim()
    } else {
        style("[prev]").green()
    };
    let next = if rendered.nav.next_disabled {
        style("[next]").dim()
    } else {
        style("[next]").green()
    };
    println!();
    println!("{} {}", prev, next);
}

/// Print search results, or the empty-result indicator.
pub fn print_outcome(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Hidden => {}
        SearchOutcome::NoMatches => {
            println!(
                "{} No matches. Try \"comet\" or \"guerre\"?",
                style("!").yellow()
            );
        }
        SearchOutcome::Results(hits) => {
            for (i, hit) in hits.iter().enumerate() {
                println!(
                    "{:>3}. {} {}",
                    i + 1,
                    style(hit.heading()).bold().yellow(),
                    style(format!("({:.2})", hit.score)).dim()
                );
                println!("     {}", hit.excerpt);
                println!("     {}", style(&hit.link).dim());
            }
        }
    }
}

/// Print a viewer update for interactive use.
pub fn print_update(update: &ViewUpdate) {
    match update {
        ViewUpdate::QuatrainList { century, numbers } => {
            let preview: Vec<String> = numbers.iter().take(12).map(u32::to_string).collect();
            let more = if numbers.len() > preview.len() { " ..." } else { "" };
            println!(
                "{} Century {}: {} quatrains [{}{}]",
                style("✓").green(),
                century,
                numbers.len(),
                preview.join(", "),
                more
            );
        }
        ViewUpdate::LoadEnabled(true) => println!("  {} ready to load", style("→").cyan()),
        ViewUpdate::LoadEnabled(false) => println!("  {} no quatrain selected", style("!").yellow()),
        ViewUpdate::Display(rendered) => print_rendered(rendered),
        ViewUpdate::Notice(message) => println!("{} {}", style("!").yellow(), message),
        ViewUpdate::Alert(message) => eprintln!("{} {}", style("✗").red(), message),
        ViewUpdate::Unchanged => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_forms() {
        let expected = QuatrainId::from_parts(3, 7).unwrap();
        assert_eq!(parse_target("3:7").unwrap(), expected);
        assert_eq!(parse_target("/c3/q007/").unwrap(), expected);
        assert_eq!(parse_target("https://example.com/c3/q007/").unwrap(), expected);
        assert!(parse_target("11:1").is_err());
        assert!(parse_target("nonsense").is_err());
    }

    #[test]
    fn test_parse_target_args() {
        let expected = QuatrainId::from_parts(10, 42).unwrap();
        let two = vec!["10".to_string(), "42".to_string()];
        assert_eq!(parse_target_args(&two).unwrap(), expected);
        assert_eq!(parse_target_args(&["10:42".to_string()]).unwrap(), expected);
        assert!(parse_target_args(&["0".to_string(), "1".to_string()]).is_err());
    }
}
