use std::collections::VecDeque;
use std::io::{self, Write};

use guard_logging::guard_warn;
use phishguard_core::{update, AppState, Effect, Msg};
use phishguard_engine::{AnalyzerSettings, EngineHandle};
use phishguard_report::ScanKind;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::persistence::HistoryStore;
use super::render;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Scan(ScanKind, String),
    Search(String),
    History,
    Show(usize),
    Open(usize),
    ClearHistory,
    Reset,
    Help,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        guard_warn!("GEMINI_API_KEY is not set; scans will fail");
        println!("Note: GEMINI_API_KEY is not set; scans will fail until it is.");
    }
    let engine = EngineHandle::new(AnalyzerSettings::new(api_key))?;
    let runner = EffectRunner::new(engine, HistoryStore::at_default_location());

    let mut state = AppState::new();
    state = dispatch(state, Msg::HistoryRestored(runner.load_history()), &runner);
    let _ = state.consume_dirty();

    render::welcome();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                render::unknown(line.trim());
            }
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => render::help(),
            Command::History => render::history(&state.view()),
            Command::Scan(kind, text) => {
                state = dispatch(state, Msg::TabSelected(kind), &runner);
                state = dispatch(state, Msg::InputChanged(kind, text), &runner);
                state = dispatch(state, Msg::ScanSubmitted, &runner);
                if state.consume_dirty() {
                    render::view(&state.view());
                }
            }
            Command::Search(term) => {
                state = dispatch(state, Msg::SearchTermChanged(term), &runner);
                let _ = state.consume_dirty();
                render::history(&state.view());
            }
            Command::Show(index) => match entry_id(&state, index) {
                Some(id) => {
                    state = dispatch(state, Msg::HistoryEntrySelected { id }, &runner);
                    if state.consume_dirty() {
                        render::view(&state.view());
                    }
                }
                None => println!("No history entry {index}."),
            },
            Command::Open(index) => match entry_id(&state, index) {
                Some(id) => {
                    state = dispatch(state, Msg::HistoryEntryToggled { id }, &runner);
                    let _ = state.consume_dirty();
                    render::history(&state.view());
                }
                None => println!("No history entry {index}."),
            },
            Command::ClearHistory => {
                state = dispatch(state, Msg::ClearHistoryClicked, &runner);
                let _ = state.consume_dirty();
                println!("History cleared.");
            }
            Command::Reset => {
                state = dispatch(state, Msg::ResetClicked, &runner);
                let _ = state.consume_dirty();
                println!("Inputs and result cleared.");
            }
        }
    }

    Ok(())
}

/// Applies a message through the pure update, runs its effects, and feeds
/// any follow-up messages (analysis completions) back through.
fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let mut state = state;
    let mut queue = VecDeque::from([msg]);
    while let Some(msg) = queue.pop_front() {
        let (next, effects) = update(state, msg);
        state = next;
        for effect in &effects {
            if let Effect::Analyze { kind, .. } = effect {
                render::scanning(*kind);
            }
        }
        queue.extend(runner.run(effects));
    }
    state
}

/// Index is 1-based into the currently filtered history view.
fn entry_id(state: &AppState, index: usize) -> Option<String> {
    state
        .view()
        .history
        .get(index.checked_sub(1)?)
        .map(|row| row.id.clone())
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "detect" => Some(Command::Scan(ScanKind::Content, rest.to_string())),
        "url" => Some(Command::Scan(ScanKind::Url, rest.to_string())),
        "simulate" => Some(Command::Scan(ScanKind::Simulation, rest.to_string())),
        "search" => Some(Command::Search(rest.to_string())),
        "history" => Some(Command::History),
        "show" => rest.parse().ok().map(Command::Show),
        "open" => rest.parse().ok().map(Command::Open),
        "clear-history" => Some(Command::ClearHistory),
        "reset" => Some(Command::Reset),
        "help" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scan_commands_with_their_payload() {
        assert_eq!(
            parse_command("detect verify your account now"),
            Some(Command::Scan(
                ScanKind::Content,
                "verify your account now".to_string()
            ))
        );
        assert_eq!(
            parse_command("url google.com"),
            Some(Command::Scan(ScanKind::Url, "google.com".to_string()))
        );
        assert_eq!(
            parse_command("simulate your mailbox is full"),
            Some(Command::Scan(
                ScanKind::Simulation,
                "your mailbox is full".to_string()
            ))
        );
    }

    #[test]
    fn scan_commands_without_payload_carry_an_empty_input() {
        // The core silently ignores blank submissions.
        assert_eq!(
            parse_command("detect"),
            Some(Command::Scan(ScanKind::Content, String::new()))
        );
    }

    #[test]
    fn parses_history_commands() {
        assert_eq!(parse_command("history"), Some(Command::History));
        assert_eq!(parse_command("show 3"), Some(Command::Show(3)));
        assert_eq!(parse_command("open 1"), Some(Command::Open(1)));
        assert_eq!(
            parse_command("search critical"),
            Some(Command::Search("critical".to_string()))
        );
        assert_eq!(
            parse_command("search"),
            Some(Command::Search(String::new()))
        );
        assert_eq!(parse_command("clear-history"), Some(Command::ClearHistory));
    }

    #[test]
    fn rejects_blank_and_unknown_input() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("frobnicate"), None);
        assert_eq!(parse_command("show many"), None);
    }
}
