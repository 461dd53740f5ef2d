use chrono::Local;
use phishguard_core::{AppViewModel, HistoryRowView, Tone};
use phishguard_report::{AnalysisResult, ScanKind};

pub(crate) fn welcome() {
    println!("PhishGuard — AI phishing analysis");
    println!("Type 'help' for commands.");
    println!();
}

pub(crate) fn help() {
    println!("Commands:");
    println!("  detect <text>     analyze a suspicious message");
    println!("  url <url>         verify a URL with real-time intelligence");
    println!("  simulate <text>   critique a drafted training message");
    println!("  search [term]     filter the history (no term clears the filter)");
    println!("  history           show the scan history");
    println!("  show <n>          redisplay the result of history entry n");
    println!("  open <n>          expand/collapse the threat breakdown of entry n");
    println!("  clear-history     wipe the scan history");
    println!("  reset             clear inputs, result and error");
    println!("  quit              exit");
}

pub(crate) fn unknown(input: &str) {
    println!("Unknown command '{input}'. Type 'help' for commands.");
}

pub(crate) fn scanning(kind: ScanKind) {
    match kind {
        ScanKind::Url => println!("Fetching real-time threat intelligence..."),
        ScanKind::Content | ScanKind::Simulation => println!("Analyzing..."),
    }
}

pub(crate) fn view(view: &AppViewModel) {
    if let Some(error) = &view.error {
        println!("! {error}");
        return;
    }
    if let Some(result) = &view.result {
        result_card(result);
    }
}

pub(crate) fn history(view: &AppViewModel) {
    if view.history_total == 0 {
        println!("No scan history yet.");
        return;
    }
    if view.history.is_empty() {
        println!(
            "No history entries match \"{}\" ({} total).",
            view.search_term, view.history_total
        );
        return;
    }
    if !view.search_term.trim().is_empty() {
        println!(
            "Showing {} of {} entries for \"{}\":",
            view.history.len(),
            view.history_total,
            view.search_term
        );
    }
    for (index, row) in view.history.iter().enumerate() {
        history_row(index + 1, row);
    }
}

fn history_row(index: usize, row: &HistoryRowView) {
    let time = row.timestamp.with_timezone(&Local).format("%H:%M:%S");
    let tag = if row.is_simulation {
        "Simulation".to_string()
    } else {
        format!("{} Risk", row.risk_label)
    };
    println!(
        "{:>2}. [{}] {} ({}) \"{}\"",
        index,
        tone_marker(row.tone),
        tag,
        time,
        row.excerpt
    );
    if row.expanded {
        if row.threats.is_empty() {
            println!("      no detailed threats recorded");
        }
        for threat in &row.threats {
            println!(
                "      - {} [{}]: {}",
                threat.name, threat.severity, threat.description
            );
        }
    }
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Safe => "safe",
        Tone::Caution => "caution",
        Tone::Elevated => "elevated",
        Tone::Severe => "SEVERE",
        Tone::Training => "training",
    }
}

fn result_card(result: &AnalysisResult) {
    println!();
    if result.is_simulation {
        println!("=== Simulation Analysis Data ===");
        println!("Deception score: {}/100", result.confidence_score);
    } else {
        println!("=== Verified Security Findings ===");
        let verdict = if result.is_phishing {
            "PHISHING"
        } else {
            "no phishing detected"
        };
        println!(
            "Verdict: {} — risk {}/100, level {}",
            verdict, result.confidence_score, result.risk_level
        );
    }
    println!("Summary: {}", result.summary);

    if !result.threats_detected.is_empty() {
        println!("Threats:");
        for threat in &result.threats_detected {
            println!(
                "  - {} [{}]: {}",
                threat.name, threat.severity, threat.description
            );
        }
    }

    if !result.extracted_links.is_empty() {
        println!("Links:");
        for link in &result.extracted_links {
            if link.is_suspicious {
                println!("  - {} — suspicious: {}", link.url, link.reason);
            } else {
                println!("  - {}", link.url);
            }
        }
    }

    if !result.recommendations.is_empty() {
        println!("Recommendations:");
        for recommendation in &result.recommendations {
            println!("  - {recommendation}");
        }
    }

    if !result.grounding_sources.is_empty() {
        println!("Sources:");
        for source in &result.grounding_sources {
            println!("  - {} <{}>", source.title, source.uri);
        }
    }

    let analyzed = result.analyzed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
    println!("Analyzed at: {analyzed}");
    println!();
}
