use phishguard_report::ScanHistoryItem;

/// Maximum number of history entries kept and persisted.
pub const HISTORY_LIMIT: usize = 10;

/// Length of the stored content excerpt, in characters.
pub const EXCERPT_CHARS: usize = 100;

/// First [`EXCERPT_CHARS`] characters of the raw submitted input.
pub fn excerpt(raw: &str) -> String {
    raw.chars().take(EXCERPT_CHARS).collect()
}

/// Prepends `item` and truncates to the [`HISTORY_LIMIT`] most recent
/// entries. The returned list is the new persisted snapshot; entries are
/// never mutated in place.
pub fn record(mut history: Vec<ScanHistoryItem>, item: ScanHistoryItem) -> Vec<ScanHistoryItem> {
    history.insert(0, item);
    history.truncate(HISTORY_LIMIT);
    history
}

/// Case-insensitive history filter.
///
/// An entry matches when the lowered term is a substring of its content
/// excerpt, of its risk-level label, or (for simulation entries) of the
/// literal word "simulation". A blank term returns everything. Relative
/// order is preserved.
pub fn filter_history<'a>(items: &'a [ScanHistoryItem], term: &str) -> Vec<&'a ScanHistoryItem> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            item.content.to_lowercase().contains(&needle)
                || item
                    .result
                    .risk_level
                    .label()
                    .to_lowercase()
                    .contains(&needle)
                || (item.result.is_simulation && "simulation".contains(&needle))
        })
        .collect()
}
