/// Human-readable "last synced" label.
///
/// Both arguments are milliseconds since the Unix epoch.
pub fn sync_label(last_synced_at: Option<i64>, now: i64) -> String {
    let Some(last) = last_synced_at else {
        return "Not synced yet".to_string();
    };

    let seconds_ago = (now - last).max(0) / 1000;
    if seconds_ago < 5 {
        return "Just synced".to_string();
    }
    if seconds_ago < 60 {
        return format!("Synced {} seconds ago", seconds_ago);
    }
    let minutes = seconds_ago / 60;
    format!(
        "Synced {} minute{} ago",
        minutes,
        if minutes == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_never_synced() {
        assert_eq!(sync_label(None, NOW), "Not synced yet");
    }

    #[test]
    fn test_just_synced() {
        assert_eq!(sync_label(Some(NOW - 4_999), NOW), "Just synced");
        // Clock skew into the future still reads as fresh
        assert_eq!(sync_label(Some(NOW + 10_000), NOW), "Just synced");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(sync_label(Some(NOW - 30_000), NOW), "Synced 30 seconds ago");
    }

    #[test]
    fn test_minutes() {
        assert_eq!(sync_label(Some(NOW - 60_000), NOW), "Synced 1 minute ago");
        assert_eq!(sync_label(Some(NOW - 185_000), NOW), "Synced 3 minutes ago");
    }
}
