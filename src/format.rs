/// Render whole minutes as a plain number
pub fn format_minutes(minutes: u32) -> String {
    minutes.to_string()
}

/// Render seconds as `mm:ss`. Minutes are not folded into hours.
pub fn format_seconds(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
