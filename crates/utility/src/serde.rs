/// Serializes a `chrono::Duration` as an ISO 8601 duration, e.g. `P1DT2H3M4S`.
///
/// Only whole seconds are kept. A zero (or negative) duration is written as
/// `PT0S`.
pub mod iso8601 {
    use chrono::Duration;
    use serde::Serializer;

    pub fn format(duration: &Duration) -> String {
        let total_seconds = duration.num_seconds().max(0);
        let days = total_seconds / 86_400;
        let hours = (total_seconds % 86_400) / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        let mut formatted = String::from("P");
        if days > 0 {
            formatted.push_str(&format!("{}D", days));
        }
        formatted.push('T');
        if hours > 0 {
            formatted.push_str(&format!("{}H", hours));
        }
        if minutes > 0 {
            formatted.push_str(&format!("{}M", minutes));
        }
        if seconds > 0 || (hours == 0 && minutes == 0) {
            formatted.push_str(&format!("{}S", seconds));
        }
        formatted
    }

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(duration))
    }

}
