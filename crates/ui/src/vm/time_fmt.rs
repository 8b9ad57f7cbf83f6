use chrono::{DateTime, Local, Utc};

/// Wall-clock rendering used on screen and in the result log.
#[must_use]
pub fn format_local(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn renders_seconds_precision() {
        let text = format_local(fixed_now());
        assert_eq!(text.len(), "2023-11-14 22:13:20".len());
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[10..11], " ");
    }
}
