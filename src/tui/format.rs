// Text helpers for panel labels

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Whole units, truncated: 1536 -> "1kb".
pub fn mem_as_string(val: u64) -> String {
    match val {
        v if v >= TB => format!("{}tb", v / TB),
        v if v >= GB => format!("{}gb", v / GB),
        v if v >= MB => format!("{}mb", v / MB),
        v if v >= KB => format!("{}kb", v / KB),
        v => format!("{}b", v),
    }
}

/// Byte delta that may be negative after a counter reset.
pub fn signed_mem_as_string(val: i64) -> String {
    if val < 0 {
        format!("-{}", mem_as_string(val.unsigned_abs()))
    } else {
        mem_as_string(val as u64)
    }
}

/// `[idx] name:id`, cut to `max_len` chars with a trailing "...".
pub fn list_name(index: usize, name: &str, id: &str, max_len: usize) -> String {
    let s = format!("[{}] {}:{}", index, name, id);
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s
    }
}

/// History capacity for a terminal of `width` columns.
pub fn history_capacity(width: u16) -> usize {
    usize::from(width.saturating_sub(2)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_as_string_truncates_to_whole_units() {
        assert_eq!(mem_as_string(0), "0b");
        assert_eq!(mem_as_string(1023), "1023b");
        assert_eq!(mem_as_string(1536), "1kb");
        assert_eq!(mem_as_string(5 * MB + 1), "5mb");
        assert_eq!(mem_as_string(3 * GB), "3gb");
        assert_eq!(mem_as_string(2 * TB), "2tb");
    }

    #[test]
    fn signed_mem_as_string_keeps_sign() {
        assert_eq!(signed_mem_as_string(-2048), "-2kb");
        assert_eq!(signed_mem_as_string(100), "100b");
        assert_eq!(signed_mem_as_string(i64::MIN), "-8388608tb");
    }

    #[test]
    fn list_name_truncates_long_entries() {
        assert_eq!(list_name(0, "/web", "abc", 30), "[0] /web:abc");
        let long = list_name(3, "database", "0123456789abcdef0123456789", 30);
        assert_eq!(long.chars().count(), 30);
        assert!(long.starts_with("[3] database:"));
        assert!(long.ends_with("..."));
    }

    #[test]
    fn history_capacity_never_below_one() {
        assert_eq!(history_capacity(0), 1);
        assert_eq!(history_capacity(2), 1);
        assert_eq!(history_capacity(80), 78);
    }
}
