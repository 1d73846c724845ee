use uuid::Uuid;

/// A task identifier of the form `<microseconds>_<hex suffix>`.
///
/// IDs sort lexicographically in creation order because the decimal prefix
/// never grows shorter over time and `_` (0x5F) sorts after every decimal
/// digit, so two IDs with differing prefixes compare in numeric time order
/// under plain byte comparison.
pub fn generate(now_micros: u64) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{now_micros}_{suffix}")
}

/// Parse the microsecond timestamp embedded in a task ID's prefix (the
/// characters before the first `_`). Returns `None` for anything that
/// doesn't match `^[0-9]+_[0-9a-f]{12,}$` — the reclaimer treats such a name
/// as foreign rather than corrupt and skips it.
pub fn parse_created_micros(name: &str) -> Option<u64> {
    let (prefix, suffix) = name.split_once('_')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if suffix.len() < 12 || !suffix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    prefix.parse::<u64>().ok()
}
