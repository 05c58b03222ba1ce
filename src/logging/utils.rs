//! Log file location, color stripping and timestamps.
use std::path::PathBuf;

/// Remove the SGR color sequences (`ESC [ ... m`) the console formatter and
/// run summary emit, so the log file stays plain text.
pub(super) fn strip_colors(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((text, sequence)) = rest.split_once("\x1b[") {
        out.push_str(text);
        rest = sequence.split_once('m').map_or("", |(_, tail)| tail);
    }
    out.push_str(rest);
    out
}

/// `<cache>/sitebuild/<command>.log`, where `<cache>` is `$XDG_CACHE_HOME`
/// or `~/.cache`. Creates the directory; `None` if that fails.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME").map_or_else(
        || {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    );
    let dir = cache.join("sitebuild");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// UTC `YYYY-MM-DD HH:MM:SS`, for the log file header.
pub(super) fn utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// UTC `HH:MM:SS`, prefixed to every log file line.
pub(super) fn utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
