//! Utility functions and helpers.

pub mod http;

/// Characters that never make it into an output file name.
const INVALID_FILENAME_CHARS: [char; 10] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', ' '];

/// Replace filesystem-hostile characters with underscores and cap length.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .take(50)
        .collect()
}
