//! Filename classification
//!
//! Derives a MIME type and a file extension from an untrusted original
//! filename. The MIME type comes from the system extension table via
//! `mime_guess`; the extension is computed independently by string
//! splitting, so an unknown MIME type never costs us the extension.

/// Split a filename into (stem, extension).
///
/// The extension includes its leading dot and preserves the case it was
/// given. Leading dots of the basename never start an extension, so
/// `.bashrc` has no extension while `archive.tar.gz` splits at `.gz`.
pub fn split_extension(filename: &str) -> (&str, &str) {
    let base_start = filename
        .rfind(['/', '\\'])
        .map(|i| i + 1)
        .unwrap_or(0);
    let base = &filename[base_start..];

    match base.rfind('.') {
        // Everything before the dot must contain a non-dot character,
        // otherwise the whole basename is a dotfile, not an extension.
        Some(i) if base[..i].chars().any(|c| c != '.') => {
            let split = base_start + i;
            (&filename[..split], &filename[split..])
        }
        _ => (filename, ""),
    }
}

/// Classify a filename into (mime_type, extension).
///
/// Unknown extensions yield an empty MIME type rather than an error; the
/// extension is still returned.
pub fn classify(filename: &str) -> (String, String) {
    let (_, extension) = split_extension(filename);

    let mime_type = if extension.is_empty() {
        String::new()
    } else {
        mime_guess::from_ext(extension.trim_start_matches('.'))
            .first_raw()
            .unwrap_or("")
            .to_string()
    };

    (mime_type, extension.to_string())
}
