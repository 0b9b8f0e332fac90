//! Output sink: header/footer wrapping and destination writing.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Writes `header + markdown + footer` (no separators added) to the given
/// file path, or to stdout when `destination` is `None`.
///
/// Nothing is written until the full document has been assembled, so a
/// failed tree build never produces partial output.
pub fn write_markdown(
    destination: Option<&Path>,
    header: &str,
    markdown: &str,
    footer: &str,
) -> io::Result<()> {
    let document = format!("{header}{markdown}{footer}");

    match destination {
        Some(path) => fs::write(path, document),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()
        }
    }
}
