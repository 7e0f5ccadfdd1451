//! Stylesheet transforms: SCSS compilation and CSS printing.
//!
//! Compilation is delegated to `grass`, printing (pretty for development,
//! minified for production) to `lightningcss`.

use std::path::Path;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

/// Compile an SCSS entry file to expanded CSS.
pub fn compile_scss(entry: &Path, load_paths: &[std::path::PathBuf]) -> Result<String, String> {
    let mut options = grass::Options::default().style(grass::OutputStyle::Expanded);
    for path in load_paths {
        options = options.load_path(path);
    }

    grass::from_path(entry, &options).map_err(|e| e.to_string())
}

/// Re-print CSS: pretty in development, minified in production.
///
/// Parsing through lightningcss also validates the compiled output and
/// normalizes it so repeated builds are byte-identical.
pub fn print_css(source: &str, minify: bool) -> Result<String, String> {
    let stylesheet =
        StyleSheet::parse(source, ParserOptions::default()).map_err(|e| e.to_string())?;

    let result = stylesheet
        .to_css(PrinterOptions {
            minify,
            ..PrinterOptions::default()
        })
        .map_err(|e| e.to_string())?;

    Ok(result.code)
}
