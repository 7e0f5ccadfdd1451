//! Live-reload script injection into served HTML.

use crate::embed::livereload_script_tag;

/// Maybe inject the live-reload script if content is HTML and ws_port is set
pub fn maybe_inject_livereload(body: Vec<u8>, content_type: &str, ws_port: Option<u16>) -> Vec<u8> {
    match (content_type.starts_with("text/html"), ws_port) {
        (true, Some(port)) => inject_script(&body, port),
        _ => body,
    }
}

/// Inject the script before the `</body>` tag
fn inject_script(content: &[u8], ws_port: u16) -> Vec<u8> {
    let script = livereload_script_tag(ws_port);
    let script_bytes = script.as_bytes();

    const PATTERN: &[u8] = b"</body>";

    // Reverse search for </body> using byte windows
    if let Some(pos) = content
        .windows(PATTERN.len())
        .rposition(|w| w.eq_ignore_ascii_case(PATTERN))
    {
        let mut result = Vec::with_capacity(content.len() + script_bytes.len());
        result.extend_from_slice(&content[..pos]);
        result.extend_from_slice(script_bytes);
        result.extend_from_slice(&content[pos..]);
        return result;
    }

    // No </body> found, append to end (browsers handle this gracefully)
    let mut result = Vec::with_capacity(content.len() + script_bytes.len());
    result.extend_from_slice(content);
    result.extend_from_slice(script_bytes);
    result
}
