//! Embedded static resources.
//!
//! - `template` - typed variable injection for embedded text
//! - the live-reload client script (minified at compile time by build.rs)
//! - scaffold files written by `rill init`

mod template;

pub use template::{Template, TemplateVars};

/// Variables for the live-reload client script.
pub struct LivereloadVars {
    pub ws_port: u16,
}

impl TemplateVars for LivereloadVars {
    fn apply(&self, content: &str) -> String {
        content.replace("__RILL_WS_PORT__", &self.ws_port.to_string())
    }
}

/// Live-reload client, minified by build.rs.
pub const LIVERELOAD_JS: Template<LivereloadVars> =
    Template::new(include_str!(concat!(env!("OUT_DIR"), "/livereload.min.js")));

/// Render the injectable `<script>` tag for served HTML.
pub fn livereload_script_tag(ws_port: u16) -> String {
    format!(
        "<script>{}</script>",
        LIVERELOAD_JS.render(&LivereloadVars { ws_port })
    )
}

// ============================================================================
// Scaffold (rill init)
// ============================================================================

/// Variables for scaffold files.
pub struct ScaffoldVars {
    pub project_name: String,
}

impl TemplateVars for ScaffoldVars {
    fn apply(&self, content: &str) -> String {
        content.replace("__PROJECT_NAME__", &self.project_name)
    }
}

/// Scaffold files as (relative path, template) pairs.
pub const SCAFFOLD_FILES: &[(&str, Template<ScaffoldVars>)] = &[
    ("rill.toml", Template::new(include_str!("scaffold/rill.toml"))),
    (
        "src/index.html",
        Template::new(include_str!("scaffold/index.html")),
    ),
    (
        "src/assets/html/head.html",
        Template::new(include_str!("scaffold/head.html")),
    ),
    (
        "src/assets/scss/main.scss",
        Template::new(include_str!("scaffold/main.scss")),
    ),
    (
        "src/assets/js/main.js",
        Template::new(include_str!("scaffold/main.js")),
    ),
];
