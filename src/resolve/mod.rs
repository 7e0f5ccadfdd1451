//! Path Resolver: the static mapping from asset categories to source and
//! output locations.
//!
//! The mapping is derived once from configuration at startup and is
//! immutable afterwards. Misconfiguration is an authoring mistake, not a
//! runtime fault, so nothing here returns an error.
//!
//! Categories are matched by directory scope plus extension set. Two rules
//! keep output subtrees disjoint:
//! - `svg` (sprite sources, `assets/img/svg/`) is matched before `img`,
//!   and `img` excludes that subtree.
//! - `html` matches by extension anywhere under the source root (pages at
//!   the top level, `@include` partials below `assets/`), so it is tried
//!   last.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::AssetCategory;

/// How a category's sources are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDepth {
    /// Only direct children of the source directory are build entries
    /// (pages, entry scripts). Deeper files still classify to the
    /// category so edits to them trigger a rebuild.
    TopLevel,
    /// The whole subtree is enumerated.
    Recursive,
}

/// Source/output mapping for one category.
#[derive(Debug, Clone)]
pub struct CategoryRoute {
    pub category: AssetCategory,
    /// Absolute source directory.
    pub source_dir: PathBuf,
    /// Absolute output directory. Every file this category's task writes
    /// lands under here.
    pub output_dir: PathBuf,
    /// Accepted extensions (lowercase), or `None` for any file.
    pub extensions: Option<&'static [&'static str]>,
    /// Entry enumeration depth.
    pub depth: ScanDepth,
    /// Subtree inside `source_dir` owned by another category.
    pub exclude: Option<PathBuf>,
}

impl CategoryRoute {
    /// Whether a source path belongs to this category.
    fn matches(&self, path: &Path) -> bool {
        if !path.starts_with(&self.source_dir) {
            return false;
        }
        if let Some(exclude) = &self.exclude
            && path.starts_with(exclude)
        {
            return false;
        }
        self.matches_extension(path)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let Some(extensions) = self.extensions else {
            return true;
        };
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        extensions.iter().any(|e| *e == ext)
    }

    /// Output path mirroring the source's position in the category tree.
    pub fn output_for(&self, source: &Path) -> PathBuf {
        match source.strip_prefix(&self.source_dir) {
            Ok(rel) => self.output_dir.join(rel),
            Err(_) => self.output_dir.join(source.file_name().unwrap_or_default()),
        }
    }
}

/// Fixed category → route mapping.
#[derive(Debug, Clone)]
pub struct PathResolver {
    routes: Vec<CategoryRoute>,
}

impl PathResolver {
    pub fn new(source_root: PathBuf, output_root: PathBuf) -> Self {
        use AssetCategory::*;

        let src = |rel: &str| source_root.join(rel);
        let out = |rel: &str| output_root.join(rel);

        // Classification order comes from AssetCategory::ALL: directory
        // scoped routes first, svg before img, html last.
        let routes = AssetCategory::ALL
            .iter()
            .map(|category| match category {
                Html => CategoryRoute {
                    category: Html,
                    source_dir: source_root.clone(),
                    output_dir: output_root.clone(),
                    extensions: Some(&["html", "htm"]),
                    depth: ScanDepth::TopLevel,
                    exclude: None,
                },
                Css => CategoryRoute {
                    category: Css,
                    source_dir: src("assets/scss"),
                    output_dir: out("assets/css"),
                    extensions: Some(&["scss"]),
                    depth: ScanDepth::Recursive,
                    exclude: None,
                },
                Js => CategoryRoute {
                    category: Js,
                    source_dir: src("assets/js"),
                    output_dir: out("assets/js"),
                    extensions: Some(&["js", "mjs"]),
                    depth: ScanDepth::TopLevel,
                    exclude: None,
                },
                Img => CategoryRoute {
                    category: Img,
                    source_dir: src("assets/img"),
                    output_dir: out("assets/img"),
                    extensions: Some(&["jpg", "jpeg", "png", "svg"]),
                    depth: ScanDepth::Recursive,
                    exclude: Some(src("assets/img/svg")),
                },
                Video => CategoryRoute {
                    category: Video,
                    source_dir: src("assets/video"),
                    output_dir: out("assets/video"),
                    extensions: None,
                    depth: ScanDepth::Recursive,
                    exclude: None,
                },
                Svg => CategoryRoute {
                    category: Svg,
                    source_dir: src("assets/img/svg"),
                    output_dir: out("assets/img/svg"),
                    extensions: Some(&["svg"]),
                    depth: ScanDepth::Recursive,
                    exclude: None,
                },
                Vendors => CategoryRoute {
                    category: Vendors,
                    source_dir: src("assets/vendors"),
                    output_dir: out("assets/vendors"),
                    extensions: Some(&["css", "js"]),
                    depth: ScanDepth::Recursive,
                    exclude: None,
                },
                Fonts => CategoryRoute {
                    category: Fonts,
                    source_dir: src("assets/fonts"),
                    output_dir: out("assets/fonts"),
                    extensions: None,
                    depth: ScanDepth::Recursive,
                    exclude: None,
                },
            })
            .collect();

        Self { routes }
    }

    /// Route for a category.
    pub fn route(&self, category: AssetCategory) -> &CategoryRoute {
        // ALL is exhaustive by construction
        self.routes
            .iter()
            .find(|r| r.category == category)
            .unwrap()
    }

    /// Match a source path to its owning category.
    ///
    /// Html classifies by extension anywhere under the source root: a page
    /// at the top level and a partial under `assets/` both rebuild the
    /// html task.
    pub fn classify(&self, path: &Path) -> Option<AssetCategory> {
        self.routes
            .iter()
            .find(|route| route.matches(path))
            .map(|route| route.category)
    }

    /// Enumerate current source files for a category, sorted for
    /// deterministic task output.
    pub fn scan(&self, category: AssetCategory) -> Vec<PathBuf> {
        let route = self.route(category);
        if !route.source_dir.is_dir() {
            return Vec::new();
        }

        let mut files = match route.depth {
            ScanDepth::TopLevel => scan_top_level(route),
            ScanDepth::Recursive => scan_recursive(route),
        };
        files.sort();
        files
    }
}

fn scan_top_level(route: &CategoryRoute) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(&route.source_dir) else {
        return Vec::new();
    };

    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && route.matches_extension(path))
        .collect()
}

fn scan_recursive(route: &CategoryRoute) -> Vec<PathBuf> {
    jwalk::WalkDir::new(&route.source_dir)
        .skip_hidden(true)
        .parallelism(jwalk::Parallelism::Serial)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| route.matches(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PathResolver {
        PathResolver::new(PathBuf::from("/p/src"), PathBuf::from("/p/dist"))
    }

    #[test]
    fn test_classify_pages_and_partials() {
        let r = resolver();
        assert_eq!(
            r.classify(Path::new("/p/src/index.html")),
            Some(AssetCategory::Html)
        );
        assert_eq!(
            r.classify(Path::new("/p/src/assets/html/head.html")),
            Some(AssetCategory::Html)
        );
    }

    #[test]
    fn test_classify_by_directory() {
        let r = resolver();
        assert_eq!(
            r.classify(Path::new("/p/src/assets/scss/main.scss")),
            Some(AssetCategory::Css)
        );
        assert_eq!(
            r.classify(Path::new("/p/src/assets/js/main.js")),
            Some(AssetCategory::Js)
        );
        assert_eq!(
            r.classify(Path::new("/p/src/assets/video/intro.mp4")),
            Some(AssetCategory::Video)
        );
        assert_eq!(
            r.classify(Path::new("/p/src/assets/fonts/body.woff2")),
            Some(AssetCategory::Fonts)
        );
    }

    #[test]
    fn test_sprite_sources_beat_img() {
        let r = resolver();
        assert_eq!(
            r.classify(Path::new("/p/src/assets/img/svg/icon.svg")),
            Some(AssetCategory::Svg)
        );
        assert_eq!(
            r.classify(Path::new("/p/src/assets/img/logo.svg")),
            Some(AssetCategory::Img)
        );
        assert_eq!(
            r.classify(Path::new("/p/src/assets/img/photos/a.jpg")),
            Some(AssetCategory::Img)
        );
    }

    #[test]
    fn test_vendors_beat_js_and_css() {
        let r = resolver();
        assert_eq!(
            r.classify(Path::new("/p/src/assets/vendors/lib/lib.js")),
            Some(AssetCategory::Vendors)
        );
        assert_eq!(
            r.classify(Path::new("/p/src/assets/vendors/lib/lib.css")),
            Some(AssetCategory::Vendors)
        );
    }

    #[test]
    fn test_classify_rejects_foreign_files() {
        let r = resolver();
        assert_eq!(r.classify(Path::new("/p/src/assets/scss/readme.txt")), None);
        assert_eq!(r.classify(Path::new("/elsewhere/main.scss")), None);
        // extension-less file in an extension-filtered category
        assert_eq!(r.classify(Path::new("/p/src/assets/js/LICENSE")), None);
    }

    #[test]
    fn test_output_mirrors_source_position() {
        let r = resolver();
        let route = r.route(AssetCategory::Img);
        assert_eq!(
            route.output_for(Path::new("/p/src/assets/img/photos/a.jpg")),
            PathBuf::from("/p/dist/assets/img/photos/a.jpg")
        );
    }

    #[test]
    fn test_outputs_disjoint_per_category() {
        let r = resolver();
        // img excludes the sprite subtree, so no source maps into the
        // svg category's output directory
        let img = r.route(AssetCategory::Img);
        assert!(!img.matches(Path::new("/p/src/assets/img/svg/icon.svg")));
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let r = resolver();
        assert!(r.scan(AssetCategory::Fonts).is_empty());
    }

    #[test]
    fn test_scan_depths() {
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("assets/js/functions")).unwrap();
        fs::write(src.join("index.html"), "<html></html>").unwrap();
        fs::write(src.join("notes.txt"), "").unwrap();
        fs::write(src.join("assets/js/main.js"), "").unwrap();
        fs::write(src.join("assets/js/functions/menu.js"), "").unwrap();

        let r = PathResolver::new(src.clone(), dir.path().join("dist"));

        // top-level entries only
        assert_eq!(r.scan(AssetCategory::Html), vec![src.join("index.html")]);
        assert_eq!(
            r.scan(AssetCategory::Js),
            vec![src.join("assets/js/main.js")]
        );

        // ...but nested files still classify for rebuild routing
        assert_eq!(
            r.classify(&src.join("assets/js/functions/menu.js")),
            Some(AssetCategory::Js)
        );
    }
}
