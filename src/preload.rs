/// A `<link rel="preload">` to append once the page has loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreloadHint {
    pub href: String,
    pub kind: &'static str,
}

impl PreloadHint {
    pub fn for_path(path: &str) -> Self {
        let kind = if path.to_ascii_lowercase().ends_with(".css") {
            "style"
        } else {
            "script"
        };

        Self {
            href: path.to_string(),
            kind,
        }
    }
}

pub fn hints(paths: &[String]) -> Vec<PreloadHint> {
    paths.iter().map(|path| PreloadHint::for_path(path)).collect()
}
