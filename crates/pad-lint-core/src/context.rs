//! Per-file context handed to rules.

use crate::tree::{Dialect, SourceTree};
use crate::types::Location;
use std::path::{Path, PathBuf};

/// The file a rule is checking.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path as discovered on disk.
    pub path: &'a Path,
    /// File contents.
    pub content: &'a str,
    /// Path relative to the project root, used in reports.
    pub relative_path: PathBuf,
    /// Grammar the file is parsed with.
    pub dialect: Dialect,
}

impl<'a> FileContext<'a> {
    /// Creates the context for `path` under `root`.
    ///
    /// Paths outside `root` are reported as given.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
            dialect: Dialect::from_path(path).unwrap_or(Dialect::TypeScript),
        }
    }

    /// Location of the byte range `start..end` of this file.
    #[must_use]
    pub fn location(&self, tree: &SourceTree<'_>, start: usize, end: usize) -> Location {
        Location::from_position(self.relative_path.clone(), tree.position_of(start))
            .with_span(start, end.saturating_sub(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_strips_root() {
        let ctx = FileContext::new(Path::new("/repo/src/app.tsx"), "", Path::new("/repo"));
        assert_eq!(ctx.relative_path, PathBuf::from("src/app.tsx"));
        assert_eq!(ctx.dialect, Dialect::Tsx);
    }

    #[test]
    fn relative_path_falls_back_to_full_path() {
        let ctx = FileContext::new(Path::new("/other/app.ts"), "", Path::new("/repo"));
        assert_eq!(ctx.relative_path, PathBuf::from("/other/app.ts"));
        assert_eq!(ctx.dialect, Dialect::TypeScript);
    }

    #[test]
    fn location_is_one_based_with_span() {
        let source = "run();\n  class A {}\n";
        let tree = SourceTree::parse(source, Dialect::TypeScript).expect("parse");
        let ctx = FileContext::new(Path::new("/repo/a.ts"), source, Path::new("/repo"));

        let start = source.find("class").unwrap_or_default();
        let location = ctx.location(&tree, start, start + 5);
        assert_eq!((location.line, location.column), (2, 3));
        assert_eq!((location.offset, location.length), (start, 5));
    }
}
