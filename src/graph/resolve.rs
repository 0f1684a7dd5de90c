// src/graph/resolve.rs
// =============================================================================
// Path normalizer: maps an import target to one of the known file paths.
//
// Rules:
// - strip one leading "./" from the target
// - strip the trailing extension from the target and from every known path
// - a known path matches when its stripped form ENDS WITH the stripped target
//   (plain string suffix, not segment aware)
// - the first match in known-path order wins
// - a target that normalizes to nothing ("./", ".js", "./.ts") matches nothing
//
// The suffix rule over-matches: "Header" matches "components/Header.js" as
// well as "Header.js", and "b" matches "ab.js". That is the intended matching
// behaviour, kept as-is and pinned by tests below.
// =============================================================================

// Strips the final ".ext" of a path
//
// Only an extension after the last '/' counts, and it must be non-empty:
//   "src/App.js"     -> "src/App"
//   "src/v1.2/index" -> "src/v1.2/index"
//   "a/b."           -> "a/b."
//   ".gitignore"     -> ""
pub fn strip_extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(dot) => {
            let ext = &path[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                path
            } else {
                &path[..dot]
            }
        }
        None => path,
    }
}

// Normalizes a raw import target: one leading "./" removed, extension removed
pub fn normalize_target(raw: &str) -> &str {
    strip_extension(raw.strip_prefix("./").unwrap_or(raw))
}

// Resolves `raw_target` against `known_paths`, returning the first match
//
// None means "no edge for this import", never an error.
pub fn resolve<'a, I>(raw_target: &str, known_paths: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let target = normalize_target(raw_target);
    if target.is_empty() {
        return None;
    }
    known_paths
        .into_iter()
        .find(|path| strip_extension(path).ends_with(target))
}

// Known paths with their extensions stripped once up front
//
// The graph builder resolves many import lines against the same file list,
// so the stripping is done once per build rather than once per line.
#[derive(Debug, Clone)]
pub struct PathIndex<'a> {
    stripped: Vec<&'a str>,
}

impl<'a> PathIndex<'a> {
    pub fn new<I>(known_paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            stripped: known_paths.into_iter().map(strip_extension).collect(),
        }
    }

    // Position of the first known path matching `raw_target`
    pub fn resolve(&self, raw_target: &str) -> Option<usize> {
        let target = normalize_target(raw_target);
        if target.is_empty() {
            return None;
        }
        self.stripped.iter().position(|path| path.ends_with(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("src/App.js"), "src/App");
        assert_eq!(strip_extension("src/App.test.js"), "src/App.test");
        assert_eq!(strip_extension("src/v1.2/index"), "src/v1.2/index");
        assert_eq!(strip_extension("Makefile"), "Makefile");
        assert_eq!(strip_extension("a/b."), "a/b.");
        assert_eq!(strip_extension(".gitignore"), "");
    }

    #[test]
    fn test_normalize_target() {
        assert_eq!(normalize_target("./App"), "App");
        assert_eq!(normalize_target("./components/Visualizer.js"), "components/Visualizer");
        assert_eq!(normalize_target("react"), "react");
        // Only a single leading "./" is removed
        assert_eq!(normalize_target("././x"), "./x");
        assert_eq!(normalize_target("../x"), "../x");
    }

    #[test]
    fn test_resolve_relative_import() {
        let known = ["src/index.js", "src/App.js", "src/components/Visualizer.js"];
        assert_eq!(resolve("./App", known), Some("src/App.js"));
        assert_eq!(
            resolve("./components/Visualizer", known),
            Some("src/components/Visualizer.js")
        );
    }

    #[test]
    fn test_resolve_no_match() {
        let known = ["src/index.js", "src/App.js"];
        assert_eq!(resolve("react", known), None);
        assert_eq!(resolve("../lib/x", known), None);
    }

    #[test]
    fn test_first_match_wins_on_tie() {
        assert_eq!(
            resolve("utils", ["src/utils.js", "lib/utils.js"]),
            Some("src/utils.js")
        );
        assert_eq!(
            resolve("utils", ["lib/utils.js", "src/utils.js"]),
            Some("lib/utils.js")
        );
    }

    #[test]
    fn test_known_limitation_suffix_over_match() {
        // A plain suffix match is not segment aware: both of these "resolve"
        // even though neither is the intended file.
        assert_eq!(
            resolve("./Header", ["components/Header.js", "Header.js"]),
            Some("components/Header.js")
        );
        assert_eq!(resolve("b", ["ab.js"]), Some("ab.js"));
    }

    #[test]
    fn test_target_empty_after_normalizing_matches_nothing() {
        let known = ["lib/other.js", "src/a.js"];
        for raw in ["./", ".js", "./.ts"] {
            assert_eq!(normalize_target(raw), "");
            assert_eq!(resolve(raw, known), None, "{raw:?}");
            assert_eq!(PathIndex::new(known).resolve(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn test_path_index_matches_free_function() {
        let known = ["src/utils.js", "lib/utils.js", "src/App.jsx"];
        let index = PathIndex::new(known);
        assert_eq!(index.resolve("utils"), Some(0));
        assert_eq!(index.resolve("./App"), Some(2));
        assert_eq!(index.resolve("missing"), None);
    }
}
