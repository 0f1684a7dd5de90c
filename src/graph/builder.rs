// src/graph/builder.rs
// =============================================================================
// Turns a loaded file set into the import graph.
//
// For every file, every line:
//   1. scan for `import ... from "<target>"`        (scanner.rs)
//   2. resolve the target against all known paths    (resolve.rs)
//   3. on a match, record an Edge (self-imports are dropped)
//
// Then every group (directory or file, see GroupingMode) gets a distinct color.
//
// Edge order is file order, then line order within a file. Lines that do not
// parse or do not resolve are skipped; building never fails.
// =============================================================================

use rand::Rng;
use tracing::{debug, info};

use super::color::{ColorAssignment, GroupingMode};
use super::resolve::PathIndex;
use super::scanner::scan_import_target;
use super::types::{Edge, FileRecord, Graph};

// Builds the graph with the thread-local rng for colors
pub fn build(files: &[FileRecord], mode: GroupingMode) -> Graph<'_> {
    build_with_rng(files, mode, &mut rand::thread_rng())
}

// Builds the graph drawing colors from the given rng
pub fn build_with_rng<'a, R: Rng + ?Sized>(
    files: &'a [FileRecord],
    mode: GroupingMode,
    rng: &mut R,
) -> Graph<'a> {
    let edges = extract_edges(files);
    let colors = ColorAssignment::assign(files.iter().map(|f| mode.group_key(&f.path)), rng);

    info!(
        files = files.len(),
        edges = edges.len(),
        groups = colors.len(),
        "built import graph"
    );

    Graph {
        files,
        edges,
        colors,
        mode,
    }
}

// All import edges of the file set, in file then line order
pub fn extract_edges(files: &[FileRecord]) -> Vec<Edge<'_>> {
    let index = PathIndex::new(files.iter().map(|f| f.path.as_str()));
    let mut edges = Vec::new();

    for (source_index, file) in files.iter().enumerate() {
        for line in file.content.lines() {
            let Some(target) = scan_import_target(line) else {
                continue;
            };
            let Some(target_index) = index.resolve(target) else {
                continue;
            };

            if target_index == source_index {
                debug!(path = %file.path, import = target, "dropping self-import");
                continue;
            }

            edges.push(Edge {
                source_index,
                target_index,
                raw_import_line: line.trim().to_string(),
                target_file: &files[target_index],
            });
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_single_edge_in_one_group() {
        let files = vec![
            FileRecord::new("a/x.js", "import y from './y'"),
            FileRecord::new("a/y.js", ""),
        ];
        let graph = build_with_rng(&files, GroupingMode::Directory, &mut rng());

        assert_eq!(graph.edges.len(), 1);
        let edge = &graph.edges[0];
        assert_eq!((edge.source_index, edge.target_index), (0, 1));
        assert_eq!(edge.raw_import_line, "import y from './y'");
        assert_eq!(edge.target_file.path, "a/y.js");

        assert_eq!(graph.colors.len(), 1);
        assert!(graph.colors.get("a").is_some());
    }

    #[test]
    fn test_no_imports_means_no_edges_and_one_color_per_directory() {
        let files = vec![
            FileRecord::new("src/a.js", "const a = 1;"),
            FileRecord::new("src/b.js", "export default 2;"),
            FileRecord::new("lib/c.js", ""),
            FileRecord::new("README.md", "# readme"),
        ];
        let graph = build_with_rng(&files, GroupingMode::Directory, &mut rng());

        assert!(graph.edges.is_empty());
        let keys: Vec<_> = graph.colors.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["README.md", "lib", "src"]);
    }

    #[test]
    fn test_file_mode_colors_every_file() {
        let files = vec![
            FileRecord::new("src/a.js", ""),
            FileRecord::new("src/b.js", ""),
        ];
        let graph = build_with_rng(&files, GroupingMode::File, &mut rng());
        assert_eq!(graph.colors.len(), 2);
        assert_ne!(graph.color_of(0), graph.color_of(1));
    }

    #[test]
    fn test_files_in_same_group_share_color() {
        let files = vec![
            FileRecord::new("src/a.js", ""),
            FileRecord::new("src/b.js", ""),
            FileRecord::new("lib/c.js", ""),
        ];
        let graph = build_with_rng(&files, GroupingMode::Directory, &mut rng());
        assert_eq!(graph.color_of(0), graph.color_of(1));
        assert_ne!(graph.color_of(0), graph.color_of(2));
    }

    #[test]
    fn test_edges_follow_file_then_line_order() {
        let files = vec![
            FileRecord::new(
                "src/index.js",
                "\n        import App from \"./App\";\n        import Visualizer from \"./components/Visualizer\";\n        console.log(\"hi\");\n",
            ),
            FileRecord::new(
                "src/App.js",
                "import React from \"react\";\nimport './App.css';\nimport V from './components/Visualizer.js'\n",
            ),
            FileRecord::new("src/components/Visualizer.js", ""),
            FileRecord::new("src/App.css", "body {}"),
        ];
        let graph = build_with_rng(&files, GroupingMode::Directory, &mut rng());

        let pairs: Vec<_> = graph
            .edges
            .iter()
            .map(|e| (e.source_index, e.target_index))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(graph.edges[0].raw_import_line, "import App from \"./App\";");
    }

    #[test]
    fn test_tie_resolves_to_first_known_path() {
        let files = vec![
            FileRecord::new("main.js", "import u from 'utils'"),
            FileRecord::new("src/utils.js", ""),
            FileRecord::new("lib/utils.js", ""),
        ];
        let graph = build_with_rng(&files, GroupingMode::Directory, &mut rng());
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].target_index, 1);
    }

    #[test]
    fn test_self_import_is_dropped() {
        let files = vec![FileRecord::new("a/self.js", "import me from './self'")];
        let graph = build_with_rng(&files, GroupingMode::Directory, &mut rng());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_targets_that_normalize_to_nothing_make_no_edges() {
        let files = vec![
            FileRecord::new("lib/other.js", ""),
            FileRecord::new(
                "src/a.js",
                "import x from './'\nimport y from '.js'\nimport z from './.ts'",
            ),
        ];
        assert!(extract_edges(&files).is_empty());
    }

    #[test]
    fn test_malformed_lines_and_binary_content_are_tolerated() {
        let files = vec![
            FileRecord::new(
                "a.js",
                "import x from './b\nimport from\nimport \u{fffd}\u{0} from \"\nimport ok from \"./b\"",
            ),
            FileRecord::new("b.js", "\u{fffd}PNG\r\n\u{1a}\n"),
        ];
        let graph = build_with_rng(&files, GroupingMode::Directory, &mut rng());
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].target_index, 1);
    }

    #[test]
    fn test_edges_from_and_labels() {
        let files = vec![
            FileRecord::new("src/a.js", "import b from './b'\nimport c from './c'"),
            FileRecord::new("src/b.js", "import c from './c'"),
            FileRecord::new("src/c.js", ""),
        ];
        let graph = build_with_rng(&files, GroupingMode::Directory, &mut rng());

        assert_eq!(graph.edges_from(0).count(), 2);
        assert_eq!(graph.edges_from(1).count(), 1);
        assert_eq!(graph.edges_from(2).count(), 0);
        assert_eq!(graph.node_label(2), Some("c.js"));
        assert_eq!(graph.node_label(3), None);
        assert_eq!(graph.group_of(0), Some("src"));
    }

    #[test]
    fn test_many_groups_get_distinct_colors() {
        let files: Vec<_> = (0..300)
            .map(|i| FileRecord::new(format!("dir{i}/file.js"), ""))
            .collect();
        let graph = build(&files, GroupingMode::Directory);
        let distinct: HashSet<_> = graph.colors.iter().map(|(_, c)| *c).collect();
        assert_eq!(graph.colors.len(), 300);
        assert_eq!(distinct.len(), 300);
    }

    #[test]
    fn test_empty_file_set() {
        let graph = build(&[], GroupingMode::Directory);
        assert!(graph.edges.is_empty());
        assert!(graph.colors.is_empty());
    }
}
