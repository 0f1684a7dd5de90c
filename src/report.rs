// src/report.rs
// =============================================================================
// Turns a built graph into what the user sees: a table or a JSON document.
//
// The report carries everything a renderer needs (file index, group, color,
// grid position, edges, legend, directory list) but not the file contents.
// =============================================================================

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use import_mapper::graph::{directory_structure, positions, Color, Graph};

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Where the files came from ("owner/name@branch" or a folder path)
    pub source: String,
    pub files: Vec<FileEntry<'a>>,
    pub edges: Vec<EdgeEntry<'a>>,
    pub colors: BTreeMap<&'a str, Color>,
    pub directories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FileEntry<'a> {
    pub index: usize,
    pub path: &'a str,
    pub group: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct EdgeEntry<'a> {
    pub source: usize,
    pub target: usize,
    pub line: &'a str,
}

impl<'a> Report<'a> {
    pub fn new(source: impl Into<String>, graph: &'a Graph<'a>) -> Self {
        let files = positions(graph.files)
            .into_iter()
            .zip(graph.files)
            .map(|(position, file)| FileEntry {
                index: position.index,
                path: &file.path,
                group: graph.mode.group_key(&file.path),
                color: graph.color_of(position.index).copied(),
                x: position.x,
                y: position.y,
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| EdgeEntry {
                source: edge.source_index,
                target: edge.target_index,
                line: &edge.raw_import_line,
            })
            .collect();

        let colors = graph.colors.iter().map(|(key, color)| (key, *color)).collect();

        Self {
            source: source.into(),
            files,
            edges,
            colors,
            directories: directory_structure(graph.files),
        }
    }
}

// Prints the report either as a table or JSON
pub fn print_report(report: &Report<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &Report<'_>) {
    println!("\n📦 {}\n", report.source);

    println!("{:<6} {:<50} {:<30} {:<9} {:>12}", "INDEX", "FILE", "GROUP", "COLOR", "POSITION");
    println!("{}", "=".repeat(111));
    for file in &report.files {
        let color = file.color.map(|c| c.to_string()).unwrap_or_default();
        println!(
            "{:<6} {:<50} {:<30} {:<9} {:>12}",
            file.index,
            truncate(file.path, 50),
            truncate(file.group, 30),
            color,
            format!("({}, {})", file.x, file.y)
        );
    }

    println!("\n🔗 {} import edge(s)", report.edges.len());
    for edge in &report.edges {
        println!(
            "   {} -> {} : {}",
            report.files[edge.source].path,
            report.files[edge.target].path,
            edge.line
        );
    }

    if !report.directories.is_empty() {
        println!("\n📁 Directories");
        for dir in &report.directories {
            println!("   {}", dir);
        }
    }
}

// Shortens long cells from the left, keeping the informative tail
fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let tail: String = text.chars().skip(count - (width - 3)).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use import_mapper::graph::{build, FileRecord, GroupingMode};

    #[test]
    fn test_report_shape() {
        let files = vec![
            FileRecord::new("a/x.js", "import y from './y'"),
            FileRecord::new("a/y.js", ""),
        ];
        let graph = build(&files, GroupingMode::Directory);
        let report = Report::new("local", &graph);

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[1].group, "a");
        assert_eq!(report.files[0].color, report.files[1].color);
        assert_eq!(report.edges.len(), 1);
        assert_eq!(report.directories, vec!["a"]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["edges"][0]["source"], 0);
        assert_eq!(json["edges"][0]["target"], 1);
        assert_eq!(json["files"][1]["x"], 200.0);
        assert!(json["colors"]["a"].as_str().unwrap().starts_with('#'));
        assert!(json["files"][0].get("content").is_none());
    }

    #[test]
    fn test_truncate_keeps_tail() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("src/components/deep/Header.js", 12), "...Header.js");
    }
}
