// src/graph/scanner.rs
// =============================================================================
// This module finds the import target on a single line of source text.
//
// Only one grammar is recognized, and only on one complete line:
//
//   line   := "import " <anything> FROM <ws>* QUOTE target QUOTE <anything>
//   FROM   := "from", not preceded by an identifier character
//   QUOTE  := '"' or '\''  (the closing quote must match the opening one)
//   target := one or more characters other than the opening quote
//
// The whitespace between `from` and the quote is looser than the usual
// `from ['"]` pattern, which wants exactly one space: any run of whitespace,
// including none, is accepted ("from'./a'", "from   './a'").
//
// The scanner walks the line with three explicit states instead of a regex:
//
//   OutsideImport         -> line does not (yet) look like an import
//   MatchedImportKeyword  -> saw "import ", looking for a `from` clause
//   CapturingTarget       -> inside the quotes, collecting the target
//
// Lines that break the grammar (no `from`, unterminated quote, empty target)
// simply produce no target. Multi-line imports, `export ... from`, `require`
// and dynamic `import()` are not recognized.
// =============================================================================

const IMPORT_KEYWORD: &str = "import ";
const FROM_KEYWORD: &str = "from";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideImport,
    MatchedImportKeyword,
    CapturingTarget { quote: char, start: usize },
}

// Returns the quoted target of the first `from` clause on an import line
//
// The line is trimmed first, so indentation does not matter.
//
// Example:
//   "  import App from './App';" -> Some("./App")
//   "import './App.css';"       -> None (no from clause)
pub fn scan_import_target(line: &str) -> Option<&str> {
    let line = line.trim();
    let mut state = ScanState::OutsideImport;
    let mut cursor = 0;

    loop {
        match state {
            ScanState::OutsideImport => {
                if !line.starts_with(IMPORT_KEYWORD) {
                    return None;
                }
                cursor = IMPORT_KEYWORD.len();
                state = ScanState::MatchedImportKeyword;
            }

            ScanState::MatchedImportKeyword => {
                let found = line[cursor..].find(FROM_KEYWORD)?;
                let keyword_start = cursor + found;
                let after_keyword = keyword_start + FROM_KEYWORD.len();
                cursor = after_keyword;

                // `from` glued to an identifier (e.g. `fromage`, `datefrom`) is not the keyword
                if !is_word_boundary(line, keyword_start, after_keyword) {
                    continue;
                }

                let rest = &line[after_keyword..];
                let skipped = rest.len() - rest.trim_start().len();
                let quote_at = after_keyword + skipped;

                match line[quote_at..].chars().next() {
                    Some(quote @ ('"' | '\'')) => {
                        state = ScanState::CapturingTarget {
                            quote,
                            start: quote_at + quote.len_utf8(),
                        };
                    }
                    // `from` used as a plain word; keep looking further along the line
                    _ => continue,
                }
            }

            ScanState::CapturingTarget { quote, start } => {
                let len = line[start..].find(quote)?;
                if len == 0 {
                    return None;
                }
                return Some(&line[start..start + len]);
            }
        }
    }
}

// True if line[start..end] is not glued to identifier characters on either side
fn is_word_boundary(line: &str, start: usize, end: usize) -> bool {
    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();
    !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
