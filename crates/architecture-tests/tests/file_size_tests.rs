//! Architecture tests for file size limits.
//!
//! - Files >500 LOC require justification (warning logged)
//! - Files >800 LOC are presumed mis-scoped (test failure)
//!
//! This test walks all .rs files under crates/ and checks their line counts
//! against these thresholds.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const WARNING_THRESHOLD: usize = 500;
const FAILURE_THRESHOLD: usize = 800;

/// Files excluded from size checks, as (path_suffix, justification) tuples.
///
/// The path_suffix is matched against the end of the file path.
const EXCLUDED_FILES: &[(&str, &str)] = &[];

#[test]
fn file_size_limits() {
    let workspace_root = find_workspace_root();
    let crates_dir = workspace_root.join("crates");

    assert!(
        crates_dir.exists(),
        "crates/ directory not found at {:?}",
        crates_dir
    );

    let rust_files = find_rust_files(&crates_dir);
    let mut failures = Vec::new();
    let mut warnings = Vec::new();

    for file_path in &rust_files {
        let content = fs::read_to_string(file_path).expect("Failed to read file");
        let loc = count_loc(&content);
        let relative_path = file_path.strip_prefix(&workspace_root).unwrap_or(file_path);
        let relative_str = relative_path.to_string_lossy();

        let is_excluded = EXCLUDED_FILES
            .iter()
            .any(|(suffix, _)| relative_str.ends_with(suffix));

        if loc > FAILURE_THRESHOLD && !is_excluded {
            failures.push((relative_str.to_string(), loc));
        } else if loc > WARNING_THRESHOLD {
            warnings.push((relative_str.to_string(), loc));
        }
    }

    for (path, loc) in &warnings {
        eprintln!("[architecture] {}: {} lines (over {})", path, loc, WARNING_THRESHOLD);
    }

    if !failures.is_empty() {
        let listing: Vec<String> = failures
            .iter()
            .map(|(path, loc)| format!("  - {}: {} lines", path, loc))
            .collect();
        panic!(
            "\nFiles exceeding {} LOC (split them or add to EXCLUDED_FILES):\n{}\n",
            FAILURE_THRESHOLD,
            listing.join("\n")
        );
    }

    eprintln!(
        "[architecture] Checked {} Rust files for size limits.",
        rust_files.len()
    );
}

/// Count lines of code, skipping blank lines, line comments and block comment bodies.
fn count_loc(content: &str) -> usize {
    let mut count = 0;
    let mut in_block_comment = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with("/*") {
            in_block_comment = true;
        }
        if in_block_comment {
            if trimmed.ends_with("*/") {
                in_block_comment = false;
            }
            continue;
        }

        if trimmed.starts_with("//") {
            continue;
        }

        count += 1;
    }

    count
}

fn find_rust_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != "target")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Find the workspace root by looking for a Cargo.toml with [workspace].
fn find_workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    manifest_dir
        .ancestors()
        .find(|dir| {
            fs::read_to_string(dir.join("Cargo.toml"))
                .is_ok_and(|content| content.contains("[workspace]"))
        })
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

#[test]
fn test_count_loc_basic() {
    let content = r#"// This is a comment
fn main() {
    let x = 5; // inline comment

    // Another comment
    println!("Hello");
}
"#;
    assert_eq!(count_loc(content), 4);
}

#[test]
fn test_count_loc_doc_and_block_comments() {
    let content = r#"//! Module documentation

/* block
   comment */
/// Function documentation
fn test() {
    let x = 1;
}
"#;
    assert_eq!(count_loc(content), 3);
}

#[test]
fn test_find_rust_files_skips_target() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("target/debug")).unwrap();
    fs::write(dir.path().join("src/lib.rs"), "fn a() {}\n").unwrap();
    fs::write(dir.path().join("target/debug/build.rs"), "fn b() {}\n").unwrap();

    let files = find_rust_files(dir.path());
    assert_eq!(files, vec![dir.path().join("src/lib.rs")]);
}

#[test]
fn test_excluded_files_list_is_consistent() {
    for (pattern, justification) in EXCLUDED_FILES {
        assert!(!pattern.is_empty(), "Excluded file pattern must not be empty");
        assert!(
            !justification.is_empty(),
            "Justification for '{}' must not be empty",
            pattern
        );
    }
}
