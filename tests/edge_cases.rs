//! Edge case and error handling tests for canopy

mod harness;

use harness::{TestProject, run_canopy};

// ============================================================================
// Filter exclusivity
// ============================================================================

#[test]
fn test_ignored_directory_contents_never_appear() {
    let project = TestProject::new();
    project.add_file("node_modules/dep/deep/util.ts", "export const util = 1;\n");
    project.add_file("src/app.ts", "export const app = 1;\n");

    let (stdout, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success);
    assert!(!stdout.contains("node_modules"), "{}", stdout);
    assert!(!stdout.contains("dep"), "{}", stdout);
    assert!(!stdout.contains("util"), "{}", stdout);
}

#[test]
fn test_ignore_applies_to_nested_paths() {
    let project = TestProject::new();
    project.add_file("src/vendor/lib.ts", "export const lib = 1;\n");
    project.add_file("src/own.ts", "export const own = 1;\n");

    let (stdout, _stderr, success) = run_canopy(project.path(), &["--ignore", "vendor"]);
    assert!(success);
    assert!(stdout.contains("own.ts"));
    assert!(!stdout.contains("vendor"), "{}", stdout);
    assert!(!stdout.contains("lib.ts"), "{}", stdout);
}

// ============================================================================
// Parse failure handling
// ============================================================================

#[test]
fn test_unparseable_file_is_pruned_silently() {
    let project = TestProject::new();
    project.add_file("broken.ts", "export function broken( {\n");
    project.add_file("fine.ts", "export const ok = true;\n");

    let (stdout, stderr, success) = run_canopy(project.path(), &[]);
    assert!(success, "a single unparseable file must not abort the run");
    assert!(stdout.contains("fine.ts"));
    assert!(!stdout.contains("broken.ts"), "{}", stdout);
    assert!(stderr.is_empty(), "parse failures are not reported: {}", stderr);
}

#[test]
fn test_non_utf8_file_is_pruned() {
    let project = TestProject::new();
    project.add_file("good.ts", "export const good = 1;\n");
    std::fs::write(project.path().join("binary.ts"), [0xff, 0xfe, 0x00, 0x01])
        .expect("failed to write binary file");

    let (stdout, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success);
    assert!(stdout.contains("good.ts"));
    assert!(!stdout.contains("binary.ts"), "{}", stdout);
}

// ============================================================================
// Visibility corner cases
// ============================================================================

#[test]
fn test_class_with_only_private_members_still_shows() {
    let project = TestProject::new();
    project.add_file(
        "opaque.ts",
        "export class Opaque {\n  private hidden() {}\n}\n",
    );

    let (stdout, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success);
    assert!(
        stdout.contains("class Opaque"),
        "an exported class with no visible members still renders: {}",
        stdout
    );
    assert!(!stdout.contains("hidden"), "{}", stdout);
}

#[test]
fn test_static_members_are_prefixed() {
    let project = TestProject::new();
    project.add_file(
        "registry.ts",
        "export class Registry {\n  static instance: Registry;\n  static get current() {\n    return Registry.instance;\n  }\n}\n",
    );

    let (stdout, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success);
    assert!(stdout.contains("property static instance: Registry"), "{}", stdout);
    assert!(stdout.contains("method static get current()"), "{}", stdout);
}

#[test]
fn test_constructor_renders_by_name() {
    let project = TestProject::new();
    project.add_file(
        "box.ts",
        "export class Box {\n  constructor(value: number) {}\n}\n",
    );

    let (stdout, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success);
    assert!(stdout.contains("method constructor(value: number)"), "{}", stdout);
}

#[test]
fn test_visibility_monotonicity_across_thresholds() {
    let project = TestProject::new();
    project.add_file(
        "mixed.ts",
        concat!(
            "const hidden = 1;\n",
            "export const shown = 2;\n",
            "export class C {\n",
            "  public a() {}\n",
            "  protected b() {}\n",
            "  private c() {}\n",
            "}\n",
        ),
    );

    let count_lines = |args: &[&str]| -> usize {
        let (stdout, _stderr, success) = run_canopy(project.path(), args);
        assert!(success);
        stdout.lines().count()
    };

    let public = count_lines(&[]);
    let protected = count_lines(&["--protected"]);
    let private = count_lines(&["--private"]);
    assert!(public <= protected, "public {} > protected {}", public, protected);
    assert!(protected <= private, "protected {} > private {}", protected, private);
}

// ============================================================================
// Structural edge cases
// ============================================================================

#[test]
fn test_deeply_nested_directories() {
    let project = TestProject::new();
    project.add_file("outer/middle/inner/leaf.ts", "export const leaf = 1;\n");

    let (stdout, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success);
    for dir in ["outer/", "middle/", "inner/"] {
        assert!(stdout.contains(dir), "missing {} in: {}", dir, stdout);
    }
    assert!(stdout.contains("leaf.ts"));
}

#[test]
fn test_intermediate_directories_prune_bottom_up() {
    let project = TestProject::new();
    project.add_file("outer/inner/only_private.ts", "const hidden = 1;\n");
    project.add_file("top.ts", "export const top = 1;\n");

    let (stdout, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success);
    assert!(stdout.contains("top.ts"));
    // neither the file nor its now-empty ancestors appear
    assert!(!stdout.contains("only_private.ts"), "{}", stdout);
    assert!(!stdout.contains("outer/"), "{}", stdout);
    assert!(!stdout.contains("inner/"), "{}", stdout);
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_skipped() {
    use std::os::unix::fs::symlink;

    let project = TestProject::new();
    project.add_file("real/index.ts", "export const real = 1;\n");
    symlink(project.path().join("real"), project.path().join("loop"))
        .expect("failed to create symlink");

    let (stdout, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success, "canopy should not hang on symlinks");
    assert!(stdout.contains("real/"));
    assert!(!stdout.contains("loop"), "{}", stdout);
}

#[test]
fn test_output_is_stable_across_runs() {
    let project = TestProject::new();
    project.add_file("src/a.ts", "export function a(): void {}\n");
    project.add_file("src/b.ts", "export interface B {\n  id: number;\n}\n");

    let (first, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success);
    let (second, _stderr, success) = run_canopy(project.path(), &[]);
    assert!(success);
    assert_eq!(first, second, "repeated runs must render byte-identical text");
}
