use super::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

fn names(files: &[ScriptFile], root: &Path) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            f.path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn finds_scripts_recursively_in_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("b.qc"));
    touch(&root.join("a.qc"));
    touch(&root.join("nested/deeper/c.qc"));
    touch(&root.join("readme.md"));

    let files = discover_scripts(root);
    assert_eq!(names(&files, root), vec!["a.qc", "b.qc", "nested/deeper/c.qc"]);
}

#[test]
fn skips_hidden_and_build_directories() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    touch(&root.join(".hidden/x.qc"));
    touch(&root.join(".dot.qc"));
    touch(&root.join("target/y.qc"));
    touch(&root.join("node_modules/z.qc"));
    touch(&root.join("keep.qc"));

    assert_eq!(names(&discover_scripts(root), root), vec!["keep.qc"]);
}

#[test]
fn single_file_and_missing_path() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("one.qc");
    let other = dir.path().join("one.txt");
    touch(&script);
    touch(&other);

    assert_eq!(discover_scripts_in(&script), vec![ScriptFile::new(script.clone())]);
    assert!(discover_scripts_in(&other).is_empty());
    assert!(discover_scripts_in(&dir.path().join("absent")).is_empty());
}
