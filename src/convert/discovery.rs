use crate::convert::codec::{OUTPUT_EXTENSION, SOURCE_EXTENSION};
use crate::convert::types::ConversionTask;
use ignore::WalkBuilder;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Collects every HEIC file under `input_dir` that has no JPEG counterpart in
/// `output_dir` yet. Read-only; entries come back in walk order, sorted by
/// file name within each directory.
pub fn discover(input_dir: &Path, output_dir: &Path) -> Vec<ConversionTask> {
    let mut tasks = Vec::new();

    let walker = WalkBuilder::new(input_dir)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {:?}: {}", input_dir, e);
                continue;
            }
        };

        let path = entry.path();
        // Symlinked files count; symlinked directories are not descended.
        let is_file = entry
            .file_type()
            .is_some_and(|ft| ft.is_file() || (ft.is_symlink() && path.is_file()));
        if !is_file || !is_source_file(path) {
            continue;
        }

        let Some(output_path) = output_path_for(path, output_dir) else {
            continue;
        };

        if output_path.exists() {
            debug!("Output already exists for: {:?}", path);
            continue;
        }

        tasks.push(ConversionTask {
            input_path: path.to_path_buf(),
            output_path,
        });
    }

    tasks
}

/// True when the file extension is `heic`, ignoring case.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Flat output location: same stem, `.jpg`, directly inside `output_dir`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> Option<PathBuf> {
    let stem = input.file_stem()?;
    let mut file_name = OsString::from(stem);
    file_name.push(".");
    file_name.push(OUTPUT_EXTENSION);
    Some(output_dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn inputs(tasks: &[ConversionTask]) -> Vec<PathBuf> {
        tasks.iter().map(|t| t.input_path.clone()).collect()
    }

    #[test]
    fn output_path_ignores_source_extension_case() {
        let out = Path::new("/out");
        for name in ["photo.HEIC", "photo.heic", "photo.Heic"] {
            assert_eq!(
                output_path_for(Path::new(name), out),
                Some(PathBuf::from("/out/photo.jpg"))
            );
        }
    }

    #[test]
    fn output_path_keeps_inner_dots() {
        let path = output_path_for(Path::new("/in/IMG_0001.edited.heic"), Path::new("/out"));
        assert_eq!(path, Some(PathBuf::from("/out/IMG_0001.edited.jpg")));
    }

    #[test]
    fn source_files_match_any_case() {
        assert!(is_source_file(Path::new("a.heic")));
        assert!(is_source_file(Path::new("a.HEIC")));
        assert!(is_source_file(Path::new("a.HeIc")));
        assert!(!is_source_file(Path::new("a.heif")));
        assert!(!is_source_file(Path::new("a.jpg")));
        assert!(!is_source_file(Path::new(".heic")));
        assert!(!is_source_file(Path::new("heic")));
    }

    #[test]
    fn discovers_recursively_in_sorted_order() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        touch(&input.path().join("b.heic"));
        touch(&input.path().join("a.HEIC"));
        touch(&input.path().join("notes.txt"));
        touch(&input.path().join("nested/deeper/c.Heic"));
        touch(&input.path().join(".hidden.heic"));

        let tasks = discover(input.path(), output.path());

        assert_eq!(
            inputs(&tasks),
            vec![
                input.path().join(".hidden.heic"),
                input.path().join("a.HEIC"),
                input.path().join("b.heic"),
                input.path().join("nested/deeper/c.Heic"),
            ]
        );
        assert_eq!(tasks[3].output_path, output.path().join("c.jpg"));
    }

    #[test]
    fn skips_inputs_whose_output_exists() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        touch(&input.path().join("a.heic"));
        touch(&input.path().join("b.heic"));
        touch(&output.path().join("a.jpg"));

        let tasks = discover(input.path(), output.path());

        assert_eq!(inputs(&tasks), vec![input.path().join("b.heic")]);
    }

    #[test]
    fn repeated_discovery_is_stable() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        touch(&input.path().join("x/1.heic"));
        touch(&input.path().join("y/2.heic"));
        touch(&input.path().join("3.heic"));

        let first = discover(input.path(), output.path());
        let second = discover(input.path(), output.path());

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn converted_files_drop_out_of_discovery() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        touch(&input.path().join("a.heic"));
        touch(&input.path().join("b.heic"));

        for task in discover(input.path(), output.path()) {
            touch(&task.output_path);
        }

        assert!(discover(input.path(), output.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn follows_file_symlinks_but_not_directory_symlinks() {
        use std::os::unix::fs::symlink;

        let input = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        touch(&elsewhere.path().join("target.heic"));
        touch(&elsewhere.path().join("dir/inside.heic"));
        touch(&input.path().join("plain.heic"));
        symlink(elsewhere.path().join("target.heic"), input.path().join("link.heic")).unwrap();
        symlink(elsewhere.path().join("dir"), input.path().join("linked_dir")).unwrap();

        let tasks = discover(input.path(), output.path());

        assert_eq!(
            inputs(&tasks),
            vec![input.path().join("link.heic"), input.path().join("plain.heic")]
        );
        assert_eq!(tasks[0].output_path, output.path().join("link.jpg"));
    }

    #[test]
    fn missing_input_directory_yields_nothing() {
        let output = TempDir::new().unwrap();
        let tasks = discover(&output.path().join("does-not-exist"), output.path());
        assert!(tasks.is_empty());
    }
}
