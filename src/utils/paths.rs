use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Makes a path absolute, resolving relative paths from the current directory.
///
/// The result is normalised lexically: `.` components are dropped and `..`
/// removes the preceding normal component. Symlinks are not resolved, so the
/// path does not need to exist.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined
pub fn make_absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let current_dir = std::env::current_dir().context("Could not determine current directory")?;
        current_dir.join(path)
    };
    Ok(normalize_lexically(&joined))
}

/// Folds `.` and `..` components without touching the filesystem.
///
/// A `..` directly below the root is dropped, matching how the OS resolves
/// `/..`. Leading `..` components of a relative path are kept.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Cleans a glob pattern the way a path would be cleaned.
///
/// Repeated separators, `.` segments and trailing separators are removed and
/// `..` folds into the preceding literal segment. Segments containing glob
/// metacharacters are never folded away by `..`.
#[must_use]
pub fn clean_pattern(pattern: &str) -> String {
    if pattern.is_empty() {
        return ".".to_string();
    }
    let rooted = pattern.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in pattern.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." && !has_glob_meta(last) => {
                    segments.pop();
                }
                None if rooted => {}
                _ => segments.push(segment),
            },
            other => segments.push(other),
        }
    }
    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{body}"),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

/// Returns the extension of a file name: the text after its last `.`.
///
/// Names without a `.` have no extension. A leading-dot name such as `.yaml`
/// has the extension `yaml`.
#[must_use]
pub fn file_extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

fn has_glob_meta(segment: &str) -> bool {
    segment.contains(['*', '?', '[', ']', '{', '}'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_absolute_keeps_absolute_paths() {
        let path = PathBuf::from("/repo/a.yaml");
        assert_eq!(make_absolute(&path).unwrap(), path);
    }

    #[test]
    fn test_make_absolute_joins_current_dir() {
        let current = std::env::current_dir().unwrap();
        let result = make_absolute(Path::new("some/file.txt")).unwrap();
        assert_eq!(result, current.join("some/file.txt"));
        assert!(result.is_absolute());
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/repo/./sub/../a.yaml")),
            PathBuf::from("/repo/a.yaml")
        );
        assert_eq!(normalize_lexically(Path::new("/../etc")), PathBuf::from("/etc"));
        assert_eq!(normalize_lexically(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize_lexically(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_clean_pattern() {
        assert_eq!(clean_pattern("**/generated/**/"), "**/generated/**");
        assert_eq!(clean_pattern("./a//b/./*.yaml"), "a/b/*.yaml");
        assert_eq!(clean_pattern("/repo/sub/../vendor/**"), "/repo/vendor/**");
        assert_eq!(clean_pattern("**/../x"), "**/../x");
        assert_eq!(clean_pattern("/.."), "/");
        assert_eq!(clean_pattern(""), ".");
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a.yaml"), Some("yaml"));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(file_extension(".yml"), Some("yml"));
        assert_eq!(file_extension("Makefile"), None);
        assert_eq!(file_extension("trailing."), Some(""));
    }
}
