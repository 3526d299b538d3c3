use std::path::{Component, Path, PathBuf};

/// Renders a path for diagnostics.
///
/// Existing paths are canonicalized. Paths that do not exist (the usual case
/// for a missing file error) are made absolute against the working directory
/// and lexically normalized instead.
pub fn best_effort_path_display(path: &Path) -> String {
    if let Ok(canonical) = path.canonicalize() {
        return canonical.display().to_string();
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    normalize_lexically(&absolute).display().to_string()
}

fn normalize_lexically(path: &Path) -> PathBuf {
    path.components()
        .fold(Vec::new(), |mut kept: Vec<Component>, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if matches!(kept.last(), Some(Component::Normal(_))) {
                        kept.pop();
                    }
                }
                other => kept.push(other),
            }
            kept
        })
        .iter()
        .collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self.as_ref())
    }
}
