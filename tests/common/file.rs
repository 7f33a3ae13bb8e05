use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(spec: FileSpec) {
    if let Some(parent) = spec.path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    std::fs::write(&spec.path, spec.content).expect("Failed to write file");
}

pub fn delete_path(path: &Path) {
    std::fs::remove_file(path).expect("Failed to delete file");
}
