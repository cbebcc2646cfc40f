use rand::Rng;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Layout of the uploads directory:
/// `<root>/<stored upload>`, `<root>/processed/<output>`, `<root>/tmp/<uuid>`.
pub struct PathBuilder {
    root: PathBuf,
}

impl PathBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("processed")
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.join("tmp")
    }

    /// Staging path for an atomic write
    pub fn temp_path(&self, id: Uuid) -> PathBuf {
        self.temp_dir().join(id.to_string())
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.processed_dir().join(file_name)
    }

    pub fn upload_path(&self, stored_name: &str) -> PathBuf {
        self.root.join(stored_name)
    }

    /// `<field>-<millis>-<random><ext>`, keeping the original extension.
    pub fn stored_upload_name(field: &str, original_name: &str) -> String {
        let field: String = field
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        let field = if field.is_empty() { "file".to_string() } else { field };

        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();

        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
        format!("{}-{}-{}{}", field, millis, suffix, ext)
    }
}
