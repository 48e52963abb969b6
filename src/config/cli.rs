use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// Reads inputs relative to `input_dir`, writes outputs under `output_dir`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.input_dir = input_dir.into();
        self
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.input_dir.join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.output_dir.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
