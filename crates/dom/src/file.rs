//! Files handed over by a drop or a file picker.

use std::path::Path;
use std::sync::Arc;

/// A user-supplied file.
#[derive(Clone, Debug, PartialEq)]
pub struct File {
    pub name: String,
    /// Declared media type, empty when unknown.
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl File {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, leaving the media type to be sniffed.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, String::new(), bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Payload of a drag-and-drop gesture.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataTransfer {
    pub files: Vec<File>,
}

impl DataTransfer {
    pub fn new(files: Vec<File>) -> Self {
        Self { files }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image() {
        assert!(File::new("a.png", "image/png", vec![1u8, 2]).is_image());
        assert!(!File::new("a.txt", "text/plain", Vec::<u8>::new()).is_image());
        assert!(!File::new("blob", "", Vec::<u8>::new()).is_image());
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let file = File::read(&path).unwrap();
        assert_eq!(file.name, "notes.txt");
        assert_eq!(file.size(), 5);
        assert_eq!(file.mime_type, "");
        assert!(File::read(&dir.path().join("missing")).is_err());
    }
}
