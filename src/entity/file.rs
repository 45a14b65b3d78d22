//! File entities: whole-buffer content operations.

use log::{debug, trace};

use crate::{Adapter, FileType, FsError, mime};

use super::{Destination, Entity, EntityPath};

/// A regular file bound to an adapter.
///
/// Constructing one never touches storage; see [`Adapter::file`]. Content is
/// always read and written as a whole buffer.
#[derive(Debug, Clone)]
pub struct File<'a> {
    adapter: &'a Adapter,
    paths: EntityPath,
}

impl<'a> File<'a> {
    pub(crate) fn new(adapter: &'a Adapter, path: &str) -> Self {
        Self {
            adapter,
            paths: EntityPath::bind(adapter, path),
        }
    }

    pub(crate) fn create_in(
        adapter: &'a Adapter,
        path: &str,
        content: impl AsRef<[u8]>,
        mode: u32,
    ) -> Result<File<'a>, FsError> {
        let file = File::new(adapter, path);
        file.write(content)?.chmod(mode)?;
        Ok(file)
    }

    /// The full content, or an empty buffer if it cannot be read.
    pub fn read(&self) -> Vec<u8> {
        self.try_read().unwrap_or_else(|err| {
            trace!("read of {} failed: {err}", self.path().display());
            Vec::new()
        })
    }

    /// The full content.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    pub fn try_read(&self) -> Result<Vec<u8>, FsError> {
        self.adapter.storage().read(self.path())
    }

    /// The content as text, with invalid UTF-8 replaced.
    pub fn read_to_string(&self) -> String {
        String::from_utf8_lossy(&self.read()).into_owned()
    }

    /// Replace the content.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    pub fn write(&self, content: impl AsRef<[u8]>) -> Result<&Self, FsError> {
        self.adapter.storage().write(self.path(), content.as_ref())?;
        Ok(self)
    }

    /// Append to the content, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    pub fn append(&self, content: impl AsRef<[u8]>) -> Result<&Self, FsError> {
        self.adapter.storage().append(self.path(), content.as_ref())?;
        Ok(self)
    }

    /// Write `content` to `path` and set its mode.
    ///
    /// Always returns a new entity bound to `path`; `self` is not rebound.
    ///
    /// # Errors
    ///
    /// Native failures propagate.
    pub fn create(
        &self,
        path: &str,
        content: impl AsRef<[u8]>,
        mode: u32,
    ) -> Result<File<'a>, FsError> {
        File::create_in(self.adapter, path, content, mode)
    }

    /// Extension without the leading dot; empty if there is none.
    pub fn extension(&self) -> String {
        self.path()
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// MIME type of the content.
    ///
    /// Asks the backend to sniff the content first. If it cannot, or only
    /// reports something generic, the extension table decides.
    pub fn mime(&self) -> String {
        match self.adapter.storage().sniff_mime(self.path()) {
            Some(sniffed) if !mime::is_generic(&sniffed) => sniffed,
            _ => mime::from_extension(&self.extension()).to_string(),
        }
    }

    /// Deserialize the content as JSON.
    ///
    /// # Errors
    ///
    /// - native read failures
    /// - [`FsError::Deserialization`] for malformed content
    #[cfg(feature = "serde")]
    pub fn read_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, FsError> {
        let bytes = self.try_read()?;
        serde_json::from_slice(&bytes).map_err(|e| FsError::Deserialization(e.to_string()))
    }

    /// Serialize `value` as pretty-printed JSON and replace the content.
    ///
    /// # Errors
    ///
    /// - [`FsError::Serialization`] if `value` cannot be serialized
    /// - native write failures
    #[cfg(feature = "serde")]
    pub fn write_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<&Self, FsError> {
        let bytes =
            serde_json::to_vec_pretty(value).map_err(|e| FsError::Serialization(e.to_string()))?;
        self.write(bytes)
    }
}

impl<'a> Entity<'a> for File<'a> {
    type Copy = File<'a>;

    fn adapter(&self) -> &'a Adapter {
        self.adapter
    }

    fn paths(&self) -> &EntityPath {
        &self.paths
    }

    fn paths_mut(&mut self) -> &mut EntityPath {
        &mut self.paths
    }

    fn file_type(&self) -> FileType {
        FileType::File
    }

    /// Copy this file into `destination` under the same name.
    ///
    /// The content is read into memory and written out in one go. Nothing is
    /// written when the source cannot be read.
    ///
    /// # Errors
    ///
    /// Native failures from reading the source or writing and chmod-ing the
    /// copy.
    fn copy_to<'d>(
        &self,
        destination: impl Into<Destination<'d, 'a>>,
        mode: u32,
    ) -> Result<File<'a>, FsError>
    where
        'a: 'd,
    {
        let destination = destination.into().into_directory(self.adapter);
        let copy = destination.create_file(&self.name(), self.try_read()?, mode)?;
        debug!("copied {} to {}", self.path().display(), copy.path().display());
        Ok(copy)
    }

    fn delete(&self) -> Result<&Self, FsError> {
        self.adapter.storage().remove_file(self.path())?;
        debug!("deleted file {}", self.path().display());
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFs;

    fn adapter() -> Adapter {
        Adapter::new(MemoryFs::new(), "").unwrap()
    }

    #[test]
    fn create_then_read() {
        let adapter = adapter();
        let seed = adapter.file("/seed");
        let file = seed.create("/hello.txt", "hello", 0o640).unwrap();

        assert_eq!(file.read(), b"hello");
        assert_eq!(file.read_to_string(), "hello");
        assert_eq!(file.permission().as_deref(), Some("0640"));
        assert!(!seed.exists());
        assert_eq!(seed.original_path(), "/seed");
    }

    #[test]
    fn write_replaces_and_append_extends() {
        let adapter = adapter();
        let file = adapter.file("/log.txt");
        file.write("one").unwrap().append("two").unwrap();
        assert_eq!(file.read_to_string(), "onetwo");

        file.write("three").unwrap();
        assert_eq!(file.size(), Some(5));
    }

    #[test]
    fn read_missing_is_empty_but_try_read_fails() {
        let adapter = adapter();
        let ghost = adapter.file("/ghost");
        assert!(ghost.read().is_empty());
        assert!(matches!(ghost.try_read(), Err(FsError::NotFound { .. })));
    }

    #[test]
    fn extension_and_mime_fallback() {
        let adapter = adapter();
        let json = adapter.file("/data.JSON");
        json.write("{}").unwrap();
        let bare = adapter.file("/README");
        bare.write("text").unwrap();

        assert_eq!(json.extension(), "JSON");
        assert_eq!(json.mime(), "application/json");
        assert_eq!(bare.extension(), "");
        assert_eq!(bare.mime(), mime::OCTET_STREAM);
    }

    #[test]
    fn mime_of_empty_file_uses_extension() {
        let adapter = adapter();
        let empty = adapter.file("/a.json");
        empty.write("").unwrap();
        let png = adapter.file("/image.txt");
        png.write(b"\x89PNG\r\n\x1a\n0000").unwrap();

        assert_eq!(empty.mime(), "application/json");
        assert_eq!(png.mime(), "image/png");
    }

    #[test]
    fn unreadable_source_is_neither_copied_nor_moved() {
        let adapter = adapter();
        let target = adapter.directory("/").create("target", 0o755).unwrap();
        let ghost = adapter.file("/ghost.txt");

        assert!(matches!(
            ghost.copy_to(&target, 0o644),
            Err(FsError::NotFound { .. })
        ));
        assert!(ghost.move_to(&target).is_err());
        assert!(!adapter.file("/target/ghost.txt").exists());
        assert!(target.scan().is_empty());
    }

    #[test]
    fn copy_to_keeps_name_and_content() {
        let adapter = adapter();
        adapter.directory("").create("target", 0o755).unwrap();
        let file = adapter.file("/a.txt");
        file.write("payload").unwrap();

        let copy = file.copy_to("/target", 0o600).unwrap();
        assert_eq!(copy.original_path(), "/target/a.txt");
        assert_eq!(copy.read(), b"payload");
        assert_eq!(copy.permission().as_deref(), Some("0600"));
        assert!(file.exists());
    }

    #[test]
    fn delete_removes_file() {
        let adapter = adapter();
        let file = adapter.file("/gone");
        file.write("x").unwrap();
        file.delete().unwrap();
        assert!(!file.exists());
        assert!(file.delete().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip() {
        let adapter = adapter();
        let file = adapter.file("/config.json");
        file.write_json(&serde_json::json!({ "root": "/srv" })).unwrap();

        let value: serde_json::Value = file.read_json().unwrap();
        assert_eq!(value["root"], "/srv");

        file.write("not json").unwrap();
        assert!(matches!(
            file.read_json::<serde_json::Value>(),
            Err(FsError::Deserialization(_))
        ));
    }
}
