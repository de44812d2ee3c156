//! File handles and the file-classification rules.
//!
//! The request assembler never touches `std::fs` directly. It sees files
//! through [`FileSource`], which exposes only what the routing rules need:
//! a base name, whether the handle is a readable regular file, and the bytes.
//! [`Path`]/[`PathBuf`] implement it against the local filesystem and
//! [`MemoryFile`] implements it for in-memory buffers.
//!
//! Classification is by name only and is case-sensitive: `report.PDF` is not
//! a PDF. Handles that do not exist or are directories never match anything.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the mandatory entry document for the Chromium HTML and Markdown routes.
pub const INDEX_HTML: &str = "index.html";

const EXTENSION_MARKDOWN: &str = "md";
const EXTENSION_PDF: &str = "pdf";

/// Extensions accepted by the LibreOffice route.
///
/// Kept as published by the service; `sxw` appears twice in that list.
pub const OFFICE_EXTENSIONS: &[&str] = &[
    "bib", "doc", "xml", "docx", "fodt", "html", "ltx", "txt", "odt", "ott", "pdb", "pdf", "psw",
    "rtf", "sdw", "stw", "sxw", "uot", "vor", "wps", "epub", "png", "bmp", "emf", "eps", "fodg",
    "gif", "jpg", "met", "odd", "otg", "pbm", "pct", "pgm", "ppm", "ras", "std", "svg", "svm",
    "swf", "sxd", "sxw", "tiff", "xhtml", "xpm", "fodp", "potm", "pot", "pptx", "pps", "ppt",
    "pwp", "sda", "sdd", "sti", "sxi", "uop", "wmf", "csv", "dbf", "dif", "fods", "ods", "ots",
    "pxl", "sdc", "slk", "stc", "sxc", "uos", "xls", "xlt", "xlsx", "tif", "jpeg", "odp",
];

// ── FileSource ───────────────────────────────────────────────────────────

/// Anything that can be uploaded as a multipart file part.
pub trait FileSource: Send + Sync {
    /// Final path component, e.g. `index.html`. `None` if there is none or
    /// it is not valid UTF-8.
    fn base_name(&self) -> Option<&str>;

    /// True when the handle refers to an existing regular file.
    fn is_regular_file(&self) -> bool;

    /// Read the whole content.
    fn read_bytes(&self) -> io::Result<Vec<u8>>;

    /// Extension after the final dot of the base name, or `""` if there is none.
    fn extension(&self) -> &str {
        self.base_name().map(extension_of).unwrap_or("")
    }

    /// Name for logs and error messages. Never used on the wire.
    fn display_name(&self) -> String {
        self.base_name().unwrap_or("<unnamed>").to_string()
    }
}

/// Extension after the final dot of `name`; `".md"` yields `"md"`.
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

impl FileSource for Path {
    fn base_name(&self) -> Option<&str> {
        self.file_name().and_then(|n| n.to_str())
    }

    fn is_regular_file(&self) -> bool {
        self.is_file()
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        std::fs::read(self)
    }

    fn display_name(&self) -> String {
        match self.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.display().to_string(),
        }
    }
}

impl FileSource for PathBuf {
    fn base_name(&self) -> Option<&str> {
        self.as_path().base_name()
    }

    fn is_regular_file(&self) -> bool {
        self.as_path().is_regular_file()
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        self.as_path().read_bytes()
    }

    fn display_name(&self) -> String {
        self.as_path().display_name()
    }
}

impl<T: FileSource + ?Sized> FileSource for &T {
    fn base_name(&self) -> Option<&str> {
        (**self).base_name()
    }

    fn is_regular_file(&self) -> bool {
        (**self).is_regular_file()
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        (**self).read_bytes()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}

impl<T: FileSource + ?Sized> FileSource for Box<T> {
    fn base_name(&self) -> Option<&str> {
        (**self).base_name()
    }

    fn is_regular_file(&self) -> bool {
        (**self).is_regular_file()
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        (**self).read_bytes()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}

impl<T: FileSource + ?Sized> FileSource for Arc<T> {
    fn base_name(&self) -> Option<&str> {
        (**self).base_name()
    }

    fn is_regular_file(&self) -> bool {
        (**self).is_regular_file()
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        (**self).read_bytes()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}

/// An in-memory file: a name plus its bytes. Always a regular file.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryFile {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryFile {
    /// Any directory components in `name` are dropped.
    pub fn new(name: impl AsRef<str>, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.as_ref();
        let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
        Self {
            name: base.to_string(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for MemoryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FileSource for MemoryFile {
    fn base_name(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }

    fn is_regular_file(&self) -> bool {
        !self.name.is_empty()
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

// ── Classification ───────────────────────────────────────────────────────

fn has_extension<F: FileSource + ?Sized>(file: &F, extension: &str) -> bool {
    file.is_regular_file() && file.extension() == extension
}

/// `*.md` regular file.
pub fn is_markdown<F: FileSource + ?Sized>(file: &F) -> bool {
    has_extension(file, EXTENSION_MARKDOWN)
}

/// `*.pdf` regular file.
pub fn is_pdf<F: FileSource + ?Sized>(file: &F) -> bool {
    has_extension(file, EXTENSION_PDF)
}

/// Regular file whose base name is exactly `index.html`.
pub fn is_index_html<F: FileSource + ?Sized>(file: &F) -> bool {
    file.is_regular_file() && file.base_name() == Some(INDEX_HTML)
}

/// Regular file with an extension from [`OFFICE_EXTENSIONS`].
pub fn is_supported_by_office_converter<F: FileSource + ?Sized>(file: &F) -> bool {
    file.is_regular_file() && OFFICE_EXTENSIONS.contains(&file.extension())
}

/// True if any element is an [`is_index_html`] file.
pub fn contains_index<F: FileSource>(files: &[F]) -> bool {
    files.iter().any(is_index_html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Builds a fixture tree resembling a small HTML/Markdown project.
    fn fixtures() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("markdown")).unwrap();
        std::fs::create_dir_all(root.join("html")).unwrap();
        std::fs::create_dir_all(root.join("folder.md")).unwrap();
        std::fs::write(root.join("markdown/test.md"), "# Title\n").unwrap();
        std::fs::write(root.join("markdown/index.html"), "<html></html>").unwrap();
        std::fs::write(root.join("html/index.html"), "<html></html>").unwrap();
        std::fs::write(root.join("html/footer.html"), "<footer/>").unwrap();
        std::fs::write(root.join("test.pdf"), b"%PDF-1.7").unwrap();
        std::fs::write(root.join("UPPER.PDF"), b"%PDF-1.7").unwrap();
        std::fs::write(root.join("sheet.xlsx"), b"PK").unwrap();
        std::fs::write(root.join("notes"), "no extension").unwrap();
        dir
    }

    #[test]
    fn markdown_detection() {
        let dir = fixtures();
        let root = dir.path();
        assert!(is_markdown(&root.join("markdown/test.md")));
        assert!(!is_markdown(&root.join("markdown/index.html")));
        assert!(!is_markdown(&root.join("missing.md")));
        assert!(!is_markdown(&root.join("folder.md")), "directories never match");
    }

    #[test]
    fn index_detection() {
        let dir = fixtures();
        let root = dir.path();
        assert!(is_index_html(&root.join("html/index.html")));
        assert!(is_index_html(&root.join("markdown/index.html")));
        assert!(!is_index_html(&root.join("html/footer.html")));
        assert!(!is_index_html(&root.join("missing.html")));
    }

    #[test]
    fn pdf_detection_is_case_sensitive() {
        let dir = fixtures();
        let root = dir.path();
        assert!(is_pdf(&root.join("test.pdf")));
        assert!(!is_pdf(&root.join("UPPER.PDF")));
        assert!(!is_pdf(&root.join("missing.pdf")));
        assert!(!is_pdf(&root.join("markdown/index.html")));
    }

    #[test]
    fn office_converter_support() {
        let dir = fixtures();
        let root = dir.path();
        assert!(is_supported_by_office_converter(&root.join("test.pdf")));
        assert!(is_supported_by_office_converter(&root.join("html/index.html")));
        assert!(is_supported_by_office_converter(&root.join("sheet.xlsx")));
        assert!(!is_supported_by_office_converter(&root.join("markdown/test.md")));
        assert!(!is_supported_by_office_converter(&root.join("missing.html")));
        assert!(!is_supported_by_office_converter(&root.join("notes")));
    }

    #[test]
    fn contains_index_requires_existing_file() {
        let dir = fixtures();
        let root = dir.path();
        let present = [root.join("markdown/test.md"), root.join("markdown/index.html")];
        assert!(contains_index(&present));

        let absent = [
            root.join("markdown/test.md"),
            root.join("missing.html"),
            root.join("missing/index.html"),
        ];
        assert!(!contains_index(&absent));
        assert!(!contains_index::<PathBuf>(&[]));
    }

    #[test]
    fn extension_is_final_dot_segment() {
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of(".md"), "md");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of("trailing."), "");
    }

    #[test]
    fn memory_files_classify_by_name() {
        let index = MemoryFile::new("site/index.html", "<html/>");
        assert_eq!(index.name(), "index.html");
        assert!(is_index_html(&index));
        assert!(is_markdown(&MemoryFile::new("a.md", "# a")));
        assert!(is_pdf(&MemoryFile::new("a.pdf", b"%PDF".to_vec())));
        assert!(!is_pdf(&MemoryFile::new("", b"%PDF".to_vec())));
        assert_eq!(index.read_bytes().unwrap(), b"<html/>");
    }

    #[test]
    fn boxed_handles_mix_sources() {
        let dir = fixtures();
        let files: Vec<Box<dyn FileSource>> = vec![
            Box::new(dir.path().join("markdown/test.md")),
            Box::new(MemoryFile::new("index.html", "<html/>")),
        ];
        assert!(contains_index(&files));
        assert!(is_markdown(&files[0]));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_has_no_base_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("assets").join(OsStr::from_bytes(b"logo\xff.png"));
        assert_eq!(path.base_name(), None);
        assert_eq!(FileSource::extension(&path), "");
        assert_eq!(path.display_name(), "logo\u{FFFD}.png");
    }
}
