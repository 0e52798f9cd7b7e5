//! PDF text extraction via pdfium.
//!
//! pdfium is a C++ library loaded at runtime. The binding is attempted in
//! this order:
//!
//! 1. the directory passed to [`PdfiumTextReader::new`],
//! 2. the directory in `PDFIUM_LIB_PATH`,
//! 3. the current directory, then the system loader path.
//!
//! Calls are blocking; the extractor runs them under `spawn_blocking`.

use crate::collaborators::PdfTextReader;
use crate::error::TextLabError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads every page's text layer with pdfium.
#[derive(Debug, Clone, Default)]
pub struct PdfiumTextReader {
    library_dir: Option<PathBuf>,
}

impl PdfiumTextReader {
    pub fn new(library_dir: Option<PathBuf>) -> Self {
        Self { library_dir }
    }

    fn bind(&self) -> Result<Pdfium, TextLabError> {
        let configured = self
            .library_dir
            .clone()
            .or_else(|| std::env::var_os("PDFIUM_LIB_PATH").map(PathBuf::from));

        let bindings = match configured {
            Some(dir) => bind_at(&dir)?,
            None => bind_at(Path::new("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| TextLabError::PdfiumBindingFailed(format!("{e:?}")))?,
        };

        Ok(Pdfium::new(bindings))
    }
}

fn bind_at(dir: &Path) -> Result<Box<dyn PdfiumLibraryBindings>, TextLabError> {
    let lib = Pdfium::pdfium_platform_library_name_at_path(dir);
    debug!("Binding pdfium from {}", lib.display());
    Pdfium::bind_to_library(&lib)
        .map_err(|e| TextLabError::PdfiumBindingFailed(format!("{}: {e:?}", lib.display())))
}

impl PdfTextReader for PdfiumTextReader {
    fn pages_of(&self, bytes: &[u8]) -> Result<Vec<String>, TextLabError> {
        let pdfium = self.bind()?;

        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| TextLabError::collaborator("pdf", format!("failed to parse PDF: {e:?}")))?;

        let pages = document.pages();
        info!("PDF loaded: {} pages", pages.len());

        let mut texts = Vec::with_capacity(pages.len() as usize);
        for (idx, page) in pages.iter().enumerate() {
            let text = page.text().map_err(|e| {
                TextLabError::collaborator(
                    "pdf",
                    format!("failed to read text of page {}: {e:?}", idx + 1),
                )
            })?;
            let content = text.all();
            debug!("Page {} → {} chars", idx + 1, content.len());
            texts.push(content);
        }

        Ok(texts)
    }
}
