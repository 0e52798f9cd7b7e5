//! DOCX paragraph extraction via `docx-rs`.
//!
//! Only paragraphs that are direct children of the document body are
//! returned, empty ones included; tables, headers and text boxes are
//! skipped. A paragraph's text is the concatenation of its run texts
//! (runs nested in hyperlinks too), with tabs read as `\t` and breaks as
//! `\n`.

use crate::collaborators::DocxReader;
use crate::error::TextLabError;
use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use tracing::debug;

/// Reads DOCX body paragraphs with `docx-rs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRsReader;

impl DocxReader for DocxRsReader {
    fn paragraphs_of(&self, bytes: &[u8]) -> Result<Vec<String>, TextLabError> {
        let docx = read_docx(bytes).map_err(|e| {
            TextLabError::collaborator("docx", format!("not a readable DOCX: {e:?}"))
        })?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();

        debug!("DOCX has {} body paragraphs", paragraphs.len());
        Ok(paragraphs)
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&mut text, &para.children);
    text
}

fn push_children(text: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(text, run),
            ParagraphChild::Hyperlink(link) => push_children(text, &link.children),
            _ => {}
        }
    }
}

fn push_run(text: &mut String, run: &Run) {
    for rc in &run.children {
        match rc {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}
