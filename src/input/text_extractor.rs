//! Text extraction from the supported container formats

use crate::error::{Result, ResumeMatcherError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// Joins the body paragraphs of a DOCX document with newlines
pub struct DocxExtractor;

const DOCX_BODY_PART: &str = "word/document.xml";

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut part = archive.by_name(DOCX_BODY_PART)?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)?;

        let paragraphs = self.body_paragraphs(&xml)?;
        Ok(paragraphs.join("\n"))
    }
}

impl DocxExtractor {
    /// Paragraphs that are direct children of `w:body`, in document order.
    /// Table cells, text boxes and other nested paragraphs contribute nothing.
    fn body_paragraphs(&self, xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut paragraphs = Vec::new();
        // Stack position of the open body-level paragraph, and its text so far
        let mut current: Option<(usize, String)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name().as_ref().to_vec();
                    if name == b"w:p" && Self::parent_is(&stack, b"w:body") {
                        current = Some((stack.len(), String::new()));
                    }
                    stack.push(name);
                }
                Event::Empty(e) => {
                    if e.name().as_ref() == b"w:p" && Self::parent_is(&stack, b"w:body") {
                        paragraphs.push(String::new());
                    } else if let Some((depth, text)) = current.as_mut() {
                        if Self::parent_is(&stack, b"w:r") && Self::owns_run(&stack, *depth) {
                            match e.name().as_ref() {
                                b"w:tab" => text.push('\t'),
                                b"w:cr" => text.push('\n'),
                                b"w:br" => {
                                    if Self::is_line_break(&e)? {
                                        text.push('\n');
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                }
                Event::Text(t) => {
                    if let Some((depth, text)) = current.as_mut() {
                        if Self::parent_is(&stack, b"w:t") && Self::owns_run(&stack, *depth) {
                            text.push_str(&t.unescape()?);
                        }
                    }
                }
                Event::End(_) => {
                    stack.pop();
                    if current.as_ref().is_some_and(|(depth, _)| stack.len() == *depth) {
                        if let Some((_, text)) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs)
    }

    fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
        stack.last().map(|p| p.as_slice() == name).unwrap_or(false)
    }

    /// True when the nearest enclosing `w:p` is the body-level paragraph at `depth`
    fn owns_run(stack: &[Vec<u8>], depth: usize) -> bool {
        stack.iter().rposition(|name| name.as_slice() == b"w:p") == Some(depth)
    }

    /// Untyped and `textWrapping` breaks are line breaks; page and column breaks add no text
    fn is_line_break(e: &BytesStart) -> Result<bool> {
        match e.try_get_attribute("w:type")? {
            Some(kind) => Ok(kind.value.as_ref() == b"textWrapping"),
            None => Ok(true),
        }
    }
}

/// Joins per-page PDF text with a single space
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| ResumeMatcherError::PdfExtraction("PDF parser panicked".to_string()))?
        .map_err(|e| ResumeMatcherError::PdfExtraction(format!("Failed to extract text from PDF: {}", e)))?;

        Ok(pages.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer.start_file(DOCX_BODY_PART, SimpleFileOptions::default()).unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_plain_text_verbatim() {
        let text = PlainTextExtractor.extract("Jane Doe\n  Rust, 2019–2024".as_bytes()).unwrap();
        assert_eq!(text, "Jane Doe\n  Rust, 2019–2024");
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let result = PlainTextExtractor.extract(&[0x66, 0x6f, 0xff, 0xfe]);
        assert!(matches!(result, Err(ResumeMatcherError::TextDecoding(_))));
    }

    #[test]
    fn test_docx_paragraphs_joined_with_newlines() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space=\"preserve\"> Doe</w:t></w:r></w:p>\
             <w:p/>\
             <w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
             <w:r><w:t>Rust</w:t><w:tab/><w:t>R&amp;D</w:t></w:r></w:p>",
        );

        let text = DocxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\n\nRust\tR&D");
    }

    #[test]
    fn test_docx_skips_table_paragraphs() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>Summary</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             <w:p><w:r><w:t>Skills</w:t></w:r></w:p>",
        );

        let text = DocxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "Summary\nSkills");
    }

    #[test]
    fn test_docx_ignores_text_boxes_and_page_breaks() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>Intro</w:t></w:r>\
             <w:r><w:pict><v:shape><v:textbox><w:txbxContent>\
             <w:p><w:r><w:t>boxed</w:t><w:br/></w:r></w:p>\
             </w:txbxContent></v:textbox></v:shape></w:pict></w:r>\
             <w:r><w:t xml:space=\"preserve\"> text</w:t><w:br w:type=\"page\"/><w:t>after</w:t></w:r></w:p>\
             <w:p><w:r><w:t>line</w:t><w:br/><w:t>two</w:t></w:r></w:p>",
        );

        let text = DocxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "Intro textafter\nline\ntwo");
    }

    #[test]
    fn test_docx_rejects_non_zip() {
        assert!(DocxExtractor.extract(b"not a zip archive").is_err());
    }

    /// Minimal uncompressed PDF with one Helvetica text line per page
    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let font_id = 3 + 2 * pages.len();
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        ];
        for (i, line) in pages.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
                font_id,
                4 + 2 * i
            ));
            let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", line);
            objects.push(format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content));
        }
        objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string());

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_pdf_pages_joined_with_space_in_order() {
        let bytes = pdf_with_pages(&["Senior backend engineer", "since 2015 until 2020"]);

        let text = PdfExtractor.extract(&bytes).unwrap();
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(text, pages.join(" "));

        let first = text.find("Senior backend engineer").unwrap();
        let second = text.find("since 2015 until 2020").unwrap();
        assert!(first < second);
        assert_eq!(
            text.split_whitespace().collect::<Vec<_>>().join(" "),
            "Senior backend engineer since 2015 until 2020"
        );
    }

    #[test]
    fn test_pdf_rejects_garbage() {
        assert!(PdfExtractor.extract(b"%PDF-1.4 truncated").is_err());
    }
}
