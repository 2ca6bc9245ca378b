//! Text extraction for uploaded files and archives.
//! Supports: TXT, PDF, DOCX, CSV, ZIP
//!
//! The public entry points never fail: problems are reported inline in the
//! returned text so the caller can still summarise something.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::error::AppError;

/// File type of a path: the lower-cased text after the last `.`.
///
/// A name without a dot yields the whole name, lower-cased.
pub fn file_type_of(path: &str) -> String {
    path.rsplit('.').next().unwrap_or_default().to_lowercase()
}

/// Read a file as text according to its type.
pub fn read_file_content(path: &Path, file_type: &str) -> String {
    info!("Extracting text from file: {:?} (type: {})", path, file_type);

    let result = match file_type {
        "txt" => read_txt(path),
        "pdf" => extract_pdf_text(path),
        "docx" => extract_docx_text(path),
        "csv" => extract_csv_text(path),
        "zip" => return extract_zip_content(path),
        other => return format!("Unsupported file type: {}", other),
    };

    match result {
        Ok(text) => {
            info!("Extraction successful: {} characters", text.chars().count());
            text
        }
        Err(e) => {
            warn!("Extraction failed for {:?}: {}", path, e);
            format!("Error reading file: {}", e)
        }
    }
}

/// List the members of a ZIP archive, inlining the text of `.txt` members.
pub fn extract_zip_content(path: &Path) -> String {
    let mut archive = match File::open(path)
        .map_err(AppError::from)
        .and_then(|file| zip::ZipArchive::new(file).map_err(AppError::from))
    {
        Ok(archive) => archive,
        Err(e) => {
            warn!("ZIP extraction failed for {:?}: {}", path, e);
            return format!("ZIP extraction failed: {}", e);
        }
    };

    let mut lines = Vec::new();
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                lines.push(format!("❌ Error reading entry {}: {}", index, e));
                continue;
            }
        };

        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        lines.push(format!("📁 File: {}", name));

        if name.ends_with(".txt") {
            match read_entry_text(&mut entry) {
                Ok(text) => lines.push(text),
                Err(e) => lines.push(format!("❌ Error reading {}: {}", name, e)),
            }
        }
    }

    lines.join("\n")
}

fn read_entry_text(entry: &mut impl Read) -> Result<String, AppError> {
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(String::from_utf8(bytes)?)
}

fn read_txt(path: &Path) -> Result<String, AppError> {
    Ok(String::from_utf8(fs::read(path)?)?)
}

/// Page-by-page text; pages without text are skipped, the rest joined by a space.
fn extract_pdf_text(path: &Path) -> Result<String, AppError> {
    let document = lopdf::Document::load(path)?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        let text = document.extract_text(&[*page_number])?;
        if !text.trim().is_empty() {
            pages.push(text.trim().to_string());
        }
    }

    Ok(pages.join(" "))
}

/// Paragraph texts joined by a space.
fn extract_docx_text(path: &Path) -> Result<String, AppError> {
    let bytes = fs::read(path)?;
    let docx = docx_rs::read_docx(&bytes)?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(
                para.children
                    .iter()
                    .filter_map(|pc| match pc {
                        docx_rs::ParagraphChild::Run(run) => Some(
                            run.children
                                .iter()
                                .filter_map(|rc| match rc {
                                    docx_rs::RunChild::Text(t) => Some(t.text.as_str()),
                                    _ => None,
                                })
                                .collect::<String>(),
                        ),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join(" "))
}

/// Cells joined by `", "`, rows joined by a space.
fn extract_csv_text(path: &Path) -> Result<String, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().collect::<Vec<_>>().join(", "));
    }

    Ok(rows.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_file_type_of() {
        assert_eq!(file_type_of("uploads/abc_Report.PDF"), "pdf");
        assert_eq!(file_type_of("archive.tar.gz"), "gz");
        assert_eq!(file_type_of("README"), "readme");
    }

    #[test]
    fn test_txt_extraction() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "Bonjour le monde: é, è, ç").unwrap();

        assert_eq!(read_file_content(&path, "txt"), "Bonjour le monde: é, è, ç");
    }

    #[test]
    fn test_csv_extraction() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "name,age\nAlice,30\nBob,25,London\n").unwrap();

        assert_eq!(
            read_file_content(&path, "csv"),
            "name, age Alice, 30 Bob, 25, London"
        );
    }

    #[test]
    fn test_docx_extraction() {
        use docx_rs::{Docx, Paragraph, Run};

        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        let file = File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Hello")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("World")))
            .build()
            .pack(file)
            .unwrap();

        assert_eq!(read_file_content(&path, "docx"), "Hello World");
    }

    #[test]
    fn test_unsupported_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.xyz");
        fs::write(&path, b"binary").unwrap();

        assert_eq!(read_file_content(&path, "xyz"), "Unsupported file type: xyz");
    }

    #[test]
    fn test_missing_file_reports_inline() {
        let dir = tempdir().unwrap();
        let text = read_file_content(&dir.path().join("gone.txt"), "txt");
        assert!(text.starts_with("Error reading file: "));
    }

    #[test]
    fn test_invalid_pdf_reports_inline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        fs::write(&path, b"This is not a PDF").unwrap();

        assert!(read_file_content(&path, "pdf").starts_with("Error reading file: "));
    }

    /// One page per entry, each showing its text in Courier.
    fn write_pdf(path: &Path, page_texts: &[&str]) {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_pdf_pages_joined_by_space() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two_pages.pdf");
        write_pdf(&path, &["Hello", "World"]);

        assert_eq!(read_file_content(&path, "pdf"), "Hello World");
    }

    #[test]
    fn test_zip_listing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bundle.zip");
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        writer.add_directory("docs/", options).unwrap();
        writer.start_file("docs/readme.txt", options).unwrap();
        writer.write_all(b"hello from zip").unwrap();
        writer.start_file("logo.png", options).unwrap();
        writer.write_all(&[0x89, 0x50, 0x4e, 0x47]).unwrap();
        writer.start_file("broken.txt", options).unwrap();
        writer.write_all(&[0xff, 0xfe, 0xfd]).unwrap();
        writer.finish().unwrap();

        let content = extract_zip_content(&path);
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "📁 File: docs/readme.txt");
        assert_eq!(lines[1], "hello from zip");
        assert_eq!(lines[2], "📁 File: logo.png");
        assert_eq!(lines[3], "📁 File: broken.txt");
        assert!(lines[4].starts_with("❌ Error reading broken.txt: "));
        assert_eq!(lines.len(), 5);

        // file_reader dispatches zip types to the same reader
        assert_eq!(read_file_content(&path, "zip"), content);
    }

    #[test]
    fn test_zip_open_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.zip");
        fs::write(&path, b"not an archive").unwrap();

        assert!(extract_zip_content(&path).starts_with("ZIP extraction failed: "));
    }
}
