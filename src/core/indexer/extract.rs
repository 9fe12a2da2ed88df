//! Text extraction from Office documents.
//!
//! Office Open XML files are zip archives of XML parts. Extraction
//! reads the relevant parts and renders their text one line per
//! paragraph (documents, presentations) or per row (spreadsheets).
//! Anything else yields empty text.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::core::error::{DocSearchError, Result};
use crate::core::indexer::walker::extension_of;

/// Source of document text, keyed off the file extension
///
/// Implementations return `Err` on failure; the index builder
/// downgrades any error to empty text for that file.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Extractor for `.docx`, `.pptx` and `.xlsx`
#[derive(Debug, Clone, Copy, Default)]
pub struct OfficeExtractor;

impl OfficeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for OfficeExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let kind = match extension_of(path) {
            Some(ext) => ext,
            None => return Ok(String::new()),
        };

        if !matches!(kind.as_str(), "docx" | "pptx" | "xlsx") {
            return Ok(String::new());
        }

        let file = File::open(path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let lines = match kind.as_str() {
            "docx" => docx_lines(&mut archive)?,
            "pptx" => pptx_lines(&mut archive)?,
            _ => xlsx_lines(&mut archive)?,
        };

        Ok(lines.join("\n"))
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

/// Numbered parts like `ppt/slides/slide12.xml`, in numeric order
fn numbered_parts<R: Read + Seek>(archive: &ZipArchive<R>, prefix: &str) -> Vec<String> {
    let mut parts: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let n = name.strip_prefix(prefix)?.strip_suffix(".xml")?;
            n.parse::<u32>().ok().map(|n| (n, name.to_string()))
        })
        .collect();
    parts.sort();
    parts.into_iter().map(|(_, name)| name).collect()
}

fn docx_lines<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let xml = read_part(archive, "word/document.xml")?.ok_or_else(|| {
        DocSearchError::ExtractionFailed("word/document.xml missing".to_string())
    })?;
    paragraphs(&xml)
}

fn pptx_lines<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for name in numbered_parts(archive, "ppt/slides/slide") {
        if let Some(xml) = read_part(archive, &name)? {
            lines.extend(paragraphs(&xml)?);
        }
    }
    Ok(lines)
}

/// Paragraph texts of a WordprocessingML or DrawingML part
///
/// `<p>` closes a line and `<t>` carries its text. Tabs render as a
/// tab, `<br>`/`<cr>` as a newline inside the paragraph.
fn paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                b"p" => lines.push(String::new()),
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::CData(t) if in_text => current.push_str(&String::from_utf8_lossy(&t)),
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => lines.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(lines)
}

fn xlsx_lines<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let shared = match read_part(archive, "xl/sharedStrings.xml")? {
        Some(xml) => shared_strings(&xml)?,
        None => Vec::new(),
    };

    let mut lines = Vec::new();
    for name in numbered_parts(archive, "xl/worksheets/sheet") {
        if let Some(xml) = read_part(archive, &name)? {
            lines.extend(sheet_rows(&xml, &shared)?);
        }
    }
    Ok(lines)
}

/// Entries of `xl/sharedStrings.xml`, rich-text runs concatenated
fn shared_strings(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(t) if in_text && !in_phonetic => current.push_str(&t.unescape()?),
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                b"si" => strings.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(strings)
}

#[derive(Default)]
struct Cell {
    kind: String,
    value: String,
    capture: bool,
}

impl Cell {
    fn render(self, shared: &[String]) -> String {
        match self.kind.as_str() {
            "s" => self
                .value
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|i| shared.get(i).cloned())
                .unwrap_or_default(),
            "b" => match self.value.trim() {
                "1" => "TRUE".to_string(),
                "0" => "FALSE".to_string(),
                other => other.to_string(),
            },
            _ => self.value,
        }
    }
}

/// Pad `rows` with empty lines for row numbers skipped before `row`
///
/// `last_row` is the 1-based number of the previous row (0 before the
/// first); a row without an `r` attribute follows the previous one.
fn start_row(row: &BytesStart, last_row: &mut u64, rows: &mut Vec<String>) -> Result<()> {
    let mut number = *last_row + 1;
    for attr in row.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"r" {
            if let Ok(n) = attr.unescape_value()?.trim().parse::<u64>() {
                number = n.max(*last_row + 1);
            }
        }
    }

    rows.extend((*last_row + 1..number).map(|_| String::new()));
    *last_row = number;
    Ok(())
}

/// Worksheet rows as lines of non-empty cell values joined by a space
///
/// Every row from row 1 to the last one in the sheet yields a line,
/// so blank rows and row numbers skipped in the XML become empty
/// lines and line numbers follow the sheet's rows.
fn sheet_rows(xml: &str, shared: &[String]) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell: Option<Cell> = None;
    let mut last_row = 0;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => {
                    row.clear();
                    start_row(&e, &mut last_row, &mut rows)?;
                }
                b"c" => {
                    let mut kind = String::new();
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"t" {
                            kind = attr.unescape_value()?.into_owned();
                        }
                    }
                    cell = Some(Cell {
                        kind,
                        ..Cell::default()
                    });
                }
                b"v" | b"t" => {
                    if let Some(cell) = cell.as_mut() {
                        cell.capture = true;
                    }
                }
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"row" => {
                start_row(&e, &mut last_row, &mut rows)?;
                rows.push(String::new());
            }
            Event::Text(t) => {
                if let Some(cell) = cell.as_mut().filter(|c| c.capture) {
                    cell.value.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => {
                    if let Some(cell) = cell.as_mut() {
                        cell.capture = false;
                    }
                }
                b"c" => {
                    if let Some(done) = cell.take() {
                        let text = done.render(shared);
                        if !text.trim().is_empty() {
                            row.push(text);
                        }
                    }
                }
                b"row" => {
                    rows.push(row.join(" "));
                    row.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(rows)
}
