use crate::domain::ports::DomainSource;
use crate::utils::error::{DirectoryError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::io::{Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const FIRST_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// 直接讀取 xlsx 壓縮檔中的 XML，只取第一個工作表每列的第一個儲存格
#[derive(Debug, Default, Clone, Copy)]
pub struct SpreadsheetReader;

impl SpreadsheetReader {
    pub fn parse<R: Read + Seek>(reader: R) -> Result<Vec<String>> {
        let mut archive = ZipArchive::new(reader)?;

        let shared = match read_part(&mut archive, SHARED_STRINGS_PART)? {
            Some(xml) => parse_shared_strings(&xml)?,
            None => Vec::new(),
        };
        tracing::debug!("Loaded {} shared strings", shared.len());

        match read_part(&mut archive, FIRST_SHEET_PART)? {
            Some(xml) => first_column_values(&xml, &shared),
            None => {
                tracing::warn!("Workbook has no {}, no domains read", FIRST_SHEET_PART);
                Ok(Vec::new())
            }
        }
    }
}

impl DomainSource for SpreadsheetReader {
    fn read_domains(&self, path: &Path) -> Result<Vec<String>> {
        let to_parse_error = |e: DirectoryError| DirectoryError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let file = std::fs::File::open(path).map_err(|e| to_parse_error(e.into()))?;
        Self::parse(std::io::BufReader::new(file)).map_err(to_parse_error)
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

/// 每個 `<si>` 對應一個索引，rich text 的多段 `<t>` 會串接，注音 `<rPh>` 略過
fn parse_shared_strings(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut phonetic_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"rPh" => phonetic_depth += 1,
                b"t" => in_text = current.is_some() && phonetic_depth == 0,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(e) if in_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) if in_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => {
                    if let Some(text) = current.take() {
                        strings.push(text);
                    }
                }
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(strings)
}

#[derive(Debug, Default)]
struct RowState {
    cells_seen: usize,
    has_first_cell: bool,
    in_first_cell: bool,
    cell_type: Option<String>,
    value: String,
    capture: bool,
    phonetic_depth: usize,
}

impl RowState {
    fn open_cell(&mut self, cell: &BytesStart<'_>) -> Result<()> {
        self.cells_seen += 1;
        self.in_first_cell = self.cells_seen == 1;
        if !self.in_first_cell {
            return Ok(());
        }

        self.has_first_cell = true;
        for attr in cell.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            if attr.key.local_name().as_ref() == b"t" {
                self.cell_type = Some(String::from_utf8_lossy(&attr.value).into_owned());
            }
        }
        Ok(())
    }

    fn is_inline_string(&self) -> bool {
        self.cell_type.as_deref() == Some("inlineStr")
    }

    fn resolve(self, shared: &[String]) -> Result<Option<String>> {
        if !self.has_first_cell {
            return Ok(None);
        }

        let resolved = match self.cell_type.as_deref() {
            Some("s") => {
                let raw_index = self.value.trim();
                if raw_index.is_empty() {
                    return Ok(None);
                }
                let index: usize = raw_index.parse().map_err(|_| DirectoryError::ParseError {
                    path: FIRST_SHEET_PART.to_string(),
                    message: format!("invalid shared string index '{}'", raw_index),
                })?;
                shared
                    .get(index)
                    .cloned()
                    .ok_or_else(|| DirectoryError::ParseError {
                        path: FIRST_SHEET_PART.to_string(),
                        message: format!(
                            "shared string index {} out of range ({} entries)",
                            index,
                            shared.len()
                        ),
                    })?
            }
            _ => self.value,
        };

        let trimmed = resolved.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn first_column_values(xml: &str, shared: &[String]) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    let mut row: Option<RowState> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row = Some(RowState::default()),
                b"c" => {
                    if let Some(state) = row.as_mut() {
                        state.open_cell(&e)?;
                    }
                }
                b"v" => {
                    if let Some(state) = row.as_mut() {
                        state.capture = state.in_first_cell;
                    }
                }
                b"rPh" => {
                    if let Some(state) = row.as_mut() {
                        state.phonetic_depth += 1;
                    }
                }
                b"t" => {
                    if let Some(state) = row.as_mut() {
                        state.capture = state.in_first_cell
                            && state.is_inline_string()
                            && state.phonetic_depth == 0;
                    }
                }
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"c" => {
                if let Some(state) = row.as_mut() {
                    state.open_cell(&e)?;
                    state.in_first_cell = false;
                }
            }
            Event::Text(e) => {
                if let Some(state) = row.as_mut().filter(|state| state.capture) {
                    state.value.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(state) = row.as_mut().filter(|state| state.capture) {
                    state.value.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => {
                    if let Some(state) = row.as_mut() {
                        state.capture = false;
                    }
                }
                b"rPh" => {
                    if let Some(state) = row.as_mut() {
                        state.phonetic_depth = state.phonetic_depth.saturating_sub(1);
                    }
                }
                b"c" => {
                    if let Some(state) = row.as_mut() {
                        state.in_first_cell = false;
                    }
                }
                b"row" => {
                    if let Some(value) = row.take().map(|state| state.resolve(shared)).transpose()?.flatten() {
                        values.push(value);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(values)
}
