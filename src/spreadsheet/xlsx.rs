use crate::error::ConfSheetError;
use crate::helpers::xml::XmlAttributeHelper;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::excel;
use crate::spreadsheet::excel::load_relationships;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::reference::reference_to_index;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::borrow::Cow;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use zip::ZipArchive;

// XML tag names for parsing Excel XLSX format
const TAG_SHARED_STRING_ITEM: QName = QName(b"si");   // Shared string table item
const TAG_PHONETIC_TEXT: QName = QName(b"rPh");       // Phonetic text for Asian languages
const TAG_TEXT: QName = QName(b"t");                  // Text content within strings
const TAG_SHEET: QName = QName(b"sheet");             // Worksheet definition
const TAG_ROW: QName = QName(b"row");                 // Row in worksheet
const TAG_CELL: QName = QName(b"c");                  // Cell in worksheet
const TAG_INLINE_STRING: QName = QName(b"is");        // Inline string value
const TAG_VALUE: QName = QName(b"v");                 // Cell value content

/// Represents an Excel XLSX spreadsheet file
pub struct XlsxSpreadsheet {
    /// File name of the spreadsheet
    pub name: String,
    /// ZIP archive containing the XLSX file contents
    zip: ZipArchive<BufReader<File>>,
    /// List of worksheets with (name, zip_path) pairs in workbook order
    sheets: Vec<(String, String)>,
    /// Shared string table, loaded on first use
    shared_strings: Option<Vec<String>>,
}

impl XlsxSpreadsheet {
    /// Opens an XLSX spreadsheet file and parses its worksheet list
    pub fn open(file_name: &str) -> Result<XlsxSpreadsheet, ConfSheetError> {
        let (zip, sheets) = excel::open(file_name, load_workbook)?;
        Ok(XlsxSpreadsheet {
            name: file_name.to_owned(),
            zip,
            sheets,
            shared_strings: None,
        })
    }

    /// Loads the shared string table (`xl/sharedStrings.xml`), if the workbook has one
    ///
    /// Cells of type `s` store an index into this table instead of their text.
    fn load_shared_strings(&mut self) -> Result<Vec<String>, ConfSheetError> {
        let mut shared_strings = Vec::<String>::new();
        let mut reader = match self.zip.xml_reader("xl/sharedStrings.xml")? {
            Some(reader) => reader,
            None => return Ok(shared_strings),
        };

        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TAG_SHARED_STRING_ITEM => {
                let string = read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?;
                shared_strings.push(string);
            }
        });
        Ok(shared_strings)
    }
}

impl Spreadsheet for XlsxSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    /// Reads every worksheet accepted by the criteria into a sparse cell grid
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, ConfSheetError> {
        if self.shared_strings.is_none() {
            self.shared_strings = Some(self.load_shared_strings()?);
        }
        let shared_strings = self.shared_strings.take().unwrap_or_default();

        let mut sheets = Vec::<Sheet>::new();
        for (sheet_name, zip_path) in &self.sheets {
            if !criteria.accept(sheet_name) {
                continue;
            }

            let mut sheet = Sheet::new(&self.name, sheet_name);
            let mut row_count = 0usize;
            let mut col_count = 0usize;
            let mut row = 0usize;
            let mut col = 0usize;
            let mut kind = CellType::default();
            let mut is_shared = false;
            let mut has_value = false;
            let mut value = String::new();
            let mut reader = self.zip.xml_reader(zip_path)?
                .ok_or_else(|| SpreadsheetError::FileError(zip_path.to_owned()))?;
            match_xml_events!(reader => {
                Event::Start(event) if event.name() == TAG_ROW => {
                    if let Some(index) = event.get_attribute_value("r")? {
                        row_count = index.parse::<usize>()?.saturating_sub(1);
                    }
                    col_count = 0;
                }
                Event::End(event) if event.name() == TAG_ROW => {
                    row_count += 1;
                    col_count = 0;
                }
                Event::Start(event) if event.name() == TAG_CELL => {
                    (row, col) = event.get_attribute_value("r")?
                        .and_then(|reference| reference_to_index(&reference))
                        .unwrap_or((row_count, col_count));
                    col_count = col + 1;
                    is_shared = false;
                    has_value = false;
                    value.clear();
                    kind = event.get_attribute_value("t")?.map(|t| {
                        match t.as_ref() {
                            "inlineStr" | "str" | "d" => CellType::Text,
                            "s" => {
                                is_shared = true;
                                CellType::Text
                            }
                            "b" => CellType::Boolean,
                            "e" => CellType::Error,
                            _ => CellType::Number,
                        }
                    }).unwrap_or(CellType::Number);
                }
                Event::Start(event) if event.name() == TAG_INLINE_STRING => {
                    value = read_string_value(&mut reader, TAG_INLINE_STRING, false)?;
                    has_value = true;
                }
                Event::Start(event) if event.name() == TAG_VALUE => {
                    value = read_string_value(&mut reader, TAG_VALUE, true)?;
                    has_value = true;
                }
                Event::End(event) if event.name() == TAG_CELL => {
                    // Styled cells without a value are blank whatever their `t` says
                    if !has_value {
                        kind = CellType::Empty;
                    } else if is_shared {
                        let text = value.trim().parse::<usize>().ok()
                            .and_then(|index| shared_strings.get(index))
                            .ok_or_else(|| SpreadsheetError::CellValueError(
                                sheet.file_name.to_owned(),
                                sheet.name.to_owned(),
                                index_to_reference(row, col),
                                format!("shared string index '{value}' out of range"),
                            ))?;
                        value = text.to_owned();
                    }
                    sheet.push(Cell {
                        row,
                        col,
                        kind,
                        value: std::mem::take(&mut value),
                    });
                }
            });
            sheets.push(sheet);
        }

        self.shared_strings = Some(shared_strings);
        Ok(sheets)
    }
}

/// Loads the worksheet list from `xl/workbook.xml`, resolving each sheet's part path
fn load_workbook(zip: &mut ZipArchive<BufReader<File>>) -> Result<Vec<(String, String)>, ConfSheetError> {
    let relationships = load_relationships(zip, "xl/_rels/workbook.xml.rels")?;
    let mut reader = zip.xml_reader("xl/workbook.xml")?
        .ok_or_else(|| SpreadsheetError::FileError("xl/workbook.xml".to_string()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHEET => {
            let mut name = None::<Cow<str>>;
            let mut id = None::<Cow<str>>;
            for result in event.attributes() {
                let attribute = result?;
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.get_value()?);
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.get_value()?);
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(&id.to_string()) {
                    sheets.push((name.to_string(), path.to_owned()));
                }
            }
        }
    });
    Ok(sheets)
}

/// Reads string value from XML content, handling text and CDATA sections
///
/// Phonetic annotations (`rPh`) are skipped; only `t` runs count unless the
/// element itself is a text node such as `v`.
fn read_string_value<R: BufRead>(
    reader: &mut XmlReader<R>,
    end_tag: QName,
    is_text_content: bool,
) -> Result<String, ConfSheetError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == end_tag => break,
        Event::Start(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.name() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.name() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_str(&event.xml_content()?),
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(xml: &str, end_tag: QName, is_text_content: bool) -> String {
        let mut reader = XmlReader::new(xml.as_bytes());
        // Skip the opening element, as the worksheet loop does before delegating.
        reader.next().unwrap();
        read_string_value(&mut reader, end_tag, is_text_content).unwrap()
    }

    #[test]
    fn reads_rich_text_runs() {
        let xml = "<si><r><t>Fire</t></r><r><t xml:space=\"preserve\"> Sword</t></r></si>";
        assert_eq!(read(xml, TAG_SHARED_STRING_ITEM, false), "Fire Sword");
    }

    #[test]
    fn skips_phonetic_text() {
        let xml = "<si><t>漢字</t><rPh sb=\"0\" eb=\"2\"><t>かんじ</t></rPh></si>";
        assert_eq!(read(xml, TAG_SHARED_STRING_ITEM, false), "漢字");
    }

    #[test]
    fn reads_plain_values() {
        assert_eq!(read("<v>42.5</v>", TAG_VALUE, true), "42.5");
        assert_eq!(read("<is><t>a &lt; b</t></is>", TAG_INLINE_STRING, false), "a < b");
    }
}
