//! Microsoft Office Excel Helpers
use crate::error::ConfSheetError;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use zip::ZipArchive;

/// XML tag name for relationship elements in Excel files
const TAG_RELATIONSHIP: &[u8] = b"Relationship";

/// Magic bytes of an OLE compound file; encrypted xlsx packages are wrapped in one
const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Opens an Excel file and loads its worksheet list
///
/// # Arguments
/// * `file_name` - Path to the Excel file
/// * `load_workbook` - Function to load the (name, zip_path) worksheet pairs
///
/// # Returns
/// Tuple of the zip archive handle and the worksheet list
pub(super) fn open<W>(file_name: &str, load_workbook: W) -> Result<(
    ZipArchive<BufReader<File>>,
    Vec<(String, String)>
), ConfSheetError>
where
    W: Fn(&mut ZipArchive<BufReader<File>>) -> Result<Vec<(String, String)>, ConfSheetError>,
{
    let mut reader = BufReader::new(File::open(file_name)?);

    if is_password_protected(&mut reader)? {
        Err(SpreadsheetError::SpreadsheetPasswordProtectedError(file_name.to_owned()))?;
    }

    let mut zip = ZipArchive::new(reader)?;
    let sheets = load_workbook(&mut zip)?;
    if sheets.is_empty() {
        Err(SpreadsheetError::SpreadsheetEmptyError(file_name.to_owned()))?
    }
    Ok((zip, sheets))
}

/// Loads worksheet relationships from an Excel file
///
/// # Arguments
/// * `zip` - Zip archive handle
/// * `path` - Path to the relationships XML file within the archive
///
/// # Returns
/// Mapping of relationship IDs to worksheet paths
pub(super) fn load_relationships<RS: Read + Seek>(zip: &mut ZipArchive<RS>, path: &str) -> Result<HashMap<String, String>, ConfSheetError> {
    let mut reader = zip.xml_reader(path)?
        .ok_or_else(|| SpreadsheetError::FileError(path.to_string()))?;
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            // Only process worksheet relationships
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Normalizes a relationship target so it points inside the `xl/` folder of the archive
pub(crate) fn to_zip_path(path: Cow<'_, str>) -> String {
    if let Some(stripped) = path.strip_prefix('/') {
        stripped.to_string()
    } else if path.starts_with("xl/") {
        path.to_string()
    } else {
        format!("xl/{path}")
    }
}

/// Checks whether the file is an OLE container (an encrypted package) instead of a zip archive
fn is_password_protected<R: Read + Seek>(reader: &mut R) -> Result<bool, ConfSheetError> {
    let mut signature = [0u8; 8];
    let is_ole = match reader.read_exact(&mut signature) {
        Ok(()) => signature == OLE_SIGNATURE,
        Err(_) => false,
    };
    reader.seek(SeekFrom::Start(0))?;
    Ok(is_ole)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn zip_paths_are_rooted_in_xl() {
        assert_eq!(to_zip_path(Cow::from("worksheets/sheet1.xml")), "xl/worksheets/sheet1.xml");
        assert_eq!(to_zip_path(Cow::from("/xl/worksheets/sheet1.xml")), "xl/worksheets/sheet1.xml");
        assert_eq!(to_zip_path(Cow::from("xl/worksheets/sheet2.xml")), "xl/worksheets/sheet2.xml");
    }

    #[test]
    fn detects_ole_containers() {
        let mut ole = Cursor::new([OLE_SIGNATURE.to_vec(), vec![0; 8]].concat());
        assert!(is_password_protected(&mut ole).unwrap());
        assert_eq!(ole.position(), 0);

        let mut zip = Cursor::new(b"PK\x03\x04 rest of archive".to_vec());
        assert!(!is_password_protected(&mut zip).unwrap());

        let mut short = Cursor::new(b"PK".to_vec());
        assert!(!is_password_protected(&mut short).unwrap());
    }
}
