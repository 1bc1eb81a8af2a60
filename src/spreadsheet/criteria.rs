/// Criteria for selecting which worksheets of a workbook are configuration tables.
#[derive(Clone, Debug)]
pub struct Criteria {
    /// Worksheets whose names start with this prefix are tables; the bare prefix itself is not.
    pub sheet_prefix: String,
}

impl Criteria {
    pub fn new(sheet_prefix: &str) -> Self {
        Criteria {
            sheet_prefix: sheet_prefix.to_owned(),
        }
    }

    /// Checks if a sheet name qualifies as a table.
    pub fn accept(&self, sheet_name: &str) -> bool {
        sheet_name.starts_with(&self.sheet_prefix) && sheet_name != self.sheet_prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_prefixed_sheets_only() {
        let criteria = Criteria::new("CE");
        assert!(criteria.accept("CEItem"));
        assert!(criteria.accept("CE_Area"));
        assert!(!criteria.accept("CE"));
        assert!(!criteria.accept("Sheet1"));
        assert!(!criteria.accept("ceItem"));
        assert!(!criteria.accept("Notes CEItem"));
    }
}
