use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use indexmap::IndexMap;

/// A book containing multiple sheets (preserves insertion order)
#[derive(Debug, Clone, Default)]
pub struct Book {
    name: String,
    sheets: IndexMap<String, Sheet>,
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Book1")
    }

    /// Create a new empty book with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Book {
            name: name.to_string(),
            sheets: IndexMap::new(),
        }
    }

    /// Get the book name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the book has no sheets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Check if a sheet exists
    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Get a sheet by index (0-based)
    pub fn get_sheet_by_index(&self, index: usize) -> Result<&Sheet> {
        self.sheets
            .get_index(index)
            .map(|(_, sheet)| sheet)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: format!("index {index}"),
            })
    }

    /// The first sheet of the book, if any. Record extraction reads
    /// only this sheet.
    #[must_use]
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.get_index(0).map(|(_, sheet)| sheet)
    }

    /// Iterate over `(name, sheet)` pairs in insertion order
    pub fn sheets(&self) -> impl Iterator<Item = (&String, &Sheet)> {
        self.sheets.iter()
    }

    /// Add a sheet to the book
    pub fn add_sheet(&mut self, name: &str, sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }

        let mut sheet = sheet;
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);
        Ok(())
    }

    /// Create a book from a dictionary of sheet name -> 2D data.
    pub fn from_dict<T: Into<CellValue> + Clone>(
        sheets: IndexMap<String, Vec<Vec<T>>>,
    ) -> Result<Self> {
        let mut book = Book::new();
        for (name, data) in sheets {
            book.add_sheet(&name, Sheet::from_data(data))?;
        }
        Ok(book)
    }
}
