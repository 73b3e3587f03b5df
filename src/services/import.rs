//! CSV import service
//!
//! Imports expenses from CSV files with column mapping, tolerant date and
//! amount parsing, per-row errors, and duplicate detection by content hash.

use std::collections::HashMap;

use chrono::NaiveDate;
use csv::{Reader, StringRecord};

use crate::error::SpendwiseResult;
use crate::models::{Category, Expense, Money};
use crate::store::Store;

/// Column mapping configuration for CSV import
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Index of the date column
    pub date_column: usize,
    /// Index of the amount column
    pub amount_column: usize,
    /// Index of the description column
    pub description_column: Option<usize>,
    /// Index of the category column
    pub category_column: Option<usize>,
    /// Date format string (e.g., "%Y-%m-%d", "%m/%d/%Y")
    pub date_format: String,
    /// Whether the first row is a header
    pub has_header: bool,
    /// Field delimiter; European bank exports often use ';'
    pub delimiter: char,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            amount_column: 2,
            description_column: Some(1),
            category_column: None,
            date_format: "%Y-%m-%d".to_string(),
            has_header: true,
            delimiter: ',',
        }
    }
}

impl ColumnMapping {
    /// Create a new column mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Set whether first row is header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// A parsed row from the CSV before import
#[derive(Debug, Clone)]
pub struct ParsedExpense {
    pub date: NaiveDate,
    /// Spend magnitude, always positive
    pub amount: Money,
    pub description: String,
    pub category: Category,
    /// Original row number in CSV (0-indexed, excluding header)
    pub row_number: usize,
    /// Content hash for duplicate detection
    pub import_id: String,
}

/// Status of a row in the import preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    /// Row will be imported
    New,
    /// Row matches an already-imported expense and will be skipped
    Duplicate,
    /// Row could not be parsed
    Error(String),
}

/// Preview entry for import review
#[derive(Debug, Clone)]
pub struct ImportPreviewEntry {
    pub expense: ParsedExpense,
    pub status: ImportStatus,
    /// Matching existing expense ID (for duplicates)
    pub existing_id: Option<String>,
}

/// Result of a completed import
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates_skipped: usize,
    pub errors: usize,
    pub imported_ids: Vec<String>,
    /// Error messages by row number
    pub error_messages: HashMap<usize, String>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    store: &'a dyn Store,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Parse a CSV from a reader into expense rows
    pub fn parse_csv_from_reader<R: std::io::Read>(
        &self,
        reader: &mut Reader<R>,
        mapping: &ColumnMapping,
    ) -> SpendwiseResult<Vec<Result<ParsedExpense, String>>> {
        let mut results = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    results.push(Err(format!("Error reading CSV record: {}", e)));
                    continue;
                }
            };
            results.push(self.parse_record(&record, idx, mapping));
        }
        Ok(results)
    }

    /// Parse a single CSV record
    fn parse_record(
        &self,
        record: &StringRecord,
        row_number: usize,
        mapping: &ColumnMapping,
    ) -> Result<ParsedExpense, String> {
        let date_str = record
            .get(mapping.date_column)
            .ok_or_else(|| "Missing date column".to_string())?
            .trim();
        let date = self.parse_date(date_str, &mapping.date_format)?;

        let amount_str = record
            .get(mapping.amount_column)
            .ok_or_else(|| "Missing amount column".to_string())?
            .trim();
        let amount = self.parse_amount_string(amount_str)?;
        if amount.is_zero() {
            return Err(format!("Zero amount in row {}", row_number + 1));
        }

        let description = mapping
            .description_column
            .and_then(|col| record.get(col))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if description.is_empty() {
            return Err(format!("Empty description in row {}", row_number + 1));
        }

        let category = mapping
            .category_column
            .and_then(|col| record.get(col))
            .map(|s| Category::parse_or_other(s))
            .unwrap_or(Category::Other);

        let import_id = Expense::generate_import_id(date, amount, &description);

        Ok(ParsedExpense {
            date,
            amount,
            description,
            category,
            row_number,
            import_id,
        })
    }

    /// Parse a date string using multiple format attempts
    fn parse_date(&self, s: &str, primary_format: &str) -> Result<NaiveDate, String> {
        if let Ok(date) = NaiveDate::parse_from_str(s, primary_format) {
            return Ok(date);
        }

        // Try common alternative formats
        let formats = [
            "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y", "%Y/%m/%d", "%m-%d-%Y",
            "%d-%m-%Y",
        ];
        for format in formats {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(date);
            }
        }

        Err(format!("Could not parse date: '{}'", s))
    }

    /// Parse an amount string, handling currency symbols, accounting
    /// negatives, and sign. Bank exports list spend as negative; the stored
    /// amount is always the positive magnitude.
    fn parse_amount_string(&self, s: &str) -> Result<Money, String> {
        let cleaned: String = s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '(' || *c == ')')
            .collect();

        // Parentheses are accounting notation for negatives
        let value = if cleaned.starts_with('(') && cleaned.ends_with(')') {
            &cleaned[1..cleaned.len() - 1]
        } else {
            cleaned.as_str()
        };

        Money::parse(value)
            .map(|m| m.abs())
            .map_err(|e| format!("Could not parse amount '{}': {}", s, e))
    }

    /// Check if a record looks like data (not headers)
    fn looks_like_data_row(&self, record: &StringRecord) -> bool {
        if let Some(first) = record.get(0) {
            let first = first.trim();
            let date_formats = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y"];
            for format in date_formats {
                if NaiveDate::parse_from_str(first, format).is_ok() {
                    return true;
                }
            }
        }
        false
    }

    /// Guess the field delimiter from the raw first line of the file.
    ///
    /// Whichever candidate splits the line into the most fields wins;
    /// a line with no candidate at all falls back to comma.
    pub fn detect_delimiter(&self, first_line: &str) -> char {
        // max_by_key keeps the last of equally-good candidates, so comma
        // goes last and wins ties
        ['\t', ';', ',']
            .into_iter()
            .max_by_key(|d| first_line.matches(*d).count())
            .unwrap_or(',')
    }

    /// Detect column mapping from the first CSV record
    pub fn detect_mapping_from_headers(&self, headers: &StringRecord) -> ColumnMapping {
        // A first row that parses as a date means a headerless file laid out
        // date, description, amount
        if self.looks_like_data_row(headers) {
            return ColumnMapping {
                date_column: 0,
                amount_column: 2,
                description_column: Some(1),
                category_column: None,
                date_format: "%Y-%m-%d".to_string(),
                has_header: false,
                delimiter: ',',
            };
        }

        let mut mapping = ColumnMapping::new();
        let mut found_amount = false;

        for (idx, header) in headers.iter().enumerate() {
            let h = header.to_lowercase();
            let h = h.trim();

            if h.contains("date") || h.contains("posted") {
                mapping.date_column = idx;
            } else if (h.contains("amount") || h.contains("debit") || h.contains("total"))
                && !found_amount
            {
                mapping.amount_column = idx;
                found_amount = true;
            } else if h.contains("description")
                || h.contains("payee")
                || h.contains("merchant")
                || h.contains("memo")
                || h.contains("name")
            {
                mapping.description_column = Some(idx);
            } else if h.contains("category") || h.contains("type") {
                mapping.category_column = Some(idx);
            }
        }

        mapping
    }

    /// Generate an import preview, checking for duplicates
    pub fn generate_preview(
        &self,
        parsed: &[Result<ParsedExpense, String>],
    ) -> SpendwiseResult<Vec<ImportPreviewEntry>> {
        let mut preview = Vec::with_capacity(parsed.len());

        let existing = self.store.list_expenses()?;
        let existing_import_ids: HashMap<_, _> = existing
            .iter()
            .filter_map(|e| {
                e.import_id
                    .as_ref()
                    .map(|id| (id.clone(), e.id.as_uuid().to_string()))
            })
            .collect();

        for result in parsed {
            match result {
                Ok(row) => {
                    let existing_id = existing_import_ids.get(&row.import_id).cloned();
                    let status = if existing_id.is_some() {
                        ImportStatus::Duplicate
                    } else {
                        ImportStatus::New
                    };
                    preview.push(ImportPreviewEntry {
                        expense: row.clone(),
                        status,
                        existing_id,
                    });
                }
                Err(e) => {
                    preview.push(ImportPreviewEntry {
                        expense: ParsedExpense {
                            date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default(),
                            amount: Money::zero(),
                            description: String::new(),
                            category: Category::Other,
                            row_number: 0,
                            import_id: String::new(),
                        },
                        status: ImportStatus::Error(e.clone()),
                        existing_id: None,
                    });
                }
            }
        }

        Ok(preview)
    }

    /// Import expenses from a preview
    pub fn import_from_preview(
        &self,
        preview: &[ImportPreviewEntry],
    ) -> SpendwiseResult<ImportResult> {
        let mut result = ImportResult {
            imported: 0,
            duplicates_skipped: 0,
            errors: 0,
            imported_ids: Vec::new(),
            error_messages: HashMap::new(),
        };

        for entry in preview {
            match &entry.status {
                ImportStatus::New => {
                    let mut expense = Expense::new(
                        entry.expense.category,
                        entry.expense.date,
                        entry.expense.description.clone(),
                        entry.expense.amount,
                    );
                    expense.import_id = Some(entry.expense.import_id.clone());

                    match expense
                        .validate()
                        .map_err(|e| e.to_string())
                        .and_then(|_| {
                            self.store.insert_expense(&expense).map_err(|e| e.to_string())
                        }) {
                        Ok(()) => {
                            result.imported += 1;
                            result.imported_ids.push(expense.id.as_uuid().to_string());
                        }
                        Err(e) => {
                            result.errors += 1;
                            result.error_messages.insert(entry.expense.row_number, e);
                        }
                    }
                }
                ImportStatus::Duplicate => {
                    result.duplicates_skipped += 1;
                }
                ImportStatus::Error(e) => {
                    result.errors += 1;
                    result
                        .error_messages
                        .insert(entry.expense.row_number, e.clone());
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendwisePaths;
    use crate::store::LocalStore;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LocalStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, LocalStore::new(storage))
    }

    #[test]
    fn test_parse_simple_csv() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        let csv_data =
            "Date,Description,Amount\n2025-01-15,Test Store,-50.00\n2025-01-16,Coffee,4.75";
        let mapping = ColumnMapping::new();
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());

        let results = service.parse_csv_from_reader(&mut reader, &mapping).unwrap();
        assert_eq!(results.len(), 2);

        let row1 = results[0].as_ref().unwrap();
        assert_eq!(row1.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        // Negative bank amounts become positive magnitudes
        assert_eq!(row1.amount.cents(), 5000);
        assert_eq!(row1.description, "Test Store");

        let row2 = results[1].as_ref().unwrap();
        assert_eq!(row2.amount.cents(), 475);
    }

    #[test]
    fn test_parse_category_column_lenient() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        let csv_data = "Date,Description,Amount,Category\n\
                        2025-01-15,Supermarket,30.00,food\n\
                        2025-01-16,Mystery,10.00,no-such-category";
        let mapping = ColumnMapping {
            category_column: Some(3),
            ..ColumnMapping::new()
        };
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());

        let results = service.parse_csv_from_reader(&mut reader, &mapping).unwrap();
        assert_eq!(results[0].as_ref().unwrap().category, Category::Groceries);
        // Unknown labels fall back to Other rather than failing the row
        assert_eq!(results[1].as_ref().unwrap().category, Category::Other);
    }

    #[test]
    fn test_parse_accounting_negative_format() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        let csv_data = "Date,Description,Amount\n2025-01-15,Test,(50.00)";
        let mapping = ColumnMapping::new();
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());

        let results = service.parse_csv_from_reader(&mut reader, &mapping).unwrap();
        assert_eq!(results[0].as_ref().unwrap().amount.cents(), 5000);
    }

    #[test]
    fn test_bad_rows_become_errors_not_failures() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        let csv_data = "Date,Description,Amount\n\
                        not-a-date,Store,10.00\n\
                        2025-01-15,,10.00\n\
                        2025-01-16,Store,0.00\n\
                        2025-01-17,Store,10.00";
        let mapping = ColumnMapping::new();
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());

        let results = service.parse_csv_from_reader(&mut reader, &mapping).unwrap();
        assert_eq!(results.len(), 4);
        assert!(results[0].is_err());
        assert!(results[1].is_err());
        assert!(results[2].is_err());
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_duplicate_detection() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        let csv_data = "Date,Description,Amount\n2025-01-15,Test Store,-50.00";
        let mapping = ColumnMapping::new();
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let parsed = service.parse_csv_from_reader(&mut reader, &mapping).unwrap();

        let preview1 = service.generate_preview(&parsed).unwrap();
        assert_eq!(preview1[0].status, ImportStatus::New);
        service.import_from_preview(&preview1).unwrap();

        let preview2 = service.generate_preview(&parsed).unwrap();
        assert_eq!(preview2[0].status, ImportStatus::Duplicate);
        assert!(preview2[0].existing_id.is_some());
    }

    #[test]
    fn test_detect_delimiter() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        assert_eq!(service.detect_delimiter("Date,Description,Amount"), ',');
        assert_eq!(service.detect_delimiter("Datum;Omschrijving;Bedrag"), ';');
        assert_eq!(service.detect_delimiter("Date\tPayee\tAmount"), '\t');
        assert_eq!(service.detect_delimiter("just one field"), ',');
    }

    #[test]
    fn test_parse_semicolon_delimited_csv() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        let csv_data = "Date;Description;Amount\n2025-01-15;Bakkerij;-12.50";
        let mapping = ColumnMapping::new().with_delimiter(';');
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(mapping.delimiter as u8)
            .from_reader(csv_data.as_bytes());

        let results = service.parse_csv_from_reader(&mut reader, &mapping).unwrap();
        let row = results[0].as_ref().unwrap();
        assert_eq!(row.description, "Bakkerij");
        assert_eq!(row.amount.cents(), 1250);
    }

    #[test]
    fn test_detect_mapping_from_headers() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        let header_str = "Posted Date,Merchant Name,Amount,Category";
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(header_str.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let mapping = service.detect_mapping_from_headers(&headers);

        assert_eq!(mapping.date_column, 0);
        assert_eq!(mapping.description_column, Some(1));
        assert_eq!(mapping.amount_column, 2);
        assert_eq!(mapping.category_column, Some(3));
        assert!(mapping.has_header);
    }

    #[test]
    fn test_detect_headerless_file() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        let first_row = "2025-01-15,Test Store,50.00";
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(first_row.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let mapping = service.detect_mapping_from_headers(&headers);

        assert!(!mapping.has_header);
        assert_eq!(mapping.description_column, Some(1));
        assert_eq!(mapping.amount_column, 2);
    }

    #[test]
    fn test_import_result_counts() {
        let (_tmp, store) = setup();
        let service = ImportService::new(&store);

        let csv_data = "Date,Description,Amount\n\
                        2025-01-15,Store 1,-50.00\n\
                        bad-date,Store 2,-25.00\n\
                        2025-01-16,Store 3,-25.00";
        let mapping = ColumnMapping::new();
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let parsed = service.parse_csv_from_reader(&mut reader, &mapping).unwrap();
        let preview = service.generate_preview(&parsed).unwrap();

        let result = service.import_from_preview(&preview).unwrap();
        assert_eq!(result.imported, 2);
        assert_eq!(result.errors, 1);
        assert_eq!(result.duplicates_skipped, 0);
        assert_eq!(store.list_expenses().unwrap().len(), 2);
    }
}
