//! Export boundary: records laid back out as a sheet.
//!
//! The engine only shapes the table; serialization (and the fixed
//! column widths) belongs to the sheet crate's XLSX writer.

use crate::schema::{Field, TransactionRecord, HEADER_FIELDS};
use gridscope_sheet::{CellValue, Sheet};

/// Build an exportable sheet from records: the header vocabulary as
/// row 0, one row per record, in the given order.
#[must_use]
pub fn records_to_sheet(records: &[TransactionRecord]) -> Sheet {
    let mut sheet = Sheet::with_name("Transactions");

    sheet.push_row(
        HEADER_FIELDS
            .iter()
            .map(|&(label, _)| CellValue::from(label))
            .collect::<Vec<_>>(),
    );

    for record in records {
        let row: Vec<CellValue> = HEADER_FIELDS
            .iter()
            .map(|&(_, field)| match field {
                Field::Symbol => CellValue::from(record.symbol.clone()),
                Field::AcquirerDisposer => CellValue::from(record.acquirer_disposer.clone()),
                Field::NumSecurities => CellValue::Float(record.num_securities),
                Field::Value => CellValue::Float(record.value),
                Field::TransactionType => CellValue::from(record.transaction_type.clone()),
                Field::Date => CellValue::from(record.date.clone()),
            })
            .collect();
        sheet.push_row(row);
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_to_sheet_shape() {
        let records = vec![
            TransactionRecord {
                symbol: "TCS".to_string(),
                value: 1000.0,
                transaction_type: "Buy".to_string(),
                ..Default::default()
            },
            TransactionRecord {
                symbol: "INFY".to_string(),
                value: 500.0,
                ..Default::default()
            },
        ];

        let sheet = records_to_sheet(&records);

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 6);
        assert_eq!(sheet.header_strings()[0], "SYMBOL");
        assert_eq!(sheet.get(1, 0).unwrap(), &CellValue::from("TCS"));
        assert_eq!(sheet.get(1, 3).unwrap(), &CellValue::Float(1000.0));
        assert_eq!(sheet.get(2, 0).unwrap(), &CellValue::from("INFY"));
    }

    #[test]
    fn test_no_records_yields_header_only() {
        let sheet = records_to_sheet(&[]);
        assert_eq!(sheet.row_count(), 1);
        assert!(sheet.data_rows().is_empty());
    }
}
