// src/data_types.rs
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One business record parsed out of a worksheet by the validation service.
/// Columns the client does not model are kept in `extra` so they survive the
/// round trip back to the import endpoint unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Amount", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Verified", default)]
    pub verified: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

/// The parsed workbook: named sheets in the order the validation response
/// listed them. That order drives sheet selection and tab order, so the
/// (de)serialization below goes through the JSON object without an
/// intermediate unordered map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn first_sheet_name(&self) -> Option<String> {
        self.sheets.first().map(|sheet| sheet.name.clone())
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Removes the row at `index` from the named sheet, shifting the rows
    /// after it. Returns the removed row, or None when the sheet or index
    /// does not exist.
    pub fn delete_row(&mut self, sheet_name: &str, index: usize) -> Option<Row> {
        let sheet = self.sheets.iter_mut().find(|sheet| sheet.name == sheet_name)?;
        if index < sheet.rows.len() {
            Some(sheet.rows.remove(index))
        } else {
            None
        }
    }
}

impl Serialize for Workbook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.sheets.iter().map(|sheet| (&sheet.name, &sheet.rows)))
    }
}

impl<'de> Deserialize<'de> for Workbook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct WorkbookVisitor;

        impl<'de> Visitor<'de> for WorkbookVisitor {
            type Value = Workbook;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of sheet names to row lists")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Workbook, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut sheets = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, rows)) = access.next_entry::<String, Vec<Row>>()? {
                    sheets.push(Sheet { name, rows });
                }
                Ok(Workbook { sheets })
            }
        }

        deserializer.deserialize_map(WorkbookVisitor)
    }
}

/// A single row-level complaint from the validation or import endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub row: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetErrors {
    pub name: String,
    pub errors: Vec<RowError>,
}

/// Per-sheet error lists, in response key order (the overlay tabs follow it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorReport {
    pub sheets: Vec<SheetErrors>,
}

impl ErrorReport {
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl<'de> Deserialize<'de> for ErrorReport {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ErrorReportVisitor;

        impl<'de> Visitor<'de> for ErrorReportVisitor {
            type Value = ErrorReport;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of sheet names to error lists")
            }

            fn visit_map<M>(self, mut access: M) -> Result<ErrorReport, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut sheets = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, errors)) = access.next_entry::<String, Vec<RowError>>()? {
                    sheets.push(SheetErrors { name, errors });
                }
                Ok(ErrorReport { sheets })
            }
        }

        deserializer.deserialize_map(ErrorReportVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateResponse {
    pub data: Option<Workbook>,
    pub errors: Option<ErrorReport>,
}

#[derive(Serialize)]
pub struct ImportRequest<'a> {
    pub data: &'a Workbook,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportResponse {
    pub success: Option<Vec<Row>>,
    pub errors: Option<ErrorReport>,
}
