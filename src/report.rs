//! Consolidated report table
//!
//! The report table accumulates one row per selected society, in selection
//! order, and never holds the same society twice. It also knows how to
//! render itself as chat context.

use crate::knowledge::{self, OrganizationRecord, DESCRIPTIVE_FIELDS};
use std::fmt;

/// Column header of the society name column
pub const NAME_COLUMN: &str = "Society Name";

/// Column header of the membership column
pub const MEMBERSHIP_COLUMN: &str = "Membership Count";

/// Column header of the region column
pub const REGION_COLUMN: &str = "Region";

/// Total number of report columns
pub const COLUMN_COUNT: usize = 11;

/// Text used as chat context when no society has been added yet
pub const EMPTY_CONTEXT_SENTINEL: &str = "No report data is currently available.";

/// Report column headers, in display and export order
pub fn column_headers() -> [&'static str; COLUMN_COUNT] {
    let mut headers = [""; COLUMN_COUNT];
    headers[0] = NAME_COLUMN;
    headers[1] = MEMBERSHIP_COLUMN;
    headers[2..10].copy_from_slice(&DESCRIPTIVE_FIELDS);
    headers[10] = REGION_COLUMN;
    headers
}

/// A single cell of a report row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Free text
    Text(&'static str),
    /// Membership count
    Count(u32),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Count(count) => write!(f, "{}", count),
        }
    }
}

/// Result of asking the table to add a society
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new row was appended
    Added,
    /// The society is already in the report; nothing changed
    AlreadySelected,
    /// The name is not in the knowledge base; nothing changed
    Unknown,
}

/// One line of the consolidated report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRow {
    record: &'static OrganizationRecord,
}

impl ReportRow {
    /// Society name of this row
    pub fn name(&self) -> &'static str {
        self.record.name
    }

    /// Membership count of this row
    pub fn membership_count(&self) -> u32 {
        self.record.membership_count
    }

    /// Underlying knowledge base record
    pub fn record(&self) -> &'static OrganizationRecord {
        self.record
    }

    /// Cells in the order given by [`column_headers`]
    pub fn cells(&self) -> [Cell; COLUMN_COUNT] {
        let mut cells = [Cell::Text(""); COLUMN_COUNT];
        cells[0] = Cell::Text(self.record.name);
        cells[1] = Cell::Count(self.record.membership_count);
        for (idx, (_, value)) in self.record.descriptive_fields().iter().enumerate() {
            cells[idx + 2] = Cell::Text(*value);
        }
        cells[10] = Cell::Text(self.record.region);
        cells
    }
}

/// Accumulated report for one session
///
/// Rows are only ever appended. At most one row exists per society name and
/// row order equals the order in which societies were selected.
#[derive(Debug, Clone, Default)]
pub struct ReportTable {
    rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a society by name
    ///
    /// Looks the name up in the knowledge base and appends its record unless
    /// it is unknown or already present. Neither case is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use societyreport::report::{AddOutcome, ReportTable};
    ///
    /// let mut table = ReportTable::new();
    /// assert_eq!(table.add_organization("IOWA Oncology Society"), AddOutcome::Added);
    /// assert_eq!(table.add_organization("IOWA Oncology Society"), AddOutcome::AlreadySelected);
    /// assert_eq!(table.add_organization("Nope"), AddOutcome::Unknown);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn add_organization(&mut self, name: &str) -> AddOutcome {
        if self.contains(name) {
            tracing::debug!("Society already in report: {}", name);
            return AddOutcome::AlreadySelected;
        }

        match knowledge::lookup(name) {
            Some(record) => {
                self.rows.push(ReportRow { record });
                tracing::info!("Added society to report: {} ({} rows)", name, self.rows.len());
                AddOutcome::Added
            }
            None => {
                tracing::debug!("Ignoring unknown society: {}", name);
                AddOutcome::Unknown
            }
        }
    }

    /// Whether the report already has a row for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.rows.iter().any(|row| row.name() == name)
    }

    /// Rows in selection order
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Society names in selection order
    pub fn names(&self) -> Vec<&'static str> {
        self.rows.iter().map(ReportRow::name).collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no society has been added
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Serialize the report as plain-text context for the report chat
///
/// Each row becomes a `Society Name:` line followed by one indented
/// `Field: value` line per remaining column, with a blank line between rows.
/// An empty report yields [`EMPTY_CONTEXT_SENTINEL`].
///
/// # Examples
///
/// ```
/// use societyreport::report::{format_report_context, ReportTable, EMPTY_CONTEXT_SENTINEL};
///
/// let mut table = ReportTable::new();
/// assert_eq!(format_report_context(&table), EMPTY_CONTEXT_SENTINEL);
///
/// table.add_organization("IOWA Oncology Society");
/// let context = format_report_context(&table);
/// assert!(context.contains("Society Name: IOWA Oncology Society"));
/// assert!(context.contains("  Region: Iowa"));
/// ```
pub fn format_report_context(table: &ReportTable) -> String {
    if table.is_empty() {
        return EMPTY_CONTEXT_SENTINEL.to_string();
    }

    let headers = column_headers();
    let mut context = String::from("Here is the consolidated report data:\n");
    for row in table.rows() {
        let cells = row.cells();
        context.push_str(&format!("{}: {}\n", headers[0], cells[0]));
        for (header, cell) in headers.iter().zip(cells.iter()).skip(1) {
            context.push_str(&format!("  {}: {}\n", header, cell));
        }
        context.push('\n');
    }

    context.trim().to_string()
}
