mod table;

pub use table::{Cell, Table};

use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};
use tracing::{debug, instrument, Level};

use crate::error::{Error, Result};
use crate::scrape::{ScrapeCycle, StationRecord};

/// Cycle columns are inserted right after the Station and Legacy columns, so
/// the newest cycle always sits at index 2.
const CYCLE_COLUMN: usize = 2;

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The five sheets of the status workbook, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    H70Status,
    H70Availability,
    H35Status,
    H35Availability,
    Alerts,
}

impl Sheet {
    pub const ALL: [Self; 5] = [
        Self::H70Status,
        Self::H70Availability,
        Self::H35Status,
        Self::H35Availability,
        Self::Alerts,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::H70Status => "H70 Status",
            Self::H70Availability => "H70 Availability",
            Self::H35Status => "H35 Status",
            Self::H35Availability => "H35 Availability",
            Self::Alerts => "Alerts",
        }
    }

    /// The record field this sheet tracks.
    pub fn field(self, record: &StationRecord) -> Option<&str> {
        match self {
            Self::H70Status => record.h70_status(),
            Self::H70Availability => record.h70_inventory(),
            Self::H35Status => record.h35_status(),
            Self::H35Availability => record.h35_inventory(),
            Self::Alerts => record.alert(),
        }
    }
}

/// The persistent spreadsheet: five parallel tables keyed by station name.
/// Read whole from disk, mutated in memory, rewritten whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    tables: [Table; 5],
}

impl Workbook {
    /// A workbook with the five sheets and their Station/Legacy headers but
    /// no rows yet. Used to seed the file on first run.
    pub fn empty() -> Self {
        Self {
            tables: Sheet::ALL
                .map(|_| Table::new(vec!["Station".to_owned(), "Legacy".to_owned()])),
        }
    }

    /// Reads all five sheets from the file. Any unreadable, missing, or
    /// malformed sheet fails the whole read, so a merge never works from
    /// half a workbook.
    pub fn open(path: &Path) -> Result<Self> {
        let mut book: Xlsx<_> = open_workbook(path)?;
        let mut tables = Vec::with_capacity(Sheet::ALL.len());
        for sheet in Sheet::ALL {
            let range = book.worksheet_range(sheet.title())?;
            let table = Table::from_range(&range).ok_or(Error::WorkbookSchema {
                sheet: sheet.title(),
            })?;
            // row lookup and appends assume the Station and Legacy columns
            if table.columns().len() < 2 {
                return Err(Error::WorkbookSchema {
                    sheet: sheet.title(),
                });
            }
            tables.push(table);
        }
        Ok(Self {
            tables: tables
                .try_into()
                .expect("one table was read per sheet"),
        })
    }

    /// Rewrites the whole file with the current tables, replacing it in
    /// place. There is no rollback on failure.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = rust_xlsxwriter::Workbook::new();
        for (sheet, table) in Sheet::ALL.iter().zip(&self.tables) {
            let worksheet = out.add_worksheet();
            worksheet.set_name(sheet.title())?;
            for (col, label) in table.columns().iter().enumerate() {
                worksheet.write_string(0, col as u16, label)?;
            }
            for (r, row) in table.rows().iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    match cell {
                        Cell::Empty => {}
                        Cell::Text(s) => {
                            worksheet.write_string((r + 1) as u32, c as u16, s)?;
                        }
                        Cell::Bool(b) => {
                            worksheet.write_boolean((r + 1) as u32, c as u16, *b)?;
                        }
                    }
                }
            }
        }
        out.save(path)?;
        Ok(())
    }

    pub fn table(&self, sheet: Sheet) -> &Table {
        &self.tables[sheet as usize]
    }

    /// Folds one cycle in: a new column labeled with the cycle start time
    /// goes into every table at [`CYCLE_COLUMN`], then every record either
    /// fills that column in its existing row or appends a fresh row. Each
    /// table appends with its own field value, so the five sheets stay
    /// consistent for stations first seen this cycle.
    pub fn apply(&mut self, cycle: &ScrapeCycle) {
        let stamp = cycle.started_at().format(STAMP_FORMAT).to_string();
        for table in &mut self.tables {
            table.insert_column(CYCLE_COLUMN, &stamp);
        }

        for (name, record) in cycle.records() {
            for (sheet, table) in Sheet::ALL.iter().zip(&mut self.tables) {
                let value = Cell::from_field(sheet.field(record));
                match table.find_row(name) {
                    Some(row) => table.set(row, CYCLE_COLUMN, value),
                    None => table.push_row(vec![
                        Cell::Text(name.clone()),
                        Cell::Bool(record.legacy()),
                        value,
                    ]),
                }
            }
        }
    }
}

/// Merges one cycle into the workbook file: read all five sheets, fold the
/// records in, rewrite the file. Aborts before writing anything if the read
/// fails.
#[instrument(skip(cycle), fields(path = %path.display()), level = Level::DEBUG)]
pub fn merge(path: &Path, cycle: &ScrapeCycle) -> Result<()> {
    let mut workbook = Workbook::open(path)?;
    workbook.apply(cycle);
    workbook.save(path)?;
    debug!(
        stations = cycle.records().len(),
        stamp = %cycle.started_at().format(STAMP_FORMAT),
        "cycle merged"
    );
    Ok(())
}
