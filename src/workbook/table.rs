use calamine::{Data, Range};

/// One spreadsheet cell. Station names and field values are text, the legacy
/// flag is a boolean, everything unfilled is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Text(String),
    Bool(bool),
}

impl Cell {
    pub fn from_field(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, |v| Self::Text(v.to_owned()))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Empty | Self::Bool(_) => None,
        }
    }
}

/// One sheet held in memory: a header row plus data rows. Column 0 is the
/// station name, column 1 the legacy flag, later columns one scrape cycle
/// each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Converts a sheet read by `calamine`. Returns `None` when the sheet has
    /// no header row at all.
    pub fn from_range(range: &Range<Data>) -> Option<Self> {
        let mut rows_iter = range.rows();
        let columns = rows_iter
            .next()?
            .iter()
            .map(|cell| cell.to_string().trim().to_owned())
            .collect();
        let rows = rows_iter
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();
        Some(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row][col]
    }

    /// Inserts an empty column at `index` in the header and every row. Rows
    /// read back shorter than the header are padded first.
    pub fn insert_column(&mut self, index: usize, label: &str) {
        self.columns.insert(index, label.to_owned());
        for row in &mut self.rows {
            while row.len() < self.columns.len() - 1 {
                row.push(Cell::Empty);
            }
            row.insert(index, Cell::Empty);
        }
    }

    /// Index of the row whose first cell matches `name` exactly.
    pub fn find_row(&self, name: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.first().and_then(Cell::as_text) == Some(name))
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    /// Appends a row, padded with empty cells out to the header width.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Empty);
        self.rows.push(cells);
    }
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new(vec!["Station".to_owned(), "Legacy".to_owned()]);
        table.push_row(vec![
            Cell::Text("Station A".to_owned()),
            Cell::Bool(false),
        ]);
        table
    }

    #[test]
    fn test_insert_column_shifts_rows() {
        let mut table = sample_table();
        table.insert_column(2, "2022-06-15 14:34:00");
        assert_eq!(
            table.columns(),
            ["Station", "Legacy", "2022-06-15 14:34:00"]
        );
        assert_eq!(table.rows()[0].len(), 3);
        assert_eq!(*table.cell(0, 2), Cell::Empty);
    }

    #[test]
    fn test_find_row_by_name() {
        let table = sample_table();
        assert_eq!(table.find_row("Station A"), Some(0));
        assert_eq!(table.find_row("Station B"), None);
    }

    #[test]
    fn test_push_row_pads_to_width() {
        let mut table = sample_table();
        table.insert_column(2, "stamp");
        table.push_row(vec![Cell::Text("Station B".to_owned()), Cell::Bool(true)]);
        assert_eq!(table.rows()[1].len(), 3);
        assert_eq!(*table.cell(1, 2), Cell::Empty);
    }
}
