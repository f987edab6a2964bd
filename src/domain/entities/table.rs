use crate::domain::entities::cell::Cell;
use crate::error::ProcessError;

/// One data row. `cells` is positional and aligned with the table header.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetRow {
    pub row_number: usize,
    pub cells: Vec<Cell>,
}

static EMPTY: Cell = Cell::Empty;

impl SpreadsheetRow {
    pub fn cell(&self, idx: usize) -> &Cell {
        self.cells.get(idx).unwrap_or(&EMPTY)
    }

    pub fn cell_at(&self, idx: Option<usize>) -> &Cell {
        idx.map_or(&EMPTY, |idx| self.cell(idx))
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }
}

/// Header plus data rows in source order, as produced by a reader.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<SpreadsheetRow>,
    pub blank_rows_skipped: usize,
}

impl RawTable {
    /// Builds a table from numbered raw rows. The first non-blank row is the
    /// header; later blank rows are dropped and counted.
    pub fn from_rows<I>(rows: I) -> Result<Self, ProcessError>
    where
        I: IntoIterator<Item = (usize, Vec<Cell>)>,
    {
        let mut rows = rows.into_iter();

        let header_cells = rows
            .by_ref()
            .map(|(_, cells)| cells)
            .find(|cells| cells.iter().any(|cell| !cell.is_blank()))
            .ok_or_else(|| ProcessError::unreadable("no header row found"))?;

        let width = header_cells
            .iter()
            .rposition(|cell| !cell.is_blank())
            .map(|idx| idx + 1)
            .ok_or_else(|| ProcessError::unreadable("header row is empty"))?;

        let headers = header_cells
            .iter()
            .take(width)
            .enumerate()
            .map(|(idx, cell)| {
                let name = cell.to_display();
                if name.trim().is_empty() {
                    format!("Column {}", idx + 1)
                } else {
                    name.trim().to_string()
                }
            })
            .collect::<Vec<_>>();

        let mut data = Vec::new();
        let mut blank_rows_skipped = 0;
        for (row_number, mut cells) in rows {
            cells.resize(width, Cell::Empty);
            let row = SpreadsheetRow { row_number, cells };
            if row.is_blank() {
                blank_rows_skipped += 1;
                continue;
            }
            data.push(row);
        }

        Ok(Self {
            headers,
            rows: data,
            blank_rows_skipped,
        })
    }
}
