use thiserror::Error;

use crate::coords::TileCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no cell at {coord} in a {width}x{height} grid")]
pub struct GridIndexError {
    pub coord: TileCoord,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridShapeError {
    #[error("grid dimensions {width}x{height} must be positive")]
    NonPositive { width: i32, height: i32 },
    #[error("expected {expected} cells for the grid, got {actual}")]
    CellCount { expected: usize, actual: usize },
}

/// Dense row-major matrix of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: i32, height: i32, fill: T) -> Result<Self, GridShapeError> {
        check_dimensions(width, height)?;
        let size = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![fill; size],
        })
    }
}

impl<T> Grid<T> {
    pub fn from_cells(width: i32, height: i32, cells: Vec<T>) -> Result<Self, GridShapeError> {
        check_dimensions(width, height)?;
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(GridShapeError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> i32 {
        self.width
    }
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, c: TileCoord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.width && c.y < self.height
    }

    pub fn index(&self, c: TileCoord) -> Result<usize, GridIndexError> {
        if !self.contains(c) {
            return Err(GridIndexError {
                coord: c,
                width: self.width,
                height: self.height,
            });
        }
        Ok((c.y * self.width + c.x) as usize)
    }

    pub fn get(&self, c: TileCoord) -> Result<&T, GridIndexError> {
        let i = self.index(c)?;
        Ok(&self.cells[i])
    }

    pub fn get_mut(&mut self, c: TileCoord) -> Result<&mut T, GridIndexError> {
        let i = self.index(c)?;
        Ok(&mut self.cells[i])
    }

    pub fn set(&mut self, c: TileCoord, value: T) -> Result<(), GridIndexError> {
        *self.get_mut(c)? = value;
        Ok(())
    }

    /// Cells in raster order (row by row, left to right).
    pub fn iter_xy(&self) -> impl Iterator<Item = (TileCoord, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as i32;
            (TileCoord::new(i % width, i / width), cell)
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width as usize)
    }
}

fn check_dimensions(width: i32, height: i32) -> Result<(), GridShapeError> {
    if width <= 0 || height <= 0 {
        return Err(GridShapeError::NonPositive { width, height });
    }
    Ok(())
}
