use serde::{Deserialize, Serialize};

use crate::prelude::{CoreError, CoreResult};

/// Quantized cell index of a pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridVertex {
    pub col: i32,
    pub row: i32,
}

impl GridVertex {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl From<GridVertex> for [i32; 2] {
    fn from(vertex: GridVertex) -> Self {
        [vertex.col, vertex.row]
    }
}

impl From<[i32; 2]> for GridVertex {
    fn from(corner: [i32; 2]) -> Self {
        Self::new(corner[0], corner[1])
    }
}

/// Pixel surface divided into `cells_x` by `cells_y` cells.
///
/// The row count is the configured cell count; the column count follows the
/// aspect ratio, `ceil(width / height * cell_count)`, so cells stay roughly
/// square on wide surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpace {
    width: f64,
    height: f64,
    cell_count: u32,
    cells_x: u32,
}

impl GridSpace {
    pub fn new(width: f64, height: f64, cell_count: u32) -> CoreResult<Self> {
        if !(height > 0.0) || !height.is_finite() {
            return Err(CoreError::DegenerateGeometry(format!(
                "grid height must be positive, got {}",
                height
            )));
        }
        if !(width > 0.0) || !width.is_finite() {
            return Err(CoreError::DegenerateGeometry(format!(
                "grid width must be positive, got {}",
                width
            )));
        }
        if cell_count == 0 {
            return Err(CoreError::invalid("grid needs at least one cell"));
        }

        let cells_x = ((width / height) * cell_count as f64).ceil();
        if cells_x > u32::MAX as f64 {
            return Err(CoreError::DegenerateGeometry(format!(
                "aspect ratio {}x{} yields too many columns",
                width, height
            )));
        }

        Ok(Self {
            width,
            height,
            cell_count,
            cells_x: (cells_x as u32).max(1),
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn cells_x(&self) -> u32 {
        self.cells_x
    }

    pub fn cells_y(&self) -> u32 {
        self.cell_count
    }

    pub fn cell_width(&self) -> f64 {
        self.width / self.cells_x as f64
    }

    pub fn cell_height(&self) -> f64 {
        self.height / self.cell_count as f64
    }

    /// Snaps a pixel position to the nearest grid intersection.
    ///
    /// Halves round toward positive infinity.
    pub fn map_to_grid(&self, px: f64, py: f64) -> GridVertex {
        GridVertex {
            col: round_half_up(px / self.cell_width()),
            row: round_half_up(py / self.cell_height()),
        }
    }

    /// Pixel position of a grid intersection.
    pub fn to_pixel(&self, vertex: GridVertex) -> (f64, f64) {
        (
            vertex.col as f64 * self.cell_width(),
            vertex.row as f64 * self.cell_height(),
        )
    }
}

fn round_half_up(value: f64) -> i32 {
    // `as` saturates, which keeps far off-surface pointers finite.
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_surface_has_square_grid() {
        let grid = GridSpace::new(100.0, 100.0, 4).unwrap();
        assert_eq!((grid.cells_x(), grid.cells_y()), (4, 4));
        assert_eq!(grid.cell_width(), 25.0);
        assert_eq!(grid.map_to_grid(0.0, 0.0), GridVertex::new(0, 0));
        assert_eq!(grid.map_to_grid(37.4, 62.5), GridVertex::new(1, 3));
        assert_eq!(grid.map_to_grid(100.0, 100.0), GridVertex::new(4, 4));
    }

    #[test]
    fn wide_surface_rounds_columns_up() {
        let grid = GridSpace::new(250.0, 100.0, 3).unwrap();
        // 2.5 * 3 = 7.5 -> 8 columns
        assert_eq!(grid.cells_x(), 8);
        assert_eq!(grid.map_to_grid(250.0, 60.0), GridVertex::new(8, 2));
        assert_eq!(grid.to_pixel(GridVertex::new(8, 0)), (250.0, 0.0));
    }

    #[test]
    fn halves_round_up_even_when_negative() {
        let grid = GridSpace::new(10.0, 10.0, 10).unwrap();
        assert_eq!(grid.map_to_grid(-0.5, 0.5), GridVertex::new(0, 1));
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        assert!(matches!(
            GridSpace::new(100.0, 0.0, 4),
            Err(CoreError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            GridSpace::new(-1.0, 10.0, 4),
            Err(CoreError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            GridSpace::new(100.0, 100.0, 0),
            Err(CoreError::InvalidArgument(_))
        ));
    }
}
