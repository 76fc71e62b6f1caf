//! Presenting a [`Raster`] in the terminal with half-block cells.

use gridstreak_core::Rgba;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::raster::Raster;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// Device pixels per terminal cell, horizontally and vertically.
pub const CELL_PIXELS: (usize, usize) = (1, 2);

/// Device raster size needed to fill a terminal area of `cols` x `rows`.
pub fn raster_size(cols: u16, rows: u16) -> (usize, usize) {
    (
        usize::from(cols) * CELL_PIXELS.0,
        usize::from(rows) * CELL_PIXELS.1,
    )
}

/// Widget drawing a raster flattened over an opaque backdrop.
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    raster: &'a Raster,
    backdrop: Rgba,
}

impl<'a> RasterView<'a> {
    pub fn new(raster: &'a Raster, backdrop: Rgba) -> Self {
        Self { raster, backdrop }
    }
}

impl Widget for RasterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = usize::from(col) * CELL_PIXELS.0;
                let y = usize::from(row) * CELL_PIXELS.1;
                let top = self.raster.composite(x, y, self.backdrop);
                let bottom = self.raster.composite(x, y + 1, self.backdrop);

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(top.to_color())
                        .set_bg(bottom.to_color());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;
    use crate::raster::{Paint, Rect as RasterRect, Surface};

    #[test]
    fn test_raster_size_doubles_rows() {
        assert_eq!(raster_size(80, 24), (80, 48));
    }

    #[test]
    fn test_cells_split_top_and_bottom_pixels() {
        let mut raster = Raster::new(2, 2, 1.0);
        raster.fill_rect(
            RasterRect::new(0.0, 0.0, 1.0, 1.0),
            &Paint::Solid(Rgba::new(255, 0, 0, 1.0)),
        );
        let backdrop = Rgba::new(10, 20, 30, 1.0);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        RasterView::new(&raster, backdrop).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(10, 20, 30));

        let cell = &buf[(1, 0)];
        assert_eq!(cell.fg, Color::Rgb(10, 20, 30));
        assert_eq!(cell.bg, Color::Rgb(10, 20, 30));
    }

    #[test]
    fn test_area_larger_than_raster_shows_backdrop() {
        let raster = Raster::new(1, 2, 1.0);
        let backdrop = Rgba::new(1, 2, 3, 1.0);
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        RasterView::new(&raster, backdrop).render(area, &mut buf);
        assert_eq!(buf[(2, 1)].bg, Color::Rgb(1, 2, 3));
    }
}
