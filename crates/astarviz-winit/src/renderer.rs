//! Paints the screen buffer into a pixel buffer: every cell becomes a solid
//! `cell_px × cell_px` square of its background colour. Characters are not
//! drawn.

use astarviz_core::{grid::Frame, style::Color};

pub(crate) struct CellRenderer {
    cell_px: usize,
    cols: usize,
    rows: usize,
    background: u32,
    /// 0x00RRGGBB pixels, `(cell_px * cols) x (cell_px * rows)`.
    pixels: Vec<u32>,
}

impl CellRenderer {
    pub fn new(cell_px: usize, cols: usize, rows: usize, background: Color) -> Self {
        let cell_px = cell_px.max(1);
        let background = background.0;
        Self {
            cell_px,
            cols,
            rows,
            background,
            pixels: vec![background; cell_px * cols * cell_px * rows],
        }
    }

    /// Side of one cell in pixels.
    pub fn cell_px(&self) -> usize {
        self.cell_px
    }

    pub fn pixel_width(&self) -> usize {
        self.cols * self.cell_px
    }

    pub fn pixel_height(&self) -> usize {
        self.rows * self.cell_px
    }

    /// Apply a frame diff to the internal pixel buffer.
    pub fn apply_frame(&mut self, frame: &Frame) {
        if frame.width as usize != self.cols || frame.height as usize != self.rows {
            self.cols = frame.width.max(0) as usize;
            self.rows = frame.height.max(0) as usize;
            let len = self.pixel_width() * self.pixel_height();
            self.pixels.clear();
            self.pixels.resize(len, self.background);
        }
        for fc in &frame.cells {
            if fc.pos.x < 0 || fc.pos.y < 0 {
                continue;
            }
            let (col, row) = (fc.pos.x as usize, fc.pos.y as usize);
            if col >= self.cols || row >= self.rows {
                continue;
            }
            self.fill_cell(col, row, self.pixel(fc.cell.style.bg));
        }
    }

    fn pixel(&self, c: Color) -> u32 {
        if c == Color::DEFAULT {
            self.background
        } else {
            c.0
        }
    }

    fn fill_cell(&mut self, col: usize, row: usize, px: u32) {
        let w = self.pixel_width();
        let x0 = col * self.cell_px;
        let y0 = row * self.cell_px;
        for y in y0..y0 + self.cell_px {
            let start = y * w + x0;
            self.pixels[start..start + self.cell_px].fill(px);
        }
    }

    /// Copy the pixel buffer into a surface buffer of the given size,
    /// clipping or padding with the background colour.
    pub fn blit_to_buffer(&self, buf: &mut [u32], buf_width: usize, buf_height: usize) {
        let src_w = self.pixel_width();
        let src_h = self.pixel_height();
        let copy_w = src_w.min(buf_width);
        let copy_h = src_h.min(buf_height);

        if buf_width > src_w || buf_height > src_h {
            buf.fill(self.background);
        }

        for y in 0..copy_h {
            let src = y * src_w;
            let dst = y * buf_width;
            if dst + copy_w <= buf.len() {
                buf[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
            }
        }
    }
}
