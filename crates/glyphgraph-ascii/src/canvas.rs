//! A column-major character canvas (`canvas[x][y]`), matching the
//! orientation the routing pass reasons in.

pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
    /// Cells that are inside a node label's interior; diagonal glyphs (not
    /// that we ever draw any) are only tolerated here.
    label_interior: Vec<Vec<bool>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![' '; height]; width],
            label_interior: vec![vec![false; height]; width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set(&mut self, x: usize, y: usize, c: char) {
        if x < self.width && y < self.height {
            self.cells[x][y] = c;
        }
    }

    pub fn set_label(&mut self, x: usize, y: usize, c: char) {
        self.set(x, y, c);
        if x < self.width && y < self.height {
            self.label_interior[x][y] = true;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> char {
        self.cells[x][y]
    }

    pub fn is_label_interior(&self, x: usize, y: usize) -> bool {
        self.label_interior[x][y]
    }

    /// Draws over a cell only when nothing occupies it yet, so route
    /// segments never clobber a node border drawn earlier.
    pub fn set_if_blank(&mut self, x: usize, y: usize, c: char) {
        if x < self.width && y < self.height && self.cells[x][y] == ' ' {
            self.cells[x][y] = c;
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.width * self.height + self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.cells[x][y]);
            }
            out.push('\n');
        }
        out
    }
}
