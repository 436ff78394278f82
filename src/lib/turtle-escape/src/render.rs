/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Rendering sinks. The simulator pushes state into a [`Renderer`] and never reads anything
//! back, so swapping renderers cannot change how a run ends.

use std::collections::HashMap;
use std::io::Write;

use crate::geometry::{Point, Rect};

pub trait Renderer {
    /// Forget everything drawn so far.
    fn clear(&mut self);

    fn draw_box(&mut self, rect: &Rect, color: &str);

    fn draw_boxes(&mut self, rects: &[Rect], color: &str) {
        for rect in rects {
            self.draw_box(rect, color);
        }
    }

    /// Put the turtle marker somewhere without leaving a trail.
    fn place_turtle(&mut self, position: Point, heading: f64);

    /// Move the turtle marker, leaving a trail behind it.
    fn move_turtle(&mut self, position: Point, heading: f64);

    /// Write out whatever has been drawn. Called after each run.
    fn finish(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Discards everything. For fast automated runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn clear(&mut self) {}

    fn draw_box(&mut self, _rect: &Rect, _color: &str) {}

    fn place_turtle(&mut self, _position: Point, _heading: f64) {}

    fn move_turtle(&mut self, _position: Point, _heading: f64) {}
}

const EMPTY_GLYPH: char = '.';
const TRAIL_GLYPH: char = '*';
const UNKNOWN_COLOR_GLYPH: char = '?';

/// Rasterises the arena onto a character grid, one character per `cell_size` square, and
/// writes the final frame to `out` when finished.
///
/// Boxes are filled with a glyph looked up by color name. The grid is printed top row first,
/// so it reads the same way up as the arena.
pub struct AsciiRenderer<W: Write> {
    out: W,
    area: Rect,
    cell_size: f64,
    columns: usize,
    rows: usize,
    cells: Vec<char>,
    palette: HashMap<String, char>,
    turtle: Option<(Point, f64)>,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, area: Rect, cell_size: f64) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };
        let columns = (area.width() / cell_size).floor() as usize + 1;
        let rows = (area.height() / cell_size).floor() as usize + 1;
        let palette = [("black", '#'), ("green", 'T'), ("red", 'X'), ("blue", '~')]
            .into_iter()
            .map(|(color, glyph)| (color.to_string(), glyph))
            .collect();
        Self {
            out,
            area,
            cell_size,
            columns,
            rows,
            cells: vec![EMPTY_GLYPH; columns * rows],
            palette,
            turtle: None,
        }
    }

    /// Use `glyph` for boxes drawn in `color`.
    pub fn with_glyph(mut self, color: &str, glyph: char) -> Self {
        self.palette.insert(color.to_string(), glyph);
        self
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get a cell. Row 0 is the top of the arena.
    pub fn get(&self, col: usize, row: usize) -> char {
        self.cells[row * self.columns + col]
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn get_mut(&mut self, col: usize, row: usize) -> &mut char {
        &mut self.cells[row * self.columns + col]
    }

    fn locate(&self, point: Point) -> Option<(usize, usize)> {
        if !self.area.contains(point) {
            return None;
        }
        let col = ((point.x - self.area.left()) / self.cell_size).floor() as usize;
        let row = ((self.area.top() - point.y) / self.cell_size).floor() as usize;
        Some((col.min(self.columns - 1), row.min(self.rows - 1)))
    }

    fn turtle_glyph(heading: f64) -> char {
        match ((heading + 45.0) / 90.0).floor() as i64 % 4 {
            0 => '>',
            1 => '^',
            2 => '<',
            _ => 'v',
        }
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn clear(&mut self) {
        self.cells.fill(EMPTY_GLYPH);
        self.turtle = None;
    }

    fn draw_box(&mut self, rect: &Rect, color: &str) {
        if rect.left() > self.area.right()
            || rect.right() < self.area.left()
            || rect.bottom() > self.area.top()
            || rect.top() < self.area.bottom()
        {
            return;
        }
        let clipped = Rect::new(
            Point::new(
                rect.left().max(self.area.left()),
                rect.top().min(self.area.top()),
            ),
            Point::new(
                rect.right().min(self.area.right()),
                rect.bottom().max(self.area.bottom()),
            ),
        );
        let (Some((col0, row0)), Some((col1, row1))) =
            (self.locate(clipped.top_left()), self.locate(clipped.bottom_right()))
        else {
            return;
        };
        let glyph = *self.palette.get(color).unwrap_or(&UNKNOWN_COLOR_GLYPH);
        for row in row0..=row1 {
            for col in col0..=col1 {
                *self.get_mut(col, row) = glyph;
            }
        }
    }

    fn place_turtle(&mut self, position: Point, heading: f64) {
        self.turtle = Some((position, heading));
    }

    fn move_turtle(&mut self, position: Point, heading: f64) {
        if let Some((col, row)) = self.locate(position) {
            let cell = self.get_mut(col, row);
            if *cell == EMPTY_GLYPH {
                *cell = TRAIL_GLYPH;
            }
        }
        self.turtle = Some((position, heading));
    }

    fn finish(&mut self) -> std::io::Result<()> {
        let frame = self.to_string();
        writeln!(self.out, "{}", frame)?;
        self.out.flush()
    }
}

impl<W: Write> std::fmt::Display for AsciiRenderer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let turtle = self
            .turtle
            .and_then(|(position, heading)| Some((self.locate(position)?, heading)));
        let mut s = String::with_capacity((self.columns + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.columns {
                match turtle {
                    Some(((turtle_col, turtle_row), heading))
                        if turtle_col == col && turtle_row == row =>
                    {
                        s.push(Self::turtle_glyph(heading));
                    }
                    _ => s.push(self.get(col, row)),
                }
            }
            if row < self.rows - 1 {
                s.push('\n');
            }
        }
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_area() -> Rect {
        Rect::new(Point::new(0.0, 4.0), Point::new(4.0, 0.0))
    }

    #[test]
    fn test_grid_covers_area_inclusively() {
        let renderer = AsciiRenderer::new(Vec::new(), small_area(), 1.0);
        assert_eq!(renderer.columns(), 5);
        assert_eq!(renderer.rows(), 5);

        let coarse = AsciiRenderer::new(Vec::new(), small_area(), 2.0);
        assert_eq!(coarse.columns(), 3);
        assert_eq!(coarse.rows(), 3);
    }

    #[test]
    fn test_draw_box_fills_cells_with_color_glyph() {
        let mut renderer = AsciiRenderer::new(Vec::new(), small_area(), 1.0);
        renderer.draw_box(&Rect::new(Point::new(1.0, 3.0), Point::new(2.0, 2.0)), "black");
        renderer.draw_box(&Rect::centered_at(Point::new(4.0, 0.0), 1, 1), "green");
        renderer.draw_box(&Rect::centered_at(Point::new(0.0, 0.0), 1, 1), "mauve");
        assert_eq!(
            renderer.to_string(),
            ".....\n.##..\n.##..\n.....\n?...T"
        );
    }

    #[test]
    fn test_boxes_outside_area_are_clipped_or_skipped() {
        let mut renderer = AsciiRenderer::new(Vec::new(), small_area(), 1.0);
        renderer.draw_box(&Rect::new(Point::new(10.0, 10.0), Point::new(12.0, 8.0)), "black");
        renderer.draw_box(&Rect::new(Point::new(-5.0, 5.0), Point::new(0.0, 4.0)), "black");
        assert_eq!(
            renderer.to_string(),
            "#....\n.....\n.....\n.....\n....."
        );
    }

    #[test]
    fn test_turtle_trail_and_marker() {
        let mut renderer = AsciiRenderer::new(Vec::new(), small_area(), 1.0);
        renderer.place_turtle(Point::new(0.0, 2.0), 0.0);
        renderer.move_turtle(Point::new(1.0, 2.0), 0.0);
        renderer.move_turtle(Point::new(2.0, 2.0), 90.0);
        assert_eq!(
            renderer.to_string(),
            ".....\n.....\n.*^..\n.....\n....."
        );
    }

    #[test]
    fn test_finish_writes_frame_and_clear_resets() {
        let mut renderer =
            AsciiRenderer::new(Vec::new(), small_area(), 2.0).with_glyph("black", '@');
        renderer.draw_box(&small_area(), "black");
        renderer.finish().expect("finish failed");
        renderer.clear();
        assert_eq!(renderer.to_string(), "...\n...\n...");

        let out = String::from_utf8(renderer.into_inner()).expect("not utf8");
        assert_eq!(out, "@@@\n@@@\n@@@\n");
    }
}
