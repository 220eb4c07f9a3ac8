//! A full-screen border with optional interior sections.

use log::debug;

use crate::display::SceneContext;
use crate::objects::{ObjectCommon, RenderObject};
use crate::style::glyph;
use crate::vector::Vector2;
use crate::UpdateInfo;

/// A rectangular partition drawn inside the outer border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderSection {
    pub position: Vector2,
    pub size: Vector2,
}

impl BorderSection {
    pub fn new(position: Vector2, size: Vector2) -> Self {
        Self { position, size }
    }
}

/// Draws a box-drawing frame around the whole display, plus any interior
/// section rectangles, resolving junction characters where section edges
/// meet each other or the outer frame.
///
/// The border sits far at the back (`z_index` −100) and only re-renders on
/// resize.
pub struct Border {
    common: ObjectCommon,
    sections: Vec<BorderSection>,
    needs_render: bool,
}

impl Border {
    pub fn new() -> Self {
        Self::with_sections(Vec::new())
    }

    pub fn with_sections(sections: Vec<BorderSection>) -> Self {
        let mut common = ObjectCommon::default();
        common.position = Vector2::ZERO;
        // right at the back so that all content renders on top
        common.z_index = -100;
        Self {
            common,
            sections,
            needs_render: true,
        }
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderObject for Border {
    fn common(&self) -> &ObjectCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ObjectCommon {
        &mut self.common
    }

    fn update(&mut self, info: &UpdateInfo, _ctx: &mut SceneContext) {
        if info.has_resized {
            self.needs_render = true;
        }
    }

    fn render(&mut self, ctx: &SceneContext) {
        if !self.needs_render {
            return;
        }

        let width = ctx.width();
        let height = ctx.height();
        if width < 2 || height < 2 {
            return;
        }
        self.common.size = Vector2::new(width as i32, height as i32);

        // a blank canvas the size of the display, as a mutable char grid
        let mut grid: Vec<Vec<char>> = ctx
            .populate_frame()
            .into_rows()
            .into_iter()
            .map(|row| row.chars().collect())
            .collect();

        // the outline around the whole screen
        for x in 1..width - 1 {
            grid[0][x] = glyph::HORIZONTAL;
            grid[height - 1][x] = glyph::HORIZONTAL;
        }
        for row in grid.iter_mut().take(height - 1).skip(1) {
            row[0] = glyph::VERTICAL;
            row[width - 1] = glyph::VERTICAL;
        }
        grid[0][0] = glyph::TOP_LEFT;
        grid[0][width - 1] = glyph::TOP_RIGHT;
        grid[height - 1][0] = glyph::BOTTOM_LEFT;
        grid[height - 1][width - 1] = glyph::BOTTOM_RIGHT;

        let mut corners: Vec<Vector2> = Vec::new();
        for section in &self.sections {
            let pos = section.position;
            let size = section.size;
            let fits = pos.x >= 0
                && pos.y >= 0
                && size.x >= 2
                && size.y >= 2
                && (pos.x + size.x) as usize <= width
                && (pos.y + size.y) as usize <= height;
            if !fits {
                // the screen shrank under this section; draw what still fits
                debug!("skipping border section at {pos}, screen too small");
                continue;
            }
            let (x, y) = (pos.x as usize, pos.y as usize);
            let (sx, sy) = (size.x as usize, size.y as usize);

            for dx in 1..sx - 1 {
                grid[y][x + dx] = glyph::HORIZONTAL;
                grid[y + sy - 1][x + dx] = glyph::HORIZONTAL;
            }
            for dy in 1..sy - 1 {
                grid[y + dy][x] = glyph::VERTICAL;
                grid[y + dy][x + sx - 1] = glyph::VERTICAL;
            }

            for corner in [
                pos,
                pos + Vector2::new(size.x - 1, 0),
                pos + Vector2::new(0, size.y - 1),
                pos + size - Vector2::ONE,
            ] {
                if !corners.contains(&corner) {
                    corners.push(corner);
                }
            }
        }

        for &corner in &corners {
            if let Some(c) = junction_glyph(corner, &corners, width, height) {
                grid[corner.y as usize][corner.x as usize] = c;
            }
        }

        self.needs_render = false;
        self.common.content = grid.into_iter().map(String::from_iter).collect();
    }
}

/// Picks the box-drawing character for a section corner, from its position
/// on the display edge or the presence of neighbouring corners. Returns
/// `None` for the display's own corners, which the outline already drew.
fn junction_glyph(corner: Vector2, corners: &[Vector2], width: usize, height: usize) -> Option<char> {
    let right_edge = (width - 1) as i32;
    let bottom_edge = (height - 1) as i32;
    let on_outer_corner = (corner.x == 0 || corner.x == right_edge)
        && (corner.y == 0 || corner.y == bottom_edge);
    if on_outer_corner {
        return None;
    }

    // corners on the outer frame become T-pieces into it
    if corner.y == 0 {
        return Some(glyph::TOP_CENTRE);
    }
    if corner.x == 0 {
        return Some(glyph::MIDDLE_LEFT);
    }
    if corner.y == bottom_edge {
        return Some(glyph::BOTTOM_CENTRE);
    }
    if corner.x == right_edge {
        return Some(glyph::MIDDLE_RIGHT);
    }

    let above = corners.iter().any(|c| c.x == corner.x && c.y < corner.y);
    let below = corners.iter().any(|c| c.x == corner.x && c.y > corner.y);
    let left = corners.iter().any(|c| c.y == corner.y && c.x < corner.x);
    let right = corners.iter().any(|c| c.y == corner.y && c.x > corner.x);

    let c = match (above, below, left, right) {
        (false, true, false, true) => glyph::TOP_LEFT,
        (false, true, true, true) => glyph::TOP_CENTRE,
        (false, true, true, false) => glyph::TOP_RIGHT,
        (true, true, false, true) => glyph::MIDDLE_LEFT,
        (true, true, true, true) => glyph::CENTRE,
        (true, true, true, false) => glyph::MIDDLE_RIGHT,
        (true, false, false, true) => glyph::BOTTOM_LEFT,
        (true, false, true, true) => glyph::BOTTOM_CENTRE,
        (true, false, true, false) => glyph::BOTTOM_RIGHT,
        // a block stands out, so a malformed section layout is easy to spot
        _ => glyph::SOLID_BLOCK,
    };
    Some(c)
}
