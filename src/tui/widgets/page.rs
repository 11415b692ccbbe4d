//! Offscreen page that is taller than the terminal.
//!
//! Every section is drawn into one buffer at its page offset; the rows the
//! viewport covers are then copied into the frame.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};

use crate::state::{SectionId, Viewport};

/// Buffer covering the whole page for a `width`-column terminal.
pub fn page_buffer(viewport: &Viewport, width: u16) -> Buffer {
    Buffer::empty(Rect::new(0, 0, width, viewport.page_height()))
}

/// Area of `section` inside the page buffer.
pub fn section_area(viewport: &Viewport, section: SectionId, width: u16) -> Rect {
    Rect::new(0, viewport.section_top(section), width, viewport.height())
}

/// Copy the rows `[offset, offset + area.height)` of `page` into `area`.
pub fn blit(page: &Buffer, offset: u16, area: Rect, buf: &mut Buffer) {
    let width = area.width.min(page.area.width);
    for y in 0..area.height {
        let Some(src_y) = offset.checked_add(y).filter(|row| *row < page.area.height) else {
            break;
        };
        for x in 0..width {
            let src = page.cell(Position::new(x, src_y));
            let dst = buf.cell_mut(Position::new(area.x + x, area.y + y));
            if let (Some(src), Some(dst)) = (src, dst) {
                dst.clone_from(src);
            }
        }
    }
}
