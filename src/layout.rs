//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
use crate::stack::FixedStack;
use crate::{Recti, Style, Vec2i, rect, vec2};

pub(crate) const LAYOUT_STACK_SIZE: usize = 16;
pub(crate) const MAX_WIDTHS: usize = 16;

#[derive(Default, Copy, Clone, PartialEq, Eq)]
pub(crate) enum NextType {
    #[default]
    None,
    Relative,
    Absolute,
}

/// One nesting level of the row layout. `body` is already offset by the
/// owning container's scroll, so the rects handed out are screen absolute.
#[derive(Default, Copy, Clone)]
pub(crate) struct Layout {
    pub body: Recti,
    pub next: Recti,
    pub position: Vec2i,
    pub size: Vec2i,
    pub max: Vec2i,
    pub widths: [i32; MAX_WIDTHS],
    pub items: usize,
    pub item_index: usize,
    pub next_row: i32,
    pub next_type: NextType,
    pub indent: i32,
}

/// Stack of row layouts; one is pushed per container body and per column
/// scope. Owns a copy of the style so cell defaults and spacing are resolved
/// without reaching back into the context.
pub(crate) struct LayoutManager {
    stack: FixedStack<Layout, LAYOUT_STACK_SIZE>,
    pub style: Style,
    pub last_rect: Recti,
}

impl LayoutManager {
    pub fn new(style: Style) -> Self {
        Self {
            stack: FixedStack::new(),
            style,
            last_rect: Recti::default(),
        }
    }

    pub fn is_empty(&self) -> bool { self.stack.is_empty() }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.last_rect = Recti::default();
    }

    pub fn top(&self) -> &Layout {
        match self.stack.top() {
            Some(layout) => layout,
            None => panic!("layout stack empty"),
        }
    }

    pub fn top_mut(&mut self) -> &mut Layout {
        match self.stack.top_mut() {
            Some(layout) => layout,
            None => panic!("layout stack empty"),
        }
    }

    pub fn push(&mut self, body: Recti, scroll: Vec2i) {
        let mut layout = Layout::default();
        layout.body = rect(body.x - scroll.x, body.y - scroll.y, body.width, body.height);
        layout.max = vec2(-0x1000000, -0x1000000);
        self.stack.push(layout);
        self.row(&[0], 0);
    }

    pub fn pop(&mut self) { self.stack.pop(); }

    /// Starts a new row of `widths.len()` columns. A zero width resolves to
    /// the style's default cell width, a negative width fills the remainder
    /// of the row.
    pub fn row(&mut self, widths: &[i32], height: i32) {
        assert!(widths.len() <= MAX_WIDTHS, "too many columns in layout row");
        let layout = self.top_mut();
        layout.widths[..widths.len()].copy_from_slice(widths);
        layout.items = widths.len();
        layout.position = vec2(layout.indent, layout.next_row);
        layout.size.y = height;
        layout.item_index = 0;
    }

    /// Sets the cell width used while the row has no explicit column widths.
    pub fn width(&mut self, width: i32) { self.top_mut().size.x = width; }

    /// Sets the height of subsequent cells.
    pub fn height(&mut self, height: i32) { self.top_mut().size.y = height; }

    /// Places the next widget at an explicit rect instead of the row cursor.
    /// A relative rect is offset by the layout body; an absolute rect is
    /// returned untouched.
    pub fn set_next(&mut self, r: Recti, relative: bool) {
        let layout = self.top_mut();
        layout.next = r;
        layout.next_type = if relative { NextType::Relative } else { NextType::Absolute };
    }

    /// Computes the rect of the next widget and advances the row cursor.
    pub fn next(&mut self) -> Recti {
        let style = self.style;
        let next_type = self.top().next_type;

        let res = if next_type != NextType::None {
            // rect set by `set_next`
            let layout = self.top_mut();
            layout.next_type = NextType::None;
            let res = layout.next;
            if next_type == NextType::Absolute {
                self.last_rect = res;
                return res;
            }
            res
        } else {
            let layout = self.top_mut();
            if layout.item_index == layout.items {
                // wrap into a new row reusing the current column widths
                layout.position = vec2(layout.indent, layout.next_row);
                layout.item_index = 0;
            }

            let mut res = rect(
                layout.position.x,
                layout.position.y,
                if layout.items > 0 { layout.widths[layout.item_index] } else { layout.size.x },
                layout.size.y,
            );
            if res.width == 0 {
                res.width = style.default_cell_width + style.padding * 2;
            }
            if res.height == 0 {
                res.height = style.default_cell_height + style.padding * 2;
            }
            if res.width < 0 {
                res.width += layout.body.width - res.x + 1;
            }
            if res.height < 0 {
                res.height += layout.body.height - res.y + 1;
            }
            layout.item_index += 1;
            res
        };

        self.advance_cursor(res, style.spacing)
    }

    fn advance_cursor(&mut self, mut res: Recti, spacing: i32) -> Recti {
        {
            let layout = self.top_mut();
            layout.position.x += res.width + spacing;
            layout.next_row = layout.next_row.max(res.y + res.height + spacing);

            res.x += layout.body.x;
            res.y += layout.body.y;

            layout.max.x = layout.max.x.max(res.x + res.width);
            layout.max.y = layout.max.y.max(res.y + res.height);
        }
        self.last_rect = res;
        res
    }

    /// Opens a sub-layout occupying the next cell of the current row.
    pub fn begin_column(&mut self) {
        let r = self.next();
        self.push(r, vec2(0, 0));
    }

    /// Closes the innermost column, folding its cursor and extent back into
    /// the parent layout.
    pub fn end_column(&mut self) {
        let b = *self.top();
        self.stack.pop();
        let a = self.top_mut();
        a.position.x = a.position.x.max(b.position.x + b.body.x - a.body.x);
        a.next_row = a.next_row.max(b.next_row + b.body.y - a.body.y);
        a.max.x = a.max.x.max(b.max.x);
        a.max.y = a.max.y.max(b.max.y);
    }

    pub fn adjust_indent(&mut self, delta: i32) { self.top_mut().indent += delta; }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Style;

    fn make_manager(body: Recti) -> LayoutManager {
        let mut style = Style::default();
        style.padding = 0;
        style.spacing = 0;
        let mut mngr = LayoutManager::new(style);
        mngr.push(body, vec2(0, 0));
        mngr
    }

    #[test]
    fn fixed_widths_advance_across_the_row() {
        let mut mngr = make_manager(rect(0, 0, 100, 100));
        mngr.row(&[30, 50], 10);
        let a = mngr.next();
        let b = mngr.next();
        assert_eq!((a.x, a.y, a.width, a.height), (0, 0, 30, 10));
        assert_eq!((b.x, b.y, b.width, b.height), (30, 0, 50, 10));

        // a third cell wraps into a new row with the same widths
        let c = mngr.next();
        assert_eq!((c.x, c.y, c.width, c.height), (0, 10, 30, 10));
    }

    #[test]
    fn negative_width_fills_remaining_row() {
        let mut mngr = make_manager(rect(0, 0, 100, 100));
        mngr.row(&[30, -1], 10);
        let _ = mngr.next();
        let fill = mngr.next();
        assert_eq!(fill.x, 30);
        assert_eq!(fill.width, 100 - 30);
    }

    #[test]
    fn zero_width_uses_style_default() {
        let mut mngr = make_manager(rect(0, 0, 500, 100));
        let width = mngr.style.default_cell_width;
        mngr.row(&[0], 10);
        let r = mngr.next();
        assert_eq!(r.width, width);
    }

    #[test]
    fn body_offset_is_applied_after_scroll() {
        let mut style = Style::default();
        style.padding = 0;
        style.spacing = 0;
        let mut mngr = LayoutManager::new(style);
        mngr.push(rect(10, 20, 100, 100), vec2(0, 30));
        mngr.row(&[40], 10);
        let r = mngr.next();
        assert_eq!((r.x, r.y), (10, 20 - 30));
    }

    #[test]
    fn absolute_next_rect_bypasses_the_cursor() {
        let mut mngr = make_manager(rect(50, 50, 100, 100));
        mngr.set_next(rect(1, 2, 3, 4), false);
        let r = mngr.next();
        assert_eq!((r.x, r.y, r.width, r.height), (1, 2, 3, 4));

        // the row cursor was not disturbed
        mngr.row(&[10], 10);
        let next = mngr.next();
        assert_eq!((next.x, next.y), (50, 50));
    }

    #[test]
    fn relative_next_rect_is_offset_by_the_body() {
        let mut mngr = make_manager(rect(50, 50, 100, 100));
        mngr.set_next(rect(1, 2, 3, 4), true);
        let r = mngr.next();
        assert_eq!((r.x, r.y, r.width, r.height), (51, 52, 3, 4));
    }

    #[test]
    fn column_extent_merges_into_parent() {
        let mut mngr = make_manager(rect(0, 0, 100, 100));
        mngr.row(&[60], 40);
        mngr.begin_column();
        mngr.row(&[20], 10);
        let _ = mngr.next();
        let _ = mngr.next();
        mngr.end_column();

        // the parent cursor moved below the column cell
        mngr.row(&[10], 10);
        let after = mngr.next();
        assert_eq!(after.y, 40);
        // the running max covers both placed cells
        assert!(mngr.top().max.y >= 20);
    }

    #[test]
    fn max_tracks_far_corners_for_content_size() {
        let mut mngr = make_manager(rect(0, 0, 100, 100));
        mngr.row(&[80], 30);
        let _ = mngr.next();
        let top = mngr.top();
        assert_eq!(top.max.x, 80);
        assert_eq!(top.max.y, 30);
    }
}
