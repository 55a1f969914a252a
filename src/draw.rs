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
use crate::command::{ClipCommand, IconCommand, RectCommand, TextCommand};
use crate::{Clip, Color, Context, ControlColor, FontId, IconId, Id, Recti, UNCLIPPED_RECT, Vec2i, WidgetOption, expand_rect, rect};

pub(crate) const CLIP_STACK_SIZE: usize = 32;

/// Default strategy for widget and container frames: a filled rect plus an
/// optional one-pixel border. Scrollbar and title fills stay borderless.
pub(crate) fn default_draw_frame(ctx: &mut Context, r: Recti, colorid: ControlColor) {
    let color = ctx.style.colors[colorid as usize];
    ctx.draw_rect(r, color);
    if colorid == ControlColor::ScrollBase || colorid == ControlColor::ScrollThumb || colorid == ControlColor::TitleBG {
        return;
    }
    let border = ctx.style.colors[ControlColor::Border as usize];
    if border.a != 0 {
        ctx.draw_box(expand_rect(r, 1), border);
    }
}

impl Context {
    /// Pushes a new clip rectangle combined with the previous clip.
    pub fn push_clip_rect(&mut self, r: Recti) {
        let last = self.get_clip_rect();
        self.clip_stack.push(r.intersect(&last).unwrap_or_default());
    }

    /// Restores the previous clip rectangle from the stack.
    pub fn pop_clip_rect(&mut self) { self.clip_stack.pop(); }

    /// Returns the active clip rectangle, or the unclipped sentinel when the
    /// stack is empty.
    pub fn get_clip_rect(&self) -> Recti {
        match self.clip_stack.top() {
            Some(r) => *r,
            None => UNCLIPPED_RECT,
        }
    }

    /// Determines whether `r` is fully visible, partially visible, or
    /// completely clipped away by the current clip rect.
    pub fn check_clip(&self, r: Recti) -> Clip {
        let cr = self.get_clip_rect();
        if r.x > cr.x + cr.width || r.x + r.width < cr.x || r.y > cr.y + cr.height || r.y + r.height < cr.y {
            return Clip::All;
        }
        if r.x >= cr.x && r.x + r.width <= cr.x + cr.width && r.y >= cr.y && r.y + r.height <= cr.y + cr.height {
            return Clip::None;
        }
        Clip::Part
    }

    /// Emits a Clip command replacing the backend scissor.
    pub(crate) fn set_clip(&mut self, r: Recti) { self.command_list.write(&ClipCommand { rect: r }); }

    /// Records a filled rectangle, culled against the current clip rect.
    pub fn draw_rect(&mut self, r: Recti, color: Color) {
        let r = r.intersect(&self.get_clip_rect()).unwrap_or_default();
        if r.width > 0 && r.height > 0 {
            self.command_list.write(&RectCommand { rect: r, color });
        }
    }

    /// Records a one-pixel box outline; the corners belong to the vertical
    /// edges.
    pub fn draw_box(&mut self, r: Recti, color: Color) {
        self.draw_rect(rect(r.x + 1, r.y, r.width - 2, 1), color);
        self.draw_rect(rect(r.x + 1, r.y + r.height - 1, r.width - 2, 1), color);
        self.draw_rect(rect(r.x, r.y, 1, r.height), color);
        self.draw_rect(rect(r.x + r.width - 1, r.y, 1, r.height), color);
    }

    /// Records a text command. Partially visible text is bracketed in Clip
    /// commands so the backend scissors it without re-measuring glyphs.
    pub fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2i, color: Color) {
        let tw = self.text_width(font, text);
        let th = self.text_height(font);
        let r = rect(pos.x, pos.y, tw, th);
        let clipped = self.check_clip(r);
        match clipped {
            Clip::All => return,
            Clip::Part => {
                let clip = self.get_clip_rect();
                self.set_clip(clip);
            }
            Clip::None => (),
        }

        let str_index = self.command_list.store_string(text);
        self.command_list.write(&TextCommand {
            font,
            pos,
            color,
            str_index,
            str_len: text.len() as u32,
        });

        if clipped != Clip::None {
            self.set_clip(UNCLIPPED_RECT);
        }
    }

    /// Records an icon command with the same clip bracketing as text.
    pub fn draw_icon(&mut self, id: IconId, r: Recti, color: Color) {
        let clipped = self.check_clip(r);
        match clipped {
            Clip::All => return,
            Clip::Part => {
                let clip = self.get_clip_rect();
                self.set_clip(clip);
            }
            Clip::None => (),
        }
        self.command_list.write(&IconCommand { rect: r, id, color });
        if clipped != Clip::None {
            self.set_clip(UNCLIPPED_RECT);
        }
    }

    /// Draws a frame using the configured frame strategy.
    pub fn draw_frame(&mut self, r: Recti, colorid: ControlColor) {
        let draw_frame = self.draw_frame;
        draw_frame(self, r, colorid);
    }

    /// Draws a widget background, promoting the color when the widget is
    /// hovered or focused.
    pub fn draw_control_frame(&mut self, id: Id, r: Recti, mut colorid: ControlColor, opt: WidgetOption) {
        if opt.has_no_frame() {
            return;
        }
        if self.focus == Some(id) {
            colorid.focus();
        } else if self.hover == Some(id) {
            colorid.hover();
        }
        self.draw_frame(r, colorid);
    }

    /// Draws widget text vertically centered in `r` with the alignment
    /// requested by `opt`, clipped to `r`.
    pub fn draw_control_text(&mut self, text: &str, r: Recti, colorid: ControlColor, opt: WidgetOption) {
        let font = self.style.font;
        let tw = self.text_width(font, text);
        let padding = self.style.padding;
        let color = self.style.colors[colorid as usize];

        self.push_clip_rect(r);
        let y = r.y + (r.height - self.text_height(font)) / 2;
        let x = if opt.is_aligned_center() {
            r.x + (r.width - tw) / 2
        } else if opt.is_aligned_right() {
            r.x + r.width - tw - padding
        } else {
            r.x + padding
        };
        self.draw_text(font, text, crate::vec2(x, y), color);
        self.pop_clip_rect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;
    use crate::{Command, FontId, TextMetrics, color};

    struct TestMetrics;

    impl TextMetrics for TestMetrics {
        fn text_width(&self, _font: FontId, text: &str) -> i32 { text.chars().count() as i32 * 8 }
        fn text_height(&self, _font: FontId) -> i32 { 10 }
    }

    fn make_context() -> Context {
        let mut ctx = Context::new();
        ctx.set_metrics(TestMetrics);
        ctx
    }

    fn rect_eq(a: Recti, b: Recti) -> bool { a.x == b.x && a.y == b.y && a.width == b.width && a.height == b.height }

    #[test]
    fn clip_stack_intersects_with_the_current_top() {
        let mut ctx = make_context();
        ctx.push_clip_rect(rect(0, 0, 100, 100));
        ctx.push_clip_rect(rect(50, 50, 100, 100));
        assert!(rect_eq(ctx.get_clip_rect(), rect(50, 50, 50, 50)));
        ctx.pop_clip_rect();
        assert!(rect_eq(ctx.get_clip_rect(), rect(0, 0, 100, 100)));
        ctx.pop_clip_rect();
        assert!(rect_eq(ctx.get_clip_rect(), UNCLIPPED_RECT));
    }

    #[test]
    fn check_clip_classifies_containment() {
        let mut ctx = make_context();
        ctx.push_clip_rect(rect(0, 0, 100, 100));
        assert_eq!(ctx.check_clip(rect(10, 10, 20, 20)), Clip::None);
        assert_eq!(ctx.check_clip(rect(90, 90, 20, 20)), Clip::Part);
        assert_eq!(ctx.check_clip(rect(200, 200, 5, 5)), Clip::All);
        ctx.pop_clip_rect();
    }

    #[test]
    fn culled_rect_emits_no_command() {
        let mut ctx = make_context();
        ctx.push_clip_rect(rect(0, 0, 10, 10));
        ctx.draw_rect(rect(100, 100, 5, 5), color(255, 0, 0, 255));
        ctx.pop_clip_rect();
        assert!(ctx.command_list.is_empty());
    }

    #[test]
    fn zero_area_rect_emits_no_command() {
        let mut ctx = make_context();
        ctx.draw_rect(rect(10, 10, 0, 10), color(255, 0, 0, 255));
        ctx.draw_rect(rect(10, 10, 10, 0), color(255, 0, 0, 255));
        assert!(ctx.command_list.is_empty());
    }

    #[test]
    fn fully_clipped_text_emits_nothing() {
        let mut ctx = make_context();
        ctx.push_clip_rect(rect(0, 0, 10, 10));
        ctx.draw_text(FontId::default(), "hello", crate::vec2(100, 100), color(255, 255, 255, 255));
        ctx.pop_clip_rect();
        assert!(ctx.command_list.is_empty());
    }

    #[test]
    fn partially_clipped_text_is_bracketed_in_clip_commands() {
        let mut ctx = make_context();
        ctx.push_clip_rect(rect(0, 0, 20, 20));
        // 5 chars * 8 px = 40 px wide, sticking out of the 20 px clip
        ctx.draw_text(FontId::default(), "hello", crate::vec2(0, 0), color(255, 255, 255, 255));
        ctx.pop_clip_rect();

        let kinds: Vec<CommandKind> = {
            let mut kinds = Vec::new();
            let mut offset = 0;
            while offset < ctx.command_list.len() {
                let (kind, size) = ctx.command_list.header_at(offset);
                kinds.push(kind);
                offset += size;
            }
            kinds
        };
        assert_eq!(kinds, vec![CommandKind::Clip, CommandKind::Text, CommandKind::Clip]);

        // the trailing clip resets the scissor
        let mut it = ctx.commands();
        let _ = it.next();
        let _ = it.next();
        match it.next() {
            Some(Command::Clip { rect: r }) => assert!(rect_eq(r, UNCLIPPED_RECT)),
            _ => panic!("expected the scissor reset"),
        }
    }

    #[test]
    fn unclipped_text_emits_a_bare_text_command() {
        let mut ctx = make_context();
        ctx.draw_text(FontId::default(), "hi", crate::vec2(5, 5), color(1, 2, 3, 255));
        let mut it = ctx.commands();
        match it.next() {
            Some(Command::Text { pos, text, color: c, .. }) => {
                assert_eq!((pos.x, pos.y), (5, 5));
                assert_eq!(text, "hi");
                assert_eq!(c, color(1, 2, 3, 255));
            }
            _ => panic!("expected a text command"),
        }
        assert!(it.next().is_none());
    }

    #[test]
    fn box_outline_owns_corners_with_vertical_edges() {
        let mut ctx = make_context();
        ctx.draw_box(rect(0, 0, 10, 10), color(255, 255, 255, 255));
        let rects: Vec<Recti> = ctx
            .commands()
            .filter_map(|cmd| match cmd {
                Command::Rect { rect: r, .. } => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 4);
        assert!(rect_eq(rects[0], rect(1, 0, 8, 1)));
        assert!(rect_eq(rects[1], rect(1, 9, 8, 1)));
        assert!(rect_eq(rects[2], rect(0, 0, 1, 10)));
        assert!(rect_eq(rects[3], rect(9, 0, 1, 10)));
    }
}
