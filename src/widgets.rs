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
use crate::{Context, ControlColor, IconId, Id, Real, Recti, ResourceState, WidgetOption, rect, vec2};
use std::fmt::Write;

impl Context {
    /// Draws word-wrapped multi-line text in its own column scope.
    pub fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let font = self.style.font;
        let color = self.style.colors[ControlColor::Text as usize];
        let height = self.text_height(font);

        self.layout_begin_column();
        self.layout.row(&[-1], height);

        let bytes = text.as_bytes();
        let len = bytes.len();
        let mut p = 0;
        loop {
            let r = self.layout.next();
            let start = p;
            let mut end = p;
            let mut w = 0;
            // greedy fill: take words until the next one would overflow the
            // row, always keeping at least one word per line
            loop {
                let word = p;
                while p < len && bytes[p] != b' ' && bytes[p] != b'\n' {
                    p += 1;
                }
                w += self.text_width(font, &text[word..p]);
                if w > r.width && end != start {
                    break;
                }
                if p == len {
                    end = p;
                    break;
                }
                w += self.text_width(font, &text[p..p + 1]);
                end = p;
                p += 1;
                if bytes[end] == b'\n' {
                    break;
                }
            }
            self.draw_text(font, &text[start..end], vec2(r.x, r.y), color);
            p = end + 1;
            if end >= len {
                break;
            }
        }

        self.layout_end_column();
    }

    /// Displays static text in the next layout cell.
    pub fn label(&mut self, text: &str) {
        let r = self.layout.next();
        self.draw_control_text(text, r, ControlColor::Text, WidgetOption::NONE);
    }

    /// Draws a button with a text label and/or an icon. Returns `SUBMIT` on
    /// click.
    pub fn button_ex(&mut self, label: &str, icon: Option<IconId>, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        let id = if !label.is_empty() {
            self.idmngr.get_id_from_str(label)
        } else {
            self.idmngr.get_id_u32(icon.map_or(0, |icon| icon.raw()))
        };
        let r = self.layout.next();
        self.update_control(id, r, opt);

        if self.input.mouse_pressed.is_left() && self.focus == Some(id) {
            res |= ResourceState::SUBMIT;
        }

        self.draw_control_frame(id, r, ControlColor::Button, opt);
        if !label.is_empty() {
            self.draw_control_text(label, r, ControlColor::Text, opt);
        }
        if let Some(icon) = icon {
            let color = self.style.colors[ControlColor::Text as usize];
            self.draw_icon(icon, r, color);
        }
        res
    }

    /// Draws a centered text button.
    pub fn button(&mut self, label: &str) -> ResourceState { self.button_ex(label, None, WidgetOption::ALIGN_CENTER) }

    /// Draws a labeled checkbox bound to `state`. Returns `CHANGE` on toggle.
    pub fn checkbox(&mut self, label: &str, state: &mut bool) -> ResourceState {
        let mut res = ResourceState::NONE;
        let id = self.idmngr.get_id_from_ptr(state);
        let r = self.layout.next();
        let box_rect = rect(r.x, r.y, r.height, r.height);
        self.update_control(id, r, WidgetOption::NONE);

        if self.input.mouse_pressed.is_left() && self.focus == Some(id) {
            res |= ResourceState::CHANGE;
            *state = !*state;
        }

        self.draw_control_frame(id, box_rect, ControlColor::Base, WidgetOption::NONE);
        if *state {
            let color = self.style.colors[ControlColor::Text as usize];
            self.draw_icon(IconId::CHECK, box_rect, color);
        }
        let text_rect = rect(r.x + box_rect.width, r.y, r.width - box_rect.width, r.height);
        self.draw_control_text(label, text_rect, ControlColor::Text, WidgetOption::NONE);
        res
    }

    /// Draws a single-line text editor over `buf` in an explicit rect with an
    /// explicit id. Holds focus while editing; Return submits and releases.
    pub fn textbox_raw(&mut self, buf: &mut String, id: Id, r: Recti, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        self.update_control(id, r, opt | WidgetOption::HOLD_FOCUS);

        if self.focus == Some(id) {
            if !self.input.input_text.is_empty() {
                buf.push_str(&self.input.input_text);
                res |= ResourceState::CHANGE;
            }
            if self.input.key_pressed.is_backspace() && buf.pop().is_some() {
                res |= ResourceState::CHANGE;
            }
            if self.input.key_pressed.is_return() {
                self.set_focus(None);
                res |= ResourceState::SUBMIT;
            }
        }

        self.draw_control_frame(id, r, ControlColor::Base, opt);
        if self.focus == Some(id) {
            let color = self.style.colors[ControlColor::Text as usize];
            let font = self.style.font;
            let textw = self.text_width(font, buf);
            let texth = self.text_height(font);
            let padding = self.style.padding;
            // keep the caret visible by shifting long content left
            let ofx = r.width - padding - textw - 1;
            let textx = r.x + ofx.min(padding);
            let texty = r.y + (r.height - texth) / 2;
            self.push_clip_rect(r);
            self.draw_text(font, buf, vec2(textx, texty), color);
            self.draw_rect(rect(textx + textw, texty, 1, texth), color);
            self.pop_clip_rect();
        } else {
            self.draw_control_text(buf, r, ControlColor::Text, opt);
        }
        res
    }

    /// Draws a text editor over `buf` in the next layout cell.
    pub fn textbox_ex(&mut self, buf: &mut String, opt: WidgetOption) -> ResourceState {
        let id = self.idmngr.get_id_from_ptr(buf);
        let r = self.layout.next();
        self.textbox_raw(buf, id, r, opt)
    }

    /// Draws a text editor over `buf` with default options.
    pub fn textbox(&mut self, buf: &mut String) -> ResourceState { self.textbox_ex(buf, WidgetOption::NONE) }

    // Shift+click turns sliders and number widgets into an inline textbox
    // over the same rect; submit or focus loss parses the buffer back.
    fn number_textbox(&mut self, value: &mut Real, r: Recti, id: Id) -> bool {
        if self.input.mouse_pressed.is_left() && self.input.key_down.is_shift() && self.hover == Some(id) {
            self.number_edit = Some(id);
            self.number_edit_buf.clear();
            let _ = write!(self.number_edit_buf, "{:.3}", *value);
        }
        if self.number_edit == Some(id) {
            let mut buf = std::mem::take(&mut self.number_edit_buf);
            let res = self.textbox_raw(&mut buf, id, r, WidgetOption::NONE);
            self.number_edit_buf = buf;
            if res.is_submitted() || self.focus != Some(id) {
                *value = self.number_edit_buf.parse().unwrap_or(0.0);
                self.number_edit = None;
            } else {
                return true;
            }
        }
        false
    }

    /// Draws a horizontal slider editing `value` within `low..=high`. A step
    /// of 0 disables quantization; `precision` is the number of decimals
    /// shown. Returns `CHANGE` when the value moves.
    pub fn slider_ex(&mut self, value: &mut Real, low: Real, high: Real, step: Real, precision: usize, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        let last = *value;
        let mut v = last;
        let id = self.idmngr.get_id_from_ptr(value);
        let base = self.layout.next();

        if self.number_textbox(&mut v, base, id) {
            return res;
        }

        self.update_control(id, base, opt);

        if self.focus == Some(id) && (self.input.mouse_down | self.input.mouse_pressed).is_left() {
            v = low + (self.input.mouse_pos.x - base.x) as Real * (high - low) / base.width as Real;
            if step != 0.0 {
                v = ((v + step / 2.0) / step) as i64 as Real * step;
            }
        }
        v = v.clamp(low, high);
        *value = v;
        if last != v {
            res |= ResourceState::CHANGE;
        }

        self.draw_control_frame(id, base, ControlColor::Base, opt);
        let w = self.style.thumb_size;
        let x = ((v - low) * (base.width - w) as Real / (high - low)) as i32;
        let thumb = rect(base.x + x, base.y, w, base.height);
        self.draw_control_frame(id, thumb, ControlColor::Button, opt);

        let mut buf = String::new();
        let _ = write!(buf, "{:.*}", precision, v);
        self.draw_control_text(&buf, base, ControlColor::Text, opt);
        res
    }

    /// Draws a slider with two decimals, no step, centered text.
    pub fn slider(&mut self, value: &mut Real, low: Real, high: Real) -> ResourceState {
        self.slider_ex(value, low, high, 0.0, 2, WidgetOption::ALIGN_CENTER)
    }

    /// Draws a numeric field edited by horizontal dragging; `step` scales a
    /// pixel of movement. Returns `CHANGE` when the value moves.
    pub fn number_ex(&mut self, value: &mut Real, step: Real, precision: usize, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        let id = self.idmngr.get_id_from_ptr(value);
        let base = self.layout.next();
        let last = *value;

        if self.number_textbox(value, base, id) {
            return res;
        }

        self.update_control(id, base, opt);

        if self.focus == Some(id) && self.input.mouse_down.is_left() {
            *value += self.input.mouse_delta.x as Real * step;
        }
        if *value != last {
            res |= ResourceState::CHANGE;
        }

        self.draw_control_frame(id, base, ControlColor::Base, opt);
        let mut buf = String::new();
        let _ = write!(buf, "{:.*}", precision, *value);
        self.draw_control_text(&buf, base, ControlColor::Text, opt);
        res
    }

    /// Draws a numeric field with two decimals and centered text.
    pub fn number(&mut self, value: &mut Real, step: Real) -> ResourceState {
        self.number_ex(value, step, 2, WidgetOption::ALIGN_CENTER)
    }

    fn header_impl(&mut self, label: &str, is_treenode: bool, opt: WidgetOption) -> (ResourceState, Id) {
        let id = self.idmngr.get_id_from_str(label);
        let slot = self.treenode_pool.get(id);
        self.layout.row(&[-1], 0);

        let mut active = slot.is_some();
        let expanded = if opt.is_expanded() { !active } else { active };
        let r = self.layout.next();
        self.update_control(id, r, WidgetOption::NONE);

        active ^= self.input.mouse_pressed.is_left() && self.focus == Some(id);

        // keep the pool entry in sync with the open state
        match slot {
            Some(slot) => {
                if active {
                    self.treenode_pool.update(slot, self.frame);
                } else {
                    self.treenode_pool.remove(slot);
                }
            }
            None => {
                if active {
                    self.treenode_pool.init(id, self.frame);
                }
            }
        }

        if is_treenode {
            if self.hover == Some(id) {
                self.draw_frame(r, ControlColor::ButtonHover);
            }
        } else {
            self.draw_control_frame(id, r, ControlColor::Button, WidgetOption::NONE);
        }

        let color = self.style.colors[ControlColor::Text as usize];
        self.draw_icon(
            if expanded { IconId::EXPANDED } else { IconId::COLLAPSED },
            rect(r.x, r.y, r.height, r.height),
            color,
        );
        let padding = self.style.padding;
        let text_rect = rect(r.x + r.height - padding, r.y, r.width - (r.height - padding), r.height);
        self.draw_control_text(label, text_rect, ControlColor::Text, WidgetOption::NONE);

        (if expanded { ResourceState::ACTIVE } else { ResourceState::NONE }, id)
    }

    /// Draws a collapsible header row. Returns `ACTIVE` while expanded.
    pub fn header_ex(&mut self, label: &str, opt: WidgetOption) -> ResourceState { self.header_impl(label, false, opt).0 }

    /// Draws a collapsible header row with default options.
    pub fn header(&mut self, label: &str) -> ResourceState { self.header_ex(label, WidgetOption::NONE) }

    /// Begins a tree node. While it returns `ACTIVE` the caller must emit the
    /// children and finish with [`Context::end_treenode`]; otherwise neither.
    pub fn begin_treenode_ex(&mut self, label: &str, opt: WidgetOption) -> ResourceState {
        let (res, id) = self.header_impl(label, true, opt);
        if res.is_active() {
            self.layout.adjust_indent(self.style.indent);
            self.idmngr.push_id(id);
        }
        res
    }

    /// Begins a tree node with default options.
    pub fn begin_treenode(&mut self, label: &str) -> ResourceState { self.begin_treenode_ex(label, WidgetOption::NONE) }

    /// Finishes the innermost expanded tree node.
    pub fn end_treenode(&mut self) {
        self.layout.adjust_indent(-self.style.indent);
        self.idmngr.pop_id();
    }

    /// Runs `f` for the children of the tree node `label` while expanded.
    pub fn treenode<F: FnOnce(&mut Self)>(&mut self, label: &str, opt: WidgetOption, f: F) -> ResourceState {
        let res = self.begin_treenode_ex(label, opt);
        if res.is_active() {
            f(self);
            self.end_treenode();
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

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

    const PLAIN: WidgetOption = WidgetOption::NO_TITLE
        .union(WidgetOption::NO_RESIZE)
        .union(WidgetOption::NO_SCROLL)
        .union(WidgetOption::NO_FRAME);

    fn emitted_texts(ctx: &Context) -> Vec<String> {
        ctx.commands()
            .filter_map(|cmd| match cmd {
                Command::Text { text, .. } => Some(text.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn checkbox_toggles_on_each_click() {
        let mut ctx = make_context();
        let mut state = false;
        let mut run = |ctx: &mut Context, state: &mut bool| {
            let mut res = ResourceState::NONE;
            ctx.frame(|ui| {
                ui.window("W", rect(0, 0, 200, 100), PLAIN, |ui| {
                    res = ui.checkbox("check me", state);
                });
            });
            res
        };

        // hover the checkbox, then click
        ctx.input.mousemove(20, 10);
        let _ = run(&mut ctx, &mut state);
        let _ = run(&mut ctx, &mut state);
        ctx.input.mousedown(20, 10, MouseButton::LEFT);
        let res = run(&mut ctx, &mut state);
        assert!(res.is_changed());
        assert!(state);

        // release, click again: toggles back off
        ctx.input.mouseup(20, 10, MouseButton::LEFT);
        let res = run(&mut ctx, &mut state);
        assert!(res.is_none());
        assert!(state);
        ctx.input.mousedown(20, 10, MouseButton::LEFT);
        let res = run(&mut ctx, &mut state);
        assert!(res.is_changed());
        assert!(!state);
        ctx.input.mouseup(20, 10, MouseButton::LEFT);
    }

    #[test]
    fn slider_jumps_to_the_pointer_and_clamps() {
        let mut ctx = make_context();
        let mut value: Real = 0.0;
        let mut run = |ctx: &mut Context, value: &mut Real| {
            let mut res = ResourceState::NONE;
            ctx.frame(|ui| {
                ui.window("W", rect(0, 0, 200, 100), PLAIN, |ui| {
                    res = ui.slider(value, 0.0, 10.0);
                });
            });
            res
        };

        // slider cell spans (5, 5, 78, 20); 44 is half way across
        ctx.input.mousemove(44, 10);
        let _ = run(&mut ctx, &mut value);
        let _ = run(&mut ctx, &mut value);
        ctx.input.mousedown(44, 10, MouseButton::LEFT);
        let res = run(&mut ctx, &mut value);
        assert!(res.is_changed());
        assert!((value - 5.0).abs() < 1e-4);

        // dragging past the end clamps to the range
        ctx.input.mousemove(1000, 10);
        let _ = run(&mut ctx, &mut value);
        assert_eq!(value, 10.0);
        ctx.input.mouseup(1000, 10, MouseButton::LEFT);
    }

    #[test]
    fn number_drags_horizontally() {
        let mut ctx = make_context();
        let mut value: Real = 1.0;
        let mut run = |ctx: &mut Context, value: &mut Real| {
            let mut res = ResourceState::NONE;
            ctx.frame(|ui| {
                ui.window("W", rect(0, 0, 200, 100), PLAIN, |ui| {
                    res = ui.number(value, 0.5);
                });
            });
            res
        };

        ctx.input.mousemove(20, 10);
        let _ = run(&mut ctx, &mut value);
        let _ = run(&mut ctx, &mut value);
        ctx.input.mousedown(20, 10, MouseButton::LEFT);
        let _ = run(&mut ctx, &mut value);
        ctx.input.mousemove(30, 10);
        let res = run(&mut ctx, &mut value);
        assert!(res.is_changed());
        assert!((value - 6.0).abs() < 1e-4);
        ctx.input.mouseup(30, 10, MouseButton::LEFT);
    }

    #[test]
    fn textbox_edits_and_submits() {
        let mut ctx = make_context();
        let mut buf = String::new();
        let mut run = |ctx: &mut Context, buf: &mut String| {
            let mut res = ResourceState::NONE;
            ctx.frame(|ui| {
                ui.window("W", rect(0, 0, 200, 100), PLAIN, |ui| {
                    res = ui.textbox(buf);
                });
            });
            res
        };

        // focus the textbox with a click
        ctx.input.mousemove(20, 10);
        let _ = run(&mut ctx, &mut buf);
        let _ = run(&mut ctx, &mut buf);
        ctx.input.mousedown(20, 10, MouseButton::LEFT);
        let _ = run(&mut ctx, &mut buf);
        ctx.input.mouseup(20, 10, MouseButton::LEFT);
        assert!(ctx.focus.is_some());

        ctx.input.text("héllo");
        let res = run(&mut ctx, &mut buf);
        assert!(res.is_changed());
        assert_eq!(buf, "héllo");

        // backspace removes one scalar value, not one byte
        ctx.input.keydown(KeyMode::BACKSPACE);
        let res = run(&mut ctx, &mut buf);
        ctx.input.keyup(KeyMode::BACKSPACE);
        assert!(res.is_changed());
        assert_eq!(buf, "héll");

        ctx.input.keydown(KeyMode::RETURN);
        let res = run(&mut ctx, &mut buf);
        ctx.input.keyup(KeyMode::RETURN);
        assert!(res.is_submitted());
        assert!(ctx.focus.is_none());
    }

    #[test]
    fn shift_click_edits_a_number_inline() {
        let mut ctx = make_context();
        let mut value: Real = 5.0;
        let mut run = |ctx: &mut Context, value: &mut Real| {
            ctx.frame(|ui| {
                ui.window("W", rect(0, 0, 200, 100), PLAIN, |ui| {
                    let _ = ui.number(value, 1.0);
                });
            });
        };

        ctx.input.mousemove(20, 10);
        run(&mut ctx, &mut value);
        run(&mut ctx, &mut value);

        ctx.input.keydown(KeyMode::SHIFT);
        ctx.input.mousedown(20, 10, MouseButton::LEFT);
        run(&mut ctx, &mut value);
        assert!(ctx.number_edit.is_some());
        assert_eq!(ctx.number_edit_buf, "5.000");
        ctx.input.mouseup(20, 10, MouseButton::LEFT);
        ctx.input.keyup(KeyMode::SHIFT);

        // Return leaves edit mode and parses the buffer back
        ctx.input.keydown(KeyMode::RETURN);
        run(&mut ctx, &mut value);
        ctx.input.keyup(KeyMode::RETURN);
        assert!(ctx.number_edit.is_none());
        assert_eq!(value, 5.0);
    }

    #[test]
    fn treenode_expansion_survives_frames() {
        let mut ctx = make_context();
        let mut run = |ctx: &mut Context| {
            let mut child_ran = false;
            let mut child_x = 0;
            ctx.frame(|ui| {
                ui.window("W", rect(0, 0, 200, 200), PLAIN, |ui| {
                    ui.treenode("node", WidgetOption::NONE, |ui| {
                        child_ran = true;
                        child_x = ui.layout_next().x;
                    });
                });
            });
            (child_ran, child_x)
        };

        // collapsed by default
        let (ran, _) = run(&mut ctx);
        assert!(!ran);

        // hover, then click to expand; the toggle shows up one frame later
        ctx.input.mousemove(100, 10);
        let _ = run(&mut ctx);
        let _ = run(&mut ctx);
        ctx.input.mousedown(100, 10, MouseButton::LEFT);
        let _ = run(&mut ctx);
        ctx.input.mouseup(100, 10, MouseButton::LEFT);

        let (ran, child_x) = run(&mut ctx);
        assert!(ran);
        // children are placed at the indented x
        let indent = ctx.get_style().indent;
        let padding = ctx.get_style().padding;
        assert_eq!(child_x, indent + padding);

        // expansion persists without further interaction
        ctx.input.mousemove(400, 400);
        let (ran, _) = run(&mut ctx);
        assert!(ran);

        // clicking the header again collapses it
        ctx.input.mousemove(100, 10);
        let _ = run(&mut ctx);
        let _ = run(&mut ctx);
        ctx.input.mousedown(100, 10, MouseButton::LEFT);
        let _ = run(&mut ctx);
        ctx.input.mouseup(100, 10, MouseButton::LEFT);
        let (ran, _) = run(&mut ctx);
        assert!(!ran);
    }

    #[test]
    fn expanded_header_starts_open() {
        let mut ctx = make_context();
        let mut res = ResourceState::NONE;
        ctx.frame(|ui| {
            ui.window("W", rect(0, 0, 200, 100), PLAIN, |ui| {
                res = ui.header_ex("open by default", WidgetOption::EXPANDED);
            });
        });
        assert!(res.is_active());
    }

    #[test]
    fn text_wraps_at_word_boundaries() {
        let mut ctx = make_context();
        ctx.frame(|ui| {
            ui.window("W", rect(0, 0, 100, 200), PLAIN, |ui| {
                ui.layout_row(&[-1], 0);
                // 7 chars * 8 px per word; two words exceed the 90 px body
                ui.text("aaaaaaa bbbbbbb");
            });
        });
        assert_eq!(emitted_texts(&ctx), vec!["aaaaaaa", "bbbbbbb"]);
    }

    #[test]
    fn text_honors_explicit_newlines() {
        let mut ctx = make_context();
        ctx.frame(|ui| {
            ui.window("W", rect(0, 0, 400, 200), PLAIN, |ui| {
                ui.layout_row(&[-1], 0);
                ui.text("one\ntwo");
            });
        });
        let texts = emitted_texts(&ctx);
        assert_eq!(texts, vec!["one", "two"]);

        // the lines sit on consecutive rows
        let ys: Vec<i32> = ctx
            .commands()
            .filter_map(|cmd| match cmd {
                Command::Text { pos, .. } => Some(pos.y),
                _ => None,
            })
            .collect();
        assert!(ys[1] > ys[0]);
    }

    #[test]
    fn label_emits_its_text() {
        let mut ctx = make_context();
        ctx.frame(|ui| {
            ui.window("W", rect(0, 0, 200, 100), PLAIN, |ui| {
                ui.label("hello");
            });
        });
        assert_eq!(emitted_texts(&ctx), vec!["hello"]);
    }

    #[test]
    fn buttons_in_different_scopes_do_not_collide() {
        let mut ctx = make_context();
        ctx.input.mousemove(20, 10);
        let mut run = |ctx: &mut Context| {
            let mut in_a = ResourceState::NONE;
            let mut in_b = ResourceState::NONE;
            ctx.frame(|ui| {
                ui.window("A", rect(0, 0, 100, 50), PLAIN, |ui| {
                    in_a = ui.button("OK");
                });
                ui.window("B", rect(0, 100, 100, 50), PLAIN, |ui| {
                    in_b = ui.button("OK");
                });
            });
            (in_a, in_b)
        };
        let _ = run(&mut ctx);
        let _ = run(&mut ctx);
        ctx.input.mousedown(20, 10, MouseButton::LEFT);
        let (in_a, in_b) = run(&mut ctx);
        ctx.input.mouseup(20, 10, MouseButton::LEFT);
        assert!(in_a.is_submitted());
        assert!(in_b.is_none());
    }
}
