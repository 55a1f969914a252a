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
use crate::command::CommandPtr;
use crate::{Context, ControlColor, IconId, Id, Recti, Vec2i, WidgetOption, expand_rect, rect, vec2};

const MIN_WINDOW_WIDTH: i32 = 96;
const MIN_WINDOW_HEIGHT: i32 = 64;

/// Persistent record of a window, panel, or popup.
///
/// Containers are retained across frames in a fixed pool and identified by
/// the id hashed from their name. `head` and `tail` are per-frame scratch
/// bracketing the container's range in the command buffer; everything else
/// survives until the container is evicted.
#[derive(Default, Clone)]
pub struct Container {
    pub(crate) rect: Recti,
    pub(crate) body: Recti,
    pub(crate) content_size: Vec2i,
    pub(crate) scroll: Vec2i,
    pub(crate) zindex: i32,
    pub(crate) open: bool,
    pub(crate) head: Option<CommandPtr>,
    pub(crate) tail: Option<CommandPtr>,
}

impl Container {
    /// Returns the outer container rectangle.
    pub fn rect(&self) -> Recti { self.rect }

    /// Sets the outer container rectangle.
    pub fn set_rect(&mut self, rect: Recti) { self.rect = rect; }

    /// Returns the inner content rectangle after title bar and scrollbars.
    pub fn body(&self) -> Recti { self.body }

    /// Returns the extent of the content laid out last frame.
    pub fn content_size(&self) -> Vec2i { self.content_size }

    /// Returns the current scroll offset.
    pub fn scroll(&self) -> Vec2i { self.scroll }

    /// Sets the current scroll offset.
    pub fn set_scroll(&mut self, scroll: Vec2i) { self.scroll = scroll; }

    /// Returns the z order of the container; higher draws on top.
    pub fn zindex(&self) -> i32 { self.zindex }

    /// Returns `true` while the container is open.
    pub fn is_open(&self) -> bool { self.open }

    /// Opens or closes the container.
    pub fn set_open(&mut self, open: bool) { self.open = open; }
}

impl Context {
    pub(crate) fn current_container_idx(&self) -> usize {
        match self.container_stack.top() {
            Some(idx) => *idx,
            None => panic!("no current container"),
        }
    }

    /// Returns the container currently being populated.
    pub fn get_current_container(&self) -> &Container { &self.containers[self.current_container_idx()] }

    /// Returns a mutable view of the container currently being populated.
    pub fn get_current_container_mut(&mut self) -> &mut Container {
        let idx = self.current_container_idx();
        &mut self.containers[idx]
    }

    /// Looks up or allocates the container for `id`. Returns `None` when the
    /// container does not exist yet and `opt` keeps it closed.
    pub(crate) fn container_index(&mut self, id: Id, opt: WidgetOption) -> Option<usize> {
        if let Some(idx) = self.container_pool.get(id) {
            if self.containers[idx].open || !opt.is_closed() {
                self.container_pool.update(idx, self.frame);
            }
            return Some(idx);
        }
        if opt.is_closed() {
            return None;
        }
        let idx = self.container_pool.init(id, self.frame);
        self.containers[idx] = Container::default();
        self.containers[idx].open = true;
        self.bring_to_front_idx(idx);
        Some(idx)
    }

    /// Looks up or creates the container named `name`.
    pub fn get_container(&mut self, name: &str) -> &mut Container {
        let id = self.idmngr.get_id_from_str(name);
        let idx = match self.container_index(id, WidgetOption::NONE) {
            Some(idx) => idx,
            None => unreachable!(),
        };
        &mut self.containers[idx]
    }

    /// Raises the container named `name` above all others.
    pub fn bring_to_front(&mut self, name: &str) {
        let id = self.idmngr.get_id_from_str(name);
        if let Some(idx) = self.container_index(id, WidgetOption::NONE) {
            self.bring_to_front_idx(idx);
        }
    }

    fn begin_root_container(&mut self, idx: usize) {
        self.container_stack.push(idx);
        self.root_list.push(idx);
        self.containers[idx].head = Some(self.command_list.push_jump(0));

        // the topmost root under the pointer becomes next frame's hover root
        if self.containers[idx].rect.contains(&self.input.mouse_pos)
            && match self.next_hover_root {
                Some(hover) => self.containers[idx].zindex > self.containers[hover].zindex,
                None => true,
            }
        {
            self.next_hover_root = Some(idx);
        }

        // reset clipping here so a root container started inside another
        // root's begin/end block is not clipped to the outer one
        self.clip_stack.push(crate::UNCLIPPED_RECT);
    }

    fn end_root_container(&mut self) {
        // write the tail "goto" jump and point the head jump past it; the
        // destinations are finalized during end_frame's z order pass
        let idx = self.current_container_idx();
        let tail = self.command_list.push_jump(0);
        self.containers[idx].tail = Some(tail);
        let end = self.command_list.len();
        let head = self.containers[idx].head.expect("root container missing its head jump");
        self.command_list.set_jump(head, end);

        self.pop_clip_rect();
        self.pop_container();
    }

    fn pop_container(&mut self) {
        let (max, body) = {
            let layout = self.layout.top();
            (layout.max, layout.body)
        };
        let idx = self.current_container_idx();
        self.containers[idx].content_size = vec2(max.x - body.x, max.y - body.y);
        self.container_stack.pop();
        self.layout.pop();
        self.idmngr.pop_id();
    }

    pub(crate) fn push_container_body(&mut self, idx: usize, body: Recti, opt: WidgetOption) {
        let mut body = body;
        if !opt.has_no_scroll() {
            self.scrollbars(idx, &mut body);
        }
        let padding = self.style.padding;
        let scroll = self.containers[idx].scroll;
        self.layout.style = self.style;
        self.layout.push(expand_rect(body, -padding), scroll);
        self.containers[idx].body = body;
    }

    /// Begins a top-level window. Returns `false` (emitting nothing) when the
    /// window is closed; when it returns `true` the caller must finish with
    /// [`Context::end_window`].
    #[must_use]
    pub fn begin_window(&mut self, title: &str, initial_rect: Recti, opt: WidgetOption) -> bool {
        let id = self.idmngr.get_id_from_str(title);
        let idx = match self.container_index(id, opt) {
            Some(idx) => idx,
            None => return false,
        };
        if !self.containers[idx].open {
            return false;
        }
        self.idmngr.push_id(id);

        if self.containers[idx].rect.width == 0 {
            self.containers[idx].rect = initial_rect;
        }
        self.begin_root_container(idx);
        let outer = self.containers[idx].rect;
        let mut body = outer;

        if !opt.has_no_frame() {
            self.draw_frame(outer, ControlColor::WindowBG);
        }

        if !opt.has_no_title() {
            let mut tr = outer;
            tr.height = self.style.title_height;
            self.draw_frame(tr, ControlColor::TitleBG);

            // dragging the title bar moves the window
            {
                let id = self.idmngr.get_id_from_str("!title");
                self.update_control(id, tr, opt);
                self.draw_control_text(title, tr, ControlColor::TitleText, opt);
                if self.focus == Some(id) && self.input.mouse_down.is_left() {
                    self.containers[idx].rect.x += self.input.mouse_delta.x;
                    self.containers[idx].rect.y += self.input.mouse_delta.y;
                }
                body.y += tr.height;
                body.height -= tr.height;
            }

            if !opt.has_no_close() {
                let id = self.idmngr.get_id_from_str("!close");
                let r = rect(tr.x + tr.width - tr.height, tr.y, tr.height, tr.height);
                tr.width -= r.width;
                let color = self.style.colors[ControlColor::TitleText as usize];
                self.draw_icon(IconId::CLOSE, r, color);
                self.update_control(id, r, opt);
                if self.input.mouse_pressed.is_left() && self.focus == Some(id) {
                    self.containers[idx].open = false;
                }
            }
        }

        self.push_container_body(idx, body, opt);

        // resize grip in the bottom-right corner
        if !opt.has_no_resize() {
            let sz = self.style.title_height;
            let id = self.idmngr.get_id_from_str("!resize");
            let r = rect(outer.x + outer.width - sz, outer.y + outer.height - sz, sz, sz);
            self.update_control(id, r, opt);
            if self.focus == Some(id) && self.input.mouse_down.is_left() {
                let c = &mut self.containers[idx];
                c.rect.width = MIN_WINDOW_WIDTH.max(c.rect.width + self.input.mouse_delta.x);
                c.rect.height = MIN_WINDOW_HEIGHT.max(c.rect.height + self.input.mouse_delta.y);
            }
        }

        // shrink-wrap the window around last frame's content
        if opt.is_auto_sizing() {
            let r = self.layout.top().body;
            let c = &mut self.containers[idx];
            c.rect.width = c.content_size.x + (c.rect.width - r.width);
            c.rect.height = c.content_size.y + (c.rect.height - r.height);
        }

        // popups close when any mouse button is pressed elsewhere
        if opt.is_popup() && !self.input.mouse_pressed.is_none() && self.hover_root != Some(idx) {
            self.containers[idx].open = false;
        }

        let body = self.containers[idx].body;
        self.push_clip_rect(body);
        true
    }

    /// Finishes the window opened by the last successful `begin_window`.
    pub fn end_window(&mut self) {
        self.pop_clip_rect();
        self.end_root_container();
    }

    /// Opens the window named `title`, runs `f` inside it, and closes it.
    pub fn window<F: FnOnce(&mut Self)>(&mut self, title: &str, initial_rect: Recti, opt: WidgetOption, f: F) {
        if self.begin_window(title, initial_rect, opt) {
            f(self);
            self.end_window();
        }
    }

    /// Opens the popup named `name` at the pointer and raises it.
    pub fn open_popup(&mut self, name: &str) {
        let id = self.idmngr.get_id_from_str(name);
        let idx = match self.container_index(id, WidgetOption::NONE) {
            Some(idx) => idx,
            None => unreachable!(),
        };
        // set as hover root so the click that opened it does not close it
        self.hover_root = Some(idx);
        self.next_hover_root = Some(idx);
        let mouse = self.input.mouse_pos;
        self.containers[idx].rect = rect(mouse.x, mouse.y, 1, 1);
        self.containers[idx].open = true;
        self.bring_to_front_idx(idx);
    }

    /// Begins the popup named `name`; returns `false` while it is closed.
    #[must_use]
    pub fn begin_popup(&mut self, name: &str) -> bool {
        let opt = WidgetOption::POPUP
            | WidgetOption::AUTO_SIZE
            | WidgetOption::NO_RESIZE
            | WidgetOption::NO_SCROLL
            | WidgetOption::NO_TITLE
            | WidgetOption::CLOSED;
        self.begin_window(name, rect(0, 0, 0, 0), opt)
    }

    /// Finishes the popup opened by the last successful `begin_popup`.
    pub fn end_popup(&mut self) { self.end_window(); }

    /// Runs `f` inside the popup named `name` while it is open.
    pub fn popup<F: FnOnce(&mut Self)>(&mut self, name: &str, f: F) {
        if self.begin_popup(name) {
            f(self);
            self.end_popup();
        }
    }

    /// Begins a panel occupying the next layout cell. Panels share the
    /// enclosing root's command range and do not take part in z ordering.
    pub fn begin_panel(&mut self, name: &str, opt: WidgetOption) {
        let id = self.idmngr.push_id_from_str(name);
        let idx = match self.container_index(id, opt) {
            Some(idx) => idx,
            None => unreachable!(),
        };
        let r = self.layout.next();
        self.containers[idx].rect = r;
        if !opt.has_no_frame() {
            self.draw_frame(r, ControlColor::PanelBG);
        }
        self.container_stack.push(idx);
        self.push_container_body(idx, r, opt);
        let body = self.containers[idx].body;
        self.push_clip_rect(body);
    }

    /// Finishes the innermost panel.
    pub fn end_panel(&mut self) {
        self.pop_clip_rect();
        self.pop_container();
    }

    /// Runs `f` inside the panel named `name`.
    pub fn panel<F: FnOnce(&mut Self)>(&mut self, name: &str, opt: WidgetOption, f: F) {
        self.begin_panel(name, opt);
        f(self);
        self.end_panel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;
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

    fn emitted_rect_colors(ctx: &Context) -> Vec<Color> {
        ctx.commands()
            .filter_map(|cmd| match cmd {
                Command::Rect { color, .. } => Some(color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn containers_persist_across_frames() {
        let mut ctx = make_context();
        ctx.frame(|ui| {
            ui.window("W", rect(10, 20, 100, 100), PLAIN, |_| {});
        });
        ctx.frame(|ui| {
            ui.window("W", rect(0, 0, 1, 1), PLAIN, |ui| {
                // the stored rect wins over the initial rect argument
                let r = ui.get_current_container().rect();
                assert_eq!((r.x, r.y, r.width, r.height), (10, 20, 100, 100));
            });
        });
    }

    #[test]
    fn command_stream_is_ordered_by_zindex() {
        let mut ctx = make_context();
        let red = color(255, 0, 0, 255);
        let blue = color(0, 0, 255, 255);
        ctx.frame(|ui| {
            ui.window("A", rect(0, 0, 50, 50), PLAIN, |ui| {
                ui.draw_rect(rect(0, 0, 10, 10), red);
            });
            ui.window("B", rect(0, 0, 50, 50), PLAIN, |ui| {
                ui.draw_rect(rect(0, 0, 10, 10), blue);
            });
        });
        // "A" was created first, "B" second; both draws land back-to-front
        assert_eq!(emitted_rect_colors(&ctx), vec![red, blue]);

        // raising "A" flips the order without changing emission order
        ctx.frame(|ui| {
            ui.bring_to_front("A");
            ui.window("A", rect(0, 0, 50, 50), PLAIN, |ui| {
                ui.draw_rect(rect(0, 0, 10, 10), red);
            });
            ui.window("B", rect(0, 0, 50, 50), PLAIN, |ui| {
                ui.draw_rect(rect(0, 0, 10, 10), blue);
            });
        });
        assert_eq!(emitted_rect_colors(&ctx), vec![blue, red]);
    }

    #[test]
    fn root_command_ranges_are_bracketed_by_jumps() {
        let mut ctx = make_context();
        ctx.frame(|ui| {
            ui.window("A", rect(0, 0, 50, 50), PLAIN, |ui| {
                ui.draw_rect(rect(0, 0, 10, 10), color(1, 2, 3, 255));
            });
        });
        let c = ctx.get_container("A");
        let head = c.head.expect("head");
        let tail = c.tail.expect("tail");
        assert!(head < tail);
        assert!(tail.offset() < ctx.command_list.len());
        assert_eq!(ctx.command_list.header_at(head.offset()).0, CommandKind::Jump);
        assert_eq!(ctx.command_list.header_at(tail.offset()).0, CommandKind::Jump);
    }

    #[test]
    fn clicking_a_root_raises_it() {
        let mut ctx = make_context();
        let run = |ctx: &mut Context| {
            ctx.frame(|ui| {
                ui.window("A", rect(0, 0, 50, 50), PLAIN, |_| {});
                ui.window("B", rect(25, 0, 50, 50), PLAIN, |_| {});
            });
        };
        run(&mut ctx);
        // pointer over the overlap; "B" is on top, so it stays the hover root
        ctx.input.mousemove(30, 10);
        run(&mut ctx);

        // move over the part of "A" that "B" does not cover and click
        ctx.input.mousemove(10, 10);
        run(&mut ctx);
        ctx.input.mousedown(10, 10, MouseButton::LEFT);
        run(&mut ctx);
        ctx.input.mouseup(10, 10, MouseButton::LEFT);

        let za = ctx.get_container("A").zindex();
        let zb = ctx.get_container("B").zindex();
        assert!(za > zb);
    }

    #[test]
    fn wheel_scroll_reaches_the_container_under_the_pointer() {
        let mut ctx = make_context();
        let run = |ctx: &mut Context| {
            ctx.frame(|ui| {
                ui.window("W", rect(0, 0, 100, 100), WidgetOption::NO_TITLE, |ui| {
                    // lay out 1000 px of content inside a 100 px body
                    ui.layout_row(&[-1], 1000);
                    let _ = ui.layout_next();
                });
            });
        };

        // frame 1 computes content_size and establishes the hover root
        ctx.input.mousemove(50, 50);
        run(&mut ctx);
        // frame 2 registers the body as scroll target; end_frame applies it
        ctx.input.scroll(0, 30);
        run(&mut ctx);
        assert_eq!(ctx.get_container("W").scroll().y, 30);

        // widgets in the body shift up by the scroll amount
        let mut unscrolled = 0;
        ctx.frame(|ui| {
            ui.window("W", rect(0, 0, 100, 100), WidgetOption::NO_TITLE, |ui| {
                ui.layout_row(&[-1], 1000);
                unscrolled = ui.layout_next().y;
            });
        });
        let body_top = ctx.get_container("W").body().y;
        assert_eq!(unscrolled, body_top + ctx.get_style().padding - 30);
    }

    #[test]
    fn popup_opens_at_the_pointer_and_closes_on_outside_click() {
        let mut ctx = make_context();
        let mut seen = false;
        ctx.input.mousemove(40, 40);
        ctx.frame(|ui| {
            ui.open_popup("ctx-menu");
            ui.popup("ctx-menu", |ui| {
                ui.label("item");
                seen = true;
            });
        });
        assert!(seen);
        let r = ctx.get_container("ctx-menu").rect();
        assert_eq!((r.x, r.y), (40, 40));

        // move away, then click: the press lands outside the popup
        ctx.input.mousemove(300, 300);
        ctx.frame(|ui| {
            ui.popup("ctx-menu", |_| {});
        });
        ctx.input.mousedown(300, 300, MouseButton::LEFT);
        ctx.frame(|ui| {
            ui.popup("ctx-menu", |_| {});
        });
        ctx.input.mouseup(300, 300, MouseButton::LEFT);

        assert!(!ctx.get_container("ctx-menu").is_open());
        let mut reopened = false;
        ctx.frame(|ui| {
            ui.popup("ctx-menu", |_| {
                reopened = true;
            });
        });
        assert!(!reopened);
    }

    #[test]
    fn auto_size_windows_shrink_wrap_their_content() {
        let mut ctx = make_context();
        let opt = WidgetOption::AUTO_SIZE | WidgetOption::NO_TITLE | WidgetOption::NO_SCROLL | WidgetOption::NO_RESIZE;
        let run = |ctx: &mut Context| {
            ctx.frame(|ui| {
                ui.window("W", rect(0, 0, 500, 500), opt, |ui| {
                    ui.layout_row(&[40], 30);
                    let _ = ui.layout_next();
                });
            });
        };
        run(&mut ctx);
        run(&mut ctx);
        let r = ctx.get_container("W").rect();
        let padding = ctx.get_style().padding;
        assert_eq!(r.width, 40 + padding * 2);
        assert_eq!(r.height, 30 + padding * 2);
    }

    #[test]
    fn panels_nest_inside_the_root_command_range() {
        let mut ctx = make_context();
        let green = color(0, 255, 0, 255);
        ctx.frame(|ui| {
            ui.window("W", rect(0, 0, 200, 200), PLAIN, |ui| {
                ui.layout_row(&[-1], 100);
                ui.panel("p", WidgetOption::NO_FRAME | WidgetOption::NO_SCROLL, |ui| {
                    ui.draw_rect(rect(5, 5, 10, 10), green);
                });
            });
        });
        // the panel emitted into the window's range; exactly one rect appears
        assert_eq!(emitted_rect_colors(&ctx), vec![green]);
        // and the panel container itself is not a root
        assert!(ctx.get_container("W").head.is_some());
    }

    #[test]
    fn same_panel_name_in_two_windows_gets_two_containers() {
        let mut ctx = make_context();
        ctx.frame(|ui| {
            ui.window("A", rect(0, 0, 100, 100), PLAIN, |ui| {
                ui.panel("p", WidgetOption::NO_SCROLL, |_| {});
            });
            ui.window("B", rect(100, 0, 100, 100), PLAIN, |ui| {
                ui.panel("p", WidgetOption::NO_SCROLL, |_| {});
            });
        });
        let a_panel = {
            let mut mngr = crate::idmngr::IdManager::new();
            let a = mngr.get_id_from_str("A");
            mngr.push_id(a);
            mngr.get_id_from_str("p")
        };
        let b_panel = {
            let mut mngr = crate::idmngr::IdManager::new();
            let b = mngr.get_id_from_str("B");
            mngr.push_id(b);
            mngr.get_id_from_str("p")
        };
        assert_ne!(a_panel, b_panel);
        assert!(ctx.container_pool.get(a_panel).is_some());
        assert!(ctx.container_pool.get(b_panel).is_some());
    }
}
