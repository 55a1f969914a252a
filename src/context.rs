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
use crate::command::{CommandIterator, CommandList, CommandPtr, CommandRecord, JumpCommand};
use crate::container::Container;
use crate::draw::{CLIP_STACK_SIZE, default_draw_frame};
use crate::idmngr::IdManager;
use crate::layout::LayoutManager;
use crate::pool::{CONTAINER_POOL_SIZE, Pool, TREENODE_POOL_SIZE};
use crate::stack::FixedStack;
use crate::{ControlColor, Id, Input, Recti, Style, TextMetrics, WidgetOption};

pub(crate) const CONTAINER_STACK_SIZE: usize = 32;
pub(crate) const ROOT_LIST_SIZE: usize = 32;

/// Primary entry point driving the UI.
///
/// A context owns the frame's command buffer, all bookkeeping stacks, the
/// container and tree node pools, and the input state. It is single-threaded:
/// one thread owns and drives it, and every call completes synchronously.
///
/// The per-frame protocol is `begin_frame`, widget calls, `end_frame`, then
/// iterating [`Context::commands`] into the backend.
pub struct Context {
    pub(crate) style: Style,
    /// Input state feeding this context. Event callbacks push into it between
    /// frames; edge flags are reset by `end_frame`.
    pub input: Input,

    pub(crate) command_list: CommandList,
    pub(crate) idmngr: IdManager,
    pub(crate) layout: LayoutManager,
    pub(crate) container_stack: FixedStack<usize, CONTAINER_STACK_SIZE>,
    pub(crate) clip_stack: FixedStack<Recti, CLIP_STACK_SIZE>,
    pub(crate) root_list: FixedStack<usize, ROOT_LIST_SIZE>,
    pub(crate) containers: [Container; CONTAINER_POOL_SIZE],
    pub(crate) container_pool: Pool<CONTAINER_POOL_SIZE>,
    pub(crate) treenode_pool: Pool<TREENODE_POOL_SIZE>,

    pub(crate) hover: Option<Id>,
    pub(crate) focus: Option<Id>,
    pub(crate) updated_focus: bool,
    pub(crate) frame: usize,
    pub(crate) last_zindex: i32,
    pub(crate) hover_root: Option<usize>,
    pub(crate) next_hover_root: Option<usize>,
    pub(crate) scroll_target: Option<usize>,

    pub(crate) number_edit: Option<Id>,
    pub(crate) number_edit_buf: String,

    pub(crate) metrics: Option<Box<dyn TextMetrics>>,
    pub(crate) draw_frame: fn(&mut Context, Recti, ControlColor),
}

impl Default for Context {
    fn default() -> Self { Self::new() }
}

impl Context {
    /// Creates a context with the default style. Text metrics must be
    /// configured through [`Context::set_metrics`] before the first frame.
    pub fn new() -> Self {
        let style = Style::default();
        Self {
            style,
            input: Input::default(),
            command_list: CommandList::new(),
            idmngr: IdManager::new(),
            layout: LayoutManager::new(style),
            container_stack: FixedStack::new(),
            clip_stack: FixedStack::new(),
            root_list: FixedStack::new(),
            containers: std::array::from_fn(|_| Container::default()),
            container_pool: Pool::new(),
            treenode_pool: Pool::new(),
            hover: None,
            focus: None,
            updated_focus: false,
            frame: 0,
            last_zindex: 0,
            hover_root: None,
            next_hover_root: None,
            scroll_target: None,
            number_edit: None,
            number_edit_buf: String::new(),
            metrics: None,
            draw_frame: default_draw_frame,
        }
    }

    /// Restores the context to its freshly constructed state, dropping all
    /// persistent widget state. The configured style, text metrics, and frame
    /// drawing strategy are kept.
    pub fn init(&mut self) {
        self.input = Input::default();
        self.command_list.reset();
        self.idmngr.clear();
        self.layout.clear();
        self.container_stack.clear();
        self.clip_stack.clear();
        self.root_list.clear();
        self.containers = std::array::from_fn(|_| Container::default());
        self.container_pool.clear();
        self.treenode_pool.clear();
        self.hover = None;
        self.focus = None;
        self.updated_focus = false;
        self.frame = 0;
        self.last_zindex = 0;
        self.hover_root = None;
        self.next_hover_root = None;
        self.scroll_target = None;
        self.number_edit = None;
        self.number_edit_buf.clear();
    }

    /// Installs the text measurement callbacks.
    pub fn set_metrics(&mut self, metrics: impl TextMetrics + 'static) { self.metrics = Some(Box::new(metrics)); }

    /// Replaces the strategy used to draw widget and container frames.
    pub fn set_draw_frame(&mut self, draw_frame: fn(&mut Context, Recti, ControlColor)) { self.draw_frame = draw_frame; }

    /// Replaces the current UI style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        self.layout.style = style;
    }

    /// Returns a copy of the current style.
    pub fn get_style(&self) -> Style { self.style }

    pub(crate) fn text_width(&self, font: crate::FontId, text: &str) -> i32 {
        match &self.metrics {
            Some(metrics) => metrics.text_width(font, text),
            None => panic!("text metrics not configured"),
        }
    }

    pub(crate) fn text_height(&self, font: crate::FontId) -> i32 {
        match &self.metrics {
            Some(metrics) => metrics.text_height(font),
            None => panic!("text metrics not configured"),
        }
    }

    /// Returns an iterator over the frame's command stream. Only meaningful
    /// between `end_frame` and the next `begin_frame`; iteration is read-only
    /// and may be repeated.
    pub fn commands(&self) -> CommandIterator<'_> { self.command_list.iter() }

    /// Begins a new frame, resetting the command buffer and per-frame state.
    pub fn begin_frame(&mut self) {
        assert!(self.metrics.is_some(), "text metrics must be configured before begin_frame");
        self.command_list.reset();
        self.root_list.clear();
        self.scroll_target = None;
        self.hover_root = self.next_hover_root.take();
        self.input.prelude();
        self.frame += 1;
    }

    /// Ends the frame: validates stack balance, applies wheel scroll, resets
    /// input edge state, and splices root container command ranges into
    /// ascending z order.
    pub fn end_frame(&mut self) {
        assert!(self.container_stack.is_empty(), "container stack not empty at end_frame");
        assert!(self.clip_stack.is_empty(), "clip stack not empty at end_frame");
        assert!(self.idmngr.is_empty(), "id stack not empty at end_frame");
        assert!(self.layout.is_empty(), "layout stack not empty at end_frame");

        // handle wheel input collected for the container under the pointer
        if let Some(target) = self.scroll_target {
            self.containers[target].scroll.x += self.input.scroll_delta.x;
            self.containers[target].scroll.y += self.input.scroll_delta.y;
        }

        // unset focus if the focused widget was not drawn this frame
        if !self.updated_focus {
            self.focus = None;
        }
        self.updated_focus = false;

        // bring the hovered root to the front on click
        if !self.input.mouse_pressed.is_none() {
            if let Some(next) = self.next_hover_root {
                if self.containers[next].zindex < self.last_zindex && self.containers[next].zindex >= 0 {
                    self.bring_to_front_idx(next);
                }
            }
        }

        self.input.epilogue();

        // sort roots and rewrite their head/tail jumps so a linear reader
        // visits them back-to-front
        let containers = &self.containers;
        self.root_list.as_mut_slice().sort_by_key(|&idx| containers[idx].zindex);

        let n = self.root_list.len();
        for i in 0..n {
            let idx = self.root_list.as_slice()[i];
            let head = self.containers[idx].head.expect("root container missing its head jump");
            // the first container is entered from the jump at the start of
            // the buffer, later ones from the previous container's tail
            if i == 0 {
                self.command_list.set_jump(CommandPtr::START, head.offset() + JumpCommand::SIZE);
            } else {
                let prev = self.root_list.as_slice()[i - 1];
                let tail = self.containers[prev].tail.expect("root container missing its tail jump");
                self.command_list.set_jump(tail, head.offset() + JumpCommand::SIZE);
            }
            if i == n - 1 {
                let tail = self.containers[idx].tail.expect("root container missing its tail jump");
                let end = self.command_list.len();
                self.command_list.set_jump(tail, end);
            }
        }
    }

    /// Runs a whole frame by wrapping `f` in `begin_frame`/`end_frame`.
    pub fn frame<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.begin_frame();
        f(self);
        self.end_frame();
    }

    /// Computes an id from `bytes` seeded by the current id scope.
    pub fn get_id(&mut self, bytes: &[u8]) -> Id { self.idmngr.get_id(bytes) }

    /// Computes an id from a string seeded by the current id scope.
    pub fn get_id_from_str(&mut self, s: &str) -> Id { self.idmngr.get_id_from_str(s) }

    /// Computes an id from the address of a stable object.
    pub fn get_id_from_ptr<T: ?Sized>(&mut self, orig_id: &T) -> Id { self.idmngr.get_id_from_ptr(orig_id) }

    /// Computes an id from `bytes` and pushes it as the new id scope.
    pub fn push_id(&mut self, bytes: &[u8]) {
        let id = self.idmngr.get_id(bytes);
        self.idmngr.push_id(id);
    }

    /// Computes an id from a string and pushes it as the new id scope.
    pub fn push_id_from_str(&mut self, s: &str) { self.idmngr.push_id_from_str(s); }

    /// Pops the innermost id scope.
    pub fn pop_id(&mut self) { self.idmngr.pop_id(); }

    /// Manually moves keyboard focus to the given widget.
    pub fn set_focus(&mut self, id: Option<Id>) {
        self.focus = id;
        self.updated_focus = true;
    }

    /// Returns the rect of the most recently placed widget.
    pub fn last_rect(&self) -> Recti { self.layout.last_rect }

    /// Starts a new layout row of `widths.len()` columns. A width of 0 takes
    /// the style default, a negative width fills the remainder of the row.
    pub fn layout_row(&mut self, widths: &[i32], height: i32) { self.layout.row(widths, height); }

    /// Sets the width of cells laid out while the current row has no
    /// explicit column widths.
    pub fn layout_width(&mut self, width: i32) { self.layout.width(width); }

    /// Sets the height of subsequent layout cells.
    pub fn layout_height(&mut self, height: i32) { self.layout.height(height); }

    /// Opens a column sub-layout in the next cell.
    pub fn layout_begin_column(&mut self) { self.layout.begin_column(); }

    /// Closes the innermost column sub-layout.
    pub fn layout_end_column(&mut self) { self.layout.end_column(); }

    /// Places the next widget at an explicit rect; `relative` offsets it by
    /// the current layout body.
    pub fn layout_set_next(&mut self, r: Recti, relative: bool) { self.layout.set_next(r, relative); }

    /// Returns the rect for the next widget and advances the layout cursor.
    pub fn layout_next(&mut self) -> Recti { self.layout.next() }

    /// Runs `f` inside a column scope occupying the next layout cell.
    pub fn column<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.layout_begin_column();
        f(self);
        self.layout_end_column();
    }

    pub(crate) fn bring_to_front_idx(&mut self, idx: usize) {
        self.last_zindex += 1;
        self.containers[idx].zindex = self.last_zindex;
    }

    fn in_hover_root(&self) -> bool {
        let hover_root = match self.hover_root {
            Some(idx) => idx,
            None => return false,
        };
        for &idx in self.container_stack.as_slice().iter().rev() {
            if idx == hover_root {
                return true;
            }
            // only root containers have a head jump; stop at the nearest one
            if self.containers[idx].head.is_some() {
                break;
            }
        }
        false
    }

    /// Returns `true` if the pointer is inside `r`, inside the current clip
    /// rect, and the enclosing root container is the one under the pointer.
    pub fn mouse_over(&self, r: Recti) -> bool {
        r.contains(&self.input.mouse_pos) && self.get_clip_rect().contains(&self.input.mouse_pos) && self.in_hover_root()
    }

    /// Shared interaction routine driving the hover/focus state machine for
    /// the widget identified by `id` occupying `r`.
    pub fn update_control(&mut self, id: Id, r: Recti, opt: WidgetOption) {
        let mouseover = self.mouse_over(r);

        if self.focus == Some(id) {
            self.updated_focus = true;
        }
        if opt.is_not_interactive() {
            return;
        }
        if mouseover && self.input.mouse_down.is_none() {
            self.hover = Some(id);
        }
        if self.focus == Some(id) {
            if !self.input.mouse_pressed.is_none() && !mouseover {
                self.set_focus(None);
            }
            if self.input.mouse_down.is_none() && !opt.is_holding_focus() {
                self.set_focus(None);
            }
        }
        if self.hover == Some(id) {
            if !self.input.mouse_pressed.is_none() {
                self.set_focus(Some(id));
            } else if !mouseover {
                self.hover = None;
            }
        }
    }
}
