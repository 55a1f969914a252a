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
#![deny(missing_docs)]
//! `picoui` is a backend-independent immediate mode GUI core inspired by
//! [rxi/microui](https://github.com/rxi/microui). Each frame the application
//! feeds input events into a [`Context`], declares its widgets, and then
//! iterates the resulting packed command stream ([`Command`]) into whatever
//! renderer it owns. The library keeps only the minimal state required to
//! make widgets interactive across frames: hover/focus ids, container
//! geometry and scroll, z order, and tree node expansion.

mod command;
mod container;
mod context;
mod draw;
mod idmngr;
mod layout;
mod pool;
mod scrollbar;
mod stack;
mod widgets;

pub use command::{Command, CommandIterator};
pub use container::Container;
pub use context::Context;
pub use idmngr::Id;
pub use rs_math3d::*;

use bitflags::*;

#[derive(PartialEq, Copy, Clone, Debug)]
#[repr(u32)]
/// Describes whether a rectangle is clipped by the current scissor.
pub enum Clip {
    /// Rectangle is fully visible.
    None = 0,
    /// Rectangle is partially visible.
    Part = 1,
    /// Rectangle is fully clipped away.
    All = 2,
}

#[derive(PartialEq, Copy, Clone)]
#[repr(u32)]
/// Identifiers for each of the built-in style colors.
pub enum ControlColor {
    /// Number of color entries in [`Style::colors`].
    Max = 14,
    /// Thumb of scrollbars.
    ScrollThumb = 13,
    /// Base frame of scrollbars.
    ScrollBase = 12,
    /// Base color for focused widgets.
    BaseFocus = 11,
    /// Base color while the pointer hovers the widget.
    BaseHover = 10,
    /// Default base color.
    Base = 9,
    /// Button color while the widget is focused.
    ButtonFocus = 8,
    /// Button color while the pointer hovers the widget.
    ButtonHover = 7,
    /// Default button color.
    Button = 6,
    /// Panel background color.
    PanelBG = 5,
    /// Window title text color.
    TitleText = 4,
    /// Window title background color.
    TitleBG = 3,
    /// Window background color.
    WindowBG = 2,
    /// Outline/border color.
    Border = 1,
    /// Default text color.
    Text = 0,
}

impl ControlColor {
    /// Promotes the enum to the hover variant when relevant.
    pub fn hover(&mut self) {
        *self = match self {
            Self::Base => Self::BaseHover,
            Self::Button => Self::ButtonHover,
            _ => *self,
        }
    }

    /// Promotes the enum to the focused variant when relevant.
    pub fn focus(&mut self) {
        *self = match self {
            Self::Base => Self::BaseFocus,
            Self::Button => Self::ButtonFocus,
            Self::BaseHover => Self::BaseFocus,
            Self::ButtonHover => Self::ButtonFocus,
            _ => *self,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone)]
    /// State bits returned by widgets to describe their interaction outcome.
    pub struct ResourceState : u32 {
        /// Indicates that the widget's data changed.
        const CHANGE = 4;
        /// Indicates that the widget was submitted (e.g. button clicked).
        const SUBMIT = 2;
        /// Indicates that the widget is currently active.
        const ACTIVE = 1;
        /// Indicates no interaction.
        const NONE = 0;
    }
}

impl ResourceState {
    /// Returns `true` if the widget changed its bound value.
    pub fn is_changed(&self) -> bool { self.intersects(Self::CHANGE) }
    /// Returns `true` if the widget signaled submission.
    pub fn is_submitted(&self) -> bool { self.intersects(Self::SUBMIT) }
    /// Returns `true` if the widget is active.
    pub fn is_active(&self) -> bool { self.intersects(Self::ACTIVE) }
    /// Returns `true` if the state contains no flags.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone)]
    /// Options that control how widgets and containers behave.
    pub struct WidgetOption : u16 {
        /// Treats the node as expanded on its first appearance.
        const EXPANDED = 4096;
        /// Keeps the container closed until it is explicitly opened.
        const CLOSED = 2048;
        /// Marks the container as a popup, closed by any outside click.
        const POPUP = 1024;
        /// Automatically adapts the container size to its content.
        const AUTO_SIZE = 512;
        /// Keeps keyboard focus while the widget is held.
        const HOLD_FOCUS = 256;
        /// Hides the title bar.
        const NO_TITLE = 128;
        /// Hides the close button.
        const NO_CLOSE = 64;
        /// Disables container scrolling and scrollbars.
        const NO_SCROLL = 32;
        /// Prevents the user from resizing the window.
        const NO_RESIZE = 16;
        /// Draws the widget without its frame/background.
        const NO_FRAME = 8;
        /// Disables interaction for the widget.
        const NO_INTERACT = 4;
        /// Aligns the widget text to the right side of the cell.
        const ALIGN_RIGHT = 2;
        /// Centers the widget text inside the cell.
        const ALIGN_CENTER = 1;
        /// No special options.
        const NONE = 0;
    }
}

impl WidgetOption {
    /// Returns `true` if the node should start out expanded.
    pub fn is_expanded(&self) -> bool { self.intersects(Self::EXPANDED) }

    /// Returns `true` if the container starts closed.
    pub fn is_closed(&self) -> bool { self.intersects(Self::CLOSED) }

    /// Returns `true` if the container behaves as a popup.
    pub fn is_popup(&self) -> bool { self.intersects(Self::POPUP) }

    /// Returns `true` if the option requests automatic sizing.
    pub fn is_auto_sizing(&self) -> bool { self.intersects(Self::AUTO_SIZE) }

    /// Returns `true` if the widget should keep focus while held.
    pub fn is_holding_focus(&self) -> bool { self.intersects(Self::HOLD_FOCUS) }

    /// Returns `true` if the title bar should be hidden.
    pub fn has_no_title(&self) -> bool { self.intersects(Self::NO_TITLE) }

    /// Returns `true` if the close button should be hidden.
    pub fn has_no_close(&self) -> bool { self.intersects(Self::NO_CLOSE) }

    /// Returns `true` if container scrolling is disabled.
    pub fn has_no_scroll(&self) -> bool { self.intersects(Self::NO_SCROLL) }

    /// Returns `true` if the container is fixed-size.
    pub fn has_no_resize(&self) -> bool { self.intersects(Self::NO_RESIZE) }

    /// Returns `true` if the widget shouldn't draw its frame.
    pub fn has_no_frame(&self) -> bool { self.intersects(Self::NO_FRAME) }

    /// Returns `true` if the widget is non-interactive.
    pub fn is_not_interactive(&self) -> bool { self.intersects(Self::NO_INTERACT) }

    /// Returns `true` if the widget prefers right alignment.
    pub fn is_aligned_right(&self) -> bool { self.intersects(Self::ALIGN_RIGHT) }

    /// Returns `true` if the widget prefers centered alignment.
    pub fn is_aligned_center(&self) -> bool { self.intersects(Self::ALIGN_CENTER) }

    /// Returns `true` if the option set is empty.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is pressed.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is pressed.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is pressed.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are pressed.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug)]
    /// Modifier and editing key state tracked by the input system.
    pub struct KeyMode : u32 {
        /// Delete key held.
        const DELETE = 32;
        /// Return/Enter key held.
        const RETURN = 16;
        /// Backspace key held.
        const BACKSPACE = 8;
        /// Alt key held.
        const ALT = 4;
        /// Control key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Returns `true` if no modifiers are active.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Delete is held.
    pub fn is_delete(&self) -> bool { self.intersects(Self::DELETE) }
    /// Returns `true` if Return/Enter is held.
    pub fn is_return(&self) -> bool { self.intersects(Self::RETURN) }
    /// Returns `true` if Backspace is held.
    pub fn is_backspace(&self) -> bool { self.intersects(Self::BACKSPACE) }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

#[derive(Clone, Debug)]
/// Aggregates raw input collected during the current frame.
pub struct Input {
    pub(crate) mouse_pos: Vec2i,
    pub(crate) last_mouse_pos: Vec2i,
    pub(crate) mouse_delta: Vec2i,
    pub(crate) scroll_delta: Vec2i,
    pub(crate) mouse_down: MouseButton,
    pub(crate) mouse_pressed: MouseButton,
    pub(crate) key_down: KeyMode,
    pub(crate) key_pressed: KeyMode,
    pub(crate) input_text: String,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            last_mouse_pos: Vec2i::default(),
            mouse_delta: Vec2i::default(),
            scroll_delta: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
            key_down: KeyMode::NONE,
            key_pressed: KeyMode::NONE,
            input_text: String::default(),
        }
    }
}

impl Input {
    /// Returns the current mouse pointer position.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }

    /// Returns the mouse movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2i { self.mouse_delta }

    /// Returns the currently held mouse buttons.
    pub fn get_mouse_buttons(&self) -> MouseButton { self.mouse_down }

    /// Returns the state of all modifier keys.
    pub fn key_state(&self) -> KeyMode { self.key_down }

    /// Returns the accumulated UTF-8 text entered this frame.
    pub fn text_input(&self) -> &str { &self.input_text }

    /// Updates the current mouse pointer position.
    pub fn mousemove(&mut self, x: i32, y: i32) { self.mouse_pos = vec2(x, y); }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.mouse_pressed |= btn;
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
    }

    /// Accumulates scroll wheel movement.
    pub fn scroll(&mut self, x: i32, y: i32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
    }

    /// Records that a key was pressed.
    pub fn keydown(&mut self, key: KeyMode) {
        self.key_pressed |= key;
        self.key_down |= key;
    }

    /// Records that a key was released.
    pub fn keyup(&mut self, key: KeyMode) { self.key_down &= !key; }

    /// Appends UTF-8 text to the input buffer.
    pub fn text(&mut self, text: &str) { self.input_text.push_str(text); }

    pub(crate) fn prelude(&mut self) {
        self.mouse_delta.x = self.mouse_pos.x - self.last_mouse_pos.x;
        self.mouse_delta.y = self.mouse_pos.y - self.last_mouse_pos.y;
    }

    pub(crate) fn epilogue(&mut self) {
        self.key_pressed = KeyMode::NONE;
        self.input_text.clear();
        self.mouse_pressed = MouseButton::NONE;
        self.scroll_delta = vec2(0, 0);
        self.last_mouse_pos = self.mouse_pos;
    }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Floating-point type used by sliders and number widgets.
pub type Real = f32;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Opaque handle identifying a font owned by the application. The core never
/// inspects it; it is threaded through [`TextMetrics`] calls and Text
/// commands unchanged.
pub struct FontId(u32);

impl FontId {
    /// Creates a font handle from an application-defined value.
    pub const fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle identifying an icon understood by the backend. Values beyond the
/// built-in set are passed through untouched, so applications may define
/// their own.
pub struct IconId(u32);

impl IconId {
    /// Close box of window title bars.
    pub const CLOSE: Self = Self(1);
    /// Check mark drawn inside active checkboxes.
    pub const CHECK: Self = Self(2);
    /// Marker of a collapsed tree node or header.
    pub const COLLAPSED: Self = Self(3);
    /// Marker of an expanded tree node or header.
    pub const EXPANDED: Self = Self(4);

    /// Creates an icon handle from an application-defined value.
    pub const fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

/// Text measurement callbacks supplied by the embedding application. The
/// layout and clipping code sizes text exclusively through this trait; the
/// backend is expected to produce consistent metrics when rasterizing.
pub trait TextMetrics {
    /// Returns the pixel width of `text` rendered with `font`.
    fn text_width(&self, font: FontId, text: &str) -> i32;

    /// Returns the line height in pixels of `font`.
    fn text_height(&self, font: FontId) -> i32;
}

#[derive(Copy, Clone)]
/// Collection of visual constants that drive widget appearance.
pub struct Style {
    /// Font used for all text rendering.
    pub font: FontId,
    /// Default width used by layouts when a column width of 0 is given.
    pub default_cell_width: i32,
    /// Default height used by layouts when a row height of 0 is given.
    pub default_cell_height: i32,
    /// Inner padding applied to most widgets.
    pub padding: i32,
    /// Spacing between cells in a layout.
    pub spacing: i32,
    /// Indentation applied to nested content.
    pub indent: i32,
    /// Height of window title bars.
    pub title_height: i32,
    /// Width of scrollbars.
    pub scrollbar_size: i32,
    /// Size of slider thumbs.
    pub thumb_size: i32,
    /// Palette of [`ControlColor`] entries.
    pub colors: [Color; 14],
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: FontId::default(),
            default_cell_width: 68,
            default_cell_height: 10,
            padding: 5,
            spacing: 4,
            indent: 24,
            title_height: 24,
            scrollbar_size: 12,
            thumb_size: 8,
            colors: [
                Color { r: 230, g: 230, b: 230, a: 255 },
                Color { r: 25, g: 25, b: 25, a: 255 },
                Color { r: 50, g: 50, b: 50, a: 255 },
                Color { r: 25, g: 25, b: 25, a: 255 },
                Color { r: 240, g: 240, b: 240, a: 255 },
                Color { r: 0, g: 0, b: 0, a: 0 },
                Color { r: 75, g: 75, b: 75, a: 255 },
                Color { r: 95, g: 95, b: 95, a: 255 },
                Color { r: 115, g: 115, b: 115, a: 255 },
                Color { r: 30, g: 30, b: 30, a: 255 },
                Color { r: 35, g: 35, b: 35, a: 255 },
                Color { r: 40, g: 40, b: 40, a: 255 },
                Color { r: 43, g: 43, b: 43, a: 255 },
                Color { r: 30, g: 30, b: 30, a: 255 },
            ],
        }
    }
}

/// Clip rect meaning "no clipping"; backends reset their scissor when they
/// encounter it in the command stream.
pub static UNCLIPPED_RECT: Recti = Recti {
    x: 0,
    y: 0,
    width: 0x1000000,
    height: 0x1000000,
};

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }
