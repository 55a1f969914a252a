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
use crate::{Color, FontId, IconId, Recti, Vec2i, rect, vec2};

pub(crate) const COMMAND_LIST_SIZE: usize = 256 * 1024;

const HEADER_SIZE: usize = 8;

/// Byte offset of a command header inside the frame's command buffer.
#[derive(Default, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Debug)]
pub(crate) struct CommandPtr(usize);

impl CommandPtr {
    pub const START: Self = Self(0);

    pub fn offset(self) -> usize { self.0 }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u32)]
pub(crate) enum CommandKind {
    Jump = 1,
    Clip = 2,
    Rect = 3,
    Text = 4,
    Icon = 5,
}

impl CommandKind {
    fn from_u32(v: u32) -> Self {
        match v {
            1 => Self::Jump,
            2 => Self::Clip,
            3 => Self::Rect,
            4 => Self::Text,
            5 => Self::Icon,
            _ => panic!("corrupt command buffer (unknown record type {})", v),
        }
    }
}

// Field accessors for the packed little-endian encoding. Offsets are always
// derived from record layout constants so the slices cannot be misaligned.

fn put_u32(buf: &mut [u8], off: usize, v: u32) { buf[off..off + 4].copy_from_slice(&v.to_le_bytes()); }

fn get_u32(buf: &[u8], off: usize) -> u32 { u32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]]) }

fn put_i32(buf: &mut [u8], off: usize, v: i32) { buf[off..off + 4].copy_from_slice(&v.to_le_bytes()); }

fn get_i32(buf: &[u8], off: usize) -> i32 { i32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]]) }

fn put_rect(buf: &mut [u8], off: usize, r: Recti) {
    put_i32(buf, off, r.x);
    put_i32(buf, off + 4, r.y);
    put_i32(buf, off + 8, r.width);
    put_i32(buf, off + 12, r.height);
}

fn get_rect(buf: &[u8], off: usize) -> Recti {
    rect(get_i32(buf, off), get_i32(buf, off + 4), get_i32(buf, off + 8), get_i32(buf, off + 12))
}

fn put_vec2(buf: &mut [u8], off: usize, v: Vec2i) {
    put_i32(buf, off, v.x);
    put_i32(buf, off + 4, v.y);
}

fn get_vec2(buf: &[u8], off: usize) -> Vec2i { vec2(get_i32(buf, off), get_i32(buf, off + 4)) }

fn put_color(buf: &mut [u8], off: usize, c: Color) {
    buf[off] = c.r;
    buf[off + 1] = c.g;
    buf[off + 2] = c.b;
    buf[off + 3] = c.a;
}

fn get_color(buf: &[u8], off: usize) -> Color {
    Color {
        r: buf[off],
        g: buf[off + 1],
        b: buf[off + 2],
        a: buf[off + 3],
    }
}

/// A record stored in the packed buffer. Every variant has a fixed size so the
/// buffer can be traversed by reading the two-field header alone; `encode` and
/// `decode` only see the payload bytes following the header.
pub(crate) trait CommandRecord: Sized {
    const KIND: CommandKind;
    const PAYLOAD: usize;
    const SIZE: usize = HEADER_SIZE + Self::PAYLOAD;

    fn encode(&self, out: &mut [u8]);
    fn decode(buf: &[u8]) -> Self;
}

#[derive(Copy, Clone)]
pub(crate) struct JumpCommand {
    pub dst: usize,
}

impl CommandRecord for JumpCommand {
    const KIND: CommandKind = CommandKind::Jump;
    const PAYLOAD: usize = 4;

    fn encode(&self, out: &mut [u8]) { put_u32(out, 0, self.dst as u32); }

    fn decode(buf: &[u8]) -> Self { Self { dst: get_u32(buf, 0) as usize } }
}

#[derive(Copy, Clone)]
pub(crate) struct ClipCommand {
    pub rect: Recti,
}

impl CommandRecord for ClipCommand {
    const KIND: CommandKind = CommandKind::Clip;
    const PAYLOAD: usize = 16;

    fn encode(&self, out: &mut [u8]) { put_rect(out, 0, self.rect); }

    fn decode(buf: &[u8]) -> Self { Self { rect: get_rect(buf, 0) } }
}

#[derive(Copy, Clone)]
pub(crate) struct RectCommand {
    pub rect: Recti,
    pub color: Color,
}

impl CommandRecord for RectCommand {
    const KIND: CommandKind = CommandKind::Rect;
    const PAYLOAD: usize = 20;

    fn encode(&self, out: &mut [u8]) {
        put_rect(out, 0, self.rect);
        put_color(out, 16, self.color);
    }

    fn decode(buf: &[u8]) -> Self {
        Self {
            rect: get_rect(buf, 0),
            color: get_color(buf, 16),
        }
    }
}

#[derive(Copy, Clone)]
pub(crate) struct TextCommand {
    pub font: FontId,
    pub pos: Vec2i,
    pub color: Color,
    pub str_index: u32,
    pub str_len: u32,
}

impl CommandRecord for TextCommand {
    const KIND: CommandKind = CommandKind::Text;
    const PAYLOAD: usize = 24;

    fn encode(&self, out: &mut [u8]) {
        put_u32(out, 0, self.font.raw());
        put_vec2(out, 4, self.pos);
        put_color(out, 12, self.color);
        put_u32(out, 16, self.str_index);
        put_u32(out, 20, self.str_len);
    }

    fn decode(buf: &[u8]) -> Self {
        Self {
            font: FontId::new(get_u32(buf, 0)),
            pos: get_vec2(buf, 4),
            color: get_color(buf, 12),
            str_index: get_u32(buf, 16),
            str_len: get_u32(buf, 20),
        }
    }
}

#[derive(Copy, Clone)]
pub(crate) struct IconCommand {
    pub rect: Recti,
    pub id: IconId,
    pub color: Color,
}

impl CommandRecord for IconCommand {
    const KIND: CommandKind = CommandKind::Icon;
    const PAYLOAD: usize = 24;

    fn encode(&self, out: &mut [u8]) {
        put_rect(out, 0, self.rect);
        put_u32(out, 16, self.id.raw());
        put_color(out, 20, self.color);
    }

    fn decode(buf: &[u8]) -> Self {
        Self {
            rect: get_rect(buf, 0),
            id: IconId::new(get_u32(buf, 16)),
            color: get_color(buf, 20),
        }
    }
}

/// Packed binary log of the frame's draw records. Records are appended at a
/// monotonically advancing cursor; text payloads live in a side table so Text
/// records stay fixed-size. Jump records let `end_frame` splice per-container
/// ranges into z order without moving bytes.
pub(crate) struct CommandList {
    buf: Box<[u8]>,
    idx: usize,
    strings: Vec<String>,
}

impl CommandList {
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COMMAND_LIST_SIZE].into_boxed_slice(),
            idx: 0,
            strings: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.idx = 0;
        self.strings.clear();
    }

    pub fn len(&self) -> usize { self.idx }

    pub fn is_empty(&self) -> bool { self.idx == 0 }

    pub fn write<T: CommandRecord>(&mut self, cmd: &T) -> CommandPtr {
        let offset = self.idx;
        let end = offset + T::SIZE;
        assert!(end <= COMMAND_LIST_SIZE, "command buffer overflow");
        put_u32(&mut self.buf, offset, T::KIND as u32);
        put_u32(&mut self.buf, offset + 4, T::SIZE as u32);
        cmd.encode(&mut self.buf[offset + HEADER_SIZE..end]);
        self.idx = end;
        CommandPtr(offset)
    }

    pub fn read<T: CommandRecord>(&self, at: CommandPtr) -> T {
        assert!(at.0 + T::SIZE <= self.idx, "invalid command index {}", at.0);
        let (kind, _) = self.header_at(at.0);
        assert!(kind == T::KIND, "record type mismatch at offset {}", at.0);
        T::decode(&self.buf[at.0 + HEADER_SIZE..at.0 + T::SIZE])
    }

    pub fn header_at(&self, offset: usize) -> (CommandKind, usize) {
        assert!(offset + HEADER_SIZE <= self.idx, "invalid command index {}", offset);
        (CommandKind::from_u32(get_u32(&self.buf, offset)), get_u32(&self.buf, offset + 4) as usize)
    }

    pub fn push_jump(&mut self, dst: usize) -> CommandPtr { self.write(&JumpCommand { dst }) }

    /// Rewrites the destination of an already written jump in place.
    pub fn set_jump(&mut self, at: CommandPtr, dst: usize) {
        let (kind, _) = self.header_at(at.0);
        assert!(kind == CommandKind::Jump, "record at offset {} is not a jump", at.0);
        put_u32(&mut self.buf, at.0 + HEADER_SIZE, dst as u32);
    }

    /// Copies `s` into the string table and returns its 1-based index.
    pub fn store_string(&mut self, s: &str) -> u32 {
        self.strings.push(s.to_string());
        self.strings.len() as u32
    }

    fn string_at(&self, index: u32, len: u32) -> &str {
        let s = &self.strings[index as usize - 1];
        &s[..(len as usize).min(s.len())]
    }

    pub fn iter(&self) -> CommandIterator<'_> { CommandIterator { list: self, cursor: 0 } }
}

/// A drawing record yielded to the backend after `end_frame`.
///
/// The backend executes these in order: `Clip` replaces the scissor rect,
/// `Rect` fills, `Text` draws a string at a baseline position, `Icon` draws
/// the identified icon scaled to the rect.
pub enum Command<'a> {
    /// Set the scissor rect for subsequent commands.
    Clip {
        /// Scissor rectangle.
        rect: Recti,
    },
    /// Fill a rectangle with a solid color.
    Rect {
        /// Target rectangle.
        rect: Recti,
        /// Fill color.
        color: Color,
    },
    /// Draw a string.
    Text {
        /// Opaque font handle supplied by the application.
        font: FontId,
        /// Top-left text position.
        pos: Vec2i,
        /// Text color.
        color: Color,
        /// UTF-8 string to render.
        text: &'a str,
    },
    /// Draw an icon stretched to a rectangle.
    Icon {
        /// Target rectangle.
        rect: Recti,
        /// Icon identifier.
        id: IconId,
        /// Tint color.
        color: Color,
    },
}

/// Iterator over the frame's command stream.
///
/// Jump records are chased rather than yielded, which realizes the z order
/// spliced together at `end_frame`: a plain linear walk visits containers
/// back-to-front. Jumps only ever move forward through the used portion of
/// the buffer, so traversal terminates.
pub struct CommandIterator<'a> {
    list: &'a CommandList,
    cursor: usize,
}

impl<'a> Iterator for CommandIterator<'a> {
    type Item = Command<'a>;

    fn next(&mut self) -> Option<Command<'a>> {
        while self.cursor < self.list.idx {
            let at = CommandPtr(self.cursor);
            let (kind, size) = self.list.header_at(self.cursor);
            if kind == CommandKind::Jump {
                self.cursor = self.list.read::<JumpCommand>(at).dst;
                continue;
            }
            self.cursor += size;
            return Some(match kind {
                CommandKind::Clip => {
                    let cmd = self.list.read::<ClipCommand>(at);
                    Command::Clip { rect: cmd.rect }
                }
                CommandKind::Rect => {
                    let cmd = self.list.read::<RectCommand>(at);
                    Command::Rect { rect: cmd.rect, color: cmd.color }
                }
                CommandKind::Text => {
                    let cmd = self.list.read::<TextCommand>(at);
                    Command::Text {
                        font: cmd.font,
                        pos: cmd.pos,
                        color: cmd.color,
                        text: self.list.string_at(cmd.str_index, cmd.str_len),
                    }
                }
                CommandKind::Icon => {
                    let cmd = self.list.read::<IconCommand>(at);
                    Command::Icon { rect: cmd.rect, id: cmd.id, color: cmd.color }
                }
                CommandKind::Jump => unreachable!(),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    fn rect_eq(a: Recti, b: Recti) -> bool { a.x == b.x && a.y == b.y && a.width == b.width && a.height == b.height }

    #[test]
    fn records_round_trip_bit_exact() {
        let mut list = CommandList::new();

        let at_rect = list.write(&RectCommand { rect: rect(-3, 7, 20, 11), color: color(1, 2, 3, 4) });
        let at_clip = list.write(&ClipCommand { rect: rect(0, 0, 640, 480) });
        let at_icon = list.write(&IconCommand { rect: rect(5, 5, 16, 16), id: IconId::CHECK, color: color(255, 0, 0, 255) });
        let at_text = list.write(&TextCommand {
            font: FontId::new(2),
            pos: vec2(10, -2),
            color: color(9, 8, 7, 6),
            str_index: 1,
            str_len: 5,
        });

        let r = list.read::<RectCommand>(at_rect);
        assert!(rect_eq(r.rect, rect(-3, 7, 20, 11)));
        assert_eq!(r.color, color(1, 2, 3, 4));

        let c = list.read::<ClipCommand>(at_clip);
        assert!(rect_eq(c.rect, rect(0, 0, 640, 480)));

        let i = list.read::<IconCommand>(at_icon);
        assert!(rect_eq(i.rect, rect(5, 5, 16, 16)));
        assert_eq!(i.id, IconId::CHECK);
        assert_eq!(i.color, color(255, 0, 0, 255));

        let t = list.read::<TextCommand>(at_text);
        assert_eq!(t.font, FontId::new(2));
        assert_eq!((t.pos.x, t.pos.y), (10, -2));
        assert_eq!(t.color, color(9, 8, 7, 6));
        assert_eq!((t.str_index, t.str_len), (1, 5));
    }

    #[test]
    fn records_are_densely_packed() {
        let mut list = CommandList::new();
        let first = list.write(&RectCommand { rect: rect(0, 0, 1, 1), color: color(0, 0, 0, 0) });
        let second = list.write(&JumpCommand { dst: 0 });
        assert_eq!(first.offset(), 0);
        assert_eq!(second.offset(), RectCommand::SIZE);
        assert_eq!(list.len(), RectCommand::SIZE + JumpCommand::SIZE);
    }

    #[test]
    fn iterator_of_empty_list_terminates_immediately() {
        let list = CommandList::new();
        assert!(list.iter().next().is_none());
    }

    #[test]
    fn iterator_chases_jumps() {
        let mut list = CommandList::new();
        // jump over the first rect straight to the second one
        let skip = list.push_jump(0);
        let red = color(255, 0, 0, 255);
        let blue = color(0, 0, 255, 255);
        list.write(&RectCommand { rect: rect(0, 0, 1, 1), color: red });
        let second = list.write(&RectCommand { rect: rect(0, 0, 2, 2), color: blue });
        list.set_jump(skip, second.offset());

        let mut it = list.iter();
        match it.next() {
            Some(Command::Rect { rect: r, color: c }) => {
                assert!(rect_eq(r, rect(0, 0, 2, 2)));
                assert_eq!(c, blue);
            }
            _ => panic!("expected the second rect"),
        }
        assert!(it.next().is_none());
    }

    #[test]
    fn jump_to_buffer_end_terminates() {
        let mut list = CommandList::new();
        let skip = list.push_jump(0);
        list.write(&RectCommand { rect: rect(0, 0, 1, 1), color: color(0, 0, 0, 255) });
        let end = list.len();
        list.set_jump(skip, end);
        assert!(list.iter().next().is_none());
    }

    #[test]
    fn stored_strings_resolve_through_text_commands() {
        let mut list = CommandList::new();
        let hello = list.store_string("hello");
        let world = list.store_string("world");
        assert_eq!(hello, 1);
        assert_eq!(world, 2);
        list.write(&TextCommand {
            font: FontId::default(),
            pos: vec2(0, 0),
            color: color(0, 0, 0, 255),
            str_index: world,
            str_len: 5,
        });
        match list.iter().next() {
            Some(Command::Text { text, .. }) => assert_eq!(text, "world"),
            _ => panic!("expected a text command"),
        }
    }

    #[test]
    #[should_panic(expected = "command buffer overflow")]
    fn writing_past_capacity_aborts() {
        let mut list = CommandList::new();
        let cmd = RectCommand { rect: rect(0, 0, 1, 1), color: color(0, 0, 0, 255) };
        loop {
            list.write(&cmd);
        }
    }

    #[test]
    #[should_panic(expected = "invalid command index")]
    fn reading_past_cursor_aborts() {
        let mut list = CommandList::new();
        let at = list.write(&JumpCommand { dst: 0 });
        list.reset();
        let _ = list.read::<JumpCommand>(at);
    }
}
