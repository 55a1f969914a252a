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
use crate::Id;

pub(crate) const CONTAINER_POOL_SIZE: usize = 48;
pub(crate) const TREENODE_POOL_SIZE: usize = 48;

#[derive(Default, Copy, Clone)]
pub(crate) struct PoolItem {
    pub id: Option<Id>,
    pub last_update_frame: usize,
}

/// Fixed set of slots keyed by id with least-recently-used replacement.
/// A slot touched in the current frame is never evicted in that frame.
pub(crate) struct Pool<const N: usize> {
    items: [PoolItem; N],
}

impl<const N: usize> Pool<N> {
    pub fn new() -> Self { Self { items: [PoolItem::default(); N] } }

    pub fn clear(&mut self) { self.items = [PoolItem::default(); N]; }

    /// Claims the stalest slot for `id`, marking it used in `frame`.
    pub fn init(&mut self, id: Id, frame: usize) -> usize {
        let mut slot = None;
        let mut oldest = frame;
        for (i, item) in self.items.iter().enumerate() {
            if item.last_update_frame < oldest {
                oldest = item.last_update_frame;
                slot = Some(i);
            }
        }
        let slot = match slot {
            Some(slot) => slot,
            None => panic!("pool exhausted ({} slots referenced this frame)", N),
        };
        self.items[slot] = PoolItem { id: Some(id), last_update_frame: frame };
        slot
    }

    pub fn get(&self, id: Id) -> Option<usize> {
        self.items.iter().position(|item| item.id == Some(id))
    }

    pub fn update(&mut self, slot: usize, frame: usize) {
        self.items[slot].last_update_frame = frame;
    }

    pub fn remove(&mut self, slot: usize) {
        self.items[slot] = PoolItem::default();
    }
}
