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

pub(crate) const ID_STACK_SIZE: usize = 32;

/// Widget identity derived by hashing a name within its enclosing id scope.
/// Two widgets with the same local name held by different containers hash to
/// different values because each container seeds the scope with its own id.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Id(u32);

impl Id {
    /// Returns the raw 32-bit hash wrapped by this id.
    pub fn raw(self) -> u32 { self.0 }
}

// FNV-1a, 32-bit flavor.
const HASH_INITIAL: u32 = 2166136261;
const HASH_PRIME: u32 = 16777619;

pub(crate) struct IdManager {
    last_id: Option<Id>,
    id_stack: FixedStack<Id, ID_STACK_SIZE>,
}

impl IdManager {
    pub fn new() -> Self {
        Self { last_id: None, id_stack: FixedStack::new() }
    }

    pub fn len(&self) -> usize { self.id_stack.len() }

    pub fn is_empty(&self) -> bool { self.id_stack.is_empty() }

    pub fn clear(&mut self) {
        self.last_id = None;
        self.id_stack.clear();
    }

    pub fn last_id(&self) -> Option<Id> { self.last_id }

    fn hash_step(h: u32, b: u8) -> u32 { (h ^ b as u32).wrapping_mul(HASH_PRIME) }

    fn hash_bytes(hash: &mut Id, bytes: &[u8]) {
        for b in bytes {
            *hash = Id(Self::hash_step(hash.0, *b));
        }
    }

    fn seed(&self) -> Id {
        match self.id_stack.top() {
            Some(id) => *id,
            None => Id(HASH_INITIAL),
        }
    }

    pub fn get_id(&mut self, bytes: &[u8]) -> Id {
        let mut res = self.seed();
        Self::hash_bytes(&mut res, bytes);
        self.last_id = Some(res);
        res
    }

    pub fn get_id_from_str(&mut self, s: &str) -> Id { self.get_id(s.as_bytes()) }

    pub fn get_id_u32(&mut self, orig_id: u32) -> Id {
        let bytes = orig_id.to_be_bytes();
        self.get_id(&bytes)
    }

    pub fn get_id_from_ptr<T: ?Sized>(&mut self, orig_id: &T) -> Id {
        let ptr = orig_id as *const T as *const u8 as usize;
        let bytes = ptr.to_le_bytes();
        self.get_id(&bytes)
    }

    pub fn push_id(&mut self, id: Id) {
        self.id_stack.push(id)
    }

    pub fn push_id_from_str(&mut self, s: &str) -> Id {
        let id = self.get_id_from_str(s);
        self.id_stack.push(id);
        id
    }

    pub fn pop_id(&mut self) {
        self.id_stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_same_id() {
        let mut mngr = IdManager::new();
        let a = mngr.get_id_from_str("button");
        let b = mngr.get_id_from_str("button");
        assert_eq!(a, b);
        assert_eq!(mngr.last_id(), Some(b));
    }

    #[test]
    fn scope_changes_id() {
        let mut mngr = IdManager::new();
        let bare = mngr.get_id_from_str("button");
        mngr.push_id_from_str("window-a");
        let in_a = mngr.get_id_from_str("button");
        mngr.pop_id();
        mngr.push_id_from_str("window-b");
        let in_b = mngr.get_id_from_str("button");
        mngr.pop_id();
        assert_ne!(bare, in_a);
        assert_ne!(in_a, in_b);

        // popping back to the root scope restores the original hash
        assert_eq!(mngr.get_id_from_str("button"), bare);
    }
}
