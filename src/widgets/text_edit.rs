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
use crate::*;
use std::ops::Range;

/// What a key or character did to a [`TextBuffer`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EditOutcome {
    pub handled: bool,
    pub changed: bool,
    pub moved: bool,
}

impl EditOutcome {
    fn from_change(before_text: bool, before_caret: usize, after_caret: usize) -> Self { Self { handled: true, changed: before_text, moved: before_caret != after_caret } }
}

/// Text plus caret and selection, both counted in characters.
///
/// `caret` and `select` always stay within `[0, len]`; the selection is the half-open range
/// between them. Edits replace the selection and collapse it to the edit point.
#[derive(Clone, Debug, Default)]
pub(crate) struct TextBuffer {
    text: String,
    caret: usize,
    select: usize,
    limit: Option<usize>,
}

fn byte_offset(text: &str, index: usize) -> usize { text.char_indices().nth(index).map(|(b, _)| b).unwrap_or(text.len()) }

fn truncate_chars(text: &str, max: usize) -> &str { &text[..byte_offset(text, max)] }

impl TextBuffer {
    pub fn with_limit(limit: Option<usize>) -> Self { Self { limit, ..Self::default() } }

    pub fn text(&self) -> &str { &self.text }

    pub fn len(&self) -> usize { self.text.chars().count() }

    pub fn caret(&self) -> usize { self.caret }

    pub fn select(&self) -> usize { self.select }

    pub fn selection(&self) -> Range<usize> { self.caret.min(self.select)..self.caret.max(self.select) }

    pub fn has_selection(&self) -> bool { self.caret != self.select }

    pub fn limit(&self) -> Option<usize> { self.limit }

    /// Text before the character offset `index`.
    pub fn prefix(&self, index: usize) -> &str { truncate_chars(&self.text, index) }

    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = byte_offset(&self.text, range.start);
        let end = byte_offset(&self.text, range.end);
        &self.text[start..end]
    }

    pub fn selected_text(&self) -> &str { self.slice(self.selection()) }

    /// Replaces the text, truncated to the limit, and moves the caret to the end.
    pub fn set_text(&mut self, text: &str) {
        let text = match self.limit {
            Some(limit) => truncate_chars(text, limit),
            None => text,
        };
        self.text = text.to_string();
        self.go_to_end();
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        if let Some(limit) = limit {
            if self.len() > limit {
                let kept = truncate_chars(&self.text, limit).to_string();
                self.text = kept;
            }
        }
        self.clamp();
    }

    pub fn select_all(&mut self) {
        self.select = 0;
        self.caret = self.len();
    }

    pub fn go_to_end(&mut self) {
        self.caret = self.len();
        self.select = self.caret;
    }

    /// Moves the caret; `extend` keeps the selection anchor in place.
    pub fn set_caret(&mut self, caret: usize, extend: bool) {
        self.caret = caret.min(self.len());
        if !extend {
            self.select = self.caret;
        }
    }

    /// Sets both ends of the selection.
    pub fn set_selection(&mut self, caret: usize, select: usize) {
        let len = self.len();
        self.caret = caret.min(len);
        self.select = select.min(len);
    }

    fn clamp(&mut self) {
        let len = self.len();
        self.caret = self.caret.min(len);
        self.select = self.select.min(len);
    }

    fn delete(&mut self, range: Range<usize>) {
        let start = byte_offset(&self.text, range.start);
        let end = byte_offset(&self.text, range.end);
        self.text.replace_range(start..end, "");
        self.caret = range.start;
        self.select = range.start;
    }

    /// Replaces the selection with `insert`, cut down to whatever room the limit leaves.
    /// Returns `true` if the text changed.
    pub fn replace_selection(&mut self, insert: &str) -> bool {
        let range = self.selection();
        let room = match self.limit {
            Some(limit) => limit.saturating_sub(self.len() - range.len()),
            None => usize::MAX,
        };
        let insert = truncate_chars(insert, room);
        if insert.is_empty() && range.is_empty() {
            return false;
        }
        let start = byte_offset(&self.text, range.start);
        let end = byte_offset(&self.text, range.end);
        self.text.replace_range(start..end, insert);
        self.caret = range.start + insert.chars().count();
        self.select = self.caret;
        true
    }

    /// Types one character over the selection.
    pub fn insert_char(&mut self, ch: char) -> EditOutcome {
        let caret = self.caret;
        let mut buf = [0u8; 4];
        let changed = self.replace_selection(ch.encode_utf8(&mut buf));
        EditOutcome::from_change(changed, caret, self.caret)
    }

    /// Applies the editing keys shared by every text editor: Backspace, Delete, Left, Right,
    /// Home, End and the Ctrl+A/C/X/V shortcuts. Mutating keys are ignored unless `editable`.
    pub fn apply_key(&mut self, ctx: &mut EventCtx<'_>, key: Key, mods: KeyMods, editable: bool) -> EditOutcome {
        let shift = mods.is_shift();
        let ctrl = mods.is_ctrl();
        let caret = self.caret;
        let selection = self.selection();
        let mut changed = false;
        match key {
            Key::Backspace if editable => {
                if !selection.is_empty() {
                    self.delete(selection);
                    changed = true;
                } else if self.caret > 0 {
                    self.delete(self.caret - 1..self.caret);
                    changed = true;
                }
            }
            Key::Delete if editable => {
                if !selection.is_empty() {
                    self.delete(selection);
                    changed = true;
                } else if self.caret < self.len() {
                    self.delete(self.caret..self.caret + 1);
                    changed = true;
                }
            }
            Key::Backspace | Key::Delete => {}
            Key::Left => {
                if self.caret > 0 {
                    self.set_caret(self.caret - 1, shift);
                }
            }
            Key::Right => {
                if self.caret < self.len() {
                    self.set_caret(self.caret + 1, shift);
                }
            }
            Key::Home => self.set_caret(0, shift),
            Key::End => self.set_caret(self.len(), shift),
            Key::A if ctrl => self.select_all(),
            Key::C if ctrl => {
                if !selection.is_empty() {
                    ctx.clipboard_set(self.selected_text());
                }
            }
            Key::X if ctrl => {
                if !selection.is_empty() {
                    ctx.clipboard_set(self.selected_text());
                    if editable {
                        self.delete(selection);
                        changed = true;
                    }
                }
            }
            Key::V if ctrl && editable => {
                if let Some(pasted) = ctx.clipboard_get() {
                    changed = self.replace_selection(&pasted);
                }
            }
            // undo and redo are not tracked
            Key::Z | Key::Y => {}
            _ => return EditOutcome::default(),
        }
        EditOutcome::from_change(changed, caret, self.caret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    fn buffer(text: &str) -> TextBuffer {
        let mut buffer = TextBuffer::default();
        buffer.set_text(text);
        buffer
    }

    #[test]
    fn set_text_puts_caret_at_end() {
        let b = buffer("héllo");
        assert_eq!(b.text(), "héllo");
        assert_eq!((b.caret(), b.select()), (5, 5));
    }

    #[test]
    fn arrows_move_and_shift_extends() {
        let mut harness = Harness::new();
        let mut b = buffer("hello");
        harness.with_event(|ctx| {
            b.apply_key(ctx, Key::Left, KeyMods::NONE, true);
            b.apply_key(ctx, Key::Left, KeyMods::SHIFT, true);
        });
        assert_eq!((b.caret(), b.select()), (3, 4));
        assert_eq!(b.selected_text(), "l");
        harness.with_event(|ctx| {
            b.apply_key(ctx, Key::Home, KeyMods::NONE, true);
            b.apply_key(ctx, Key::Left, KeyMods::NONE, true);
        });
        assert_eq!((b.caret(), b.select()), (0, 0));
        harness.with_event(|ctx| b.apply_key(ctx, Key::End, KeyMods::SHIFT, true));
        assert_eq!((b.caret(), b.select()), (5, 0));
    }

    #[test]
    fn backspace_and_delete_respect_bounds() {
        let mut harness = Harness::new();
        let mut b = buffer("ab");
        let outcome = harness.with_event(|ctx| b.apply_key(ctx, Key::Delete, KeyMods::NONE, true));
        assert!(!outcome.changed);
        harness.with_event(|ctx| {
            b.apply_key(ctx, Key::Backspace, KeyMods::NONE, true);
            b.apply_key(ctx, Key::Home, KeyMods::NONE, true);
        });
        let outcome = harness.with_event(|ctx| b.apply_key(ctx, Key::Backspace, KeyMods::NONE, true));
        assert!(!outcome.changed);
        harness.with_event(|ctx| b.apply_key(ctx, Key::Delete, KeyMods::NONE, true));
        assert_eq!(b.text(), "");
        assert_eq!((b.caret(), b.select()), (0, 0));
    }

    #[test]
    fn select_all_then_backspace_empties() {
        let mut harness = Harness::new();
        for caret in 0..=5 {
            let mut b = buffer("hello");
            b.set_caret(caret, false);
            harness.with_event(|ctx| {
                b.apply_key(ctx, Key::A, KeyMods::CTRL, true);
                b.apply_key(ctx, Key::Backspace, KeyMods::NONE, true);
            });
            assert_eq!(b.text(), "");
            assert_eq!((b.caret(), b.select()), (0, 0));
        }
    }

    #[test]
    fn clipboard_round_trip() {
        let mut harness = Harness::new();
        let mut b = buffer("hello world");
        b.set_selection(11, 6);
        harness.with_event(|ctx| b.apply_key(ctx, Key::X, KeyMods::CTRL, true));
        assert_eq!(b.text(), "hello ");
        harness.with_event(|ctx| {
            b.apply_key(ctx, Key::Home, KeyMods::NONE, true);
            b.apply_key(ctx, Key::V, KeyMods::CTRL, true);
        });
        assert_eq!(b.text(), "worldhello ");
        assert_eq!((b.caret(), b.select()), (5, 5));
        assert_eq!(harness.clipboard_text().as_deref(), Some("world"));
    }

    #[test]
    fn copy_of_empty_selection_is_a_no_op() {
        let mut harness = Harness::new();
        let mut b = buffer("abc");
        harness.with_event(|ctx| b.apply_key(ctx, Key::C, KeyMods::CTRL, true));
        assert_eq!(harness.clipboard_text(), None);
    }

    #[test]
    fn read_only_buffers_still_move_and_copy() {
        let mut harness = Harness::new();
        let mut b = buffer("abc");
        harness.with_event(|ctx| {
            b.apply_key(ctx, Key::Backspace, KeyMods::NONE, false);
            b.apply_key(ctx, Key::Left, KeyMods::SHIFT, false);
            b.apply_key(ctx, Key::X, KeyMods::CTRL, false);
        });
        assert_eq!(b.text(), "abc");
        assert_eq!(harness.clipboard_text().as_deref(), Some("c"));
    }

    #[test]
    fn limit_truncates_input() {
        let mut b = TextBuffer::with_limit(Some(4));
        b.set_text("abcdef");
        assert_eq!(b.text(), "abcd");
        assert!(!b.insert_char('x').changed);
        b.set_selection(0, 2);
        assert!(b.replace_selection("xyz"));
        assert_eq!(b.text(), "xycd");
        assert_eq!(b.caret(), 2);
        b.set_limit(Some(2));
        assert_eq!(b.text(), "xy");
    }

    #[test]
    fn unhandled_keys_report_nothing() {
        let mut harness = Harness::new();
        let mut b = buffer("abc");
        let outcome = harness.with_event(|ctx| b.apply_key(ctx, Key::Other(99), KeyMods::NONE, true));
        assert!(!outcome.handled);
        let outcome = harness.with_event(|ctx| b.apply_key(ctx, Key::A, KeyMods::NONE, true));
        assert!(!outcome.handled);
    }
}
