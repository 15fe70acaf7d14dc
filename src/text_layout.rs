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
use std::collections::BTreeMap;

/// One wrapped line of a paragraph.
///
/// `start` is the character offset of the line in the raw text. Consecutive lines are
/// separated by exactly one consumed character: the `'\n'` or the whitespace the line was
/// split at.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TextLine {
    pub start: usize,
    pub text: String,
    pub chars: usize,
    pub width: Real,
    pub x0: Real,
    pub y0: Real,
}

impl TextLine {
    /// First `n` characters of the line, clamped to its length.
    pub fn prefix(&self, n: usize) -> &str {
        match self.text.char_indices().nth(n) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

pub(crate) type TextLines = BTreeMap<usize, TextLine>;

fn push_line(lines: &mut TextLines, start: &mut usize, text: &str, width: Real) {
    let chars = text.chars().count();
    lines.insert(*start, TextLine { start: *start, text: text.to_string(), chars, width, x0: 0.0, y0: 0.0 });
    *start += chars + 1;
}

fn push_wrapped_line(lines: &mut TextLines, start: &mut usize, line: &str, max_width: Real, font: &dyn FontMetrics) {
    let mut rest = line;
    let mut width = font.width(rest);
    while width > max_width {
        let chars: Vec<(usize, char)> = rest.char_indices().collect();
        let overlap = font.caret_index(rest, max_width);
        let mut split = overlap.min(chars.len().saturating_sub(1));
        while split > 0 && !chars[split].1.is_whitespace() {
            split -= 1;
        }
        if split == 0 {
            // a single word wider than the line stays unbroken
            break;
        }
        let (split_byte, split_char) = chars[split];
        let head = &rest[..split_byte];
        push_line(lines, start, head, font.width(head));
        rest = &rest[split_byte + split_char.len_utf8()..];
        width = font.width(rest);
    }
    push_line(lines, start, rest, width);
}

/// Greedily wraps `raw` to `max_width`, breaking explicit lines at `'\n'` and long lines at
/// their last whitespace that fits.
pub(crate) fn build_text_lines(raw: &str, max_width: Real, font: &dyn FontMetrics) -> TextLines {
    let mut lines = TextLines::new();
    let mut start = 0;
    for segment in raw.split('\n') {
        push_wrapped_line(&mut lines, &mut start, segment, max_width, font);
    }
    lines
}

/// Positions lines top to bottom inside a box whose top-left corner is `(x0, top)`.
pub(crate) fn place_text_lines(lines: &mut TextLines, x0: Real, width: Real, top: Real, line_height: Real, line_padding: Real, align_x: Real) {
    let mut y = top - line_height;
    for line in lines.values_mut() {
        line.x0 = inside_span(line.width, x0, x0 + width, align_x);
        line.y0 = y;
        y -= line_height + line_padding;
    }
}

/// Height of `count` lines separated by `line_padding`.
pub(crate) fn text_lines_height(count: usize, line_height: Real, line_padding: Real) -> Real { count as Real * line_height + (count as Real - 1.0).max(0.0) * line_padding }

/// Line containing the character offset `index`.
pub(crate) fn line_at(lines: &TextLines, index: usize) -> Option<&TextLine> { lines.range(..=index).next_back().map(|(_, line)| line) }

/// Line before (`up`) or after the one containing `index`.
pub(crate) fn adjacent_line(lines: &TextLines, index: usize, up: bool) -> Option<&TextLine> {
    let current = line_at(lines, index)?.start;
    if up {
        lines.range(..current).next_back().map(|(_, line)| line)
    } else {
        lines.range(current + 1..).next().map(|(_, line)| line)
    }
}
