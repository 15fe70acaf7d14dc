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
use super::*;
use crate::error::{enforce, non_negative, positive};
use crate::text_layout::{TextLines, adjacent_line, build_text_lines, line_at, place_text_lines, text_lines_height};

/// Multi-line text, wrapped to a fixed width.
///
/// Read-only by default: the text can be selected, navigated with the arrow keys and copied.
/// With [`Paragraph::set_editable`] it also accepts typing, deletion, cut, paste and Enter
/// for new lines. Caret and selection are character offsets into the raw text.
pub struct Paragraph {
    pos: Vec2f,
    size: Vec2f,
    buffer: TextBuffer,
    lines: TextLines,
    // width, line padding and line height the current lines were wrapped for
    wrapped_for: Option<(Real, Real, Real)>,
    alignment: Vec2f,
    line_padding: Real,
    editable: bool,
    drag_anchor: usize,
    dragging: bool,
    on_focus: Option<Callback<Paragraph>>,
    on_lose_focus: Option<Callback<Paragraph>>,
    on_changed: Option<Callback<Paragraph>>,
}

impl Paragraph {
    /// Empty paragraph, 128 wide.
    pub fn new() -> Self {
        Self {
            pos: Vec2f::default(),
            size: vec2(128.0, 0.0),
            buffer: TextBuffer::default(),
            lines: TextLines::new(),
            wrapped_for: None,
            alignment: Align::NW.vector(),
            line_padding: 0.0,
            editable: false,
            drag_anchor: 0,
            dragging: false,
            on_focus: None,
            on_lose_focus: None,
            on_changed: None,
        }
    }

    /// Raw text, including the newline every `println` appends.
    pub fn text(&self) -> &str { self.buffer.text() }

    /// Caret position in characters.
    pub fn caret(&self) -> usize { self.buffer.caret() }

    /// Selection anchor in characters.
    pub fn select(&self) -> usize { self.buffer.select() }

    /// Selected text, empty without a selection.
    pub fn selected_text(&self) -> &str { self.buffer.selected_text() }

    /// Number of wrapped lines after the last sizing pass or edit.
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Appends `text` and a newline, then moves the caret to the end.
    pub fn println(&mut self, text: &str) -> &mut Self {
        let mut raw = String::with_capacity(self.buffer.text().len() + text.len() + 1);
        raw.push_str(self.buffer.text());
        raw.push_str(text);
        raw.push('\n');
        self.buffer.set_text(&raw);
        self.wrapped_for = None;
        self
    }

    /// Removes all text.
    pub fn clear(&mut self) -> &mut Self {
        self.buffer.set_text("");
        self.lines.clear();
        self.wrapped_for = None;
        self
    }

    /// Wrapping width; panics unless positive.
    pub fn set_width(&mut self, width: Real) -> &mut Self {
        enforce(self.try_set_width(width))
    }

    /// Wrapping width; rejects zero and negative values.
    pub fn try_set_width(&mut self, width: Real) -> Result<&mut Self, UiError> {
        self.size.x = positive("width", width)?;
        Ok(self)
    }

    /// Horizontal alignment of each line; only the x component is used.
    pub fn set_alignment(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        self.alignment = alignment.into();
        self
    }

    /// Extra space between lines; panics if negative.
    pub fn set_line_padding(&mut self, line_padding: Real) -> &mut Self {
        self.line_padding = enforce(non_negative("line padding", line_padding));
        self
    }

    /// Whether the text accepts input.
    pub fn set_editable(&mut self, editable: bool) -> &mut Self {
        self.editable = editable;
        self
    }

    /// Returns `true` if the text accepts input.
    pub fn is_editable(&self) -> bool { self.editable }

    /// Selects the whole text.
    pub fn select_all(&mut self) -> &mut Self {
        self.buffer.select_all();
        self
    }

    /// Collapses the selection at the end of the text.
    pub fn go_to_end(&mut self) -> &mut Self {
        self.buffer.go_to_end();
        self
    }

    /// Callback fired when a press gives the paragraph focus.
    pub fn on_focus(&mut self, f: impl FnMut(&mut EventCtx<'_>, &Paragraph) + 'static) -> &mut Self {
        self.on_focus = Some(Box::new(f));
        self
    }

    /// Callback fired when focus moves elsewhere.
    pub fn on_lose_focus(&mut self, f: impl FnMut(&mut EventCtx<'_>, &Paragraph) + 'static) -> &mut Self {
        self.on_lose_focus = Some(Box::new(f));
        self
    }

    /// Callback fired after an edit changes the text.
    pub fn on_changed(&mut self, f: impl FnMut(&mut EventCtx<'_>, &Paragraph) + 'static) -> &mut Self {
        self.on_changed = Some(Box::new(f));
        self
    }

    fn rewrap(&mut self, font: &dyn FontMetrics) {
        self.lines = build_text_lines(self.buffer.text(), self.size.x, font);
        self.size.y = text_lines_height(self.lines.len(), font.height(), self.line_padding);
        self.wrapped_for = Some((self.size.x, self.line_padding, font.height()));
        self.place_lines(font);
    }

    fn rewrap_if_stale(&mut self, font: &dyn FontMetrics) {
        if self.wrapped_for != Some((self.size.x, self.line_padding, font.height())) {
            self.rewrap(font);
        }
    }

    fn place_lines(&mut self, font: &dyn FontMetrics) {
        let top = self.pos.y + self.size.y;
        place_text_lines(&mut self.lines, self.pos.x, self.size.x, top, font.height(), self.line_padding, self.alignment.x);
    }

    /// Character offset under `(x, y)`: the first line whose baseline is below `y`, else the
    /// last line.
    fn index_at(&self, font: &dyn FontMetrics, x: Real, y: Real) -> usize {
        let line = self.lines.values().find(|line| y > line.y0).or_else(|| self.lines.values().next_back());
        match line {
            Some(line) => line.start + font.caret_index(&line.text, x - line.x0),
            None => 0,
        }
    }

    /// x of the caret at `index`, and the line it sits on.
    fn caret_x(&self, font: &dyn FontMetrics, index: usize) -> Option<(Real, Real)> {
        let line = line_at(&self.lines, index)?;
        Some((line.x0 + font.width(line.prefix(index - line.start)), line.y0))
    }

    fn move_line(&mut self, font: &dyn FontMetrics, up: bool, extend: bool) {
        let caret = self.buffer.caret();
        let Some((x, _)) = self.caret_x(font, caret) else { return };
        let Some(target) = adjacent_line(&self.lines, caret, up) else { return };
        let index = target.start + font.caret_index(&target.text, x - target.x0);
        self.buffer.set_caret(index, extend);
    }

    fn after_edit(&mut self, ctx: &mut EventCtx<'_>, outcome: EditOutcome) {
        if outcome.changed {
            self.rewrap(ctx.font());
            fire!(self.on_changed, ctx);
        }
        if outcome.moved {
            ctx.reset_caret_blink();
        }
    }
}

impl Default for Paragraph {
    fn default() -> Self { Self::new() }
}

impl Form for Paragraph {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) { self.rewrap_if_stale(cx.font()) }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        self.rewrap_if_stale(cx.font());
        self.place_lines(cx.font());
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> {
        let index = self.index_at(cx.font(), x, y);
        if self.dragging {
            let old = self.buffer.caret();
            self.buffer.set_selection(index, self.drag_anchor);
            if self.buffer.caret() != old {
                cx.reset_caret_blink();
            }
        } else {
            self.drag_anchor = index;
        }
        hit_self(self.bounds(), x, y)
    }

    fn activate(&mut self, ctx: &mut EventCtx<'_>, button: MouseButton) -> bool {
        if !button.is_left() {
            return false;
        }
        self.dragging = true;
        if !ctx.is_focused() {
            ctx.reset_caret_blink();
            ctx.request_focus();
            fire!(self.on_focus, ctx);
        }
        true
    }

    fn deactivate(&mut self, _ctx: &mut EventCtx<'_>) { self.dragging = false }

    fn cursor(&self) -> CursorIcon { CursorIcon::IBeam }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> { Some(self) }

    fn render(&self, canvas: &mut Canvas<'_>) {
        if self.lines.is_empty() {
            return;
        }
        let font = canvas.font();
        let height = font.height();
        let focused = canvas.is_focused(self);
        let selection = self.buffer.selection();
        let start = self.caret_x(font, selection.start);
        let end = self.caret_x(font, selection.end);

        if focused && !selection.is_empty() {
            if let (Some((x0, _)), Some((x1, _))) = (start, end) {
                let first = line_at(&self.lines, selection.start).map_or(0, |l| l.start);
                let last = line_at(&self.lines, selection.end).map_or(0, |l| l.start);
                let highlights: Vec<Bounds> = self
                    .lines
                    .range(first..=last)
                    .map(|(&key, line)| {
                        let lx0 = if key == first { x0 } else { line.x0 };
                        let lx1 = if key == last { x1 } else { line.x0 + line.width };
                        Bounds::new(lx0, lx1, line.y0, line.y0 + height)
                    })
                    .collect();
                canvas.set_control_color(ControlColor::Selection);
                for rect in highlights {
                    canvas.rect_filled(rect);
                }
            }
        }

        canvas.set_control_color(ControlColor::Outline);
        for line in self.lines.values() {
            canvas.text(&line.text, line.x0, line.y0);
        }

        if focused && canvas.caret_visible() {
            let caret = if self.buffer.caret() > self.buffer.select() { end } else { start };
            if let Some((x, y)) = caret {
                canvas.set_control_color(ControlColor::Text);
                canvas.line(x, y, x, y + height);
            }
        }
    }
}

impl Focusable for Paragraph {
    fn character(&mut self, ctx: &mut EventCtx<'_>, ch: char) {
        if !self.editable || (ch.is_control() && ch != '\n') {
            return;
        }
        let outcome = self.buffer.insert_char(ch);
        self.after_edit(ctx, outcome);
    }

    fn key(&mut self, ctx: &mut EventCtx<'_>, key: Key, action: KeyAction, mods: KeyMods) {
        if !action.is_down() {
            return;
        }
        match key {
            Key::Up | Key::Down => {
                let caret = self.buffer.caret();
                self.move_line(ctx.font(), key == Key::Up, mods.is_shift());
                if self.buffer.caret() != caret {
                    ctx.reset_caret_blink();
                }
            }
            Key::Enter | Key::KeypadEnter => self.character(ctx, '\n'),
            _ => {
                let editable = self.editable;
                let outcome = self.buffer.apply_key(ctx, key, mods, editable);
                self.after_edit(ctx, outcome);
            }
        }
    }

    fn defocus(&mut self, ctx: &mut EventCtx<'_>) { fire!(self.on_lose_focus, ctx) }
}
