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
use crate::error::{enforce, non_negative};

/// Default cap on the number of characters a [`TextField`] holds.
pub const DEFAULT_CHAR_LIMIT: usize = 128;

/// Single-line text editor.
///
/// Pressing the field focuses it and starts a drag-select anchored at the character under the
/// pointer. Keys and characters arrive only while focused; see [`Focusable`].
pub struct TextField {
    pos: Vec2f,
    size: Vec2f,
    buffer: TextBuffer,
    preview: Option<String>,
    policy: SizePolicy,
    alignment: Vec2f,
    padding: Real,
    // pointer x relative to the field, captured while not dragging
    anchor_x: Real,
    dragging: bool,
    on_focus: Option<Callback<TextField>>,
    on_lose_focus: Option<Callback<TextField>>,
    on_confirm: Option<Callback<TextField>>,
    on_changed: Option<Callback<TextField>>,
}

impl TextField {
    /// Empty field of the default form size.
    pub fn new() -> Self {
        Self {
            pos: Vec2f::default(),
            size: vec2(128.0, 32.0),
            buffer: TextBuffer::with_limit(Some(DEFAULT_CHAR_LIMIT)),
            preview: None,
            policy: SizePolicy::default(),
            alignment: Align::NW.vector(),
            padding: 3.0,
            anchor_x: 0.0,
            dragging: false,
            on_focus: None,
            on_lose_focus: None,
            on_confirm: None,
            on_changed: None,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str { self.buffer.text() }

    /// Caret position in characters.
    pub fn caret(&self) -> usize { self.buffer.caret() }

    /// Selection anchor in characters; equals the caret when nothing is selected.
    pub fn select(&self) -> usize { self.buffer.select() }

    /// Selected text, empty without a selection.
    pub fn selected_text(&self) -> &str { self.buffer.selected_text() }

    /// Replaces the text, truncated to the character limit, and moves the caret to the end.
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.buffer.set_text(text);
        self
    }

    /// Empties the field.
    pub fn clear(&mut self) -> &mut Self { self.set_text("") }

    /// Maximum number of characters; longer content is truncated immediately.
    pub fn char_limit(&self) -> usize { self.buffer.limit().unwrap_or(DEFAULT_CHAR_LIMIT) }

    /// Changes the character limit.
    pub fn set_char_limit(&mut self, limit: usize) -> &mut Self {
        self.buffer.set_limit(Some(limit));
        self
    }

    /// Dimmed placeholder shown while the field is empty and unfocused.
    pub fn set_preview_text(&mut self, preview: impl Into<String>) -> &mut Self {
        self.preview = Some(preview.into());
        self
    }

    /// Fixed width; the height follows the font and padding.
    pub fn set_width(&mut self, width: Real) -> &mut Self {
        self.policy = SizePolicy::Width(width);
        self
    }

    /// Fixed size.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.policy = SizePolicy::Fixed(width, height);
        self
    }

    /// Text alignment inside the padded box.
    pub fn set_alignment(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        self.alignment = alignment.into();
        self
    }

    /// Space between the frame and the text; panics if negative.
    pub fn set_padding(&mut self, padding: Real) -> &mut Self {
        self.padding = enforce(non_negative("padding", padding));
        self
    }

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

    /// Callback fired when a press gives the field focus.
    pub fn on_focus(&mut self, f: impl FnMut(&mut EventCtx<'_>, &TextField) + 'static) -> &mut Self {
        self.on_focus = Some(Box::new(f));
        self
    }

    /// Callback fired when focus moves elsewhere.
    pub fn on_lose_focus(&mut self, f: impl FnMut(&mut EventCtx<'_>, &TextField) + 'static) -> &mut Self {
        self.on_lose_focus = Some(Box::new(f));
        self
    }

    /// Callback fired when Enter is pressed.
    pub fn on_confirm(&mut self, f: impl FnMut(&mut EventCtx<'_>, &TextField) + 'static) -> &mut Self {
        self.on_confirm = Some(Box::new(f));
        self
    }

    /// Callback fired after an edit changes the text.
    pub fn on_changed(&mut self, f: impl FnMut(&mut EventCtx<'_>, &TextField) + 'static) -> &mut Self {
        self.on_changed = Some(Box::new(f));
        self
    }

    fn text_origin(&self, font: &dyn FontMetrics, text: &str) -> Vec2f { inside_bounds(font.size(text), self.bounds().shrink(self.padding), self.alignment) }

    fn after_edit(&mut self, ctx: &mut EventCtx<'_>, outcome: EditOutcome) {
        if outcome.changed {
            fire!(self.on_changed, ctx);
        }
        if outcome.moved {
            ctx.reset_caret_blink();
        }
    }
}

impl Default for TextField {
    fn default() -> Self { Self::new() }
}

impl Form for TextField {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) { self.size = self.policy.resolve(cx.font(), self.buffer.text(), self.padding) }

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> {
        if self.dragging {
            let font = cx.font();
            let origin = self.text_origin(font, self.buffer.text());
            let old = self.buffer.caret();
            let caret = font.caret_index(self.buffer.text(), x - origin.x);
            let anchor = font.caret_index(self.buffer.text(), self.pos.x + self.anchor_x - origin.x);
            self.buffer.set_selection(caret, anchor);
            if self.buffer.caret() != old {
                cx.reset_caret_blink();
            }
        } else {
            self.anchor_x = x - self.pos.x;
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
        let bounds = self.bounds();
        let focused = canvas.is_focused(self);
        let outline = ControlColor::Outline.hover_if(focused || canvas.is_hovered(self));
        canvas.panel(bounds, ControlColor::Inset, outline);

        canvas.clipped(bounds, |canvas| {
            let text = self.buffer.text();
            if focused {
                let font = canvas.font();
                let origin = self.text_origin(font, text);
                let height = font.height();
                let selection = self.buffer.selection();
                let x0 = origin.x + font.width(self.buffer.prefix(selection.start));
                let x1 = x0 + font.width(self.buffer.slice(selection.clone()));

                if !selection.is_empty() {
                    canvas.set_control_color(ControlColor::Selection);
                    canvas.rect_filled(Bounds::new(x0, x1, origin.y, origin.y + height));
                }
                canvas.set_control_color(ControlColor::Text);
                canvas.text(text, origin.x, origin.y);
                if canvas.caret_visible() {
                    let caret_x = if self.buffer.caret() >= self.buffer.select() { x1 } else { x0 };
                    canvas.line(caret_x, origin.y, caret_x, origin.y + height);
                }
            } else if !text.is_empty() {
                let origin = self.text_origin(canvas.font(), text);
                canvas.set_control_color(outline);
                canvas.text(text, origin.x, origin.y);
            } else if let Some(preview) = &self.preview {
                let origin = self.text_origin(canvas.font(), preview);
                let dimmed = canvas.control_color(outline).scaled(0.5);
                canvas.set_color(dimmed);
                canvas.text(preview, origin.x, origin.y);
            }
        });
    }
}

impl Focusable for TextField {
    fn character(&mut self, ctx: &mut EventCtx<'_>, ch: char) {
        if ch.is_control() {
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
            Key::Enter | Key::KeypadEnter => {
                if action == KeyAction::Press {
                    fire!(self.on_confirm, ctx);
                }
            }
            _ => {
                let outcome = self.buffer.apply_key(ctx, key, mods, true);
                self.after_edit(ctx, outcome);
            }
        }
    }

    fn defocus(&mut self, ctx: &mut EventCtx<'_>) { fire!(self.on_lose_focus, ctx) }
}
