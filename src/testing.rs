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
//! Test doubles shared by the unit tests: a recording renderer, a fixed-size form and an event
//! harness that plays the coordinator's part for a single form.

use crate::form::Request;
use crate::*;

pub(crate) const VIEWPORT: Vec2f = Vec2f { x: 800.0, y: 600.0 };

/// 8 px advance, 16 px lines.
pub(crate) fn mono() -> MonoFont { MonoFont::new(8.0, 16.0) }

/// Constant-size, non-interactive leaf.
pub(crate) struct FixedForm {
    pos: Vec2f,
    size: Vec2f,
}

impl Form for FixedForm {
    form_geometry!();

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }
}

pub(crate) fn fixed(width: Real, height: Real) -> Handle<FixedForm> { Handle::new(FixedForm { pos: Vec2f::default(), size: vec2(width, height) }) }

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawOp {
    Begin(Real, Real),
    End,
    Color(Color),
    Rect(Bounds),
    RectFilled(Bounds),
    Line(Real, Real, Real, Real),
    Triangle([Real; 6]),
    Text(String, Real, Real),
    Image(TextureId, Bounds),
    Clip(Option<Bounds>),
}

#[derive(Default, Debug)]
pub(crate) struct RecordingRenderer {
    pub ops: Vec<DrawOp>,
}

impl RecordingRenderer {
    pub fn texts(&self) -> Vec<String> {
        self.ops.iter().filter_map(|op| if let DrawOp::Text(text, _, _) = op { Some(text.clone()) } else { None }).collect()
    }

    pub fn filled_rects(&self) -> Vec<Bounds> { self.ops.iter().filter_map(|op| if let DrawOp::RectFilled(b) = op { Some(*b) } else { None }).collect() }
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self, width: Real, height: Real) { self.ops.push(DrawOp::Begin(width, height)) }

    fn end(&mut self) { self.ops.push(DrawOp::End) }

    fn set_color(&mut self, color: Color) { self.ops.push(DrawOp::Color(color)) }

    fn rect(&mut self, bounds: Bounds) { self.ops.push(DrawOp::Rect(bounds)) }

    fn rect_filled(&mut self, bounds: Bounds) { self.ops.push(DrawOp::RectFilled(bounds)) }

    fn line(&mut self, x0: Real, y0: Real, x1: Real, y1: Real) { self.ops.push(DrawOp::Line(x0, y0, x1, y1)) }

    fn triangle_filled(&mut self, x0: Real, y0: Real, x1: Real, y1: Real, x2: Real, y2: Real) { self.ops.push(DrawOp::Triangle([x0, y0, x1, y1, x2, y2])) }

    fn text(&mut self, _font: FontId, text: &str, x: Real, y: Real) { self.ops.push(DrawOp::Text(text.to_string(), x, y)) }

    fn image(&mut self, texture: TextureId, bounds: Bounds) { self.ops.push(DrawOp::Image(texture, bounds)) }

    fn set_clip(&mut self, clip: Option<Bounds>) { self.ops.push(DrawOp::Clip(clip)) }
}

/// Delivers events straight to one form and keeps what it asked for.
pub(crate) struct Harness {
    font: MonoFont,
    style: Style,
    clipboard: MemoryClipboard,
    mouse: Vec2f,
    hovered: Option<Id>,
    focused: Option<Id>,
    requests: Vec<Request>,
    pub caret_resets: usize,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            font: mono(),
            style: Style::default(),
            clipboard: MemoryClipboard::default(),
            mouse: Vec2f::default(),
            hovered: None,
            focused: None,
            requests: Vec::new(),
            caret_resets: 0,
        }
    }

    fn dispatch<R>(&mut self, target: Option<Id>, f: impl FnOnce(&mut EventCtx<'_>) -> R) -> R {
        let focused = target.is_some() && target == self.focused;
        let layout = LayoutCtx::new(&self.font, &self.style, VIEWPORT);
        let mut ctx = EventCtx::new(layout, &mut self.clipboard, focused, self.mouse);
        let result = f(&mut ctx);
        let (requests, reset) = ctx.finish();
        if reset {
            self.caret_resets += 1;
        }
        if requests.iter().any(|r| matches!(r, Request::Focus)) {
            self.focused = target;
        }
        self.requests = requests;
        result
    }

    pub fn with_event<R>(&mut self, f: impl FnOnce(&mut EventCtx<'_>) -> R) -> R { self.dispatch(None, f) }

    pub fn clipboard_text(&mut self) -> Option<String> { self.clipboard.get() }

    pub fn set_clipboard(&mut self, text: &str) { self.clipboard.set(text) }

    pub fn hover(&mut self, form: &FormHandle, x: Real, y: Real) -> Option<FormHandle> {
        self.mouse = vec2(x, y);
        let cx = LayoutCtx::new(&self.font, &self.style, VIEWPORT);
        let hit = form.hit(&cx, x, y);
        if cx.caret_reset_requested() {
            self.caret_resets += 1;
        }
        self.hovered = hit.as_ref().map(|h| h.id());
        hit
    }

    /// Pointer move while `form` captures the pointer.
    pub fn drag(&mut self, form: &FormHandle, x: Real, y: Real) {
        self.mouse = vec2(x, y);
        self.dispatch(Some(form.id()), |ctx| form.borrow_mut().drag(ctx, x, y));
    }

    pub fn activate(&mut self, form: &FormHandle, button: MouseButton) -> bool { self.dispatch(Some(form.id()), |ctx| form.borrow_mut().activate(ctx, button)) }

    pub fn deactivate(&mut self, form: &FormHandle) { self.dispatch(Some(form.id()), |ctx| form.borrow_mut().deactivate(ctx)) }

    fn focusable(&mut self, form: &FormHandle, f: impl FnOnce(&mut dyn Focusable, &mut EventCtx<'_>)) {
        self.dispatch(Some(form.id()), |ctx| {
            let mut form = form.borrow_mut();
            if let Some(focusable) = form.as_focusable() {
                f(focusable, ctx);
            }
        })
    }

    pub fn key(&mut self, form: &FormHandle, key: Key, mods: KeyMods) { self.key_action(form, key, KeyAction::Press, mods) }

    pub fn key_action(&mut self, form: &FormHandle, key: Key, action: KeyAction, mods: KeyMods) { self.focusable(form, |f, ctx| f.key(ctx, key, action, mods)) }

    pub fn character(&mut self, form: &FormHandle, ch: char) { self.focusable(form, |f, ctx| f.character(ctx, ch)) }

    pub fn defocus(&mut self, form: &FormHandle) {
        self.focusable(form, |f, ctx| f.defocus(ctx));
        if self.focused == Some(form.id()) {
            self.focused = None;
        }
    }

    pub fn scroll(&mut self, form: &FormHandle, dx: Real, dy: Real) {
        let cx = LayoutCtx::new(&self.font, &self.style, VIEWPORT);
        form.borrow_mut().scroll(&cx, dx, dy);
    }

    pub fn focus(&mut self, form: &FormHandle) { self.focused = Some(form.id()) }

    pub fn is_focused(&self, form: &FormHandle) -> bool { self.focused == Some(form.id()) }

    /// Drop-down opened by the last event, if any.
    pub fn opened_drop_down(&self) -> Option<(Handle<DropDown>, Real, Real)> {
        self.requests.iter().find_map(|r| match r {
            Request::OpenDropDown { drop_down, x, y } => Some((drop_down.clone(), *x, *y)),
            _ => None,
        })
    }

    /// Returns `true` if the last event asked to close the drop-down.
    pub fn closed_drop_down(&self) -> bool { self.requests.iter().any(|r| matches!(r, Request::CloseDropDown)) }

    pub fn render(&self, renderer: &mut RecordingRenderer, form: &FormHandle) {
        let frame = FrameState { hovered: self.hovered, focused: self.focused, caret_visible: true, ..FrameState::default() };
        let mut canvas = Canvas::new(renderer, &self.font, &self.style, frame);
        form.borrow().render(&mut canvas);
    }
}
