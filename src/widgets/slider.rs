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

/// Horizontal slider over a normalized value in `[0, 1]`.
///
/// The square handle is as wide as the slider is tall. Grabbing the handle keeps the grab
/// offset while dragging; pressing the bar elsewhere centers the handle on the pointer. The
/// change callback fires only when the clamped value actually differs.
pub struct Slider {
    pos: Vec2f,
    size: Vec2f,
    value: Real,
    // handle center minus pointer x, captured while not dragging
    grab_offset: Real,
    handle_hovered: bool,
    bar_hovered: bool,
    dragging: bool,
    on_change: Option<Callback<Slider>>,
}

impl Slider {
    /// Slider of the default form size at value 0.
    pub fn new() -> Self {
        Self {
            pos: Vec2f::default(),
            size: vec2(128.0, 32.0),
            value: 0.0,
            grab_offset: 0.0,
            handle_hovered: false,
            bar_hovered: false,
            dragging: false,
            on_change: None,
        }
    }

    /// Current value.
    pub fn value(&self) -> Real { self.value }

    /// Sets the value, saturated to `[0, 1]`. Does not fire the callback.
    pub fn set_value(&mut self, value: Real) -> &mut Self {
        self.value = saturate(value);
        self
    }

    /// Fixed size.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.size = vec2(width, height);
        self
    }

    /// Callback fired while dragging whenever the value changes.
    pub fn on_change(&mut self, f: impl FnMut(&mut EventCtx<'_>, &Slider) + 'static) -> &mut Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Returns `true` while the handle is being dragged.
    pub fn is_dragging(&self) -> bool { self.dragging }

    fn handle_center(&self) -> Real {
        let half = self.size.y * 0.5;
        self.pos.x + lerp(half, self.size.x - half, self.value)
    }

    // returns true if the value changed
    fn drag_to(&mut self, x: Real) -> bool {
        let travel = self.size.x - self.size.y;
        if travel <= 0.0 {
            return false;
        }
        let old = self.value;
        let center = x + self.grab_offset;
        self.value = saturate((center - self.pos.x - self.size.y * 0.5) / travel);
        self.value != old
    }
}

impl Default for Slider {
    fn default() -> Self { Self::new() }
}

impl Form for Slider {
    form_geometry!();

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }

    fn hover(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> {
        if !self.dragging {
            self.grab_offset = self.handle_center() - x;
        }
        if !self.bounds().contains(x, y) {
            self.handle_hovered = false;
            self.bar_hovered = false;
            return None;
        }
        let center = self.handle_center();
        let half = self.size.y * 0.5;
        self.handle_hovered = x >= center - half && x <= center + half;
        self.bar_hovered = !self.handle_hovered;
        Some(Hit::Itself)
    }

    fn activate(&mut self, _ctx: &mut EventCtx<'_>, button: MouseButton) -> bool {
        if !button.is_left() {
            return false;
        }
        if self.bar_hovered {
            self.grab_offset = 0.0;
        }
        self.dragging = true;
        true
    }

    fn deactivate(&mut self, _ctx: &mut EventCtx<'_>) { self.dragging = false }

    fn drag(&mut self, ctx: &mut EventCtx<'_>, x: Real, y: Real) {
        if self.drag_to(x) {
            fire!(self.on_change, ctx);
        }
        self.hover(ctx.layout(), x, y);
    }

    fn cursor(&self) -> CursorIcon { if self.dragging || self.handle_hovered { CursorIcon::HResize } else { CursorIcon::Default } }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let half = self.size.y * 0.5;
        let center = self.handle_center();
        let handle = Bounds::new(center - half, center + half, self.pos.y, self.pos.y + self.size.y);
        let hovered = canvas.is_hovered(self);
        let line_y = self.pos.y + half;

        canvas.set_control_color(ControlColor::Outline.hover_if(hovered && self.bar_hovered));
        canvas.line(self.pos.x, line_y, self.pos.x + self.size.x, line_y);
        canvas.panel(handle, ControlColor::TitleBG, ControlColor::Outline.hover_if(self.dragging || (hovered && self.handle_hovered)));
    }
}
