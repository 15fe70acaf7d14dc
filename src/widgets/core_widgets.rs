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

/// Clickable labelled box that fires a callback on left press.
///
/// A button never captures the pointer: the callback runs on press and the click is treated
/// as a stateless tap.
pub struct Button {
    pos: Vec2f,
    size: Vec2f,
    text: String,
    policy: SizePolicy,
    alignment: Vec2f,
    padding: Real,
    on_click: Option<Callback<Button>>,
}

impl Button {
    /// Button with the default form size and centered text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            pos: Vec2f::default(),
            size: vec2(128.0, 32.0),
            text: text.into(),
            policy: SizePolicy::default(),
            alignment: Align::C.vector(),
            padding: 3.0,
            on_click: None,
        }
    }

    /// Label.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the label.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    /// Fixed size.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.policy = SizePolicy::Fixed(width, height);
        self
    }

    /// Fixed width, one text line tall.
    pub fn set_width(&mut self, width: Real) -> &mut Self {
        self.policy = SizePolicy::Width(width);
        self
    }

    /// Sizes the button to its label every frame.
    pub fn set_size_from_text(&mut self) -> &mut Self {
        self.policy = SizePolicy::Fit;
        self
    }

    /// Label alignment.
    pub fn set_alignment(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        self.alignment = alignment.into();
        self
    }

    /// Space around the label; panics if negative.
    pub fn set_padding(&mut self, padding: Real) -> &mut Self {
        self.padding = enforce(non_negative("padding", padding));
        self
    }

    /// Callback fired on left press.
    pub fn on_click(&mut self, f: impl FnMut(&mut EventCtx<'_>, &Button) + 'static) -> &mut Self {
        self.on_click = Some(Box::new(f));
        self
    }
}

impl Form for Button {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) { self.size = self.policy.resolve(cx.font(), &self.text, self.padding) }

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }

    fn hover(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { hit_self(self.bounds(), x, y) }

    fn activate(&mut self, ctx: &mut EventCtx<'_>, button: MouseButton) -> bool {
        if button.is_left() {
            fire!(self.on_click, ctx);
        }
        false
    }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let bounds = self.bounds();
        let hovered = canvas.is_hovered(self);
        canvas.panel(bounds, ControlColor::WindowBG, ControlColor::Outline.hover_if(hovered));
        draw_label(canvas, &self.text, bounds, self.padding, self.alignment);
    }
}

/// Labelled on/off box; a left press flips the value and fires the callback.
pub struct Toggle {
    pos: Vec2f,
    size: Vec2f,
    text: String,
    value: bool,
    policy: SizePolicy,
    alignment: Vec2f,
    padding: Real,
    on_toggle: Option<Callback<Toggle>>,
}

impl Toggle {
    /// Unchecked toggle with the default form size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            pos: Vec2f::default(),
            size: vec2(128.0, 32.0),
            text: text.into(),
            value: false,
            policy: SizePolicy::default(),
            alignment: Align::C.vector(),
            padding: 3.0,
            on_toggle: None,
        }
    }

    /// Current state.
    pub fn value(&self) -> bool { self.value }

    /// Sets the state without firing the callback.
    pub fn set_value(&mut self, value: bool) -> &mut Self {
        self.value = value;
        self
    }

    /// Replaces the label.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    /// Fixed size.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.policy = SizePolicy::Fixed(width, height);
        self
    }

    /// Sizes the toggle to its label every frame.
    pub fn set_size_from_text(&mut self) -> &mut Self {
        self.policy = SizePolicy::Fit;
        self
    }

    /// Label alignment.
    pub fn set_alignment(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        self.alignment = alignment.into();
        self
    }

    /// Space around the label and check mark; panics if negative.
    pub fn set_padding(&mut self, padding: Real) -> &mut Self {
        self.padding = enforce(non_negative("padding", padding));
        self
    }

    /// Callback fired after the value flips.
    pub fn on_toggle(&mut self, f: impl FnMut(&mut EventCtx<'_>, &Toggle) + 'static) -> &mut Self {
        self.on_toggle = Some(Box::new(f));
        self
    }
}

impl Form for Toggle {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) { self.size = self.policy.resolve(cx.font(), &self.text, self.padding) }

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }

    fn hover(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { hit_self(self.bounds(), x, y) }

    fn activate(&mut self, ctx: &mut EventCtx<'_>, button: MouseButton) -> bool {
        if button.is_left() {
            self.value = !self.value;
            fire!(self.on_toggle, ctx);
        }
        false
    }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let bounds = self.bounds();
        canvas.set_control_color(ControlColor::WindowBG);
        canvas.rect_filled(bounds);
        if self.value {
            canvas.set_control_color(ControlColor::Selection);
            canvas.rect_filled(bounds.shrink(self.padding));
        }
        let hovered = canvas.is_hovered(self);
        canvas.set_control_color(ControlColor::Outline.hover_if(hovered));
        canvas.rect(bounds);
        draw_label(canvas, &self.text, bounds, self.padding, self.alignment);
    }
}

/// Non-interactive bar filled proportionally to a value in `[0, 1]`.
pub struct ProgressBar {
    pos: Vec2f,
    size: Vec2f,
    value: Real,
}

impl ProgressBar {
    /// Empty bar of the default form size.
    pub fn new() -> Self { Self { pos: Vec2f::default(), size: vec2(128.0, 32.0), value: 0.0 } }

    /// Fill fraction.
    pub fn value(&self) -> Real { self.value }

    /// Sets the fill fraction, saturated to `[0, 1]`.
    pub fn set_value(&mut self, value: Real) -> &mut Self {
        self.value = saturate(value);
        self
    }

    /// Fixed size.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.size = vec2(width, height);
        self
    }
}

impl Default for ProgressBar {
    fn default() -> Self { Self::new() }
}

impl Form for ProgressBar {
    form_geometry!();

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let bounds = self.bounds();
        canvas.set_control_color(ControlColor::Inset);
        canvas.rect_filled(bounds);
        canvas.set_control_color(ControlColor::Fill);
        canvas.rect_filled(Bounds::new(bounds.x0, lerp(bounds.x0, bounds.x1, self.value), bounds.y0, bounds.y1));
        canvas.set_control_color(ControlColor::Outline);
        canvas.rect(bounds);
    }
}

/// Single line of static text, sized to fit it.
pub struct Text {
    pos: Vec2f,
    size: Vec2f,
    text: String,
}

impl Text {
    /// Label showing `text`.
    pub fn new(text: impl Into<String>) -> Self { Self { pos: Vec2f::default(), size: Vec2f::default(), text: text.into() } }

    /// Shown text.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }
}

impl Form for Text {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) { self.size = cx.font().size(&self.text) }

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }

    fn render(&self, canvas: &mut Canvas<'_>) {
        canvas.set_control_color(ControlColor::Outline);
        canvas.text(&self.text, self.pos.x, self.pos.y);
    }
}

/// Texture quad; clickable only when enabled.
pub struct ImageForm {
    pos: Vec2f,
    size: Vec2f,
    texture: Option<TextureId>,
    clickable: bool,
    on_click: Option<Callback<ImageForm>>,
}

impl ImageForm {
    /// Image of the default form size showing `texture`.
    pub fn new(texture: Option<TextureId>) -> Self { Self { pos: Vec2f::default(), size: vec2(128.0, 32.0), texture, clickable: false, on_click: None } }

    /// Replaces the texture.
    pub fn set_texture(&mut self, texture: Option<TextureId>) -> &mut Self {
        self.texture = texture;
        self
    }

    /// Fixed size.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.size = vec2(width, height);
        self
    }

    /// Whether the image takes part in hit testing.
    pub fn set_clickable(&mut self, clickable: bool) -> &mut Self {
        self.clickable = clickable;
        self
    }

    /// Callback fired on left press while clickable.
    pub fn on_click(&mut self, f: impl FnMut(&mut EventCtx<'_>, &ImageForm) + 'static) -> &mut Self {
        self.on_click = Some(Box::new(f));
        self
    }
}

impl Form for ImageForm {
    form_geometry!();

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }

    fn hover(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> {
        if !self.clickable {
            return None;
        }
        hit_self(self.bounds(), x, y)
    }

    fn activate(&mut self, ctx: &mut EventCtx<'_>, button: MouseButton) -> bool {
        if button.is_left() {
            fire!(self.on_click, ctx);
        }
        false
    }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let bounds = self.bounds();
        if let Some(texture) = self.texture {
            canvas.set_color(color(255, 255, 255, 255));
            canvas.image(texture, bounds);
        }
        let hovered = canvas.is_hovered(self);
        canvas.set_control_color(ControlColor::Outline.hover_if(hovered));
        canvas.rect(bounds);
    }
}
