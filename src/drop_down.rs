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

/// Transient overlay shown above every window.
///
/// A drop-down is not a form and not part of the window stack: the widget that owns it asks
/// the [`Context`] to open it at an explicit position through
/// [`EventCtx::open_drop_down`]. At most one is open at a time; any press outside it closes
/// it.
pub struct DropDown {
    pos: Vec2f,
    size: Vec2f,
    content: Option<FormHandle>,
    alignment: Vec2f,
    padding: Real,
    open: bool,
}

impl DropDown {
    /// Empty, closed drop-down.
    pub fn new() -> Self { Self { pos: vec2(128.0, 128.0), size: Vec2f::default(), content: None, alignment: Align::NW.vector(), padding: 0.0, open: false } }

    /// Replaces the content.
    pub fn set_content(&mut self, form: impl IntoForm) -> &mut Self {
        self.content = Some(form.into_form());
        self
    }

    /// Content form.
    pub fn content(&self) -> Option<&FormHandle> { self.content.as_ref() }

    /// Bottom-left corner, as placed by the last `layout`.
    pub fn pos(&self) -> Vec2f { self.pos }

    /// Size.
    pub fn size(&self) -> Vec2f { self.size }

    /// Covered rectangle.
    pub fn bounds(&self) -> Bounds { Bounds::from_pos_size(self.pos, self.size) }

    /// Fixed size.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.size = vec2(width, height);
        self
    }

    /// Sizes the drop-down to its content plus padding.
    pub fn set_size_from_content(&mut self, cx: &LayoutCtx<'_>) -> &mut Self {
        if let Some(content) = &self.content {
            let mut content = content.borrow_mut();
            content.update_size(cx);
            let size = content.size();
            self.size = vec2(size.x + self.padding * 2.0, size.y + self.padding * 2.0);
        }
        self
    }

    /// Alignment of the content inside the padded rectangle.
    pub fn set_alignment(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        self.alignment = alignment.into();
        self
    }

    /// Space around the content; panics if negative.
    pub fn set_padding(&mut self, padding: Real) -> &mut Self {
        self.padding = enforce(non_negative("padding", padding));
        self
    }

    /// Returns `true` while the [`Context`] shows this drop-down.
    pub fn is_open(&self) -> bool { self.open }

    pub(crate) fn set_open(&mut self, open: bool) { self.open = open }

    /// Moves the drop-down and lays out its content.
    pub fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        if let Some(content) = &self.content {
            let mut content = content.borrow_mut();
            content.update_size(cx);
            let aligned = inside_bounds(content.size(), self.bounds().shrink(self.padding), self.alignment);
            content.layout(cx, aligned.x, aligned.y);
        }
    }

    /// What lies under `(x, y)`: an interactive form of the content, the drop-down itself, or
    /// nothing when outside.
    pub fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<SurfaceHit> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        let hit = self.content.as_ref().and_then(|content| content.hit(cx, x, y));
        Some(hit.map_or(SurfaceHit::Surface, SurfaceHit::Form))
    }

    /// Scroll box of the content under `(x, y)`.
    pub fn find_scroll_box(&self, x: Real, y: Real) -> Option<FormHandle> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        self.content.as_ref()?.scroll_target(x, y)
    }

    /// Returns `true` if `id` is the content or one of its descendants.
    pub fn contains(&self, id: Id) -> bool { self.content.as_ref().is_some_and(|content| content.contains(id)) }

    /// Draws the background, outline and content.
    pub fn render(&self, canvas: &mut Canvas<'_>) {
        canvas.panel(self.bounds(), ControlColor::WindowBG, ControlColor::Outline);
        if let Some(content) = &self.content {
            content.borrow().render(canvas);
        }
    }
}

impl Default for DropDown {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixed, mono};
    use approx::assert_relative_eq;

    #[test]
    fn sizes_from_content_and_places_it() {
        let font = mono();
        let style = Style::default();
        let cx = LayoutCtx::new(&font, &style, vec2(800.0, 600.0));
        let content = fixed(40.0, 20.0);
        let mut drop_down = DropDown::new();
        drop_down.set_content(content.clone()).set_padding(5.0).set_size_from_content(&cx);
        assert_relative_eq!(drop_down.size().x, 50.0);
        assert_relative_eq!(drop_down.size().y, 30.0);
        drop_down.layout(&cx, 100.0, 200.0);
        assert_relative_eq!(content.borrow().pos().x, 105.0);
        assert_relative_eq!(content.borrow().pos().y, 205.0);
        assert!(drop_down.contains(content.id()));
    }

    #[test]
    fn hover_reports_surface_outside_content() {
        let font = mono();
        let style = Style::default();
        let cx = LayoutCtx::new(&font, &style, vec2(800.0, 600.0));
        let button = Handle::new(Button::new("x"));
        button.borrow_mut().set_size(20.0, 20.0);
        let mut drop_down = DropDown::new();
        drop_down.set_content(button.clone()).set_size(100.0, 100.0).layout(&cx, 0.0, 0.0);
        // button sits at the top-left corner: (0, 80)..(20, 100)
        assert!(matches!(drop_down.hover(&cx, 10.0, 90.0), Some(SurfaceHit::Form(f)) if f.ptr_eq(&button)));
        assert!(matches!(drop_down.hover(&cx, 50.0, 10.0), Some(SurfaceHit::Surface)));
        assert!(drop_down.hover(&cx, 150.0, 10.0).is_none());
        assert!(drop_down.find_scroll_box(50.0, 50.0).is_none());
    }
}
