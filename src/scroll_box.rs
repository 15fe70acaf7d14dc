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

/// Vertical viewport over a taller child.
///
/// `scroll_y` is how far the content has been pushed up, clamped to
/// `[0, max(0, content_height - height)]` where the content height includes the padding on
/// both sides. The thumb geometry is derived from that ratio on demand. Content outside the
/// viewport is clipped at render time and is not hit because hits are tested against the
/// scrolled content layout.
pub struct ScrollBox {
    pos: Vec2f,
    size: Vec2f,
    content: Option<FormHandle>,
    alignment: Vec2f,
    padding: Real,
    scroll_y: Real,
    // scroll value the pointer maps to at pos.y, captured while not dragging
    drag_start: Real,
    bar_hovered: bool,
    dragging: bool,
}

impl ScrollBox {
    /// Empty 128x128 scroll box.
    pub fn new() -> Self {
        Self {
            pos: Vec2f::default(),
            size: vec2(128.0, 128.0),
            content: None,
            alignment: Align::NW.vector(),
            padding: 10.0,
            scroll_y: 0.0,
            drag_start: 0.0,
            bar_hovered: false,
            dragging: false,
        }
    }

    /// Replaces the scrolled child.
    pub fn set_content(&mut self, form: impl IntoForm) -> &mut Self {
        self.content = Some(form.into_form());
        self
    }

    /// Scrolled child.
    pub fn content(&self) -> Option<&FormHandle> { self.content.as_ref() }

    /// Fixed size.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.size = vec2(width, height);
        self.clamp_scroll();
        self
    }

    /// Fixed width, keeping the height.
    pub fn set_width(&mut self, width: Real) -> &mut Self {
        self.size.x = width;
        self
    }

    /// Fixed height, keeping the width.
    pub fn set_height(&mut self, height: Real) -> &mut Self {
        self.size.y = height;
        self.clamp_scroll();
        self
    }

    /// Fits the content plus scrollbar horizontally, and its height up to `max_height`.
    pub fn set_size_from_content(&mut self, cx: &LayoutCtx<'_>, max_height: Real) -> &mut Self {
        let Some(content) = &self.content else { return self };
        let mut content = content.borrow_mut();
        content.update_size(cx);
        let size = content.size();
        drop(content);
        self.size = vec2(size.x + self.padding * 2.0 + cx.style().scrollbar_width, (size.y + self.padding * 2.0).min(max_height));
        self.clamp_scroll();
        self
    }

    /// Alignment of content smaller than the viewport.
    pub fn set_alignment(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        self.alignment = alignment.into();
        self
    }

    /// Space around the content; panics if negative.
    pub fn set_padding(&mut self, padding: Real) -> &mut Self {
        enforce(self.try_set_padding(padding))
    }

    /// Space around the content; rejects negative values.
    pub fn try_set_padding(&mut self, padding: Real) -> Result<&mut Self, UiError> {
        self.padding = non_negative("padding", padding)?;
        Ok(self)
    }

    /// Space around the content.
    pub fn padding(&self) -> Real { self.padding }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> Real { self.scroll_y }

    /// Sets the scroll offset, clamped to the scrollable range. Content moves on the next layout.
    pub fn set_scroll_y(&mut self, scroll_y: Real) -> &mut Self {
        self.scroll_y = scroll_y;
        self.clamp_scroll();
        self
    }

    /// Scrolls to the top.
    pub fn scroll_to_top(&mut self) -> &mut Self {
        self.scroll_y = 0.0;
        self
    }

    /// Scrolls to the bottom.
    pub fn scroll_to_bottom(&mut self) -> &mut Self {
        self.scroll_y = self.max_scroll();
        self
    }

    /// Returns `true` when scrolled to the top.
    pub fn is_at_top(&self) -> bool { self.scroll_y <= 0.0 }

    /// Returns `true` when scrolled to the bottom or when nothing can scroll.
    pub fn is_at_bottom(&self) -> bool {
        let max = self.max_scroll();
        max <= 0.0 || self.scroll_y >= max
    }

    /// Returns `true` while the thumb is being dragged.
    pub fn is_dragging(&self) -> bool { self.dragging }

    fn content_height(&self) -> Real {
        match &self.content {
            Some(content) => content.borrow().size().y + self.padding * 2.0,
            None => 0.0,
        }
    }

    fn max_scroll(&self) -> Real { (self.content_height() - self.size.y).max(0.0) }

    fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        self.scroll_y = if max <= 0.0 || self.scroll_y.is_nan() { 0.0 } else { self.scroll_y.clamp(0.0, max) };
    }

    fn thumb_ratio(&self) -> Real {
        let content_height = self.content_height();
        if content_height > 0.0 { self.size.y / content_height } else { 1.0 }
    }

    fn thumb(&self, scrollbar_width: Real) -> Bounds {
        let ratio = self.thumb_ratio();
        let x1 = self.pos.x + self.size.x;
        let y1 = self.pos.y + self.size.y - self.scroll_y * ratio;
        Bounds::new(x1 - scrollbar_width, x1, y1 - self.size.y * ratio, y1)
    }

    fn place_content(&mut self, cx: &LayoutCtx<'_>) {
        let Some(content) = &self.content else { return };
        let mut content = content.borrow_mut();
        let size = content.size();
        let padding = self.padding;
        let (x0, y0) = (self.pos.x, self.pos.y);
        let x = inside_span(size.x, x0 + padding, x0 + self.size.x - cx.style().scrollbar_width - padding, self.alignment.x);
        let y = if size.y > self.size.y {
            y0 + self.size.y - padding - size.y
        } else {
            inside_span(size.y, y0 + padding, y0 + self.size.y - padding, self.alignment.y)
        };
        content.layout(cx, x, y + self.scroll_y);
    }
}

impl Default for ScrollBox {
    fn default() -> Self { Self::new() }
}

impl Form for ScrollBox {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        if let Some(content) = &self.content {
            content.borrow_mut().update_size(cx);
        }
        self.clamp_scroll();
    }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        self.place_content(cx);
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> {
        let ratio = self.thumb_ratio();
        if self.dragging {
            self.set_scroll_y(self.drag_start + (self.pos.y - y) / ratio);
            self.place_content(cx);
        } else {
            self.drag_start = self.scroll_y - (self.pos.y - y) / ratio;
        }

        self.bar_hovered = false;
        if !self.bounds().contains(x, y) {
            return None;
        }
        let scrollbar_width = cx.style().scrollbar_width;
        if self.thumb(scrollbar_width).contains(x, y) {
            self.bar_hovered = true;
            return Some(Hit::Itself);
        }
        if x >= self.pos.x + self.size.x - scrollbar_width {
            return Some(Hit::Itself);
        }
        let child = self.content.as_ref().and_then(|content| content.hit(cx, x, y));
        Some(child.map_or(Hit::Itself, Hit::Child))
    }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        let inner = self.content.as_ref().and_then(|content| content.scroll_target(x, y));
        Some(inner.map_or(Hit::Itself, Hit::Child))
    }

    fn activate(&mut self, _ctx: &mut EventCtx<'_>, button: MouseButton) -> bool {
        if !button.is_left() || !self.bar_hovered {
            return false;
        }
        tracing::trace!(scroll_y = self.scroll_y, "scrollbar drag started");
        self.dragging = true;
        true
    }

    fn deactivate(&mut self, _ctx: &mut EventCtx<'_>) { self.dragging = false }

    fn scroll(&mut self, cx: &LayoutCtx<'_>, _dx: Real, dy: Real) {
        self.set_scroll_y(self.scroll_y - dy * cx.style().scroll_rate);
        self.place_content(cx);
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&FormHandle)) {
        if let Some(content) = &self.content {
            f(content);
        }
    }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let bounds = self.bounds();
        let scrollbar_width = canvas.style().scrollbar_width;
        let bar_x = bounds.x1 - scrollbar_width;

        canvas.set_control_color(ControlColor::Outline);
        canvas.rect(bounds);
        canvas.line(bar_x, bounds.y0, bar_x, bounds.y1);

        if self.size.y < self.content_height() {
            let hovered = self.dragging || (canvas.is_hovered(self) && self.bar_hovered);
            canvas.panel(self.thumb(scrollbar_width), ControlColor::TitleBG, ControlColor::Outline.hover_if(hovered));
        }

        if let Some(content) = &self.content {
            canvas.clipped(Bounds::new(bounds.x0, bar_x, bounds.y0, bounds.y1), |canvas| content.borrow().render(canvas));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, fixed, mono};
    use approx::assert_relative_eq;

    // 100x100 viewport over content 300 tall: content height 320, range [0, 220]
    fn tall() -> Handle<ScrollBox> {
        let scroll = Handle::new(ScrollBox::new());
        scroll.borrow_mut().set_content(fixed(50.0, 300.0)).set_size(100.0, 100.0);
        let font = mono();
        let style = Style::default();
        let cx = LayoutCtx::new(&font, &style, vec2(800.0, 600.0));
        let mut s = scroll.borrow_mut();
        s.update_size(&cx);
        s.layout(&cx, 0.0, 0.0);
        drop(s);
        scroll
    }

    #[test]
    fn assignments_are_clamped() {
        let scroll = tall();
        let mut s = scroll.borrow_mut();
        for (requested, expected) in [(-5.0, 0.0), (50.0, 50.0), (1000.0, 220.0), (Real::NAN, 0.0)] {
            s.set_scroll_y(requested);
            assert_relative_eq!(s.scroll_y(), expected);
        }
        s.scroll_to_bottom();
        assert!(s.is_at_bottom());
        s.scroll_to_top();
        assert!(s.is_at_top());
    }

    #[test]
    fn short_content_never_scrolls() {
        let scroll = Handle::new(ScrollBox::new());
        scroll.borrow_mut().set_content(fixed(50.0, 40.0)).set_size(100.0, 100.0).set_scroll_y(30.0);
        assert_relative_eq!(scroll.borrow().scroll_y(), 0.0);
        assert!(scroll.borrow().is_at_top() && scroll.borrow().is_at_bottom());
    }

    #[test]
    fn content_is_pinned_to_the_top_and_follows_scroll() {
        let scroll = tall();
        let top = scroll.borrow().content().map(|c| c.borrow().pos().y);
        // top of content sits padding below the viewport top
        assert_relative_eq!(top.unwrap_or(0.0), 100.0 - 10.0 - 300.0);

        let form = scroll.to_form();
        let mut harness = Harness::new();
        harness.scroll(&form, 0.0, -1.0);
        assert_relative_eq!(scroll.borrow().scroll_y(), 53.0);
        let moved = scroll.borrow().content().map(|c| c.borrow().pos().y);
        assert_relative_eq!(moved.unwrap_or(0.0), -210.0 + 53.0);
    }

    #[test]
    fn thumb_drag_tracks_pointer_through_the_ratio() {
        let scroll = tall();
        let form = scroll.to_form();
        let mut harness = Harness::new();
        // thumb spans the top 100 * 100/320 px of the bar
        harness.hover(&form, 90.0, 95.0);
        assert!(harness.activate(&form, MouseButton::LEFT));
        harness.hover(&form, 90.0, 85.0);
        assert_relative_eq!(scroll.borrow().scroll_y(), 32.0, epsilon = 1e-3);
        harness.hover(&form, 90.0, -500.0);
        assert_relative_eq!(scroll.borrow().scroll_y(), 220.0);
        harness.deactivate(&form);
        assert!(!scroll.borrow().is_dragging());
    }

    #[test]
    fn press_outside_thumb_does_not_capture() {
        let scroll = tall();
        let form = scroll.to_form();
        let mut harness = Harness::new();
        harness.hover(&form, 90.0, 5.0);
        assert!(!harness.activate(&form, MouseButton::LEFT));
    }

    #[test]
    fn nested_scroll_boxes_resolve_innermost() {
        let inner = Handle::new(ScrollBox::new());
        inner.borrow_mut().set_content(fixed(10.0, 10.0)).set_size(40.0, 40.0);
        let outer = Handle::new(ScrollBox::new());
        outer.borrow_mut().set_content(inner.clone()).set_size(100.0, 100.0);
        let font = mono();
        let style = Style::default();
        let cx = LayoutCtx::new(&font, &style, vec2(800.0, 600.0));
        let outer = outer.to_form();
        outer.borrow_mut().update_size(&cx);
        outer.borrow_mut().layout(&cx, 0.0, 0.0);
        // inner sits at (10, 50)..(50, 90)
        assert!(outer.scroll_target(20.0, 60.0).is_some_and(|s| s.ptr_eq(&inner)));
        assert!(outer.scroll_target(70.0, 20.0).is_some_and(|s| s.ptr_eq(&outer)));
        assert!(outer.scroll_target(200.0, 20.0).is_none());
    }
}
