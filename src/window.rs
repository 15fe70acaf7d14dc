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

/// Shared handle to a window; the [`Context`] stacks clones of it.
pub type WindowHandle = Handle<Window>;

/// Window edge grabbed by a resize drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Left edge.
    Left,
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Drag {
    None,
    Move,
    Resize(Edge),
}

/// Top-level movable frame holding one content form.
///
/// A window owns its rectangle, which may be larger than its content; the content is aligned
/// inside it, below the title bar and inset by the padding. Windows start hidden and enter
/// the z-order through [`Context::show`].
pub struct Window {
    bounds: Bounds,
    content: Option<FormHandle>,
    title: Option<String>,
    alignment: Vec2f,
    padding: Real,
    drag: Drag,
    // window edges minus the pointer, captured while not dragging
    drag_offsets: Bounds,
    title_bar_visible: bool,
    title_bar_hovered: bool,
    draggable: bool,
    resizable: bool,
    min_size: Vec2f,
    edge_hovered: Option<Edge>,
    close_button_visible: bool,
    close_button_hovered: bool,
    close_button_pressed: bool,
    visible: bool,
    on_close: Option<Box<dyn FnMut(&Window)>>,
}

impl Window {
    /// Hidden 256x256 window at the origin.
    pub fn new() -> Self {
        Self {
            bounds: Bounds::new(0.0, 256.0, 0.0, 256.0),
            content: None,
            title: None,
            alignment: Align::NW.vector(),
            padding: 10.0,
            drag: Drag::None,
            drag_offsets: Bounds::default(),
            title_bar_visible: true,
            title_bar_hovered: false,
            draggable: true,
            resizable: false,
            min_size: vec2(64.0, 64.0),
            edge_hovered: None,
            close_button_visible: true,
            close_button_hovered: false,
            close_button_pressed: false,
            visible: false,
            on_close: None,
        }
    }

    /// Returns `true` while the window is in the z-order.
    pub fn is_visible(&self) -> bool { self.visible }

    pub(crate) fn set_visible(&mut self, visible: bool) { self.visible = visible }

    /// Replaces the content.
    pub fn set_content(&mut self, form: impl IntoForm) -> &mut Self {
        self.content = Some(form.into_form());
        self
    }

    /// Content form.
    pub fn content(&self) -> Option<&FormHandle> { self.content.as_ref() }

    /// Window rectangle.
    pub fn bounds(&self) -> Bounds { self.bounds }

    /// Replaces the window rectangle.
    pub fn set_bounds(&mut self, bounds: Bounds) -> &mut Self {
        self.bounds = bounds;
        self
    }

    /// Moves the bottom-left corner, keeping the size.
    pub fn set_pos(&mut self, x: Real, y: Real) -> &mut Self {
        self.bounds = Bounds::from_pos_size(vec2(x, y), self.bounds.size());
        self
    }

    /// Resizes, keeping the bottom-left corner.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.bounds.x1 = self.bounds.x0 + width;
        self.bounds.y1 = self.bounds.y0 + height;
        self
    }

    /// Changes the width, keeping the left edge.
    pub fn set_width(&mut self, width: Real) -> &mut Self {
        self.bounds.x1 = self.bounds.x0 + width;
        self
    }

    /// Changes the height, keeping the bottom edge.
    pub fn set_height(&mut self, height: Real) -> &mut Self {
        self.bounds.y1 = self.bounds.y0 + height;
        self
    }

    /// Fits the content, title and title bar, keeping the bottom-left corner.
    pub fn set_size_from_content(&mut self, cx: &LayoutCtx<'_>) -> &mut Self {
        let title_bar = self.title_bar_height(cx.style());
        let mut width: Real = 0.0;
        let mut height: Real = 0.0;
        if let Some(content) = &self.content {
            let mut content = content.borrow_mut();
            content.update_size(cx);
            let size = content.size();
            width = width.max(size.x + self.padding * 2.0);
            height = height.max(size.y + self.padding * 2.0 + title_bar);
        }
        if let Some(title) = &self.title {
            width = width.max(cx.font().width(title) + self.padding * 2.0);
        }
        self.set_size(width, height.max(title_bar))
    }

    /// Places the window inside the viewport according to `alignment`.
    pub fn set_pos_align_to_viewport(&mut self, viewport: Vec2f, alignment: impl Into<Vec2f>) -> &mut Self {
        let aligned = inside_bounds(self.bounds.size(), Bounds::new(0.0, viewport.x, 0.0, viewport.y), alignment.into());
        self.set_pos(aligned.x, aligned.y)
    }

    /// Centers the window in the viewport.
    pub fn set_pos_center_viewport(&mut self, viewport: Vec2f) -> &mut Self { self.set_pos_align_to_viewport(viewport, Align::C) }

    /// Whether the title bar moves the window.
    pub fn set_draggable(&mut self, draggable: bool) -> &mut Self {
        self.draggable = draggable;
        self
    }

    /// Whether the edges resize the window.
    pub fn set_resizable(&mut self, resizable: bool) -> &mut Self {
        self.resizable = resizable;
        self
    }

    /// Smallest size a resize drag may produce.
    pub fn set_min_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.min_size = vec2(width, height);
        self
    }

    /// Shows or hides the title bar.
    pub fn set_title_bar_visible(&mut self, visible: bool) -> &mut Self {
        self.title_bar_visible = visible;
        self
    }

    /// Shows or hides the close button; it lives in the title bar.
    pub fn set_close_button_visible(&mut self, visible: bool) -> &mut Self {
        self.close_button_visible = visible;
        self
    }

    /// Title text.
    pub fn title(&self) -> Option<&str> { self.title.as_deref() }

    /// Sets the title text.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Alignment of the content inside the window.
    pub fn set_alignment(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        self.alignment = alignment.into();
        self
    }

    /// Space between the frame and the content; panics if negative.
    pub fn set_padding(&mut self, padding: Real) -> &mut Self { enforce(self.try_set_padding(padding)) }

    /// Space between the frame and the content; rejects negative values.
    pub fn try_set_padding(&mut self, padding: Real) -> Result<&mut Self, UiError> {
        self.padding = non_negative("padding", padding)?;
        Ok(self)
    }

    /// Callback fired after the window is hidden.
    pub fn on_close(&mut self, f: impl FnMut(&Window) + 'static) -> &mut Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// Returns `true` while a move or resize drag is in progress.
    pub fn is_dragging(&self) -> bool { self.drag != Drag::None }

    /// Pointer shape for the hovered or dragged edge.
    pub fn cursor(&self) -> CursorIcon {
        let edge = match self.drag {
            Drag::Resize(edge) => Some(edge),
            _ => self.edge_hovered,
        };
        match edge {
            Some(Edge::Left | Edge::Right) => CursorIcon::HResize,
            Some(Edge::Top | Edge::Bottom) => CursorIcon::VResize,
            None => CursorIcon::Default,
        }
    }

    /// Returns `true` if `id` is the content or one of its descendants.
    pub fn contains(&self, id: Id) -> bool { self.content.as_ref().is_some_and(|content| content.contains(id)) }

    fn title_bar_height(&self, style: &Style) -> Real { if self.title_bar_visible { style.title_height } else { 0.0 } }

    fn close_button(&self, style: &Style) -> Bounds {
        let size = style.close_button_size();
        let x1 = self.bounds.x1 - style.close_button_padding;
        let y1 = self.bounds.y1 - style.close_button_padding;
        Bounds::new(x1 - size, x1, y1 - size, y1)
    }

    fn apply_drag(&mut self, x: Real, y: Real) {
        let offsets = self.drag_offsets;
        let b = &mut self.bounds;
        match self.drag {
            Drag::Move => {
                let size = b.size();
                *b = Bounds::from_pos_size(vec2(x + offsets.x0, y + offsets.y0), size);
            }
            Drag::Resize(Edge::Left) => b.x0 = (x + offsets.x0).min(b.x1 - self.min_size.x),
            Drag::Resize(Edge::Top) => b.y1 = (y + offsets.y1).max(b.y0 + self.min_size.y),
            Drag::Resize(Edge::Right) => b.x1 = (x + offsets.x1).max(b.x0 + self.min_size.x),
            Drag::Resize(Edge::Bottom) => b.y0 = (y + offsets.y0).min(b.y1 - self.min_size.y),
            Drag::None => {
                self.drag_offsets = Bounds::new(b.x0 - x, b.x1 - x, b.y0 - y, b.y1 - y);
            }
        }
    }

    // nearest edge within range of the rectangle; ties go to left, top, right, bottom in that order
    fn edge_at(&self, range: Real, x: Real, y: Real) -> Option<Edge> {
        let b = &self.bounds;
        let near_x = x >= b.x0 - range && x <= b.x1 + range;
        let near_y = y >= b.y0 - range && y <= b.y1 + range;
        if !(near_x && near_y) {
            return None;
        }
        let distances = [(Edge::Left, (x - b.x0).abs()), (Edge::Top, (y - b.y1).abs()), (Edge::Right, (x - b.x1).abs()), (Edge::Bottom, (y - b.y0).abs())];
        let (edge, distance) = distances.into_iter().fold((Edge::Left, Real::INFINITY), |best, next| if next.1 < best.1 { next } else { best });
        (distance < range).then_some(edge)
    }

    /// Hit test and drag update. While dragging, the rectangle follows the pointer from the
    /// offsets captured when the drag started.
    pub(crate) fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<SurfaceHit> {
        self.apply_drag(x, y);

        self.title_bar_hovered = false;
        self.close_button_hovered = false;
        self.edge_hovered = None;
        let style = cx.style();

        if self.resizable {
            self.edge_hovered = self.edge_at(style.resize_range, x, y);
            if self.edge_hovered.is_some() {
                return Some(SurfaceHit::Surface);
            }
        }

        if !self.bounds.contains(x, y) {
            return None;
        }

        if self.title_bar_visible && self.close_button_visible && self.close_button(style).contains(x, y) {
            self.close_button_hovered = true;
            return Some(SurfaceHit::Surface);
        }

        if self.title_bar_visible && y >= self.bounds.y1 - self.title_bar_height(style) {
            self.title_bar_hovered = true;
            return Some(SurfaceHit::Surface);
        }

        let hit = self.content.as_ref().and_then(|content| content.hit(cx, x, y));
        Some(hit.map_or(SurfaceHit::Surface, SurfaceHit::Form))
    }

    pub(crate) fn find_scroll_box(&self, x: Real, y: Real) -> Option<FormHandle> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        self.content.as_ref()?.scroll_target(x, y)
    }

    /// Starts a move, resize or close-button press. Returns `true` to capture the pointer.
    pub(crate) fn activate(&mut self) -> bool {
        if self.title_bar_hovered && self.draggable {
            self.drag = Drag::Move;
        } else if let (true, Some(edge)) = (self.resizable, self.edge_hovered) {
            self.drag = Drag::Resize(edge);
        } else if self.close_button_hovered {
            self.close_button_pressed = true;
            return true;
        } else {
            return false;
        }
        tracing::trace!(drag = ?self.drag, "window drag started");
        true
    }

    /// Ends the capture. Returns `true` if the close button was pressed and released over it.
    pub(crate) fn deactivate(&mut self) -> bool {
        self.drag = Drag::None;
        let pressed = std::mem::take(&mut self.close_button_pressed);
        pressed && self.close_button_hovered
    }

    pub(crate) fn fire_close(&mut self) {
        if let Some(mut callback) = self.on_close.take() {
            callback(self);
            if self.on_close.is_none() {
                self.on_close = Some(callback);
            }
        }
    }

    /// Keeps the title bar reachable inside the viewport, then sizes and places the content.
    pub(crate) fn layout(&mut self, cx: &LayoutCtx<'_>) {
        let viewport = cx.viewport();
        let margin = cx.style().title_height;
        let b = &mut self.bounds;
        let (w, h) = (b.width(), b.height());
        if b.x1 < margin {
            b.x1 = margin;
            b.x0 = margin - w;
        } else if b.x0 > viewport.x - margin {
            b.x0 = viewport.x - margin;
            b.x1 = b.x0 + w;
        }
        if b.y1 >= viewport.y {
            b.y1 = viewport.y;
            b.y0 = b.y1 - h;
        } else if b.y1 < margin {
            b.y1 = margin;
            b.y0 = margin - h;
        }

        let title_bar = self.title_bar_height(cx.style());
        if let Some(content) = &self.content {
            let mut content = content.borrow_mut();
            content.update_size(cx);
            let b = self.bounds;
            let area = Bounds::new(b.x0 + self.padding, b.x1 - self.padding, b.y0 + self.padding, b.y1 - title_bar - self.padding);
            let aligned = inside_bounds(content.size(), area, self.alignment);
            content.layout(cx, aligned.x, aligned.y);
        }
    }

    pub(crate) fn render(&self, canvas: &mut Canvas<'_>) {
        let b = self.bounds;
        canvas.panel(b, ControlColor::WindowBG, ControlColor::Outline);

        if let Some(content) = &self.content {
            canvas.clipped(b, |canvas| content.borrow().render(canvas));
        }

        if !self.title_bar_visible {
            return;
        }
        let style = *canvas.style();
        let hovered = canvas.is_hovered_window(self) || canvas.is_active_window(self);
        let bar = Bounds::new(b.x0, b.x1, b.y1 - style.title_height, b.y1);
        let outline = ControlColor::Outline.hover_if(hovered && self.title_bar_hovered && self.draggable);
        canvas.panel(bar, ControlColor::TitleBG, outline);

        if let Some(title) = &self.title {
            let size = canvas.font().size(title);
            let area = bar.shrink(style.title_padding);
            let aligned = inside_bounds(size, area, Align::W.vector());
            canvas.clipped(bar, |canvas| canvas.text(title, aligned.x, aligned.y));
        }

        if self.close_button_visible {
            let button = self.close_button(&style);
            let cross = button.shrink(style.close_cross_padding);
            canvas.set_control_color(ControlColor::Outline.hover_if(hovered && self.close_button_hovered));
            canvas.rect(button);
            canvas.line(cross.x0, cross.y0, cross.x1, cross.y1);
            canvas.line(cross.x0, cross.y1, cross.x1, cross.y0);
        }
    }
}

impl Default for Window {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixed, mono};
    use approx::assert_relative_eq;

    fn with_cx<R>(f: impl FnOnce(&LayoutCtx<'_>) -> R) -> R {
        let font = mono();
        let style = Style::default();
        let cx = LayoutCtx::new(&font, &style, vec2(800.0, 600.0));
        f(&cx)
    }

    fn window() -> Window {
        let mut window = Window::new();
        window.set_bounds(Bounds::new(100.0, 300.0, 100.0, 300.0));
        window
    }

    #[test]
    fn title_drag_moves_rigidly() {
        with_cx(|cx| {
            let mut w = window();
            assert!(matches!(w.hover(cx, 150.0, 290.0), Some(SurfaceHit::Surface)));
            assert!(w.activate());
            for (x, y) in [(160.0, 280.0), (200.0, 250.0), (170.0, 260.0)] {
                w.hover(cx, x, y);
                let b = w.bounds();
                assert_relative_eq!(b.x0, 100.0 + x - 150.0);
                assert_relative_eq!(b.y1, 300.0 + y - 290.0);
                assert_relative_eq!(b.width(), 200.0);
            }
            assert!(!w.deactivate());
            assert!(!w.is_dragging());
        });
    }

    #[test]
    fn body_press_does_not_capture() {
        with_cx(|cx| {
            let mut w = window();
            assert!(matches!(w.hover(cx, 150.0, 150.0), Some(SurfaceHit::Surface)));
            assert!(!w.activate());
            assert!(w.hover(cx, 50.0, 50.0).is_none());
        });
    }

    #[test]
    fn locked_windows_ignore_title_drags() {
        with_cx(|cx| {
            let mut w = window();
            w.set_draggable(false);
            w.hover(cx, 150.0, 290.0);
            assert!(!w.activate());
        });
    }

    #[test]
    fn close_requires_release_over_the_button() {
        with_cx(|cx| {
            // close button spans (275, 275)..(295, 295)
            let mut w = window();
            w.hover(cx, 285.0, 285.0);
            assert!(w.activate());
            w.hover(cx, 285.0, 285.0);
            assert!(w.deactivate());

            w.hover(cx, 285.0, 285.0);
            assert!(w.activate());
            w.hover(cx, 200.0, 200.0);
            assert!(!w.deactivate());
        });
    }

    #[test]
    fn nearest_edge_wins_and_resizes() {
        with_cx(|cx| {
            let mut w = window();
            w.set_resizable(true);
            w.hover(cx, 302.0, 200.0);
            assert_eq!(w.cursor(), CursorIcon::HResize);
            assert!(w.activate());
            w.hover(cx, 352.0, 200.0);
            assert_relative_eq!(w.bounds().x1, 350.0);
            assert_relative_eq!(w.bounds().x0, 100.0);
            // cannot shrink past the minimum
            w.hover(cx, 0.0, 200.0);
            assert_relative_eq!(w.bounds().x1, 164.0);
            w.deactivate();

            // the bottom-left corner is equidistant; left has priority
            w.hover(cx, 100.0, 100.0);
            assert_eq!(w.cursor(), CursorIcon::HResize);
            w.hover(cx, 150.0, 98.0);
            assert_eq!(w.cursor(), CursorIcon::VResize);
        });
    }

    #[test]
    fn edges_only_reach_just_outside_the_rectangle() {
        with_cx(|cx| {
            let mut w = window();
            w.set_resizable(true);
            // on the line of the right edge, far below the window
            assert!(w.hover(cx, 300.0, 20.0).is_none());
            // on the line of the top edge, far to the left
            assert!(w.hover(cx, 20.0, 301.0).is_none());
            assert_eq!(w.cursor(), CursorIcon::Default);
            assert!(!w.activate());
            // just outside the top-right corner still resizes
            w.hover(cx, 303.0, 250.0);
            assert_eq!(w.cursor(), CursorIcon::HResize);
        });
    }

    #[test]
    fn layout_keeps_the_title_bar_on_screen() {
        with_cx(|cx| {
            let mut w = window();
            w.set_pos(-500.0, 900.0).layout(cx);
            let b = w.bounds();
            assert_relative_eq!(b.x1, 30.0);
            assert_relative_eq!(b.y1, 600.0);
            w.set_pos(900.0, -500.0).layout(cx);
            let b = w.bounds();
            assert_relative_eq!(b.x0, 770.0);
            assert_relative_eq!(b.y1, 30.0);
        });
    }

    #[test]
    fn content_is_aligned_below_the_title_bar() {
        with_cx(|cx| {
            let content = fixed(50.0, 20.0);
            let mut w = window();
            w.set_content(content.clone()).layout(cx);
            // top-left inside the padding, under the 30 px title bar
            assert_relative_eq!(content.borrow().pos().x, 110.0);
            assert_relative_eq!(content.borrow().pos().y, 300.0 - 30.0 - 10.0 - 20.0);
            assert!(w.contains(content.id()));
        });
    }

    #[test]
    fn size_from_content_covers_title_and_content() {
        with_cx(|cx| {
            let mut w = window();
            w.set_content(fixed(50.0, 20.0)).set_title("a long window title").set_size_from_content(cx);
            let b = w.bounds();
            assert_relative_eq!(b.width(), 19.0 * 8.0 + 20.0);
            assert_relative_eq!(b.height(), 20.0 + 20.0 + 30.0);
            assert_relative_eq!(b.x0, 100.0);
        });
    }

    #[test]
    fn aligns_to_viewport() {
        let mut w = window();
        w.set_pos_center_viewport(vec2(800.0, 600.0));
        assert_relative_eq!(w.bounds().x0, 300.0);
        assert_relative_eq!(w.bounds().y0, 200.0);
    }
}
