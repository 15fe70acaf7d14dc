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

/// Trait implemented by render backends driven by the [`Context`].
///
/// Every draw call uses the color set by the last [`Renderer::set_color`]. Coordinates share
/// the viewport space passed to [`Renderer::begin`].
pub trait Renderer {
    /// Begins a new frame with the viewport size; sets up blending and projection.
    fn begin(&mut self, width: Real, height: Real);
    /// Ends the frame.
    fn end(&mut self);
    /// Sets the color used by subsequent draw calls.
    fn set_color(&mut self, color: Color);
    /// Draws a one pixel rectangle outline.
    fn rect(&mut self, bounds: Bounds);
    /// Fills a rectangle.
    fn rect_filled(&mut self, bounds: Bounds);
    /// Draws a line segment.
    fn line(&mut self, x0: Real, y0: Real, x1: Real, y1: Real);
    /// Fills a triangle.
    fn triangle_filled(&mut self, x0: Real, y0: Real, x1: Real, y1: Real, x2: Real, y2: Real);
    /// Draws a single line of text with its bottom-left corner at `(x, y)`.
    fn text(&mut self, font: FontId, text: &str, x: Real, y: Real);
    /// Draws a texture stretched over `bounds`. Backends without textures may ignore it.
    fn image(&mut self, _texture: TextureId, _bounds: Bounds) {}
    /// Restricts subsequent draw calls to `clip`, or lifts the restriction with `None`.
    fn set_clip(&mut self, clip: Option<Bounds>);
}

/// Interaction state of the coordinator, as seen by `render`.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrameState {
    /// Form under the pointer.
    pub hovered: Option<Id>,
    /// Form capturing the pointer.
    pub active: Option<Id>,
    /// Form holding keyboard focus.
    pub focused: Option<Id>,
    /// Window under the pointer.
    pub hovered_window: Option<Id>,
    /// Window being moved or resized.
    pub active_window: Option<Id>,
    /// Blink phase of text carets.
    pub caret_visible: bool,
}

/// Per-frame drawing front end handed to [`Form::render`].
///
/// Keeps a stack of clip rectangles (nested clips intersect) and skips redundant color changes.
pub struct Canvas<'a> {
    renderer: &'a mut dyn Renderer,
    font: &'a dyn FontMetrics,
    style: &'a Style,
    frame: FrameState,
    clip_stack: Vec<Bounds>,
    palettes: Vec<[Color; ControlColor::Max as usize]>,
    color: Option<Color>,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(renderer: &'a mut dyn Renderer, font: &'a dyn FontMetrics, style: &'a Style, frame: FrameState) -> Self {
        Self { renderer, font, style, frame, clip_stack: Vec::new(), palettes: Vec::new(), color: None }
    }

    /// Font metrics used for text layout.
    pub fn font(&self) -> &dyn FontMetrics { self.font }

    /// Active style.
    pub fn style(&self) -> &Style { self.style }

    /// Interaction state snapshot for this frame.
    pub fn frame(&self) -> &FrameState { &self.frame }

    /// Returns `true` if `form` is the hovered form.
    pub fn is_hovered<T: ?Sized>(&self, form: &T) -> bool { self.frame.hovered == Some(Id::from_ptr(form)) }

    /// Returns `true` if `form` is capturing the pointer.
    pub fn is_active<T: ?Sized>(&self, form: &T) -> bool { self.frame.active == Some(Id::from_ptr(form)) }

    /// Returns `true` if `form` holds keyboard focus.
    pub fn is_focused<T: ?Sized>(&self, form: &T) -> bool { self.frame.focused == Some(Id::from_ptr(form)) }

    /// Returns `true` if `window` is the hovered window.
    pub fn is_hovered_window<T: ?Sized>(&self, window: &T) -> bool { self.frame.hovered_window == Some(Id::from_ptr(window)) }

    /// Returns `true` if `window` is being moved or resized.
    pub fn is_active_window<T: ?Sized>(&self, window: &T) -> bool { self.frame.active_window == Some(Id::from_ptr(window)) }

    /// Whether carets are drawn in the current blink phase.
    pub fn caret_visible(&self) -> bool { self.frame.caret_visible }

    /// Sets the draw color.
    pub fn set_color(&mut self, color: Color) {
        if self.color != Some(color) {
            self.color = Some(color);
            self.renderer.set_color(color);
        }
    }

    /// Sets the draw color from the palette, honoring any override pushed by an enclosing form.
    pub fn set_control_color(&mut self, id: ControlColor) {
        let color = self.control_color(id);
        self.set_color(color);
    }

    /// Palette entry in effect for `id`.
    pub fn control_color(&self, id: ControlColor) -> Color {
        match self.palettes.last() {
            Some(palette) => palette[id as usize],
            None => self.style.color(id),
        }
    }

    /// Runs `f` with the given palette entries replaced; unset entries keep their current color.
    pub fn with_colors<F: FnOnce(&mut Self)>(&mut self, overrides: &[Option<Color>; ControlColor::Max as usize], f: F) {
        let mut palette = match self.palettes.last() {
            Some(palette) => *palette,
            None => self.style.colors,
        };
        for (entry, color) in palette.iter_mut().zip(overrides) {
            if let Some(color) = color {
                *entry = *color;
            }
        }
        self.palettes.push(palette);
        f(self);
        self.palettes.pop();
    }

    /// Draws a rectangle outline.
    pub fn rect(&mut self, bounds: Bounds) { self.renderer.rect(bounds) }

    /// Fills a rectangle.
    pub fn rect_filled(&mut self, bounds: Bounds) { self.renderer.rect_filled(bounds) }

    /// Draws a line segment.
    pub fn line(&mut self, x0: Real, y0: Real, x1: Real, y1: Real) { self.renderer.line(x0, y0, x1, y1) }

    /// Fills a triangle.
    pub fn triangle_filled(&mut self, x0: Real, y0: Real, x1: Real, y1: Real, x2: Real, y2: Real) { self.renderer.triangle_filled(x0, y0, x1, y1, x2, y2) }

    /// Draws text in the style font.
    pub fn text(&mut self, text: &str, x: Real, y: Real) {
        if !text.is_empty() {
            self.renderer.text(self.style.font, text, x, y)
        }
    }

    /// Draws a texture.
    pub fn image(&mut self, texture: TextureId, bounds: Bounds) { self.renderer.image(texture, bounds) }

    /// Fills `bounds` with one palette color and outlines it with another.
    pub fn panel(&mut self, bounds: Bounds, fill: ControlColor, outline: ControlColor) {
        self.set_control_color(fill);
        self.rect_filled(bounds);
        self.set_control_color(outline);
        self.rect(bounds);
    }

    /// Innermost clip rectangle, if any.
    pub fn current_clip(&self) -> Option<Bounds> { self.clip_stack.last().copied() }

    /// Intersects the current clip with `bounds` and makes it current.
    pub fn push_clip(&mut self, bounds: Bounds) {
        let clip = match self.current_clip() {
            Some(last) => bounds.intersect(&last).unwrap_or(Bounds::new(bounds.x0, bounds.x0, bounds.y0, bounds.y0)),
            None => bounds,
        };
        self.clip_stack.push(clip);
        self.renderer.set_clip(Some(clip));
    }

    /// Restores the clip that was current before the matching [`Canvas::push_clip`].
    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
        let clip = self.current_clip();
        self.renderer.set_clip(clip);
    }

    /// Runs `f` with drawing clipped to `bounds`.
    pub fn clipped<F: FnOnce(&mut Self)>(&mut self, bounds: Bounds, f: F) {
        self.push_clip(bounds);
        f(self);
        self.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, RecordingRenderer, mono};

    #[test]
    fn nested_clips_intersect_and_restore() {
        let mut renderer = RecordingRenderer::default();
        let font = mono();
        let style = Style::default();
        {
            let mut canvas = Canvas::new(&mut renderer, &font, &style, FrameState::default());
            canvas.push_clip(Bounds::new(0.0, 100.0, 0.0, 100.0));
            canvas.push_clip(Bounds::new(50.0, 150.0, -20.0, 40.0));
            assert_eq!(canvas.current_clip(), Some(Bounds::new(50.0, 100.0, 0.0, 40.0)));
            canvas.pop_clip();
            canvas.pop_clip();
            assert_eq!(canvas.current_clip(), None);
        }
        let clips: Vec<_> = renderer.ops.iter().filter_map(|op| if let DrawOp::Clip(c) = op { Some(*c) } else { None }).collect();
        assert_eq!(
            clips,
            vec![
                Some(Bounds::new(0.0, 100.0, 0.0, 100.0)),
                Some(Bounds::new(50.0, 100.0, 0.0, 40.0)),
                Some(Bounds::new(0.0, 100.0, 0.0, 100.0)),
                None,
            ]
        );
    }

    #[test]
    fn disjoint_clip_collapses_to_empty() {
        let mut renderer = RecordingRenderer::default();
        let font = mono();
        let style = Style::default();
        let mut canvas = Canvas::new(&mut renderer, &font, &style, FrameState::default());
        canvas.push_clip(Bounds::new(0.0, 10.0, 0.0, 10.0));
        canvas.push_clip(Bounds::new(20.0, 30.0, 20.0, 30.0));
        let clip = canvas.current_clip().unwrap_or_default();
        assert_eq!(clip.width(), 0.0);
        assert_eq!(clip.height(), 0.0);
    }

    #[test]
    fn redundant_colors_are_skipped() {
        let mut renderer = RecordingRenderer::default();
        let font = mono();
        let style = Style::default();
        {
            let mut canvas = Canvas::new(&mut renderer, &font, &style, FrameState::default());
            canvas.set_control_color(ControlColor::Outline);
            canvas.set_control_color(ControlColor::Outline);
            canvas.set_control_color(ControlColor::Text);
        }
        let colors = renderer.ops.iter().filter(|op| matches!(op, DrawOp::Color(_))).count();
        assert_eq!(colors, 2);
    }

    #[test]
    fn color_overrides_nest_and_unwind() {
        let mut renderer = RecordingRenderer::default();
        let font = mono();
        let style = Style::default();
        let red = color(255, 0, 0, 255);
        let blue = color(0, 0, 255, 255);
        let mut outer = [None; ControlColor::Max as usize];
        outer[ControlColor::Outline as usize] = Some(red);
        let mut inner = [None; ControlColor::Max as usize];
        inner[ControlColor::Fill as usize] = Some(blue);
        {
            let mut canvas = Canvas::new(&mut renderer, &font, &style, FrameState::default());
            canvas.with_colors(&outer, |canvas| {
                canvas.with_colors(&inner, |canvas| {
                    assert_eq!(canvas.control_color(ControlColor::Outline), red);
                    assert_eq!(canvas.control_color(ControlColor::Fill), blue);
                });
                assert_eq!(canvas.control_color(ControlColor::Fill), style.color(ControlColor::Fill));
            });
            assert_eq!(canvas.control_color(ControlColor::Outline), style.color(ControlColor::Outline));
        }
    }
}
