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
use std::time::{Duration, Instant};

pub(crate) fn hit_children(children: &[FormHandle], cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { children.iter().find_map(|child| child.hit(cx, x, y)).map(Hit::Child) }

pub(crate) fn scroll_box_in(children: &[FormHandle], x: Real, y: Real) -> Option<Hit> { children.iter().find_map(|child| child.scroll_target(x, y)).map(Hit::Child) }

fn render_children(children: &[FormHandle], canvas: &mut Canvas<'_>) {
    for child in children {
        child.borrow().render(canvas);
    }
}

/// Stacks children top to bottom, each aligned horizontally inside the widest one.
pub struct Rows {
    pos: Vec2f,
    size: Vec2f,
    children: Vec<FormHandle>,
    alignments: Vec<Vec2f>,
    default_alignment: Vec2f,
    spacing: Real,
}

impl Rows {
    /// Empty rows aligned north-west with a spacing of 10.
    pub fn new() -> Self { Self::with_alignment(Align::NW) }

    /// Empty rows whose children default to `alignment`.
    pub fn with_alignment(alignment: impl Into<Vec2f>) -> Self {
        Self { pos: Vec2f::default(), size: Vec2f::default(), children: Vec::new(), alignments: Vec::new(), default_alignment: alignment.into(), spacing: 10.0 }
    }

    /// Appends a child with the default alignment.
    pub fn add(&mut self, form: impl IntoForm) -> &mut Self {
        let alignment = self.default_alignment;
        self.add_aligned(form, alignment)
    }

    /// Appends a child with its own alignment.
    pub fn add_aligned(&mut self, form: impl IntoForm, alignment: impl Into<Vec2f>) -> &mut Self {
        self.children.push(form.into_form());
        self.alignments.push(alignment.into());
        self
    }

    /// Removes every child.
    pub fn clear(&mut self) -> &mut Self {
        self.children.clear();
        self.alignments.clear();
        self
    }

    /// Overrides the alignment of every current child.
    pub fn set_all_alignments(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        let alignment = alignment.into();
        self.alignments.iter_mut().for_each(|a| *a = alignment);
        self
    }

    /// Gap between consecutive rows.
    pub fn spacing(&self) -> Real { self.spacing }

    /// Sets the gap between rows; panics if negative.
    pub fn set_spacing(&mut self, spacing: Real) -> &mut Self {
        enforce(self.try_set_spacing(spacing));
        self
    }

    /// Sets the gap between rows, rejecting negative values.
    pub fn try_set_spacing(&mut self, spacing: Real) -> Result<&mut Self, UiError> {
        self.spacing = non_negative("spacing", spacing)?;
        Ok(self)
    }

    /// Number of children.
    pub fn len(&self) -> usize { self.children.len() }

    /// Returns `true` without children.
    pub fn is_empty(&self) -> bool { self.children.is_empty() }
}

impl Default for Rows {
    fn default() -> Self { Self::new() }
}

impl Form for Rows {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        let mut width: Real = 0.0;
        let mut height = self.spacing * (self.children.len() as Real - 1.0).max(0.0);
        for child in &self.children {
            let mut child = child.borrow_mut();
            child.update_size(cx);
            let size = child.size();
            width = width.max(size.x);
            height += size.y;
        }
        self.size = vec2(width, height);
    }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        let x1 = x + self.size.x;
        let mut top = y + self.size.y;
        for (child, alignment) in self.children.iter().zip(&self.alignments) {
            let mut child = child.borrow_mut();
            let size = child.size();
            let bottom = top - size.y;
            let aligned = inside_bounds(size, Bounds::new(x, x1, bottom, top), *alignment);
            child.layout(cx, aligned.x, aligned.y);
            top = bottom - self.spacing;
        }
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { hit_children(&self.children, cx, x, y) }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> { scroll_box_in(&self.children, x, y) }

    fn for_each_child(&self, f: &mut dyn FnMut(&FormHandle)) { self.children.iter().for_each(f) }

    fn render(&self, canvas: &mut Canvas<'_>) { render_children(&self.children, canvas) }
}

/// Places children left to right, each aligned vertically inside the tallest one.
pub struct Columns {
    pos: Vec2f,
    size: Vec2f,
    children: Vec<FormHandle>,
    alignments: Vec<Vec2f>,
    default_alignment: Vec2f,
    spacing: Real,
}

impl Columns {
    /// Empty columns aligned north-west with a spacing of 10.
    pub fn new() -> Self { Self::with_alignment(Align::NW) }

    /// Empty columns whose children default to `alignment`.
    pub fn with_alignment(alignment: impl Into<Vec2f>) -> Self {
        Self { pos: Vec2f::default(), size: Vec2f::default(), children: Vec::new(), alignments: Vec::new(), default_alignment: alignment.into(), spacing: 10.0 }
    }

    /// Appends a child with the default alignment.
    pub fn add(&mut self, form: impl IntoForm) -> &mut Self {
        let alignment = self.default_alignment;
        self.add_aligned(form, alignment)
    }

    /// Appends a child with its own alignment.
    pub fn add_aligned(&mut self, form: impl IntoForm, alignment: impl Into<Vec2f>) -> &mut Self {
        self.children.push(form.into_form());
        self.alignments.push(alignment.into());
        self
    }

    /// Removes every child.
    pub fn clear(&mut self) -> &mut Self {
        self.children.clear();
        self.alignments.clear();
        self
    }

    /// Overrides the alignment of every current child.
    pub fn set_all_alignments(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        let alignment = alignment.into();
        self.alignments.iter_mut().for_each(|a| *a = alignment);
        self
    }

    /// Gap between consecutive columns.
    pub fn spacing(&self) -> Real { self.spacing }

    /// Sets the gap between columns; panics if negative.
    pub fn set_spacing(&mut self, spacing: Real) -> &mut Self {
        enforce(self.try_set_spacing(spacing));
        self
    }

    /// Sets the gap between columns, rejecting negative values.
    pub fn try_set_spacing(&mut self, spacing: Real) -> Result<&mut Self, UiError> {
        self.spacing = non_negative("spacing", spacing)?;
        Ok(self)
    }
}

impl Default for Columns {
    fn default() -> Self { Self::new() }
}

impl Form for Columns {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        let mut width = self.spacing * (self.children.len() as Real - 1.0).max(0.0);
        let mut height: Real = 0.0;
        for child in &self.children {
            let mut child = child.borrow_mut();
            child.update_size(cx);
            let size = child.size();
            width += size.x;
            height = height.max(size.y);
        }
        self.size = vec2(width, height);
    }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        let y1 = y + self.size.y;
        let mut left = x;
        for (child, alignment) in self.children.iter().zip(&self.alignments) {
            let mut child = child.borrow_mut();
            let size = child.size();
            let right = left + size.x;
            let aligned = inside_bounds(size, Bounds::new(left, right, y, y1), *alignment);
            child.layout(cx, aligned.x, aligned.y);
            left = right + self.spacing;
        }
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { hit_children(&self.children, cx, x, y) }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> { scroll_box_in(&self.children, x, y) }

    fn for_each_child(&self, f: &mut dyn FnMut(&FormHandle)) { self.children.iter().for_each(f) }

    fn render(&self, canvas: &mut Canvas<'_>) { render_children(&self.children, canvas) }
}

/// A row whose children start at fixed horizontal offsets, like tab stops.
///
/// Each child is aligned inside the span between its offset and the next one (the last child
/// spans to the row width). The row's own size is set explicitly.
pub struct FixedRow {
    pos: Vec2f,
    size: Vec2f,
    offsets: Vec<Real>,
    children: Vec<FormHandle>,
    alignment: Vec2f,
}

impl FixedRow {
    /// Empty row of the default form size.
    pub fn new() -> Self { Self { pos: Vec2f::default(), size: vec2(128.0, 32.0), offsets: Vec::new(), children: Vec::new(), alignment: Align::NW.vector() } }

    /// Inserts a child at horizontal `offset`, keeping children ordered by offset.
    pub fn add(&mut self, offset: Real, form: impl IntoForm) -> &mut Self {
        let index = self.offsets.partition_point(|o| *o <= offset);
        self.offsets.insert(index, offset);
        self.children.insert(index, form.into_form());
        self
    }

    /// Removes every child.
    pub fn clear(&mut self) -> &mut Self {
        self.offsets.clear();
        self.children.clear();
        self
    }

    /// Sets the size explicitly.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.size = vec2(width, height);
        self
    }

    /// Shrinks the row to its last child and the tallest child.
    pub fn set_size_from_content(&mut self, cx: &LayoutCtx<'_>) -> &mut Self {
        let mut height: Real = 0.0;
        for child in &self.children {
            let mut child = child.borrow_mut();
            child.update_size(cx);
            height = height.max(child.size().y);
        }
        let width = match (self.offsets.last(), self.children.last()) {
            (Some(offset), Some(child)) => offset + child.borrow().size().x,
            _ => 0.0,
        };
        self.size = vec2(width, height);
        self
    }

    /// Alignment shared by every child inside its span.
    pub fn set_alignment(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        self.alignment = alignment.into();
        self
    }
}

impl Default for FixedRow {
    fn default() -> Self { Self::new() }
}

impl Form for FixedRow {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        for child in &self.children {
            child.borrow_mut().update_size(cx);
        }
    }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        let y1 = y + self.size.y;
        for (i, child) in self.children.iter().enumerate() {
            let x0 = x + self.offsets[i];
            let x1 = x + self.offsets.get(i + 1).copied().unwrap_or(self.size.x);
            let mut child = child.borrow_mut();
            let aligned = inside_bounds(child.size(), Bounds::new(x0, x1, y, y1), self.alignment);
            child.layout(cx, aligned.x, aligned.y);
        }
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { hit_children(&self.children, cx, x, y) }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> { scroll_box_in(&self.children, x, y) }

    fn for_each_child(&self, f: &mut dyn FnMut(&FormHandle)) { self.children.iter().for_each(f) }

    fn render(&self, canvas: &mut Canvas<'_>) { render_children(&self.children, canvas) }
}

type Placement = Box<dyn Fn() -> Vec2f>;

/// Children placed at offsets computed by caller-supplied closures.
///
/// Placements are evaluated once per frame during sizing. The size is the extent of the
/// bounding box of the placed children.
pub struct Manual {
    pos: Vec2f,
    size: Vec2f,
    children: Vec<FormHandle>,
    placements: Vec<Placement>,
    offsets: Vec<Vec2f>,
}

impl Manual {
    /// Empty layout.
    pub fn new() -> Self { Self { pos: Vec2f::default(), size: Vec2f::default(), children: Vec::new(), placements: Vec::new(), offsets: Vec::new() } }

    /// Adds a child whose offset from the layout origin is produced by `place`.
    pub fn add(&mut self, form: impl IntoForm, place: impl Fn() -> Vec2f + 'static) -> &mut Self {
        self.children.push(form.into_form());
        self.placements.push(Box::new(place));
        self
    }

    /// Adds a child whose offset is derived from the child itself.
    pub fn add_with<T: Form + 'static>(&mut self, form: Handle<T>, place: impl Fn(&T) -> Vec2f + 'static) -> &mut Self {
        let source = form.clone();
        self.add(form, move || source.with(|f| place(f)))
    }

    /// Removes every child.
    pub fn clear(&mut self) -> &mut Self {
        self.children.clear();
        self.placements.clear();
        self.offsets.clear();
        self
    }
}

impl Default for Manual {
    fn default() -> Self { Self::new() }
}

impl Form for Manual {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        self.offsets.clear();
        if self.children.is_empty() {
            self.size = vec2(0.0, 0.0);
            return;
        }
        let (mut x0, mut x1, mut y0, mut y1) = (Real::INFINITY, Real::NEG_INFINITY, Real::INFINITY, Real::NEG_INFINITY);
        for (child, place) in self.children.iter().zip(&self.placements) {
            let offset = place();
            let mut child = child.borrow_mut();
            child.update_size(cx);
            let size = child.size();
            x0 = x0.min(offset.x);
            x1 = x1.max(offset.x + size.x);
            y0 = y0.min(offset.y);
            y1 = y1.max(offset.y + size.y);
            self.offsets.push(offset);
        }
        self.size = vec2(x1 - x0, y1 - y0);
    }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        for (child, offset) in self.children.iter().zip(&self.offsets) {
            child.borrow_mut().layout(cx, x + offset.x, y + offset.y);
        }
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { hit_children(&self.children, cx, x, y) }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> { scroll_box_in(&self.children, x, y) }

    fn for_each_child(&self, f: &mut dyn FnMut(&FormHandle)) { self.children.iter().for_each(f) }

    fn render(&self, canvas: &mut Canvas<'_>) { render_children(&self.children, canvas) }
}

/// Shows one of several forms, chosen every frame by a selector closure.
pub struct Conditional {
    pos: Vec2f,
    size: Vec2f,
    forms: Vec<FormHandle>,
    selector: Box<dyn Fn() -> usize>,
    current: Option<FormHandle>,
}

impl Conditional {
    /// Shows `forms[selector()]`; an empty list shows nothing.
    pub fn new(forms: Vec<FormHandle>, selector: impl Fn() -> usize + 'static) -> Self {
        Self { pos: Vec2f::default(), size: Vec2f::default(), forms, selector: Box::new(selector), current: None }
    }

    /// Form chosen by the last sizing pass.
    pub fn current(&self) -> Option<&FormHandle> { self.current.as_ref() }
}

impl Form for Conditional {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        self.current = if self.forms.is_empty() {
            None
        } else {
            let index = (self.selector)();
            assert!(index < self.forms.len(), "conditional form index {index} is out of range for {} form(s)", self.forms.len());
            Some(self.forms[index].clone())
        };
        self.size = match &self.current {
            Some(form) => {
                let mut form = form.borrow_mut();
                form.update_size(cx);
                form.size()
            }
            None => vec2(0.0, 0.0),
        };
    }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        if let Some(form) = &self.current {
            form.borrow_mut().layout(cx, x, y);
        }
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { self.current.as_ref().and_then(|f| f.hit(cx, x, y)).map(Hit::Child) }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> { self.current.as_ref().and_then(|f| f.scroll_target(x, y)).map(Hit::Child) }

    fn for_each_child(&self, f: &mut dyn FnMut(&FormHandle)) { self.current.iter().for_each(f) }

    fn render(&self, canvas: &mut Canvas<'_>) {
        if let Some(form) = &self.current {
            form.borrow().render(canvas);
        }
    }
}

/// Wraps a form with padding and an optional fill and outline.
pub struct BorderForm {
    pos: Vec2f,
    size: Vec2f,
    content: FormHandle,
    padding: Real,
    fill: Option<Color>,
    border: Option<Color>,
}

impl BorderForm {
    /// Wraps `content` with no padding and no decoration.
    pub fn new(content: impl IntoForm) -> Self { Self { pos: Vec2f::default(), size: Vec2f::default(), content: content.into_form(), padding: 0.0, fill: None, border: None } }

    /// Space between the content and the outline; panics if negative.
    pub fn set_padding(&mut self, padding: Real) -> &mut Self {
        self.padding = enforce(non_negative("padding", padding));
        self
    }

    /// Fill color, or `None` for a transparent background.
    pub fn set_fill(&mut self, fill: Option<Color>) -> &mut Self {
        self.fill = fill;
        self
    }

    /// Outline color, or `None` for no outline.
    pub fn set_border(&mut self, border: Option<Color>) -> &mut Self {
        self.border = border;
        self
    }
}

impl Form for BorderForm {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        let mut content = self.content.borrow_mut();
        content.update_size(cx);
        let size = content.size();
        self.size = vec2(size.x + self.padding * 2.0, size.y + self.padding * 2.0);
    }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        self.content.borrow_mut().layout(cx, x + self.padding, y + self.padding);
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        self.content.hit(cx, x, y).map(Hit::Child)
    }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> { self.content.scroll_target(x, y).map(Hit::Child) }

    fn for_each_child(&self, f: &mut dyn FnMut(&FormHandle)) { f(&self.content) }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let bounds = self.bounds();
        if let Some(fill) = self.fill {
            canvas.set_color(fill);
            canvas.rect_filled(bounds);
        }
        if let Some(border) = self.border {
            canvas.set_color(border);
            canvas.rect(bounds);
        }
        self.content.borrow().render(canvas);
    }
}

/// Pannable surface. Children sit at fixed offsets from the map origin and move together when
/// the map is dragged with its pan button; two releases within the double-click time restore
/// the original view.
pub struct MapForm {
    pos: Vec2f,
    size: Vec2f,
    children: Vec<(FormHandle, Vec2f)>,
    pan: Vec2f,
    panning: bool,
    last_mouse: Vec2f,
    pan_button: MouseButton,
    border_size: Real,
    border_speed: Real,
    border_leeway: Real,
    double_click: Duration,
    last_release: Option<Instant>,
}

impl MapForm {
    /// Empty map of size zero, panned with the left button.
    pub fn new() -> Self {
        Self {
            pos: Vec2f::default(),
            size: Vec2f::default(),
            children: Vec::new(),
            pan: Vec2f::default(),
            panning: false,
            last_mouse: Vec2f::default(),
            pan_button: MouseButton::LEFT,
            border_size: 0.1,
            border_speed: 1.0,
            border_leeway: 0.1,
            double_click: Duration::from_millis(250),
            last_release: None,
        }
    }

    /// Visible area of the map; panics if negative.
    pub fn set_size(&mut self, width: Real, height: Real) -> &mut Self {
        self.size = vec2(enforce(non_negative("width", width)), enforce(non_negative("height", height)));
        self
    }

    /// Adds a child at `offset` from the unpanned map origin.
    pub fn add(&mut self, form: impl IntoForm, offset: Vec2f) -> &mut Self {
        self.children.push((form.into_form(), offset));
        self
    }

    /// Removes every child.
    pub fn clear(&mut self) -> &mut Self {
        self.children.clear();
        self
    }

    /// Button that drags the map.
    pub fn set_pan_button(&mut self, button: MouseButton) -> &mut Self {
        self.pan_button = button;
        self
    }

    /// Width of the edge band that pans in [`MapForm::border_pan_step`], as a fraction of the map size.
    pub fn set_border_size(&mut self, fraction: Real) -> &mut Self {
        self.border_size = enforce(non_negative("border size", fraction));
        self
    }

    /// Speed multiplier of edge panning.
    pub fn set_border_speed(&mut self, speed: Real) -> &mut Self {
        self.border_speed = speed;
        self
    }

    /// How far outside the map, as a fraction of the edge band, the pointer still pans.
    pub fn set_border_leeway(&mut self, fraction: Real) -> &mut Self {
        self.border_leeway = enforce(non_negative("border leeway", fraction));
        self
    }

    /// Longest gap between two releases that still counts as a double click.
    pub fn set_double_click_time(&mut self, time: Duration) -> &mut Self {
        self.double_click = time;
        self
    }

    /// Total pan applied since the last reset.
    pub fn pan_offset(&self) -> Vec2f { self.pan }

    /// Returns `true` while the pan button drags the map.
    pub fn is_panning(&self) -> bool { self.panning }

    /// Moves every child by `(dx, dy)`. Takes effect at the next layout.
    pub fn pan_by(&mut self, dx: Real, dy: Real) -> &mut Self {
        self.pan = vec2(self.pan.x + dx, self.pan.y + dy);
        self
    }

    /// Undoes all panning. Takes effect at the next layout.
    pub fn reset_pan(&mut self) -> &mut Self {
        self.pan = Vec2f::default();
        self
    }

    /// Pans toward the edge the pointer rests on, scaled by how deep into the edge band it is
    /// and by the elapsed time `dt` in seconds. Does nothing while dragging.
    pub fn border_pan_step(&mut self, mouse: Vec2f, dt: Real) {
        let band = vec2(self.size.x * self.border_size, self.size.y * self.border_size);
        if self.panning || band.x <= 0.0 || band.y <= 0.0 {
            return;
        }
        let step = |local: Real, extent: Real, band: Real, leeway: Real| {
            let from_far = extent - local;
            if from_far > -band * leeway && from_far < band {
                local - (extent - band)
            } else if local > -band * leeway && local < band {
                local - band
            } else {
                0.0
            }
        };
        let local = vec2(mouse.x - self.pos.x, mouse.y - self.pos.y);
        let scale = -self.border_speed * 300.0 * dt;
        let dx = step(local.x, self.size.x, band.x, self.border_leeway) / band.x * scale;
        let dy = step(local.y, self.size.y, band.y, self.border_leeway) / band.y * scale;
        self.pan_by(dx, dy);
    }

    fn place_children(&self, cx: &LayoutCtx<'_>) {
        for (child, offset) in &self.children {
            child.borrow_mut().layout(cx, self.pos.x + offset.x + self.pan.x, self.pos.y + offset.y + self.pan.y);
        }
    }
}

impl Default for MapForm {
    fn default() -> Self { Self::new() }
}

impl Form for MapForm {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        for (child, _) in &self.children {
            child.borrow_mut().update_size(cx);
        }
    }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        self.place_children(cx);
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> {
        if self.panning {
            self.pan_by(x - self.last_mouse.x, y - self.last_mouse.y);
            self.last_mouse = vec2(x, y);
            self.place_children(cx);
            return Some(Hit::Itself);
        }
        if !self.bounds().contains(x, y) {
            return None;
        }
        let hit = self.children.iter().find_map(|(child, _)| child.hit(cx, x, y));
        Some(hit.map_or(Hit::Itself, Hit::Child))
    }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        self.children.iter().find_map(|(child, _)| child.scroll_target(x, y)).map(Hit::Child)
    }

    fn activate(&mut self, ctx: &mut EventCtx<'_>, button: MouseButton) -> bool {
        if button != self.pan_button {
            return false;
        }
        self.panning = true;
        self.last_mouse = ctx.mouse();
        true
    }

    fn deactivate(&mut self, ctx: &mut EventCtx<'_>) {
        self.panning = false;
        let now = Instant::now();
        if self.last_release.is_some_and(|last| now.duration_since(last) < self.double_click) {
            self.reset_pan();
            self.place_children(ctx.layout());
        }
        self.last_release = Some(now);
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&FormHandle)) { self.children.iter().for_each(|(child, _)| f(child)) }

    fn render(&self, canvas: &mut Canvas<'_>) {
        canvas.clipped(self.bounds(), |canvas| {
            for (child, _) in &self.children {
                child.borrow().render(canvas);
            }
        });
    }
}

/// Replaces palette entries for everything its content draws.
pub struct ColorScope {
    pos: Vec2f,
    size: Vec2f,
    content: FormHandle,
    colors: [Option<Color>; ControlColor::Max as usize],
}

impl ColorScope {
    /// Wraps `content` without overriding anything.
    pub fn new(content: impl IntoForm) -> Self { Self { pos: Vec2f::default(), size: Vec2f::default(), content: content.into_form(), colors: [None; ControlColor::Max as usize] } }

    /// Draws `id` with `color` inside the scope.
    pub fn set_color(&mut self, id: ControlColor, color: Color) -> &mut Self {
        self.colors[id as usize] = Some(color);
        self
    }

    /// Goes back to the inherited color for `id`.
    pub fn clear_color(&mut self, id: ControlColor) -> &mut Self {
        self.colors[id as usize] = None;
        self
    }
}

impl Form for ColorScope {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        let mut content = self.content.borrow_mut();
        content.update_size(cx);
        self.size = content.size();
    }

    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) {
        self.pos = vec2(x, y);
        self.content.borrow_mut().layout(cx, x, y);
    }

    fn hover(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { self.content.hit(cx, x, y).map(Hit::Child) }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> { self.content.scroll_target(x, y).map(Hit::Child) }

    fn for_each_child(&self, f: &mut dyn FnMut(&FormHandle)) { f(&self.content) }

    fn render(&self, canvas: &mut Canvas<'_>) { canvas.with_colors(&self.colors, |canvas| self.content.borrow().render(canvas)) }
}
