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
use std::cell::RefCell;
use std::rc::Rc;

const ICON_WIDTH: Real = 0.40;
const ICON_HEIGHT: Real = 0.20;

type SelectCallback = Box<dyn FnMut(&mut EventCtx<'_>, usize, &str)>;

// State shared between the summary box and its option rows, which live inside the drop-down.
struct ComboState {
    options: Vec<String>,
    selection: usize,
    // horizontal extent of the open drop-down; option rows are hit across all of it
    span: (Real, Real),
    on_select: Option<SelectCallback>,
}

/// Picks one of several options through a drop-down list.
///
/// The summary box shows the selected option. Pressing it opens a [`DropDown`] below it
/// holding a [`ScrollBox`] of option rows; pressing a row selects it, fires the callback if
/// the selection changed and closes the list.
pub struct ComboBox {
    pos: Vec2f,
    size: Vec2f,
    state: Rc<RefCell<ComboState>>,
    drop_down: Handle<DropDown>,
    scroll: Handle<ScrollBox>,
    rows: Handle<Rows>,
    width: Option<Real>,
    alignment: Vec2f,
    drop_down_height: Real,
    padding: Real,
}

impl ComboBox {
    /// Empty combo box.
    pub fn new() -> Self {
        let rows = Handle::new(Rows::new());
        let scroll = Handle::new(ScrollBox::new());
        let half_spacing = rows.borrow().spacing() * 0.5;
        scroll.borrow_mut().set_content(rows.clone()).set_padding(half_spacing);
        let drop_down = Handle::new(DropDown::new());
        drop_down.borrow_mut().set_content(scroll.clone()).set_padding(0.0);
        Self {
            pos: Vec2f::default(),
            size: vec2(128.0, 32.0),
            state: Rc::new(RefCell::new(ComboState { options: Vec::new(), selection: 0, span: (0.0, 0.0), on_select: None })),
            drop_down,
            scroll,
            rows,
            width: None,
            alignment: Align::W.vector(),
            drop_down_height: 128.0,
            padding: 3.0,
        }
    }

    /// Index of the selected option; 0 when there are no options.
    pub fn selection(&self) -> usize { self.state.borrow().selection }

    /// Text of the selected option, or `None` when there are no options.
    pub fn selection_text(&self) -> Option<String> {
        let state = self.state.borrow();
        state.options.get(state.selection).cloned()
    }

    /// Number of options.
    pub fn option_count(&self) -> usize { self.state.borrow().options.len() }

    /// Selects option `index` without firing the callback. Ignored when there are no options;
    /// panics if out of range otherwise.
    pub fn set_selection(&mut self, index: usize) -> &mut Self { enforce(self.try_set_selection(index)) }

    /// Selects option `index`; rejects out-of-range indices when options exist.
    pub fn try_set_selection(&mut self, index: usize) -> Result<&mut Self, UiError> {
        {
            let mut state = self.state.borrow_mut();
            let len = state.options.len();
            if len > 0 {
                if index >= len {
                    return Err(UiError::SelectionOutOfRange { index, len });
                }
                state.selection = index;
            }
        }
        Ok(self)
    }

    /// Appends an option.
    pub fn add_option(&mut self, option: impl Into<String>) -> &mut Self {
        let text = option.into();
        let index = {
            let mut state = self.state.borrow_mut();
            state.options.push(text.clone());
            state.options.len() - 1
        };
        let half_spacing = self.rows.borrow().spacing() * 0.5;
        let row = Handle::new(OptionRow { pos: Vec2f::default(), size: Vec2f::default(), index, text, half_spacing, state: self.state.clone() });
        self.rows.borrow_mut().add_aligned(row, self.alignment);
        self
    }

    /// Replaces all options and resets the selection to the first one.
    pub fn set_options<S: Into<String>>(&mut self, options: impl IntoIterator<Item = S>) -> &mut Self {
        self.clear();
        for option in options {
            self.add_option(option);
        }
        self
    }

    /// Removes all options.
    pub fn clear(&mut self) -> &mut Self {
        {
            let mut state = self.state.borrow_mut();
            state.options.clear();
            state.selection = 0;
        }
        self.rows.borrow_mut().clear();
        self
    }

    /// Maximum height of the open list.
    pub fn set_drop_down_height(&mut self, height: Real) -> &mut Self {
        self.drop_down_height = enforce(non_negative("drop-down height", height));
        self
    }

    /// Alignment of the summary text and of every option row.
    pub fn set_alignment(&mut self, alignment: impl Into<Vec2f>) -> &mut Self {
        self.alignment = alignment.into();
        self.rows.borrow_mut().set_all_alignments(self.alignment);
        self
    }

    /// Space around the summary text; panics if negative.
    pub fn set_padding(&mut self, padding: Real) -> &mut Self {
        self.padding = enforce(non_negative("padding", padding));
        self
    }

    /// Fixed width; the list is as wide as the summary box.
    pub fn set_width(&mut self, width: Real) -> &mut Self {
        self.width = Some(width);
        self
    }

    /// Sizes the summary box to the widest option.
    pub fn set_size_from_content(&mut self) -> &mut Self {
        self.width = None;
        self
    }

    /// Callback fired with the new index and text when a row changes the selection.
    pub fn on_select(&mut self, f: impl FnMut(&mut EventCtx<'_>, usize, &str) + 'static) -> &mut Self {
        self.state.borrow_mut().on_select = Some(Box::new(f));
        self
    }

    /// The list overlay.
    pub fn drop_down(&self) -> &Handle<DropDown> { &self.drop_down }
}

impl Default for ComboBox {
    fn default() -> Self { Self::new() }
}

impl Form for ComboBox {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) {
        let height = cx.font().height() + self.padding * 2.0;
        let scrollbar_width = cx.style().scrollbar_width;
        self.rows.borrow_mut().update_size(cx);
        {
            let mut scroll = self.scroll.borrow_mut();
            scroll.set_size_from_content(cx, self.drop_down_height);
            if let Some(width) = self.width {
                scroll.set_width(width - height + scrollbar_width);
            }
        }
        let list = self.drop_down.borrow_mut().set_size_from_content(cx).size();
        let width = self.width.unwrap_or(list.x + height - scrollbar_width);
        self.size = vec2(width, height);
    }

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }

    fn hover(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { hit_self(self.bounds(), x, y) }

    fn find_scroll_box(&self, x: Real, y: Real) -> Option<Hit> {
        if !self.drop_down.borrow().is_open() || !self.bounds().contains(x, y) {
            return None;
        }
        Some(Hit::Child(self.scroll.to_form()))
    }

    fn activate(&mut self, ctx: &mut EventCtx<'_>, button: MouseButton) -> bool {
        if !button.is_left() {
            return false;
        }
        let list = self.drop_down.borrow().size();
        self.state.borrow_mut().span = (self.pos.x, self.pos.x + list.x);
        ctx.open_drop_down(&self.drop_down, self.pos.x, self.pos.y - list.y);
        false
    }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let bounds = self.bounds();
        let height = self.size.y;
        let hovered = canvas.is_hovered(self);
        canvas.panel(bounds, ControlColor::WindowBG, ControlColor::Outline.hover_if(hovered));

        let icon_w = height * ICON_WIDTH;
        let icon_x1 = bounds.x1 - (height - icon_w) * 0.5;
        let icon_x0 = icon_x1 - icon_w;
        let icon_h = height * ICON_HEIGHT;
        let icon_y0 = bounds.y0 + (height - icon_h) * 0.5;
        let icon_y1 = icon_y0 + icon_h;
        canvas.line(bounds.x1 - height, bounds.y0, bounds.x1 - height, bounds.y1);
        canvas.triangle_filled(icon_x0, icon_y1, icon_x1 - icon_w * 0.5, icon_y0, icon_x1, icon_y1);

        if let Some(text) = self.selection_text() {
            let label = Bounds::new(bounds.x0, bounds.x1 - height, bounds.y0, bounds.y1);
            draw_label(canvas, &text, label, self.padding, self.alignment);
        }
    }
}

// One entry of the open list.
struct OptionRow {
    pos: Vec2f,
    size: Vec2f,
    index: usize,
    text: String,
    half_spacing: Real,
    state: Rc<RefCell<ComboState>>,
}

impl OptionRow {
    fn hit_area(&self) -> Bounds {
        let (x0, x1) = self.state.borrow().span;
        Bounds::new(x0, x1, self.pos.y - self.half_spacing, self.pos.y + self.size.y + self.half_spacing)
    }
}

impl Form for OptionRow {
    form_geometry!();

    fn update_size(&mut self, cx: &LayoutCtx<'_>) { self.size = cx.font().size(&self.text) }

    fn layout(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) { self.pos = vec2(x, y) }

    fn hover(&mut self, _cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<Hit> { hit_self(self.hit_area(), x, y) }

    fn activate(&mut self, ctx: &mut EventCtx<'_>, button: MouseButton) -> bool {
        if !button.is_left() {
            return false;
        }
        let callback = {
            let mut state = self.state.borrow_mut();
            if state.selection == self.index {
                None
            } else {
                state.selection = self.index;
                Some(state.on_select.take())
            }
        };
        if let Some(Some(mut callback)) = callback {
            callback(&mut *ctx, self.index, &self.text);
            let mut state = self.state.borrow_mut();
            if state.on_select.is_none() {
                state.on_select = Some(callback);
            }
        }
        tracing::debug!(index = self.index, "combo box option picked");
        ctx.close_drop_down();
        false
    }

    fn render(&self, canvas: &mut Canvas<'_>) {
        let hovered = canvas.is_hovered(self);
        if hovered {
            canvas.set_control_color(ControlColor::Selection);
            canvas.rect_filled(self.hit_area());
        }
        canvas.set_control_color(ControlColor::Outline.hover_if(hovered));
        canvas.text(&self.text, self.pos.x, self.pos.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, mono};
    use approx::assert_relative_eq;
    use std::cell::Cell;

    fn combo(options: &[&str]) -> Handle<ComboBox> {
        let combo = Handle::new(ComboBox::new());
        combo.borrow_mut().set_options(options.iter().copied());
        let font = mono();
        let style = Style::default();
        let cx = LayoutCtx::new(&font, &style, vec2(800.0, 600.0));
        combo.borrow_mut().update_size(&cx);
        combo.borrow_mut().layout(&cx, 100.0, 300.0);
        combo
    }

    #[test]
    fn empty_list_has_no_selection_text() {
        let combo = combo(&[]);
        let mut c = combo.borrow_mut();
        assert_eq!(c.selection_text(), None);
        c.set_selection(5);
        assert_eq!(c.selection(), 0);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let combo = combo(&["a", "b"]);
        let mut c = combo.borrow_mut();
        assert!(matches!(c.try_set_selection(2), Err(UiError::SelectionOutOfRange { index: 2, len: 2 })));
        c.set_selection(1);
        assert_eq!(c.selection_text().as_deref(), Some("b"));
    }

    #[test]
    #[should_panic]
    fn out_of_range_selection_panics() { combo(&["a"]).borrow_mut().set_selection(1); }

    #[test]
    fn sizes_from_the_widest_option() {
        let combo = combo(&["short", "much longer"]);
        let c = combo.borrow();
        // font 16 + padding 3 * 2
        assert_relative_eq!(c.size().y, 22.0);
        // rows (88) + scroll padding (5 * 2) + scrollbar (20), plus the arrow box minus the scrollbar
        assert_relative_eq!(c.size().x, 88.0 + 10.0 + 20.0 + 22.0 - 20.0);
    }

    #[test]
    fn press_requests_the_list_below_the_box() {
        let combo = combo(&["a", "b", "c"]);
        let mut harness = Harness::new();
        assert!(!harness.activate(&combo.to_form(), MouseButton::LEFT));
        let list = combo.borrow().drop_down().borrow().size();
        let opened = harness.opened_drop_down().map(|(d, x, y)| (d.ptr_eq(combo.borrow().drop_down()), x, y));
        assert_eq!(opened, Some((true, 100.0, 300.0 - list.y)));
    }

    #[test]
    fn picking_a_row_selects_and_closes() {
        let combo = combo(&["a", "b"]);
        let picked = Rc::new(Cell::new(None));
        let sink = picked.clone();
        combo.borrow_mut().on_select(move |_, index, text| sink.set(Some((index, text.to_string()))));
        let rows: Vec<FormHandle> = {
            let c = combo.borrow();
            let rows = c.rows.borrow();
            let mut out = Vec::new();
            rows.for_each_child(&mut |row| out.push(row.clone()));
            out
        };
        let mut harness = Harness::new();
        assert!(!harness.activate(&rows[1], MouseButton::LEFT));
        assert!(harness.closed_drop_down());
        assert_eq!(combo.borrow().selection(), 1);
        assert_eq!(picked.take(), Some((1, "b".to_string())));

        // picking the current option closes without firing
        harness.activate(&rows[1], MouseButton::LEFT);
        assert!(harness.closed_drop_down());
        assert_eq!(picked.take(), None);
    }

    #[test]
    fn scroll_box_is_only_reported_while_open() {
        let combo = combo(&["a"]);
        let c = combo.borrow();
        assert!(c.find_scroll_box(101.0, 301.0).is_none());
        c.drop_down().borrow_mut().set_open(true);
        assert!(c.find_scroll_box(101.0, 301.0).is_some());
    }
}
