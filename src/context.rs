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
use crate::form::Request;
use crate::*;
use std::time::{Duration, Instant};

const DEFAULT_CARET_BLINK_RATE: Duration = Duration::from_millis(530);

// The open drop-down and the form that opened it.
struct OpenDropDown {
    handle: Handle<DropDown>,
    opener: Option<Id>,
    // window holding the opener, if any
    owner: Option<Id>,
}

/// Primary entry point: owns the window stack and the interaction state, dispatches input
/// and drives the per-frame layout and render passes.
///
/// The host feeds pointer and keyboard events as they arrive, then calls [`Context::render`]
/// once per frame. Hit tests always run against the layout of the previous frame.
pub struct Context {
    style: Style,
    font: Box<dyn FontMetrics>,
    clipboard: Box<dyn Clipboard>,
    viewport: Vec2f,

    // bottom to top
    windows: Vec<WindowHandle>,
    background: Option<FormHandle>,
    drop_down: Option<OpenDropDown>,
    drop_down_hovered: bool,

    mouse: Vec2f,
    hovered_form: Option<FormHandle>,
    hovered_window: Option<WindowHandle>,
    hovered_scroll_box: Option<FormHandle>,
    active_form: Option<(FormHandle, MouseButton)>,
    active_window: Option<WindowHandle>,
    focused: Option<FormHandle>,
    cursor: CursorIcon,

    caret_blink_rate: Duration,
    caret_epoch: Instant,
}

impl Context {
    /// Creates a context measuring text with `font` over a viewport of the given size.
    pub fn new(font: impl FontMetrics + 'static, viewport: Vec2f) -> Self {
        Self {
            style: Style::default(),
            font: Box::new(font),
            clipboard: Box::new(MemoryClipboard::default()),
            viewport,
            windows: Vec::new(),
            background: None,
            drop_down: None,
            drop_down_hovered: false,
            mouse: Vec2f::default(),
            hovered_form: None,
            hovered_window: None,
            hovered_scroll_box: None,
            active_form: None,
            active_window: None,
            focused: None,
            cursor: CursorIcon::Default,
            caret_blink_rate: DEFAULT_CARET_BLINK_RATE,
            caret_epoch: Instant::now(),
        }
    }

    /// Current style.
    pub fn style(&self) -> &Style { &self.style }

    /// Replaces the current style.
    pub fn set_style(&mut self, style: Style) { self.style = style }

    /// Font metrics used for layout.
    pub fn font(&self) -> &dyn FontMetrics { &*self.font }

    /// Replaces the font metrics.
    pub fn set_font(&mut self, font: impl FontMetrics + 'static) { self.font = Box::new(font) }

    /// Installs the clipboard backend used by the text editors.
    pub fn set_clipboard(&mut self, clipboard: impl Clipboard + 'static) { self.clipboard = Box::new(clipboard) }

    /// Viewport size.
    pub fn viewport(&self) -> Vec2f { self.viewport }

    /// Changes the viewport size; windows are clamped into it on the next layout.
    pub fn set_viewport(&mut self, viewport: Vec2f) { self.viewport = viewport }

    /// Layout environment for sizing forms outside the frame passes.
    pub fn layout_ctx(&self) -> LayoutCtx<'_> { LayoutCtx::new(&*self.font, &self.style, self.viewport) }

    /// Form laid out at the origin behind every window, e.g. a HUD.
    pub fn set_background(&mut self, form: impl IntoForm) { self.background = Some(form.into_form()) }

    /// Removes the background form.
    pub fn clear_background(&mut self) {
        if let Some(background) = self.background.take() {
            self.forget(|form| background.contains(form.id()));
        }
    }

    /// Background form.
    pub fn background(&self) -> Option<&FormHandle> { self.background.as_ref() }

    // ---- window stack ----

    /// Visible windows from bottom to top.
    pub fn windows(&self) -> &[WindowHandle] { &self.windows }

    /// Topmost visible window.
    pub fn top_window(&self) -> Option<&WindowHandle> { self.windows.last() }

    /// Bottommost visible window.
    pub fn bottom_window(&self) -> Option<&WindowHandle> { self.windows.first() }

    fn stack_index(&self, window: &WindowHandle) -> Option<usize> { self.windows.iter().position(|w| w.ptr_eq(window)) }

    /// Window directly above `window`; `None` for the top window and hidden windows.
    pub fn above(&self, window: &WindowHandle) -> Option<&WindowHandle> { self.stack_index(window).and_then(|i| self.windows.get(i + 1)) }

    /// Window directly below `window`; `None` for the bottom window and hidden windows.
    pub fn below(&self, window: &WindowHandle) -> Option<&WindowHandle> { self.stack_index(window).and_then(|i| i.checked_sub(1)).and_then(|i| self.windows.get(i)) }

    /// Makes `window` visible on top of the stack. Showing a visible window raises it.
    pub fn show(&mut self, window: &WindowHandle) {
        if self.stack_index(window).is_some() {
            self.bring_to_front(window);
            return;
        }
        self.windows.push(window.clone());
        window.borrow_mut().set_visible(true);
        tracing::debug!(window = ?window.id(), "window shown");
    }

    /// Moves a visible window to the top of the stack.
    pub fn bring_to_front(&mut self, window: &WindowHandle) {
        let Some(index) = self.stack_index(window) else { return };
        if index + 1 == self.windows.len() {
            return;
        }
        let window = self.windows.remove(index);
        tracing::debug!(window = ?window.id(), "window raised");
        self.windows.push(window);
    }

    /// Removes `window` from the stack, releases every interaction state it holds and fires its
    /// close callback. Hidden windows are ignored.
    pub fn hide(&mut self, window: &WindowHandle) {
        if self.stack_index(window).is_none() {
            return;
        }

        if self.hovered_window.as_ref().is_some_and(|w| w.ptr_eq(window)) {
            self.hovered_window = None;
        }
        if let Some(active) = self.active_window.take_if(|w| w.ptr_eq(window)) {
            active.borrow_mut().deactivate();
        }
        let owns = |form: &FormHandle| window.borrow().contains(form.id());
        self.forget(owns);
        if self.drop_down.as_ref().is_some_and(|open| open.owner == Some(window.id())) {
            self.close_drop_down();
        }

        // releasing a capture may already have hidden it
        let Some(index) = self.stack_index(window) else { return };
        self.windows.remove(index);
        let mut w = window.borrow_mut();
        w.set_visible(false);
        tracing::debug!(window = ?window.id(), "window hidden");
        w.fire_close();
    }

    // Drops the hover, capture and focus records of forms matching `owns`.
    fn forget(&mut self, owns: impl Fn(&FormHandle) -> bool) {
        if self.hovered_form.as_ref().is_some_and(&owns) {
            self.hovered_form = None;
        }
        if self.hovered_scroll_box.as_ref().is_some_and(&owns) {
            self.hovered_scroll_box = None;
        }
        if let Some((form, _)) = self.active_form.take_if(|(form, _)| owns(form)) {
            self.dispatch(&form, |ctx| form.borrow_mut().deactivate(ctx));
        }
        if self.focused.as_ref().is_some_and(&owns) {
            self.focus(None);
        }
    }

    // ---- drop-down ----

    /// The open drop-down.
    pub fn drop_down(&self) -> Option<&Handle<DropDown>> { self.drop_down.as_ref().map(|open| &open.handle) }

    /// Opens `drop_down` with its bottom-left corner at `(x, y)`, replacing any open one.
    pub fn open_drop_down(&mut self, drop_down: &Handle<DropDown>, x: Real, y: Real) { self.open_drop_down_from(None, drop_down, x, y) }

    fn open_drop_down_from(&mut self, opener: Option<&FormHandle>, drop_down: &Handle<DropDown>, x: Real, y: Real) {
        if let Some(previous) = self.drop_down.take() {
            previous.handle.borrow_mut().set_open(false);
        }
        let owner = opener.and_then(|form| self.windows.iter().find(|w| w.borrow().contains(form.id()))).map(|w| w.id());
        {
            let cx = LayoutCtx::new(&*self.font, &self.style, self.viewport);
            let mut dd = drop_down.borrow_mut();
            dd.set_open(true);
            dd.layout(&cx, x, y);
        }
        tracing::debug!(x, y, "drop-down opened");
        self.drop_down = Some(OpenDropDown { handle: drop_down.clone(), opener: opener.map(|form| form.id()), owner });
        self.drop_down_hovered = false;
    }

    /// Closes the open drop-down, if any.
    pub fn close_drop_down(&mut self) {
        let Some(open) = self.drop_down.take() else { return };
        let dd = &open.handle;
        dd.borrow_mut().set_open(false);
        self.drop_down_hovered = false;
        if self.hovered_form.as_ref().is_some_and(|form| dd.borrow().contains(form.id())) {
            self.hovered_form = None;
        }
        if self.hovered_scroll_box.as_ref().is_some_and(|form| dd.borrow().contains(form.id())) {
            self.hovered_scroll_box = None;
        }
        tracing::debug!("drop-down closed");
    }

    fn is_drop_down_opener(&self, form: Option<&FormHandle>) -> bool {
        match (&self.drop_down, form) {
            (Some(open), Some(form)) => open.opener == Some(form.id()),
            _ => false,
        }
    }

    // ---- focus ----

    /// Gives keyboard focus to `form`, or clears it. The previous holder is defocused exactly
    /// once; focusing the current holder does nothing.
    pub fn focus(&mut self, form: Option<&FormHandle>) {
        let same = match (&self.focused, form) {
            (Some(current), Some(form)) => current.ptr_eq(form),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }
        if let Some(previous) = self.focused.clone() {
            self.dispatch(&previous, |ctx| {
                let mut previous = previous.borrow_mut();
                if let Some(focusable) = previous.as_focusable() {
                    focusable.defocus(ctx);
                }
            });
        }
        self.focused = form.cloned();
        tracing::debug!(form = ?form.map(|f| f.id()), "focus changed");
        self.reset_caret_blink();
    }

    /// Form holding keyboard focus.
    pub fn focused_form(&self) -> Option<&FormHandle> { self.focused.as_ref() }

    // ---- queries ----

    /// Form under the pointer.
    pub fn hovered_form(&self) -> Option<&FormHandle> { self.hovered_form.as_ref() }

    /// Window under the pointer.
    pub fn hovered_window(&self) -> Option<&WindowHandle> { self.hovered_window.as_ref() }

    /// Form capturing the pointer.
    pub fn active_form(&self) -> Option<&FormHandle> { self.active_form.as_ref().map(|(form, _)| form) }

    /// Window being moved or resized.
    pub fn active_window(&self) -> Option<&WindowHandle> { self.active_window.as_ref() }

    /// Returns `true` while the pointer is over a window, a form or the open drop-down, or while
    /// something captures it. Hosts use it to suppress their own pointer handling.
    pub fn is_any_active(&self) -> bool {
        self.is_capturing() || self.hovered_window.is_some() || self.hovered_form.is_some() || (self.drop_down.is_some() && self.drop_down_hovered)
    }

    fn is_capturing(&self) -> bool { self.active_form.is_some() || self.active_window.is_some() }

    /// Pointer shape for the hovered or captured entity.
    pub fn cursor(&self) -> CursorIcon { self.cursor }

    /// Last pointer position.
    pub fn mouse(&self) -> Vec2f { self.mouse }

    // ---- caret ----

    /// Half period of the caret blink; zero keeps the caret solid.
    pub fn set_caret_blink_rate(&mut self, rate: Duration) { self.caret_blink_rate = rate }

    /// Makes the caret solid now and restarts its blink cycle.
    pub fn reset_caret_blink(&mut self) { self.caret_epoch = Instant::now() }

    /// Blink phase of the caret.
    pub fn caret_visible(&self) -> bool {
        let rate = self.caret_blink_rate.as_nanos();
        if rate == 0 {
            return true;
        }
        self.caret_epoch.elapsed().as_nanos() % (rate * 2) < rate
    }

    // ---- dispatch ----

    // Runs `f` against `form`'s event environment, then applies what the form asked for.
    fn dispatch<R>(&mut self, form: &FormHandle, f: impl FnOnce(&mut EventCtx<'_>) -> R) -> R {
        let focused = self.focused.as_ref().is_some_and(|current| current.ptr_eq(form));
        let layout = LayoutCtx::new(&*self.font, &self.style, self.viewport);
        let mut ctx = EventCtx::new(layout, &mut *self.clipboard, focused, self.mouse);
        let result = f(&mut ctx);
        let (requests, reset) = ctx.finish();
        if reset {
            self.reset_caret_blink();
        }
        for request in requests {
            match request {
                Request::Focus => self.focus(Some(form)),
                Request::OpenDropDown { drop_down, x, y } => self.open_drop_down_from(Some(form), &drop_down, x, y),
                Request::CloseDropDown => self.close_drop_down(),
                Request::HideWindow(window) => self.hide(&window),
            }
        }
        result
    }

    fn dispatch_focused(&mut self, f: impl FnOnce(&mut dyn Focusable, &mut EventCtx<'_>)) {
        let Some(form) = self.focused.clone() else { return };
        self.dispatch(&form, |ctx| {
            let mut target = form.borrow_mut();
            if let Some(focusable) = target.as_focusable() {
                f(focusable, ctx);
            }
        });
    }

    /// Pointer moved to `(x, y)`. A captured form or window receives the move directly;
    /// otherwise the drop-down, the windows from the top down and the background are hit-tested
    /// in that order and the first hit wins.
    pub fn pointer_moved(&mut self, x: Real, y: Real) {
        self.mouse = vec2(x, y);
        if let Some((form, _)) = self.active_form.clone() {
            self.dispatch(&form, |ctx| form.borrow_mut().drag(ctx, x, y));
            self.cursor = form.borrow().cursor();
            return;
        }
        let cx = LayoutCtx::new(&*self.font, &self.style, self.viewport);

        if let Some(window) = &self.active_window {
            let mut window = window.borrow_mut();
            window.hover(&cx, x, y);
            self.cursor = window.cursor();
        } else {
            self.hovered_form = None;
            self.hovered_window = None;
            self.hovered_scroll_box = None;
            self.drop_down_hovered = false;

            if let Some(open) = &self.drop_down {
                let mut dd = open.handle.borrow_mut();
                if let Some(hit) = dd.hover(&cx, x, y) {
                    self.drop_down_hovered = true;
                    if let SurfaceHit::Form(form) = hit {
                        self.hovered_form = Some(form);
                    }
                    self.hovered_scroll_box = dd.find_scroll_box(x, y);
                }
            }

            if !self.drop_down_hovered {
                for window in self.windows.iter().rev() {
                    let mut w = window.borrow_mut();
                    if let Some(hit) = w.hover(&cx, x, y) {
                        if let SurfaceHit::Form(form) = hit {
                            self.hovered_form = Some(form);
                        }
                        self.hovered_scroll_box = w.find_scroll_box(x, y);
                        self.hovered_window = Some(window.clone());
                        break;
                    }
                }
            }

            if !self.drop_down_hovered && self.hovered_window.is_none() {
                if let Some(background) = &self.background {
                    self.hovered_form = background.hit(&cx, x, y);
                    self.hovered_scroll_box = background.scroll_target(x, y);
                }
            }

            self.cursor = match (&self.hovered_form, &self.hovered_window) {
                (Some(form), _) => form.borrow().cursor(),
                (None, Some(window)) => window.borrow().cursor(),
                (None, None) => CursorIcon::Default,
            };
        }

        if cx.caret_reset_requested() {
            self.reset_caret_blink();
        }
    }

    /// Pointer button transition at the last pointer position.
    ///
    /// A press closes the drop-down unless it lands on it or on its opener, raises the hovered
    /// window and activates the hovered form, or the window when no form is hovered. Focus is
    /// cleared first, so a focusable form pressed again loses and regains it. A release ends
    /// the capture started by the same button.
    pub fn pointer_button(&mut self, button: MouseButton, pressed: bool) {
        let (x, y) = (self.mouse.x, self.mouse.y);
        if pressed {
            if self.is_capturing() {
                return;
            }
            self.pointer_moved(x, y);
            self.focus(None);

            if self.drop_down.is_some() && !self.drop_down_hovered && !self.is_drop_down_opener(self.hovered_form.as_ref()) {
                self.close_drop_down();
            }

            if let Some(window) = self.hovered_window.clone() {
                self.bring_to_front(&window);
            }

            if let Some(form) = self.hovered_form.clone() {
                if self.dispatch(&form, |ctx| form.borrow_mut().activate(ctx, button)) {
                    tracing::trace!(form = ?form.id(), "form captured the pointer");
                    self.active_form = Some((form, button));
                    self.pointer_moved(x, y);
                }
            } else if let (true, Some(window)) = (button.is_left(), self.hovered_window.clone()) {
                if window.borrow_mut().activate() {
                    self.active_window = Some(window);
                    self.pointer_moved(x, y);
                }
            }
        } else if let Some((form, _)) = self.active_form.take_if(|(_, b)| *b == button) {
            self.dispatch(&form, |ctx| form.borrow_mut().deactivate(ctx));
            tracing::trace!(form = ?form.id(), "form released the pointer");
            self.pointer_moved(x, y);
        } else if button.is_left() {
            if let Some(window) = self.active_window.take() {
                let close = window.borrow_mut().deactivate();
                if close {
                    self.hide(&window);
                }
                self.pointer_moved(x, y);
            }
        }
    }

    /// Wheel movement, routed to the scroll box under the pointer.
    pub fn pointer_scroll(&mut self, dx: Real, dy: Real) {
        if self.drop_down.is_some() && !self.drop_down_hovered && !self.is_drop_down_opener(self.hovered_form.as_ref()) {
            self.close_drop_down();
        }
        if let Some(scroll_box) = self.hovered_scroll_box.clone() {
            let cx = LayoutCtx::new(&*self.font, &self.style, self.viewport);
            scroll_box.borrow_mut().scroll(&cx, dx, dy);
        }
        let (x, y) = (self.mouse.x, self.mouse.y);
        self.pointer_moved(x, y);
    }

    /// Typed character, delivered to the focused form.
    pub fn character(&mut self, ch: char) { self.dispatch_focused(|form, ctx| form.character(ctx, ch)) }

    /// Key transition, delivered to the focused form.
    pub fn key(&mut self, key: Key, action: KeyAction, mods: KeyMods) { self.dispatch_focused(|form, ctx| form.key(ctx, key, action, mods)) }

    // ---- frame ----

    /// Sizes and places the background, every visible window and the drop-down.
    pub fn layout(&mut self) {
        let cx = LayoutCtx::new(&*self.font, &self.style, self.viewport);
        if let Some(background) = &self.background {
            let mut background = background.borrow_mut();
            background.update_size(&cx);
            background.layout(&cx, 0.0, 0.0);
        }
        for window in &self.windows {
            window.borrow_mut().layout(&cx);
        }
        if let Some(open) = &self.drop_down {
            let mut dd = open.handle.borrow_mut();
            let pos = dd.pos();
            dd.layout(&cx, pos.x, pos.y);
        }
        if cx.caret_reset_requested() {
            self.reset_caret_blink();
        }
    }

    /// Runs the layout pass and draws the frame: background, windows bottom to top, then the
    /// drop-down.
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        self.layout();

        let frame = FrameState {
            hovered: self.hovered_form.as_ref().map(|form| form.id()),
            active: self.active_form.as_ref().map(|(form, _)| form.id()),
            focused: self.focused.as_ref().map(|form| form.id()),
            hovered_window: self.hovered_window.as_ref().map(|window| window.id()),
            active_window: self.active_window.as_ref().map(|window| window.id()),
            caret_visible: self.caret_visible(),
        };

        renderer.begin(self.viewport.x, self.viewport.y);
        {
            let mut canvas = Canvas::new(&mut *renderer, &*self.font, &self.style, frame);
            if let Some(background) = &self.background {
                background.borrow().render(&mut canvas);
            }
            for window in &self.windows {
                window.borrow().render(&mut canvas);
            }
            if let Some(open) = &self.drop_down {
                open.handle.borrow().render(&mut canvas);
            }
        }
        renderer.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, RecordingRenderer, VIEWPORT, fixed, mono};
    use approx::assert_relative_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn context() -> Context { Context::new(mono(), VIEWPORT) }

    fn window(x0: Real, x1: Real, y0: Real, y1: Real) -> WindowHandle {
        let window = WindowHandle::new(Window::new());
        window.borrow_mut().set_bounds(Bounds::new(x0, x1, y0, y1));
        window
    }

    fn chain_from_top(ctx: &Context) -> Vec<Id> {
        let mut ids = Vec::new();
        let mut current = ctx.top_window().cloned();
        while let Some(window) = current {
            ids.push(window.id());
            current = ctx.below(&window).cloned();
        }
        ids
    }

    fn click(ctx: &mut Context, x: Real, y: Real) {
        ctx.pointer_moved(x, y);
        ctx.pointer_button(MouseButton::LEFT, true);
        ctx.pointer_button(MouseButton::LEFT, false);
    }

    #[test]
    fn show_stacks_and_hide_unlinks() {
        let mut ctx = context();
        let (a, b, c) = (window(0.0, 10.0, 0.0, 10.0), window(0.0, 10.0, 0.0, 10.0), window(0.0, 10.0, 0.0, 10.0));
        let closed = Rc::new(Cell::new(0));
        let sink = closed.clone();
        b.borrow_mut().on_close(move |_| sink.set(sink.get() + 1));
        assert!(!a.borrow().is_visible());
        for w in [&a, &b, &c] {
            ctx.show(w);
        }
        assert!(ctx.top_window().is_some_and(|w| w.ptr_eq(&c)));
        assert!(ctx.bottom_window().is_some_and(|w| w.ptr_eq(&a)));
        assert_eq!(chain_from_top(&ctx), vec![c.id(), b.id(), a.id()]);

        ctx.hide(&b);
        assert_eq!(chain_from_top(&ctx), vec![c.id(), a.id()]);
        assert!(ctx.above(&b).is_none() && ctx.below(&b).is_none());
        assert!(!b.borrow().is_visible());
        assert_eq!(closed.get(), 1);
        ctx.hide(&b);
        assert_eq!(closed.get(), 1);

        ctx.show(&a);
        assert_eq!(chain_from_top(&ctx), vec![a.id(), c.id()]);
    }

    #[test]
    fn topmost_window_wins_and_press_raises() {
        let mut ctx = context();
        let a = window(0.0, 200.0, 0.0, 200.0);
        let b = window(100.0, 300.0, 0.0, 200.0);
        ctx.show(&a);
        ctx.show(&b);
        ctx.layout();

        ctx.pointer_moved(150.0, 50.0);
        assert!(ctx.hovered_window().is_some_and(|w| w.ptr_eq(&b)));
        click(&mut ctx, 150.0, 50.0);
        assert!(ctx.top_window().is_some_and(|w| w.ptr_eq(&b)));

        click(&mut ctx, 50.0, 50.0);
        assert!(ctx.top_window().is_some_and(|w| w.ptr_eq(&a)));
        ctx.pointer_moved(150.0, 50.0);
        assert!(ctx.hovered_window().is_some_and(|w| w.ptr_eq(&a)));
    }

    #[test]
    fn hovered_form_belongs_to_hovered_window() {
        let mut ctx = context();
        let button = Handle::new(Button::new("ok"));
        let w = window(100.0, 300.0, 100.0, 300.0);
        w.borrow_mut().set_content(button.clone());
        ctx.show(&w);
        ctx.layout();
        let b = button.borrow().bounds();

        for (x, y) in [(b.x0 + 1.0, b.y0 + 1.0), (150.0, 110.0), (700.0, 500.0), (b.x1 - 1.0, b.y1 - 1.0)] {
            ctx.pointer_moved(x, y);
            if let Some(form) = ctx.hovered_form() {
                let window = ctx.hovered_window().cloned();
                assert!(window.is_some_and(|w| w.borrow().contains(form.id())));
            }
        }
        ctx.pointer_moved(b.x0 + 1.0, b.y0 + 1.0);
        assert!(ctx.hovered_form().is_some_and(|f| f.ptr_eq(&button)));
        ctx.pointer_moved(700.0, 500.0);
        assert!(ctx.hovered_form().is_none() && ctx.hovered_window().is_none());
    }

    #[test]
    fn defocus_fires_once_per_change() {
        let mut ctx = context();
        let lost = Rc::new(Cell::new(0));
        let (a, b) = (Handle::new(TextField::new()), Handle::new(TextField::new()));
        let sink = lost.clone();
        a.borrow_mut().on_lose_focus(move |_, _| sink.set(sink.get() + 1));
        let (a, b) = (a.to_form(), b.to_form());

        ctx.focus(Some(&a));
        ctx.focus(Some(&a));
        assert_eq!(lost.get(), 0);
        ctx.focus(Some(&b));
        assert_eq!(lost.get(), 1);
        ctx.focus(Some(&b));
        ctx.focus(None);
        assert_eq!(lost.get(), 1);
        assert!(ctx.focused_form().is_none());
    }

    #[test]
    fn clicked_text_field_takes_keyboard_input() {
        let mut ctx = context();
        let field = Handle::new(TextField::new());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        field.borrow_mut().on_focus(move |_, _| sink.borrow_mut().push("focus"));
        let sink = events.clone();
        field.borrow_mut().on_lose_focus(move |_, _| sink.borrow_mut().push("lose"));
        let w = window(100.0, 300.0, 100.0, 300.0);
        w.borrow_mut().set_content(field.clone());
        ctx.show(&w);
        ctx.layout();

        ctx.character('a');
        assert_eq!(field.borrow().text(), "");

        let b = field.borrow().bounds();
        click(&mut ctx, b.x0 + 5.0, b.y0 + 5.0);
        assert!(ctx.focused_form().is_some_and(|f| f.ptr_eq(&field)));
        for ch in "hello".chars() {
            ctx.character(ch);
        }
        for _ in 0..3 {
            ctx.key(Key::Left, KeyAction::Press, KeyMods::NONE);
        }
        ctx.character('X');
        assert_eq!(field.borrow().text(), "heXllo");
        assert_eq!(field.borrow().caret(), 3);

        assert_eq!(*events.borrow(), ["focus"]);

        // pressing the focused field commits it and focuses it again
        click(&mut ctx, b.x0 + 5.0, b.y0 + 5.0);
        assert_eq!(*events.borrow(), ["focus", "lose", "focus"]);
        assert!(ctx.focused_form().is_some_and(|f| f.ptr_eq(&field)));
        assert_eq!(field.borrow().text(), "heXllo");

        click(&mut ctx, 700.0, 500.0);
        assert!(ctx.focused_form().is_none());
        assert_eq!(*events.borrow(), ["focus", "lose", "focus", "lose"]);
    }

    #[test]
    fn button_click_goes_through_the_window() {
        let mut ctx = context();
        let clicks = Rc::new(Cell::new(0));
        let sink = clicks.clone();
        let button = Handle::new(Button::new("ok"));
        button.borrow_mut().on_click(move |_, _| sink.set(sink.get() + 1));
        let w = window(100.0, 300.0, 100.0, 300.0);
        w.borrow_mut().set_content(button.clone());
        ctx.show(&w);
        ctx.layout();
        let b = button.borrow().bounds();
        click(&mut ctx, b.x0 + 2.0, b.y0 + 2.0);
        assert_eq!(clicks.get(), 1);
        assert!(ctx.active_form().is_none());
    }

    fn combo_window(ctx: &mut Context) -> (Handle<ComboBox>, WindowHandle) {
        let combo = Handle::new(ComboBox::new());
        combo.borrow_mut().set_options(["a", "b"]);
        let w = window(100.0, 400.0, 200.0, 500.0);
        w.borrow_mut().set_content(combo.clone());
        ctx.show(&w);
        ctx.layout();
        (combo, w)
    }

    #[test]
    fn outside_click_closes_the_drop_down_without_selecting() {
        let mut ctx = context();
        let (combo, _) = combo_window(&mut ctx);
        let b = combo.borrow().bounds();
        click(&mut ctx, b.x0 + 4.0, b.y0 + 4.0);
        assert!(ctx.drop_down().is_some_and(|d| d.ptr_eq(combo.borrow().drop_down())));
        assert!(combo.borrow().drop_down().borrow().is_open());

        click(&mut ctx, 700.0, 100.0);
        assert!(ctx.drop_down().is_none());
        assert!(!combo.borrow().drop_down().borrow().is_open());
        assert_eq!(combo.borrow().selection(), 0);
    }

    #[test]
    fn picking_from_the_open_list_selects() {
        let mut ctx = context();
        let (combo, _) = combo_window(&mut ctx);
        let b = combo.borrow().bounds();
        click(&mut ctx, b.x0 + 4.0, b.y0 + 4.0);
        let list = combo.borrow().drop_down().borrow().bounds();
        // rows are 16 px tall, 10 px apart, 5 px below the list top
        ctx.pointer_moved(list.x0 + 4.0, list.y1 - 39.0);
        assert!(ctx.hovered_form().is_some());
        ctx.pointer_button(MouseButton::LEFT, true);
        ctx.pointer_button(MouseButton::LEFT, false);
        assert_eq!(combo.borrow().selection(), 1);
        assert!(ctx.drop_down().is_none());
    }

    #[test]
    fn hiding_the_owner_closes_its_drop_down() {
        let mut ctx = context();
        let (combo, w) = combo_window(&mut ctx);
        let b = combo.borrow().bounds();
        click(&mut ctx, b.x0 + 4.0, b.y0 + 4.0);
        assert!(ctx.drop_down().is_some());
        ctx.hide(&w);
        assert!(ctx.drop_down().is_none());
    }

    fn long_combo_window(ctx: &mut Context) -> (Handle<ComboBox>, WindowHandle) {
        let combo = Handle::new(ComboBox::new());
        combo.borrow_mut().set_options((0..12).map(|i| format!("option {i}")));
        let w = window(100.0, 400.0, 200.0, 500.0);
        w.borrow_mut().set_content(combo.clone());
        ctx.show(&w);
        ctx.layout();
        (combo, w)
    }

    #[test]
    fn wheel_over_the_opener_scrolls_the_open_list() {
        let mut ctx = context();
        let (combo, _) = long_combo_window(&mut ctx);
        let b = combo.borrow().bounds();
        click(&mut ctx, b.x0 + 4.0, b.y0 + 4.0);
        let list = combo.borrow().drop_down().borrow().bounds();
        ctx.pointer_moved(list.x0 + 4.0, list.y1 - 39.0);
        let before = ctx.hovered_form().map(|f| f.id());
        assert!(before.is_some());

        ctx.pointer_moved(b.x0 + 4.0, b.y0 + 4.0);
        ctx.pointer_scroll(0.0, -1.0);
        assert!(ctx.drop_down().is_some());

        ctx.pointer_moved(list.x0 + 4.0, list.y1 - 39.0);
        let after = ctx.hovered_form().map(|f| f.id());
        assert!(after.is_some());
        assert_ne!(before, after);
    }

    #[test]
    fn wheel_elsewhere_dismisses_the_drop_down() {
        let mut ctx = context();
        let (combo, _) = long_combo_window(&mut ctx);
        let b = combo.borrow().bounds();
        click(&mut ctx, b.x0 + 4.0, b.y0 + 4.0);
        assert!(ctx.drop_down().is_some());

        // inside the owner window, but neither on the list nor on the combo box
        ctx.pointer_moved(390.0, 210.0);
        ctx.pointer_scroll(0.0, -1.0);
        assert!(ctx.drop_down().is_none());
        assert!(!combo.borrow().drop_down().borrow().is_open());

        click(&mut ctx, b.x0 + 4.0, b.y0 + 4.0);
        ctx.pointer_moved(700.0, 100.0);
        ctx.pointer_scroll(0.0, 1.0);
        assert!(ctx.drop_down().is_none());
    }

    #[test]
    fn open_drop_down_hides_the_windows_beneath_it() {
        let mut ctx = context();
        let (combo, w) = combo_window(&mut ctx);
        let b = combo.borrow().bounds();
        click(&mut ctx, b.x0 + 4.0, b.y0 + 4.0);
        let list = combo.borrow().drop_down().borrow().bounds();
        let (x, y) = (list.x0 + 2.0, list.y1 - 2.0);
        assert!(w.borrow().bounds().contains(x, y));

        ctx.pointer_moved(x, y);
        assert!(ctx.hovered_window().is_none());
        assert!(ctx.hovered_form().is_none_or(|f| !w.borrow().contains(f.id())));
        assert!(ctx.is_any_active());
    }

    #[test]
    fn resize_edges_do_not_reach_past_the_window() {
        let mut ctx = context();
        let a = window(100.0, 200.0, 398.0, 600.0);
        let b = window(300.0, 500.0, 300.0, 500.0);
        a.borrow_mut().set_resizable(true);
        ctx.show(&b);
        ctx.show(&a);

        // level with the bottom edge of `a`, but inside `b`
        ctx.pointer_moved(400.0, 400.0);
        assert!(ctx.hovered_window().is_some_and(|w| w.ptr_eq(&b)));
        ctx.pointer_button(MouseButton::LEFT, true);
        ctx.pointer_moved(400.0, 300.0);
        ctx.pointer_button(MouseButton::LEFT, false);
        assert_eq!(a.borrow().bounds(), Bounds::new(100.0, 200.0, 398.0, 600.0));
        assert!(ctx.top_window().is_some_and(|w| w.ptr_eq(&b)));

        // level with the right edge of `a`, far below it
        ctx.pointer_moved(201.0, 100.0);
        assert!(ctx.hovered_window().is_none());
        assert_eq!(ctx.cursor(), CursorIcon::Default);

        ctx.pointer_moved(201.0, 450.0);
        assert!(ctx.hovered_window().is_some_and(|w| w.ptr_eq(&a)));
        assert_eq!(ctx.cursor(), CursorIcon::HResize);
    }

    #[test]
    fn any_active_covers_hover_and_capture() {
        let mut ctx = context();
        let w = window(100.0, 300.0, 100.0, 300.0);
        ctx.show(&w);
        ctx.layout();
        assert!(!ctx.is_any_active());

        ctx.pointer_moved(200.0, 200.0);
        assert!(ctx.is_any_active());
        ctx.pointer_moved(700.0, 500.0);
        assert!(!ctx.is_any_active());

        // title drag keeps the UI active even when the pointer outruns the window
        ctx.pointer_moved(150.0, 290.0);
        ctx.pointer_button(MouseButton::LEFT, true);
        ctx.pointer_moved(150.0, 290.0);
        assert!(ctx.is_any_active());
        ctx.pointer_button(MouseButton::LEFT, false);
        ctx.pointer_moved(700.0, 500.0);
        assert!(!ctx.is_any_active());
    }

    #[test]
    fn close_button_hides_only_on_release_over_it() {
        let mut ctx = context();
        let w = window(100.0, 300.0, 100.0, 300.0);
        let closed = Rc::new(Cell::new(false));
        let sink = closed.clone();
        w.borrow_mut().on_close(move |_| sink.set(true));
        ctx.show(&w);
        ctx.layout();

        ctx.pointer_moved(285.0, 285.0);
        ctx.pointer_button(MouseButton::LEFT, true);
        assert!(ctx.active_window().is_some_and(|a| a.ptr_eq(&w)));
        ctx.pointer_moved(200.0, 200.0);
        ctx.pointer_button(MouseButton::LEFT, false);
        assert!(w.borrow().is_visible());
        assert!(!closed.get());

        click(&mut ctx, 285.0, 285.0);
        assert!(!w.borrow().is_visible());
        assert!(closed.get());
        assert!(ctx.top_window().is_none());
        assert!(ctx.hovered_window().is_none());
    }

    #[test]
    fn title_drag_moves_the_window() {
        let mut ctx = context();
        let w = window(100.0, 300.0, 100.0, 300.0);
        ctx.show(&w);
        ctx.layout();
        ctx.pointer_moved(150.0, 290.0);
        ctx.pointer_button(MouseButton::LEFT, true);
        assert!(ctx.active_window().is_some_and(|a| a.ptr_eq(&w)));
        ctx.pointer_moved(200.0, 250.0);
        ctx.pointer_button(MouseButton::LEFT, false);
        assert!(ctx.active_window().is_none());
        let b = w.borrow().bounds();
        assert_relative_eq!(b.x0, 150.0);
        assert_relative_eq!(b.y1, 260.0);
    }

    #[test]
    fn wheel_scrolls_the_box_under_the_pointer() {
        let mut ctx = context();
        let scroll = Handle::new(ScrollBox::new());
        scroll.borrow_mut().set_content(fixed(50.0, 400.0)).set_size(100.0, 100.0);
        let w = window(100.0, 300.0, 100.0, 300.0);
        w.borrow_mut().set_content(scroll.clone());
        ctx.show(&w);
        ctx.layout();
        let b = scroll.borrow().bounds();
        ctx.pointer_moved(b.x0 + 10.0, b.y0 + 10.0);
        ctx.pointer_scroll(0.0, -1.0);
        assert_relative_eq!(scroll.borrow().scroll_y(), 53.0);
        ctx.pointer_scroll(0.0, 10.0);
        assert_relative_eq!(scroll.borrow().scroll_y(), 0.0);
    }

    #[test]
    fn layout_sizes_are_non_negative_and_positions_come_from_the_parent() {
        let mut ctx = context();
        let rows = Handle::new(Rows::new());
        let (a, b) = (fixed(40.0, 20.0), fixed(60.0, 10.0));
        rows.borrow_mut().add(a.clone()).add(b.clone());
        let w = window(100.0, 300.0, 100.0, 300.0);
        w.borrow_mut().set_content(rows.clone());
        ctx.show(&w);
        ctx.layout();
        for form in [rows.to_form(), a.to_form(), b.to_form()] {
            let size = form.borrow().size();
            assert!(size.x >= 0.0 && size.y >= 0.0);
        }
        let top = rows.borrow().bounds().y1;
        assert_relative_eq!(a.borrow().bounds().y1, top);
        assert_relative_eq!(a.borrow().pos().x, 110.0);
        assert_relative_eq!(b.borrow().bounds().y1, top - 20.0 - 10.0);
    }

    #[test]
    fn caret_blink_follows_the_rate() {
        let mut ctx = context();
        ctx.set_caret_blink_rate(Duration::ZERO);
        assert!(ctx.caret_visible());
        ctx.set_caret_blink_rate(Duration::from_secs(3600));
        ctx.reset_caret_blink();
        assert!(ctx.caret_visible());
    }

    #[test]
    fn render_draws_windows_bottom_to_top() {
        let mut ctx = context();
        let (a, b) = (window(0.0, 100.0, 0.0, 100.0), window(50.0, 150.0, 0.0, 100.0));
        a.borrow_mut().set_title("first");
        b.borrow_mut().set_title("second");
        ctx.show(&a);
        ctx.show(&b);
        let mut renderer = RecordingRenderer::default();
        ctx.render(&mut renderer);
        assert_eq!(renderer.ops.first(), Some(&DrawOp::Begin(800.0, 600.0)));
        assert_eq!(renderer.ops.last(), Some(&DrawOp::End));
        assert_eq!(renderer.texts(), vec!["first".to_string(), "second".to_string()]);
    }
}
