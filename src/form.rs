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
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

/// Shared, interior-mutable handle to a node of the UI tree.
///
/// Containers hold handles to their children and the host keeps clones of the handles it
/// wants to query or mutate between frames. Equality is pointer identity.
pub struct Handle<T: ?Sized>(Rc<RefCell<T>>);

// derive(Clone) would require T: Clone
impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Handle<T> {
    /// Moves `value` into a new handle.
    pub fn new(value: T) -> Self { Self(Rc::new(RefCell::new(value))) }
}

impl<T: ?Sized> Handle<T> {
    /// Immutable borrow of the node.
    pub fn borrow(&self) -> Ref<'_, T> { self.0.borrow() }

    /// Mutable borrow of the node.
    pub fn borrow_mut(&self) -> RefMut<'_, T> { self.0.borrow_mut() }

    /// Runs `f` with an immutable borrow of the node.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R { f(&self.0.borrow()) }

    /// Runs `f` with a mutable borrow of the node.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R { f(&mut self.0.borrow_mut()) }

    /// Pointer identity of the node; matches `Id::from_ptr(self)` inside its methods.
    pub fn id(&self) -> Id { Id::from_raw(self.0.as_ptr()) }

    /// Returns `true` if both handles point at the same node.
    pub fn ptr_eq<U: ?Sized>(&self, other: &Handle<U>) -> bool { self.id() == other.id() }
}

impl<T: ?Sized> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Handle({:#x})", self.id().raw()) }
}

/// Type-erased handle to any form.
pub type FormHandle = Handle<dyn Form>;

impl<T: Form + 'static> Handle<T> {
    /// Type-erased clone of this handle, as stored by containers.
    pub fn to_form(&self) -> FormHandle {
        let rc: Rc<RefCell<dyn Form>> = self.0.clone();
        Handle(rc)
    }
}

/// Conversion accepted wherever a child form is expected.
pub trait IntoForm {
    /// Type-erased handle.
    fn into_form(self) -> FormHandle;
}

impl<T: Form + 'static> IntoForm for Handle<T> {
    fn into_form(self) -> FormHandle { self.to_form() }
}

impl IntoForm for FormHandle {
    fn into_form(self) -> FormHandle { self }
}

impl FormHandle {
    /// Hit-tests the form and resolves [`Hit::Itself`] to this handle.
    pub fn hit(&self, cx: &LayoutCtx<'_>, x: Real, y: Real) -> Option<FormHandle> {
        let hit = self.borrow_mut().hover(cx, x, y)?;
        Some(match hit {
            Hit::Itself => self.clone(),
            Hit::Child(child) => child,
        })
    }

    /// Finds the scroll box under `(x, y)`, resolving [`Hit::Itself`] to this handle.
    pub fn scroll_target(&self, x: Real, y: Real) -> Option<FormHandle> {
        let hit = self.borrow().find_scroll_box(x, y)?;
        Some(match hit {
            Hit::Itself => self.clone(),
            Hit::Child(child) => child,
        })
    }

    /// Returns `true` if `id` is this form or any form below it.
    pub fn contains(&self, id: Id) -> bool {
        if self.id() == id {
            return true;
        }
        let mut found = false;
        self.borrow().for_each_child(&mut |child| {
            if !found {
                found = child.contains(id);
            }
        });
        found
    }
}

/// Result of a hit test.
pub enum Hit {
    /// The form that was asked.
    Itself,
    /// A descendant.
    Child(FormHandle),
}

/// What a window or drop-down surface reports under the pointer.
pub enum SurfaceHit {
    /// The surface itself: title bar, edges or empty background.
    Surface,
    /// An interactive form inside it.
    Form(FormHandle),
}

/// A node of the UI tree.
///
/// Within one frame `update_size` (bottom-up) precedes `layout` (top-down), which precedes
/// `render`. Hit tests run against the previous frame's layout since input arrives before the
/// next render. Every hook except the geometry accessors has a no-op default, so a form only
/// overrides what it needs.
pub trait Form {
    /// Bottom-left corner, as set by the last `layout`.
    fn pos(&self) -> Vec2f;

    /// Size, as computed by the last `update_size`.
    fn size(&self) -> Vec2f;

    /// Rectangle covered by the form.
    fn bounds(&self) -> Bounds { Bounds::from_pos_size(self.pos(), self.size()) }

    /// Recomputes the size. Containers size their children first.
    fn update_size(&mut self, _cx: &LayoutCtx<'_>) {}

    /// Records the bottom-left corner; containers then place their children.
    fn layout(&mut self, cx: &LayoutCtx<'_>, x: Real, y: Real);

    /// Innermost interactive form under `(x, y)`.
    ///
    /// Non-interactive forms return `None` even when hit so that clicks fall through. While the
    /// form is active this is also the drag-update hook and receives every pointer move.
    fn hover(&mut self, _cx: &LayoutCtx<'_>, _x: Real, _y: Real) -> Option<Hit> { None }

    /// Nearest enclosing scroll box under `(x, y)`.
    fn find_scroll_box(&self, _x: Real, _y: Real) -> Option<Hit> { None }

    /// Called once when the hovered form is pressed. `true` captures the pointer until release.
    fn activate(&mut self, _ctx: &mut EventCtx<'_>, _button: MouseButton) -> bool { false }

    /// Called on release, only after `activate` returned `true`.
    fn deactivate(&mut self, _ctx: &mut EventCtx<'_>) {}

    /// Pointer move while this form captures the pointer. Forwards to `hover` unless the form
    /// needs the event environment during a drag.
    fn drag(&mut self, ctx: &mut EventCtx<'_>, x: Real, y: Real) { self.hover(ctx.layout(), x, y); }

    /// Wheel movement routed to the scroll box found by `find_scroll_box`.
    fn scroll(&mut self, _cx: &LayoutCtx<'_>, _dx: Real, _dy: Real) {}

    /// Pointer shape while hovered.
    fn cursor(&self) -> CursorIcon { CursorIcon::Default }

    /// Keyboard capability, for forms that can hold focus.
    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> { None }

    /// Visits the direct children.
    fn for_each_child(&self, _f: &mut dyn FnMut(&FormHandle)) {}

    /// Draws the form. Containers draw their decoration first, then their children.
    fn render(&self, _canvas: &mut Canvas<'_>) {}
}

/// Keyboard capability of a form.
pub trait Focusable {
    /// A typed character.
    fn character(&mut self, _ctx: &mut EventCtx<'_>, _ch: char) {}

    /// A key transition.
    fn key(&mut self, _ctx: &mut EventCtx<'_>, _key: Key, _action: KeyAction, _mods: KeyMods) {}

    /// Focus moved elsewhere.
    fn defocus(&mut self, _ctx: &mut EventCtx<'_>) {}
}

/// Read-only environment of the sizing, layout and hover passes.
pub struct LayoutCtx<'a> {
    font: &'a dyn FontMetrics,
    style: &'a Style,
    viewport: Vec2f,
    caret_reset: Cell<bool>,
}

impl<'a> LayoutCtx<'a> {
    /// Creates a layout context; hosts only need this to size forms outside a [`Context`].
    pub fn new(font: &'a dyn FontMetrics, style: &'a Style, viewport: Vec2f) -> Self { Self { font, style, viewport, caret_reset: Cell::new(false) } }

    /// Font metrics.
    pub fn font(&self) -> &dyn FontMetrics { self.font }

    /// Active style.
    pub fn style(&self) -> &Style { self.style }

    /// Size of the viewport.
    pub fn viewport(&self) -> Vec2f { self.viewport }

    /// Makes the caret solid right now, restarting its blink cycle.
    pub fn reset_caret_blink(&self) { self.caret_reset.set(true) }

    pub(crate) fn caret_reset_requested(&self) -> bool { self.caret_reset.get() }
}

/// Deferred work a form asks of the coordinator during an event.
pub(crate) enum Request {
    Focus,
    OpenDropDown { drop_down: Handle<DropDown>, x: Real, y: Real },
    CloseDropDown,
    HideWindow(WindowHandle),
}

/// Environment of an input event delivered to a form.
///
/// Requests made through it are applied by the coordinator once the form returns, so a form
/// never re-enters the dispatcher while it is borrowed.
pub struct EventCtx<'a> {
    layout: LayoutCtx<'a>,
    clipboard: &'a mut dyn Clipboard,
    focused: bool,
    mouse: Vec2f,
    requests: Vec<Request>,
}

impl<'a> EventCtx<'a> {
    pub(crate) fn new(layout: LayoutCtx<'a>, clipboard: &'a mut dyn Clipboard, focused: bool, mouse: Vec2f) -> Self {
        Self { layout, clipboard, focused, mouse, requests: Vec::new() }
    }

    /// Layout environment.
    pub fn layout(&self) -> &LayoutCtx<'a> { &self.layout }

    /// Font metrics.
    pub fn font(&self) -> &dyn FontMetrics { self.layout.font }

    /// Active style.
    pub fn style(&self) -> &Style { self.layout.style }

    /// Last pointer position.
    pub fn mouse(&self) -> Vec2f { self.mouse }

    /// Returns `true` if the receiving form holds focus.
    pub fn is_focused(&self) -> bool { self.focused }

    /// Gives focus to the receiving form.
    pub fn request_focus(&mut self) {
        self.focused = true;
        self.requests.push(Request::Focus);
    }

    /// Opens `drop_down` with its bottom-left corner at `(x, y)`, replacing any open one.
    pub fn open_drop_down(&mut self, drop_down: &Handle<DropDown>, x: Real, y: Real) { self.requests.push(Request::OpenDropDown { drop_down: drop_down.clone(), x, y }) }

    /// Closes the open drop-down.
    pub fn close_drop_down(&mut self) { self.requests.push(Request::CloseDropDown) }

    /// Hides `window` once the event is handled.
    pub fn hide_window(&mut self, window: &WindowHandle) { self.requests.push(Request::HideWindow(window.clone())) }

    /// Makes the caret solid right now.
    pub fn reset_caret_blink(&self) { self.layout.reset_caret_blink() }

    /// Clipboard text, if available.
    pub fn clipboard_get(&mut self) -> Option<String> {
        let text = self.clipboard.get();
        if text.is_none() {
            tracing::warn!("clipboard read returned nothing");
        }
        text
    }

    /// Replaces the clipboard text.
    pub fn clipboard_set(&mut self, text: &str) { self.clipboard.set(text) }

    pub(crate) fn finish(self) -> (Vec<Request>, bool) {
        let reset = self.layout.caret_reset_requested();
        (self.requests, reset)
    }
}

/// Callback fired by a form with the event environment and the form itself.
pub type Callback<T> = Box<dyn FnMut(&mut EventCtx<'_>, &T)>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mono;

    #[test]
    fn handle_identity_survives_type_erasure() {
        let button = Handle::new(Button::new("ok"));
        let form = button.to_form();
        assert_eq!(button.id(), form.id());
        assert!(form.ptr_eq(&button));
        let other = Handle::new(Button::new("ok"));
        assert!(!other.ptr_eq(&button));
    }

    #[test]
    fn id_matches_the_receiver_address() {
        let button = Handle::new(Button::new("ok"));
        let inner = button.with(|b| Id::from_ptr(b));
        assert_eq!(inner, button.id());
    }

    #[test]
    fn hit_resolves_itself_to_the_handle() {
        let font = mono();
        let style = Style::default();
        let cx = LayoutCtx::new(&font, &style, vec2(800.0, 600.0));
        let button = Handle::new(Button::new("ok")).to_form();
        button.borrow_mut().update_size(&cx);
        button.borrow_mut().layout(&cx, 10.0, 10.0);
        let hit = button.hit(&cx, 12.0, 12.0);
        assert!(hit.is_some_and(|h| h.ptr_eq(&button)));
        assert!(button.hit(&cx, 0.0, 0.0).is_none());
    }

    #[test]
    fn contains_walks_descendants() {
        let inner = Handle::new(Button::new("a"));
        let rows = Handle::new(Rows::new());
        rows.borrow_mut().add(inner.clone());
        let outer = Handle::new(Columns::new());
        outer.borrow_mut().add(rows.clone());
        let outer = outer.to_form();
        assert!(outer.contains(inner.id()));
        assert!(outer.contains(rows.id()));
        assert!(!outer.contains(Handle::new(Button::new("b")).id()));
    }
}
