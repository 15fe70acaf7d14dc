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
#![warn(missing_docs)]
//! `dui` is a retained-mode GUI core for real-time applications.
//! It keeps a tree of forms grouped into z-ordered windows, turns raw pointer and keyboard
//! events into hover/active/focus state, runs a two-pass layout every frame and draws through
//! a small renderer contract, so it can be embedded in any custom render backend.
//!
//! Coordinates use a bottom-left origin with y growing upward; a form's position is its
//! bottom-left corner.

use bitflags::*;

// Stored geometry accessors shared by every form with `pos`/`size` fields.
macro_rules! form_geometry {
    () => {
        fn pos(&self) -> Vec2f { self.pos }
        fn size(&self) -> Vec2f { self.size }
    };
}

// Fires an optional `Callback<Self>` field. The callback is moved out for the call so it can
// observe the form immutably.
macro_rules! fire {
    ($owner:ident . $field:ident, $ctx:expr) => {
        if let Some(mut callback) = $owner.$field.take() {
            callback(&mut *$ctx, &*$owner);
            $owner.$field = Some(callback);
        }
    };
}

mod canvas;
mod clipboard;
mod containers;
mod context;
mod drop_down;
mod error;
mod font;
mod form;
mod layout;
mod scroll_box;
mod text_layout;
mod widgets;
mod window;

#[cfg(test)]
mod testing;

pub use canvas::*;
pub use clipboard::*;
pub use containers::*;
pub use context::Context;
pub use drop_down::*;
pub use error::UiError;
pub use font::*;
pub use form::*;
pub use layout::*;
pub use rs_math3d::Vec2f;
pub use scroll_box::*;
pub use widgets::*;
pub use window::*;

/// Floating-point type used by forms and layout calculations.
pub type Real = f32;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Pointer identity of a form, window or drop-down.
pub struct Id(usize);

impl Id {
    /// Creates an ID from the address of a stable object.
    pub fn from_ptr<T: ?Sized>(value: &T) -> Self { Self(value as *const T as *const () as usize) }

    pub(crate) fn from_raw<T: ?Sized>(ptr: *const T) -> Self { Self(ptr as *const () as usize) }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> usize { self.0 }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle of a font known to the render backend.
pub struct FontId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle referencing a renderer-owned texture.
pub struct TextureId(u32);

impl TextureId {
    /// Wraps a backend texture name.
    pub fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque grey at `level` in `[0, 1]`.
    pub fn gray(level: Real) -> Self {
        let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r: v, g: v, b: v, a: 255 }
    }

    /// Scales the color channels, leaving alpha untouched.
    pub fn scaled(self, factor: Real) -> Self {
        let scale = |c: u8| ((c as Real) * factor).round().clamp(0.0, 255.0) as u8;
        Self { r: scale(self.r), g: scale(self.g), b: scale(self.b), a: self.a }
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[repr(u32)]
/// Identifiers for each of the built-in style colors.
pub enum ControlColor {
    /// Number of color entries in [`Style::colors`].
    Max = 8,
    /// Fill of progress bars.
    Fill = 7,
    /// Highlight behind selected text and hovered options.
    Selection = 6,
    /// Background of text fields.
    Inset = 5,
    /// Title bars, scrollbar thumbs and slider handles.
    TitleBG = 4,
    /// Window, drop-down and button background.
    WindowBG = 3,
    /// Outline of hovered, focused or dragged forms.
    OutlineHover = 2,
    /// Outline and label color of idle forms.
    Outline = 1,
    /// Text of focused editors.
    Text = 0,
}

impl ControlColor {
    /// Promotes an idle outline to its hovered variant when `hovered` is set.
    pub fn hover_if(self, hovered: bool) -> Self {
        match (self, hovered) {
            (Self::Outline, true) => Self::OutlineHover,
            _ => self,
        }
    }
}

#[derive(Copy, Clone, Debug)]
/// Collection of visual constants that drive form appearance.
pub struct Style {
    /// Font used for all text rendering.
    pub font: FontId,
    /// Height of window title bars; also the margin kept on screen when clamping windows.
    pub title_height: Real,
    /// Inset of the title text inside the title bar.
    pub title_padding: Real,
    /// Gap around the close button inside the title bar.
    pub close_button_padding: Real,
    /// Inset of the cross drawn inside the close button.
    pub close_cross_padding: Real,
    /// Distance from a window edge within which a resize grab starts.
    pub resize_range: Real,
    /// Default padding between a window frame and its content.
    pub window_padding: Real,
    /// Width of scroll box scrollbars.
    pub scrollbar_width: Real,
    /// Scroll distance applied per unit of wheel movement.
    pub scroll_rate: Real,
    /// Palette of [`ControlColor`] entries.
    pub colors: [Color; ControlColor::Max as usize],
}

impl Style {
    /// Looks up a palette entry.
    pub fn color(&self, id: ControlColor) -> Color { self.colors[id as usize] }

    /// Side length of the square window close button.
    pub fn close_button_size(&self) -> Real { self.title_height - self.close_button_padding * 2.0 }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: FontId::default(),
            title_height: 30.0,
            title_padding: 5.0,
            close_button_padding: 5.0,
            close_cross_padding: 3.0,
            resize_range: 5.0,
            window_padding: 10.0,
            scrollbar_width: 20.0,
            scroll_rate: 53.0,
            colors: [
                Color::gray(1.0),
                Color::gray(0.75),
                Color::gray(1.0),
                Color::gray(0.25),
                Color::gray(0.375),
                Color::gray(0.1875),
                Color::gray(0.5),
                Color::gray(0.625),
            ],
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button reported by the platform.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the left mouse button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if the right mouse button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the middle mouse button is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Modifier key state accompanying a key event.
    pub struct KeyMods : u32 {
        /// Super/command key held.
        const SUPER = 8;
        /// Alt key held.
        const ALT = 4;
        /// Control key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMods {
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Keys the text editors react to. Everything else arrives as [`Key::Other`].
pub enum Key {
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Return.
    Enter,
    /// Keypad enter.
    KeypadEnter,
    /// Letter A (select all with Ctrl).
    A,
    /// Letter C (copy with Ctrl).
    C,
    /// Letter V (paste with Ctrl).
    V,
    /// Letter X (cut with Ctrl).
    X,
    /// Letter Y (reserved for redo).
    Y,
    /// Letter Z (reserved for undo).
    Z,
    /// Any other key, identified by the platform's key code.
    Other(u32),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Transition reported with a key event.
pub enum KeyAction {
    /// The key went down.
    Press,
    /// The key is held and auto-repeating.
    Repeat,
    /// The key went up.
    Release,
}

impl KeyAction {
    /// Builds an action from the `pressed`/`repeat` pair most platforms report.
    pub fn from_flags(pressed: bool, repeat: bool) -> Self {
        match (pressed, repeat) {
            (false, _) => Self::Release,
            (true, false) => Self::Press,
            (true, true) => Self::Repeat,
        }
    }

    /// Returns `true` for presses and repeats.
    pub fn is_down(self) -> bool { !matches!(self, Self::Release) }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
/// Pointer shape the host should show for the hovered entity.
pub enum CursorIcon {
    /// Regular arrow.
    #[default]
    Default,
    /// Horizontal resize arrows.
    HResize,
    /// Vertical resize arrows.
    VResize,
    /// Text insertion beam.
    IBeam,
}

/// Convenience constructor for [`Vec2f`].
pub fn vec2(x: Real, y: Real) -> Vec2f { Vec2f { x, y } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

pub(crate) fn lerp(a: Real, b: Real, t: Real) -> Real { a + (b - a) * t }

pub(crate) fn saturate(value: Real) -> Real {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
