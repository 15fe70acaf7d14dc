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

/// Axis-aligned rectangle stored by its edges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub x0: Real,
    /// Right edge.
    pub x1: Real,
    /// Bottom edge.
    pub y0: Real,
    /// Top edge.
    pub y1: Real,
}

impl Bounds {
    /// Creates bounds from their four edges.
    pub fn new(x0: Real, x1: Real, y0: Real, y1: Real) -> Self { Self { x0, x1, y0, y1 } }

    /// Creates bounds from a bottom-left corner and a size.
    pub fn from_pos_size(pos: Vec2f, size: Vec2f) -> Self { Self::new(pos.x, pos.x + size.x, pos.y, pos.y + size.y) }

    /// Horizontal extent.
    pub fn width(&self) -> Real { self.x1 - self.x0 }

    /// Vertical extent.
    pub fn height(&self) -> Real { self.y1 - self.y0 }

    /// Extent as a vector.
    pub fn size(&self) -> Vec2f { vec2(self.width(), self.height()) }

    /// Inclusive point test.
    pub fn contains(&self, x: Real, y: Real) -> bool { x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1 }

    /// Moves every edge inward by `n`.
    pub fn shrink(&self, n: Real) -> Self { Self::new(self.x0 + n, self.x1 - n, self.y0 + n, self.y1 - n) }

    /// Moves every edge outward by `n`.
    pub fn expand(&self, n: Real) -> Self { self.shrink(-n) }

    /// Overlap of two rectangles, if any.
    pub fn intersect(&self, other: &Bounds) -> Option<Bounds> {
        let x0 = self.x0.max(other.x0);
        let x1 = self.x1.min(other.x1);
        let y0 = self.y0.max(other.y0);
        let y1 = self.y1.min(other.y1);
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some(Bounds::new(x0, x1, y0, y1))
    }
}

/// Nine anchor points used to place a smaller box inside a larger one.
///
/// The vector form is `(0, 0)` for the bottom-left corner and `(1, 1)` for the top-right one,
/// so any fractional alignment can be expressed with a plain [`Vec2f`] as well.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Align {
    /// Top left.
    NW,
    /// Top center.
    N,
    /// Top right.
    NE,
    /// Middle left.
    W,
    /// Center.
    C,
    /// Middle right.
    E,
    /// Bottom left.
    SW,
    /// Bottom center.
    S,
    /// Bottom right.
    SE,
}

impl Align {
    /// Alignment as a fraction of the free space along each axis.
    pub fn vector(self) -> Vec2f {
        match self {
            Align::NW => vec2(0.0, 1.0),
            Align::N => vec2(0.5, 1.0),
            Align::NE => vec2(1.0, 1.0),
            Align::W => vec2(0.0, 0.5),
            Align::C => vec2(0.5, 0.5),
            Align::E => vec2(1.0, 0.5),
            Align::SW => vec2(0.0, 0.0),
            Align::S => vec2(0.5, 0.0),
            Align::SE => vec2(1.0, 0.0),
        }
    }

    /// Mirror image through the center.
    pub fn opposite(self) -> Self {
        match self {
            Align::NW => Align::SE,
            Align::N => Align::S,
            Align::NE => Align::SW,
            Align::W => Align::E,
            Align::C => Align::C,
            Align::E => Align::W,
            Align::SW => Align::NE,
            Align::S => Align::N,
            Align::SE => Align::NW,
        }
    }
}

impl From<Align> for Vec2f {
    fn from(align: Align) -> Self { align.vector() }
}

/// Bottom-left corner of a box of `size` placed inside `bounds` at `alignment`.
pub fn inside_bounds(size: Vec2f, bounds: Bounds, alignment: Vec2f) -> Vec2f {
    vec2(
        inside_span(size.x, bounds.x0, bounds.x1, alignment.x),
        inside_span(size.y, bounds.y0, bounds.y1, alignment.y),
    )
}

/// One-dimensional form of [`inside_bounds`].
pub fn inside_span(len: Real, lo: Real, hi: Real, alignment: Real) -> Real { lo + (hi - lo - len) * alignment }

/// Bottom-left corner of a box of `size` whose `alignment` point touches `(edge_x, edge_y)`.
pub fn to_edge(size: Vec2f, edge_x: Real, edge_y: Real, alignment: Vec2f) -> Vec2f {
    vec2(edge_x + (alignment.x - 1.0) * size.x, edge_y + (alignment.y - 1.0) * size.y)
}

/// Describes how a text-bearing leaf resolves its size each frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SizePolicy {
    /// Always exactly this width and height, e.g. `Fixed(120.0, 24.0)`.
    Fixed(Real, Real),
    /// Fixed width; one font line plus padding tall.
    Width(Real),
    /// Text width and one font line, plus padding on every side.
    Fit,
}

impl SizePolicy {
    pub(crate) fn resolve(self, font: &dyn FontMetrics, text: &str, padding: Real) -> Vec2f {
        match self {
            SizePolicy::Fixed(width, height) => vec2(width, height),
            SizePolicy::Width(width) => vec2(width, font.height() + padding * 2.0),
            SizePolicy::Fit => vec2(font.width(text) + padding * 2.0, font.height() + padding * 2.0),
        }
    }
}

impl Default for SizePolicy {
    fn default() -> Self { SizePolicy::Fixed(128.0, 32.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mono;
    use approx::assert_relative_eq;

    #[test]
    fn inside_bounds_respects_alignment() {
        let bounds = Bounds::new(0.0, 100.0, 0.0, 50.0);
        let size = vec2(20.0, 10.0);

        let nw = inside_bounds(size, bounds, Align::NW.vector());
        assert_relative_eq!(nw.x, 0.0);
        assert_relative_eq!(nw.y, 40.0);

        let c = inside_bounds(size, bounds, Align::C.vector());
        assert_relative_eq!(c.x, 40.0);
        assert_relative_eq!(c.y, 20.0);

        let se = inside_bounds(size, bounds, Align::SE.vector());
        assert_relative_eq!(se.x, 80.0);
        assert_relative_eq!(se.y, 0.0);
    }

    #[test]
    fn to_edge_places_alignment_point_on_edge() {
        let placed = to_edge(vec2(10.0, 4.0), 50.0, 20.0, Align::NE.vector());
        assert_relative_eq!(placed.x, 40.0);
        assert_relative_eq!(placed.y, 16.0);
    }

    #[test]
    fn opposite_is_an_involution() {
        for align in [Align::NW, Align::N, Align::NE, Align::W, Align::C, Align::E, Align::SW, Align::S, Align::SE] {
            assert_eq!(align.opposite().opposite(), align);
            let v = align.vector();
            let o = align.opposite().vector();
            assert_relative_eq!(v.x + o.x, 1.0);
            assert_relative_eq!(v.y + o.y, 1.0);
        }
    }

    #[test]
    fn intersect_handles_disjoint_rects() {
        let a = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let b = Bounds::new(5.0, 20.0, 2.0, 8.0);
        assert_eq!(a.intersect(&b), Some(Bounds::new(5.0, 10.0, 2.0, 8.0)));
        assert_eq!(a.intersect(&Bounds::new(11.0, 12.0, 0.0, 1.0)), None);
    }

    #[test]
    fn size_policy_uses_font_metrics() {
        let font = mono();
        let fit = SizePolicy::Fit.resolve(&font, "abcd", 3.0);
        assert_relative_eq!(fit.x, 4.0 * 8.0 + 6.0);
        assert_relative_eq!(fit.y, 16.0 + 6.0);
        let width = SizePolicy::Width(50.0).resolve(&font, "ignored", 2.0);
        assert_relative_eq!(width.x, 50.0);
        assert_relative_eq!(width.y, 20.0);
    }
}
