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

/// Text measurement contract consumed by every text-bearing form.
///
/// Widths are measured along the baseline in the same units as layout coordinates. Caret
/// indices count characters, not bytes.
pub trait FontMetrics {
    /// Line height.
    fn height(&self) -> Real;

    /// Advance width of `text`.
    fn width(&self, text: &str) -> Real;

    /// Width and height of `text` as a single line.
    fn size(&self, text: &str) -> Vec2f { vec2(self.width(text), self.height()) }

    /// Maps a horizontal offset from the start of `text` to the nearest character boundary.
    ///
    /// Offsets before the text map to `0`, offsets past its end to the character count.
    fn caret_index(&self, text: &str, x: Real) -> usize {
        if x <= 0.0 {
            return 0;
        }
        let mut last_width = 0.0;
        for (count, (idx, ch)) in text.char_indices().enumerate() {
            let next = idx + ch.len_utf8();
            let width = self.width(&text[..next]);
            if x < width {
                if x < (last_width + width) * 0.5 {
                    return count;
                }
                return count + 1;
            }
            last_width = width;
        }
        text.chars().count()
    }
}

/// Fixed-advance metrics, handy for bitmap fonts and tests.
#[derive(Copy, Clone, Debug)]
pub struct MonoFont {
    advance: Real,
    height: Real,
}

impl MonoFont {
    /// Every character advances by `advance`; lines are `height` tall.
    pub fn new(advance: Real, height: Real) -> Self { Self { advance, height } }
}

impl Default for MonoFont {
    fn default() -> Self { Self::new(8.0, 18.0) }
}

impl FontMetrics for MonoFont {
    fn height(&self) -> Real { self.height }

    fn width(&self, text: &str) -> Real { text.chars().count() as Real * self.advance }
}

#[cfg(feature = "builder")]
pub use self::fontdue_metrics::FontdueMetrics;

#[cfg(feature = "builder")]
mod fontdue_metrics {
    use super::*;
    use crate::UiError;
    use fontdue::{Font, FontSettings};
    use std::path::Path;

    /// Metrics read from a TrueType/OpenType font through `fontdue`.
    pub struct FontdueMetrics {
        font: Font,
        px: Real,
        line_height: Real,
    }

    impl FontdueMetrics {
        /// Parses font data and measures it at `px` pixels per em.
        pub fn from_bytes(bytes: &[u8], px: Real) -> Result<Self, UiError> {
            let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|error| UiError::FontLoad(error.to_string()))?;
            let line_height = font.horizontal_line_metrics(px).map(|m| m.new_line_size).unwrap_or(px);
            Ok(Self { font, px, line_height })
        }

        /// Reads and parses a font file.
        pub fn from_file(path: impl AsRef<Path>, px: Real) -> Result<Self, UiError> {
            let path = path.as_ref();
            let data = std::fs::read(path).map_err(|e| UiError::FontLoad(format!("cannot read font file '{}': {}", path.display(), e)))?;
            Self::from_bytes(&data, px)
        }

        /// Pixel size the metrics were computed for.
        pub fn px(&self) -> Real { self.px }
    }

    impl FontMetrics for FontdueMetrics {
        fn height(&self) -> Real { self.line_height }

        fn width(&self, text: &str) -> Real { text.chars().map(|ch| self.font.metrics(ch, self.px).advance_width).sum() }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn garbage_bytes_are_rejected() {
            let err = FontdueMetrics::from_bytes(&[0, 1, 2, 3], 16.0).err();
            assert!(matches!(err, Some(UiError::FontLoad(_))));
        }

        #[test]
        fn missing_file_reports_path() {
            let err = FontdueMetrics::from_file("/definitely/not/here.ttf", 16.0).err();
            match err {
                Some(UiError::FontLoad(message)) => assert!(message.contains("/definitely/not/here.ttf")),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }
}
