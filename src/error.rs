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
use crate::Real;
use thiserror::Error;

/// Errors reported by the checked (`try_*`) setters and by font loading.
///
/// The unchecked setters panic with the same message: passing an invalid value is a defect in
/// the host, not a runtime condition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// A combo box selection outside the option list.
    #[error("selection {index} is out of range for {len} option(s)")]
    SelectionOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of options.
        len: usize,
    },

    /// A padding, spacing or similar amount below zero.
    #[error("{what} must not be negative (got {value})")]
    Negative {
        /// Name of the rejected quantity.
        what: &'static str,
        /// Rejected value.
        value: Real,
    },

    /// A width or similar amount that must be strictly positive.
    #[error("{what} must be positive (got {value})")]
    NotPositive {
        /// Name of the rejected quantity.
        what: &'static str,
        /// Rejected value.
        value: Real,
    },

    /// Font data could not be read or parsed.
    #[error("failed to load font: {0}")]
    FontLoad(String),
}

pub(crate) fn non_negative(what: &'static str, value: Real) -> Result<Real, UiError> {
    if value < 0.0 || value.is_nan() {
        return Err(UiError::Negative { what, value });
    }
    Ok(value)
}

pub(crate) fn positive(what: &'static str, value: Real) -> Result<Real, UiError> {
    if value <= 0.0 || value.is_nan() {
        return Err(UiError::NotPositive { what, value });
    }
    Ok(value)
}

/// Unwraps a validation result, turning the error into a contract-violation panic.
pub(crate) fn enforce<T>(result: Result<T, UiError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("{error}"),
    }
}
