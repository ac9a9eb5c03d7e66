// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! Visual value types used by control properties.

mod brush;

pub use brush::{Brush, BrushPalette, ParseBrushError};
