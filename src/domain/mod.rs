// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

mod context;
mod rules;
mod style;

pub use context::*;
pub use rules::*;
pub use style::*;
