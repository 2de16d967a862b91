// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the bridge and whatever serves the tools.

pub mod transport;

pub use transport::ToolTransport;
