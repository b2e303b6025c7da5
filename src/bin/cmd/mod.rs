// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod create;
mod plan;
mod simulate;

pub use create::CreateCmd;
pub use plan::PlanCmd;
pub use simulate::SimulateCmd;
