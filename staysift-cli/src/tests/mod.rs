//! Shared test harness modules for the staysift CLI.

use super::*;

mod helpers;
mod rank_steps;
mod rank_unit;
