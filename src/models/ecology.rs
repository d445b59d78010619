//! Ecological models.
//!
//! This module contains models of material pools in ecosystems, such as
//! biomass moving between living, dead, and soil compartments.

pub mod biomass;
pub mod compartment;
