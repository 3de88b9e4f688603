//! Normalize command: rewrite a community dialect into canonical text.

use std::path::Path;

use anyhow::Result;

use fleetwright_lib::{normalize, FleetFormat};

use super::read_input;
use crate::output::render_canonical;

pub fn handle_normalize(input: Option<&Path>, format: FleetFormat) -> Result<()> {
    let text = read_input(input)?;
    render_canonical(&normalize(&text, format));
    Ok(())
}
