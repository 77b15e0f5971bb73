use std::path::Path;

use color_eyre::eyre::Result;

use super::write_output;
use crate::studio::Studio;

pub fn run(studio: &Studio, output: Option<&Path>) -> Result<()> {
    let css = studio.export_css();
    match output {
        Some(_) => write_output(output, &css),
        None => {
            print!("{}", css);
            Ok(())
        }
    }
}
