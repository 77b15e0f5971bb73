use color_eyre::eyre::{eyre, Result};
use swatch_theme::{convert, parse_color, ColorFormat, HslSyntax};

pub fn run(color: &str, format: ColorFormat, legacy: bool, default_syntax: HslSyntax) -> Result<()> {
    parse_color(color).map_err(|e| eyre!("Invalid color '{}': {}", color, e))?;

    let syntax = if legacy {
        HslSyntax::Legacy
    } else {
        default_syntax
    };
    println!("{}", convert(color, format, syntax));
    Ok(())
}
