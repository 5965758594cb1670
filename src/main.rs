mod app;
mod model;
mod theme;
mod ui;
mod visuals;
mod widgets;

use anyhow::Result;

fn main() -> Result<()> {
    ui::run()
}
