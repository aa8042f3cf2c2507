//! Tree Row Demo Entry Point

use leptos::prelude::*;
use log::LevelFilter;
use tree_row_ui::app::App;
use tree_row_ui::logging;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info });
    mount_to_body(App);
}
