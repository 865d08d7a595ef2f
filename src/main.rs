//! rStoreMon main entrypoint.

use rstoremon::run;
use rstoremon::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
