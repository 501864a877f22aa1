use std::process::ExitCode;

use crate::driver::Driver;

mod cli;
mod driver;
mod editor;
mod report;

fn main() -> ExitCode {
    env_logger::init();
    Driver::new().run()
}
