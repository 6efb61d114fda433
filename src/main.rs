use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(navstack::execute() as u8)
}
