use clap::Parser;

mod commands;
mod output;
mod tty;

use commands::convert;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "snakefix")]
#[command(version = VERSION)]
#[command(about = "Normalize legacy identifier spellings to snake_case across a source tree")]
struct Cli {
    #[command(flatten)]
    args: convert::ConvertArgs,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    tty::status("snakefix is working...");

    let result = convert::run(cli.args);
    let (json_result, exit_code) = output::map_cmd_result_to_json(result);
    output::print_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
