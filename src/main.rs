use clap::Parser;
use poplines::{Cli, Command, OutputFormatter, PopLines};
use std::io;
use std::path::Path;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Command::GenerateConfig { ref path } = cli.command {
        return handle_generate_config(path, &cli.output_formatter());
    }

    let mut poplines = match PopLines::from_cli(&cli) {
        Ok(poplines) => poplines,
        Err(e) => {
            cli.output_formatter().print_user_friendly_error(&e);
            return e.exit_code();
        }
    };

    // Parameters are validated here, before the file is opened.
    let request = match cli.pop_request(poplines.config()) {
        Ok(Some(request)) => request,
        Ok(None) => return 0,
        Err(e) => {
            poplines.handle_error(&e);
            return e.exit_code();
        }
    };

    match poplines.run_request(&request) {
        Ok(outcome) => {
            if outcome.extracted.is_empty() {
                poplines
                    .output_formatter()
                    .warning(&format!("No lines selected from {}", outcome.path.display()));
            }

            match poplines.output_formatter().print_outcome(&outcome) {
                Ok(()) => 0,
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => 0,
                Err(e) => {
                    poplines
                        .output_formatter()
                        .error(&format!("Failed to write output: {}", e));
                    1
                }
            }
        }
        Err(e) => {
            poplines.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(config_path: &Path, formatter: &OutputFormatter) -> i32 {
    match PopLines::generate_sample_config(config_path) {
        Ok(()) => {
            formatter.success(&format!(
                "Generated sample configuration file: {}",
                config_path.display()
            ));
            formatter.info(&format!(
                "Use it with: poplines --config {} head <file>",
                config_path.display()
            ));
            0
        }
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            e.exit_code()
        }
    }
}
