//! QuickCode CLI.

use qcc::commands::{explain_error, run_file, run_tests};
use qcc::load::is_script;
use qcc::test::RunnerConfig;

fn main() {
    qcc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let Some(path) = args.iter().skip(2).find(|a| !a.starts_with('-')) else {
                eprintln!("Usage: qc run <file.qc>");
                std::process::exit(1);
            };
            run_file(path);
        }
        "test" => {
            let mut path: Option<String> = None;
            let mut config = RunnerConfig::default();

            for arg in args.iter().skip(2) {
                if let Some(filter) = arg.strip_prefix("--filter=") {
                    config.filter = Some(filter.to_string());
                } else if arg == "--verbose" || arg == "-v" {
                    config.verbose = true;
                } else if arg == "--no-parallel" {
                    config.parallel = false;
                } else if arg == "--no-wait" {
                    config.wait = false;
                } else if !arg.starts_with('-') && path.is_none() {
                    path = Some(arg.clone());
                }
            }

            let path = path.unwrap_or_else(|| ".".to_string());
            run_tests(&path, &config);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("QuickCode {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: qc explain <ERROR_CODE>");
                eprintln!("Example: qc explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        _ => {
            if is_script(std::path::Path::new(command)) {
                run_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("QuickCode interpreter");
    println!();
    println!("Usage: qc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.qc>        Run a script");
    println!("  test [path]          Run every script under a path (default: current directory)");
    println!("  explain <code>       Explain an error code (e.g., E2001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Test options:");
    println!("  --filter=<pattern>  Only run scripts whose path contains pattern");
    println!("  --verbose, -v       Show output and final bindings per script");
    println!("  --no-parallel       Run scripts sequentially");
    println!("  --no-wait           Record WAIT without sleeping");
    println!();
    println!("Examples:");
    println!("  qc hello.qc");
    println!("  qc test scripts/ --filter=loops");
    println!("  qc explain E3001");
}
