//! Renders the figure set once or keeps it in sync with `figures.toml`.
//!
//! ```text
//! bezfig [compile]   render every figure once and print a report
//! bezfig watch       rebuild on every change to figures.toml
//! ```

use std::env;
use std::process::ExitCode;

use bezfig::options::RenderOptions;
use bezfig::report::make_images;
use bezfig::watch::watch;

fn compile() {
    // a Ctrl-C mid-render is not an error, just leave a clean line behind
    let _ = ctrlc::set_handler(|| {
        println!();
        std::process::exit(0);
    });

    match RenderOptions::load(&RenderOptions::config_path()) {
        Ok(options) => print!("{}", make_images(&options)),
        Err(err) => {
            println!("could not generate images due to:");
            println!("{err:#}");
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] | ["compile"] | ["c"] => compile(),
        ["watch"] | ["w"] => {
            if let Err(err) = watch(&RenderOptions::config_path()) {
                eprintln!("{err:#}");
            }
        }
        [cmd] => println!("unknown command '{cmd}'"),
        _ => println!("invalid arguments"),
    }
    ExitCode::SUCCESS
}
