use bc_drv::Cli;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    match bc_drv::run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("bc: {err}");
            std::process::exit(bc_drv::exit_code::INTERNAL_ERROR);
        }
    }
}
