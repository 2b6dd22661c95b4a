//! Command line entry point.

fn main() {
    env_logger::init();
    log::info!("Starting snapkit");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match snapkit_app::run(&args) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            log::error!("{e}");
            eprintln!("snapkit: {e}");
            std::process::exit(1);
        }
    }
}
