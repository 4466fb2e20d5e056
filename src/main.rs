use std::path::PathBuf;

use platonic::{Options, Viewer};

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match Options::load(&path) {
            Ok(options) => {
                log::info!("loaded options from {}", path.display());
                options
            }
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
