use clap::Parser;
use mutual_contacts::cli::SingleCli;
use mutual_contacts::service::Service;
use mutual_contacts::service_configuration::{ServiceConfiguration, APP_NAME};
use std::process::exit;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = SingleCli::parse();

    let config_file_location = match confy::get_configuration_file_path(APP_NAME, None) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };

    match ServiceConfiguration::new(&cli, &config_file_location) {
        Ok(mut config) => match Service::run(&mut config) {
            Ok(output) => {
                println!("{output}");
                exit(0)
            }
            Err(e) => {
                eprintln!("{e}");
                exit(2);
            }
        },
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    }
}
