#[macro_use]
extern crate log;

use std::str::FromStr;

use clap::{App, Arg};

use histopatch::config::Settings;
use histopatch::errors::PatchResult;
use histopatch::{Dataset, PatchDataset};

fn main() -> PatchResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("histopatch")
        .about("Describe and verify slide-organized image patch datasets")
        .arg(
            Arg::new("root")
                .help("Dataset root containing one directory per slide")
                .takes_value(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file, defaults to the XDG configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::new("index")
                .short('i')
                .long("index")
                .help("Decode a single sample, negative values count from the end")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|v| isize::from_str(v)),
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .help("Decode every sample and report failures"),
        )
        .arg(
            Arg::new("fail_fast")
                .long("fail-fast")
                .help("Stop verifying at the first failure"),
        )
        .get_matches();

    let settings = match matches.value_of("config") {
        Some(path) => Settings::from_path(path)?,
        None => Settings::load()?,
    }
    .with_overrides(
        matches.value_of("root"),
        matches.is_present("verify"),
        matches.is_present("fail_fast"),
    );

    let root = match settings.root.as_deref() {
        Some(root) => root.to_owned(),
        None => {
            error!("No dataset root given on the command line or in the configuration");
            std::process::exit(2);
        }
    };

    let dataset = PatchDataset::new(&root)?;
    println!("{}", dataset);

    if let Some(index) = matches.value_of("index") {
        let index = isize::from_str(index).expect("Validated index");
        let resolved = histopatch::resolve_index(index, dataset.len())?;
        let image = dataset.get(resolved)?;
        let (width, height) = image.dimensions();
        println!(
            "Sample {}: {} ({}x{})",
            resolved,
            dataset.path(resolved)?.display(),
            width,
            height
        );
    }

    if settings.verify() {
        let failures = dataset.verify(settings.fail_fast())?;
        println!("Verified {} samples, {} failed", dataset.len(), failures);
        if failures > 0 {
            std::process::exit(1);
        }
    }

    Ok(())
}
