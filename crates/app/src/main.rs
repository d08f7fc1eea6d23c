use std::path::Path;

mod commands;
mod config;
mod error;
mod export;
mod render;

fn main() -> error::Result<()> {
    let (settings, command) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "garage={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let store = commands::load_store(Path::new(&settings.data))?;
    let output = commands::run(&store, command, settings.format, chrono::Utc::now())?;
    print!("{output}");
    Ok(())
}
