use exact_frac::prelude::*;
use rustyline::DefaultEditor;
use tracing::Level;

fn main() -> rustyline::Result<()> {
    let config = ReplConfig::load();

    tracing_subscriber::fmt()
        .with_max_level(if config.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let mut dispatcher = Dispatcher::new(&config);

    let rl_config = rustyline::Config::builder()
        .max_history_size(config.history_size)?
        .build();
    let mut rl = DefaultEditor::with_config(rl_config)?;

    println!("exact fractions, `help` for syntax");
    loop {
        let line = match rl.readline(&config.prompt) {
            Ok(line) => line,
            Err(_) => break,
        };
        if !line.trim().is_empty() {
            rl.add_history_entry(line.as_str())?;
        }

        match dispatcher.dispatch(&line) {
            DispatchResult::Success(Some(out)) => println!("{}", out),
            DispatchResult::Success(None) => {}
            DispatchResult::Failure(msg) => println!("error: {}", msg),
            DispatchResult::Exit => break,
        }
    }
    Ok(())
}
