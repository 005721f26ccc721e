use std::env;
use std::process;

use diary::color;
use diary::config::{self, Command, Config};
use diary::log::{self, LogTarget};

mod commands;

use commands::{cmd_add, cmd_delete, cmd_init, cmd_list, cmd_toggle, cmd_ui};

fn main() {
    let cli = match config::parse_args(env::args()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    // Default command is the interactive UI
    let command = cli.command.clone().unwrap_or(Command::Ui { filter: None });

    // init writes the config file, so it must not require one
    if command == Command::Init {
        if let Err(e) = cmd_init(cli.config.as_deref()) {
            fail(&e);
        }
        return;
    }

    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e.to_string()),
    };

    let target = match command {
        Command::Ui { .. } => LogTarget::File(&config.log_file),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = log::init(&config.log_level, target) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let result = match command {
        Command::Ui { filter } => cmd_ui(&config, filter),
        Command::Add {
            title,
            due,
            description,
            priority,
        } => cmd_add(&config, &title, &due, &description, priority),
        Command::List { filter, plain } => cmd_list(&config, filter, plain),
        Command::Toggle { id } => cmd_toggle(&config, id),
        Command::Delete { id, yes } => cmd_delete(&config, id, yes),
        Command::Init => Ok(()),
    };

    if let Err(e) = result {
        fail(&e);
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", color::error("error:"), message);
    process::exit(1);
}
