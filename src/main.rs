use clap::Parser;
use monosay::cli::{self, Args, Command, SayOptions};
use monosay::config::Config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config file: {}", e);
            eprintln!("Using default settings.\n");
            Config::default()
        }
    };

    match args.command {
        Command::Say {
            mascot,
            width,
            columns,
            output,
            text,
        } => {
            let options = SayOptions {
                mascot: mascot.into(),
                width,
                columns,
            };
            cli::run_say(&config, &text.join(" "), options, &output);
        }
        Command::Mono {
            columns,
            output,
            text,
        } => cli::run_mono(&config, &text, columns, &output),
        Command::Dispatch {
            out_dir,
            recipient,
            message,
        } => cli::run_dispatch(&config, &out_dir, &recipient, &message),
        Command::Usage => cli::print_usage(&config),
        Command::Config { action } => {
            cli::handle_config_action(action, args.config.as_deref(), &config)
        }
    }
}
