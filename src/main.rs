// SPDX-License-Identifier: MPL-2.0
use patternboard::app::{self, Flags};
use patternboard::config::paths;
use patternboard::ui::theming::ThemeMode;

const HELP: &str = "\
Patternboard - toasts, cooldowns and loading states on a virtual clock

USAGE:
  patternboard [OPTIONS]

OPTIONS:
  --config-dir <DIR>   Directory holding settings.toml
  --seed <N>           Seed for reproducible simulated outcomes
  --theme <MODE>       light, dark or system (this session only)
  -h, --help           Print this help

ENVIRONMENT:
  PATTERNBOARD_CONFIG_DIR   Config directory when --config-dir is absent
  RUST_LOG                  Log filter (default: info)
";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        seed: args.opt_value_from_str("--seed")?,
        theme: args.opt_value_from_str::<_, ThemeMode>("--theme")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }
    Ok(flags)
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_override(flags.config_dir.clone());
    app::run(flags)
}
