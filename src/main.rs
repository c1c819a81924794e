// SPDX-License-Identifier: MPL-2.0
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use variant_lens::app::{self, paths, Flags};

const DEFAULT_LOG_FILTER: &str = "variant_lens=info";

const HELP: &str = "\
variant_lens

USAGE:
  variant_lens [OPTIONS]

OPTIONS:
  --lang <code>        UI language (e.g. en-US, fr)
  --config-dir <dir>   Directory holding settings.toml
  --data-dir <dir>     Directory holding state.cbor and relative subjects
  --catalog <file>     Variant dataset replacing the bundled one
  --subject <id>       Turntable subject to show first
  -h, --help           Print this help
";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> iced::Result {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let option = |args: &mut pico_args::Arguments, key: &'static str| {
        args.opt_value_from_str::<_, String>(key).unwrap_or_else(|err| {
            tracing::warn!(flag = key, %err, "ignoring invalid argument");
            None
        })
    };

    let lang = option(&mut args, "--lang");
    let config_dir = option(&mut args, "--config-dir");
    let data_dir = option(&mut args, "--data-dir");
    let catalog = option(&mut args, "--catalog");
    let subject = option(&mut args, "--subject");

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }

    paths::init_cli_overrides(data_dir, config_dir);

    app::run(Flags {
        lang,
        catalog,
        subject,
    })
}
