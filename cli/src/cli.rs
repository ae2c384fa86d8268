use chromemark::output::OutputSink;
use chromemark::profile::split_profile_list;
use chromemark::{convert, utils, Config, Result, StderrWarnings};
use clap::Parser;
use log::debug;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Directory holding Chrome's profiles [default: Chrome's user data directory]
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Output path for the generated document, leave empty for stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Comma separated list of profile names to include, leave empty for all profiles
    #[arg(short, long, value_name = "LIST")]
    pub profiles: Option<String>,

    /// String used for one level of indentation; \t, \n and \r escapes are understood [default: \t]
    #[arg(long, value_name = "STR", allow_hyphen_values = true)]
    pub indent: Option<String>,

    /// Optional custom configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The settings given on the command line, in config form
    pub fn to_config(&self) -> Config {
        Config {
            input: self.input.clone(),
            output: self
                .output
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            profiles: self.profiles.as_deref().map(split_profile_list),
            indent: self.indent.clone(),
        }
    }
}

pub fn version_text() -> String {
    format!(
        "Version of application: {}, commit: {}\n\n\
         License: Apache License 2.0\n\n\
         You should have received a copy of the Apache License 2.0 along with this program. \
         If not, see <https://www.apache.org/licenses/LICENSE-2.0>.\n",
        env!("CARGO_PKG_VERSION"),
        env!("CHROMEMARK_COMMIT"),
    )
}

pub fn handle_args(cli: Cli) -> Result<()> {
    let mut warnings = StderrWarnings;

    let file_config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(&mut warnings),
    };
    let options = cli
        .to_config()
        .merge(file_config)
        .into_options(utils::default_chrome_dir())?;
    debug!("Resolved options: {:?}", options);

    let mut sink = OutputSink::open(options.output.as_deref())?;
    let summary = convert(&options, &mut sink, &mut warnings)?;
    sink.finish()?;

    debug!(
        "Rendered {} of {} discovered profile(s)",
        summary.rendered, summary.discovered
    );
    Ok(())
}
