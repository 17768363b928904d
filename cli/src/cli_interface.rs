use clap::{ArgAction, Parser, Subcommand};

#[allow(clippy::upper_case_acronyms)]
#[derive(Parser, Debug)]
#[clap(name = "ethadapter", about, version)]
pub struct CLI {
    #[clap(subcommand)]
    pub command: Commands,

    /// Increase log output, `-v` for debug and `-vv` for trace.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log output, `-q` for warnings and `-qq` for errors only.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates the contract adapter from the artifacts directory.
    ///
    /// Nothing is written when the artifacts and contract addresses are unchanged since the
    /// last build, pass `--force` to regenerate anyway.
    ///
    /// Example:
    /// `ethadapter build` or `ethadapter build --force --format`
    #[clap(name = "build")]
    Build {
        /// optional - The project path, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,

        /// Regenerate even when nothing changed.
        #[clap(long, short)]
        force: bool,

        /// Run rustfmt over the generated files.
        #[clap(long)]
        format: bool,

        /// optional - Artifacts directory, relative to the project path.
        #[clap(long)]
        artifacts: Option<String>,

        /// optional - Output directory for the generated adapter, relative to the project path.
        #[clap(long)]
        output: Option<String>,

        /// optional - Adapter template replacing the bundled one.
        #[clap(long)]
        template: Option<String>,
    },

    /// Writes an `ethadapter.yaml` with one contract address entry per artifact.
    ///
    /// Example:
    /// `ethadapter init` or `ethadapter init --no-prompt`
    #[clap(name = "init")]
    Init {
        /// optional - The project path, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,

        /// Replace an existing config file.
        #[clap(long)]
        overwrite: bool,

        /// Write unset addresses instead of asking for each contract.
        #[clap(long)]
        no_prompt: bool,
    },

    /// Brings `contractAddresses` in line with the artifacts directory.
    ///
    /// Example:
    /// `ethadapter amend`
    #[clap(name = "amend")]
    Amend {
        /// optional - The project path, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,
    },

    /// Shows the current input hashes next to the ones recorded by the last build.
    ///
    /// Example:
    /// `ethadapter hash`
    #[clap(name = "hash")]
    Hash {
        /// optional - The project path, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,
    },
}
