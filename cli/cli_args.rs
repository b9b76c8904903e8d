use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "srcpack",
    author,
    version,
    about = "Pack a project's source files and directory tree into a single bundle.",
    long_about = "srcpack walks a project directory, keeps files whose suffix is on the extension \nallow-list and whose path contains none of the ignore tokens, orders them so \nmanifests and entry points come first, and writes a tree plus every file's content \ninto one artifact for LLM context windows or archival dumps.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  srcpack                            # Pack the current directory\n  srcpack -o context.txt             # Choose the output file\n  srcpack -e .go .proto              # Only .go and .proto files\n  srcpack --ignore testdata mocks    # Extra ignore tokens\n  srcpack --stdout | pbcopy          # Bundle to stdout for pipes\n  srcpack -f data                    # Python data module instead of text"
)]
pub struct Cli {
    #[arg(
        value_name = "ROOT",
        default_value = ".",
        help = "Project root directory (default: current dir)."
    )]
    pub root: PathBuf,

    #[arg(
        short = 'o',
        long,
        value_name = "PATH",
        help = "Output file [default: project_context.txt, or project_dump.py with -f data]. Ignored with --stdout.",
        help_heading = "Output Control"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        help = "Write the bundle to standard output instead of a file.",
        help_heading = "Output Control"
    )]
    pub stdout: bool,

    #[arg(
        short = 'f',
        long,
        value_name = "FORMAT",
        default_value = "text",
        value_parser = ["text", "data"],
        help = "Bundle format: annotated text or a Python data module.",
        help_heading = "Output Control"
    )]
    pub format: String,

    #[arg(
        long,
        help = "Omit the leading statistics header.",
        help_heading = "Output Control"
    )]
    pub no_stats: bool,

    #[arg(
        short = 'e',
        long,
        value_name = "EXT",
        num_args = 1..,
        help = "Replace the extension allow-list (e.g. .go .proto).",
        help_heading = "Filtering"
    )]
    pub extensions: Vec<String>,

    #[arg(
        long,
        value_name = "TOKEN",
        num_args = 1..,
        help = "Extra substrings to ignore, added to the built-in set.",
        help_heading = "Filtering"
    )]
    pub ignore: Vec<String>,

    #[arg(
        long,
        help = "Skip dot-prefixed entries except allow-listed ones like .env [default with -f data].",
        help_heading = "Filtering"
    )]
    pub skip_hidden: bool,

    #[arg(
        long,
        help = "Print the effective configuration as TOML and exit.",
        help_heading = "Utilities"
    )]
    pub print_config: bool,

    #[arg(
        long,
        value_name = "SHELL",
        help = "Print a shell completion script and exit.",
        help_heading = "Utilities"
    )]
    pub completions: Option<Shell>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(short, long, help = "Silence status messages and warnings.")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn multi_value_flags_collect_tokens() {
        let cli = Cli::parse_from([
            "srcpack", "proj", "-e", ".go", ".proto", "--ignore", "testdata", "mocks", "--stdout",
        ]);
        assert_eq!(cli.root, PathBuf::from("proj"));
        assert_eq!(cli.extensions, vec![".go", ".proto"]);
        assert_eq!(cli.ignore, vec!["testdata", "mocks"]);
        assert!(cli.stdout);
        assert_eq!(cli.format, "text");
    }

    #[test]
    fn defaults_apply_without_arguments() {
        let cli = Cli::parse_from(["srcpack"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.output.is_none());
        assert!(cli.extensions.is_empty());
        assert!(!cli.no_stats);
    }
}
