use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "songweaver")]
#[command(about = "Build song prompts, artist bios and album pages from reorderable blocks")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Project file to open in the editor
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the editor (the default)
    Edit {
        /// Project file to open
        file: Option<PathBuf>,
    },

    /// Print the generated prompt of a project file
    Render {
        /// Project file (.songweaver)
        file: PathBuf,
    },

    /// Write the prompt of a project file as markdown
    ExportMd {
        /// Project file (.songweaver)
        file: PathBuf,

        /// Output path (default: song-prompt.md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the prompt of a project file as a PDF
    ExportPdf {
        /// Project file (.songweaver)
        file: PathBuf,

        /// Output path (default: song-prompt.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_file_opens_editor() {
        let cli = Cli::parse_from(["songweaver", "night.songweaver"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("night.songweaver")));
    }

    #[test]
    fn test_export_pdf_with_output() {
        let cli = Cli::parse_from(["songweaver", "export-pdf", "a.songweaver", "-o", "out.pdf"]);
        match cli.command {
            Some(Command::ExportPdf { file, output }) => {
                assert_eq!(file, PathBuf::from("a.songweaver"));
                assert_eq!(output, Some(PathBuf::from("out.pdf")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
