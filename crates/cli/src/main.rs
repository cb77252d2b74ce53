//! CLI for the legal toolkit.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use legal_toolkit::{
    ContentGenerator, DocumentPayload, ExportedFile, InputResolver, PresentationOptions,
    ToolInput, ToolRequest, Upload,
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Run a legal assistant tool and export the result as PDF and DOCX.
#[derive(Parser, Debug)]
#[command(name = "legal-toolkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output directory for the PDF and DOCX files (default: current directory)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Print the generated text only; write no files
    #[arg(short, long, global = true)]
    print: bool,

    /// Reduce visual motion in the hosting UI
    #[arg(long, global = true)]
    reduce_motion: bool,

    /// Use the high-contrast dark theme in the hosting UI
    #[arg(long, global = true)]
    dark_mode: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Legal Research Assistant: summarize a legal topic
    Research {
        /// Legal topic to research
        #[arg(short, long)]
        topic: String,
    },

    /// Case Brief Helper: brief a judgment
    CaseBrief(DocumentArgs),

    /// Legal Drafting Assistant: draft from a scenario
    Draft {
        /// Scenario to draft for
        #[arg(short, long)]
        scenario: String,
    },

    /// Contract Drafting Assistant: draft a contract between two parties
    Contract {
        /// Contract type, e.g. NDA
        #[arg(long)]
        contract_type: String,

        /// First party
        #[arg(long)]
        party_a: String,

        /// Second party
        #[arg(long)]
        party_b: String,

        /// Clauses to include
        #[arg(long, default_value = "")]
        clauses: String,
    },

    /// Contract Analyzer: analyze a contract's clauses
    Analyze(DocumentArgs),

    /// Print the normalized text of a .pdf, .docx or .txt file
    Extract {
        /// Document to read
        input: PathBuf,
    },
}

/// Document input shared by the document tools.
#[derive(clap::Args, Debug)]
struct DocumentArgs {
    /// Legal document to upload (.pdf, .docx, .txt); takes precedence over --text
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Legal text pasted directly
    #[arg(short, long, default_value = "")]
    text: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let resolver = InputResolver::new();

    let input = match &cli.command {
        Command::Extract { input } => {
            let payload = resolve_document(&resolver, Some(input.as_path()), "")?;
            println!("{}", payload.text());
            return Ok(());
        }
        Command::Research { topic } => ToolInput::LegalResearch {
            topic: topic.clone(),
        },
        Command::CaseBrief(args) => ToolInput::CaseBrief {
            document: resolve_document(&resolver, args.file.as_deref(), &args.text)?,
        },
        Command::Draft { scenario } => ToolInput::LegalDrafting {
            scenario: scenario.clone(),
        },
        Command::Contract {
            contract_type,
            party_a,
            party_b,
            clauses,
        } => ToolInput::ContractDrafting {
            contract_type: contract_type.clone(),
            party_a: party_a.clone(),
            party_b: party_b.clone(),
            clauses: clauses.clone(),
        },
        Command::Analyze(args) => ToolInput::ContractAnalyzer {
            document: resolve_document(&resolver, args.file.as_deref(), &args.text)?,
        },
    };

    input.ensure_ready()?;

    let request = ToolRequest::new(input).with_presentation(PresentationOptions {
        reduce_motion: cli.reduce_motion,
        dark_mode: cli.dark_mode,
    });

    if cli.print {
        let document = ContentGenerator::new().generate(&request.input);
        println!("{}", document.text);
        return Ok(());
    }

    let tool = request.tool();
    let output = legal_toolkit::run(request)
        .with_context(|| format!("Failed to export {} result", tool))?;

    println!("{}", output.document.text);

    let output_dir = cli.output.unwrap_or_else(|| PathBuf::from("."));
    for file in [&output.pdf, &output.docx] {
        let path = write_output(&output_dir, file)?;
        if cli.verbose {
            eprintln!("Written to: {}", path.display());
        }
    }

    Ok(())
}

/// Resolve a document from a file (preferred) or pasted text.
fn resolve_document(
    resolver: &InputResolver,
    file: Option<&Path>,
    pasted: &str,
) -> Result<DocumentPayload> {
    let upload = file.map(read_upload).transpose()?;
    let payload = resolver
        .resolve(upload.as_ref(), pasted)
        .context("Failed to read document")?;

    log::debug!(
        "Resolved '{}': {} lines",
        payload.name(),
        payload.lines().len()
    );
    Ok(payload)
}

/// Read a file from disk as an upload named after its filename.
fn read_upload(path: &Path) -> Result<Upload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to open {}", path.display()))?;

    Ok(Upload::new(upload_name(path), bytes))
}

/// The upload name is the file name; invalid UTF-8 is replaced so the
/// extension still selects the decoder.
fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Write one exported file into `dir`, returning its path.
fn write_output(dir: &Path, exported: &ExportedFile) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(&exported.file_name);
    let mut file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(&exported.bytes)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use legal_toolkit::DocumentFormat;

    #[test]
    fn test_upload_name_is_file_name() {
        assert_eq!(upload_name(Path::new("cases/smith_v_jones.pdf")), "smith_v_jones.pdf");
        assert_eq!(upload_name(Path::new("/")), "unknown");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name_keeps_extension() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"judgment_\xFF.pdf"));
        let name = upload_name(path);
        assert!(name.ends_with(".pdf"), "{}", name);
        assert_eq!(DocumentFormat::from_filename(&name), DocumentFormat::Pdf);
    }
}
