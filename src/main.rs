//! contractgen CLI entrypoint
//! Parses command-line arguments and dispatches to the generation pass.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use contractgen::{
    Config, GenerationPass, PassContext,
    declarations::{DeclarationLoader, FileDeclarationLoader},
    generation::{ArtifactSink, Generator},
    generators::GeneratorKind,
    infrastructure::{FileSystemArtifactSink, MemoryArtifactSink, ResourceLocator, SourceEmitter},
};
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contractgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate Java sources for the contracts in a declaration manifest
    Generate {
        /// Declaration manifest (YAML or JSON)
        #[arg(long)]
        declarations: PathBuf,
        /// Directory generated sources are written to
        #[arg(long, default_value = "generated")]
        output_dir: PathBuf,
        /// Directory resource lookups start from
        #[arg(long, default_value = ".")]
        search_root: PathBuf,
        /// Optional contractgen.toml
        #[arg(long)]
        config: Option<PathBuf>,
        /// Generators to run: all, resources, services or messages
        #[arg(long, default_value = "all")]
        generator: String,
        /// Generate without writing, listing what would be written
        #[arg(long)]
        dry_run: bool,
    },
    /// Show where a logical resource path resolves
    Resolve {
        /// Logical path, e.g. com/example/logo.png
        path: String,
        /// Directory resource lookups start from
        #[arg(long, default_value = ".")]
        search_root: PathBuf,
        /// Optional contractgen.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Generate {
            declarations,
            output_dir,
            search_root,
            config,
            generator,
            dry_run,
        } => {
            generate(GenerateParams {
                declarations,
                output_dir,
                search_root,
                config,
                generator,
                dry_run: *dry_run,
            })
            .await?
        }
        Commands::Resolve {
            path,
            search_root,
            config,
        } => resolve(path, search_root, config).await?,
    }
    Ok(())
}

/// Parameters for a generation run
struct GenerateParams<'a> {
    declarations: &'a PathBuf,
    output_dir: &'a PathBuf,
    search_root: &'a PathBuf,
    config: &'a Option<PathBuf>,
    generator: &'a str,
    dry_run: bool,
}

/// Run one generation pass over a declaration manifest
async fn generate(params: GenerateParams<'_>) -> anyhow::Result<()> {
    let kind: GeneratorKind = params
        .generator
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid generator '{}': {}", params.generator, e))?;

    info!(
        declarations = %params.declarations.display(),
        generator = %kind,
        "Starting generation"
    );

    let config = Config::load(params.config.as_deref())
        .await
        .context("Failed to load configuration")?;

    let source = params.declarations.to_string_lossy();
    let declarations = FileDeclarationLoader::new()
        .load(&source)
        .await
        .with_context(|| format!("Failed to load declarations from {source}"))?;

    let locator = ResourceLocator::new(params.search_root, &config.locator);
    let emitter = SourceEmitter::new().context("Failed to initialize source emitter")?;
    let pass = GenerationPass::new(PassContext::new(&declarations, &locator, &config, &emitter));

    let generators = kind.generators();
    let generators: Vec<&dyn Generator> = generators.iter().map(|g| g.as_ref()).collect();

    if params.dry_run {
        let mut sink = MemoryArtifactSink::new();
        run_pass(&pass, &generators, &mut sink)?;
        for name in sink.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut sink = FileSystemArtifactSink::new(params.output_dir);
    let summary = run_pass(&pass, &generators, &mut sink)?;
    info!(
        output_dir = %params.output_dir.display(),
        artifacts = summary.artifacts_count(),
        "Successfully generated sources"
    );
    println!(
        "Generated {} source file(s) in {}",
        summary.artifacts_count(),
        params.output_dir.display()
    );
    Ok(())
}

fn run_pass(
    pass: &GenerationPass<'_>,
    generators: &[&dyn Generator],
    sink: &mut dyn ArtifactSink,
) -> anyhow::Result<contractgen::PassSummary> {
    pass.run_all(generators, sink)
        .context("Generation pass failed")
}

/// Print the file a logical resource path resolves to
async fn resolve(
    path: &str,
    search_root: &Path,
    config: &Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = Config::load(config.as_deref())
        .await
        .context("Failed to load configuration")?;
    let locator = ResourceLocator::new(search_root, &config.locator);

    match locator.resolve(path) {
        Some(file) => {
            println!("{}", file.display());
            Ok(())
        }
        None => Err(anyhow::anyhow!(
            "Resource '{}' not found from {}",
            path,
            locator.root().display()
        )),
    }
}
